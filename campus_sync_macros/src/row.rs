use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Field, Fields, LitStr};

pub fn derive_row(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    // #[row(table = "...")] on the struct
    let table = extract_table(&input);

    let id = match extract_id_field(&input) {
        Ok(id) => id,
        Err(err) => return err.to_compile_error().into(),
    };
    let id_ident = &id.ident;
    let id_ty = &id.ty;
    let column = &id.column;

    let expanded = quote! {
        impl campus_sync::Row for #name {
            const TABLE: &'static str = #table;
            const ID_FIELD: &'static str = #column;

            type Id = #id_ty;

            fn id(&self) -> Self::Id {
                ::std::clone::Clone::clone(&self.#id_ident)
            }
        }
    };

    TokenStream::from(expanded)
}

struct IdField {
    ident: syn::Ident,
    ty: syn::Type,
    column: String,
}

fn extract_table(input: &DeriveInput) -> String {
    for attr in &input.attrs {
        if !attr.path().is_ident("row") {
            continue;
        }

        let mut table = None;
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("table") {
                let value: LitStr = meta.value()?.parse()?;
                table = Some(value.value());
            }
            Ok(())
        });

        if let Some(t) = table {
            return t;
        }
    }

    // Default: snake_case struct name + "s"
    let name = input.ident.to_string();
    format!("{}s", to_snake_case(&name))
}

fn extract_id_field(input: &DeriveInput) -> syn::Result<IdField> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "Row derive: only structs with named fields are supported",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Row derive: only structs are supported",
            ))
        }
    };

    for field in fields {
        if let Some(column) = marked_id(field)? {
            return Ok(id_field(field, column));
        }
    }

    // Default: a field named `id`
    for field in fields {
        if field.ident.as_ref().is_some_and(|ident| ident == "id") {
            return Ok(id_field(field, None));
        }
    }

    Err(syn::Error::new_spanned(
        &input.ident,
        "Row derive: no field marked with #[row(id)] and no field named `id`",
    ))
}

/// Returns `Some(column override)` when the field carries `#[row(id)]`.
fn marked_id(field: &Field) -> syn::Result<Option<Option<String>>> {
    for attr in &field.attrs {
        if !attr.path().is_ident("row") {
            continue;
        }

        let mut is_id = false;
        let mut column = None;
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("id") {
                is_id = true;
            } else if meta.path.is_ident("column") {
                let value: LitStr = meta.value()?.parse()?;
                column = Some(value.value());
            }
            Ok(())
        })?;

        if is_id {
            return Ok(Some(column));
        }
    }
    Ok(None)
}

fn id_field(field: &Field, column: Option<String>) -> IdField {
    // Named fields always carry an ident.
    let ident = field.ident.clone().expect("named field");
    let column = column.unwrap_or_else(|| ident.to_string());
    IdField {
        ident,
        ty: field.ty.clone(),
        column,
    }
}

fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::to_snake_case;

    #[test]
    fn snake_case_table_names() {
        assert_eq!(to_snake_case("Booking"), "booking");
        assert_eq!(to_snake_case("TimeSlot"), "time_slot");
    }
}
