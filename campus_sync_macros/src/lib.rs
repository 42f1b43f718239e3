mod row;

use proc_macro::TokenStream;

/// Derive macro for `campus_sync::Row`.
///
/// ```ignore
/// #[derive(Clone, Serialize, Deserialize, Row)]
/// #[row(table = "resources")]
/// struct Resource {
///     #[row(id)]
///     id: i64,
///     name: String,
/// }
/// ```
///
/// - `#[row(table = "...")]` names the table; defaults to the snake_case
///   struct name plus `s`.
/// - `#[row(id)]` marks the identity field; defaults to a field named `id`.
///   `#[row(id, column = "...")]` overrides the wire column name.
#[proc_macro_derive(Row, attributes(row))]
pub fn derive_row(input: TokenStream) -> TokenStream {
    row::derive_row(input)
}
