//! Utility functions

/// Render a syn path as `a::b::C`, dropping generic arguments.
pub fn path_to_string(path: &syn::Path) -> String {
    path.segments
        .iter()
        .map(|seg| seg.ident.to_string())
        .collect::<Vec<_>>()
        .join("::")
}

/// Render a syn type as source-like text for diagnostics.
///
/// Token printing inserts spaces around `::` and `<`; collapse those so the
/// result reads like what the author wrote.
pub fn type_to_string(ty: &syn::Type) -> String {
    quote::quote!(#ty)
        .to_string()
        .replace(" :: ", "::")
        .replace(" < ", "<")
        .replace(" > ", ">")
        .replace(" >", ">")
}

/// Render an expression as source-like text for diagnostics.
pub fn expr_to_string(expr: &syn::Expr) -> String {
    quote::quote!(#expr)
        .to_string()
        .replace(" :: ", "::")
        .replace(" . ", ".")
        .replace(" (", "(")
        .replace(" , ", ", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_to_string() {
        let path: syn::Path = syn::parse_str("crate::services::AccountsService").unwrap();
        assert_eq!(path_to_string(&path), "crate::services::AccountsService");
    }

    #[test]
    fn test_type_to_string_collapses_token_spacing() {
        let ty: syn::Type = syn::parse_str("Vec<crate::EdgeGateway>").unwrap();
        assert_eq!(type_to_string(&ty), "Vec<crate::EdgeGateway>");
    }

    #[test]
    fn test_expr_to_string() {
        let expr: syn::Expr = syn::parse_str("accounts.clone()").unwrap();
        assert_eq!(expr_to_string(&expr), "accounts.clone()");

        let tuple: syn::Expr = syn::parse_str("(a, b)").unwrap();
        assert_eq!(expr_to_string(&tuple), "(a, b)");
    }
}
