//! The semantic-query boundary between the scanner and its host

/// A resolved type: simple name plus fully qualified path.
///
/// Crate-local symbols qualify from the crate root (`crate::module::Name`);
/// symbols from outside the scanned sources keep the path they were
/// referenced by (`meshstack::ServiceMetadata`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct TypeSymbol {
    pub name: String,
    pub qualified: String,
}

impl TypeSymbol {
    pub fn new(name: impl Into<String>, qualified: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qualified: qualified.into(),
        }
    }

    /// Build a symbol from a qualified path, taking the last segment as the
    /// simple name.
    pub fn from_qualified(qualified: impl Into<String>) -> Self {
        let qualified = qualified.into();
        let name = qualified
            .rsplit("::")
            .next()
            .unwrap_or(qualified.as_str())
            .to_string();
        Self { name, qualified }
    }
}

/// Read-only type oracle the resolver consults.
///
/// The resolver never inspects declarations itself; everything semantic
/// goes through this seam so hosts (and tests) can substitute their own
/// resolution.
pub trait SemanticQuery {
    /// Resolve a syntactic type reference to a symbol, if known.
    fn resolve_type(&self, ty: &syn::Type) -> Option<TypeSymbol>;

    /// Every capability (trait) the symbol is known to implement, including
    /// capabilities reached through supertrait bounds. Deterministically
    /// ordered.
    fn capabilities_of(&self, symbol: &TypeSymbol) -> Vec<TypeSymbol>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_qualified_takes_last_segment() {
        let sym = TypeSymbol::from_qualified("crate::services::AccountsService");
        assert_eq!(sym.name, "AccountsService");
        assert_eq!(sym.qualified, "crate::services::AccountsService");
    }

    #[test]
    fn test_from_qualified_bare_name() {
        let sym = TypeSymbol::from_qualified("EdgeGateway");
        assert_eq!(sym.name, "EdgeGateway");
        assert_eq!(sym.qualified, "EdgeGateway");
    }
}
