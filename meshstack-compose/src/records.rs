//! Declaration records produced by the resolver and consumed by aggregation

/// Where a declaration was written: file path plus the line/column of the
/// identifier token that anchors it.
///
/// Sites are the pipeline's stable ordering key. Anchoring them on the
/// identifier token (the bound variable for services, the method name for
/// calls) keeps every record in a pass at a distinct position even when
/// several calls share one chained expression. Sites never serialize;
/// they order records and render in diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DeclarationSite {
    pub file: String,
    pub line: usize,
    pub column: usize,
}

impl DeclarationSite {
    pub fn new(file: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl std::fmt::Display for DeclarationSite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// One declared backend service: a `let` binding of a local name to a typed
/// `add_service` registration whose type carries the service marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDeclaration {
    /// Simple type name, e.g. `AccountsService`.
    pub type_name: String,
    /// Fully qualified path, e.g. `crate::services::AccountsService`.
    pub qualified_type: String,
    /// The `let`-bound variable name links resolve against.
    pub binding: String,
    pub site: DeclarationSite,
}

/// One `with_subgraph` call chained from a gateway declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatorLink {
    /// Gateway name: the declaration's string-literal argument, or the
    /// gateway type's simple name when no literal is present.
    pub gateway_name: String,
    /// Fully qualified gateway type path.
    pub gateway_type: String,
    /// Root identifier of the link argument.
    pub binding: String,
    /// Site of the `add_gateway` call this link chains from. Links from one
    /// declaration share this site; it is the aggregation grouping key.
    pub gateway_site: DeclarationSite,
    /// Site of the `with_subgraph` call itself.
    pub site: DeclarationSite,
}

/// A resolved declaration record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Service(ServiceDeclaration),
    Link(AggregatorLink),
}

impl Declaration {
    pub fn site(&self) -> &DeclarationSite {
        match self {
            Declaration::Service(s) => &s.site,
            Declaration::Link(l) => &l.site,
        }
    }
}
