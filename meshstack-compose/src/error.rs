//! Error types for topology scanning and composition

use crate::records::DeclarationSite;

/// Structured error type for the composition pipeline.
///
/// Shapes the scanner does not recognize are ordinary non-matches and never
/// surface here; `LinkRootNotFound` is the one loud failure, raised when a
/// link argument is syntactically valid but cannot be unwound to a binding.
#[derive(Debug)]
pub enum ComposeError {
    LinkRootNotFound {
        site: DeclarationSite,
        argument: String,
    },
    Parse {
        path: String,
        message: String,
    },
    Io {
        path: String,
        source: std::io::Error,
    },
}

impl std::fmt::Display for ComposeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComposeError::LinkRootNotFound { site, argument } => {
                write!(
                    f,
                    "{}: cannot resolve subgraph link `{}` to a service binding",
                    site, argument
                )
            }
            ComposeError::Parse { path, message } => {
                write!(f, "Parse error in {}: {}", path, message)
            }
            ComposeError::Io { path, source } => write!(f, "I/O error on {}: {}", path, source),
        }
    }
}

impl std::error::Error for ComposeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ComposeError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_root_not_found_display() {
        let err = ComposeError::LinkRootNotFound {
            site: DeclarationSite::new("src/main.rs", 12, 9),
            argument: "(a, b)".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("src/main.rs:12:9"));
        assert!(msg.contains("(a, b)"));
    }

    #[test]
    fn test_io_error_chains_source() {
        use std::error::Error;
        let err = ComposeError::Io {
            path: "src".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.source().is_some());
    }
}
