use std::fmt;

/// Type lookup failure
///
/// A reference that simply has no declaration is only an error when the graph
/// was built without tolerance for missing dependencies; see
/// [`Graph::with_ignore_not_found`](super::Graph::with_ignore_not_found).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The referenced name is not a syntactically valid type name
    InvalidName {
        /// The rejected type name
        type_name: String,
        /// Full name of the declaration the lookup was made from
        context: String,
    },
    /// No declaration matches the referenced name
    NotFound {
        /// The unresolved type name
        type_name: String,
        /// Full name of the declaration the lookup was made from
        context: String,
        /// Logical path of the file containing the reference
        file: String,
    },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::InvalidName { type_name, context } => {
                write!(f, "invalid type name '{}' referenced from {}", type_name, context)
            }
            ResolveError::NotFound {
                type_name,
                context,
                file,
            } => {
                write!(
                    f,
                    "type '{}' referenced from {} ({}) could not be resolved",
                    type_name, context, file
                )
            }
        }
    }
}

impl std::error::Error for ResolveError {}
