use std::fmt;
use std::io;

use crate::graph::ResolveError;

/// Failure while writing a document
///
/// Output already written before the failure stays in the sink.
#[derive(Debug)]
pub enum RenderError {
    /// The output sink rejected a write
    Io(io::Error),
    /// A type reference could not be looked up
    Resolve(ResolveError),
    /// A page template failed to render
    Template(askama::Error),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Io(err) => write!(f, "failed to write document: {}", err),
            RenderError::Resolve(err) => write!(f, "failed to resolve type: {}", err),
            RenderError::Template(err) => write!(f, "failed to render template: {}", err),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Io(err) => Some(err),
            RenderError::Resolve(err) => Some(err),
            RenderError::Template(err) => Some(err),
        }
    }
}

impl From<io::Error> for RenderError {
    fn from(err: io::Error) -> Self {
        RenderError::Io(err)
    }
}

impl From<ResolveError> for RenderError {
    fn from(err: ResolveError) -> Self {
        RenderError::Resolve(err)
    }
}

impl From<askama::Error> for RenderError {
    fn from(err: askama::Error) -> Self {
        RenderError::Template(err)
    }
}
