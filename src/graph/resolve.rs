use super::{Declaration, Graph, ResolveError, ResolvedType, ScalarType};

impl Graph {
    /// Resolve `type_name` as written inside `context`.
    ///
    /// Names with a leading `.` are fully qualified. Other names follow
    /// protobuf scoping: the context's own full name is the innermost scope,
    /// then each enclosing prefix is tried, ending at the root.
    ///
    /// Returns `Ok(None)` for a missing declaration when the graph tolerates
    /// missing dependencies.
    pub fn resolve_type<'g>(
        &'g self,
        context: &Declaration<'_>,
        type_name: &str,
    ) -> Result<Option<ResolvedType<'g>>, ResolveError> {
        if let Some(scalar) = ScalarType::parse(type_name) {
            return Ok(Some(ResolvedType::Scalar(scalar)));
        }

        if !is_valid_type_name(type_name) {
            return Err(ResolveError::InvalidName {
                type_name: type_name.to_string(),
                context: context.full_name(),
            });
        }

        let found = match type_name.strip_prefix('.') {
            Some(absolute) => self.lookup(absolute),
            None => self.lookup_scoped(&context.full_name(), type_name),
        };

        match found {
            Some(decl) => Ok(Some(ResolvedType::Declared(decl))),
            None if self.ignore_not_found() => Ok(None),
            None => Err(ResolveError::NotFound {
                type_name: type_name.to_string(),
                context: context.full_name(),
                file: context.file_path().to_string(),
            }),
        }
    }

    fn lookup_scoped(&self, scope: &str, type_name: &str) -> Option<Declaration<'_>> {
        let mut scope = scope;
        loop {
            let candidate = if scope.is_empty() {
                type_name.to_string()
            } else {
                format!("{scope}.{type_name}")
            };
            if let Some(decl) = self.lookup(&candidate) {
                return Some(decl);
            }
            if scope.is_empty() {
                return None;
            }
            scope = scope.rfind('.').map_or("", |idx| &scope[..idx]);
        }
    }
}

/// Dotted identifier path, optionally with a single leading dot.
fn is_valid_type_name(name: &str) -> bool {
    let body = name.strip_prefix('.').unwrap_or(name);
    !body.is_empty()
        && body.split('.').all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_alphanumeric() || c == '_')
        })
}
