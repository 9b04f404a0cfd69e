use thiserror::Error;

use crate::diag::Span;

/// Reported diagnostics. These are ordinary results of resolution; the
/// resolver never escalates them into internal faults, and resolution of
/// other use sites continues unaffected.
#[derive(Clone, Debug, Error)]
pub enum ResolveError {
    #[error("Undefined type alias: {ty}.{member}")]
    UnknownMember {
        ty: String,
        member: String,
        span: Span,
    },

    #[error("Unresolved generic parameter(s): {}", params.join(", "))]
    UnresolvedGenericParams { params: Vec<String>, span: Span },

    #[error("Invalid type argument count for type {ty}: expected {expected}, found {found}")]
    TypeArgCountMismatch {
        ty: String,
        expected: usize,
        found: usize,
        span: Span,
    },
}

impl ResolveError {
    pub fn span(&self) -> Span {
        match self {
            ResolveError::UnknownMember { span, .. } => *span,
            ResolveError::UnresolvedGenericParams { span, .. } => *span,
            ResolveError::TypeArgCountMismatch { span, .. } => *span,
        }
    }
}

/// Fatal conditions. Kept distinct from reported diagnostics: a fault means
/// resolution itself could not run to completion, not that the input program
/// is wrong in a user-reportable way.
#[derive(Clone, Debug, Error)]
pub enum ResolverFault {
    #[error("Alias expansion exceeded the depth limit ({limit})")]
    ExpansionTooDeep { limit: usize, span: Span },
}

impl ResolverFault {
    pub fn span(&self) -> Span {
        match self {
            ResolverFault::ExpansionTooDeep { span, .. } => *span,
        }
    }
}
