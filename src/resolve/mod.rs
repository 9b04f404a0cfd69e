pub mod binding;
pub mod errors;
mod resolver;

pub use binding::{TypeArgBinding, free_params, substitute};
pub use errors::{ResolveError, ResolverFault};
pub use resolver::{AliasResolver, ResolverOptions};

use crate::decl::{AliasUseSite, DeclGraph, NominalTypeDecl};
use crate::diag::Error;
use crate::types::ResolvedType;

/// Resolves a single alias use against `graph` with default options.
pub fn resolve_alias_use(
    graph: &DeclGraph,
    decl: &NominalTypeDecl,
    use_site: &AliasUseSite,
) -> Result<ResolvedType, Error> {
    AliasResolver::new(graph).resolve_alias_use(decl, use_site)
}

#[cfg(test)]
#[path = "../tests/resolve/t_resolve.rs"]
mod tests;

#[cfg(test)]
#[path = "../tests/resolve/t_binding.rs"]
mod tests_binding;
