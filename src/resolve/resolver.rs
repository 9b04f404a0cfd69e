//! Nested-alias resolution: lookup, argument binding, substitution,
//! graph expansion, and layout classification.

use indexmap::IndexSet;

use crate::decl::{AliasUseSite, DeclGraph, NominalTypeDecl, TypeExpr, TypeExprKind};
use crate::diag::{Error, Span};
use crate::resolve::binding::{TypeArgBinding, free_params, substitute};
use crate::resolve::errors::{ResolveError, ResolverFault};
use crate::types::{ResolvedType, StructField, Type, builtin_type};

/// Resolution limits supplied by the embedding driver.
#[derive(Clone, Copy, Debug)]
pub struct ResolverOptions {
    /// Maximum number of nested declaration expansions (alias bodies and
    /// struct fields) before resolution is aborted with a fault. Bounds
    /// mutually recursive aliases and recursive field types.
    pub max_expansion_depth: usize,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            max_expansion_depth: 64,
        }
    }
}

/// Resolves uses of nested type aliases against an immutable declaration
/// graph.
///
/// Each call allocates its own bindings and output; the resolver holds no
/// mutable state, so concurrent resolution over a shared graph needs no
/// coordination.
pub struct AliasResolver<'a> {
    graph: &'a DeclGraph,
    options: ResolverOptions,
}

impl<'a> AliasResolver<'a> {
    pub fn new(graph: &'a DeclGraph) -> Self {
        Self::with_options(graph, ResolverOptions::default())
    }

    pub fn with_options(graph: &'a DeclGraph, options: ResolverOptions) -> Self {
        Self { graph, options }
    }

    /// Resolves a use of a nested alias on `decl`. The use site's type
    /// arguments are applied to `decl`'s generic parameters in declared
    /// order; parameters left without an argument stay unbound, and any that
    /// the alias body still references are reported, never defaulted.
    pub fn resolve_alias_use(
        &self,
        decl: &NominalTypeDecl,
        use_site: &AliasUseSite,
    ) -> Result<ResolvedType, Error> {
        let ty = self.resolve_member(
            decl,
            &use_site.alias,
            &use_site.type_args,
            use_site.span,
            0,
        )?;
        Ok(ResolvedType::new(ty))
    }

    fn resolve_member(
        &self,
        decl: &NominalTypeDecl,
        member: &str,
        type_args: &[TypeExpr],
        span: Span,
        depth: usize,
    ) -> Result<Type, Error> {
        let Some(alias) = decl.alias(member) else {
            return Err(ResolveError::UnknownMember {
                ty: decl.name.clone(),
                member: member.to_string(),
                span,
            }
            .into());
        };

        if type_args.len() > decl.params.len() {
            return Err(ResolveError::TypeArgCountMismatch {
                ty: decl.name.clone(),
                expected: decl.params.len(),
                found: type_args.len(),
                span,
            }
            .into());
        }

        let binding = TypeArgBinding::zip(&decl.params, type_args);
        let body = substitute(&alias.body, &binding);

        let free = free_params(&body);
        if !free.is_empty() {
            return Err(ResolveError::UnresolvedGenericParams {
                params: declaration_order(decl, free),
                span,
            }
            .into());
        }

        self.concretize(&body, depth)
    }

    /// Expands a parameter-free type expression into a semantic type,
    /// resolving named references through the declaration graph.
    fn concretize(&self, expr: &TypeExpr, depth: usize) -> Result<Type, Error> {
        match &expr.kind {
            // Free references are rejected before concretization; a stray one
            // is still reported, never classified as layout-fixed.
            TypeExprKind::Param(name) => Err(ResolveError::UnresolvedGenericParams {
                params: vec![name.clone()],
                span: expr.span,
            }
            .into()),
            TypeExprKind::Named { name, args } => {
                self.concretize_named(name, args, expr.span, depth)
            }
            TypeExprKind::Member { ty, args, member } => {
                let Some(inner) = self.graph.decl(ty) else {
                    // The declaring type is outside the graph; the member's
                    // representation is not determinable here.
                    return Ok(Type::opaque(format!("{}.{}", ty, member)));
                };
                self.check_depth(expr.span, depth)?;
                self.resolve_member(inner, member, args, expr.span, depth + 1)
            }
            TypeExprKind::Fn { params, ret_ty } => {
                let params = params
                    .iter()
                    .map(|param| self.concretize(param, depth))
                    .collect::<Result<Vec<_>, _>>()?;
                let ret_ty = self.concretize(ret_ty, depth)?;
                Ok(Type::fn_of(params, ret_ty))
            }
        }
    }

    fn concretize_named(
        &self,
        name: &str,
        args: &[TypeExpr],
        span: Span,
        depth: usize,
    ) -> Result<Type, Error> {
        if let Some(ty) = builtin_type(name) {
            if !args.is_empty() {
                return Err(ResolveError::TypeArgCountMismatch {
                    ty: name.to_string(),
                    expected: 0,
                    found: args.len(),
                    span,
                }
                .into());
            }
            return Ok(ty);
        }

        let Some(decl) = self.graph.decl(name) else {
            return Ok(Type::opaque(name));
        };

        // A bare reference to a generic nominal: the layout is still
        // parametric, which the layout pass classifies as dependent.
        if args.is_empty() && !decl.params.is_empty() {
            return Ok(Type::opaque(name));
        }

        if args.len() != decl.params.len() {
            return Err(ResolveError::TypeArgCountMismatch {
                ty: decl.name.clone(),
                expected: decl.params.len(),
                found: args.len(),
                span,
            }
            .into());
        }

        self.check_depth(span, depth)?;
        let binding = TypeArgBinding::zip(&decl.params, args);
        let mut fields = Vec::with_capacity(decl.members.len());
        for field in decl.fields() {
            let field_ty = substitute(&field.ty, &binding);
            fields.push(StructField {
                name: field.name.clone(),
                ty: self.concretize(&field_ty, depth + 1)?,
            });
        }
        Ok(Type::Struct {
            name: decl.name.clone(),
            fields,
        })
    }

    fn check_depth(&self, span: Span, depth: usize) -> Result<(), Error> {
        if depth >= self.options.max_expansion_depth {
            return Err(ResolverFault::ExpansionTooDeep {
                limit: self.options.max_expansion_depth,
                span,
            }
            .into());
        }
        Ok(())
    }
}

/// Orders reported parameter names: declared parameters first, in declaration
/// order, then any stray references introduced through use-site arguments.
fn declaration_order(decl: &NominalTypeDecl, free: IndexSet<String>) -> Vec<String> {
    let mut params: Vec<String> = decl
        .params
        .iter()
        .filter(|param| free.contains(&param.name))
        .map(|param| param.name.clone())
        .collect();
    for name in free {
        if !params.contains(&name) {
            params.push(name);
        }
    }
    params
}
