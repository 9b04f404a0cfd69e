use indexmap::{IndexMap, IndexSet};

use crate::decl::{GenericParam, TypeExpr, TypeExprKind};

/// Use-site bindings from generic parameter names to concrete argument
/// expressions. Built once per resolution request; each parameter is bound
/// at most once and never rebound.
#[derive(Clone, Debug, Default)]
pub struct TypeArgBinding {
    args: IndexMap<String, TypeExpr>,
}

impl TypeArgBinding {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Zips declared parameters against use-site arguments, left to right.
    /// Trailing parameters with no argument stay unbound.
    pub fn zip(params: &[GenericParam], args: &[TypeExpr]) -> Self {
        let mut binding = Self::empty();
        for (param, arg) in params.iter().zip(args) {
            let prev = binding.args.insert(param.name.clone(), arg.clone());
            debug_assert!(prev.is_none(), "rebound generic parameter {}", param.name);
        }
        binding
    }

    pub fn get(&self, name: &str) -> Option<&TypeExpr> {
        self.args.get(name)
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.args.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

/// Rewrites `expr` under `binding`: bound parameter references are replaced
/// by their argument expression; unbound ones are retained as-is, never
/// defaulted or inferred.
pub fn substitute(expr: &TypeExpr, binding: &TypeArgBinding) -> TypeExpr {
    let kind = match &expr.kind {
        TypeExprKind::Param(name) => {
            return match binding.get(name) {
                Some(arg) => arg.clone(),
                None => expr.clone(),
            };
        }
        TypeExprKind::Named { name, args } => TypeExprKind::Named {
            name: name.clone(),
            args: args.iter().map(|arg| substitute(arg, binding)).collect(),
        },
        TypeExprKind::Member { ty, args, member } => TypeExprKind::Member {
            ty: ty.clone(),
            args: args.iter().map(|arg| substitute(arg, binding)).collect(),
            member: member.clone(),
        },
        TypeExprKind::Fn { params, ret_ty } => TypeExprKind::Fn {
            params: params.iter().map(|p| substitute(p, binding)).collect(),
            ret_ty: Box::new(substitute(ret_ty, binding)),
        },
    };
    TypeExpr {
        kind,
        span: expr.span,
    }
}

/// Collects the generic parameter references remaining in `expr`, in first
/// appearance order.
pub fn free_params(expr: &TypeExpr) -> IndexSet<String> {
    let mut free = IndexSet::new();
    collect_free_params(expr, &mut free);
    free
}

fn collect_free_params(expr: &TypeExpr, free: &mut IndexSet<String>) {
    match &expr.kind {
        TypeExprKind::Param(name) => {
            free.insert(name.clone());
        }
        TypeExprKind::Named { args, .. } | TypeExprKind::Member { args, .. } => {
            for arg in args {
                collect_free_params(arg, free);
            }
        }
        TypeExprKind::Fn { params, ret_ty } => {
            for param in params {
                collect_free_params(param, free);
            }
            collect_free_params(ret_ty, free);
        }
    }
}
