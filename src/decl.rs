use std::fmt;

use indexmap::IndexMap;
use thiserror::Error;

use crate::diag::Span;

// -- Declaration Graph ---

/// All nominal type declarations visible to the resolver, keyed by name.
///
/// The graph is produced once by the external parser/binder and is read-only
/// afterwards; every cross-declaration reference is by name, resolved through
/// lookup at resolution time.
#[derive(Clone, Debug, Default)]
pub struct DeclGraph {
    decls: IndexMap<String, NominalTypeDecl>,
}

impl DeclGraph {
    pub fn new() -> Self {
        Self {
            decls: IndexMap::new(),
        }
    }

    pub fn add_decl(&mut self, decl: NominalTypeDecl) -> Result<(), DeclError> {
        if self.decls.contains_key(&decl.name) {
            return Err(DeclError::DuplicateTypeDecl {
                name: decl.name.clone(),
                span: decl.span,
            });
        }
        self.decls.insert(decl.name.clone(), decl);
        Ok(())
    }

    pub fn decl(&self, name: &str) -> Option<&NominalTypeDecl> {
        self.decls.get(name)
    }

    pub fn decls(&self) -> impl Iterator<Item = &NominalTypeDecl> {
        self.decls.values()
    }
}

// -- Declarations ---

/// A nominal type declaration: an ordered generic parameter list plus a
/// name-keyed member map.
#[derive(Clone, Debug)]
pub struct NominalTypeDecl {
    pub name: String,
    pub params: Vec<GenericParam>,
    pub members: IndexMap<String, Member>,
    pub span: Span,
}

impl NominalTypeDecl {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            members: IndexMap::new(),
            span,
        }
    }

    /// Adds a generic parameter. Parameter names are unique per declaration.
    pub fn add_param(&mut self, param: GenericParam) -> Result<(), DeclError> {
        if self.params.iter().any(|p| p.name == param.name) {
            return Err(DeclError::DuplicateParam {
                ty: self.name.clone(),
                param: param.name,
                span: param.span,
            });
        }
        self.params.push(param);
        Ok(())
    }

    /// Adds a member. Member names are unique per declaration.
    pub fn add_member(&mut self, member: Member) -> Result<(), DeclError> {
        let name = member.name().to_string();
        if self.members.contains_key(&name) {
            return Err(DeclError::DuplicateMember {
                ty: self.name.clone(),
                member: name,
                span: member.span(),
            });
        }
        self.members.insert(name, member);
        Ok(())
    }

    /// Looks up a nested type alias member. Stored fields are not aliases.
    pub fn alias(&self, name: &str) -> Option<&TypeAliasDecl> {
        match self.members.get(name) {
            Some(Member::Alias(alias)) => Some(alias),
            _ => None,
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDecl> {
        self.members.values().filter_map(|member| match member {
            Member::Field(field) => Some(field),
            _ => None,
        })
    }
}

#[derive(Clone, Debug)]
pub enum Member {
    Alias(TypeAliasDecl),
    Field(FieldDecl),
}

impl Member {
    pub fn name(&self) -> &str {
        match self {
            Member::Alias(alias) => &alias.name,
            Member::Field(field) => &field.name,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Member::Alias(alias) => alias.span,
            Member::Field(field) => field.span,
        }
    }
}

/// A nested type alias. The body may reference the enclosing declaration's
/// generic parameters by name.
#[derive(Clone, Debug)]
pub struct TypeAliasDecl {
    pub name: String,
    pub body: TypeExpr,
    pub span: Span,
}

impl TypeAliasDecl {
    pub fn new(name: impl Into<String>, body: TypeExpr, span: Span) -> Self {
        Self {
            name: name.into(),
            body,
            span,
        }
    }
}

/// A stored field of a nominal type declaration.
#[derive(Clone, Debug)]
pub struct FieldDecl {
    pub name: String,
    pub ty: TypeExpr,
    pub span: Span,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, ty: TypeExpr, span: Span) -> Self {
        Self {
            name: name.into(),
            ty,
            span,
        }
    }
}

/// A generic parameter of a nominal type declaration. Alias bodies refer to
/// it by name only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenericParam {
    pub name: String,
    pub span: Span,
}

impl GenericParam {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

// -- Type Expressions ---

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeExpr {
    pub kind: TypeExprKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeExprKind {
    /// Reference to a builtin or nominal type, e.g. `string` or `Pair<u32, bool>`.
    Named { name: String, args: Vec<TypeExpr> },
    /// Qualified nested-member reference, e.g. `T<string>.Closure`.
    Member {
        ty: String,
        args: Vec<TypeExpr>,
        member: String,
    },
    /// Reference to a generic parameter of the enclosing declaration.
    Param(String),
    /// Function type, e.g. `fn(string) -> ()`.
    Fn {
        params: Vec<TypeExpr>,
        ret_ty: Box<TypeExpr>,
    },
}

impl TypeExpr {
    pub fn named(name: impl Into<String>) -> Self {
        Self::named_with_args(name, Vec::new())
    }

    pub fn named_with_args(name: impl Into<String>, args: Vec<TypeExpr>) -> Self {
        Self {
            kind: TypeExprKind::Named {
                name: name.into(),
                args,
            },
            span: Span::default(),
        }
    }

    pub fn member(ty: impl Into<String>, args: Vec<TypeExpr>, member: impl Into<String>) -> Self {
        Self {
            kind: TypeExprKind::Member {
                ty: ty.into(),
                args,
                member: member.into(),
            },
            span: Span::default(),
        }
    }

    pub fn param(name: impl Into<String>) -> Self {
        Self {
            kind: TypeExprKind::Param(name.into()),
            span: Span::default(),
        }
    }

    pub fn fn_of(params: Vec<TypeExpr>, ret_ty: TypeExpr) -> Self {
        Self {
            kind: TypeExprKind::Fn {
                params,
                ret_ty: Box::new(ret_ty),
            },
            span: Span::default(),
        }
    }

    pub fn unit() -> Self {
        Self::named("()")
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TypeExprKind::Named { name, args } => {
                write!(f, "{}", name)?;
                write_type_args(f, args)
            }
            TypeExprKind::Member { ty, args, member } => {
                write!(f, "{}", ty)?;
                write_type_args(f, args)?;
                write!(f, ".{}", member)
            }
            TypeExprKind::Param(name) => write!(f, "{}", name),
            TypeExprKind::Fn { params, ret_ty } => {
                let params_str = params
                    .iter()
                    .map(|p| p.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "fn({}) -> {}", params_str, ret_ty)
            }
        }
    }
}

fn write_type_args(f: &mut fmt::Formatter<'_>, args: &[TypeExpr]) -> fmt::Result {
    if args.is_empty() {
        return Ok(());
    }
    let args_str = args
        .iter()
        .map(|arg| arg.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    write!(f, "<{}>", args_str)
}

// -- Use Sites ---

/// A point where a nested alias is referenced through its enclosing type.
/// `type_args` are the concrete arguments supplied for the *outer*
/// declaration's generic parameters; the list may be shorter than the
/// parameter list, leaving trailing parameters unbound.
#[derive(Clone, Debug)]
pub struct AliasUseSite {
    pub alias: String,
    pub type_args: Vec<TypeExpr>,
    pub span: Span,
}

impl AliasUseSite {
    pub fn new(alias: impl Into<String>, type_args: Vec<TypeExpr>, span: Span) -> Self {
        Self {
            alias: alias.into(),
            type_args,
            span,
        }
    }
}

// -- Errors ---

#[derive(Clone, Debug, Error)]
pub enum DeclError {
    #[error("Type already declared: {name}")]
    DuplicateTypeDecl { name: String, span: Span },

    #[error("Generic parameter already declared on type {ty}: {param}")]
    DuplicateParam {
        ty: String,
        param: String,
        span: Span,
    },

    #[error("Member already declared on type {ty}: {member}")]
    DuplicateMember {
        ty: String,
        member: String,
        span: Span,
    },
}

impl DeclError {
    pub fn span(&self) -> Span {
        match self {
            DeclError::DuplicateTypeDecl { span, .. } => *span,
            DeclError::DuplicateParam { span, .. } => *span,
            DeclError::DuplicateMember { span, .. } => *span,
        }
    }
}

#[cfg(test)]
#[path = "tests/t_decl.rs"]
mod tests;
