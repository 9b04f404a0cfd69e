use super::*;

use crate::decl::{GenericParam, TypeExpr};
use crate::diag::Span;

fn span() -> Span {
    Span::default()
}

fn pair_params() -> Vec<GenericParam> {
    vec![
        GenericParam::new("A", span()),
        GenericParam::new("B", span()),
    ]
}

#[test]
fn test_zip_binds_leading_params_only() {
    let params = pair_params();
    let args = vec![TypeExpr::named("string")];

    let binding = TypeArgBinding::zip(&params, &args);
    assert!(binding.is_bound("A"));
    assert!(!binding.is_bound("B"));
    assert_eq!(binding.get("A"), Some(&TypeExpr::named("string")));
}

#[test]
fn test_zip_with_no_args_is_empty() {
    let binding = TypeArgBinding::zip(&pair_params(), &[]);
    assert!(binding.is_empty());
}

#[test]
fn test_substitute_replaces_bound_and_retains_free() {
    let params = pair_params();
    let args = vec![TypeExpr::named("string")];
    let binding = TypeArgBinding::zip(&params, &args);

    let expr = TypeExpr::fn_of(
        vec![TypeExpr::param("A"), TypeExpr::param("B")],
        TypeExpr::param("A"),
    );
    let rewritten = substitute(&expr, &binding);

    assert_eq!(
        rewritten,
        TypeExpr::fn_of(
            vec![TypeExpr::named("string"), TypeExpr::param("B")],
            TypeExpr::named("string"),
        )
    );
}

#[test]
fn test_substitute_rewrites_nested_type_args() {
    let params = vec![GenericParam::new("Item", span())];
    let args = vec![TypeExpr::named("u64")];
    let binding = TypeArgBinding::zip(&params, &args);

    let expr = TypeExpr::named_with_args("Box", vec![TypeExpr::param("Item")]);
    let rewritten = substitute(&expr, &binding);
    assert_eq!(
        rewritten,
        TypeExpr::named_with_args("Box", vec![TypeExpr::named("u64")])
    );

    let member = TypeExpr::member("U", vec![TypeExpr::param("Item")], "Handler");
    let rewritten = substitute(&member, &binding);
    assert_eq!(
        rewritten,
        TypeExpr::member("U", vec![TypeExpr::named("u64")], "Handler")
    );
}

#[test]
fn test_free_params_in_first_appearance_order() {
    let expr = TypeExpr::fn_of(
        vec![TypeExpr::param("B"), TypeExpr::param("A")],
        TypeExpr::param("B"),
    );

    let free = free_params(&expr);
    let names: Vec<&str> = free.iter().map(|name| name.as_str()).collect();
    assert_eq!(names, vec!["B", "A"]);
}

#[test]
fn test_no_free_params_after_full_substitution() {
    let params = pair_params();
    let args = vec![TypeExpr::named("u32"), TypeExpr::named("bool")];
    let binding = TypeArgBinding::zip(&params, &args);

    let expr = TypeExpr::fn_of(
        vec![TypeExpr::param("A"), TypeExpr::param("B")],
        TypeExpr::unit(),
    );
    let rewritten = substitute(&expr, &binding);
    assert!(free_params(&rewritten).is_empty());
}
