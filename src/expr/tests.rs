//! Test related to expressions

use std::sync::Arc;

use crate::tests::Identifier;

use super::{Expression, primitive::Operation};


fn reference(name: &str) -> Arc<Expression<Identifier>> {
    Arc::new(Expression::Reference(Identifier::from(name)))
}


#[test]
fn expressions_render_in_source_syntax() {
    let a = reference("a");
    let b = reference("b");
    let sel = reference("sel");

    let literal: Expression<Identifier> = Expression::UIntLiteral{value: 42u8.into(), width: 8};
    assert_eq!(literal.to_string(), "UInt<8>(42)");

    let field = Expression::SubField{base: a.clone(), field: "bits".into()};
    assert_eq!(field.to_string(), "a.bits");

    let indexed = Expression::SubIndex{base: a.clone(), index: 3};
    assert_eq!(indexed.to_string(), "a[3]");

    let accessed = Expression::SubAccess{base: a.clone(), index: b.clone()};
    assert_eq!(accessed.to_string(), "a[b]");

    let mux = Expression::Mux{sel: sel.clone(), a: a.clone(), b: b.clone()};
    assert_eq!(mux.to_string(), "mux(sel, a, b)");

    let valid = Expression::ValidIf{sel: sel.clone(), value: a.clone()};
    assert_eq!(valid.to_string(), "validif(sel, a)");
}


#[test]
fn operations_render_in_source_syntax() {
    let a = reference("a");
    let b = reference("b");

    let cases: Vec<(Operation<Identifier>, &str)> = vec![
        (Operation::Add(a.clone(), b.clone()), "add(a, b)"),
        (Operation::Sub(a.clone(), b.clone()), "sub(a, b)"),
        (Operation::Eq(a.clone(), b.clone()),  "eq(a, b)"),
        (Operation::And(a.clone(), b.clone()), "and(a, b)"),
        (Operation::Or(a.clone(), b.clone()),  "or(a, b)"),
        (Operation::Not(a.clone()),            "not(a)"),
        (Operation::Cat(a.clone(), b.clone()), "cat(a, b)"),
        (Operation::Bits(a.clone(), 3, 0),     "bits(a, 3, 0)"),
        (Operation::Pad(a.clone(), 16),        "pad(a, 16)"),
    ];
    for (op, expected) in cases {
        assert_eq!(Expression::from(op).to_string(), expected);
    }
}
