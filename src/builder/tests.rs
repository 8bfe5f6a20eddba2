//! Tests related to the construction context

use crate::command::Kind;
use crate::error::Error;
use crate::memory::PortDir;
use crate::tests::module_builder;
use crate::types::GroundType;
use crate::value::Value;

use super::BindingKind;


#[test]
fn commands_appear_in_call_order() {
    let mut builder = module_builder();

    let wire = builder.wire(GroundType::UInt(Some(8)));
    builder.invalidate(&wire).expect("invalidate failed");
    let data = builder.port("data").expect("no data port");
    builder.connect(&wire, &data).expect("connect failed");

    let commands: Vec<_> = builder.finish().expect("build failed");
    let kinds: Vec<_> = commands.iter().map(|c| c.kind().clone()).collect();
    assert!(matches!(kinds[0], Kind::Declaration(..)));
    assert!(matches!(kinds[1], Kind::Invalidate(..)));
    assert!(matches!(kinds[2], Kind::Connection{..}));

    let ids: std::collections::HashSet<_> = commands.iter().map(|c| c.id()).collect();
    assert_eq!(ids.len(), 3);
}


#[test]
fn guard_scope_closes_on_error() {
    let mut builder = module_builder();

    let enable = builder.port("en").expect("no enable port");
    let proto = Value::of_type(GroundType::UInt(Some(8)));

    let res: Result<(), Error> = builder.with_guard(
        enable.expression().expect("enable is hardware").clone(),
        |b| {
            let wire = b.wire(GroundType::UInt(Some(8)));
            b.connect(&wire, &proto)?;
            Ok(())
        },
    );
    assert!(res.is_err());

    // The scope was unwound regardless of the failure inside it: the guard
    // stack is empty again and the conditional was emitted.
    assert!(builder.guard().is_empty());
    let commands: Vec<_> = builder.finish().expect("build failed");
    assert_eq!(commands.len(), 1);
    match commands[0].kind() {
        Kind::Conditional{body, ..} => assert_eq!(body.len(), 1),
        k => panic!("expected conditional, found {:?}", k),
    }
}


#[test]
fn nested_guards_nest_in_the_stream() {
    let mut builder = module_builder();

    let enable = builder.port("en").expect("no enable port");
    let en = enable.expression().expect("enable is hardware").clone();

    builder.with_guard(en.clone(), |b| {
        assert_eq!(b.guard().len(), 1);
        b.with_guard(en.clone(), |b| {
            assert_eq!(b.guard().len(), 2);
            b.wire(GroundType::UInt(Some(1)));
        })
    });
    assert!(builder.guard().is_empty());

    let commands: Vec<_> = builder.finish().expect("build failed");
    assert_eq!(commands.len(), 1);
    let inner = match commands[0].kind() {
        Kind::Conditional{body, ..} => body,
        k => panic!("expected conditional, found {:?}", k),
    };
    assert_eq!(inner.len(), 1);
    match inner[0].kind() {
        Kind::Conditional{body, ..} => assert_eq!(body.len(), 1),
        k => panic!("expected nested conditional, found {:?}", k),
    }
}


#[test]
fn finish_closes_open_scopes() {
    let mut builder = module_builder();

    let enable = builder.port("en").expect("no enable port");
    builder.push_guard(enable.expression().expect("enable is hardware").clone());
    builder.wire(GroundType::UInt(Some(1)));

    let commands: Vec<_> = builder.finish().expect("build failed");
    assert_eq!(commands.len(), 1);
    assert!(matches!(commands[0].kind(), Kind::Conditional{..}));
}


#[test]
fn reported_errors_surface_collectively() {
    let mut builder = module_builder();

    builder.report_error(Error::ShapeMismatch{context: "write mask arity", expected: 4, found: 3});
    builder.report_error(Error::ShapeMismatch{context: "write data arity", expected: 4, found: 2});
    assert_eq!(builder.errors().count(), 2);

    let errors = builder.finish().expect_err("errors should surface");
    assert_eq!(errors.len(), 2);
    assert!(errors.errors().all(|e| !e.is_fatal()));
}


#[test]
fn bindings_record_module_and_guard() {
    let mut builder = module_builder();

    let enable = builder.port("en").expect("no enable port");
    let en = enable.expression().expect("enable is hardware").clone();

    let id = builder.allocate_id();
    builder.with_guard(en.clone(), |b| b.bind(id, BindingKind::MemPort(Some(PortDir::Read))));

    let binding = builder.binding(id).expect("no binding");
    assert_eq!(binding.kind(), &BindingKind::MemPort(Some(PortDir::Read)));
    assert_eq!(binding.module().name(), "top");
    assert_eq!(binding.guard().as_ref(), &[en]);
}


#[test]
fn modules_render_with_their_ports() {
    use crate::indentation::{DisplayIndented, Indentation};

    let builder = module_builder();
    let mut rendered: String = Default::default();
    DisplayIndented::fmt(builder.module().as_ref(), Indentation::root(), &mut rendered)
        .expect("rendering failed");
    let expected = vec![
        "module top:",
        "  input addr: UInt<8>",
        "  input clk: Clock",
        "  input data: UInt<8>",
        "  input en: UInt<1>",
        "",
    ];
    assert_eq!(rendered, expected.join("\n"));
}


#[test]
fn clock_can_be_replaced() {
    let mut builder = module_builder();

    let original = builder.clock().clone();
    let replacement = builder
        .port("en")
        .expect("no enable port")
        .expression()
        .expect("enable is hardware")
        .clone();

    builder.set_clock(replacement.clone());
    assert_eq!(builder.clock(), &replacement);
    assert_ne!(builder.clock(), &original);
}
