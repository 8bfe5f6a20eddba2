// Copyright (c) 2021 FZI Forschungszentrum Informatik
// SPDX-License-Identifier: Apache-2.0
//! Memory ports

use std::fmt;
use std::sync::Arc;

use crate::builder::{Binding, Builder, BindingKind};
use crate::entity::{Entity, Expression};
use crate::error::Error;
use crate::expr;
use crate::types::{self, GroundType, Type, TypeExt};
use crate::value::Value;

use super::{Memory, PortDir};


/// A port into a memory
///
/// A port grants access to the element a given address expression selects,
/// at the time governed by a given clock. Every access to a memory is backed
/// by a port of its own; ports are never shared between access sites.
#[derive(Clone, Debug, PartialEq)]
pub struct Port<R: expr::Reference> {
    name: Arc<str>,
    mem: Arc<Memory>,
    dir: Option<PortDir>,
    r#type: Type,
    addr: expr::Expression<R>,
    clock: expr::Expression<R>,
}

impl<R: expr::Reference> Port<R> {
    /// Create a new memory port
    ///
    /// The port will refer to the given memory, carrying its own clone of
    /// the memory's element type. A port created with a direction of `None`
    /// has its direction resolved downstream, from the way it is used.
    pub fn new(
        name: impl Into<Arc<str>>,
        mem: Arc<Memory>,
        dir: Option<PortDir>,
        r#type: Type,
        addr: expr::Expression<R>,
        clock: expr::Expression<R>,
    ) -> Self {
        Self {name: name.into(), mem, dir, r#type, addr, clock}
    }

    /// Retrieve the memory associated with this port
    pub fn memory(&self) -> &Arc<Memory> {
        &self.mem
    }

    /// Retrieve the direction of this port
    ///
    /// Ports with an open, to-be-inferred direction yield `None`.
    pub fn direction(&self) -> Option<PortDir> {
        self.dir
    }

    /// Retrieve the address
    pub fn address(&self) -> &expr::Expression<R> {
        &self.addr
    }

    /// Retrieve the clock driving this port
    pub fn clock(&self) -> &expr::Expression<R> {
        &self.clock
    }
}

impl<R: expr::Reference> types::Typed for Port<R> {
    type Err = Arc<Memory>;

    type Type = Type;

    fn r#type(&self) -> Result<Self::Type, Self::Err> {
        Ok(self.r#type.clone())
    }
}

impl<R: expr::Reference> expr::Reference for Port<R> {
    fn name(&self) -> &str {
        self.name.as_ref()
    }

    fn flow(&self) -> Option<expr::Flow> {
        self.dir.map(|d| d.flow())
    }
}

impl<R: expr::Reference> fmt::Display for Port<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use expr::Reference;

        let mdir = match self.direction() {
            Some(PortDir::Read)      => "read",
            Some(PortDir::Write)     => "write",
            Some(PortDir::ReadWrite) => "rdwr",
            None                     => "infer",
        };
        write!(
            f,
            "{} mport {} = {}[{}], {}",
            mdir,
            self.name(),
            self.memory().name(),
            self.address(),
            self.clock(),
        )
    }
}


/// Compute the address expression for an access to the given memory
///
/// The index must be elaborated hardware of an unsigned integer type. A
/// literal index is range-checked against the memory's depth and re-emitted
/// at address width. A dynamic index is truncated to address width if the
/// depth is not a power of two and the index is, or may be, wider. A dynamic
/// index exceeding the depth selects no element; the access yields an
/// undefined result rather than an error.
pub(crate) fn address(mem: &Memory, index: &Value) -> Result<Expression, Error> {
    let width = types::required_address_width(mem.depth());

    match index.expression()? {
        Expression::UIntLiteral{value, ..} => if value < mem.depth() {
            Ok(Expression::UIntLiteral{value: value.clone(), width})
        } else {
            Err(Error::IndexOutOfBounds{index: value.clone(), depth: mem.depth().clone()})
        },
        e => {
            let index_width = match index.r#type().ground_type() {
                Some(GroundType::UInt(w)) => w,
                _ => return Err(Error::NotHardware{
                    what: format!("index `{}` of type `{}`, expected an unsigned integer", e, index.r#type()),
                }),
            };

            let pow2 = mem.depth().count_ones() == 1;
            if pow2 || index_width.map(|w| w <= width).unwrap_or(false) {
                Ok(e.clone())
            } else {
                let op = expr::primitive::Operation::Bits(Arc::new(e.clone()), width - 1, 0);
                Ok(op.into())
            }
        },
    }
}


/// Create a port against the given memory
///
/// This function validates the index, emits a single port definition
/// command carrying a fresh clone of the element type, the memory
/// reference, the direction, the validated address and the clock currently
/// active in the builder, and binds the command's identity as a memory
/// port. No command is emitted if validation fails.
#[track_caller]
pub(crate) fn make_port(
    builder: &mut Builder,
    mem: &Arc<Memory>,
    index: &Value,
    dir: Option<PortDir>,
) -> Result<Value, Error> {
    let addr = address(mem, index)?;

    if builder.binding(mem.id()).map(Binding::kind) != Some(&BindingKind::Memory) {
        return Err(Error::NotHardware{
            what: format!("memory `{}`, not declared in module `{}`", mem.name(), builder.module().name()),
        })
    }

    let name: Arc<str> = format!("{}_p{}", mem.name(), builder.pending_id()).into();
    let r#type = mem.data_type().clone();
    let port = Port::new(name, mem.clone(), dir, r#type.clone(), addr, builder.clock().clone());
    let entity = Arc::new(Entity::MemPort(port));

    let id = builder.push_command(crate::command::Kind::DefMemPort(entity.clone()));
    builder.bind(id, BindingKind::MemPort(dir));
    Ok(Value::bound(r#type, entity.into()))
}
