// Copyright (c) 2021 FZI Forschungszentrum Informatik
// SPDX-License-Identifier: Apache-2.0
//! Memory component

mod port;


use std::fmt;
use std::sync::Arc;

#[cfg(test)]
use quickcheck::{Arbitrary, Gen};

use num_bigint::BigUint;

use crate::builder::{Builder, BindingKind, Id};
use crate::error::Error;
use crate::expr;
use crate::types::Type;
use crate::value::Value;

pub use port::Port;


/// A memory
///
/// A memory is an addressable array of hardware values sharing one element
/// type. It is declared once, through [declare](Memory::declare), and
/// accessed any number of times afterwards; every access creates a fresh
/// [Port].
///
/// Whether a read is combinational or registered is a property of the
/// memory's [Kind]. Writes take effect on the next edge of the clock active
/// at the time of the write request. If two writes target the same element
/// in the same cycle, the element's resulting content is undefined.
#[derive(Clone, Debug, PartialEq)]
pub struct Memory {
    id: Id,
    name: Arc<str>,
    data_type: Type,
    depth: BigUint,
    kind: Kind,
}

impl Memory {
    /// Declare a new memory
    ///
    /// The memory will hold `depth` elements of the type given via the
    /// `element` prototype. The prototype's type is cloned, so that the
    /// memory owns an isolated instance. The declaration registers the
    /// memory with the builder and emits exactly one declaration command.
    ///
    /// Unless disabled via the builder's options, `element` must be an
    /// unbound prototype. Passing a value backed by elaborated hardware is
    /// an error.
    #[track_caller]
    pub fn declare(
        builder: &mut Builder,
        name: impl Into<Arc<str>>,
        depth: impl Into<BigUint>,
        element: &Value,
        kind: Kind,
    ) -> Result<Arc<Self>, Error> {
        if builder.options().bind_checks {
            if let Ok(expr) = element.expression() {
                return Err(Error::UnboundType {bound: expr.to_string()})
            }
        }

        let res = Arc::new(Self {
            id: builder.allocate_id(),
            name: name.into(),
            data_type: element.r#type().clone(),
            depth: depth.into(),
            kind,
        });
        builder.bind(res.id, BindingKind::Memory);

        let decl = match kind {
            Kind::Combinatory   => crate::command::Kind::DefMemory(res.clone()),
            Kind::Sequential(_) => crate::command::Kind::DefSeqMemory(res.clone()),
        };
        builder.push_command(decl);
        Ok(res)
    }

    /// Retrieve the memory's identity
    pub fn id(&self) -> Id {
        self.id
    }

    /// Retrieve the memory's name
    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    /// Retrieve the data type of the memory
    ///
    /// This function returns the type of a single element in the memory.
    pub fn data_type(&self) -> &Type {
        &self.data_type
    }

    /// Retrieve the depth, i.e. the number of elements in the memory
    pub fn depth(&self) -> &BigUint {
        &self.depth
    }

    /// Retrieve the kind of memory
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Retrieve the read-under-write behaviour
    ///
    /// Only registered-read memories have a read-under-write behaviour.
    pub fn read_under_write(&self) -> Option<ReadUnderWrite> {
        if let Kind::Sequential(ruw) = self.kind {
            Some(ruw)
        } else {
            None
        }
    }

    /// Read the element at the given index
    ///
    /// For a combinational memory, the value returned is available in the
    /// same cycle as the index. For a registered-read memory, this function
    /// is defined as [read_enable](Memory::read_enable) with the enable held
    /// at a constant one: the value becomes available a cycle later, and
    /// read-after-write ordering within a cycle is governed solely by the
    /// memory's declared [ReadUnderWrite] behaviour.
    #[track_caller]
    pub fn read(mem: &Arc<Self>, builder: &mut Builder, index: &Value) -> Result<Value, Error> {
        match mem.kind {
            Kind::Combinatory   => port::make_port(builder, mem, index, Some(PortDir::Read)),
            Kind::Sequential(_) => Self::read_enable(mem, builder, index, &Value::bool(true)),
        }
    }

    /// Read the element at the given index, gated by an enable
    ///
    /// The read is synthesized from lower primitives: an address holding
    /// wire is declared and invalidated, then, under a guard scoped by
    /// `enable`, the index is connected into the wire and a plain read port
    /// is created against it. The value returned is therefore only
    /// meaningful for cycles in which `enable` was asserted.
    #[track_caller]
    pub fn read_enable(
        mem: &Arc<Self>,
        builder: &mut Builder,
        index: &Value,
        enable: &Value,
    ) -> Result<Value, Error> {
        use crate::types::{GroundType, required_address_width};

        let en = enable.expression()?.clone();
        let addr = port::address(mem, index)?;

        let holder = builder.wire(GroundType::UInt(Some(required_address_width(mem.depth()))));
        builder.invalidate(&holder)?;
        builder.with_guard(en, |b| {
            let to = holder.expression()?.clone();
            b.connect_raw(to, addr);
            port::make_port(b, mem, &holder, Some(PortDir::Read))
        })
    }

    /// Write the given data to the element at the given index
    ///
    /// The write becomes effective on the next edge of the clock currently
    /// active in the builder. The result of two writes targeting the same
    /// element in the same cycle is undefined.
    #[track_caller]
    pub fn write(
        mem: &Arc<Self>,
        builder: &mut Builder,
        index: &Value,
        data: &Value,
    ) -> Result<(), Error> {
        let payload = data.expression()?.clone();
        let port = port::make_port(builder, mem, index, Some(PortDir::Write))?;
        let to = port.expression()?.clone();
        builder.connect_raw(to, payload);
        Ok(())
    }

    /// Write individual elements of an aggregate, selected by a mask
    ///
    /// Requires the memory's element type to be a vector type. A single
    /// write port is created for the whole aggregate; each element `i` of
    /// `data` is then connected to the corresponding port element under a
    /// guard scoped by `mask[i]`.
    ///
    /// A mask or data arity disagreeing with the element type's is reported
    /// to the builder as a recoverable error; the write is dropped but
    /// construction continues.
    #[track_caller]
    pub fn write_masked(
        mem: &Arc<Self>,
        builder: &mut Builder,
        index: &Value,
        data: &Value,
        mask: &[Value],
    ) -> Result<(), Error> {
        let arity = match mem.data_type().vector_width() {
            Some(w) => w as usize,
            None => {
                builder.report_error(Error::ShapeMismatch {
                    context: "masked write requires a vector element type",
                    expected: mask.len(),
                    found: 0,
                });
                return Ok(())
            },
        };

        if mask.len() != arity {
            builder.report_error(Error::ShapeMismatch {
                context: "write mask arity",
                expected: arity,
                found: mask.len(),
            });
            return Ok(())
        }

        let data_arity = data.r#type().vector_width().map(|w| w as usize).unwrap_or(0);
        if data_arity != arity {
            builder.report_error(Error::ShapeMismatch {
                context: "write data arity",
                expected: arity,
                found: data_arity,
            });
            return Ok(())
        }

        // All fatal validation happens before the port command is emitted.
        data.expression()?;
        let guards: Vec<_> = mask
            .iter()
            .map(|m| m.expression().map(Clone::clone))
            .collect::<Result<_, _>>()?;

        let port = port::make_port(builder, mem, index, Some(PortDir::Write))?;
        guards.into_iter().enumerate().try_for_each(|(i, guard)| {
            let element = port
                .index(i as u16)
                .and_then(|p| data.index(i as u16).map(|d| (p, d)));
            if let Some((to, from)) = element {
                let to = to.expression()?.clone();
                let from = from.expression()?.clone();
                builder.with_guard(guard, |b| b.connect_raw(to, from));
            }
            Ok(())
        })
    }

    /// Access the element at the given index, leaving the direction open
    ///
    /// The port created by this function carries no fixed direction; whether
    /// it acts as a read or a write port is resolved downstream, from the
    /// way the returned value is used.
    #[track_caller]
    pub fn access(mem: &Arc<Self>, builder: &mut Builder, index: &Value) -> Result<Value, Error> {
        port::make_port(builder, mem, index, None)
    }
}

impl fmt::Display for Memory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}[{}]", self.kind.keyword(), self.name(), self.data_type, self.depth)?;
        if let Kind::Sequential(ruw) = self.kind {
            write!(f, ", {}", ruw)?;
        }
        Ok(())
    }
}


/// Kind of memory
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Kind {
    /// Combinational-read memory
    Combinatory,
    /// Registered-read memory, with its read-under-write behaviour
    Sequential(ReadUnderWrite),
}

impl Kind {
    /// Retrieve the keyword associated with the memory kind
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Combinatory   => "cmem",
            Self::Sequential(_) => "smem",
        }
    }
}

#[cfg(test)]
impl Arbitrary for Kind {
    fn arbitrary(g: &mut Gen) -> Self {
        let opts: [&dyn Fn(&mut Gen) -> Self; 2] = [
            &|_| Self::Combinatory,
            &|g| Self::Sequential(Arbitrary::arbitrary(g)),
        ];
        g.choose(&opts).unwrap()(g)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        match self {
            Self::Combinatory   => Box::new(std::iter::empty()),
            Self::Sequential(b) => Box::new(b.shrink().map(Self::Sequential)),
        }
    }
}


/// Read-under-write behaviour
///
/// Determines what a registered read returns if the element it targets is
/// written in the same cycle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ReadUnderWrite {
    /// The old value will be read
    Old,
    /// The new value will be read
    New,
    /// The value read is undefined
    Undefined,
}

impl ReadUnderWrite {
    /// Retrieve the keyword associated with the read-under-write behaviour
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Old       => "old",
            Self::New       => "new",
            Self::Undefined => "undefined",
        }
    }
}

impl Default for ReadUnderWrite {
    fn default() -> Self {
        Self::Undefined
    }
}

impl fmt::Display for ReadUnderWrite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.keyword(), f)
    }
}

#[cfg(test)]
impl Arbitrary for ReadUnderWrite {
    fn arbitrary(g: &mut Gen) -> Self {
        g.choose(&[Self::Old, Self::New, Self::Undefined]).unwrap().clone()
    }
}


/// The access direction of a port
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PortDir {Read, Write, ReadWrite}

impl PortDir {
    /// Retrieve the flow associated with the direction
    pub fn flow(&self) -> expr::Flow {
        match self {
            Self::Read      => expr::Flow::Source,
            Self::Write     => expr::Flow::Sink,
            Self::ReadWrite => expr::Flow::Duplex,
        }
    }
}

#[cfg(test)]
impl Arbitrary for PortDir {
    fn arbitrary(g: &mut Gen) -> Self {
        g.choose(&[Self::Read, Self::Write, Self::ReadWrite]).unwrap().clone()
    }
}
