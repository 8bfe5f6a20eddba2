//! Datatypes and utilities specific to expressions

pub mod primitive;

#[cfg(test)]
mod tests;

use std::fmt;
use std::sync::Arc;

use num_bigint::BigUint;


/// An expression
#[derive(Clone, Debug, PartialEq)]
pub enum Expression<R: Reference> {
    /// An unsigned integer literal
    UIntLiteral{value: BigUint, width: u16},
    /// A reference expression
    Reference(R),
    /// A sub-field expression
    SubField{base: Arc<Expression<R>>, field: Arc<str>},
    /// A sub-index expression
    SubIndex{base: Arc<Expression<R>>, index: u16},
    /// A sub-access expression
    SubAccess{base: Arc<Expression<R>>, index: Arc<Expression<R>>},
    /// A multiplexer expression
    Mux{sel: Arc<Expression<R>>, a: Arc<Expression<R>>, b: Arc<Expression<R>>},
    /// A valid-if expression
    ValidIf{sel: Arc<Expression<R>>, value: Arc<Expression<R>>},
    /// A primitive operation
    PrimitiveOp(primitive::Operation<R>),
}

impl<R: Reference> From<R> for Expression<R> {
    fn from(reference: R) -> Self {
        Self::Reference(reference)
    }
}

impl<R: Reference> From<primitive::Operation<R>> for Expression<R> {
    fn from(op: primitive::Operation<R>) -> Self {
        Self::PrimitiveOp(op)
    }
}

impl<R: Reference> fmt::Display for Expression<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UIntLiteral{value, width} => write!(f, "UInt<{}>({})", width, value),
            Self::Reference(r)              => fmt::Display::fmt(r.name(), f),
            Self::SubField{base, field}     => write!(f, "{}.{}", base, field),
            Self::SubIndex{base, index}     => write!(f, "{}[{}]", base, index),
            Self::SubAccess{base, index}    => write!(f, "{}[{}]", base, index),
            Self::Mux{sel, a, b}            => write!(f, "mux({}, {}, {})", sel, a, b),
            Self::ValidIf{sel, value}       => write!(f, "validif({}, {})", sel, value),
            Self::PrimitiveOp(op)           => fmt::Display::fmt(op, f),
        }
    }
}


/// A reference to a named entity
pub trait Reference {
    /// Retrieve the name of the referenced entity
    fn name(&self) -> &str;

    /// Retrieve the flow of the referenced entity
    ///
    /// If the flow is not known, e.g. because it will only be resolved later,
    /// this function will return `None`.
    fn flow(&self) -> Option<Flow>;
}


/// Flow of a reference
///
/// The flow determines whether a referenced entity may be read from, written
/// to, or both.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Flow {Source, Sink, Duplex}
