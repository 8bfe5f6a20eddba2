//! Primitive operations

use std::fmt;
use std::sync::Arc;

use super::{Expression, Reference};


/// A single ("primitive") operation
#[derive(Clone, Debug, PartialEq)]
pub enum Operation<R: Reference> {
    /// Arithmetic addition
    Add(Arc<Expression<R>>, Arc<Expression<R>>),
    /// Arithmetic substraction
    Sub(Arc<Expression<R>>, Arc<Expression<R>>),
    /// Equal
    Eq(Arc<Expression<R>>, Arc<Expression<R>>),
    /// Bitwise AND
    And(Arc<Expression<R>>, Arc<Expression<R>>),
    /// Bitwise OR
    Or(Arc<Expression<R>>, Arc<Expression<R>>),
    /// Bitwise complement
    Not(Arc<Expression<R>>),
    /// Concatenation
    Cat(Arc<Expression<R>>, Arc<Expression<R>>),
    /// Bit extraction, with upper and lower bit position
    Bits(Arc<Expression<R>>, u16, u16),
    /// Padding to a given width
    Pad(Arc<Expression<R>>, u16),
}

impl<R: Reference> fmt::Display for Operation<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add(a, b)       => write!(f, "add({}, {})", a, b),
            Self::Sub(a, b)       => write!(f, "sub({}, {})", a, b),
            Self::Eq(a, b)        => write!(f, "eq({}, {})", a, b),
            Self::And(a, b)       => write!(f, "and({}, {})", a, b),
            Self::Or(a, b)        => write!(f, "or({}, {})", a, b),
            Self::Not(e)          => write!(f, "not({})", e),
            Self::Cat(a, b)       => write!(f, "cat({}, {})", a, b),
            Self::Bits(e, hi, lo) => write!(f, "bits({}, {}, {})", e, hi, lo),
            Self::Pad(e, w)       => write!(f, "pad({}, {})", e, w),
        }
    }
}
