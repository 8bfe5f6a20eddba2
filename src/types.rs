//! Types

mod ground;
mod r#type;



pub use ground::GroundType;
pub use r#type::{BundleField, Type};

use num_bigint::BigUint;


/// Bit-width of a ground-type, i.e. the number of "physical" wires or signals
///
/// A bit-width may be undefined in some instances, i.e. they may need to be
/// inferred later. However, if it is defined, it can never be zero.
pub type BitWidth = Option<u16>;

/// Number of elements in a vector
pub type VecWidth = u16;


/// Trait representing common type concepts
pub trait TypeExt {
    /// Check whether this type is type equivalent to another one
    ///
    /// Two types are equivalent if they have the same structure, disregarding
    /// any widths. In order to avoid confusion with `PartialEq` and `Eq`,
    /// users are encouraged to call `eq` as an associated function, e.g. as
    /// `TypeExt::eq(a, b)`.
    fn eq(&self, rhs: &Self) -> bool;

    /// If the type refers to a ground type, return that ground type
    fn ground_type(&self) -> Option<GroundType>;
}


/// Typed entity
pub trait Typed {
    /// Error type returned if the type could not be determined
    type Err;

    /// Representation of the entity's type
    type Type;

    /// Retrieve the entity's type
    fn r#type(&self) -> Result<Self::Type, Self::Err>;
}


/// Compute the width required for addressing the given number of elements
///
/// The width returned is wide enough to represent every address in the range
/// `0..depth`, i.e. `ceil(log2(depth))`, but never less than one bit.
pub fn required_address_width(depth: &BigUint) -> u16 {
    use num_traits::One;

    let one = BigUint::one();
    if depth <= &one {
        1
    } else {
        std::cmp::min((depth - one).bits(), u16::MAX as u64) as u16
    }
}
