//! Ground type

use std::fmt;

#[cfg(test)]
use quickcheck::{Arbitrary, Gen};

use super::BitWidth;


/// Ground type
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum GroundType {
    /// Unsigned integer type with width
    UInt(BitWidth),
    /// Signed integer type with width
    SInt(BitWidth),
    /// Clock type
    Clock,
}

impl GroundType {
    /// Retrieve the width of the ground type
    ///
    /// This function returns the width, i.e. the number of physical wires,
    /// corresponding to the type.
    pub fn width(&self) -> BitWidth {
        match self {
            Self::UInt(w) => *w,
            Self::SInt(w) => *w,
            Self::Clock   => Some(1),
        }
    }

    /// Create a copy of the type with the given width
    ///
    /// In the case of `Clock`, this function will return a simple copy.
    pub fn with_width(&self, width: BitWidth) -> Self {
        match self {
            Self::UInt(_) => Self::UInt(width),
            Self::SInt(_) => Self::SInt(width),
            Self::Clock   => Self::Clock,
        }
    }
}

impl super::TypeExt for GroundType {
    fn eq(&self, rhs: &Self) -> bool {
        match (self, rhs) {
            (Self::UInt(_), Self::UInt(_)) => true,
            (Self::SInt(_), Self::SInt(_)) => true,
            (Self::Clock,   Self::Clock)   => true,
            _ => false
        }
    }

    #[inline(always)]
    fn ground_type(&self) -> Option<GroundType> {
        Some(*self)
    }
}

impl fmt::Display for GroundType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn width(f: &mut fmt::Formatter<'_>, w: &BitWidth) -> fmt::Result {
            if let Some(w) = w {
                write!(f, "<{}>", w)
            } else {
                Ok(())
            }
        }

        match self {
            Self::UInt(w) => write!(f, "UInt").and_then(|_| width(f, w)),
            Self::SInt(w) => write!(f, "SInt").and_then(|_| width(f, w)),
            Self::Clock   => write!(f, "Clock"),
        }
    }
}

#[cfg(test)]
impl Arbitrary for GroundType {
    fn arbitrary(g: &mut Gen) -> Self {
        let opts: [&dyn Fn(&mut Gen) -> Self; 3] = [
            &|g| Self::UInt(Arbitrary::arbitrary(g)),
            &|g| Self::SInt(Arbitrary::arbitrary(g)),
            &|_| Self::Clock,
        ];
        g.choose(&opts).unwrap()(g)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        match self {
            Self::UInt(w) => Box::new(w.shrink().map(Self::UInt)),
            Self::SInt(w) => Box::new(w.shrink().map(Self::SInt)),
            Self::Clock   => Box::new(std::iter::empty()),
        }
    }
}
