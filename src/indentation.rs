//! Indentation utilities

use std::fmt;


/// Print with indentation
pub trait DisplayIndented {
    /// Print the instance with the given indentation
    fn fmt<W: fmt::Write>(&self, indentation: Indentation, f: &mut W) -> fmt::Result;
}

impl<T> DisplayIndented for T
    where T: fmt::Display
{
    fn fmt<W: fmt::Write>(&self, indentation: Indentation, f: &mut W) -> fmt::Result {
        writeln!(f, "{}{}", indentation, self)
    }
}


/// Indentation level
///
/// Instances of this type represent the nesting depth at which an item is
/// rendered. The `Display` impl emits the corresponding number of space
/// characters.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Indentation(usize);

impl Indentation {
    /// Create a new "root" indentation, i.e. no indentation at all
    pub fn root() -> Self {
        Default::default()
    }

    /// Create a new `Indentation` one (i.e. nested) level deeper
    pub fn sub(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Indentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use std::fmt::Write;

        (0..self.0 * INDENTATION_STEP).try_for_each(|_| f.write_char(' '))
    }
}


/// Number of spaces for one indentation step
const INDENTATION_STEP: usize = 2;
