// Copyright (c) 2021 FZI Forschungszentrum Informatik
// SPDX-License-Identifier: Apache-2.0
//! Error types

use std::error::Error as StdError;
use std::fmt;

use num_bigint::BigUint;


/// Construction error
///
/// Errors of this type are raised while lowering memory declarations and
/// accesses into commands. Fatal errors abort the construction of the
/// current statement before any command is emitted for it. Recoverable
/// errors are reported to the [Builder](crate::builder::Builder) instead
/// and surface collectively when the build is finished.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// A declaration expected an unbound type but received bound hardware
    UnboundType{bound: String},
    /// A statically known index lies outside the addressable range
    IndexOutOfBounds{index: BigUint, depth: BigUint},
    /// A value was used where elaborated hardware is required
    NotHardware{what: String},
    /// An aggregate operation received operands of mismatched arity
    ShapeMismatch{context: &'static str, expected: usize, found: usize},
}

impl Error {
    /// Check whether the error must abort the current statement
    ///
    /// Non-fatal errors are meant to be reported and accumulated, leaving
    /// the affected statement in an undefined but recoverable state.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::ShapeMismatch{..} => false,
            _ => true,
        }
    }
}

impl StdError for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnboundType{bound}                        =>
                write!(f, "expected an unbound type, found hardware bound as {}", bound),
            Self::IndexOutOfBounds{index, depth}            =>
                write!(f, "index {} outside the addressable range 0..{}", index, depth),
            Self::NotHardware{what}                         =>
                write!(f, "not concrete hardware: {}", what),
            Self::ShapeMismatch{context, expected, found}   =>
                write!(f, "{}: expected {} elements, found {}", context, expected, found),
        }
    }
}


/// Errors accumulated over an entire build
///
/// Contains every error reported to a builder, in the order of reporting.
#[derive(Clone, Debug, PartialEq)]
pub struct BuildErrors(Vec<Error>);

impl BuildErrors {
    /// Retrieve the individual errors, in the order they were reported
    pub fn errors(&self) -> impl Iterator<Item = &Error> {
        self.0.iter()
    }

    /// Retrieve the number of accumulated errors
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether any error was accumulated at all
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Error>> for BuildErrors {
    fn from(errors: Vec<Error>) -> Self {
        Self(errors)
    }
}

impl StdError for BuildErrors {}

impl fmt::Display for BuildErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} construction error(s):", self.len())?;
        self.errors().try_for_each(|e| writeln!(f, "  {}", e))
    }
}
