// Copyright (c) 2021 FZI Forschungszentrum Informatik
// SPDX-License-Identifier: Apache-2.0
//! Hardware value handles

use std::fmt;
use std::sync::Arc;

use num_bigint::BigUint;

use crate::entity::Expression;
use crate::error::Error;
use crate::types::{GroundType, Type};


/// Handle on a hardware value
///
/// A `Value` pairs a type with the expression backing the value. A value
/// without a backing expression is an unbound type prototype: it describes
/// hardware of the given type without referring to any. Prototypes are what
/// memory declarations expect as element type; almost everything else
/// requires values backed by elaborated hardware.
#[derive(Clone, Debug, PartialEq)]
pub struct Value {
    r#type: Type,
    expr: Option<Expression>,
}

impl Value {
    /// Create an unbound prototype of the given type
    pub fn of_type(r#type: impl Into<Type>) -> Self {
        Self {r#type: r#type.into(), expr: None}
    }

    /// Create an unsigned integer literal of the given width
    pub fn literal(width: u16, value: impl Into<BigUint>) -> Self {
        Self {
            r#type: GroundType::UInt(Some(width)).into(),
            expr: Some(Expression::UIntLiteral{value: value.into(), width}),
        }
    }

    /// Create a single-bit literal from a boolean
    pub fn bool(value: bool) -> Self {
        Self::literal(1, if value { 1u8 } else { 0u8 })
    }

    /// Create a value backed by the given expression
    pub(crate) fn bound(r#type: Type, expr: Expression) -> Self {
        Self {r#type, expr: Some(expr)}
    }

    /// Retrieve the value's type
    pub fn r#type(&self) -> &Type {
        &self.r#type
    }

    /// Check whether the value is backed by elaborated hardware
    pub fn is_hardware(&self) -> bool {
        self.expr.is_some()
    }

    /// Retrieve the expression backing this value
    ///
    /// For prototypes, which no hardware backs, this function returns a
    /// [NotHardware](Error::NotHardware) error.
    pub fn expression(&self) -> Result<&Expression, Error> {
        self.expr
            .as_ref()
            .ok_or_else(|| Error::NotHardware{what: format!("unbound type `{}`", self.r#type)})
    }

    /// Retrieve the given element of a vector-typed value
    ///
    /// Returns `None` if the value is not elaborated hardware, not of a
    /// vector type or the index exceeds the vector width.
    pub fn index(&self, index: u16) -> Option<Self> {
        let base = Arc::new(self.expr.clone()?);
        match &self.r#type {
            Type::Vector(t, w) if index < *w => Some(Self::bound(
                t.as_ref().clone(),
                Expression::SubIndex{base, index},
            )),
            _ => None,
        }
    }

    /// Retrieve the field with the given name of a bundle-typed value
    ///
    /// Returns `None` if the value is not elaborated hardware, not of a
    /// bundle type or the bundle has no such field.
    pub fn field(&self, field: &str) -> Option<Self> {
        let base = Arc::new(self.expr.clone()?);
        self.r#type.field(field).map(|f| Self::bound(
            f.r#type().clone(),
            Expression::SubField{base, field: f.name().clone()},
        ))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.expr {
            Some(e) => write!(f, "{}: {}", e, self.r#type),
            None    => write!(f, "type {}", self.r#type),
        }
    }
}
