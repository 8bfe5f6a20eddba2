// Copyright (c) 2021 FZI Forschungszentrum Informatik
// SPDX-License-Identifier: Apache-2.0
//! Referenable entities

use std::sync::Arc;

use num_traits::ToPrimitive;

use crate::expr;
use crate::expr::Reference;
use crate::memory;
use crate::module;
use crate::types;
use crate::types::Typed;


/// Expression type over referencable entities
pub type Expression = expr::Expression<Arc<Entity>>;


/// Referencable entity
///
/// Several entities may be referenced inside an expression. Entities other
/// than module ports come into existence through a declaring command.
#[derive(Clone, Debug, PartialEq)]
pub enum Entity {
    Port(Arc<module::Port>),
    Wire{name: Arc<str>, r#type: types::Type},
    Memory(Arc<memory::Memory>),
    MemPort(memory::Port<Arc<Self>>),
}

impl Entity {
    /// Checks whether this entity can be declared via a command
    ///
    /// Returns true if the entity can be declared, which will be the case for
    /// most entities. Note that [module::Port]s cannot be declared.
    pub fn is_declarable(&self) -> bool {
        match self {
            Self::Port(..) => false,
            _ => true,
        }
    }
}

impl From<Arc<module::Port>> for Entity {
    fn from(port: Arc<module::Port>) -> Self {
        Self::Port(port)
    }
}

impl From<Arc<memory::Memory>> for Entity {
    fn from(mem: Arc<memory::Memory>) -> Self {
        Self::Memory(mem)
    }
}

impl From<memory::Port<Arc<Entity>>> for Entity {
    fn from(port: memory::Port<Arc<Entity>>) -> Self {
        Self::MemPort(port)
    }
}

impl expr::Reference for Arc<Entity> {
    fn name(&self) -> &str {
        match self.as_ref() {
            Entity::Port(port)     => Reference::name(port.as_ref()),
            Entity::Wire{name, ..} => name.as_ref(),
            Entity::Memory(mem)    => mem.name(),
            Entity::MemPort(port)  => port.name(),
        }
    }

    fn flow(&self) -> Option<expr::Flow> {
        match self.as_ref() {
            Entity::Port(port)    => port.flow(),
            Entity::Wire{..}      => Some(expr::Flow::Duplex),
            Entity::Memory(_)     => Some(expr::Flow::Source),
            Entity::MemPort(port) => port.flow(),
        }
    }
}

impl types::Typed for Arc<Entity> {
    type Err = Self;

    type Type = types::Type;

    fn r#type(&self) -> Result<Self::Type, Self::Err> {
        match self.as_ref() {
            Entity::Port(port)       => Ok(port.r#type().clone()),
            Entity::Wire{r#type, ..} => Ok(r#type.clone()),
            Entity::Memory(mem)      => mem
                .depth()
                .to_u16()
                .map(|d| types::Type::Vector(Arc::new(mem.data_type().clone()), d))
                .ok_or_else(|| self.clone()),
            Entity::MemPort(port)    => port.r#type().map_err(|_| self.clone()),
        }
    }
}
