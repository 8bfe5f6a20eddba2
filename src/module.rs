//! Module specific definitions and functions

use std::fmt;
use std::sync::Arc;

use crate::expr;
use crate::indentation::{DisplayIndented, Indentation};
use crate::types;


/// A hardware block
#[derive(Clone, Debug)]
pub struct Module {
    name: Arc<str>,
    ports: Vec<Arc<Port>>,
}

impl Module {
    /// Create a new module
    pub fn new(
        name: impl Into<Arc<str>>,
        ports: impl IntoIterator<Item = (Arc<str>, types::Type, Direction)>,
    ) -> Self {
        let mut ports: Vec<_> = ports
            .into_iter()
            .map(|(n, t, d)| Arc::new(Port {name: n, r#type: t, direction: d}))
            .collect();
        ports.sort_unstable_by_key(|p| p.name.clone());

        Self {name: name.into(), ports}
    }

    /// Retrieve the module's name
    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    /// Retrieve the module's I/O ports
    pub fn ports(&self) -> impl Iterator<Item = &Arc<Port>> {
        self.ports.iter()
    }

    /// Retrieve a specific port by its name
    pub fn port_by_name(&self, name: &impl AsRef<str>) -> Option<&Arc<Port>> {
        self.ports.binary_search_by_key(&name.as_ref(), |p| p.name.as_ref()).ok().map(|i| &self.ports[i])
    }
}

impl DisplayIndented for Module {
    fn fmt<W: fmt::Write>(&self, indentation: Indentation, f: &mut W) -> fmt::Result {
        writeln!(f, "{}module {}:", indentation, self.name())?;
        let indentation = indentation.sub();
        self.ports().try_for_each(|p| DisplayIndented::fmt(p.as_ref(), indentation, f))
    }
}


/// An I/O port of a module
#[derive(Clone, Debug, PartialEq)]
pub struct Port {
    name: Arc<str>,
    r#type: types::Type,
    direction: Direction,
}

impl Port {
    /// Create a new port
    pub fn new(name: impl Into<Arc<str>>, r#type: impl Into<types::Type>, direction: Direction) -> Self {
        Self {name: name.into(), r#type: r#type.into(), direction}
    }

    /// Retrieve the port's type
    pub fn r#type(&self) -> &types::Type {
        &self.r#type
    }

    /// Retrieve the port's direction
    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl expr::Reference for Port {
    fn name(&self) -> &str {
        self.name.as_ref()
    }

    fn flow(&self) -> Option<expr::Flow> {
        match self.direction {
            Direction::Input  => Some(expr::Flow::Source),
            Direction::Output => Some(expr::Flow::Sink),
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use expr::Reference;

        write!(f, "{} {}: {}", self.direction, self.name(), self.r#type)
    }
}


/// Direction of a module port
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Direction {Input, Output}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input  => write!(f, "input"),
            Self::Output => write!(f, "output"),
        }
    }
}
