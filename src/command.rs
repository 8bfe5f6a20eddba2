// Copyright (c) 2021 FZI Forschungszentrum Informatik
// SPDX-License-Identifier: Apache-2.0
//! Commands and associated utilities


use std::fmt;
use std::sync::Arc;

use crate::builder::Id;
use crate::entity::{Entity, Expression};
use crate::indentation::{DisplayIndented, Indentation};
use crate::info;
use crate::memory::Memory;


/// An emitted command
///
/// Commands are the units making up the stream a builder emits. Their order
/// within the stream is significant: an entity's declaring command always
/// precedes every command referring to that entity.
#[derive(Clone, Debug, PartialEq)]
pub struct Command {
    id: Id,
    kind: Kind,
    info: Option<String>,
}

impl Command {
    /// Create a new command with the given identity
    pub(crate) fn new(id: Id, kind: Kind) -> Self {
        Self {id, kind, info: Default::default()}
    }

    /// Retrieve the command's identity
    pub fn id(&self) -> Id {
        self.id
    }

    /// Retrieve the command [Kind]
    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    /// Retrieve all declarations appearing in this command
    ///
    /// This function retrieves all entities declared by a given command,
    /// including declarations in nested commands, e.g. inside guarded
    /// blocks.
    pub fn declarations(&self) -> impl Iterator<Item = &Arc<Entity>> {
        use transiter::AutoTransIter;

        self.trans_iter().filter_map(|c| match c.kind() {
            Kind::Declaration(e) => Some(e),
            Kind::DefMemPort(e)  => Some(e),
            _ => None,
        })
    }
}

impl AsRef<Kind> for Command {
    fn as_ref(&self) -> &Kind {
        self.kind()
    }
}

impl info::WithInfo for Command {
    fn info(&self) -> Option<&str> {
        self.info.as_ref().map(AsRef::as_ref)
    }

    fn set_info(&mut self, info: Option<String>) {
        self.info = info
    }
}

impl<'a> transiter::AutoTransIter<&'a Command> for &'a Command {
    type RecIter = Vec<Self>;

    fn recurse(item: &Self) -> Self::RecIter {
        if let Kind::Conditional{body, ..} = item.kind() {
            body.iter().collect()
        } else {
            Default::default()
        }
    }
}

impl DisplayIndented for Command {
    fn fmt<W: fmt::Write>(&self, indentation: Indentation, f: &mut W) -> fmt::Result {
        use crate::info::Info;

        let info = Info::of(self);

        match self.as_ref() {
            Kind::Declaration(entity)   => match entity.as_ref() {
                Entity::Wire{name, r#type} =>
                    writeln!(f, "{}wire {}: {}{}", indentation, name, r#type, info),
                _ => Err(Default::default()),
            },
            Kind::DefMemory(mem)        => writeln!(f, "{}{}{}", indentation, mem, info),
            Kind::DefSeqMemory(mem)     => writeln!(f, "{}{}{}", indentation, mem, info),
            Kind::DefMemPort(entity)    => match entity.as_ref() {
                Entity::MemPort(port) => writeln!(f, "{}{}{}", indentation, port, info),
                _ => Err(Default::default()),
            },
            Kind::Connection{from, to}  =>
                writeln!(f, "{}{} <= {}{}", indentation, to, from, info),
            Kind::Invalidate(expr)      =>
                writeln!(f, "{}{} is invalid{}", indentation, expr, info),
            Kind::Conditional{cond, body} => {
                writeln!(f, "{}when {}:{}", indentation, cond, info)?;
                body.iter().try_for_each(|c| c.fmt(indentation.sub(), f))
            },
        }
    }
}


/// [Command] kind
#[derive(Clone, Debug, PartialEq)]
pub enum Kind {
    /// Declaration of a new entity
    Declaration(Arc<Entity>),
    /// Declaration of a combinational-read memory
    DefMemory(Arc<Memory>),
    /// Declaration of a registered-read memory
    DefSeqMemory(Arc<Memory>),
    /// Definition of a memory port
    DefMemPort(Arc<Entity>),
    /// Connection of a source to a sink
    Connection{from: Expression, to: Expression},
    /// Invalidation: the sink has an indeterminate value
    Invalidate(Expression),
    /// Guarded block of commands
    Conditional{cond: Expression, body: Arc<[Command]>},
}


/// Render a command stream as text
///
/// Renders the given commands, in order, at the root indentation level.
pub fn display_commands<'a>(commands: impl IntoIterator<Item = &'a Command>) -> String {
    let mut res: String = Default::default();
    let _ = commands
        .into_iter()
        .try_for_each(|c| DisplayIndented::fmt(c, Indentation::root(), &mut res));
    res
}
