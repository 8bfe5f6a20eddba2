// Copyright (c) 2021 FZI Forschungszentrum Informatik
// SPDX-License-Identifier: Apache-2.0
//! Construction context

#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::command::{Command, Kind};
use crate::entity::{Entity, Expression};
use crate::error::{BuildErrors, Error};
use crate::info::{self, WithInfo};
use crate::memory::PortDir;
use crate::module::Module;
use crate::types::Type;
use crate::value::Value;


/// Context for the construction of a single module
///
/// A builder owns the command stream under construction, the clock driving
/// new ports, the stack of active guard predicates and all binding metadata.
/// Commands are appended strictly in call order; that order is semantically
/// significant for the consumer of the stream.
///
/// Fatal construction errors are returned by the individual operations.
/// Recoverable errors are reported via [report_error](Builder::report_error)
/// and surface collectively from [finish](Builder::finish).
pub struct Builder {
    module: Arc<Module>,
    clock: Expression,
    options: Options,
    commands: Vec<Command>,
    guards: Vec<Guard>,
    bindings: HashMap<Id, Binding>,
    errors: Vec<Error>,
    next_id: u64,
}

impl Builder {
    /// Create a new builder for the given module
    ///
    /// Ports created through the builder will be clocked by the given clock
    /// expression, until it is replaced via [set_clock](Builder::set_clock).
    pub fn new(module: Arc<Module>, clock: Expression) -> Self {
        Self {
            module,
            clock,
            options: Default::default(),
            commands: Default::default(),
            guards: Default::default(),
            bindings: Default::default(),
            errors: Default::default(),
            next_id: 0,
        }
    }

    /// Set the compile options
    pub fn with_options(self, options: Options) -> Self {
        Self {options, ..self}
    }

    /// Retrieve the compile options
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Retrieve the module under construction
    pub fn module(&self) -> &Arc<Module> {
        &self.module
    }

    /// Retrieve the clock currently driving new ports
    pub fn clock(&self) -> &Expression {
        &self.clock
    }

    /// Replace the clock driving new ports
    pub fn set_clock(&mut self, clock: Expression) {
        self.clock = clock
    }

    /// Retrieve a module I/O port as a value
    pub fn port(&self, name: &str) -> Option<Value> {
        self.module.port_by_name(&name).map(|p| {
            let r#type = p.r#type().clone();
            Value::bound(r#type, Arc::new(Entity::Port(p.clone())).into())
        })
    }

    /// Append a command to the stream
    ///
    /// The command is placed in the innermost open guard scope. The identity
    /// returned is fresh and may have binding metadata attached to it.
    #[track_caller]
    pub fn push_command(&mut self, kind: Kind) -> Id {
        let id = self.allocate_id();
        let command = Command::new(id, kind).with_info(info::caller());
        self.current_commands().push(command);
        id
    }

    /// Open a new guard scope
    ///
    /// Commands appended while the scope is open only take effect in cycles
    /// where the given predicate holds. Every scope opened must be closed
    /// again via [pop_guard](Builder::pop_guard); prefer
    /// [with_guard](Builder::with_guard), which guarantees this on all paths.
    #[track_caller]
    pub fn push_guard(&mut self, cond: Expression) {
        self.guards.push(Guard {cond, info: info::caller(), commands: Default::default()})
    }

    /// Close the innermost guard scope
    ///
    /// The commands collected in the scope are wrapped into a single
    /// conditional command, which is appended to the enclosing scope. Calling
    /// this function without an open guard scope has no effect.
    pub fn pop_guard(&mut self) {
        if let Some(guard) = self.guards.pop() {
            let id = self.allocate_id();
            let command = Command::new(id, Kind::Conditional {
                cond: guard.cond,
                body: guard.commands.into(),
            }).with_info(guard.info);
            self.current_commands().push(command);
        }
    }

    /// Run the given function inside a guard scope
    ///
    /// The scope is opened before and closed after the call, on every path,
    /// including an early error return from within the function.
    #[track_caller]
    pub fn with_guard<R>(&mut self, cond: Expression, f: impl FnOnce(&mut Self) -> R) -> R {
        self.push_guard(cond);
        let res = f(self);
        self.pop_guard();
        res
    }

    /// Retrieve the guard predicates currently active, outermost first
    pub fn guard(&self) -> Arc<[Expression]> {
        self.guards.iter().map(|g| g.cond.clone()).collect()
    }

    /// Attach binding metadata to an identity
    ///
    /// The binding records, besides the given kind, the module under
    /// construction and the guard predicates active right now.
    pub fn bind(&mut self, id: Id, kind: BindingKind) {
        let binding = Binding {kind, module: self.module.clone(), guard: self.guard()};
        self.bindings.insert(id, binding);
    }

    /// Retrieve the binding metadata attached to the given identity
    pub fn binding(&self, id: Id) -> Option<&Binding> {
        self.bindings.get(&id)
    }

    /// Retrieve the commands emitted so far
    ///
    /// Yields the commands of the root scope, in emission order. Commands
    /// collected in guard scopes still open are not visible until the scope
    /// is closed.
    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    /// Record a recoverable construction error
    ///
    /// Reported errors do not halt construction. They surface collectively
    /// when the build is [finish](Builder::finish)ed.
    pub fn report_error(&mut self, error: Error) {
        self.errors.push(error)
    }

    /// Retrieve the errors reported so far
    pub fn errors(&self) -> impl Iterator<Item = &Error> {
        self.errors.iter()
    }

    /// Declare a fresh, anonymous wire of the given type
    #[track_caller]
    pub fn wire(&mut self, r#type: impl Into<Type>) -> Value {
        let r#type = r#type.into();
        let name: Arc<str> = format!("_w{}", self.next_id).into();
        let entity = Arc::new(Entity::Wire {name, r#type: r#type.clone()});
        self.push_command(Kind::Declaration(entity.clone()));
        Value::bound(r#type, entity.into())
    }

    /// Mark the given value's content as indeterminate
    #[track_caller]
    pub fn invalidate(&mut self, value: &Value) -> Result<(), Error> {
        let expr = value.expression()?.clone();
        self.push_command(Kind::Invalidate(expr));
        Ok(())
    }

    /// Connect a source value to a sink value
    #[track_caller]
    pub fn connect(&mut self, to: &Value, from: &Value) -> Result<(), Error> {
        let to = to.expression()?.clone();
        let from = from.expression()?.clone();
        self.push_command(Kind::Connection {from, to});
        Ok(())
    }

    /// Connect a source expression to a sink expression
    #[track_caller]
    pub(crate) fn connect_raw(&mut self, to: Expression, from: Expression) {
        self.push_command(Kind::Connection {from, to});
    }

    /// Finish the build
    ///
    /// Any guard scopes still open are closed. If recoverable errors were
    /// reported during construction, they are surfaced now, collectively.
    /// Otherwise, this function yields the completed command stream.
    pub fn finish(mut self) -> Result<Vec<Command>, BuildErrors> {
        while !self.guards.is_empty() {
            self.pop_guard()
        }

        if self.errors.is_empty() {
            Ok(self.commands)
        } else {
            Err(self.errors.into())
        }
    }

    /// Allocate a fresh identity
    pub(crate) fn allocate_id(&mut self) -> Id {
        let id = Id(self.next_id);
        self.next_id += 1;
        id
    }

    /// Peek at the identity the next allocation will yield
    pub(crate) fn pending_id(&self) -> u64 {
        self.next_id
    }

    /// Retrieve the command sink of the innermost open scope
    fn current_commands(&mut self) -> &mut Vec<Command> {
        match self.guards.last_mut() {
            Some(guard) => &mut guard.commands,
            None => &mut self.commands,
        }
    }
}


/// An open guard scope
#[derive(Debug)]
struct Guard {
    cond: Expression,
    info: Option<String>,
    commands: Vec<Command>,
}


/// Identity of a command or registered entity
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Id(u64);

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}


/// Compile options
#[derive(Copy, Clone, Debug)]
pub struct Options {
    /// Whether declarations enforce unbound type prototypes
    pub bind_checks: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {bind_checks: true}
    }
}


/// Binding metadata attached to an identity
#[derive(Clone, Debug)]
pub struct Binding {
    kind: BindingKind,
    module: Arc<Module>,
    guard: Arc<[Expression]>,
}

impl Binding {
    /// Retrieve the kind of binding
    pub fn kind(&self) -> &BindingKind {
        &self.kind
    }

    /// Retrieve the module the bound entity was created in
    pub fn module(&self) -> &Arc<Module> {
        &self.module
    }

    /// Retrieve the guard predicates active at creation, outermost first
    pub fn guard(&self) -> &Arc<[Expression]> {
        &self.guard
    }
}


/// Kind of binding
#[derive(Clone, Debug, PartialEq)]
pub enum BindingKind {
    /// An element-type clone owned by a declared memory
    Memory,
    /// A memory port with its access direction, if fixed at creation
    MemPort(Option<PortDir>),
}
