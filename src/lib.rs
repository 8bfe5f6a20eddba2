//! FIRRTL construction commands
//!
//! This library provides the construction-time side of a
//! [FIRRTL](https://chisel-lang.org/firrtl/)-style flow: a [Builder] through
//! which a generator declares memories and accesses them, and which emits an
//! ordered stream of [command](command::Command)s for consumption by a
//! downstream compiler.
//!
//! Memories are declared via [Memory::declare](memory::Memory::declare) and
//! accessed through reads, writes, masked writes and direction-inferred
//! accesses. Each access creates a fresh memory port, bound to the clock and
//! the guard predicates active in the builder at the time of the access.
//! Registered reads and masked writes are synthesized from the same lower
//! primitives as everything else: wires, connections and guarded blocks.

pub mod builder;
pub mod command;
pub mod entity;
pub mod error;
pub mod expr;
pub mod indentation;
pub mod info;
pub mod memory;
pub mod module;
pub mod types;
pub mod value;


pub use builder::{Builder, Options};
pub use error::Error;
pub use memory::Memory;
pub use types::{GroundType, Type, TypeExt};
pub use value::Value;
