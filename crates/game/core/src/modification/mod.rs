//! Temporary property overrides layered on top of base attributes.
//!
//! # Architecture
//!
//! ```text
//! [ Modifier ]          property key + value expression
//!      ↓
//! [ Modification ]      set of modifiers scoped to a target kind and object ids
//!      ↓
//! [ ModificationCompiler ]  active set → one CompiledEntry per property
//!      ↓
//! [ modify_number / modify_string / modify_boolean / modify_enum ]
//! ```
//!
//! Every game object that can be modified (usable items, engines, wings,
//! actions, activators) owns one [`ModificationCompiler`]. The compiled cache
//! is rebuilt wholesale on each effective mutation of the active set, so a
//! read always observes exactly the current set.

mod compiler;
mod modification;
mod modifier;
mod registry;

pub use compiler::{CompiledEntry, ModificationCompiler};
pub use modification::{Modification, ModificationTarget};
pub use modifier::{Modifier, ValueExpr};
pub use registry::EnumRegistry;
