//! Ownership of launched projectiles.
//!
//! Weapons register every entity they spawn in the [`HitDispatcher`]. When the
//! host reports a collision the dispatcher answers whether the entity belongs
//! to this game and, if so, who fired it with what.
mod dispatcher;

pub use dispatcher::{AttackRecord, HitDispatcher, HitResolution};
