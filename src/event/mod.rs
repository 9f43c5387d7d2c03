//! Change events and their interpretation
//!
//! A change event is one create/update/delete mutation on a single document,
//! delivered as a before/after snapshot pair by an external dispatcher. This
//! module owns everything that happens to an event before it is persisted:
//!
//! - `ChangeEvent`: the wire shape of an incoming mutation.
//! - `classify`: derives the operation label from the snapshot pair.
//! - `resolve`: determines which actor is responsible for the change.
//! - `sanitize_user_snapshot`: strips sensitive user fields before logging.

pub mod actor;
pub mod change;
pub mod classify;
pub mod sanitize;

pub use actor::{resolve, Actor, AuthActor, SENTINEL_ACTOR};
pub use change::{ChangeEvent, Collection, InvocationContext, Snapshot};
pub use classify::{classify, new_announcement, ChangeKind, Operation};
pub use sanitize::sanitize_user_snapshot;
