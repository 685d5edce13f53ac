//! Scoped drawing state.
//!
//! A [`Scope`] pairs a transform engine with a [`StyleState`]. The
//! [`StateStack`] keeps the always-present primary scope and the scopes
//! pushed on top of it; `push` deep-copies the current scope, `pop` discards
//! the top one and replays the restored transforms.

pub mod stack;
pub mod style;

pub use stack::{Scope, StateStack};
pub use style::{AnchorMode, StyleState};
