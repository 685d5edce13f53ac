//! Transform recording, replay and point inversion.
//!
//! - [`TransformOp`]: one translate/rotate/scale call with its parameters
//! - [`TransformLog`]: the ordered ops of a scope, replayable and invertible
//! - [`TransformEngine`]: applies ops to a rasterizer while keeping the log and
//!   a [`TransformSummary`] in sync

pub mod engine;
pub mod log;
pub mod op;

pub use engine::{TransformEngine, TransformSummary};
pub use self::log::TransformLog;
pub use op::{TransformKind, TransformOp};
