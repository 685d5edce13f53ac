//! Value types handed to the rasterizer.
//!
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`FontDescriptor`]: font family and size used for text

pub mod color;
pub mod font;

pub use color::Color;
pub use font::FontDescriptor;

pub use color::{BLACK, BLUE, GRAY, GREEN, ORANGE, PINK, RED, WHITE, YELLOW};
