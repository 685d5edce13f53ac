//! Collaborators outside the drawing core: where frames go and where the
//! pointer comes from.

use crate::util::Point;

/// Something that can show a finished frame, e.g. a window's image widget.
pub trait DisplaySurface<F> {
    /// Takes the frame rendered by the last cycle.
    fn present(&mut self, frame: &F);

    /// Top-left corner of the surface inside its window, in window coordinates.
    fn origin(&self) -> Point;
}

/// Raw pointer position provider, typically the windowing layer.
pub trait PointerSource {
    /// Pointer position in screen coordinates.
    fn screen_position(&self) -> Point;

    /// Top-left corner of the window's client area in screen coordinates.
    fn window_origin(&self) -> Point;
}
