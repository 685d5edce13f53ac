//! Timer-driven frame loop.
//!
//! A [`FrameController`] owns the [`Canvas`] and the user's [`Sketch`]. Each
//! timer tick runs one cycle: prepare the frame, call `draw`, present the
//! result and optionally reset all scoped state for the next cycle.
//!
//! The loop is single threaded. A cycle is never re-entered, and `quit` only
//! takes effect at the next cycle boundary.

use crate::canvas::Canvas;
use crate::raster::Rasterizer;
use crate::surface::DisplaySurface;
use anyhow::{Context, Result, anyhow};
use calloop::EventLoop;
use calloop::timer::{TimeoutAction, Timer};
use log::{debug, error, info, warn};
use std::time::Duration;

/// Lifecycle of a frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    /// Created, `start` not called yet.
    #[default]
    Idle,
    Running,
    Paused,
    /// Terminal: no further cycles run.
    Stopped,
}

/// State machine behind `pause`/`unpause`/`quit`.
#[derive(Debug, Clone, Default)]
pub struct LoopControl {
    state: LoopState,
}

impl LoopControl {
    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn start(&mut self) {
        self.transition(LoopState::Idle, LoopState::Running, "start");
    }

    pub fn pause(&mut self) {
        self.transition(LoopState::Running, LoopState::Paused, "pause");
    }

    pub fn unpause(&mut self) {
        self.transition(LoopState::Paused, LoopState::Running, "unpause");
    }

    pub fn quit(&mut self) {
        if self.state != LoopState::Stopped {
            info!("Frame loop quit requested");
        }
        self.state = LoopState::Stopped;
    }

    fn transition(&mut self, from: LoopState, to: LoopState, action: &str) {
        if self.state == from {
            self.state = to;
        } else {
            debug!("Ignoring {} while {:?}", action, self.state);
        }
    }
}

/// Tick interval for a requested frame rate: `1000 / fps` ms, at least 1 ms.
pub fn frame_interval(fps: i32) -> Duration {
    if fps <= 0 {
        warn!("Invalid frame rate {}, using a 1ms interval", fps);
        return Duration::from_millis(1);
    }
    Duration::from_millis((1000 / fps).max(1) as u64)
}

/// User code driven by the loop.
pub trait Sketch<R: Rasterizer> {
    /// Runs once before the first cycle. Frame rate changes belong here.
    fn setup(&mut self, canvas: &mut Canvas<R>) -> Result<()> {
        let _ = canvas;
        Ok(())
    }

    /// Runs once per cycle.
    fn draw(&mut self, canvas: &mut Canvas<R>) -> Result<()>;
}

impl<R, F> Sketch<R> for F
where
    R: Rasterizer,
    F: FnMut(&mut Canvas<R>) -> Result<()>,
{
    fn draw(&mut self, canvas: &mut Canvas<R>) -> Result<()> {
        self(canvas)
    }
}

/// What a single [`FrameController::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running (idle or paused); nothing drawn.
    Skipped,
    /// One cycle ran.
    Rendered,
    /// The loop is stopped; the timer should be dropped.
    Stopped,
}

type ErrorSink = Box<dyn FnMut(&anyhow::Error)>;

/// Drives cycles of a [`Sketch`] against a [`Canvas`].
pub struct FrameController<R: Rasterizer, S: Sketch<R>> {
    canvas: Canvas<R>,
    sketch: S,
    reset_after_loop: bool,
    surface: Option<Box<dyn DisplaySurface<R::Frame>>>,
    on_error: ErrorSink,
    failures: u64,
}

impl<R: Rasterizer, S: Sketch<R>> FrameController<R, S> {
    /// Headless controller: frames are rendered but presented nowhere.
    pub fn new(canvas: Canvas<R>, sketch: S) -> Self {
        Self {
            canvas,
            sketch,
            reset_after_loop: true,
            surface: None,
            on_error: Box::new(|_| {}),
            failures: 0,
        }
    }

    /// Whether scoped state is discarded after every cycle (default `true`).
    pub fn with_reset_after_loop(mut self, reset: bool) -> Self {
        self.reset_after_loop = reset;
        self
    }

    pub fn set_reset_after_loop(&mut self, reset: bool) {
        self.reset_after_loop = reset;
    }

    pub fn reset_after_loop(&self) -> bool {
        self.reset_after_loop
    }

    /// Attaches the surface frames are presented to. Pointer positions are
    /// made relative to its origin from now on.
    pub fn with_surface(mut self, surface: Box<dyn DisplaySurface<R::Frame>>) -> Self {
        self.canvas.set_surface_origin(Some(surface.origin()));
        self.surface = Some(surface);
        self
    }

    /// Error channel for failures in `setup`/`draw`. They are also logged.
    pub fn on_error(mut self, sink: impl FnMut(&anyhow::Error) + 'static) -> Self {
        self.on_error = Box::new(sink);
        self
    }

    pub fn canvas(&self) -> &Canvas<R> {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas<R> {
        &mut self.canvas
    }

    pub fn sketch(&self) -> &S {
        &self.sketch
    }

    pub fn state(&self) -> LoopState {
        self.canvas.loop_state()
    }

    /// Number of `setup`/`draw`/frame errors reported so far.
    pub fn failures(&self) -> u64 {
        self.failures
    }

    pub fn into_parts(self) -> (Canvas<R>, S) {
        (self.canvas, self.sketch)
    }

    /// Runs `setup` and moves the loop to running. Does nothing unless idle.
    pub fn start(&mut self) {
        if self.canvas.loop_state() != LoopState::Idle {
            debug!("start() ignored: loop is {:?}", self.canvas.loop_state());
            return;
        }

        if let Err(err) = self.sketch.setup(&mut self.canvas) {
            self.report(&err.context("setup() failed"));
        }
        self.canvas.loop_control_mut().start();
        info!(
            "Frame loop started ({}x{}, {:?} per frame)",
            self.canvas.width(),
            self.canvas.height(),
            self.canvas.frame_interval()
        );
    }

    /// Runs one cycle if the loop is running.
    pub fn tick(&mut self) -> TickOutcome {
        match self.canvas.loop_state() {
            LoopState::Running => {}
            LoopState::Stopped => return TickOutcome::Stopped,
            LoopState::Idle | LoopState::Paused => return TickOutcome::Skipped,
        }

        let fresh_frame = self.reset_after_loop || self.canvas.frame_count() == 0;
        if let Err(err) = self.canvas.begin_cycle(fresh_frame) {
            self.report(&anyhow::Error::new(err).context("Failed to prepare frame buffer"));
        }

        let frame = self.canvas.frame_count();
        debug!("Cycle {} starting", frame);
        if let Err(err) = self.sketch.draw(&mut self.canvas) {
            self.report(&err.context(format!("draw() failed on frame {frame}")));
        }

        if let Some(surface) = self.surface.as_mut() {
            surface.present(self.canvas.rasterizer().frame());
        }

        if self.reset_after_loop {
            self.canvas.reset_state();
        }

        TickOutcome::Rendered
    }

    /// Starts the loop and blocks, ticking from a timer every
    /// [`Canvas::frame_interval`] until the loop is stopped.
    ///
    /// The interval is read once, after `setup`.
    pub fn run(&mut self) -> Result<()> {
        self.start();

        let interval = self.canvas.frame_interval();
        let mut event_loop: EventLoop<'_, Self> =
            EventLoop::try_new().context("Failed to create frame loop")?;
        let signal = event_loop.get_signal();

        event_loop
            .handle()
            .insert_source(
                Timer::from_duration(interval),
                move |_deadline, _, controller: &mut Self| match controller.tick() {
                    TickOutcome::Stopped => {
                        debug!("Dropping frame timer");
                        TimeoutAction::Drop
                    }
                    TickOutcome::Rendered | TickOutcome::Skipped => {
                        TimeoutAction::ToDuration(interval)
                    }
                },
            )
            .map_err(|err| anyhow!("Failed to register frame timer: {}", err.error))?;

        event_loop
            .run(None::<Duration>, self, |controller| {
                if controller.state() == LoopState::Stopped {
                    signal.stop();
                }
            })
            .context("Frame loop failed")?;

        info!(
            "Frame loop finished after {} frames",
            self.canvas.frame_count()
        );
        Ok(())
    }

    fn report(&mut self, err: &anyhow::Error) {
        self.failures += 1;
        error!("{:#}", err);
        (self.on_error)(err);
    }
}
