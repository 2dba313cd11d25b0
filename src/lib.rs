#![forbid(unsafe_code)]

//! A snake made of segments that follows a pointer around.
//!
//! # Features
//!
//! - The head trails right behind the pointer, facing it.
//! - Body segments are pulled into a distance band around the segment before them, with corrections scaled by how far off they are, giving an elastic lagging motion.
//! - New tail segments can be spawned at any time.
//! - Drawing is abstracted behind a [`Renderer`], with a software [`Canvas`] that can be saved as a PNG.
//!
//! # Non-Goals
//!
//! - Opening windows or talking to the GPU, the caller owns the window and feeds pointer and key state into [`Input`].
//! - Physics, the motion is a positional constraint solver without velocities or forces.
//!
//! # Usage
//!
//! Every frame the window owner writes the input state, then calls [`Slither::frame`] with something that implements [`Renderer`].
//!
//! ```
//! use slither::{Action, Canvas, Config, Slither};
//!
//! # fn try_main() -> miette::Result<()> {
//! let config = Config::default();
//! let mut canvas = Canvas::new((config.buffer_width, config.buffer_height), config.background_color);
//! let mut slither = Slither::new(config)?;
//!
//! // Inside the frame loop
//! slither.input_mut().set_pointer((500.0, 300.0));
//! slither.input_mut().handle_action(Action::Grow, true);
//!
//! let keep_running = slither.frame(1.0 / 60.0, &mut canvas);
//! assert!(keep_running);
//! assert_eq!(slither.simulator().len(), 2);
//! # Ok(())
//! # }
//! # try_main().unwrap();
//! ```
//!
//! The simulation can also be used without any of the frame handling:
//!
//! ```
//! use slither::{ChainSimulator, Config};
//!
//! let mut simulator = ChainSimulator::new(Config::default().chain_settings(), (400.0, 300.0));
//! simulator.request_growth();
//! simulator.update((420.0, 300.0));
//!
//! for segment in simulator.segments() {
//!     println!("{} at {} facing {}", segment.index, segment.position, segment.orientation);
//! }
//! ```

pub mod canvas;
pub mod chain;
pub mod config;
pub mod input;
pub mod math;
pub mod render;

pub use canvas::Canvas;
pub use chain::{ChainSettings, ChainSimulator, Segment};
pub use config::Config;
pub use glam;
pub use input::{Action, Input};
use miette::Result;
pub use render::{Disc, DrawList, Renderer};

/// How fast old FPS values decay in the smoothed average.
const FPS_SMOOTHED_AVERAGE_ALPHA: f64 = 0.8;

/// Supplies the input for every frame.
///
/// Implemented by whatever owns the window, or by a script when running headless.
pub trait InputSource {
    /// Write the input state for the upcoming frame.
    ///
    /// # Arguments
    ///
    /// * `frame` - Number of the frame about to run, starting at `0`.
    /// * `input` - State to update, actions keep their state from the previous frame unless changed.
    fn poll(&mut self, frame: u64, input: &mut Input);
}

impl<F> InputSource for F
where
    F: FnMut(u64, &mut Input),
{
    #[inline]
    fn poll(&mut self, frame: u64, input: &mut Input) {
        self(frame, input);
    }
}

/// Chain simulation wired to input and drawing.
///
/// Runs exactly one simulation update per frame, before rendering.
#[derive(Debug)]
pub struct Slither {
    /// User supplied configuration.
    config: Config,
    /// The simulated chain.
    simulator: ChainSimulator,
    /// Input written by the window owner.
    input: Input,
    /// Smoothed average of frames drawn per second.
    frames_per_second: f64,
    /// Amount of frames that have been updated.
    frame_count: u64,
}

impl Slither {
    /// Setup the simulation from a configuration.
    ///
    /// The chain starts with [`Config::initial_length`] segments trailing below the head.
    ///
    /// # Errors
    ///
    /// - When the configuration is invalid, see [`Config::validate`].
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let mut simulator = ChainSimulator::new(config.chain_settings(), config.head_position);
        simulator.grow_to(config.initial_length);

        let input = Input::new();
        let frames_per_second = 0.0;
        let frame_count = 0;

        Ok(Self {
            config,
            simulator,
            input,
            frames_per_second,
            frame_count,
        })
    }

    /// Input state, to be written before every frame.
    #[inline]
    pub fn input_mut(&mut self) -> &mut Input {
        &mut self.input
    }

    /// Input state.
    #[inline]
    #[must_use]
    pub const fn input(&self) -> &Input {
        &self.input
    }

    /// The simulated chain.
    #[inline]
    #[must_use]
    pub const fn simulator(&self) -> &ChainSimulator {
        &self.simulator
    }

    /// Configuration the simulation was created with.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Smoothed amount of frames per second, based on the delta times passed to [`Self::update`].
    #[inline]
    #[must_use]
    pub const fn frames_per_second(&self) -> f64 {
        self.frames_per_second
    }

    /// Amount of frames updated so far.
    #[inline]
    #[must_use]
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Advance the simulation by a single frame using the current input.
    ///
    /// Without a known pointer the chain doesn't move, but growth requests are still remembered for the next update that has one.
    ///
    /// # Arguments
    ///
    /// * `dt` - Seconds since the previous frame, only used for the frames per second counter.
    pub fn update(&mut self, dt: f64) {
        if self.input.growth_requested() {
            self.simulator.request_growth();
        }

        if let Some(pointer) = self.input.pointer() {
            log::trace!("Frame {} following pointer at {pointer}", self.frame_count);

            self.simulator.update(pointer);
        } else {
            // Happens every frame the pointer is outside of the window
            log::trace!(
                "Frame {} has no pointer position, chain stays in place",
                self.frame_count
            );
        }

        // Update the input so pressed and released events can be handled
        self.input.update();

        // Set the FPS with a smoothed average function
        if dt > 0.0 {
            self.frames_per_second = FPS_SMOOTHED_AVERAGE_ALPHA.mul_add(
                self.frames_per_second,
                (1.0 - FPS_SMOOTHED_AVERAGE_ALPHA) * dt.recip(),
            );
        }

        self.frame_count += 1;
    }

    /// Draw the current state of the chain.
    #[inline]
    pub fn render<R>(&self, renderer: &mut R)
    where
        R: Renderer + ?Sized,
    {
        render::draw_chain(self.simulator.segments(), &self.config, renderer);
    }

    /// Update and then render a single frame.
    ///
    /// # Returns
    ///
    /// - `false` when [`Action::Exit`] was pressed this frame, the frame is still drawn.
    pub fn frame<R>(&mut self, dt: f64, renderer: &mut R) -> bool
    where
        R: Renderer + ?Sized,
    {
        // Must be read before the input is updated
        let exit = self.input.pressed(Action::Exit);

        self.update(dt);
        self.render(renderer);

        !exit
    }

    /// Run a fixed amount of frames, polling the input before each one.
    ///
    /// Stops early when [`Action::Exit`] is pressed.
    ///
    /// # Arguments
    ///
    /// * `source` - Supplies the input for every frame.
    /// * `renderer` - Draws every frame.
    /// * `frames` - Maximum amount of frames to run.
    /// * `dt` - Fixed time between frames in seconds.
    ///
    /// # Returns
    ///
    /// - Amount of frames that ran.
    pub fn run<S, R>(&mut self, source: &mut S, renderer: &mut R, frames: u64, dt: f64) -> u64
    where
        S: InputSource + ?Sized,
        R: Renderer + ?Sized,
    {
        log::debug!("Running {frames} frames");

        for ran in 0..frames {
            source.poll(self.frame_count, &mut self.input);

            if !self.frame(dt, renderer) {
                log::debug!("Exit requested after {} frames", ran + 1);

                return ran + 1;
            }
        }

        frames
    }
}
