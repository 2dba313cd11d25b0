//! Run the snake headless with a wandering pointer and save the last frame as a PNG.
//!
//! ```sh
//! RUST_LOG=debug cargo run --example scripted -- [config.toml] [output.png]
//! ```

use miette::Result;
use slither::{glam::DVec2, Action, Canvas, Config, Input, InputSource, Slither};

/// Amount of frames to simulate.
const FRAMES: u64 = 600;

/// Pointer that drifts towards random targets, tapping grow every once in a while.
struct Wanderer {
    /// Random number generator, seeded so runs are reproducible.
    rng: fastrand::Rng,
    /// Where the pointer is now.
    pointer: DVec2,
    /// Where the pointer is heading.
    target: DVec2,
    /// Size of the area to wander in.
    bounds: DVec2,
}

impl Wanderer {
    /// Start in the middle of the area.
    fn new(bounds: DVec2) -> Self {
        let rng = fastrand::Rng::with_seed(0x5EED);
        let pointer = bounds / 2.0;
        let target = pointer;

        Self {
            rng,
            pointer,
            target,
            bounds,
        }
    }
}

impl InputSource for Wanderer {
    fn poll(&mut self, frame: u64, input: &mut Input) {
        // Pick a new target when close to the current one
        if self.pointer.distance(self.target) < 5.0 {
            self.target = DVec2::new(self.rng.f64(), self.rng.f64()) * self.bounds;
        }

        // Move a bit towards the target
        self.pointer = self.pointer.lerp(self.target, 0.05);
        input.set_pointer(self.pointer);

        // Grow for a single frame every second
        input.handle_action(Action::Grow, frame % 60 == 0);
    }
}

fn main() -> Result<()> {
    // Show the debug logs of the simulation
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => Config::from_toml_file(path)?,
        None => Config::default(),
    };
    let output = args.next().unwrap_or_else(|| "slither.png".to_owned());

    let mut canvas = Canvas::new(
        (config.buffer_width, config.buffer_height),
        config.background_color,
    );
    let mut wanderer = Wanderer::new(DVec2::new(
        f64::from(config.buffer_width),
        f64::from(config.buffer_height),
    ));

    let mut slither = Slither::new(config)?;
    let frames = slither.run(&mut wanderer, &mut canvas, FRAMES, 1.0 / 60.0);

    log::info!(
        "Ran {frames} frames, snake has {} segments",
        slither.simulator().len()
    );

    canvas.save_png(&output)?;
    log::info!("Saved last frame to '{output}'");

    Ok(())
}
