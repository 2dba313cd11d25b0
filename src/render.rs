//! Turn the chain into draw calls.
//!
//! Drawing itself is done by a [`Renderer`], this module only decides what to draw where.

use glam::DVec2;
use smallvec::SmallVec;

use crate::{chain::Segment, config::Config};

/// Horizontal offset of both eye whites from the head center, relative to the segment diameter.
const EYE_OFFSET_X: f64 = 0.125;
/// Vertical offset of the eyes from the head center, mirrored for the second eye.
const EYE_OFFSET_Y: f64 = 0.3;
/// Radius of the white of the eyes, relative to the segment diameter.
const EYE_RADIUS: f64 = 0.225;
/// How much further forward the pupils sit than the eye whites.
const PUPIL_FORWARD: f64 = 0.09;
/// Radius of the pupils, relative to the segment diameter.
const PUPIL_RADIUS: f64 = 0.18;

/// Filled circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disc {
    /// Center in world space.
    pub center: DVec2,
    /// Radius in world units.
    pub radius: f64,
    /// ARGB color.
    pub color: u32,
}

/// Something that can draw discs.
pub trait Renderer {
    /// Clear everything drawn with a single color.
    fn clear(&mut self, color: u32);

    /// Draw a filled circle on top of everything drawn before.
    fn draw_disc(&mut self, disc: Disc);
}

/// Draw a whole chain.
///
/// The buffer is cleared first, then segments are drawn tail to head so the head ends up on top, followed by the eyes.
///
/// # Arguments
///
/// * `segments` - Chain snapshot, head first.
/// * `config` - Colors and sizes.
/// * `renderer` - Target of the draw calls.
pub fn draw_chain<R>(segments: &[Segment], config: &Config, renderer: &mut R)
where
    R: Renderer + ?Sized,
{
    renderer.clear(config.background_color);

    for segment in segments.iter().rev() {
        renderer.draw_disc(segment_disc(segment, config));
    }

    if let Some(head) = segments.first() {
        eye_discs(head, config)
            .into_iter()
            .for_each(|disc| renderer.draw_disc(disc));
    }
}

/// Body disc of a single segment, colored by whether its index is even or odd.
#[inline]
#[must_use]
pub fn segment_disc(segment: &Segment, config: &Config) -> Disc {
    let color = if segment.index % 2 == 0 {
        config.even_color
    } else {
        config.odd_color
    };

    Disc {
        center: segment.position,
        radius: config.segment_radius,
        color,
    }
}

/// Eye whites followed by pupils, attached to the head and rotated with it.
#[must_use]
pub fn eye_discs(head: &Segment, config: &Config) -> SmallVec<[Disc; 4]> {
    let iso = head.iso();
    let diameter = config.segment_radius * 2.0;

    let mut discs = SmallVec::new();

    // Whites
    for side in [1.0, -1.0] {
        discs.push(Disc {
            center: iso.translate(DVec2::new(EYE_OFFSET_X, side * EYE_OFFSET_Y) * diameter),
            radius: EYE_RADIUS * diameter,
            color: config.eye_color,
        });
    }

    // Pupils, looking forward
    for side in [1.0, -1.0] {
        discs.push(Disc {
            center: iso.translate(
                DVec2::new(EYE_OFFSET_X + PUPIL_FORWARD, side * EYE_OFFSET_Y) * diameter,
            ),
            radius: PUPIL_RADIUS * diameter,
            color: config.pupil_color,
        });
    }

    discs
}

/// Renderer that only records the draw calls.
///
/// Useful for inspecting what would be drawn without any pixels.
#[derive(Debug, Default, Clone)]
pub struct DrawList {
    /// Color of the last clear call.
    pub clear_color: Option<u32>,
    /// Discs in the order they were drawn.
    pub discs: Vec<Disc>,
}

impl Renderer for DrawList {
    fn clear(&mut self, color: u32) {
        self.clear_color = Some(color);
        self.discs.clear();
    }

    fn draw_disc(&mut self, disc: Disc) {
        self.discs.push(disc);
    }
}
