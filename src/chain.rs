//! Segment chain that follows a pointer.
//!
//! The head is driven directly by the pointer, every other segment is pulled back into a distance band around its predecessor.
//! Corrections are proportional to the gap, which makes the body lag behind like a spring instead of moving as a rigid rod.

use glam::DVec2;

use crate::math::{self, Iso};

/// Heading used before the pointer ever moved away from the head.
const INITIAL_HEADING: DVec2 = DVec2::new(0.0, -1.0);

/// Constants driving the simulation.
///
/// All values must be positive and `min_distance < max_distance`, see [`crate::Config::validate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainSettings {
    /// Smallest allowed gap between neighboring segments.
    pub min_distance: f64,
    /// Largest allowed gap between neighboring segments.
    pub max_distance: f64,
    /// Base interpolation factor for moving a segment back into the band.
    ///
    /// The factor is scaled by `gap / max_distance` and never clamped.
    /// A gap larger than `(1 + 2 / smooth_factor) * max_distance` overshoots further than it started, so it keeps growing every update instead of settling.
    pub smooth_factor: f64,
    /// Distance the head keeps behind the pointer.
    pub standoff: f64,
}

/// Single link of the chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Center in world space.
    pub position: DVec2,
    /// Heading in radians, only used for drawing.
    pub orientation: f64,
    /// Place in the chain, `0` is the head.
    pub index: usize,
}

impl Segment {
    /// Position and rotation as a single transform.
    #[inline]
    #[must_use]
    pub fn iso(&self) -> Iso {
        Iso::new(self.position, self.orientation)
    }
}

/// Simulation of a chain of segments following a pointer.
///
/// Call [`Self::update`] exactly once per frame and read [`Self::segments`] afterwards for drawing.
#[derive(Debug, Clone)]
pub struct ChainSimulator {
    /// All segments, head first, never empty.
    segments: Vec<Segment>,
    /// Whether a new tail segment must be appended at the next update.
    pending_growth: bool,
    /// Last known non-zero unit direction from the head towards the pointer.
    heading: DVec2,
    /// Simulation constants.
    settings: ChainSettings,
}

impl ChainSimulator {
    /// Create a chain with only a head.
    ///
    /// # Arguments
    ///
    /// * `settings` - Simulation constants.
    /// * `head_position` - Where the head is placed, with an orientation of zero.
    #[must_use]
    pub fn new(settings: ChainSettings, head_position: impl Into<DVec2>) -> Self {
        let head_position = head_position.into();

        log::debug!("Creating chain with head at {head_position}");

        let segments = vec![Segment {
            position: head_position,
            orientation: 0.0,
            index: 0,
        }];
        let pending_growth = false;
        let heading = INITIAL_HEADING;

        Self {
            segments,
            pending_growth,
            heading,
            settings,
        }
    }

    /// Create a chain from already placed segments, head first.
    ///
    /// Orientations start at zero and the heading points down until the pointer moves.
    ///
    /// # Returns
    ///
    /// - `None` when there are no positions, a chain always needs a head.
    #[must_use]
    pub fn from_positions<I, P>(settings: ChainSettings, positions: I) -> Option<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<DVec2>,
    {
        let segments = positions
            .into_iter()
            .enumerate()
            .map(|(index, position)| Segment {
                position: position.into(),
                orientation: 0.0,
                index,
            })
            .collect::<Vec<_>>();
        if segments.is_empty() {
            return None;
        }

        let pending_growth = false;
        let heading = INITIAL_HEADING;

        Some(Self {
            segments,
            pending_growth,
            heading,
            settings,
        })
    }

    /// Append a new segment at the tail during the next update.
    ///
    /// Calling this multiple times before [`Self::update`] still only appends a single segment.
    #[inline]
    pub fn request_growth(&mut self) {
        self.pending_growth = true;
    }

    /// Advance the simulation by a single frame.
    ///
    /// # Arguments
    ///
    /// * `pointer` - Position the head is following.
    pub fn update(&mut self, pointer: impl Into<DVec2>) {
        let pointer = pointer.into();

        self.drive_head(pointer);
        self.follow();

        if self.pending_growth {
            self.grow();
            self.pending_growth = false;
        }
    }

    /// Immediately append segments until the chain has the requested length.
    ///
    /// Does nothing when the chain is already that long.
    pub fn grow_to(&mut self, length: usize) {
        while self.segments.len() < length {
            self.grow();
        }
    }

    /// All segments, head first.
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Amount of segments including the head.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always `false`, a chain always has a head.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// First segment.
    #[inline]
    #[must_use]
    pub fn head(&self) -> &Segment {
        &self.segments[0]
    }

    /// Last segment, the head if there's no body.
    #[inline]
    #[must_use]
    pub fn tail(&self) -> &Segment {
        &self.segments[self.segments.len() - 1]
    }

    /// Unit direction the head is facing.
    #[inline]
    #[must_use]
    pub const fn heading(&self) -> DVec2 {
        self.heading
    }

    /// Simulation constants.
    #[inline]
    #[must_use]
    pub const fn settings(&self) -> &ChainSettings {
        &self.settings
    }

    /// Whether a segment will be appended at the next update.
    #[inline]
    #[must_use]
    pub const fn has_pending_growth(&self) -> bool {
        self.pending_growth
    }

    /// Move the head towards the pointer, keeping the standoff distance.
    fn drive_head(&mut self, pointer: DVec2) {
        let head = &mut self.segments[0];

        // Keep facing the same way when the pointer is exactly on the head
        if let Some(heading) = math::direction(head.position, pointer) {
            self.heading = heading;
        }

        head.position = pointer - self.settings.standoff * self.heading;
        head.orientation = math::heading_angle(self.heading);
    }

    /// Pull every body segment back into the distance band around its predecessor.
    ///
    /// Must run head to tail, each segment reacts to the already moved one before it.
    fn follow(&mut self) {
        let ChainSettings {
            min_distance,
            max_distance,
            smooth_factor,
            ..
        } = self.settings;

        for index in 1..self.segments.len() {
            let leader = self.segments[index - 1].position;
            let segment = &mut self.segments[index];

            let delta = leader - segment.position;
            let distance = delta.length();
            if distance == 0.0 || !distance.is_finite() {
                continue;
            }
            let direction = delta / distance;

            let target = if distance < min_distance {
                // Negative offset, pushes away from the leader
                segment.position + (distance - min_distance) * direction
            } else if distance > max_distance {
                segment.position + (distance - max_distance) * direction
            } else {
                segment.position
            };

            // Not clamped, big gaps overshoot past the band and diverge above `(1 + 2 / smooth_factor) * max_distance`
            let factor = smooth_factor * (distance / max_distance);

            let position = math::lerp(segment.position, target, factor);
            if !position.is_finite() {
                // A diverged segment stays where it is so the snapshot never contains NaN
                log::trace!("Segment {index} diverged, keeping it at {}", segment.position);

                continue;
            }

            segment.position = position;
            segment.orientation = math::heading_angle(direction);
        }
    }

    /// Append a segment behind the tail at the minimum distance.
    fn grow(&mut self) {
        let index = self.segments.len();
        let tail = self.segments[index - 1];

        // Continue the line of the last two segments, or trail straight behind the head
        let direction = index
            .checked_sub(2)
            .and_then(|before_tail| {
                math::direction(self.segments[before_tail].position, tail.position)
            })
            .unwrap_or(-self.heading);

        let position = tail.position + self.settings.min_distance * direction;

        log::debug!("Growing chain with segment {index} at {position}");

        self.segments.push(Segment {
            position,
            orientation: math::heading_angle(-direction),
            index,
        });
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec2;

    use super::{ChainSettings, ChainSimulator};

    /// Settings with the numbers used by the reference program.
    const SETTINGS: ChainSettings = ChainSettings {
        min_distance: 0.05,
        max_distance: 0.1,
        smooth_factor: 0.1,
        standoff: 0.2,
    };

    /// Build a simulator with a fixed set of segment positions.
    fn with_positions(settings: ChainSettings, positions: &[DVec2]) -> ChainSimulator {
        ChainSimulator::from_positions(settings, positions.iter().copied()).unwrap()
    }

    #[test]
    fn starts_with_only_a_head() {
        let sim = ChainSimulator::new(SETTINGS, (400.0, 300.0));

        assert_eq!(sim.len(), 1);
        assert_eq!(sim.head().position, DVec2::new(400.0, 300.0));
        assert_eq!(sim.head().orientation, 0.0);
        assert_eq!(sim.head().index, 0);
        assert!(!sim.has_pending_growth());
    }

    #[test]
    fn head_trails_pointer_by_standoff() {
        let mut sim = ChainSimulator::new(SETTINGS, (400.0, 300.0));
        sim.update((500.0, 300.0));

        assert!(sim.head().position.distance(DVec2::new(499.8, 300.0)) < 1e-9);
        assert!(sim.head().orientation.abs() < 1e-12);
    }

    #[test]
    fn pointer_on_head_keeps_heading() {
        let mut sim = ChainSimulator::new(SETTINGS, (0.0, 0.0));
        sim.update((10.0, 0.0));
        let heading = sim.heading();

        // Put the pointer exactly on the head
        let head = sim.head().position;
        sim.update(head);

        assert_eq!(sim.heading(), heading);
        assert!(sim.head().position.is_finite());
        assert!(sim.head().orientation.is_finite());
    }

    #[test]
    fn growth_is_edge_triggered() {
        let mut sim = ChainSimulator::new(SETTINGS, (0.0, 0.0));
        sim.request_growth();
        sim.request_growth();
        sim.request_growth();
        assert!(sim.has_pending_growth());

        sim.update((0.0, 1.0));
        assert_eq!(sim.len(), 2);
        assert!(!sim.has_pending_growth());

        // Without a new request nothing is added
        sim.update((0.0, 1.0));
        assert_eq!(sim.len(), 2);
    }

    #[test]
    fn first_growth_trails_behind_the_head() {
        let mut sim = ChainSimulator::new(SETTINGS, (0.0, 0.0));
        sim.request_growth();
        sim.update((1.0, 0.0));

        let head = sim.segments()[0].position;
        let tail = sim.segments()[1].position;
        assert!((head.distance(tail) - SETTINGS.min_distance).abs() < 1e-12);
        // Placed opposite of the heading
        assert!(tail.x < head.x);
        assert_eq!(sim.segments()[1].index, 1);
    }

    #[test]
    fn later_growth_continues_the_tail_line() {
        let mut sim = with_positions(
            SETTINGS,
            &[DVec2::new(0.0, 0.0), DVec2::new(0.0, -0.07)],
        );
        sim.grow();

        assert!(sim.tail().position.distance(DVec2::new(0.0, -0.12)) < 1e-12);
    }

    #[test]
    fn from_positions_needs_a_head() {
        assert!(ChainSimulator::from_positions(SETTINGS, Vec::<DVec2>::new()).is_none());

        let sim = with_positions(SETTINGS, &[DVec2::ZERO, DVec2::X]);
        assert_eq!(sim.len(), 2);
        assert_eq!(sim.tail().index, 1);
    }

    #[test]
    fn grow_to_fills_the_chain() {
        let mut sim = ChainSimulator::new(SETTINGS, (0.0, 0.0));
        sim.grow_to(5);

        assert_eq!(sim.len(), 5);
        for (index, pair) in sim.segments().windows(2).enumerate() {
            assert_eq!(pair[1].index, index + 1);
            assert!((pair[0].position.distance(pair[1].position) - SETTINGS.min_distance).abs() < 1e-12);
        }

        // Already long enough
        sim.grow_to(2);
        assert_eq!(sim.len(), 5);
    }

    #[test]
    fn too_far_segment_moves_closer() {
        let mut sim = with_positions(SETTINGS, &[DVec2::ZERO, DVec2::new(0.2, 0.0)]);
        // Pointer placed so the head stays at the origin
        sim.update(DVec2::new(-0.2, 0.0));
        assert!(sim.head().position.length() < 1e-12);

        // factor = 0.1 * 0.2 / 0.1 = 0.2, target is 0.1 closer, so the segment moves 0.02
        let distance = sim.segments()[1].position.distance(sim.head().position);
        assert!((distance - 0.18).abs() < 1e-12);
    }

    #[test]
    fn too_close_segment_moves_away() {
        let mut sim = with_positions(SETTINGS, &[DVec2::ZERO, DVec2::new(0.01, 0.0)]);
        sim.update(DVec2::new(-0.2, 0.0));

        // factor = 0.1 * 0.01 / 0.1 = 0.01, target is 0.04 further, so the segment moves 0.0004
        let distance = sim.segments()[1].position.distance(sim.head().position);
        assert!((distance - 0.0104).abs() < 1e-12);
    }

    #[test]
    fn inside_band_does_not_move() {
        let mut sim = with_positions(SETTINGS, &[DVec2::ZERO, DVec2::new(0.07, 0.0)]);
        sim.update(DVec2::new(-0.2, 0.0));

        assert_eq!(sim.segments()[1].position, DVec2::new(0.07, 0.0));
    }

    #[test]
    fn coincident_segment_is_skipped() {
        let mut sim = with_positions(SETTINGS, &[DVec2::ZERO, DVec2::ZERO]);
        sim.update(DVec2::new(-0.2, 0.0));

        assert_eq!(sim.segments()[1].position, DVec2::ZERO);
        assert!(sim.segments()[1].orientation.is_finite());
    }

    #[test]
    fn segment_orientation_faces_its_leader() {
        let mut sim = with_positions(SETTINGS, &[DVec2::ZERO, DVec2::new(0.0, -0.2)]);
        sim.update(DVec2::new(-0.2, 0.0));

        assert!((sim.segments()[1].orientation - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }
}
