use glam::DVec2;

/// Position with a rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Iso {
    /// Position before being rotated.
    pub pos: DVec2,
    /// Rotation in radians.
    pub rot: f64,
}

impl Iso {
    /// Construct from a position and a rotation in radians.
    #[inline]
    #[must_use]
    pub fn new<P>(pos: P, rot: f64) -> Self
    where
        P: Into<DVec2>,
    {
        let pos = pos.into();

        Self { pos, rot }
    }

    /// Rotate a relative point and add the position.
    #[inline]
    #[must_use]
    pub fn translate(&self, point: DVec2) -> DVec2 {
        self.pos + DVec2::from_angle(self.rot).rotate(point)
    }
}
