//! Software pixel buffer implementing [`Renderer`].

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use glam::DVec2;
use miette::{IntoDiagnostic, Result, WrapErr};
use png::{BitDepth, ColorType, Encoder};

use crate::render::{Disc, Renderer};

/// Owned buffer of ARGB pixels that can be drawn on.
///
/// Pixel `(0, 0)` is the top-left corner, world coordinates map directly to pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    /// Width in pixels.
    width: usize,
    /// Height in pixels.
    height: usize,
    /// All pixels, row by row.
    buffer: Vec<u32>,
}

impl Canvas {
    /// Create a canvas filled with a single color.
    #[must_use]
    pub fn new(size: impl Into<(u32, u32)>, color: u32) -> Self {
        let (width, height) = size.into();
        let width = width as usize;
        let height = height as usize;

        let buffer = vec![color; width * height];

        Self {
            width,
            height,
            buffer,
        }
    }

    /// Set a pixel on the buffer at the coordinate passed.
    ///
    /// If the coordinate is out of bounds nothing will be done.
    #[inline]
    pub fn set_pixel(&mut self, position: DVec2, color: u32) {
        if let Some(index) = self.index(position) {
            self.buffer[index] = color;
        }
    }

    /// Color of a single pixel.
    ///
    /// # Returns
    ///
    /// - `None` when the coordinate is out of bounds.
    #[inline]
    #[must_use]
    pub fn pixel(&self, position: DVec2) -> Option<u32> {
        self.index(position).map(|index| self.buffer[index])
    }

    /// Fill a circle, everything outside of the canvas is clipped.
    ///
    /// A pixel is filled when its center lies inside the circle.
    pub fn fill_disc(&mut self, disc: Disc) {
        let Disc {
            center,
            radius,
            color,
        } = disc;
        if !center.is_finite() || !radius.is_finite() || radius <= 0.0 {
            return;
        }

        // Clamp the rows to the canvas
        let start_y = ((center.y - radius).floor().max(0.0) as usize).min(self.height);
        let end_y = ((center.y + radius).ceil().max(0.0) as usize).min(self.height);

        for y in start_y..end_y {
            // Half of the span width at the center of this row
            let dy = y as f64 + 0.5 - center.y;
            let half_width_squared = radius.mul_add(radius, -dy * dy);
            if half_width_squared < 0.0 {
                continue;
            }
            let half_width = half_width_squared.sqrt();

            // Pixel centers inside the span, clamped to the row
            let start_x = ((center.x - half_width - 0.5).ceil().max(0.0) as usize).min(self.width);
            let end_x = ((center.x + half_width - 0.5).floor() + 1.0).max(0.0) as usize;
            let end_x = end_x.min(self.width);
            if start_x >= end_x {
                continue;
            }

            // Draw the pixels
            let y_index = y * self.width;
            self.buffer[(y_index + start_x)..(y_index + end_x)].fill(color);
        }
    }

    /// Fill the canvas with a single color.
    #[inline]
    pub fn fill(&mut self, color: u32) {
        self.buffer.fill(color);
    }

    /// Get the raw buffer of pixels.
    #[inline]
    #[must_use]
    pub fn raw_buffer(&self) -> &[u32] {
        &self.buffer
    }

    /// Width in pixels.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Encode the pixels as an 8 bit RGBA PNG.
    ///
    /// # Errors
    ///
    /// - When the PNG header or data can't be written.
    pub fn encode_png<W>(&self, writer: W) -> Result<()>
    where
        W: Write,
    {
        let mut encoder = Encoder::new(writer, self.width as u32, self.height as u32);
        encoder.set_color(ColorType::Rgba);
        encoder.set_depth(BitDepth::Eight);

        let mut writer = encoder
            .write_header()
            .into_diagnostic()
            .wrap_err("Error writing PNG header")?;

        // ARGB to RGBA bytes
        let bytes = self
            .buffer
            .iter()
            .flat_map(|pixel| {
                let [a, r, g, b] = pixel.to_be_bytes();

                [r, g, b, a]
            })
            .collect::<Vec<_>>();

        writer
            .write_image_data(&bytes)
            .into_diagnostic()
            .wrap_err("Error writing PNG image data")?;

        writer
            .finish()
            .into_diagnostic()
            .wrap_err("Error finishing PNG")
    }

    /// Write the pixels to a PNG file.
    ///
    /// # Errors
    ///
    /// - When the file can't be created.
    /// - When encoding fails, see [`Self::encode_png`].
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let file = File::create(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Error creating PNG file {path:?}"))?;

        self.encode_png(BufWriter::new(file))
            .wrap_err_with(|| format!("Error saving canvas to {path:?}"))
    }

    /// Index into the buffer for a coordinate.
    #[inline]
    fn index(&self, position: DVec2) -> Option<usize> {
        if !(position.x >= 0.0
            && position.y >= 0.0
            && position.x < self.width as f64
            && position.y < self.height as f64)
        {
            return None;
        }

        Some(position.x as usize + position.y as usize * self.width)
    }
}

impl Renderer for Canvas {
    #[inline]
    fn clear(&mut self, color: u32) {
        self.fill(color);
    }

    #[inline]
    fn draw_disc(&mut self, disc: Disc) {
        self.fill_disc(disc);
    }
}
