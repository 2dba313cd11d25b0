//! Simulation and drawing configuration.

use glam::DVec2;
use miette::{IntoDiagnostic, Result, WrapErr};
use serde::Deserialize;

use crate::chain::ChainSettings;

/// Initial configuration passed to [`crate::Slither::new`].
///
/// There's three ways to initialize the config:
///
/// # Example
///
/// ```rust
/// # use slither::Config;
/// Config {
///   min_distance: 10.0,
///   ..Default::default()
/// };
/// ```
///
/// # Example
///
/// ```rust
/// # use slither::Config;
/// Config::default().with_smooth_factor(0.2);
/// ```
///
/// # Example
///
/// ```rust
/// # use slither::Config;
/// let config = Config::from_toml_str("max_distance = 60.0").unwrap();
/// assert_eq!(config.max_distance, 60.0);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Smallest allowed gap between the centers of neighboring segments.
    ///
    /// New tail segments are spawned at this distance.
    ///
    /// Defaults to `25.0`.
    pub min_distance: f64,
    /// Largest allowed gap between the centers of neighboring segments.
    ///
    /// Defaults to `50.0`.
    pub max_distance: f64,
    /// How fast segments move back into the distance band.
    ///
    /// Scaled by the relative gap each update, larger gaps are corrected faster.
    ///
    /// Defaults to `0.1`.
    pub smooth_factor: f64,
    /// How far the head stays behind the pointer.
    ///
    /// Defaults to `10.0`.
    pub standoff: f64,
    /// Where the head starts.
    ///
    /// Defaults to `(400.0, 300.0)`, the middle of the default buffer.
    pub head_position: DVec2,
    /// Amount of segments, including the head, spawned at startup.
    ///
    /// Defaults to `1`.
    pub initial_length: usize,
    /// Radius of a single drawn segment in pixels.
    ///
    /// Eyes are scaled relative to this.
    ///
    /// Defaults to `25.0`.
    pub segment_radius: f64,
    /// Color of the head and every other segment after it.
    ///
    /// Defaults to `0xFF0000FF` (blue).
    pub even_color: u32,
    /// Color of the segments in between.
    ///
    /// Defaults to `0xFFFFFF00` (yellow).
    pub odd_color: u32,
    /// Color of the white of the eyes.
    ///
    /// Defaults to `0xFFFFFFFF` (white).
    pub eye_color: u32,
    /// Color of the pupils.
    ///
    /// Defaults to `0xFF000000` (black).
    pub pupil_color: u32,
    /// Color the buffer is cleared with every frame.
    ///
    /// Defaults to `0xFF000000` (black).
    pub background_color: u32,
    /// Width of the drawing buffer in pixels.
    ///
    /// Defaults to `800`.
    pub buffer_width: u32,
    /// Height of the drawing buffer in pixels.
    ///
    /// Defaults to `600`.
    pub buffer_height: u32,
}

impl Config {
    /// Parse a configuration from TOML, missing keys use the defaults.
    ///
    /// # Errors
    ///
    /// - When the TOML can't be parsed or contains unknown keys.
    /// - When any of the values is invalid, see [`Self::validate`].
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)
            .into_diagnostic()
            .wrap_err("Error parsing TOML configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Read a configuration from a TOML file on disk.
    ///
    /// # Errors
    ///
    /// - When the file can't be read.
    /// - When the contents are not a valid configuration, see [`Self::from_toml_str`].
    pub fn from_toml_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();

        let source = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Error reading configuration file {path:?}"))?;

        Self::from_toml_str(&source)
            .wrap_err_with(|| format!("Error loading configuration file {path:?}"))
    }

    /// Check whether the values can drive a simulation.
    ///
    /// # Errors
    ///
    /// - When any distance or the smooth factor is not a positive finite number.
    /// - When `min_distance` is not smaller than `max_distance`.
    /// - When `standoff` is negative.
    /// - When `initial_length` is zero, the head must always exist.
    /// - When the buffer has no pixels.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("min_distance", self.min_distance),
            ("max_distance", self.max_distance),
            ("smooth_factor", self.smooth_factor),
            ("segment_radius", self.segment_radius),
        ] {
            if !value.is_finite() || value <= 0.0 {
                miette::bail!("Configuration value '{name}' must be a positive number, got {value}");
            }
        }

        if self.min_distance >= self.max_distance {
            miette::bail!(
                "Configuration value 'min_distance' ({}) must be smaller than 'max_distance' ({})",
                self.min_distance,
                self.max_distance
            );
        }

        if !self.standoff.is_finite() || self.standoff < 0.0 {
            miette::bail!(
                "Configuration value 'standoff' must not be negative, got {}",
                self.standoff
            );
        }

        if !self.head_position.is_finite() {
            miette::bail!("Configuration value 'head_position' must be finite");
        }

        if self.initial_length == 0 {
            miette::bail!("Configuration value 'initial_length' must be at least 1");
        }

        if self.buffer_width == 0 || self.buffer_height == 0 {
            miette::bail!(
                "Buffer size must not be empty, got {}x{}",
                self.buffer_width,
                self.buffer_height
            );
        }

        Ok(())
    }

    /// Constants used by the simulator.
    #[inline]
    #[must_use]
    pub const fn chain_settings(&self) -> ChainSettings {
        ChainSettings {
            min_distance: self.min_distance,
            max_distance: self.max_distance,
            smooth_factor: self.smooth_factor,
            standoff: self.standoff,
        }
    }

    /// Set the smallest allowed gap between segments.
    #[inline]
    #[must_use]
    pub fn with_min_distance(mut self, min_distance: f64) -> Self {
        self.min_distance = min_distance;

        self
    }

    /// Set the largest allowed gap between segments.
    #[inline]
    #[must_use]
    pub fn with_max_distance(mut self, max_distance: f64) -> Self {
        self.max_distance = max_distance;

        self
    }

    /// Set how fast segments move back into the distance band.
    #[inline]
    #[must_use]
    pub fn with_smooth_factor(mut self, smooth_factor: f64) -> Self {
        self.smooth_factor = smooth_factor;

        self
    }

    /// Set how far the head stays behind the pointer.
    #[inline]
    #[must_use]
    pub fn with_standoff(mut self, standoff: f64) -> Self {
        self.standoff = standoff;

        self
    }

    /// Set where the head starts.
    #[inline]
    #[must_use]
    pub fn with_head_position(mut self, head_position: impl Into<DVec2>) -> Self {
        self.head_position = head_position.into();

        self
    }

    /// Set the amount of segments spawned at startup, including the head.
    #[inline]
    #[must_use]
    pub fn with_initial_length(mut self, initial_length: usize) -> Self {
        self.initial_length = initial_length;

        self
    }

    /// Set the radius of a drawn segment.
    #[inline]
    #[must_use]
    pub fn with_segment_radius(mut self, segment_radius: f64) -> Self {
        self.segment_radius = segment_radius;

        self
    }

    /// Set both alternating segment colors.
    #[inline]
    #[must_use]
    pub fn with_segment_colors(mut self, even_color: u32, odd_color: u32) -> Self {
        self.even_color = even_color;
        self.odd_color = odd_color;

        self
    }

    /// Set the color the buffer is cleared with.
    #[inline]
    #[must_use]
    pub fn with_background_color(mut self, background_color: u32) -> Self {
        self.background_color = background_color;

        self
    }

    /// Set the size of the drawing buffer in pixels.
    #[inline]
    #[must_use]
    pub fn with_buffer_size(mut self, buffer_size: impl Into<(u32, u32)>) -> Self {
        let (buffer_width, buffer_height) = buffer_size.into();
        self.buffer_width = buffer_width;
        self.buffer_height = buffer_height;

        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_distance: 25.0,
            max_distance: 50.0,
            smooth_factor: 0.1,
            standoff: 10.0,
            head_position: DVec2::new(400.0, 300.0),
            initial_length: 1,
            segment_radius: 25.0,
            even_color: 0xFF00_00FF,
            odd_color: 0xFFFF_FF00,
            eye_color: 0xFFFF_FFFF,
            pupil_color: 0xFF00_0000,
            background_color: 0xFF00_0000,
            buffer_width: 800,
            buffer_height: 600,
        }
    }
}
