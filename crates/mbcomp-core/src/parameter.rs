//! Parameter range and scaling for host-facing parameters.
//!
//! Provides normalized (0.0-1.0) ↔ real value conversion, clamping and step
//! snapping. Every write to a parameter object goes through its range, which
//! is what keeps out-of-range values away from the engine.
//!
//! # Example
//!
//! ```
//! use mbcomp_core::{ParameterRange, ParameterScale};
//!
//! // Crossover: 1 kHz to 20 kHz, logarithmic for the generic editor
//! let cutoff = ParameterRange::logarithmic(1000.0, 20000.0, 2000.0);
//!
//! let hz = cutoff.denormalize(0.5); // ~4472 Hz (geometric mean)
//! let back = cutoff.normalize(hz); // ~0.5
//! assert!((back - 0.5).abs() < 1e-4);
//! ```

/// How a parameter value is scaled between normalized (0-1) and real values.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ParameterScale {
    /// Linear mapping (default)
    ///
    /// `real = min + normalized * (max - min)`
    #[default]
    Linear,

    /// Logarithmic scaling (for frequencies)
    ///
    /// `real = min * (max/min)^normalized`
    ///
    /// Requires `min > 0` and `max > min`.
    Logarithmic,

    /// On/off toggle (normalized < 0.5 = off, >= 0.5 = on)
    ///
    /// Denormalizes to `min` (off) or `max` (on).
    Toggle,

    /// Discrete integer steps, used for choice indices.
    Integer,
}

/// Parameter range with scaling and an optional step interval.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterRange {
    /// Minimum real value
    pub min: f32,
    /// Maximum real value
    pub max: f32,
    /// Default real value
    pub default: f32,
    /// Snapping interval in real units (0.0 = continuous)
    pub step: f32,
    /// Scaling algorithm
    pub scale: ParameterScale,
}

impl ParameterRange {
    /// Create a new parameter range.
    ///
    /// # Arguments
    ///
    /// * `min` - Minimum real value
    /// * `max` - Maximum real value (must be > min)
    /// * `default` - Default real value (will be clamped to range)
    /// * `scale` - Scaling algorithm
    pub fn new(min: f32, max: f32, default: f32, scale: ParameterScale) -> Self {
        debug_assert!(max > min, "max must be greater than min");

        Self {
            min,
            max,
            default: default.clamp(min, max),
            step: 0.0,
            scale,
        }
    }

    /// Create a linear parameter range.
    pub fn linear(min: f32, max: f32, default: f32) -> Self {
        Self::new(min, max, default, ParameterScale::Linear)
    }

    /// Create a logarithmic parameter range (for frequencies).
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `min <= 0`.
    pub fn logarithmic(min: f32, max: f32, default: f32) -> Self {
        debug_assert!(min > 0.0, "logarithmic scale requires min > 0");
        Self::new(min, max, default, ParameterScale::Logarithmic)
    }

    /// Create a toggle (on/off) parameter.
    pub fn toggle(default_on: bool) -> Self {
        Self::new(
            0.0,
            1.0,
            if default_on { 1.0 } else { 0.0 },
            ParameterScale::Toggle,
        )
    }

    /// Create an integer parameter range.
    pub fn integer(min: i32, max: i32, default: i32) -> Self {
        Self::new(
            min as f32,
            max as f32,
            default as f32,
            ParameterScale::Integer,
        )
        .with_step(1.0)
    }

    /// Snap written values to multiples of `step` above `min`.
    pub fn with_step(mut self, step: f32) -> Self {
        self.step = step.max(0.0);
        self.default = self.constrain(self.default);
        self
    }

    /// Convert a real value to normalized (0.0-1.0).
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let value = value.clamp(self.min, self.max);
        let range = self.max - self.min;

        if range <= 0.0 {
            return 0.0;
        }

        match self.scale {
            ParameterScale::Linear => (value - self.min) / range,

            ParameterScale::Logarithmic => {
                if self.min <= 0.0 {
                    (value - self.min) / range
                } else {
                    let log_min = self.min.ln();
                    let log_max = self.max.ln();
                    (value.ln() - log_min) / (log_max - log_min)
                }
            }

            ParameterScale::Toggle => {
                if value >= (self.min + self.max) / 2.0 {
                    1.0
                } else {
                    0.0
                }
            }

            ParameterScale::Integer => (value.round() - self.min) / range,
        }
    }

    /// Convert a normalized value (0.0-1.0) to a real value.
    ///
    /// The result is clamped and snapped to the step interval.
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        let normalized = normalized.clamp(0.0, 1.0);
        let range = self.max - self.min;

        let real = match self.scale {
            ParameterScale::Linear => self.min + normalized * range,

            ParameterScale::Logarithmic => {
                if self.min <= 0.0 {
                    self.min + normalized * range
                } else {
                    let log_min = self.min.ln();
                    let log_max = self.max.ln();
                    (log_min + normalized * (log_max - log_min)).exp()
                }
            }

            ParameterScale::Toggle => {
                if normalized >= 0.5 {
                    self.max
                } else {
                    self.min
                }
            }

            ParameterScale::Integer => (self.min + normalized * range).round(),
        };

        self.constrain(real)
    }

    /// Clamp to the range, then snap to the step interval.
    ///
    /// Non-finite input falls back to the default.
    #[inline]
    pub fn constrain(&self, value: f32) -> f32 {
        if !value.is_finite() {
            return self.default;
        }
        let clamped = value.clamp(self.min, self.max);
        if self.step > 0.0 {
            let snapped = self.min + ((clamped - self.min) / self.step).round() * self.step;
            snapped.clamp(self.min, self.max)
        } else {
            clamped
        }
    }

    /// Check if a real value is within range.
    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

impl Default for ParameterRange {
    fn default() -> Self {
        Self::linear(0.0, 1.0, 0.5)
    }
}
