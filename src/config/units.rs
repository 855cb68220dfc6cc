//! Unit types for physical quantities.
//!
//! Provides type-safe representations of angles, pulse counts, ball speed
//! and time spans to prevent unit confusion at compile time.

use core::ops::{Add, Neg, Sub};

use serde::Deserialize;

/// Angular position in degrees.
///
/// Used for aim tables and the tracker API. Internally converted to [`Pulses`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f32);

impl Degrees {
    /// Create a new Degrees value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Absolute angle.
    #[inline]
    pub fn abs(self) -> Self {
        Self(libm::fabsf(self.0))
    }
}

impl Add for Degrees {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Degrees {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

/// Signed motor pulse count (offset from mechanical center).
///
/// Uses i64 for unlimited range in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Pulses(pub i64);

impl Pulses {
    /// Zero pulses (mechanical center).
    pub const ZERO: Self = Self(0);

    /// Create a new Pulses value.
    #[inline]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Get absolute value as u64.
    #[inline]
    pub fn abs(self) -> u64 {
        self.0.unsigned_abs()
    }

    /// Whole pulses needed to cover an angle, truncated toward zero.
    ///
    /// The sign of the angle is kept.
    #[inline]
    pub fn from_degrees(degrees: Degrees, degrees_per_pulse: f32) -> Self {
        Self((degrees.0 / degrees_per_pulse) as i64)
    }
}

impl Add for Pulses {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Pulses {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Pulses {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

/// Ball exit speed in miles per hour.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct Mph(pub f32);

impl Mph {
    /// Create a new Mph value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }
}

/// Time span in seconds (rate of fire).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct Seconds(pub f32);

impl Seconds {
    /// Create a new Seconds value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Whole milliseconds, clamped at zero.
    #[inline]
    pub fn as_millis(self) -> u32 {
        if self.0 > 0.0 {
            libm::roundf(self.0 * 1000.0) as u32
        } else {
            0
        }
    }
}
