//! Unit newtypes for the quantities that flow through model construction.
//!
//! Production volumes arrive in tonnes per reference period, the horizon is
//! measured in hours, and link capacities are expressed on the electricity
//! side in megawatts. Wrapping them keeps the conversions explicit:
//!
//! ```
//! use sct_core::units::{Hours, Tonnes};
//!
//! let rate = Tonnes(8760.0) / Hours(8760.0);
//! assert_eq!(rate.value(), 1.0);
//! ```
//!
//! All types are `#[repr(transparent)]` over `f64`.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Neg, Sub};

macro_rules! impl_unit_ops {
    ($type:ty, $unit_name:literal) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Neg for $type {
            type Output = Self;
            fn neg(self) -> Self::Output {
                Self(-self.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl std::fmt::Display for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{:.4} {}", self.0, $unit_name)
            }
        }

        impl $type {
            #[inline]
            pub const fn new(value: f64) -> Self {
                Self(value)
            }

            /// Raw numeric value
            #[inline]
            pub const fn value(self) -> f64 {
                self.0
            }

            #[inline]
            pub fn is_finite(self) -> bool {
                self.0.is_finite()
            }

            /// Unbounded value used for capacity limits
            pub const INFINITY: Self = Self(f64::INFINITY);

            pub const ZERO: Self = Self(0.0);
        }

        impl std::iter::Sum for $type {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                Self(iter.map(|x| x.0).sum())
            }
        }
    };
}

/// Mass in metric tonnes (t)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Tonnes(pub f64);

impl_unit_ops!(Tonnes, "t");

/// Duration in hours (h)
///
/// The modelling horizon is the sum of snapshot weightings, 8760 for a full
/// year regardless of temporal resolution.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Hours(pub f64);

impl_unit_ops!(Hours, "h");

/// Mass flow in tonnes per hour (t/h)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct TonnesPerHour(pub f64);

impl_unit_ops!(TonnesPerHour, "t/h");

/// Power in megawatts (MW), the capacity basis of conversion links
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Megawatts(pub f64);

impl_unit_ops!(Megawatts, "MW");

/// Dimensionless fraction of nominal capacity (pu)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct PerUnit(pub f64);

impl_unit_ops!(PerUnit, "pu");

impl PerUnit {
    pub const ONE: Self = Self(1.0);
}

impl Div<Hours> for Tonnes {
    type Output = TonnesPerHour;
    fn div(self, rhs: Hours) -> Self::Output {
        TonnesPerHour(self.0 / rhs.0)
    }
}

impl Mul<Hours> for TonnesPerHour {
    type Output = Tonnes;
    fn mul(self, rhs: Hours) -> Self::Output {
        Tonnes(self.0 * rhs.0)
    }
}

impl TonnesPerHour {
    /// Electrical power needed to sustain this flow given a specific
    /// electricity input in MWh per tonne.
    #[inline]
    pub fn electrical_power(self, mwh_per_tonne: f64) -> Megawatts {
        Megawatts(self.0 * mwh_per_tonne)
    }
}
