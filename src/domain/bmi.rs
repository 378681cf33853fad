//! Body-mass-index computation and weight-category classification
//!
//! Both are pure functions of the stored height and weight. Nothing here is
//! ever persisted; callers recompute on every read.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower bound of the `Normal` band
pub const NORMAL_LOWER_BOUND: f64 = 18.5;

/// Lower bound of the `Overweight` band
pub const OVERWEIGHT_LOWER_BOUND: f64 = 25.0;

/// Lower bound of the `Obese` band
pub const OBESE_LOWER_BOUND: f64 = 30.0;

/// Computes `weight / height²` (kilograms, meters)
///
/// # Examples
///
/// ```
/// use patient_registry::domain::bmi::body_mass_index;
///
/// let bmi = body_mass_index(72.0, 1.8);
/// assert!((bmi - 22.222).abs() < 0.001);
/// ```
pub fn body_mass_index(weight: f64, height: f64) -> f64 {
    weight / (height * height)
}

/// Four-band BMI weight-category classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// bmi < 18.5
    Underweight,
    /// 18.5 ≤ bmi < 25
    Normal,
    /// 25 ≤ bmi < 30
    Overweight,
    /// bmi ≥ 30
    Obese,
}

impl Verdict {
    /// All verdicts, lightest band first
    pub const ALL: [Verdict; 4] = [
        Verdict::Underweight,
        Verdict::Normal,
        Verdict::Overweight,
        Verdict::Obese,
    ];

    /// Classifies a BMI value
    ///
    /// Each boundary belongs to the higher band: 18.5 is `Normal`, 25 is
    /// `Overweight`, 30 is `Obese`.
    pub fn classify(bmi: f64) -> Self {
        if bmi < NORMAL_LOWER_BOUND {
            Verdict::Underweight
        } else if bmi < OVERWEIGHT_LOWER_BOUND {
            Verdict::Normal
        } else if bmi < OBESE_LOWER_BOUND {
            Verdict::Overweight
        } else {
            Verdict::Obese
        }
    }

    /// Display label, as returned to clients
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Underweight => "Underweight",
            Verdict::Normal => "Normal",
            Verdict::Overweight => "Overweight",
            Verdict::Obese => "Obese",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
