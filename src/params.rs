//! Check parameters supplied by the host on every evaluation call.

use crate::error::{PduError, Result};
use serde::{Deserialize, Serialize};

/// Display unit for temperature summaries.
///
/// Metrics and threshold comparisons always stay in Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputUnit {
    #[default]
    #[serde(rename = "c", alias = "celsius")]
    Celsius,
    #[serde(rename = "f", alias = "fahrenheit")]
    Fahrenheit,
    #[serde(rename = "k", alias = "kelvin")]
    Kelvin,
}

impl OutputUnit {
    /// Convert a Celsius reading to this unit.
    pub fn convert(self, celsius: f64) -> f64 {
        match self {
            OutputUnit::Celsius => celsius,
            OutputUnit::Fahrenheit => (celsius * 9.0 / 5.0) + 32.0,
            OutputUnit::Kelvin => celsius + 273.15,
        }
    }

    /// Unit suffix used in summaries.
    pub fn symbol(self) -> &'static str {
        match self {
            OutputUnit::Celsius => "°C",
            OutputUnit::Fahrenheit => "°F",
            OutputUnit::Kelvin => "K",
        }
    }
}

/// Optional threshold overrides.
///
/// Every absent key falls back to the boundary reported by the device.
/// Other keys a host ruleset carries are ignored.
/// Pairs are `(warning, critical)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckParams {
    /// Lower `(warning, critical)` boundaries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub levels_lower: Option<(f64, f64)>,
    /// Upper `(warning, critical)` boundaries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub levels: Option<(f64, f64)>,
    /// Temperature display unit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_unit: Option<OutputUnit>,
}

impl CheckParams {
    /// Set the lower `(warning, critical)` boundaries.
    pub fn with_levels_lower(mut self, warning: f64, critical: f64) -> Self {
        self.levels_lower = Some((warning, critical));
        self
    }

    /// Set the upper `(warning, critical)` boundaries.
    pub fn with_levels(mut self, warning: f64, critical: f64) -> Self {
        self.levels = Some((warning, critical));
        self
    }

    /// Set the temperature display unit.
    pub fn with_output_unit(mut self, unit: OutputUnit) -> Self {
        self.output_unit = Some(unit);
        self
    }

    /// Decode parameters from a JSON object, rejecting unusable values.
    pub fn from_json(json: &str) -> Result<Self> {
        let params: CheckParams = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Reject boundaries that cannot be compared against.
    pub fn validate(&self) -> Result<()> {
        for (key, pair) in [("levels_lower", self.levels_lower), ("levels", self.levels)] {
            if let Some((warning, critical)) = pair {
                if !warning.is_finite() || !critical.is_finite() {
                    return Err(PduError::config_error(format!(
                        "{key} must be finite, got ({warning}, {critical})"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Display unit, Celsius when absent.
    pub fn output_unit(&self) -> OutputUnit {
        self.output_unit.unwrap_or_default()
    }
}
