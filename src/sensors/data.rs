//! Output data structures handed back to the monitoring host.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Monitoring state of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum State {
    Ok,
    Warn,
    Crit,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            State::Ok => "OK",
            State::Warn => "WARN",
            State::Crit => "CRIT",
        };
        f.write_str(label)
    }
}

/// A discoverable service, one per catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Service {
    /// Identity key of the record
    pub item: String,
}

impl Service {
    pub fn new(item: impl Into<String>) -> Self {
        Self { item: item.into() }
    }
}

/// A numeric time-series sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    /// Metric name used for graphing
    pub name: String,
    /// Sample value
    pub value: f64,
    /// `(warning, critical)` graph annotation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub levels: Option<(f64, f64)>,
}

impl Metric {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            levels: None,
        }
    }

    /// Attach `(warning, critical)` bounds.
    pub fn with_levels(mut self, warning: f64, critical: f64) -> Self {
        self.levels = Some((warning, critical));
        self
    }
}

/// The final state of one evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub state: State,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl CheckResult {
    pub fn new(state: State, summary: impl Into<String>) -> Self {
        Self {
            state,
            summary: summary.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// One element of an evaluation: metrics first, then exactly one result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CheckOutput {
    Metric(Metric),
    Result(CheckResult),
}

impl From<Metric> for CheckOutput {
    fn from(metric: Metric) -> Self {
        CheckOutput::Metric(metric)
    }
}

impl From<CheckResult> for CheckOutput {
    fn from(result: CheckResult) -> Self {
        CheckOutput::Result(result)
    }
}

impl CheckOutput {
    pub fn as_metric(&self) -> Option<&Metric> {
        match self {
            CheckOutput::Metric(metric) => Some(metric),
            CheckOutput::Result(_) => None,
        }
    }

    pub fn as_result(&self) -> Option<&CheckResult> {
        match self {
            CheckOutput::Result(result) => Some(result),
            CheckOutput::Metric(_) => None,
        }
    }
}

/// Render a float in shortest round-trip form, keeping `.0` on integral
/// values (`95.0`, `15.5`, `0.27`).
pub fn format_float(value: f64) -> String {
    format!("{value:?}")
}
