//! Threshold resolution and ordered comparison for threshold-bearing
//! sensors (temperature and humidity).

use crate::params::CheckParams;
use crate::sensors::data::{format_float, State};

/// Effective boundaries for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Levels {
    pub low_alarm: f64,
    pub low_warning: f64,
    pub high_warning: f64,
    pub high_alarm: f64,
}

/// Outcome of comparing a value against [`Levels`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    BelowCritical,
    AboveCritical,
    AboveWarning,
    BelowWarning,
}

impl Violation {
    pub fn state(self) -> State {
        match self {
            Violation::BelowCritical | Violation::AboveCritical => State::Crit,
            Violation::AboveWarning | Violation::BelowWarning => State::Warn,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Violation::BelowCritical => "is below critical threshold",
            Violation::AboveCritical => "is above critical threshold",
            Violation::AboveWarning => "is above warning threshold",
            Violation::BelowWarning => "is below warning threshold",
        }
    }
}

impl Levels {
    /// Resolve boundaries from overrides, falling back to the
    /// device-reported `[low_alarm, low_warning, high_warning, high_alarm]`.
    pub fn resolve(params: &CheckParams, device: [i64; 4]) -> Self {
        let [low_alarm, low_warning, high_warning, high_alarm] = device.map(|v| v as f64);
        let (low_warning, low_alarm) = params.levels_lower.unwrap_or((low_warning, low_alarm));
        let (high_warning, high_alarm) = params.levels.unwrap_or((high_warning, high_alarm));

        Self {
            low_alarm,
            low_warning,
            high_warning,
            high_alarm,
        }
    }

    /// Compare a value, alarms before warnings, inclusive on every bound.
    pub fn classify(&self, value: f64) -> Option<Violation> {
        if value <= self.low_alarm {
            Some(Violation::BelowCritical)
        } else if value >= self.high_alarm {
            Some(Violation::AboveCritical)
        } else if value >= self.high_warning {
            Some(Violation::AboveWarning)
        } else if value <= self.low_warning {
            Some(Violation::BelowWarning)
        } else {
            None
        }
    }

    /// Upper `(warning, critical)` pair attached to metrics.
    pub fn upper(&self) -> (f64, f64) {
        (self.high_warning, self.high_alarm)
    }

    pub fn details(&self) -> String {
        format!(
            "High alarm:{}, High warning:{}, Low warning:{}, Low alarm:{}",
            format_float(self.high_alarm),
            format_float(self.high_warning),
            format_float(self.low_warning),
            format_float(self.low_alarm),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device() -> Levels {
        Levels::resolve(&CheckParams::default(), [5, 10, 90, 95])
    }

    #[test]
    fn test_resolve_from_device() {
        let levels = device();
        assert_eq!(levels.low_alarm, 5.0);
        assert_eq!(levels.low_warning, 10.0);
        assert_eq!(levels.upper(), (90.0, 95.0));
    }

    #[test]
    fn test_overrides_apply_per_side() {
        let params = CheckParams::default().with_levels(60.0, 70.0);
        let levels = Levels::resolve(&params, [5, 10, 90, 95]);
        assert_eq!(levels.upper(), (60.0, 70.0));
        assert_eq!((levels.low_warning, levels.low_alarm), (10.0, 5.0));

        let params = CheckParams::default().with_levels_lower(20.0, 15.0);
        let levels = Levels::resolve(&params, [5, 10, 90, 95]);
        assert_eq!((levels.low_warning, levels.low_alarm), (20.0, 15.0));
        assert_eq!(levels.upper(), (90.0, 95.0));
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        let levels = device();
        assert_eq!(levels.classify(95.0), Some(Violation::AboveCritical));
        assert_eq!(levels.classify(5.0), Some(Violation::BelowCritical));
        assert_eq!(levels.classify(90.0), Some(Violation::AboveWarning));
        assert_eq!(levels.classify(10.0), Some(Violation::BelowWarning));
        assert_eq!(levels.classify(50.0), None);
    }

    #[test]
    fn test_alarm_wins_over_warning() {
        // Overlapping bands: 40 is both above high warning and below low alarm.
        let params = CheckParams::default()
            .with_levels(30.0, 60.0)
            .with_levels_lower(50.0, 45.0);
        let levels = Levels::resolve(&params, [0, 0, 0, 0]);
        let violation = levels.classify(40.0).unwrap();
        assert_eq!(violation, Violation::BelowCritical);
        assert_eq!(violation.state(), State::Crit);
    }

    #[test]
    fn test_details() {
        assert_eq!(
            device().details(),
            "High alarm:95.0, High warning:90.0, Low warning:10.0, Low alarm:5.0"
        );
    }
}
