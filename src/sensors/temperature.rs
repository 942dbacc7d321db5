//! Temperature sensors (`st4TemperatureSensors`).
//!
//! The device reports values in tenths of a degree on a scale selected by a
//! leading control column. Records are always normalized to Celsius.

use crate::catalog::Catalog;
use crate::error::{parse_int, Result};
use crate::params::CheckParams;
use crate::sensors::data::{format_float, CheckOutput, CheckResult, Metric, State};
use crate::sensors::levels::Levels;
use crate::sensors::traits::{split_row, RawRow, SensorSection};
use serde::{Deserialize, Serialize};

/// Raw tenths-of-a-degree value of an absent sensor on the Celsius scale.
pub const CELSIUS_ABSENT: i64 = -410;
/// Raw tenths-of-a-degree value of an absent sensor on the Fahrenheit scale.
pub const FAHRENHEIT_ABSENT: i64 = -706;

pub fn fahrenheit_to_celsius(f: f64) -> f64 {
    (f - 32.0) * 5.0 / 9.0
}

/// Temperature scale reported by `st4TempSensorScale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Scale {
    Celsius,
    /// Anything other than `0`, including a missing scale row
    #[default]
    Fahrenheit,
}

impl Scale {
    fn from_flag(flag: &str) -> Self {
        if flag == "0" {
            Scale::Celsius
        } else {
            Scale::Fahrenheit
        }
    }

    fn absent_sentinel(self) -> i64 {
        match self {
            Scale::Celsius => CELSIUS_ABSENT,
            Scale::Fahrenheit => FAHRENHEIT_ABSENT,
        }
    }

    /// Convert a tenths-of-a-degree reading to Celsius.
    fn reading(self, tenths: i64) -> f64 {
        let degrees = tenths as f64 / 10.0;
        match self {
            Scale::Celsius => degrees,
            Scale::Fahrenheit => fahrenheit_to_celsius(degrees),
        }
    }

    /// Convert a whole-degree threshold to Celsius, truncating toward zero.
    fn threshold(self, degrees: i64) -> i64 {
        match self {
            Scale::Celsius => degrees,
            Scale::Fahrenheit => fahrenheit_to_celsius(degrees as f64).trunc() as i64,
        }
    }
}

/// Normalized temperature sensor, in Celsius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRecord {
    pub value: f64,
    pub status: i64,
    pub low_alarm: i64,
    pub low_warning: i64,
    pub high_warning: i64,
    pub high_alarm: i64,
}

impl TemperatureRecord {
    fn thresholds(&self) -> [i64; 4] {
        [self.low_alarm, self.low_warning, self.high_warning, self.high_alarm]
    }
}

/// Scale carried from row to row while folding one batch.
#[derive(Default)]
struct ParseState {
    scale: Scale,
    parsed: Catalog<TemperatureRecord>,
}

impl ParseState {
    fn push(mut self, row: RawRow) -> Result<Self> {
        let [scale, sensor_id, name, value, status, low_alarm, low_warning, high_warning, high_alarm] =
            split_row(Temperature::NAME, row)?;

        if !scale.is_empty() {
            let next = Scale::from_flag(&scale);
            if next != self.scale {
                tracing::debug!(?next, "temperature scale changed");
            }
            self.scale = next;
        }

        if value.is_empty() {
            return Ok(self);
        }

        let raw = parse_int(Temperature::NAME, "value", &value)?;
        if raw == self.scale.absent_sentinel() {
            tracing::debug!(sensor_id = %sensor_id, "skipping absent temperature sensor");
            return Ok(self);
        }

        let scale = self.scale;
        let threshold = |field: &'static str, text: &str| -> Result<i64> {
            Ok(scale.threshold(parse_int(Temperature::NAME, field, text)?))
        };
        let record = TemperatureRecord {
            value: scale.reading(raw),
            status: parse_int(Temperature::NAME, "status", &status)?,
            low_alarm: threshold("low_alarm", &low_alarm)?,
            low_warning: threshold("low_warning", &low_warning)?,
            high_warning: threshold("high_warning", &high_warning)?,
            high_alarm: threshold("high_alarm", &high_alarm)?,
        };
        self.parsed
            .upsert(format!("Temperature {sensor_id} {name}"), record);

        Ok(self)
    }
}

/// Temperature section.
pub struct Temperature;

impl SensorSection for Temperature {
    type Record = TemperatureRecord;

    const NAME: &'static str = "sentry4_pdu_temp";
    const COLUMNS: usize = 9;

    fn parse<I>(rows: I) -> Result<Catalog<TemperatureRecord>>
    where
        I: IntoIterator<Item = RawRow>,
    {
        let state = rows
            .into_iter()
            .try_fold(ParseState::default(), ParseState::push)?;
        Ok(state.parsed)
    }

    fn check(
        item: &str,
        params: &CheckParams,
        section: &Catalog<TemperatureRecord>,
    ) -> Result<Vec<CheckOutput>> {
        let Some(record) = section.get(item) else {
            return Ok(Vec::new());
        };

        if record.status != 0 {
            tracing::trace!(item, status = record.status, "temperature sensor fault");
            return Ok(vec![
                CheckResult::new(State::Crit, "Temperature sensor error").into()
            ]);
        }

        let levels = Levels::resolve(params, record.thresholds());
        let unit = params.output_unit();
        let temp = record.value;
        let summary = format!("{} {}", format_float(unit.convert(temp)), unit.symbol());
        let (warn, crit) = levels.upper();

        let result = match levels.classify(temp) {
            Some(violation) => CheckResult::new(
                violation.state(),
                format!("{summary} {}", violation.describe()),
            ),
            None => CheckResult::new(State::Ok, summary),
        }
        .with_details(levels.details());

        tracing::trace!(item, state = %result.state, "temperature evaluated");
        Ok(vec![
            Metric::new("sentry4_temp", temp).with_levels(warn, crit).into(),
            result.into(),
        ])
    }
}
