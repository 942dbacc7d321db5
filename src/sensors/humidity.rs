//! Relative humidity sensors (`st4HumiditySensors`).

use crate::catalog::Catalog;
use crate::error::{parse_int, Result};
use crate::params::CheckParams;
use crate::sensors::data::{CheckOutput, CheckResult, Metric, State};
use crate::sensors::levels::Levels;
use crate::sensors::traits::{split_row, RawRow, SensorSection};
use serde::{Deserialize, Serialize};

/// Raw value reported when no sensor is attached.
pub const HUMIDITY_ABSENT: i64 = -1;

/// Normalized humidity sensor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HumidityRecord {
    /// Relative humidity in percent
    pub value: i64,
    pub status: i64,
    pub low_alarm: i64,
    pub low_warning: i64,
    pub high_warning: i64,
    pub high_alarm: i64,
}

impl HumidityRecord {
    fn thresholds(&self) -> [i64; 4] {
        [self.low_alarm, self.low_warning, self.high_warning, self.high_alarm]
    }
}

/// Humidity section.
pub struct Humidity;

impl SensorSection for Humidity {
    type Record = HumidityRecord;

    const NAME: &'static str = "sentry4_pdu_humid";
    const COLUMNS: usize = 8;

    fn parse<I>(rows: I) -> Result<Catalog<HumidityRecord>>
    where
        I: IntoIterator<Item = RawRow>,
    {
        let mut parsed = Catalog::new();

        for row in rows {
            let [sensor_id, name, value, status, low_alarm, low_warning, high_warning, high_alarm] =
                split_row(Self::NAME, row)?;

            let value = parse_int(Self::NAME, "value", &value)?;
            if value == HUMIDITY_ABSENT {
                tracing::debug!(sensor_id = %sensor_id, "skipping absent humidity sensor");
                continue;
            }

            let record = HumidityRecord {
                value,
                status: parse_int(Self::NAME, "status", &status)?,
                low_alarm: parse_int(Self::NAME, "low_alarm", &low_alarm)?,
                low_warning: parse_int(Self::NAME, "low_warning", &low_warning)?,
                high_warning: parse_int(Self::NAME, "high_warning", &high_warning)?,
                high_alarm: parse_int(Self::NAME, "high_alarm", &high_alarm)?,
            };
            parsed.upsert(format!("Humidity {sensor_id} {name}"), record);
        }

        Ok(parsed)
    }

    fn check(
        item: &str,
        params: &CheckParams,
        section: &Catalog<HumidityRecord>,
    ) -> Result<Vec<CheckOutput>> {
        let Some(record) = section.get(item) else {
            return Ok(Vec::new());
        };

        if record.status != 0 {
            tracing::trace!(item, status = record.status, "humidity sensor fault");
            return Ok(vec![
                CheckResult::new(State::Crit, "Humidity sensor error").into()
            ]);
        }

        let levels = Levels::resolve(params, record.thresholds());
        let details = levels.details();
        let summary = format!("{}%", record.value);
        let (warn, crit) = levels.upper();

        let result = match levels.classify(record.value as f64) {
            Some(violation) => CheckResult::new(
                violation.state(),
                format!("{summary} {}", violation.describe()),
            ),
            None => CheckResult::new(State::Ok, summary),
        }
        .with_details(details);

        tracing::trace!(item, state = %result.state, "humidity evaluated");
        Ok(vec![
            Metric::new("humidity", record.value as f64)
                .with_levels(warn, crit)
                .into(),
            result.into(),
        ])
    }
}
