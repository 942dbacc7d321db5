//! Input cords (`st4InputCords`).

use crate::catalog::Catalog;
use crate::error::{parse_int, Result};
use crate::params::CheckParams;
use crate::sensors::codes::{power_state, DeviceState, DeviceStatus};
use crate::sensors::data::{CheckOutput, CheckResult, Metric};
use crate::sensors::traits::{split_row, RawRow, SensorSection};
use serde::{Deserialize, Serialize};

/// Input cord as reported, fields kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InletRecord {
    pub cord_id: String,
    pub cord_name: String,
    pub state: String,
    pub status: String,
    /// Watts
    pub active_power: String,
    /// Volt-amperes
    pub apparent_power: String,
    /// Percent of cord capacity
    pub power_utilized: String,
    pub power_factor: String,
}

/// Input cord section.
pub struct InletCord;

impl SensorSection for InletCord {
    type Record = InletRecord;

    const NAME: &'static str = "sentry4_pdu_inlet";
    const COLUMNS: usize = 8;

    fn parse<I>(rows: I) -> Result<Catalog<InletRecord>>
    where
        I: IntoIterator<Item = RawRow>,
    {
        let mut parsed = Catalog::new();

        for row in rows {
            let [cord_id, cord_name, state, status, active_power, apparent_power, power_utilized, power_factor] =
                split_row(Self::NAME, row)?;

            let cord = format!("Input cord {cord_id} {cord_name}");
            parsed.upsert(
                cord,
                InletRecord {
                    cord_id,
                    cord_name,
                    state,
                    status,
                    active_power,
                    apparent_power,
                    power_utilized,
                    power_factor,
                },
            );
        }

        Ok(parsed)
    }

    fn check(
        item: &str,
        _params: &CheckParams,
        section: &Catalog<InletRecord>,
    ) -> Result<Vec<CheckOutput>> {
        let Some(record) = section.get(item) else {
            return Ok(Vec::new());
        };

        let state_code = parse_int(Self::NAME, "state", &record.state)?;
        let status_code = parse_int(Self::NAME, "status", &record.status)?;
        let power = parse_int(Self::NAME, "active_power", &record.active_power)?;
        let appower = parse_int(Self::NAME, "apparent_power", &record.apparent_power)?;
        let utilized = parse_int(Self::NAME, "power_utilized", &record.power_utilized)?;

        let status = DeviceStatus::from_code(status_code)?;
        let state = DeviceState::from_code(state_code)?;
        let summary = format!("Status: {status}({status_code}) State: {state}({state_code})");
        let result = CheckResult::new(power_state(status, state), summary);

        tracing::trace!(item, state = %result.state, "input cord evaluated");
        Ok(vec![
            Metric::new("power", power as f64).into(),
            Metric::new("appower", appower as f64).into(),
            Metric::new("power_usage_percentage", utilized as f64).into(),
            result.into(),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PduError;
    use crate::sensors::data::State;

    fn row(fields: [&str; 8]) -> RawRow {
        fields.iter().map(|f| f.to_string()).collect()
    }

    fn section(state: &str, status: &str) -> Catalog<InletRecord> {
        InletCord::parse(vec![
            row(["AA", "Master_UPS_A", state, status, "878", "952", "44", "92"]),
            row(["BA", "Slave_UPS_B", "1", "0", "923", "996", "46", "93"]),
        ])
        .unwrap()
    }

    const ITEM: &str = "Input cord AA Master_UPS_A";

    fn metrics() -> Vec<CheckOutput> {
        vec![
            CheckOutput::from(Metric::new("power", 878.0)),
            CheckOutput::from(Metric::new("appower", 952.0)),
            CheckOutput::from(Metric::new("power_usage_percentage", 44.0)),
        ]
    }

    #[test]
    fn test_parse_keeps_raw_fields() {
        let parsed = section("1", "0");
        let items: Vec<_> = InletCord::discover(&parsed).map(|s| s.item).collect();
        assert_eq!(items, vec![ITEM, "Input cord BA Slave_UPS_B"]);

        let cord = parsed.get("Input cord BA Slave_UPS_B").unwrap();
        assert_eq!(cord.cord_id, "BA");
        assert_eq!(cord.active_power, "923");
        assert_eq!(cord.power_factor, "93");
    }

    #[test]
    fn test_parse_repeated_cord_overwrites() {
        let parsed = InletCord::parse(vec![
            row(["AA", "Master_UPS_A", "1", "0", "878", "952", "44", "92"]),
            row(["BA", "Slave_UPS_B", "1", "0", "923", "996", "46", "93"]),
            row(["AA", "Master_UPS_A", "1", "18", "900", "960", "45", "91"]),
        ])
        .unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.keys().next(), Some(ITEM));
        assert_eq!(parsed.get(ITEM).unwrap().status, "18");
        assert_eq!(parsed.get(ITEM).unwrap().active_power, "900");
    }

    #[test]
    fn test_check_unknown_item() {
        let outputs = InletCord::check("foo", &CheckParams::default(), &section("1", "0")).unwrap();
        assert!(outputs.is_empty());
    }

    #[test]
    fn test_check_states() {
        let cases = [
            ("1", "0", State::Ok, "Status: normal(0) State: on(1)"),
            ("1", "18", State::Crit, "Status: alarm(18) State: on(1)"),
            ("1", "12", State::Crit, "Status: breakerTripped(12) State: on(1)"),
            ("0", "0", State::Warn, "Status: normal(0) State: unknown(0)"),
        ];
        for (state, status, expected, summary) in cases {
            let outputs =
                InletCord::check(ITEM, &CheckParams::default(), &section(state, status)).unwrap();
            let mut expected_outputs = metrics();
            expected_outputs.push(CheckOutput::from(CheckResult::new(expected, summary)));
            assert_eq!(outputs, expected_outputs);
        }
    }

    #[test]
    fn test_check_unmapped_status() {
        let err = InletCord::check(ITEM, &CheckParams::default(), &section("1", "3")).unwrap_err();
        assert!(matches!(err, PduError::UnmappedCode { code: 3, .. }));
    }

    #[test]
    fn test_check_malformed_power() {
        let mut catalog = section("1", "0");
        let mut cord = catalog.get(ITEM).unwrap().clone();
        cord.active_power = String::new();
        catalog.upsert(ITEM.to_string(), cord);
        let err = InletCord::check(ITEM, &CheckParams::default(), &catalog).unwrap_err();
        assert!(matches!(
            err,
            PduError::MalformedField {
                field: "active_power",
                ..
            }
        ));
    }
}
