//! Outlets (`st4Outlets`).
//!
//! Current arrives in hundredths of an amp and voltage in tenths of a volt.
//! Both are stored verbatim and only scaled when an outlet is checked.

use crate::catalog::Catalog;
use crate::error::{parse_int, Result};
use crate::params::CheckParams;
use crate::sensors::codes::{power_state, DeviceState, DeviceStatus};
use crate::sensors::data::{CheckOutput, CheckResult, Metric};
use crate::sensors::traits::{split_row, RawRow, SensorSection};
use serde::{Deserialize, Serialize};

/// Outlet as reported, fields kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutletRecord {
    pub outlet_id: String,
    pub outlet_name: String,
    pub state: String,
    pub status: String,
    /// Hundredths of an amp
    pub current: String,
    /// Tenths of a volt
    pub voltage: String,
    pub active_power: String,
    pub apparent_power: String,
}

/// Outlet section.
pub struct Outlet;

impl SensorSection for Outlet {
    type Record = OutletRecord;

    const NAME: &'static str = "sentry4_pdu_outlet";
    const COLUMNS: usize = 8;

    fn parse<I>(rows: I) -> Result<Catalog<OutletRecord>>
    where
        I: IntoIterator<Item = RawRow>,
    {
        let mut parsed = Catalog::new();

        for row in rows {
            let [outlet_id, outlet_name, state, status, current, voltage, active_power, apparent_power] =
                split_row(Self::NAME, row)?;

            let outlet = format!("Outlet {outlet_id} {outlet_name}");
            parsed.upsert(
                outlet,
                OutletRecord {
                    outlet_id,
                    outlet_name,
                    state,
                    status,
                    current,
                    voltage,
                    active_power,
                    apparent_power,
                },
            );
        }

        Ok(parsed)
    }

    fn check(
        item: &str,
        _params: &CheckParams,
        section: &Catalog<OutletRecord>,
    ) -> Result<Vec<CheckOutput>> {
        let Some(record) = section.get(item) else {
            return Ok(Vec::new());
        };

        let state_code = parse_int(Self::NAME, "state", &record.state)?;
        let status_code = parse_int(Self::NAME, "status", &record.status)?;
        let current = parse_int(Self::NAME, "current", &record.current)? as f64 / 100.0;
        let voltage = parse_int(Self::NAME, "voltage", &record.voltage)? as f64 / 10.0;
        let power = parse_int(Self::NAME, "active_power", &record.active_power)?;
        let appower = parse_int(Self::NAME, "apparent_power", &record.apparent_power)?;

        let status = DeviceStatus::from_code(status_code)?;
        let state = DeviceState::from_code(state_code)?;
        let summary = format!("Status: {status}({status_code}) State: {state}({state_code})");
        let result = CheckResult::new(power_state(status, state), summary);

        tracing::trace!(item, state = %result.state, "outlet evaluated");
        Ok(vec![
            Metric::new("current", current).into(),
            Metric::new("voltage", voltage).into(),
            Metric::new("power", power as f64).into(),
            Metric::new("appower", appower as f64).into(),
            result.into(),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::data::State;

    fn row(fields: [&str; 8]) -> RawRow {
        fields.iter().map(|f| f.to_string()).collect()
    }

    fn section(status: &str) -> Catalog<OutletRecord> {
        Outlet::parse(vec![
            row(["AA1", "Master_Outlet_1", "1", "0", "0", "2072", "0", "0"]),
            row(["AA2", "Master_Outlet_2", "1", "0", "0", "2068", "0", "0"]),
            row(["AA3", "Master_Outlet_3", "1", status, "27", "2073", "48", "55"]),
            row(["BA1", "Link1_Outlet_1", "1", "0", "0", "2064", "0", "0"]),
            row(["BA3", "Link1_Outlet_3", "1", "0", "28", "2058", "52", "58"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_parse_and_discover() {
        let parsed = section("0");
        let items: Vec<_> = Outlet::discover(&parsed).map(|s| s.item).collect();
        assert_eq!(
            items,
            vec![
                "Outlet AA1 Master_Outlet_1",
                "Outlet AA2 Master_Outlet_2",
                "Outlet AA3 Master_Outlet_3",
                "Outlet BA1 Link1_Outlet_1",
                "Outlet BA3 Link1_Outlet_3",
            ]
        );
        let outlet = parsed.get("Outlet AA3 Master_Outlet_3").unwrap();
        assert_eq!(outlet.current, "27");
        assert_eq!(outlet.voltage, "2073");
    }

    #[test]
    fn test_check_scales_current_and_voltage() {
        let outputs = Outlet::check(
            "Outlet AA3 Master_Outlet_3",
            &CheckParams::default(),
            &section("0"),
        )
        .unwrap();
        assert_eq!(
            outputs,
            vec![
                CheckOutput::from(Metric::new("current", 0.27)),
                CheckOutput::from(Metric::new("voltage", 207.3)),
                CheckOutput::from(Metric::new("power", 48.0)),
                CheckOutput::from(Metric::new("appower", 55.0)),
                CheckOutput::from(CheckResult::new(State::Ok, "Status: normal(0) State: on(1)")),
            ]
        );
    }

    #[test]
    fn test_check_idle_outlet() {
        let outputs = Outlet::check(
            "Outlet AA1 Master_Outlet_1",
            &CheckParams::default(),
            &section("0"),
        )
        .unwrap();
        assert_eq!(outputs[0], CheckOutput::from(Metric::new("current", 0.0)));
        assert_eq!(outputs[1], CheckOutput::from(Metric::new("voltage", 207.2)));
    }

    #[test]
    fn test_check_status_severity() {
        let cases = [
            ("22", State::Warn, "Status: profileError(22) State: on(1)"),
            ("20", State::Crit, "Status: overLimit(20) State: on(1)"),
        ];
        for (status, state, summary) in cases {
            let outputs = Outlet::check(
                "Outlet AA3 Master_Outlet_3",
                &CheckParams::default(),
                &section(status),
            )
            .unwrap();
            assert_eq!(outputs.len(), 5);
            assert_eq!(outputs[4], CheckOutput::from(CheckResult::new(state, summary)));
        }
    }

    #[test]
    fn test_check_unknown_item() {
        let outputs = Outlet::check("", &CheckParams::default(), &Catalog::new()).unwrap();
        assert!(outputs.is_empty());
    }
}
