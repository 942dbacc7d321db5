//! Registration metadata and name-based dispatch over the sensor classes.
//!
//! A host that polls the PDU needs to know which SNMP columns to fetch for
//! each section, which check ruleset applies and how the temperature metric
//! is graphed. None of this is consulted during evaluation.

use crate::error::{PduError, Result};
use crate::params::CheckParams;
use crate::sensors::{
    CheckOutput, Humidity, InletCord, Outlet, RawRow, SensorSection, Service, Temperature,
    UnitStatus,
};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// OID whose presence identifies a Sentry4 PDU.
pub const DETECT_OID: &str = ".1.3.6.1.4.1.1718.4.1.1.1.1.0";

/// One fetched column: OID suffix below the table base and its MIB name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SnmpColumn {
    pub suffix: &'static str,
    pub mib_name: &'static str,
}

const fn column(suffix: &'static str, mib_name: &'static str) -> SnmpColumn {
    SnmpColumn { suffix, mib_name }
}

/// SNMP table a section is fetched from, columns in raw row order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SnmpTree {
    pub base: &'static str,
    pub columns: &'static [SnmpColumn],
}

impl SnmpTree {
    /// Fully-qualified OID of every column.
    pub fn column_oids(&self) -> impl Iterator<Item = String> + '_ {
        self.columns
            .iter()
            .map(move |column| format!("{}.{}", self.base, column.suffix))
    }
}

const HUMIDITY_TREE: SnmpTree = SnmpTree {
    base: ".1.3.6.1.4.1.1718.4.1.10",
    columns: &[
        column("2.1.2", "st4HumidSensorID"),
        column("2.1.3", "st4HumidSensorName"),
        column("3.1.1", "st4HumidSensorValue"),
        column("3.1.2", "st4HumidSensorStatus"),
        column("4.1.2", "st4HumidSensorLowAlarm"),
        column("4.1.3", "st4HumidSensorLowWarning"),
        column("4.1.4", "st4HumidSensorHighWarning"),
        column("4.1.5", "st4HumidSensorHighAlarm"),
    ],
};

const TEMPERATURE_TREE: SnmpTree = SnmpTree {
    base: ".1.3.6.1.4.1.1718.4.1.9",
    columns: &[
        column("1.10", "st4TempSensorScale"),
        column("2.1.2", "st4TempSensorID"),
        column("2.1.3", "st4TempSensorName"),
        column("3.1.1", "st4TempSensorValue"),
        column("3.1.2", "st4TempSensorStatus"),
        column("4.1.2", "st4TempSensorLowAlarm"),
        column("4.1.3", "st4TempSensorLowWarning"),
        column("4.1.4", "st4TempSensorHighWarning"),
        column("4.1.5", "st4TempSensorHighAlarm"),
    ],
};

const INLET_TREE: SnmpTree = SnmpTree {
    base: ".1.3.6.1.4.1.1718.4.1.3",
    columns: &[
        column("2.1.2", "st4InputCordID"),
        column("2.1.3", "st4InputCordName"),
        column("3.1.1", "st4InputCordState"),
        column("3.1.2", "st4InputCordStatus"),
        column("3.1.3", "st4InputCordActivePower"),
        column("3.1.5", "st4InputCordApparentPower"),
        column("3.1.7", "st4InputCordPowerUtilized"),
        column("3.1.8", "st4InputCordPowerFactor"),
    ],
};

const OUTLET_TREE: SnmpTree = SnmpTree {
    base: ".1.3.6.1.4.1.1718.4.1.8",
    columns: &[
        column("2.1.2", "st4OutletID"),
        column("2.1.3", "st4OutletName"),
        column("3.1.1", "st4OutletState"),
        column("3.1.2", "st4OutletStatus"),
        column("3.1.3", "st4OutletCurrent"),
        column("3.1.6", "st4OutletVoltage"),
        column("3.1.7", "st4OutletActivePower"),
        column("3.1.9", "st4OutletApparentPower"),
    ],
};

const STATUS_TREE: SnmpTree = SnmpTree {
    base: ".1.3.6.1.4.1.1718.4.1.2",
    columns: &[
        column("2.1.2", "st4UnitID"),
        column("2.1.3", "st4UnitName"),
        column("2.1.4", "st4UnitProductSN"),
        column("2.1.5", "st4UnitModel"),
        column("2.1.7", "st4UnitType"),
        column("3.1.1", "st4UnitStatus"),
    ],
};

/// Graphing hints for a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricInfo {
    pub name: &'static str,
    pub title: &'static str,
    pub unit: &'static str,
    pub color: &'static str,
}

/// A graph built from metrics and their threshold scalars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphInfo {
    pub name: &'static str,
    /// `(metric, drawing style)` pairs
    pub metrics: &'static [(&'static str, &'static str)],
    pub scalars: &'static [&'static str],
}

pub const TEMPERATURE_METRIC: MetricInfo = MetricInfo {
    name: "sentry4_temp",
    title: "Temperature",
    unit: "c",
    color: "16/a",
};

pub const TEMPERATURE_GRAPH: GraphInfo = GraphInfo {
    name: "sentry4_temp",
    metrics: &[("sentry4_temp", "area")],
    scalars: &["sentry4_temp:warn", "sentry4_temp:crit"],
};

/// Everything a host needs to register one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SectionInfo {
    pub name: &'static str,
    pub detect: &'static str,
    pub tree: SnmpTree,
    /// Check parameter ruleset, if the section takes parameters
    pub ruleset: Option<&'static str>,
}

/// The sensor classes, addressable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Humidity,
    Temperature,
    Inlet,
    Outlet,
    Status,
}

/// Result of evaluating one discovered item.
#[derive(Debug)]
pub struct ItemOutcome {
    pub item: String,
    pub outputs: Result<Vec<CheckOutput>>,
}

macro_rules! dispatch {
    ($kind:expr, $func:ident($($arg:expr),*)) => {
        match $kind {
            SectionKind::Humidity => $func::<Humidity>($($arg),*),
            SectionKind::Temperature => $func::<Temperature>($($arg),*),
            SectionKind::Inlet => $func::<InletCord>($($arg),*),
            SectionKind::Outlet => $func::<Outlet>($($arg),*),
            SectionKind::Status => $func::<UnitStatus>($($arg),*),
        }
    };
}

impl SectionKind {
    pub const ALL: [SectionKind; 5] = [
        SectionKind::Humidity,
        SectionKind::Temperature,
        SectionKind::Inlet,
        SectionKind::Outlet,
        SectionKind::Status,
    ];

    /// Section name as registered with the host.
    pub fn name(self) -> &'static str {
        dispatch!(self, section_name())
    }

    /// Width of a raw row.
    pub fn columns(self) -> usize {
        dispatch!(self, section_columns())
    }

    pub fn tree(self) -> SnmpTree {
        match self {
            SectionKind::Humidity => HUMIDITY_TREE,
            SectionKind::Temperature => TEMPERATURE_TREE,
            SectionKind::Inlet => INLET_TREE,
            SectionKind::Outlet => OUTLET_TREE,
            SectionKind::Status => STATUS_TREE,
        }
    }

    pub fn ruleset(self) -> Option<&'static str> {
        match self {
            SectionKind::Humidity => Some("humidity"),
            SectionKind::Temperature => Some("temperature"),
            SectionKind::Inlet | SectionKind::Outlet | SectionKind::Status => None,
        }
    }

    pub fn info(self) -> SectionInfo {
        SectionInfo {
            name: self.name(),
            detect: DETECT_OID,
            tree: self.tree(),
            ruleset: self.ruleset(),
        }
    }

    /// Parse a polling cycle's rows and list the items found.
    pub fn discover(self, rows: Vec<RawRow>) -> Result<Vec<Service>> {
        dispatch!(self, discover_rows(rows))
    }

    /// Parse a polling cycle's rows and evaluate a single item.
    pub fn check(self, rows: Vec<RawRow>, item: &str, params: &CheckParams) -> Result<Vec<CheckOutput>> {
        dispatch!(self, check_rows(rows, item, params))
    }

    /// Parse a polling cycle's rows and evaluate every discovered item.
    ///
    /// A failing item does not stop the others; its error is kept in the
    /// item's outcome.
    pub fn check_all(self, rows: Vec<RawRow>, params: &CheckParams) -> Result<Vec<ItemOutcome>> {
        dispatch!(self, check_all_rows(rows, params))
    }
}

fn section_name<S: SensorSection>() -> &'static str {
    S::NAME
}

fn section_columns<S: SensorSection>() -> usize {
    S::COLUMNS
}

fn discover_rows<S: SensorSection>(rows: Vec<RawRow>) -> Result<Vec<Service>> {
    let section = S::parse(rows)?;
    Ok(S::discover(&section).collect())
}

fn check_rows<S: SensorSection>(
    rows: Vec<RawRow>,
    item: &str,
    params: &CheckParams,
) -> Result<Vec<CheckOutput>> {
    let section = S::parse(rows)?;
    S::check(item, params, &section)
}

fn check_all_rows<S: SensorSection>(
    rows: Vec<RawRow>,
    params: &CheckParams,
) -> Result<Vec<ItemOutcome>> {
    let section = S::parse(rows)?;
    let outcomes = S::discover(&section)
        .map(|service| {
            let outputs = S::check(&service.item, params, &section);
            if let Err(e) = &outputs {
                tracing::warn!(section = S::NAME, item = %service.item, "check failed: {}", e);
            }
            ItemOutcome {
                item: service.item,
                outputs,
            }
        })
        .collect();
    Ok(outcomes)
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SectionKind {
    type Err = PduError;

    /// Accepts the registered section name or its short form.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "humidity" | "humid" | "sentry4_pdu_humid" => Ok(SectionKind::Humidity),
            "temperature" | "temp" | "sentry4_pdu_temp" => Ok(SectionKind::Temperature),
            "inlet" | "sentry4_pdu_inlet" => Ok(SectionKind::Inlet),
            "outlet" | "sentry4_pdu_outlet" => Ok(SectionKind::Outlet),
            "status" | "sentry4_pdu_status" => Ok(SectionKind::Status),
            other => Err(PduError::config_error(format!("unknown section '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::State;

    fn rows(raw: &[&[&str]]) -> Vec<RawRow> {
        raw.iter()
            .map(|row| row.iter().map(|f| f.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_tree_width_matches_row_width() {
        for kind in SectionKind::ALL {
            assert_eq!(kind.tree().columns.len(), kind.columns(), "{kind}");
        }
    }

    #[test]
    fn test_column_oids() {
        let oids: Vec<_> = SectionKind::Status.tree().column_oids().collect();
        assert_eq!(oids[0], ".1.3.6.1.4.1.1718.4.1.2.2.1.2");
        assert_eq!(oids[5], ".1.3.6.1.4.1.1718.4.1.2.3.1.1");

        let oids: Vec<_> = SectionKind::Temperature.tree().column_oids().collect();
        assert_eq!(oids[0], ".1.3.6.1.4.1.1718.4.1.9.1.10");
    }

    #[test]
    fn test_names_round_trip() {
        for kind in SectionKind::ALL {
            assert_eq!(kind.name().parse::<SectionKind>().unwrap(), kind);
        }
        assert_eq!("humidity".parse::<SectionKind>().unwrap(), SectionKind::Humidity);
        assert!("voltage".parse::<SectionKind>().is_err());
    }

    #[test]
    fn test_rulesets() {
        assert_eq!(SectionKind::Humidity.ruleset(), Some("humidity"));
        assert_eq!(SectionKind::Temperature.ruleset(), Some("temperature"));
        assert_eq!(SectionKind::Outlet.ruleset(), None);
        assert_eq!(SectionKind::Inlet.info().detect, DETECT_OID);
    }

    #[test]
    fn test_dispatch_discover_and_check() {
        let table = rows(&[
            &["1", "master", "A1", "S1", "0", "0"],
            &["2", "link", "A2", "S2", "1", "18"],
        ]);

        let services = SectionKind::Status.discover(table.clone()).unwrap();
        assert_eq!(services.len(), 2);
        assert_eq!(services[0].item, "Sentry PDU status: master");

        let outputs = SectionKind::Status
            .check(table, "Sentry PDU status: link", &CheckParams::default())
            .unwrap();
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].as_result().unwrap().state, State::Crit);
    }

    #[test]
    fn test_check_all_isolates_failures() {
        let table = rows(&[
            &["AA1", "one", "1", "0", "27", "2073", "48", "55"],
            &["AA2", "two", "1", "3", "27", "2073", "48", "55"],
            &["AA3", "three", "1", "0", "28", "2058", "52", "58"],
        ]);
        let outcomes = SectionKind::Outlet
            .check_all(table, &CheckParams::default())
            .unwrap();
        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].outputs.is_ok());
        assert!(matches!(
            outcomes[1].outputs,
            Err(PduError::UnmappedCode { code: 3, .. })
        ));
        assert!(outcomes[2].outputs.is_ok());
    }

    #[test]
    fn test_short_row_is_rejected() {
        let err = SectionKind::Inlet.discover(rows(&[&["AA", "cord"]])).unwrap_err();
        assert!(matches!(err, PduError::RowArity { expected: 8, found: 2, .. }));
    }

    #[test]
    fn test_graph_metadata() {
        assert_eq!(TEMPERATURE_METRIC.unit, "c");
        assert_eq!(TEMPERATURE_GRAPH.metrics, &[("sentry4_temp", "area")]);
        assert_eq!(TEMPERATURE_GRAPH.scalars.len(), 2);
    }
}
