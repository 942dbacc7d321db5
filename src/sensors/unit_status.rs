//! PDU unit status (`st4Units`).

use crate::catalog::Catalog;
use crate::error::{parse_int, Result};
use crate::params::CheckParams;
use crate::sensors::codes::{DeviceStatus, UnitType};
use crate::sensors::data::{CheckOutput, CheckResult};
use crate::sensors::traits::{split_row, RawRow, SensorSection};
use serde::{Deserialize, Serialize};

/// PDU unit as reported, fields kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRecord {
    pub unit: String,
    pub name: String,
    pub serial_number: String,
    pub model: String,
    pub unit_type: String,
    pub status: String,
}

#[derive(Clone, Copy)]
enum Field {
    Plain(&'static str),
    Type,
    Status,
}

impl UnitRecord {
    /// Fields in summary order.
    fn fields(&self) -> [(Field, &str); 6] {
        [
            (Field::Plain("Unit"), self.unit.as_str()),
            (Field::Plain("Name"), self.name.as_str()),
            (Field::Plain("SN"), self.serial_number.as_str()),
            (Field::Plain("Model"), self.model.as_str()),
            (Field::Type, self.unit_type.as_str()),
            (Field::Status, self.status.as_str()),
        ]
    }
}

/// Build the unit summary.
///
/// Plain fields are appended with a trailing separator, the type is
/// appended without one and the status is prepended. Empty fields are
/// skipped.
fn summarize(record: &UnitRecord, status: DeviceStatus, unit_type: UnitType) -> String {
    let mut summary = String::new();

    for (field, value) in record.fields() {
        if value.is_empty() {
            continue;
        }
        match field {
            Field::Status => summary = format!("Status: {status}({value}), {summary}"),
            Field::Type => summary.push_str(&format!("Type: {unit_type}({value})")),
            Field::Plain(key) => summary.push_str(&format!("{key}: {value}, ")),
        }
    }

    summary
}

/// Unit status section.
pub struct UnitStatus;

impl SensorSection for UnitStatus {
    type Record = UnitRecord;

    const NAME: &'static str = "sentry4_pdu_status";
    const COLUMNS: usize = 6;

    fn parse<I>(rows: I) -> Result<Catalog<UnitRecord>>
    where
        I: IntoIterator<Item = RawRow>,
    {
        let mut parsed = Catalog::new();

        for row in rows {
            let [unit, name, serial_number, model, unit_type, status] = split_row(Self::NAME, row)?;

            parsed.upsert(
                format!("Sentry PDU status: {name}"),
                UnitRecord {
                    unit,
                    name,
                    serial_number,
                    model,
                    unit_type,
                    status,
                },
            );
        }

        Ok(parsed)
    }

    fn check(
        item: &str,
        _params: &CheckParams,
        section: &Catalog<UnitRecord>,
    ) -> Result<Vec<CheckOutput>> {
        let Some(record) = section.get(item) else {
            return Ok(Vec::new());
        };

        let status = DeviceStatus::from_code(parse_int(Self::NAME, "status", &record.status)?)?;
        let unit_type = UnitType::from_code(parse_int(Self::NAME, "type", &record.unit_type)?)?;

        let result = CheckResult::new(status.severity(), summarize(record, status, unit_type));
        tracing::trace!(item, state = %result.state, "unit status evaluated");
        Ok(vec![result.into()])
    }
}
