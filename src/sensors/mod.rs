//! Sensor classes of a Sentry4 PDU and the data they produce.
//!
//! Each class is a zero-sized type implementing [`SensorSection`]: raw SNMP
//! rows go in through `parse`, items come out of `discover` and are
//! evaluated by `check`.

pub mod codes;
pub mod data;
pub mod humidity;
pub mod inlet;
pub mod levels;
pub mod outlet;
pub mod temperature;
pub mod traits;
pub mod unit_status;

// Re-export commonly used items
pub use data::{CheckOutput, CheckResult, Metric, Service, State};
pub use humidity::Humidity;
pub use inlet::InletCord;
pub use outlet::Outlet;
pub use temperature::Temperature;
pub use traits::{RawRow, SensorSection};
pub use unit_status::UnitStatus;
