//! # Sentry PDU - Telemetry Evaluation for Sentry4 Power Distribution Units
//!
//! Turns raw SNMP table rows polled from a Sentry4 PDU into monitoring
//! results. Five sensor classes are covered: humidity probes, temperature
//! probes, input cords, outlets and the unit itself.
//!
//! ## Features
//!
//! - **Normalization**: raw rows become an insertion-ordered catalog keyed by a
//!   human-readable identity, with absent-sensor sentinels dropped
//! - **Discovery**: one service per catalog record
//! - **Evaluation**: metrics plus a single OK/WARN/CRIT result per item,
//!   against device-reported or overridden thresholds
//! - **Registration metadata**: SNMP trees, rulesets and graph hints for hosts
//!
//! ## Quick Start
//!
//! ```rust
//! use sentry_pdu::{CheckParams, Humidity, SensorSection};
//!
//! # fn main() -> sentry_pdu::Result<()> {
//! let row = ["1", "Probe", "71", "0", "5", "10", "90", "95"]
//!     .map(String::from)
//!     .to_vec();
//! let section = Humidity::parse(vec![row])?;
//!
//! for service in Humidity::discover(&section) {
//!     let outputs = Humidity::check(&service.item, &CheckParams::default(), &section)?;
//!     println!("{}: {:?}", service.item, outputs);
//! }
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod error;
pub mod params;
pub mod plugin;
pub mod sensors;

// Re-export public API
pub use catalog::Catalog;
pub use error::{PduError, Result};
pub use params::{CheckParams, OutputUnit};
pub use plugin::{SectionKind, DETECT_OID};
pub use sensors::{
    CheckOutput, CheckResult, Humidity, InletCord, Metric, Outlet, RawRow, SensorSection,
    Service, State, Temperature, UnitStatus,
};

/// The default re-evaluation interval of the `watch` command in milliseconds
pub const DEFAULT_INTERVAL_MS: u64 = 60_000;
