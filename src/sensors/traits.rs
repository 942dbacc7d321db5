//! The contract every sensor class implements.

use crate::catalog::Catalog;
use crate::error::{PduError, Result};
use crate::params::CheckParams;
use crate::sensors::data::{CheckOutput, Service};

/// One raw SNMP table row, columns in the order of the section's tree.
pub type RawRow = Vec<String>;

/// A sensor class: how its rows normalize, which items it exposes and how
/// an item is evaluated.
///
/// Implementations hold no state; each call is a pure function of its
/// arguments.
pub trait SensorSection {
    /// Normalized record type stored in the catalog.
    type Record;

    /// Section name as registered with the host.
    const NAME: &'static str;

    /// Number of columns in a raw row.
    const COLUMNS: usize;

    /// Normalize one polling cycle's rows into a catalog.
    fn parse<I>(rows: I) -> Result<Catalog<Self::Record>>
    where
        I: IntoIterator<Item = RawRow>;

    /// Enumerate the items of a catalog in insertion order.
    fn discover(section: &Catalog<Self::Record>) -> impl Iterator<Item = Service> + '_ {
        section.discover()
    }

    /// Evaluate one item.
    ///
    /// An item missing from the catalog yields an empty sequence.
    fn check(
        item: &str,
        params: &CheckParams,
        section: &Catalog<Self::Record>,
    ) -> Result<Vec<CheckOutput>>;
}

/// Move the columns out of a row, checking its width.
pub(crate) fn split_row<const N: usize>(section: &'static str, row: RawRow) -> Result<[String; N]> {
    row.try_into()
        .map_err(|row: RawRow| PduError::row_arity(section, N, row.len()))
}
