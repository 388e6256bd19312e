//! # Topo Reference Index
//!
//! Lookup structures over the flat reference dataset of every topographic
//! map ever produced. The ingest collaborator parses the tabular source and
//! hands the rows to the builders here; the structures are built once per
//! session and are read-only afterward, so they can be shared freely (for
//! example behind an `Arc`) by the selection layer.
//!
//! Two indexes are produced:
//!
//! - [`CascadeIndex`]: a five-level tree keyed by map scale, primary state,
//!   cell name, map year, and print year, whose leaves are the scan-id /
//!   product-url pairs of every matching map. This drives the cascading
//!   drop-down filter.
//! - [`SecondaryCellIndex`]: a state → cell name grouping of
//!   (scale, GNIS cell id) pairs, used to attach a GNIS cell id to maps
//!   recorded outside the reference dataset via closest-scale matching.
//!
//! ## Example
//!
//! ```
//! use topo_reference_index::{CascadeIndex, ReferenceRecord};
//!
//! let rows = vec![ReferenceRecord {
//!     scan_id: "100".into(),
//!     cell_name: "Sparta".into(),
//!     primary_state: "Oregon".into(),
//!     map_scale: "24000".into(),
//!     map_year: "1988".into(),
//!     print_year: "1999".into(),
//!     product_url: "https://example.com/100.pdf".into(),
//! }];
//!
//! let index = CascadeIndex::build(rows);
//! assert_eq!(index.scale_choices(), vec!["24000".to_string()]);
//! ```

mod config;
mod index;
mod secondary;
mod sort;

pub use config::{SecondaryIndexConfig, Territory};
pub use index::{CascadeIndex, MapProduct};
pub use secondary::{ScaleEntry, SecondaryCellIndex};
pub use sort::{SortKey, compare_values, sort_choices};

use serde::{Deserialize, Serialize};

/// Sentinel for a missing map year or print year. Dropdown choice lists
/// show this instead of a blank option, and the multikey comparator sorts
/// it as zero.
pub const NONE_SENTINEL: &str = "(none)";

/// One row of the primary reference dataset. Field names match the source
/// columns so the ingest collaborator can deserialize rows directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRecord {
    /// Unique scan identifier
    pub scan_id: String,

    /// Cell (quad) name
    pub cell_name: String,

    /// Primary state the cell falls in
    pub primary_state: String,

    /// Map scale, kept as text (compared numerically only when sorting)
    pub map_scale: String,

    /// Year on the map, or empty / `"(none)"` when missing
    #[serde(rename = "date_on_map")]
    pub map_year: String,

    /// Print year, or empty / `"(none)"` when missing
    pub print_year: String,

    /// URL of the scanned map product
    pub product_url: String,
}

/// One row of the GNIS cell dataset used by the secondary index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SecondaryRecord {
    /// GNIS cell identifier (not unique across scales)
    pub gnis_cell_id: String,

    /// Cell (quad) name
    pub cell_name: String,

    /// Primary state the cell falls in
    pub primary_state: String,

    /// Cell classification, e.g. `"Standard"` or an oversize variant
    pub cell_type: String,

    /// Map scale as text
    pub map_scale: String,
}

/// Canonical form of a year value: empty input becomes the `"(none)"`
/// sentinel, everything else passes through untouched.
pub fn normalize_year(value: &str) -> String {
    if value.trim().is_empty() {
        NONE_SENTINEL.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn normalize_year_fills_in_sentinel() {
        assert_eq!(normalize_year(""), "(none)");
        assert_eq!(normalize_year("   "), "(none)");
        assert_eq!(normalize_year("1988"), "1988");
        assert_eq!(normalize_year("(none)"), "(none)");
    }
}
