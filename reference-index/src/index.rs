use crate::sort::sort_choices;
use crate::{ReferenceRecord, normalize_year};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Leaf payload of the cascade index: one scanned map product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapProduct {
    /// Unique scan identifier
    pub scan_id: String,

    /// URL of the scanned map product
    pub product_url: String,
}

/// Five-level lookup tree over the reference dataset, keyed in order by
/// map scale, primary state, cell name, map year, and print year.
///
/// Each level is an explicit named type rather than an anonymous nested
/// map, so a lookup can only ever walk the levels in the fixed order. Keys
/// are canonical strings; a key present at one level always leads to a
/// non-empty sub-map (or non-empty leaf list) at the next, because levels
/// are only ever created on the way to appending a leaf entry.
///
/// Duplicate rows are not collapsed: two scans of the same edition produce
/// a two-entry leaf, which the selection layer surfaces as a
/// multiple-match outcome for a human to resolve.
#[derive(Debug, Default)]
pub struct CascadeIndex {
    scales: HashMap<String, StateLevel>,
    row_count: usize,
}

#[derive(Debug, Default)]
struct StateLevel {
    states: HashMap<String, CellLevel>,
}

#[derive(Debug, Default)]
struct CellLevel {
    cells: HashMap<String, MapYearLevel>,
}

#[derive(Debug, Default)]
struct MapYearLevel {
    map_years: HashMap<String, PrintYearLevel>,
}

#[derive(Debug, Default)]
struct PrintYearLevel {
    print_years: HashMap<String, Vec<MapProduct>>,
}

impl CascadeIndex {
    /// Build the index from the reference rows. Every row is kept; rows
    /// with empty year fields are normalized to the `"(none)"` sentinel.
    /// The resulting key sets do not depend on row order, only the order
    /// inside each leaf list does.
    pub fn build(rows: impl IntoIterator<Item = ReferenceRecord>) -> Self {
        let mut index = CascadeIndex::default();

        for row in rows {
            let map_year = normalize_year(&row.map_year);
            let print_year = normalize_year(&row.print_year);

            index
                .scales
                .entry(row.map_scale)
                .or_default()
                .states
                .entry(row.primary_state)
                .or_default()
                .cells
                .entry(row.cell_name)
                .or_default()
                .map_years
                .entry(map_year)
                .or_default()
                .print_years
                .entry(print_year)
                .or_default()
                .push(MapProduct {
                    scan_id: row.scan_id,
                    product_url: row.product_url,
                });
            index.row_count += 1;
        }

        info!(
            "Built cascade index: {} rows, {} scales",
            index.row_count,
            index.scales.len()
        );

        index
    }

    /// Number of rows the index was built from.
    pub fn len(&self) -> usize {
        self.row_count
    }

    /// True when the index was built from no rows at all.
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Valid choices for the first (map scale) stage, multikey-sorted.
    pub fn scale_choices(&self) -> Vec<String> {
        let mut choices: Vec<String> = self.scales.keys().cloned().collect();
        sort_choices(&mut choices);
        choices
    }

    /// Valid choices for the stage below a partial path of selected
    /// values, multikey-sorted. An empty path yields the scale choices; a
    /// path of four values yields the print-year choices. Returns `None`
    /// when any path segment is absent or the path is already terminal.
    pub fn choices_below(&self, path: &[&str]) -> Option<Vec<String>> {
        let mut choices: Vec<String> = match *path {
            [] => self.scales.keys().cloned().collect(),
            [scale] => self.scales.get(scale)?.states.keys().cloned().collect(),
            [scale, state] => self
                .scales
                .get(scale)?
                .states
                .get(state)?
                .cells
                .keys()
                .cloned()
                .collect(),
            [scale, state, cell] => self
                .scales
                .get(scale)?
                .states
                .get(state)?
                .cells
                .get(cell)?
                .map_years
                .keys()
                .cloned()
                .collect(),
            [scale, state, cell, map_year] => self
                .scales
                .get(scale)?
                .states
                .get(state)?
                .cells
                .get(cell)?
                .map_years
                .get(map_year)?
                .print_years
                .keys()
                .cloned()
                .collect(),
            _ => {
                debug!("choices_below called with terminal path of {} values", path.len());
                return None;
            }
        };
        sort_choices(&mut choices);
        Some(choices)
    }

    /// Leaf entries for a fully selected path, or `None` when any segment
    /// is absent. A returned slice is never empty.
    pub fn products(&self, path: &[&str; 5]) -> Option<&[MapProduct]> {
        let [scale, state, cell, map_year, print_year] = *path;
        let entries = self
            .scales
            .get(scale)?
            .states
            .get(state)?
            .cells
            .get(cell)?
            .map_years
            .get(map_year)?
            .print_years
            .get(print_year)?;
        Some(entries.as_slice())
    }
}
