use crate::SecondaryRecord;
use crate::config::SecondaryIndexConfig;
use crate::sort::sort_choices;
use log::{debug, info};
use std::collections::{HashMap, HashSet};

/// One (scale, GNIS cell id) pair grouped under a state and cell name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleEntry {
    /// Map scale as text
    pub map_scale: String,

    /// GNIS cell identifier; empty for force-inserted territories
    pub gnis_cell_id: String,
}

/// Two-level grouping of GNIS cell entries, keyed by primary state and
/// then cell name. Built once from the reference dataset and read-only
/// afterward; entry order within each cell is source order, which the
/// closest-scale tie-break depends on.
#[derive(Debug, Default)]
pub struct SecondaryCellIndex {
    states: HashMap<String, HashMap<String, Vec<ScaleEntry>>>,
    default_target_scale: i64,
}

impl SecondaryCellIndex {
    /// Build the index. Rows are filtered to the standard cell
    /// classification, exact-duplicate rows are dropped (first occurrence
    /// wins), and the configured territories are appended with empty cell
    /// and GNIS fields so they remain selectable states.
    pub fn build(
        rows: impl IntoIterator<Item = SecondaryRecord>,
        config: &SecondaryIndexConfig,
    ) -> Self {
        let mut index = SecondaryCellIndex {
            states: HashMap::new(),
            default_target_scale: config.default_target_scale,
        };

        let mut seen: HashSet<SecondaryRecord> = HashSet::new();
        let mut kept = 0usize;
        let mut skipped = 0usize;

        for row in rows {
            if !row.cell_type.starts_with(&config.standard_cell_type_prefix) {
                skipped += 1;
                continue;
            }
            if !seen.insert(row.clone()) {
                skipped += 1;
                continue;
            }
            index.insert(row.primary_state, row.cell_name, row.map_scale, row.gnis_cell_id);
            kept += 1;
        }

        for territory in &config.territories {
            debug!("Force-inserting territory {:?}", territory.primary_state);
            index.insert(
                territory.primary_state.clone(),
                String::new(),
                territory.map_scale.clone(),
                String::new(),
            );
        }

        info!(
            "Built secondary cell index: {kept} entries kept, {skipped} skipped, {} states",
            index.states.len()
        );

        index
    }

    fn insert(&mut self, state: String, cell: String, map_scale: String, gnis_cell_id: String) {
        self.states
            .entry(state)
            .or_default()
            .entry(cell)
            .or_default()
            .push(ScaleEntry {
                map_scale,
                gnis_cell_id,
            });
    }

    /// State choices for the exception-recording flow, multikey-sorted.
    pub fn state_choices(&self) -> Vec<String> {
        let mut choices: Vec<String> = self.states.keys().cloned().collect();
        sort_choices(&mut choices);
        choices
    }

    /// Cell-name choices for one state, multikey-sorted. `None` when the
    /// state is absent.
    pub fn cell_choices(&self, state: &str) -> Option<Vec<String>> {
        let cells = self.states.get(state)?;
        let mut choices: Vec<String> = cells.keys().cloned().collect();
        sort_choices(&mut choices);
        Some(choices)
    }

    /// Entries recorded for one (state, cell) pair, in source order.
    pub fn entries(&self, state: &str, cell: &str) -> Option<&[ScaleEntry]> {
        let entries = self.states.get(state)?.get(cell)?;
        Some(entries.as_slice())
    }

    /// GNIS cell id whose scale is numerically closest to `target_scale`.
    ///
    /// Returns `None` when the state or cell is absent. A target that does
    /// not parse as an integer falls back to the configured default scale.
    /// Entries whose own scale does not parse are skipped. Ties keep the
    /// first-encountered entry, so the result can depend on source row
    /// order.
    pub fn closest_gnis_id(&self, state: &str, cell: &str, target_scale: &str) -> Option<&str> {
        let entries = self.states.get(state)?.get(cell)?;

        let target = match target_scale.trim().parse::<i64>() {
            Ok(n) => n,
            Err(_) => {
                debug!(
                    "Target scale {target_scale:?} is not an integer, using default {}",
                    self.default_target_scale
                );
                self.default_target_scale
            }
        };

        let mut best: Option<(i64, &str)> = None;
        for entry in entries {
            let Ok(scale) = entry.map_scale.parse::<i64>() else {
                continue;
            };
            let diff = (scale - target).abs();
            match best {
                Some((best_diff, _)) if diff >= best_diff => {}
                _ => best = Some((diff, entry.gnis_cell_id.as_str())),
            }
        }

        best.map(|(_, gnis)| gnis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(gnis: &str, cell: &str, state: &str, cell_type: &str, scale: &str) -> SecondaryRecord {
        SecondaryRecord {
            gnis_cell_id: gnis.to_string(),
            cell_name: cell.to_string(),
            primary_state: state.to_string(),
            cell_type: cell_type.to_string(),
            map_scale: scale.to_string(),
        }
    }

    fn sample_rows() -> Vec<SecondaryRecord> {
        vec![
            row("G1", "Salem", "Oregon", "Standard", "24000"),
            row("G2", "Salem", "Oregon", "Standard", "62500"),
            row("G3", "Salem", "Oregon", "Standard", "100000"),
            row("G4", "Augusta", "Maine", "Standard", "24000"),
            row("G5", "Salem", "Oregon", "Oversize Cell", "24000"),
        ]
    }

    fn build(rows: Vec<SecondaryRecord>) -> SecondaryCellIndex {
        SecondaryCellIndex::build(rows, &SecondaryIndexConfig::default())
    }

    #[test]
    fn non_standard_rows_are_filtered_out() {
        let index = build(sample_rows());
        let entries = index.entries("Oregon", "Salem").unwrap();
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| e.gnis_cell_id != "G5"));
    }

    #[test]
    fn duplicate_rows_are_dropped() {
        let mut rows = sample_rows();
        rows.push(row("G1", "Salem", "Oregon", "Standard", "24000"));
        let index = build(rows);
        assert_eq!(index.entries("Oregon", "Salem").unwrap().len(), 3);
    }

    #[test]
    fn territories_appear_as_states() {
        let index = build(sample_rows());
        let states = index.state_choices();
        assert!(states.contains(&"American Samoa".to_string()));
        assert!(states.contains(&"Guam".to_string()));

        let entries = index.entries("Guam", "").unwrap();
        assert_eq!(entries, &[ScaleEntry {
            map_scale: "24000".to_string(),
            gnis_cell_id: String::new(),
        }]);
    }

    #[test]
    fn state_and_cell_choices_are_sorted() {
        let index = build(sample_rows());
        let cells = index.cell_choices("Oregon").unwrap();
        assert_eq!(cells, vec!["Salem"]);
        assert_eq!(index.cell_choices("Kansas"), None);
    }

    #[test]
    fn closest_scale_prefers_smallest_difference() {
        let index = build(sample_rows());
        // 62500 is 12500 away from 50000; 24000 is 26000 away.
        assert_eq!(index.closest_gnis_id("Oregon", "Salem", "50000"), Some("G2"));
        assert_eq!(index.closest_gnis_id("Oregon", "Salem", "24000"), Some("G1"));
    }

    #[test]
    fn unparseable_target_falls_back_to_default() {
        let index = build(sample_rows());
        // Default target is 24000, so the exact 24000 entry wins.
        assert_eq!(index.closest_gnis_id("Oregon", "Salem", ""), Some("G1"));
        assert_eq!(index.closest_gnis_id("Oregon", "Salem", "wide"), Some("G1"));
    }

    #[test]
    fn ties_keep_the_first_encountered_entry() {
        let rows = vec![
            row("G1", "Salem", "Oregon", "Standard", "20000"),
            row("G2", "Salem", "Oregon", "Standard", "30000"),
        ];
        let index = build(rows);
        // Both are 5000 away from 25000; first in source order wins.
        assert_eq!(index.closest_gnis_id("Oregon", "Salem", "25000"), Some("G1"));
    }

    #[test]
    fn absent_state_or_cell_yields_none() {
        let index = build(sample_rows());
        assert_eq!(index.closest_gnis_id("Kansas", "Salem", "24000"), None);
        assert_eq!(index.closest_gnis_id("Oregon", "Topeka", "24000"), None);
    }

    #[test]
    fn entries_with_unparseable_scales_are_skipped() {
        let rows = vec![
            row("G1", "Salem", "Oregon", "Standard", "not-a-scale"),
            row("G2", "Salem", "Oregon", "Standard", "62500"),
        ];
        let index = build(rows);
        assert_eq!(index.closest_gnis_id("Oregon", "Salem", "24000"), Some("G2"));
    }
}
