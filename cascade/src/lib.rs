//! # Topo Cascade
//!
//! The cascading-selection state machine behind the map inventory tool's
//! drop-down chain: map scale → primary state → cell name → map year →
//! print year. Each selection narrows the reference dataset through a
//! pre-built [`CascadeIndex`](topo_reference_index::CascadeIndex), resets
//! every later stage, and auto-advances through stages left with a single
//! valid choice, until the terminal stage resolves to the backing records.
//!
//! The selector is presentation-agnostic: it holds no rendering handles
//! and exposes pure state queries plus a stage-change callback, so a GUI
//! adapter (or a test) drives it the same way.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use topo_cascade::{CascadeSelector, StageKind};
//! use topo_reference_index::{CascadeIndex, ReferenceRecord};
//!
//! # fn main() -> Result<(), topo_cascade::SelectorError> {
//! let rows = vec![ReferenceRecord {
//!     scan_id: "100".into(),
//!     cell_name: "Sparta".into(),
//!     primary_state: "Oregon".into(),
//!     map_scale: "24000".into(),
//!     map_year: "1988".into(),
//!     print_year: "1999".into(),
//!     product_url: "https://example.com/100.pdf".into(),
//! }];
//! let index = Arc::new(CascadeIndex::build(rows));
//!
//! let mut selector = CascadeSelector::new(index);
//! let outcome = selector.select(StageKind::Scale, "24000")?;
//! assert!(outcome.terminal_resolved); // sole row: the cascade locks in
//!
//! let records = selector.resolve_terminal_records()?;
//! assert_eq!(records[0].scan_id, "100");
//! # Ok(())
//! # }
//! ```

mod error;
mod selector;
mod stage;

pub use error::{Result, SelectorError};
pub use selector::{
    CascadeSelector, SelectOutcome, StageCallback, StageChange, StepDirection,
};
pub use stage::{StageKind, StageState};
