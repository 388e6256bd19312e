use crate::error::{Result, SelectorError};
use crate::stage::{Stage, StageKind, StageState};
use log::debug;
use std::sync::Arc;
use topo_reference_index::{CascadeIndex, MapProduct};

/// Callback for stage-change notifications. Invoked once per stage whose
/// state changed during a transition, after the transition has fully
/// applied, so a subscriber never observes a half-cascaded chain.
pub type StageCallback = Arc<dyn Fn(&StageChange) + Send + Sync>;

/// Snapshot of one stage handed to the stage callback.
#[derive(Debug, Clone)]
pub struct StageChange {
    pub stage: StageKind,
    pub state: StageState,
    pub value: Option<String>,
}

/// Direction for stepping through a stage's choice list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Previous,
    Next,
}

/// Result of a selector transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectOutcome {
    /// Stages whose state changed, in cascade order of effect
    pub changed: Vec<StageKind>,

    /// True when the terminal stage holds a value after the transition
    pub terminal_resolved: bool,
}

impl SelectOutcome {
    fn no_op(terminal_resolved: bool) -> Self {
        Self {
            changed: Vec::new(),
            terminal_resolved,
        }
    }

    /// True when the transition left every stage untouched.
    pub fn is_no_op(&self) -> bool {
        self.changed.is_empty()
    }
}

/// The cascading-selection state machine.
///
/// Five ordered stages narrow the reference dataset one key at a time.
/// Selecting a value at one stage recomputes the valid choices of the next
/// stage from the index, resets every later stage, and auto-advances
/// through stages that are left with a single valid choice. Once the
/// terminal stage holds a value, [`CascadeSelector::resolve_terminal_records`]
/// yields the backing records for the full path.
///
/// The selector holds no rendering handles; the presentation layer reads
/// stage state through the query methods or subscribes with a
/// [`StageCallback`].
pub struct CascadeSelector {
    index: Arc<CascadeIndex>,
    stages: [Stage; StageKind::COUNT],
    callback: Option<StageCallback>,
}

impl CascadeSelector {
    /// Wire a selector to a built index: the scale stage starts enabled
    /// with the root choices, every later stage starts disabled.
    pub fn new(index: Arc<CascadeIndex>) -> Self {
        let mut stages = StageKind::ALL.map(Stage::new);
        stages[StageKind::Scale.index()].choices = index.scale_choices();
        stages[StageKind::Scale.index()].state = StageState::Awaiting;

        debug!(
            "Selector wired to index: {} scale choices",
            stages[StageKind::Scale.index()].choices.len()
        );

        Self {
            index,
            stages,
            callback: None,
        }
    }

    /// Subscribe to (or clear) stage-change notifications.
    pub fn set_callback(&mut self, callback: Option<StageCallback>) {
        self.callback = callback;
    }

    /// Select a value at a stage.
    ///
    /// Rejects selections on a disabled stage and values outside the
    /// stage's current choices, leaving all state untouched. Re-selecting
    /// the value a stage already holds is a no-op: descendants keep their
    /// selections. Otherwise the selection cascades as described on
    /// [`CascadeSelector`].
    pub fn select(&mut self, stage: StageKind, value: &str) -> Result<SelectOutcome> {
        let current = &self.stages[stage.index()];
        if current.state == StageState::Disabled {
            return Err(SelectorError::StageDisabled { stage });
        }
        if current.state.has_value() && current.current_value() == Some(value) {
            debug!("Stage {stage} already holds {value:?}, nothing to do");
            return Ok(SelectOutcome::no_op(self.is_terminal_resolved()));
        }
        let Some(position) = current.choices.iter().position(|choice| choice == value) else {
            return Err(SelectorError::ChoiceNotAvailable {
                stage,
                value: value.to_string(),
            });
        };

        let mut changed = Vec::new();
        self.set_value(stage, position, StageState::Selected, &mut changed);
        let terminal_resolved = self.cascade_from(stage, &mut changed);
        self.notify(&changed);

        Ok(SelectOutcome {
            changed,
            terminal_resolved,
        })
    }

    /// Step a stage to the adjacent valid choice. A no-op (never an
    /// error) when the stage holds no value, is disabled, or is already at
    /// the boundary in the requested direction.
    pub fn advance(&mut self, stage: StageKind, direction: StepDirection) -> Result<SelectOutcome> {
        let current = &self.stages[stage.index()];
        let Some(position) = current.selected else {
            return Ok(SelectOutcome::no_op(self.is_terminal_resolved()));
        };

        let target = match direction {
            StepDirection::Previous => position.checked_sub(1),
            StepDirection::Next => {
                let next = position + 1;
                (next < current.choices.len()).then_some(next)
            }
        };
        let Some(target) = target else {
            debug!("Stage {stage} is at the {direction:?} boundary, nothing to do");
            return Ok(SelectOutcome::no_op(self.is_terminal_resolved()));
        };

        let value = current.choices[target].clone();
        self.select(stage, &value)
    }

    /// Current valid choices of a stage (empty until an ancestor selection
    /// computes them, or when the ancestor path is a dead end).
    pub fn choices(&self, stage: StageKind) -> &[String] {
        &self.stages[stage.index()].choices
    }

    /// Currently selected value of a stage, if any.
    pub fn current_value(&self, stage: StageKind) -> Option<&str> {
        self.stages[stage.index()].current_value()
    }

    /// State of a stage.
    pub fn stage_state(&self, stage: StageKind) -> StageState {
        self.stages[stage.index()].state
    }

    /// True when the presentation layer should accept input on the stage.
    pub fn is_enabled(&self, stage: StageKind) -> bool {
        self.stages[stage.index()].state.is_enabled()
    }

    /// True once the terminal stage holds a value.
    pub fn is_terminal_resolved(&self) -> bool {
        self.stages[StageKind::PrintYear.index()].state.has_value()
    }

    /// Backing records for the fully selected path. More than one entry
    /// means duplicate scans of the same edition; the caller presents all
    /// of them for a human to pick from. The slice is non-empty by
    /// construction of the index.
    pub fn resolve_terminal_records(&self) -> Result<&[MapProduct]> {
        if !self.is_terminal_resolved() {
            return Err(SelectorError::TerminalNotResolved);
        }

        let values: Vec<&str> = self
            .stages
            .iter()
            .filter_map(Stage::current_value)
            .collect();
        let path: [&str; StageKind::COUNT] = values
            .try_into()
            .map_err(|_| SelectorError::TerminalNotResolved)?;

        self.index
            .products(&path)
            .ok_or(SelectorError::TerminalNotResolved)
    }

    fn set_value(
        &mut self,
        stage: StageKind,
        position: usize,
        state: StageState,
        changed: &mut Vec<StageKind>,
    ) {
        let entry = &mut self.stages[stage.index()];
        entry.selected = Some(position);
        entry.state = state;
        push_unique(changed, stage);
    }

    /// Propagate a selection downward. A bounded loop rather than
    /// recursion: `stage` strictly increases each iteration, so this runs
    /// at most once per remaining stage. Returns whether the terminal
    /// stage ended up holding a value.
    fn cascade_from(&mut self, mut stage: StageKind, changed: &mut Vec<StageKind>) -> bool {
        loop {
            let Some(child) = stage.next() else {
                return true;
            };

            let path: Vec<String> = self.stages[..=stage.index()]
                .iter()
                .filter_map(|s| s.current_value().map(str::to_string))
                .collect();
            let refs: Vec<&str> = path.iter().map(String::as_str).collect();
            let choices = self.index.choices_below(&refs).unwrap_or_default();

            for entry in &mut self.stages[child.index()..] {
                if entry.state != StageState::Disabled || !entry.choices.is_empty() {
                    entry.reset();
                    push_unique(changed, entry.kind);
                }
            }

            let entry = &mut self.stages[child.index()];
            entry.choices = choices;
            push_unique(changed, child);

            if entry.choices.len() == 1 {
                entry.selected = Some(0);
                entry.state = StageState::Locked;
                debug!("Stage {child} locked to sole choice {:?}", entry.choices[0]);
                if child.is_terminal() {
                    return true;
                }
                stage = child;
                continue;
            }

            entry.state = StageState::Awaiting;
            entry.selected = None;
            if entry.choices.is_empty() {
                debug!("Stage {child} has no valid choices under the selected path");
            }
            return false;
        }
    }

    fn notify(&self, changed: &[StageKind]) {
        let Some(callback) = &self.callback else {
            return;
        };
        for &stage in changed {
            let entry = &self.stages[stage.index()];
            callback(&StageChange {
                stage,
                state: entry.state,
                value: entry.current_value().map(str::to_string),
            });
        }
    }
}

fn push_unique(changed: &mut Vec<StageKind>, stage: StageKind) {
    if !changed.contains(&stage) {
        changed.push(stage);
    }
}
