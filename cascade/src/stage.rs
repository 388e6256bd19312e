use std::fmt;

/// The five selection stages, in cascade order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StageKind {
    Scale,
    State,
    CellName,
    MapYear,
    PrintYear,
}

impl StageKind {
    /// Number of stages in the cascade.
    pub const COUNT: usize = 5;

    /// All stages in cascade order.
    pub const ALL: [StageKind; StageKind::COUNT] = [
        StageKind::Scale,
        StageKind::State,
        StageKind::CellName,
        StageKind::MapYear,
        StageKind::PrintYear,
    ];

    /// Position of this stage in the cascade (0..5).
    pub fn index(self) -> usize {
        match self {
            StageKind::Scale => 0,
            StageKind::State => 1,
            StageKind::CellName => 2,
            StageKind::MapYear => 3,
            StageKind::PrintYear => 4,
        }
    }

    /// Stage at a given position.
    pub fn from_index(index: usize) -> Option<StageKind> {
        StageKind::ALL.get(index).copied()
    }

    /// The stage directly after this one, or `None` for the terminal stage.
    pub fn next(self) -> Option<StageKind> {
        StageKind::from_index(self.index() + 1)
    }

    /// True for the last stage of the cascade.
    pub fn is_terminal(self) -> bool {
        self == StageKind::PrintYear
    }

    /// Human-readable label for the presentation layer.
    pub fn label(self) -> &'static str {
        match self {
            StageKind::Scale => "Map Scale",
            StageKind::State => "Primary State",
            StageKind::CellName => "Cell Name",
            StageKind::MapYear => "Map Year",
            StageKind::PrintYear => "Print Year",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// State of one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageState {
    /// No ancestor selection has enabled this stage yet
    Disabled,

    /// Enabled and waiting for a selection
    Awaiting,

    /// Enabled with a user-made selection
    Selected,

    /// Auto-selected because it was the only valid choice; the
    /// presentation layer keeps the control disabled
    Locked,
}

impl StageState {
    /// True when the presentation layer should accept input on the stage.
    pub fn is_enabled(self) -> bool {
        matches!(self, StageState::Awaiting | StageState::Selected)
    }

    /// True when the stage holds a value.
    pub fn has_value(self) -> bool {
        matches!(self, StageState::Selected | StageState::Locked)
    }
}

/// One stage of the cascade: its current choice list and selection.
#[derive(Debug, Clone)]
pub(crate) struct Stage {
    pub kind: StageKind,
    pub state: StageState,
    pub choices: Vec<String>,
    pub selected: Option<usize>,
}

impl Stage {
    pub fn new(kind: StageKind) -> Self {
        Self {
            kind,
            state: StageState::Disabled,
            choices: Vec::new(),
            selected: None,
        }
    }

    pub fn current_value(&self) -> Option<&str> {
        let index = self.selected?;
        self.choices.get(index).map(String::as_str)
    }

    /// Blank the value and disable the stage; choices stay empty until an
    /// ancestor selection recomputes them.
    pub fn reset(&mut self) {
        self.state = StageState::Disabled;
        self.choices.clear();
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn stage_order_round_trips_through_indexes() {
        for (i, kind) in StageKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(StageKind::from_index(i), Some(*kind));
        }
        assert_eq!(StageKind::from_index(StageKind::COUNT), None);
    }

    #[test]
    fn next_walks_the_cascade() {
        assert_eq!(StageKind::Scale.next(), Some(StageKind::State));
        assert_eq!(StageKind::MapYear.next(), Some(StageKind::PrintYear));
        assert_eq!(StageKind::PrintYear.next(), None);
        assert!(StageKind::PrintYear.is_terminal());
    }

    #[test]
    fn stage_states_classify_enabled_and_valued() {
        assert!(StageState::Awaiting.is_enabled());
        assert!(StageState::Selected.is_enabled());
        assert!(!StageState::Disabled.is_enabled());
        assert!(!StageState::Locked.is_enabled());

        assert!(StageState::Selected.has_value());
        assert!(StageState::Locked.has_value());
        assert!(!StageState::Awaiting.has_value());
    }

    #[test]
    fn reset_blanks_value_and_choices() {
        let mut stage = Stage::new(StageKind::State);
        stage.state = StageState::Selected;
        stage.choices = vec!["Oregon".to_string()];
        stage.selected = Some(0);

        stage.reset();
        assert_eq!(stage.state, StageState::Disabled);
        assert!(stage.choices.is_empty());
        assert_eq!(stage.current_value(), None);
    }
}
