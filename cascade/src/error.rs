use crate::stage::StageKind;
use thiserror::Error;

/// Errors from selector operations. Everything else the selector can run
/// into (empty choice lists, ambiguous terminal matches, out-of-range
/// steps) is a defined outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// The value is not among the stage's current valid choices
    #[error("no valid choice {value:?} at stage {stage}")]
    ChoiceNotAvailable { stage: StageKind, value: String },

    /// The stage has not been enabled by an ancestor selection yet
    #[error("stage {stage} is disabled")]
    StageDisabled { stage: StageKind },

    /// Terminal records were requested before the last stage was selected
    #[error("terminal stage is not resolved")]
    TerminalNotResolved,
}

pub type Result<T> = std::result::Result<T, SelectorError>;
