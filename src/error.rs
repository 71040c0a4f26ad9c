use miette::Diagnostic;
use thiserror::Error;

use crate::board::components::Side;

/// Failures the engine surfaces to its callers.
///
/// "No legal moves" is never an error; that is an empty [`SquareSet`].
///
/// [`SquareSet`]: crate::board::components::SquareSet
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// An index outside [0, 63] reached a boundary that requires a valid
    /// square.
    #[error("square index {index} is outside the board")]
    #[diagnostic(code(arbiter::invalid_square))]
    InvalidSquare { index: usize },

    /// The queried side has no king on the board. A precondition violation
    /// in the supplied position, never silently defaulted.
    #[error("no {side} king on the board")]
    #[diagnostic(code(arbiter::missing_king))]
    MissingKing { side: Side },

    /// The position string could not be parsed.
    #[error("malformed position input: {reason}")]
    #[diagnostic(code(arbiter::malformed_position))]
    MalformedPositionInput { reason: String },
}

impl EngineError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedPositionInput {
            reason: reason.into(),
        }
    }
}
