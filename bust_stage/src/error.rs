use thiserror::Error;

/// Recoverable signals raised by stage operations. Callers driven by scripted
/// content log these and carry on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StageError {
    #[error("no bust named {0:?} is on stage")]
    UnknownActor(String),
    #[error("unknown bust command {0:?}")]
    UnknownCommand(String),
    #[error("command {command} is missing argument {argument:?}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("variable {0:?} does not hold an image reference")]
    UnresolvedVariable(String),
}
