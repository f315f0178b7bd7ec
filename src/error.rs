use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RaffleError {
    #[error("No file selected!")]
    NoFileSelected,
    #[error("Please type or import the participant list first!")]
    EmptyRoster,
    #[error("The wheel is still spinning.")]
    SpinInProgress,
    #[error("Could not read the selected file: {0}")]
    FileRead(String),
    #[error("Canvas error: {0}")]
    Canvas(String),
}

impl RaffleError {
    pub(crate) fn file_read<E: std::fmt::Display>(err: E) -> Self {
        Self::FileRead(err.to_string())
    }

    pub(crate) fn canvas<E: std::fmt::Debug>(err: E) -> Self {
        Self::Canvas(format!("{:?}", err))
    }

    /// Text for the alert dialog, `None` for errors that only get logged.
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::Canvas(_) => None,
            other => Some(other.to_string()),
        }
    }
}
