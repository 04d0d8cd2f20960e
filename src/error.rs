/// Everything a compression handler can report back to the caller.
///
/// None of these end the process: the MCP layer turns each one into an
/// `isError` tool result.
#[derive(Debug, thiserror::Error)]
pub enum CompressError {
    #[error("Zipic is not installed. Install Zipic and try again.")]
    ApplicationUnavailable,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to build Zipic request: {0}")]
    EncodingFailure(String),

    #[error("Zipic did not accept the request. Make sure Zipic is installed and has been launched at least once.")]
    DispatchRejected,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("at least one file or directory path is required in 'targets'")]
    EmptyTargets,

    #[error("'targets[{index}]' must not be an empty path")]
    BlankTarget { index: usize },

    #[error("'{field}' is out of range: {expected}")]
    OutOfRange {
        field: &'static str,
        expected: &'static str,
    },

    #[error("'{field}' has the wrong type: expected {expected}")]
    BadType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("'{field}' must be one of {allowed}, got '{value}'")]
    InvalidChoice {
        field: &'static str,
        value: String,
        allowed: &'static str,
    },
}

impl ValidationError {
    /// Name of the offending argument.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::EmptyTargets | ValidationError::BlankTarget { .. } => "targets",
            ValidationError::OutOfRange { field, .. }
            | ValidationError::BadType { field, .. }
            | ValidationError::InvalidChoice { field, .. } => field,
        }
    }
}
