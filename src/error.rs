use crate::transport::TransportError;

/// Failure of a module operation.
///
/// Every variant names the operation that failed (see [`ProtocolError::label`])
/// and, where the module answered at all, the raw reply
/// (see [`ProtocolError::response`]).
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("failed to connect to the serial device: {source}")]
    Connect { source: TransportError },
    #[error("failure in {label}: {source}")]
    Transport {
        label: &'static str,
        source: TransportError,
    },
    #[error("failure in {label}: {response}")]
    UnexpectedResponse {
        label: &'static str,
        response: String,
    },
    #[error("incorrect response in entering command mode: {response}")]
    CommandModeEntry { response: String },
    #[error("incorrect chip name when entering command mode: {name}")]
    ChipNameMismatch { name: String },
    #[error("failure to get chip name in entering command mode: {source}")]
    ChipNameProbe { source: Box<ProtocolError> },
    #[error("failure in {label}: not in command mode")]
    NotInCommandMode { label: &'static str },
    #[error("failure in {label}: device is closed")]
    Closed { label: &'static str },
}

impl ProtocolError {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Connect { .. } => "connecting",
            Self::Transport { label, .. }
            | Self::UnexpectedResponse { label, .. }
            | Self::NotInCommandMode { label }
            | Self::Closed { label } => *label,
            Self::CommandModeEntry { .. }
            | Self::ChipNameMismatch { .. }
            | Self::ChipNameProbe { .. } => "entering command mode",
        }
    }

    /// Raw reply that caused the failure; empty when the module never answered.
    pub fn response(&self) -> &str {
        match self {
            Self::UnexpectedResponse { response, .. } | Self::CommandModeEntry { response } => {
                response.as_str()
            }
            Self::ChipNameMismatch { name } => name.as_str(),
            Self::ChipNameProbe { source } => source.response(),
            Self::Connect { .. }
            | Self::Transport { .. }
            | Self::NotInCommandMode { .. }
            | Self::Closed { .. } => "",
        }
    }
}
