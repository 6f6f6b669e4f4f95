use crate::ui::mvi::UiState;

/// Lifecycle of the initial collection load.
///
/// `Ready` and `Errored` are terminal for the session; a new session starts
/// again from `Uninitialized`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BootstrapState {
    #[default]
    Uninitialized,
    Loading,
    Ready,
    Errored { message: String },
}

impl UiState for BootstrapState {}

impl BootstrapState {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready | Self::Errored { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Errored { message } => Some(message),
            _ => None,
        }
    }
}
