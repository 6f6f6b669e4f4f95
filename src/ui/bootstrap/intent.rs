use crate::ui::mvi::Intent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapIntent {
    /// The initial listing has been requested.
    Start,
    /// The listing arrived and the collection was initialized.
    Loaded,
    /// The listing failed with this message.
    Failed(String),
}

impl Intent for BootstrapIntent {}
