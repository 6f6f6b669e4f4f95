mod intent;
mod reducer;
mod state;

pub use intent::BootstrapIntent;
pub use reducer::BootstrapReducer;
pub use state::BootstrapState;
