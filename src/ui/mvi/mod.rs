//! Model-View-Intent (MVI) primitives.
//!
//! Unidirectional data flow for client-side state:
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ subscribers
//!    ↑                                │
//!    └──────── confirmed server call ─┘
//! ```
//!
//! - **State**: immutable snapshot consumers render from
//! - **Intent**: a pure description of one change
//! - **Reducer**: pure function `(State, Intent) -> State`

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
