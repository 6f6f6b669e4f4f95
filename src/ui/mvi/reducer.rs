use super::intent::Intent;
use super::state::UiState;

/// The only place state transitions happen.
///
/// `reduce` must be pure and deterministic: no I/O, no clocks, no
/// randomness. The same `(state, intent)` always yields the same state.
pub trait Reducer {
    type State: UiState;

    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
