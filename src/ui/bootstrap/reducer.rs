use crate::ui::bootstrap::intent::BootstrapIntent;
use crate::ui::bootstrap::state::BootstrapState;
use crate::ui::mvi::Reducer;

pub struct BootstrapReducer;

impl Reducer for BootstrapReducer {
    type State = BootstrapState;
    type Intent = BootstrapIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match (state, intent) {
            (BootstrapState::Uninitialized, BootstrapIntent::Start) => BootstrapState::Loading,
            (BootstrapState::Loading, BootstrapIntent::Loaded) => BootstrapState::Ready,
            (BootstrapState::Loading, BootstrapIntent::Failed(message)) => {
                BootstrapState::Errored { message }
            }
            // Out-of-order intents never move the machine backwards.
            (other, _) => other,
        }
    }
}
