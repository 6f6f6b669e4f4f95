/// Marker trait for intents.
///
/// An intent describes a change without performing it. It carries no side
/// effects; only a [`Reducer`](super::Reducer) gives it meaning.
pub trait Intent: Send + 'static {}
