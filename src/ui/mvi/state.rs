/// Marker trait for reducer-owned state.
///
/// `Default` is the state before anything has been dispatched; `PartialEq`
/// lets consumers skip redundant work when a dispatch changed nothing.
pub trait UiState: Clone + PartialEq + Default + Send + Sync + 'static {}
