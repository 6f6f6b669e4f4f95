//! Client-side state: reducers, stores, and the session that drives them.

pub mod books;
pub mod bootstrap;
pub mod mvi;
pub mod session;
pub mod store;
