//! Book review service: a CRUD server over a document store, and a client
//! that mirrors the server's collection in reducer-managed local state.

pub mod book;
pub mod client;
pub mod config;
pub mod logging;
pub mod repository;
pub mod server;
pub mod ui;
