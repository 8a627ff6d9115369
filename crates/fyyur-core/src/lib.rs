//! Core types and trait definitions for the Fyyur booking directory.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! storage backend implements [`store::BookingStore`]; the web layer calls the
//! read models in [`query`].

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod artist;
pub mod error;
pub mod query;
pub mod show;
pub mod store;
pub mod venue;
pub mod view;

pub use error::{Error, Result};
