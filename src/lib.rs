//! A single-threaded limit order book engine: price-time matching across
//! any number of instruments, dispatched through one [`engine::Engine`].
//!
//! No persistence, no networking, no concurrency — orders go in, trade and
//! cancel events come out synchronously through an [`observer::Observer`].

pub mod book;
pub mod cli;
pub mod engine;
pub mod errors;
pub mod ids;
pub mod instrument;
pub mod observer;
pub mod orders;
pub mod trade;
