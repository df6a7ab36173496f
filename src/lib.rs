//! Terminal client for an OpenHS game server.
//!
//! The server owns the game. This crate renders its snapshots, turns clicks
//! into actions and sends them back; see [`client::Session`].

pub mod client;
pub mod config;
pub mod net;
pub mod snapshot;
