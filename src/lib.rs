//! Command layer of a headless playback daemon.
//!
//! Clients send text commands; [`commands::CommandLayer`] answers them from
//! a consistent snapshot of the shared [`model::Library`] and drives the
//! [`model::PlaybackQueue`], while a backend keeps the library current.

pub mod backend;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod logging;
pub mod model;
pub mod server;
