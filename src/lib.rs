//! slircbot - Straylight modular IRC bot.
//!
//! A small IRC client host: it keeps one connection alive across a list of
//! servers, dispatches every event to the installed modules and answers
//! `/me` actions from a pattern registry.

pub mod config;
pub mod error;
pub mod host;
pub mod modules;
pub mod network;
pub mod proto;
pub mod responder;
pub mod state;
