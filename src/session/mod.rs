//! Session state machine and the pieces that read it.

pub mod controller;
pub mod events;
pub mod guard;
pub mod state;
