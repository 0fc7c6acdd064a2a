//! Domain layer
//!
//! Entities and the port traits the selection workflow depends on.

pub mod entities;
pub mod ports;
