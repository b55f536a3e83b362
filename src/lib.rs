//! Garage Door - voice-controlled garage door opener with an open-door monitor.
//!
//! A voice platform webhook presses the opener relay or reports the door
//! status through a device cloud. A scheduled monitor reads the same sensor,
//! keeps one record per door and sends a single alert per open session once
//! the door has been open longer than the configured threshold.

pub mod adapters;
pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod ports;
