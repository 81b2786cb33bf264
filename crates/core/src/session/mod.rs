//! Session persistence ports

pub mod ports;
