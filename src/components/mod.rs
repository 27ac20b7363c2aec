//! Reusable UI components.

pub mod network_diagram;
