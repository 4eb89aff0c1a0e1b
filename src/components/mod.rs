//! Reusable view components.

pub mod dijkstra;
