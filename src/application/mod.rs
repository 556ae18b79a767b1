// Application layer - Use cases and ports for the polling pipeline
pub mod controller;
pub mod evaluator;
pub mod partitioner;
pub mod projector;
pub mod snapshot_source;
pub mod surface;
