// Domain layer - Telemetry, chart, and status data types
pub mod chart;
pub mod status;
pub mod telemetry;
