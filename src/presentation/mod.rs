// Presentation layer - Host-side rendering adapters
pub mod status_board;
pub mod surfaces;
