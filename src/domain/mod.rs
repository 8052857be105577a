pub mod chain_data;
pub mod errors;
pub mod heatmap;
pub mod logging;
