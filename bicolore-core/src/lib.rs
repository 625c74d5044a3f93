pub mod dataset;
pub mod models;
pub mod render;
pub mod sampler;
pub mod stats;
