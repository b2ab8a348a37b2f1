pub mod classifier;
pub mod entity;
pub mod errors;
