pub mod analysis;
pub mod ml;
pub mod service;
