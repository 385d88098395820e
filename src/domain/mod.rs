pub mod errors;
pub mod feature_registry;
pub mod types;
