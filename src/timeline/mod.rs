pub mod builder;
pub mod events;
pub mod interpolator;
pub mod tables;
pub mod tuning;
pub mod walker;
