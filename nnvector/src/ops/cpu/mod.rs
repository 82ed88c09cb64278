mod activation;
mod elementwise;
mod math;
mod rounding;

pub mod registry;

pub use activation::FusedActivation;
