pub mod filter;
pub mod interpolate;
