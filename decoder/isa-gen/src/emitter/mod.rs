pub mod bits;
pub mod classification;
pub mod identifier;
pub mod strategies;
pub mod traits;
