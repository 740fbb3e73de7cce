pub mod decoder;
pub mod main;

pub use decoder::*;
pub use main::*;
