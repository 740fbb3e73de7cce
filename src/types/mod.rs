pub mod record;
pub mod stats;
pub mod table;

pub use record::*;
pub use stats::*;
pub use table::*;
