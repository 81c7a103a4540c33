pub mod generation;
pub mod selection;

pub use generation::*;
pub use selection::*;
