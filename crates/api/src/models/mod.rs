pub mod host;
pub mod types;

pub use host::*;
pub use types::*;
