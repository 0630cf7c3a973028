pub mod error;
pub mod models;
pub mod resolve;

// Re-export commonly used types
pub use error::{TypeError, TypeResult};
pub use models::*;
pub use resolve::{
    ClassSource, KnownTypes, NameShortener, SourceUniverse, TypeUniverse, UnionUniverse,
};
