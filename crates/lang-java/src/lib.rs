pub mod compile;
pub mod discoverer;
pub mod document;
pub mod error;
pub mod language;
pub mod model;
pub mod naming;
pub mod parser;
pub mod reader;
pub mod serialize;

pub use compile::{ShorteningPolicy, TypeContext, compile, compile_in};
pub use discoverer::{DiscoverySettings, Snapshot, SnapshotSource, SuperPolicy};
pub use error::{Result, RosettaError};
pub use language::JavaLanguage;
pub use parser::{TypeCache, TypeParser};
pub use reader::PayloadReader;
pub use serialize::{DictionaryMode, SerializePass, SerializeSettings, TypeDictionary};
