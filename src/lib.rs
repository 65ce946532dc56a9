// Library surface shared by the binary and integration tests.
pub mod config;
pub mod error;
pub mod frequency;

pub use error::{Error, Result, SelectionError, TableError};
pub use frequency::{CharacterSelector, FrequencyEntry, FrequencyTable};
