//! Binding settings structs to a source.

mod discover;
mod engine;
mod error;

pub use discover::{discover, AppSettings, FieldDescriptor, FieldMarker, Member, Schema};
pub use engine::{load, Binder, LoadReport};
pub use error::{FieldError, LoadError};
