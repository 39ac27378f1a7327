//! Input fields: value pipeline, validation, focus and key handling.

mod adapter;
mod config;
pub mod events;
mod store;
mod surface;
mod value;

pub use adapter::FieldAdapter;
pub use config::{
    DEFAULT_EMPTY_MESSAGE, DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH, FieldConfig, FieldLimits,
};
pub use events::EventResult;
pub use store::{FieldState, FieldStore};
pub use surface::InputSurface;
pub use value::{InputKind, InputValue};
