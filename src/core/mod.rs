pub mod error;
pub mod event;
pub mod value;
pub mod value_path;

pub use error::{Error, Result};
