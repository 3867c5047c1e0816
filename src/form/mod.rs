pub mod buffer;
pub mod controller;
pub mod error;
pub mod outcome;

pub use buffer::{Field, FormBuffer};
pub use controller::{DeleteRequest, FormController, expand_upload_path};
pub use error::{FormError, ValidationError};
pub use outcome::Outcome;
