pub mod error;

pub use error::{AutocommentError, BackendError, BackendErrorKind, Result};
