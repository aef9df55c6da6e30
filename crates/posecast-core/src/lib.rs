//! Types shared by every Posecast collaborator crate

mod error;

pub use error::{ErrorDetails, HttpError};
