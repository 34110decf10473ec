//! Crate error types

use thiserror::Error;

use crate::api::ApiError;

/// Result type for controller and host setup
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A controller was bound to a page that lacks one of its elements
    #[error("page `{page}` is missing required element `#{id}`")]
    MissingElement { page: String, id: String },

    /// The page offers no way to address a transfer destination
    #[error("page `{0}` has neither account-type selectors nor a destination account input")]
    NoTransferTarget(String),

    /// The API client could not be built
    #[error(transparent)]
    Api(#[from] ApiError),
}
