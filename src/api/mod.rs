//! REST client for the meters resource
//!
//! `MeterApi` is the seam between the UI flows and the network. The HTTP
//! implementation lives in `client`; tests substitute an in-memory fake.

mod client;

pub use client::HttpMeterApi;

use crate::types::{Meter, NewMeter};
use std::future::Future;
use thiserror::Error;

/// Failure of a meters API call. `Display` is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Non-2xx status or a `success: false` envelope
    #[error("{message}")]
    Rejected { status: Option<u16>, message: String },

    /// The server refused a create because the meter id is taken
    #[error("{0}")]
    Duplicate(String),

    /// No HTTP response was received
    #[error("Request failed: {0}")]
    Transport(String),

    /// A successful status carried a body that is not the expected envelope
    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, ApiError::Duplicate(_))
    }

    /// Classify a server rejection, promoting conflicts to `Duplicate`
    pub(crate) fn rejected(status: Option<u16>, message: String) -> Self {
        let lowered = message.to_lowercase();
        if status == Some(409) || lowered.contains("duplicate") || lowered.contains("already exists")
        {
            ApiError::Duplicate(message)
        } else {
            ApiError::Rejected { status, message }
        }
    }
}

/// The three operations the UI needs from the backend
pub trait MeterApi: Send + Sync + 'static {
    /// GET /meters
    fn list_meters(&self) -> impl Future<Output = Result<Vec<Meter>, ApiError>> + Send;

    /// POST /meters
    fn create_meter(&self, meter: &NewMeter)
        -> impl Future<Output = Result<(), ApiError>> + Send;

    /// DELETE /meters/{id}, addressed by the server-assigned id
    fn delete_meter(&self, id: &str) -> impl Future<Output = Result<(), ApiError>> + Send;
}
