use super::{ApiError, MeterApi};
use crate::types::{Envelope, Meter, NewMeter};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;

const METERS_PATH: &str = "/meters";

/// Fallback messages when the server gives no reason
const LIST_FALLBACK: &str = "Failed to fetch meters";
const CREATE_FALLBACK: &str = "Failed to create meter";
const DELETE_FALLBACK: &str = "Failed to delete meter";

/// reqwest-backed client for the meters resource
#[derive(Debug, Clone)]
pub struct HttpMeterApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpMeterApi {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        // Fail early on a malformed base rather than on the first request
        build_meters_url(base_url, None)?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url: base_url.to_string(),
        })
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        fallback: &str,
    ) -> Result<Option<T>, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(format!("Failed to read response body: {e}")))?;

        decode_envelope(status, &body, fallback)
    }
}

impl MeterApi for HttpMeterApi {
    async fn list_meters(&self) -> Result<Vec<Meter>, ApiError> {
        let url = build_meters_url(&self.base_url, None)?;
        debug!(%url, "GET meters");

        let meters: Option<Vec<Meter>> = self.send(self.http.get(url), LIST_FALLBACK).await?;
        let meters = meters.unwrap_or_default();

        info!(count = meters.len(), "Fetched meters");
        Ok(meters)
    }

    async fn create_meter(&self, meter: &NewMeter) -> Result<(), ApiError> {
        let url = build_meters_url(&self.base_url, None)?;
        debug!(%url, meter_id = %meter.meter_id, "POST meter");

        let request = self.http.post(url).json(meter);
        let _: Option<serde_json::Value> = self.send(request, CREATE_FALLBACK).await?;

        info!(meter_id = %meter.meter_id, "Created meter");
        Ok(())
    }

    async fn delete_meter(&self, id: &str) -> Result<(), ApiError> {
        let url = build_meters_url(&self.base_url, Some(id))?;
        debug!(%url, "DELETE meter");

        let _: Option<serde_json::Value> =
            self.send(self.http.delete(url), DELETE_FALLBACK).await?;

        info!(id, "Deleted meter");
        Ok(())
    }
}

/// Build `{base}/meters` or `{base}/meters/{id}`, percent-encoding the id
pub(crate) fn build_meters_url(base_url: &str, id: Option<&str>) -> Result<Url, ApiError> {
    let full_path = format!("{}{}", base_url.trim_end_matches('/'), METERS_PATH);
    let mut url = Url::parse(&full_path).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;

    if let Some(id) = id {
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(format!("{base_url} cannot be a base")))?
            .push(id);
    }

    Ok(url)
}

#[derive(Deserialize)]
struct MessageBody {
    message: Option<String>,
}

/// Turn a status and raw body into the envelope payload or an error
///
/// Non-2xx and `success: false` are failures; the server `message` is
/// surfaced when present, otherwise `fallback`.
pub(crate) fn decode_envelope<T: DeserializeOwned>(
    status: u16,
    body: &str,
    fallback: &str,
) -> Result<Option<T>, ApiError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<MessageBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string());

        warn!(status, %message, "Request rejected");
        return Err(ApiError::rejected(Some(status), message));
    }

    let envelope: Envelope<T> =
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;

    if !envelope.success {
        let message = envelope
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string());

        warn!(status, %message, "Request unsuccessful");
        return Err(ApiError::rejected(None, message));
    }

    Ok(envelope.data)
}
