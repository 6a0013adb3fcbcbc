//! Shared fixtures for unit tests

use crate::api::{ApiError, MeterApi};
use crate::state::{AppState, SharedState};
use crate::types::{Meter, NewMeter};
use ratatui::buffer::Buffer;
use std::sync::{Arc, Mutex, RwLock};

pub fn meter(id: &str, meter_id: &str) -> Meter {
    Meter {
        id: id.to_string(),
        meter_id: meter_id.to_string(),
        gateway_key: "KEY12".to_string(),
        gateway_token: "TOK12".to_string(),
        parameter_id: 1i64.into(),
        last_inserted_timestamp: None,
    }
}

pub fn shared_state() -> SharedState {
    Arc::new(RwLock::new(AppState::default()))
}

/// Concatenate every cell of a rendered buffer, one line per row
pub fn buffer_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut text = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

pub fn assert_buffer_contains(buffer: &Buffer, expected: &str) {
    let text = buffer_text(buffer);
    assert!(
        text.contains(expected),
        "Expected buffer to contain '{expected}', got:\n{text}"
    );
}

pub fn assert_buffer_lacks(buffer: &Buffer, unexpected: &str) {
    let text = buffer_text(buffer);
    assert!(
        !text.contains(unexpected),
        "Expected buffer not to contain '{unexpected}', got:\n{text}"
    );
}

/// In-memory backend that records every call as "METHOD path"
#[derive(Default)]
pub struct FakeApi {
    meters: Mutex<Vec<Meter>>,
    created: Mutex<Vec<NewMeter>>,
    calls: Mutex<Vec<String>>,
    list_error: Mutex<Option<ApiError>>,
    create_error: Mutex<Option<ApiError>>,
    delete_error: Mutex<Option<ApiError>>,
    next_id: Mutex<u32>,
}

impl FakeApi {
    pub fn with_meters(meters: Vec<Meter>) -> Self {
        let api = Self::default();
        *api.meters.lock().unwrap() = meters;
        api
    }

    pub fn fail_list(&self, error: ApiError) {
        *self.list_error.lock().unwrap() = Some(error);
    }

    pub fn fail_create(&self, error: ApiError) {
        *self.create_error.lock().unwrap() = Some(error);
    }

    pub fn fail_delete(&self, error: ApiError) {
        *self.delete_error.lock().unwrap() = Some(error);
    }

    pub fn clear_failures(&self) {
        *self.list_error.lock().unwrap() = None;
        *self.create_error.lock().unwrap() = None;
        *self.delete_error.lock().unwrap() = None;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn created(&self) -> Vec<NewMeter> {
        self.created.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl MeterApi for FakeApi {
    async fn list_meters(&self) -> Result<Vec<Meter>, ApiError> {
        self.record("GET /meters".to_string());
        if let Some(e) = self.list_error.lock().unwrap().clone() {
            return Err(e);
        }
        Ok(self.meters.lock().unwrap().clone())
    }

    async fn create_meter(&self, meter: &NewMeter) -> Result<(), ApiError> {
        self.record("POST /meters".to_string());
        if let Some(e) = self.create_error.lock().unwrap().clone() {
            return Err(e);
        }

        let id = {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            format!("srv{next}")
        };
        self.created.lock().unwrap().push(meter.clone());
        self.meters.lock().unwrap().push(Meter {
            id,
            meter_id: meter.meter_id.clone(),
            gateway_key: meter.gateway_key.clone(),
            gateway_token: meter.gateway_token.clone(),
            parameter_id: meter.parameter_id.into(),
            last_inserted_timestamp: None,
        });
        Ok(())
    }

    async fn delete_meter(&self, id: &str) -> Result<(), ApiError> {
        self.record(format!("DELETE /meters/{id}"));
        if let Some(e) = self.delete_error.lock().unwrap().clone() {
            return Err(e);
        }
        self.meters.lock().unwrap().retain(|m| m.id != id);
        Ok(())
    }
}
