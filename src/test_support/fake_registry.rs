use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::orcid::{FetchError, RegistrySource, Resource};

#[derive(Debug, Clone)]
enum Canned {
    Body(Value),
    Status(u16),
    Transport,
}

/// In-memory registry keyed by (identifier, resource).
///
/// Unknown keys answer 404, matching the public API for unknown iDs.
#[derive(Debug, Default)]
pub struct FakeRegistry {
    responses: HashMap<(String, Resource), Canned>,
    calls: Mutex<Vec<(String, Resource)>>,
}

impl FakeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_person(self, identifier: &str, body: Value) -> Self {
        self.with(identifier, Resource::Person, Canned::Body(body))
    }

    pub fn with_works(self, identifier: &str, body: Value) -> Self {
        self.with(identifier, Resource::Works, Canned::Body(body))
    }

    pub fn with_status(self, identifier: &str, resource: Resource, status: u16) -> Self {
        self.with(identifier, resource, Canned::Status(status))
    }

    pub fn with_transport_failure(self, identifier: &str, resource: Resource) -> Self {
        self.with(identifier, resource, Canned::Transport)
    }

    fn with(mut self, identifier: &str, resource: Resource, canned: Canned) -> Self {
        self.responses
            .insert((identifier.to_string(), resource), canned);
        self
    }

    /// Requests seen so far, in call order.
    pub fn calls(&self) -> Vec<(String, Resource)> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl RegistrySource for FakeRegistry {
    async fn fetch(&self, identifier: &str, resource: Resource) -> Result<Value, FetchError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((identifier.to_string(), resource));
        }
        match self.responses.get(&(identifier.to_string(), resource)) {
            Some(Canned::Body(body)) => Ok(body.clone()),
            Some(Canned::Status(status)) => Err(FetchError::status(identifier, resource, *status)),
            Some(Canned::Transport) => Err(FetchError::transport(
                identifier,
                resource,
                "connection refused",
            )),
            None => Err(FetchError::status(identifier, resource, 404)),
        }
    }
}
