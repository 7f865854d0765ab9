//! In-memory transport shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use ogc_common::{OgcError, OgcResult};
use ogcapi_client::{HttpRequest, HttpResponse, HttpTransport};
use test_utils::fixtures::service;

/// Serves canned responses by exact URL and records every request.
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<String, HttpResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn route(&self, url: &str, response: HttpResponse) {
        self.routes.lock().unwrap().insert(url.to_string(), response);
    }

    pub fn json(&self, url: &str, body: Value) {
        self.route(
            url,
            HttpResponse::new(200, body.to_string()).with_header("Content-Type", "application/json"),
        );
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }

    pub fn last(&self) -> HttpRequest {
        self.requests().last().cloned().expect("no request recorded")
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn get(&self, request: HttpRequest) -> OgcResult<HttpResponse> {
        self.requests.lock().unwrap().push(request.clone());
        let response = self.routes.lock().unwrap().get(&request.url).cloned();
        match response {
            Some(response) => Ok(response),
            None if request.url.contains("unreachable") => {
                Err(OgcError::Network(format!("connection refused: {}", request.url)))
            }
            None => Ok(HttpResponse::new(404, "not found")),
        }
    }
}

/// Transport serving the synthetic demo service.
pub fn demo_service() -> Arc<MockTransport> {
    let transport = MockTransport::new();
    transport.json(service::BASE_URL, service::landing_page());
    transport.json(service::COLLECTIONS_URL, service::collections());
    transport.json(service::OPENAPI_URL, service::openapi());
    transport.json(service::TILE_MATRIX_SETS_URL, service::tile_matrix_sets());
    transport.json(
        &format!("{}/WorldCRS84Quad/", service::TILE_MATRIX_SETS_URL),
        service::world_crs84_quad(),
    );
    transport.json(
        &format!("{}/WorldEPSG4326Quad/", service::TILE_MATRIX_SETS_URL),
        service::world_epsg4326_quad(),
    );
    transport
}
