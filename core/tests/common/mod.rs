//! In-process transport that records every request and replays one canned
//! response, so request construction can be checked without a socket.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use turso_api::{ApiError, ClientConfig, HttpRequest, HttpResponse, Transport, TursoClient};
use url::Url;

pub const API_KEY: &str = "test-key";
pub const BASE_URL: &str = "https://api.example.test/";
pub const REGION_URL: &str = "https://region.example.test/";

#[derive(Clone)]
pub struct Recorder {
    requests: Arc<Mutex<Vec<HttpRequest>>>,
    status: u16,
    body: String,
}

impl Recorder {
    pub fn replying(status: u16, body: &str) -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            status,
            body: body.to_string(),
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The only request issued so far; panics if there were zero or several.
    pub fn single(&self) -> HttpRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().unwrap()
    }
}

impl Transport for Recorder {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(HttpResponse {
            status: self.status,
            headers: Vec::new(),
            body: self.body.clone(),
        })
    }
}

pub fn client(recorder: &Recorder) -> TursoClient<Recorder> {
    let config = ClientConfig::new(API_KEY)
        .with_base_url(BASE_URL)
        .with_region_url(REGION_URL);
    TursoClient::with_transport(config, recorder.clone())
}

/// URL without its query string, plus the query as an unordered map.
pub fn split_url(url: &str) -> (String, HashMap<String, String>) {
    let mut parsed = Url::parse(url).unwrap();
    let query = parsed.query_pairs().into_owned().collect();
    parsed.set_query(None);
    (parsed.to_string(), query)
}
