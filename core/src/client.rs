//! Request construction and dispatch for the platform API.
//!
//! # Design
//! `TursoClient` holds an immutable `ClientConfig` and a `Transport`, and
//! nothing else. Every resource method builds a `RequestSpec` and hands it to
//! `request`, which runs three steps:
//! - `build_request` picks the host, appends the path and query, and adds the
//!   JSON and bearer headers;
//! - the transport performs the round-trip;
//! - `parse_response` maps non-2xx to `ApiError::Status` and decodes the rest.
//!
//! `build_request` and `parse_response` are public so the I/O boundary can be
//! driven by hand, as in the tests.

use std::fmt;

use log::{debug, warn};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, RequestSpec, Transport, UreqTransport};
use crate::resources::{ApiTokens, Databases, Locations, Members, Organizations};

/// Typed client for the platform API.
///
/// Holds no mutable state, so one instance can serve concurrent callers.
/// Each call blocks until its single request completes.
#[derive(Clone)]
pub struct TursoClient<T = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl TursoClient<UreqTransport> {
    /// Client that talks to the network through `ureq`.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }
}

impl<T: Transport> TursoClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn api_tokens(&self) -> ApiTokens<'_, T> {
        ApiTokens::new(self)
    }

    pub fn databases(&self) -> Databases<'_, T> {
        Databases::new(self)
    }

    pub fn locations(&self) -> Locations<'_, T> {
        Locations::new(self)
    }

    pub fn organizations(&self) -> Organizations<'_, T> {
        Organizations::new(self)
    }

    pub fn members(&self) -> Members<'_, T> {
        Members::new(self)
    }

    /// Turn a `RequestSpec` into a concrete request without sending it.
    pub fn build_request(&self, spec: &RequestSpec) -> Result<HttpRequest, ApiError> {
        let host = if spec.use_region_host {
            self.config.region_url()
        } else {
            self.config.base_url()
        };

        let mut url = Url::parse(&format!("{host}{}", spec.path))?;
        if let Some(query) = spec.query.as_ref().filter(|q| !q.is_empty()) {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        let body = spec
            .body
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(ApiError::Serialization)?;

        Ok(HttpRequest {
            method: spec.method,
            url: url.into(),
            headers: vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                (
                    "Authorization".to_string(),
                    format!("Bearer {}", self.config.api_key()),
                ),
            ],
            body,
        })
    }

    /// Decode a 2xx response body as `R`; anything else is `ApiError::Status`.
    pub fn parse_response<R: DeserializeOwned>(&self, response: HttpResponse) -> Result<R, ApiError> {
        check_status(response).and_then(|response| {
            serde_json::from_str(&response.body).map_err(ApiError::Deserialization)
        })
    }

    pub(crate) fn request<R: DeserializeOwned>(&self, spec: RequestSpec) -> Result<R, ApiError> {
        let response = self.send(&spec)?;
        self.parse_response(response)
    }

    /// Like `request`, for endpoints whose 2xx body carries nothing.
    pub(crate) fn request_empty(&self, spec: RequestSpec) -> Result<(), ApiError> {
        let response = self.send(&spec)?;
        check_status(response).map(|_| ())
    }

    fn send(&self, spec: &RequestSpec) -> Result<HttpResponse, ApiError> {
        let request = self.build_request(spec)?;
        debug!("{} {}", request.method, request.url);
        let response = self.transport.execute(&request)?;
        debug!("{} {} -> {}", request.method, request.url, response.status);
        Ok(response)
    }
}

impl<T> fmt::Debug for TursoClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TursoClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn check_status(response: HttpResponse) -> Result<HttpResponse, ApiError> {
    if response.is_success() {
        return Ok(response);
    }
    warn!("request failed with status {}", response.status);
    Err(ApiError::Status {
        status: response.status,
        body: response.body,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_json::json;

    use super::*;
    use crate::http::HttpMethod;
    use crate::types::ClosestRegion;

    struct Unreachable;

    impl Transport for Unreachable {
        fn execute(&self, _request: &HttpRequest) -> Result<HttpResponse, ApiError> {
            Err(ApiError::transport(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            )))
        }
    }

    fn client() -> TursoClient<Unreachable> {
        TursoClient::with_transport(ClientConfig::new("test-key"), Unreachable)
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_request_targets_primary_host() {
        let req = client().build_request(&RequestSpec::get("v1/organizations")).unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "https://api.turso.tech/v1/organizations");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_request_targets_region_host_with_empty_path() {
        let req = client()
            .build_request(&RequestSpec::get("").on_region_host())
            .unwrap();
        assert_eq!(req.url, "https://region.turso.io/");
    }

    #[test]
    fn build_request_sets_json_and_bearer_headers() {
        let req = client().build_request(&RequestSpec::get("v1/locations")).unwrap();
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.header("authorization"), Some("Bearer test-key"));
    }

    #[test]
    fn build_request_appends_query_pairs() {
        let query = BTreeMap::from([("group".to_string(), "g1".to_string())]);
        let req = client()
            .build_request(&RequestSpec::get("v1/organizations/acme/databases").with_query(Some(query)))
            .unwrap();
        assert_eq!(
            req.url,
            "https://api.turso.tech/v1/organizations/acme/databases?group=g1"
        );
    }

    #[test]
    fn build_request_skips_empty_query() {
        let req = client()
            .build_request(&RequestSpec::get("v1/locations").with_query(Some(BTreeMap::new())))
            .unwrap();
        assert_eq!(req.url, "https://api.turso.tech/v1/locations");
    }

    #[test]
    fn build_request_serializes_body() {
        let spec = RequestSpec::post("v1/organizations/acme/members")
            .with_body(Some(json!({"username": "iku", "role": "member"})));
        let req = client().build_request(&spec).unwrap();
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["username"], "iku");
    }

    #[test]
    fn build_request_rejects_unparseable_host() {
        let client = TursoClient::with_transport(
            ClientConfig::new("k").with_base_url("not a url"),
            Unreachable,
        );
        let err = client.build_request(&RequestSpec::get("v1/locations")).unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[test]
    fn parse_response_decodes_success() {
        let region: ClosestRegion = client()
            .parse_response(response(200, r#"{"server":"ams","client":"fra"}"#))
            .unwrap();
        assert_eq!(region.server, "ams");
    }

    #[test]
    fn parse_response_reports_status() {
        let err = client()
            .parse_response::<ClosestRegion>(response(401, r#"{"error":"unauthorized"}"#))
            .unwrap_err();
        assert_eq!(err.status(), Some(401));
        match err {
            ApiError::Status { body, .. } => assert!(body.contains("unauthorized")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn parse_response_bad_json() {
        let err = client()
            .parse_response::<ClosestRegion>(response(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn transport_failure_is_propagated() {
        let err = client().locations().closest().unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn debug_does_not_leak_key() {
        let rendered = format!("{:?}", client());
        assert!(!rendered.contains("test-key"));
    }
}
