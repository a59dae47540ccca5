use crate::client::TursoClient;
use crate::error::ApiError;
use crate::http::{RequestSpec, Transport};
use crate::types::{ApiTokenList, CreatedApiToken, RevokedApiToken, TokenValidation};

/// Platform API tokens of the authenticated user.
pub struct ApiTokens<'c, T> {
    client: &'c TursoClient<T>,
}

impl<'c, T: Transport> ApiTokens<'c, T> {
    pub(crate) fn new(client: &'c TursoClient<T>) -> Self {
        Self { client }
    }

    /// Mint a new API token called `name`.
    pub fn create(&self, name: &str) -> Result<CreatedApiToken, ApiError> {
        self.client
            .request(RequestSpec::post(format!("v1/auth/api-tokens/{name}")))
    }

    /// Check the configured key and report when it expires.
    pub fn validate(&self) -> Result<TokenValidation, ApiError> {
        self.client.request(RequestSpec::get("v1/auth/validate"))
    }

    pub fn list(&self) -> Result<ApiTokenList, ApiError> {
        self.client.request(RequestSpec::get("v1/auth/api-tokens"))
    }

    pub fn revoke(&self, name: &str) -> Result<RevokedApiToken, ApiError> {
        self.client
            .request(RequestSpec::delete(format!("v1/auth/api-tokens/{name}")))
    }
}
