use crate::client::TursoClient;
use crate::error::ApiError;
use crate::http::{RequestSpec, Transport};
use crate::types::Organization;

pub struct Organizations<'c, T> {
    client: &'c TursoClient<T>,
}

impl<'c, T: Transport> Organizations<'c, T> {
    pub(crate) fn new(client: &'c TursoClient<T>) -> Self {
        Self { client }
    }

    /// Organizations the authenticated user belongs to.
    pub fn list(&self) -> Result<Vec<Organization>, ApiError> {
        self.client.request(RequestSpec::get("v1/organizations"))
    }
}
