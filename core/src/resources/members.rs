use super::json_body;
use crate::client::TursoClient;
use crate::error::ApiError;
use crate::http::{RequestSpec, Transport};
use crate::types::{AddMember, AddedMember, MemberList, RemovedMember};

pub struct Members<'c, T> {
    client: &'c TursoClient<T>,
}

impl<'c, T: Transport> Members<'c, T> {
    pub(crate) fn new(client: &'c TursoClient<T>) -> Self {
        Self { client }
    }

    pub fn list(&self, org: &str) -> Result<MemberList, ApiError> {
        self.client
            .request(RequestSpec::get(format!("v1/organizations/{org}/members")))
    }

    /// Add an existing user to `org` with the given role.
    pub fn add(&self, org: &str, member: &AddMember) -> Result<AddedMember, ApiError> {
        let spec = RequestSpec::post(format!("v1/organizations/{org}/members"))
            .with_body(Some(json_body(member)?));
        self.client.request(spec)
    }

    pub fn remove(&self, org: &str, username: &str) -> Result<RemovedMember, ApiError> {
        self.client.request(RequestSpec::delete(format!(
            "v1/organizations/{org}/members/{username}"
        )))
    }
}
