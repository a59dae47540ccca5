use super::json_body;
use crate::client::TursoClient;
use crate::error::ApiError;
use crate::http::{RequestSpec, Transport};
use crate::query::build_query;
use crate::types::{
    ConfigurationEnvelope, CreateDatabase, CreateTokenBody, CreateTokenQuery,
    CreatedDatabaseEnvelope, DatabaseEnvelope, DatabaseList, DatabaseToken, DeletedDatabase,
    InstanceList,
};

/// Databases of an organization, and the tokens that open them.
pub struct Databases<'c, T> {
    client: &'c TursoClient<T>,
}

impl<'c, T: Transport> Databases<'c, T> {
    pub(crate) fn new(client: &'c TursoClient<T>) -> Self {
        Self { client }
    }

    /// List databases in `org`, optionally narrowed to one group and/or to
    /// the children of one schema database.
    pub fn list(
        &self,
        org: &str,
        group: Option<&str>,
        schema: Option<&str>,
    ) -> Result<DatabaseList, ApiError> {
        let query = build_query([("group", group), ("schema", schema)]);
        self.client
            .request(RequestSpec::get(format!("v1/organizations/{org}/databases")).with_query(query))
    }

    pub fn create(
        &self,
        org: &str,
        database: &CreateDatabase,
    ) -> Result<CreatedDatabaseEnvelope, ApiError> {
        let spec = RequestSpec::post(format!("v1/organizations/{org}/databases"))
            .with_body(Some(json_body(database)?));
        self.client.request(spec)
    }

    pub fn retrieve(&self, org: &str, db: &str) -> Result<DatabaseEnvelope, ApiError> {
        self.client
            .request(RequestSpec::get(database_path(org, db)))
    }

    pub fn retrieve_configuration(
        &self,
        org: &str,
        db: &str,
    ) -> Result<ConfigurationEnvelope, ApiError> {
        self.client.request(RequestSpec::get(format!(
            "{}/configuration",
            database_path(org, db)
        )))
    }

    pub fn delete(&self, org: &str, db: &str) -> Result<DeletedDatabase, ApiError> {
        self.client
            .request(RequestSpec::delete(database_path(org, db)))
    }

    /// Mint a JWT for connecting to `db`.
    ///
    /// Only the query options that are set end up in the query string; a
    /// missing body sends no payload at all.
    pub fn create_token(
        &self,
        org: &str,
        db: &str,
        query: Option<&CreateTokenQuery>,
        body: Option<&CreateTokenBody>,
    ) -> Result<DatabaseToken, ApiError> {
        let query = query.and_then(|q| {
            build_query([
                ("expiration", q.expiration.as_deref()),
                ("authorization", q.authorization.as_ref().map(|a| a.as_str())),
            ])
        });
        let body = body.map(json_body).transpose()?;

        let spec = RequestSpec::post(format!("{}/auth/tokens", database_path(org, db)))
            .with_query(query)
            .with_body(body);
        self.client.request(spec)
    }

    /// Rotate the signing key of `db`, invalidating every token issued so far.
    pub fn invalidate_token(&self, org: &str, db: &str) -> Result<(), ApiError> {
        self.client.request_empty(RequestSpec::post(format!(
            "{}/auth/rotate",
            database_path(org, db)
        )))
    }

    pub fn list_instances(&self, org: &str, db: &str) -> Result<InstanceList, ApiError> {
        self.client.request(RequestSpec::get(format!(
            "{}/instances",
            database_path(org, db)
        )))
    }
}

fn database_path(org: &str, db: &str) -> String {
    format!("v1/organizations/{org}/databases/{db}")
}
