//! Request and response DTOs for the platform API.
//!
//! # Design
//! Field names follow the wire format, including the platform's mixed
//! casing (`Name`, `DbId`, `primaryRegion`); serde renames keep the Rust side
//! snake_case. Optional request fields are skipped when absent so the server
//! never sees explicit nulls. Responses are only JSON-decoded, never
//! validated further.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// API tokens
// ---------------------------------------------------------------------------

/// A freshly minted platform API token. `token` is only shown once.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedApiToken {
    pub name: String,
    pub id: String,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenValidation {
    /// Expiry as a unix timestamp; `-1` for tokens that never expire.
    pub exp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiToken {
    pub name: String,
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiTokenList {
    pub tokens: Vec<ApiToken>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RevokedApiToken {
    pub token: String,
}

// ---------------------------------------------------------------------------
// Databases
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Database {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "DbId")]
    pub db_id: String,
    #[serde(rename = "Hostname")]
    pub hostname: String,
    pub block_reads: bool,
    pub block_writes: bool,
    pub allow_attach: bool,
    pub regions: Vec<String>,
    #[serde(rename = "primaryRegion")]
    pub primary_region: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub version: String,
    pub group: String,
    pub is_schema: bool,
    pub schema: String,
    pub sleeping: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatabaseList {
    pub databases: Vec<Database>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatabaseEnvelope {
    pub database: Database,
}

/// Where a new database takes its initial contents from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SeedType {
    Database,
    Dump,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatabaseSeed {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<SeedType>,
    /// Source database name when seeding from a database.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Dump location when seeding from a dump.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Point-in-time to restore the source database at.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Request payload for creating a database.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateDatabase {
    pub name: String,
    pub group: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<DatabaseSeed>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_limit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_schema: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
}

impl CreateDatabase {
    pub fn new(name: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: group.into(),
            seed: None,
            size_limit: None,
            is_schema: None,
            schema: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedDatabase {
    #[serde(rename = "DbId")]
    pub db_id: String,
    #[serde(rename = "Hostname")]
    pub hostname: String,
    #[serde(rename = "Name")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedDatabaseEnvelope {
    pub database: CreatedDatabase,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DatabaseConfiguration {
    pub size_limit: String,
    pub allow_attach: bool,
    pub block_reads: bool,
    pub block_writes: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfigurationEnvelope {
    pub configuration: DatabaseConfiguration,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeletedDatabase {
    pub database: String,
}

/// Access level granted by a database token.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TokenAuthorization {
    #[serde(rename = "full-access")]
    FullAccess,
    #[serde(rename = "read-only")]
    ReadOnly,
}

impl TokenAuthorization {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenAuthorization::FullAccess => "full-access",
            TokenAuthorization::ReadOnly => "read-only",
        }
    }
}

/// Query options for minting a database token. Unset fields are not sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateTokenQuery {
    /// Lifetime such as `1h` or `2w`; the platform default is no expiry.
    pub expiration: Option<String>,
    pub authorization: Option<TokenAuthorization>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReadAttach {
    pub databases: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenPermissions {
    pub read_attach: ReadAttach,
}

/// Extra permissions embedded in a database token.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateTokenBody {
    pub permissions: TokenPermissions,
}

impl CreateTokenBody {
    /// Allow the token to `ATTACH` the named databases read-only.
    pub fn read_attach<I, S>(databases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            permissions: TokenPermissions {
                read_attach: ReadAttach {
                    databases: databases.into_iter().map(Into::into).collect(),
                },
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatabaseToken {
    pub jwt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstanceList {
    pub instances: Vec<String>,
}

// ---------------------------------------------------------------------------
// Locations
// ---------------------------------------------------------------------------

/// Location code to human readable name, e.g. `ams` -> `Amsterdam, Netherlands`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Locations {
    pub locations: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClosestRegion {
    pub server: String,
    pub client: String,
}

// ---------------------------------------------------------------------------
// Organizations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentFailingSince {
    #[serde(rename = "Time")]
    pub time: String,
    #[serde(rename = "Valid")]
    pub valid: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Organization {
    pub name: String,
    pub slug: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<String>,
    #[serde(default)]
    pub overages: bool,
    #[serde(default)]
    pub blocked_reads: bool,
    #[serde(default)]
    pub blocked_writes: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_timeline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_failing_since: Option<PaymentFailingSince>,
}

// ---------------------------------------------------------------------------
// Members
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Member {
    pub username: String,
    pub role: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemberList {
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Admin,
    Member,
}

/// Request payload for adding an existing user to an organization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddMember {
    pub username: String,
    pub role: MemberRole,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddedMember {
    pub member: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemovedMember {
    pub member: String,
}
