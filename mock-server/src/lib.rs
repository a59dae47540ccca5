//! In-memory imitation of the platform API, for integration tests and local
//! runs of the client.
//!
//! One organization (`acme`) with a single `owner` member is seeded at
//! startup. Every route requires the bearer key the router was built with.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const ORGANIZATION: &str = "acme";
pub const OWNER: &str = "owner";
pub const PRIMARY_REGION: &str = "ams";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Organization {
    pub name: String,
    pub slug: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub plan_id: String,
    pub overages: bool,
    pub blocked_reads: bool,
    pub blocked_writes: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
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
    #[serde(skip)]
    pub size_limit: String,
    /// Bumped on every key rotation; part of every token minted afterwards.
    #[serde(skip)]
    pub generation: u32,
}

#[derive(Deserialize)]
pub struct CreateDatabase {
    pub name: String,
    pub group: String,
    pub size_limit: Option<String>,
    #[serde(default)]
    pub is_schema: bool,
    pub schema: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Member {
    pub username: String,
    pub role: String,
    pub email: String,
}

#[derive(Deserialize, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Member,
}

impl Role {
    fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Member => "member",
        }
    }
}

#[derive(Deserialize)]
pub struct AddMember {
    pub username: String,
    pub role: Role,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiToken {
    pub name: String,
    pub id: String,
}

#[derive(Deserialize)]
pub struct DatabaseFilter {
    pub group: Option<String>,
    pub schema: Option<String>,
}

#[derive(Deserialize)]
pub struct TokenOptions {
    pub expiration: Option<String>,
    pub authorization: Option<String>,
}

pub struct Store {
    organizations: Vec<Organization>,
    /// Keyed by `(org, database name)`.
    databases: BTreeMap<(String, String), Database>,
    members: HashMap<String, Vec<Member>>,
    api_tokens: Vec<ApiToken>,
}

impl Store {
    fn seeded() -> Self {
        let organization = Organization {
            name: ORGANIZATION.to_string(),
            slug: ORGANIZATION.to_string(),
            kind: "team".to_string(),
            plan_id: "scaler".to_string(),
            overages: false,
            blocked_reads: false,
            blocked_writes: false,
        };
        let owner = Member {
            username: OWNER.to_string(),
            role: "owner".to_string(),
            email: format!("{OWNER}@example.com"),
        };
        Self {
            organizations: vec![organization],
            databases: BTreeMap::new(),
            members: HashMap::from([(ORGANIZATION.to_string(), vec![owner])]),
            api_tokens: Vec::new(),
        }
    }

    fn require_org(&self, org: &str) -> Result<(), MockError> {
        if self.organizations.iter().any(|o| o.slug == org) {
            Ok(())
        } else {
            Err(MockError::not_found(format!("organization {org} not found")))
        }
    }

    fn database(&self, org: &str, db: &str) -> Result<&Database, MockError> {
        self.require_org(org)?;
        self.databases
            .get(&(org.to_string(), db.to_string()))
            .ok_or_else(|| MockError::not_found(format!("database {db} not found")))
    }
}

#[derive(Clone)]
pub struct AppState {
    api_key: Arc<str>,
    store: Arc<RwLock<Store>>,
}

/// Error answer in the platform's `{"error": "..."}` shape.
pub struct MockError(StatusCode, String);

impl MockError {
    fn not_found(message: String) -> Self {
        Self(StatusCode::NOT_FOUND, message)
    }

    fn conflict(message: String) -> Self {
        Self(StatusCode::CONFLICT, message)
    }

    fn bad_request(message: String) -> Self {
        Self(StatusCode::BAD_REQUEST, message)
    }
}

impl IntoResponse for MockError {
    fn into_response(self) -> Response {
        (self.0, Json(json!({ "error": self.1 }))).into_response()
    }
}

type MockResult<T> = Result<Json<T>, MockError>;

pub fn app(api_key: &str) -> Router {
    let state = AppState {
        api_key: Arc::from(api_key),
        store: Arc::new(RwLock::new(Store::seeded())),
    };
    Router::new()
        .route("/", get(closest_region))
        .route("/v1/locations", get(list_locations))
        .route("/v1/auth/validate", get(validate_token))
        .route("/v1/auth/api-tokens", get(list_api_tokens))
        .route(
            "/v1/auth/api-tokens/{name}",
            post(create_api_token).delete(revoke_api_token),
        )
        .route("/v1/organizations", get(list_organizations))
        .route(
            "/v1/organizations/{org}/databases",
            get(list_databases).post(create_database),
        )
        .route(
            "/v1/organizations/{org}/databases/{db}",
            get(get_database).delete(delete_database),
        )
        .route(
            "/v1/organizations/{org}/databases/{db}/configuration",
            get(get_configuration),
        )
        .route(
            "/v1/organizations/{org}/databases/{db}/auth/tokens",
            post(create_database_token),
        )
        .route(
            "/v1/organizations/{org}/databases/{db}/auth/rotate",
            post(rotate_database_tokens),
        )
        .route(
            "/v1/organizations/{org}/databases/{db}/instances",
            get(list_instances),
        )
        .route(
            "/v1/organizations/{org}/members",
            get(list_members).post(add_member),
        )
        .route(
            "/v1/organizations/{org}/members/{username}",
            delete(remove_member),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_bearer))
        .with_state(state)
}

pub async fn run(listener: TcpListener, api_key: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(api_key)).await
}

async fn require_bearer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let expected = format!("Bearer {}", state.api_key);
    let presented = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    if presented != Some(expected.as_str()) {
        warn!("rejecting {} {}: bad credentials", request.method(), request.uri());
        return MockError(StatusCode::UNAUTHORIZED, "unauthorized".to_string()).into_response();
    }
    debug!("{} {}", request.method(), request.uri());
    next.run(request).await
}

// ---------------------------------------------------------------------------
// Locations
// ---------------------------------------------------------------------------

async fn closest_region() -> Json<Value> {
    Json(json!({ "server": PRIMARY_REGION, "client": PRIMARY_REGION }))
}

async fn list_locations() -> Json<Value> {
    Json(json!({
        "locations": {
            "ams": "Amsterdam, Netherlands",
            "fra": "Frankfurt, Germany",
            "iad": "Ashburn, Virginia (US)",
            "lhr": "London, United Kingdom",
        }
    }))
}

// ---------------------------------------------------------------------------
// API tokens
// ---------------------------------------------------------------------------

async fn validate_token() -> Json<Value> {
    Json(json!({ "exp": -1 }))
}

async fn list_api_tokens(State(state): State<AppState>) -> Json<Value> {
    let store = state.store.read().await;
    Json(json!({ "tokens": store.api_tokens }))
}

async fn create_api_token(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> MockResult<Value> {
    let mut store = state.store.write().await;
    if store.api_tokens.iter().any(|t| t.name == name) {
        return Err(MockError::conflict(format!("token {name} already exists")));
    }
    let token = ApiToken {
        name: name.clone(),
        id: Uuid::new_v4().to_string(),
    };
    let secret = format!("mock-api-token-{}", Uuid::new_v4());
    info!("created api token {name}");
    store.api_tokens.push(token.clone());
    Ok(Json(json!({ "name": token.name, "id": token.id, "token": secret })))
}

async fn revoke_api_token(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> MockResult<Value> {
    let mut store = state.store.write().await;
    let before = store.api_tokens.len();
    store.api_tokens.retain(|t| t.name != name);
    if store.api_tokens.len() == before {
        return Err(MockError::not_found(format!("token {name} not found")));
    }
    info!("revoked api token {name}");
    Ok(Json(json!({ "token": name })))
}

// ---------------------------------------------------------------------------
// Organizations
// ---------------------------------------------------------------------------

async fn list_organizations(State(state): State<AppState>) -> Json<Vec<Organization>> {
    Json(state.store.read().await.organizations.clone())
}

// ---------------------------------------------------------------------------
// Databases
// ---------------------------------------------------------------------------

async fn list_databases(
    State(state): State<AppState>,
    Path(org): Path<String>,
    Query(filter): Query<DatabaseFilter>,
) -> MockResult<Value> {
    let store = state.store.read().await;
    store.require_org(&org)?;
    let databases: Vec<&Database> = store
        .databases
        .iter()
        .filter(|((owner, _), _)| *owner == org)
        .map(|(_, db)| db)
        .filter(|db| filter.group.as_ref().map_or(true, |g| &db.group == g))
        .filter(|db| filter.schema.as_ref().map_or(true, |s| &db.schema == s))
        .collect();
    Ok(Json(json!({ "databases": databases })))
}

async fn create_database(
    State(state): State<AppState>,
    Path(org): Path<String>,
    Json(input): Json<CreateDatabase>,
) -> MockResult<Value> {
    let mut store = state.store.write().await;
    store.require_org(&org)?;
    let key = (org.clone(), input.name.clone());
    if store.databases.contains_key(&key) {
        return Err(MockError::conflict(format!("database {} already exists", input.name)));
    }

    let database = Database {
        hostname: format!("{}-{org}.turso.io", input.name),
        name: input.name,
        db_id: Uuid::new_v4().to_string(),
        block_reads: false,
        block_writes: false,
        allow_attach: false,
        regions: vec![PRIMARY_REGION.to_string()],
        primary_region: PRIMARY_REGION.to_string(),
        kind: "logical".to_string(),
        version: "0.24.0".to_string(),
        group: input.group,
        is_schema: input.is_schema,
        schema: input.schema.unwrap_or_default(),
        sleeping: false,
        size_limit: input.size_limit.unwrap_or_else(|| "0".to_string()),
        generation: 0,
    };
    info!("created database {} in {org}", database.name);
    let created = json!({
        "database": {
            "DbId": database.db_id,
            "Hostname": database.hostname,
            "Name": database.name,
        }
    });
    store.databases.insert(key, database);
    Ok(Json(created))
}

async fn get_database(
    State(state): State<AppState>,
    Path((org, db)): Path<(String, String)>,
) -> MockResult<Value> {
    let store = state.store.read().await;
    let database = store.database(&org, &db)?;
    Ok(Json(json!({ "database": database })))
}

async fn delete_database(
    State(state): State<AppState>,
    Path((org, db)): Path<(String, String)>,
) -> MockResult<Value> {
    let mut store = state.store.write().await;
    store.database(&org, &db)?;
    store.databases.remove(&(org.clone(), db.clone()));
    info!("deleted database {db} in {org}");
    Ok(Json(json!({ "database": db })))
}

async fn get_configuration(
    State(state): State<AppState>,
    Path((org, db)): Path<(String, String)>,
) -> MockResult<Value> {
    let store = state.store.read().await;
    let database = store.database(&org, &db)?;
    Ok(Json(json!({
        "configuration": {
            "size_limit": database.size_limit,
            "allow_attach": database.allow_attach,
            "block_reads": database.block_reads,
            "block_writes": database.block_writes,
        }
    })))
}

async fn create_database_token(
    State(state): State<AppState>,
    Path((org, db)): Path<(String, String)>,
    Query(options): Query<TokenOptions>,
    body: Bytes,
) -> MockResult<Value> {
    let store = state.store.read().await;
    let database = store.database(&org, &db)?;

    let authorization = options.authorization.as_deref().unwrap_or("full-access");
    if !matches!(authorization, "full-access" | "read-only") {
        return Err(MockError::bad_request(format!(
            "invalid authorization {authorization}"
        )));
    }
    let attach: Vec<String> = if body.is_empty() {
        Vec::new()
    } else {
        let body: Value = serde_json::from_slice(&body)
            .map_err(|e| MockError::bad_request(format!("invalid body: {e}")))?;
        body["permissions"]["read_attach"]["databases"]
            .as_array()
            .ok_or_else(|| MockError::bad_request("missing read_attach databases".to_string()))?
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect()
    };

    // Not a real JWT: the claims are spelled out so tests can read them back.
    let jwt = format!(
        "mock.{org}.{db}.g{}.{authorization}.{}.attach={}",
        database.generation,
        options.expiration.as_deref().unwrap_or("never"),
        attach.join(","),
    );
    Ok(Json(json!({ "jwt": jwt })))
}

async fn rotate_database_tokens(
    State(state): State<AppState>,
    Path((org, db)): Path<(String, String)>,
) -> Result<StatusCode, MockError> {
    let mut store = state.store.write().await;
    store.database(&org, &db)?;
    if let Some(database) = store.databases.get_mut(&(org.clone(), db.clone())) {
        database.generation += 1;
    }
    info!("rotated tokens for {db} in {org}");
    Ok(StatusCode::OK)
}

async fn list_instances(
    State(state): State<AppState>,
    Path((org, db)): Path<(String, String)>,
) -> MockResult<Value> {
    let store = state.store.read().await;
    let database = store.database(&org, &db)?;
    Ok(Json(json!({ "instances": database.regions })))
}

// ---------------------------------------------------------------------------
// Members
// ---------------------------------------------------------------------------

async fn list_members(
    State(state): State<AppState>,
    Path(org): Path<String>,
) -> MockResult<Value> {
    let store = state.store.read().await;
    store.require_org(&org)?;
    let members = store.members.get(&org).cloned().unwrap_or_default();
    Ok(Json(json!({ "members": members })))
}

async fn add_member(
    State(state): State<AppState>,
    Path(org): Path<String>,
    Json(input): Json<AddMember>,
) -> MockResult<Value> {
    let mut store = state.store.write().await;
    store.require_org(&org)?;
    let members = store.members.entry(org.clone()).or_default();
    if members.iter().any(|m| m.username == input.username) {
        return Err(MockError::conflict(format!(
            "{} is already a member",
            input.username
        )));
    }
    members.push(Member {
        username: input.username.clone(),
        role: input.role.as_str().to_string(),
        email: format!("{}@example.com", input.username),
    });
    info!("added {} to {org}", input.username);
    Ok(Json(json!({ "member": input.username, "role": input.role.as_str() })))
}

async fn remove_member(
    State(state): State<AppState>,
    Path((org, username)): Path<(String, String)>,
) -> MockResult<Value> {
    let mut store = state.store.write().await;
    store.require_org(&org)?;
    let members = store.members.entry(org.clone()).or_default();
    let Some(index) = members.iter().position(|m| m.username == username) else {
        return Err(MockError::not_found(format!("member {username} not found")));
    };
    if members[index].role == "owner" {
        return Err(MockError::bad_request("cannot remove the owner".to_string()));
    }
    members.remove(index);
    info!("removed {username} from {org}");
    Ok(Json(json!({ "member": username })))
}
