//! Resource groups: thin façades mapping typed arguments onto `RequestSpec`s.
//!
//! Each group borrows the client, issues exactly one request per method and
//! keeps no state of its own.

mod databases;
mod locations;
mod members;
mod organizations;
mod tokens;

pub use databases::Databases;
pub use locations::Locations;
pub use members::Members;
pub use organizations::Organizations;
pub use tokens::ApiTokens;

use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;

fn json_body<B: Serialize>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(ApiError::Serialization)
}
