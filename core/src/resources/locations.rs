use crate::client::TursoClient;
use crate::error::ApiError;
use crate::http::{RequestSpec, Transport};
use crate::types::{ClosestRegion, Locations as LocationMap};

pub struct Locations<'c, T> {
    client: &'c TursoClient<T>,
}

impl<'c, T: Transport> Locations<'c, T> {
    pub(crate) fn new(client: &'c TursoClient<T>) -> Self {
        Self { client }
    }

    /// Every location a database can be placed in.
    pub fn list(&self) -> Result<LocationMap, ApiError> {
        self.client.request(RequestSpec::get("v1/locations"))
    }

    /// Region closest to the caller, answered by the region host root.
    pub fn closest(&self) -> Result<ClosestRegion, ApiError> {
        self.client.request(RequestSpec::get("").on_region_host())
    }
}
