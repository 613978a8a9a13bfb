// Typed service façades over the transport.
//
// Every sub-resource service (aliases, origins, headers, black/whitelists)
// is the same five operations on `/v2/resources/{id}/{kind}`, so they share
// `Collection`. Create and update always run `Validate` before the payload
// is handed to the transport.

mod aliases;
mod headers;
mod lists;
mod origins;
mod resources;
mod status;

pub use aliases::Aliases;
pub use headers::Headers;
pub use lists::{Blacklists, Whitelists};
pub use origins::Origins;
pub use resources::Resources;
pub use status::Services;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::Error;
use crate::transport::{ApiResponse, ResponseMeta, Transport};
use crate::types::ListOptions;
use crate::validate::Validate;

pub(crate) const RESOURCES_PATH: &str = "/v2/resources";

/// One kind of item scoped under a resource.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Collection<'a> {
    transport: &'a Transport,
    kind: &'static str,
}

impl<'a> Collection<'a> {
    pub(crate) fn new(transport: &'a Transport, kind: &'static str) -> Self {
        Self { transport, kind }
    }

    fn path(&self, resource_id: i64) -> String {
        format!("{RESOURCES_PATH}/{resource_id}/{}", self.kind)
    }

    fn item_path(&self, resource_id: i64, id: i64) -> String {
        format!("{}/{id}", self.path(resource_id))
    }

    pub(crate) async fn list<T: DeserializeOwned>(
        &self,
        resource_id: i64,
        opts: &ListOptions,
    ) -> Result<ApiResponse<Vec<T>>, Error> {
        self.transport
            .get(&self.path(resource_id), &opts.to_query())
            .await
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        resource_id: i64,
        id: i64,
    ) -> Result<ApiResponse<T>, Error> {
        self.transport
            .get(&self.item_path(resource_id, id), &[])
            .await
    }

    pub(crate) async fn create<T, B>(
        &self,
        resource_id: i64,
        body: &B,
    ) -> Result<ApiResponse<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize + Validate,
    {
        body.validate()?;
        debug!(kind = self.kind, resource_id, "creating item");
        self.transport.post(&self.path(resource_id), body).await
    }

    pub(crate) async fn update<T, B>(
        &self,
        resource_id: i64,
        id: i64,
        body: &B,
    ) -> Result<ApiResponse<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize + Validate,
    {
        body.validate()?;
        debug!(kind = self.kind, resource_id, id, "updating item");
        self.transport
            .patch(&self.item_path(resource_id, id), body)
            .await
    }

    pub(crate) async fn delete(&self, resource_id: i64, id: i64) -> Result<ResponseMeta, Error> {
        debug!(kind = self.kind, resource_id, id, "deleting item");
        self.transport
            .delete(&self.item_path(resource_id, id))
            .await
    }
}
