use crate::error::Error;
use crate::transport::{ApiResponse, ResponseMeta, Transport};
use crate::types::{ListOptions, Origin, OriginRequest};

use super::Collection;

/// Upstream servers of a resource (`/v2/resources/{id}/origins`).
#[derive(Debug, Clone, Copy)]
pub struct Origins<'a> {
    items: Collection<'a>,
}

impl<'a> Origins<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self {
            items: Collection::new(transport, "origins"),
        }
    }

    pub async fn list(
        &self,
        resource_id: i64,
        opts: &ListOptions,
    ) -> Result<ApiResponse<Vec<Origin>>, Error> {
        self.items.list(resource_id, opts).await
    }

    pub async fn get(&self, resource_id: i64, origin_id: i64) -> Result<ApiResponse<Origin>, Error> {
        self.items.get(resource_id, origin_id).await
    }

    pub async fn create(
        &self,
        resource_id: i64,
        req: &OriginRequest,
    ) -> Result<ApiResponse<Origin>, Error> {
        self.items.create(resource_id, req).await
    }

    pub async fn update(
        &self,
        resource_id: i64,
        origin_id: i64,
        req: &OriginRequest,
    ) -> Result<ApiResponse<Origin>, Error> {
        self.items.update(resource_id, origin_id, req).await
    }

    pub async fn delete(&self, resource_id: i64, origin_id: i64) -> Result<ResponseMeta, Error> {
        self.items.delete(resource_id, origin_id).await
    }
}
