use crate::error::Error;
use crate::transport::{ApiResponse, ResponseMeta, Transport};
use crate::types::{Header, HeaderRequest, ListOptions};

use super::Collection;

/// Headers added to requests forwarded to the origins
/// (`/v2/resources/{id}/headers`).
#[derive(Debug, Clone, Copy)]
pub struct Headers<'a> {
    items: Collection<'a>,
}

impl<'a> Headers<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self {
            items: Collection::new(transport, "headers"),
        }
    }

    pub async fn list(
        &self,
        resource_id: i64,
        opts: &ListOptions,
    ) -> Result<ApiResponse<Vec<Header>>, Error> {
        self.items.list(resource_id, opts).await
    }

    pub async fn get(&self, resource_id: i64, header_id: i64) -> Result<ApiResponse<Header>, Error> {
        self.items.get(resource_id, header_id).await
    }

    pub async fn create(
        &self,
        resource_id: i64,
        req: &HeaderRequest,
    ) -> Result<ApiResponse<Header>, Error> {
        self.items.create(resource_id, req).await
    }

    pub async fn update(
        &self,
        resource_id: i64,
        header_id: i64,
        req: &HeaderRequest,
    ) -> Result<ApiResponse<Header>, Error> {
        self.items.update(resource_id, header_id, req).await
    }

    pub async fn delete(&self, resource_id: i64, header_id: i64) -> Result<ResponseMeta, Error> {
        self.items.delete(resource_id, header_id).await
    }
}
