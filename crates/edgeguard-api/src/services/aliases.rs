use crate::error::Error;
use crate::transport::{ApiResponse, ResponseMeta, Transport};
use crate::types::{Alias, AliasCreateRequest, AliasUpdateRequest, ListOptions};

use super::Collection;

/// Additional hostnames of a resource (`/v2/resources/{id}/aliases`).
#[derive(Debug, Clone, Copy)]
pub struct Aliases<'a> {
    items: Collection<'a>,
}

impl<'a> Aliases<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self {
            items: Collection::new(transport, "aliases"),
        }
    }

    pub async fn list(
        &self,
        resource_id: i64,
        opts: &ListOptions,
    ) -> Result<ApiResponse<Vec<Alias>>, Error> {
        self.items.list(resource_id, opts).await
    }

    pub async fn get(&self, resource_id: i64, alias_id: i64) -> Result<ApiResponse<Alias>, Error> {
        self.items.get(resource_id, alias_id).await
    }

    pub async fn create(
        &self,
        resource_id: i64,
        req: &AliasCreateRequest,
    ) -> Result<ApiResponse<Alias>, Error> {
        self.items.create(resource_id, req).await
    }

    /// Only the certificate settings of an alias can change.
    pub async fn update(
        &self,
        resource_id: i64,
        alias_id: i64,
        req: &AliasUpdateRequest,
    ) -> Result<ApiResponse<Alias>, Error> {
        self.items.update(resource_id, alias_id, req).await
    }

    pub async fn delete(&self, resource_id: i64, alias_id: i64) -> Result<ResponseMeta, Error> {
        self.items.delete(resource_id, alias_id).await
    }
}
