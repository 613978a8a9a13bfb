// Access lists of a resource. Black- and whitelists share the shape of
// their endpoints and differ only in path and payload field name.

use crate::error::Error;
use crate::transport::{ApiResponse, ResponseMeta, Transport};
use crate::types::{Blacklist, BlacklistRequest, ListOptions, Whitelist, WhitelistRequest};

use super::Collection;

/// Denied addresses (`/v2/resources/{id}/blacklists`).
#[derive(Debug, Clone, Copy)]
pub struct Blacklists<'a> {
    items: Collection<'a>,
}

impl<'a> Blacklists<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self {
            items: Collection::new(transport, "blacklists"),
        }
    }

    pub async fn list(
        &self,
        resource_id: i64,
        opts: &ListOptions,
    ) -> Result<ApiResponse<Vec<Blacklist>>, Error> {
        self.items.list(resource_id, opts).await
    }

    pub async fn get(&self, resource_id: i64, id: i64) -> Result<ApiResponse<Blacklist>, Error> {
        self.items.get(resource_id, id).await
    }

    pub async fn create(
        &self,
        resource_id: i64,
        req: &BlacklistRequest,
    ) -> Result<ApiResponse<Blacklist>, Error> {
        self.items.create(resource_id, req).await
    }

    pub async fn update(
        &self,
        resource_id: i64,
        id: i64,
        req: &BlacklistRequest,
    ) -> Result<ApiResponse<Blacklist>, Error> {
        self.items.update(resource_id, id, req).await
    }

    pub async fn delete(&self, resource_id: i64, id: i64) -> Result<ResponseMeta, Error> {
        self.items.delete(resource_id, id).await
    }
}

/// Addresses exempt from filtering (`/v2/resources/{id}/whitelists`).
#[derive(Debug, Clone, Copy)]
pub struct Whitelists<'a> {
    items: Collection<'a>,
}

impl<'a> Whitelists<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self {
            items: Collection::new(transport, "whitelists"),
        }
    }

    pub async fn list(
        &self,
        resource_id: i64,
        opts: &ListOptions,
    ) -> Result<ApiResponse<Vec<Whitelist>>, Error> {
        self.items.list(resource_id, opts).await
    }

    pub async fn get(&self, resource_id: i64, id: i64) -> Result<ApiResponse<Whitelist>, Error> {
        self.items.get(resource_id, id).await
    }

    pub async fn create(
        &self,
        resource_id: i64,
        req: &WhitelistRequest,
    ) -> Result<ApiResponse<Whitelist>, Error> {
        self.items.create(resource_id, req).await
    }

    pub async fn update(
        &self,
        resource_id: i64,
        id: i64,
        req: &WhitelistRequest,
    ) -> Result<ApiResponse<Whitelist>, Error> {
        self.items.update(resource_id, id, req).await
    }

    pub async fn delete(&self, resource_id: i64, id: i64) -> Result<ResponseMeta, Error> {
        self.items.delete(resource_id, id).await
    }
}
