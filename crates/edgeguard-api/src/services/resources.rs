use tracing::debug;

use crate::error::Error;
use crate::transport::{ApiResponse, ResponseMeta, Transport};
use crate::types::{
    DnsCheck, ListOptions, Resource, ResourceCreateRequest, ResourceList, ResourceListOptions,
    ResourceUpdateRequest,
};
use crate::validate::Validate;

use super::RESOURCES_PATH;

/// Page size used while scanning for a resource name.
const FIND_PAGE_SIZE: u32 = 100;

/// Protected resources (`/v2/resources`).
#[derive(Debug, Clone, Copy)]
pub struct Resources<'a> {
    transport: &'a Transport,
}

impl<'a> Resources<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    fn item_path(id: i64) -> String {
        format!("{RESOURCES_PATH}/{id}")
    }

    /// One page of resources in server order.
    pub async fn list(
        &self,
        opts: &ResourceListOptions,
    ) -> Result<ApiResponse<Vec<Resource>>, Error> {
        let resp: ApiResponse<ResourceList> =
            self.transport.get(RESOURCES_PATH, &opts.to_query()).await?;
        Ok(resp.map(|page| page.results))
    }

    pub async fn get(&self, id: i64) -> Result<ApiResponse<Resource>, Error> {
        self.transport.get(&Self::item_path(id), &[]).await
    }

    pub async fn create(
        &self,
        req: &ResourceCreateRequest,
    ) -> Result<ApiResponse<Resource>, Error> {
        req.validate()?;
        debug!(name = %req.name, "creating resource");
        self.transport.post(RESOURCES_PATH, req).await
    }

    pub async fn update(
        &self,
        id: i64,
        req: &ResourceUpdateRequest,
    ) -> Result<ApiResponse<Resource>, Error> {
        req.validate()?;
        debug!(id, "updating resource");
        self.transport.patch(&Self::item_path(id), req).await
    }

    pub async fn delete(&self, id: i64) -> Result<ResponseMeta, Error> {
        debug!(id, "deleting resource");
        self.transport.delete(&Self::item_path(id)).await
    }

    /// Current A records of the resource and whether they already point
    /// into the protection network.
    pub async fn dns_check(&self, id: i64) -> Result<ApiResponse<DnsCheck>, Error> {
        self.transport
            .get(&format!("{}/dns-check", Self::item_path(id)), &[])
            .await
    }

    /// Apply the resource rules to an already fetched resource.
    #[allow(clippy::unused_self)]
    pub fn validate(&self, resource: &Resource) -> Result<(), Error> {
        resource.validate()
    }

    /// Resolve a resource by exact name.
    ///
    /// The server's `name` filter may match substrings, so every page of
    /// hits is scanned for exact matches.
    pub async fn find_by_name(&self, name: &str) -> Result<Resource, Error> {
        let mut opts = ResourceListOptions {
            name: Some(name.to_owned()),
            page: ListOptions::new(FIND_PAGE_SIZE, 0),
            ..ResourceListOptions::default()
        };
        let mut matches: Vec<Resource> = Vec::new();

        loop {
            let page: ResourceList = self
                .transport
                .get(RESOURCES_PATH, &opts.to_query())
                .await?
                .into_inner();
            let fetched = u32::try_from(page.results.len()).unwrap_or(u32::MAX);
            matches.extend(page.results.into_iter().filter(|r| r.name == name));

            opts.page.offset = opts.page.offset.saturating_add(fetched);
            let exhausted = page.count > 0 && u64::from(opts.page.offset) >= page.count;
            if fetched < FIND_PAGE_SIZE || exhausted {
                break;
            }
            debug!(name, offset = opts.page.offset, "scanning next page of resources");
        }

        match matches.len() {
            0 => Err(Error::ResourceNotFound {
                name: name.to_owned(),
            }),
            1 => Ok(matches.remove(0)),
            count => Err(Error::AmbiguousResourceName {
                name: name.to_owned(),
                count,
            }),
        }
    }
}
