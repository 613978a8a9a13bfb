use crate::error::Error;
use crate::transport::{ApiResponse, Transport};
use crate::types::{InfrastructureProtectionDetails, WebProtectionDetails};

const WEB_PROTECTION_PATH: &str = "/v1/web-protection/client-info";
const INFRASTRUCTURE_PROTECTION_PATH: &str = "/v1/infrastructure-protection/client-info";

/// Subscription status of the authenticated client.
#[derive(Debug, Clone, Copy)]
pub struct Services<'a> {
    transport: &'a Transport,
}

impl<'a> Services<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    pub async fn web_protection(&self) -> Result<ApiResponse<WebProtectionDetails>, Error> {
        self.transport.get(WEB_PROTECTION_PATH, &[]).await
    }

    pub async fn infrastructure_protection(
        &self,
    ) -> Result<ApiResponse<InfrastructureProtectionDetails>, Error> {
        self.transport.get(INFRASTRUCTURE_PROTECTION_PATH, &[]).await
    }
}
