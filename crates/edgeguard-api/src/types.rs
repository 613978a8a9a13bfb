//! Wire types for the protection API (`/v2/resources`, `/v1/*/client-info`).
//!
//! Field names are the wire contract and are kept verbatim (snake_case on
//! the wire, so no `rename_all`). Entity structs tolerate missing or null
//! fields; request structs omit every unset optional field.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Error;
use crate::validate::{
    self, MAX_COMMENT_LEN, MAX_GEOIP_MODE, MAX_HEADER_KEY_LEN, MAX_HEADER_VALUE_LEN,
    MAX_NAME_LEN, OriginMode, SslType, TlsVersion, Validate,
};

/// Decode `null` as `T::default()`.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ── Pagination ───────────────────────────────────────────────────────

/// `limit`/`offset` for list endpoints. Zero means "not set" and is omitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub limit: u32,
    pub offset: u32,
}

impl ListOptions {
    pub fn new(limit: u32, offset: u32) -> Self {
        Self { limit, offset }
    }

    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if self.limit > 0 {
            query.push(("limit", self.limit.to_string()));
        }
        if self.offset > 0 {
            query.push(("offset", self.offset.to_string()));
        }
        query
    }
}

/// Filters accepted by `GET /v2/resources`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceListOptions {
    pub page: ListOptions,
    /// Sort key, e.g. `name` or `-created`.
    pub ordering: Option<String>,
    pub client: Option<i64>,
    pub name: Option<String>,
    pub active: Option<bool>,
    pub feature_multiple_origins: Option<bool>,
    pub feature_wildcard_aliases: Option<bool>,
    pub service_ip: Option<String>,
    pub origin_ip: Option<String>,
    pub status: Option<String>,
    pub created_gte: Option<String>,
    pub created_lte: Option<String>,
    pub updated_gte: Option<String>,
    pub updated_lte: Option<String>,
}

impl ResourceListOptions {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = self.page.to_query();

        let strings = [
            ("ordering", &self.ordering),
            ("name", &self.name),
            ("service_ip", &self.service_ip),
            ("origin_ip", &self.origin_ip),
            ("status", &self.status),
            ("created_gte", &self.created_gte),
            ("created_lte", &self.created_lte),
            ("updated_gte", &self.updated_gte),
            ("updated_lte", &self.updated_lte),
        ];
        for (key, value) in strings {
            if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
                query.push((key, v.to_owned()));
            }
        }

        if let Some(client) = self.client {
            query.push(("client", client.to_string()));
        }

        let flags = [
            ("active", self.active),
            ("feature_multiple_origins", self.feature_multiple_origins),
            ("feature_wildcard_aliases", self.feature_wildcard_aliases),
        ];
        for (key, value) in flags {
            if let Some(v) = value {
                query.push((key, v.to_string()));
            }
        }

        query
    }
}

// ── Resources ────────────────────────────────────────────────────────

/// Protected resource — from `GET /v2/resources/{id}`.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resource {
    #[serde(deserialize_with = "null_default")]
    pub id: i64,
    /// ISO 8601 date-time.
    pub created: Option<String>,
    /// ISO 8601 date-time.
    pub updated: Option<String>,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    /// Owning client account.
    #[serde(deserialize_with = "null_default")]
    pub client: i64,
    #[serde(deserialize_with = "null_default")]
    pub active: bool,
    #[serde(deserialize_with = "null_default")]
    pub enabled: bool,
    #[serde(deserialize_with = "null_default")]
    pub is_waf_enabled: bool,
    #[serde(deserialize_with = "null_default")]
    pub is_redirect_to_https_enabled: bool,
    /// Provisioning state, e.g. `active` or `suspended`.
    pub status: Option<String>,
    pub service_ip: Option<String>,
    #[serde(deserialize_with = "null_default")]
    pub service_https2http: u8,
    #[serde(deserialize_with = "null_default")]
    pub service_iphash: u8,
    /// 0 disabled, 1 allow-list, 2 deny-list.
    #[serde(deserialize_with = "null_default")]
    pub service_geoip_mode: u8,
    /// Comma-separated ISO country codes.
    pub service_geoip_list: Option<String>,
    #[serde(deserialize_with = "null_default")]
    pub service_wwwredir: u8,
    #[serde(deserialize_with = "null_default")]
    pub feature_multiple_origins: bool,
    #[serde(deserialize_with = "null_default")]
    pub feature_wildcard_aliases: bool,
    pub ssl_type: Option<String>,
    /// Unix timestamp.
    pub service_ssl_expire: Option<u64>,
    pub service_ssl_status: Option<String>,
    #[serde(deserialize_with = "null_default")]
    pub tls_enabled: Vec<String>,
    pub wait_for_le: Option<u64>,
}

/// Envelope of `GET /v2/resources`.
#[derive(Debug, Deserialize)]
pub(crate) struct ResourceList {
    #[serde(default, deserialize_with = "null_default")]
    pub count: u64,
    #[serde(default, deserialize_with = "null_default")]
    pub results: Vec<Resource>,
}

/// Body of `POST /v2/resources`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceCreateRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_multiple_origins: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_wildcard_aliases: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_redirect_to_https_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_https2http: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_iphash: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_geoip_mode: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_geoip_list: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_wwwredir: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_enabled: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_type: Option<String>,
    /// PEM certificate, required by the server when `ssl_type` is `custom`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_cert: Option<String>,
    /// PEM private key matching `ssl_cert`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_waf_enabled: Option<bool>,
}

impl ResourceCreateRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Body of `PATCH /v2/resources/{id}`. Only the fields set are changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_multiple_origins: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_wildcard_aliases: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_redirect_to_https_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_https2http: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_iphash: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_geoip_mode: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_geoip_list: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_wwwredir: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_enabled: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_cert: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_waf_enabled: Option<bool>,
}

/// DNS state of a resource — from `GET /v2/resources/{id}/dns-check`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsCheck {
    /// A records currently served for the resource name.
    #[serde(rename = "A", default, deserialize_with = "null_default")]
    pub a: Vec<String>,
    /// Whether the name already resolves into the protection network.
    #[serde(default, deserialize_with = "null_default")]
    pub is_in_network: bool,
}

/// Borrowed view over the resource fields that carry validation rules.
struct ResourceFields<'a> {
    name: Option<&'a str>,
    ssl_type: Option<&'a str>,
    service_https2http: Option<u8>,
    service_iphash: Option<u8>,
    service_geoip_mode: Option<u8>,
    service_wwwredir: Option<u8>,
    tls_enabled: Option<&'a [String]>,
}

impl ResourceFields<'_> {
    fn check(&self) -> Result<(), Error> {
        validate::opt(self.name, |name| {
            validate::not_empty("name", name)?;
            validate::max_len("name", name, MAX_NAME_LEN)
        })?;
        validate::opt(self.ssl_type, |t| validate::one_of::<SslType>("ssl_type", t))?;
        validate::opt(self.service_https2http.as_ref(), |v| {
            validate::flag("service_https2http", *v, 1)
        })?;
        validate::opt(self.service_iphash.as_ref(), |v| {
            validate::flag("service_iphash", *v, 1)
        })?;
        validate::opt(self.service_geoip_mode.as_ref(), |v| {
            validate::flag("service_geoip_mode", *v, MAX_GEOIP_MODE)
        })?;
        validate::opt(self.service_wwwredir.as_ref(), |v| {
            validate::flag("service_wwwredir", *v, 1)
        })?;
        validate::opt(self.tls_enabled, |versions| {
            versions
                .iter()
                .try_for_each(|v| validate::one_of::<TlsVersion>("tls_enabled", v))
        })
    }
}

impl Validate for Resource {
    fn validate(&self) -> Result<(), Error> {
        ResourceFields {
            name: Some(self.name.as_str()),
            ssl_type: self.ssl_type.as_deref().filter(|t| !t.is_empty()),
            service_https2http: Some(self.service_https2http),
            service_iphash: Some(self.service_iphash),
            service_geoip_mode: Some(self.service_geoip_mode),
            service_wwwredir: Some(self.service_wwwredir),
            tls_enabled: Some(self.tls_enabled.as_slice()),
        }
        .check()
    }
}

impl Validate for ResourceCreateRequest {
    fn validate(&self) -> Result<(), Error> {
        ResourceFields {
            name: Some(self.name.as_str()),
            ssl_type: self.ssl_type.as_deref(),
            service_https2http: self.service_https2http,
            service_iphash: self.service_iphash,
            service_geoip_mode: self.service_geoip_mode,
            service_wwwredir: self.service_wwwredir,
            tls_enabled: self.tls_enabled.as_deref(),
        }
        .check()
    }
}

impl Validate for ResourceUpdateRequest {
    fn validate(&self) -> Result<(), Error> {
        ResourceFields {
            name: self.name.as_deref(),
            ssl_type: self.ssl_type.as_deref(),
            service_https2http: self.service_https2http,
            service_iphash: self.service_iphash,
            service_geoip_mode: self.service_geoip_mode,
            service_wwwredir: self.service_wwwredir,
            tls_enabled: self.tls_enabled.as_deref(),
        }
        .check()
    }
}

// ── Aliases ──────────────────────────────────────────────────────────

/// Additional hostname served by a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Alias {
    #[serde(deserialize_with = "null_default")]
    pub id: i64,
    pub alias_created: Option<String>,
    pub alias_updated: Option<String>,
    /// The alias hostname.
    #[serde(deserialize_with = "null_default")]
    pub alias_data: String,
    pub alias_ssl_expire: Option<i64>,
    pub alias_ssl_status: Option<i64>,
    pub alias_ssl_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasCreateRequest {
    pub alias_data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias_ssl_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias_ssl_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias_ssl_crt: Option<String>,
}

impl AliasCreateRequest {
    pub fn new(alias_data: impl Into<String>) -> Self {
        Self {
            alias_data: alias_data.into(),
            ..Self::default()
        }
    }
}

/// The hostname of an alias is immutable; only its certificate can change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias_ssl_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias_ssl_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias_ssl_crt: Option<String>,
}

impl Validate for AliasCreateRequest {
    fn validate(&self) -> Result<(), Error> {
        validate::not_empty("alias_data", &self.alias_data)?;
        validate::max_len("alias_data", &self.alias_data, MAX_NAME_LEN)?;
        validate::opt(self.alias_ssl_type.as_deref(), |t| {
            validate::one_of::<SslType>("alias_ssl_type", t)
        })
    }
}

impl Validate for AliasUpdateRequest {
    fn validate(&self) -> Result<(), Error> {
        validate::opt(self.alias_ssl_type.as_deref(), |t| {
            validate::one_of::<SslType>("alias_ssl_type", t)
        })
    }
}

// ── Origins ──────────────────────────────────────────────────────────

/// Upstream server a resource forwards cleaned traffic to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Origin {
    #[serde(deserialize_with = "null_default")]
    pub id: i64,
    /// Host or IP, optionally with port.
    #[serde(deserialize_with = "null_default")]
    pub origin_data: String,
    /// `primary` or `backup`.
    #[serde(deserialize_with = "null_default")]
    pub origin_mode: String,
    #[serde(deserialize_with = "null_default")]
    pub origin_weight: i32,
    #[serde(deserialize_with = "null_default")]
    pub origin_max_fails: i32,
    /// Seconds.
    #[serde(deserialize_with = "null_default")]
    pub origin_fail_timeout: i32,
    pub origin_comment: Option<String>,
}

/// Body of origin create and update calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginRequest {
    pub origin_data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_weight: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_max_fails: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_fail_timeout: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_comment: Option<String>,
}

impl OriginRequest {
    pub fn new(origin_data: impl Into<String>) -> Self {
        Self {
            origin_data: origin_data.into(),
            ..Self::default()
        }
    }
}

impl Validate for OriginRequest {
    fn validate(&self) -> Result<(), Error> {
        validate::not_empty("origin_data", &self.origin_data)?;
        validate::opt(self.origin_mode.as_deref(), |m| {
            validate::one_of::<OriginMode>("origin_mode", m)
        })?;
        validate::opt(self.origin_comment.as_deref(), |c| {
            validate::max_len("origin_comment", c, MAX_COMMENT_LEN)
        })
    }
}

// ── Headers ──────────────────────────────────────────────────────────

/// Extra HTTP header added to requests forwarded to the origins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Header {
    #[serde(deserialize_with = "null_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_default")]
    pub header_key: String,
    #[serde(deserialize_with = "null_default")]
    pub header_value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderRequest {
    pub header_key: String,
    pub header_value: String,
}

impl HeaderRequest {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            header_key: key.into(),
            header_value: value.into(),
        }
    }
}

impl Validate for HeaderRequest {
    fn validate(&self) -> Result<(), Error> {
        validate::not_empty("header_key", &self.header_key)?;
        validate::max_len("header_key", &self.header_key, MAX_HEADER_KEY_LEN)?;
        validate::max_len("header_value", &self.header_value, MAX_HEADER_VALUE_LEN)
    }
}

// ── Black/whitelists ─────────────────────────────────────────────────

/// Address or network denied access to a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Blacklist {
    #[serde(deserialize_with = "null_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_default")]
    pub blacklist_data: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlacklistRequest {
    pub blacklist_data: String,
}

impl BlacklistRequest {
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            blacklist_data: data.into(),
        }
    }
}

impl Validate for BlacklistRequest {
    fn validate(&self) -> Result<(), Error> {
        validate::not_empty("blacklist_data", &self.blacklist_data)
    }
}

/// Address or network that bypasses filtering for a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Whitelist {
    #[serde(deserialize_with = "null_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_default")]
    pub whitelist_data: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhitelistRequest {
    pub whitelist_data: String,
}

impl WhitelistRequest {
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            whitelist_data: data.into(),
        }
    }
}

impl Validate for WhitelistRequest {
    fn validate(&self) -> Result<(), Error> {
        validate::not_empty("whitelist_data", &self.whitelist_data)
    }
}

// ── Client info ──────────────────────────────────────────────────────

/// Web protection subscription — from `GET /v1/web-protection/client-info`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebProtectionDetails {
    #[serde(deserialize_with = "null_default")]
    pub ddos_type: i32,
    #[serde(deserialize_with = "null_default")]
    pub is_waf_enabled: bool,
    #[serde(deserialize_with = "null_default")]
    pub is_antibot_enabled: bool,
}

/// Infrastructure protection subscription —
/// from `GET /v1/infrastructure-protection/client-info`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfrastructureProtectionDetails {
    #[serde(deserialize_with = "null_default")]
    pub have_bill: bool,
    #[serde(deserialize_with = "null_default")]
    pub accessible_client_ids: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn zero_paging_is_omitted() {
        assert!(ListOptions::default().to_query().is_empty());
        assert_eq!(
            ListOptions::new(20, 40).to_query(),
            vec![("limit", "20".to_owned()), ("offset", "40".to_owned())]
        );
        assert_eq!(
            ListOptions::new(0, 10).to_query(),
            vec![("offset", "10".to_owned())]
        );
    }

    #[test]
    fn resource_filters_map_to_query() {
        let opts = ResourceListOptions {
            name: Some("example.com".into()),
            client: Some(7),
            active: Some(false),
            ordering: Some(String::new()),
            ..ResourceListOptions::default()
        };
        assert_eq!(
            opts.to_query(),
            vec![
                ("name", "example.com".to_owned()),
                ("client", "7".to_owned()),
                ("active", "false".to_owned()),
            ]
        );
    }

    #[test]
    fn create_request_omits_unset_fields() {
        let req = ResourceCreateRequest {
            ssl_cert: Some("CERT".into()),
            ssl_key: Some("KEY".into()),
            ssl_type: Some("custom".into()),
            ..ResourceCreateRequest::new("example.com")
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "name": "example.com",
                "ssl_type": "custom",
                "ssl_cert": "CERT",
                "ssl_key": "KEY",
            })
        );
    }

    #[test]
    fn resource_tolerates_nulls() {
        let resource: Resource = serde_json::from_value(json!({
            "id": 10,
            "name": "example.com",
            "status": null,
            "tls_enabled": null,
            "service_geoip_mode": 2,
        }))
        .unwrap();
        assert_eq!(resource.id, 10);
        assert!(resource.tls_enabled.is_empty());
        assert_eq!(resource.service_geoip_mode, 2);
        resource.validate().unwrap();
    }

    #[test]
    fn null_scalars_decode_as_defaults() {
        let resource: Resource = serde_json::from_value(json!({
            "id": 1,
            "name": "a.com",
            "client": null,
            "active": null,
            "service_wwwredir": null,
            "service_https2http": null,
            "service_iphash": null,
            "service_geoip_mode": null,
        }))
        .unwrap();
        assert_eq!(resource.name, "a.com");
        assert_eq!(resource.client, 0);
        assert!(!resource.active);
        assert_eq!(resource.service_wwwredir, 0);
        assert_eq!(resource.service_https2http, 0);
        assert_eq!(resource.service_geoip_mode, 0);

        let origin: Origin = serde_json::from_value(json!({
            "id": 3,
            "origin_data": "198.51.100.7:8080",
            "origin_mode": null,
            "origin_weight": null,
            "origin_max_fails": null,
            "origin_fail_timeout": 30,
        }))
        .unwrap();
        assert_eq!(origin.origin_mode, "");
        assert_eq!(origin.origin_weight, 0);
        assert_eq!(origin.origin_max_fails, 0);
        assert_eq!(origin.origin_fail_timeout, 30);

        let header: Header =
            serde_json::from_value(json!({"id": null, "header_key": "X-A", "header_value": null}))
                .unwrap();
        assert_eq!(header.id, 0);
        assert_eq!(header.header_value, "");

        let web: WebProtectionDetails =
            serde_json::from_value(json!({"ddos_type": null, "is_waf_enabled": true})).unwrap();
        assert_eq!(web.ddos_type, 0);
        assert!(web.is_waf_enabled);
    }

    #[test]
    fn dns_check_uses_upper_case_a() {
        let check: DnsCheck =
            serde_json::from_value(json!({"A": ["192.0.2.1"], "is_in_network": true})).unwrap();
        assert_eq!(check.a, vec!["192.0.2.1".to_owned()]);
        assert!(check.is_in_network);
    }

    #[test]
    fn resource_rules() {
        let base = ResourceCreateRequest::new("example.com");
        base.validate().unwrap();

        let cases: Vec<(ResourceCreateRequest, &str)> = vec![
            (ResourceCreateRequest::new(""), "name"),
            (ResourceCreateRequest::new("a".repeat(256)), "name"),
            (
                ResourceCreateRequest {
                    ssl_type: Some("self".into()),
                    ..base.clone()
                },
                "ssl_type",
            ),
            (
                ResourceCreateRequest {
                    service_https2http: Some(2),
                    ..base.clone()
                },
                "service_https2http",
            ),
            (
                ResourceCreateRequest {
                    service_iphash: Some(3),
                    ..base.clone()
                },
                "service_iphash",
            ),
            (
                ResourceCreateRequest {
                    service_geoip_mode: Some(3),
                    ..base.clone()
                },
                "service_geoip_mode",
            ),
            (
                ResourceCreateRequest {
                    service_wwwredir: Some(2),
                    ..base.clone()
                },
                "service_wwwredir",
            ),
            (
                ResourceCreateRequest {
                    tls_enabled: Some(vec!["1.2".into(), "1.4".into()]),
                    ..base.clone()
                },
                "tls_enabled",
            ),
        ];

        for (req, field) in cases {
            match req.validate() {
                Err(Error::InvalidArgument { field: f, .. }) => assert_eq!(f, field),
                other => panic!("expected {field} to be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn update_request_checks_only_present_fields() {
        ResourceUpdateRequest::default().validate().unwrap();
        let err = ResourceUpdateRequest {
            name: Some(String::new()),
            ..ResourceUpdateRequest::default()
        }
        .validate()
        .unwrap_err();
        assert!(err.is_argument_error());
    }

    #[test]
    fn subresource_rules() {
        assert!(AliasCreateRequest::new("").validate().is_err());
        assert!(
            AliasUpdateRequest {
                alias_ssl_type: Some("acme".into()),
                ..AliasUpdateRequest::default()
            }
            .validate()
            .is_err()
        );
        assert!(
            OriginRequest {
                origin_mode: Some("standby".into()),
                ..OriginRequest::new("192.0.2.10")
            }
            .validate()
            .is_err()
        );
        assert!(
            OriginRequest {
                origin_comment: Some("c".repeat(256)),
                ..OriginRequest::new("192.0.2.10")
            }
            .validate()
            .is_err()
        );
        assert!(HeaderRequest::new("", "v").validate().is_err());
        assert!(HeaderRequest::new("X-A", "v".repeat(1025)).validate().is_err());
        HeaderRequest::new("X-A", "v".repeat(1024)).validate().unwrap();
        assert!(BlacklistRequest::new(" ").validate().is_err());
        assert!(WhitelistRequest::new("").validate().is_err());
        WhitelistRequest::new("198.51.100.0/24").validate().unwrap();
    }
}
