// Integration tests for the resources and status services using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use edgeguard_api::types::{
    ResourceCreateRequest, ResourceListOptions, ResourceUpdateRequest,
};
use edgeguard_api::{Client, ClientConfig, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Client) {
    let server = MockServer::start().await;
    let config = ClientConfig::new("abc123").with_base_url(server.uri());
    let client = Client::new(&config).unwrap();
    (server, client)
}

fn resource_json(id: i64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "created": "2024-03-01T10:00:00Z",
        "updated": "2024-03-02T10:00:00Z",
        "name": name,
        "client": 42,
        "active": true,
        "enabled": true,
        "is_waf_enabled": false,
        "is_redirect_to_https_enabled": true,
        "status": "active",
        "service_ip": "203.0.113.5",
        "service_https2http": 0,
        "service_iphash": 1,
        "service_geoip_mode": 2,
        "service_geoip_list": "RU,KZ",
        "service_wwwredir": 1,
        "feature_multiple_origins": false,
        "feature_wildcard_aliases": false,
        "ssl_type": "le",
        "service_ssl_expire": 1_735_689_600,
        "service_ssl_status": "ok",
        "tls_enabled": ["1.2", "1.3"],
        "wait_for_le": 0
    })
}

// ── List ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_unwraps_envelope() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v2/resources"))
        .and(query_param("limit", "2"))
        .and(query_param("name", "example.com"))
        .and(query_param("active", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "results": [resource_json(1, "example.com"), resource_json(2, "www.example.com")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut opts = ResourceListOptions {
        name: Some("example.com".into()),
        active: Some(true),
        ..ResourceListOptions::default()
    };
    opts.page.limit = 2;

    let resources = client.resources().list(&opts).await.unwrap().into_inner();
    assert_eq!(resources.len(), 2);
    assert_eq!(resources[0].name, "example.com");
    assert_eq!(resources[1].id, 2);
    assert_eq!(resources[1].tls_enabled, vec!["1.2".to_owned(), "1.3".to_owned()]);
}

#[tokio::test]
async fn test_list_without_paging_sends_no_query() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v2/resources"))
        .and(|req: &Request| req.url.query().is_none())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 0,
            "results": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resources = client
        .resources()
        .list(&ResourceListOptions::default())
        .await
        .unwrap();
    assert!(resources.value.is_empty());
}

// ── Create / get ────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_then_get_preserves_fields() {
    let (server, client) = setup().await;

    let req = ResourceCreateRequest {
        active: Some(true),
        is_redirect_to_https_enabled: Some(true),
        service_iphash: Some(1),
        service_geoip_mode: Some(2),
        service_geoip_list: Some("RU,KZ".into()),
        service_wwwredir: Some(1),
        tls_enabled: Some(vec!["1.2".into(), "1.3".into()]),
        ssl_type: Some("le".into()),
        ..ResourceCreateRequest::new("example.com")
    };

    Mock::given(method("POST"))
        .and(path("/v2/resources"))
        .and(body_json(json!({
            "name": "example.com",
            "active": true,
            "is_redirect_to_https_enabled": true,
            "service_iphash": 1,
            "service_geoip_mode": 2,
            "service_geoip_list": "RU,KZ",
            "service_wwwredir": 1,
            "tls_enabled": ["1.2", "1.3"],
            "ssl_type": "le"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(resource_json(77, "example.com")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/resources/77"))
        .respond_with(ResponseTemplate::new(200).set_body_json(resource_json(77, "example.com")))
        .expect(1)
        .mount(&server)
        .await;

    let created = client.resources().create(&req).await.unwrap().into_inner();
    let fetched = client.resources().get(created.id).await.unwrap().into_inner();

    assert_eq!(fetched.id, 77);
    assert_eq!(fetched.name, req.name);
    assert_eq!(Some(fetched.active), req.active);
    assert_eq!(Some(fetched.service_iphash), req.service_iphash);
    assert_eq!(Some(fetched.service_geoip_mode), req.service_geoip_mode);
    assert_eq!(fetched.service_geoip_list, req.service_geoip_list);
    assert_eq!(Some(fetched.service_wwwredir), req.service_wwwredir);
    assert_eq!(Some(fetched.tls_enabled), req.tls_enabled);
    assert_eq!(fetched.ssl_type, req.ssl_type);
}

#[tokio::test]
async fn test_invalid_create_never_reaches_server() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let base = ResourceCreateRequest::new("example.com");
    let invalid = [
        (
            ResourceCreateRequest {
                ssl_type: Some("selfsigned".into()),
                ..base.clone()
            },
            "ssl_type",
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
                service_https2http: Some(2),
                ..base.clone()
            },
            "service_https2http",
        ),
        (
            ResourceCreateRequest {
                tls_enabled: Some(vec!["1.0".into()]),
                ..base.clone()
            },
            "tls_enabled",
        ),
        (
            ResourceCreateRequest {
                service_wwwredir: Some(5),
                ..base.clone()
            },
            "service_wwwredir",
        ),
    ];

    for (req, field) in invalid {
        let err = client.resources().create(&req).await.unwrap_err();
        assert!(err.is_argument_error(), "{field}: {err:?}");
        assert!(err.to_string().starts_with(field), "{err}");
    }
}

// ── Update / delete ─────────────────────────────────────────────────

#[tokio::test]
async fn test_invalid_update_never_reaches_server() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let invalid = [
        (
            ResourceUpdateRequest {
                ssl_type: Some("selfsigned".into()),
                ..ResourceUpdateRequest::default()
            },
            "ssl_type",
        ),
        (
            ResourceUpdateRequest {
                service_geoip_mode: Some(3),
                ..ResourceUpdateRequest::default()
            },
            "service_geoip_mode",
        ),
        (
            ResourceUpdateRequest {
                service_https2http: Some(2),
                ..ResourceUpdateRequest::default()
            },
            "service_https2http",
        ),
        (
            ResourceUpdateRequest {
                service_wwwredir: Some(2),
                ..ResourceUpdateRequest::default()
            },
            "service_wwwredir",
        ),
        (
            ResourceUpdateRequest {
                tls_enabled: Some(vec!["1.4".into()]),
                ..ResourceUpdateRequest::default()
            },
            "tls_enabled",
        ),
    ];

    for (req, field) in invalid {
        let err = client.resources().update(7, &req).await.unwrap_err();
        assert!(err.is_argument_error(), "{field}: {err:?}");
        assert!(err.to_string().starts_with(field), "{err}");
    }
}

#[tokio::test]
async fn test_update_patches_only_set_fields() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/v2/resources/9"))
        .and(body_json(json!({ "is_waf_enabled": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(resource_json(9, "example.com")))
        .expect(1)
        .mount(&server)
        .await;

    let req = ResourceUpdateRequest {
        is_waf_enabled: Some(true),
        ..ResourceUpdateRequest::default()
    };
    let updated = client.resources().update(9, &req).await.unwrap();
    assert_eq!(updated.value.id, 9);
}

#[tokio::test]
async fn test_delete_missing_resource_surfaces_404() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/v2/resources/404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "detail": "Not found." })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client.resources().delete(404).await.unwrap_err();
    match err {
        Error::Api {
            status, message, ..
        } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Not found.");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_delete_accepts_empty_body() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/v2/resources/5"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let meta = client.resources().delete(5).await.unwrap();
    assert_eq!(meta.status.as_u16(), 204);
}

// ── Extras ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_dns_check() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v2/resources/3/dns-check"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "A": ["203.0.113.5"],
            "is_in_network": true
        })))
        .mount(&server)
        .await;

    let check = client.resources().dns_check(3).await.unwrap().into_inner();
    assert_eq!(check.a, vec!["203.0.113.5".to_owned()]);
    assert!(check.is_in_network);
}

#[tokio::test]
async fn test_find_by_name() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v2/resources"))
        .and(query_param("name", "example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "results": [resource_json(1, "example.com"), resource_json(2, "shop.example.com")]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/resources"))
        .and(query_param("name", "dup.example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "results": [resource_json(3, "dup.example.com"), resource_json(4, "dup.example.com")]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/resources"))
        .and(query_param("name", "missing.example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 0,
            "results": []
        })))
        .mount(&server)
        .await;

    let found = client.resources().find_by_name("example.com").await.unwrap();
    assert_eq!(found.id, 1);

    let err = client
        .resources()
        .find_by_name("dup.example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::AmbiguousResourceName { count: 2, .. }));

    let err = client
        .resources()
        .find_by_name("missing.example.com")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_find_by_name_scans_later_pages() {
    let (server, client) = setup().await;

    let first_page: Vec<_> = (1..=100)
        .map(|i| resource_json(i, &format!("shop{i}.example.com")))
        .collect();

    Mock::given(method("GET"))
        .and(path("/v2/resources"))
        .and(query_param("name", "example.com"))
        .and(query_param("limit", "100"))
        .and(query_param("offset", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 101,
            "results": [resource_json(101, "example.com")]
        })))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/resources"))
        .and(query_param("name", "example.com"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 101,
            "results": first_page
        })))
        .expect(1)
        .mount(&server)
        .await;

    let found = client.resources().find_by_name("example.com").await.unwrap();
    assert_eq!(found.id, 101);
}

#[tokio::test]
async fn test_validate_fetched_resource() {
    let (_server, client) = setup().await;

    let mut resource: edgeguard_api::types::Resource =
        serde_json::from_value(resource_json(1, "example.com")).unwrap();
    client.resources().validate(&resource).unwrap();

    resource.tls_enabled.push("2.0".into());
    let err = client.resources().validate(&resource).unwrap_err();
    assert!(err.is_argument_error());
}

#[tokio::test]
async fn test_client_info_endpoints() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/web-protection/client-info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ddos_type": 2,
            "is_waf_enabled": true,
            "is_antibot_enabled": true
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/infrastructure-protection/client-info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "have_bill": true,
            "accessible_client_ids": [42, 43]
        })))
        .mount(&server)
        .await;

    let web = client.services().web_protection().await.unwrap().into_inner();
    assert_eq!(web.ddos_type, 2);
    assert!(web.is_antibot_enabled);

    let infra = client
        .services()
        .infrastructure_protection()
        .await
        .unwrap()
        .into_inner();
    assert!(infra.have_bill);
    assert_eq!(infra.accessible_client_ids, vec![42, 43]);
}
