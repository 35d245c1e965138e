mod common;

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::Router;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Json;
use axum::routing::{get, post};
use chrono::Utc;
use serde_json::{Value, json};

use sawadee_client::api::client::{ApiClient, ApiError, Provenance};
use sawadee_client::api::hotel_info::HotelInfo;
use sawadee_client::api::landing::{NewLandingPageBanner, NewServiceShortcut, placeholder_landing_config};
use sawadee_client::auth::ACCESS_TOKEN_KEY;
use sawadee_client::tenant::{NewTenant, TenantResolver};

/// Records the auth/tenant headers of every request the mock backend sees.
#[derive(Default)]
struct Seen {
    headers: Mutex<Vec<(Option<String>, Option<String>)>>,
}

impl Seen {
    fn record(&self, headers: &HeaderMap) {
        let pick = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(ToString::to_string)
        };
        self.headers
            .lock()
            .unwrap()
            .push((pick("authorization"), pick("x-tenant-id")));
    }

    fn tenants_seen(&self) -> Vec<Option<String>> {
        self.headers.lock().unwrap().iter().map(|(_, t)| t.clone()).collect()
    }
}

fn hotel_info_json() -> Value {
    json!({
        "name": "SawadeeAI Bangkok",
        "address": "1 Riverside Road",
        "phone": "+66 2 000 0000",
        "email": "stay@sawadeeai.example",
        "operatingHours": {
            "reception": "24/7",
            "restaurant": "06:00-23:00",
            "spa": "10:00-20:00",
            "pool": "07:00-21:00"
        },
        "amenities": ["pool", "spa"],
        "policies": { "checkIn": "14:00", "checkOut": "12:00", "cancellation": "48h" },
        "location": { "city": "Bangkok", "country": "TH", "timezone": "Asia/Bangkok" }
    })
}

fn headers_backend(seen: Arc<Seen>) -> Router {
    async fn hotel_info(State(seen): State<Arc<Seen>>, headers: HeaderMap) -> Json<Value> {
        seen.record(&headers);
        Json(hotel_info_json())
    }

    async fn tenant_by_key(
        State(seen): State<Arc<Seen>>,
        headers: HeaderMap,
        Path(key): Path<String>,
    ) -> Result<Json<Value>, StatusCode> {
        seen.record(&headers);
        if key == "acme" {
            Ok(Json(json!({
                "id": "t-1",
                "tenantKey": "acme",
                "name": "Acme Resort",
                "domain": "acme.example.com",
                "primaryColor": "#111111",
                "secondaryColor": "#222222"
            })))
        } else {
            Err(StatusCode::NOT_FOUND)
        }
    }

    Router::new()
        .route("/api/hotel-info", get(hotel_info))
        .route("/api/tenants/key/{key}", get(tenant_by_key))
        .with_state(seen)
}

#[tokio::test]
async fn test_bearer_and_tenant_headers_are_attached() {
    let seen = Arc::new(Seen::default());
    let base = common::serve(headers_backend(Arc::clone(&seen))).await;

    let api = common::test_client(&base);
    api.tokens().set(ACCESS_TOKEN_KEY, "token-xyz").unwrap();
    api.tenant().set(Some("acme".to_string())).await;

    api.hotel_info().await.unwrap();

    let recorded = seen.headers.lock().unwrap().clone();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].0.as_deref(), Some("Bearer token-xyz"));
    assert_eq!(recorded[0].1.as_deref(), Some("acme"));
}

#[tokio::test]
async fn test_no_headers_without_token_or_tenant() {
    let seen = Arc::new(Seen::default());
    let base = common::serve(headers_backend(Arc::clone(&seen))).await;

    let api = common::test_client(&base);
    api.hotel_info().await.unwrap();

    let recorded = seen.headers.lock().unwrap().clone();
    assert_eq!(recorded[0], (None, None));
}

#[tokio::test]
async fn test_tenant_switch_applies_to_all_subsequent_calls() {
    let seen = Arc::new(Seen::default());
    let base = common::serve(headers_backend(Arc::clone(&seen))).await;
    let api = common::test_client(&base);

    api.tenant().set(Some("a".to_string())).await;
    api.hotel_info().await.unwrap();

    api.tenant().set(Some("b".to_string())).await;
    api.hotel_info().await.unwrap();
    api.hotel_info().await.unwrap();

    let tenants = seen.tenants_seen();
    assert_eq!(tenants, vec![
        Some("a".to_string()),
        Some("b".to_string()),
        Some("b".to_string()),
    ]);
}

#[tokio::test]
async fn test_explicit_tenant_override_does_not_touch_the_scope() {
    let seen = Arc::new(Seen::default());
    let base = common::serve(headers_backend(Arc::clone(&seen))).await;
    let api = common::test_client(&base);

    // resolving a different tenant's config while "other" is active
    api.tenant().set(Some("other".to_string())).await;
    let config = api.tenant_by_key("acme").await.unwrap();
    assert_eq!(config.name, "Acme Resort");

    assert_eq!(seen.tenants_seen(), vec![Some("acme".to_string())]);
    assert_eq!(api.tenant().get().await.as_deref(), Some("other"));
}

#[tokio::test]
async fn test_unauthorized_clears_token_and_fires_hook() {
    async fn reject() -> StatusCode {
        StatusCode::UNAUTHORIZED
    }
    let app = Router::new().route("/api/hotel-info", get(reject));
    let base = common::serve(app).await;

    let redirected = Arc::new(AtomicBool::new(false));
    let hook_flag = Arc::clone(&redirected);
    let api = ApiClient::new(common::test_context(common::test_settings(&base)))
        .with_offline_fallback(true)
        .with_unauthorized_hook(move || hook_flag.store(true, Ordering::SeqCst));
    api.tokens().set(ACCESS_TOKEN_KEY, "stale-token").unwrap();

    // the 401 short-circuits even though offline fallback is enabled
    let err = api.hotel_info().await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
    assert_eq!(api.tokens().get(ACCESS_TOKEN_KEY), None);
    assert!(redirected.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_rejected_requests_carry_the_server_message() {
    async fn conflict() -> (StatusCode, Json<Value>) {
        (StatusCode::CONFLICT, Json(json!({ "message": "tenant key already exists" })))
    }
    let app = Router::new().route("/api/tenants", post(conflict));
    let base = common::serve(app).await;
    let api = common::test_client(&base);

    let tenant = NewTenant {
        tenant_key: "acme".to_string(),
        name: "Acme Resort".to_string(),
        domain: "acme.example.com".to_string(),
        primary_color: "#111111".to_string(),
        secondary_color: "#222222".to_string(),
        logo: None,
        active: true,
    };
    let err = api.create_tenant(&tenant).await.unwrap_err();
    match err {
        ApiError::Rejected { status, message } => {
            assert_eq!(status, 409);
            assert_eq!(message, "tenant key already exists");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn test_offline_fallback_substitutes_placeholders_on_reads() {
    let api = ApiClient::new(common::test_context(common::test_settings(common::DEAD_BACKEND)))
        .with_offline_fallback(true);

    let reply = api.chat_send("hello", "session-1", None).await.unwrap();
    assert_eq!(reply.provenance, Provenance::Placeholder);
    assert!(reply.value.message.content.contains("hello"));

    let tenants = api.tenants().await.unwrap();
    assert!(tenants.is_placeholder());
    assert!(tenants.value.is_empty());

    let info = api.hotel_info().await.unwrap();
    assert!(info.is_placeholder());
    assert!(info.value.is_none());

    let landing = api.landing_config().await.unwrap();
    assert!(landing.is_placeholder());
    assert_eq!(landing.value.config.hotel_title, "SawadeeAI Hotel");
}

#[tokio::test]
async fn test_reads_fail_hard_without_offline_fallback() {
    let api = common::test_client(common::DEAD_BACKEND);
    assert!(api.chat_send("hello", "session-1", None).await.is_err());
    assert!(api.tenants().await.is_err());
    assert!(api.hotel_info().await.is_err());
}

#[tokio::test]
async fn test_mutations_never_get_placeholder_successes() {
    let api = ApiClient::new(common::test_context(common::test_settings(common::DEAD_BACKEND)))
        .with_offline_fallback(true);

    let tenant = NewTenant {
        tenant_key: "acme".to_string(),
        name: "Acme Resort".to_string(),
        domain: "acme.example.com".to_string(),
        primary_color: "#111111".to_string(),
        secondary_color: "#222222".to_string(),
        logo: None,
        active: true,
    };
    assert!(api.create_tenant(&tenant).await.is_err());
    assert!(api.delete_tenant("t-1").await.is_err());
}

#[tokio::test]
async fn test_successful_reads_report_backend_provenance() {
    let seen = Arc::new(Seen::default());
    let base = common::serve(headers_backend(seen)).await;
    let api = ApiClient::new(common::test_context(common::test_settings(&base)))
        .with_offline_fallback(true);

    let info = api.hotel_info().await.unwrap();
    assert_eq!(info.provenance, Provenance::Backend);
    assert_eq!(info.value.unwrap().name, "SawadeeAI Bangkok");
}

#[tokio::test]
async fn test_tenant_activation_sets_scope_and_falls_back() {
    let seen = Arc::new(Seen::default());
    let base = common::serve(headers_backend(seen)).await;
    let api = Arc::new(common::test_client(&base));
    let resolver = TenantResolver::new(Arc::clone(&api));

    // known tenant: adopted config, scope set
    let config = resolver.activate(Some("acme")).await;
    assert_eq!(config.name, "Acme Resort");
    assert_eq!(api.tenant().get().await.as_deref(), Some("acme"));

    // unknown tenant: default theme, but requests keep the resolved key
    let config = resolver.activate(Some("ghost")).await;
    assert_eq!(config.tenant_key, "default");
    assert_eq!(config.name, "SawadeeAI Hotel");
    assert_eq!(api.tenant().get().await.as_deref(), Some("ghost"));

    // sentinel: default theme, scope cleared
    let config = resolver.activate(None).await;
    assert_eq!(config.tenant_key, "default");
    assert_eq!(api.tenant().get().await, None);
}

#[tokio::test]
async fn test_tenant_activation_survives_a_dead_backend() {
    let api = Arc::new(common::test_client(common::DEAD_BACKEND));
    let resolver = TenantResolver::new(Arc::clone(&api));

    let url = url::Url::parse("https://acme.example.com/?x=1").unwrap();
    let config = resolver.activate_from_url(&url).await;
    assert_eq!(config.name, "SawadeeAI Hotel");
    assert!(!config.primary_color.is_empty());
    assert_eq!(api.tenant().get().await.as_deref(), Some("acme"));
}

#[tokio::test]
async fn test_landing_admin_crud_round_trip() {
    async fn create_banner(Json(mut body): Json<Value>) -> Json<Value> {
        body["id"] = json!(7);
        Json(body)
    }
    async fn update_shortcut(Path(id): Path<i64>, Json(mut body): Json<Value>) -> Json<Value> {
        body["id"] = json!(id);
        Json(body)
    }
    async fn delete_banner(Path(id): Path<i64>) -> StatusCode {
        assert_eq!(id, 7);
        StatusCode::NO_CONTENT
    }
    let app = Router::new()
        .route("/api/landing-page/banners", post(create_banner))
        .route("/api/landing-page/banners/{id}", axum::routing::delete(delete_banner))
        .route("/api/landing-page/shortcuts/{id}", axum::routing::put(update_shortcut));
    let base = common::serve(app).await;
    let api = common::test_client(&base);

    let banner = NewLandingPageBanner {
        title: "Summer Sale".to_string(),
        subtitle: "20% off river suites".to_string(),
        image_url: "/assets/summer.jpg".to_string(),
        cta_text: "Book Now".to_string(),
        cta_link: "/booking".to_string(),
        display_order: 1,
        active: true,
    };
    let created = api.create_landing_banner(&banner).await.unwrap();
    assert_eq!(created.id, 7);
    assert_eq!(created.title, "Summer Sale");

    let shortcut = NewServiceShortcut {
        service_name: "spa".to_string(),
        display_name: "Spa".to_string(),
        description: "Book a treatment".to_string(),
        icon_name: "spa".to_string(),
        color_code: "#8B5CF6".to_string(),
        link_url: "/spa".to_string(),
        display_order: 2,
        active: false,
    };
    let updated = api.update_service_shortcut(3, &shortcut).await.unwrap();
    assert_eq!(updated.id, 3);
    assert!(!updated.active);

    api.delete_landing_banner(7).await.unwrap();
}

#[tokio::test]
async fn test_admin_mutations_propagate_server_errors() {
    async fn broken() -> (StatusCode, Json<Value>) {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "message": "storage unavailable" })))
    }
    let app = Router::new()
        .route("/api/hotel-info", axum::routing::put(broken))
        .route("/api/landing-page/config", axum::routing::put(broken));
    let base = common::serve(app).await;
    // fallback is enabled, but mutations must still surface the failure
    let api = ApiClient::new(common::test_context(common::test_settings(&base)))
        .with_offline_fallback(true);

    let err = api.update_hotel_info(&HotelInfo::default()).await.unwrap_err();
    assert!(matches!(err, ApiError::Rejected { status: 500, .. }));

    let config = placeholder_landing_config().config;
    let err = api.update_landing_config(&config).await.unwrap_err();
    assert!(matches!(err, ApiError::Rejected { status: 500, .. }));
}

#[tokio::test]
async fn test_expired_session_token_is_still_sent_until_cleared() {
    // the gateway attaches whatever token is stored; expiry handling belongs
    // to the session holder, re-validation to the backend
    let seen = Arc::new(Seen::default());
    let base = common::serve(headers_backend(Arc::clone(&seen))).await;
    let api = common::test_client(&base);

    let expired = common::mint_token("u-1", "guest", Utc::now().timestamp() - 60, &[], &[]);
    api.tokens().set(ACCESS_TOKEN_KEY, &expired).unwrap();
    api.hotel_info().await.unwrap();

    let recorded = seen.headers.lock().unwrap().clone();
    assert_eq!(recorded[0].0.as_deref(), Some(format!("Bearer {expired}").as_str()));
}
