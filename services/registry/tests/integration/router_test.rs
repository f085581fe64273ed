use axum::http::{HeaderMap, Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use tss_domain::user::UserRole;
use tss_registry::router::build_router;
use tss_testing::auth::MockAuth;
use tss_testing::http::{body_json, json_request};

use crate::helpers::sqlite_state;

#[tokio::test]
async fn should_report_health_and_readiness() {
    let router = build_router(sqlite_state().await);

    let health = router
        .clone()
        .oneshot(json_request(Method::GET, "/healthz", None, HeaderMap::new()))
        .await
        .unwrap();
    assert_eq!(health.status(), StatusCode::OK);
    assert!(health.headers().contains_key("x-request-id"));

    let ready = router
        .oneshot(json_request(Method::GET, "/readyz", None, HeaderMap::new()))
        .await
        .unwrap();
    assert_eq!(ready.status(), StatusCode::OK);
}

#[tokio::test]
async fn should_require_identity_to_issue_codes() {
    let router = build_router(sqlite_state().await);

    let resp = router
        .oneshot(json_request(
            Method::POST,
            "/authority-codes",
            None,
            HeaderMap::new(),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_forbid_drivers_from_console_operations() {
    let router = build_router(sqlite_state().await);
    let driver = MockAuth::driver();

    for method in [Method::POST, Method::GET] {
        let resp = router
            .clone()
            .oneshot(json_request(method, "/authority-codes", None, driver.headers()))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body = body_json(resp).await;
        assert_eq!(body["kind"], "FORBIDDEN");
    }
}

#[tokio::test]
async fn should_issue_list_and_redeem_over_http() {
    let router = build_router(sqlite_state().await);
    let authority = MockAuth::authority();

    let resp = router
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/authority-codes",
            None,
            authority.headers(),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let code = body_json(resp).await["code"].as_str().unwrap().to_owned();

    let resp = router
        .clone()
        .oneshot(json_request(
            Method::GET,
            "/authority-codes",
            None,
            authority.headers(),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["codes"], json!([code]));

    let resp = router
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/authority-codes/redemption",
            Some(json!({ "code": code })),
            authority.headers(),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = router
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/authority-codes/redemption",
            Some(json!({ "code": code })),
            authority.headers(),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["kind"], "INVALID_OR_CONSUMED_CODE");
    assert_eq!(body["message"], "invalid or already-used code");

    let resp = router
        .oneshot(json_request(
            Method::GET,
            "/authority-codes",
            None,
            authority.headers(),
        ))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await["codes"], json!([]));
}

#[tokio::test]
async fn should_register_authority_and_report_role() {
    let router = build_router(sqlite_state().await);
    let authority = MockAuth::authority();

    let resp = router
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/authority-codes",
            None,
            authority.headers(),
        ))
        .await
        .unwrap();
    let code = body_json(resp).await["code"].as_str().unwrap().to_owned();

    let resp = router
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/users",
            Some(json!({
                "email": "officer@city.gov",
                "display_name": "Officer Rao",
                "role": "authority",
                "authority_code": code.to_lowercase(),
            })),
            HeaderMap::new(),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    assert_eq!(body["role"], "authority");
    let user_id = body["id"].as_str().unwrap().to_owned();

    let resp = router
        .oneshot(json_request(
            Method::GET,
            &format!("/users/{user_id}/role"),
            None,
            MockAuth::driver().headers(),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await["role"],
        UserRole::Authority.as_str()
    );
}

#[tokio::test]
async fn should_reject_authority_registration_with_bad_code() {
    let router = build_router(sqlite_state().await);

    let resp = router
        .oneshot(json_request(
            Method::POST,
            "/users",
            Some(json!({
                "email": "officer@city.gov",
                "display_name": "Officer Rao",
                "role": "authority",
                "authority_code": "NOPE0000",
            })),
            HeaderMap::new(),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["kind"], "INVALID_OR_CONSUMED_CODE");
}

#[tokio::test]
async fn should_default_registration_role_to_driver() {
    let router = build_router(sqlite_state().await);

    let resp = router
        .oneshot(json_request(
            Method::POST,
            "/users",
            Some(json!({
                "email": "driver@mail.com",
                "display_name": "Asha",
            })),
            HeaderMap::new(),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(body_json(resp).await["role"], "driver");
}

#[tokio::test]
async fn should_keep_code_usable_after_unauthorized_redemption_attempts() {
    let router = build_router(sqlite_state().await);
    let authority = MockAuth::authority();

    let resp = router
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/authority-codes",
            None,
            authority.headers(),
        ))
        .await
        .unwrap();
    let code = body_json(resp).await["code"].as_str().unwrap().to_owned();

    let resp = router
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/authority-codes/redemption",
            Some(json!({ "code": code })),
            HeaderMap::new(),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = router
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/authority-codes/redemption",
            Some(json!({ "code": code })),
            MockAuth::driver().headers(),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(resp).await["kind"], "FORBIDDEN");

    let resp = router
        .oneshot(json_request(
            Method::POST,
            "/users",
            Some(json!({
                "email": "officer@city.gov",
                "display_name": "Officer Rao",
                "role": "authority",
                "authority_code": code,
            })),
            HeaderMap::new(),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(body_json(resp).await["role"], "authority");
}

#[tokio::test]
async fn should_answer_unreadable_registration_body_with_envelope() {
    let router = build_router(sqlite_state().await);

    let resp = router
        .oneshot(json_request(
            Method::POST,
            "/users",
            Some(json!({
                "email": "officer@city.gov",
                "display_name": "Officer Rao",
                "role": "admin",
            })),
            HeaderMap::new(),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["kind"], "INVALID_REQUEST");
    assert_eq!(
        body["message"],
        "invalid request: request body has missing or invalid fields"
    );
}
