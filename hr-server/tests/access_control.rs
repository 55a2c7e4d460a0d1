//! Route gating through the real application router

mod common;

use common::{TestApp, body_json, principal, request};
use http::StatusCode;
use serde_json::json;
use shared::Role;
use uuid::Uuid;

#[tokio::test]
async fn health_is_public() {
    let app = TestApp::new();
    let res = app.send(request("GET", "/api/health", None, None)).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["status"], "ok");
}

#[tokio::test]
async fn missing_token_is_unauthenticated_and_not_audited() {
    let app = TestApp::new();

    for (method, uri) in [
        ("GET", "/api/leaves"),
        ("PATCH", "/api/leaves/4b0c6a1e-0000-0000-0000-000000000001/approve"),
        ("GET", "/api/auth/me"),
        ("GET", "/api/audit-logs"),
    ] {
        let res = app.send(request(method, uri, None, None)).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{method} {uri}");
        let body = body_json(res).await;
        assert_eq!(body["message"], "Authentication required");
    }

    assert!(app.finish().await.is_empty());
}

#[tokio::test]
async fn malformed_and_foreign_tokens_get_the_same_401() {
    let app = TestApp::new();

    let foreign = {
        use hr_server::auth::JwtService;
        let other = JwtService::new("some-other-secret", chrono::Duration::minutes(60));
        let token = other
            .issue(Uuid::new_v4(), "x@example.com", Role::Admin)
            .unwrap();
        format!("Bearer {token}")
    };

    let mut bodies = Vec::new();
    for auth in ["Bearer not.a.jwt", "Basic abc", foreign.as_str()] {
        let res = app.send(request("GET", "/api/leaves", Some(auth), None)).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        bodies.push(body_json(res).await);
    }
    assert!(bodies.windows(2).all(|w| w[0] == w[1]));
}

#[tokio::test]
async fn deleted_subject_is_unauthenticated() {
    let app = TestApp::new();
    let hr = principal(Role::Hr, Some(Uuid::new_v4()));
    let auth = app.login(&hr);

    app.principals.remove(hr.id);

    let res = app.send(request("GET", "/api/leaves", Some(&auth), None)).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_role_is_forbidden_and_not_audited() {
    let app = TestApp::new();
    let employee = principal(Role::Employee, Some(Uuid::new_v4()));
    let auth = app.login(&employee);
    let id = Uuid::new_v4();

    let cases = [
        ("PATCH", format!("/api/leaves/{id}/approve"), Some(json!({ "comments": "ok" }))),
        ("DELETE", format!("/api/documents/{id}"), None),
        ("PATCH", format!("/api/salary/{id}/status"), Some(json!({ "status": "Paid" }))),
        ("PUT", format!("/api/employees/{id}"), Some(json!({ "notes": "x" }))),
        ("GET", "/api/audit-logs".to_string(), None),
        ("GET", "/api/reports/attendance".to_string(), None),
        ("PUT", "/api/settings".to_string(), Some(json!({ "payroll": { "pay_day": 1 } }))),
    ];

    for (method, uri, body) in cases {
        let res = app.send(request(method, &uri, Some(&auth), body)).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN, "{method} {uri}");
        assert_eq!(body_json(res).await["message"], "Insufficient permissions");
    }

    assert!(app.finish().await.is_empty());
}

#[tokio::test]
async fn hr_cannot_change_salary_status() {
    let app = TestApp::new();
    let hr = principal(Role::Hr, None);
    let auth = app.login(&hr);

    let res = app
        .send(request(
            "PATCH",
            &format!("/api/salary/{}/status", Uuid::new_v4()),
            Some(&auth),
            Some(json!({ "status": "Paid" })),
        ))
        .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn employee_cannot_read_another_profile() {
    let app = TestApp::new();
    let employee = principal(Role::Employee, Some(Uuid::new_v4()));
    let auth = app.login(&employee);

    // Refused before any lookup: the pool behind this app is unreachable.
    let res = app
        .send(request(
            "GET",
            &format!("/api/employees/{}", Uuid::new_v4()),
            Some(&auth),
            None,
        ))
        .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn unlinked_employee_cannot_use_self_service_routes() {
    let app = TestApp::new();
    let unlinked = principal(Role::Employee, None);
    let auth = app.login(&unlinked);

    for (method, uri, body) in [
        ("POST", "/api/attendance/checkin", None),
        ("GET", "/api/attendance/today", None),
        (
            "POST",
            "/api/leaves",
            Some(json!({
                "leave_type": "Annual",
                "start_date": "2025-03-03",
                "end_date": "2025-03-04"
            })),
        ),
        (
            "POST",
            "/api/tickets",
            Some(json!({ "subject": "Laptop", "description": "Broken" })),
        ),
    ] {
        let res = app.send(request(method, uri, Some(&auth), body)).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN, "{method} {uri}");
    }
}

#[tokio::test]
async fn register_requires_admin_or_director() {
    let app = TestApp::new();
    let body = json!({
        "email": "new.hire@example.com",
        "password": "long-enough-password",
        "role": "Employee"
    });

    for role in [Role::Hr, Role::Finance, Role::Employee] {
        let caller = principal(role, Some(Uuid::new_v4()));
        let auth = app.login(&caller);
        let res = app
            .send(request("POST", "/api/auth/register", Some(&auth), Some(body.clone())))
            .await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN, "{role}");
    }
}

#[tokio::test]
async fn forgot_password_does_not_reveal_accounts() {
    let app = TestApp::new();

    let mut bodies = Vec::new();
    for email in ["admin@example.com", "nobody-here@example.com"] {
        let res = app
            .send(request(
                "POST",
                "/api/password/forgot-password",
                None,
                Some(json!({ "email": email })),
            ))
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        bodies.push(body_json(res).await);
    }
    assert_eq!(bodies[0], bodies[1]);
    assert_eq!(
        bodies[0]["message"],
        "If the email exists, a reset link has been sent"
    );

    let res = app
        .send(request(
            "POST",
            "/api/password/forgot-password",
            None,
            Some(json!({ "email": "  " })),
        ))
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_route_is_not_found_without_auth() {
    let app = TestApp::new();
    let res = app.send(request("GET", "/api/no-such-thing", None, None)).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn oversized_payroll_amounts_are_a_validation_error() {
    let app = TestApp::new();
    let finance = principal(Role::Finance, Some(Uuid::new_v4()));
    let auth = app.login(&finance);

    let res = app
        .send(request(
            "POST",
            "/api/salary",
            Some(&auth),
            Some(json!({
                "employee_id": Uuid::new_v4(),
                "basic_salary": "79228162514264337593543950335",
                "allowances": { "bonus": "1" },
                "period": "2025-03",
            })),
        ))
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(res).await["message"],
        "Salary amounts exceed the supported range"
    );

    assert!(app.finish().await.is_empty());
}
