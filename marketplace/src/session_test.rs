use super::*;
use crate::events::NoticeKind;
use crate::fetch::Method;
use crate::rbac::AccountType;
use crate::storage::MemoryStorage;
use crate::test_helpers::{Harness, login_body, stored, user};

// =============================================================================
// initialize
// =============================================================================

#[tokio::test]
async fn initialize_without_stored_session_is_ready_and_empty() {
    let h = Harness::empty();
    assert_eq!(h.session.status(), SessionStatus::Initializing);

    h.session.initialize().await;

    assert!(h.session.is_ready());
    assert!(!h.session.is_authenticated());
    assert!(h.transport.requests().is_empty());
    assert!(h.events.notices().is_empty());
}

#[tokio::test]
async fn initialize_refresh_success_keeps_user_and_replaces_tokens() {
    let original = stored(user(AccountType::SellerPro, true), "old-access", "old-refresh");
    let h = Harness::with_stored(&original);
    h.transport
        .respond_json(200, &serde_json::json!({ "accessToken": "new-access", "refreshToken": "new-refresh" }));

    h.session.initialize().await;

    assert!(h.session.is_ready());
    assert_eq!(h.session.user(), Some(original.user.clone()));
    assert_eq!(h.session.access_token().as_deref(), Some("new-access"));
    assert_eq!(h.session.refresh_token().as_deref(), Some("new-refresh"));
    assert_eq!(h.persisted(), Some(stored(original.user, "new-access", "new-refresh")));

    let requests = h.transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::Post);
    assert_eq!(requests[0].path, crate::api::REFRESH_PATH);
    assert_eq!(requests[0].body.as_deref(), Some(r#"{"refreshToken":"old-refresh"}"#));
}

#[tokio::test]
async fn initialize_refresh_failure_clears_everything_silently() {
    for status in [400, 401, 403, 500, 503] {
        let h = Harness::with_stored(&stored(user(AccountType::Buyer, true), "a", "r"));
        h.transport.respond(status, r#"{"message":"expired"}"#);

        h.session.initialize().await;

        assert!(h.session.is_ready(), "status {status}");
        assert!(!h.session.is_authenticated(), "status {status}");
        assert!(h.storage.read_raw().is_none(), "status {status}");
        assert!(h.events.notices().is_empty(), "status {status}");
    }
}

#[tokio::test]
async fn initialize_transport_failure_clears_session() {
    let h = Harness::with_stored(&stored(user(AccountType::Buyer, true), "a", "r"));
    h.transport.fail("connection refused");

    h.session.initialize().await;

    assert!(h.session.is_ready());
    assert!(h.persisted().is_none());
}

#[tokio::test]
async fn initialize_malformed_refresh_body_clears_session() {
    let h = Harness::with_stored(&stored(user(AccountType::Buyer, true), "a", "r"));
    h.transport.respond(200, r#"{"accessToken":"only-one"}"#);

    h.session.initialize().await;

    assert!(!h.session.is_authenticated());
    assert!(h.storage.read_raw().is_none());
}

#[tokio::test]
async fn initialize_discards_unreadable_blob() {
    let h = Harness::new(MemoryStorage::with_raw("{\"user\":"));

    h.session.initialize().await;

    assert!(h.session.is_ready());
    assert!(h.storage.read_raw().is_none());
    assert!(h.transport.requests().is_empty());
}

#[tokio::test]
async fn initialize_runs_once() {
    let h = Harness::with_stored(&stored(user(AccountType::Buyer, true), "a", "r"));
    h.transport.respond_json(200, &serde_json::json!({ "accessToken": "a2", "refreshToken": "r2" }));

    h.session.initialize().await;
    h.session.initialize().await;

    assert_eq!(h.transport.requests().len(), 1);
    assert_eq!(h.session.access_token().as_deref(), Some("a2"));
}

#[tokio::test]
async fn initialize_publishes_ready_snapshot() {
    let h = Harness::empty();
    h.session.initialize().await;
    let snapshots = h.events.snapshots();
    assert_eq!(snapshots.last().map(|s| s.status), Some(SessionStatus::Ready));
}

// =============================================================================
// login
// =============================================================================

#[tokio::test]
async fn login_success_installs_session_and_goes_home() {
    let h = Harness::empty();
    h.session.initialize().await;
    h.transport.respond_json(200, &login_body("buyer", true, "acc", "ref"));

    h.session.login("a@b.com", "good").await.unwrap();

    let user = h.session.user().unwrap();
    assert_eq!(user.username, "alice");
    assert_eq!(h.session.access_token().as_deref(), Some("acc"));
    assert_eq!(h.persisted().map(|s| s.refresh_token), Some("ref".to_owned()));
    assert_eq!(h.events.navigations(), vec!["/".to_owned()]);
    let notices = h.events.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, NoticeKind::Success);
    assert_eq!(notices[0].message, LOGIN_SUCCESS);

    let requests = h.transport.requests();
    assert_eq!(requests[0].path, crate::api::LOGIN_PATH);
    assert_eq!(requests[0].body.as_deref(), Some(r#"{"email":"a@b.com","password":"good"}"#));
}

#[tokio::test]
async fn login_success_returns_to_recorded_path_once() {
    let h = Harness::empty();
    h.session.initialize().await;
    h.session.remember_return_to("/messages");
    h.transport.respond_json(200, &login_body("buyer", true, "acc", "ref"));

    h.session.login("a@b.com", "good").await.unwrap();

    assert_eq!(h.events.navigations(), vec!["/messages".to_owned()]);
    assert_eq!(h.session.take_return_to(), None);
}

#[tokio::test]
async fn login_unauthorized_leaves_existing_session_untouched() {
    let existing = stored(user(AccountType::Admin, true), "keep-a", "keep-r");
    let h = Harness::with_stored(&existing);
    h.transport.respond_json(200, &serde_json::json!({ "accessToken": "keep-a", "refreshToken": "keep-r" }));
    h.session.initialize().await;
    h.session.remember_return_to("/admin");
    h.transport.respond(401, r#"{"message":"Invalid credentials","statusCode":401}"#);

    let err = h.session.login("a@b.com", "bad").await.unwrap_err();

    assert_eq!(err.to_string(), "Invalid credentials");
    assert_eq!(err.user_message(LOGIN_FAILED), "Invalid credentials");
    assert_eq!(h.session.user(), Some(existing.user.clone()));
    assert_eq!(h.persisted(), Some(existing));
    assert!(h.events.navigations().is_empty());
    assert_eq!(h.session.take_return_to().as_deref(), Some("/admin"));
    let notices = h.events.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, NoticeKind::Error);
    assert_eq!(notices[0].message, "Invalid credentials");
}

#[tokio::test]
async fn login_failure_without_server_message_uses_generic_copy() {
    let h = Harness::empty();
    h.transport.respond(500, "");

    let err = h.session.login("a@b.com", "pw").await.unwrap_err();

    assert_eq!(err.to_string(), "HTTP 500");
    assert_eq!(h.events.notices()[0].message, LOGIN_FAILED);
    assert!(!h.session.is_authenticated());
}

#[tokio::test]
async fn login_with_missing_tokens_is_rejected() {
    let h = Harness::empty();
    h.transport.respond_json(200, &serde_json::json!({ "user": { "id": "1", "email": "a@b.com", "username": "a" } }));

    let err = h.session.login("a@b.com", "pw").await.unwrap_err();

    assert!(matches!(err, AuthError::Malformed(_)));
    assert!(!h.session.is_authenticated());
    assert!(h.storage.read_raw().is_none());
}

// =============================================================================
// register
// =============================================================================

fn payload() -> SignUpPayload {
    SignUpPayload {
        email: "new+user@b.com".to_owned(),
        password: "pw".to_owned(),
        username: "newbie".to_owned(),
        ..SignUpPayload::default()
    }
}

#[tokio::test]
async fn register_success_redirects_to_verification_without_session() {
    let h = Harness::empty();
    h.transport.respond_json(201, &serde_json::json!({ "message": "OTP sent" }));

    h.session.register(&payload()).await.unwrap();

    assert!(!h.session.is_authenticated());
    assert!(h.storage.read_raw().is_none());
    assert_eq!(h.events.navigations(), vec!["/verify-otp?email=new%2Buser%40b.com".to_owned()]);
    assert_eq!(h.events.notices()[0].message, REGISTER_SUCCESS);
}

#[tokio::test]
async fn register_failure_notifies_with_long_duration() {
    let h = Harness::empty();
    h.transport.respond(409, r#"{"message":["email already used"]}"#);

    let err = h.session.register(&payload()).await.unwrap_err();

    assert_eq!(err.status(), Some(409));
    let notice = &h.events.notices()[0];
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.message, "email already used");
    assert_eq!(notice.duration_ms, crate::events::ERROR_NOTICE_DURATION_MS);
    assert!(h.events.navigations().is_empty());
}

// =============================================================================
// complete_verification
// =============================================================================

#[tokio::test]
async fn complete_verification_installs_without_navigation_or_notice() {
    let h = Harness::empty();
    h.session.initialize().await;
    let res = LoginResponse {
        user: user(AccountType::SellerParticular, true),
        access_token: "va".to_owned(),
        refresh_token: "vr".to_owned(),
    };

    h.session.complete_verification(res.clone()).unwrap();

    assert_eq!(h.session.user(), Some(res.user.clone()));
    assert_eq!(h.persisted(), Some(StoredSession::from(res)));
    assert!(h.events.navigations().is_empty());
    assert!(h.events.notices().is_empty());
    assert!(h.events.snapshots().last().is_some_and(SessionSnapshot::is_authenticated));
}

#[tokio::test]
async fn complete_verification_rejects_empty_tokens() {
    let h = Harness::empty();
    h.session.initialize().await;
    let published = h.events.snapshots().len();

    let err = h
        .session
        .complete_verification(LoginResponse {
            user: user(AccountType::Buyer, true),
            access_token: String::new(),
            refresh_token: String::new(),
        })
        .unwrap_err();

    assert!(matches!(err, AuthError::Malformed(_)));
    assert!(!h.session.is_authenticated());
    assert_eq!(h.session.access_token(), None);
    assert!(h.storage.read_raw().is_none());
    assert_eq!(h.events.snapshots().len(), published);
}

#[tokio::test]
async fn complete_verification_with_one_empty_token_keeps_prior_session() {
    let prior = stored(user(AccountType::Buyer, true), "a", "r");
    let h = Harness::with_stored(&prior);
    h.transport.respond_json(200, &serde_json::json!({ "accessToken": "a2", "refreshToken": "r2" }));
    h.session.initialize().await;

    let result = h.session.complete_verification(LoginResponse {
        user: user(AccountType::SellerPro, true),
        access_token: "fresh".to_owned(),
        refresh_token: String::new(),
    });

    assert!(result.is_err());
    assert_eq!(h.session.user(), Some(prior.user.clone()));
    assert_eq!(h.session.access_token().as_deref(), Some("a2"));
    assert_eq!(h.persisted(), Some(stored(prior.user, "a2", "r2")));
}

// =============================================================================
// logout
// =============================================================================

#[tokio::test]
async fn logout_clears_even_when_server_fails() {
    let h = Harness::with_stored(&stored(user(AccountType::Buyer, true), "a", "r"));
    h.transport.respond_json(200, &serde_json::json!({ "accessToken": "a2", "refreshToken": "r2" }));
    h.session.initialize().await;
    h.transport.fail("offline");

    h.session.logout().await;

    assert!(!h.session.is_authenticated());
    assert!(h.storage.read_raw().is_none());
    assert_eq!(h.events.navigations(), vec!["/login".to_owned()]);
    assert_eq!(h.events.notices().last().map(|n| n.kind), Some(NoticeKind::Info));
}

#[tokio::test]
async fn logout_clears_on_server_error_status() {
    let h = Harness::with_stored(&stored(user(AccountType::Buyer, true), "a", "r"));
    h.transport.respond_json(200, &serde_json::json!({ "accessToken": "a2", "refreshToken": "r2" }));
    h.session.initialize().await;
    h.transport.respond(500, "");

    h.session.logout().await;

    assert!(!h.session.is_authenticated());
    assert!(h.persisted().is_none());
    let logout_request = &h.transport.requests()[1];
    assert_eq!(logout_request.path, crate::api::LOGOUT_PATH);
    assert_eq!(logout_request.authorization().as_deref(), Some("Bearer a2"));
}

// =============================================================================
// predicates
// =============================================================================

#[tokio::test]
async fn predicates_false_without_user() {
    let h = Harness::empty();
    h.session.initialize().await;
    for role in Role::ALL {
        assert!(!h.session.has_role(role));
    }
    for permission in Permission::all() {
        assert!(!h.session.has_permission(*permission));
    }
    assert!(!h.session.has_any_role(&Role::ALL));
    assert!(!h.session.has_any_permission(Permission::all()));
}

#[tokio::test]
async fn predicates_match_user_lists_exactly() {
    let h = Harness::empty();
    h.session.complete_verification(LoginResponse {
        user: user(AccountType::Buyer, true),
        access_token: "a".to_owned(),
        refresh_token: "r".to_owned(),
    })
    .unwrap();

    let user = h.session.user().unwrap();
    for role in Role::ALL {
        assert_eq!(h.session.has_role(role), user.roles.contains(&role));
    }
    for permission in Permission::all() {
        assert_eq!(h.session.has_permission(*permission), user.permissions.contains(permission));
    }
    assert!(h.session.has_any_role(&[Role::Admin, Role::Buyer]));
    assert!(!h.session.has_any_role(&[]));
    assert!(h.session.has_any_permission(&[Permission::ListingApprove, Permission::MessagesAccess]));
    assert!(!h.session.has_any_permission(&[Permission::ListingApprove]));
}
