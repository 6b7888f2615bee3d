use super::*;
use crate::fetch::Method;
use crate::rbac::{AccountType, Role};
use crate::test_helpers::{ScriptedTransport, login_body};

fn api() -> (Arc<ScriptedTransport>, RestAuthApi) {
    let transport = ScriptedTransport::new();
    (transport.clone(), RestAuthApi::new(transport))
}

#[tokio::test]
async fn login_posts_credentials_and_parses_user() {
    let (transport, api) = api();
    transport.respond_json(200, &login_body("seller_pro", true, "a", "r"));

    let res = api.login("a@b.com", "pw").await.unwrap();

    assert_eq!(res.user.id, "u-9");
    assert_eq!(res.user.roles, vec![Role::SellerPro]);
    assert!(res.user.email_verified);
    assert_eq!(res.tokens().access_token, "a");
    let sent = &transport.requests()[0];
    assert_eq!((sent.method, sent.path.as_str()), (Method::Post, LOGIN_PATH));
    assert_eq!(sent.bearer, None);
}

#[tokio::test]
async fn login_accepts_nested_tokens() {
    let (transport, api) = api();
    transport.respond_json(
        200,
        &serde_json::json!({
            "user": { "id": "1", "email": "e@x.com", "username": "e" },
            "tokens": { "access_token": "na", "refresh_token": "nr" }
        }),
    );

    let res = api.login("e@x.com", "pw").await.unwrap();

    assert_eq!(res.user.account_type, AccountType::Buyer);
    assert!(!res.user.email_verified);
    assert_eq!((res.access_token.as_str(), res.refresh_token.as_str()), ("na", "nr"));
}

#[tokio::test]
async fn login_error_carries_server_message() {
    let (transport, api) = api();
    transport.respond(401, r#"{"message":"Invalid credentials"}"#);

    let err = api.login("a@b.com", "bad").await.unwrap_err();

    assert_eq!(err, AuthError::Http { status: 401, message: Some("Invalid credentials".to_owned()) });
}

#[tokio::test]
async fn register_sends_snake_case_payload() {
    let (transport, api) = api();
    transport.respond(201, "{}");
    let payload = SignUpPayload {
        email: "s@x.com".to_owned(),
        password: "pw".to_owned(),
        username: "seller".to_owned(),
        account_type: AccountType::SellerPro,
        company_name: Some("ACME".to_owned()),
        ..SignUpPayload::default()
    };

    api.register(&payload).await.unwrap();

    let body: serde_json::Value = serde_json::from_str(transport.requests()[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body["account_type"], "seller_pro");
    assert_eq!(body["company_name"], "ACME");
    assert!(body.get("phone").is_none());
}

#[tokio::test]
async fn verify_email_returns_session() {
    let (transport, api) = api();
    transport.respond_json(200, &login_body("buyer", true, "va", "vr"));

    let res = api.verify_email("a@b.com", "123456").await.unwrap();

    assert_eq!(res.access_token, "va");
    let sent = &transport.requests()[0];
    assert_eq!(sent.path, VERIFY_EMAIL_PATH);
    assert_eq!(sent.body.as_deref(), Some(r#"{"email":"a@b.com","code":"123456"}"#));
}

#[tokio::test]
async fn refresh_sends_camel_case_token() {
    let (transport, api) = api();
    transport.respond(200, r#"{"access_token":"a2","refresh_token":"r2"}"#);

    let pair = api.refresh("r1").await.unwrap();

    assert_eq!(pair, TokenPair { access_token: "a2".to_owned(), refresh_token: "r2".to_owned() });
    assert_eq!(transport.requests()[0].body.as_deref(), Some(r#"{"refreshToken":"r1"}"#));
}

#[tokio::test]
async fn logout_sends_bearer_without_body() {
    let (transport, api) = api();
    transport.respond(204, "");

    api.logout(Some("tok")).await.unwrap();

    let sent = &transport.requests()[0];
    assert_eq!(sent.path, LOGOUT_PATH);
    assert_eq!(sent.body, None);
    assert_eq!(sent.authorization().as_deref(), Some("Bearer tok"));
}

#[tokio::test]
async fn password_reset_flow_paths() {
    let (transport, api) = api();
    transport.respond(200, "{}");
    transport.respond(200, "{}");
    transport.respond(200, "{}");

    api.forgot_password("a@b.com").await.unwrap();
    api.verify_reset_code("a@b.com", "654321").await.unwrap();
    api.reset_password("a@b.com", "654321", "n3w").await.unwrap();

    let requests = transport.requests();
    let paths: Vec<_> = requests.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(paths, [FORGOT_PASSWORD_PATH, VERIFY_RESET_CODE_PATH, RESET_PASSWORD_PATH]);
    assert_eq!(requests[2].body.as_deref(), Some(r#"{"email":"a@b.com","code":"654321","newPassword":"n3w"}"#));
}
