use super::*;

fn backend_user(account_type: &str, verified: bool) -> serde_json::Value {
    serde_json::json!({
        "id": "u-1",
        "email": "a@b.com",
        "username": "alice",
        "account_type": account_type,
        "email_verified": verified,
        "phone": "+33600000000",
        "online": true
    })
}

// =============================================================================
// parse_auth_response
// =============================================================================

#[test]
fn parse_auth_response_top_level_tokens() {
    let body = serde_json::json!({
        "user": backend_user("seller_pro", true),
        "accessToken": "acc",
        "refreshToken": "ref"
    });
    let parsed = parse_auth_response(&body.to_string()).unwrap();
    assert_eq!(parsed.access_token, "acc");
    assert_eq!(parsed.refresh_token, "ref");
    assert_eq!(parsed.user.roles, vec![Role::SellerPro]);
    assert!(parsed.user.permissions.contains(&Permission::ListingCreate));
    assert!(parsed.user.email_verified);
    assert_eq!(parsed.user.account_type, AccountType::SellerPro);
}

#[test]
fn parse_auth_response_nested_snake_case_tokens() {
    let body = serde_json::json!({
        "user": backend_user("buyer", false),
        "tokens": { "access_token": "acc2", "refresh_token": "ref2" }
    });
    let parsed = parse_auth_response(&body.to_string()).unwrap();
    assert_eq!(parsed.tokens(), TokenPair { access_token: "acc2".to_owned(), refresh_token: "ref2".to_owned() });
    assert!(!parsed.user.email_verified);
}

#[test]
fn parse_auth_response_top_level_wins_over_nested() {
    let body = serde_json::json!({
        "user": backend_user("buyer", true),
        "accessToken": "top",
        "refreshToken": "",
        "tokens": { "accessToken": "nested", "refreshToken": "nested-ref" }
    });
    let parsed = parse_auth_response(&body.to_string()).unwrap();
    assert_eq!(parsed.access_token, "top");
    assert_eq!(parsed.refresh_token, "nested-ref");
}

#[test]
fn parse_auth_response_missing_account_type_defaults_to_buyer() {
    let body = serde_json::json!({
        "user": { "id": "u-2", "email": "b@c.com", "username": "bob" },
        "accessToken": "a",
        "refreshToken": "r"
    });
    let parsed = parse_auth_response(&body.to_string()).unwrap();
    assert_eq!(parsed.user.account_type, AccountType::Buyer);
    assert_eq!(parsed.user.roles, vec![Role::Buyer]);
    assert!(!parsed.user.email_verified);
}

#[test]
fn parse_auth_response_unknown_account_type_falls_back_to_buyer() {
    let body = serde_json::json!({
        "user": { "id": "u-3", "email": "m@c.com", "username": "mod", "account_type": "moderator", "email_verified": true },
        "accessToken": "a",
        "refreshToken": "r"
    });
    let parsed = parse_auth_response(&body.to_string()).unwrap();
    assert_eq!(parsed.user.account_type, AccountType::Buyer);
    assert_eq!(parsed.user.roles, vec![Role::Buyer]);
    assert!(parsed.user.email_verified);
    assert_eq!(parsed.access_token, "a");
}

#[test]
fn parse_auth_response_null_account_type_is_buyer() {
    let body = serde_json::json!({
        "user": { "id": "u-4", "email": "n@c.com", "username": "nil", "account_type": null },
        "accessToken": "a",
        "refreshToken": "r"
    });
    assert_eq!(parse_auth_response(&body.to_string()).unwrap().user.account_type, AccountType::Buyer);
}

#[test]
fn parse_auth_response_without_user_is_malformed() {
    let body = serde_json::json!({ "accessToken": "a", "refreshToken": "r" });
    let err = parse_auth_response(&body.to_string()).unwrap_err();
    assert!(matches!(err, AuthError::Malformed(_)));
}

#[test]
fn parse_auth_response_without_refresh_token_is_malformed() {
    let body = serde_json::json!({ "user": backend_user("buyer", true), "accessToken": "a" });
    let err = parse_auth_response(&body.to_string()).unwrap_err();
    assert!(matches!(err, AuthError::Malformed(_)));
}

#[test]
fn parse_auth_response_rejects_non_json() {
    assert!(matches!(parse_auth_response("ok"), Err(AuthError::Malformed(_))));
}

// =============================================================================
// parse_token_pair
// =============================================================================

#[test]
fn parse_token_pair_reads_camel_case() {
    let pair = parse_token_pair(r#"{"accessToken":"n1","refreshToken":"n2"}"#).unwrap();
    assert_eq!(pair.access_token, "n1");
    assert_eq!(pair.refresh_token, "n2");
}

#[test]
fn parse_token_pair_rejects_empty_access_token() {
    let err = parse_token_pair(r#"{"accessToken":"","refreshToken":"n2"}"#).unwrap_err();
    assert!(matches!(err, AuthError::Malformed(_)));
}

// =============================================================================
// AuthUser persistence shape
// =============================================================================

#[test]
fn auth_user_serializes_camel_case() {
    let user = AuthUser::from_account("u-1", "a@b.com", "alice", AccountType::Buyer, true);
    let value = serde_json::to_value(&user).unwrap();
    assert_eq!(value["emailVerified"], serde_json::json!(true));
    assert_eq!(value["accountType"], serde_json::json!("buyer"));
    assert_eq!(value["roles"], serde_json::json!(["BUYER"]));
    assert_eq!(value["permissions"], serde_json::json!(["favorites.manage", "messages.access"]));
}

#[test]
fn auth_user_accepts_legacy_verification_flag() {
    let raw = serde_json::json!({
        "id": "u-1",
        "email": "a@b.com",
        "username": "alice",
        "roles": ["ADMIN"],
        "permissions": ["listing.approve"],
        "hasOTPValidated": true,
        "accountType": "admin"
    });
    let user: AuthUser = serde_json::from_value(raw).unwrap();
    assert!(user.email_verified);
    assert_eq!(user.roles, vec![Role::Admin]);
}

#[test]
fn sign_up_payload_omits_absent_seller_fields() {
    let payload = SignUpPayload {
        email: "a@b.com".to_owned(),
        password: "pw".to_owned(),
        username: "alice".to_owned(),
        account_type: AccountType::Buyer,
        ..SignUpPayload::default()
    };
    let value = serde_json::to_value(&payload).unwrap();
    assert_eq!(value["account_type"], serde_json::json!("buyer"));
    assert!(value.get("phone").is_none());
    assert!(value.get("company_name").is_none());
}
