//! Application paths and their access requirements.
//!
//! Paths not listed in the table are public; the router's not-found page
//! handles anything that does not exist.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use crate::guard::RouteRequirements;
use crate::rbac::{Permission, Role};

pub const HOME: &str = "/";
pub const LOGIN: &str = "/login";
pub const REGISTER: &str = "/register";
pub const VERIFY_OTP: &str = "/verify-otp";
pub const FORGOT_PASSWORD: &str = "/forgot-password";
pub const FORBIDDEN: &str = "/forbidden";
pub const NOT_FOUND: &str = "/notfound";
pub const PROFILE: &str = "/profile";
pub const MESSAGES: &str = "/messages";

const ADMIN_ROLES: &[Role] = &[Role::Admin, Role::SuperAdmin];

struct RouteRule {
    path: &'static str,
    /// Also applies to every `path/...` descendant.
    nested: bool,
    requirements: RouteRequirements,
}

const fn exact(path: &'static str, requirements: RouteRequirements) -> RouteRule {
    RouteRule { path, nested: false, requirements }
}

const fn nested(path: &'static str, requirements: RouteRequirements) -> RouteRule {
    RouteRule { path, nested: true, requirements }
}

const MEMBER: RouteRequirements = RouteRequirements::authenticated().verified();
const SELLER: RouteRequirements = MEMBER.with_permissions(&[Permission::ListingCreate]);
const SELLER_STATS: RouteRequirements = MEMBER.with_permissions(&[Permission::SellerStatsView]);

const ROUTE_TABLE: &[RouteRule] = &[
    exact(PROFILE, MEMBER),
    exact("/account", MEMBER),
    exact("/account/security", MEMBER),
    exact("/favorites", MEMBER.with_permissions(&[Permission::FavoritesManage])),
    nested(MESSAGES, MEMBER.with_permissions(&[Permission::MessagesAccess])),
    exact("/create-listing", SELLER),
    exact("/create-request", SELLER),
    exact("/my-listings", SELLER),
    exact("/seller/dashboard", SELLER_STATS),
    exact("/seller/stats", SELLER_STATS),
    exact("/seller/featured-orders", SELLER_STATS),
    nested("/admin", MEMBER.with_roles(ADMIN_ROLES)),
];

/// Strip query string, fragment, and trailing slash (except for `/`).
#[must_use]
pub fn normalize_path(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = &path[..end];
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { HOME } else { trimmed }
}

/// Requirements for navigating to `path`.
#[must_use]
pub fn requirements_for(path: &str) -> RouteRequirements {
    let path = normalize_path(path);
    ROUTE_TABLE
        .iter()
        .find(|rule| {
            path == rule.path
                || (rule.nested && path.strip_prefix(rule.path).is_some_and(|rest| rest.starts_with('/')))
        })
        .map_or(RouteRequirements::PUBLIC, |rule| rule.requirements)
}

/// Every path that needs a signed-in user.
#[must_use]
pub fn protected_paths() -> Vec<&'static str> {
    ROUTE_TABLE.iter().map(|rule| rule.path).collect()
}

/// `/verify-otp?email=<encoded>`.
#[must_use]
pub fn verify_otp_path(email: &str) -> String {
    format!("{VERIFY_OTP}?email={}", urlencoding::encode(email))
}
