//! Route guard: turns session state plus route requirements into a decision.
//!
//! DESIGN
//! ======
//! The checks are an ordered table ([`GUARD_RULES`]) rather than nested
//! conditionals. Order is the contract: authentication before email
//! verification, verification before roles, roles before permissions. An
//! unverified account never reaches role-specific pages, and an anonymous
//! visitor is sent to login, never to the forbidden page.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::rbac::{Permission, Role};
use crate::routes;
use crate::session::{SessionSnapshot, SessionStatus};
use crate::user::AuthUser;

/// What a route demands of the current session. Gates compose.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteRequirements {
    pub require_auth: bool,
    pub require_verified: bool,
    /// Any one of these roles suffices. Empty means no role gate.
    pub roles: &'static [Role],
    /// Any one of these permissions suffices. Empty means no permission gate.
    pub permissions: &'static [Permission],
}

impl RouteRequirements {
    pub const PUBLIC: Self = Self { require_auth: false, require_verified: false, roles: &[], permissions: &[] };

    #[must_use]
    pub const fn authenticated() -> Self {
        Self { require_auth: true, ..Self::PUBLIC }
    }

    #[must_use]
    pub const fn verified(self) -> Self {
        Self { require_auth: true, require_verified: true, ..self }
    }

    #[must_use]
    pub const fn with_roles(self, roles: &'static [Role]) -> Self {
        Self { require_auth: true, roles, ..self }
    }

    #[must_use]
    pub const fn with_permissions(self, permissions: &'static [Permission]) -> Self {
        Self { require_auth: true, permissions, ..self }
    }

    #[must_use]
    pub fn is_public(&self) -> bool {
        !self.require_auth
    }
}

/// Why access was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForbiddenReason {
    MissingRole,
    MissingPermission,
}

/// Where to send the visitor instead of the requested page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Redirect {
    /// Not signed in. `from` is the path to return to after login.
    Login { from: String },
    /// Signed in but email not verified.
    VerifyEmail { email: String },
    /// Signed in and verified but not authorized.
    Forbidden(ForbiddenReason),
}

impl Redirect {
    /// Target URL (path plus query).
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Login { .. } => routes::LOGIN.to_owned(),
            Self::VerifyEmail { email } => routes::verify_otp_path(email),
            Self::Forbidden(_) => routes::FORBIDDEN.to_owned(),
        }
    }

    /// Short machine-readable reason, for logs.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Login { .. } => "unauthenticated",
            Self::VerifyEmail { .. } => "email-unverified",
            Self::Forbidden(ForbiddenReason::MissingRole) => "missing-role",
            Self::Forbidden(ForbiddenReason::MissingPermission) => "missing-permission",
        }
    }
}

/// Outcome of guarding one navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session still initializing; render nothing (or a placeholder).
    Pending,
    Render,
    Redirect(Redirect),
}

/// Everything the guard looks at.
#[derive(Clone, Copy, Debug)]
pub struct GuardInput<'a> {
    pub status: SessionStatus,
    pub user: Option<&'a AuthUser>,
    /// Requested path, recorded for the post-login return.
    pub path: &'a str,
}

impl<'a> GuardInput<'a> {
    #[must_use]
    pub fn from_snapshot(snapshot: &'a SessionSnapshot, path: &'a str) -> Self {
        Self { status: snapshot.status, user: snapshot.user.as_ref(), path }
    }
}

/// One guard check. `None` means "proceed to the next rule".
pub struct GuardRule {
    pub name: &'static str,
    pub check: fn(&GuardInput<'_>, &RouteRequirements) -> Option<GuardDecision>,
}

fn public_route(_: &GuardInput<'_>, req: &RouteRequirements) -> Option<GuardDecision> {
    req.is_public().then_some(GuardDecision::Render)
}

fn initializing(input: &GuardInput<'_>, _: &RouteRequirements) -> Option<GuardDecision> {
    (input.status == SessionStatus::Initializing).then_some(GuardDecision::Pending)
}

fn authenticated(input: &GuardInput<'_>, _: &RouteRequirements) -> Option<GuardDecision> {
    if input.user.is_some() {
        return None;
    }
    Some(GuardDecision::Redirect(Redirect::Login { from: input.path.to_owned() }))
}

fn email_verified(input: &GuardInput<'_>, req: &RouteRequirements) -> Option<GuardDecision> {
    let user = input.user?;
    if !req.require_verified || user.email_verified {
        return None;
    }
    Some(GuardDecision::Redirect(Redirect::VerifyEmail { email: user.email.clone() }))
}

fn role_gate(input: &GuardInput<'_>, req: &RouteRequirements) -> Option<GuardDecision> {
    let user = input.user?;
    if req.roles.is_empty() || user.has_any_role(req.roles) {
        return None;
    }
    Some(GuardDecision::Redirect(Redirect::Forbidden(ForbiddenReason::MissingRole)))
}

fn permission_gate(input: &GuardInput<'_>, req: &RouteRequirements) -> Option<GuardDecision> {
    let user = input.user?;
    if req.permissions.is_empty() || user.has_any_permission(req.permissions) {
        return None;
    }
    Some(GuardDecision::Redirect(Redirect::Forbidden(ForbiddenReason::MissingPermission)))
}

/// Guard checks in priority order; the first decision wins.
pub const GUARD_RULES: [GuardRule; 6] = [
    GuardRule { name: "public", check: public_route },
    GuardRule { name: "initializing", check: initializing },
    GuardRule { name: "authenticated", check: authenticated },
    GuardRule { name: "email-verified", check: email_verified },
    GuardRule { name: "role", check: role_gate },
    GuardRule { name: "permission", check: permission_gate },
];

/// Decide whether `input` may render a route with `requirements`.
#[must_use]
pub fn evaluate(input: &GuardInput<'_>, requirements: &RouteRequirements) -> GuardDecision {
    for rule in &GUARD_RULES {
        if let Some(decision) = (rule.check)(input, requirements) {
            if let GuardDecision::Redirect(redirect) = &decision {
                log::debug!("guard: {} -> {} ({})", input.path, redirect.path(), rule.name);
            }
            return decision;
        }
    }
    GuardDecision::Render
}

/// Guard `path` using the application route table.
#[must_use]
pub fn evaluate_path(snapshot: &SessionSnapshot, path: &str) -> GuardDecision {
    evaluate(&GuardInput::from_snapshot(snapshot, path), &routes::requirements_for(path))
}
