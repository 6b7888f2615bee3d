//! Local form checks that run before any request is sent.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use crate::error::AuthError;
use crate::rbac::AccountType;
use crate::user::{SellerType, SignUpPayload};

pub const CODE_LENGTH: usize = 6;

pub const MSG_LOGIN_FIELDS: &str = "Enter your email and password.";
pub const MSG_EMAIL_REQUIRED: &str = "Enter your email first.";
pub const MSG_PASSWORD_MISMATCH: &str = "Passwords do not match.";
pub const MSG_SELLER_PHONE: &str = "A phone number is required for sellers.";
pub const MSG_COMPANY_NAME: &str = "A company name is required for professional sellers.";
pub const MSG_VERIFY_EMAIL_MISSING: &str = "Email is missing. Please use the link from your registration.";
pub const MSG_CODE_LENGTH: &str = "Enter the 6 digits of your verification code.";
pub const MSG_NEW_PASSWORD: &str = "Enter a new password.";

fn invalid(message: &str) -> AuthError {
    AuthError::Validation(message.to_owned())
}

/// Raw registration form input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub email: String,
    pub username: String,
    pub password: String,
    pub password_confirm: String,
    pub wants_to_sell: bool,
    pub seller_type: Option<SellerType>,
    pub phone: String,
    pub whatsapp: String,
    pub company_name: String,
}

impl RegisterForm {
    /// Account type implied by the seller checkbox and seller type.
    #[must_use]
    pub fn account_type(&self) -> AccountType {
        match (self.wants_to_sell, self.seller_type) {
            (false, _) => AccountType::Buyer,
            (true, Some(SellerType::Professional)) => AccountType::SellerPro,
            (true, _) => AccountType::SellerParticular,
        }
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_owned()) }
}

/// Check a registration form and build the request payload.
///
/// Seller-only fields are sent only for sellers; the company name only for
/// professional sellers.
///
/// # Errors
///
/// Returns [`AuthError::Validation`] for mismatched passwords, a seller
/// without a phone, or a professional seller without a company name.
pub fn validate_registration(form: &RegisterForm) -> Result<SignUpPayload, AuthError> {
    if form.password != form.password_confirm {
        return Err(invalid(MSG_PASSWORD_MISMATCH));
    }
    let account_type = form.account_type();
    let is_seller = account_type != AccountType::Buyer;
    if is_seller && form.phone.trim().is_empty() {
        return Err(invalid(MSG_SELLER_PHONE));
    }
    let is_pro = account_type == AccountType::SellerPro;
    if is_pro && form.company_name.trim().is_empty() {
        return Err(invalid(MSG_COMPANY_NAME));
    }

    Ok(SignUpPayload {
        email: form.email.trim().to_owned(),
        password: form.password.clone(),
        username: form.username.trim().to_owned(),
        account_type,
        seller_type: if is_seller { Some(form.seller_type.unwrap_or(SellerType::Particular)) } else { None },
        phone: if is_seller { optional(&form.phone) } else { None },
        whatsapp: if is_seller { optional(&form.whatsapp) } else { None },
        company_name: if is_pro { optional(&form.company_name) } else { None },
        siret: None,
    })
}

/// Trim and require both login fields.
///
/// # Errors
///
/// Returns [`AuthError::Validation`] if either field is blank.
pub fn validate_login(email: &str, password: &str) -> Result<(String, String), AuthError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(invalid(MSG_LOGIN_FIELDS));
    }
    Ok((email.to_owned(), password.to_owned()))
}

/// Require an email before requesting a password-reset code.
///
/// # Errors
///
/// Returns [`AuthError::Validation`] if the email is blank.
pub fn validate_email(email: &str) -> Result<String, AuthError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(invalid(MSG_EMAIL_REQUIRED));
    }
    Ok(email.to_owned())
}

/// Keep only ASCII digits, up to [`CODE_LENGTH`] of them.
#[must_use]
pub fn normalize_code_input(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).take(CODE_LENGTH).collect()
}

/// Check the email and one-time code of the verification page.
///
/// # Errors
///
/// Returns [`AuthError::Validation`] if the email is missing or the code is
/// not exactly six digits.
pub fn validate_verification(email: &str, code: &str) -> Result<(String, String), AuthError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(invalid(MSG_VERIFY_EMAIL_MISSING));
    }
    let code = code.trim();
    if code.len() != CODE_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid(MSG_CODE_LENGTH));
    }
    Ok((email.to_owned(), code.to_owned()))
}

/// Check the inputs of the final reset-password step.
///
/// # Errors
///
/// Returns [`AuthError::Validation`] for a bad code, an empty password, or a
/// confirmation that does not match.
pub fn validate_password_reset(
    email: &str,
    code: &str,
    password: &str,
    confirm: &str,
) -> Result<(String, String), AuthError> {
    let (email, code) = validate_verification(email, code)?;
    if password.is_empty() {
        return Err(invalid(MSG_NEW_PASSWORD));
    }
    if password != confirm {
        return Err(invalid(MSG_PASSWORD_MISMATCH));
    }
    Ok((email, code))
}

/// Mask an email for display: `jo***@g*****.com`.
#[must_use]
pub fn mask_email(email: &str) -> String {
    let Some((local, domain)) = email.split_once('@') else {
        return email.to_owned();
    };
    let visible_local: String = local.chars().take(2).collect();
    let masked_local = "*".repeat(local.chars().count().saturating_sub(2).max(3));
    let Some((domain_name, tld)) = domain.split_once('.') else {
        return format!("{visible_local}{masked_local}@{domain}");
    };
    let visible_domain: String = domain_name.chars().take(1).collect();
    let masked_domain = "*".repeat(domain_name.chars().count().saturating_sub(1).max(3));
    format!("{visible_local}{masked_local}@{visible_domain}{masked_domain}.{tld}")
}
