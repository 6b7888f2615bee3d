//! Closed role and permission sets plus the static role → permission table.
//!
//! DESIGN
//! ======
//! Roles and permissions are enums rather than strings so a misspelled
//! permission is a compile error instead of a silently denied page. The wire
//! spellings (`"SELLER_PRO"`, `"messages.access"`) live only in the serde
//! attributes and [`Permission::as_str`].

#[cfg(test)]
#[path = "rbac_test.rs"]
mod rbac_test;

use serde::{Deserialize, Serialize};

/// Role held by an authenticated user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    SuperAdmin,
    Admin,
    SellerPro,
    SellerParticular,
    Buyer,
}

/// Fine-grained capability granted through roles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    #[serde(rename = "listing.create")]
    ListingCreate,
    #[serde(rename = "listing.edit.own")]
    ListingEditOwn,
    #[serde(rename = "listing.delete.own")]
    ListingDeleteOwn,
    #[serde(rename = "listing.approve")]
    ListingApprove,
    #[serde(rename = "listing.feature.buy")]
    ListingFeatureBuy,
    #[serde(rename = "feature.plan.manage")]
    FeaturePlanManage,
    #[serde(rename = "favorites.manage")]
    FavoritesManage,
    #[serde(rename = "messages.access")]
    MessagesAccess,
    #[serde(rename = "category.manage")]
    CategoryManage,
    #[serde(rename = "subcategory.manage")]
    SubcategoryManage,
    #[serde(rename = "vehicle.brand.manage")]
    VehicleBrandManage,
    #[serde(rename = "vehicle.model.manage")]
    VehicleModelManage,
    #[serde(rename = "admin.user.manage")]
    UserManage,
    #[serde(rename = "admin.seller.approve")]
    SellerApprove,
    #[serde(rename = "admin.stats.view")]
    AdminStatsView,
    #[serde(rename = "seller.stats.view")]
    SellerStatsView,
}

/// Account type tag as sent by the backend (`account_type`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    #[default]
    Buyer,
    SellerPro,
    SellerParticular,
    Admin,
    SuperAdmin,
}

const ALL_PERMISSIONS: &[Permission] = &[
    Permission::ListingCreate,
    Permission::ListingEditOwn,
    Permission::ListingDeleteOwn,
    Permission::ListingApprove,
    Permission::ListingFeatureBuy,
    Permission::FeaturePlanManage,
    Permission::FavoritesManage,
    Permission::MessagesAccess,
    Permission::CategoryManage,
    Permission::SubcategoryManage,
    Permission::VehicleBrandManage,
    Permission::VehicleModelManage,
    Permission::UserManage,
    Permission::SellerApprove,
    Permission::AdminStatsView,
    Permission::SellerStatsView,
];

const ADMIN_PERMISSIONS: &[Permission] = &[
    Permission::ListingCreate,
    Permission::ListingEditOwn,
    Permission::ListingDeleteOwn,
    Permission::ListingApprove,
    Permission::FeaturePlanManage,
    Permission::CategoryManage,
    Permission::SubcategoryManage,
    Permission::VehicleBrandManage,
    Permission::VehicleModelManage,
    Permission::UserManage,
    Permission::SellerApprove,
    Permission::AdminStatsView,
    Permission::FavoritesManage,
    Permission::MessagesAccess,
];

const SELLER_PERMISSIONS: &[Permission] = &[
    Permission::ListingCreate,
    Permission::ListingEditOwn,
    Permission::ListingDeleteOwn,
    Permission::ListingFeatureBuy,
    Permission::FavoritesManage,
    Permission::MessagesAccess,
    Permission::SellerStatsView,
];

const BUYER_PERMISSIONS: &[Permission] = &[Permission::FavoritesManage, Permission::MessagesAccess];

impl Role {
    /// Every role, in descending order of privilege.
    pub const ALL: [Role; 5] = [Role::SuperAdmin, Role::Admin, Role::SellerPro, Role::SellerParticular, Role::Buyer];

    /// Permissions granted by this role.
    #[must_use]
    pub fn permissions(self) -> &'static [Permission] {
        match self {
            Self::SuperAdmin => ALL_PERMISSIONS,
            Self::Admin => ADMIN_PERMISSIONS,
            Self::SellerPro | Self::SellerParticular => SELLER_PERMISSIONS,
            Self::Buyer => BUYER_PERMISSIONS,
        }
    }

    /// Wire spelling of the role.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SuperAdmin => "SUPER_ADMIN",
            Self::Admin => "ADMIN",
            Self::SellerPro => "SELLER_PRO",
            Self::SellerParticular => "SELLER_PARTICULAR",
            Self::Buyer => "BUYER",
        }
    }
}

impl Permission {
    /// Every permission known to the client.
    #[must_use]
    pub fn all() -> &'static [Permission] {
        ALL_PERMISSIONS
    }

    /// Wire spelling of the permission (e.g. `"messages.access"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ListingCreate => "listing.create",
            Self::ListingEditOwn => "listing.edit.own",
            Self::ListingDeleteOwn => "listing.delete.own",
            Self::ListingApprove => "listing.approve",
            Self::ListingFeatureBuy => "listing.feature.buy",
            Self::FeaturePlanManage => "feature.plan.manage",
            Self::FavoritesManage => "favorites.manage",
            Self::MessagesAccess => "messages.access",
            Self::CategoryManage => "category.manage",
            Self::SubcategoryManage => "subcategory.manage",
            Self::VehicleBrandManage => "vehicle.brand.manage",
            Self::VehicleModelManage => "vehicle.model.manage",
            Self::UserManage => "admin.user.manage",
            Self::SellerApprove => "admin.seller.approve",
            Self::AdminStatsView => "admin.stats.view",
            Self::SellerStatsView => "seller.stats.view",
        }
    }

    /// Parse a wire spelling back into a permission.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        ALL_PERMISSIONS.iter().copied().find(|p| p.as_str() == raw)
    }
}

impl AccountType {
    /// Role assigned to accounts of this type.
    #[must_use]
    pub fn role(self) -> Role {
        match self {
            Self::Buyer => Role::Buyer,
            Self::SellerPro => Role::SellerPro,
            Self::SellerParticular => Role::SellerParticular,
            Self::Admin => Role::Admin,
            Self::SuperAdmin => Role::SuperAdmin,
        }
    }

    /// Wire spelling of the account type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Buyer => "buyer",
            Self::SellerPro => "seller_pro",
            Self::SellerParticular => "seller_particular",
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
        }
    }

    /// Parse a wire tag. Unknown tags yield `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        [Self::Buyer, Self::SellerPro, Self::SellerParticular, Self::Admin, Self::SuperAdmin]
            .into_iter()
            .find(|t| t.as_str() == raw)
    }

    /// Account type for a backend tag; missing or unrecognized tags are buyers.
    #[must_use]
    pub fn from_tag(raw: Option<&str>) -> Self {
        raw.and_then(Self::parse).unwrap_or_default()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Union of the permissions granted by `roles`, first occurrence order, no duplicates.
#[must_use]
pub fn effective_permissions(roles: &[Role]) -> Vec<Permission> {
    let mut out: Vec<Permission> = Vec::new();
    for role in roles {
        for permission in role.permissions() {
            if !out.contains(permission) {
                out.push(*permission);
            }
        }
    }
    out
}
