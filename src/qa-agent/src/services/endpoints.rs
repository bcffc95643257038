//! Route strings for the portal APIs
//!
//! Relative routes are resolved by the gateway against the base URL and
//! version segment. `{placeholders}` are filled with [`with_param`].

pub mod identity {
    /// Served without the version segment
    pub const TOKEN: &str = "connect/token";
    pub const RESET_PASSWORD: &str = "Identity/Migration/ResetPasswordWithoutToken";
    pub const CONFIRM_EMAIL: &str = "Identity/Migration/ConfirmEmailWithoutToken";
}

pub mod admin {
    pub const SEARCH_PARTNER_BY_TEXT: &str = "Manage/Organization/Partner/All";
    pub const CREATE_CUSTOMER: &str = "Manage/Consumers";
    pub const CONSUMER_BY_ID: &str = "Manage/Consumers/{id}";
    pub const CREATE_PARTNER: &str = "Manage/Organization/Partner";
    pub const CUSTOMER_MANAGEMENT: &str = "Manage/CustomerManagement";
    pub const CUSTOMER_BY_ID: &str = "Manage/CustomerManagement/{id}";
    pub const PRODUCT_TYPE_FILTERS: &str = "Manage/Plan/ProductTypeFilter";
    pub const DEPARTMENTS: &str = "Configuration/Department";
    pub const ALL_DEPARTMENT_PLANS: &str = "Manage/Plan/Departments";
    pub const DEPARTMENT_PLANS: &str = "Manage/Plan";
    pub const DEPARTMENT_PAYMENT_PRODUCTS: &str = "Payment/products";
    pub const INVITE_MEMBERS: &str = "Manage/Teams/Invite";
}

pub mod member {
    pub const SIGN_UP_CONSUMER: &str = "Consumer/Consumers";
    pub const CHECK_OUT_PLAN: &str = "Payment/checkout";
    pub const PREVIEW_PAYMENT_CHANGES: &str = "Payment/PreviewChanges";
    pub const CURRENT_SUBSCRIBED_PLAN: &str = "Plan/me";
    pub const PLANS: &str = "Payment/products";
    pub const PAYMENT_STATUS: &str = "Payment/checkout/{guid}/PaymentStatus";
    pub const PAYMENT_SUBSCRIPTION: &str = "Payment/subscription/me";
    pub const INVITE_MEMBERS: &str = "Consumer/Teams/Invite";
}

pub mod partner {
    pub const BUSINESS: &str = "Partner/Manage/Partner/Business";
    pub const INVITE_MEMBER: &str = "Partner/Manage/Partner/Business/Invite";
    pub const PAYMENT_PRODUCTS: &str = "Partner/Manage/Payment/products";
    pub const PLANS: &str = "Partner/Manage/Plan";
    /// Only served under `v2`
    pub const TEAM_MEMBERS: &str = "Partner/Manage/Teams/{teamId}/Members";
    pub const TEAM_MEMBERS_VERSION: &str = "v2";
}

/// Replace `{name}` in `route` with `value`
pub fn with_param(route: &str, name: &str, value: &str) -> String {
    route.replace(&format!("{{{}}}", name), value)
}
