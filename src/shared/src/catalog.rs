//! Static catalog values the portals accept without a lookup
//!
//! These mirror fixed entries in the backend's reference tables. Anything that
//! varies per environment (departments, plan ids, product types) is fetched at
//! run time instead.

use serde::{Deserialize, Serialize};

/// Plan names as they appear in the member and partner portals, cheapest first.
pub const PLANS: [&str; 5] = [
    "Under 50 Employees",
    "50 - 100 Employees",
    "101 - 250 Employees",
    "251 - 500 Employees",
    "500+ Employees & HR Consultants",
];

/// Department reserved for the in-house HR tenant; never picked at random.
pub const LOCAL_HR_DEPARTMENT_ID: &str = "6891c8c2b34bb84b18eae816";

/// Department used when a builder is given none.
pub const DEFAULT_DEPARTMENT_ID: &str = "688897d5eb52b4af5573def4";

/// Mailbox domain for generated accounts. Inboxes are public and need no setup.
pub const EMAIL_DOMAIN: &str = "yopmail.com";

/// Country entry accepted by the admin portal customer form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub key: String,
    pub value: String,
}

impl Country {
    pub fn united_states() -> Self {
        Self {
            key: "US".to_string(),
            value: "United States".to_string(),
        }
    }
}

impl Default for Country {
    fn default() -> Self {
        Self::united_states()
    }
}

/// Industry entry accepted by the admin portal customer form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Industry {
    pub code: String,
    pub value: String,
}

impl Industry {
    pub fn accommodation() -> Self {
        Self {
            code: "ACCOMMODATION".to_string(),
            value: "Accommodation".to_string(),
        }
    }
}

impl Default for Industry {
    fn default() -> Self {
        Self::accommodation()
    }
}

/// Who pays for a partner's businesses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentOption {
    PartnerConsultantOwner,
    MemberPortalConsumer,
}

impl PaymentOption {
    pub const ALL: [PaymentOption; 2] = [
        PaymentOption::PartnerConsultantOwner,
        PaymentOption::MemberPortalConsumer,
    ];

    /// Numeric code sent as `whoPay`
    pub fn code(self) -> u8 {
        match self {
            PaymentOption::PartnerConsultantOwner => 0,
            PaymentOption::MemberPortalConsumer => 1,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            PaymentOption::PartnerConsultantOwner => "PartnerConsultantOwner",
            PaymentOption::MemberPortalConsumer => "MemberPortalConsumer",
        }
    }
}

impl std::fmt::Display for PaymentOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}
