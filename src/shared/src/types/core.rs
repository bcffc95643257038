//! Test entity definitions
//!
//! These are the payload-shaped values the builders produce and the portal
//! services submit. Field names serialize to the camelCase the backend expects.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::catalog::{Country, Industry, PLANS};

// =============================================================================
// People
// =============================================================================

/// Account holder or team member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub job_title: String,
    pub phone_number: String,
    /// Admin portal account type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_type: Option<i32>,
    /// Member portal team role
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_consumer_type: Option<i32>,
}

impl Person {
    /// Copy without the password, as embedded in partner payloads
    pub fn without_password(&self) -> Person {
        Person {
            password: None,
            user_type: None,
            role: None,
            partner_consumer_type: None,
            ..self.clone()
        }
    }
}

// =============================================================================
// Customers
// =============================================================================

/// Portal a customer is created through
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Portal {
    #[default]
    Member,
    Admin,
}

/// Organization block of a customer
///
/// The common fields are always present; `portal` carries the subset each
/// portal's sign-up form accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub company_name: String,
    pub company_size: String,
    pub department_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<String>,
    #[serde(flatten)]
    pub portal: PortalCompanyFields,
}

impl Company {
    pub fn portal(&self) -> Portal {
        match self.portal {
            PortalCompanyFields::Member(_) => Portal::Member,
            PortalCompanyFields::Admin(_) => Portal::Admin,
        }
    }

    pub fn member_fields(&self) -> Option<&MemberCompanyFields> {
        match &self.portal {
            PortalCompanyFields::Member(fields) => Some(fields),
            PortalCompanyFields::Admin(_) => None,
        }
    }

    pub fn admin_fields(&self) -> Option<&AdminCompanyFields> {
        match &self.portal {
            PortalCompanyFields::Admin(fields) => Some(fields),
            PortalCompanyFields::Member(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PortalCompanyFields {
    Member(MemberCompanyFields),
    Admin(AdminCompanyFields),
}

/// Member portal self sign-up fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberCompanyFields {
    pub source: String,
    pub sso_provider: Option<String>,
    pub sso_token: Option<String>,
}

/// Admin portal customer management fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminCompanyFields {
    pub use_credit: bool,
    pub states_employee: Vec<String>,
    pub country: Country,
    pub total_employees: u32,
    pub is_sso: bool,
    #[serde(rename = "type")]
    pub company_type: i32,
    pub partner_consultant_id: String,
    pub industry: Option<Vec<Industry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<u32>,
    #[serde(
        rename = "billingcycle",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub billing_cycle: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial_days: Option<u32>,
}

/// Customer account with its organization and invited members
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerEntity {
    pub account_info: Person,
    pub company: Company,
    pub plan: String,
    /// Insertion order is kept; tests address members by index.
    pub members: Vec<Person>,
}

impl CustomerEntity {
    /// Sign-up body: account fields and company fields side by side
    pub fn to_payload(&self) -> serde_json::Result<Value> {
        merge_objects(
            serde_json::to_value(&self.account_info)?,
            serde_json::to_value(&self.company)?,
        )
    }
}

pub fn default_plan() -> String {
    PLANS[0].to_string()
}

// =============================================================================
// Partners
// =============================================================================

/// Partner level; glossary: Partner (0), PEO / Consultant (1)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum PartnerLevel {
    #[default]
    Partner,
    Peo,
}

impl From<PartnerLevel> for u8 {
    fn from(level: PartnerLevel) -> Self {
        match level {
            PartnerLevel::Partner => 0,
            PartnerLevel::Peo => 1,
        }
    }
}

impl TryFrom<u8> for PartnerLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PartnerLevel::Partner),
            1 => Ok(PartnerLevel::Peo),
            other => Err(format!("unknown partner level {}", other)),
        }
    }
}

/// Feature entitlements of a partner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restriction {
    pub e_sign_enable: bool,
    pub product_support: bool,
    pub resource_request: bool,
    pub contact_expert: bool,
    pub sso_enable: bool,
    pub lms_enable: bool,
    pub hr_tools_enable: bool,
    /// Product types visible to the partner's members
    pub fe_filter_product_types: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerInfo {
    pub restriction: Restriction,
    pub who_pay: u8,
    pub api_enable: bool,
    pub department_id: String,
    pub bank_transfer: bool,
    pub can_custom_update_plan: bool,
    pub company_type: u8,
    pub is_public: bool,
    pub level: PartnerLevel,
    pub name: String,
    pub partner_type: u8,
    pub payment_enable: bool,
    pub sub_domain: String,
    pub user_info: Person,
    /// Present only when bank transfer is enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_cycle: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerEntity {
    pub account_info: Person,
    pub partner_info: PartnerInfo,
}

impl PartnerEntity {
    /// Create-partner body: partner block overlaid with the account fields
    pub fn to_payload(&self) -> serde_json::Result<Value> {
        merge_objects(
            serde_json::to_value(&self.partner_info)?,
            serde_json::to_value(&self.account_info)?,
        )
    }
}

// =============================================================================
// Reference data
// =============================================================================

/// One purchasable product of a department, paired with the plan offering it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInfo {
    pub product_type: u32,
    pub product_name: String,
    pub plan_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDepartment")]
pub struct Department {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub domain: Option<DepartmentDomain>,
}

impl Department {
    /// Partner portal host of this department, if the backend reports one
    pub fn partner_domain(&self) -> Option<&str> {
        match self.domain.as_ref()? {
            DepartmentDomain::Plain(domain) => Some(domain.as_str()),
            DepartmentDomain::Portals(portals) => portals.partner.as_deref(),
        }
    }
}

/// Department as sent on the wire; the id arrives as `id`, `departmentId` or both
#[derive(Deserialize)]
struct RawDepartment {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "departmentId")]
    department_id: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    domain: Option<DepartmentDomain>,
}

impl TryFrom<RawDepartment> for Department {
    type Error = String;

    fn try_from(raw: RawDepartment) -> Result<Self, Self::Error> {
        let id = raw
            .id
            .or(raw.department_id)
            .ok_or_else(|| "department has neither `id` nor `departmentId`".to_string())?;
        Ok(Department {
            id,
            name: raw.name,
            domain: raw.domain,
        })
    }
}

/// Older API versions return the domain as a bare host, newer ones per portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DepartmentDomain {
    Plain(String),
    Portals(PortalDomains),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalDomains {
    #[serde(default)]
    pub partner: Option<String>,
    #[serde(default)]
    pub member: Option<String>,
    #[serde(default)]
    pub admin: Option<String>,
}

/// Partner-level plan reference inside a department catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterPlan {
    pub master_plan_id: String,
    pub name: String,
}

fn merge_objects(base: Value, overlay: Value) -> serde_json::Result<Value> {
    let mut merged = Map::new();
    for value in [base, overlay] {
        match value {
            Value::Object(fields) => merged.extend(fields),
            other => {
                return Err(serde::ser::Error::custom(format!(
                    "expected an object to merge, got {}",
                    other
                )))
            }
        }
    }
    Ok(Value::Object(merged))
}
