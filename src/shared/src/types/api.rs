//! Wire request and response types for the portal APIs
//!
//! Only the fields the harness reads are modeled; everything else the backend
//! sends is ignored on decode.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::core::Person;

// =============================================================================
// Identity
// =============================================================================

/// Password-grant body. Keys are snake_case on this endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
    pub client_id: String,
    pub grant_type: String,
    pub scope: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PasswordResetRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmailConfirmRequest {
    pub email: String,
}

// =============================================================================
// Catalog
// =============================================================================

/// One department's entry in the all-departments plan catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawDepartmentCatalog")]
pub struct DepartmentCatalog {
    pub department_id: String,
    pub plans: Vec<CatalogPlan>,
}

/// Catalog entry as sent on the wire. `departmentId` wins over the entry's
/// own `id` when both are present.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDepartmentCatalog {
    #[serde(default)]
    department_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    plans: Vec<CatalogPlan>,
}

impl TryFrom<RawDepartmentCatalog> for DepartmentCatalog {
    type Error = String;

    fn try_from(raw: RawDepartmentCatalog) -> Result<Self, Self::Error> {
        let department_id = raw
            .department_id
            .or(raw.id)
            .ok_or_else(|| "catalog entry has neither `departmentId` nor `id`".to_string())?;
        Ok(DepartmentCatalog {
            department_id,
            plans: raw.plans,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPlan {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub products: Vec<CatalogProduct>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    pub product_type: u32,
}

/// Plan as listed in the partner portal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerPlan {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub product_type: Option<u32>,
}

// =============================================================================
// Partner management
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartnerSearchResponse {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub entities: Vec<Value>,
}

/// Identifiers of the first partner matching a search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartnerSummary {
    pub partner_id: Option<String>,
    pub department_id: Option<String>,
    pub sub_domain: Option<String>,
}

impl PartnerSummary {
    pub fn from_entity(entity: &Value) -> Self {
        let field = |key: &str| entity.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            partner_id: field("id"),
            department_id: field("departmentId"),
            sub_domain: field("subDomain"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBusinessRequest {
    pub partner_id: String,
    pub team_name: String,
    pub plan_id: String,
    pub assigned_ids: Vec<String>,
    pub recipients: Vec<Person>,
    pub use_credit: bool,
}

// =============================================================================
// Invitations
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteRecipient {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub job_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_consumer_type: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consultant_role: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_email_member_existed: Option<bool>,
}

impl InviteRecipient {
    pub fn from_person(person: &Person) -> Self {
        Self {
            email: person.email.clone(),
            first_name: person.first_name.clone(),
            last_name: person.last_name.clone(),
            phone_number: person.phone_number.clone(),
            job_title: person.job_title.clone(),
            role: person.role,
            partner_consumer_type: person.partner_consumer_type,
            consultant_role: None,
            is_email_member_existed: None,
        }
    }
}

/// Invitation body; `id` names the team or business when the route needs it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteMembersRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub recipients: Vec<InviteRecipient>,
}
