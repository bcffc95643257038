//! Entity and wire types shared by the harness crates

pub mod api;
pub mod core;

pub use self::core::{
    default_plan, AdminCompanyFields, Company, CustomerEntity, Department, DepartmentDomain,
    MasterPlan, MemberCompanyFields, PartnerEntity, PartnerInfo, PartnerLevel, Person, Portal,
    PortalCompanyFields, PortalDomains, ProductInfo, Restriction,
};

pub use self::api::{
    CatalogPlan, CatalogProduct, CreateBusinessRequest, DepartmentCatalog, EmailConfirmRequest,
    InviteMembersRequest, InviteRecipient, PartnerPlan, PartnerSearchResponse, PartnerSummary,
    PasswordResetRequest, TokenRequest, TokenResponse,
};
