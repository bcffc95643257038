//! Customer builder for member portal sign-up and admin portal creation

use portal_qa_shared::{
    default_plan, AdminCompanyFields, Company, Country, CustomerEntity, Industry,
    MemberCompanyFields, Person, Portal, PortalCompanyFields, DEFAULT_DEPARTMENT_ID,
};

use super::person::PersonBuilder;
use crate::generator;

/// Source tag of member portal self sign-ups
const MEMBER_SOURCE: &str = "member";

/// Admin portal company fields; unset fields keep their defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminPortalOptions {
    pub use_credit: Option<bool>,
    pub states_employee: Option<Vec<String>>,
    pub country: Option<Country>,
    pub total_employees: Option<u32>,
    pub is_sso: Option<bool>,
    pub company_type: Option<i32>,
    pub partner_consultant_id: Option<String>,
    pub industry: Option<Vec<Industry>>,
    pub product_type: Option<u32>,
    pub billing_cycle: Option<u32>,
    pub trial_days: Option<u32>,
}

impl AdminPortalOptions {
    /// Fields set on `other` replace the ones set here
    pub fn merge(&mut self, other: AdminPortalOptions) {
        macro_rules! take {
            ($($field:ident),*) => {
                $(if other.$field.is_some() { self.$field = other.$field; })*
            };
        }
        take!(
            use_credit,
            states_employee,
            country,
            total_employees,
            is_sso,
            company_type,
            partner_consultant_id,
            industry,
            product_type,
            billing_cycle,
            trial_days
        );
    }

    fn resolve(&self) -> AdminCompanyFields {
        AdminCompanyFields {
            use_credit: self.use_credit.unwrap_or(false),
            states_employee: self.states_employee.clone().unwrap_or_default(),
            country: self.country.clone().unwrap_or_default(),
            total_employees: self.total_employees.unwrap_or(0),
            is_sso: self.is_sso.unwrap_or(false),
            company_type: self.company_type.unwrap_or(1),
            partner_consultant_id: self.partner_consultant_id.clone().unwrap_or_default(),
            industry: Some(
                self.industry
                    .clone()
                    .unwrap_or_else(|| vec![Industry::default()]),
            ),
            product_type: self.product_type,
            billing_cycle: self.billing_cycle,
            trial_days: self.trial_days,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct MemberPortalOptions {
    source: Option<String>,
    sso_provider: Option<String>,
    sso_token: Option<String>,
}

/// Fluent builder for [`CustomerEntity`]
///
/// Targets the member portal unless [`CustomerBuilder::for_admin_portal`] is
/// called. Every `with_*` call replaces the previous value for that field.
#[derive(Debug, Clone, Default)]
pub struct CustomerBuilder {
    portal: Portal,
    account: PersonBuilder,
    company_name: Option<String>,
    company_size: Option<String>,
    partner_id: Option<String>,
    department_id: Option<String>,
    plan: Option<String>,
    member: MemberPortalOptions,
    admin: AdminPortalOptions,
    members: Vec<PersonBuilder>,
}

impl CustomerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_member_portal(mut self) -> Self {
        self.portal = Portal::Member;
        self
    }

    pub fn for_admin_portal(mut self) -> Self {
        self.portal = Portal::Admin;
        self
    }

    pub fn for_portal(mut self, portal: Portal) -> Self {
        self.portal = portal;
        self
    }

    /// Account holder overrides, merged over earlier ones
    pub fn with_account(mut self, overrides: PersonBuilder) -> Self {
        self.account = self.account.merge(overrides);
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.account = self.account.email(email);
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.account = self.account.password(password);
        self
    }

    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.account = self.account.first_name(first_name);
        self
    }

    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.account = self.account.last_name(last_name);
        self
    }

    pub fn with_company_name(mut self, name: impl Into<String>) -> Self {
        self.company_name = Some(name.into());
        self
    }

    pub fn with_company_size(mut self, size: impl Into<String>) -> Self {
        self.company_size = Some(size.into());
        self
    }

    pub fn with_partner(mut self, partner_id: impl Into<String>) -> Self {
        self.partner_id = Some(partner_id.into());
        self
    }

    pub fn with_department(mut self, department_id: impl Into<String>) -> Self {
        self.department_id = Some(department_id.into());
        self
    }

    pub fn with_plan(mut self, plan: impl Into<String>) -> Self {
        self.plan = Some(plan.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.member.source = Some(source.into());
        self
    }

    pub fn with_sso(mut self, provider: impl Into<String>, token: impl Into<String>) -> Self {
        self.member.sso_provider = Some(provider.into());
        self.member.sso_token = Some(token.into());
        self
    }

    pub fn with_use_credit(mut self, use_credit: bool) -> Self {
        self.admin.use_credit = Some(use_credit);
        self
    }

    pub fn with_country(mut self, country: Country) -> Self {
        self.admin.country = Some(country);
        self
    }

    pub fn with_industry(mut self, industry: Vec<Industry>) -> Self {
        self.admin.industry = Some(industry);
        self
    }

    pub fn with_total_employees(mut self, total: u32) -> Self {
        self.admin.total_employees = Some(total);
        self
    }

    pub fn with_states_employee(mut self, states: Vec<String>) -> Self {
        self.admin.states_employee = Some(states);
        self
    }

    pub fn with_is_sso(mut self, is_sso: bool) -> Self {
        self.admin.is_sso = Some(is_sso);
        self
    }

    pub fn with_company_type(mut self, company_type: i32) -> Self {
        self.admin.company_type = Some(company_type);
        self
    }

    pub fn with_partner_consultant(mut self, consultant_id: impl Into<String>) -> Self {
        self.admin.partner_consultant_id = Some(consultant_id.into());
        self
    }

    pub fn with_product_type(mut self, product_type: u32) -> Self {
        self.admin.product_type = Some(product_type);
        self
    }

    pub fn with_billing_cycle(mut self, billing_cycle: u32) -> Self {
        self.admin.billing_cycle = Some(billing_cycle);
        self
    }

    pub fn with_trial_days(mut self, trial_days: u32) -> Self {
        self.admin.trial_days = Some(trial_days);
        self
    }

    pub fn with_admin_options(mut self, options: AdminPortalOptions) -> Self {
        self.admin.merge(options);
        self
    }

    /// Append one member; pass `PersonBuilder::new()` for an all-generated one
    pub fn with_member(mut self, overrides: PersonBuilder) -> Self {
        self.members.push(overrides);
        self
    }

    /// Append `count` fully generated members
    pub fn with_members(mut self, count: usize) -> Self {
        self.members
            .extend(std::iter::repeat_with(PersonBuilder::new).take(count));
        self
    }

    /// Resolve every unset field. Each call generates fresh values.
    pub fn build(&self) -> CustomerEntity {
        let portal = match self.portal {
            Portal::Member => PortalCompanyFields::Member(MemberCompanyFields {
                source: self
                    .member
                    .source
                    .clone()
                    .unwrap_or_else(|| MEMBER_SOURCE.to_string()),
                sso_provider: self.member.sso_provider.clone(),
                sso_token: self.member.sso_token.clone(),
            }),
            Portal::Admin => PortalCompanyFields::Admin(self.admin.resolve()),
        };

        let company = Company {
            company_name: self
                .company_name
                .clone()
                .unwrap_or_else(generator::company_name),
            company_size: self.company_size.clone().unwrap_or_default(),
            department_id: self
                .department_id
                .clone()
                .unwrap_or_else(|| DEFAULT_DEPARTMENT_ID.to_string()),
            partner_id: self.partner_id.clone(),
            portal,
        };

        CustomerEntity {
            account_info: self.account.build(),
            company,
            plan: self.plan.clone().unwrap_or_else(default_plan),
            members: self.members.iter().map(PersonBuilder::build).collect::<Vec<Person>>(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_qa_shared::PLANS;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_admin_options_merge_only_set_fields() {
        let mut options = AdminPortalOptions {
            trial_days: Some(14),
            use_credit: Some(true),
            ..AdminPortalOptions::default()
        };
        options.merge(AdminPortalOptions {
            trial_days: Some(30),
            ..AdminPortalOptions::default()
        });

        assert_eq!(options.trial_days, Some(30));
        assert_eq!(options.use_credit, Some(true));
    }

    #[test]
    fn test_admin_defaults() {
        let fields = AdminPortalOptions::default().resolve();
        assert!(!fields.use_credit);
        assert_eq!(fields.company_type, 1);
        assert_eq!(fields.country, Country::united_states());
        assert_eq!(fields.industry, Some(vec![Industry::accommodation()]));
        assert_eq!(fields.billing_cycle, None);
    }

    #[test]
    fn test_member_portal_is_default() {
        let customer = CustomerBuilder::new().build();
        assert_eq!(customer.company.portal(), Portal::Member);
        assert_eq!(
            customer.company.member_fields().map(|f| f.source.as_str()),
            Some("member")
        );
        assert_eq!(customer.company.department_id, DEFAULT_DEPARTMENT_ID);
        assert_eq!(customer.plan, PLANS[0]);
    }
}
