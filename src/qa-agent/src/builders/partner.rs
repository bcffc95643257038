//! Partner builder for admin portal partner creation

use portal_qa_shared::{
    PartnerEntity, PartnerInfo, PartnerLevel, PaymentOption, ProductInfo, Restriction,
    DEFAULT_DEPARTMENT_ID,
};

use super::person::PersonBuilder;
use crate::generator;

/// Billing cycle used for bank-transfer partners when none is given
const DEFAULT_BILLING_CYCLE: u8 = 1;

/// Restriction flags; unset flags stay enabled
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestrictionOverrides {
    pub e_sign_enable: Option<bool>,
    pub product_support: Option<bool>,
    pub resource_request: Option<bool>,
    pub contact_expert: Option<bool>,
    pub sso_enable: Option<bool>,
    pub lms_enable: Option<bool>,
    pub hr_tools_enable: Option<bool>,
}

impl RestrictionOverrides {
    fn merge(&mut self, other: RestrictionOverrides) {
        macro_rules! take {
            ($($field:ident),*) => {
                $(if other.$field.is_some() { self.$field = other.$field; })*
            };
        }
        take!(
            e_sign_enable,
            product_support,
            resource_request,
            contact_expert,
            sso_enable,
            lms_enable,
            hr_tools_enable
        );
    }
}

/// Fluent builder for [`PartnerEntity`]
///
/// Setting a plan id switches the partner to plan-driven billing, which
/// fixes `billingCycle`, `canCustomUpdatePlan`, `companyType`,
/// `paymentEnable` and `bankTransfer` regardless of their own overrides.
#[derive(Debug, Clone, Default)]
pub struct PartnerBuilder {
    account: PersonBuilder,
    level: Option<PartnerLevel>,
    name: Option<String>,
    department_id: Option<String>,
    sub_domain: Option<String>,
    bank_transfer: Option<bool>,
    can_custom_update_plan: Option<bool>,
    company_type: Option<u8>,
    is_public: Option<bool>,
    partner_type: Option<u8>,
    payment_enable: Option<bool>,
    billing_cycle: Option<u8>,
    api_enable: Option<bool>,
    who_pay: Option<PaymentOption>,
    plan_id: Option<String>,
    restriction: RestrictionOverrides,
    filter_product_types: Vec<u32>,
}

impl PartnerBuilder {
    pub fn new() -> Self {
        Self::default()
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

    pub fn with_level(mut self, level: PartnerLevel) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_department(mut self, department_id: impl Into<String>) -> Self {
        self.department_id = Some(department_id.into());
        self
    }

    pub fn with_sub_domain(mut self, sub_domain: impl Into<String>) -> Self {
        self.sub_domain = Some(sub_domain.into());
        self
    }

    pub fn with_bank_transfer(mut self, enabled: bool) -> Self {
        self.bank_transfer = Some(enabled);
        self
    }

    pub fn with_can_custom_update_plan(mut self, enabled: bool) -> Self {
        self.can_custom_update_plan = Some(enabled);
        self
    }

    pub fn with_company_type(mut self, company_type: u8) -> Self {
        self.company_type = Some(company_type);
        self
    }

    pub fn with_is_public(mut self, is_public: bool) -> Self {
        self.is_public = Some(is_public);
        self
    }

    pub fn with_partner_type(mut self, partner_type: u8) -> Self {
        self.partner_type = Some(partner_type);
        self
    }

    pub fn with_payment_enable(mut self, enabled: bool) -> Self {
        self.payment_enable = Some(enabled);
        self
    }

    /// Only sent when bank transfer ends up enabled
    pub fn with_billing_cycle(mut self, billing_cycle: u8) -> Self {
        self.billing_cycle = Some(billing_cycle);
        self
    }

    pub fn with_api_enable(mut self, enabled: bool) -> Self {
        self.api_enable = Some(enabled);
        self
    }

    pub fn with_who_pay(mut self, who_pay: PaymentOption) -> Self {
        self.who_pay = Some(who_pay);
        self
    }

    pub fn with_plan_id(mut self, plan_id: impl Into<String>) -> Self {
        self.plan_id = Some(plan_id.into());
        self
    }

    pub fn with_restriction(mut self, overrides: RestrictionOverrides) -> Self {
        self.restriction.merge(overrides);
        self
    }

    /// Product types visible to the partner's members
    pub fn with_filter_product_types(mut self, products: &[ProductInfo]) -> Self {
        self.filter_product_types = products.iter().map(|p| p.product_type).collect();
        self
    }

    pub fn with_filter_product_type_ids(mut self, product_types: &[u32]) -> Self {
        self.filter_product_types = product_types.to_vec();
        self
    }

    /// Resolve every unset field. Each call generates fresh values.
    pub fn build(&self) -> PartnerEntity {
        let account = self.account.build();
        let name = self.name.clone().unwrap_or_else(|| {
            format!(
                "{}{}",
                generator::alphanumeric(&generator::first_name()),
                generator::random_int(1, 9999)
            )
        });

        let mut bank_transfer = self.bank_transfer.unwrap_or_else(generator::random_bool);
        let mut can_custom_update_plan = self
            .can_custom_update_plan
            .unwrap_or_else(generator::random_bool);
        let mut company_type = self.company_type.unwrap_or_else(generator::random_binary);
        let mut payment_enable = self.payment_enable.unwrap_or_else(generator::random_bool);
        let mut billing_cycle = self.billing_cycle.unwrap_or(DEFAULT_BILLING_CYCLE);

        if self.plan_id.is_some() {
            billing_cycle = 0;
            can_custom_update_plan = false;
            company_type = 1;
            payment_enable = true;
            bank_transfer = true;
        }

        let restriction = Restriction {
            e_sign_enable: self.restriction.e_sign_enable.unwrap_or(true),
            product_support: self.restriction.product_support.unwrap_or(true),
            resource_request: self.restriction.resource_request.unwrap_or(true),
            contact_expert: self.restriction.contact_expert.unwrap_or(true),
            sso_enable: self.restriction.sso_enable.unwrap_or(true),
            lms_enable: self.restriction.lms_enable.unwrap_or(true),
            hr_tools_enable: self.restriction.hr_tools_enable.unwrap_or(true),
            fe_filter_product_types: self.filter_product_types.clone(),
        };

        let who_pay = self
            .who_pay
            .or_else(|| generator::choose_random(&PaymentOption::ALL).copied())
            .unwrap_or(PaymentOption::PartnerConsultantOwner);

        let partner_info = PartnerInfo {
            restriction,
            who_pay: who_pay.code(),
            api_enable: self.api_enable.unwrap_or(false),
            department_id: self
                .department_id
                .clone()
                .unwrap_or_else(|| DEFAULT_DEPARTMENT_ID.to_string()),
            bank_transfer,
            can_custom_update_plan,
            company_type,
            is_public: self.is_public.unwrap_or_else(generator::random_bool),
            level: self.level.unwrap_or_default(),
            sub_domain: self.sub_domain.clone().unwrap_or_else(|| name.clone()),
            name,
            partner_type: self.partner_type.unwrap_or_else(generator::random_binary),
            payment_enable,
            user_info: account.without_password(),
            billing_cycle: bank_transfer.then_some(billing_cycle),
            plan_id: self.plan_id.clone(),
        };

        PartnerEntity {
            account_info: account,
            partner_info,
        }
    }
}
