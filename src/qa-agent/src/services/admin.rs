//! Admin portal calls: partner and customer management, catalog reads

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use portal_qa_shared::{
    CustomerEntity, Department, DepartmentCatalog, InviteMembersRequest, PartnerEntity,
    PartnerSearchResponse, PartnerSummary,
};

use super::endpoints::{admin, with_param};
use super::{decode_list, TokenSlot};
use crate::auth::{AuthTokenProvider, Credentials};
use crate::error::{HarnessError, Result};
use crate::gateway::{ApiRequest, RequestGateway, ResponseBody};
use crate::reference::CatalogSource;

/// Page size the admin UI uses for customer search
const CUSTOMER_PAGE_SIZE: u32 = 12;

#[derive(Debug)]
pub struct AdminPortalService {
    gateway: Arc<RequestGateway>,
    token: TokenSlot,
}

impl AdminPortalService {
    pub fn new(gateway: Arc<RequestGateway>) -> Self {
        Self {
            gateway,
            token: TokenSlot::default(),
        }
    }

    /// Build the service and try to pre-fetch an admin token.
    ///
    /// A failed fetch is logged and the service is returned without a token.
    pub async fn create(
        gateway: Arc<RequestGateway>,
        auth: Option<&AuthTokenProvider>,
        credentials: Option<&Credentials>,
    ) -> Self {
        let service = Self::new(gateway);
        if let (Some(auth), Some(credentials)) = (auth, credentials) {
            match auth.token_for(credentials).await {
                Ok(token) => service.token.set(token),
                Err(err) => warn!(
                    username = %credentials.username,
                    error = %err,
                    "AdminPortalService: failed to prefetch auth token"
                ),
            }
        }
        service
    }

    pub fn set_auth_token(&self, token: impl Into<String>) {
        self.token.set(token);
    }

    pub fn auth_token(&self) -> Option<String> {
        self.token.get()
    }

    fn authorized(&self, request: ApiRequest, token: Option<&str>, operation: &str) -> Result<ApiRequest> {
        Ok(request.bearer(self.token.resolve(token, &self.gateway, operation)?))
    }

    pub async fn search_partner_by_text(
        &self,
        text: &str,
        token: Option<&str>,
    ) -> Result<PartnerSearchResponse> {
        let request = self.authorized(
            ApiRequest::get(admin::SEARCH_PARTNER_BY_TEXT).query("SearchString", text),
            token,
            "search partner",
        )?;
        self.gateway.send_json(request).await
    }

    /// Identifiers of the first partner matching `text`, if any
    pub async fn search_partner(&self, text: &str, token: Option<&str>) -> Result<Option<PartnerSummary>> {
        let response = self.search_partner_by_text(text, token).await?;
        Ok(response.entities.first().map(PartnerSummary::from_entity))
    }

    pub async fn create_customer(&self, customer: &CustomerEntity) -> Result<ResponseBody> {
        let payload = customer
            .to_payload()
            .map_err(|err| HarnessError::encode("customer payload", err))?;
        let request = self.authorized(
            ApiRequest::post(admin::CREATE_CUSTOMER).json(&payload).expect(201),
            None,
            "create customer",
        )?;
        let body = self.gateway.send(request).await?;
        info!(email = %customer.account_info.email, "Created customer through admin portal");
        Ok(body)
    }

    pub async fn create_partner(&self, partner: &PartnerEntity) -> Result<ResponseBody> {
        let payload = partner
            .to_payload()
            .map_err(|err| HarnessError::encode("partner payload", err))?;
        let request = self.authorized(
            ApiRequest::post(admin::CREATE_PARTNER).json(&payload),
            None,
            "create partner",
        )?;
        let body = self.gateway.send(request).await?;
        info!(name = %partner.partner_info.name, "Created partner");
        Ok(body)
    }

    pub async fn consumer_by_id(&self, id: &str) -> Result<Value> {
        let request = self.authorized(
            ApiRequest::get(with_param(admin::CONSUMER_BY_ID, "id", id)),
            None,
            "get consumer",
        )?;
        self.gateway.send_json(request).await
    }

    pub async fn customer(&self, id: &str) -> Result<Value> {
        let request = self.authorized(
            ApiRequest::get(with_param(admin::CUSTOMER_BY_ID, "id", id)),
            None,
            "get customer",
        )?;
        self.gateway.send_json(request).await
    }

    /// Customer management search for `email`, newest first
    pub async fn customer_by_email(&self, email: &str) -> Result<Value> {
        let mut request = ApiRequest::get(admin::CUSTOMER_MANAGEMENT);
        for blank in [
            "AccountStatus",
            "AccountType",
            "BillingCycle",
            "DepartmentId",
            "PartnerId",
            "PartnerLevel",
            "PaymentStatus",
            "SearchString",
            "Source",
            "StripeProductId",
            "UserType",
        ] {
            request = request.query(blank, "");
        }
        let request = request
            .query("Length", CUSTOMER_PAGE_SIZE)
            .query("OrderBy", "updatedAt desc")
            .query("Search", email)
            .query("Start", 0);

        let request = self.authorized(request, None, "search customer")?;
        self.gateway.send_json(request).await
    }

    pub async fn product_type_filters(&self) -> Result<Value> {
        let request = self.authorized(
            ApiRequest::get(admin::PRODUCT_TYPE_FILTERS),
            None,
            "list product type filters",
        )?;
        self.gateway.send_json(request).await
    }

    pub async fn departments(&self) -> Result<Vec<Department>> {
        let request = self.authorized(ApiRequest::get(admin::DEPARTMENTS), None, "list departments")?;
        let value: Value = self.gateway.send_json(request).await?;
        decode_list(value, "department list")
    }

    /// Every department with its plans and their products
    pub async fn department_plans(&self) -> Result<Vec<DepartmentCatalog>> {
        let request = self.authorized(
            ApiRequest::get(admin::ALL_DEPARTMENT_PLANS),
            None,
            "list department plans",
        )?;
        let value: Value = self.gateway.send_json(request).await?;
        decode_list(value, "department plan catalog")
    }

    pub async fn department_plan_list(&self, department_id: &str) -> Result<Value> {
        let request = self.authorized(
            ApiRequest::get(admin::DEPARTMENT_PLANS).query("DepartmentId", department_id),
            None,
            "list plans of department",
        )?;
        self.gateway.send_json(request).await
    }

    pub async fn department_payment_products(&self, department_id: &str) -> Result<Value> {
        let request = self.authorized(
            ApiRequest::get(admin::DEPARTMENT_PAYMENT_PRODUCTS).query("departmentId", department_id),
            None,
            "list payment products of department",
        )?;
        self.gateway.send_json(request).await
    }

    pub async fn invite_members(&self, invite: &InviteMembersRequest) -> Result<ResponseBody> {
        let request = self.authorized(
            ApiRequest::post(admin::INVITE_MEMBERS).json(invite),
            None,
            "invite members",
        )?;
        self.gateway.send(request).await
    }
}

#[async_trait]
impl CatalogSource for AdminPortalService {
    async fn departments(&self) -> Result<Vec<Department>> {
        AdminPortalService::departments(self).await
    }

    async fn department_plans(&self) -> Result<Vec<DepartmentCatalog>> {
        AdminPortalService::department_plans(self).await
    }
}
