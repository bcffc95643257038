//! Partner portal calls: businesses, plans and member invitations

use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use portal_qa_shared::{CreateBusinessRequest, InviteMembersRequest, InviteRecipient, PartnerPlan, Person};

use super::endpoints::{partner, with_param};
use super::{decode_list, TokenSlot};
use crate::error::Result;
use crate::gateway::{ApiRequest, RequestGateway, ResponseBody};

/// `partnerConsumerType` of members invited by a partner
const PARTNER_INVITED_CONSUMER: i32 = 1;

#[derive(Debug)]
pub struct PartnerPortalService {
    gateway: Arc<RequestGateway>,
    token: TokenSlot,
}

impl PartnerPortalService {
    pub fn new(gateway: Arc<RequestGateway>) -> Self {
        Self {
            gateway,
            token: TokenSlot::default(),
        }
    }

    pub fn set_auth_token(&self, token: impl Into<String>) {
        self.token.set(token);
    }

    fn authorized(&self, request: ApiRequest, token: Option<&str>, operation: &str) -> Result<ApiRequest> {
        Ok(request.bearer(self.token.resolve(token, &self.gateway, operation)?))
    }

    /// Create a business under `partner_id`, paid from partner credit
    pub async fn create_business(
        &self,
        partner_id: &str,
        team_name: &str,
        plan_id: &str,
        assignee_ids: &[String],
        members: &[Person],
        token: Option<&str>,
    ) -> Result<ResponseBody> {
        let body = CreateBusinessRequest {
            partner_id: partner_id.to_string(),
            team_name: team_name.to_string(),
            plan_id: plan_id.to_string(),
            assigned_ids: assignee_ids.to_vec(),
            recipients: members.to_vec(),
            use_credit: true,
        };
        let request = self.authorized(ApiRequest::post(partner::BUSINESS).json(&body), token, "create business")?;
        let response = self.gateway.send(request).await?;
        info!(partner_id, team_name, "Created business");
        Ok(response)
    }

    pub async fn partner_payment_products(&self, token: Option<&str>) -> Result<Value> {
        let request = self.authorized(
            ApiRequest::get(partner::PAYMENT_PRODUCTS),
            token,
            "list partner payment products",
        )?;
        self.gateway.send_json(request).await
    }

    pub async fn partner_plans(&self, token: Option<&str>) -> Result<Vec<PartnerPlan>> {
        let request = self.authorized(ApiRequest::get(partner::PLANS), token, "list partner plans")?;
        let value: Value = self.gateway.send_json(request).await?;
        decode_list(value, "partner plan list")
    }

    /// Invite `members` into the business `business_id`
    pub async fn invite_member(
        &self,
        business_id: &str,
        members: &[Person],
        token: Option<&str>,
    ) -> Result<ResponseBody> {
        let invite = InviteMembersRequest {
            id: Some(business_id.to_string()),
            recipients: members
                .iter()
                .map(|member| InviteRecipient {
                    partner_consumer_type: Some(PARTNER_INVITED_CONSUMER),
                    is_email_member_existed: Some(false),
                    ..InviteRecipient::from_person(member)
                })
                .collect(),
        };
        let request = self.authorized(
            ApiRequest::post(partner::INVITE_MEMBER).json(&invite),
            token,
            "invite member",
        )?;
        self.gateway.send(request).await
    }

    pub async fn business_list(&self, token: Option<&str>) -> Result<Value> {
        let request = self.authorized(ApiRequest::get(partner::BUSINESS), token, "list businesses")?;
        self.gateway.send_json(request).await
    }

    pub async fn team_members(&self, team_id: &str, token: Option<&str>) -> Result<Value> {
        let request = self.authorized(
            ApiRequest::get(with_param(partner::TEAM_MEMBERS, "teamId", team_id))
                .version(partner::TEAM_MEMBERS_VERSION),
            token,
            "list team members",
        )?;
        self.gateway.send_json(request).await
    }
}
