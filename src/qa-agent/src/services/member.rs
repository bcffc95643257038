//! Member portal calls: self sign-up, checkout and team invitations

use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use portal_qa_shared::{CustomerEntity, InviteMembersRequest, InviteRecipient, Person};

use super::endpoints::{member, with_param};
use super::TokenSlot;
use crate::error::{HarnessError, Result};
use crate::gateway::{ApiRequest, RequestGateway, ResponseBody};

#[derive(Debug)]
pub struct MemberPortalService {
    gateway: Arc<RequestGateway>,
    token: TokenSlot,
}

impl MemberPortalService {
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

    /// Self sign-up; the backend answers with the new consumer id, either as
    /// a bare string or inside an object. See [`created_id`].
    pub async fn sign_up_consumer(&self, customer: &CustomerEntity) -> Result<ResponseBody> {
        let payload = customer
            .to_payload()
            .map_err(|err| HarnessError::encode("sign-up payload", err))?;
        let body = self
            .gateway
            .send(
                ApiRequest::post(member::SIGN_UP_CONSUMER)
                    .anonymous()
                    .json(&payload)
                    .expect(201),
            )
            .await?;
        info!(email = %customer.account_info.email, "Signed up consumer");
        Ok(body)
    }

    pub async fn check_out_plan(&self, product_type: u32, token: Option<&str>) -> Result<Value> {
        let request = self.authorized(
            ApiRequest::get(member::CHECK_OUT_PLAN).query("productType", product_type),
            token,
            "check out plan",
        )?;
        self.gateway.send_json(request).await
    }

    pub async fn preview_payment_changes(&self, product_type: u32, token: Option<&str>) -> Result<Value> {
        let request = self.authorized(
            ApiRequest::get(member::PREVIEW_PAYMENT_CHANGES).query("productType", product_type),
            token,
            "preview payment changes",
        )?;
        self.gateway.send_json(request).await
    }

    pub async fn current_subscribed_plan(&self, token: Option<&str>) -> Result<Value> {
        let request = self.authorized(
            ApiRequest::get(member::CURRENT_SUBSCRIBED_PLAN),
            token,
            "get current plan",
        )?;
        self.gateway.send_json(request).await
    }

    pub async fn plans_list(&self, department_id: &str, token: Option<&str>) -> Result<Value> {
        let request = self.authorized(
            ApiRequest::get(member::PLANS).query("departmentId", department_id),
            token,
            "list plans",
        )?;
        self.gateway.send_json(request).await
    }

    pub async fn payment_status(&self, guid: &str, token: Option<&str>) -> Result<Value> {
        let request = self.authorized(
            ApiRequest::get(with_param(member::PAYMENT_STATUS, "guid", guid)),
            token,
            "get payment status",
        )?;
        self.gateway.send_json(request).await
    }

    pub async fn payment_subscription(&self, token: Option<&str>) -> Result<Value> {
        let request = self.authorized(
            ApiRequest::get(member::PAYMENT_SUBSCRIPTION),
            token,
            "get payment subscription",
        )?;
        self.gateway.send_json(request).await
    }

    pub async fn invite_members(&self, members: &[Person], token: Option<&str>) -> Result<ResponseBody> {
        let invite = InviteMembersRequest {
            id: None,
            recipients: members.iter().map(InviteRecipient::from_person).collect(),
        };
        let request = self.authorized(
            ApiRequest::post(member::INVITE_MEMBERS).json(&invite),
            token,
            "invite members",
        )?;
        self.gateway.send(request).await
    }
}

/// Identifier returned by a create call, whatever shape it came back in
pub fn created_id(body: &ResponseBody) -> Option<String> {
    match body {
        ResponseBody::Text(text) => {
            let id = text.trim().trim_matches('"');
            (!id.is_empty()).then(|| id.to_string())
        }
        ResponseBody::Json(Value::String(id)) => Some(id.clone()),
        ResponseBody::Json(Value::Object(fields)) => fields
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_created_id_shapes() {
        assert_eq!(
            created_id(&ResponseBody::Text("692bf9ec8600289c1af50f91".into())).as_deref(),
            Some("692bf9ec8600289c1af50f91")
        );
        assert_eq!(
            created_id(&ResponseBody::Json(json!("abc"))).as_deref(),
            Some("abc")
        );
        assert_eq!(
            created_id(&ResponseBody::Json(json!({"id": "xyz", "email": "a@b"}))).as_deref(),
            Some("xyz")
        );
        assert_eq!(created_id(&ResponseBody::Empty), None);
    }
}
