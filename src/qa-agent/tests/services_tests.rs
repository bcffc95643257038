//! Portal service calls end to end against a mock backend

mod common;

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use portal_qa_agent::services::member::created_id;
use portal_qa_agent::{
    AdminPortalService, CustomerBuilder, HarnessError, MemberPortalService, PartnerBuilder,
    PartnerPortalService, PersonBuilder,
};

use common::gateway_for;

#[tokio::test]
async fn test_admin_create_customer_sends_flat_payload() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    let customer = CustomerBuilder::new()
        .for_admin_portal()
        .with_email("owner@yopmail.com")
        .with_company_name("Acme Holdings")
        .with_trial_days(14)
        .build();

    Mock::given(method("POST"))
        .and(path("/v1/Manage/Consumers"))
        .and(header("authorization", "Bearer admin"))
        .and(body_partial_json(json!({
            "email": "owner@yopmail.com",
            "companyName": "Acme Holdings",
            "useCredit": false,
            "type": 1,
            "trialDays": 14
        })))
        .respond_with(ResponseTemplate::new(201).set_body_string("\"c-100\""))
        .expect(1)
        .mount(&server)
        .await;

    let admin = AdminPortalService::new(gateway_for(&server));
    admin.set_auth_token("admin");
    let body = admin.create_customer(&customer).await?;

    assert_eq!(created_id(&body).as_deref(), Some("c-100"));
    Ok(())
}

#[tokio::test]
async fn test_admin_create_partner_merges_account_fields() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    let partner = PartnerBuilder::new()
        .with_email("partner@yopmail.com")
        .with_name("Acme42")
        .with_plan_id("plan-1")
        .build();

    Mock::given(method("POST"))
        .and(path("/v1/Manage/Organization/Partner"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "p-9"})))
        .expect(1)
        .mount(&server)
        .await;

    let admin = AdminPortalService::new(gateway_for(&server));
    admin.set_auth_token("admin");
    let body = admin.create_partner(&partner).await?;
    assert_eq!(created_id(&body).as_deref(), Some("p-9"));

    let requests = server.received_requests().await.unwrap_or_default();
    let sent: Value = requests[0].body_json()?;
    assert_eq!(sent["email"], json!("partner@yopmail.com"));
    assert_eq!(sent["name"], json!("Acme42"));
    assert_eq!(sent["subDomain"], json!("Acme42"));
    assert_eq!(sent["planId"], json!("plan-1"));
    assert_eq!(sent["billingCycle"], json!(0));
    assert!(sent["password"].is_string());
    assert!(sent["userInfo"].get("password").is_none());
    Ok(())
}

#[tokio::test]
async fn test_departments_reject_unknown_list_wrapper() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/Configuration/Department"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 2,
            "records": [
                {"id": "dep-1", "name": "Gulf"},
                {"id": "dep-2", "name": "Pacific"}
            ]
        })))
        .mount(&server)
        .await;

    let admin = AdminPortalService::new(gateway_for(&server));
    admin.set_auth_token("admin");
    let err = admin.departments().await.unwrap_err();

    assert!(matches!(err, HarnessError::Decode { .. }), "{:?}", err);
    assert!(err.to_string().contains("department list"), "{}", err);
}

#[tokio::test]
async fn test_department_catalog_accepts_entry_and_department_ids() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/Manage/Plan/Departments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "cat-1", "departmentId": "dep-1", "plans": []},
            {"id": "dep-2"}
        ])))
        .mount(&server)
        .await;

    let admin = AdminPortalService::new(gateway_for(&server));
    admin.set_auth_token("admin");
    let catalog = admin.department_plans().await?;

    let ids: Vec<&str> = catalog.iter().map(|entry| entry.department_id.as_str()).collect();
    assert_eq!(ids, vec!["dep-1", "dep-2"]);
    Ok(())
}

#[tokio::test]
async fn test_customer_search_sends_paging_query() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/Manage/CustomerManagement"))
        .and(query_param("Search", "owner@yopmail.com"))
        .and(query_param("Length", "12"))
        .and(query_param("Start", "0"))
        .and(query_param("OrderBy", "updatedAt desc"))
        .and(query_param("PartnerId", ""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 0, "entities": []})))
        .expect(1)
        .mount(&server)
        .await;

    let admin = AdminPortalService::new(gateway_for(&server));
    admin.set_auth_token("admin");
    let found = admin.customer_by_email("owner@yopmail.com").await?;

    assert_eq!(found["total"], json!(0));
    Ok(())
}

#[tokio::test]
async fn test_explicit_token_beats_stored_token() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/Manage/Organization/Partner/All"))
        .and(header("authorization", "Bearer per-call"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 0, "entities": []})))
        .expect(1)
        .mount(&server)
        .await;

    let admin = AdminPortalService::new(gateway_for(&server));
    admin.set_auth_token("stored");
    let summary = admin.search_partner("nobody", Some("per-call")).await?;

    assert_eq!(summary, None);
    Ok(())
}

#[tokio::test]
async fn test_member_sign_up_is_anonymous() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/Consumer/Consumers"))
        .and(body_partial_json(json!({"source": "member", "email": "self@yopmail.com"})))
        .respond_with(ResponseTemplate::new(201).set_body_string("m-77"))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    gateway.set_auth_token("admin");
    let member = MemberPortalService::new(gateway);
    let customer = CustomerBuilder::new().with_email("self@yopmail.com").build();
    let body = member.sign_up_consumer(&customer).await?;

    assert_eq!(created_id(&body).as_deref(), Some("m-77"));
    let requests = server.received_requests().await.unwrap_or_default();
    assert!(requests[0].headers.get("authorization").is_none());
    Ok(())
}

#[tokio::test]
async fn test_member_checkout_without_token_is_rejected() {
    let server = MockServer::start().await;
    let member = MemberPortalService::new(gateway_for(&server));

    let err = member.check_out_plan(2, None).await.unwrap_err();
    assert!(err.is_auth_missing(), "{:?}", err);
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_partner_invite_tags_recipients() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/Partner/Manage/Partner/Business/Invite"))
        .and(header("authorization", "Bearer partner"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let partner = PartnerPortalService::new(gateway_for(&server));
    let members = vec![
        PersonBuilder::new().email("a@yopmail.com").build(),
        PersonBuilder::new().email("b@yopmail.com").build(),
    ];
    partner.invite_member("biz-1", &members, Some("partner")).await?;

    let requests = server.received_requests().await.unwrap_or_default();
    let sent: Value = requests[0].body_json()?;
    assert_eq!(sent["id"], json!("biz-1"));
    let recipients = sent["recipients"].as_array().cloned().unwrap_or_default();
    assert_eq!(recipients.len(), 2);
    assert_eq!(recipients[0]["email"], json!("a@yopmail.com"));
    assert_eq!(recipients[1]["email"], json!("b@yopmail.com"));
    for recipient in &recipients {
        assert_eq!(recipient["partnerConsumerType"], json!(1));
        assert_eq!(recipient["isEmailMemberExisted"], json!(false));
    }
    Ok(())
}

#[tokio::test]
async fn test_partner_plans_accept_wrapped_list() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/Partner/Manage/Plan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 2,
            "data": [
                {"id": "pp-1", "name": "Starter", "productType": 1},
                {"id": "pp-2", "name": "Growth"}
            ]
        })))
        .mount(&server)
        .await;

    let partner = PartnerPortalService::new(gateway_for(&server));
    partner.set_auth_token("partner");
    let plans = partner.partner_plans(None).await?;

    assert_eq!(plans.len(), 2);
    assert_eq!(plans[0].product_type, Some(1));
    assert_eq!(plans[1].name, "Growth");
    Ok(())
}

#[tokio::test]
async fn test_team_members_use_v2_route() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/Partner/Manage/Teams/team-5/Members"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"email": "a@yopmail.com"}])))
        .expect(1)
        .mount(&server)
        .await;

    let partner = PartnerPortalService::new(gateway_for(&server));
    let members = partner.team_members("team-5", Some("partner")).await?;

    assert_eq!(members[0]["email"], json!("a@yopmail.com"));
    Ok(())
}
