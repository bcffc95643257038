//! Reference data lookups and their per-provider caching

mod common;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use portal_qa_agent::shared::{
    CatalogPlan, CatalogProduct, Department, DepartmentCatalog, DepartmentDomain, PortalDomains,
    LOCAL_HR_DEPARTMENT_ID,
};
use portal_qa_agent::{
    filter_by_name, require_by_name, AdminPortalService, CatalogSource, HarnessError, NameFilter,
    ReferenceDataProvider, Result,
};

use common::gateway_for;

#[derive(Default)]
struct StubCatalog {
    departments: Vec<Department>,
    catalog: Vec<DepartmentCatalog>,
    department_calls: AtomicUsize,
    catalog_calls: AtomicUsize,
}

#[async_trait]
impl CatalogSource for StubCatalog {
    async fn departments(&self) -> Result<Vec<Department>> {
        self.department_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.departments.clone())
    }

    async fn department_plans(&self) -> Result<Vec<DepartmentCatalog>> {
        self.catalog_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.catalog.clone())
    }
}

fn department(id: &str, name: &str, domain: Option<DepartmentDomain>) -> Department {
    Department {
        id: id.to_string(),
        name: name.to_string(),
        domain,
    }
}

fn plan(id: &str, name: &str, types: &[u32]) -> CatalogPlan {
    CatalogPlan {
        id: id.to_string(),
        name: name.to_string(),
        products: types.iter().map(|t| CatalogProduct { product_type: *t }).collect(),
    }
}

fn stub() -> Arc<StubCatalog> {
    Arc::new(StubCatalog {
        departments: vec![
            department(LOCAL_HR_DEPARTMENT_ID, "Local HR", None),
            department(
                "dep-east",
                "East Coast",
                Some(DepartmentDomain::Plain("east.partner.example".to_string())),
            ),
            department(
                "dep-west",
                "West Coast",
                Some(DepartmentDomain::Portals(PortalDomains {
                    partner: Some("west.partner.example".to_string()),
                    member: Some("west.member.example".to_string()),
                    admin: None,
                })),
            ),
        ],
        catalog: vec![DepartmentCatalog {
            department_id: "dep-east".to_string(),
            plans: vec![
                plan("plan-a", "Under 50 Employees", &[1, 2]),
                plan("plan-b", "50 - 100 Employees", &[2, 3]),
                plan("plan-c", "500+ Employees & HR Consultants", &[3]),
            ],
        }],
        ..StubCatalog::default()
    })
}

#[tokio::test]
async fn test_department_lookup_is_case_insensitive() -> anyhow::Result<()> {
    let provider = ReferenceDataProvider::new(stub());

    assert_eq!(provider.department_id(Some("east coast")).await?, "dep-east");
    assert_eq!(provider.department_id(Some("WEST COAST")).await?, "dep-west");
    Ok(())
}

#[tokio::test]
async fn test_department_lookup_folds_non_ascii_names() -> anyhow::Result<()> {
    let source = Arc::new(StubCatalog {
        departments: vec![
            department(LOCAL_HR_DEPARTMENT_ID, "Local HR", None),
            department("dep-vn", "Đông Nam", None),
        ],
        catalog: vec![DepartmentCatalog {
            department_id: "dep-vn".to_string(),
            plans: vec![plan("plan-vn", "Gói Ưu Đãi", &[1])],
        }],
        ..StubCatalog::default()
    });
    let provider = ReferenceDataProvider::new(source);

    assert_eq!(provider.department_id(Some("đông nam")).await?, "dep-vn");
    assert_eq!(provider.department_id(Some("ĐÔNG NAM")).await?, "dep-vn");
    assert_eq!(
        provider.master_plan_by_name("dep-vn", "gói ưu đãi").await?.master_plan_id,
        "plan-vn"
    );
    Ok(())
}

#[tokio::test]
async fn test_unknown_department_is_not_found() {
    let provider = ReferenceDataProvider::new(stub());

    let err = provider.department_id(Some("Atlantis")).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("Atlantis"));
}

#[tokio::test]
async fn test_random_department_skips_local_hr() -> anyhow::Result<()> {
    let provider = ReferenceDataProvider::new(stub());

    let mut picked = HashSet::new();
    for _ in 0..100 {
        let id = provider.department_id(None).await?;
        assert_ne!(id, LOCAL_HR_DEPARTMENT_ID);
        picked.insert(id);
    }
    assert!(picked.is_subset(&HashSet::from(["dep-east".to_string(), "dep-west".to_string()])));
    Ok(())
}

#[tokio::test]
async fn test_random_department_fails_when_only_local_hr_exists() {
    let source = Arc::new(StubCatalog {
        departments: vec![department(LOCAL_HR_DEPARTMENT_ID, "Local HR", None)],
        ..StubCatalog::default()
    });
    let provider = ReferenceDataProvider::new(source);

    let err = provider.department_id(None).await.unwrap_err();
    assert!(err.is_not_found(), "{:?}", err);
}

#[tokio::test]
async fn test_departments_fetched_once_per_provider() -> anyhow::Result<()> {
    let source = stub();
    let provider = ReferenceDataProvider::new(source.clone());

    provider.department_id(Some("East Coast")).await?;
    provider.department_id(None).await?;
    provider.department_domain("dep-west").await?;
    provider.departments().await?;
    assert_eq!(source.department_calls.load(Ordering::SeqCst), 1);

    let other = ReferenceDataProvider::new(source.clone());
    other.departments().await?;
    assert_eq!(source.department_calls.load(Ordering::SeqCst), 2);
    Ok(())
}

#[tokio::test]
async fn test_department_domain_accepts_both_shapes() -> anyhow::Result<()> {
    let provider = ReferenceDataProvider::new(stub());

    assert_eq!(
        provider.department_domain("dep-east").await?.as_deref(),
        Some("east.partner.example")
    );
    assert_eq!(
        provider.department_domain("dep-west").await?.as_deref(),
        Some("west.partner.example")
    );
    assert_eq!(provider.department_domain(LOCAL_HR_DEPARTMENT_ID).await?, None);
    assert_eq!(provider.department_domain("dep-missing").await?, None);
    Ok(())
}

#[tokio::test]
async fn test_product_types_keep_first_plan_per_type() -> anyhow::Result<()> {
    let source = stub();
    let provider = ReferenceDataProvider::new(source.clone());

    let products = provider.product_types("dep-east").await?;
    let summary: Vec<(u32, &str)> = products
        .iter()
        .map(|p| (p.product_type, p.plan_id.as_str()))
        .collect();
    assert_eq!(summary, vec![(1, "plan-a"), (2, "plan-a"), (3, "plan-b")]);

    provider.product_types("dep-east").await?;
    provider.master_plan_by_name("dep-east", "under 50 employees").await?;
    assert_eq!(source.catalog_calls.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn test_unknown_department_has_no_products() -> anyhow::Result<()> {
    let provider = ReferenceDataProvider::new(stub());
    assert!(provider.product_types("dep-west").await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_master_plan_by_name() -> anyhow::Result<()> {
    let provider = ReferenceDataProvider::new(stub());

    let plan = provider
        .master_plan_by_name("dep-east", "50 - 100 employees")
        .await?;
    assert_eq!(plan.master_plan_id, "plan-b");
    assert_eq!(plan.name, "50 - 100 Employees");

    let err = provider
        .master_plan_by_name("dep-east", "Enterprise")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    Ok(())
}

#[tokio::test]
async fn test_product_name_filters() -> anyhow::Result<()> {
    let provider = ReferenceDataProvider::new(stub());
    let products = provider.product_types("dep-east").await?;

    let small = filter_by_name(&products, &NameFilter::exact(["under 50 employees"]));
    assert_eq!(small.len(), 2);

    let mid = require_by_name(&products, &NameFilter::contains("100"), "Product")?;
    assert_eq!(mid.len(), 1);
    assert_eq!(mid[0].product_type, 3);

    let err = require_by_name(&products, &NameFilter::contains("Enterprise"), "Product").unwrap_err();
    assert!(matches!(err, HarnessError::NotFound { .. }), "{:?}", err);
    Ok(())
}

#[tokio::test]
async fn test_admin_service_backs_provider_with_one_fetch() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/Configuration/Department"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entities": [
                {"id": LOCAL_HR_DEPARTMENT_ID, "name": "Local HR"},
                {"id": "dep-1", "name": "Gulf", "domain": {"partner": "gulf.partner.example"}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/Manage/Plan/Departments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "departmentId": "dep-1",
                "plans": [
                    {"id": "plan-1", "name": "Starter", "products": [{"productType": 1}]},
                    {"id": "plan-2", "name": "Growth", "products": [{"productType": 1}, {"productType": 4}]}
                ]
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let admin = Arc::new(AdminPortalService::new(gateway_for(&server)));
    admin.set_auth_token("admin");
    let provider = ReferenceDataProvider::new(admin);

    assert_eq!(provider.department_id(Some("gulf")).await?, "dep-1");
    assert_eq!(provider.department_id(None).await?, "dep-1");
    assert_eq!(
        provider.department_domain("dep-1").await?.as_deref(),
        Some("gulf.partner.example")
    );

    let products = provider.product_types("dep-1").await?;
    let types: Vec<u32> = products.iter().map(|p| p.product_type).collect();
    assert_eq!(types, vec![1, 4]);
    assert_eq!(provider.master_plan_by_name("dep-1", "growth").await?.master_plan_id, "plan-2");
    Ok(())
}
