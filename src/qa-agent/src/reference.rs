//! # Reference Data Provider
//!
//! Departments, plans and product types a test needs before it can build an
//! entity. Each provider fetches the department list and the plan catalog at
//! most once, on first use, and keeps them for its own lifetime. Nothing is
//! shared between providers, so every test or fixture should own one.

use async_trait::async_trait;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::debug;

use portal_qa_shared::{
    CatalogPlan, Department, DepartmentCatalog, MasterPlan, PartnerPlan, ProductInfo,
    LOCAL_HR_DEPARTMENT_ID,
};

use crate::error::{HarnessError, Result};

/// Backend reads the provider caches
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn departments(&self) -> Result<Vec<Department>>;

    /// Every department with its plans and their products
    async fn department_plans(&self) -> Result<Vec<DepartmentCatalog>>;
}

// =============================================================================
// Name filtering
// =============================================================================

/// Items looked up by display name
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for ProductInfo {
    fn name(&self) -> &str {
        &self.product_name
    }
}

impl Named for PartnerPlan {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Department {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for CatalogPlan {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Case-insensitive name match
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameFilter {
    /// Name equals one of these
    Exact(Vec<String>),
    /// Name contains this
    Contains(String),
}

impl NameFilter {
    pub fn exact<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        NameFilter::Exact(names.into_iter().map(Into::into).collect())
    }

    pub fn contains(fragment: impl Into<String>) -> Self {
        NameFilter::Contains(fragment.into())
    }

    pub fn matches(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        match self {
            NameFilter::Exact(names) => names.iter().any(|n| n.to_lowercase() == name),
            NameFilter::Contains(fragment) => name.contains(&fragment.to_lowercase()),
        }
    }

    fn describe(&self) -> String {
        match self {
            NameFilter::Exact(names) => names.join(", "),
            NameFilter::Contains(fragment) => format!("*{}*", fragment),
        }
    }
}

/// Items whose name matches `filter`, in their original order
pub fn filter_by_name<T: Named + Clone>(items: &[T], filter: &NameFilter) -> Vec<T> {
    items
        .iter()
        .filter(|item| filter.matches(item.name()))
        .cloned()
        .collect()
}

/// Like [`filter_by_name`], but an empty result is a `NotFound` for `kind`
pub fn require_by_name<T: Named + Clone>(items: &[T], filter: &NameFilter, kind: &str) -> Result<Vec<T>> {
    let matched = filter_by_name(items, filter);
    if matched.is_empty() {
        return Err(HarnessError::not_found(kind, filter.describe()));
    }
    Ok(matched)
}

// =============================================================================
// Provider
// =============================================================================

pub struct ReferenceDataProvider {
    source: Arc<dyn CatalogSource>,
    departments: OnceCell<Vec<Department>>,
    catalog: OnceCell<Vec<DepartmentCatalog>>,
}

impl ReferenceDataProvider {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            departments: OnceCell::new(),
            catalog: OnceCell::new(),
        }
    }

    /// Department list, fetched on first use
    pub async fn departments(&self) -> Result<&[Department]> {
        let departments = self
            .departments
            .get_or_try_init(|| async {
                let departments = self.source.departments().await?;
                debug!(count = departments.len(), "Cached department list");
                Ok::<_, HarnessError>(departments)
            })
            .await?;
        Ok(departments)
    }

    async fn catalog(&self) -> Result<&[DepartmentCatalog]> {
        let catalog = self
            .catalog
            .get_or_try_init(|| async {
                let catalog = self.source.department_plans().await?;
                debug!(count = catalog.len(), "Cached department plan catalog");
                Ok::<_, HarnessError>(catalog)
            })
            .await?;
        Ok(catalog)
    }

    /// Id of the department called `name` (case-insensitive), or of a random
    /// department other than the reserved local HR one when `name` is `None`
    pub async fn department_id(&self, name: Option<&str>) -> Result<String> {
        let departments = self.departments().await?;
        match name {
            Some(name) => {
                let filter = NameFilter::exact([name]);
                departments
                    .iter()
                    .find(|department| filter.matches(&department.name))
                    .map(|department| department.id.clone())
                    .ok_or_else(|| HarnessError::not_found("Department", name))
            }
            None => pick_random_department(departments),
        }
    }

    /// Partner portal domain of department `id`
    pub async fn department_domain(&self, id: &str) -> Result<Option<String>> {
        let departments = self.departments().await?;
        Ok(departments
            .iter()
            .find(|department| department.id == id)
            .and_then(Department::partner_domain)
            .map(str::to_string))
    }

    /// Products of `department_id`, one per product type.
    ///
    /// The first plan offering a product type wins. An unknown department has
    /// no products.
    pub async fn product_types(&self, department_id: &str) -> Result<Vec<ProductInfo>> {
        let catalog = self.catalog().await?;
        let Some(department) = catalog.iter().find(|entry| entry.department_id == department_id) else {
            debug!(department_id, "Department not in plan catalog");
            return Ok(Vec::new());
        };
        Ok(dedup_products(&department.plans))
    }

    /// Plan of `department_id` called `plan_name` (case-insensitive)
    pub async fn master_plan_by_name(&self, department_id: &str, plan_name: &str) -> Result<MasterPlan> {
        let catalog = self.catalog().await?;
        let filter = NameFilter::exact([plan_name]);
        catalog
            .iter()
            .find(|entry| entry.department_id == department_id)
            .and_then(|entry| {
                entry
                    .plans
                    .iter()
                    .find(|plan| filter.matches(&plan.name))
            })
            .map(|plan| MasterPlan {
                master_plan_id: plan.id.clone(),
                name: plan.name.clone(),
            })
            .ok_or_else(|| HarnessError::not_found("Master plan", plan_name))
    }
}

fn dedup_products(plans: &[CatalogPlan]) -> Vec<ProductInfo> {
    let mut seen = HashSet::new();
    plans
        .iter()
        .flat_map(|plan| {
            plan.products.iter().map(move |product| ProductInfo {
                product_type: product.product_type,
                product_name: plan.name.clone(),
                plan_id: plan.id.clone(),
            })
        })
        .filter(|product| seen.insert(product.product_type))
        .collect()
}

/// Re-rolls while the pick is the reserved department. Fails instead of
/// spinning when nothing else is available.
fn pick_random_department(departments: &[Department]) -> Result<String> {
    if !departments.iter().any(|d| d.id != LOCAL_HR_DEPARTMENT_ID) {
        return Err(HarnessError::not_found(
            "Department",
            "any department other than local HR",
        ));
    }
    let mut rng = rand::thread_rng();
    loop {
        if let Some(department) = departments.choose(&mut rng) {
            if department.id != LOCAL_HR_DEPARTMENT_ID {
                return Ok(department.id.clone());
            }
        }
    }
}
