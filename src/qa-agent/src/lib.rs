//! # Portal QA Agent
//!
//! API test harness for the HR portals (admin, partner and member).
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Test case                            │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌────────────┐  │
//! │  │ Reference Data   │  │ Entity Builders  │  │ Portal     │  │
//! │  │ Provider         │  │ (Customer,       │  │ Services   │  │
//! │  │ (cached lookups) │  │  Partner)        │  │            │  │
//! │  └──────────────────┘  └──────────────────┘  └────────────┘  │
//! │           │                     │                  │         │
//! │  ┌──────────────────┐  ┌──────────────────┐        │         │
//! │  │ Portal Services  │  │ Data Generator   │        │         │
//! │  └──────────────────┘  └──────────────────┘        │         │
//! │           │                                        │         │
//! │  ┌───────────────────────────────────────────────────────┐   │
//! │  │       Request Gateway  +  Auth Token Provider         │   │
//! │  └───────────────────────────────────────────────────────┘   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! A typical test obtains a [`HarnessContext`], asks its
//! [`ReferenceDataProvider`] for department and plan facts, builds an entity
//! with [`CustomerBuilder`] or [`PartnerBuilder`] and submits it through a
//! portal service.

pub mod auth;
pub mod builders;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod gateway;
pub mod generator;
pub mod logging;
pub mod reference;
pub mod services;
pub mod utils;

// Re-export key types
pub use auth::{AuthTokenProvider, Credentials};
pub use builders::{AdminPortalOptions, CustomerBuilder, PartnerBuilder, PersonBuilder, RestrictionOverrides};
pub use config::{ApiConfig, AuthConfig, HarnessConfig, SystemId};
pub use error::{HarnessError, Result};
pub use fixtures::HarnessContext;
pub use gateway::{merge_headers, ApiRequest, ApiResponse, HttpMethod, RequestGateway, ResponseBody};
pub use reference::{filter_by_name, require_by_name, CatalogSource, NameFilter, Named, ReferenceDataProvider};
pub use services::{AdminPortalService, MemberPortalService, PartnerPortalService};

pub use portal_qa_shared as shared;
