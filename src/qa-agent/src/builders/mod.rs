//! # Entity Builders
//!
//! Fluent builders that turn a handful of overrides into complete, valid
//! request payloads. Unset fields are filled from the data generator or from
//! fixed catalog defaults, so `build()` never fails.
//!
//! Reference data (department ids, product types, plan ids) is looked up by the
//! caller through a [`ReferenceDataProvider`](crate::reference::ReferenceDataProvider)
//! and passed in with the `with_*` methods.

pub mod customer;
pub mod partner;
pub mod person;

pub use customer::{AdminPortalOptions, CustomerBuilder};
pub use partner::{PartnerBuilder, RestrictionOverrides};
pub use person::PersonBuilder;
