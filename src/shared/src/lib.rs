//! Shared types for the HR portal API test harness

pub mod catalog;
pub mod types;

pub use catalog::{
    Country, Industry, PaymentOption, DEFAULT_DEPARTMENT_ID, EMAIL_DOMAIN, LOCAL_HR_DEPARTMENT_ID,
    PLANS,
};

pub use types::*;
