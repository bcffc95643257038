//! # Data Generator
//!
//! Realistic random field values for test entities.
//!
//! Everything here is synchronous. The only state is a process-wide record of
//! issued suffixes, which keeps generated emails unique within a test run even
//! when many are produced in the same millisecond.

use chrono::Local;
use fake::faker::company::en::{CompanyName, Profession};
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};
use std::collections::HashSet;

use portal_qa_shared::EMAIL_DOMAIN;

/// Largest random part of a suffix; later collisions in the same second count up from here
const SUFFIX_RANDOM_MAX: u32 = 9999;

/// Random parts issued during the current second
#[derive(Default)]
struct IssuedSuffixes {
    second: String,
    issued: HashSet<u32>,
    overflow: u32,
}

static ISSUED_SUFFIXES: Lazy<Mutex<IssuedSuffixes>> =
    Lazy::new(|| Mutex::new(IssuedSuffixes::default()));

pub fn first_name() -> String {
    FirstName().fake()
}

pub fn last_name() -> String {
    LastName().fake()
}

pub fn job_title() -> String {
    Profession().fake()
}

/// Company name without commas, which the portals reject
pub fn company_name() -> String {
    let name: String = CompanyName().fake();
    name.replace(',', " and").replace("  ", " ")
}

/// `+1` followed by ten digits
pub fn phone_number() -> String {
    let mut rng = thread_rng();
    let digits: String = (0..10)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect();
    format!("+1{}", digits)
}

/// Inclusive range
pub fn random_int(min: u32, max: u32) -> u32 {
    thread_rng().gen_range(min..=max)
}

pub fn random_bool() -> bool {
    thread_rng().gen_bool(0.5)
}

/// `0` or `1`, for the numeric two-valued flags
pub fn random_binary() -> u8 {
    thread_rng().gen_range(0..=1)
}

pub fn choose_random<T>(items: &[T]) -> Option<&T> {
    items.choose(&mut thread_rng())
}

/// Between one and `max` distinct items, in random order; empty only when
/// `items` is
pub fn choose_random_subset<T: Clone>(items: &[T], max: usize) -> Vec<T> {
    if items.is_empty() || max == 0 {
        return Vec::new();
    }
    let mut rng = thread_rng();
    let count = rng.gen_range(1..=max.min(items.len()));
    items.choose_multiple(&mut rng, count).cloned().collect()
}

/// Timestamp plus random number, never repeated within a day of this process.
///
/// The timestamp is fixed width, so only the numbers issued in the current
/// second are tracked. A collision takes the next number above the random
/// range instead of drawing again.
pub fn unique_suffix() -> String {
    let second = Local::now().format("%H%M%S").to_string();
    let mut state = ISSUED_SUFFIXES.lock();
    if state.second != second {
        state.second = second;
        state.issued.clear();
        state.overflow = SUFFIX_RANDOM_MAX;
    }

    let drawn = thread_rng().gen_range(1..=SUFFIX_RANDOM_MAX);
    let number = if state.issued.insert(drawn) {
        drawn
    } else {
        state.overflow += 1;
        state.overflow
    };
    format!("{}{}", state.second, number)
}

/// `{first_name}{suffix}@yopmail.com`, with the name reduced to letters and digits
pub fn email(first_name: &str) -> String {
    format!("{}{}@{}", alphanumeric(first_name), unique_suffix(), EMAIL_DOMAIN)
}

/// `Pass@` plus the day and time, which satisfies the portals' password policy
pub fn password() -> String {
    format!("Pass@{}", Local::now().format("%d%H%M%S"))
}

pub fn alphanumeric(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}
