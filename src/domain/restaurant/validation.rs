//! Field-level validation rules for restaurant input.
//!
//! The rules mirror the public API contract exactly: name ≥ 3 chars,
//! address ≥ 5, city ≥ 2, pin code 5-10 digits, phone `+?` then 10-15
//! digits, opening/closing times in 24h `HH:MM`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::foundation::FieldIssue;

static PIN_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{5,10}$").unwrap());
static PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?\d{10,15}$").unwrap());
static TIME_24H: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-1]?[0-9]|2[0-3]):[0-5][0-9]$").unwrap());

pub(crate) fn check_name(issues: &mut Vec<FieldIssue>, name: &str) {
    if name.chars().count() < 3 {
        issues.push(FieldIssue::new("name", "must be at least 3 characters"));
    }
}

pub(crate) fn check_categories(issues: &mut Vec<FieldIssue>, categories: &[String]) {
    if categories.is_empty() || categories.iter().any(|c| c.trim().is_empty()) {
        issues.push(FieldIssue::new(
            "categories",
            "must be a non-empty list of non-empty strings",
        ));
    }
}

pub(crate) fn check_address(issues: &mut Vec<FieldIssue>, address: &str) {
    if address.chars().count() < 5 {
        issues.push(FieldIssue::new("address", "must be at least 5 characters"));
    }
}

pub(crate) fn check_city(issues: &mut Vec<FieldIssue>, city: &str) {
    if city.chars().count() < 2 {
        issues.push(FieldIssue::new("city", "must be at least 2 characters"));
    }
}

pub(crate) fn check_pin_code(issues: &mut Vec<FieldIssue>, pin_code: &str) {
    if !PIN_CODE.is_match(pin_code) {
        issues.push(FieldIssue::new("pinCode", "must be 5 to 10 digits"));
    }
}

pub(crate) fn check_phone_number(issues: &mut Vec<FieldIssue>, phone: &str) {
    if !PHONE.is_match(phone) {
        issues.push(FieldIssue::new("phoneNumber", "invalid phone number"));
    }
}

pub(crate) fn check_time(issues: &mut Vec<FieldIssue>, field: &'static str, value: &str) {
    if !TIME_24H.is_match(value) {
        issues.push(FieldIssue::new(field, "invalid time format (HH:MM)"));
    }
}

pub(crate) fn check_website(issues: &mut Vec<FieldIssue>, website: &str) {
    let valid = reqwest::Url::parse(website)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false);
    if !valid {
        issues.push(FieldIssue::new("website", "must be a valid URL"));
    }
}
