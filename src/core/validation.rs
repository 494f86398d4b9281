// Validation module for user input
// Reusable checks for the API base URL, device ids, emails and contact fields

use anyhow::{ensure, Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Maximum URL length accepted for the API base URL
const MAX_URL_LENGTH: usize = 2048;

/// Maximum device id length
const MAX_DEVICE_ID_LENGTH: usize = 64;

static DEVICE_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_\-.:]*$").expect("valid device id regex"));

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9(][0-9 ()\-]{5,}$").expect("valid phone regex"));

/// Validates the API base URL
///
/// Uses the `url` crate for parsing. Checks:
/// - URL format
/// - Protocol must be http or https
/// - Must have a hostname
/// - No query string or fragment (the client appends its own)
pub fn validate_base_url(url_str: &str) -> Result<()> {
    let trimmed = url_str.trim();

    ensure!(!trimmed.is_empty(), "URL cannot be empty");
    ensure!(
        trimmed.len() <= MAX_URL_LENGTH,
        "URL is too long ({} characters, max {})",
        trimmed.len(),
        MAX_URL_LENGTH
    );

    let url = Url::parse(trimmed).context("Invalid URL format")?;

    let scheme = url.scheme();
    ensure!(
        scheme == "http" || scheme == "https",
        "URL must use http or https protocol, got: {}",
        scheme
    );
    ensure!(url.host_str().is_some(), "URL has no hostname");
    ensure!(
        url.query().is_none() && url.fragment().is_none(),
        "Base URL must not contain a query string or fragment"
    );

    Ok(())
}

/// Validates a sensor device id (letters, digits, `_ - . :`)
pub fn validate_device_id(device_id: &str) -> Result<()> {
    let trimmed = device_id.trim();
    ensure!(!trimmed.is_empty(), "Device id cannot be empty");
    ensure!(
        trimmed.len() <= MAX_DEVICE_ID_LENGTH,
        "Device id is too long ({} characters, max {})",
        trimmed.len(),
        MAX_DEVICE_ID_LENGTH
    );
    ensure!(
        DEVICE_ID_RE.is_match(trimmed),
        "Device id '{}' contains invalid characters",
        trimmed
    );
    Ok(())
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone.trim())
}
