//! Local account handling: register, login, password reset.
//!
//! Credentials are compared in plain text against the single stored user.

use super::store::{LocalStore, StoredUser};
use super::validation::is_valid_email;
use crate::error::{PulseError, Result};

/// Form input for a new account
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub age: String,
    pub password: String,
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate the form and store the account, replacing any previous one
pub fn register(store: &LocalStore, form: &Registration) -> Result<StoredUser> {
    if [&form.name, &form.email, &form.age, &form.password]
        .iter()
        .any(|field| field.trim().is_empty())
    {
        return Err(PulseError::invalid_argument("All fields are required"));
    }

    let age: u32 = form
        .age
        .trim()
        .parse()
        .ok()
        .filter(|age| *age > 0)
        .ok_or_else(|| PulseError::invalid_argument("Enter a valid age"))?;

    if !is_valid_email(&form.email) {
        return Err(PulseError::invalid_argument(format!(
            "'{}' is not a valid email",
            form.email.trim()
        )));
    }

    let user = StoredUser {
        name: form.name.trim().to_string(),
        email: normalize_email(&form.email),
        age: Some(age),
        password: form.password.clone(),
    };
    store.save_user(&user)?;
    log::info!("Registered account for {}", user.email);
    Ok(user)
}

/// Check credentials against the stored account
pub fn login(store: &LocalStore, email: &str, password: &str) -> Result<StoredUser> {
    if email.trim().is_empty() || password.trim().is_empty() {
        return Err(PulseError::invalid_argument("Enter your email and password"));
    }

    let stored = store
        .get_user()?
        .ok_or_else(|| PulseError::auth("No account is registered on this device"))?;

    if stored.email != normalize_email(email) || stored.password != password {
        return Err(PulseError::auth("Incorrect email or password"));
    }
    Ok(stored)
}

/// Replace the stored password after confirming the email
pub fn reset_password(
    store: &LocalStore,
    email: &str,
    new_password: &str,
    confirm_password: &str,
) -> Result<()> {
    if email.trim().is_empty() || new_password.is_empty() || confirm_password.is_empty() {
        return Err(PulseError::invalid_argument("All fields are required"));
    }
    if new_password != confirm_password {
        return Err(PulseError::invalid_argument("Passwords do not match"));
    }

    let mut stored = store
        .get_user()?
        .ok_or_else(|| PulseError::auth("No account is registered on this device"))?;
    if stored.email != normalize_email(email) {
        return Err(PulseError::auth("Email does not match the registered account"));
    }

    stored.password = new_password.to_string();
    store.save_user(&stored)
}
