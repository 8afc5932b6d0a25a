use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::MIN_PASSWORD_LEN;
use crate::errors::{Error, Result, ValidationError};

/// Display attributes of the signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Bearer token plus the user it was issued to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.trim().to_lowercase(),
            password: password.to_string(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_email(&self.email)?;
        if self.password.is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "password".to_string(),
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Registration {
    pub fn new(name: &str, email: &str, password: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_lowercase(),
            password: password.to_string(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "name".to_string(),
            )));
        }
        validate_email(&self.email)?;
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            ))));
        }
        Ok(())
    }
}

fn validate_email(email: &str) -> Result<()> {
    if email.is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "email".to_string(),
        )));
    }
    if !email.contains('@') {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "'{}' is not a valid email address",
            email
        ))));
    }
    Ok(())
}
