//! Employee model and related functionality

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{
    error::AuthError,
    validation::{validate_email, validate_name, validate_password},
};

const REGISTRATION_HINT: &str =
    r#"Please, specify "firstname", "lastname", "email", "password" and "is_admin"."#;
const LOGIN_HINT: &str = r#"Please, provide "email" and "password" in body"#;

/// Employee entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Employee {
    pub id: i32,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub is_active: bool,
    pub is_admin: bool,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }
}

/// Validated employee creation payload; `password` is still plaintext here
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
    pub is_admin: bool,
}

/// Body of the registration and admin create-employee endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrationRequest {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub is_admin: Option<bool>,
}

impl RegistrationRequest {
    /// Check that every field is present and well-formed
    pub fn validate(self) -> Result<NewEmployee, AuthError> {
        let (Some(firstname), Some(lastname), Some(email), Some(password), Some(is_admin)) = (
            non_empty(self.firstname),
            non_empty(self.lastname),
            non_empty(self.email),
            non_empty(self.password),
            self.is_admin,
        ) else {
            return Err(AuthError::BadRequest(REGISTRATION_HINT.to_string()));
        };

        validate_name("firstname", &firstname).map_err(AuthError::BadRequest)?;
        validate_name("lastname", &lastname).map_err(AuthError::BadRequest)?;
        validate_email(&email).map_err(AuthError::BadRequest)?;
        validate_password(&password).map_err(AuthError::BadRequest)?;

        Ok(NewEmployee {
            firstname,
            lastname,
            email,
            password,
            is_admin,
        })
    }
}

/// Employee login credentials
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginCredentials {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl LoginCredentials {
    /// Returns `(email, password)` when both are present
    pub fn validate(self) -> Result<(String, String), AuthError> {
        match (non_empty(self.email), non_empty(self.password)) {
            (Some(email), Some(password)) => Ok((email, password)),
            _ => Err(AuthError::BadRequest(LOGIN_HINT.to_string())),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
