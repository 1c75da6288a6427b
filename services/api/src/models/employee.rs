//! Employee projections and update payloads

use lunch_auth::{
    models::Employee,
    validation::{validate_email, validate_name, validate_password},
};
use serde::{Deserialize, Serialize};

use super::{Page, choice::ChoiceView, non_empty};
use crate::error::ApiError;

/// Employee as embedded in other projections, without nested choices
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeSummary {
    pub id: i32,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub is_active: bool,
    pub is_admin: bool,
}

impl From<&Employee> for EmployeeSummary {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id,
            firstname: employee.firstname.clone(),
            lastname: employee.lastname.clone(),
            email: employee.email.clone(),
            is_active: employee.is_active,
            is_admin: employee.is_admin,
        }
    }
}

/// Employee projection with every choice they made
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeView {
    #[serde(flatten)]
    pub employee: EmployeeSummary,
    pub choices: Vec<ChoiceView>,
}

impl EmployeeView {
    pub fn new(employee: &Employee, choices: Vec<ChoiceView>) -> Self {
        Self {
            employee: employee.into(),
            choices,
        }
    }
}

/// Query parameters for GET /api/employees/
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeQuery {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

/// What GET /api/employees/ should do with its query string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeLookup {
    ByName { firstname: String, lastname: String },
    ByEmail(String),
    List(Page),
}

impl EmployeeQuery {
    /// A full name wins over an email; a lone firstname or lastname lists
    pub fn lookup(&self) -> EmployeeLookup {
        match (
            non_empty(&self.firstname),
            non_empty(&self.lastname),
            non_empty(&self.email),
        ) {
            (Some(firstname), Some(lastname), _) => EmployeeLookup::ByName {
                firstname: firstname.to_string(),
                lastname: lastname.to_string(),
            },
            (_, _, Some(email)) => EmployeeLookup::ByEmail(email.to_string()),
            _ => EmployeeLookup::List(Page::new(self.offset, self.limit)),
        }
    }
}

/// Body of PATCH /api/employees/{id}
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeUpdateRequest {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub is_active: Option<bool>,
    pub is_admin: Option<bool>,
}

/// How much of an employee record the caller may change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateScope {
    /// Admins may change every field of anyone
    Full,
    /// Employees may change their own password
    PasswordOnly,
    Denied,
}

impl UpdateScope {
    pub fn resolve(is_admin: bool, caller_id: Option<i32>, target_id: i32) -> Self {
        if is_admin {
            UpdateScope::Full
        } else if caller_id == Some(target_id) {
            UpdateScope::PasswordOnly
        } else {
            UpdateScope::Denied
        }
    }
}

/// Result of applying an admin update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminUpdate {
    Applied,
    /// Everything but the email was applied
    EmailSkipped(String),
}

impl EmployeeUpdateRequest {
    /// Replacement email when it differs from the current one
    pub fn changed_email(&self, employee: &Employee) -> Option<&str> {
        non_empty(&self.email).filter(|email| *email != employee.email)
    }

    /// Replacement password, validated
    pub fn new_password(&self) -> Result<Option<&str>, ApiError> {
        non_empty(&self.password)
            .map(|password| {
                validate_password(password)
                    .map(|_| password)
                    .map_err(ApiError::BadRequest)
            })
            .transpose()
    }

    /// Apply every non-password field; `email_taken` says whether the
    /// changed email already belongs to another active account
    pub fn apply_as_admin(
        &self,
        employee: &mut Employee,
        email_taken: bool,
    ) -> Result<AdminUpdate, ApiError> {
        if let Some(firstname) = non_empty(&self.firstname) {
            validate_name("firstname", firstname).map_err(ApiError::BadRequest)?;
            employee.firstname = firstname.to_string();
        }
        if let Some(lastname) = non_empty(&self.lastname) {
            validate_name("lastname", lastname).map_err(ApiError::BadRequest)?;
            employee.lastname = lastname.to_string();
        }
        if let Some(is_active) = self.is_active {
            employee.is_active = is_active;
        }
        if let Some(is_admin) = self.is_admin {
            employee.is_admin = is_admin;
        }

        let Some(email) = self.changed_email(employee).map(str::to_string) else {
            return Ok(AdminUpdate::Applied);
        };
        validate_email(&email).map_err(ApiError::BadRequest)?;
        if email_taken {
            return Ok(AdminUpdate::EmailSkipped(email));
        }
        employee.email = email;

        Ok(AdminUpdate::Applied)
    }
}
