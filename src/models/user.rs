use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FieldErrors;
use crate::middleware::extract::Validate;

pub const STATUS_ACTIVE: i32 = 1;
pub const STATUS_DISABLED: i32 = 0;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Stored user record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub password: String,
    pub avatar: String,
    pub status: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Wire representation; never includes the password
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub status: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            avatar: user.avatar.clone(),
            status: user.status,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

/// Fields for a new user, already validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub avatar: String,
}

/// Partial update; `None` leaves the stored value as is
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub status: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub avatar: String,
}

impl Validate for CreateUserRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.name.is_empty() {
            errors.insert("name".to_string(), "This field is required".to_string());
        }

        if self.email.is_empty() {
            errors.insert("email".to_string(), "This field is required".to_string());
        } else if !is_email(&self.email) {
            errors.insert("email".to_string(), "Must be a valid email address".to_string());
        }

        if self.password.is_empty() {
            errors.insert("password".to_string(), "This field is required".to_string());
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.insert(
                "password".to_string(),
                format!("Must be at least {} characters", MIN_PASSWORD_LEN),
            );
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl From<CreateUserRequest> for NewUser {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
            avatar: req.avatar,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub status: Option<i32>,
}

impl Validate for UpdateUserRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        // Empty email means "not provided"
        if let Some(email) = self.email.as_deref().filter(|e| !e.is_empty()) {
            if !is_email(email) {
                errors.insert("email".to_string(), "Must be a valid email address".to_string());
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl From<UpdateUserRequest> for UserChanges {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            name: req.name,
            email: req.email.filter(|e| !e.is_empty()),
            avatar: req.avatar,
            status: req.status,
        }
    }
}

/// Loose address shape check: `local@domain.tld`, no whitespace
pub fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}
