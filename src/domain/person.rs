//! People who can be assigned work
//!
//! [`Person`] is the identity capability shared by anyone on the board: a
//! name, an email and a role description. [`Employee`] is the only kind of
//! person today; its role is derived from years of experience.

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::id::{EmployeeId, Identifiable};

/// Domain appended to generated email addresses
pub const DEFAULT_EMAIL_DOMAIN: &str = "gmail.com";

/// Identity shared by everyone on the board
pub trait Person: Identifiable {
    fn name(&self) -> &str;

    fn email(&self) -> &str;

    /// Human-readable role, derived from variant state
    fn role_description(&self) -> String;
}

/// Derives an email address from a display name: `Ada Lovelace` -> `ada.lovelace@gmail.com`
pub fn default_email(name: &str) -> String {
    format!("{}@{}", name.to_lowercase().replace(' ', "."), DEFAULT_EMAIL_DOMAIN)
}

/// Orders people by name, ignoring case
pub fn compare_by_name<P: Person>(a: &P, b: &P) -> Ordering {
    a.name().to_lowercase().cmp(&b.name().to_lowercase())
}

/// An employee with a fixed amount of experience
///
/// Equality and hashing use the ID only, so two employees with the same name
/// are still distinct people.
#[derive(Debug, Clone, Serialize)]
pub struct Employee {
    id: EmployeeId,
    name: String,
    email: String,
    experience_years: u32,
}

impl Employee {
    /// Creates an employee whose email is derived from the name
    pub fn new(id: EmployeeId, name: impl Into<String>, experience_years: u32) -> Self {
        let name = name.into();
        let email = default_email(&name);
        Self::with_email(id, name, email, experience_years)
    }

    /// Creates an employee with an explicit email address
    pub fn with_email(
        id: EmployeeId,
        name: impl Into<String>,
        email: impl Into<String>,
        experience_years: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            experience_years,
        }
    }

    pub fn experience_years(&self) -> u32 {
        self.experience_years
    }
}

impl Identifiable for Employee {
    type Id = EmployeeId;

    fn id(&self) -> EmployeeId {
        self.id
    }
}

impl Person for Employee {
    fn name(&self) -> &str {
        &self.name
    }

    fn email(&self) -> &str {
        &self.email
    }

    fn role_description(&self) -> String {
        format!("Employee with {} years experience", self.experience_years)
    }
}

impl PartialEq for Employee {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Employee {}

impl Hash for Employee {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Person{{id={}, name='{}', email='{}', role='{}'}}",
            self.id,
            self.name,
            self.email,
            self.role_description()
        )
    }
}
