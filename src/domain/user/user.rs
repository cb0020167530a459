use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::value_objects::{Email, PhoneType};
use crate::domain::validation::{Constraint, FieldRule, Record, ValidationErrors};

/// Rules applied to `POST /api/register` bodies
pub const REGISTER_SCHEMA: &[FieldRule] = &[
    FieldRule::optional(
        "companyName",
        "Company Name",
        &[Constraint::MinLength(3), Constraint::MaxLength(30)],
    ),
    FieldRule::optional("phone", "Phone", &[Constraint::Digits(10)]),
    FieldRule::required(
        "phoneType",
        "Phone Type",
        &[Constraint::OneOf(PhoneType::VALUES)],
    ),
    FieldRule::required("email", "Email", &[Constraint::Email]),
    FieldRule::optional(
        "streetAddress",
        "Street Address",
        &[Constraint::MinLength(10), Constraint::MaxLength(200)],
    ),
    FieldRule::optional("address2", "Address 2", &[]),
    FieldRule::required("city", "City", &[]),
    FieldRule::required("state", "State", &[]),
    FieldRule::optional("zipCode", "Zip Code", &[Constraint::Digits(6)]),
];

/// Rules applied to `POST /api/login` bodies
pub const LOGIN_SCHEMA: &[FieldRule] = &[
    FieldRule::required("email", "Email", &[Constraint::Email]),
    FieldRule::required("phone", "Phone", &[]),
];

/// A registered user as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub company_name: Option<String>,
    pub phone: Option<String>,
    pub phone_type: PhoneType,
    pub email: Email,
    pub street_address: Option<String>,
    pub address2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A validated registration, not yet persisted
///
/// The surrogate id and creation time are assigned by the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub company_name: Option<String>,
    pub phone: Option<String>,
    pub phone_type: PhoneType,
    pub email: Email,
    pub street_address: Option<String>,
    pub address2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: Option<String>,
}

impl NewUser {
    /// Builds a registration from a record that passed `REGISTER_SCHEMA`
    pub fn from_record(mut record: Record) -> Result<Self, ValidationErrors> {
        let phone_type = required(&mut record, "phoneType", "Phone Type")?
            .parse::<PhoneType>()
            .map_err(|_| ValidationErrors::single("Invalid Phone Type"))?;
        let email = Email::new(required(&mut record, "email", "Email")?)
            .map_err(|_| ValidationErrors::single("Invalid email"))?;

        Ok(Self {
            company_name: record.take("companyName"),
            phone: record.take("phone"),
            phone_type,
            email,
            street_address: record.take("streetAddress"),
            address2: record.take("address2"),
            city: required(&mut record, "city", "City")?,
            state: required(&mut record, "state", "State")?,
            zip_code: record.take("zipCode"),
        })
    }

    /// Materializes the stored user once an id and creation time are known
    pub fn into_user(self, id: Uuid, created_at: DateTime<Utc>) -> User {
        User {
            id,
            company_name: self.company_name,
            phone: self.phone,
            phone_type: self.phone_type,
            email: self.email,
            street_address: self.street_address,
            address2: self.address2,
            city: self.city,
            state: self.state,
            zip_code: self.zip_code,
            created_at,
        }
    }
}

/// Email and phone pair presented at login
///
/// The phone number stands in for a password: a login succeeds only when the
/// stored user with this email has exactly this phone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    pub email: Email,
    pub phone: String,
}

impl LoginCredentials {
    /// Builds credentials from a record that passed `LOGIN_SCHEMA`
    pub fn from_record(mut record: Record) -> Result<Self, ValidationErrors> {
        let email = Email::new(required(&mut record, "email", "Email")?)
            .map_err(|_| ValidationErrors::single("Invalid email"))?;
        let phone = required(&mut record, "phone", "Phone")?;

        Ok(Self { email, phone })
    }

    /// True when `user` was registered with these credentials
    pub fn matches(&self, user: &User) -> bool {
        user.email == self.email && user.phone.as_deref() == Some(self.phone.as_str())
    }
}

fn required(record: &mut Record, field: &str, label: &str) -> Result<String, ValidationErrors> {
    record
        .take(field)
        .ok_or_else(|| ValidationErrors::single(format!("{} is required", label)))
}
