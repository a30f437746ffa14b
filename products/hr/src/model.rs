use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use serde_json::Value;
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown gender {0:?}")]
pub struct ParseGenderError(pub String);

impl FromStr for Gender {
    type Err = ParseGenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MALE" => Ok(Gender::Male),
            "FEMALE" => Ok(Gender::Female),
            _ => Err(ParseGenderError(s.to_string())),
        }
    }
}

/// A roster entry as exchanged with the employee API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(deserialize_with = "lenient_id")]
    pub id: i64,
    #[serde(deserialize_with = "lenient_text")]
    pub name: String,
    pub gender: Gender,
    #[serde(deserialize_with = "lenient_text")]
    pub department: String,
    #[serde(deserialize_with = "lenient_text")]
    pub email: String,
    #[serde(deserialize_with = "lenient_text")]
    pub contact: String,
    /// Kept as entered; the backend owns the numeric representation.
    #[serde(deserialize_with = "lenient_text")]
    pub salary: String,
}

impl Employee {
    /// Text shown in the roster table for one column.
    pub fn cell(&self, field: EmployeeField) -> String {
        match field {
            EmployeeField::Id => self.id.to_string(),
            EmployeeField::Name => self.name.clone(),
            EmployeeField::Gender => self.gender.to_string(),
            EmployeeField::Department => self.department.clone(),
            EmployeeField::Email => self.email.clone(),
            EmployeeField::Contact => self.contact.clone(),
            EmployeeField::Salary => self.salary.clone(),
        }
    }
}

fn lenient_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(number) => number
            .as_i64()
            .ok_or_else(|| D::Error::custom(format!("id {number} is not an integer"))),
        Value::String(text) => text
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("id {text:?} is not an integer"))),
        other => Err(D::Error::custom(format!("unexpected id {other}"))),
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(D::Error::custom(format!("expected text, found {other}"))),
    }
}

/// The fixed field set of an employee record, in validation and column order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EmployeeField {
    Id,
    Name,
    Gender,
    Department,
    Email,
    Contact,
    Salary,
}

impl EmployeeField {
    pub const ALL: [EmployeeField; 7] = [
        EmployeeField::Id,
        EmployeeField::Name,
        EmployeeField::Gender,
        EmployeeField::Department,
        EmployeeField::Email,
        EmployeeField::Contact,
        EmployeeField::Salary,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EmployeeField::Id => "id",
            EmployeeField::Name => "name",
            EmployeeField::Gender => "gender",
            EmployeeField::Department => "department",
            EmployeeField::Email => "email",
            EmployeeField::Contact => "contact",
            EmployeeField::Salary => "salary",
        }
    }

    pub fn column_header(self) -> &'static str {
        match self {
            EmployeeField::Id => "ID",
            EmployeeField::Name => "NAME",
            EmployeeField::Gender => "GENDER",
            EmployeeField::Department => "DEPARTMENT",
            EmployeeField::Email => "EMAIL",
            EmployeeField::Contact => "CONTACT",
            EmployeeField::Salary => "SALARY",
        }
    }
}

impl fmt::Display for EmployeeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown field {0:?}")]
pub struct ParseFieldError(pub String);

impl FromStr for EmployeeField {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        EmployeeField::ALL
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseFieldError(s.to_string()))
    }
}
