//! Presence check run before any record leaves the form.
//!
//! Only completeness is checked: a field is unset when it is empty. The id is
//! also unset when it does not read as an integer, and the gender when it is
//! not one of the offered choices.

use thiserror::Error;

use crate::{
    form::FormBuffer,
    model::{Employee, EmployeeField, Gender},
};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Please fill out {field}")]
pub struct ValidationError {
    pub field: EmployeeField,
}

/// First unset field in [`EmployeeField::ALL`] order.
pub fn first_unset(buffer: &FormBuffer) -> Option<EmployeeField> {
    EmployeeField::ALL
        .into_iter()
        .find(|field| is_unset(*field, buffer.get(*field)))
}

pub fn validate(buffer: &FormBuffer) -> Result<Employee, ValidationError> {
    if let Some(field) = first_unset(buffer) {
        return Err(ValidationError { field });
    }
    let id = parse_id(&buffer.id).ok_or(ValidationError {
        field: EmployeeField::Id,
    })?;
    let gender = buffer.gender.parse::<Gender>().map_err(|_| ValidationError {
        field: EmployeeField::Gender,
    })?;
    Ok(Employee {
        id,
        name: buffer.name.clone(),
        gender,
        department: buffer.department.clone(),
        email: buffer.email.clone(),
        contact: buffer.contact.clone(),
        salary: buffer.salary.clone(),
    })
}

fn is_unset(field: EmployeeField, raw: &str) -> bool {
    if raw.is_empty() {
        return true;
    }
    match field {
        EmployeeField::Id => parse_id(raw).is_none(),
        EmployeeField::Gender => raw.parse::<Gender>().is_err(),
        _ => false,
    }
}

fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}
