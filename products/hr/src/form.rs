use serde::Serialize;
use tracing::debug;

use crate::{
    model::{Employee, EmployeeField},
    validator::{self, ValidationError},
};

/// Raw text of the shared employee form. Every field is always present; an
/// empty string means "not filled in".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FormBuffer {
    pub id: String,
    pub name: String,
    pub gender: String,
    pub department: String,
    pub email: String,
    pub contact: String,
    pub salary: String,
}

impl FormBuffer {
    /// The pristine template the form starts from and resets to.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_record(record: &Employee) -> Self {
        Self {
            id: record.id.to_string(),
            name: record.name.clone(),
            gender: record.gender.to_string(),
            department: record.department.clone(),
            email: record.email.clone(),
            contact: record.contact.clone(),
            salary: record.salary.clone(),
        }
    }

    pub fn get(&self, field: EmployeeField) -> &str {
        match field {
            EmployeeField::Id => &self.id,
            EmployeeField::Name => &self.name,
            EmployeeField::Gender => &self.gender,
            EmployeeField::Department => &self.department,
            EmployeeField::Email => &self.email,
            EmployeeField::Contact => &self.contact,
            EmployeeField::Salary => &self.salary,
        }
    }

    pub fn set(&mut self, field: EmployeeField, value: impl Into<String>) {
        let slot = match field {
            EmployeeField::Id => &mut self.id,
            EmployeeField::Name => &mut self.name,
            EmployeeField::Gender => &mut self.gender,
            EmployeeField::Department => &mut self.department,
            EmployeeField::Email => &mut self.email,
            EmployeeField::Contact => &mut self.contact,
            EmployeeField::Salary => &mut self.salary,
        };
        *slot = value.into();
    }
}

/// Whether the form creates a new record or edits the one it was loaded from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Creating,
    Editing {
        original_id: i64,
    },
}

impl FormMode {
    pub fn is_editing(self) -> bool {
        matches!(self, FormMode::Editing { .. })
    }

    pub fn title(self) -> &'static str {
        match self {
            FormMode::Creating => "Add Employee",
            FormMode::Editing { .. } => "Edit Employee",
        }
    }
}

/// Owner of the single form buffer and its mode.
#[derive(Clone, Debug, Default)]
pub struct FormController {
    mode: FormMode,
    buffer: FormBuffer,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn buffer(&self) -> &FormBuffer {
        &self.buffer
    }

    pub fn is_editing(&self) -> bool {
        self.mode.is_editing()
    }

    /// Load a copy of `record` and switch to edit mode.
    pub fn begin_edit(&mut self, record: &Employee) {
        debug!(id = record.id, "form entering edit mode");
        self.buffer = FormBuffer::from_record(record);
        self.mode = FormMode::Editing {
            original_id: record.id,
        };
    }

    pub fn field_changed(&mut self, field: EmployeeField, value: impl Into<String>) {
        self.buffer.set(field, value);
    }

    pub fn reset(&mut self) {
        debug!(mode = ?self.mode, "form reset");
        self.buffer = FormBuffer::empty();
        self.mode = FormMode::Creating;
    }

    /// Validate the buffer and produce the record to submit.
    pub fn candidate(&self) -> Result<Employee, ValidationError> {
        validator::validate(&self.buffer)
    }
}
