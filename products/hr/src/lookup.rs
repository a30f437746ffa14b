use crate::model::Employee;

/// Single-record lookup by id, independent of the roster and the form.
#[derive(Clone, Debug, Default)]
pub struct LookupPanel {
    query: String,
    result: Option<Employee>,
}

impl LookupPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// The id typed by the operator, if it reads as one.
    pub fn parsed_query(&self) -> Option<i64> {
        self.query.trim().parse().ok()
    }

    pub fn result(&self) -> Option<&Employee> {
        self.result.as_ref()
    }

    pub fn store(&mut self, record: Employee) {
        self.result = Some(record);
    }

    pub fn clear_result(&mut self) {
        self.result = None;
    }
}
