//! Parameterized WHERE-clause composition for dashboard filters.
//!
//! Filter values chosen in the dashboard are never spliced into SQL text.
//! Columns come from a closed enum and values are bound through `?`
//! placeholders, so the rendered clause contains no user-chosen strings.

use rusqlite::types::Value;

/// Filterable columns of the `shortages_with_ndc` view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterColumn {
    CompanyName,
    Route,
    ShortageDosageForm,
    TherapeuticCategory,
    Status,
}

impl FilterColumn {
    /// The view column this filter binds to. Always a fixed identifier,
    /// never derived from input.
    pub fn sql_name(self) -> &'static str {
        match self {
            Self::CompanyName => "company_name",
            Self::Route => "route",
            Self::ShortageDosageForm => "shortage_dosage_form",
            Self::TherapeuticCategory => "therapeutic_category",
            Self::Status => "status",
        }
    }
}

/// A conjunction of equality predicates over view columns.
#[derive(Debug, Default, Clone)]
pub struct FilterSet {
    predicates: Vec<(FilterColumn, Value)>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `column = value`.
    #[must_use]
    pub fn eq(mut self, column: FilterColumn, value: impl Into<String>) -> Self {
        self.predicates.push((column, Value::Text(value.into())));
        self
    }

    /// Restrict to currently active shortages.
    #[must_use]
    pub fn current_only(self) -> Self {
        self.eq(FilterColumn::Status, "Current")
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Render the `WHERE ...` clause with one `?` placeholder per
    /// predicate, or an empty string when unfiltered.
    pub fn where_clause(&self) -> String {
        if self.predicates.is_empty() {
            return String::new();
        }
        let conditions: Vec<String> = self
            .predicates
            .iter()
            .map(|(column, _)| format!("{} = ?", column.sql_name()))
            .collect();
        format!("WHERE {}", conditions.join(" AND "))
    }

    /// Bound values, in placeholder order.
    pub fn params(&self) -> Vec<Value> {
        self.predicates
            .iter()
            .map(|(_, value)| value.clone())
            .collect()
    }
}
