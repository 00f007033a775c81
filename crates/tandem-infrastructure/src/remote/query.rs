//! Table query builder.
//!
//! Builds the predicate/order/limit parameters the hosted table API
//! understands (`column=eq.value`, `or=(a.eq.v,b.eq.v)`,
//! `order=column.desc`). One builder serves every verb: selects use the
//! full parameter set, updates and deletes use the predicates only.

use std::fmt::Display;

/// Parameter set for one table request.
#[derive(Debug, Clone)]
pub struct Query {
    table: String,
    params: Vec<(String, String)>,
}

impl Query {
    /// Starts a query against a named collection.
    pub fn table(name: impl Into<String>) -> Self {
        Self {
            table: name.into(),
            params: Vec::new(),
        }
    }

    /// Restricts the returned columns (defaults to all).
    pub fn columns(mut self, columns: &str) -> Self {
        self.params.push(("select".to_string(), columns.to_string()));
        self
    }

    /// Equality predicate on a column.
    pub fn eq(mut self, column: &str, value: impl Display) -> Self {
        self.params.push((column.to_string(), format!("eq.{value}")));
        self
    }

    /// Inclusive lower bound on a column.
    pub fn gte(mut self, column: &str, value: impl Display) -> Self {
        self.params.push((column.to_string(), format!("gte.{value}")));
        self
    }

    /// Inclusive upper bound on a column.
    pub fn lte(mut self, column: &str, value: impl Display) -> Self {
        self.params.push((column.to_string(), format!("lte.{value}")));
        self
    }

    /// Matches rows where either column equals the value.
    ///
    /// This is the membership predicate for shared accounts: owner or
    /// partner.
    pub fn either_eq(mut self, first: &str, second: &str, value: impl Display) -> Self {
        self.params.push((
            "or".to_string(),
            format!("({first}.eq.{value},{second}.eq.{value})"),
        ));
        self
    }

    /// Orders results by a column, descending. Repeated calls append
    /// secondary sort keys.
    pub fn order_desc(self, column: &str) -> Self {
        self.order(column, "desc")
    }

    /// Orders results by a column, ascending. Repeated calls append
    /// secondary sort keys.
    pub fn order_asc(self, column: &str) -> Self {
        self.order(column, "asc")
    }

    fn order(mut self, column: &str, direction: &str) -> Self {
        // The remote API takes one comma-separated order parameter.
        match self.params.iter_mut().find(|(key, _)| key == "order") {
            Some((_, value)) => {
                value.push_str(&format!(",{column}.{direction}"));
            }
            None => {
                self.params
                    .push(("order".to_string(), format!("{column}.{direction}")));
            }
        }
        self
    }

    /// Caps the number of returned rows.
    pub fn limit(mut self, count: usize) -> Self {
        self.params.push(("limit".to_string(), count.to_string()));
        self
    }

    /// The collection this query targets.
    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// The accumulated request parameters, in insertion order.
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }
}
