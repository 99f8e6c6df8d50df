//! Chainable query builder.
//!
//! A [`Query`] accumulates a backend-agnostic [`Plan`] through its modifier
//! methods and hands it to the selected [`Backend`](crate::store::Backend)
//! when a terminal method resolves it. Both backends satisfy the same
//! contract, so callers never know which one is active.

use crate::store::{Backend, StoreError};
use serde_json::Value;
use std::sync::Arc;

/// One opaque record as moved by the shim: field name to JSON value. The
/// shim never interprets fields or generates identifiers.
pub type Row = serde_json::Map<String, Value>;

/// Converts a JSON object literal into a [`Row`]. Non-object values become
/// an empty row rather than panicking.
pub fn record(value: Value) -> Row {
    value.as_object().cloned().unwrap_or_default()
}

/// An equality filter. Multiple filters on one query AND together.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub value: Value,
}

/// Result ordering for a read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

/// The accumulated description of one query, independent of the backend
/// that will execute it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Plan {
    pub table: String,
    /// Projection, `"*"` unless narrowed by `select`.
    pub columns: String,
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
    pub limit: Option<usize>,
    /// Row count requested without row bodies.
    pub head: bool,
}

impl Plan {
    fn new(table: &str) -> Self {
        Plan {
            table: table.to_string(),
            columns: "*".to_string(),
            ..Plan::default()
        }
    }
}

/// A query scoped to one table. Obtained from
/// [`Store::from`](crate::store::Store::from); chainable until one of the
/// terminal methods resolves it.
pub struct Query {
    backend: Arc<dyn Backend>,
    plan: Plan,
}

impl Query {
    pub(crate) fn new(backend: Arc<dyn Backend>, table: &str) -> Self {
        Query {
            backend,
            plan: Plan::new(table),
        }
    }

    /// Narrows the projection to the given comma-separated columns.
    pub fn select(mut self, columns: &str) -> Self {
        self.plan.columns = columns.to_string();
        self
    }

    /// Adds an equality filter; repeated calls AND together.
    pub fn eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.plan.filters.push(Filter {
            column: column.to_string(),
            value: value.into(),
        });
        self
    }

    /// Orders results by the given column.
    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        self.plan.order = Some(Order {
            column: column.to_string(),
            ascending,
        });
        self
    }

    /// Caps the number of returned rows.
    pub fn limit(mut self, n: usize) -> Self {
        self.plan.limit = Some(n);
        self
    }

    /// Terminal: resolves to the matching rows. Matching nothing is an
    /// empty collection, never an error.
    pub async fn fetch(self) -> Result<Vec<Row>, StoreError> {
        self.backend.fetch(&self.plan).await
    }

    /// Terminal: resolves to the row count only, without row bodies.
    pub async fn fetch_count(mut self) -> Result<u64, StoreError> {
        self.plan.head = true;
        self.backend.count(&self.plan).await
    }

    /// Terminal: expects exactly one matching row.
    pub async fn single(self) -> Result<Row, StoreError> {
        self.backend.single(&self.plan).await
    }

    /// Terminal: inserts the given rows.
    pub async fn insert(self, rows: Vec<Row>) -> Result<(), StoreError> {
        self.backend.insert(&self.plan, rows).await
    }

    /// Terminal: patches the rows matched by the accumulated filters.
    pub async fn update(self, patch: Row) -> Result<(), StoreError> {
        self.backend.update(&self.plan, patch).await
    }

    /// Terminal: inserts the row, replacing an existing row with the same
    /// primary key.
    pub async fn upsert(self, row: Row) -> Result<(), StoreError> {
        self.backend.upsert(&self.plan, row).await
    }

    /// Terminal: deletes the rows matched by the accumulated filters.
    pub async fn delete(self) -> Result<(), StoreError> {
        self.backend.delete(&self.plan).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MockBackend;
    use serde_json::json;

    #[tokio::test]
    /// Chained modifiers must all land in the plan the backend receives.
    async fn modifiers_accumulate_into_the_plan() {
        let mut backend = MockBackend::new();
        backend
            .expect_fetch()
            .withf(|plan| {
                plan.table == "client_inquiries"
                    && plan.columns == "id, name"
                    && plan.filters
                        == vec![
                            Filter {
                                column: "eventType".to_string(),
                                value: json!("Wedding"),
                            },
                            Filter {
                                column: "name".to_string(),
                                value: json!("Sophie Martin"),
                            },
                        ]
                    && plan.order
                        == Some(Order {
                            column: "createdAt".to_string(),
                            ascending: false,
                        })
                    && plan.limit == Some(3)
                    && !plan.head
            })
            .returning(|_| Ok(vec![]));

        let query = Query::new(Arc::new(backend), "client_inquiries")
            .select("id, name")
            .eq("eventType", "Wedding")
            .eq("name", "Sophie Martin")
            .order("createdAt", false)
            .limit(3);
        assert!(query.fetch().await.unwrap().is_empty());
    }

    #[tokio::test]
    /// `fetch_count` must flag the plan as a head-only count.
    async fn fetch_count_sets_the_head_flag() {
        let mut backend = MockBackend::new();
        backend
            .expect_count()
            .withf(|plan| plan.head && plan.table == "client_inquiries")
            .returning(|_| Ok(42));

        let count = Query::new(Arc::new(backend), "client_inquiries")
            .fetch_count()
            .await
            .unwrap();
        assert_eq!(count, 42);
    }

    #[test]
    /// Non-object literals degrade to an empty record instead of panicking.
    fn record_tolerates_non_objects() {
        assert_eq!(record(json!({"key": "stream_config"})).len(), 1);
        assert!(record(json!("scalar")).is_empty());
        assert!(record(json!(null)).is_empty());
    }
}
