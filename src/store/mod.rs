//! Data access shim.
//!
//! A single entry point, [`Store::from`], begins a query against a backend
//! table and returns a chainable [`Query`]. Terminal operations route to
//! either the hosted backend or static demo data, transparently to the
//! caller. The backend is chosen exactly once, by [`Store::connect`], from
//! the two configured connection values.

use crate::connection::{ConnectionSettings, Mode};
use log::warn;
use std::sync::Arc;

pub(crate) mod demo;
pub(crate) mod remote;
pub mod error;
pub mod query;

pub use demo::DemoBackend;
pub use error::StoreError;
pub use query::{Filter, Order, Plan, Query, Row, record};
pub use remote::RemoteBackend;

#[cfg(test)]
use mockall::{automock, predicate::*};

/// The uniform surface both backends implement. Callers never hold a
/// backend directly; they go through [`Store`] and [`Query`].
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    /// The mode this backend serves.
    fn mode(&self) -> Mode;

    /// Resolve a read to its matching rows. No match is `Ok(vec![])`.
    async fn fetch(&self, plan: &Plan) -> Result<Vec<Row>, StoreError>;

    /// Resolve a head-only count without row bodies.
    async fn count(&self, plan: &Plan) -> Result<u64, StoreError>;

    /// Resolve a read expected to match exactly one row.
    async fn single(&self, plan: &Plan) -> Result<Row, StoreError>;

    /// Insert the given rows.
    async fn insert(&self, plan: &Plan, rows: Vec<Row>) -> Result<(), StoreError>;

    /// Patch the rows matched by the plan's filters.
    async fn update(&self, plan: &Plan, patch: Row) -> Result<(), StoreError>;

    /// Insert or replace one row keyed on its primary key.
    async fn upsert(&self, plan: &Plan, row: Row) -> Result<(), StoreError>;

    /// Delete the rows matched by the plan's filters.
    async fn delete(&self, plan: &Plan) -> Result<(), StoreError>;
}

/// Handle to the selected backend. Cheap to clone; constructed once at
/// startup and passed to every command handler.
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn Backend>,
}

impl Store {
    /// Selects the backend from the configured connection values.
    ///
    /// Placeholder-shaped values mean there is no real project to talk to,
    /// so the console serves canned demo data and says so once on startup.
    pub fn connect(settings: &ConnectionSettings) -> Self {
        match settings.mode() {
            Mode::Demo => {
                warn!(
                    "running in demo mode, no real database connection; set {} and {} to go live",
                    crate::connection::URL_ENV_VAR,
                    crate::connection::KEY_ENV_VAR
                );
                Store::with_backend(Arc::new(DemoBackend::new()))
            }
            Mode::Live => Store::with_backend(Arc::new(RemoteBackend::new(settings.clone()))),
        }
    }

    /// Wraps an already-constructed backend. Used by `connect` and by tests
    /// that inject a mock.
    pub fn with_backend(backend: Arc<dyn Backend>) -> Self {
        Store { backend }
    }

    pub fn mode(&self) -> Mode {
        self.backend.mode()
    }

    /// Begins a query against `table`.
    pub fn from(&self, table: &str) -> Query {
        Query::new(self.backend.clone(), table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::{PLACEHOLDER_KEY, PLACEHOLDER_URL};

    #[test]
    /// The factory decision is purely a function of the two configured
    /// values; flipping them flips the constructed backend.
    fn factory_selects_backend_from_settings_alone() {
        let demo = Store::connect(&ConnectionSettings::new(PLACEHOLDER_URL, PLACEHOLDER_KEY));
        assert_eq!(demo.mode(), Mode::Demo);

        let live = Store::connect(&ConnectionSettings::new(
            "https://qwzx.supabase.co",
            "eyJhbGciOiJIUzI1NiJ9.service",
        ));
        assert_eq!(live.mode(), Mode::Live);
    }
}
