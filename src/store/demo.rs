//! Demo backend serving canned data.
//!
//! Active whenever the connection values look like placeholders, so the
//! console stays fully walkable offline. Every terminal call resolves after
//! an artificial delay to mimic network latency, reads always succeed, and
//! writes are logged and dropped.
//!
//! Known simplification, kept on purpose: equality filters are accepted
//! syntactically but not applied, so reads return the full canned set for
//! the table whatever `eq(...)` calls preceded them. The login flow relies
//! on this (a `single()` against the settings table answers with the master
//! code row regardless of the key requested). Tests pin the behavior so any
//! future change is deliberate and visible.

use crate::connection::Mode;
use crate::consts::admin_consts::demo_latency;
use crate::consts::admin_consts::{setting_keys, tables};
use crate::store::error::StoreError;
use crate::store::query::{Plan, Row, record};
use crate::store::Backend;
use chrono::{Duration, Utc};
use log::{debug, info};
use serde_json::json;
use std::collections::HashMap;
use tokio::time::sleep;

/// Master access code accepted in demo mode.
const DEMO_MASTER_CODE: &str = "lux_master_2026";

pub struct DemoBackend {
    tables: HashMap<String, Vec<Row>>,
}

impl DemoBackend {
    pub fn new() -> Self {
        let now = Utc::now();
        let mut seeded: HashMap<String, Vec<Row>> = HashMap::new();

        seeded.insert(
            tables::INQUIRIES.to_string(),
            vec![
                record(json!({
                    "id": 1,
                    "name": "Sophie Martin",
                    "email": "sophie.m@gmail.com",
                    "eventType": "Wedding",
                    "message": "Looking for full photography package for June 2025.",
                    "createdAt": now,
                })),
                record(json!({
                    "id": 2,
                    "name": "Jean Dupont",
                    "email": "j.dupont@corporate.lu",
                    "eventType": "Corporate",
                    "message": "Annual gala dinner coverage needed.",
                    "createdAt": now - Duration::days(1),
                })),
                record(json!({
                    "id": 3,
                    "name": "Maria Garcia",
                    "email": "maria.g@hotmail.com",
                    "eventType": "Baptism",
                    "message": "Small family gathering photos.",
                    "createdAt": now - Duration::days(2),
                })),
            ],
        );

        // The master code row stays first: demo `single()` answers with the
        // head of the table (see module docs).
        seeded.insert(
            tables::SETTINGS.to_string(),
            vec![
                record(json!({
                    "key": setting_keys::MASTER_SECURITY_CODE,
                    "value": DEMO_MASTER_CODE,
                })),
                record(json!({
                    "key": setting_keys::STREAM_CONFIG,
                    "value": { "platform": "youtube", "channelId": "UC_x5XG1OV2P6uZZ5FSM9Ttw" },
                })),
            ],
        );

        seeded.insert(
            tables::VLOGS.to_string(),
            vec![
                record(json!({
                    "id": 1,
                    "title": "Summer Wedding Highlights",
                    "description": "Best moments from the majestic garden wedding.",
                    "created_at": "2025-06-15T10:00:00Z",
                })),
                record(json!({
                    "id": 2,
                    "title": "Corporate Gala 2024",
                    "description": "Full coverage of the annual tech summit.",
                    "created_at": "2024-12-10T10:00:00Z",
                })),
                record(json!({
                    "id": 3,
                    "title": "Behind the Scenes",
                    "description": "Setting up the stage for the rock concert.",
                    "created_at": "2024-11-20T10:00:00Z",
                })),
            ],
        );

        seeded.insert(
            tables::JOBS.to_string(),
            vec![
                record(json!({
                    "id": 1,
                    "title": "Event Coordinator",
                    "company": "Welux Events",
                    "location": "Luxembourg",
                    "deadline": "2026-02-01",
                    "created_at": now - Duration::days(3),
                })),
                record(json!({
                    "id": 2,
                    "title": "Videographer",
                    "company": "Freelance",
                    "location": "Remote / On-site",
                    "deadline": "2026-01-20",
                    "created_at": now - Duration::days(9),
                })),
            ],
        );

        seeded.insert(
            tables::DEALS.to_string(),
            vec![
                record(json!({
                    "id": 1,
                    "title": "Winter Wedding Special",
                    "discount": "20% OFF",
                    "expiration": "2026-02-28",
                    "description": "20% off full photography packages for January/February weddings.",
                    "created_at": now - Duration::days(4),
                })),
                record(json!({
                    "id": 2,
                    "title": "Early Bird Corporate",
                    "discount": "FREE UPGRADE",
                    "expiration": "2026-03-30",
                    "description": "Book your 2026 gala now and get free lighting upgrade.",
                    "created_at": now - Duration::days(12),
                })),
            ],
        );

        DemoBackend { tables: seeded }
    }

    /// The canned rows for a table. Unknown tables are an empty set, never
    /// an error.
    fn canned(&self, table: &str) -> Vec<Row> {
        self.tables.get(table).cloned().unwrap_or_default()
    }
}

impl Default for DemoBackend {
    fn default() -> Self {
        DemoBackend::new()
    }
}

#[async_trait::async_trait]
impl Backend for DemoBackend {
    fn mode(&self) -> Mode {
        Mode::Demo
    }

    async fn fetch(&self, plan: &Plan) -> Result<Vec<Row>, StoreError> {
        sleep(demo_latency::read_delay()).await;
        debug!("[demo db] fetching {}", plan.table);
        let mut rows = self.canned(&plan.table);
        // Seeds are stored newest-first; only the limit is honored here.
        if let Some(limit) = plan.limit {
            rows.truncate(limit);
        }
        Ok(rows)
    }

    async fn count(&self, plan: &Plan) -> Result<u64, StoreError> {
        sleep(demo_latency::read_delay()).await;
        debug!("[demo db] counting {}", plan.table);
        Ok(self.canned(&plan.table).len() as u64)
    }

    async fn single(&self, plan: &Plan) -> Result<Row, StoreError> {
        sleep(demo_latency::single_delay()).await;
        debug!("[demo db] reading one row of {}", plan.table);
        self.canned(&plan.table)
            .into_iter()
            .next()
            .ok_or(StoreError::RowNotFound)
    }

    async fn insert(&self, plan: &Plan, rows: Vec<Row>) -> Result<(), StoreError> {
        sleep(demo_latency::write_delay()).await;
        info!("[demo db] dropping insert into {}: {:?}", plan.table, rows);
        Ok(())
    }

    async fn update(&self, plan: &Plan, patch: Row) -> Result<(), StoreError> {
        sleep(demo_latency::write_delay()).await;
        info!("[demo db] dropping update of {}: {:?}", plan.table, patch);
        Ok(())
    }

    async fn upsert(&self, plan: &Plan, row: Row) -> Result<(), StoreError> {
        sleep(demo_latency::write_delay()).await;
        info!("[demo db] dropping upsert to {}: {:?}", plan.table, row);
        Ok(())
    }

    async fn delete(&self, plan: &Plan) -> Result<(), StoreError> {
        sleep(demo_latency::write_delay()).await;
        info!("[demo db] dropping delete from {}", plan.table);
        Ok(())
    }
}
