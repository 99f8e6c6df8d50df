//! Lead/inquiry listing.

use crate::consts::admin_consts::tables;
use crate::dashboard::time_ago;
use crate::models::{Inquiry, from_row};
use crate::pretty::{handle_cmd_error, print_cmd_error};
use crate::store::Store;
use chrono::Utc;

/// Lists inquiry submissions newest-first, optionally narrowed to one
/// event type.
///
/// Note that in demo mode the event-type filter is accepted but not
/// applied; see the demo backend's documented simplification.
pub async fn list(
    store: &Store,
    event_type: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut query = store
        .from(tables::INQUIRIES)
        .select("*")
        .order("createdAt", false);
    if let Some(event_type) = event_type {
        query = query.eq("eventType", event_type);
    }

    let rows = query
        .fetch()
        .await
        .map_err(|e| handle_cmd_error!(e, "Could not load inquiries."))?;

    if rows.is_empty() {
        println!("No inquiries yet.");
        return Ok(());
    }

    let now = Utc::now();
    println!("{} inquiries:", rows.len());
    for row in rows {
        match from_row::<Inquiry>(row) {
            Ok(inquiry) => {
                println!(
                    "  #{} {} <{}>{} | {} ({})",
                    inquiry.id,
                    inquiry.name,
                    inquiry.email,
                    inquiry
                        .phone
                        .as_deref()
                        .map(|p| format!(" {}", p))
                        .unwrap_or_default(),
                    inquiry.event_label(),
                    time_ago(inquiry.created_at, now),
                );
                if let Some(message) = &inquiry.message {
                    println!("      {}", message);
                }
            }
            // A row the typed view cannot read is still worth showing raw.
            Err(e) => println!("  (unreadable row: {})", e),
        }
    }
    Ok(())
}
