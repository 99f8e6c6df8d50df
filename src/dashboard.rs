//! Overview command: lead totals and recent activity.

use crate::consts::admin_consts::tables;
use crate::pretty::{handle_cmd_error, print_cmd_error};
use crate::store::{Row, Store};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Prints the dashboard: total inquiry count plus the three most recent
/// submissions as a relative-time activity feed.
///
/// The count and the recent-list are independent in-flight calls; nothing
/// orders them beyond the join here.
pub async fn overview(store: &Store) -> Result<(), Box<dyn std::error::Error>> {
    let total = store.from(tables::INQUIRIES).fetch_count();
    let recent = store
        .from(tables::INQUIRIES)
        .select("id, name, eventType, createdAt")
        .order("createdAt", false)
        .limit(3)
        .fetch();

    let (total, recent) = futures::future::try_join(total, recent)
        .await
        .map_err(|e| handle_cmd_error!(e, "Could not load the overview."))?;

    println!("Welux Events overview ({} mode)", store.mode());
    println!("  Total leads: {}", total);
    println!("  Recent activity:");
    if recent.is_empty() {
        println!("    No recent activity");
    }
    let now = Utc::now();
    for row in &recent {
        println!("    {}", activity_line(row, now));
    }
    Ok(())
}

/// One feed line, e.g. `New Wedding from Sophie Martin (2 hours ago)`.
fn activity_line(row: &Row, now: DateTime<Utc>) -> String {
    let name = row.get("name").and_then(Value::as_str).unwrap_or("unknown");
    let event = row
        .get("eventType")
        .and_then(Value::as_str)
        .unwrap_or("inquiry");
    let when = row
        .get("createdAt")
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| time_ago(t.with_timezone(&Utc), now))
        .unwrap_or_else(|| "some time ago".to_string());
    format!("New {} from {} ({})", event, name, when)
}

/// Relative-time rendering for the activity feed.
pub fn time_ago(past: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - past).num_minutes();
    if minutes < 1 {
        return "just now".to_string();
    }
    if minutes < 60 {
        return format!("{} min{} ago", minutes, if minutes > 1 { "s" } else { "" });
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{} hour{} ago", hours, if hours > 1 { "s" } else { "" });
    }
    let days = hours / 24;
    format!("{} day{} ago", days, if days > 1 { "s" } else { "" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    #[test]
    fn time_ago_buckets_by_magnitude() {
        let now = Utc::now();
        assert_eq!(time_ago(now, now), "just now");
        assert_eq!(time_ago(now - Duration::minutes(1), now), "1 min ago");
        assert_eq!(time_ago(now - Duration::minutes(45), now), "45 mins ago");
        assert_eq!(time_ago(now - Duration::hours(1), now), "1 hour ago");
        assert_eq!(time_ago(now - Duration::hours(23), now), "23 hours ago");
        assert_eq!(time_ago(now - Duration::days(3), now), "3 days ago");
    }

    #[test]
    /// Rows with missing or unparsable fields still render a feed line.
    fn activity_line_tolerates_sparse_rows() {
        let now = Utc::now();
        let row = crate::store::record(json!({
            "name": "Sophie Martin",
            "eventType": "Wedding",
            "createdAt": (now - Duration::hours(2)).to_rfc3339(),
        }));
        assert_eq!(
            activity_line(&row, now),
            "New Wedding from Sophie Martin (2 hours ago)"
        );

        let sparse = crate::store::record(json!({"name": "Jean Dupont"}));
        assert_eq!(
            activity_line(&sparse, now),
            "New inquiry from Jean Dupont (some time ago)"
        );
    }
}
