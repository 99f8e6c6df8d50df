//! Content manager commands: vlogs, job postings and promotional deals.
//!
//! All three kinds follow the same list / add / update / delete shape; only
//! their field sets differ. Creation and update timestamps are stamped here
//! because the backend tables have no triggers for them; identifiers are
//! never written, the backend assigns those.

use crate::consts::admin_consts::tables;
use crate::models::{Deal, JobPosting, Vlog, from_row};
use crate::pretty::{handle_cmd_error, print_cmd_error, print_cmd_info};
use crate::store::{Row, Store, record};
use chrono::Utc;
use serde_json::{Value, json};

/// Inserts `field: value` into the patch when a value was provided.
fn patch_field(patch: &mut Row, field: &str, value: Option<String>) {
    if let Some(value) = value {
        patch.insert(field.to_string(), Value::String(value));
    }
}

async fn insert_row(store: &Store, table: &str, mut row: Row) -> Result<(), Box<dyn std::error::Error>> {
    let now = Utc::now();
    row.insert("created_at".to_string(), json!(now));
    row.insert("updated_at".to_string(), json!(now));
    store
        .from(table)
        .insert(vec![row])
        .await
        .map_err(|e| handle_cmd_error!(e, "Could not save the record."))?;
    Ok(())
}

async fn update_row(
    store: &Store,
    table: &str,
    id: i64,
    mut patch: Row,
) -> Result<(), Box<dyn std::error::Error>> {
    if patch.is_empty() {
        print_cmd_error!("Nothing to update: pass at least one field.");
        return Err(Box::from("Nothing to update"));
    }
    patch.insert("updated_at".to_string(), json!(Utc::now()));
    store
        .from(table)
        .eq("id", id)
        .update(patch)
        .await
        .map_err(|e| handle_cmd_error!(e, "Could not update the record."))?;
    Ok(())
}

/// Deletes one record by its backend-assigned identifier. Shared by all
/// three content kinds.
pub async fn delete(store: &Store, table: &str, id: i64) -> Result<(), Box<dyn std::error::Error>> {
    store
        .from(table)
        .eq("id", id)
        .delete()
        .await
        .map_err(|e| handle_cmd_error!(e, "Could not delete the record."))?;
    print_cmd_info!("Record deleted.", "Removed #{} from {}.", id, table);
    Ok(())
}

pub async fn list_vlogs(store: &Store) -> Result<(), Box<dyn std::error::Error>> {
    let rows = store
        .from(tables::VLOGS)
        .select("*")
        .order("created_at", false)
        .fetch()
        .await
        .map_err(|e| handle_cmd_error!(e, "Could not load vlogs."))?;

    if rows.is_empty() {
        println!("No vlogs yet.");
        return Ok(());
    }
    for row in rows {
        match from_row::<Vlog>(row) {
            Ok(vlog) => {
                println!("  #{} {}", vlog.id, vlog.title);
                if let Some(description) = &vlog.description {
                    println!("      {}", description);
                }
            }
            Err(e) => println!("  (unreadable row: {})", e),
        }
    }
    Ok(())
}

pub async fn add_vlog(
    store: &Store,
    title: String,
    description: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut row = record(json!({ "title": title }));
    patch_field(&mut row, "description", description);
    insert_row(store, tables::VLOGS, row).await?;
    print_cmd_info!("Vlog created.", "It will appear on the public site shortly.");
    Ok(())
}

pub async fn update_vlog(
    store: &Store,
    id: i64,
    title: Option<String>,
    description: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut patch = Row::new();
    patch_field(&mut patch, "title", title);
    patch_field(&mut patch, "description", description);
    update_row(store, tables::VLOGS, id, patch).await?;
    print_cmd_info!("Vlog updated.", "Changes saved for #{}.", id);
    Ok(())
}

pub async fn list_jobs(store: &Store) -> Result<(), Box<dyn std::error::Error>> {
    let rows = store
        .from(tables::JOBS)
        .select("*")
        .order("created_at", false)
        .fetch()
        .await
        .map_err(|e| handle_cmd_error!(e, "Could not load job postings."))?;

    if rows.is_empty() {
        println!("No job postings yet.");
        return Ok(());
    }
    for row in rows {
        match from_row::<JobPosting>(row) {
            Ok(job) => {
                println!(
                    "  #{} {} at {} ({})",
                    job.id,
                    job.title,
                    job.company.as_deref().unwrap_or("Welux Events"),
                    job.location.as_deref().unwrap_or("unspecified"),
                );
                if let Some(deadline) = &job.deadline {
                    println!("      apply by {}", deadline);
                }
            }
            Err(e) => println!("  (unreadable row: {})", e),
        }
    }
    Ok(())
}

pub async fn add_job(
    store: &Store,
    title: String,
    company: Option<String>,
    location: Option<String>,
    deadline: Option<String>,
    description: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut row = record(json!({ "title": title }));
    patch_field(&mut row, "company", company);
    patch_field(&mut row, "location", location);
    patch_field(&mut row, "deadline", deadline);
    patch_field(&mut row, "description", description);
    insert_row(store, tables::JOBS, row).await?;
    print_cmd_info!("Job posting created.", "Candidates can now apply.");
    Ok(())
}

pub async fn update_job(
    store: &Store,
    id: i64,
    title: Option<String>,
    company: Option<String>,
    location: Option<String>,
    deadline: Option<String>,
    description: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut patch = Row::new();
    patch_field(&mut patch, "title", title);
    patch_field(&mut patch, "company", company);
    patch_field(&mut patch, "location", location);
    patch_field(&mut patch, "deadline", deadline);
    patch_field(&mut patch, "description", description);
    update_row(store, tables::JOBS, id, patch).await?;
    print_cmd_info!("Job posting updated.", "Changes saved for #{}.", id);
    Ok(())
}

pub async fn list_deals(store: &Store) -> Result<(), Box<dyn std::error::Error>> {
    let rows = store
        .from(tables::DEALS)
        .select("*")
        .order("created_at", false)
        .fetch()
        .await
        .map_err(|e| handle_cmd_error!(e, "Could not load deals."))?;

    if rows.is_empty() {
        println!("No deals yet.");
        return Ok(());
    }
    for row in rows {
        match from_row::<Deal>(row) {
            Ok(deal) => {
                println!(
                    "  #{} {} [{}]",
                    deal.id,
                    deal.title,
                    deal.discount.as_deref().unwrap_or("no discount"),
                );
                if let Some(expiration) = &deal.expiration {
                    println!("      valid until {}", expiration);
                }
                if let Some(description) = &deal.description {
                    println!("      {}", description);
                }
            }
            Err(e) => println!("  (unreadable row: {})", e),
        }
    }
    Ok(())
}

pub async fn add_deal(
    store: &Store,
    title: String,
    discount: Option<String>,
    expiration: Option<String>,
    description: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut row = record(json!({ "title": title }));
    patch_field(&mut row, "discount", discount);
    patch_field(&mut row, "expiration", expiration);
    patch_field(&mut row, "description", description);
    insert_row(store, tables::DEALS, row).await?;
    print_cmd_info!("Deal created.", "The promotion is now live.");
    Ok(())
}

pub async fn update_deal(
    store: &Store,
    id: i64,
    title: Option<String>,
    discount: Option<String>,
    expiration: Option<String>,
    description: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut patch = Row::new();
    patch_field(&mut patch, "title", title);
    patch_field(&mut patch, "discount", discount);
    patch_field(&mut patch, "expiration", expiration);
    patch_field(&mut patch, "description", description);
    update_row(store, tables::DEALS, id, patch).await?;
    print_cmd_info!("Deal updated.", "Changes saved for #{}.", id);
    Ok(())
}
