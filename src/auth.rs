//! Opening and closing the shared-code admin session.

use crate::config::Session;
use crate::consts::admin_consts::{setting_keys, tables};
use crate::pretty::{handle_cmd_error, print_cmd_error, print_cmd_info};
use crate::store::Store;
use serde_json::Value;
use std::path::Path;

/// Verifies the entered code against the master security code stored in
/// the settings table and, on a match, records an active session.
///
/// # Arguments
/// * `code` - The code entered by the staff member.
/// * `session_path` - The path to the session file to write on success.
/// * `store` - The data access shim to read the stored code through.
pub async fn login(
    code: &str,
    session_path: &Path,
    store: &Store,
) -> Result<(), Box<dyn std::error::Error>> {
    let row = store
        .from(tables::SETTINGS)
        .select("value")
        .eq("key", setting_keys::MASTER_SECURITY_CODE)
        .single()
        .await
        .map_err(|e| handle_cmd_error!(e, "Could not reach the configuration backend."))?;

    let stored = row.get("value").map(normalize_stored_code).unwrap_or_default();

    if code == stored {
        Session::open()
            .save(session_path)
            .map_err(|e| handle_cmd_error!(e, "Failed to save session."))?;
        print_cmd_info!(
            "Access granted.",
            "Session opened ({} mode). Try: welux-admin overview",
            store.mode()
        );
        Ok(())
    } else {
        print_cmd_error!("Access denied: invalid code.");
        Err(Box::from("Access denied: invalid code"))
    }
}

/// Closes the admin session by removing the session file.
pub fn logout(session_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    println!("Logging out and clearing the admin session...");
    Session::clear(session_path).map_err(Into::into)
}

/// Gate for data commands: they require an active session.
pub fn require_session(session_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if Session::is_active(session_path) {
        Ok(())
    } else {
        print_cmd_error!("No active session.");
        Err(Box::from(
            "No active session. Run: welux-admin login --code <CODE>",
        ))
    }
}

/// The stored master code may carry stray quotes or whitespace from manual
/// edits in the backend dashboard; strip both before comparing.
fn normalize_stored_code(value: &Value) -> String {
    let text = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    text.chars()
        .filter(|c| *c != '"' && *c != '\'')
        .collect::<String>()
        .trim()
        .to_string()
}
