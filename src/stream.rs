//! Live stream embed configuration.

use crate::consts::admin_consts::{setting_keys, tables};
use crate::models::{StreamConfig, StreamPlatform};
use crate::pretty::{handle_cmd_error, print_cmd_error, print_cmd_info};
use crate::store::{Store, StoreError, record};
use serde_json::json;

/// Prints the stream configuration currently served to the public site.
///
/// A missing row or an unreadable stored value both fall back to the
/// defaults; neither should keep staff out of the screen.
pub async fn show(store: &Store) -> Result<(), Box<dyn std::error::Error>> {
    let result = store
        .from(tables::SETTINGS)
        .select("value")
        .eq("key", setting_keys::STREAM_CONFIG)
        .single()
        .await;

    let config = match result {
        Ok(row) => row
            .get("value")
            .map(StreamConfig::from_value)
            .unwrap_or_default(),
        Err(StoreError::RowNotFound) => StreamConfig::default(),
        Err(e) => return Err(handle_cmd_error!(e, "Could not load the stream configuration.").into()),
    };

    println!("Live stream: {}", config);
    println!("Embed URL:   {}", config.embed_url());
    Ok(())
}

/// Upserts the stream configuration singleton row.
pub async fn set(
    store: &Store,
    platform: StreamPlatform,
    channel_id: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = StreamConfig {
        platform,
        channel_id,
    };
    let row = record(json!({
        "key": setting_keys::STREAM_CONFIG,
        "value": config,
    }));
    store
        .from(tables::SETTINGS)
        .upsert(row)
        .await
        .map_err(|e| handle_cmd_error!(e, "Could not save the stream configuration."))?;
    print_cmd_info!("Stream configuration saved.", "Now serving {}.", config);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MockBackend;
    use serde_json::Value;
    use std::sync::Arc;

    #[tokio::test]
    /// Saving writes one key/value row keyed on the settings singleton.
    async fn set_upserts_the_singleton_row() {
        let mut backend = MockBackend::new();
        backend
            .expect_upsert()
            .withf(|plan, row| {
                plan.table == tables::SETTINGS
                    && row.get("key").and_then(Value::as_str)
                        == Some(setting_keys::STREAM_CONFIG)
                    && row
                        .get("value")
                        .and_then(|v| v.get("channelId"))
                        .and_then(Value::as_str)
                        == Some("weluxlive")
            })
            .returning(|_, _| Ok(()));

        let store = Store::with_backend(Arc::new(backend));
        set(&store, StreamPlatform::Twitch, "weluxlive".to_string())
            .await
            .expect("upsert should succeed");
    }

    #[tokio::test]
    /// A missing configuration row falls back to defaults instead of
    /// failing the command.
    async fn show_tolerates_missing_row() {
        let mut backend = MockBackend::new();
        backend
            .expect_single()
            .returning(|_| Err(StoreError::RowNotFound));

        let store = Store::with_backend(Arc::new(backend));
        show(&store).await.expect("show should fall back to defaults");
    }
}
