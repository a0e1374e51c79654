use std::path::Path;

use acadexa_command::{
    Dataset, DispatchError, Dispatcher, MemoryRecordStore, Principal, RecordStore,
};
use acadexa_intent::normalize;
use anyhow::{Context, Result};
use serde_json::{Value, json};

/// Load the dataset at `path`, or an empty one when no path is given.
pub async fn load_store(path: Option<&Path>) -> Result<MemoryRecordStore> {
    let Some(path) = path else {
        tracing::warn!("no dataset given, starting with an empty store");
        return Ok(MemoryRecordStore::new(Dataset::default()));
    };
    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read dataset {}", path.display()))?;
    let store = MemoryRecordStore::from_json(&json)
        .with_context(|| format!("Failed to load dataset {}", path.display()))?;
    tracing::debug!(path = %path.display(), "dataset loaded");
    Ok(store)
}

/// Run one command and return the JSON to print.
///
/// Authorization failures are printed as `{ "error", "message" }` objects
/// so that a stream of commands keeps going; only store failures abort.
pub async fn run_command<S>(
    dispatcher: &Dispatcher<S>,
    principal: &Principal,
    text: &str,
) -> Result<Value>
where
    S: RecordStore,
{
    match dispatcher.submit_command(text, principal).await {
        Ok(envelope) => Ok(serde_json::to_value(envelope)?),
        Err(
            error @ (DispatchError::Unauthorized { .. } | DispatchError::ProfileNotLinked { .. }),
        ) => Ok(json!({
            "raw_text": text,
            "error": error.kind(),
            "message": error.to_string(),
        })),
        Err(error) => Err(error.into()),
    }
}

/// Every rule intent that accepts `text`, in table order.
pub fn explain<S>(dispatcher: &Dispatcher<S>, text: &str) -> Result<Value>
where
    S: RecordStore,
{
    Ok(json!({
        "raw_text": text,
        "normalized": normalize(text),
        "matches": serde_json::to_value(dispatcher.matcher().explain(text))?,
    }))
}

/// Pretty-printed JSON, or one line when `compact`.
pub fn render(value: &Value, compact: bool) -> Result<String> {
    Ok(if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    })
}
