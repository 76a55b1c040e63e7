use std::path::Path;

use crate::error::HeybenchError;
use crate::plan::model::RunPlan;

/// Read a run plan from a JSON file.
///
/// Fields missing from the file take their default values.
pub async fn read_plan(path: impl AsRef<Path>) -> Result<RunPlan, HeybenchError> {
    let content = tokio::fs::read_to_string(path.as_ref()).await?;
    let plan: RunPlan = serde_json::from_str(&content)?;
    Ok(plan)
}

/// Write a [`RunPlan`] to disk as pretty-printed JSON.
pub async fn write_plan(plan: &RunPlan, path: impl AsRef<Path>) -> Result<(), HeybenchError> {
    let content = serde_json::to_string_pretty(plan)?;
    tokio::fs::write(path.as_ref(), content).await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
