use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HeybenchError;

// ---------------------------------------------------------------------------
// HttpMethod
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HttpMethod {
    Get,
    #[default]
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        };
        write!(f, "{s}")
    }
}

impl FromStr for HttpMethod {
    type Err = HeybenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            "PATCH" => Ok(HttpMethod::Patch),
            "HEAD" => Ok(HttpMethod::Head),
            "OPTIONS" => Ok(HttpMethod::Options),
            other => Err(HeybenchError::Validation(format!(
                "unsupported HTTP method \"{other}\""
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Target
// ---------------------------------------------------------------------------

/// One endpoint to benchmark, labelled for the comparison table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Target {
    /// Column header for this run (e.g. "async").
    pub name: String,
    /// Path and query appended to the plan's base URL.
    pub path: String,
}

impl Target {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Join `base_url` and this target's path with exactly one `/`.
    pub fn url(&self, base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');
        let path = self.path.trim_start_matches('/');
        if path.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{path}")
        }
    }
}

// ---------------------------------------------------------------------------
// RunPlan
// ---------------------------------------------------------------------------

/// Everything needed to benchmark a baseline and a candidate endpoint.
///
/// Missing fields in a plan file fall back to [`RunPlan::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct RunPlan {
    /// Total requests per run (`hey -n`).
    pub requests: u32,
    /// Concurrent workers per run (`hey -c`).
    pub concurrency: u32,
    pub method: HttpMethod,
    pub base_url: String,
    pub baseline: Target,
    pub candidate: Target,
    /// Load generator executable.
    pub generator: String,
}

impl Default for RunPlan {
    fn default() -> Self {
        Self {
            requests: 200,
            concurrency: 50,
            method: HttpMethod::Post,
            base_url: "http://localhost:8000".to_string(),
            baseline: Target::new("async", "/inference_async?x=5"),
            candidate: Target::new("sync", "/inference_sync?x=5"),
            generator: "hey".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
