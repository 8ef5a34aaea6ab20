//! Read-only bridge to the container runtime.
//!
//! The bridge wraps a `bollard` client created once at startup and shared by
//! every invocation. If the daemon is unreachable at startup the handle
//! stays degraded for the life of the process: every query reports
//! [`RuntimeError::Unavailable`] instead of letting a transport error escape
//! into the router. Queries are snapshots, never cached, never retried.

use bollard::Docker;
use bollard::container::ListContainersOptions;

use crate::error::RuntimeError;

/// Display budget for a rendered report, matching the gateway's message
/// size headroom.
pub const REPORT_BUDGET: usize = 1900;

/// Marker appended when a report is cut at the budget.
pub const TRUNCATION_MARKER: &str = "… (output truncated)";

/// Distinct reply used when no workloads are running.
pub const EMPTY_REPORT: &str = "No active workloads.";

/// One running workload, snapshotted per query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadRecord {
    pub name: String,
    /// Display image reference: first declared tag, else a short
    /// content-addressed id.
    pub image: String,
    pub status: String,
}

/// Handle to the container runtime, read-only from the perspective of
/// command handlers.
#[derive(Clone)]
pub struct RuntimeBridge {
    docker: Option<Docker>,
}

impl RuntimeBridge {
    /// Connect to the local daemon and verify it answers a ping.
    pub async fn connect() -> Result<Self, RuntimeError> {
        let docker =
            Docker::connect_with_local_defaults().map_err(|e| RuntimeError::Unavailable {
                reason: e.to_string(),
            })?;
        docker.ping().await.map_err(|e| RuntimeError::Unavailable {
            reason: e.to_string(),
        })?;
        Ok(Self {
            docker: Some(docker),
        })
    }

    /// A bridge with no client; every query reports `Unavailable`.
    pub fn degraded() -> Self {
        Self { docker: None }
    }

    pub fn is_degraded(&self) -> bool {
        self.docker.is_none()
    }

    /// Snapshot the currently running workloads.
    ///
    /// Any failure mid-listing fails the whole query; partial results are
    /// never returned.
    pub async fn list_workloads(&self) -> Result<Vec<WorkloadRecord>, RuntimeError> {
        let docker = self.docker.as_ref().ok_or_else(|| RuntimeError::Unavailable {
            reason: "no runtime connection".to_string(),
        })?;

        let containers = docker
            .list_containers(Some(ListContainersOptions::<String>::default()))
            .await
            .map_err(|e| RuntimeError::Query {
                reason: e.to_string(),
            })?;

        let mut records = Vec::with_capacity(containers.len());
        for container in containers {
            let name = container
                .names
                .as_ref()
                .and_then(|names| names.first())
                .map(|n| n.trim_start_matches('/').to_string())
                .or_else(|| container.id.as_deref().map(short_id))
                .unwrap_or_else(|| "<unnamed>".to_string());

            let image = resolve_image(docker, container.image.as_deref().unwrap_or_default())
                .await?;

            let status = container
                .state
                .or(container.status)
                .unwrap_or_else(|| "unknown".to_string());

            records.push(WorkloadRecord {
                name,
                image,
                status,
            });
        }
        Ok(records)
    }
}

/// Best-effort display reference for an image: first declared tag, else its
/// short content-addressed id.
async fn resolve_image(docker: &Docker, image_ref: &str) -> Result<String, RuntimeError> {
    let inspect = docker
        .inspect_image(image_ref)
        .await
        .map_err(|e| RuntimeError::Query {
            reason: e.to_string(),
        })?;

    if let Some(tag) = inspect.repo_tags.as_ref().and_then(|tags| tags.first()) {
        return Ok(tag.clone());
    }
    Ok(inspect
        .id
        .as_deref()
        .map(short_id)
        .unwrap_or_else(|| image_ref.to_string()))
}

/// Shorten a content-addressed id for display: strip the algorithm prefix
/// and keep twelve characters.
fn short_id(id: &str) -> String {
    let bare = id.strip_prefix("sha256:").unwrap_or(id);
    bare.chars().take(12).collect()
}

/// Render workload records as a newline-joined bulleted report bounded at
/// [`REPORT_BUDGET`] characters.
///
/// Truncation applies to the fully rendered string, so a record may be cut
/// mid-line; the marker is appended after the cut.
pub fn render_report(records: &[WorkloadRecord]) -> String {
    if records.is_empty() {
        return EMPTY_REPORT.to_string();
    }

    let rendered = records
        .iter()
        .map(|r| format!("• {} — {} ({})", r.name, r.image, r.status))
        .collect::<Vec<_>>()
        .join("\n");

    truncate_to_budget(rendered, REPORT_BUDGET)
}

fn truncate_to_budget(rendered: String, budget: usize) -> String {
    if rendered.chars().count() <= budget {
        return rendered;
    }
    let mut cut: String = rendered.chars().take(budget).collect();
    cut.push_str(TRUNCATION_MARKER);
    cut
}
