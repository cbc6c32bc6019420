//! Sink forwarding records into the `tracing` ecosystem.

use zlog_core::Severity;

use crate::backend::Sink;
use crate::error::SinkError;
use crate::record::Entry;

/// Re-emits entries as `tracing` events under the `zlog` target.
///
/// Fatal maps to `ERROR`, the highest `tracing` level. Fields are rendered
/// as one JSON string so any subscriber can display them.
#[derive(Debug, Clone, Default)]
pub struct TracingSink {
    scope: String,
}

impl TracingSink {
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
        }
    }
}

impl Sink for TracingSink {
    fn name(&self) -> &str {
        &self.scope
    }

    fn log(&self, entry: Entry) {
        let fields: zlog_encoder::Object = entry
            .fields
            .into_iter()
            .map(|f| (f.key, f.value))
            .collect();
        let rendered = serde_json::to_string(&fields).unwrap_or_default();
        let location = entry.caller.map(|c| c.short()).unwrap_or_default();
        let fields = rendered.as_str();
        let caller = location.as_str();
        let scope = self.scope.as_str();
        let message = entry.message.as_str();

        match entry.severity {
            Severity::Debug => {
                tracing::debug!(target: "zlog", scope, caller, fields, "{message}")
            }
            Severity::Info => tracing::info!(target: "zlog", scope, caller, fields, "{message}"),
            Severity::Warning => {
                tracing::warn!(target: "zlog", scope, caller, fields, "{message}")
            }
            Severity::Error => {
                tracing::error!(target: "zlog", scope, caller, fields, "{message}")
            }
            Severity::Fatal => {
                tracing::error!(target: "zlog", scope, caller, fields, fatal = true, "{message}")
            }
        }
    }

    fn flush(&self) -> Result<(), SinkError> {
        Ok(())
    }
}
