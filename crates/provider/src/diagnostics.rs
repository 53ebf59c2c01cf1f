//! Optional tracing of operations and their outcomes.
//!
//! [`DiagnosticLayer`] decorates a [`DataProvider`]: it forwards every call
//! untouched and hands the request and its outcome to a [`DiagnosticSink`]
//! afterwards. Sinks only observe; results and errors are returned exactly as
//! the inner provider produced them.

use std::sync::Arc;

use async_trait::async_trait;
use halbridge_types::{Request, ResultEnvelope};
use halbridge_util::redact_json;
use serde_json::Value;
use tracing::{info, info_span, warn};

use crate::{DataProvider, ProviderError};

/// What was asked for: operation type, resource and params in wire form.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticEntry {
    pub kind: String,
    pub resource: String,
    pub params: Value,
}

pub trait DiagnosticSink: Send + Sync {
    /// Whether entries should be built at all.
    fn enabled(&self) -> bool {
        true
    }

    fn record(&self, entry: &DiagnosticEntry, outcome: &Result<ResultEnvelope, ProviderError>);
}

/// Discards everything. The default sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn enabled(&self) -> bool {
        false
    }

    fn record(&self, _entry: &DiagnosticEntry, _outcome: &Result<ResultEnvelope, ProviderError>) {}
}

/// Emits one `operation` span per call holding the redacted params and the
/// result or error.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, entry: &DiagnosticEntry, outcome: &Result<ResultEnvelope, ProviderError>) {
        let span = info_span!("operation", kind = %entry.kind, resource = %entry.resource);
        let _guard = span.enter();

        info!(params = %redact_json(&entry.params), "operation request");
        match outcome {
            Ok(envelope) => {
                let result = serde_json::to_value(envelope).map(|value| redact_json(&value)).unwrap_or(Value::Null);
                info!(result = %result, total = ?envelope.total, "operation result");
            }
            Err(error) => warn!(error = %error, status = ?error.status(), "operation failed"),
        }
    }
}

/// Decorator adding diagnostics around any [`DataProvider`].
#[derive(Clone)]
pub struct DiagnosticLayer<P> {
    inner: P,
    sink: Arc<dyn DiagnosticSink>,
}

impl<P: DataProvider> DiagnosticLayer<P> {
    /// Wrap `inner` with the no-op sink.
    pub fn new(inner: P) -> Self {
        Self::with_sink(inner, Arc::new(NoopSink))
    }

    pub fn with_sink(inner: P, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { inner, sink }
    }

    fn observe(&self, entry: Option<DiagnosticEntry>, outcome: &Result<ResultEnvelope, ProviderError>) {
        if let Some(entry) = entry {
            self.sink.record(&entry, outcome);
        }
    }
}

#[async_trait]
impl<P: DataProvider> DataProvider for DiagnosticLayer<P> {
    async fn execute(&self, request: Request) -> Result<ResultEnvelope, ProviderError> {
        let entry = self.sink.enabled().then(|| DiagnosticEntry {
            kind: request.kind().to_string(),
            resource: request.resource.clone(),
            params: request.operation.params_json(),
        });
        let outcome = self.inner.execute(request).await;
        self.observe(entry, &outcome);
        outcome
    }

    async fn execute_raw(&self, kind: &str, resource: &str, params: Value) -> Result<ResultEnvelope, ProviderError> {
        let entry = self.sink.enabled().then(|| DiagnosticEntry {
            kind: kind.to_string(),
            resource: resource.to_string(),
            params: params.clone(),
        });
        let outcome = self.inner.execute_raw(kind, resource, params).await;
        self.observe(entry, &outcome);
        outcome
    }
}
