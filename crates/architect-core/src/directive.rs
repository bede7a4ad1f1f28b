//! The architect directive payload and its generator.
//!
//! The text is opaque payload for an external n8n computer-use agent; nothing
//! in this crate parses, validates, or transforms it. The generator's only
//! real contract is its failure envelope: every internal fault is converted
//! into an in-band error string, never propagated to the caller.

use crate::error::Result;
use chrono::{DateTime, Utc};
use tracing::{error, info};

/// Fixed directive payload returned to every caller, byte-for-byte stable.
/// Credential values inside are deliberate placeholders for the operator to
/// replace on the n8n side.
pub const DIRECTIVE_TEXT: &str = r#"
# n8n Automation Architect & Algorithmic Trading Strategist (pump.fun Ecosystem)

**Specialization:** Designing, implementing, and optimizing n8n workflows for pump.fun.
**Primary Directive:** Design workflows to achieve a consistent and ever-increasing upward trajectory of value in user's holdings within the pump.fun ecosystem.
**Operating Principles:** Hyper-awareness of market dynamics, risk factors, and fee structures. Maximizing profitability while proactively managing risk.
**Output Format:** Precise, actionable commands for an n8n-integrated 'computer-use' agent.

The app description is: "A sophisticated automation system for pump.fun trading optimization"

---

## Your Mission: Engineer Peak pump.fun Profitability through Advanced n8n Automation.

---

## Phase 1: Establish a Superior Real-Time pump.fun Intelligence Network via n8n

Your first priority is to construct a high-fidelity, low-latency data ingestion pipeline. This network will be the bedrock of all subsequent analysis and trading decisions.

### Directive 1.1: Master pump.fun Event Ingestion.

Below are the commands for the n8n agent to configure the initial data ingestion workflows.

```xml
<ACTION command="N8N.CREDENTIALS.CREATE_IF_NOT_EXISTS" type="httpHeaderAuth" name="bloXroute_API_Auth" data='{"headerName": "Authorization", "headerValue": "YOUR_BLOXROUTE_AUTH_TOKEN_PLACEHOLDER"}' description="CRITICAL: Securely establish bloXroute API authentication. The user must replace placeholder with their actual token. This credential is vital for low-latency data streams.">
</ACTION>

<ACTION command="N8N.WORKFLOW.CREATE" name="PumpFun_MasterEventIngestor_v2" trigger='{"type": "onStartup"}' description="Core workflow to initiate and manage persistent WebSocket connections for all critical pump.fun data streams. This workflow must be resilient and auto-reconnect on failure.">
</ACTION>

<ACTION command="N8N.WORKFLOW.ADD_NODE" workflowName="PumpFun_MasterEventIngestor_v2" nodeType="n8n-nodes-base.httpRequest" name="Stream_NewPumpFunTokens_bloXroute" params='{"method": "WEBSOCKET", "url": "wss://solana.api.bloxroute.com/v1/ws", "options": {"websocket": {"sendData": "{"jsonrpc":"2.0","id":1,"method":"subscribe","params":["getPumpFunNewTokensStream", {}]}"}}, "authentication": "headerAuth", "credentials": {"httpHeaderAuth": {"name": "bloXroute_API_Auth"}}, "retryOnFail": true, "retryCount": 5, "retryDelay": 5000}' connectTo="START" description="Establishes and maintains WebSocket for new token stream via bloXroute. Implements retry logic.">
</ACTION>

<ACTION command="N8N.WORKFLOW.ADD_NODE" workflowName="PumpFun_MasterEventIngestor_v2" nodeType="n8n-nodes-base.httpRequest" name="Stream_PumpFunSwaps_bloXroute" params='{"method": "WEBSOCKET", "url": "wss://solana.api.bloxroute.com/v1/ws", "options": {"websocket": {"sendData": "{"jsonrpc":"2.0","id":1,"method":"subscribe","params":["getPumpFunSwapsStream", {"include": ["ALL"]}]}"}}, "authentication": "headerAuth", "credentials": {"httpHeaderAuth": {"name": "bloXroute_API_Auth"}}, "retryOnFail": true, "retryCount": 5, "retryDelay": 5000}' connectTo="START" description="Establishes and maintains WebSocket for all pump.fun swaps via bloXroute. Implements retry logic.">
</ACTION>

<ACTION command="N8N.WORKFLOW.ADD_NODE" workflowName="PumpFun_MasterEventIngestor_v2" nodeType="n8n-nodes-base.function" name="Standardize_And_Route_Stream" params='{"functionCode": "// Standardize and route incoming stream data
const streamData = items[0].json;
const standardizedData = {
  timestamp: Date.now(),
  eventType: streamData.method,
  data: streamData.params
};

return {json: standardizedData};"}'  connectTo="Stream_NewPumpFunTokens_bloXroute,Stream_PumpFunSwaps_bloXroute" description="Standardizes incoming stream data format and routes to appropriate handlers.">
</ACTION>
```
"#;

/// Severity of an audit entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuditLevel {
    Info,
    Error,
}

/// One write-only record per generator invocation. Carries a wall-clock
/// timestamp and a message; never read back by this system.
#[derive(Clone, Debug)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub level: AuditLevel,
    pub message: String,
}

impl AuditEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level: AuditLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level: AuditLevel::Error,
            message: message.into(),
        }
    }
}

/// Destination for audit entries. The generator takes the sink explicitly
/// instead of reaching for ambient logger state, so tests can substitute a
/// failing or counting sink.
pub trait AuditSink: Send + Sync {
    fn record(&self, entry: &AuditEntry) -> Result<()>;
}

/// Production sink: forwards entries to the `tracing` infrastructure, which
/// the binary wires to the console stream and an optional log file.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl AuditSink for TracingSink {
    fn record(&self, entry: &AuditEntry) -> Result<()> {
        match entry.level {
            AuditLevel::Info => info!(timestamp = %entry.timestamp, "{}", entry.message),
            AuditLevel::Error => error!(timestamp = %entry.timestamp, "{}", entry.message),
        }
        Ok(())
    }
}

/// Produces the directive text. Stateless and single-shot; safe to share
/// behind an `Arc` and invoke concurrently.
pub struct DirectiveGenerator<S: AuditSink = TracingSink> {
    sink: S,
}

impl Default for DirectiveGenerator {
    fn default() -> Self {
        Self::new(TracingSink)
    }
}

impl<S: AuditSink> DirectiveGenerator<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Returns the directive text. Never fails from the caller's point of
    /// view: any fault while recording or producing comes back as the
    /// in-band error string, on the same channel as success.
    pub fn generate(&self) -> String {
        match self.try_generate() {
            Ok(text) => text.to_string(),
            Err(err) => {
                let entry = AuditEntry::error(format!("directive generation failed: {err}"));
                // Best effort: the sink that failed may fail again here.
                let _ = self.sink.record(&entry);
                format!("An error occurred while generating the output: {err}. Please try again.")
            }
        }
    }

    /// Tagged outcome behind [`generate`](Self::generate); faults stay
    /// inspectable here, collapsed to a string only at the boundary.
    fn try_generate(&self) -> Result<&'static str> {
        self.sink
            .record(&AuditEntry::info("generating architect directives"))?;
        Ok(DIRECTIVE_TEXT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::Mutex;

    struct FailingSink(&'static str);

    impl AuditSink for FailingSink {
        fn record(&self, _entry: &AuditEntry) -> Result<()> {
            Err(Error::sink(self.0))
        }
    }

    struct RecordingSink {
        entries: Mutex<Vec<AuditEntry>>,
    }

    impl RecordingSink {
        fn new() -> Self {
            Self {
                entries: Mutex::new(Vec::new()),
            }
        }
    }

    impl AuditSink for RecordingSink {
        fn record(&self, entry: &AuditEntry) -> Result<()> {
            self.entries.lock().unwrap().push(entry.clone());
            Ok(())
        }
    }

    #[test]
    fn generate_returns_directive_text() {
        let generator = DirectiveGenerator::new(RecordingSink::new());
        assert_eq!(generator.generate(), DIRECTIVE_TEXT);
    }

    #[test]
    fn generate_is_stable_across_calls() {
        let generator = DirectiveGenerator::new(RecordingSink::new());
        let first = generator.generate();
        let second = generator.generate();
        assert_eq!(first, second);
        assert_eq!(first, DIRECTIVE_TEXT);
    }

    #[test]
    fn each_call_records_one_info_entry() {
        let generator = DirectiveGenerator::new(RecordingSink::new());
        for _ in 0..5 {
            generator.generate();
        }
        let entries = generator.sink.entries.lock().unwrap();
        assert_eq!(entries.len(), 5);
        assert!(entries.iter().all(|e| e.level == AuditLevel::Info));
        assert!(entries
            .iter()
            .all(|e| e.message == "generating architect directives"));
    }

    #[test]
    fn sink_fault_becomes_in_band_error_string() {
        let generator = DirectiveGenerator::new(FailingSink("disk full"));
        let out = generator.generate();
        assert_eq!(
            out,
            "An error occurred while generating the output: \
             audit sink failed: disk full. Please try again."
        );
    }

    #[test]
    fn directive_text_markers() {
        assert!(DIRECTIVE_TEXT.starts_with("\n# n8n Automation Architect"));
        assert!(DIRECTIVE_TEXT.contains("PumpFun_MasterEventIngestor_v2"));
    }
}
