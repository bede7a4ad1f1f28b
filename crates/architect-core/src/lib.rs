//! Architect Core - directive payload, generator, configuration, errors

pub mod config;
pub mod directive;
pub mod error;

pub use config::{BindMode, GatewayConfig, LogConfig};
pub use directive::{
    AuditEntry, AuditLevel, AuditSink, DirectiveGenerator, TracingSink, DIRECTIVE_TEXT,
};
pub use error::{Error, Result};
