//! Diagnostic sink handed to components by the host runtime.
//!
//! A [`Logger`] is a named `tracing` span. Everything a component logs through it (or
//! inside [`Logger::in_scope`]) is attributed to that component, so a subscriber can
//! filter or route per resource.

use std::fmt::Display;

use tracing::Span;

/// Per-resource logger handed to constructors.
#[derive(Debug, Clone)]
pub struct Logger {
    name: String,
    span: Span,
}

impl Logger {
    /// Create a logger for the resource called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let span = tracing::info_span!("resource", name = %name);
        Self { name, span }
    }

    /// Child logger, e.g. for a helper owned by the component.
    pub fn sublogger(&self, sub: &str) -> Self {
        let name = format!("{}.{}", self.name, sub);
        let span = tracing::info_span!(parent: &self.span, "resource", name = %name);
        Self { name, span }
    }

    /// Resource name this logger reports for.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Underlying span, for `instrument`-style use.
    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Run `f` with this logger's span entered, for events with structured fields.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        self.span.in_scope(f)
    }

    /// Log `message` at DEBUG.
    pub fn debug(&self, message: impl Display) {
        self.in_scope(|| tracing::debug!("{message}"));
    }

    /// Log `message` at INFO.
    pub fn info(&self, message: impl Display) {
        self.in_scope(|| tracing::info!("{message}"));
    }

    /// Log `message` at WARN.
    pub fn warn(&self, message: impl Display) {
        self.in_scope(|| tracing::warn!("{message}"));
    }

    /// Log `message` at ERROR.
    pub fn error(&self, message: impl Display) {
        self.in_scope(|| tracing::error!("{message}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn test_sublogger_name() {
        let logger = Logger::new("winch");
        let sub = logger.sublogger("pins");
        assert_eq!(logger.name(), "winch");
        assert_eq!(sub.name(), "winch.pins");
    }

    #[traced_test]
    #[test]
    fn test_error_is_emitted() {
        let logger = Logger::new("winch");
        logger.error("pin 29 failed");
        assert!(logs_contain("pin 29 failed"));
    }
}
