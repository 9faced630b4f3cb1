//! Structured logging with component and page context.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Severity of a log entry, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How entries are turned into lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// `[LEVEL] component: message | key=value ...`
    Human,
}

/// One structured log record.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// Component that emitted the entry, e.g. `cart` or `users`.
    pub component: String,
    /// Path of the page the component runs on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    /// Extra fields, flattened into the JSON object.
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
    /// Milliseconds since the Unix epoch.
    pub timestamp_ms: f64,
}

impl LogEntry {
    /// Render the entry as a single line.
    pub fn render(&self, format: LogFormat) -> String {
        match format {
            LogFormat::Json => {
                serde_json::to_string(self).unwrap_or_else(|_| self.message.clone())
            }
            LogFormat::Human => {
                let mut line = format!("[{}] {}: {}", self.level, self.component, self.message);
                for (i, (key, value)) in self.fields.iter().enumerate() {
                    line.push_str(if i == 0 { " | " } else { " " });
                    line.push_str(&format!("{}={}", key, value));
                }
                line
            }
        }
    }
}

/// Where rendered entries go.
pub trait LogSink {
    fn write(&self, level: LogLevel, line: &str, entry: &LogEntry);
}

/// The browser console on `wasm32`, stderr elsewhere.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    #[cfg(target_arch = "wasm32")]
    fn write(&self, level: LogLevel, line: &str, _entry: &LogEntry) {
        let line = wasm_bindgen::JsValue::from_str(line);
        match level {
            LogLevel::Trace | LogLevel::Debug => web_sys::console::debug_1(&line),
            LogLevel::Info => web_sys::console::log_1(&line),
            LogLevel::Warn => web_sys::console::warn_1(&line),
            LogLevel::Error => web_sys::console::error_1(&line),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn write(&self, _level: LogLevel, line: &str, _entry: &LogEntry) {
        eprintln!("{}", line);
    }
}

/// Keeps entries for inspection in tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: RefCell<Vec<LogEntry>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries captured so far, oldest first.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.borrow().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .map(|e| e.message.clone())
            .collect()
    }
}

impl LogSink for MemorySink {
    fn write(&self, _level: LogLevel, _line: &str, entry: &LogEntry) {
        self.entries.borrow_mut().push(entry.clone());
    }
}

/// Logger bound to a component.
///
/// Cheap to clone; clones and [`child`](Self::child) loggers share the sink.
///
/// ```
/// use std::rc::Rc;
/// use techstore_observability::{MemorySink, StructuredLogger};
///
/// let sink = Rc::new(MemorySink::new());
/// let logger = StructuredLogger::new("cart").with_sink(sink.clone());
///
/// logger.info("Cart has 2 items").field("total_items", 2).emit();
/// assert_eq!(sink.messages(), vec!["Cart has 2 items"]);
/// ```
#[derive(Clone)]
pub struct StructuredLogger {
    component: String,
    page: Option<String>,
    min_level: LogLevel,
    format: LogFormat,
    sink: Rc<dyn LogSink>,
}

impl StructuredLogger {
    /// Info level, JSON lines, console output.
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            page: None,
            min_level: LogLevel::Info,
            format: LogFormat::Json,
            sink: Rc::new(ConsoleSink),
        }
    }

    pub fn with_page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }

    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_sink(mut self, sink: Rc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Same settings and sink, different component.
    pub fn child(&self, component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            ..self.clone()
        }
    }

    pub fn entry(&self, level: LogLevel, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder {
            logger: self,
            level,
            message: message.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn debug(&self, message: impl Into<String>) -> LogBuilder<'_> {
        self.entry(LogLevel::Debug, message)
    }

    pub fn info(&self, message: impl Into<String>) -> LogBuilder<'_> {
        self.entry(LogLevel::Info, message)
    }

    pub fn warn(&self, message: impl Into<String>) -> LogBuilder<'_> {
        self.entry(LogLevel::Warn, message)
    }

    pub fn error(&self, message: impl Into<String>) -> LogBuilder<'_> {
        self.entry(LogLevel::Error, message)
    }

    fn write(&self, level: LogLevel, message: String, fields: BTreeMap<String, Value>) {
        if level < self.min_level {
            return;
        }

        let entry = LogEntry {
            level,
            message,
            component: self.component.clone(),
            page: self.page.clone(),
            fields,
            timestamp_ms: now_ms(),
        };
        self.sink.write(level, &entry.render(self.format), &entry);
    }
}

impl fmt::Debug for StructuredLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructuredLogger")
            .field("component", &self.component)
            .field("page", &self.page)
            .field("min_level", &self.min_level)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

/// An entry being assembled. Nothing is written until [`emit`](Self::emit).
#[must_use = "call .emit() to write the entry"]
pub struct LogBuilder<'a> {
    logger: &'a StructuredLogger,
    level: LogLevel,
    message: String,
    fields: BTreeMap<String, Value>,
}

impl LogBuilder<'_> {
    /// Attach a field. Strings, integers and booleans all convert.
    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn emit(self) {
        self.logger.write(self.level, self.message, self.fields);
    }
}

#[cfg(target_arch = "wasm32")]
fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture() -> (Rc<MemorySink>, StructuredLogger) {
        let sink = Rc::new(MemorySink::new());
        let logger = StructuredLogger::new("cart").with_sink(sink.clone());
        (sink, logger)
    }

    #[test]
    fn test_below_min_level_is_dropped() {
        let (sink, logger) = capture();
        logger.debug("hidden").emit();
        logger.info("shown").emit();

        assert_eq!(sink.messages(), vec!["shown".to_string()]);
    }

    #[test]
    fn test_min_level_can_be_lowered() {
        let (sink, logger) = capture();
        logger.with_min_level(LogLevel::Debug).debug("visible").emit();
        assert_eq!(sink.entries()[0].level, LogLevel::Debug);
    }

    #[test]
    fn test_fields_keep_their_json_type() {
        let (sink, logger) = capture();
        logger
            .info("Cart has 5 items")
            .field("total_items", 5u32)
            .field("persisted", true)
            .field("key", "cart")
            .emit();

        let entry = &sink.entries()[0];
        assert_eq!(entry.fields["total_items"], serde_json::json!(5));
        assert_eq!(entry.fields["persisted"], serde_json::json!(true));
        assert_eq!(entry.fields["key"], serde_json::json!("cart"));
    }

    #[test]
    fn test_json_line_flattens_fields() {
        let (sink, logger) = capture();
        logger
            .with_page("/")
            .error("Error loading users")
            .field("status", 500)
            .emit();

        let line = sink.entries()[0].render(LogFormat::Json);
        let json: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(json["level"], "error");
        assert_eq!(json["component"], "cart");
        assert_eq!(json["page"], "/");
        assert_eq!(json["status"], 500);
    }

    #[test]
    fn test_human_line() {
        let (sink, logger) = capture();
        logger
            .child("users")
            .warn("slow")
            .field("endpoint", "/api/users")
            .field("ms", 812)
            .emit();

        assert_eq!(
            sink.entries()[0].render(LogFormat::Human),
            r#"[WARN] users: slow | endpoint="/api/users" ms=812"#
        );
    }

    #[test]
    fn test_page_is_omitted_when_unset() {
        let (sink, logger) = capture();
        logger.info("hello").emit();

        let line = sink.entries()[0].render(LogFormat::Json);
        assert!(!line.contains("\"page\""));
    }
}
