use chrono::Utc;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use tracing::{
    field::{Field, Visit},
    Event, Level, Subscriber,
};
use tracing_error::ErrorLayer;
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::fmt::{format::Writer, FormatEvent, FormatFields};
use tracing_subscriber::layer::Context;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

use crate::{MediaError, MediaResult};

/// Span field naming the resource an operation works on, shown in its own column.
pub const RESOURCE_FIELD: &str = "resource";

const DEFAULT_FILTER: &str = "media_orchestrator=info";

/// Span fields collected by [`FieldCollectorLayer`], merged across nested spans.
#[derive(Debug, Clone, Default)]
pub struct SpanFields {
    pub values: HashMap<String, String>,
}

impl Visit for SpanFields {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.values.insert(field.name().to_string(), format!("{:?}", value).trim_matches('"').to_string());
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.values.insert(field.name().to_string(), value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.values.insert(field.name().to_string(), value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.values.insert(field.name().to_string(), value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.values.insert(field.name().to_string(), value.to_string());
    }
}

/// Stores every span's fields in its extensions so the formatters can print them.
pub struct FieldCollectorLayer;

impl<S> Layer<S> for FieldCollectorLayer
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
{
    fn on_new_span(&self, attrs: &tracing::span::Attributes<'_>, id: &tracing::span::Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else { return };

        // Inherit the parent's fields so the resource column survives nested spans
        let mut fields =
            span.parent().and_then(|parent| parent.extensions().get::<SpanFields>().cloned()).unwrap_or_default();
        attrs.record(&mut fields);
        span.extensions_mut().insert(fields);
    }

    fn on_record(&self, id: &tracing::span::Id, values: &tracing::span::Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else { return };

        let mut extensions = span.extensions_mut();
        let mut fields = extensions.remove::<SpanFields>().unwrap_or_default();
        values.record(&mut fields);
        extensions.insert(fields);
    }
}

fn current_span_fields<S, N>(ctx: &FmtContext<'_, S, N>) -> Option<(String, SpanFields)>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    let span = ctx.lookup_current()?;
    let fields = span.extensions().get::<SpanFields>().cloned().unwrap_or_default();
    Some((span.metadata().name().to_string(), fields))
}

/// Message and fields of a single event.
#[derive(Default)]
struct EventFields {
    message: Option<String>,
    fields: Map<String, Value>,
}

impl EventFields {
    fn of(event: &Event<'_>) -> Self {
        let mut fields = Self::default();
        event.record(&mut fields);
        fields
    }

    fn insert(&mut self, field: &Field, value: Value) {
        match (field.name(), value) {
            ("message", Value::String(message)) => self.message = Some(message),
            (name, value) => {
                self.fields.insert(name.to_string(), value);
            }
        }
    }
}

impl Visit for EventFields {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.insert(field, Value::String(format!("{:?}", value).trim_matches('"').to_string()));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, Value::from(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, Value::from(value));
    }
}

// Console output: timestamp | level | service | resource | message (fields)
pub struct PrettyFormatter;

impl<S, N> FormatEvent<S, N> for PrettyFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> std::fmt::Result {
        const RESET: &str = "\x1b[0m";
        const DIM: &str = "\x1b[90m";
        const COLUMN: &str = "\x1b[92m";

        let meta = event.metadata();
        let level_color = match *meta.level() {
            Level::TRACE => "\x1b[90m",
            Level::DEBUG => "\x1b[34m",
            Level::INFO => "\x1b[32m",
            Level::WARN => "\x1b[33m",
            Level::ERROR => "\x1b[31m",
        };
        let resource = current_span_fields(ctx)
            .and_then(|(_, fields)| fields.values.get(RESOURCE_FIELD).cloned())
            .unwrap_or_else(|| "-".to_string());
        let EventFields { message, fields } = EventFields::of(event);

        write!(writer, "\x1b[96m{}{RESET} {DIM}|{RESET} ", Utc::now().format("%y-%m-%d %H:%M:%S"))?;
        write!(writer, "{level_color}{:<5}{RESET} {DIM}|{RESET} ", *meta.level())?;
        write!(writer, "{COLUMN}{:<10}{RESET} {DIM}|{RESET} ", extract_service_name(meta.target()))?;
        write!(writer, "{COLUMN}{:<28}{RESET} {DIM}|{RESET} ", resource)?;
        write!(writer, "\x1b[97m{}{RESET}", message.unwrap_or_default())?;

        let extra: Vec<String> = fields
            .iter()
            .filter(|(name, _)| name.as_str() != RESOURCE_FIELD)
            .map(|(name, value)| match value {
                Value::String(text) => format!("{}={}", name, text),
                other => format!("{}={}", name, other),
            })
            .collect();
        if !extra.is_empty() {
            write!(writer, " ({DIM}{}{RESET})", extra.join(", "))?;
        }

        writeln!(writer)
    }
}

// One JSON object per line, span fields merged under "fields"
pub struct JsonEventFormatter;

impl<S, N> FormatEvent<S, N> for JsonEventFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> std::fmt::Result {
        let meta = event.metadata();
        let EventFields { message, mut fields } = EventFields::of(event);

        if let Some((span_name, span_fields)) = current_span_fields(ctx) {
            fields.insert("span_name".to_string(), Value::String(span_name));
            for (key, value) in span_fields.values {
                fields.entry(key).or_insert(Value::String(value));
            }
        }

        let record = json!({
            "timestamp": Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            "level": meta.level().to_string(),
            "target": meta.target(),
            "service": extract_service_name(meta.target()),
            "filename": meta.file(),
            "line_number": meta.line(),
            "message": message,
            "fields": fields,
        });
        writeln!(writer, "{}", record)
    }
}

/// Install color_eyre and the global subscriber: [`PrettyFormatter`] on the console, or
/// [`JsonEventFormatter`] when `LOG_FORMAT=json`. `RUST_LOG` overrides the default filter.
pub fn init_logging() -> MediaResult<()> {
    color_eyre::install().map_err(|e| MediaError::LoggingError(format!("Unable to install color_eyre: {e}")))?;

    // Read from `RUST_LOG`, falling back to our own crate at info
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::builder()
            .with_default_directive(Level::INFO.into())
            .parse(DEFAULT_FILTER)
            .map_err(|e| MediaError::LoggingError(format!("Invalid filter directive: {e}")))?,
    };

    let json_output = std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json");
    let fmt_layer = fmt::layer().with_target(true).with_thread_ids(false).with_file(true).with_line_number(true);

    let registry = Registry::default().with(env_filter).with(FieldCollectorLayer).with(ErrorLayer::default());
    let result = if json_output {
        tracing::subscriber::set_global_default(registry.with(fmt_layer.event_format(JsonEventFormatter)))
    } else {
        tracing::subscriber::set_global_default(registry.with(fmt_layer.event_format(PrettyFormatter)))
    };

    result.map_err(|e| MediaError::LoggingError(format!("Failed to set global default subscriber: {e}")))
}

/// Short display name for the service column, derived from the event target
fn extract_service_name(target: &str) -> &'static str {
    let Some(path) = target.strip_prefix("media_orchestrator") else {
        return "EXTERNAL";
    };
    if path.starts_with("::resource::bucket") || path.starts_with("::core::client::storage") {
        "S3"
    } else if path.starts_with("::resource::topic") || path.starts_with("::core::client::topic") {
        "SNS"
    } else if path.starts_with("::resource::queue") || path.starts_with("::core::client::queue") {
        "SQS"
    } else if path.starts_with("::resource::transcoder") || path.starts_with("::core::client::transcoder") {
        "TRANSCODER"
    } else if path.starts_with("::core::client::identity") {
        "IAM"
    } else if path.starts_with("::workflow") {
        "WORKFLOW"
    } else {
        "-"
    }
}
