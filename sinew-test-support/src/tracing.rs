//! Capture layer for asserting on spans and events in tests.

use std::{
    collections::BTreeMap,
    fmt,
    sync::{Arc, Mutex, PoisonError},
};

use tracing::{
    Event, Level, Subscriber,
    field::{Field, Visit},
    span::{Attributes, Id, Record},
};
use tracing_subscriber::{Layer, layer::Context, registry::LookupSpan};

/// Field values rendered as strings, keyed by field name.
pub type Fields = BTreeMap<String, String>;

/// A span that has closed, with every field it recorded.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SpanRecord {
    /// Span name from the callsite metadata.
    pub name: String,
    /// Name of the enclosing span, if any.
    pub parent: Option<String>,
    /// Fields recorded at creation or later.
    pub fields: Fields,
}

/// An emitted event.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EventRecord {
    /// Event level.
    pub level: Level,
    /// Name of the span the event was emitted in, if any.
    pub span: Option<String>,
    /// Event fields, including `message`.
    pub fields: Fields,
}

impl EventRecord {
    /// Returns the formatted message, if the event carried one.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.fields.get("message").map(String::as_str)
    }
}

#[derive(Default)]
struct Journal {
    spans: Vec<SpanRecord>,
    events: Vec<EventRecord>,
}

/// Layer that journals closed spans and events for later inspection.
///
/// Clones share one journal, so a test keeps a handle while the subscriber
/// owns another.
///
/// # Examples
/// ```
/// use sinew_test_support::tracing::RecordingLayer;
/// use tracing_subscriber::layer::SubscriberExt;
///
/// let layer = RecordingLayer::default();
/// let subscriber = tracing_subscriber::registry().with(layer.clone());
/// tracing::subscriber::with_default(subscriber, || {
///     let _span = tracing::info_span!("outer", size = 3).entered();
///     tracing::info!(edges = 9, "done");
/// });
/// assert_eq!(layer.span("outer").and_then(|s| s.fields.get("size").cloned()).as_deref(), Some("3"));
/// assert_eq!(layer.events()[0].span.as_deref(), Some("outer"));
/// ```
#[derive(Clone, Default)]
pub struct RecordingLayer {
    journal: Arc<Mutex<Journal>>,
}

impl RecordingLayer {
    /// Returns the closed spans in closing order.
    #[must_use]
    pub fn spans(&self) -> Vec<SpanRecord> {
        self.with_journal(|journal| journal.spans.clone())
    }

    /// Returns the events in emission order.
    #[must_use]
    pub fn events(&self) -> Vec<EventRecord> {
        self.with_journal(|journal| journal.events.clone())
    }

    /// Returns the first closed span called `name`.
    #[must_use]
    pub fn span(&self, name: &str) -> Option<SpanRecord> {
        self.with_journal(|journal| journal.spans.iter().find(|span| span.name == name).cloned())
    }

    /// Returns the events emitted inside spans called `name`.
    #[must_use]
    pub fn events_in(&self, name: &str) -> Vec<EventRecord> {
        self.with_journal(|journal| {
            journal
                .events
                .iter()
                .filter(|event| event.span.as_deref() == Some(name))
                .cloned()
                .collect()
        })
    }

    fn with_journal<T>(&self, read: impl FnOnce(&mut Journal) -> T) -> T {
        let mut journal = self.journal.lock().unwrap_or_else(PoisonError::into_inner);
        read(&mut journal)
    }
}

struct PendingSpan(Fields);

impl<S> Layer<S> for RecordingLayer
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut fields = Fields::new();
        attrs.record(&mut Collector(&mut fields));
        span.extensions_mut().insert(PendingSpan(fields));
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        if let Some(PendingSpan(fields)) = span.extensions_mut().get_mut::<PendingSpan>() {
            values.record(&mut Collector(fields));
        }
    }

    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let mut fields = Fields::new();
        event.record(&mut Collector(&mut fields));
        let span = ctx.event_span(event).map(|span| span.name().to_owned());
        self.with_journal(|journal| {
            journal.events.push(EventRecord {
                level: *event.metadata().level(),
                span,
                fields,
            });
        });
    }

    fn on_close(&self, id: Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(&id) else {
            return;
        };
        let fields = span
            .extensions_mut()
            .remove::<PendingSpan>()
            .map(|PendingSpan(fields)| fields)
            .unwrap_or_default();
        let record = SpanRecord {
            name: span.name().to_owned(),
            parent: span.parent().map(|parent| parent.name().to_owned()),
            fields,
        };
        self.with_journal(|journal| journal.spans.push(record));
    }
}

struct Collector<'a>(&'a mut Fields);

impl Collector<'_> {
    fn put(&mut self, field: &Field, value: String) {
        self.0.insert(field.name().to_owned(), value);
    }
}

impl Visit for Collector<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.put(field, format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, value.to_owned());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.put(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, value.to_string());
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.put(field, value.to_string());
    }
}
