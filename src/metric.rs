use opentelemetry::{KeyValue, metrics::UpDownCounter};
use std::sync::LazyLock;

static STATDS: LazyLock<UpDownCounter<i64>> = LazyLock::new(|| {
    logfire::i64_up_down_counter("ig_relay_statds")
        .with_description("Instagram relay statistics")
        .with_unit("event")
        .build()
});

fn incr_statds(metric: &str, value: &str) {
    STATDS.add(1, &[KeyValue::new(metric.to_string(), value.to_string())]);
}

pub fn incr_webhook_event_statds(outcome: &str) {
    incr_statds("webhook_event", outcome)
}

pub fn incr_signature_statds(verdict: &str) {
    incr_statds("signature", verdict)
}

pub fn incr_conversations_statds(outcome: &str) {
    incr_statds("conversations", outcome)
}
