use lazy_static::lazy_static;
use prometheus::{
    Counter, CounterVec, Gauge, Histogram, register_counter, register_counter_vec, register_gauge,
    register_histogram,
};


lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("chat_requests_total", "Total number of chat requests").unwrap();
    pub static ref REJECTED_TOTAL: CounterVec = register_counter_vec!(
        "chat_rejected_total",
        "Requests answered with an error, by error kind",
        &["kind"]
    )
    .unwrap();
    pub static ref SUSPICIOUS_TOTAL: CounterVec = register_counter_vec!(
        "chat_suspicious_total",
        "Messages matching a suspicious pattern (not blocked)",
        &["pattern"]
    )
    .unwrap();
    pub static ref UPSTREAM_LATENCY: Histogram = register_histogram!(
        "chat_upstream_latency_seconds",
        "Upstream generateContent latency in seconds"
    )
    .unwrap();
    pub static ref RATE_WINDOWS: Gauge =
        register_gauge!("chat_rate_windows", "Client identities with a tracked rate window").unwrap();
}
