#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate prometheus;

use std::convert::Infallible;
use std::future::Future;

use prometheus::{Encoder, Histogram, HistogramVec, IntCounter, IntCounterVec, TextEncoder};

lazy_static! {
    static ref SUCCESS: IntCounterVec = register_int_counter_vec!(
        "counting_success_total",
        "Operations that completed without a failure",
        &["layer", "operation"]
    )
    .unwrap();
    static ref FAILURE: IntCounterVec = register_int_counter_vec!(
        "counting_failure_total",
        "Operations that completed with a failure",
        &["layer", "operation"]
    )
    .unwrap();
    static ref TIMER: HistogramVec = register_histogram_vec!(
        "counting_duration_seconds",
        "Operation duration",
        &["layer", "operation"]
    )
    .unwrap();
}

// Errors caused by user input are counted as successes
pub trait IsErr {
    fn is_err(&self) -> bool {
        true
    }
}

impl IsErr for Infallible {
    fn is_err(&self) -> bool {
        false
    }
}

#[derive(Clone)]
pub struct Measure {
    success: IntCounter,
    failure: IntCounter,
    timer: Histogram,
}

impl Measure {
    pub fn new(layer: &str, operation: &str) -> Measure {
        Measure {
            success: SUCCESS.with_label_values(&[layer, operation]),
            failure: FAILURE.with_label_values(&[layer, operation]),
            timer: TIMER.with_label_values(&[layer, operation]),
        }
    }

    fn count<T, E: IsErr>(&self, r: &Result<T, E>) {
        match r {
            Ok(_) => self.success.inc(),
            Err(e) if !e.is_err() => self.success.inc(),
            Err(_) => self.failure.inc(),
        }
    }

    pub async fn stats<F, T, E>(&self, inner: F) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
        E: IsErr,
    {
        let timer = self.timer.start_timer();
        let r = inner.await;
        timer.observe_duration();
        self.count(&r);
        r
    }

    /// Synchronous counterpart of [`Measure::stats`]
    pub fn record<F, T, E>(&self, inner: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: IsErr,
    {
        let timer = self.timer.start_timer();
        let r = inner();
        timer.observe_duration();
        self.count(&r);
        r
    }
}

pub fn encode() -> Result<String, Box<dyn std::error::Error>> {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
