//! Metrics collection and reporting using metrics-rs.
//!
//! Comparison and loading record through the `metrics` facade; without an
//! installed recorder the calls are no-ops. The CLI installs [`CliRecorder`]
//! when `--metrics` is passed and prints a summary at exit.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use metrics::{
    Counter, CounterFn, Gauge, GaugeFn, Histogram, HistogramFn, Key, KeyName, Metadata, Recorder,
    SharedString, Unit, counter, describe_counter, describe_gauge, describe_histogram, gauge,
    histogram,
};
use parking_lot::RwLock;

use crate::TraceComparison;

// ============================================================================
// Metric descriptions
// ============================================================================

/// Register metric descriptions. Call once at startup.
pub fn init() {
    describe_counter!(
        "tracecheck_lines_compared_total",
        Unit::Count,
        "Trace line pairs parsed and compared"
    );
    describe_counter!(
        "tracecheck_mismatched_lines_total",
        Unit::Count,
        "Line pairs whose records disagree"
    );
    describe_counter!(
        "tracecheck_field_mismatches_total",
        Unit::Count,
        "Disagreeing fields, labelled by field"
    );
    describe_gauge!(
        "tracecheck_compare_seconds",
        Unit::Seconds,
        "Wall-clock time of the last comparison"
    );
    describe_histogram!(
        "tracecheck_load_seconds",
        Unit::Seconds,
        "Time spent reading and decoding each trace file"
    );
}

// ============================================================================
// Metric recording functions
// ============================================================================

/// Record the outcome of a comparison.
pub fn record_comparison(comparison: &TraceComparison, elapsed: Duration) {
    counter!("tracecheck_lines_compared_total").increment(comparison.compared as u64);
    counter!("tracecheck_mismatched_lines_total").increment(comparison.mismatches.len() as u64);
    for mismatch in &comparison.mismatches {
        for field in &mismatch.fields {
            counter!("tracecheck_field_mismatches_total", "field" => field.label()).increment(1);
        }
    }
    gauge!("tracecheck_compare_seconds").set(elapsed.as_secs_f64());
}

/// Record how long one trace took to load.
pub fn record_load(elapsed: Duration) {
    histogram!("tracecheck_load_seconds").record(elapsed.as_secs_f64());
}

// ============================================================================
// CLI Recorder for terminal output
// ============================================================================

/// Collected values, keyed by metric name plus labels. Sorted maps keep the
/// summary stable.
#[derive(Default)]
struct Store {
    counters: RwLock<BTreeMap<String, u64>>,
    gauges: RwLock<BTreeMap<String, f64>>,
    histograms: RwLock<BTreeMap<String, Vec<f64>>>,
}

/// One registered metric; the same handle type backs all three kinds.
struct Slot {
    key: String,
    store: Arc<Store>,
}

impl CounterFn for Slot {
    fn increment(&self, value: u64) {
        *self.store.counters.write().entry(self.key.clone()).or_default() += value;
    }

    fn absolute(&self, value: u64) {
        self.store.counters.write().insert(self.key.clone(), value);
    }
}

impl GaugeFn for Slot {
    fn increment(&self, value: f64) {
        *self.store.gauges.write().entry(self.key.clone()).or_default() += value;
    }

    fn decrement(&self, value: f64) {
        *self.store.gauges.write().entry(self.key.clone()).or_default() -= value;
    }

    fn set(&self, value: f64) {
        self.store.gauges.write().insert(self.key.clone(), value);
    }
}

impl HistogramFn for Slot {
    fn record(&self, value: f64) {
        self.store
            .histograms
            .write()
            .entry(self.key.clone())
            .or_default()
            .push(value);
    }
}

/// Recorder that keeps metrics in memory for a terminal summary.
#[derive(Default)]
pub struct CliRecorder {
    store: Arc<Store>,
}

impl CliRecorder {
    /// Install as the global recorder.
    ///
    /// Returns `None` if another recorder is already installed.
    pub fn install(self) -> Option<CliRecorderHandle> {
        let store = Arc::clone(&self.store);
        metrics::set_global_recorder(self).ok()?;
        Some(CliRecorderHandle { store })
    }

    fn slot(&self, key: &Key) -> Arc<Slot> {
        Arc::new(Slot {
            key: slot_name(key),
            store: Arc::clone(&self.store),
        })
    }
}

/// `name` or `name{label=value,...}`.
fn slot_name(key: &Key) -> String {
    let labels: Vec<String> = key
        .labels()
        .map(|label| format!("{}={}", label.key(), label.value()))
        .collect();
    if labels.is_empty() {
        key.name().to_string()
    } else {
        format!("{}{{{}}}", key.name(), labels.join(","))
    }
}

impl Recorder for CliRecorder {
    fn describe_counter(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {}
    fn describe_gauge(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {}
    fn describe_histogram(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {}

    fn register_counter(&self, key: &Key, _metadata: &Metadata<'_>) -> Counter {
        Counter::from_arc(self.slot(key))
    }

    fn register_gauge(&self, key: &Key, _metadata: &Metadata<'_>) -> Gauge {
        Gauge::from_arc(self.slot(key))
    }

    fn register_histogram(&self, key: &Key, _metadata: &Metadata<'_>) -> Histogram {
        Histogram::from_arc(self.slot(key))
    }
}

/// Read side of an installed [`CliRecorder`].
pub struct CliRecorderHandle {
    store: Arc<Store>,
}

impl CliRecorderHandle {
    /// Print all collected metrics to stderr.
    pub fn print_summary(&self) {
        let counters = self.store.counters.read();
        let gauges = self.store.gauges.read();
        let histograms = self.store.histograms.read();

        if counters.is_empty() && gauges.is_empty() && histograms.is_empty() {
            eprintln!("No metrics collected.");
            return;
        }

        eprintln!();
        eprintln!("## Metrics Summary");
        for (key, value) in counters.iter() {
            eprintln!("  {key}: {value}");
        }
        for (key, value) in gauges.iter() {
            eprintln!("  {key}: {value:.6}");
        }
        for (key, samples) in histograms.iter().filter(|(_, samples)| !samples.is_empty()) {
            let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
            let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            #[allow(clippy::cast_precision_loss)]
            let avg = samples.iter().sum::<f64>() / samples.len() as f64;
            eprintln!(
                "  {key}: count={}, min={min:.6}, max={max:.6}, avg={avg:.6}",
                samples.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics::Label;

    fn counter_value(recorder: &CliRecorder, key: &str) -> Option<u64> {
        recorder.store.counters.read().get(key).copied()
    }

    #[test]
    fn test_slot_name() {
        let key = Key::from_name("tracecheck_lines_compared_total");
        assert_eq!(slot_name(&key), "tracecheck_lines_compared_total");

        let key = Key::from_parts(
            "tracecheck_field_mismatches_total",
            vec![Label::new("field", "p")],
        );
        assert_eq!(slot_name(&key), "tracecheck_field_mismatches_total{field=p}");
    }

    #[test]
    fn test_counter_accumulates() {
        let recorder = CliRecorder::default();
        let slot = recorder.slot(&Key::from_name("tracecheck_lines_compared_total"));
        CounterFn::increment(&*slot, 5);
        CounterFn::increment(&*slot, 3);
        assert_eq!(
            counter_value(&recorder, "tracecheck_lines_compared_total"),
            Some(8)
        );
    }

    #[test]
    fn test_recorder_collects_comparison() {
        use crate::{CompareConfig, compare_traces};

        let recorder = CliRecorder::default();
        let nestest = ["C000  4C F5 C5  JMP $C5F5 A:00 X:00 Y:00 P:24 SP:FD CYC:7"];
        let output = ["JMP $C5F5 A:00,X:00,Y:00,P:25,SP:FD $C000 7"];
        metrics::with_local_recorder(&recorder, || {
            compare_traces(&nestest, &output, &CompareConfig::default()).unwrap();
        });

        assert_eq!(counter_value(&recorder, "tracecheck_lines_compared_total"), Some(1));
        assert_eq!(counter_value(&recorder, "tracecheck_mismatched_lines_total"), Some(1));
        assert_eq!(
            counter_value(&recorder, "tracecheck_field_mismatches_total{field=p}"),
            Some(1)
        );
        assert!(
            recorder
                .store
                .gauges
                .read()
                .contains_key("tracecheck_compare_seconds")
        );
    }
}
