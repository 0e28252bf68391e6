//! Observability hook for evaluation results.
//!
//! The evaluator reports every computed result to an [`EvaluationSink`] given
//! at construction. The default [`TracingSink`] turns each result into a
//! structured `tracing` event; tests can pass their own sink to capture
//! results without a global subscriber.

use std::fmt;

/// One computed result, reported after it was written to the actual node.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationRecord<'a> {
    /// Name the result was stored under
    pub evaluation_name: &'a str,
    /// Metric that produced it
    pub metric: &'a str,
    /// Position of the query pair among the roots
    pub query_index: usize,
    /// Traversal path that reached the node (`r` for roots)
    pub path: &'a str,
    /// Number of matches on the actual side
    pub actual_len: usize,
    /// Number of matches on the groundtruth side
    pub desired_len: usize,
    /// Metric value
    pub value: f64,
}

/// Receives evaluation results as they are produced.
pub trait EvaluationSink: Send + Sync {
    /// Called once per terminal pair.
    fn record(&self, record: &EvaluationRecord<'_>);
}

/// Forwards results to `tracing` at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EvaluationSink for TracingSink {
    fn record(&self, record: &EvaluationRecord<'_>) {
        tracing::debug!(
            evaluation = record.evaluation_name,
            metric = record.metric,
            query = record.query_index,
            path = record.path,
            actual_len = record.actual_len,
            desired_len = record.desired_len,
            value = record.value,
            "evaluation computed"
        );
    }
}

/// Discards all results.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl EvaluationSink for NoopSink {
    fn record(&self, _record: &EvaluationRecord<'_>) {}
}

impl fmt::Debug for dyn EvaluationSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EvaluationSink")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn sample_record() -> EvaluationRecord<'static> {
        EvaluationRecord {
            evaluation_name: "precision@5",
            metric: "precision",
            query_index: 3,
            path: "c",
            actual_len: 5,
            desired_len: 4,
            value: 0.4,
        }
    }

    #[test]
    fn test_tracing_sink_emits_structured_event() {
        let buffer = SharedBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            TracingSink.record(&sample_record());
        });

        let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("evaluation computed"));
        assert!(output.contains("precision@5"));
        assert!(output.contains("query=3"));
    }

    #[test]
    fn test_noop_sink_accepts_records() {
        NoopSink.record(&sample_record());
    }
}
