use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use crate::gan::{Metrics, MetricsReporter, PrintReporter};

#[derive(Clone, Default)]
struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn sample_metrics() -> Metrics {
    let mut metrics = Metrics::new();
    metrics.insert("g_loss", 0.5);
    metrics.insert("d_loss", 1.234);
    metrics
}

#[test]
fn test_format_line_sorted_with_two_decimals() {
    assert_eq!(sample_metrics().format_line(10), "10: d_loss 1.23 g_loss 0.50");
    assert_eq!(Metrics::new().format_line(3), "3:");
}

#[test]
fn test_merge_prefers_other() {
    let mut metrics = sample_metrics();
    let mut other = Metrics::new();
    other.insert("d_loss", 2.0);
    other.insert("d_real", 0.1);

    metrics.merge(other);

    assert_eq!(metrics.len(), 3);
    assert_eq!(metrics.get("d_loss"), Some(2.0));
    assert_eq!(metrics.get("d_real"), Some(0.1));
    assert!(!metrics.is_empty());
}

#[test]
fn test_print_reporter_writes_one_line_per_report() {
    let buffer = SharedBuffer::default();
    let mut reporter = PrintReporter::with_writer(Box::new(buffer.clone()));

    reporter.report(10, &sample_metrics()).unwrap();
    reporter.report(20, &sample_metrics()).unwrap();

    let output = String::from_utf8(buffer.0.borrow().clone()).unwrap();
    assert_eq!(output, "10: d_loss 1.23 g_loss 0.50\n20: d_loss 1.23 g_loss 0.50\n");
}
