//! Shared fixtures for the integration suites.

#![allow(clippy::nursery)] // Test infra prioritizes clarity over pedantry
#![allow(clippy::pedantic)] // Test infra prioritizes clarity over pedantry
#![allow(dead_code)] // Not every suite uses every fixture

use richtext_core::{
    Font, GeometryHost, LineMeasure, LineMetrics, MonospaceMetrics, Point, PropertySnapshot,
    TextAttributes, TextBuffer, TextLine,
};
use std::cell::Cell;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Monospace metrics that count every measurement.
#[derive(Debug, Default)]
pub struct CountingMetrics {
    inner: MonospaceMetrics,
    calls: AtomicUsize,
}

impl CountingMetrics {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl LineMetrics for CountingMetrics {
    fn measure_line(&self, text: &str, font: &Font, height: f64) -> LineMeasure {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.measure_line(text, font, height)
    }
}

/// Buffer measured by a [`CountingMetrics`] the test can inspect.
pub fn counting_buffer(text: &str) -> (TextBuffer, Arc<CountingMetrics>) {
    let metrics = Arc::new(CountingMetrics::default());
    let buffer = TextBuffer::with_attributes(text, TextAttributes::default(), metrics.clone());
    (buffer, metrics)
}

/// Buffer where every char is one unit wide and lines are one unit apart.
pub fn unit_buffer(text: &str) -> TextBuffer {
    let attributes = TextAttributes {
        height: 1.0,
        ..TextAttributes::default()
    };
    let metrics = MonospaceMetrics {
        advance: 1.0,
        ..MonospaceMetrics::default()
    };
    TextBuffer::with_attributes(text, attributes, Arc::new(metrics))
}

pub fn lines(buffer: &TextBuffer) -> Vec<&str> {
    buffer.lines().iter().map(TextLine::as_str).collect()
}

/// Host that records how the journal talks to it.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub corner: Point,
    pub width: f64,
    pub height: f64,
    snapshots: Cell<usize>,
    pub restored: Vec<PropertySnapshot>,
}

impl RecordingHost {
    pub fn sized(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn snapshots(&self) -> usize {
        self.snapshots.get()
    }
}

impl GeometryHost for RecordingHost {
    fn snapshot_geometry(&self) -> PropertySnapshot {
        self.snapshots.set(self.snapshots.get() + 1);
        PropertySnapshot {
            corner: Some(self.corner),
            width: Some(self.width),
            height: Some(self.height),
        }
    }

    fn restore_geometry(&mut self, snapshot: &PropertySnapshot) {
        self.restored.push(*snapshot);
        if let Some(corner) = snapshot.corner {
            self.corner = corner;
        }
        if let Some(width) = snapshot.width {
            self.width = width;
        }
        if let Some(height) = snapshot.height {
            self.height = height;
        }
    }
}

#[derive(Clone, Default)]
struct LogSink(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| io::Error::other("log sink poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a subscriber that captures every event as plain text.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let sink = LogSink::default();
    let writer = sink.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    let bytes = sink.0.lock().map(|b| b.clone()).unwrap_or_default();
    (result, String::from_utf8_lossy(&bytes).into_owned())
}
