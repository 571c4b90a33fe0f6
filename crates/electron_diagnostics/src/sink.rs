//! The ordered diagnostic log of one compilation unit.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Collects diagnostics in emission order.
///
/// Stages hold a shared reference and call [`emit`](Self::emit); the error
/// count is kept separately so [`has_errors`](Self::has_errors) does not lock.
pub struct DiagnosticSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
    error_count: AtomicUsize,
}

impl DiagnosticSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self {
            diagnostics: Mutex::new(Vec::new()),
            error_count: AtomicUsize::new(0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Diagnostic>> {
        self.diagnostics
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Records a diagnostic.
    pub fn emit(&self, diag: Diagnostic) {
        if diag.severity == Severity::Error {
            self.error_count.fetch_add(1, Ordering::Relaxed);
        }
        self.lock().push(diag);
    }

    /// Returns `true` if any error has been recorded.
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Number of errors recorded so far. Not reset by [`take_all`](Self::take_all).
    pub fn error_count(&self) -> usize {
        self.error_count.load(Ordering::Relaxed)
    }

    /// Returns the earliest recorded error still held by the sink.
    pub fn first_error(&self) -> Option<Diagnostic> {
        self.first_error_from(0)
    }

    /// Returns the earliest error at or after position `start` in emission
    /// order. Pair with [`len`](Self::len) to look only at the diagnostics of
    /// one stage.
    pub fn first_error_from(&self, start: usize) -> Option<Diagnostic> {
        self.lock()
            .iter()
            .skip(start)
            .find(|d| d.severity.is_error())
            .cloned()
    }

    /// Number of diagnostics currently held.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if no diagnostics are held.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drains all diagnostics.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.lock())
    }

    /// Returns a copy of all diagnostics.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }
}

impl Default for DiagnosticSink {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{Category, DiagnosticCode};
    use electron_source::Span;

    fn error(msg: &str) -> Diagnostic {
        Diagnostic::error(DiagnosticCode::new(Category::Error, 300), msg, Span::DUMMY)
    }

    fn warning(msg: &str) -> Diagnostic {
        Diagnostic::warning(DiagnosticCode::new(Category::Warning, 300), msg, Span::DUMMY)
    }

    #[test]
    fn empty() {
        let sink = DiagnosticSink::new();
        assert!(!sink.has_errors());
        assert!(sink.first_error().is_none());
    }

    #[test]
    fn warnings_do_not_count() {
        let sink = DiagnosticSink::new();
        sink.emit(warning("w"));
        assert_eq!(sink.error_count(), 0);
        assert_eq!(sink.diagnostics().len(), 1);
    }

    #[test]
    fn first_error_skips_warnings() {
        let sink = DiagnosticSink::new();
        sink.emit(warning("w"));
        sink.emit(error("first"));
        sink.emit(error("second"));
        assert_eq!(sink.first_error().unwrap().message, "first");
        assert_eq!(sink.error_count(), 2);
    }

    #[test]
    fn first_error_from_mark() {
        let sink = DiagnosticSink::new();
        sink.emit(error("earlier stage"));
        let mark = sink.len();
        sink.emit(warning("w"));
        assert!(sink.first_error_from(mark).is_none());
        sink.emit(error("this stage"));
        assert_eq!(sink.first_error_from(mark).unwrap().message, "this stage");
    }

    #[test]
    fn take_all_drains_but_keeps_count() {
        let sink = DiagnosticSink::new();
        sink.emit(error("e"));
        assert_eq!(sink.take_all().len(), 1);
        assert!(sink.take_all().is_empty());
        assert_eq!(sink.error_count(), 1);
    }
}
