//! Sink for non-fatal record errors

use crate::error::RecordError;

/// Receives every [`RecordError`] raised during a load, after it was logged
///
/// `()` discards errors, `Vec<RecordError>` collects them.
pub trait Diagnostics {
    /// Accept one error
    fn record(&mut self, error: RecordError);
}

impl Diagnostics for () {
    fn record(&mut self, _error: RecordError) {}
}

impl Diagnostics for Vec<RecordError> {
    fn record(&mut self, error: RecordError) {
        self.push(error);
    }
}

impl<D: Diagnostics + ?Sized> Diagnostics for &mut D {
    fn record(&mut self, error: RecordError) {
        (**self).record(error);
    }
}
