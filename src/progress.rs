// src/progress.rs
/// Status reporting for the crawl trigger and exports.
/// The CLI prints these; tests record them.
pub trait Progress {
    /// Called at the start with the number of steps (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One unit finished (e.g. one export file written).
    fn item_done(&mut self, _label: &str) {}

    /// Called at the end, successful or not. The trigger guarantees this on
    /// every exit path; it is where a frontend re-enables its crawl control.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Calls `finish()` when dropped, so early returns and `?` still finish.
pub struct FinishGuard<'a> {
    inner: &'a mut dyn Progress,
}

impl<'a> FinishGuard<'a> {
    pub fn new(inner: &'a mut dyn Progress) -> Self { Self { inner } }
    pub fn get(&mut self) -> &mut (dyn Progress + 'a) { &mut *self.inner }
}

impl Drop for FinishGuard<'_> {
    fn drop(&mut self) {
        self.inner.finish();
    }
}
