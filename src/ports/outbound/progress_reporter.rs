/// ProgressReporter port for user-facing progress output
///
/// Implementations must not write to stdout; formatted results own stdout.
pub trait ProgressReporter {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports incremental progress toward a known total
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports a non-fatal error or warning
    fn report_error(&self, message: &str);

    /// Reports completion of a processing stage
    fn report_completion(&self, message: &str);
}
