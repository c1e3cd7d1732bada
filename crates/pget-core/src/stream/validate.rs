//! Post-consumption validity checking for streams.

use std::io;

/// A stream that can report, after being fully consumed, whether the bytes
/// it yielded were correct, plus a human-readable problem list.
///
/// Validity is recomputed from current internal state on every call, never
/// cached. Calling it mid-stream is allowed but yields a partial answer;
/// meaningful results require full consumption first.
pub trait ValidatingRead: io::Read {
    /// Record any validation problems into `errors`.
    fn collect_validation_errors(&self, errors: &mut Vec<String>);

    /// Freshly computed problem list.
    fn validation_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        self.collect_validation_errors(&mut errors);
        errors
    }

    /// True if the freshly computed problem list is empty.
    fn is_valid(&self) -> bool {
        self.validation_errors().is_empty()
    }
}
