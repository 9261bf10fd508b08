//! Diagnostic reporting for the compiler front end.
//!
//! Every lexical and syntactic error goes through this module: a single
//! line on standard error plus an increment of the compilation-wide error
//! counter. The counter is thread-local — one compilation runs on one
//! thread, and keeping the counter per-thread lets the test suite inspect
//! it without cross-test interference.

use std::cell::Cell;

thread_local! {
    static ERROR_COUNT: Cell<usize> = const { Cell::new(0) };
}

fn bump() {
    ERROR_COUNT.with(|c| c.set(c.get() + 1));
}

/// Report an error that has no useful source position.
pub fn report(filename: &str, message: &str) {
    eprintln!("Error in {}: {}", filename, message);
    bump();
}

/// Report an error at a specific line and column.
pub fn report_at(filename: &str, line: usize, column: usize, message: &str) {
    eprintln!("Error in {}:{}:{}: {}", filename, line, column, message);
    bump();
}

/// Report an error tied to a specific piece of source text.
pub fn report_with_token(
    filename: &str,
    line: usize,
    column: usize,
    token: &str,
    message: &str,
) {
    eprintln!(
        "Error in {}:{}:{}: {}: '{}'",
        filename, line, column, message, token
    );
    bump();
}

/// Number of errors reported since the last [`reset`].
pub fn count() -> usize {
    ERROR_COUNT.with(|c| c.get())
}

/// Reset the error counter to zero.
pub fn reset() {
    ERROR_COUNT.with(|c| c.set(0));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_tracks_reports() {
        reset();
        assert_eq!(count(), 0);

        report("test.c", "something went wrong");
        assert_eq!(count(), 1);

        report_at("test.c", 3, 7, "unexpected character");
        report_with_token("test.c", 3, 9, "@", "unrecognized character");
        assert_eq!(count(), 3);

        reset();
        assert_eq!(count(), 0);
    }
}
