//! Private macros used for logging and error handling.

/// Print an error message to stderr
macro_rules! error {
    ($($arg:tt)*) => (
        eprintln!("mean-ci ERROR: {}", &format!($($arg)*))
    )
}

/// Print a debug message to stdout. Message is only printed if MEAN_CI_DEBUG is set.
macro_rules! info {
    ($($arg:tt)*) => (
        if crate::debug_enabled() {
            println!("mean-ci DEBUG: {}", &format!($($arg)*))
        }
    )
}

/// Evaluates `$block`, logging how long it took.
macro_rules! elapsed {
    ($msg:expr, $block:expr) => {{
        let start = ::std::time::Instant::now();
        let out = $block;
        let elapsed = &start.elapsed();

        info!(
            "{} took {}",
            $msg,
            crate::format::time(elapsed.as_nanos() as f64)
        );

        out
    }};
}
