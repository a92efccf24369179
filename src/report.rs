use std::mem::MaybeUninit;
use std::time::Instant;

/// Returns whether extra diagnostics should print: either `--verbose` was
/// passed, or the `DEBUG` environment variable is set to anything but empty.
pub fn debug_enabled(verbose: bool) -> bool {
    verbose || std::env::var_os("DEBUG").is_some_and(|v| !v.is_empty())
}

/// Peak resident set size in kilobytes, via `getrusage(RUSAGE_SELF, ...)`.
/// Returns `None` if the call fails (never fatal; diagnostic-only).
pub fn peak_rss_kb() -> Option<i64> {
    let mut usage = MaybeUninit::<libc::rusage>::uninit();
    // SAFETY: `usage` is sized for `libc::rusage` and only read after a
    // successful call fills it in.
    let rc = unsafe { libc::getrusage(libc::RUSAGE_SELF, usage.as_mut_ptr()) };
    if rc != 0 {
        return None;
    }
    let usage = unsafe { usage.assume_init() };
    Some(usage.ru_maxrss)
}

/// Stderr progress reporter, gated on `--verbose`/`DEBUG`, plus the
/// finalization summary that is always printed.
pub struct Reporter {
    verbose: bool,
    started: Instant,
}

impl Reporter {
    pub fn new(verbose: bool) -> Self {
        Reporter {
            verbose: debug_enabled(verbose),
            started: Instant::now(),
        }
    }

    pub fn note(&self, message: &str) {
        if self.verbose {
            eprintln!("{message}");
        }
    }

    pub fn summary(&self, n_read: u64, n_written: u64) {
        let elapsed = self.started.elapsed().as_secs_f64();
        match peak_rss_kb() {
            Some(rss) => eprintln!(
                "{n_read} profiles read, {n_written} profiles marked nonredundant. \
                 (time: {elapsed:.2}s, peak rss: {rss} kb)"
            ),
            None => eprintln!(
                "{n_read} profiles read, {n_written} profiles marked nonredundant. \
                 (time: {elapsed:.2}s)"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_rss_is_reported_when_available() {
        assert!(peak_rss_kb().unwrap_or(1) > 0);
    }

    #[test]
    fn debug_env_var_enables_diagnostics_even_without_verbose() {
        std::env::set_var("DEBUG", "1");
        assert!(debug_enabled(false));
        std::env::remove_var("DEBUG");
        assert!(!debug_enabled(false));
    }
}
