use crate::error::CliError;
use crate::error::CliResult;

/// Extra descriptors requested beyond the source count, for the two output
/// streams plus headroom.
pub const DESCRIPTOR_SLACK: u64 = 1000;

/// Raises the process's soft `RLIMIT_NOFILE` to `max(current_soft, n_sources
/// + DESCRIPTOR_SLACK)`, capped by the hard limit. Fails before any source
/// is opened if the requirement exceeds the hard limit.
pub fn raise_descriptor_limit(n_sources: u64) -> CliResult<()> {
    let mut rl = libc::rlimit {
        rlim_cur: 0,
        rlim_max: 0,
    };
    // SAFETY: `rl` is a valid `libc::rlimit` and `RLIMIT_NOFILE` is a stable resource id.
    if unsafe { libc::getrlimit(libc::RLIMIT_NOFILE, &mut rl) } != 0 {
        return Err(CliError::Io(std::io::Error::last_os_error()));
    }

    let needed = n_sources + DESCRIPTOR_SLACK;
    let hard_is_infinite = rl.rlim_max == libc::RLIM_INFINITY;
    if !hard_is_infinite && needed > rl.rlim_max as u64 {
        return Err(CliError::DescriptorLimit {
            needed,
            hard: rl.rlim_max as u64,
        });
    }

    let new_soft = needed.max(rl.rlim_cur as u64);
    if new_soft <= rl.rlim_cur as u64 {
        return Ok(());
    }
    rl.rlim_cur = new_soft as libc::rlim_t;

    // SAFETY: same `rl`, now with an adjusted soft limit within the hard cap.
    if unsafe { libc::setrlimit(libc::RLIMIT_NOFILE, &rl) } != 0 {
        return Err(CliError::Io(std::io::Error::last_os_error()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raising_to_a_small_requirement_succeeds() {
        // Any reasonable test environment's hard limit comfortably exceeds
        // a handful of sources plus slack.
        assert!(raise_descriptor_limit(4).is_ok());
    }

    #[test]
    fn absurd_requirement_fails_before_opening_anything() {
        let err = raise_descriptor_limit(u64::MAX - DESCRIPTOR_SLACK - 1).unwrap_err();
        assert!(matches!(err, CliError::DescriptorLimit { .. }));
    }
}
