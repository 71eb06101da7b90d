//! Compact, fixed-width duration rendering for progress lines.

use std::time::Duration;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Renders `d` rounded to a precision that depends on its magnitude, right
/// aligned to 7 columns: `" 1h7m0s"`, `"   1m7s"`, `"   1.5s"`, `" 12.3ms"`.
pub fn pretty_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    let rounded = if nanos > 60 * NANOS_PER_SEC {
        round_to(nanos, NANOS_PER_SEC)
    } else if nanos > NANOS_PER_SEC {
        round_to(nanos, NANOS_PER_SEC / 10)
    } else if nanos > NANOS_PER_MILLI {
        round_to(nanos, NANOS_PER_MILLI / 10)
    } else if nanos > NANOS_PER_MICRO {
        round_to(nanos, NANOS_PER_MICRO / 10)
    } else {
        nanos
    };
    format!("{:>7}", format_nanos(rounded))
}

/// Rounds half away from zero to a multiple of `unit`.
fn round_to(nanos: u128, unit: u128) -> u128 {
    (nanos + unit / 2) / unit * unit
}

/// `h`/`m`/`s` notation above one second, a single fractional unit below.
fn format_nanos(nanos: u128) -> String {
    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < NANOS_PER_MICRO {
        return format!("{}ns", nanos);
    }
    if nanos < NANOS_PER_MILLI {
        return with_fraction(nanos, NANOS_PER_MICRO, 3, "µs");
    }
    if nanos < NANOS_PER_SEC {
        return with_fraction(nanos, NANOS_PER_MILLI, 6, "ms");
    }

    let secs = nanos / NANOS_PER_SEC;
    let hours = secs / 3600;
    let minutes = secs / 60 % 60;
    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{}h{}m", hours, minutes));
    } else if minutes > 0 {
        out.push_str(&format!("{}m", minutes));
    }
    out.push_str(&with_fraction(nanos % (60 * NANOS_PER_SEC), NANOS_PER_SEC, 9, "s"));
    out
}

fn with_fraction(nanos: u128, unit: u128, digits: usize, suffix: &str) -> String {
    let whole = nanos / unit;
    let frac = nanos % unit;
    if frac == 0 {
        return format!("{}{}", whole, suffix);
    }
    let frac = format!("{:0width$}", frac, width = digits);
    format!("{}.{}{}", whole, frac.trim_end_matches('0'), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hours_and_minutes() {
        assert_eq!(pretty_duration(Duration::from_secs(67 * 60)), " 1h7m0s");
        assert_eq!(pretty_duration(Duration::from_secs(67)), "   1m7s");
    }

    #[test]
    fn over_a_minute_rounds_to_seconds() {
        assert_eq!(pretty_duration(Duration::from_millis(61_600)), "   1m2s");
    }

    #[test]
    fn seconds_round_to_tenths() {
        assert_eq!(pretty_duration(Duration::from_millis(1_540)), "   1.5s");
        assert_eq!(pretty_duration(Duration::from_millis(1_960)), "     2s");
    }

    #[test]
    fn millis_and_micros() {
        assert_eq!(pretty_duration(Duration::from_micros(12_345)), " 12.3ms");
        assert_eq!(pretty_duration(Duration::from_nanos(4_140)), "  4.1µs");
        assert_eq!(pretty_duration(Duration::from_nanos(750)), "  750ns");
    }

    #[test]
    fn exact_boundaries_are_not_rounded_up() {
        assert_eq!(pretty_duration(Duration::from_secs(1)), "     1s");
        assert_eq!(pretty_duration(Duration::from_millis(1)), "    1ms");
    }

    #[test]
    fn zero() {
        assert_eq!(pretty_duration(Duration::ZERO), "     0s");
    }

    #[test]
    fn long_values_are_not_truncated() {
        assert_eq!(pretty_duration(Duration::from_secs(100 * 3600)), "100h0m0s");
    }
}
