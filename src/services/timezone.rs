use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Resolves a stored zone name into a usable timezone, falling back to
/// the configured default. A bad stored value must never take down a
/// scheduler tick for everyone else, so this never errors.
pub fn resolve(stored: Option<&str>, default: Tz) -> Tz {
    stored.and_then(|z| z.parse::<Tz>().ok()).unwrap_or(default)
}

/// Strict zone validation for the /timezone settings command. Unlike
/// [`resolve`], a bad name is rejected here, at write time.
pub fn validate_zone(input: &str) -> Result<Tz> {
    input
        .trim()
        .parse::<Tz>()
        .map_err(|_| anyhow!("Unknown timezone: {input}"))
}

/// The wall clock in `tz` at the given instant.
pub fn local_time(now_utc: DateTime<Utc>, tz: Tz) -> DateTime<Tz> {
    now_utc.with_timezone(&tz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn resolve_known_zone() {
        assert_eq!(resolve(Some("Asia/Yangon"), chrono_tz::UTC), chrono_tz::Asia::Yangon);
        assert_eq!(resolve(Some("Europe/Berlin"), chrono_tz::UTC), chrono_tz::Europe::Berlin);
    }

    #[test]
    fn resolve_falls_back_on_garbage() {
        assert_eq!(resolve(Some("Not/AZone"), chrono_tz::Asia::Yangon), chrono_tz::Asia::Yangon);
        assert_eq!(resolve(Some(""), chrono_tz::UTC), chrono_tz::UTC);
        assert_eq!(resolve(None, chrono_tz::Asia::Yangon), chrono_tz::Asia::Yangon);
    }

    #[test]
    fn validate_zone_strict() {
        assert!(validate_zone("Asia/Yangon").is_ok());
        assert!(validate_zone("  Asia/Yangon  ").is_ok());
        assert!(validate_zone("Yangon").is_err());
        assert!(validate_zone("asia/yangon").is_err());
        assert!(validate_zone("").is_err());
    }

    #[test]
    fn yangon_offset_is_six_thirty() {
        // 02:30 UTC is 09:00 in Yangon (UTC+06:30).
        let utc = Utc.with_ymd_and_hms(2026, 3, 2, 2, 30, 0).single();
        assert!(utc.is_some());
        if let Some(utc) = utc {
            let local = local_time(utc, chrono_tz::Asia::Yangon);
            assert_eq!(local.hour(), 9);
            assert_eq!(local.minute(), 0);
        }
    }
}
