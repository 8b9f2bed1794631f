//! Server-local time, used to stamp the `fecha` of new operations.

use time::{OffsetDateTime, UtcOffset, format_description::BorrowedFormatItem, macros::format_description};
use time_tz::{Offset, TimeZone};

use crate::Error;

/// The layout of a `fecha` string, e.g. `2025-03-14 09:26:53`.
///
/// The fixed width means sorting `fecha` strings sorts them chronologically.
pub const FECHA_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Get the current UTC offset of the canonical timezone, e.g. "America/Argentina/Buenos_Aires".
///
/// Returns `None` if the timezone name is not known.
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// The timezone used when none is configured and the system timezone cannot be detected.
pub const DEFAULT_TIMEZONE: &str = "Etc/UTC";

/// The canonical name of the timezone the host is set to, e.g. "Europe/Madrid".
///
/// Returns `None` and logs a warning if the system timezone cannot be detected.
pub fn system_timezone() -> Option<String> {
    match time_tz::system::get_timezone() {
        Ok(tz) => Some(tz.name().to_owned()),
        Err(error) => {
            tracing::warn!("Could not detect the system timezone: {error:?}");
            None
        }
    }
}

/// Pick the timezone for stamping `fecha`: `configured` if given, otherwise
/// the system timezone, otherwise [DEFAULT_TIMEZONE].
pub fn local_timezone_or_system(configured: Option<String>) -> String {
    configured
        .or_else(system_timezone)
        .unwrap_or_else(|| DEFAULT_TIMEZONE.to_owned())
}

/// Format `date_time` as a `fecha` string.
///
/// # Errors
/// Returns [Error::TimestampFormatError] if the date-time cannot be formatted.
pub fn format_timestamp(date_time: OffsetDateTime) -> Result<String, Error> {
    date_time
        .format(FECHA_FORMAT)
        .map_err(|error| Error::TimestampFormatError(error.to_string()))
}

/// The current time at `local_offset` as a `fecha` string.
///
/// # Errors
/// Returns [Error::TimestampFormatError] if the time cannot be formatted.
pub fn local_timestamp(local_offset: UtcOffset) -> Result<String, Error> {
    format_timestamp(OffsetDateTime::now_utc().to_offset(local_offset))
}

/// Resolve `canonical_timezone`, logging and returning an error if it is not valid.
pub(crate) fn resolve_local_offset(canonical_timezone: &str) -> Result<UtcOffset, Error> {
    get_local_offset(canonical_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", canonical_timezone);
        Error::InvalidTimezoneError(canonical_timezone.to_owned())
    })
}

#[cfg(test)]
mod tests {
    use time::{UtcOffset, macros::datetime};

    use crate::Error;

    use super::{
        format_timestamp, get_local_offset, local_timestamp, local_timezone_or_system,
        resolve_local_offset,
    };

    #[test]
    fn formats_with_zero_padding() {
        let got = format_timestamp(datetime!(2025-03-04 05:06:07 UTC)).unwrap();

        assert_eq!(got, "2025-03-04 05:06:07");
    }

    #[test]
    fn local_timestamp_has_fixed_width() {
        let got = local_timestamp(UtcOffset::UTC).unwrap();

        assert_eq!(got.len(), "YYYY-MM-DD HH:MM:SS".len());
        assert_eq!(&got[4..5], "-");
        assert_eq!(&got[10..11], " ");
        assert_eq!(&got[13..14], ":");
    }

    #[test]
    fn known_timezone_has_offset() {
        assert_eq!(get_local_offset("Etc/UTC"), Some(UtcOffset::UTC));
    }

    #[test]
    fn unknown_timezone_is_an_error() {
        assert_eq!(
            resolve_local_offset("Not/A_Zone"),
            Err(Error::InvalidTimezoneError("Not/A_Zone".to_owned()))
        );
    }

    #[test]
    fn configured_timezone_wins() {
        assert_eq!(
            local_timezone_or_system(Some("America/Argentina/Buenos_Aires".to_owned())),
            "America/Argentina/Buenos_Aires"
        );
    }

    #[test]
    fn unconfigured_timezone_resolves() {
        let timezone = local_timezone_or_system(None);

        assert!(
            get_local_offset(&timezone).is_some(),
            "got unknown timezone {timezone:?}"
        );
    }
}
