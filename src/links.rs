//! Outward links to Google Maps directions and the Google Calendar editor.

use chrono_tz::Tz;

use crate::error::{invalid_datetime, validation_error, AppResult, Error};
use crate::extract::event::DEFAULT_TITLE;
use crate::extract::EventFields;
use crate::utils::time::{default_end, parse_local_datetime, to_gcal_datetime};

const MAPS_DIR_URL: &str = "https://www.google.com/maps/dir/?api=1";
const CALENDAR_EDIT_URL: &str = "https://calendar.google.com/calendar/u/0/r/eventedit";

/// Build a directions link. A blank origin is left out entirely.
pub fn build_route_url(destination: &str, origin: Option<&str>) -> AppResult<String> {
    let destination = destination.trim();
    if destination.is_empty() {
        return Err(validation_error("destination is required"));
    }

    let mut url = format!(
        "{}&destination={}",
        MAPS_DIR_URL,
        urlencoding::encode(destination)
    );
    if let Some(origin) = origin.map(str::trim).filter(|o| !o.is_empty()) {
        url.push_str("&origin=");
        url.push_str(&urlencoding::encode(origin));
    }
    Ok(url)
}

/// Reject a range whose end is earlier than its start.
///
/// Both values must already be valid local datetimes.
pub fn validate_range(start: &str, end: &str) -> AppResult<()> {
    let start_dt = parse_local_datetime(start).ok_or_else(|| invalid_datetime(start))?;
    let end_dt = parse_local_datetime(end).ok_or_else(|| invalid_datetime(end))?;
    if end_dt < start_dt {
        return Err(Error::RangeInvalid {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok(())
}

/// Build an event-edit link from filled-in fields.
///
/// Times are interpreted in `tz`. `dates` is only sent when a start exists;
/// a missing end defaults to one hour after the start.
pub fn build_calendar_url(fields: &EventFields, tz: Tz) -> AppResult<String> {
    let title = match fields.title.trim() {
        "" => DEFAULT_TITLE,
        title => title,
    };
    let mut url = format!("{}?text={}", CALENDAR_EDIT_URL, urlencoding::encode(title));

    if let Some(start) = non_blank(&fields.start) {
        let end = match non_blank(&fields.end) {
            Some(end) => {
                validate_range(start, end)?;
                end.to_string()
            }
            None => default_end(start).ok_or_else(|| invalid_datetime(start))?,
        };

        let start_utc = to_gcal_datetime(start, tz);
        if start_utc.is_empty() {
            return Err(invalid_datetime(start));
        }
        let end_utc = to_gcal_datetime(&end, tz);
        if end_utc.is_empty() {
            return Err(invalid_datetime(&end));
        }

        url.push_str("&dates=");
        url.push_str(&urlencoding::encode(&format!("{}/{}", start_utc, end_utc)));
    }

    if let Some(location) = non_blank(&fields.location) {
        url.push_str("&location=");
        url.push_str(&urlencoding::encode(location));
    }

    let details = fields.details.trim();
    if !details.is_empty() {
        url.push_str("&details=");
        url.push_str(&urlencoding::encode(details));
    }

    Ok(url)
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
