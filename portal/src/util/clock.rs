//! Wall clock for timestamps on new records and "today" bounds.
//!
//! In the browser this is the user's local time; on the host it is UTC.
//! Rendering never reads the clock, so SSR and hydration agree.

use time::{Date, PrimitiveDateTime};

#[cfg(feature = "hydrate")]
#[must_use]
pub fn now() -> PrimitiveDateTime {
    use time::{Month, Time};

    let js = js_sys::Date::new_0();
    let date = u8::try_from(js.get_month() + 1)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .zip(u8::try_from(js.get_date()).ok())
        .and_then(|(month, day)| {
            Date::from_calendar_date(i32::try_from(js.get_full_year()).ok()?, month, day).ok()
        });
    let time = u8::try_from(js.get_hours())
        .ok()
        .zip(u8::try_from(js.get_minutes()).ok())
        .and_then(|(h, m)| Time::from_hms(h, m, 0).ok());

    match date.zip(time) {
        Some((date, time)) => PrimitiveDateTime::new(date, time),
        None => {
            log::warn!("browser clock unreadable; using UTC");
            utc_now()
        }
    }
}

#[cfg(not(feature = "hydrate"))]
#[must_use]
pub fn now() -> PrimitiveDateTime {
    utc_now()
}

fn utc_now() -> PrimitiveDateTime {
    let now = time::OffsetDateTime::now_utc();
    PrimitiveDateTime::new(now.date(), now.time())
}

#[must_use]
pub fn today() -> Date {
    now().date()
}
