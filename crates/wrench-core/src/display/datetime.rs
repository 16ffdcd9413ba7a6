//! Timestamp formatting in the system time zone.
//!
//! Stored timestamps are UTC. Everything a tenant reads (request lists,
//! request details, invite listings) goes through [`LocalDateTime`] so the
//! same instant always renders the same way.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

/// A borrowed [`Timestamp`] that displays in the system time zone.
///
/// Wrap a timestamp at the point of formatting instead of converting it
/// ahead of time. The wrapper holds a reference, so it is free to build
/// inside a `write!` call.
///
/// # Format
///
/// The output follows `YYYY-MM-DD HH:MM TZ`:
/// - year, month and day are zero-padded
/// - the time is in 24-hour form without seconds
/// - the zone abbreviation comes last (for example UTC, EST or JST)
///
/// The date and time parts have a fixed width, so columns line up in lists.
///
/// ```rust
/// use jiff::Timestamp;
/// use wrench_core::display::LocalDateTime;
///
/// let submitted = Timestamp::from_second(1_700_000_000).unwrap();
/// let text = LocalDateTime(&submitted).to_string();
/// assert_eq!(&text[4..5], "-");
/// assert_eq!(&text[10..11], " ");
/// assert_eq!(&text[13..14], ":");
/// ```
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M %Z")
        )
    }
}
