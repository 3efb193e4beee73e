use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use time::{Date, Duration, Weekday};

/// Day name as stored on a meal plan entry (`"SATURDAY"`, `"MONDAY"`, ...).
#[derive(
    EnumString,
    Display,
    AsRefStr,
    VariantArray,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl From<Weekday> for DayOfWeek {
    fn from(value: Weekday) -> Self {
        match value {
            Weekday::Monday => Self::Monday,
            Weekday::Tuesday => Self::Tuesday,
            Weekday::Wednesday => Self::Wednesday,
            Weekday::Thursday => Self::Thursday,
            Weekday::Friday => Self::Friday,
            Weekday::Saturday => Self::Saturday,
            Weekday::Sunday => Self::Sunday,
        }
    }
}

impl From<DayOfWeek> for Weekday {
    fn from(value: DayOfWeek) -> Self {
        match value {
            DayOfWeek::Monday => Self::Monday,
            DayOfWeek::Tuesday => Self::Tuesday,
            DayOfWeek::Wednesday => Self::Wednesday,
            DayOfWeek::Thursday => Self::Thursday,
            DayOfWeek::Friday => Self::Friday,
            DayOfWeek::Saturday => Self::Saturday,
            DayOfWeek::Sunday => Self::Sunday,
        }
    }
}

impl DayOfWeek {
    /// Parses a day name, ignoring ASCII case and surrounding whitespace.
    pub fn parse(value: &str) -> crate::Result<Self> {
        match Self::from_str(value.trim()) {
            Ok(day) => Ok(day),
            Err(_) => crate::invalid!("unknown day of week '{value}'"),
        }
    }
}

/// Parses a configured week-start weekday such as `"saturday"`.
pub fn parse_weekday(value: &str) -> crate::Result<Weekday> {
    DayOfWeek::parse(value).map(Into::into)
}

/// Number of days `day` falls after `week_start` within one week, in `0..=6`.
pub fn weekday_offset(day: Weekday, week_start: Weekday) -> u8 {
    (day.number_days_from_monday() + 7 - week_start.number_days_from_monday()) % 7
}

/// Most recent date on or before `date` falling on `week_start`.
///
/// Fails with `InvalidArgument` when that day lies before `Date::MIN`.
pub fn week_start(date: Date, week_start: Weekday) -> crate::Result<Date> {
    let offset = Duration::days(weekday_offset(date.weekday(), week_start).into());

    match date.checked_sub(offset) {
        Some(start) => Ok(start),
        None => crate::invalid!("no {week_start} on or before {date}"),
    }
}

/// Offset of a stored day name from the start of its plan's week.
///
/// Unrecognized names fall back to offset 0 so a single bad row never fails
/// a whole shopping list; the fallback is logged.
pub fn day_offset(day_name: &str, week_start: Weekday) -> u8 {
    match DayOfWeek::from_str(day_name.trim()) {
        Ok(day) => weekday_offset(day.into(), week_start),
        Err(_) => {
            tracing::warn!(
                day = day_name,
                week_start = %week_start,
                "unrecognized day of week, defaulting to week start"
            );

            0
        }
    }
}

/// Calendar date of an entry stored under `day_name` in the week beginning at
/// `week_start_date`, or `None` past `Date::MAX`.
pub fn entry_date(week_start_date: Date, day_name: &str, week_start: Weekday) -> Option<Date> {
    week_start_date.checked_add(Duration::days(day_offset(day_name, week_start).into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_week_start_saturday() {
        // 2024-01-10 is a Wednesday
        assert_eq!(
            week_start(date!(2024 - 01 - 10), Weekday::Saturday).unwrap(),
            date!(2024 - 01 - 06)
        );
        assert_eq!(
            week_start(date!(2024 - 01 - 06), Weekday::Saturday).unwrap(),
            date!(2024 - 01 - 06)
        );
        assert_eq!(
            week_start(date!(2024 - 01 - 12), Weekday::Saturday).unwrap(),
            date!(2024 - 01 - 06)
        );
        assert_eq!(
            week_start(date!(2024 - 01 - 13), Weekday::Saturday).unwrap(),
            date!(2024 - 01 - 13)
        );
    }

    #[test]
    fn test_week_start_across_month_and_year() {
        // 2024-03-01 is a Friday, 2025-01-01 is a Wednesday
        assert_eq!(
            week_start(date!(2024 - 03 - 01), Weekday::Saturday).unwrap(),
            date!(2024 - 02 - 24)
        );
        assert_eq!(
            week_start(date!(2025 - 01 - 01), Weekday::Monday).unwrap(),
            date!(2024 - 12 - 30)
        );
    }

    #[test]
    fn test_week_start_idempotent() {
        let mut day = date!(2023 - 12 - 20);
        for _ in 0..60 {
            for start in [Weekday::Saturday, Weekday::Monday, Weekday::Sunday] {
                let aligned = week_start(day, start).unwrap();
                assert_eq!(week_start(aligned, start).unwrap(), aligned);
                assert_eq!(aligned.weekday(), start);
                assert!(aligned <= day);
                assert!(day - aligned < Duration::days(7));
            }
            day = day.next_day().unwrap();
        }
    }

    #[test]
    fn test_week_start_before_min_date() {
        // Date::MIN is a Monday
        assert!(matches!(
            week_start(Date::MIN, Weekday::Saturday),
            Err(crate::Error::InvalidArgument(_))
        ));
        assert_eq!(week_start(Date::MIN, Weekday::Monday).unwrap(), Date::MIN);
    }

    #[test]
    fn test_day_offset_saturday_start() {
        let expected = [
            ("SATURDAY", 0),
            ("SUNDAY", 1),
            ("MONDAY", 2),
            ("TUESDAY", 3),
            ("WEDNESDAY", 4),
            ("THURSDAY", 5),
            ("FRIDAY", 6),
        ];

        for (name, offset) in expected {
            assert_eq!(day_offset(name, Weekday::Saturday), offset, "{name}");
        }
    }

    #[test]
    fn test_day_offset_monday_start() {
        assert_eq!(day_offset("MONDAY", Weekday::Monday), 0);
        assert_eq!(day_offset("SUNDAY", Weekday::Monday), 6);
        assert_eq!(day_offset("SATURDAY", Weekday::Monday), 5);
    }

    #[test]
    fn test_day_offset_unrecognized_defaults_to_zero() {
        assert_eq!(day_offset("FUNDAY", Weekday::Saturday), 0);
        assert_eq!(day_offset("", Weekday::Saturday), 0);
    }

    #[test]
    fn test_day_offset_ignores_case() {
        assert_eq!(day_offset("friday", Weekday::Saturday), 6);
        assert_eq!(day_offset(" Sunday ", Weekday::Saturday), 1);
    }

    #[test]
    fn test_entry_date_round_trip() {
        let start = date!(2024 - 01 - 06);

        for day in DayOfWeek::VARIANTS {
            let entry = entry_date(start, day.as_ref(), Weekday::Saturday).unwrap();
            assert_eq!(DayOfWeek::from(entry.weekday()), *day);
            assert_eq!(entry.weekday().to_string().to_uppercase(), day.to_string());
        }
    }

    #[test]
    fn test_entry_date_past_max_date() {
        assert_eq!(
            entry_date(date!(9999 - 12 - 31), "THURSDAY", Weekday::Friday),
            None
        );
        assert_eq!(
            entry_date(date!(9999 - 12 - 31), "FRIDAY", Weekday::Friday),
            Some(date!(9999 - 12 - 31))
        );
    }

    #[test]
    fn test_parse_weekday() {
        assert_eq!(parse_weekday("saturday").unwrap(), Weekday::Saturday);
        assert_eq!(parse_weekday("MONDAY").unwrap(), Weekday::Monday);
        assert!(matches!(
            parse_weekday("someday"),
            Err(crate::Error::InvalidArgument(_))
        ));
    }
}
