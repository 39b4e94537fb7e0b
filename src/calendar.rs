use chrono::{Datelike, Duration, NaiveDate};

/// Monday of the week containing `date`. Sunday counts as day 7 of the prior
/// week, so the offset back to Monday is `(weekday + 6) % 7` days, which is
/// exactly what `num_days_from_monday` yields.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// ISO-8601 week number (nearest-Thursday rule).
pub fn iso_week_number(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn monday_is_its_own_week_start() {
        assert_eq!(week_start(date(2026, 8, 3)), date(2026, 8, 3));
    }

    #[test]
    fn sunday_belongs_to_the_prior_week() {
        assert_eq!(week_start(date(2026, 8, 9)), date(2026, 8, 3));
    }

    #[test]
    fn midweek_days_round_back_to_monday() {
        assert_eq!(week_start(date(2026, 8, 5)), date(2026, 8, 3));
        assert_eq!(week_start(date(2026, 8, 8)), date(2026, 8, 3));
    }

    #[test]
    fn iso_week_numbers_match_the_standard() {
        assert_eq!(iso_week_number(date(2026, 1, 1)), 1);
        assert_eq!(iso_week_number(date(2026, 8, 5)), 32);
        // Jan 1 2027 falls in the last ISO week of 2026.
        assert_eq!(iso_week_number(date(2027, 1, 1)), 53);
    }
}
