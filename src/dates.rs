use chrono::NaiveDate;

/// Turns a `YYYY-MM` date into `YYYY-MM-1`. Anything else is returned as is.
pub fn repair_partial_date(date: &str) -> String {
    let parts = date.split('-').count();
    if parts == 2 {
        format!("{date}-1")
    } else {
        date.to_string()
    }
}

pub fn is_valid_date(date: &str) -> bool {
    parse_date(date).is_some()
}

/// Parses `Y-M-D` with a four digit year and one or two digit month and day.
pub fn parse_date(date: &str) -> Option<NaiveDate> {
    let mut parts = date.split('-');
    let year = parts.next()?;
    let month = parts.next()?;
    let day = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    if year.len() != 4 || !all_digits(year) {
        return None;
    }
    if !(1..=2).contains(&month.len()) || !all_digits(month) {
        return None;
    }
    if !(1..=2).contains(&day.len()) || !all_digits(day) {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

pub fn year_month(date: &str) -> String {
    date.split('-').take(2).collect::<Vec<_>>().join("-")
}

/// Whole days from `from` to `to`; negative when `to` is earlier.
pub fn days_between(from: &str, to: &str) -> Option<i64> {
    let from = parse_date(from)?;
    let to = parse_date(to)?;
    Some((to - from).num_days())
}

fn all_digits(value: &str) -> bool {
    value.bytes().all(|b| b.is_ascii_digit())
}
