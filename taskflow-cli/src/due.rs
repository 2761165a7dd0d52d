//! Due-date arguments: `YYYY-MM-DD`, `today`, `tomorrow`, `yesterday`, `+Nd`, `-Nd`.

use anyhow::{anyhow, bail, Result};
use chrono::{Duration, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

static OFFSET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([+-])(\d{1,4})d$").expect("offset regex compiles"));

pub fn parse_due(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let s = input.trim().to_lowercase();
    match s.as_str() {
        "" => bail!("empty date"),
        "today" => return Ok(today),
        "tomorrow" => return Ok(today + Duration::days(1)),
        "yesterday" => return Ok(today - Duration::days(1)),
        _ => {}
    }

    if let Some(caps) = OFFSET_RE.captures(&s) {
        let days: i64 = caps[2].parse()?;
        let delta = Duration::days(days);
        return Ok(if &caps[1] == "+" { today + delta } else { today - delta });
    }

    NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|e| {
        anyhow!("invalid date '{input}': {e} (use YYYY-MM-DD, today, tomorrow, +3d)")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 27).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn keywords() {
        assert_eq!(parse_due("today", today()).unwrap(), today());
        assert_eq!(parse_due(" Tomorrow ", today()).unwrap(), date(2024, 12, 28));
        assert_eq!(parse_due("yesterday", today()).unwrap(), date(2024, 12, 26));
    }

    #[test]
    fn offsets_cross_month_boundaries() {
        assert_eq!(parse_due("+7d", today()).unwrap(), date(2025, 1, 3));
        assert_eq!(parse_due("-27d", today()).unwrap(), date(2024, 11, 30));
    }

    #[test]
    fn iso_dates() {
        assert_eq!(parse_due("2025-02-14", today()).unwrap(), date(2025, 2, 14));
        assert!(parse_due("2025-02-30", today()).is_err());
        assert!(parse_due("next week", today()).is_err());
        assert!(parse_due("", today()).is_err());
    }
}
