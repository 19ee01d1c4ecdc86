use chrono::NaiveDate;

use crate::error::WilmaError;

/// Wilma speaks Finnish-style dates everywhere: query parameters, file names.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Parses a `dd.mm.yyyy` date string. Malformed input is fatal.
pub fn parse_date(s: &str) -> Result<NaiveDate, WilmaError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| WilmaError::InvalidDate(s.to_owned()))
}

/// Expands an inclusive date range into the ordered list of `dd.mm.yyyy`
/// strings the fetch loop walks. An end before the start yields an empty
/// list.
pub fn expand(start: &str, end: &str) -> Result<Vec<String>, WilmaError> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;

    let mut dates = Vec::new();
    let mut day = start;
    while day <= end {
        dates.push(day.format(DATE_FORMAT).to_string());
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }

    Ok(dates)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_inclusive_range() {
        let dates = expand("01.01.2024", "03.01.2024").unwrap();
        assert_eq!(dates, ["01.01.2024", "02.01.2024", "03.01.2024"]);
    }

    #[test]
    fn single_day_range() {
        let dates = expand("15.06.2024", "15.06.2024").unwrap();
        assert_eq!(dates, ["15.06.2024"]);
    }

    #[test]
    fn crosses_month_and_year_boundaries() {
        let dates = expand("30.12.2023", "02.01.2024").unwrap();
        assert_eq!(
            dates,
            ["30.12.2023", "31.12.2023", "01.01.2024", "02.01.2024"]
        );
    }

    #[test]
    fn reversed_range_is_empty() {
        let dates = expand("03.01.2024", "01.01.2024").unwrap();
        assert!(dates.is_empty());
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(matches!(
            expand("31.13.2024", "31.13.2024"),
            Err(WilmaError::InvalidDate(_))
        ));
        assert!(matches!(
            expand("2024-01-01", "02.01.2024"),
            Err(WilmaError::InvalidDate(_))
        ));
        assert!(matches!(
            expand("01.01.2024", "notadate"),
            Err(WilmaError::InvalidDate(_))
        ));
    }

    #[test]
    fn handles_leap_day() {
        let dates = expand("28.02.2024", "01.03.2024").unwrap();
        assert_eq!(dates, ["28.02.2024", "29.02.2024", "01.03.2024"]);
    }
}
