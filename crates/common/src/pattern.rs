//! Date/time pattern strings in the `dd-MMM-yyyy HH:mm:ss` style.
//!
//! Patterns are compiled once into a chrono strftime format and then used
//! for both formatting and parsing.
//!
//! Supported letters:
//!
//! | Letter | Meaning                 | Forms                                  |
//! |--------|-------------------------|----------------------------------------|
//! | `y`    | year                    | `yy` two digits, anything else full    |
//! | `M`    | month                   | `M`, `MM`, `MMM` (Jan), `MMMM` (January)|
//! | `d`    | day of month            | `d`, `dd`                              |
//! | `D`    | day of year             | `D`..`DDD`                             |
//! | `E`    | day of week name        | `E`..`EEE` (Mon), `EEEE` (Monday)      |
//! | `e`    | ISO day of week number  | `e`                                    |
//! | `H`    | hour 0-23               | `H`, `HH`                              |
//! | `h`    | hour 1-12               | `h`, `hh`                              |
//! | `m`    | minute                  | `m`, `mm`                              |
//! | `s`    | second                  | `s`, `ss`                              |
//! | `S`    | fraction of second      | `SSS`, `SSSSSS`, `SSSSSSSSS`           |
//! | `a`    | AM/PM marker            | `a`                                    |
//! | `Z`    | zone offset             | `Z` (+0700), `ZZ` (+07:00)             |
//!
//! Text in single quotes is literal and `''` is an escaped quote. Any other
//! ASCII letter is rejected.

use chrono::format::{parse, ParseResult, Parsed, StrftimeItems};
use chrono::{DateTime, FixedOffset, NaiveTime, TimeZone, Utc};
use std::fmt::{self, Write};

use crate::error::{HelperError, Result};

/// Common patterns. Sample values are for 2017-01-29 13:50:59.370.
pub struct CommonDateTimePatterns;

impl CommonDateTimePatterns {
    /// `29-01-17`
    pub const DAY_MONTH_SHORT_YEAR: &'static str = "dd-MM-yy";
    /// `29-01-2017`
    pub const DAY_MONTH_YEAR: &'static str = "dd-MM-yyyy";
    /// `29 Jan 2017`
    pub const DAY_MONTH_NAME_YEAR: &'static str = "dd MMM yyyy";
    /// `29 Jan 2017 13:50`
    pub const DAY_MONTH_NAME_YEAR_TIME_24H: &'static str = "dd MMM yyyy HH:mm";
    /// `29 Jan 2017 01:50 PM`
    pub const DAY_MONTH_NAME_YEAR_TIME_12H: &'static str = "dd MMM yyyy hh:mm a";
    /// `29 Jan 2017 13:50:59`
    pub const DAY_MONTH_NAME_YEAR_SECONDS_24H: &'static str = "dd MMM yyyy HH:mm:ss";
    /// `29 Jan 2017 01:50:59 PM`
    pub const DAY_MONTH_NAME_YEAR_SECONDS_12H: &'static str = "dd MMM yyyy hh:mm:ss a";
    /// `29 Jan 2017 13:50:59.370`
    pub const DAY_MONTH_NAME_YEAR_MILLIS_24H: &'static str = "dd MMM yyyy HH:mm:ss.SSS";
    /// `29 Jan 2017 01:50:59.370 PM`
    pub const DAY_MONTH_NAME_YEAR_MILLIS_12H: &'static str = "dd MMM yyyy hh:mm:ss.SSS a";

    pub fn all() -> &'static [&'static str] {
        &[
            Self::DAY_MONTH_SHORT_YEAR,
            Self::DAY_MONTH_YEAR,
            Self::DAY_MONTH_NAME_YEAR,
            Self::DAY_MONTH_NAME_YEAR_TIME_24H,
            Self::DAY_MONTH_NAME_YEAR_TIME_12H,
            Self::DAY_MONTH_NAME_YEAR_SECONDS_24H,
            Self::DAY_MONTH_NAME_YEAR_SECONDS_12H,
            Self::DAY_MONTH_NAME_YEAR_MILLIS_24H,
            Self::DAY_MONTH_NAME_YEAR_MILLIS_12H,
        ]
    }
}

/// A compiled date/time pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePattern {
    source: String,
    strftime: String,
    fields: Fields,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Fields {
    year: bool,
    month: bool,
    day: bool,
    day_of_year: bool,
    time: bool,
    hour24: bool,
    hour12: bool,
    minute: bool,
    second: bool,
    meridiem: bool,
    offset: bool,
}

impl DatePattern {
    /// Compile a pattern string.
    ///
    /// # Examples
    ///
    /// ```
    /// use nullguard_common::pattern::DatePattern;
    ///
    /// let pattern = DatePattern::compile("dd-MMM-yyyy").unwrap();
    /// assert_eq!(pattern.strftime(), "%d-%b-%Y");
    /// assert!(DatePattern::compile("invalidpattern").is_err());
    /// ```
    pub fn compile(pattern: &str) -> Result<Self> {
        if pattern.trim().is_empty() {
            return Err(HelperError::invalid_pattern(pattern, "pattern is blank"));
        }

        let mut strftime = String::with_capacity(pattern.len() * 2);
        let mut fields = Fields::default();
        let chars: Vec<char> = pattern.chars().collect();
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];

            if c == '\'' {
                i = read_quoted(pattern, &chars, i, &mut strftime)?;
                continue;
            }

            if !c.is_ascii_alphabetic() {
                push_literal(&mut strftime, c);
                i += 1;
                continue;
            }

            let mut run = 1;
            while i + run < chars.len() && chars[i + run] == c {
                run += 1;
            }
            let item = letter_item(pattern, c, run, &mut fields)?;
            strftime.push_str(item);
            i += run;
        }

        Ok(Self {
            source: pattern.to_string(),
            strftime,
            fields,
        })
    }

    /// The pattern as written.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The equivalent chrono strftime format.
    pub fn strftime(&self) -> &str {
        &self.strftime
    }

    /// Whether the pattern carries its own zone offset.
    pub fn has_offset(&self) -> bool {
        self.fields.offset
    }

    /// Render `date` with this pattern, in the date's own zone.
    pub fn format<Tz>(&self, date: &DateTime<Tz>) -> Result<String>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let mut out = String::new();
        write!(out, "{}", date.format(&self.strftime)).map_err(|_| {
            HelperError::Format(format!(
                "cannot render {} with pattern '{}'",
                date.to_rfc3339(),
                self.source
            ))
        })?;
        Ok(out)
    }

    /// Parse `input` with this pattern.
    ///
    /// Local times are read in `zone` unless the pattern has its own offset.
    /// Missing fields default as at the epoch: year 1970, January, day 1,
    /// midnight. A clock hour without a meridiem marker is read as AM.
    pub fn parse(&self, input: &str, zone: &FixedOffset) -> Result<DateTime<Utc>> {
        let err = |reason: &dyn fmt::Display| {
            HelperError::date_parse(input, self.source.as_str(), reason)
        };

        let mut parsed = Parsed::new();
        parse(&mut parsed, input, StrftimeItems::new(&self.strftime)).map_err(|e| err(&e))?;

        if !self.fields.year {
            parsed.set_year(1970).map_err(|e| err(&e))?;
        }
        if !self.fields.month && !self.fields.day_of_year {
            parsed.set_month(1).map_err(|e| err(&e))?;
        }
        if !self.fields.day && !self.fields.day_of_year {
            parsed.set_day(1).map_err(|e| err(&e))?;
        }

        let date = parsed.to_naive_date().map_err(|e| err(&e))?;
        let time = if self.fields.time {
            default_time_fields(&self.fields, &mut parsed).map_err(|e| err(&e))?;
            parsed.to_naive_time().map_err(|e| err(&e))?
        } else {
            NaiveTime::default()
        };
        let local = date.and_time(time);

        if self.fields.offset {
            let offset = parsed.to_fixed_offset().map_err(|e| err(&e))?;
            return offset
                .from_local_datetime(&local)
                .single()
                .map(|dt| dt.with_timezone(&Utc))
                .ok_or_else(|| err(&"offset out of range"));
        }

        zone.from_local_datetime(&local)
            .single()
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| err(&"local time does not exist in zone"))
    }
}

/// Zero the time fields the pattern leaves out. A bare clock hour is AM.
fn default_time_fields(f: &Fields, parsed: &mut Parsed) -> ParseResult<()> {
    if !f.hour24 && !f.hour12 {
        if f.meridiem {
            parsed.set_hour12(12)?;
        } else {
            parsed.set_hour(0)?;
        }
    }
    if f.hour12 && !f.hour24 && !f.meridiem {
        parsed.set_ampm(false)?;
    }
    if !f.minute {
        parsed.set_minute(0)?;
    }
    if !f.second {
        parsed.set_second(0)?;
    }
    Ok(())
}

fn push_literal(out: &mut String, c: char) {
    match c {
        '%' => out.push_str("%%"),
        '\t' => out.push_str("%t"),
        '\n' => out.push_str("%n"),
        _ => out.push(c),
    }
}

/// Consume a quoted literal starting at `start`, returning the next index.
fn read_quoted(pattern: &str, chars: &[char], start: usize, out: &mut String) -> Result<usize> {
    // '' outside quotes is a single quote
    if chars.get(start + 1) == Some(&'\'') {
        out.push('\'');
        return Ok(start + 2);
    }

    let mut i = start + 1;
    while i < chars.len() {
        if chars[i] == '\'' {
            if chars.get(i + 1) == Some(&'\'') {
                out.push('\'');
                i += 2;
                continue;
            }
            return Ok(i + 1);
        }
        push_literal(out, chars[i]);
        i += 1;
    }

    Err(HelperError::invalid_pattern(
        pattern,
        format!("unterminated quote at position {start}"),
    ))
}

fn letter_item(
    pattern: &str,
    letter: char,
    run: usize,
    fields: &mut Fields,
) -> Result<&'static str> {
    let unsupported_width = || {
        HelperError::invalid_pattern(
            pattern,
            format!("'{letter}' cannot be repeated {run} times"),
        )
    };

    let item = match letter {
        'y' => {
            fields.year = true;
            if run == 2 {
                "%y"
            } else {
                "%Y"
            }
        }
        'M' => {
            fields.month = true;
            match run {
                1 => "%-m",
                2 => "%m",
                3 => "%b",
                _ => "%B",
            }
        }
        'd' => {
            fields.day = true;
            match run {
                1 => "%-d",
                2 => "%d",
                _ => return Err(unsupported_width()),
            }
        }
        'D' => {
            fields.day_of_year = true;
            match run {
                1..=3 => "%j",
                _ => return Err(unsupported_width()),
            }
        }
        'E' => {
            if run <= 3 {
                "%a"
            } else {
                "%A"
            }
        }
        'e' => match run {
            1 => "%u",
            _ => return Err(unsupported_width()),
        },
        'H' | 'h' | 'm' | 's' => {
            fields.time = true;
            match letter {
                'H' => fields.hour24 = true,
                'h' => fields.hour12 = true,
                'm' => fields.minute = true,
                _ => fields.second = true,
            }
            match (letter, run) {
                ('H', 1) => "%-H",
                ('H', 2) => "%H",
                ('h', 1) => "%-I",
                ('h', 2) => "%I",
                ('m', 1) => "%-M",
                ('m', 2) => "%M",
                ('s', 1) => "%-S",
                ('s', 2) => "%S",
                _ => return Err(unsupported_width()),
            }
        }
        'S' => {
            fields.time = true;
            match run {
                3 => "%3f",
                6 => "%6f",
                9 => "%9f",
                _ => return Err(unsupported_width()),
            }
        }
        'a' => {
            fields.time = true;
            fields.meridiem = true;
            match run {
                1 => "%p",
                _ => return Err(unsupported_width()),
            }
        }
        'Z' => {
            fields.offset = true;
            match run {
                1 => "%z",
                2 => "%:z",
                _ => return Err(unsupported_width()),
            }
        }
        other => {
            return Err(HelperError::invalid_pattern(
                pattern,
                format!("unsupported pattern letter '{other}'"),
            ))
        }
    };

    Ok(item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate, Timelike};

    fn sample() -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(2018, 6, 15)
            .unwrap()
            .and_hms_milli_opt(23, 59, 40, 307)
            .unwrap()
            .and_utc()
    }

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_compile_translates_letters() {
        let p = DatePattern::compile("dd MMM yyyy hh:mm:ss.SSS a").unwrap();
        assert_eq!(p.strftime(), "%d %b %Y %I:%M:%S.%3f %p");
        assert_eq!(p.source(), "dd MMM yyyy hh:mm:ss.SSS a");
        assert!(!p.has_offset());
    }

    #[test]
    fn test_compile_quotes_and_percent() {
        let p = DatePattern::compile("yyyy-MM-dd'T'HH:mm").unwrap();
        assert_eq!(p.strftime(), "%Y-%m-%dT%H:%M");

        let p = DatePattern::compile("'at' HH 'o''clock' 100%").unwrap();
        assert_eq!(p.strftime(), "at %H o'clock 100%%");

        let p = DatePattern::compile("HH''mm").unwrap();
        assert_eq!(p.strftime(), "%H'%M");
    }

    #[test]
    fn test_compile_rejects_bad_patterns() {
        assert!(matches!(
            DatePattern::compile("invalidpattern-dd-MMM-yyyy"),
            Err(HelperError::InvalidPattern { .. })
        ));
        assert!(DatePattern::compile("").is_err());
        assert!(DatePattern::compile("   ").is_err());
        assert!(DatePattern::compile("dd 'open").is_err());
        assert!(DatePattern::compile("ddd").is_err());
        assert!(DatePattern::compile("ss.SS").is_err());
    }

    #[test]
    fn test_common_patterns_format() {
        let date = sample();
        let expected = [
            "15-06-18",
            "15-06-2018",
            "15 Jun 2018",
            "15 Jun 2018 23:59",
            "15 Jun 2018 11:59 PM",
            "15 Jun 2018 23:59:40",
            "15 Jun 2018 11:59:40 PM",
            "15 Jun 2018 23:59:40.307",
            "15 Jun 2018 11:59:40.307 PM",
        ];

        for (pattern, want) in CommonDateTimePatterns::all().iter().zip(expected) {
            let compiled = DatePattern::compile(pattern).unwrap();
            assert_eq!(compiled.format(&date).unwrap(), want, "pattern {pattern}");
        }
    }

    #[test]
    fn test_common_patterns_round_trip_to_resolution() {
        let date = sample();
        for pattern in CommonDateTimePatterns::all() {
            let compiled = DatePattern::compile(pattern).unwrap();
            let text = compiled.format(&date).unwrap();
            let back = compiled.parse(&text, &utc()).unwrap();
            assert_eq!(compiled.format(&back).unwrap(), text, "pattern {pattern}");
        }

        let millis = DatePattern::compile(CommonDateTimePatterns::DAY_MONTH_NAME_YEAR_MILLIS_24H)
            .unwrap();
        let text = millis.format(&date).unwrap();
        assert_eq!(millis.parse(&text, &utc()).unwrap(), date);
    }

    #[test]
    fn test_parse_date_only_is_midnight() {
        let p = DatePattern::compile("dd-MMM-yyyy").unwrap();
        let parsed = p.parse("21-Mar-2017", &utc()).unwrap();
        assert_eq!((parsed.year(), parsed.month(), parsed.day()), (2017, 3, 21));
        assert_eq!((parsed.hour(), parsed.minute(), parsed.second()), (0, 0, 0));
    }

    #[test]
    fn test_parse_rejects_mismatched_text() {
        let p = DatePattern::compile("dd-MMM-yyyy").unwrap();
        assert!(matches!(
            p.parse("21-03-2017", &utc()),
            Err(HelperError::DateParse { .. })
        ));
    }

    #[test]
    fn test_parse_time_only_defaults_to_epoch_day() {
        let p = DatePattern::compile("HH:mm").unwrap();
        let parsed = p.parse("13:50", &utc()).unwrap();
        assert_eq!((parsed.year(), parsed.month(), parsed.day()), (1970, 1, 1));
        assert_eq!((parsed.hour(), parsed.minute()), (13, 50));
    }

    #[test]
    fn test_round_trip_hour_without_minutes() {
        let p = DatePattern::compile("yyyy-MM-dd HH").unwrap();
        let date = Utc.with_ymd_and_hms(2018, 6, 15, 13, 0, 0).unwrap();
        let text = p.format(&date).unwrap();
        assert_eq!(text, "2018-06-15 13");
        assert_eq!(p.parse(&text, &utc()).unwrap(), date);
    }

    #[test]
    fn test_round_trip_clock_hour_without_meridiem_reads_as_am() {
        let p = DatePattern::compile("yyyy-MM-dd hh:mm").unwrap();
        let date = Utc.with_ymd_and_hms(2018, 6, 15, 9, 30, 0).unwrap();
        let text = p.format(&date).unwrap();
        assert_eq!(text, "2018-06-15 09:30");
        assert_eq!(p.parse(&text, &utc()).unwrap(), date);
    }

    #[test]
    fn test_parse_minutes_only_defaults_hour_to_zero() {
        let p = DatePattern::compile("mm:ss").unwrap();
        let parsed = p.parse("05:09", &utc()).unwrap();
        assert_eq!((parsed.hour(), parsed.minute(), parsed.second()), (0, 5, 9));
    }

    #[test]
    fn test_parse_uses_zone_for_local_time() {
        let jakarta = FixedOffset::east_opt(7 * 3600).unwrap();
        let p = DatePattern::compile("dd-MM-yyyy HH:mm").unwrap();
        let parsed = p.parse("01-01-2020 07:00", &jakarta).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_with_offset_in_text() {
        let p = DatePattern::compile("yyyy-MM-dd HH:mm ZZ").unwrap();
        assert!(p.has_offset());
        let parsed = p.parse("2020-01-01 07:00 +07:00", &utc()).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_weekday_names() {
        let p = DatePattern::compile("EEE, EEEE e").unwrap();
        assert_eq!(p.format(&sample()).unwrap(), "Fri, Friday 5");
    }
}
