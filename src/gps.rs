//! Loading GPS logs exported as CSV.

use std::{fs::File, io::Read, path::Path};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

pub const REQUIRED_COLUMNS: [&str; 5] = [
    "Local_Date",
    "Local_Time",
    "Latitude",
    "Longitude",
    "Speed_mph",
];

// two digit years first: `%Y` would happily read "24" as the year 24
const DATE_FORMATS: [&str; 3] = ["%m/%d/%y", "%m/%d/%Y", "%Y-%m-%d"];
const TIME_FORMATS: [&str; 4] = ["%H:%M:%S", "%H:%M:%S%.f", "%H:%M", "%I:%M:%S %p"];

/// One sample of the log, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRow {
    pub timestamp: NaiveDateTime,
    pub latitude: f64,
    pub longitude: f64,
    pub speed_mph: f64,
}

/// Serde representation of a CSV line
#[derive(Debug, Deserialize)]
struct Record {
    #[serde(rename = "Local_Date")]
    local_date: String,
    #[serde(rename = "Local_Time")]
    local_time: String,
    #[serde(rename = "Latitude")]
    latitude: f64,
    #[serde(rename = "Longitude")]
    longitude: f64,
    #[serde(rename = "Speed_mph")]
    speed_mph: f64,
}

impl Record {
    fn into_row(self) -> std::result::Result<LogRow, String> {
        let date = parse_date(&self.local_date)?;
        let time = parse_time(&self.local_time)?;

        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(format!("latitude out of range: {}", self.latitude));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(format!("longitude out of range: {}", self.longitude));
        }
        if !self.speed_mph.is_finite() {
            return Err(format!("speed is not a number: {}", self.speed_mph));
        }

        Ok(LogRow {
            timestamp: date.and_time(time),
            latitude: self.latitude,
            longitude: self.longitude,
            speed_mph: self.speed_mph,
        })
    }
}

/// Parses a date, reading ambiguous components as month/day/year.
pub fn parse_date(value: &str) -> std::result::Result<NaiveDate, String> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .ok_or_else(|| format!("unrecognised date `{value}`"))
}

/// Parses a wall clock time. Second 60 is rejected: chrono reads it as a leap second.
pub fn parse_time(value: &str) -> std::result::Result<NaiveTime, String> {
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(value, format).ok())
        .filter(|time| time.nanosecond() < 1_000_000_000)
        .ok_or_else(|| format!("unrecognised time `{value}`"))
}

pub fn load(path: &Path) -> Result<Vec<LogRow>> {
    let source = path.display().to_string();
    let file = File::open(path).map_err(|e| Error::InputFormat(format!("{source}: {e}")))?;
    read(file, &source)
}

/// Reads a log from any reader. `source` only names the input in error messages.
pub fn read<R: Read>(input: R, source: &str) -> Result<Vec<LogRow>> {
    let mut reader = csv::ReaderBuilder::new()
        // header names must match exactly, only values get trimmed
        .trim(csv::Trim::Fields)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| Error::InputFormat(format!("{source}: {e}")))?
        .clone();
    let missing: Vec<_> = REQUIRED_COLUMNS
        .into_iter()
        .filter(|column| !headers.iter().any(|header| header == *column))
        .collect();
    if !missing.is_empty() {
        return Err(Error::InputFormat(format!(
            "{source}: missing required column(s) {}",
            missing.join(", ")
        )));
    }

    let mut output = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| Error::InputFormat(format!("{source}: {e}")))?;
        let line = record.position().map_or(0, |p| p.line());
        let record: Record = record
            .deserialize(Some(&headers))
            .map_err(|e| Error::InputFormat(format!("{source}: line {line}: {e}")))?;
        let row = record
            .into_row()
            .map_err(|reason| Error::InputFormat(format!("{source}: line {line}: {reason}")))?;
        output.push(row);
    }
    debug!(rows = output.len(), source, "loaded GPS log");

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Local_Date,Local_Time,Latitude,Longitude,Speed_mph\n";

    fn read_str(data: &str) -> Result<Vec<LogRow>> {
        read(data.as_bytes(), "test.csv")
    }

    #[test]
    fn combines_date_and_time() {
        let rows = read_str(&format!("{HEADER}03/05/2024,14:30:00,51.5,-0.12,22.567\n")).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            "2024-03-05 14:30:00"
        );
        assert_eq!(rows[0].latitude, 51.5);
        assert_eq!(rows[0].longitude, -0.12);
        assert_eq!(rows[0].speed_mph, 22.567);
    }

    #[test]
    fn keeps_file_order() {
        let rows = read_str(&format!(
            "{HEADER}1/1/2024,00:00:03,3,0,0\n1/1/2024,00:00:01,1,0,0\n1/1/2024,00:00:02,2,0,0\n"
        ))
        .unwrap();
        let lats: Vec<_> = rows.iter().map(|r| r.latitude).collect();
        assert_eq!(lats, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn ignores_extra_columns_and_trims_values() {
        let rows = read_str(
            "Index,Local_Date,Local_Time,Latitude,Longitude,Speed_mph,Heading\n\
             7, 12/31/2023 , 23:59:59 , 10.0 , 20.0 , 5 ,180\n",
        )
        .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].longitude, 20.0);
        assert_eq!(
            rows[0].timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            "2023-12-31 23:59:59"
        );
    }

    #[test]
    fn padded_header_is_not_a_match() {
        let err = read_str(
            " Latitude ,Local_Date,Local_Time,Longitude,Speed_mph\n1,1/1/2024,00:00:00,1,1\n",
        )
        .unwrap_err();
        match err {
            Error::InputFormat(message) => assert!(message.contains("Latitude"), "{message}"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn leap_second_row_is_rejected() {
        let err = read_str(&format!("{HEADER}1/1/2024,23:59:60,1,1,1\n")).unwrap_err();
        assert!(matches!(err, Error::InputFormat(_)));
    }

    #[test]
    fn header_only_is_empty() {
        assert!(read_str(HEADER).unwrap().is_empty());
    }

    #[test]
    fn missing_latitude_column() {
        let err = read_str("Local_Date,Local_Time,Longitude,Speed_mph\n1/1/2024,00:00:00,1,1\n")
            .unwrap_err();
        match err {
            Error::InputFormat(message) => assert!(message.contains("Latitude")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn header_names_are_case_sensitive() {
        let err = read_str("local_date,Local_Time,Latitude,Longitude,Speed_mph\n").unwrap_err();
        assert!(matches!(err, Error::InputFormat(_)));
    }

    #[test]
    fn unparsable_number_names_line() {
        let err = read_str(&format!(
            "{HEADER}1/1/2024,00:00:00,1,1,1\n1/1/2024,00:00:01,abc,1,1\n"
        ))
        .unwrap_err();
        match err {
            Error::InputFormat(message) => assert!(message.contains("line 3"), "{message}"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unparsable_date() {
        let err = read_str(&format!("{HEADER}yesterday,00:00:00,1,1,1\n")).unwrap_err();
        assert!(matches!(err, Error::InputFormat(_)));
    }

    #[test]
    fn out_of_range_latitude() {
        let err = read_str(&format!("{HEADER}1/1/2024,00:00:00,91,1,1\n")).unwrap_err();
        assert!(matches!(err, Error::InputFormat(_)));
    }

    #[test]
    fn missing_file() {
        let err = load(Path::new("definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, Error::InputFormat(_)));
    }

    #[test]
    fn date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(parse_date("03/05/2024").unwrap(), expected);
        assert_eq!(parse_date("3/5/2024").unwrap(), expected);
        assert_eq!(parse_date("03/05/24").unwrap(), expected);
        assert_eq!(parse_date("2024-03-05").unwrap(), expected);
        assert!(parse_date("13/05/2024").is_err());
    }

    #[test]
    fn time_formats() {
        let expected = NaiveTime::from_hms_opt(14, 30, 0).unwrap();
        assert_eq!(parse_time("14:30:00").unwrap(), expected);
        assert_eq!(parse_time("14:30").unwrap(), expected);
        assert_eq!(parse_time("02:30:00 PM").unwrap(), expected);
        assert_eq!(
            parse_time("14:30:00.250").unwrap(),
            NaiveTime::from_hms_milli_opt(14, 30, 0, 250).unwrap()
        );
        assert!(parse_time("25:00:00").is_err());
        assert!(parse_time("23:59:60").is_err());
        assert!(parse_time("23:59:60.5").is_err());
        assert!(parse_time("11:59:60 PM").is_err());
    }
}
