use std::io;

use smartstring::alias::{String as SmartString};

use chrono::naive::NaiveDate;

use log::debug;

use super::config::SourceConfig;
use super::error::Error;
use super::ioutil::open_source;
use super::metric::Metric;
use super::timeseries::MAX_COUNT;


/// Province value used for rows without a province/state, and as the
/// selector value meaning "sum over every province of the country".
pub static ALL_PROVINCES: &'static str = "<all>";

static PROVINCE_COLUMN: &'static str = "Province/State";
static COUNTRY_COLUMN: &'static str = "Country/Region";
static LAT_COLUMN: &'static str = "Lat";
static LONG_COLUMN: &'static str = "Long";


/// One (location, date) cell of a wide JHU time-series file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSeriesRow {
	pub country: SmartString,
	pub province: SmartString,
	pub date: NaiveDate,
	pub value: u64,
}


/// Parse a JHU date header such as `1/22/20`. Four-digit years are
/// accepted too.
pub fn parse_header_date(s: &str) -> Result<NaiveDate, Error> {
	let s = s.trim();
	let year = match s.rsplit('/').next() {
		Some(y) => y,
		None => return Err(Error::InvalidDate(s.into())),
	};
	let fmt = if year.len() == 4 {
		"%m/%d/%Y"
	} else {
		"%m/%d/%y"
	};
	NaiveDate::parse_from_str(s, fmt).map_err(|_| Error::InvalidDate(s.into()))
}

fn find_column(headers: &csv::StringRecord, name: &'static str) -> Result<usize, Error> {
	headers.iter().position(|h| h.trim() == name).ok_or(Error::MissingColumn(name))
}

fn parse_count(cell: &str, country: &SmartString, province: &SmartString, date: NaiveDate) -> Result<u64, Error> {
	let cell = cell.trim();
	// older recovered files carry blank cells
	if cell.len() == 0 {
		return Ok(0)
	}
	match cell.parse::<u64>() {
		Ok(v) if v <= MAX_COUNT => Ok(v),
		_ => Err(Error::InvalidCount{
			country: country.clone(),
			province: province.clone(),
			date,
			value: cell.into(),
		}),
	}
}


/// Read a wide time-series CSV (one row per location, one column per day)
/// and melt it into long form, one row per (location, date).
///
/// Rows are emitted date-major: all locations for the first date column,
/// then all locations for the second, and so on.
pub fn load_wide_csv<R: io::Read>(r: R) -> Result<Vec<TimeSeriesRow>, Error> {
	let mut r = csv::Reader::from_reader(r);
	let headers = r.headers()?.clone();
	let province_col = find_column(&headers, PROVINCE_COLUMN)?;
	let country_col = find_column(&headers, COUNTRY_COLUMN)?;
	let lat_col = find_column(&headers, LAT_COLUMN)?;
	let long_col = find_column(&headers, LONG_COLUMN)?;

	let mut date_cols = Vec::with_capacity(headers.len());
	for (i, h) in headers.iter().enumerate() {
		if i == province_col || i == country_col || i == lat_col || i == long_col {
			continue
		}
		date_cols.push((i, parse_header_date(h)?));
	}

	let mut locations: Vec<(SmartString, SmartString, Vec<u64>)> = Vec::new();
	for row in r.records() {
		let rec = row?;
		let country: SmartString = rec.get(country_col).unwrap_or("").trim().into();
		let province: SmartString = match rec.get(province_col).map(|s| s.trim()) {
			Some(s) if s.len() > 0 => s.into(),
			_ => ALL_PROVINCES.into(),
		};
		let mut values = Vec::with_capacity(date_cols.len());
		for (i, date) in date_cols.iter() {
			values.push(parse_count(rec.get(*i).unwrap_or(""), &country, &province, *date)?);
		}
		locations.push((country, province, values));
	}
	debug!("read {} locations x {} dates", locations.len(), date_cols.len());

	let mut result = Vec::with_capacity(locations.len() * date_cols.len());
	for (j, (_, date)) in date_cols.iter().enumerate() {
		for (country, province, values) in locations.iter() {
			result.push(TimeSeriesRow{
				country: country.clone(),
				province: province.clone(),
				date: *date,
				value: values[j],
			});
		}
	}
	Ok(result)
}

/// Fetch and melt the cumulative series for one metric.
pub fn load_metric(config: &SourceConfig, metric: Metric) -> Result<Vec<TimeSeriesRow>, Error> {
	let r = open_source(&config.location(metric))?;
	let rows = load_wide_csv(r)?;
	debug!("{}: {} rows", metric, rows.len());
	Ok(rows)
}
