use std::fmt;
use std::io;

use smartstring::alias::{String as SmartString};

use chrono::NaiveDate;


#[derive(Debug)]
pub enum Error {
	Request(reqwest::Error),
	Io(io::Error),
	Csv(csv::Error),
	MissingColumn(&'static str),
	InvalidDate(String),
	InvalidCount{
		country: SmartString,
		province: SmartString,
		date: NaiveDate,
		value: String,
	},
}

impl fmt::Display for Error {
	fn fmt<'f>(&self, f: &'f mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Request(e) => fmt::Display::fmt(e, f),
			Self::Io(e) => fmt::Display::fmt(e, f),
			Self::Csv(e) => fmt::Display::fmt(e, f),
			Self::MissingColumn(name) => write!(f, "missing column {:?}", name),
			Self::InvalidDate(header) => write!(f, "invalid date column header {:?}", header),
			Self::InvalidCount{country, province, date, value} => write!(
				f, "invalid count {:?} for {}/{} on {}", value, country, province, date,
			),
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Request(e) => Some(e),
			Self::Io(e) => Some(e),
			Self::Csv(e) => Some(e),
			_ => None,
		}
	}
}

impl From<reqwest::Error> for Error {
	fn from(err: reqwest::Error) -> Self {
		Self::Request(err)
	}
}

impl From<io::Error> for Error {
	fn from(err: io::Error) -> Self {
		Self::Io(err)
	}
}

impl From<csv::Error> for Error {
	fn from(err: csv::Error) -> Self {
		Self::Csv(err)
	}
}
