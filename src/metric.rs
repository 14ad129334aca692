use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use enum_map::{Enum};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Enum)]
pub enum Metric {
	Confirmed,
	Deaths,
	Recovered,
}

impl Metric {
	pub const ALL: [Metric; 3] = [Metric::Confirmed, Metric::Deaths, Metric::Recovered];

	pub fn name(&self) -> &'static str {
		match self {
			Self::Confirmed => "Confirmed",
			Self::Deaths => "Deaths",
			Self::Recovered => "Recovered",
		}
	}

	pub fn color(&self) -> Rgb {
		match self {
			Self::Confirmed => Rgb(100, 140, 240),
			Self::Deaths => Rgb(200, 30, 30),
			Self::Recovered => Rgb(30, 200, 30),
		}
	}
}

impl fmt::Display for Metric {
	fn fmt<'f>(&self, f: &'f mut fmt::Formatter) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl Serialize for Metric {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(self.name())
	}
}


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMetricError(pub String);

impl fmt::Display for ParseMetricError {
	fn fmt<'f>(&self, f: &'f mut fmt::Formatter) -> fmt::Result {
		write!(f, "unknown metric {:?}, expected one of Confirmed, Deaths, Recovered", self.0)
	}
}

impl std::error::Error for ParseMetricError {}

impl FromStr for Metric {
	type Err = ParseMetricError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let s = s.trim();
		for m in Metric::ALL.iter() {
			if m.name().eq_ignore_ascii_case(s) {
				return Ok(*m)
			}
		}
		Err(ParseMetricError(s.into()))
	}
}


/// Which flavour of a metric a chart reads: the running total or the
/// day-over-day increase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
	Cum,
	New,
}

impl ValueKind {
	pub fn prefix(&self) -> &'static str {
		match self {
			Self::Cum => "Cum",
			Self::New => "New",
		}
	}

	/// Column name in the tabular model, e.g. `CumConfirmed`.
	pub fn column_name(&self, metric: Metric) -> String {
		format!("{}{}", self.prefix(), metric.name())
	}
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
	fn fmt<'f>(&self, f: &'f mut fmt::Formatter) -> fmt::Result {
		write!(f, "rgb({},{},{})", self.0, self.1, self.2)
	}
}

impl Serialize for Rgb {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}
