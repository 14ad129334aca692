use chrono::NaiveDate;

use enum_map::EnumMap;

use log::trace;

use super::jhu::ALL_PROVINCES;
use super::merge::UnifiedTable;
use super::metric::{Metric, ValueKind};
use super::timeseries::{diff, signed, DailyTotals};


/// Date axis label format, e.g. `Jan 22, 2020`.
pub static DATE_LABEL_FORMAT: &'static str = "%b %d, %Y";


pub fn date_label(date: NaiveDate) -> String {
	date.format(DATE_LABEL_FORMAT).to_string()
}


/// One date of a country or province selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedRow {
	pub date: NaiveDate,
	pub date_label: String,
	pub cum: EnumMap<Metric, u64>,
	pub new: EnumMap<Metric, i64>,
}

impl AggregatedRow {
	pub fn value(&self, kind: ValueKind, metric: Metric) -> i64 {
		match kind {
			ValueKind::Cum => signed(self.cum[metric]),
			ValueKind::New => self.new[metric],
		}
	}
}


/// Reduce the table to one row per date for `country` and `province`,
/// in ascending date order, and derive the daily increases.
///
/// With the `<all>` province every province of the country is summed per
/// date. Otherwise only rows of exactly that province are used. Unknown
/// selections yield no rows.
pub fn aggregate(table: &UnifiedTable, country: &str, province: &str) -> Vec<AggregatedRow> {
	let mut totals = DailyTotals::new();
	let sum_all = province == ALL_PROVINCES;
	for row in table.rows_for_country(country) {
		if !sum_all && &*row.province != province {
			continue
		}
		totals.add(row.date, &row.cum);
	}
	trace!("aggregated {}/{} to {} dates", country, province, totals.len());

	let mut new: EnumMap<Metric, Vec<i64>> = EnumMap::default();
	for m in Metric::ALL.iter() {
		new[*m] = diff(&totals.series(*m));
	}

	totals.iter().enumerate().map(|(i, (date, cum))| {
		let mut row_new: EnumMap<Metric, i64> = EnumMap::default();
		for m in Metric::ALL.iter() {
			row_new[*m] = new[*m][i];
		}
		AggregatedRow{
			date,
			date_label: date_label(date),
			cum: cum.clone(),
			new: row_new,
		}
	}).collect()
}
