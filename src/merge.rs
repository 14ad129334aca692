use std::collections::{HashMap, HashSet};

use smartstring::alias::{String as SmartString};

use chrono::NaiveDate;

use enum_map::EnumMap;

use log::{info, warn};

use super::config::SourceConfig;
use super::error::Error;
use super::jhu::{load_metric, TimeSeriesRow, ALL_PROVINCES};
use super::metric::Metric;


pub type RowKey = (SmartString, SmartString, NaiveDate);


/// One location and date with the cumulative count of every metric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnifiedRow {
	pub country: SmartString,
	pub province: SmartString,
	pub date: NaiveDate,
	pub cum: EnumMap<Metric, u64>,
}

impl UnifiedRow {
	pub fn key(&self) -> RowKey {
		(self.country.clone(), self.province.clone(), self.date)
	}
}


fn row_key(row: &TimeSeriesRow) -> RowKey {
	(row.country.clone(), row.province.clone(), row.date)
}

fn index_unique(metric: Metric, rows: &[TimeSeriesRow]) -> HashMap<RowKey, u64> {
	let mut result = HashMap::with_capacity(rows.len());
	let mut ndups = 0usize;
	for row in rows {
		let k = row_key(row);
		if result.contains_key(&k) {
			ndups += 1;
			continue
		}
		result.insert(k, row.value);
	}
	if ndups > 0 {
		warn!("{}: ignored {} duplicate location/date rows", metric, ndups);
	}
	result
}

/// Inner join of `rows` with one more metric on (country, province, date).
/// Rows of `rows` whose key is absent from `other` are dropped; the order of
/// `rows` is kept.
fn join_metric(rows: Vec<UnifiedRow>, metric: Metric, other: &[TimeSeriesRow]) -> Vec<UnifiedRow> {
	let index = index_unique(metric, other);
	let nin = rows.len();
	let mut result = Vec::with_capacity(nin);
	for mut row in rows {
		match index.get(&row.key()) {
			Some(v) => {
				row.cum[metric] = *v;
				result.push(row);
			},
			None => continue,
		}
	}
	if result.len() < nin {
		warn!("{}: inner join dropped {} of {} rows", metric, nin - result.len(), nin);
	}
	result
}

/// Merge the per-metric cumulative loads into one table keyed by
/// (country, province, date). Keys missing from any metric are dropped.
pub fn merge(tables: &EnumMap<Metric, Vec<TimeSeriesRow>>) -> UnifiedTable {
	let left = Metric::ALL[0];
	let mut seen = HashSet::with_capacity(tables[left].len());
	let mut rows = Vec::with_capacity(tables[left].len());
	let mut ndups = 0usize;
	for row in tables[left].iter() {
		if !seen.insert(row_key(row)) {
			ndups += 1;
			continue
		}
		let mut cum: EnumMap<Metric, u64> = EnumMap::default();
		cum[left] = row.value;
		rows.push(UnifiedRow{
			country: row.country.clone(),
			province: row.province.clone(),
			date: row.date,
			cum,
		});
	}
	if ndups > 0 {
		warn!("{}: ignored {} duplicate location/date rows", left, ndups);
	}

	for metric in Metric::ALL[1..].iter() {
		rows = join_metric(rows, *metric, &tables[*metric]);
	}
	UnifiedTable{rows}
}


/// The merged cumulative table. Built once at startup and only read after
/// that.
#[derive(Debug, Clone, Default)]
pub struct UnifiedTable {
	rows: Vec<UnifiedRow>,
}

impl UnifiedTable {
	pub fn from_rows(rows: Vec<UnifiedRow>) -> Self {
		Self{rows}
	}

	/// Download all metrics from `config` and merge them.
	pub fn load(config: &SourceConfig) -> Result<Self, Error> {
		let mut tables: EnumMap<Metric, Vec<TimeSeriesRow>> = EnumMap::default();
		for metric in Metric::ALL.iter() {
			tables[*metric] = load_metric(config, *metric)?;
		}
		let table = merge(&tables);
		info!("merged table has {} rows", table.len());
		Ok(table)
	}

	pub fn rows(&self) -> &[UnifiedRow] {
		&self.rows[..]
	}

	pub fn len(&self) -> usize {
		self.rows.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	pub fn rows_for_country<'x>(&'x self, country: &'x str) -> impl Iterator<Item = &'x UnifiedRow> + 'x {
		self.rows.iter().filter(move |r| &*r.country == country)
	}

	/// Sorted distinct countries.
	pub fn countries(&self) -> Vec<SmartString> {
		let mut result: Vec<SmartString> = self.rows.iter()
			.map(|r| &*r.country)
			.collect::<HashSet<&str>>()
			.into_iter()
			.map(SmartString::from)
			.collect();
		result.sort();
		result
	}

	/// Province options for `country`: the `<all>` sentinel first, then the
	/// distinct provinces of that country in sorted order.
	pub fn provinces(&self, country: &str) -> Vec<SmartString> {
		let mut result: Vec<SmartString> = self.rows_for_country(country)
			.map(|r| &*r.province)
			.filter(|p| *p != ALL_PROVINCES)
			.collect::<HashSet<&str>>()
			.into_iter()
			.map(SmartString::from)
			.collect();
		result.sort();
		result.insert(0, ALL_PROVINCES.into());
		result
	}
}


#[cfg(test)]
mod tests {
	use super::*;

	fn d(day: u32) -> NaiveDate {
		NaiveDate::from_ymd_opt(2020, 3, day).unwrap()
	}

	fn ts(country: &str, province: &str, day: u32, value: u64) -> TimeSeriesRow {
		TimeSeriesRow{
			country: country.into(),
			province: province.into(),
			date: d(day),
			value,
		}
	}

	fn tables() -> EnumMap<Metric, Vec<TimeSeriesRow>> {
		let mut t: EnumMap<Metric, Vec<TimeSeriesRow>> = EnumMap::default();
		t[Metric::Confirmed] = vec![
			ts("Chile", "<all>", 1, 10),
			ts("Australia", "Victoria", 1, 3),
			ts("Australia", "Queensland", 1, 4),
		];
		t[Metric::Deaths] = vec![
			ts("Australia", "Queensland", 1, 0),
			ts("Chile", "<all>", 1, 1),
			ts("Australia", "Victoria", 1, 0),
		];
		t[Metric::Recovered] = vec![
			ts("Chile", "<all>", 1, 2),
			ts("Australia", "Queensland", 1, 1),
		];
		t
	}

	#[test]
	fn inner_join_drops_incomplete_keys_and_keeps_left_order() {
		let table = merge(&tables());
		assert_eq!(table.len(), 2);
		let rows = table.rows();
		assert_eq!(&*rows[0].country, "Chile");
		assert_eq!(rows[0].cum[Metric::Confirmed], 10);
		assert_eq!(rows[0].cum[Metric::Deaths], 1);
		assert_eq!(rows[0].cum[Metric::Recovered], 2);
		assert_eq!(&*rows[1].province, "Queensland");
		assert_eq!(rows[1].cum[Metric::Confirmed], 4);
	}

	#[test]
	fn duplicate_keys_keep_first_occurrence() {
		let mut t = tables();
		t[Metric::Confirmed].push(ts("Chile", "<all>", 1, 99));
		t[Metric::Deaths].push(ts("Chile", "<all>", 1, 99));
		let table = merge(&t);
		assert_eq!(table.len(), 2);
		assert_eq!(table.rows()[0].cum[Metric::Confirmed], 10);
		assert_eq!(table.rows()[0].cum[Metric::Deaths], 1);
	}

	#[test]
	fn merging_twice_is_identical() {
		let a = merge(&tables());
		let b = merge(&tables());
		assert_eq!(a.rows(), b.rows());
	}

	#[test]
	fn countries_are_sorted_and_distinct() {
		let table = merge(&tables());
		let countries = table.countries();
		assert_eq!(countries, vec![SmartString::from("Australia"), SmartString::from("Chile")]);
	}

	#[test]
	fn province_options_start_with_sentinel() {
		let table = merge(&tables());
		assert_eq!(table.provinces("Australia"), vec![SmartString::from("<all>"), SmartString::from("Queensland")]);
		assert_eq!(table.provinces("Chile"), vec![SmartString::from("<all>")]);
		assert_eq!(table.provinces("Atlantis"), vec![SmartString::from("<all>")]);
	}
}
