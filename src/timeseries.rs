use std::collections::BTreeMap;
use std::convert::TryFrom;

use chrono::NaiveDate;

use enum_map::EnumMap;

use log::warn;

use super::metric::Metric;


/// Largest count the pipeline carries. Loaded cells above this are rejected
/// and per-date totals saturate here, so every count converts to `i64`
/// exactly.
pub const MAX_COUNT: u64 = i64::MAX as u64;


/// Per-date cumulative counts, summed over every location submitted for the
/// same date. Iteration is in ascending date order.
#[derive(Debug, Clone, Default)]
pub struct DailyTotals {
	by_date: BTreeMap<NaiveDate, EnumMap<Metric, u64>>,
}

impl DailyTotals {
	pub fn new() -> Self {
		Self::default()
	}

	/// Add `values` to the totals of `date`. A total that would exceed
	/// `MAX_COUNT` saturates at `MAX_COUNT` and logs a warning.
	pub fn add(&mut self, date: NaiveDate, values: &EnumMap<Metric, u64>) {
		let slot = self.by_date.entry(date).or_insert_with(EnumMap::default);
		for m in Metric::ALL.iter() {
			slot[*m] = match slot[*m].checked_add(values[*m]).filter(|v| *v <= MAX_COUNT) {
				Some(v) => v,
				None => {
					warn!("{} total on {} exceeds {}, saturating", m, date, MAX_COUNT);
					MAX_COUNT
				},
			};
		}
	}

	#[inline(always)]
	pub fn len(&self) -> usize {
		self.by_date.len()
	}

	#[inline(always)]
	pub fn is_empty(&self) -> bool {
		self.by_date.is_empty()
	}

	pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
		self.by_date.keys().copied()
	}

	pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &EnumMap<Metric, u64>)> + '_ {
		self.by_date.iter().map(|(d, v)| (*d, v))
	}

	pub fn series(&self, metric: Metric) -> Vec<u64> {
		self.by_date.values().map(|v| v[metric]).collect()
	}
}


/// Convert a count to `i64`. Exact for every value up to `MAX_COUNT`,
/// which loaded cells and `DailyTotals` never exceed.
pub fn signed(v: u64) -> i64 {
	i64::try_from(v.min(MAX_COUNT)).unwrap_or(i64::MAX)
}

/// First difference of a cumulative series. The first element has no
/// predecessor and is defined as zero. Downward revisions in the source
/// yield negative values, which are passed through unchanged. Inputs are
/// expected to be at most `MAX_COUNT`.
pub fn diff(cum: &[u64]) -> Vec<i64> {
	let mut result = Vec::with_capacity(cum.len());
	let mut prev: Option<i64> = None;
	for v in cum.iter() {
		let v = signed(*v);
		result.push(match prev {
			Some(p) => v - p,
			None => 0,
		});
		prev = Some(v);
	}
	result
}
