use std::env;
use std::path::Path;

use enum_map::EnumMap;

use super::metric::Metric;


pub static DEFAULT_SOURCE: &'static str = "https://raw.githubusercontent.com/CSSEGISandData/COVID-19/master/csse_covid_19_data/csse_covid_19_time_series";


fn default_file_name(metric: Metric) -> &'static str {
	match metric {
		Metric::Confirmed => "time_series_covid19_confirmed_global.csv",
		Metric::Deaths => "time_series_covid19_deaths_global.csv",
		Metric::Recovered => "time_series_covid19_recovered_global.csv",
	}
}

fn file_name_var(metric: Metric) -> &'static str {
	match metric {
		Metric::Confirmed => "COVID_CONFIRMED_FILE",
		Metric::Deaths => "COVID_DEATHS_FILE",
		Metric::Recovered => "COVID_RECOVERED_FILE",
	}
}

pub fn is_url(s: &str) -> bool {
	s.starts_with("http://") || s.starts_with("https://")
}


/// Where the three per-metric CSV files live.
#[derive(Debug, Clone)]
pub struct SourceConfig {
	base: String,
	files: EnumMap<Metric, String>,
}

impl SourceConfig {
	pub fn new<S: Into<String>>(base: S) -> Self {
		let mut files: EnumMap<Metric, String> = EnumMap::default();
		for m in Metric::ALL.iter() {
			files[*m] = default_file_name(*m).into();
		}
		Self{
			base: base.into(),
			files,
		}
	}

	/// Build from `COVID_DATA_SOURCE` and the `COVID_*_FILE` variables,
	/// falling back to the defaults for anything unset.
	pub fn from_env() -> Self {
		Self::from_lookup(|k| env::var(k).ok())
	}

	pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
		let mut result = Self::new(lookup("COVID_DATA_SOURCE").unwrap_or(DEFAULT_SOURCE.into()));
		for m in Metric::ALL.iter() {
			if let Some(name) = lookup(file_name_var(*m)) {
				result.files[*m] = name;
			}
		}
		result
	}

	pub fn with_file<S: Into<String>>(mut self, metric: Metric, name: S) -> Self {
		self.files[metric] = name.into();
		self
	}

	pub fn base(&self) -> &str {
		&self.base
	}

	pub fn location(&self, metric: Metric) -> String {
		let file = &self.files[metric];
		if is_url(&self.base) {
			format!("{}/{}", self.base.trim_end_matches('/'), file)
		} else {
			Path::new(&self.base).join(file).to_string_lossy().into_owned()
		}
	}
}

impl Default for SourceConfig {
	fn default() -> Self {
		Self::new(DEFAULT_SOURCE)
	}
}


#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn url_locations_are_slash_joined() {
		let cfg = SourceConfig::new("https://example.org/data/");
		assert_eq!(
			cfg.location(Metric::Deaths),
			"https://example.org/data/time_series_covid19_deaths_global.csv",
		);
	}

	#[test]
	fn lookup_without_variables_uses_defaults() {
		let cfg = SourceConfig::from_lookup(|_| None);
		assert_eq!(cfg.base(), DEFAULT_SOURCE);
		assert_eq!(
			cfg.location(Metric::Confirmed),
			format!("{}/time_series_covid19_confirmed_global.csv", DEFAULT_SOURCE),
		);
	}

	#[test]
	fn lookup_overrides_base_and_file_names() {
		let cfg = SourceConfig::from_lookup(|k| match k {
			"COVID_DATA_SOURCE" => Some("/data/jhu".into()),
			"COVID_DEATHS_FILE" => Some("deaths.csv.gz".into()),
			_ => None,
		});
		assert_eq!(cfg.base(), "/data/jhu");
		assert_eq!(
			Path::new(&cfg.location(Metric::Deaths)),
			Path::new("/data/jhu/deaths.csv.gz"),
		);
		assert_eq!(
			Path::new(&cfg.location(Metric::Recovered)),
			Path::new("/data/jhu/time_series_covid19_recovered_global.csv"),
		);
	}

	#[test]
	fn local_locations_are_path_joined() {
		let cfg = SourceConfig::new("/srv/covid").with_file(Metric::Recovered, "recovered.csv.gz");
		assert_eq!(
			Path::new(&cfg.location(Metric::Recovered)),
			Path::new("/srv/covid/recovered.csv.gz"),
		);
	}
}
