use std::sync::Arc;

use smartstring::alias::{String as SmartString};

use serde::Serialize;

use log::trace;

use super::aggregate::aggregate;
use super::chart::{barchart, ChartSpec};
use super::jhu::ALL_PROVINCES;
use super::merge::UnifiedTable;
use super::metric::{Metric, ValueKind};


pub static PAGE_TITLE: &'static str = "Evolución histórica de COVID-19";
pub static NEW_CASES_TITLE: &'static str = "Nuevos casos por día";
pub static CUMULATIVE_TITLE: &'static str = "Casos acumulados";
pub static DEFAULT_COUNTRY: &'static str = "Mexico";

static PLOTLY_JS: &'static str = "https://cdn.plot.ly/plotly-2.27.0.min.js";


/// Widget state of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
	pub country: SmartString,
	pub province: SmartString,
	pub metrics: Vec<Metric>,
}

impl Default for Selection {
	fn default() -> Self {
		Self{
			country: DEFAULT_COUNTRY.into(),
			province: ALL_PROVINCES.into(),
			metrics: vec![Metric::Confirmed, Metric::Deaths],
		}
	}
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvinceOptions {
	pub options: Vec<SmartString>,
	pub default: SmartString,
}


/// The two panels shown for a selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figures {
	pub new_cases: ChartSpec,
	pub cumulative: ChartSpec,
}

impl Figures {
	pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
		if pretty {
			serde_json::to_string_pretty(self)
		} else {
			serde_json::to_string(self)
		}
	}

	/// Standalone page drawing both figures with plotly.js.
	pub fn to_html(&self, selection: &Selection) -> serde_json::Result<String> {
		let new_cases = serde_json::to_string(&self.new_cases)?;
		let cumulative = serde_json::to_string(&self.cumulative)?;
		let metrics: Vec<&str> = selection.metrics.iter().map(|m| m.name()).collect();
		Ok(format!(
			concat!(
				"<!DOCTYPE html>\n",
				"<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n",
				"<script src=\"{plotly}\"></script>\n",
				"</head>\n<body style=\"font-family: Roboto\">\n",
				"<h1>{title}</h1>\n",
				"<p>{country} / {province} / {metrics}</p>\n",
				"<div id=\"plot_new_metrics\"></div>\n",
				"<div id=\"plot_cum_metrics\"></div>\n",
				"<script>\n",
				"var cfg = {{displayModeBar: false}};\n",
				"var fnew = {new_cases};\n",
				"var fcum = {cumulative};\n",
				"Plotly.newPlot(\"plot_new_metrics\", fnew.data, fnew.layout, cfg);\n",
				"Plotly.newPlot(\"plot_cum_metrics\", fcum.data, fcum.layout, cfg);\n",
				"</script>\n</body>\n</html>\n",
			),
			title = PAGE_TITLE,
			plotly = PLOTLY_JS,
			country = html_escape(&selection.country),
			province = html_escape(&selection.province),
			metrics = metrics.join(", "),
			new_cases = script_safe(&new_cases),
			cumulative = script_safe(&cumulative),
		))
	}
}

fn html_escape(s: &str) -> String {
	let mut result = String::with_capacity(s.len());
	for c in s.chars() {
		match c {
			'<' => result.push_str("&lt;"),
			'>' => result.push_str("&gt;"),
			'&' => result.push_str("&amp;"),
			'"' => result.push_str("&quot;"),
			c => result.push(c),
		}
	}
	result
}

// JSON inside a <script> block must not contain a literal "</"
fn script_safe(json: &str) -> String {
	json.replace("</", "<\\/")
}


/// Request handler over the shared, read-only table. Every method is a
/// pure function of its arguments.
#[derive(Debug, Clone)]
pub struct Dashboard {
	table: Arc<UnifiedTable>,
}

impl Dashboard {
	pub fn new(table: Arc<UnifiedTable>) -> Self {
		Self{table}
	}

	pub fn table(&self) -> &UnifiedTable {
		&self.table
	}

	pub fn countries(&self) -> Vec<SmartString> {
		self.table.countries()
	}

	pub fn province_options(&self, country: &str) -> ProvinceOptions {
		let options = self.table.provinces(country);
		let default = options[0].clone();
		ProvinceOptions{options, default}
	}

	/// Switch the country and reset the province to its default option.
	pub fn select_country(&self, selection: &Selection, country: &str) -> Selection {
		Selection{
			country: country.into(),
			province: self.province_options(country).default,
			metrics: selection.metrics.clone(),
		}
	}

	pub fn new_cases(&self, selection: &Selection) -> ChartSpec {
		let rows = aggregate(&self.table, &selection.country, &selection.province);
		barchart(&rows, &selection.metrics, ValueKind::New, NEW_CASES_TITLE)
	}

	pub fn cumulative(&self, selection: &Selection) -> ChartSpec {
		let rows = aggregate(&self.table, &selection.country, &selection.province);
		barchart(&rows, &selection.metrics, ValueKind::Cum, CUMULATIVE_TITLE)
	}

	/// Both panels for `selection`, sharing one aggregation pass.
	pub fn render(&self, selection: &Selection) -> Figures {
		let rows = aggregate(&self.table, &selection.country, &selection.province);
		trace!("rendering {} dates for {:?}", rows.len(), selection);
		Figures{
			new_cases: barchart(&rows, &selection.metrics, ValueKind::New, NEW_CASES_TITLE),
			cumulative: barchart(&rows, &selection.metrics, ValueKind::Cum, CUMULATIVE_TITLE),
		}
	}
}
