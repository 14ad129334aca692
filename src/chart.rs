use serde::Serialize;

use super::aggregate::AggregatedRow;
use super::metric::{Metric, Rgb, ValueKind};


static GRID_COLOR: &'static str = "#DDDDDD";
static PLOT_BACKGROUND: &'static str = "#FFFFFF";


#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
	pub size: u32,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub color: Option<Rgb>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub family: Option<&'static str>,
}

impl Font {
	/// Monospace tick font shared by every chart.
	pub fn tick() -> Self {
		Self{
			size: 12,
			color: Some(Rgb(30, 30, 30)),
			family: Some("Courier New, monospace"),
		}
	}
}


#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerLine {
	pub color: Rgb,
	pub width: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
	pub color: Rgb,
	pub line: MarkerLine,
}


/// One bar series of a grouped bar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarTrace {
	#[serde(rename = "type")]
	pub kind: &'static str,
	pub name: Metric,
	pub x: Vec<String>,
	pub y: Vec<i64>,
	pub marker: Marker,
}


#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
	pub x: f64,
	pub y: f64,
	pub font: Font,
	pub bgcolor: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XAxis {
	pub title: String,
	pub tickangle: i32,
	#[serde(rename = "type")]
	pub kind: &'static str,
	pub showgrid: bool,
	pub gridcolor: &'static str,
	pub tickfont: Font,
	pub tickvals: Vec<String>,
	pub ticktext: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YAxis {
	pub title: String,
	pub showgrid: bool,
	pub gridcolor: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
	pub barmode: &'static str,
	pub legend: Legend,
	pub plot_bgcolor: &'static str,
	pub font: Font,
	pub xaxis: XAxis,
	pub yaxis: YAxis,
}


/// A Plotly figure: bar traces plus layout. Serializes to the JSON object
/// plotly.js accepts in `Plotly.newPlot(el, fig.data, fig.layout)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
	pub data: Vec<BarTrace>,
	pub layout: Layout,
}

impl ChartSpec {
	pub fn trace(&self, metric: Metric) -> Option<&BarTrace> {
		self.data.iter().find(|t| t.name == metric)
	}

	pub fn to_json(&self) -> serde_json::Result<String> {
		serde_json::to_string(self)
	}
}


/// Build a grouped bar chart with one series per metric, reading the
/// `kind` flavour of each metric from `rows`. Categories follow the row
/// order, which the aggregator emits in ascending date order.
pub fn barchart(rows: &[AggregatedRow], metrics: &[Metric], kind: ValueKind, axis_title: &str) -> ChartSpec {
	let dates: Vec<String> = rows.iter().map(|r| r.date.to_string()).collect();
	let labels: Vec<String> = rows.iter().map(|r| r.date_label.clone()).collect();

	let data = metrics.iter().map(|m| BarTrace{
		kind: "bar",
		name: *m,
		x: dates.clone(),
		y: rows.iter().map(|r| r.value(kind, *m)).collect(),
		marker: Marker{
			color: m.color(),
			line: MarkerLine{
				color: Rgb(0, 0, 0),
				width: 1,
			},
		},
	}).collect();

	ChartSpec{
		data,
		layout: Layout{
			barmode: "group",
			legend: Legend{
				x: 0.05,
				y: 0.95,
				font: Font{size: 15, color: None, family: None},
				bgcolor: "rgba(240,240,240,0.5)",
			},
			plot_bgcolor: PLOT_BACKGROUND,
			font: Font::tick(),
			xaxis: XAxis{
				title: String::new(),
				tickangle: -90,
				kind: "category",
				showgrid: true,
				gridcolor: GRID_COLOR,
				tickfont: Font::tick(),
				tickvals: dates,
				ticktext: labels,
			},
			yaxis: YAxis{
				title: axis_title.into(),
				showgrid: true,
				gridcolor: GRID_COLOR,
			},
		},
	}
}


#[cfg(test)]
mod tests {
	use super::*;

	use chrono::NaiveDate;
	use enum_map::EnumMap;

	use crate::aggregate::date_label;

	fn rows() -> Vec<AggregatedRow> {
		(1..=3).map(|day| {
			let date = NaiveDate::from_ymd_opt(2020, 2, day).unwrap();
			let mut cum: EnumMap<Metric, u64> = EnumMap::default();
			let mut new: EnumMap<Metric, i64> = EnumMap::default();
			cum[Metric::Confirmed] = (day * 10) as u64;
			cum[Metric::Deaths] = day as u64;
			new[Metric::Confirmed] = if day == 1 { 0 } else { 10 };
			new[Metric::Deaths] = if day == 1 { 0 } else { 1 };
			AggregatedRow{date, date_label: date_label(date), cum, new}
		}).collect()
	}

	#[test]
	fn one_trace_per_metric_with_fixed_colors() {
		let chart = barchart(&rows(), &[Metric::Deaths, Metric::Confirmed], ValueKind::Cum, "Casos acumulados");
		assert_eq!(chart.data.len(), 2);
		assert_eq!(chart.data[0].name, Metric::Deaths);
		assert_eq!(chart.data[0].marker.color, Rgb(200, 30, 30));
		assert_eq!(chart.trace(Metric::Confirmed).unwrap().y, vec![10, 20, 30]);
		assert!(chart.trace(Metric::Recovered).is_none());
	}

	#[test]
	fn new_kind_reads_daily_increase() {
		let chart = barchart(&rows(), &[Metric::Confirmed], ValueKind::New, "Nuevos casos por día");
		assert_eq!(chart.data[0].y, vec![0, 10, 10]);
		assert_eq!(chart.layout.yaxis.title, "Nuevos casos por día");
	}

	#[test]
	fn category_axis_follows_row_order() {
		let chart = barchart(&rows(), &[Metric::Confirmed], ValueKind::Cum, "");
		assert_eq!(chart.layout.xaxis.kind, "category");
		assert_eq!(chart.layout.xaxis.tickvals, vec!["2020-02-01", "2020-02-02", "2020-02-03"]);
		assert_eq!(chart.layout.xaxis.ticktext[2], "Feb 03, 2020");
		assert_eq!(chart.layout.barmode, "group");
	}

	#[test]
	fn empty_inputs_give_valid_chart() {
		let chart = barchart(&rows(), &[], ValueKind::New, "");
		assert!(chart.data.is_empty());
		assert_eq!(chart.layout.xaxis.tickvals.len(), 3);

		let chart = barchart(&[], &[Metric::Confirmed], ValueKind::Cum, "");
		assert_eq!(chart.data.len(), 1);
		assert!(chart.data[0].y.is_empty());
		assert!(chart.layout.xaxis.tickvals.is_empty());
	}

	#[test]
	fn serializes_to_plotly_json() {
		let chart = barchart(&rows(), &[Metric::Confirmed], ValueKind::Cum, "Casos acumulados");
		let v: serde_json::Value = serde_json::from_str(&chart.to_json().unwrap()).unwrap();
		assert_eq!(v["data"][0]["type"], "bar");
		assert_eq!(v["data"][0]["name"], "Confirmed");
		assert_eq!(v["data"][0]["marker"]["color"], "rgb(100,140,240)");
		assert_eq!(v["data"][0]["marker"]["line"]["width"], 1);
		assert_eq!(v["layout"]["xaxis"]["type"], "category");
		assert_eq!(v["layout"]["xaxis"]["tickangle"], -90);
		assert_eq!(v["layout"]["font"]["family"], "Courier New, monospace");
		assert!(v["layout"]["legend"]["font"].get("family").is_none());
	}
}
