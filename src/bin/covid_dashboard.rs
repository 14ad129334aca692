use std::io;
use std::io::Write;

use log::info;

use covid_dashboard::{Metric, Selection, ParseMetricError};


static USAGE: &'static str = "usage: covid_dashboard [--country C] [--province P] [--metrics M1,M2] [--html]";


fn parse_metrics(s: &str) -> Result<Vec<Metric>, ParseMetricError> {
	let mut result = Vec::new();
	for part in s.split(',') {
		if part.trim().len() == 0 {
			continue
		}
		let m = part.parse::<Metric>()?;
		if !result.contains(&m) {
			result.push(m);
		}
	}
	Ok(result)
}


fn main() -> Result<(), Box<dyn std::error::Error>> {
	covid_dashboard::init_logging();

	let argv: Vec<String> = std::env::args().collect();
	let mut country: Option<String> = None;
	let mut province: Option<String> = None;
	let mut metrics: Option<Vec<Metric>> = None;
	let mut html = false;
	let mut args = argv[1..].iter();
	while let Some(arg) = args.next() {
		match arg.as_str() {
			"--country" | "--province" | "--metrics" => {
				let v = args.next().ok_or_else(|| format!("{} needs a value\n{}", arg, USAGE))?;
				match arg.as_str() {
					"--country" => country = Some(v.clone()),
					"--province" => province = Some(v.clone()),
					_ => metrics = Some(parse_metrics(v)?),
				}
			},
			"--html" => html = true,
			"-h" | "--help" => {
				println!("{}", USAGE);
				return Ok(())
			},
			other => return Err(format!("unexpected argument {:?}\n{}", other, USAGE).into()),
		}
	}

	let dashboard = covid_dashboard::env_dashboard()?;

	let mut selection = Selection::default();
	if let Some(metrics) = metrics {
		selection.metrics = metrics;
	}
	if let Some(country) = country {
		selection = dashboard.select_country(&selection, &country);
	}
	if let Some(province) = province {
		selection.province = province.into();
	}
	info!("rendering {} / {}", selection.country, selection.province);

	let figures = dashboard.render(&selection);
	let out = if html {
		figures.to_html(&selection)?
	} else {
		figures.to_json(covid_dashboard::stdout_is_tty())?
	};
	let stdout = io::stdout();
	let mut stdout = stdout.lock();
	stdout.write_all(out.as_bytes())?;
	if !out.ends_with('\n') {
		stdout.write_all(b"\n")?;
	}
	Ok(())
}
