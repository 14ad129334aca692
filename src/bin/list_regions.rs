use std::io;
use std::io::Write;


fn main() -> Result<(), Box<dyn std::error::Error>> {
	covid_dashboard::init_logging();

	let argv: Vec<String> = std::env::args().collect();
	let dashboard = covid_dashboard::env_dashboard()?;

	let names = match argv.get(1) {
		Some(country) => dashboard.province_options(country).options,
		None => dashboard.countries(),
	};

	let stdout = io::stdout();
	let mut stdout = stdout.lock();
	for name in names {
		writeln!(stdout, "{}", name)?;
	}
	Ok(())
}
