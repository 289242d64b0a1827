use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use simple_logger::SimpleLogger;

use rapl_power::cli::Cli;
use rapl_power::display::print_watts;
use rapl_power::monitor::PowerMonitor;
use rapl_power::source::open_default_source;

fn main() -> ExitCode {
	SimpleLogger::new().env().init().ok();

	let cli = Cli::parse();

	let source = match open_default_source() {
		Ok(source) => source,
		Err(e) => {
			error!("{e}");
			return ExitCode::FAILURE;
		},
	};
	info!("sampling {}", source.description());

	let mut monitor = PowerMonitor::new(source, cli.interval());

	let outcome = if cli.continuous {
		monitor.run_continuous()
	} else {
		print_watts(monitor.measure_once())
	};

	match outcome {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			error!("failed to write reading: {e}");
			ExitCode::FAILURE
		},
	}
}
