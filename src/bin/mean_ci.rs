use std::process;

use mean_ci::config::{self, Args};
use mean_ci::error::{log_error, Result};
use mean_ci::report::{self, CliReport};
use mean_ci::{analyze, dataset};

fn run(args: &Args) -> Result<()> {
    let population = dataset::load(&args.input, &args.load_options)?;
    let analysis = analyze(&population, &args.config)?;

    if !args.quiet {
        CliReport::for_stdout().print(&analysis);
    }
    if let Some(dir) = &args.output_directory {
        report::save(&analysis, dir)?;
    }

    Ok(())
}

fn main() {
    let result = config::parse_args().and_then(|args| run(&args));

    if let Err(e) = result {
        log_error(&e);
        process::exit(1);
    }
}
