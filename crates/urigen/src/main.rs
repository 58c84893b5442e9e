mod cli;
mod config;
mod fatal;
mod logging;

use clap::Parser;
use cli::Args;
use fatal::FatalHandler;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();
    let logger = args.logger();
    let fatal = FatalHandler::new();

    let (logging, open_error) = match logger.build() {
        Ok(logging) => (logging, None),
        Err(e) => (logger.console_only(), Some(e)),
    };

    tracing::dispatcher::with_default(logging.dispatch(), || {
        if let Some(e) = open_error {
            return fatal.halt("FATAL ERROR", &format!("cannot open log file: {e}")).exit_code();
        }

        let code = match run(&args) {
            Ok(_) => ExitCode::SUCCESS,
            Err(e) => fatal.halt_on(&e).exit_code(),
        };

        if let Err(e) = logging.sync() {
            return fatal.halt("FATAL ERROR", &format!("cannot flush log file: {e}")).exit_code();
        }
        code
    })
}

fn run(args: &Args) -> uri_workload::Result<usize> {
    let profile = args.profile()?;
    let config = args.workload(&profile.workload)?;

    // Log the seed even when it was not given, so any trace can be regenerated.
    let seed = args.seed(&profile.workload).unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);

    tracing::info!(
        output = %config.output_file.display(),
        n_requests = config.n_requests,
        html_ratio = config.html_ratio,
        regex_ratio = config.regex_ratio,
        html_zalpha = config.html_skew.zalpha(),
        regex_zalpha = config.regex_skew.zalpha(),
        law = %config.skew_law,
        order = ?config.file_order,
        seed,
        "urigen starting"
    );

    uri_workload::generate(&config, &mut rng)
}
