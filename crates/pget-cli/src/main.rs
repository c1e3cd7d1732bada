use clap::Parser;
use pget_core::logging;

mod cli;

/// Exit codes: 0 = success, 2 = downloaded but validation failed,
/// 3 = fetch error. Argument errors are clap's.
fn main() {
    // Initialize logging as early as possible; logs must stay off stdout
    // because the download may be streaming there.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    let args = cli::Cli::parse();
    let code = match cli::run(args) {
        Ok(true) => 0,
        Ok(false) => 2,
        Err(err) => {
            eprintln!("pget error: {:#}", err);
            3
        }
    };
    std::process::exit(code);
}
