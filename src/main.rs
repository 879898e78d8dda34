mod args;
mod sim;

use clap::Parser;
use log::{info, warn, LevelFilter};
use snafu::ErrorCompat;

use crate::args::Args;

// RUST_LOG is honored when set. Otherwise the logger accepts everything and the
// effective level is only controlled by the global maximum, so that the
// `logging` command of the menu can raise it later.
fn init_logging(verbose: bool) {
    if std::env::var_os("RUST_LOG").is_some() {
        let mut builder = env_logger::Builder::from_default_env();
        if verbose {
            builder.filter_level(LevelFilter::Debug);
        }
        builder.init();
    } else {
        env_logger::Builder::new()
            .filter_level(LevelFilter::Trace)
            .init();
        log::set_max_level(if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        });
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);
    info!("args: {:?}", args);

    let mut res = sim::run_simulation(&args).map(|_| ());
    if res.is_ok() && args.interactive {
        let stdin = std::io::stdin();
        res = sim::terminal::run_menu(stdin.lock(), std::io::stdout());
    }

    if let Err(e) = res {
        warn!("Error occurred {:?}", e);
        eprintln!("An error occurred: {}", e);
        for cause in ErrorCompat::iter_chain(&e).skip(1) {
            eprintln!("  caused by: {}", cause);
        }
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            eprintln!("trace: {}", bt);
        }
        std::process::exit(1);
    }
}
