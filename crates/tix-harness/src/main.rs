#![forbid(unsafe_code)]

//! `tix-harness` binary.
//!
//! ```sh
//! tix-harness render page.json > page.html
//! TIX_HARNESS_SEARCH=jazz tix-harness render page.json
//! tix-harness normalize tickets.json
//! ```

use std::process;

use tix_harness::cli::{Opts, run};

fn main() {
    tix_core::logging::init_subscriber("warn");

    let opts = match Opts::parse() {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("tix-harness: {err}");
            eprintln!("Run with --help for usage information.");
            process::exit(1);
        }
    };

    match run(&opts) {
        Ok(out) => print!("{out}"),
        Err(err) => {
            eprintln!("tix-harness: {err}");
            if err.is_usage() {
                eprintln!("Run with --help for usage information.");
            }
            process::exit(1);
        }
    }
}
