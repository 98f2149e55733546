//! `brack` command-line entry point.

use std::process;

use brackc::{init_tracing, parse_args, run, Command, EXIT_USAGE, USAGE};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match parse_args(&args) {
        Ok(Command::Help) => println!("{USAGE}"),
        Ok(Command::Parse(options)) => process::exit(run(&options)),
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!();
            eprintln!("{USAGE}");
            process::exit(EXIT_USAGE);
        }
    }
}
