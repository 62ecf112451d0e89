//! This example demonstrates `getopt_long` with flag entries and optional
//! arguments.
use std::cell::Cell;

use posix_getopt::{Error, Flag, HasArg, LongOption, Opt, Parser};
use tracing_subscriber::{fmt, EnvFilter};

fn execute() -> Result<(), Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_target(false).compact().init();

    let verbose = Cell::new(0);
    let long_options = [
        LongOption::flag("verbose", HasArg::No, &verbose, 1),
        LongOption::flag("brief", HasArg::No, &verbose, 0),
        LongOption::new("host", HasArg::Required, 'h' as i32),
        LongOption::new("port", HasArg::Required, 'p' as i32),
        LongOption::new("color", HasArg::Optional, 'c' as i32),
    ];

    let args: Vec<String> = std::env::args().collect();
    let mut parser = Parser::new();
    parser.mute_errors();
    parser.set_flag(Flag::AllowAbbreviations, true);
    let mut host = "localhost";
    let mut port = "11210";
    let mut color = None;

    while let Some(opt) = parser.next_long(&args, "h:p:", &long_options)? {
        match opt {
            Opt::Flag { .. } => {}
            opt if opt.is('h') => host = parser.optarg().unwrap_or(host),
            opt if opt.is('p') => port = parser.optarg().unwrap_or(port),
            opt if opt.is('c') => color = Some(parser.optarg().unwrap_or("auto")),
            _ => unreachable!(),
        }
    }

    println!("connecting to {}:{}", host, port);
    println!("verbose: {}", verbose.get() != 0);
    if let Some(color) = color {
        println!("color: {}", color);
    }
    println!("operands: {:?}", &args[parser.optind()..]);

    Ok(())
}

fn main() {
    if let Err(err) = execute() {
        eprintln!("error: {}", err);
        eprintln!("  option: {}", err.option());
        std::process::exit(1);
    }
}
