//! This is a basic example of a classic `getopt` loop with usage printing.
use posix_getopt::{Parser, END_OF_OPTIONS};
use tracing_subscriber::{fmt, EnvFilter};

const USAGE: &str = "basic [-v] [-E ENGINE] [-C COUNT] [FILE]...";

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_target(false).compact().init();

    let args: Vec<String> = std::env::args().collect();
    let mut parser = Parser::new();
    let mut verbose = false;
    let mut engine = None;
    let mut count = 1u32;

    loop {
        let c = parser.getopt(&args, "vE:C:");
        if c == END_OF_OPTIONS {
            break;
        }
        match u8::try_from(c).map(char::from) {
            Ok('v') => verbose = true,
            Ok('E') => engine = parser.optarg(),
            Ok('C') => match parser.optarg().map(str::parse) {
                Some(Ok(value)) => count = value,
                _ => {
                    eprintln!("error: -C expects a number");
                    std::process::exit(1);
                }
            },
            _ => {
                eprintln!("usage: {}", USAGE);
                std::process::exit(1);
            }
        }
    }

    println!("verbose: {}", verbose);
    println!("engine: {}", engine.unwrap_or("<none>"));
    println!("count: {}", count);
    println!("files: {:?}", &args[parser.optind()..]);
}
