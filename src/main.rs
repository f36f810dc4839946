use std::{fs, io};

use clap::Parser;
use krait::interpreter::context::StreamContext;

/// krait is an interpreter for Krait, a small indentation-structured
/// scripting language with classes and dynamic typing.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells krait to read a file instead of an inline script.
    #[arg(short, long)]
    file: bool,

    contents: String,
}

fn main() {
    let args = Args::parse();

    let script = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        })
    } else {
        args.contents
    };

    let mut context = StreamContext::new(io::stdout());
    if let Err(e) = krait::run_program(&script, &mut context) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
