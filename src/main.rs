//! Command-line front end: `icopack <input.png|input.ico|folder> <output.ico>`.

use std::env;
use std::path::Path;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("usage: icopack <input.png|input.ico|folder> <output.ico>");
        process::exit(2);
    }
    if let Err(err) = icopack::convert(Path::new(&args[1]), Path::new(&args[2])) {
        eprintln!("icopack: {}", err);
        process::exit(1);
    }
}
