//! faml CLI - render lightweight markup to HTML
//!
//! Usage: `faml [FILE|-] [--class-prefix PREFIX]`
//!
//! Set `RUST_LOG=faml=trace` to see the block parser's decisions.

use std::io::{self, Read, Write};

fn usage() -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        "usage: faml [FILE|-] [--class-prefix PREFIX]",
    )
}

fn main() -> io::Result<()> {
    env_logger::init();

    let mut options = faml::Options::default();
    let mut path = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--class-prefix" {
            options.fenced_class_prefix = args.next().ok_or_else(usage)?;
        } else if arg == "-h" || arg == "--help" {
            println!("usage: faml [FILE|-] [--class-prefix PREFIX]");
            return Ok(());
        } else if path.is_none() {
            path = Some(arg);
        } else {
            return Err(usage());
        }
    }

    // Read from the named file, or stdin for `-` / no argument
    let input = match path.as_deref() {
        Some(p) if p != "-" => std::fs::read_to_string(p)?,
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    log::debug!("read {} bytes of input", input.len());

    let html = faml::to_html_with_options(&input, &options);
    io::stdout().write_all(html.as_bytes())?;

    Ok(())
}
