//! Convert game data files between their binary form and JSON.
//!
//! `pack` reads JSON from stdin and writes the binary file to stdout,
//! `unpack` does the reverse. Set `RUST_LOG=c2format=debug` to trace the
//! conversion on stderr.

use c2format::{
    format::{DataType, Options},
    Value,
};
use std::error;
use std::io::{self, Read, Write};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 || args.len() > 5 {
        eprintln!(
            "Usage: {} <pack|unpack> <type> [json|obj] [charset] < input > output",
            args[0]
        );
        std::process::exit(1);
    }

    let direction = &args[1];
    let options = Options::parse(
        &args[2],
        args.get(3).map(String::as_str),
        args.get(4).map(String::as_str),
    )?;

    let mut input = Vec::new();
    io::stdin().lock().read_to_end(&mut input)?;

    let mut stdout = io::stdout().lock();
    match direction.as_str() {
        "pack" => {
            // Stdin is always JSON; the data type only says how `pack` sees it
            let value = if options.data_type == DataType::Obj {
                serde_json::from_slice::<Value>(&input)?
            } else {
                Value::Text(String::from_utf8(input)?)
            };
            let data = options.pack(&value)?;
            stdout.write_all(&data)?;
        }
        "unpack" => {
            let value = options.unpack(&input)?;
            match value {
                Value::Text(json) if options.data_type != DataType::Obj => {
                    writeln!(stdout, "{}", json)?
                }
                value => {
                    serde_json::to_writer_pretty(&mut stdout, &value)?;
                    writeln!(stdout)?;
                }
            }
        }
        _ => {
            eprintln!(
                "Error: direction must be 'pack' or 'unpack', got '{}'",
                direction
            );
            std::process::exit(1);
        }
    }

    Ok(())
}
