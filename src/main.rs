mod cli;
mod report;
mod scenario;

use airdeck::{approximate_with, DeckPayload};
use report::render_summary;
use scenario::demonstration_payload;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let arguments = match cli::parse(std::env::args().skip(1)) {
        Ok(arguments) => arguments,
        Err(error) => {
            eprintln!("{}", cli::USAGE);
            return Err(error.into());
        }
    };

    // Without a payload file the built-in deck is analysed.
    let payload = match &arguments.payload {
        Some(path) => DeckPayload::from_path(path)?,
        None => demonstration_payload(),
    };

    let record = approximate_with(&payload, &arguments.approximation_options());
    for warning in &record.diagnostics.warnings {
        log::warn!("{warning}");
    }

    if arguments.json {
        println!("{}", record.to_json_pretty()?);
    } else {
        println!("{}", render_summary(&record));
    }

    Ok(())
}
