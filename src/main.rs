use folio::{PipelineBuilder, PipelineError};
use std::env;
use std::fs;
use std::io::{self, Write};

/// A simple CLI that turns a JSON document into XSL-FO markup.
fn main() -> Result<(), PipelineError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if !(4..=5).contains(&args.len()) {
        eprintln!("Generates XSL-FO markup from a JSON document and style sheet.");
        eprintln!();
        eprintln!(
            "Usage: {} <stylesheet.json> <fonts.json> <document.json> [output.fo]",
            args.first().map(String::as_str).unwrap_or("folio")
        );
        eprintln!();
        eprintln!("Without an output path the markup is written to stdout.");
        std::process::exit(1);
    }

    let stylesheet_path = &args[1];
    let fonts_path = &args[2];
    let document_path = &args[3];

    log::info!("Loading style sheet from {}", stylesheet_path);
    log::info!("Loading fonts from {}", fonts_path);
    let pipeline = PipelineBuilder::new()
        .with_stylesheet_file(stylesheet_path)?
        .with_fonts_file(fonts_path)?
        .with_pretty_print(true)
        .build()?;

    log::info!("Loading document from {}", document_path);
    let document_json = fs::read_to_string(document_path)?;
    let markup = pipeline.generate_markup_json(&document_json)?;

    match args.get(4) {
        Some(output_path) => {
            fs::write(output_path, markup)?;
            eprintln!("Successfully generated {}", output_path);
        }
        None => io::stdout().write_all(markup.as_bytes())?,
    }
    Ok(())
}
