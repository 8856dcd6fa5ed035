//! cif-extract entry point: prints the labeled fields found in a document.

use anyhow::Context;
use log::warn;
use netbake::{
    cli::{get_extract_args, ExtractArgs},
    extract::{extract_fields, read_document, FieldSet},
    logger::init_logger,
};

fn main() {
    let args = get_extract_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run(args: ExtractArgs) -> anyhow::Result<()> {
    let fields = match &args.patterns {
        Some(path) => FieldSet::from_file(path)
            .with_context(|| format!("loading patterns from '{}'", path.display()))?,
        None => FieldSet::cif(),
    };
    let compiled = fields.compile()?;

    let text = read_document(&args.input)
        .with_context(|| format!("reading '{}'", args.input.display()))?;

    let extraction = extract_fields(&text, &compiled);
    for label in extraction.missing() {
        warn!("'{label}' not found");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&extraction)?);
    } else {
        print!("{extraction}");
    }
    Ok(())
}
