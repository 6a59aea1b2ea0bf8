use anyhow::{anyhow, Result};
use hedera::prelude::*;
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::fs;
use std::io::Read;
use url::Url;

fn read_input(file: &str) -> Result<Vec<u8>> {
    if file == "-" {
        let mut content = Vec::new();
        std::io::stdin().read_to_end(&mut content)?;
        return Ok(content);
    }

    Ok(fs::read(file)?)
}

fn flag(name: &'static str, help: &'static str) -> clap::Arg {
    clap::Arg::new(name)
        .help(help)
        .long(name)
        .action(clap::ArgAction::SetTrue)
}

fn value(name: &'static str, help: &'static str) -> clap::Arg {
    clap::Arg::new(name)
        .help(help)
        .long(name)
        .action(clap::ArgAction::Set)
}

fn main() -> Result<()> {
    let matches = clap::Command::new("Hedera HTML parser")
        .version("0.1.0")
        .arg(
            clap::Arg::new("file")
                .help("The file to parse, or - to read from stdin")
                .required(true)
                .index(1),
        )
        .arg(value("encoding", "Declared encoding of the input"))
        .arg(value("output-encoding", "Encoding for output"))
        .arg(value("url", "Url the input was loaded from"))
        .arg(value("set-meta-encoding", "Declare this encoding in the document metadata"))
        .arg(flag("fragment", "Parse the input as a body fragment"))
        .arg(flag("strict", "Fail on malformed input and report all diagnostics"))
        .arg(flag("no-blanks", "Remove blank text nodes"))
        .arg(flag("no-implied", "Do not add implied html, head and body elements"))
        .arg(flag("no-default-dtd", "Do not add a default doctype"))
        .arg(flag("pedantic", "Report detailed diagnostics"))
        .arg(
            clap::Arg::new("verbose")
                .help("Enable debug logging")
                .short('v')
                .long("verbose")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    SimpleLogger::new().with_level(level).init()?;

    let file = matches
        .get_one::<String>("file")
        .ok_or_else(|| anyhow!("no input file given"))?;
    let content = read_input(file)?;

    let mut options = DEFAULT_PARSE_OPTIONS;
    if matches.get_flag("strict") {
        options.remove(ParseOptions::RECOVER | ParseOptions::NOERROR | ParseOptions::NOWARNING);
    }
    for (name, option) in [
        ("no-blanks", ParseOptions::NOBLANKS),
        ("no-implied", ParseOptions::NOIMPLIED),
        ("no-default-dtd", ParseOptions::NODEFDTD),
        ("pedantic", ParseOptions::PEDANTIC),
    ] {
        options.set(option, matches.get_flag(name));
    }

    let mut config = ParseConfig::new().with_options(options);
    if let Some(encoding) = matches.get_one::<String>("encoding") {
        config = config.with_input_encoding(encoding);
    }
    if let Some(encoding) = matches.get_one::<String>("output-encoding") {
        config = config.with_output_encoding(encoding);
    }
    if let Some(url) = matches.get_one::<String>("url") {
        config = config.with_url(Url::parse(url)?);
    }

    let mut failure = None;

    let (document, tree) = if matches.get_flag("fragment") {
        let mut document = DocumentBuilder::new_document(&config);
        let fragment = match document.parse_fragment(&content, config.url(), options) {
            Ok(fragment) => fragment,
            Err(err) => {
                let (error, fragment) = err.into_parts();
                failure = Some(error);
                fragment
            }
        };
        let tree = document.print_tree(fragment.node())?;
        (document, tree)
    } else {
        let mut document = match Document::parse(&content, &config) {
            Ok(document) => document,
            Err(err) => {
                let (error, document) = err.into_parts();
                failure = Some(error);
                document
            }
        };
        if let Some(encoding) = matches.get_one::<String>("set-meta-encoding") {
            document.set_meta_encoding(encoding)?;
        }
        let tree = document.to_string();
        (document, tree)
    };

    println!("Generated tree: \n\n{tree}");
    println!("Input encoding: {}", document.input_encoding());
    println!("Meta encoding: {}", document.meta_encoding());

    for e in document.diagnostics() {
        println!("Parse Error: {e}");
    }

    match failure {
        Some(error) => Err(error.into()),
        None => Ok(()),
    }
}
