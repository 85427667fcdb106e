use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of SpacingRule::name() for every rule in habla-markdown's spacing module.
// Build scripts can't depend on the crate being built alongside them.
const SPACING_RULES: &[&str] = &[
    "blockquote",
    "fenced-code",
    "list-item",
    "horizontal-rule",
    "heading",
    "image",
];

fn input_arg(help: &'static str) -> Arg {
    Arg::new("input")
        .help(help)
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn output_arg() -> Arg {
    Arg::new("output")
        .long("output")
        .short('o')
        .help("Output file path (defaults to stdout)")
        .value_hint(ValueHint::FilePath)
}

fn from_arg() -> Arg {
    Arg::new("from")
        .long("from")
        .help("Source format (auto-detected from file extension if not specified)")
        .value_parser(["json", "markdown"])
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("habla")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Habla editor documents to Markdown for Nostr long-form articles")
        .arg_required_else_help(true)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Path to a habla.toml configuration file")
                .value_hint(ValueHint::FilePath),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert an editor document to another format (default command)")
                .arg(input_arg("Input file path"))
                .arg(from_arg())
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format")
                        .value_parser(["json", "markdown"]),
                )
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("spacing")
                .about("Insert missing blank lines after block constructs in Markdown")
                .arg(input_arg("Markdown file path"))
                .arg(
                    Arg::new("rule")
                        .long("rule")
                        .help("Apply only this rule")
                        .value_parser(clap::builder::PossibleValuesParser::new(SPACING_RULES)),
                )
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("article")
                .about("Print long-form article metadata and event tags as JSON")
                .arg(input_arg("Editor document or Markdown file path"))
                .arg(from_arg())
                .arg(Arg::new("image").long("image").value_hint(ValueHint::Url))
                .arg(Arg::new("summary").long("summary"))
                .arg(Arg::new("published-at").long("published-at")),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "habla", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "habla", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "habla", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
