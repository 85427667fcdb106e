// Command-line interface for habla
//
// This binary converts Habla editor documents into the Markdown published as the content
// of Nostr long-form articles, repairs block spacing in existing Markdown, and prints the
// article metadata (title, identifier, tags) derived from a document.
//
// The core capabilities live in the habla-markdown crate; this binary only reads files,
// layers configuration and reports errors.
//
// Converting:
//
// The source format is auto-detected from the file extension, while being overwrittable
// by an explicit --from flag. Only editor JSON can be parsed; Markdown is an export target.
// Usage:
//  habla <input> --to <format> [--from <format>] [--output <file>]          - Convert (default)
//  habla convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above (explicit)
//  habla spacing <input.md> [--rule <rule>] [--output <file>]              - Normalize block spacing
//  habla article <input> [--from <format>] [--image <url>] [--summary <text>]
//                                                                           - Article metadata as JSON
//  habla --list-formats                                                     - List available formats
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the format.
// Example:
//  habla draft.json --to markdown --extra-ensure-spacing false

use clap::{Arg, ArgAction, Command, ValueHint};
use habla_config::{HablaConfig, Loader};
use habla_markdown::article::{has_main_heading, ArticleDraft};
use habla_markdown::spacing::{apply_rule, SpacingRule};
use habla_markdown::{ensure_block_spacing, FormatRegistry};
use std::collections::HashMap;
use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing_subscriber::EnvFilter;

const SUBCOMMANDS: &[&str] = &["convert", "spacing", "article", "help"];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = if let Some(key) = arg.strip_prefix("--extra-") {
            Some(key)
        } else {
            arg.strip_prefix("--extras-")
        };

        if let Some(key) = key_opt {
            let has_value = args.get(i + 1).is_some_and(|next| !next.starts_with('-'));

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    let rule_names: Vec<&'static str> = SpacingRule::ALL.iter().map(|rule| rule.name()).collect();

    Command::new("habla")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Habla editor documents to Markdown for Nostr long-form articles")
        .long_about(
            "habla turns Habla editor documents (TipTap JSON) into the Markdown published\n\
            as the content of NIP-23 long-form articles.\n\n\
            Commands:\n  \
            - convert: Serialize an editor document (default command)\n  \
            - spacing: Insert missing blank lines after block constructs in Markdown\n  \
            - article: Print article metadata and event tags as JSON\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            habla draft.json --to markdown                   # Markdown to stdout\n  \
            habla draft.json --to markdown -o article.md     # Markdown to a file\n  \
            habla spacing article.md                         # Repair block spacing\n  \
            habla article draft.json                         # Title, identifier and tags",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a habla.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert an editor document to another format (default command)")
                .long_about(
                    "Serialize an editor document.\n\n\
                    Supported formats:\n  \
                    - json:     Editor JSON (.json), parse and serialize\n  \
                    - markdown: Markdown (.md), serialize only\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Examples:\n  \
                    habla convert draft.json --to markdown            # Markdown (stdout)\n  \
                    habla convert draft.json --to json --extra-compact  # Single-line JSON\n  \
                    habla draft.json --to markdown                    # 'convert' is optional",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("spacing")
                .about("Insert missing blank lines after block constructs in Markdown")
                .long_about(
                    "Repair Markdown from any source by adding a blank line after block\n\
                    constructs (blockquotes, code fences, lists, rules, headings, images)\n\
                    that are directly followed by content. Running it twice changes nothing.\n\n\
                    Examples:\n  \
                    habla spacing article.md                    # All rules, to stdout\n  \
                    habla spacing article.md --rule heading     # A single rule\n  \
                    habla spacing article.md -o fixed.md        # Write to a file",
                )
                .arg(
                    Arg::new("input")
                        .help("Markdown file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("rule")
                        .long("rule")
                        .help("Apply only this rule")
                        .value_parser(clap::builder::PossibleValuesParser::new(rule_names))
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("article")
                .about("Print long-form article metadata and event tags as JSON")
                .long_about(
                    "Derive the unsigned kind 30023 event for an article: the title from the\n\
                    first level-1 heading, the body after it, the 'd' identifier, hashtags,\n\
                    and the p / e / a tags of every nostr: reference in the body.\n\n\
                    Editor documents must open with a level-1 heading.\n\n\
                    Examples:\n  \
                    habla article draft.json\n  \
                    habla article article.md --image https://example.com/cover.png",
                )
                .arg(
                    Arg::new("input")
                        .help("Editor document or Markdown file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("image")
                        .long("image")
                        .help("Cover image URL")
                        .value_hint(ValueHint::Url),
                )
                .arg(
                    Arg::new("summary")
                        .long("summary")
                        .help("Article summary"),
                )
                .arg(
                    Arg::new("published-at")
                        .long("published-at")
                        .help("Publication time in unix seconds (defaults to now)")
                        .value_parser(clap::value_parser!(u64)),
                ),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    // If no subcommand is provided, inject "convert"
    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&cleaned_args[1].as_str())
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);
    init_tracing(&config);

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let to = sub_matches.get_one::<String>("to").expect("to is required");
            let from = source_format(input, sub_matches.get_one::<String>("from"));
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, &from, to, output, &extra_params, &config);
        }
        Some(("spacing", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let rule = sub_matches
                .get_one::<String>("rule")
                .and_then(|name| SpacingRule::from_name(name));
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_spacing_command(input, rule, output);
        }
        Some(("article", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let from = source_format(input, sub_matches.get_one::<String>("from"));
            let draft = ArticleDraft {
                image: sub_matches.get_one::<String>("image").cloned(),
                summary: sub_matches.get_one::<String>("summary").cloned(),
                published_at: sub_matches
                    .get_one::<u64>("published-at")
                    .copied()
                    .unwrap_or_else(unix_now),
                ..Default::default()
            };
            handle_article_command(input, &from, draft, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Explicit `--from`, or the format registered for the input's extension.
fn source_format(input: &str, from_arg: Option<&String>) -> String {
    if let Some(from) = from_arg {
        return from.to_string();
    }
    match FormatRegistry::default().detect_format_from_filename(input) {
        Some(detected) => detected,
        None => {
            eprintln!("Error: Could not detect format from filename '{input}'");
            eprintln!("Please specify --from explicitly");
            std::process::exit(1);
        }
    }
}

fn read_input(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    })
}

fn write_output(output: Option<&str>, text: &str) {
    match output {
        Some(path) => {
            fs::write(path, text).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{text}"),
    }
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
    config: &HablaConfig,
) {
    let registry = FormatRegistry::default();

    if let Err(e) = registry.get(from) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    if let Err(e) = registry.get(to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let source = read_input(input);

    let doc = registry.parse(&source, from).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });

    // Format-specific parameters allowed via --extra-*
    let mut format_options = config.convert.options_for(to);
    for (key, value) in extra_params {
        format_options.insert(key.clone(), value.clone());
    }

    tracing::debug!(input, from, to, options = ?format_options, "converting");
    let text = registry
        .serialize_with_options(&doc, to, &format_options)
        .unwrap_or_else(|e| {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        });

    write_output(output, &text);
}

/// Handle the spacing command
fn handle_spacing_command(input: &str, rule: Option<SpacingRule>, output: Option<&str>) {
    let source = read_input(input);
    let spaced = match rule {
        Some(rule) => apply_rule(&source, rule),
        None => ensure_block_spacing(&source),
    };
    write_output(output, &spaced);
}

/// Handle the article command
fn handle_article_command(input: &str, from: &str, draft: ArticleDraft, config: &HablaConfig) {
    let registry = FormatRegistry::default();
    let source = read_input(input);

    let markdown = if from == "markdown" {
        if config.convert.markdown.ensure_block_spacing {
            ensure_block_spacing(&source)
        } else {
            source
        }
    } else {
        let doc = registry.parse(&source, from).unwrap_or_else(|e| {
            eprintln!("Parse error: {e}");
            std::process::exit(1);
        });
        if !has_main_heading(&doc) {
            eprintln!("Error: the document must start with a level-1 heading (the article title)");
            std::process::exit(1);
        }
        registry
            .serialize_with_options(&doc, "markdown", &config.convert.options_for("markdown"))
            .unwrap_or_else(|e| {
                eprintln!("Serialization error: {e}");
                std::process::exit(1);
            })
    };

    let parsed = ArticleDraft::from_markdown(&markdown, draft.published_at);
    let draft = ArticleDraft {
        image: draft.image,
        summary: draft.summary,
        ..parsed
    };

    let report = serde_json::json!({
        "kind": draft.kind(),
        "identifier": &draft.identifier,
        "title": &draft.title,
        "hashtags": &draft.hashtags,
        "content": &draft.content,
        "tags": draft.tags(),
    });
    let text = serde_json::to_string_pretty(&report).unwrap_or_else(|e| {
        eprintln!("Serialization error: {e}");
        std::process::exit(1);
    });
    println!("{text}");
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::default();
    println!("Available formats:\n");
    for format in registry.formats() {
        let mut directions = Vec::new();
        if format.supports_parsing() {
            directions.push("parse");
        }
        if format.supports_serialization() {
            directions.push("serialize");
        }
        println!(
            "  {:<10} {} [{}]",
            format.name(),
            format.description(),
            directions.join(", ")
        );
    }
    println!("\nSpacing rules:");
    for rule in SpacingRule::ALL {
        println!("  {}", rule.name());
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> HablaConfig {
    let loader = Loader::new().with_optional_file("habla.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

/// Logs go to stderr so they never mix with converted output. `RUST_LOG` wins over
/// the configured level.
fn init_tracing(config: &HablaConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|err| {
            eprintln!("Invalid log level '{}': {err}", config.logging.level);
            std::process::exit(1);
        });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn apply_config_overrides(config: &mut HablaConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = take_override(extra_params, &["ensure-spacing", "ensure-block-spacing"]) {
        config.convert.markdown.ensure_block_spacing = parse_bool_arg("ensure-spacing", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["link-references", "link"]) {
        config.convert.markdown.link_references = parse_bool_arg("link-references", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["compact"]) {
        config.convert.json.compact = parse_bool_arg("compact", &raw);
    }
    if let Some(level) = take_override(extra_params, &["log-level", "log"]) {
        config.logging.level = level;
    }
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => true,
        "false" | "0" | "no" | "n" => false,
        other => {
            eprintln!("Invalid boolean value '{other}' for --extra-{flag}");
            std::process::exit(1);
        }
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}
