//! calcsheet - A line-by-line calculation sheet

mod config;
mod default_functions;
mod logger;
mod output;
mod repl;

use anyhow::{Context, Result};
use calcsheet_core::Document;
use std::env;
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};

fn print_usage() {
    eprintln!("Usage: calcsheet [OPTIONS] [FILE]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  [FILE]                    Sheet to evaluate, one line per row ('-' for stdin)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --command <LINE>      Evaluate LINE as the next sheet row (can be repeated)");
    eprintln!("  -i, --interactive         Edit the sheet interactively");
    eprintln!("  -s, --side-by-side        Print input and result columns");
    eprintln!("  -f, --functions <FILE>    Load custom Rhai functions (can be repeated)");
    eprintln!("  --no-default-functions    Do not load default.rhai from the config dir");
    eprintln!("  --config <FILE>           Read configuration from FILE");
    eprintln!("  --no-config               Ignore the configuration file");
    eprintln!("  -v, --verbose             Log evaluation details to stderr");
    eprintln!("  -h, --help                Print help");
}

#[derive(Debug, Default)]
struct Options {
    file_path: Option<PathBuf>,
    commands: Vec<String>,
    interactive: bool,
    side_by_side: bool,
    functions_files: Vec<PathBuf>,
    no_default_functions: bool,
    config_file: Option<PathBuf>,
    no_config: bool,
    verbose: bool,
}

fn usage_error(message: &str) -> ! {
    eprintln!("Error: {}", message);
    print_usage();
    std::process::exit(2);
}

fn parse_args(args: &[String]) -> Options {
    let mut opts = Options::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                std::process::exit(0);
            }
            "-c" | "--command" => {
                i += 1;
                if i >= args.len() {
                    usage_error("--command requires a value");
                }
                opts.commands.push(args[i].to_string());
            }
            "-i" | "--interactive" => opts.interactive = true,
            "-s" | "--side-by-side" => opts.side_by_side = true,
            "-f" | "--functions" => {
                i += 1;
                if i >= args.len() {
                    usage_error("--functions requires a file path");
                }
                opts.functions_files.push(PathBuf::from(&args[i]));
            }
            "--no-default-functions" => opts.no_default_functions = true,
            "--config" => {
                i += 1;
                if i >= args.len() {
                    usage_error("--config requires a file path");
                }
                opts.config_file = Some(PathBuf::from(&args[i]));
            }
            "--no-config" => opts.no_config = true,
            "-v" | "--verbose" => opts.verbose = true,
            "-" if opts.file_path.is_none() => opts.file_path = Some(PathBuf::from("-")),
            arg if arg.starts_with('-') => usage_error(&format!("Unknown option: {}", arg)),
            _ => {
                if opts.file_path.is_none() {
                    opts.file_path = Some(PathBuf::from(&args[i]));
                } else {
                    usage_error(&format!("Unexpected argument: {}", args[i]));
                }
            }
        }
        i += 1;
    }
    opts
}

fn read_sheet(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read sheet from stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }
}

/// Build the document and print results. Returns whether any line failed.
fn run(opts: Options) -> Result<bool> {
    let (config, warnings) = if opts.no_config {
        (config::Config::default(), Vec::new())
    } else {
        config::load_config(opts.config_file.as_ref())
    };
    for warning in warnings {
        log::warn!("{}", warning);
    }

    let mut functions_files = config.functions;
    functions_files.extend(opts.functions_files);
    default_functions::prepend_default_functions_if_present(
        &mut functions_files,
        opts.no_default_functions,
    );

    let mut doc = Document::new();
    for path in &functions_files {
        doc.load_functions(path)
            .with_context(|| format!("Failed to load functions from {}", path.display()))?;
    }

    let side_by_side = opts.side_by_side || config.side_by_side;

    if opts.interactive {
        let stdin = std::io::stdin();
        repl::run(&mut doc, stdin.lock(), std::io::stdout())?;
        return Ok(false);
    }

    let text = if !opts.commands.is_empty() {
        opts.commands.join("\n")
    } else if let Some(path) = &opts.file_path {
        read_sheet(path)?
    } else if std::io::stdin().is_terminal() {
        let stdin = std::io::stdin();
        repl::run(&mut doc, stdin.lock(), std::io::stdout())?;
        return Ok(false);
    } else {
        read_sheet(Path::new("-"))?
    };

    doc.replace_all(text.lines());
    let rendered = if side_by_side {
        output::render_side_by_side(&doc)
    } else {
        output::render_results(&doc)
    };
    print!("{}", rendered);

    Ok(doc.has_failures())
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let opts = parse_args(&args);
    logger::init(opts.verbose);

    match run(opts) {
        Ok(false) => {}
        Ok(true) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
