mod report;

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::{Level, debug, warn};
use wordsieve::{Dictionary, Options, Outcome, Session};

const DEFAULT_DICTIONARY: &str = "default";
const PROMPT: &str = "> ";

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let verbose = config.verbose || std::env::var_os("WORDSIEVE_DEBUG").is_some();
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(false)
        .with_max_level(if verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let options = Options { dictionary_dir: config.dir.clone(), ..Options::default() };
    let mut session = match Session::open(options.clone(), &config.dictionary) {
        Ok(session) => session,
        Err(err) => {
            warn!(%err, "starting with an empty dictionary");
            report::print_error(&err, config.color);
            Session::new(Dictionary::from_words(&config.dictionary, Vec::<String>::new()), options)
        }
    };

    if let Some(line) = &config.command {
        let code = match session.execute(line) {
            Ok(outcome) => {
                report::print_outcome(&outcome, config.color);
                0
            }
            Err(err) => {
                report::print_error(&err, config.color);
                1
            }
        };
        std::process::exit(code);
    }

    if let Err(err) = repl(&mut session, config.color) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn repl(session: &mut Session, color: bool) -> Result<(), ReadlineError> {
    let mut rl = DefaultEditor::new()?;
    report::print_banner(session.dictionary().name(), session.dictionary().len(), color);

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    if let Err(err) = rl.add_history_entry(line.as_str()) {
                        debug!(%err, "history entry dropped");
                    }
                }
                match session.execute(&line) {
                    Ok(Outcome::Exit) => break,
                    Ok(outcome) => report::print_outcome(&outcome, color),
                    Err(err) => report::print_error(&err, color),
                }
            }
            // Ctrl-C drops the current line.
            Err(ReadlineError::Interrupted) => println!("^C"),
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

struct CliConfig {
    dir: PathBuf,
    dictionary: String,
    command: Option<String>,
    color: bool,
    verbose: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut dir = PathBuf::from(".");
    let mut dictionary = DEFAULT_DICTIONARY.to_string();
    let mut command: Option<String> = None;
    let mut color = io::stdout().is_terminal();
    let mut verbose = false;
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("wordsieve {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "-v" | "--verbose" => verbose = true,
            "--dir" => {
                dir = PathBuf::from(args.next().ok_or_else(|| "error: --dir expects a value".to_string())?);
            }
            "--dict" => {
                dictionary = args.next().ok_or_else(|| "error: --dict expects a value".to_string())?;
            }
            "-c" | "--command" => {
                let value = args.next().ok_or_else(|| "error: --command expects a value".to_string())?;
                if command.is_some() {
                    return Err("error: command provided multiple times".to_string());
                }
                command = Some(value);
            }
            "--" => {
                let rest = args.by_ref().collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    if command.is_some() {
                        return Err("error: command provided multiple times".to_string());
                    }
                    command = Some(rest);
                }
                break;
            }
            _ if arg.starts_with("--dir=") => dir = PathBuf::from(arg.trim_start_matches("--dir=")),
            _ if arg.starts_with("--dict=") => dictionary = arg.trim_start_matches("--dict=").to_string(),
            _ if arg.starts_with("--command=") => {
                if command.is_some() {
                    return Err("error: command provided multiple times".to_string());
                }
                command = Some(arg.trim_start_matches("--command=").to_string());
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'\n\n{}", help_text()));
            }
            _ => return Err(format!("error: unexpected argument '{arg}' (use --command or --)\n\n{}", help_text())),
        }
    }

    if dictionary.trim().is_empty() {
        return Err("error: --dict expects a non-empty name".to_string());
    }

    Ok(CliConfig { dir, dictionary, command, color, verbose })
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "wordsieve {version}

Pattern-driven Spanish word finder.

Usage:
  wordsieve [OPTIONS]                 Interactive prompt.
  wordsieve [OPTIONS] -c <line>       Run one line and exit.
  wordsieve [OPTIONS] -- <line...>

Options:
  --dir <path>               Directory holding <name>.txt dictionaries. Default: .
  --dict <name>              Dictionary to load first. Default: {default_dictionary}
  -c, --command <line>       Run a single query or command.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -v, --verbose              Log per-search metrics to stderr.
                             (Also enabled by WORDSIEVE_DEBUG.)
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Queries:
  CAS*                       * is one letter, . any run
  (1,2,C)A.                  ranges (min,max,V|C)
  . [3S*,>=2V*] 1*           constraints and tolerance (n* shares the budget)
  (A) && !(B) - (C) || (D)   boolean combinations of queries
  /aso (/cal SOLDADO)        commands over the results of another query

Exit codes:
  0  Success.
  1  Internal error or failed command.
  2  Invalid arguments.
",
        version = env!("CARGO_PKG_VERSION"),
        default_dictionary = DEFAULT_DICTIONARY
    )
}
