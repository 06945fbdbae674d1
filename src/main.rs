//! Purpose: `dotbox` CLI entry point and command dispatch.
//! Role: Binary crate root; parses args, runs commands against a JSON file
//! of roots, emits JSON on stdout.
//! Invariants: Errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `dotbox::to_exit_code`.
//! Invariants: The store file is rewritten only after a mutation succeeds.
#![allow(clippy::result_large_err)]

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::aot::Shell;
use serde_json::json;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use dotbox::{Error, ErrorKind, Store, to_exit_code};

#[derive(Parser)]
#[command(
    name = "dotbox",
    version,
    about = "Read and edit JSON files through dotted value paths",
    after_help = r#"EXAMPLES
  $ dotbox dump config.json
  $ dotbox get config.json server.listeners.0.port
  $ dotbox set config.json server.listeners.0.port 9700

The first path segment names a top-level root in the file; the rest descend
through nested objects (by key) and arrays (by index)."#
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a dotted path and print the addressed subtree
    Get {
        /// JSON file holding the root mapping
        file: PathBuf,
        /// Dotted value path, e.g. `root.items.2.title`
        path: String,
        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },
    /// Replace or insert the value at a dotted path and rewrite the file
    Set {
        /// JSON file holding the root mapping
        file: PathBuf,
        /// Dotted value path, e.g. `root.items.2.title`
        path: String,
        /// Replacement value, JSON-encoded
        value: String,
        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },
    /// Print the whole root mapping
    Dump {
        /// JSON file holding the root mapping
        file: PathBuf,
        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },
    /// Generate shell completions
    Completion { shell: Shell },
}

fn main() {
    init_tracing();
    let exit_code = match run() {
        Ok(()) => 0,
        Err(err) => {
            emit_error(&err);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<(), Error> {
    let cli = Cli::parse();
    match cli.command {
        Command::Get { file, path, pretty } => {
            let store = load_store(&file)?;
            debug!(path = %path, "resolving value");
            let bytes = if pretty {
                store.value_to_json_pretty(&path)?
            } else {
                store.value_to_json(&path)?
            };
            emit_line(&bytes)
        }
        Command::Set {
            file,
            path,
            value,
            pretty,
        } => {
            let mut store = load_store(&file)?;
            debug!(path = %path, "setting value");
            store.set_json(&path, value.as_bytes())?;
            write_store(&file, &store)?;
            let bytes = if pretty {
                store.value_to_json_pretty(&path)?
            } else {
                store.value_to_json(&path)?
            };
            emit_line(&bytes)
        }
        Command::Dump { file, pretty } => {
            let store = load_store(&file)?;
            let bytes = if pretty {
                store.to_json_pretty()?
            } else {
                store.to_json()?
            };
            emit_line(&bytes)
        }
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "dotbox", &mut io::stdout());
            Ok(())
        }
    }
}

fn load_store(file: &Path) -> Result<Store, Error> {
    let raw = fs::read(file).map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message(format!("failed to read {}", file.display()))
            .with_hint("Check that the file exists and is readable.")
            .with_source(err)
    })?;
    Store::from_json(&raw)
}

fn write_store(file: &Path, store: &Store) -> Result<(), Error> {
    let mut bytes = store.to_json_pretty()?;
    bytes.push(b'\n');
    fs::write(file, bytes).map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message(format!("failed to write {}", file.display()))
            .with_source(err)
    })
}

fn emit_line(bytes: &[u8]) -> Result<(), Error> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    out.write_all(bytes)
        .and_then(|_| out.write_all(b"\n"))
        .map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to write output")
                .with_source(err)
        })
}

fn emit_error(err: &Error) {
    let mut body = json!({
        "kind": format!("{:?}", err.kind()),
        "message": err.to_string(),
    });
    if let Some(path) = err.path() {
        body["path"] = json!(path);
    }
    if let Some(hint) = err.hint() {
        body["hint"] = json!(hint);
    }
    eprintln!("{}", json!({ "error": body }));
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}
