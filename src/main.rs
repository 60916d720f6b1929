use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use menupick::model::AppConfig;
use menupick::pick::OsRandom;
use menupick::session::{DEFAULT_MENU, Session, Submission};
use menupick::store::LocalStore;
use menupick::tui::TuiRunOptions;

#[derive(Parser)]
#[command(name = "menupick")]
#[command(about = "Pick tonight's dinner from a pasted menu", long_about = None)]
struct Cli {
    /// Directory holding the stored menu text and config.json
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Append a JSONL event trace to this file (interactive mode)
    #[arg(long)]
    trace: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick one dish, remembering the menu text for next time
    Pick {
        /// Read the menu from this file (`-` for stdin) instead of the stored text
        #[arg(long)]
        file: Option<PathBuf>,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// List the dishes found in the menu text
    Items {
        /// Read the menu from this file (`-` for stdin) instead of the stored text
        #[arg(long)]
        file: Option<PathBuf>,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the menu text the next session will start with
    Show,

    /// Write config.json with default settings
    Init {
        /// Overwrite an existing config.json
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let data_dir = menupick::app_dirs::resolve_data_dir(cli.data_dir.as_deref())?;
    let store = LocalStore::open(&data_dir);

    let Some(command) = cli.command else {
        return menupick::tui::run(TuiRunOptions {
            data_dir,
            trace: cli.trace,
        });
    };

    match command {
        Commands::Pick { file, json } => {
            let format = store.read_config()?.menu_format()?;
            let mut session = load_session(&store, file.as_deref())?;
            match session.submit(&store, &mut OsRandom, &format)? {
                Submission::Picked {
                    item, candidates, ..
                } => {
                    if json {
                        let out = serde_json::json!({
                            "item": item,
                            "candidates": candidates,
                        });
                        println!(
                            "{}",
                            serde_json::to_string_pretty(&out).context("serialize pick json")?
                        );
                    } else {
                        println!("{}", item);
                    }
                }
                Submission::NoItems => {
                    eprintln!("no dishes found in menu text");
                }
            }
        }
        Commands::Items { file, json } => {
            let format = store.read_config()?.menu_format()?;
            let session = load_session(&store, file.as_deref())?;
            let items = format.extract(session.raw_text());
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&items).context("serialize items json")?
                );
            } else {
                for item in items {
                    println!("{}", item);
                }
            }
        }
        Commands::Show => {
            let session = Session::restore(&store)?;
            print!("{}", session.raw_text());
        }
        Commands::Init { force } => {
            let path = store.config_path();
            if path.exists() && !force {
                anyhow::bail!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                );
            }
            store.write_config(&AppConfig::default())?;
            println!("Wrote {}", path.display());
        }
    }

    Ok(())
}

fn load_session(store: &LocalStore, file: Option<&Path>) -> Result<Session> {
    let Some(path) = file else {
        // Same recovery as the interactive widget: report, then use the built-in menu.
        return Ok(Session::restore(store).unwrap_or_else(|err| {
            eprintln!("{:#}; using the built-in menu", err);
            Session::new(DEFAULT_MENU)
        }));
    };
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("read menu from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?
    };
    Ok(Session::new(text))
}
