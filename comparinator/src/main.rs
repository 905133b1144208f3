//! Comparinator - pairwise card comparison for deck building
//!
//! Loads a considering list and a current list, asks which card of each
//! pairing is better and exports the kept and cut cards once everything is sorted.

use clap::{Args, Parser, Subcommand};
use comparinator::catalog::{materialize_lists, CardCatalog};
use comparinator::engine::{Engine, InputLists};
use comparinator::export::write_results;
use comparinator::prompt::{self, LoopExit};
use comparinator::input::read_lists;
use comparinator::{Error, Result, Session};
use mtg_common::{ScryfallClient, DEFAULT_BASE_URL};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Rank candidate cards against your current list, one comparison at a time
#[derive(Parser, Debug)]
#[command(name = "comparinator")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the session file
    #[arg(short, long, global = true, default_value_os_t = Session::default_path())]
    session: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start a new comparison session
    Start {
        /// CSV file with 'considering' and 'current' columns
        #[arg(short, long, required_unless_present = "demo", conflicts_with = "demo")]
        input: Option<PathBuf>,

        /// Use the built-in demo lists
        #[arg(long, default_value_t = false)]
        demo: bool,

        #[command(flatten)]
        scryfall: ScryfallArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Continue a saved session
    Resume {
        #[command(flatten)]
        scryfall: ScryfallArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show progress of the saved session
    Status,
    /// Write the result files of a finished session
    Export {
        #[command(flatten)]
        scryfall: ScryfallArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug)]
struct ScryfallArgs {
    /// Scryfall API base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    api_base: String,

    /// Minimum delay between Scryfall requests in milliseconds
    #[arg(long, default_value_t = 100)]
    request_delay_ms: u64,
}

impl ScryfallArgs {
    fn client(&self) -> Result<ScryfallClient> {
        Ok(ScryfallClient::with_base_url(
            &self.api_base,
            Duration::from_millis(self.request_delay_ms),
        )?)
    }
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Directory for the result CSV files
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Use the stored card data for the detailed export instead of refetching
    #[arg(long, default_value_t = false)]
    offline: bool,
}

fn main() {
    // Initialize logger. Set RUST_LOG environment variable to control log level.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        log::error!("{e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Start {
            input,
            demo,
            scryfall,
            output,
        } => {
            let inputs = match input {
                Some(path) if !demo => read_lists(&path)?,
                _ => InputLists::demo(),
            };
            let client = scryfall.client()?;
            let mut session = start_session(&client, inputs, &cli.session)?;
            decide_and_export(&mut session, &cli.session, &client, &output)
        }
        Command::Resume { scryfall, output } => {
            let mut session = Session::load(&cli.session)?;
            let client = scryfall.client()?;
            decide_and_export(&mut session, &cli.session, &client, &output)
        }
        Command::Status => {
            let session = Session::load(&cli.session)?;
            print_status(&session)
        }
        Command::Export { scryfall, output } => {
            let session = Session::load(&cli.session)?;
            let client = scryfall.client()?;
            export(&session.engine, &client, &output)
        }
    }
}

fn start_session(catalog: &dyn CardCatalog, inputs: InputLists, path: &Path) -> Result<Session> {
    if inputs.is_empty() {
        return Err(Error::InvalidInput("both card lists are empty".to_string()));
    }

    log::info!(
        "Looking up {} considering and {} current cards on Scryfall...",
        inputs.considering.len(),
        inputs.current.len()
    );
    let (considering, current) = materialize_lists(catalog, &inputs);
    let engine = Engine::new(considering, current, inputs)?;

    let mut session = Session::new(engine);
    session.save(path)?;
    log::info!("Session saved to {}", path.display());
    Ok(session)
}

fn decide_and_export(
    session: &mut Session,
    path: &Path,
    catalog: &dyn CardCatalog,
    output: &OutputArgs,
) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    let exit = prompt::run(session, stdin.lock(), &mut stdout, |session| session.save(path))?;
    match exit {
        LoopExit::Finished => export(&session.engine, catalog, output),
        LoopExit::Quit => {
            session.save(path)?;
            println!(
                "Progress saved to {}. Continue with: comparinator resume",
                path.display()
            );
            Ok(())
        }
    }
}

fn export(engine: &Engine, catalog: &dyn CardCatalog, output: &OutputArgs) -> Result<()> {
    let catalog = if output.offline { None } else { Some(catalog) };
    let paths = write_results(&output.output_dir, engine, catalog)?;
    println!("All cards sorted. Results written to:");
    println!("  {}", paths.cut_kept.display());
    println!("  {}", paths.detailed.display());
    Ok(())
}

fn print_status(session: &Session) -> Result<()> {
    let engine = &session.engine;
    println!("Session started {}", session.created_at.to_rfc3339());
    println!(
        "Considering: {}  Current: {}  Cut: {}  Decisions: {}",
        engine.considering_len(),
        engine.current_len(),
        engine.cut_len(),
        engine.decisions()
    );

    if engine.is_terminal() {
        println!("All cards sorted. Run 'comparinator export' to write the results.");
        return Ok(());
    }

    if let Some(trial) = engine.trial_card() {
        let opponent = engine.opponent()?;
        println!(
            "Next: {} vs {} ({} of {} losses this round)",
            trial.name,
            opponent.name,
            engine.loss_count(),
            engine.current_len()
        );
    }
    Ok(())
}
