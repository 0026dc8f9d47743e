mod cmd;
mod logging;

use clap::{Args, Parser, Subcommand};
use npbc_core::config::loader::{default_config_path, ConfigLoader};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "npbc", version, about = "Calculate your monthly newspaper bill")]
struct Cli {
    /// Path to the config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Calculate the bill for one month (previous month by default)
    Calculate(CalculateArgs),

    /// Store an undelivered string for a paper, or "all" papers
    #[command(name = "addudl")]
    AddUndelivered(AddUndeliveredArgs),

    /// Delete stored undelivered strings for a month
    #[command(name = "deludl")]
    DeleteUndelivered(DeleteUndeliveredArgs),

    /// Register a new paper
    #[command(name = "addpaper")]
    AddPaper(AddPaperArgs),

    /// Change an existing paper's name or schedule
    #[command(name = "editpaper")]
    EditPaper(EditPaperArgs),

    /// Remove a paper and its undelivered strings
    #[command(name = "delpaper")]
    DeletePaper(KeyArgs),

    /// List registered papers and their schedules
    Papers(OutputArgs),

    /// Check whether an undelivered string is valid
    Check(CheckArgs),

    /// Show recorded bills
    History(HistoryArgs),

    /// Validate configuration and print resolved paths
    Doctor,
}

#[derive(Debug, Args, Clone, Copy)]
pub struct PeriodArgs {
    /// Month to use (1-12); defaults depend on which of month/year is given
    #[arg(short, long)]
    pub month: Option<u32>,

    /// Year to use
    #[arg(short, long)]
    pub year: Option<i32>,
}

#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct CalculateArgs {
    #[command(flatten)]
    pub period: PeriodArgs,

    /// Extra undelivered strings for this calculation only, as "key:string;key:string"
    #[arg(short, long)]
    pub undelivered: Option<String>,

    /// Do not record the results
    #[arg(long)]
    pub no_log: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct AddUndeliveredArgs {
    #[command(flatten)]
    pub period: PeriodArgs,

    /// Paper key, or "all" for every paper
    #[arg(short, long)]
    pub key: String,

    /// Undelivered string, e.g. "1,5-10,mondays,2-tuesday"
    #[arg(short, long)]
    pub string: String,
}

#[derive(Debug, Args)]
pub struct DeleteUndeliveredArgs {
    #[command(flatten)]
    pub period: PeriodArgs,

    /// Only delete strings for this key
    #[arg(short, long)]
    pub key: Option<String>,
}

#[derive(Debug, Args)]
pub struct AddPaperArgs {
    /// Key used to refer to the paper
    #[arg(short, long)]
    pub key: String,

    /// Display name
    #[arg(short, long)]
    pub name: String,

    /// Delivery days, Monday first, e.g. "YYYYYYN"
    #[arg(short, long)]
    pub days: String,

    /// Prices separated by ';', one per delivered day (or one per weekday)
    #[arg(short, long)]
    pub prices: String,
}

#[derive(Debug, Args)]
pub struct EditPaperArgs {
    #[arg(short, long)]
    pub key: String,

    /// New display name
    #[arg(short, long)]
    pub name: Option<String>,

    /// New delivery days; requires --prices
    #[arg(short, long, requires = "prices")]
    pub days: Option<String>,

    /// New prices; requires --days
    #[arg(short, long, requires = "days")]
    pub prices: Option<String>,
}

#[derive(Debug, Args)]
pub struct KeyArgs {
    #[arg(short, long)]
    pub key: String,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Undelivered string to check
    pub string: String,

    /// Also show the dates the string selects in this month
    #[arg(short, long)]
    pub month: Option<u32>,

    #[arg(short, long, requires = "month")]
    pub year: Option<i32>,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    #[command(flatten)]
    pub period: PeriodArgs,

    /// Show every recorded month
    #[arg(long, conflicts_with_all = ["month", "year"])]
    pub all: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Calculate(_) => "calculate",
            Commands::AddUndelivered(_) => "addudl",
            Commands::DeleteUndelivered(_) => "deludl",
            Commands::AddPaper(_) => "addpaper",
            Commands::EditPaper(_) => "editpaper",
            Commands::DeletePaper(_) => "delpaper",
            Commands::Papers(_) => "papers",
            Commands::Check(_) => "check",
            Commands::History(_) => "history",
            Commands::Doctor => "doctor",
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command.name();

    let rc = match ConfigLoader::load(cli.config.as_deref()) {
        Ok(rc) => rc,
        Err(e) => {
            println!("FAIL npbc {command}");
            println!("{e}");
            if cli.config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    };

    let _log_guard = logging::init(&rc.logging).unwrap_or_else(|e| cmd::fail(command, e));
    tracing::debug!("Running {} with config {}", command, rc.config_path.display());

    match cli.command {
        Commands::Calculate(args) => cmd::calculate::run(&rc, &args),
        Commands::AddUndelivered(args) => cmd::undelivered::add(&rc, &args),
        Commands::DeleteUndelivered(args) => cmd::undelivered::delete(&rc, &args),
        Commands::AddPaper(args) => cmd::paper::add(&rc, &args),
        Commands::EditPaper(args) => cmd::paper::edit(&rc, &args),
        Commands::DeletePaper(args) => cmd::paper::delete(&rc, &args.key),
        Commands::Papers(args) => cmd::paper::list(&rc, &args),
        Commands::Check(args) => cmd::check::run(&args),
        Commands::History(args) => cmd::history::run(&rc, &args),
        Commands::Doctor => cmd::doctor::run(&rc),
    }
}
