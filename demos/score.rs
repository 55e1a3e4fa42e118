use std::path::PathBuf;

use clap::Parser;

use automata_rs::automaton::{Automaton, AutomatonKind};
use automata_rs::config::Config;
use automata_rs::policy::decide;
use automata_rs::scorer::ExampleSet;
use automata_rs::synthesis::evaluate;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Automaton document (JSON).
    #[arg(value_name = "FILE")]
    automaton: PathBuf,

    /// Labeled examples (JSON with `accepted_examples` and `rejected_examples`).
    #[arg(value_name = "FILE")]
    examples: PathBuf,

    /// Engine configuration (JSON). Defaults are used when absent.
    #[clap(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Treat documents without `type` as DFAs instead of PDAs.
    #[clap(long)]
    dfa: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let args = Cli::parse();
    println!("args = {:?}", args);

    let config = match &args.config {
        Some(path) => Config::from_path(path)?,
        None => Config::default(),
    };
    println!("config = {:?}", config);

    let kind = if args.dfa { AutomatonKind::Dfa } else { AutomatonKind::Pda };
    let automaton = Automaton::from_json_str(&std::fs::read_to_string(&args.automaton)?, kind)?;
    let examples: ExampleSet = serde_json::from_str(&std::fs::read_to_string(&args.examples)?)?;
    println!("examples: {}", examples.len());

    let report = evaluate(&automaton, &examples, &config);
    println!("valid: {}", report.valid);
    println!("score: {}", report.score);
    for mismatch in &report.errors {
        println!("- {:?} {:?}", mismatch.kind, mismatch.word);
    }
    println!("disposition: {:?}", decide(report.score, &config.thresholds));

    println!("{}", serde_json::to_string_pretty(&automaton)?);

    Ok(())
}
