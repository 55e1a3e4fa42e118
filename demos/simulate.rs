use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use automata_rs::automaton::{Automaton, AutomatonKind};
use automata_rs::simulator::SimulationLimits;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    Dfa,
    Pda,
}

impl From<Kind> for AutomatonKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Dfa => AutomatonKind::Dfa,
            Kind::Pda => AutomatonKind::Pda,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Automaton document (JSON).
    #[arg(value_name = "FILE")]
    automaton: PathBuf,

    /// Words to simulate.
    #[arg(value_name = "WORD")]
    words: Vec<String>,

    /// Kind assumed when the document has no `type`.
    #[clap(long, value_enum, default_value = "pda")]
    kind: Kind,

    /// Maximum number of dequeued configurations.
    #[clap(long, value_name = "INT", default_value = "2000")]
    max_steps: usize,

    /// Maximum number of expanded configurations.
    #[clap(long, value_name = "INT", default_value = "3000")]
    max_configs: usize,

    /// Write the automaton in DOT format to this file.
    #[clap(long, value_name = "FILE")]
    dot: Option<PathBuf>,

    /// Enable debug logging.
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    simplelog::TermLogger::init(
        if args.verbose {
            simplelog::LevelFilter::Debug
        } else {
            simplelog::LevelFilter::Info
        },
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    println!("args = {:?}", args);

    let text = std::fs::read_to_string(&args.automaton)?;
    let automaton = Automaton::from_json_str(&text, args.kind.into())?;
    println!("explanation: {}", automaton.explanation());
    if let Some(table) = automaton.table() {
        print!("{}", table);
    }

    if let Some(path) = &args.dot {
        if let Some(dot) = automaton.to_dot() {
            std::fs::write(path, dot?)?;
            println!("DOT in {:?}", path);
        }
    }

    let limits = SimulationLimits {
        max_steps: args.max_steps,
        max_configs: args.max_configs,
    };
    for word in &args.words {
        let time = std::time::Instant::now();
        let run = automaton.simulate(word, &limits);
        println!("----------------------------------");
        println!("word: {:?}", word);
        print!("{}", run);
        println!("Done in {:.3} ms", time.elapsed().as_secs_f64() * 1000.0);
    }

    Ok(())
}
