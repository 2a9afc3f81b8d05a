use clap::Parser;
use log::debug;
use regula::simulation::format_states;
use regula::{compile, PatternCatalog, PatternDocument, PatternLoader, RegulaError};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    /// The JSON pattern document to compile
    #[clap(short, long, conflicts_with = "name")]
    pattern: Option<PathBuf>,

    /// The name of a built-in pattern
    #[clap(short, long)]
    name: Option<String>,

    /// The strings to match against the pattern
    #[clap(short, long)]
    input: Vec<String>,

    /// Print the state set after each character
    #[clap(short = 'd', long)]
    debug: bool,

    /// Decide acceptance with the equivalent DFA
    #[clap(long)]
    dfa: bool,

    /// Print the automaton in the Graphviz dot language
    #[clap(long)]
    dot: bool,

    /// List the built-in patterns
    #[clap(short, long)]
    list: bool,
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), RegulaError> {
    if cli.list {
        for name in PatternCatalog::list_document_names() {
            println!("{name}");
        }
        return Ok(());
    }

    let document = load(cli)?;
    let nfa = compile(&document.pattern);
    debug!("running {:?} against {} inputs", document.name, cli.input.len());

    println!("{}: {}", document.name, document.pattern.inspect());

    if cli.dfa {
        let dfa = nfa.to_dfa();

        if cli.dot {
            println!("{}", dfa.to_dot());
        }

        for input in &cli.input {
            if cli.debug {
                let mut state = Some(dfa.start_state());
                println!("Step: 0, States: {}", dfa.label(dfa.start_state()));

                for (i, c) in input.chars().enumerate() {
                    state = state.and_then(|state| dfa.next_state(state, c));
                    let label = state.map(|state| dfa.label(state)).unwrap_or_default();
                    println!("Step: {}, Read: {c:?}, States: {label}", i + 1);
                }
            }
            report(input, dfa.accepts(input));
        }
    } else {
        if cli.dot {
            println!("{}", nfa.to_dot());
        }

        for input in &cli.input {
            if cli.debug {
                let mut simulation = nfa.to_simulation();
                println!(
                    "Step: 0, States: {}",
                    format_states(simulation.current_states())
                );

                for (i, c) in input.chars().enumerate() {
                    simulation = simulation.read_character(c);
                    println!(
                        "Step: {}, Read: {c:?}, States: {}",
                        i + 1,
                        format_states(simulation.current_states())
                    );
                }
            }
            report(input, nfa.accepts(input));
        }
    }

    Ok(())
}

fn load(cli: &Cli) -> Result<PatternDocument, RegulaError> {
    match (&cli.pattern, &cli.name) {
        (Some(path), _) => PatternLoader::load_document(path),
        (None, Some(name)) => PatternCatalog::get_document_by_name(name),
        (None, None) => Err(RegulaError::ValidationError(
            "Either --pattern or --name is required".to_string(),
        )),
    }
}

fn report(input: &str, accepted: bool) {
    let verdict = if accepted { "accepted" } else { "rejected" };
    println!("{input:?}: {verdict}");
}
