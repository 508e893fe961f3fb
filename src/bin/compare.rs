use clap::Parser;
use pairwise::cli::session::Session;
use pairwise::ranking::config::Config;
use pairwise::ranking::config::Strategy;
use pairwise::ranking::mode::Mode;

/// rank a handful of items by answering pairwise questions, first on
/// complexity and then on value, and get one combined priority table.
/// the session asks only the pairs the model still needs, so expect
/// about n·log₂n questions per dimension rather than every combination.
#[derive(Parser)]
#[command(about = "rank items by answering pairwise questions on complexity and value")]
struct Args {
    /// item names to rank
    #[arg(required = true, num_args = 2..)]
    items: Vec<String>,
    /// five-point graded scale instead of plain a/b/tie
    #[arg(long)]
    graded: bool,
    /// stop each dimension once this fraction of orderings is known
    #[arg(long, default_value_t = 1.0)]
    target: f64,
    /// pair selection strategy: entropy, uncertainty_sampling, random,
    /// or expected_value_of_information
    #[arg(long, default_value = "entropy")]
    strategy: String,
    /// dump both dimensions' progress snapshots as json
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), anyhow::Error> {
    pairwise::init();
    let args = Args::parse();
    let strategy = Strategy::try_from(args.strategy.as_str())?;
    let mode = match args.graded {
        true => Mode::Graded,
        false => Mode::Binary,
    };
    let config = Config {
        strategy,
        ..Config::default()
    };
    let mut session = Session::new(args.items, mode, args.target, config)?;
    session.run()?;
    if args.json {
        println!("{}", session.progress_json());
    }
    Ok(())
}
