mod input;
mod sequence;
mod set;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug events to stderr. RUST_LOG overrides this.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print each value the first time it is seen.
    Distinct(set::Distinct),
    /// Print every value found in any input, once.
    Union(set::SetCommand),
    /// Print the values found in every input, once.
    Intersect(set::SetCommand),
    /// Print the values found in at least --min inputs, once.
    PartialIntersect(set::PartialIntersect),
    /// Print the values found in exactly one input.
    SymmetricDifference(set::SetCommand),
    /// Check whether the inputs are permutations of each other.
    Permutations(set::SetCommand),
    /// Check whether the inputs hold the same values in the same order.
    Same(set::SetCommand),
    /// Print fixed-size, optionally overlapping windows.
    Chunk(sequence::Chunk),
    /// Print pairs of consecutive values.
    ///
    /// This is a shortcut for `chunk --size 2 --overlap 1 --drop-trailing`.
    Pairwise(sequence::Pairwise),
    /// Print the inputs side by side.
    Zip(sequence::Zip),
    /// Fork the input and read the branches at different paces.
    Tee(sequence::Tee),
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Distinct(distinct) => {
            distinct.run()?;
        }
        Commands::Union(command) => {
            command.union()?;
        }
        Commands::Intersect(command) => {
            command.intersect()?;
        }
        Commands::PartialIntersect(partial) => {
            partial.run()?;
        }
        Commands::SymmetricDifference(command) => {
            command.symmetric_difference()?;
        }
        Commands::Permutations(command) => {
            command.permutations()?;
        }
        Commands::Same(command) => {
            command.same()?;
        }
        Commands::Chunk(chunk) => {
            chunk.run()?;
        }
        Commands::Pairwise(pairwise) => {
            pairwise.run()?;
        }
        Commands::Zip(zip) => {
            zip.run()?;
        }
        Commands::Tee(tee) => {
            tee.run()?;
        }
    }
    Ok(())
}
