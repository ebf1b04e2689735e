use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use lazyseq_core::{ChunkOptions, SequenceExt, Value, ZipPolicy};

use crate::input::{read_sources, read_values, write_values};

#[derive(Debug, Parser)]
pub(crate) struct Chunk {
    /// input file, one value per line (default stdin)
    infile: Option<PathBuf>,
    /// Number of values per window
    #[arg(long)]
    size: usize,
    /// Number of values a window shares with the next
    #[arg(long, default_value_t = 0)]
    overlap: usize,
    /// Drop a last window that is shorter than --size
    #[arg(long)]
    drop_trailing: bool,
}

impl Chunk {
    pub(crate) fn run(&self) -> anyhow::Result<()> {
        let options = ChunkOptions::new(self.size)
            .overlap(self.overlap)
            .include_trailing(!self.drop_trailing);
        let values = read_values(&self.infile)?;
        let windows = values.into_iter().chunkwise(options)?;
        write_values(windows.map(|window| Ok(Value::from(window))))
    }
}

#[derive(Debug, Parser)]
pub(crate) struct Pairwise {
    /// input file, one value per line (default stdin)
    infile: Option<PathBuf>,
}

impl Pairwise {
    pub(crate) fn run(&self) -> anyhow::Result<()> {
        let values = read_values(&self.infile)?;
        write_values(
            values
                .into_iter()
                .pairwise()
                .map(|(a, b)| Ok(Value::from(vec![a, b]))),
        )
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Policy {
    /// Stop at the end of the shortest input
    Shortest,
    /// Continue to the end of the longest input, using --filler
    Longest,
    /// Fail if the inputs have different lengths
    Equal,
}

#[derive(Debug, Parser)]
pub(crate) struct Zip {
    /// input files, one value per line
    #[arg(required = true)]
    infiles: Vec<PathBuf>,
    /// What to do when inputs have different lengths
    #[arg(long, value_enum, default_value_t = Policy::Shortest)]
    policy: Policy,
    /// Value used for exhausted inputs with --policy longest
    #[arg(long, default_value = "null")]
    filler: String,
}

impl Zip {
    pub(crate) fn run(&self) -> anyhow::Result<()> {
        let policy = match self.policy {
            Policy::Shortest => ZipPolicy::ShortestWins,
            Policy::Longest => ZipPolicy::LongestWithFiller(Value::parse_literal(&self.filler)),
            Policy::Equal => ZipPolicy::AllEqualOrFail,
        };
        let sources = read_sources(&self.infiles)?
            .into_iter()
            .map(Vec::into_iter);
        write_values(lazyseq_core::zip(sources, policy).map(|row| row.map(Value::from)))
    }
}

#[derive(Debug, Parser)]
pub(crate) struct Tee {
    /// input file, one value per line (default stdin)
    infile: Option<PathBuf>,
    /// Number of branches
    #[arg(long, default_value_t = 2)]
    count: usize,
}

impl Tee {
    // Branch i reads i + 1 values per round, so the branches drift apart
    // and the shared buffer is exercised.
    pub(crate) fn run(&self) -> anyhow::Result<()> {
        let values = read_values(&self.infile)?;
        let mut branches = values.into_iter().tee(self.count)?;
        let stdout = io::stdout();
        let mut out = stdout.lock();
        loop {
            let mut progressed = false;
            for (i, branch) in branches.iter_mut().enumerate() {
                for value in branch.by_ref().take(i + 1) {
                    writeln!(out, "{}\t{}", i, value)?;
                    progressed = true;
                }
            }
            if !progressed {
                break;
            }
        }
        Ok(())
    }
}
