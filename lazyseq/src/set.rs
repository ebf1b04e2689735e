use std::path::PathBuf;

use clap::Parser;
use lazyseq_core::{summary, EquivalenceMode, Value};

use crate::input::{read_sources, read_values, write_values};

#[derive(Debug, Parser)]
pub(crate) struct Distinct {
    /// input file, one value per line (default stdin)
    infile: Option<PathBuf>,
    /// Equivalence mode: strict or coercive
    #[arg(long, default_value_t = EquivalenceMode::Strict)]
    mode: EquivalenceMode,
}

impl Distinct {
    pub(crate) fn run(&self) -> anyhow::Result<()> {
        let values = read_values(&self.infile)?;
        write_values(lazyseq_core::distinct(values.into_iter(), self.mode))
    }
}

#[derive(Debug, Parser)]
pub(crate) struct SetCommand {
    /// input files, one value per line
    #[arg(required = true)]
    infiles: Vec<PathBuf>,
    /// Equivalence mode: strict or coercive
    #[arg(long, default_value_t = EquivalenceMode::Strict)]
    mode: EquivalenceMode,
}

impl SetCommand {
    fn sources(&self) -> anyhow::Result<Vec<std::vec::IntoIter<Value>>> {
        Ok(read_sources(&self.infiles)?
            .into_iter()
            .map(Vec::into_iter)
            .collect())
    }

    pub(crate) fn union(&self) -> anyhow::Result<()> {
        write_values(lazyseq_core::union(self.sources()?, self.mode))
    }

    pub(crate) fn intersect(&self) -> anyhow::Result<()> {
        write_values(lazyseq_core::intersection(self.sources()?, self.mode))
    }

    pub(crate) fn symmetric_difference(&self) -> anyhow::Result<()> {
        write_values(lazyseq_core::symmetric_difference(
            self.sources()?,
            self.mode,
        ))
    }

    pub(crate) fn permutations(&self) -> anyhow::Result<()> {
        println!("{}", summary::are_permutations(self.sources()?, self.mode)?);
        Ok(())
    }

    pub(crate) fn same(&self) -> anyhow::Result<()> {
        println!("{}", summary::same(self.sources()?, self.mode)?);
        Ok(())
    }
}

#[derive(Debug, Parser)]
pub(crate) struct PartialIntersect {
    /// Minimum number of inputs a value must occur in
    #[arg(long)]
    min: usize,
    #[command(flatten)]
    inputs: SetCommand,
}

impl PartialIntersect {
    pub(crate) fn run(&self) -> anyhow::Result<()> {
        let sources = self.inputs.sources()?;
        write_values(lazyseq_core::partial_intersection(
            sources,
            self.min,
            self.inputs.mode,
        )?)
    }
}
