use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::Context;
use lazyseq_core::Value;

/// Reads values, one per line, from a file or stdin.
pub(crate) fn read_values(infile: &Option<PathBuf>) -> anyhow::Result<Vec<Value>> {
    let reader: Box<dyn BufRead> = if let Some(input_path) = infile {
        let file = std::fs::File::open(input_path)
            .with_context(|| format!("Failed to open input file: {}", input_path.display()))?;
        Box::new(BufReader::new(file))
    } else {
        Box::new(BufReader::new(io::stdin()))
    };
    let mut values = Vec::new();
    for line in reader.lines() {
        let line = line.context("Failed to read input line")?;
        values.push(Value::parse_literal(line.trim_end_matches('\r')));
    }
    Ok(values)
}

/// Reads one sequence of values per input file.
pub(crate) fn read_sources(infiles: &[PathBuf]) -> anyhow::Result<Vec<Vec<Value>>> {
    infiles
        .iter()
        .map(|path| read_values(&Some(path.clone())))
        .collect()
}

/// Writes each value on its own line to stdout.
pub(crate) fn write_values(
    values: impl IntoIterator<Item = lazyseq_core::Result<Value>>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for value in values {
        writeln!(out, "{}", value?)?;
    }
    Ok(())
}
