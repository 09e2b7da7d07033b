use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use grm_graph::{BreakpointMap, Graph, SequenceGraph, create_breakpoint_map};

pub fn run_breakpoints(matches: &ArgMatches) -> Result<()> {
    let graph_path = matches
        .get_one::<String>("graph")
        .expect("A path to a graph file is required.");
    let output = matches.get_one::<String>("output");

    let breakpoint_map = breakpoints_from_path(Path::new(graph_path))?;

    let writer: Box<dyn Write> = match output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Failed to create output: {}", path))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    write_breakpoints(BufWriter::new(writer), &breakpoint_map)?;

    Ok(())
}

pub fn breakpoints_from_path(path: &Path) -> Result<BreakpointMap> {
    let graph = Graph::try_from(path)
        .with_context(|| format!("Failed to load graph: {}", path.display()))?;
    let breakpoint_map = create_breakpoint_map(&graph)?;
    info!(
        "Found {} breakpoints in {} ({} nodes)",
        breakpoint_map.len(),
        path.display(),
        graph.num_nodes()
    );
    Ok(breakpoint_map)
}

pub fn write_breakpoints<W: Write>(mut writer: W, breakpoint_map: &BreakpointMap) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, breakpoint_map)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
