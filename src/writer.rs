use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::graph::Graph;

/// Write a graph as a single JSON document. `serde_json` does no HTML
/// escaping, so primed ids come out as `NODE_1'`.
pub fn write_json<W: Write>(graph: &Graph, writer: W) -> io::Result<()> {
    serde_json::to_writer(writer, graph)?;
    Ok(())
}

pub fn graph_string(graph: &Graph) -> String {
    let mut result = Vec::new();
    write_json(graph, &mut result).expect("Error writing graph to buffer");
    String::from_utf8(result).expect("serde_json produced invalid UTF-8")
}

/// Save a graph to a JSON file, replacing it if it exists.
pub fn save_json<P: AsRef<Path>>(graph: &Graph, path: P) -> io::Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_json(graph, &mut writer)?;
    writer.flush()
}
