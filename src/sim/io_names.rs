// Primitives for reading name lists.

use std::fs;

use crate::sim::*;

/// Reads a list of names, one per line. Lines are trimmed and blank lines are dropped.
pub fn read_name_list(path: &str) -> SimResult<Vec<String>> {
    info!("Attempting to read name list {:?}", path);
    let contents = fs::read_to_string(path).context(OpeningNamesSnafu { path })?;
    let names = parse_name_list(&contents);
    debug!("read_name_list: {:?}: {} names", path, names.len());
    ensure!(!names.is_empty(), EmptyNamesSnafu { name: path });
    Ok(names)
}

fn parse_name_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(|l| l.to_string())
        .collect()
}
