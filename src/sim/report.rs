use std::fs;

use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_json::Value as JSValue;

use crate::sim::*;

/// Width of the longest bar of the chart, in characters.
pub const CHART_WIDTH: u64 = 50;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub election: String,
    pub voters: u64,
    pub parties: usize,
    pub seed: Option<String>,
}

pub fn winner_line(winner: &PartyTally) -> String {
    format!("The winner is {} with {} votes", winner.name, winner.votes)
}

/// One line per party, in party order. Bars are scaled against the largest count.
pub fn render_chart(result: &TallyResult) -> Vec<String> {
    let name_width = result
        .tally
        .iter()
        .map(|pt| pt.name.chars().count())
        .max()
        .unwrap_or(0);
    let max_votes = result.tally.iter().map(|pt| pt.votes).max().unwrap_or(0);
    result
        .tally
        .iter()
        .map(|pt| {
            let bar_len = if max_votes == 0 {
                0
            } else {
                pt.votes * CHART_WIDTH / max_votes
            };
            let pct = if result.total_votes == 0 {
                0.0
            } else {
                100.0 * pt.votes as f64 / result.total_votes as f64
            };
            format!(
                "{:<nw$} | {:<bw$} {} ({:.1}%)",
                pt.name,
                "#".repeat(bar_len as usize),
                pt.votes,
                pct,
                nw = name_width,
                bw = CHART_WIDTH as usize
            )
        })
        .collect()
}

fn result_to_json(result: &TallyResult) -> JSValue {
    let tally: Vec<JSValue> = result
        .tally
        .iter()
        .map(|pt| json!({"id": pt.id.to_string(), "name": pt.name, "votes": pt.votes.to_string()}))
        .collect();
    let winner = result
        .winner_tally()
        .map(|pt| pt.name.clone())
        .unwrap_or_default();
    json!({
        "winner": winner,
        "tally": tally,
        "unattributed": result.unattributed.to_string()
    })
}

pub fn build_summary_js(settings: &Settings, result: &TallyResult) -> JSValue {
    let c = OutputConfig {
        election: settings.election_name.clone(),
        voters: result.total_votes,
        parties: result.tally.len(),
        seed: settings.seed.map(|s| s.to_string()),
    };
    json!({
        "config": c,
        "results": result_to_json(result) })
}

/// Writes the summary to a file, or to the standard output if the path is `stdout`.
pub fn write_summary(out: &str, pretty_js_stats: &str) -> SimResult<()> {
    if out == "stdout" {
        println!("{}", pretty_js_stats);
    } else {
        info!("Writing summary to {:?}", out);
        fs::write(out, pretty_js_stats).context(WritingOutputSnafu { path: out })?;
    }
    Ok(())
}
