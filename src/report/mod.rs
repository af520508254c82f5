//! Run summaries for classification results.
//!
//! - [`terminal`] — colored summary box and frequency tables; respects `--verbose` / `--quiet`.
//! - [`summarize`] — the same figures as a serializable [`RunSummary`] for `--report json`.

use std::collections::HashMap;

use crate::models::{Frequency, RunSummary};
use crate::pipeline::PipelineOutcome;
use crate::text::normalize::normalize;

pub mod terminal;

/// Label used for missing values in frequency tables.
pub const MISSING_LABEL: &str = "(sin dato)";

/// Count labels and express each as a percentage of the total, rounded to two
/// decimals. Sorted by count descending, then label.
pub fn frequencies<'a, I>(labels: I) -> Vec<Frequency>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut total = 0usize;
    for label in labels {
        *counts.entry(label.unwrap_or(MISSING_LABEL)).or_insert(0) += 1;
        total += 1;
    }

    let mut rows: Vec<Frequency> = counts
        .into_iter()
        .map(|(label, count)| Frequency {
            label: label.to_string(),
            count,
            percentage: round2(count as f64 / total as f64 * 100.0),
        })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    rows
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Build the frequency tables and counts for one run.
pub fn summarize(outcome: &PipelineOutcome) -> RunSummary {
    let classified = || outcome.retained.iter().chain(&outcome.discarded);
    // grouped the way the prefilter compares statuses
    let statuses: Vec<Option<String>> = classified()
        .map(|c| normalize(c.record.estado_contrato.as_deref()).filter(|s| !s.is_empty()))
        .collect();

    RunSummary {
        input: outcome.input,
        prefilter: outcome.prefilter.clone(),
        classified: outcome.classified(),
        retained: outcome.retained.len(),
        discarded: outcome.discarded.len(),
        retained_percentage: round2(outcome.retained_percentage()),
        status: frequencies(statuses.iter().map(|s| s.as_deref())),
        unspsc_family: frequencies(
            classified().map(|c| c.classification.nombre_familia_unspsc.as_deref()),
        ),
        contractual_object: frequencies(
            classified().map(|c| Some(c.classification.objeto_contractual.as_str())),
        ),
        macro_category: frequencies(
            outcome
                .retained
                .iter()
                .map(|c| Some(c.classification.macrocategoria.as_str())),
        ),
    }
}
