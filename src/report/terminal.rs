use std::path::Path;

use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::models::{ClassifiedContract, Frequency, RunSummary};

/// Render a colored terminal report.
pub fn render(
    summary: &RunSummary,
    discarded: &[ClassifiedContract],
    output: &Path,
    verbose: bool,
    quiet: bool,
) -> Result<()> {
    if quiet {
        println!(
            "Input: {}  Classified: {}  Retained: {}  Discarded: {}  ({:.2}%)",
            summary.input,
            summary.classified,
            summary.retained.to_string().green(),
            summary.discarded.to_string().yellow(),
            summary.retained_percentage,
        );
        return Ok(());
    }

    println!(
        "\n {} v{}",
        "secop-taxonomy".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(" Output: {}\n", output.display());

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(" │  {:<48} │", format!("Input records        : {:>8}", summary.input));
    println!(
        " │  {:<48} │",
        format!(
            "Prefilter dropped    : {:>8}  (status {}, sector {}, family {})",
            summary.prefilter.total(),
            summary.prefilter.status,
            summary.prefilter.sector,
            summary.prefilter.unspsc_family
        )
    );
    println!(" │  {:<48} │", format!("Classified           : {:>8}", summary.classified));
    println!(
        " │  {:<48} │",
        format!(
            "{}  Retained          : {:>8}  ({:.2}%)",
            "✓".green(),
            summary.retained,
            summary.retained_percentage
        )
    );
    println!(
        " │  {:<48} │",
        format!("{}  Discarded (Otros) : {:>8}", "⚠".yellow(), summary.discarded)
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    render_frequencies("Contract status", "estado_contrato", &summary.status);
    render_frequencies("UNSPSC family", "nombre_familia_unspsc", &summary.unspsc_family);
    render_frequencies("Contractual object", "objeto_contractual", &summary.contractual_object);
    render_frequencies("Macro-category (retained)", "macrocategoria", &summary.macro_category);

    // Verbose: list what was dropped so keyword gaps are visible
    if verbose && !discarded.is_empty() {
        println!(" {} Discarded contracts:\n", "[OTROS]".yellow().bold());
        render_discarded(discarded);
        println!();
    }

    Ok(())
}

fn render_frequencies(title: &str, column: &str, rows: &[Frequency]) {
    if rows.is_empty() {
        return;
    }

    println!(" {}\n", title.bold());
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new(column).add_attribute(Attribute::Bold),
            Cell::new("conteo").add_attribute(Attribute::Bold),
            Cell::new("porcentaje").add_attribute(Attribute::Bold),
        ]);

    for row in rows {
        table.add_row(vec![
            Cell::new(&row.label),
            Cell::new(row.count).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}", row.percentage)).set_alignment(CellAlignment::Right),
        ]);
    }

    println!("{}\n", table);
}

fn render_discarded(discarded: &[ClassifiedContract]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Contract").add_attribute(Attribute::Bold),
            Cell::new("Object").add_attribute(Attribute::Bold),
            Cell::new("Sub-category").add_attribute(Attribute::Bold),
            Cell::new("Text").add_attribute(Attribute::Bold),
        ]);

    for contract in discarded {
        let c = &contract.classification;
        let sub_color = if c.subcategorias.is_empty() {
            Color::DarkGrey
        } else {
            Color::Yellow
        };

        table.add_row(vec![
            Cell::new(contract.record.id_contrato.as_deref().unwrap_or("-")),
            Cell::new(&c.objeto_contractual),
            Cell::new(&c.subcategoria).fg(sub_color),
            Cell::new(c.texto.as_deref().unwrap_or("")),
        ]);
    }

    println!("{}", table);
}
