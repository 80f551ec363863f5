// Colored terminal output for run summaries.
//
// This module handles all terminal-specific formatting: colors, counts,
// section headers. The main.rs command handlers delegate here.

use std::path::Path;

use colored::Colorize;

use crate::network::NetworkStats;
use crate::pipeline::CleanSummary;
use crate::schema;

/// Display the end-of-run report for a cleaning run.
pub fn display_clean_summary(summary: &CleanSummary, processed: &Path, discarded: &Path) {
    println!("\n{}", "=== Limpieza completada ===".bold());
    println!();
    println!("  Registros leídos:    {}", summary.total);
    println!(
        "  Registros válidos:   {}",
        summary.kept.to_string().green()
    );

    if summary.discarded > 0 {
        println!(
            "  Registros descartados: {}",
            summary.discarded.to_string().yellow()
        );
        for (reason, count) in &summary.discard_reasons {
            println!("    {} {}: {}", "~".yellow(), reason, count);
        }
    } else {
        println!("  Registros descartados: 0");
    }

    if !summary.normalized_fields.is_empty() {
        println!(
            "  Campos normalizados: {}",
            summary.normalized_fields.len()
        );
    }

    if let Some(classified) = summary.classified {
        println!(
            "  Temas asignados ({}): {}",
            schema::TOPIC_COLUMN,
            classified.to_string().green()
        );
    }

    println!();
    println!("  Salida: {}", processed.display().to_string().cyan());
    if summary.discarded > 0 {
        println!("  Descartes: {}", discarded.display().to_string().cyan());
    }
}

/// Display the summary for a built similarity network.
pub fn display_network_summary(stats: &NetworkStats, threshold: f64, output: &Path) {
    println!("\n{}", "=== Red temática ===".bold());
    println!();
    println!("  Nodos:    {}", stats.nodes);
    println!("  Aristas:  {}", stats.edges.to_string().green());
    if stats.isolated > 0 {
        println!("  Aislados: {}", stats.isolated.to_string().yellow());
    }
    println!("  Umbral de similitud: {threshold:.2}");
    println!();
    println!("  Salida: {}", output.display().to_string().cyan());
}
