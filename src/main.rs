use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use vitela::classify::TopicClassifier;
use vitela::config::Config;
use vitela::embedding::{download, Embedder, OnnxEmbedder};
use vitela::network;
use vitela::output::terminal;
use vitela::pipeline;
use vitela::tables::{self, Table, DEFAULT_HEADER_ROW};
use vitela::vocabulary::{self, Term};

/// Vitela: limpieza y clasificación de catálogos bibliográficos KOHA.
///
/// Normaliza exportaciones tabulares de KOHA, descarta registros sin
/// existencias y asigna temas de un vocabulario controlado mediante
/// embeddings multilingües.
#[derive(Parser)]
#[command(name = "vitela", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Limpiar una exportación KOHA: normalizar campos y separar descartes
    Clean {
        /// Archivo CSV de entrada
        archivo: PathBuf,

        /// Directorio de salida (por defecto, el del archivo de entrada)
        #[arg(long)]
        salida: Option<PathBuf>,

        /// Fila (base 0) donde está el encabezado
        #[arg(long, default_value_t = DEFAULT_HEADER_ROW)]
        header_row: usize,

        /// Asignar temas del vocabulario controlado (requiere el modelo)
        #[arg(long)]
        classify: bool,

        /// Archivo HTML jsTree con el vocabulario (requerido con --classify)
        #[arg(long)]
        vocabulario: Option<PathBuf>,
    },

    /// Construir la red de similitud temática de una columna
    Network {
        /// Archivo CSV de entrada
        archivo: PathBuf,

        /// Nombre de la columna a analizar
        #[arg(long)]
        columna: String,

        /// Umbral de similitud para crear aristas
        #[arg(long)]
        umbral: Option<f64>,

        /// Archivo GraphML de salida (por defecto, <entrada>_red.graphml)
        #[arg(long)]
        salida: Option<PathBuf>,

        /// Fila (base 0) donde está el encabezado
        #[arg(long, default_value_t = DEFAULT_HEADER_ROW)]
        header_row: usize,
    },

    /// Inspeccionar un vocabulario controlado jsTree
    Vocabulary {
        /// Archivo HTML jsTree
        archivo: PathBuf,

        /// Emitir el árbol como JSON en vez de texto indentado
        #[arg(long)]
        json: bool,
    },

    /// Descargar el modelo de embeddings (~450 MB)
    DownloadModel,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("vitela=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Clean {
            archivo,
            salida,
            header_row,
            classify,
            vocabulario,
        } => {
            let config = Config::load()?;
            let table = Table::load(&archivo, header_row)?;

            let classifier = if classify {
                let vocab_path = vocabulario.context(
                    "--classify requiere --vocabulario con el archivo HTML del vocabulario",
                )?;
                Some(build_classifier(&config, &vocab_path)?)
            } else {
                None
            };

            let outcome = pipeline::clean_table(&table, classifier.as_ref())?;

            let (processed_path, discarded_path) = tables::output_paths(&archivo, salida.as_deref());
            outcome.processed.save(&processed_path)?;
            if !outcome.discarded.rows.is_empty() {
                outcome.discarded.save(&discarded_path)?;
            }

            terminal::display_clean_summary(&outcome.summary, &processed_path, &discarded_path);
        }

        Commands::Network {
            archivo,
            columna,
            umbral,
            salida,
            header_row,
        } => {
            let config = Config::load()?;
            config.require_embedder()?;

            let table = Table::load(&archivo, header_row)?;
            let column = table
                .headers
                .iter()
                .position(|h| h.trim() == columna)
                .with_context(|| {
                    format!(
                        "Columna '{}' no encontrada. Columnas disponibles: {}",
                        columna,
                        table.headers.join(", ")
                    )
                })?;

            // Distinct non-empty values, first-seen order.
            let mut labels: Vec<String> = Vec::new();
            for row in &table.rows {
                let value = row.get(column).map(String::as_str).unwrap_or("").trim();
                if !value.is_empty() && !labels.iter().any(|l| l == value) {
                    labels.push(value.to_string());
                }
            }
            info!(values = labels.len(), column = %columna, "Distinct values to embed");

            let embedder = OnnxEmbedder::load(&config.model_dir)?;
            let embeddings = embedder.embed_batch(&labels)?;

            let threshold = umbral.unwrap_or(config.similarity_threshold);
            let graph = network::build_network(&labels, &embeddings, threshold)?;

            let output = salida.unwrap_or_else(|| default_network_path(&archivo));
            network::write_graphml(&graph, &output)?;

            terminal::display_network_summary(
                &network::builder::stats(&graph),
                threshold,
                &output,
            );
        }

        Commands::Vocabulary { archivo, json } => {
            let roots = vocabulary::extractor::load_vocabulary(&archivo)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&roots)?);
            } else {
                for root in &roots {
                    vocabulary::print_hierarchy(root, 0);
                }
                let targets = vocabulary::level_terms(&roots, vocabulary::CLASSIFICATION_LEVEL);
                println!(
                    "\n{}",
                    format!("{} términos de nivel 3 (objetivo de clasificación)", targets.len())
                        .bold()
                );
            }
        }

        Commands::DownloadModel => {
            let config = Config::load()?;
            println!("Descargando el modelo de embeddings a {}", config.model_dir.display());
            download::download_model(&config.model_dir, &config.model_repo).await?;
            println!("{}", "Modelo listo.".green());
        }
    }

    Ok(())
}

/// Load the vocabulary and the embedding model, then build the
/// classifier over the level-3 terms.
fn build_classifier(config: &Config, vocab_path: &Path) -> Result<TopicClassifier> {
    config.require_embedder()?;

    let roots: Vec<Term> = vocabulary::extractor::load_vocabulary(vocab_path)?;
    let targets = vocabulary::level_terms(&roots, vocabulary::CLASSIFICATION_LEVEL);
    info!(terms = targets.len(), "Loaded classification vocabulary");

    let embedder = OnnxEmbedder::load(&config.model_dir)?;
    TopicClassifier::new(Box::new(embedder), &targets)
}

fn default_network_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "salida".to_string());
    input
        .parent()
        .unwrap_or(Path::new("."))
        .join(format!("{stem}_red.graphml"))
}
