//! fhirview: CLI for browsing patient records on a FHIR R4 server

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fhirview::client::FhirClient;
use fhirview::config::Config;
use fhirview::export;
use fhirview::record::fetch_record;
use fhirview::render;
use fhirview_core::Result;

#[derive(Parser)]
#[command(name = "fhirview", version, about = "Browse patient records on a FHIR R4 server")]
struct Cli {
    /// FHIR base URL (overrides FHIR_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search patients and list them page by page
    Patients {
        /// Filter by name (server-side `name` search parameter)
        #[arg(long)]
        name: Option<String>,

        /// Number of result pages to fetch by following next links
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },

    /// Show a patient's full clinical record
    Show {
        /// Patient resource id
        patient_id: String,
    },

    /// Export a patient's record to a file
    Export {
        /// Patient resource id
        patient_id: String,

        /// Export format
        #[arg(long, value_enum, default_value = "text")]
        format: ExportFormat,

        /// Output path (defaults to patient.txt or patient.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExportFormat {
    Text,
    Pdf,
}

#[tokio::main]
async fn main() {
    // Initialize tracing; stdout is reserved for rendered output
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    tracing::debug!(base_url = %config.base_url, "using FHIR server");

    if let Err(err) = run(cli.command, &config).await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run(command: Command, config: &Config) -> Result<()> {
    let client = FhirClient::new(config)?;

    match command {
        Command::Patients { name, pages } => {
            let pages = pages.max(1);
            let mut page = client.search_patients(name.as_deref()).await?;

            for page_no in 1..=pages {
                // Only the last printed page advertises the remaining cursor
                let has_more = page.next.is_some() && page_no == pages;
                print!(
                    "{}",
                    render::render_patient_list(&page.patients, page_no, has_more)
                );

                // Follow the cursor while pages remain on both sides
                let Some(next_url) = page.next.filter(|_| page_no < pages) else {
                    break;
                };
                page = client.fetch_page(&next_url).await?;
            }
        }

        Command::Show { patient_id } => {
            let record = fetch_record(&client, &patient_id).await?;
            print!("{}", render::render_record(&record));
        }

        Command::Export {
            patient_id,
            format,
            output,
        } => {
            let record = fetch_record(&client, &patient_id).await?;
            let path = match format {
                ExportFormat::Text => {
                    let path = output.unwrap_or_else(|| PathBuf::from("patient.txt"));
                    export::export_text(&record, &path)?;
                    path
                }
                ExportFormat::Pdf => {
                    let path = output.unwrap_or_else(|| PathBuf::from("patient.pdf"));
                    export::export_pdf(&record, &path)?;
                    path
                }
            };
            tracing::info!(patient = %patient_id, path = %path.display(), "record exported");
            println!("Exported record to {}", path.display());
        }
    }

    Ok(())
}
