use accuchart::{export, flow, DiagramRenderer, FlowError, FlowSlot, Theme};
use accuchart_sdk::{GeminiClient, GeminiClientOptions};
use clap::{Parser, Subcommand};
use std::io::Read as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "accuchart",
    about = "Generate accountability flowcharts and structure documents with Gemini"
)]
struct Cli {
    /// API key for the generation service.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: String,

    #[arg(long, env = "ACCUCHART_MODEL", default_value = "gemini-2.5-flash")]
    model: String,

    #[arg(long, env = "ACCUCHART_BASE_URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate an accountability flowchart from free-form text and export
    /// it as SVG.
    Chart {
        /// Text file to analyze, or `-` for stdin.
        #[arg(short, long, default_value = "-")]
        input: String,

        #[arg(long, default_value = export::CHART_FILENAME)]
        out: PathBuf,
    },
    /// Describe a chart image as a structured accountability document.
    Document {
        /// PNG or JPEG image of an accountability chart.
        #[arg(long)]
        image: PathBuf,

        #[arg(long, default_value = export::DOCUMENT_FILENAME)]
        out: PathBuf,
    },
    /// Expand a security alert summary into a structured report.
    Alert {
        #[arg(long)]
        summary: String,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    ReadInput {
        path: String,
        source: std::io::Error,
    },
    #[error(transparent)]
    Flow(#[from] FlowError),
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}", user_message(&error));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let client = GeminiClient::new(
        cli.model,
        GeminiClientOptions {
            api_key: cli.api_key,
            base_url: cli.base_url,
            ..Default::default()
        },
    );

    match cli.command {
        Command::Chart { input, out } => {
            let text = read_input(&input)?;
            let renderer = DiagramRenderer::new(Theme::default());
            let mut slot = FlowSlot::new();
            flow::generate_chart(&client, &renderer, &mut slot, &text).await?;
            flow::export_chart(&slot, &out)?;
            println!("Chart written to {}", out.display());
        }
        Command::Document { image, out } => {
            let data = std::fs::read(&image).map_err(|source| CliError::ReadInput {
                path: image.display().to_string(),
                source,
            })?;
            let mime = image_mime(&image).unwrap_or("application/octet-stream");
            let mut slot = FlowSlot::new();
            flow::generate_document(&client, &mut slot, data, mime).await?;
            flow::export_document(&slot, &out)?;
            println!("Document written to {}", out.display());
        }
        Command::Alert { summary } => {
            let mut slot = FlowSlot::new();
            flow::generate_alert_detail(&client, &mut slot, &summary).await?;
            if let Some(detail) = slot.artifact() {
                println!("Alert: {}", detail.action);
                println!("User:           {}", detail.user);
                println!("Risk:           {}", detail.risk);
                println!("Related CWE:    {}", detail.cwe);
                println!("Details:        {}", detail.details);
                println!("Recommendation:\n{}", detail.recommendation);
            }
        }
    }

    Ok(())
}

fn read_input(input: &str) -> Result<String, CliError> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|source| CliError::ReadInput {
                path: "stdin".to_string(),
                source,
            })?;
        Ok(text)
    } else {
        std::fs::read_to_string(input).map_err(|source| CliError::ReadInput {
            path: input.to_string(),
            source,
        })
    }
}

fn image_mime(path: &Path) -> Option<&'static str> {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => Some("image/png"),
        Some("jpg" | "jpeg") => Some("image/jpeg"),
        _ => None,
    }
}

/// Distinct guidance per failure class, so the user can tell a service
/// failure from an unusable reply.
fn user_message(error: &CliError) -> String {
    let CliError::Flow(flow_error) = error else {
        return error.to_string();
    };
    match flow_error {
        FlowError::InvalidInput(message) => format!("Input required: {message}"),
        FlowError::Generation(cause) => {
            format!("The AI service call failed: {cause}. Try the same action again.")
        }
        FlowError::Extraction(cause) => {
            format!("The AI replied, but no usable result was found in it: {cause}")
        }
        FlowError::Render(cause) => format!(
            "The generated chart script was rejected by the renderer: {cause}. Adjust the input text and retry."
        ),
        FlowError::ExportPrecondition(message) => format!("Nothing to export: {message}"),
        FlowError::Io(cause) => format!("Could not write the export file: {cause}"),
    }
}
