use std::time::Duration;

use clap::{Parser, Subcommand};

use proofstudio_core::{ReviewSummary, ReviewsData};
use proofstudio_gemini::GeminiClient;

#[derive(Debug, Parser)]
#[command(name = "proofstudio-cli")]
#[command(about = "Generate a shareable review-page payload from a Google Maps link")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch and summarize reviews for one business.
    Fetch {
        /// Google Maps share link for the business.
        #[arg(long)]
        url: String,
        /// Business name hint passed alongside the link.
        #[arg(long)]
        name: Option<String>,
        /// Print the raw JSON payload instead of the rendered page.
        #[arg(long)]
        json: bool,
    },
}

/// Rotating status lines shown while the model call is in flight.
const STATUS_MESSAGES: &[&str] = &[
    "Buscando el negocio en Google Maps…",
    "Leyendo las reseñas…",
    "Analizando el sentimiento de las opiniones…",
    "Traduciendo y resumiendo…",
];

const STATUS_INTERVAL: Duration = Duration::from_millis(2_500);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Fetch { url, name, json } => fetch(&url, name.as_deref(), json).await,
    }
}

async fn fetch(url: &str, name: Option<&str>, json: bool) -> anyhow::Result<()> {
    let config = proofstudio_core::load_app_config()?;
    let Some(api_key) = config.gemini_api_key.as_deref() else {
        anyhow::bail!("GEMINI_API_KEY is required to fetch reviews");
    };

    if !proofstudio_gemini::looks_like_maps_url(url) {
        tracing::warn!(url, "this does not look like a Google Maps share link");
    }

    let client = GeminiClient::new(
        api_key,
        &config.gemini_model,
        &config.target_locale,
        config.gemini_timeout_secs,
    )?;

    // Free-running ticker, independent of the request future; aborted the
    // moment the request resolves.
    let ticker = tokio::spawn(async {
        let mut interval = tokio::time::interval(STATUS_INTERVAL);
        for message in STATUS_MESSAGES.iter().cycle() {
            interval.tick().await;
            eprintln!("{message}");
        }
    });

    let result = client.generate_reviews(url, name).await;
    ticker.abort();

    match result {
        Ok(data) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&data)?);
            } else {
                render(&data);
            }
            Ok(())
        }
        Err(err) => {
            tracing::error!(error = %err, "review fetch failed");
            anyhow::bail!("{}", err.user_message())
        }
    }
}

fn render(data: &ReviewsData) {
    println!("{}", data.business_name);
    println!(
        "{} {:.1} · {} reseñas",
        stars(data.average_rating),
        data.average_rating,
        data.total_reviews
    );
    println!();
    match &data.summary {
        ReviewSummary::Text(text) => println!("{text}"),
        ReviewSummary::Structured(summary) => {
            println!("Precio: {}", summary.price);
            println!("Servicio: {}", summary.service);
            println!("Lo bueno: {}", summary.the_good);
            println!("A mejorar: {}", summary.the_bad);
            println!();
            println!("{}", summary.overall_summary);
        }
    }
    for review in &data.reviews {
        println!();
        println!("{} — {}", stars(f64::from(review.rating)), review.author);
        println!("{}", review.text);
    }
}

/// Five-character star bar, e.g. `★★★★☆` for 4.3.
fn stars(rating: f64) -> String {
    (1..=5)
        .map(|star| {
            if f64::from(star) <= rating + 0.5 {
                '★'
            } else {
                '☆'
            }
        })
        .collect()
}
