use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

mod controller;
mod error;
mod format;
mod models;
mod transport;

use controller::QuoteFetchController;
use format::format_date;
use models::{FetchState, Phase};
use transport::HttpTransport;

const DEFAULT_ENDPOINT: &str = "https://api.quotable.io/random";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let endpoint =
        std::env::var("QUOTE_API_URL").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
    info!("Starting Random Quote Fetcher against {}", endpoint);

    let controller = QuoteFetchController::new(HttpTransport::new(), endpoint);
    let mut updates = controller.subscribe();
    controller.start();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let state = updates
            .wait_for(|state| state.phase != Phase::Loading)
            .await?
            .clone();
        render(&state);

        println!();
        println!("Press Enter for another quote (Ctrl-C to quit)");
        if lines.next_line().await?.is_none() {
            break;
        }
        controller.refresh();
    }

    Ok(())
}

fn render(state: &FetchState) {
    match state.phase {
        Phase::Ready => {
            if let Some(quotation) = &state.quotation {
                println!();
                println!("  \"{}\"", quotation.text);
                println!("      — {}", quotation.author);
                if !quotation.tags.is_empty() {
                    println!("      [{}]", quotation.tags.join(", "));
                }
                if let Some(added) = &quotation.date_added {
                    println!("      added {}", format_date(added));
                }
            }
        }
        Phase::Failed => {
            if let Some(message) = &state.error_message {
                eprintln!("Error: {message}");
            }
        }
        Phase::Loading => {}
    }
}
