use std::sync::Arc;

use tourdesk::api::ApiClient;
use tourdesk::config::AppConfig;
use tourdesk::core::catalog::{CatalogService, FilterInputs, Page, SortOrder};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _log_guard = tourdesk::core::logging::init();
    tracing::info!("{} v{} starting", tourdesk::NAME, tourdesk::VERSION);

    let config = AppConfig::load();
    let client = ApiClient::new(&config.api)?;
    let catalog = CatalogService::new(Arc::new(client));

    let inputs = FilterInputs {
        search_text: std::env::args().skip(1).collect::<Vec<_>>().join(" "),
        destination: config.catalog.destination.clone().unwrap_or_default(),
        sort: Some(SortOrder::RatingDesc),
        page: Page {
            page: 1,
            limit: config.catalog.page_size,
        },
        ..Default::default()
    };

    match catalog.search(&inputs).await {
        Ok(view) => {
            println!("{} tours ({} on server, via {})", view.items.len(), view.total, view.query.mode_name());
            for tour in &view.items {
                println!(
                    "  {:<32} {:<20} {:>10.2}  {:.1}*  {} slots",
                    tour.name, tour.destination, tour.price, tour.rating, tour.available_slots
                );
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            std::process::exit(1);
        }
    }
}
