//! User directory demo against a JSONPlaceholder-compatible endpoint
//!
//! ```sh
//! cargo run --example directory_demo --features http -- [config.yaml] [search] [favorite-id]
//! ```
//!
//! Without a config file the public fixture is used and favorites live in
//! memory. Set `RUST_LOG=userdesk=debug` to watch the views recompute.

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use userdesk::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("userdesk=info")),
        )
        .init();

    let mut args = std::env::args().skip(1).peekable();
    let config = match args.next_if(|arg| arg.ends_with(".yaml") || arg.ends_with(".yml")) {
        Some(path) => DirectoryConfig::from_yaml_file(&path)?,
        None => DirectoryConfig::default(),
    };
    let search = args.next().unwrap_or_default();
    let favorite = args.next().map(|id| id.parse::<UserId>()).transpose()?;

    println!("📇 userdesk directory demo");
    println!("==========================\n");
    println!("Source: {}", config.api_url);

    // Load the collection
    let loader = CollectionLoader::new(config.client()?);
    let state = loader.load().await;
    if let Some(error) = &state.error {
        println!("⚠️  Could not load users: {}", error);
        return Ok(());
    }
    println!("Loaded {} users\n", state.collection.len());

    // List view
    let spec = QuerySpec::new().search(search.as_str()).sort_by(SortKey::asc("name"));
    let mut list = QueryView::new();
    let page = paginate(list.rows(&state.collection, &spec), config.first_page());

    println!("🔎 Search {:?}: {} match(es)", search, page.pagination.total);
    for user in &page.data {
        println!(
            "  #{:<3} {:<25} {}",
            user.id,
            user.name.as_deref().unwrap_or("-"),
            user.company_name().unwrap_or("-")
        );
    }

    // Favorites
    let mut favorites = config.open_favorites()?;
    if let Some(id) = favorite {
        let now = favorites.toggle(id)?;
        println!("\n⭐ User #{} {}", id, if now { "starred" } else { "unstarred" });
    }

    let mut starred = FavoritesView::new();
    let rows = starred.rows(&state.collection, &favorites);
    println!("\n⭐ Favorites ({}):", rows.len());
    for user in rows {
        println!("  #{:<3} {}", user.id, user.name.as_deref().unwrap_or("-"));
    }

    let missing = favorites.missing_from(state.collection.records());
    if !missing.is_empty() {
        println!("  ({} favorite(s) not in the current collection)", missing.len());
    }

    Ok(())
}
