use anyhow::Context;
use stayhub_app::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "stayhub_app=debug,stayhub_checkout=debug,stayhub_store=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = AppState::from_environment().context("Failed to start stayhub")?;
    let category = std::env::args().nth(1);

    let rooms = state.catalog().browse(category.as_deref()).await?;
    tracing::info!(count = rooms.len(), category = ?category, "Rooms");
    for room in rooms {
        tracing::info!(
            id = %room.id,
            title = %room.details.title,
            location = %room.details.location,
            price = %room.details.price,
            available = room.is_available(),
            "Room"
        );
    }
    Ok(())
}
