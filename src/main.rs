use std::sync::Arc;

use gameverdict::{
    rating::stars_for, ApiClient, ApiConfig, Backends, EngagementConfig, EngagementController,
    EventBus,
};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gameverdict=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        error!(error = %e, "gameverdict exited with an error");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), gameverdict::AppError> {
    let api_config = ApiConfig::from_env()?;
    info!(base_url = %api_config.base_url, "Connecting to review backend");

    let api = ApiClient::new(&api_config)?;
    let engagement_config = EngagementConfig::from_env();
    let event_bus = EventBus::new(engagement_config.channel_capacity);
    let controller = Arc::new(EngagementController::new(
        Backends::http(&api),
        event_bus.clone(),
        engagement_config,
    ));
    let _auth_task = controller.watch_auth();

    let mut notices = event_bus.subscribe_notices();
    tokio::spawn(async move {
        while let Ok(notice) = notices.recv().await {
            info!(level = ?notice.level, message = %notice.message, "Notice");
        }
    });

    let games = controller.load_games().await?;
    for game in &games {
        let stars = game.average_rating.map(stars_for);
        info!(
            game_id = game.id,
            title = %game.title,
            reviews = game.review_count.unwrap_or(0),
            stars = ?stars,
            trailer = %game.embed_url(),
            "Game"
        );
    }

    // Optionally open one game's detail view
    if let Some(game_id) = std::env::var("GAMEVERDICT_GAME_ID")
        .ok()
        .and_then(|s| s.parse().ok())
    {
        controller.open_game(game_id).await?;
        for review in controller.reviews().await {
            info!(
                review_id = review.id,
                author = %review.reviewer_username,
                stars = review.stars(),
                comments = review.comments.as_ref().map(Vec::len).unwrap_or(0),
                "Review"
            );
        }
    }

    Ok(())
}
