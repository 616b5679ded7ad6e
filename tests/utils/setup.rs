use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

use gameverdict::{
    catalog::{Game, GameId},
    AuthSession, Backends, Comment, EngagementConfig, EngagementController, EventBus, Notice,
    Review, Role, User,
};

use super::mocks::MockBackend;

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub controller: Arc<EngagementController>,
    pub backend: Arc<MockBackend>,
    pub event_bus: EventBus,
    pub notices: broadcast::Receiver<Notice>,
}

impl TestSetup {
    /// Notices published so far, oldest first
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        let mut seen = Vec::new();
        while let Ok(notice) = self.notices.try_recv() {
            seen.push(notice);
        }
        seen
    }

    pub fn last_notice(&mut self) -> Option<Notice> {
        self.drain_notices().pop()
    }
}

pub fn session(id: i64, role: Role) -> AuthSession {
    AuthSession::new(
        format!("token-{}", id),
        User::new(id, format!("user-{}", id), role),
    )
}

pub struct TestSetupBuilder {
    games: Vec<Game>,
    favorites: Vec<(i64, Vec<GameId>)>,
    reviews: Vec<Review>,
    comments: Vec<Comment>,
    session: Option<AuthSession>,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            games: Vec::new(),
            favorites: Vec::new(),
            reviews: Vec::new(),
            comments: Vec::new(),
            session: None,
        }
    }

    pub fn with_games(mut self, games: Vec<Game>) -> Self {
        self.games = games;
        self
    }

    pub fn with_favorites(mut self, user_id: i64, game_ids: Vec<GameId>) -> Self {
        self.favorites.push((user_id, game_ids));
        self
    }

    pub fn with_reviews(mut self, reviews: Vec<Review>) -> Self {
        self.reviews = reviews;
        self
    }

    pub fn with_comments(mut self, comments: Vec<Comment>) -> Self {
        self.comments = comments;
        self
    }

    pub fn signed_in_as(mut self, id: i64, role: Role) -> Self {
        self.session = Some(session(id, role));
        self
    }

    pub async fn build(self) -> TestSetup {
        let backend = Arc::new(MockBackend::new(
            self.games,
            self.favorites,
            self.reviews,
            self.comments,
        ));
        let event_bus = EventBus::new(64);
        let notices = event_bus.subscribe_notices();

        let backends = Backends::new(
            backend.clone(),
            backend.clone(),
            backend.clone(),
            backend.clone(),
        );
        let controller = Arc::new(EngagementController::new(
            backends,
            event_bus.clone(),
            EngagementConfig::default(),
        ));
        controller.set_session(self.session).await;

        TestSetup {
            controller,
            backend,
            event_bus,
            notices,
        }
    }
}

/// Polls `check` until it holds, failing the test after two seconds
pub async fn eventually<F, Fut>(mut check: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while !check().await {
        assert!(
            tokio::time::Instant::now() < deadline,
            "condition not met within 2s"
        );
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}
