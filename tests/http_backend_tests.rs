use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use url::Url;

use gameverdict::{
    auth::{AuthSession, Role, User},
    catalog::{CatalogRepository, HttpCatalogRepository},
    favorite::{FavoriteRepository, HttpFavoriteRepository},
    review::{
        CommentRepository, HttpCommentRepository, HttpReviewRepository, NewComment, NewReview,
        ReviewRepository,
    },
    ApiClient, ApiConfig, AppError, RatingLabel,
};

// ============================================================================
// Fake backend
// ============================================================================

#[derive(Clone, Default)]
struct Recorded {
    bodies: Arc<Mutex<Vec<(String, Value)>>>,
}

impl Recorded {
    fn push(&self, route: &str, body: Value) {
        self.bodies.lock().unwrap().push((route.to_string(), body));
    }

    fn bodies(&self) -> Vec<(String, Value)> {
        self.bodies.lock().unwrap().clone()
    }
}

const TOKEN: &str = "token-1";

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", TOKEN))
}

async fn list_games() -> Json<Value> {
    Json(json!([
        {
            "id": 1,
            "title": "Celeste",
            "description": "Climb",
            "link": "https://www.youtube.com/watch?v=70d9irlxiB4",
            "releaseDate": "2018-01-25",
            "platforms": ["PC"],
            "genres": ["Platformer"],
            "averageRating": 4.5,
            "reviewCount": 2
        },
        { "id": 2, "title": "Hades" }
    ]))
}

async fn get_game(Path(id): Path<i64>) -> impl IntoResponse {
    if id == 1 {
        (StatusCode::OK, Json(json!({ "id": 1, "title": "Celeste" })))
    } else {
        (StatusCode::NOT_FOUND, Json(json!({ "message": "Game not found" })))
    }
}

async fn slow_games() -> Json<Value> {
    tokio::time::sleep(Duration::from_millis(500)).await;
    Json(json!([]))
}

async fn user_favorites(headers: HeaderMap) -> impl IntoResponse {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({})));
    }
    (StatusCode::OK, Json(json!([{ "id": 2, "title": "Hades" }])))
}

async fn add_favorite(
    State(recorded): State<Recorded>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> StatusCode {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED;
    }
    recorded.push("add_favorite", json!(id));
    StatusCode::OK
}

async fn remove_favorite(State(recorded): State<Recorded>, Path(id): Path<i64>) -> StatusCode {
    recorded.push("remove_favorite", json!(id));
    StatusCode::NO_CONTENT
}

async fn game_reviews(Path(game_id): Path<i64>) -> Json<Value> {
    Json(json!([
        {
            "id": 10,
            "content": "Tough",
            "rating": "FIVE_STAR",
            "createdAt": "2024-05-01T12:00:00",
            "gameId": game_id,
            "reviewerId": 3,
            "reviewerUsername": "kim",
            "comments": [{ "ignored": true }]
        }
    ]))
}

async fn create_review(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({})));
    }
    recorded.push("create_review", body.clone());
    (
        StatusCode::OK,
        Json(json!({
            "id": 11,
            "content": body["content"],
            "rating": body["rating"],
            "createdAt": "2024-05-01T12:00:00",
            "gameId": body["gameId"],
            "reviewerId": body["reviewerId"],
            "reviewerUsername": "user-1"
        })),
    )
}

async fn delete_review() -> impl IntoResponse {
    (
        StatusCode::FORBIDDEN,
        Json(json!({ "message": "You can only delete your own reviews" })),
    )
}

async fn review_comments(Path(_review_id): Path<i64>) -> Json<Value> {
    Json(json!([]))
}

async fn create_comment(
    State(recorded): State<Recorded>,
    Json(body): Json<Value>,
) -> Json<Value> {
    recorded.push("create_comment", body.clone());
    Json(json!({
        "id": 100,
        "content": body["content"],
        "createdAt": "2024-05-01T12:30:00Z",
        "reviewId": body["reviewId"],
        "userId": body["userId"],
        "username": "user-1"
    }))
}

async fn delete_comment(Path(_id): Path<i64>) -> impl IntoResponse {
    (StatusCode::INTERNAL_SERVER_ERROR, "boom")
}

async fn spawn_backend() -> (Url, Recorded) {
    let recorded = Recorded::default();
    let api = Router::new()
        .route("/games", get(list_games))
        .route("/games/:id", get(get_game))
        .route("/favorites/user", get(user_favorites))
        .route("/favorites/:id", post(add_favorite))
        .route("/favorites/game/:id", delete(remove_favorite))
        .route("/reviews/game/:id", get(game_reviews))
        .route("/reviews", post(create_review))
        .route("/reviews/:id", delete(delete_review))
        .route("/comments/review/:id", get(review_comments))
        .route("/comments", post(create_comment))
        .route("/comments/:id", delete(delete_comment));
    let app = Router::new()
        .nest("/api", api)
        .route("/slow/games", get(slow_games))
        .with_state(recorded.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let base = Url::parse(&format!("http://{}/api", addr)).unwrap();
    (base, recorded)
}

fn client(base: Url) -> ApiClient {
    ApiClient::new(&ApiConfig::new(base, Duration::from_secs(5))).unwrap()
}

fn session() -> AuthSession {
    AuthSession::new(TOKEN, User::new(1, "user-1", Role::Reviewer))
}

// ============================================================================
// Catalog
// ============================================================================

#[tokio::test]
async fn lists_games_under_a_base_path() {
    let (base, _) = spawn_backend().await;
    let repo = HttpCatalogRepository::new(client(base));

    let games = repo.list_games().await.unwrap();

    assert_eq!(games.len(), 2);
    assert_eq!(games[0].embed_url(), "https://www.youtube.com/embed/70d9irlxiB4");
    assert_eq!(games[0].review_count, Some(2));
    assert_eq!(games[1].average_rating, None);
    assert!(games.iter().all(|g| !g.is_favorite));
}

#[tokio::test]
async fn missing_game_maps_to_not_found() {
    let (base, _) = spawn_backend().await;
    let repo = HttpCatalogRepository::new(client(base));

    assert_eq!(repo.get_game(1).await.unwrap().title, "Celeste");
    assert!(matches!(repo.get_game(7).await, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn slow_backend_is_a_network_failure() {
    let (base, _) = spawn_backend().await;
    let slow = base.join("/slow").unwrap();
    let api = ApiClient::new(&ApiConfig::new(slow, Duration::from_millis(50))).unwrap();
    let repo = HttpCatalogRepository::new(api);

    let err = repo.list_games().await.unwrap_err();

    assert!(matches!(err, AppError::Network(_)));
    assert_eq!(err.user_message("Failed to load games"), "Failed to load games");
}

#[tokio::test]
async fn unreachable_backend_is_a_network_failure() {
    // Grab a free port, then close it again
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let base = Url::parse(&format!("http://{}/api", addr)).unwrap();
    let repo = HttpCatalogRepository::new(client(base));

    assert!(matches!(repo.list_games().await, Err(AppError::Network(_))));
}

// ============================================================================
// Favorites
// ============================================================================

#[tokio::test]
async fn favorites_require_the_bearer_token() {
    let (base, recorded) = spawn_backend().await;
    let repo = HttpFavoriteRepository::new(client(base));

    let favorites = repo.list_favorites(&session()).await.unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].id, 2);

    let stranger = AuthSession::new("wrong", User::new(2, "x", Role::Member));
    let err = repo.list_favorites(&stranger).await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Remote {
            status: reqwest::StatusCode::UNAUTHORIZED,
            message: None
        }
    ));

    repo.add_favorite(&session(), 1).await.unwrap();
    repo.remove_favorite(&session(), 1).await.unwrap();
    let routes: Vec<String> = recorded.bodies().into_iter().map(|(r, _)| r).collect();
    assert_eq!(routes, vec!["add_favorite", "remove_favorite"]);
}

// ============================================================================
// Reviews and comments
// ============================================================================

#[tokio::test]
async fn reviews_arrive_without_comments() {
    let (base, _) = spawn_backend().await;
    let repo = HttpReviewRepository::new(client(base));

    let reviews = repo.list_reviews(4).await.unwrap();

    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].game_id, 4);
    assert_eq!(reviews[0].rating, RatingLabel::FiveStar);
    assert_eq!(reviews[0].comments, None);
    assert_eq!(reviews[0].created_at.to_rfc3339(), "2024-05-01T12:00:00+00:00");
}

#[tokio::test]
async fn create_review_sends_rating_label() {
    let (base, recorded) = spawn_backend().await;
    let repo = HttpReviewRepository::new(client(base));
    let body = NewReview {
        content: "Great".to_string(),
        game_id: 4,
        reviewer_id: 1,
        rating: RatingLabel::ThreeStar,
    };

    let created = repo.create_review(&session(), &body).await.unwrap();

    assert_eq!(created.id, 11);
    assert_eq!(created.rating, RatingLabel::ThreeStar);
    assert_eq!(
        recorded.bodies(),
        vec![(
            "create_review".to_string(),
            json!({ "content": "Great", "gameId": 4, "reviewerId": 1, "rating": "THREE_STAR" })
        )]
    );
}

#[tokio::test]
async fn forbidden_delete_keeps_backend_message() {
    let (base, _) = spawn_backend().await;
    let repo = HttpReviewRepository::new(client(base));

    let err = repo.delete_review(&session(), 10).await.unwrap_err();

    assert_eq!(
        err.user_message("Failed to delete review"),
        "You can only delete your own reviews"
    );
}

#[tokio::test]
async fn comment_calls_round_trip() {
    let (base, recorded) = spawn_backend().await;
    let repo = HttpCommentRepository::new(client(base));

    assert!(repo.list_comments(10).await.unwrap().is_empty());

    let body = NewComment {
        content: "Agreed".to_string(),
        review_id: 10,
        user_id: 1,
    };
    let created = repo.create_comment(&session(), &body).await.unwrap();
    assert_eq!(created.review_id, 10);
    assert_eq!(created.username, "user-1");
    assert_eq!(
        recorded.bodies()[0].1,
        json!({ "content": "Agreed", "reviewId": 10, "userId": 1 })
    );

    // Plain-text error body: no message to surface
    let err = repo.delete_comment(&session(), 100).await.unwrap_err();
    assert_eq!(err.user_message("Failed to delete comment"), "Failed to delete comment");
}
