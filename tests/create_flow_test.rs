//! End-to-end tests for `POST /create`.
//!
//! Each test starts the real application router on an ephemeral port,
//! together with two in-process mock upstreams standing in for the
//! chat-completion service and the Spotify Web API. The mocks count every
//! call they receive so the tests can assert which external capabilities
//! were (and were not) invoked.

use std::{
    net::SocketAddr,
    path::PathBuf,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};

use tunesmith::{
    config::Config,
    server::{AppState, build_router},
};

// ---- Mock chat-completion upstream ----

struct MockCompletion {
    calls: AtomicUsize,
    status: u16,
    reply: String,
}

fn mock_completion(reply: &str) -> Arc<MockCompletion> {
    Arc::new(MockCompletion {
        calls: AtomicUsize::new(0),
        status: 200,
        reply: reply.to_string(),
    })
}

fn failing_completion(status: u16) -> Arc<MockCompletion> {
    Arc::new(MockCompletion {
        calls: AtomicUsize::new(0),
        status,
        reply: String::new(),
    })
}

async fn completion_handler(State(state): State<Arc<MockCompletion>>) -> impl IntoResponse {
    state.calls.fetch_add(1, Ordering::SeqCst);

    if state.status != 200 {
        return (
            StatusCode::from_u16(state.status).unwrap(),
            Json(json!({ "error": "completion unavailable" })),
        )
            .into_response();
    }

    Json(json!({
        "choices": [{ "message": { "role": "assistant", "content": state.reply } }]
    }))
    .into_response()
}

fn completion_router(state: Arc<MockCompletion>) -> Router {
    Router::new()
        .route("/chat/completions", post(completion_handler))
        .with_state(state)
}

// ---- Mock Spotify upstream ----

struct MockSpotify {
    authorized: bool,
    me_calls: AtomicUsize,
    search_calls: AtomicUsize,
    playlist_creates: AtomicUsize,
    added_uris: Mutex<Vec<String>>,
    // (needle contained in the search query, track items returned for it)
    catalog: Vec<(String, Value)>,
}

fn mock_spotify(authorized: bool, catalog: Vec<(&str, Value)>) -> Arc<MockSpotify> {
    Arc::new(MockSpotify {
        authorized,
        me_calls: AtomicUsize::new(0),
        search_calls: AtomicUsize::new(0),
        playlist_creates: AtomicUsize::new(0),
        added_uris: Mutex::new(Vec::new()),
        catalog: catalog
            .into_iter()
            .map(|(needle, items)| (needle.to_string(), items))
            .collect(),
    })
}

fn track_json(id: &str, name: &str, popularity: u32) -> Value {
    json!({
        "id": id,
        "name": name,
        "uri": format!("spotify:track:{id}"),
        "popularity": popularity,
        "artists": [{ "id": format!("{id}_artist"), "name": "Artist" }]
    })
}

async fn me_handler(State(state): State<Arc<MockSpotify>>) -> impl IntoResponse {
    state.me_calls.fetch_add(1, Ordering::SeqCst);

    if state.authorized {
        Json(json!({ "id": "user-1", "display_name": "Test User" })).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "invalid token" })),
        )
            .into_response()
    }
}

#[derive(Deserialize)]
struct SearchParams {
    q: String,
}

async fn search_handler(
    State(state): State<Arc<MockSpotify>>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    state.search_calls.fetch_add(1, Ordering::SeqCst);

    let items = state
        .catalog
        .iter()
        .find(|(needle, _)| params.q.contains(needle))
        .map(|(_, items)| items.clone())
        .unwrap_or_else(|| json!([]));

    Json(json!({ "tracks": { "items": items } }))
}

async fn create_playlist_handler(
    State(state): State<Arc<MockSpotify>>,
    Path(_user_id): Path<String>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    state.playlist_creates.fetch_add(1, Ordering::SeqCst);
    Json(json!({ "id": "pl-1", "name": body["name"] }))
}

async fn add_tracks_handler(
    State(state): State<Arc<MockSpotify>>,
    Path(_playlist_id): Path<String>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let uris: Vec<String> = body["uris"]
        .as_array()
        .cloned()
        .unwrap_or_default()
        .iter()
        .filter_map(|uri| uri.as_str())
        .map(str::to_string)
        .collect();
    state.added_uris.lock().unwrap().extend(uris);

    Json(json!({ "snapshot_id": "snap-1" }))
}

fn spotify_router(state: Arc<MockSpotify>) -> Router {
    Router::new()
        .route("/me", get(me_handler))
        .route("/search", get(search_handler))
        .route("/users/{user_id}/playlists", post(create_playlist_handler))
        .route("/playlists/{playlist_id}/tracks", post(add_tracks_handler))
        .with_state(state)
}

// ---- Harness ----

async fn spawn_server(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

async fn spawn_app(completion: Arc<MockCompletion>, spotify: Arc<MockSpotify>) -> SocketAddr {
    let completion_addr = spawn_server(completion_router(completion)).await;
    let spotify_addr = spawn_server(spotify_router(spotify)).await;

    let config = Config {
        server_address: "127.0.0.1:0".to_string(),
        openai_api_key: "test-key".to_string(),
        openai_api_url: format!("http://{completion_addr}"),
        openai_model: "gpt-3.5-turbo".to_string(),
        spotify_api_url: format!("http://{spotify_addr}"),
        static_dir: PathBuf::from("no-such-bundle"),
    };

    spawn_server(build_router(Arc::new(AppState::new(config)))).await
}

fn valid_body() -> Value {
    json!({
        "playlistDescription": "chill jazz",
        "numberOfSongs": 2,
        "playlistName": "Chill",
        "accessToken": "valid"
    })
}

async fn post_create(addr: SocketAddr, body: &Value) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("http://{addr}/create"))
        .json(body)
        .send()
        .await
        .unwrap()
}

// ---- Tests ----

#[tokio::test]
async fn test_invalid_body_answers_400_without_external_calls() {
    let completion = mock_completion("So What; Miles Davis");
    let spotify = mock_spotify(true, vec![]);
    let addr = spawn_app(Arc::clone(&completion), Arc::clone(&spotify)).await;

    let body = json!({
        "playlistDescription": "chill jazz",
        "numberOfSongs": 2,
        "playlistName": "Chill"
        // accessToken missing
    });
    let response = post_create(addr, &body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let errors: Value = response.json().await.unwrap();
    assert_eq!(errors["errors"][0]["field"], "accessToken");

    assert_eq!(completion.calls.load(Ordering::SeqCst), 0);
    assert_eq!(spotify.me_calls.load(Ordering::SeqCst), 0);
    assert_eq!(spotify.search_calls.load(Ordering::SeqCst), 0);
    assert_eq!(spotify.playlist_creates.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_rejected_credential_answers_401_before_any_completion_call() {
    let completion = mock_completion("So What; Miles Davis");
    let spotify = mock_spotify(false, vec![]);
    let addr = spawn_app(Arc::clone(&completion), Arc::clone(&spotify)).await;

    let response = post_create(addr, &valid_body()).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.text().await.unwrap(), "\"Bad Spotify Credentials\"");

    assert_eq!(completion.calls.load(Ordering::SeqCst), 0);
    assert_eq!(spotify.playlist_creates.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_create_flow_end_to_end() {
    let completion = mock_completion("So What; Miles Davis\nBlue in Green; Bill Evans");
    let spotify = mock_spotify(
        true,
        vec![
            ("So What", json!([track_json("id-so-what", "So What", 80)])),
            (
                "Blue in Green",
                json!([track_json("id-big", "Blue in Green", 70)]),
            ),
        ],
    );
    let addr = spawn_app(Arc::clone(&completion), Arc::clone(&spotify)).await;

    let response = post_create(addr, &valid_body()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let tracks: Value = response.json().await.unwrap();
    let tracks = tracks.as_array().unwrap();
    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0]["id"], "id-so-what");
    assert_eq!(tracks[1]["id"], "id-big");

    assert_eq!(completion.calls.load(Ordering::SeqCst), 1);
    assert_eq!(spotify.search_calls.load(Ordering::SeqCst), 2);
    assert_eq!(spotify.playlist_creates.load(Ordering::SeqCst), 1);
    assert_eq!(
        *spotify.added_uris.lock().unwrap(),
        vec![
            "spotify:track:id-so-what".to_string(),
            "spotify:track:id-big".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_resolver_picks_most_popular_match() {
    let completion = mock_completion("So What; Miles Davis");
    let spotify = mock_spotify(
        true,
        vec![(
            "So What",
            json!([
                track_json("low", "So What", 10),
                track_json("first-55", "So What", 55),
                track_json("second-55", "So What", 55),
                track_json("tail", "So What", 3),
            ]),
        )],
    );
    let addr = spawn_app(completion, Arc::clone(&spotify)).await;

    let mut body = valid_body();
    body.as_object_mut()
        .unwrap()
        .insert("numberOfSongs".to_string(), json!(1));
    let response = post_create(addr, &body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let tracks: Value = response.json().await.unwrap();
    assert_eq!(tracks.as_array().unwrap().len(), 1);
    assert_eq!(tracks[0]["id"], "first-55");
}

#[tokio::test]
async fn test_unmatched_suggestion_is_omitted_from_result() {
    let completion = mock_completion("So What; Miles Davis\nBlue in Green; Bill Evans");
    // Only the first suggestion has a catalog match
    let spotify = mock_spotify(
        true,
        vec![("So What", json!([track_json("id-so-what", "So What", 80)]))],
    );
    let addr = spawn_app(completion, Arc::clone(&spotify)).await;

    let response = post_create(addr, &valid_body()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let tracks: Value = response.json().await.unwrap();
    assert_eq!(tracks.as_array().unwrap().len(), 1);
    assert_eq!(tracks[0]["id"], "id-so-what");

    assert_eq!(spotify.search_calls.load(Ordering::SeqCst), 2);
    assert_eq!(
        *spotify.added_uris.lock().unwrap(),
        vec!["spotify:track:id-so-what".to_string()]
    );
}

#[tokio::test]
async fn test_completion_failure_skips_catalog_and_playlist() {
    let completion = failing_completion(500);
    let spotify = mock_spotify(true, vec![]);
    let addr = spawn_app(Arc::clone(&completion), Arc::clone(&spotify)).await;

    let response = post_create(addr, &valid_body()).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    assert_eq!(completion.calls.load(Ordering::SeqCst), 1);
    assert_eq!(spotify.search_calls.load(Ordering::SeqCst), 0);
    assert_eq!(spotify.playlist_creates.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_health_endpoint() {
    let completion = mock_completion("");
    let spotify = mock_spotify(true, vec![]);
    let addr = spawn_app(completion, spotify).await;

    let response = reqwest::Client::new()
        .get(format!("http://{addr}/health"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}
