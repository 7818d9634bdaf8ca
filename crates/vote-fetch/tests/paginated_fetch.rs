use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router, serve};
use common::{RawVote, VoteSource, VoterAddress};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use vote_fetch::{VoteFetchConfig, VoteFetcher};

#[derive(Clone, Copy)]
enum Behavior {
    ThreePages,
    FailSecondPage,
    EndlessCursor,
    StuckCursor,
    Slow,
}

#[derive(Clone)]
struct MockVotesState {
    behavior: Behavior,
    requests: Arc<AtomicUsize>,
    seen: Arc<Mutex<Vec<(String, Option<String>)>>>,
}

impl MockVotesState {
    fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            requests: Arc::new(AtomicUsize::new(0)),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

async fn spawn_mock(state: MockVotesState) -> (String, JoinHandle<()>) {
    let app = Router::new()
        .route("/v1/voters/{address}/votes", get(mock_votes))
        .with_state(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}/v1"), server)
}

fn fetcher(base_url: String, max_pages: u32) -> VoteFetcher {
    VoteFetcher::new(VoteFetchConfig {
        api_base_url: base_url,
        max_pages,
        request_timeout_ms: 2_000,
    })
    .expect("fetcher")
}

#[tokio::test]
async fn follows_cursor_until_last_page() {
    let state = MockVotesState::new(Behavior::ThreePages);
    let (base_url, server) = spawn_mock(state.clone()).await;
    let address = VoterAddress::new("0xabc");

    let report = fetcher(base_url, 10).fetch_votes_traced(&address).await;

    assert_eq!(
        report.votes,
        vec![
            RawVote::new("aave", 100),
            RawVote::new("aave", 200),
            RawVote::new("compound", 300),
            RawVote::new("ens", 400),
        ]
    );
    assert_eq!(report.pages_fetched, 3);
    assert!(!report.truncated);
    assert_eq!(report.error, None);
    assert_eq!(state.requests.load(Ordering::SeqCst), 3);

    let seen = state.seen.lock().unwrap().clone();
    assert_eq!(
        seen,
        vec![
            ("0xabc".to_owned(), None),
            ("0xabc".to_owned(), Some("p2".to_owned())),
            ("0xabc".to_owned(), Some("p3".to_owned())),
        ]
    );

    server.abort();
}

#[tokio::test]
async fn failure_mid_walk_keeps_collected_votes() {
    let state = MockVotesState::new(Behavior::FailSecondPage);
    let (base_url, server) = spawn_mock(state.clone()).await;

    let report = fetcher(base_url, 10)
        .fetch_votes_traced(&VoterAddress::new("0xabc"))
        .await;

    assert_eq!(
        report.votes,
        vec![RawVote::new("aave", 100), RawVote::new("aave", 200)]
    );
    assert_eq!(report.pages_fetched, 1);
    let error = report.error.expect("failure recorded");
    assert!(error.contains("500"), "error was {error}");
    assert_eq!(state.requests.load(Ordering::SeqCst), 2);

    server.abort();
}

#[tokio::test]
async fn page_limit_stops_endless_cursor_chain() {
    let state = MockVotesState::new(Behavior::EndlessCursor);
    let (base_url, server) = spawn_mock(state.clone()).await;

    let report = fetcher(base_url, 3)
        .fetch_votes_traced(&VoterAddress::new("0xabc"))
        .await;

    assert!(report.truncated);
    assert_eq!(report.pages_fetched, 3);
    assert_eq!(report.votes.len(), 3);
    assert_eq!(report.error, None);
    assert_eq!(state.requests.load(Ordering::SeqCst), 3);

    server.abort();
}

#[tokio::test]
async fn repeated_cursor_ends_the_walk() {
    let state = MockVotesState::new(Behavior::StuckCursor);
    let (base_url, server) = spawn_mock(state.clone()).await;

    let report = fetcher(base_url, 50)
        .fetch_votes_traced(&VoterAddress::new("0xabc"))
        .await;

    assert_eq!(report.pages_fetched, 2);
    assert!(!report.truncated);
    assert_eq!(state.requests.load(Ordering::SeqCst), 2);

    server.abort();
}

#[tokio::test]
async fn slow_api_times_out_into_empty_history() {
    let state = MockVotesState::new(Behavior::Slow);
    let (base_url, server) = spawn_mock(state).await;
    let fetcher = VoteFetcher::new(VoteFetchConfig {
        api_base_url: base_url,
        max_pages: 10,
        request_timeout_ms: 100,
    })
    .expect("fetcher");

    let report = fetcher.fetch_votes_traced(&VoterAddress::new("0xabc")).await;

    assert!(report.votes.is_empty());
    assert_eq!(report.pages_fetched, 0);
    assert!(report.error.is_some());

    server.abort();
}

#[tokio::test]
async fn unreachable_api_degrades_to_no_votes() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let fetcher = fetcher(format!("http://{addr}/v1"), 10);
    let votes = fetcher.fetch_votes(&VoterAddress::new("0xabc")).await;

    assert!(votes.is_empty());
}

#[tokio::test]
async fn vote_source_impl_returns_all_pages() {
    let state = MockVotesState::new(Behavior::ThreePages);
    let (base_url, server) = spawn_mock(state).await;

    let votes = fetcher(base_url, 10)
        .fetch_votes(&VoterAddress::new("0xabc"))
        .await;

    assert_eq!(votes.len(), 4);

    server.abort();
}

async fn mock_votes(
    State(state): State<MockVotesState>,
    Path(address): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let n = state.requests.fetch_add(1, Ordering::SeqCst);
    let cursor = query.get("cursor").cloned();
    state
        .seen
        .lock()
        .unwrap()
        .push((address, cursor.clone()));

    let first_page = json!({
        "data": [
            { "protocol": "aave", "timestamp": 100 },
            { "protocol": "aave", "timestamp": 200 }
        ],
        "nextCursor": "p2"
    });

    match state.behavior {
        Behavior::ThreePages => match cursor.as_deref() {
            None => (StatusCode::OK, Json(first_page)),
            Some("p2") => (
                StatusCode::OK,
                Json(json!({
                    "data": [{ "protocol": "compound", "timestamp": 300 }],
                    "nextCursor": "p3"
                })),
            ),
            _ => (
                StatusCode::OK,
                Json(json!({ "data": [{ "protocol": "ens", "timestamp": 400 }] })),
            ),
        },
        Behavior::FailSecondPage => match cursor {
            None => (StatusCode::OK, Json(first_page)),
            Some(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "upstream exploded" })),
            ),
        },
        Behavior::EndlessCursor => (
            StatusCode::OK,
            Json(json!({
                "data": [{ "protocol": "aave", "timestamp": n }],
                "nextCursor": format!("c{n}")
            })),
        ),
        Behavior::StuckCursor => (
            StatusCode::OK,
            Json(json!({
                "data": [{ "protocol": "aave", "timestamp": 1 }],
                "nextCursor": "same"
            })),
        ),
        Behavior::Slow => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            (StatusCode::OK, Json(json!({ "data": [] })))
        }
    }
}
