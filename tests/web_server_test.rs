use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use meetup_map::app::PresentationService;
use meetup_map::error::{MeetupError, Result};
use meetup_map::map::MapStyle;
use meetup_map::server::{create_server, AppState};
use meetup_map::types::{GroupSource, RawGroupData};
use serde_json::json;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

enum Reply {
    Groups(Vec<RawGroupData>),
    Outage,
}

struct StubDirectory {
    reply: Reply,
    searched: Mutex<Vec<String>>,
}

#[async_trait]
impl GroupSource for StubDirectory {
    fn source_name(&self) -> &'static str {
        "stub"
    }

    async fn search_groups(&self, location: &str, _radius: u32) -> Result<Vec<RawGroupData>> {
        self.searched.lock().unwrap().push(location.to_string());
        match &self.reply {
            Reply::Groups(groups) => Ok(groups.clone()),
            Reply::Outage => Err(MeetupError::Remote { status: 503 }),
        }
    }
}

fn stub(reply: Reply) -> Arc<StubDirectory> {
    Arc::new(StubDirectory {
        reply,
        searched: Mutex::new(Vec::new()),
    })
}

fn app_with(directory: Arc<StubDirectory>) -> axum::Router {
    let state = AppState::new(
        PresentationService::new(directory),
        MapStyle::default(),
        "98105".to_string(),
    );
    create_server(state)
}

fn seattle_devs() -> RawGroupData {
    json!({
        "category": { "name": "Tech" },
        "city": "Seattle",
        "country": "US",
        "description": "A".repeat(150),
        "join_mode": "open",
        "lat": 47.6,
        "lon": -122.3,
        "link": "http://x",
        "members": 42,
        "name": "Seattle Devs"
    })
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_index_searches_default_location() {
    let directory = stub(Reply::Groups(vec![seattle_devs()]));
    let app = app_with(directory.clone());

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Plotly.newPlot"));
    assert!(html.contains("scattermapbox"));
    assert!(html.contains("Seattle Devs"));
    assert_eq!(directory.searched.lock().unwrap().as_slice(), ["98105"]);
}

#[tokio::test]
async fn test_form_post_searches_submitted_zipcode() {
    let directory = stub(Reply::Groups(vec![seattle_devs()]));
    let app = app_with(directory.clone());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("zipcode=95125"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(directory.searched.lock().unwrap().as_slice(), ["95125"]);
}

#[tokio::test]
async fn test_no_groups_renders_no_results_state() {
    let app = app_with(stub(Reply::Groups(vec![])));

    let response = app
        .oneshot(Request::builder().uri("/?zipcode=98105").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("No groups found near 98105."));
    assert!(!html.contains("Plotly.newPlot"));
}

#[tokio::test]
async fn test_directory_outage_renders_unavailable_state() {
    let app = app_with(stub(Reply::Outage));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let html = body_text(response).await;
    assert!(html.contains("The meetup service is unavailable, try again."));
}

#[tokio::test]
async fn test_health() {
    let app = app_with(stub(Reply::Groups(vec![])));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["status"], "healthy");
}
