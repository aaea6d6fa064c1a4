//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::trafikverket::{TrafikverketError, Transport};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router<T: Transport + 'static>(state: AppState<T>, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(landing::<T>))
        .route("/health", get(health))
        .route("/now/:place", get(board::<T>))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Redirect to the first board.
async fn landing<T: Transport + 'static>(State(state): State<AppState<T>>) -> Response {
    match state.board.default_place() {
        Some(place) => (StatusCode::FOUND, [(header::LOCATION, place.href())]).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Trains leaving a place from now until the lookahead runs out.
async fn board<T: Transport + 'static>(
    State(state): State<AppState<T>>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let place = state.board.place(&slug).ok_or_else(|| AppError::NotFound {
        message: format!("No board for {slug}"),
        html: accepts_html(&headers),
    })?;

    let after = Utc::now().with_timezone(&state.board.timezone).fixed_offset();
    let before = after + state.board.lookahead;

    let trains = state
        .trafikverket
        .fetch_stopping_trains(&place.from, &place.to, after, before)
        .await?;

    // Return HTML or JSON based on Accept header
    if accepts_html(&headers) {
        let template = BoardTemplate::new(place, &state.board.places, &trains);
        let html = template.render().map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;

        Ok(Html(html).into_response())
    } else {
        Ok(Json(BoardResponse::new(place, &trains)).into_response())
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    NotFound { message: String, html: bool },
    Upstream(TrafikverketError),
    Internal { message: String },
}

impl From<TrafikverketError> for AppError {
    fn from(e: TrafikverketError) -> Self {
        AppError::Upstream(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound { message, html } => {
                warn!(%message, "not found");
                if html {
                    return not_found_page(&message);
                }
                (StatusCode::NOT_FOUND, message)
            }
            // Riders get the same opaque failure whatever went wrong upstream.
            AppError::Upstream(e) => {
                error!(kind = e.kind(), error = %e, "fetching trains failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::Internal { message } => {
                error!(%message, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

fn not_found_page(message: &str) -> Response {
    match (NotFoundTemplate { message }).render() {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(e) => {
            error!(error = %e, "rendering not found page failed");
            (StatusCode::NOT_FOUND, message.to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use tower::ServiceExt;

    use crate::trafikverket::{MockTransport, TrafikverketClient};
    use crate::web::BoardConfig;

    const LIST_REPLY: &str = r#"{"RESPONSE": {"RESULT": [{"TrainAnnouncement": [
        {"AdvertisedTrainIdent": "43212"},
        {"AdvertisedTrainIdent": "43214"}
    ]}]}}"#;

    const DETAIL_REPLY: &str = r#"{"RESPONSE": {"RESULT": [{"TrainAnnouncement": [
        {
            "LocationSignature": "U",
            "AdvertisedTimeAtLocation": "2024-03-01T08:05:00",
            "AdvertisedTrainIdent": "43212",
            "Operator": "SJ",
            "TrackAtLocation": "4",
            "OtherInformation": [
                {"Code": "ONA151", "Description": "Stannar ej i Märsta"},
                {"Code": "XYZ", "Description": "Kort tåg"}
            ]
        },
        {
            "LocationSignature": "U",
            "AdvertisedTimeAtLocation": "2024-03-01T08:20:00",
            "AdvertisedTrainIdent": "43214",
            "Operator": "SL",
            "TrackAtLocation": "2",
            "Deviation": [{"Code": "ONA124", "Description": "Buss ersätter"}]
        }
    ]}]}}"#;

    fn app(transport: MockTransport) -> Router {
        let client = TrafikverketClient::with_transport("test-key", transport);
        create_router(AppState::new(client, BoardConfig::default()), "static")
    }

    fn get_request(uri: &str, accept: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header(header::ACCEPT, accept)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn health_check() {
        let response = app(MockTransport::new())
            .oneshot(get_request("/health", "*/*"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "ok");
    }

    #[tokio::test]
    async fn landing_redirects_to_first_board() {
        let response = app(MockTransport::new())
            .oneshot(get_request("/", "text/html"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], "/now/uppsala");
    }

    #[tokio::test]
    async fn unknown_board_is_not_found() {
        let transport = MockTransport::new();
        let response = app(transport.clone())
            .oneshot(get_request("/now/malmo", "text/html"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(
            response.headers()[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/html")
        );
        assert!(body_string(response).await.contains("No board for malmo"));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn unknown_board_as_json() {
        let response = app(MockTransport::new())
            .oneshot(get_request("/now/malmo", "application/json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["error"], "No board for malmo");
    }

    #[tokio::test]
    async fn serves_manifest_from_static_dir() {
        let response = app(MockTransport::new())
            .oneshot(get_request("/static/manifest.json", "*/*"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["name"], "Pendlarn");
    }

    #[tokio::test]
    async fn board_as_html() {
        let transport = MockTransport::new()
            .with_reply(200, LIST_REPLY)
            .with_reply(200, DETAIL_REPLY);
        let response = app(transport.clone())
            .oneshot(get_request("/now/uppsala", "text/html,application/xhtml+xml"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("<td>08:05</td>"));
        assert!(html.contains("<td>43214</td>"));
        assert!(html.contains("Kort tåg"));
        assert!(html.contains("Buss ersätter"));
        assert!(!html.contains("Märsta"));

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests[0].contains("<EQ name=\"LocationSignature\" value=\"U\"/>"));
        assert!(requests[0].contains("<EQ name=\"ToLocation.LocationName\" value=\"Cst\"/>"));
    }

    #[tokio::test]
    async fn board_as_json() {
        let transport = MockTransport::new()
            .with_reply(200, LIST_REPLY)
            .with_reply(200, DETAIL_REPLY);
        let response = app(transport)
            .oneshot(get_request("/now/uppsala", "application/json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["from"], "U");
        assert_eq!(json["to"], "Cst");
        assert_eq!(json["trains"][0]["time"], "08:05");
        assert_eq!(json["trains"][1]["ident"], "43214");
        assert_eq!(json["trains"][0]["information"].as_array().unwrap().len(), 1);
        assert_eq!(json["trains"][1]["deviations"][0]["code"], "ONA124");
    }

    #[tokio::test]
    async fn stockholm_board_swaps_endpoints() {
        let transport = MockTransport::new()
            .with_reply(200, LIST_REPLY)
            .with_reply(200, DETAIL_REPLY);
        app(transport.clone())
            .oneshot(get_request("/now/stockholm", "application/json"))
            .await
            .unwrap();

        let requests = transport.requests();
        assert!(requests[0].contains("<EQ name=\"LocationSignature\" value=\"Cst\"/>"));
        assert!(requests[0].contains("<EQ name=\"ToLocation.LocationName\" value=\"U\"/>"));
        assert!(requests[1].contains("<EQ name=\"LocationSignature\" value=\"Cst\"/>"));
    }

    #[tokio::test]
    async fn upstream_failure_is_opaque_500() {
        let transport = MockTransport::new().with_reply(401, "");
        let response = app(transport.clone())
            .oneshot(get_request("/now/uppsala", "text/html"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_string(response).await;
        assert!(body.contains("Internal Server Error"));
        assert!(!body.contains("API key"));
        assert_eq!(transport.call_count(), 1);
    }
}
