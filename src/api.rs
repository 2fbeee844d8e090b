// College API - REST routes with Axum
//
// Route table (nested under /api by `router`):
//   GET    /college            all colleges
//   POST   /college            {colleges: [name, ...]}   → 201
//   PUT    /college            {oldCollegeName, newCollegeName}
//   DELETE /college            {collegeName?, collegeCode?}
//   GET    /colleges?letter=X  colleges starting with X
//   GET    /random             one random college
//
// Every error body is {"error": "..."}.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::college::College;
use crate::error::Error;
use crate::service::{CollegeService, MSG_SINGLE_LETTER};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: CollegeService,
}

// ============================================================================
// Request / response shapes
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateCollegesRequest {
    pub colleges: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameCollegeRequest {
    pub old_college_name: Option<String>,
    pub new_college_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCollegeRequest {
    pub college_name: Option<String>,
    pub college_code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LetterQuery {
    pub letter: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Serialize)]
struct MessageBody {
    message: &'static str,
}

// ============================================================================
// Error mapping
// ============================================================================

/// Error as seen by an HTTP caller
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(Error::validation(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            Error::Validation(message) => (StatusCode::BAD_REQUEST, message),
            Error::NotFound(message) => (StatusCode::NOT_FOUND, message),
            other => {
                tracing::error!(error = %other, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(MessageBody { message: "OK" })
}

/// GET /api/college - Get all colleges
async fn list_colleges(State(state): State<AppState>) -> ApiResult<Json<Vec<College>>> {
    Ok(Json(state.service.list_all()?))
}

/// POST /api/college - Bulk create from names
async fn create_colleges(
    State(state): State<AppState>,
    body: Result<Json<CreateCollegesRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Vec<College>>)> {
    // Wrong shapes ("colleges": "x", [1, 2], no body) are all the same 400
    let names = body
        .ok()
        .and_then(|Json(req)| req.colleges)
        .unwrap_or_default();

    let saved = state.service.create_many(&names)?;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// PUT /api/college - Rename a college, regenerating its code
async fn rename_college(
    State(state): State<AppState>,
    body: Result<Json<RenameCollegeRequest>, JsonRejection>,
) -> ApiResult<Json<College>> {
    let Json(req) = body?;

    let college = state.service.rename(
        req.old_college_name.as_deref(),
        req.new_college_name.as_deref(),
    )?;
    Ok(Json(college))
}

/// DELETE /api/college - Delete by name (preferred) or code
async fn delete_college(
    State(state): State<AppState>,
    body: Result<Json<DeleteCollegeRequest>, JsonRejection>,
) -> ApiResult<Json<MessageBody>> {
    let Json(req) = body?;

    state
        .service
        .delete(req.college_name.as_deref(), req.college_code.as_deref())?;
    Ok(Json(MessageBody {
        message: "College deleted successfully",
    }))
}

/// GET /api/colleges?letter=X - Colleges by first letter
async fn colleges_by_letter(
    State(state): State<AppState>,
    query: Result<Query<LetterQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<College>>> {
    // ?letter=a&letter=b and friends fail to deserialize
    let Query(query) = query.map_err(|_| Error::validation(MSG_SINGLE_LETTER))?;

    Ok(Json(state.service.list_by_letter(query.letter.as_deref())?))
}

/// GET /api/random - One random college
async fn random_college(State(state): State<AppState>) -> ApiResult<Json<College>> {
    Ok(Json(state.service.random()?))
}

/// GET / - API documentation page
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../web/index.html"))
}

/// GET /college - Admin page
async fn serve_admin() -> impl IntoResponse {
    Html(include_str!("../web/college.html"))
}

// ============================================================================
// Router
// ============================================================================

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/college",
            get(list_colleges)
                .post(create_colleges)
                .put(rename_college)
                .delete(delete_college),
        )
        .route("/colleges", get(colleges_by_letter))
        .route("/random", get(random_college))
        .with_state(state)
}

/// Full application: pages, JSON API, CORS and request tracing
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(serve_index))
        .route("/college", get(serve_admin))
        .nest("/api", api_routes(state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
