//! FILENAME: app/src/server.rs
// PURPOSE: The HTTP surface of the wizard: thin axum handlers over the
// command layer.
// CONTEXT: The two assistant-backed handlers hold no state lock across their
// await; begin/commit/fail in the command layer bracket the call.

use crate::api_types::{
    CleanParams, DashboardParams, DashboardResult, EditResult, ExportResult, FilterOptionsResult,
    PageQuery, RestoreParams, ReviewResult, SetFilterParams, StepResult, TableViewResult,
    UploadResult,
};
use crate::assistant::{Assistant, AssistantConfig};
use crate::{
    clean_commands, dashboard_commands, filter_commands, log_info, logging, upload_commands,
    AppState,
};
use axum::extract::{Multipart, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;

/// Everything the handlers need: the session state and the service client.
pub struct ServerContext {
    pub state: AppState,
    pub assistant: Assistant,
}

pub fn router(context: Arc<ServerContext>) -> Router {
    Router::new()
        .route("/api/upload", post(upload))
        .route("/api/reset", post(reset))
        .route("/api/clean", post(clean))
        .route("/api/review", get(review))
        .route("/api/restore", post(restore))
        .route("/api/undo", post(undo))
        .route("/api/redo", post(redo))
        .route(
            "/api/filters",
            get(filter_options).post(set_filter).delete(clear_filters),
        )
        .route("/api/view", get(view))
        .route("/api/view/next", post(view_next))
        .route("/api/view/previous", post(view_previous))
        .route("/api/dashboard", get(dashboard).post(generate_dashboard))
        .route("/api/dashboard/back", post(dashboard_back))
        .route("/api/export", get(export))
        .with_state(context)
}

/// Bind and serve until shutdown. Port comes from TABULA_PORT (default 8642).
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    match logging::init_log_file() {
        Ok(path) => log_info!("SYS", "log file at {:?}", path),
        Err(err) => eprintln!("logging disabled: {}", err),
    }

    let context = Arc::new(ServerContext {
        state: crate::create_app_state(),
        assistant: Assistant::new(AssistantConfig::from_env()),
    });

    let port: u16 = std::env::var("TABULA_PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(8642);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    log_info!("SYS", "listening on 127.0.0.1:{}", port);
    axum::serve(listener, router(context)).await?;
    Ok(())
}

// ============================================================================
// HANDLERS
// ============================================================================

async fn upload(
    State(context): State<Arc<ServerContext>>,
    mut multipart: Multipart,
) -> Json<UploadResult> {
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() != Some("file") {
                    continue;
                }
                let file_name = field.file_name().unwrap_or("upload").to_string();
                match field.bytes().await {
                    Ok(bytes) => {
                        return Json(upload_commands::upload_file(
                            &context.state,
                            &file_name,
                            &bytes,
                        ));
                    }
                    Err(err) => return Json(upload_rejected(&context.state, err.to_string())),
                }
            }
            Ok(None) => {
                return Json(upload_rejected(
                    &context.state,
                    "no file field in upload".to_string(),
                ));
            }
            Err(err) => return Json(upload_rejected(&context.state, err.to_string())),
        }
    }
}

fn upload_rejected(state: &AppState, error: String) -> UploadResult {
    UploadResult {
        success: false,
        error: Some(error),
        file_name: None,
        row_count: 0,
        step: *state.step.lock().unwrap(),
    }
}

async fn reset(State(context): State<Arc<ServerContext>>) -> Json<StepResult> {
    Json(upload_commands::reset_session(&context.state))
}

async fn clean(
    State(context): State<Arc<ServerContext>>,
    Json(params): Json<CleanParams>,
) -> Json<ReviewResult> {
    let raw = match clean_commands::begin_clean(&context.state, params.mode, &params.instructions)
    {
        Ok(raw) => raw,
        Err(message) => {
            return Json(ReviewResult {
                success: false,
                error: Some(message),
                review: None,
            });
        }
    };

    let instructions = clean_commands::effective_instructions(params.mode, &params.instructions);
    match context.assistant.clean_dataset(&raw, &instructions).await {
        Ok(outcome) => Json(clean_commands::commit_clean(&context.state, outcome)),
        Err(err) => Json(clean_commands::fail_clean(&context.state, err.to_string())),
    }
}

async fn review(State(context): State<Arc<ServerContext>>) -> Json<ReviewResult> {
    Json(clean_commands::review(&context.state))
}

async fn restore(
    State(context): State<Arc<ServerContext>>,
    Json(params): Json<RestoreParams>,
) -> Json<EditResult> {
    Json(clean_commands::restore_row(&context.state, params.id))
}

async fn undo(State(context): State<Arc<ServerContext>>) -> Json<EditResult> {
    Json(clean_commands::undo(&context.state))
}

async fn redo(State(context): State<Arc<ServerContext>>) -> Json<EditResult> {
    Json(clean_commands::redo(&context.state))
}

async fn filter_options(State(context): State<Arc<ServerContext>>) -> Json<FilterOptionsResult> {
    Json(filter_commands::filter_options(&context.state))
}

async fn set_filter(
    State(context): State<Arc<ServerContext>>,
    Json(params): Json<SetFilterParams>,
) -> Json<TableViewResult> {
    Json(filter_commands::set_column_filter(
        &context.state,
        params.column,
        params.values,
    ))
}

async fn clear_filters(State(context): State<Arc<ServerContext>>) -> Json<TableViewResult> {
    Json(filter_commands::clear_filters(&context.state))
}

async fn view(
    State(context): State<Arc<ServerContext>>,
    Query(query): Query<PageQuery>,
) -> Json<TableViewResult> {
    Json(filter_commands::table_view(&context.state, query.page))
}

async fn view_next(State(context): State<Arc<ServerContext>>) -> Json<TableViewResult> {
    Json(filter_commands::next_page(&context.state))
}

async fn view_previous(State(context): State<Arc<ServerContext>>) -> Json<TableViewResult> {
    Json(filter_commands::previous_page(&context.state))
}

async fn dashboard(State(context): State<Arc<ServerContext>>) -> Json<DashboardResult> {
    Json(dashboard_commands::dashboard_view(&context.state))
}

async fn generate_dashboard(
    State(context): State<Arc<ServerContext>>,
    Json(params): Json<DashboardParams>,
) -> Json<DashboardResult> {
    let view = match dashboard_commands::begin_dashboard(&context.state, &params.instructions) {
        Ok(view) => view,
        Err(message) => {
            return Json(DashboardResult {
                success: false,
                error: Some(message),
                charts: Vec::new(),
                columns: Vec::new(),
                rows: Vec::new(),
            });
        }
    };

    match context
        .assistant
        .generate_chart_configs(&view, params.instructions.trim())
        .await
    {
        Ok(charts) => Json(dashboard_commands::commit_dashboard(&context.state, charts)),
        Err(err) => Json(dashboard_commands::fail_dashboard(
            &context.state,
            err.to_string(),
        )),
    }
}

async fn dashboard_back(State(context): State<Arc<ServerContext>>) -> Json<StepResult> {
    Json(dashboard_commands::back_to_clean(&context.state))
}

async fn export(State(context): State<Arc<ServerContext>>) -> Json<ExportResult> {
    Json(dashboard_commands::export_cleaned(&context.state))
}
