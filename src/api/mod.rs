use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::core::{
    ProjectionInput, ProjectionResult, ValidatedInput, ValidationError, project_validated,
};

mod format;

pub use format::{format_currency, render_table, share_text};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

const DEFAULT_CURRENT_AGE: u32 = 30;
const DEFAULT_RETIREMENT_AGE: u32 = 65;
const DEFAULT_CURRENT_SAVINGS: f64 = 10_000.0;
const DEFAULT_MONTHLY_SAVINGS: f64 = 500.0;
const DEFAULT_ANNUAL_RETURN: f64 = 7.0;
const DEFAULT_INFLATION_RATE: f64 = 2.5;
const DEFAULT_CURRENCY: &str = "USD";

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "nestegg",
    about = "Inflation-adjusted retirement savings projection with monthly contributions",
    after_help = "Run `nestegg serve [port]` to start the web calculator instead."
)]
pub struct Cli {
    #[arg(long, default_value_t = DEFAULT_CURRENT_AGE)]
    current_age: u32,
    #[arg(long, default_value_t = DEFAULT_RETIREMENT_AGE)]
    retirement_age: u32,
    #[arg(long, default_value_t = DEFAULT_CURRENT_SAVINGS)]
    current_savings: f64,
    #[arg(
        long,
        default_value_t = DEFAULT_MONTHLY_SAVINGS,
        help = "Amount saved at the end of every month"
    )]
    monthly_savings: f64,
    #[arg(
        long,
        default_value_t = DEFAULT_ANNUAL_RETURN,
        help = "Expected nominal annual return in percent, e.g. 7"
    )]
    annual_return: f64,
    #[arg(
        long,
        default_value_t = DEFAULT_INFLATION_RATE,
        help = "Expected annual inflation in percent"
    )]
    inflation_rate: f64,
    #[arg(
        long,
        default_value_t = DEFAULT_CURRENCY.to_string(),
        help = "Currency code used only for display"
    )]
    currency: String,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to serialize projection: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectPayload {
    current_age: Option<u32>,
    retirement_age: Option<u32>,
    current_savings: Option<f64>,
    monthly_savings: Option<f64>,
    annual_return: Option<f64>,
    inflation_rate: Option<f64>,
    currency: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FormattedSummary {
    projected_savings: String,
    total_contributions: String,
    total_returns: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectResponse {
    retirement_age: u32,
    #[serde(flatten)]
    projection: ProjectionResult,
    formatted: FormattedSummary,
    share_text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DefaultsResponse {
    current_age: u32,
    retirement_age: u32,
    current_savings: f64,
    monthly_savings: f64,
    annual_return: f64,
    inflation_rate: f64,
    currency: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn build_inputs(cli: Cli) -> Result<ValidatedInput, ValidationError> {
    let input = ProjectionInput {
        current_age: cli.current_age,
        retirement_age: cli.retirement_age,
        current_savings: cli.current_savings,
        monthly_savings: cli.monthly_savings,
        annual_return: cli.annual_return / 100.0,
        inflation_rate: cli.inflation_rate / 100.0,
        currency: if cli.currency.trim().is_empty() {
            DEFAULT_CURRENCY.to_string()
        } else {
            cli.currency.trim().to_uppercase()
        },
    };
    input.validated()
}

const ANALYTICS_TARGET: &str = "analytics";

fn run_projection(input: &ValidatedInput) -> ProjectionResult {
    let result = project_validated(input);
    log::info!(
        target: ANALYTICS_TARGET,
        "calculator_used current_age={} retirement_age={} years_to_retirement={}",
        input.current_age,
        input.retirement_age,
        result.years_to_retirement
    );
    result
}

pub fn run_cli(cli: Cli) -> Result<String, CliError> {
    let format = cli.format;
    let input = build_inputs(cli)?;
    let retirement_age = input.retirement_age;
    let result = run_projection(&input);

    match format {
        OutputFormat::Table => Ok(format!(
            "{}\n{}\n",
            render_table(&result),
            share_text(&result, retirement_age)
        )),
        OutputFormat::Json => {
            let response = build_project_response(retirement_age, result);
            Ok(serde_json::to_string_pretty(&response)?)
        }
    }
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route("/api/defaults", get(defaults_handler))
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    log::info!("retirement calculator listening on http://{addr}");
    log::info!("local access: http://127.0.0.1:{port}/");

    axum::serve(listener, app).await
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn defaults_handler() -> Response {
    json_response(StatusCode::OK, defaults_response(&default_cli_for_api()))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn project_get_handler(payload: Result<Query<ProjectPayload>, QueryRejection>) -> Response {
    match payload {
        Ok(Query(payload)) => project_handler_impl(payload),
        Err(rejection) => malformed_payload_response(&rejection.body_text()),
    }
}

async fn project_post_handler(payload: Result<Json<ProjectPayload>, JsonRejection>) -> Response {
    match payload {
        Ok(Json(payload)) => project_handler_impl(payload),
        Err(rejection) => malformed_payload_response(&rejection.body_text()),
    }
}

fn malformed_payload_response(reason: &str) -> Response {
    log::warn!("malformed projection request: {reason}");
    error_response(StatusCode::BAD_REQUEST, reason)
}

fn project_handler_impl(payload: ProjectPayload) -> Response {
    let input = match api_request_from_payload(payload) {
        Ok(input) => input,
        Err(err) => {
            log::warn!("rejected projection request: {err}");
            return error_response(StatusCode::BAD_REQUEST, &err.to_string());
        }
    };

    let result = run_projection(&input);
    json_response(
        StatusCode::OK,
        build_project_response(input.retirement_age, result),
    )
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn api_request_from_json(json: &str) -> Result<ValidatedInput, String> {
    let payload = serde_json::from_str::<ProjectPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    api_request_from_payload(payload).map_err(|e| e.to_string())
}

fn api_request_from_payload(payload: ProjectPayload) -> Result<ValidatedInput, ValidationError> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.current_age {
        cli.current_age = v;
    }
    if let Some(v) = payload.retirement_age {
        cli.retirement_age = v;
    }
    if let Some(v) = payload.current_savings {
        cli.current_savings = v;
    }
    if let Some(v) = payload.monthly_savings {
        cli.monthly_savings = v;
    }
    if let Some(v) = payload.annual_return {
        cli.annual_return = v;
    }
    if let Some(v) = payload.inflation_rate {
        cli.inflation_rate = v;
    }
    if let Some(v) = payload.currency {
        cli.currency = v;
    }

    build_inputs(cli)
}

fn default_cli_for_api() -> Cli {
    Cli {
        current_age: DEFAULT_CURRENT_AGE,
        retirement_age: DEFAULT_RETIREMENT_AGE,
        current_savings: DEFAULT_CURRENT_SAVINGS,
        monthly_savings: DEFAULT_MONTHLY_SAVINGS,
        annual_return: DEFAULT_ANNUAL_RETURN,
        inflation_rate: DEFAULT_INFLATION_RATE,
        currency: DEFAULT_CURRENCY.to_string(),
        format: OutputFormat::Json,
    }
}

fn defaults_response(cli: &Cli) -> DefaultsResponse {
    DefaultsResponse {
        current_age: cli.current_age,
        retirement_age: cli.retirement_age,
        current_savings: cli.current_savings,
        monthly_savings: cli.monthly_savings,
        annual_return: cli.annual_return,
        inflation_rate: cli.inflation_rate,
        currency: cli.currency.clone(),
    }
}

fn build_project_response(retirement_age: u32, projection: ProjectionResult) -> ProjectResponse {
    let currency = projection.currency.as_str();
    let formatted = FormattedSummary {
        projected_savings: format_currency(projection.projected_savings, currency),
        total_contributions: format_currency(projection.total_contributions, currency),
        total_returns: format_currency(projection.total_returns, currency),
    };
    let share_text = share_text(&projection, retirement_age);

    ProjectResponse {
        retirement_age,
        projection,
        formatted,
        share_text,
    }
}
