//! Solar Mount HTTP Server

use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use log::{info, warn};
use serde::Serialize;
use std::net::{IpAddr, SocketAddr};
use tower_http::cors::{Any, CorsLayer};

use solar_mount::layout::ComponentDescriptor;
use solar_mount::prelude::*;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8087;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Debug, Serialize)]
struct GenerateResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    results: Option<ResultsData>,
}

#[derive(Debug, Serialize)]
struct ResultsData {
    parameters: ParameterSet,
    components: Vec<ComponentDescriptor>,
    primitives: Vec<RenderPrimitive>,
    topology: FeaTopology,
    summary: SummaryResult,
}

#[derive(Debug, Serialize)]
struct SummaryResult {
    num_components: usize,
    num_panels: usize,
    num_nodes: usize,
    num_members: usize,
    total_member_length: f64,
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn generate_structure(body: String) -> impl IntoResponse {
    match run_generation(&body) {
        Ok(results) => (
            StatusCode::OK,
            Json(GenerateResponse {
                success: true,
                error: None,
                results: Some(results),
            }),
        ),
        Err(e) => {
            warn!("Generation failed: {}", e);
            (
                StatusCode::BAD_REQUEST,
                Json(GenerateResponse {
                    success: false,
                    error: Some(e.to_string()),
                    results: None,
                }),
            )
        }
    }
}

fn run_generation(body: &str) -> LayoutResult<ResultsData> {
    // An empty body means "all defaults"
    let params = if body.trim().is_empty() {
        ParameterSet::default()
    } else {
        ParameterSet::from_json(body)?
    };

    let mut kernel = MeshKernel::new();
    let structure = generate(&params, &mut kernel)?;

    let mut model = FrameModel::new();
    structure.topology.apply_to(&mut model)?;
    model.analyze()?;
    let total_member_length = model.summary().map_or(0.0, |s| s.total_length);

    Ok(ResultsData {
        summary: SummaryResult {
            num_components: structure.layout.components.len(),
            num_panels: structure.layout.count(ComponentKind::Panel),
            num_nodes: structure.topology.nodes.len(),
            num_members: structure.topology.members.len(),
            total_member_length,
        },
        parameters: params,
        components: structure.layout.components,
        primitives: structure.primitives,
        topology: structure.topology,
    })
}

fn bind_address() -> anyhow::Result<SocketAddr> {
    let host = std::env::var("SOLAR_MOUNT_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
    let port = match std::env::var("SOLAR_MOUNT_PORT") {
        Ok(port) => port.parse::<u16>()?,
        Err(_) => DEFAULT_PORT,
    };
    let ip: IpAddr = host.parse()?;
    Ok(SocketAddr::new(ip, port))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/v1/generate", post(generate_structure))
        .layer(cors);

    let addr = bind_address()?;
    info!("Solar Mount Server listening on http://{}", addr);
    println!("Solar Mount Server listening on http://{}", addr);
    println!("  Health check: GET  /health");
    println!("  Generation:   POST /api/v1/generate");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
