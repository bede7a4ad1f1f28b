//! Gateway server: demo widget, directive endpoint, static file fallback
//!
//! All routes are pass-through invokers of [`DirectiveGenerator`]; no request
//! branches on anything but the path.

use architect_core::{DirectiveGenerator, GatewayConfig};
use axum::{
    extract::State,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

pub struct ServeOptions {
    pub gateway: GatewayConfig,
    /// Directory served read-only for any path no route claims.
    pub static_root: PathBuf,
}

impl Default for ServeOptions {
    fn default() -> Self {
        Self {
            gateway: GatewayConfig::default(),
            static_root: std::env::current_dir().unwrap_or_default(),
        }
    }
}

struct AppState {
    generator: DirectiveGenerator,
    port: u16,
    started_at: std::time::Instant,
}

pub async fn start_gateway(options: ServeOptions) -> anyhow::Result<()> {
    let state = Arc::new(AppState {
        generator: DirectiveGenerator::default(),
        port: options.gateway.port,
        started_at: std::time::Instant::now(),
    });

    let app = router(state).fallback_service(ServeDir::new(&options.static_root));

    let bind_addr: SocketAddr = format!(
        "{}:{}",
        options.gateway.bind.to_addr(),
        options.gateway.port
    )
    .parse()?;

    info!("Architect Gateway v{} starting", env!("CARGO_PKG_VERSION"));
    info!("  Listening on: {}", bind_addr);
    info!("  Widget:    http://{}/", bind_addr);
    info!("  Directive: POST http://{}/api/generate", bind_addr);
    info!("  Static root: {:?}", options.static_root);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/generate", post(generate_handler))
        .route("/health", get(health_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The directive endpoint. Always 200: faults come back in-band as the
/// error string, on the same channel as success.
async fn generate_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; charset=utf-8",
        )],
        state.generator.generate(),
    )
}

async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "name": "architect-gateway",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": state.started_at.elapsed().as_secs(),
    }))
}

async fn index_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html><html><head><title>n8n Automation Architect</title>
<style>
body {{ font-family: monospace; background: #1a1a2e; color: #eee; padding: 20px; max-width: 900px; margin: 0 auto; }}
h1 {{ color: #f39c12; }}
a {{ color: #3498db; }} code {{ background: #0f3460; padding: 2px 6px; border-radius: 4px; }}
.info {{ background: #16213e; padding: 15px; border-radius: 8px; margin: 15px 0; }}
#output {{ background: #0f3460; padding: 15px; border-radius: 8px; min-height: 200px; max-height: 500px; overflow-y: auto; white-space: pre-wrap; font-size: 13px; }}
#error {{ background: #7a1f1f; padding: 10px 15px; border-radius: 8px; margin: 10px 0; display: none; }}
button {{ background: #f39c12; border: none; padding: 8px 16px; border-radius: 4px; cursor: pointer; font-size: 14px; margin: 5px 5px 5px 0; }}
button:hover {{ background: #e67e22; }} button:disabled {{ background: #555; cursor: wait; }}
</style></head><body>
<h1>pump.fun n8n Automation Architect v{version}</h1>
<div class="info">
<p>Output of the n8n Automation Architect for setting up the pump.fun data ingestion pipeline (Phase 1).</p>
<p>Endpoint: <code>POST http://localhost:{port}/api/generate</code></p>
</div>
<div>
<button id="fetchButton" onclick="fetchDirectives()">Generate Directives</button>
<button onclick="document.getElementById('output').textContent=''">Clear</button>
</div>
<div id="error"></div>
<div id="output"></div>
<script>
async function fetchDirectives() {{
    const button = document.getElementById('fetchButton');
    const output = document.getElementById('output');
    const error = document.getElementById('error');
    button.disabled = true;
    error.style.display = 'none';
    output.textContent = 'Fetching...';
    try {{
        const response = await fetch('/api/generate', {{ method: 'POST' }});
        if (!response.ok) throw new Error('Network response was not ok');
        const text = await response.text();
        output.textContent = text;
        if (text.startsWith('An error occurred')) {{
            error.textContent = text;
            error.style.display = 'block';
        }}
    }} catch (e) {{
        output.textContent = '';
        error.textContent = 'Failed to fetch directives: ' + e.message;
        error.style.display = 'block';
    }} finally {{
        button.disabled = false;
    }}
}}
</script></body></html>"#,
        version = env!("CARGO_PKG_VERSION"),
        port = state.port,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use architect_core::DIRECTIVE_TEXT;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_state() -> Arc<AppState> {
        Arc::new(AppState {
            generator: DirectiveGenerator::default(),
            port: 8000,
            started_at: std::time::Instant::now(),
        })
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn generate_endpoint_returns_directive_text() {
        let app = router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/generate")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["content-type"],
            "text/plain; charset=utf-8"
        );
        assert_eq!(body_string(response).await, DIRECTIVE_TEXT);
    }

    #[tokio::test]
    async fn health_endpoint_reports_healthy() {
        let app = router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn index_serves_widget_page() {
        let app = router(test_state());
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("n8n Automation Architect"));
        assert!(html.contains("/api/generate"));
    }

    #[tokio::test]
    async fn generate_rejects_get() {
        let app = router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/generate")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
