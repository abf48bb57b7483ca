use std::time::Duration;

use api_client::ApiClient;
use eolmadak_core::{FlowConfig, RequiredFields};
use eolmadak_tui::{init_terminal, restore_terminal, App};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the 얼마닥 terminal client
///
/// Resolves configuration from the environment once at startup, builds the
/// API client and runs the interactive search UI until the user quits. The
/// terminal is restored on both the success and the error path.
///
/// # Environment Variables
/// - `EOLMADAK_API_BASE_URL`: backend base URL (default: "http://localhost:8080")
/// - `EOLMADAK_DEBOUNCE_MS`: autocomplete quiet period in milliseconds (default: 1000)
/// - `EOLMADAK_PAGE_SIZE`: result items per page (default: 10)
/// - `EOLMADAK_REQUIRE_REGION`: set to "1" to also require a region selection
///
/// # Returns
/// * `Ok(())` - clean exit requested by the user
/// * `Err(anyhow::Error)` - configuration, terminal or I/O failure
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so they never fight the alternate screen; run with
    // e.g. `RUST_LOG=api_client=debug 2> eolmadak.log` to capture them.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("eolmadak_tui=info".parse()?)
                .add_directive("eolmadak_core=info".parse()?)
                .add_directive("api_client=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let base_url =
        std::env::var("EOLMADAK_API_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".into());
    let config = flow_config_from_env()?;

    tracing::info!("++ Starting eolmadak against {}", base_url);

    let api = ApiClient::new(&base_url)?;
    let app = App::new(api, config);

    let mut terminal = init_terminal()?;
    let result = app.run(&mut terminal).await;
    restore_terminal()?;

    result.map_err(anyhow::Error::from)
}

fn flow_config_from_env() -> anyhow::Result<FlowConfig> {
    let debounce_ms = match std::env::var("EOLMADAK_DEBOUNCE_MS") {
        Ok(value) => value.parse::<u64>()?,
        Err(_) => FlowConfig::DEFAULT_DEBOUNCE_QUIET.as_millis() as u64,
    };
    let page_size = match std::env::var("EOLMADAK_PAGE_SIZE") {
        Ok(value) => value.parse::<usize>()?,
        Err(_) => FlowConfig::DEFAULT_PAGE_SIZE,
    };
    let required_fields = match std::env::var("EOLMADAK_REQUIRE_REGION").as_deref() {
        Ok("1") | Ok("true") => RequiredFields::TreatmentAndRegion,
        _ => RequiredFields::TreatmentOnly,
    };

    Ok(FlowConfig::new(
        Duration::from_millis(debounce_ms),
        FlowConfig::DEFAULT_BLUR_GRACE,
        page_size,
        required_fields,
    )?)
}
