use greeting_functions::{
    bindings, config::AppConfig, functions::FunctionApp, routes::router, state::AppState,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "greeting_functions=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::new_from_env()?;
    let functions = FunctionApp::for_variant(config.variant)?;
    info!(
        "loaded {} function(s) for variant {:?}",
        functions.functions().len(),
        config.variant
    );

    let sinks = bindings::resolve(&functions.output_bindings(), &config).await?;
    let state = AppState::new(sinks);

    let app = router(&functions, &config, state);

    info!("listening on http://{}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
