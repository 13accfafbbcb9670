use tracing::info;
use wti_json::app_config::AppConfig;
use wti_json::wti::WtiClient;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

    info!("🪵 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load()?;
    info!("✅  Loaded configuration");

    let client = WtiClient::from_config(&config)?;
    let temperature = client.get_temperature(false)?;

    println!("The temperature is: {}", temperature);

    Ok(())
}
