use servicehub::api::types::Quote;
use servicehub::utils::constants::{ENV_LOGIN_EMAIL, ENV_LOGIN_PASSWORD};
use servicehub::utils::get_env::get_optional_env_var;
use servicehub::{ApiClient, ClientConfig};

// Backend smoke check: health check, then (with credentials in the environment)
// login, current user and quote list.
#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let config = ClientConfig::from_env()?;
    let client = ApiClient::new(config)?;
    tracing::info!("using api root {}", client.api_root());

    let health = client.health().check().await?;
    println!("backend status: {} at {}", health.status, health.timestamp);

    let (Some(email), Some(password)) = (
        get_optional_env_var(ENV_LOGIN_EMAIL),
        get_optional_env_var(ENV_LOGIN_PASSWORD),
    ) else {
        tracing::info!("no credentials configured, skipping authenticated checks");
        return Ok(());
    };

    client.auth().login(&email, &password).await?;
    let user = client.auth().get_current_user().await?;
    let role = user
        .role
        .map(|r| format!("{:?}", r).to_lowercase())
        .unwrap_or_else(|| "unknown".to_string());
    println!("signed in as {} ({})", user.email, role);

    let status_filter = std::env::args().nth(1);
    let quotes: Vec<Quote> = client.quotes().get_quotes(status_filter.as_deref()).await?;
    println!("{} quote(s)", quotes.len());
    for quote in quotes {
        println!(
            "  {} {} {}",
            quote.id,
            quote.status.unwrap_or_default(),
            quote.service_type.unwrap_or_default()
        );
    }

    client.auth().logout();
    Ok(())
}
