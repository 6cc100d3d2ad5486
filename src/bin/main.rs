use messenger_send::config::load_config;
use messenger_send::MessengerClient;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let (recipient, text) = match (args.next(), args.next()) {
        (Some(recipient), Some(text)) => (recipient, text),
        _ => anyhow::bail!("usage: messenger-send <recipient-id> <text>"),
    };

    let config = load_config();
    let client = MessengerClient::from_config(&config)?;
    let resp = client.send_text_message(&recipient, &text, None).await?;
    info!(
        recipient_id = resp.recipient_id.as_deref().unwrap_or_default(),
        message_id = resp.message_id.as_deref().unwrap_or_default(),
        "message sent"
    );
    Ok(())
}
