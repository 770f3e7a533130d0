use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;
use newsletter_dispatch::{
    domain::{DispatchResponse, NewsletterKind},
    telemetry, Config, DbPool, DispatcherClient, NewsletterTrigger, PgSubscriberStore,
};

/// Announce newly published content to every active newsletter subscriber.
#[derive(Debug, Parser)]
#[command(name = "send-newsletter", version)]
struct Cli {
    /// Title of the published article or company update.
    #[arg(long)]
    title: String,

    /// Body of the published content; the email shows its first 300 characters.
    #[arg(long)]
    content: String,

    /// Kind of content: `article` or `company`.
    #[arg(long = "type", value_name = "TYPE")]
    kind: NewsletterKind,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    telemetry::init("send-newsletter", "info", std::io::stderr)?;
    let config = Config::init().context("Failed to load configuration")?;

    let pool = DbPool::connect_lazy_with(config.database.with_db());
    let trigger = NewsletterTrigger::new(
        PgSubscriberStore::new(pool),
        DispatcherClient::new(config.dispatcher).context("Failed to build the dispatcher client")?,
    );
    let result = trigger
        .send_newsletter(cli.title, cli.content, cli.kind)
        .await?;

    println!("{}", serde_json::to_string(&DispatchResponse::from(result))?);
    Ok(())
}
