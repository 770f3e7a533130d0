use dotenvy::dotenv;
use newsletter_dispatch::{telemetry, Config, Server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    telemetry::init("newsletter-dispatch", "info", std::io::stdout)?;
    let config = Config::init()?;
    Server::build(config)?.run().await?;
    Ok(())
}
