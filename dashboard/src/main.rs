mod bootstrap;
mod config;
mod report;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bootstrap::bootstrap().await?;
    Ok(())
}
