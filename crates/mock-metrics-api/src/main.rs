mod app;
mod bootstrap;
mod buffer;
mod config;
mod generator;
mod handlers;
mod scheduler;
mod server;
mod state;
mod telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bootstrap::run().await
}
