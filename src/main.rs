mod app;
mod cli;
mod context;
mod storage;
mod tracing;
mod web;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    app::run().await
}
