use anyhow::Result;
use educompass::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
