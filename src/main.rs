use anyhow::Result;
use poolscope::app::handler;

#[tokio::main]
async fn main() -> Result<()> {
    handler::init().await
}
