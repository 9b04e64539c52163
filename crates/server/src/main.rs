#[tokio::main]
async fn main() -> anyhow::Result<()> {
    legalsum_server::start().await
}
