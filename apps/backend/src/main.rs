#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bahasa_backend::run().await
}
