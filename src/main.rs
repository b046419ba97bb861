#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    post_connector_server::run().await
}
