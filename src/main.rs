#[actix_web::main]
async fn main() -> std::io::Result<()> {
    consultation_server::run().await
}
