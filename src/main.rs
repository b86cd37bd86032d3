#[tokio::main]
async fn main() {
    if let Err(e) = shop::run().await {
        eprintln!("{:?}", e);
        std::process::exit(1);
    }
}
