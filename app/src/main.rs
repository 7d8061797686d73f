//! FILENAME: app/src/main.rs
// PURPOSE: Server entry point.

#[tokio::main]
async fn main() {
    if let Err(err) = app_lib::run().await {
        eprintln!("tabula: {}", err);
        std::process::exit(1);
    }
}
