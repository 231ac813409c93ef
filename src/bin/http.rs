#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use timetable_tool::{ServiceConfig, http_api, logging};

    let config = ServiceConfig::from_env()?;
    logging::init(config.log_verbosity);

    println!("timetable-tool HTTP service listening on http://{}", config.addr);
    http_api::serve(config).await?;
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the HTTP server.");
}
