use std::error::Error;

mod telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from .env when present; real env wins.
    match dotenvy::dotenv() {
        Ok(_) => {}
        Err(e) if e.not_found() => {}
        Err(e) => return Err(e.into()),
    }

    telemetry::init()?;

    if let Err(e) = api::start().await {
        tracing::error!(error = %e, "review API terminated");
        return Err(e.into());
    }

    Ok(())
}
