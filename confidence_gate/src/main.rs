use confidence_gate::{config, start_app};
use lambda_runtime::Error;
use pipeline_payload::telemetry::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = config::get_configuration()?;
    init_tracing(&config.log_level);

    start_app(config).await
}
