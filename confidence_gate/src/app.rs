use crate::{
    config::Config,
    gate_service::{gate, THRESHOLD},
};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use pipeline_payload::Envelope;

pub async fn start_app(config: Config) -> Result<(), Error> {
    tracing::debug!("{:?}", config);
    tracing::info!("Gate ready, threshold {}", THRESHOLD);

    run(service_fn(|event: LambdaEvent<Envelope>| async move {
        gate(event.payload)
    }))
    .await
}
