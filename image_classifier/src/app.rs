use crate::{
    classify_service::ClassifyService, config::Config, sagemaker_service::SageMakerEndpoint,
};
use aws_config::BehaviorVersion;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use pipeline_payload::Envelope;

pub async fn start_app(config: Config) -> Result<(), Error> {
    let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let endpoint = SageMakerEndpoint::new(&sdk_config, &config.endpoint);
    let classify_service = ClassifyService::new(endpoint);
    tracing::info!("Classifier ready, invoking endpoint {}", config.endpoint.name);

    let classify_service = &classify_service;
    run(service_fn(move |event: LambdaEvent<Envelope>| async move {
        classify_service.classify(event.payload).await
    }))
    .await
}
