use crate::{config::Config, fetch_service::FetchService, s3_store::S3ObjectStore};
use aws_config::BehaviorVersion;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use pipeline_payload::FetchRequest;

pub async fn start_app(config: Config) -> Result<(), Error> {
    let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let store = S3ObjectStore::new(&sdk_config);
    let fetch_service = FetchService::new(store, &config.scratch);
    tracing::info!("Fetcher ready, staging objects in {:?}", config.scratch.dir);

    let fetch_service = &fetch_service;
    run(service_fn(move |event: LambdaEvent<FetchRequest>| async move {
        fetch_service.fetch(event.payload).await
    }))
    .await
}
