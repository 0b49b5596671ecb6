#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use threat_intel_aggregator::core::handler::{handle_request, HttpEvent, HttpResponse};
#[cfg(feature = "lambda")]
use threat_intel_aggregator::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use threat_intel_aggregator::{Aggregator, LambdaConfig};

#[cfg(feature = "lambda")]
async fn function_handler(
    aggregator: &Aggregator,
    event: LambdaEvent<HttpEvent>,
) -> Result<HttpResponse, Error> {
    let method = event.payload.method();
    tracing::info!(
        request_id = %event.context.request_id,
        method,
        "Handling threat-intel request"
    );

    Ok(handle_request(aggregator, method).await)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let config = LambdaConfig::from_env()?;
    config.validate()?;

    // client 連線池跨呼叫重用，不保存任何資料
    let aggregator = Aggregator::from_config(&config)?;
    let aggregator = &aggregator;

    run(service_fn(move |event: LambdaEvent<HttpEvent>| async move {
        function_handler(aggregator, event).await
    }))
    .await
}

