#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use portfolio_site::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use portfolio_site::{ContactEndpoint, FunctionRequest, FunctionResponse, LambdaConfig};

#[cfg(feature = "lambda")]
async fn function_handler(
    endpoint: &ContactEndpoint,
    event: LambdaEvent<FunctionRequest>,
) -> Result<FunctionResponse, Error> {
    tracing::debug!(
        request_id = %event.context.request_id,
        method = %event.payload.http_method,
        "Contact form invocation"
    );

    Ok(endpoint.handle_request(&event.payload).await)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let config = LambdaConfig::from_env()?;
    config.validate()?;
    let endpoint = config.contact_endpoint()?;

    run(service_fn(|event| function_handler(&endpoint, event))).await
}
