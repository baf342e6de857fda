use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use stream_validator::{handle_batch, Response, StreamEvent};

async fn function_handler(event: LambdaEvent<StreamEvent>) -> Result<Response, Error> {
    Ok(handle_batch(&event.payload)?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .json()
        .init();

    run(service_fn(function_handler)).await
}
