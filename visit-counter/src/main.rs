// an invocation must always end with a response envelope, not a crash
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::panic)]

use {
    std::process::exit,
    clap::Parser,
    lambda_runtime::{LambdaEvent, service_fn},
    serde_json::Value,
    tracing::{info, error},
    visit_counter::{
        CounterConfig,
        CommandError,
        DynamoDbCounterStore,
        DynamoDbResource,
        config::{Args, Command},
        handle_invocation,
        invoke_sqlite,
        logging::init_logger,
        update_visit_count,
    },
};

#[tokio::main]
async fn main() {
    init_logger();
    let args = Args::parse();

    if let Err(err) = run_command(args.counter_config(), args.command()).await {
        error!("{err}");
        exit(-1);
    }
}

async fn run_command(config: CounterConfig, command: Command) -> Result<(), CommandError> {
    match command {
        Command::Serve => {
            let resource = DynamoDbResource::from_config(&config).await;
            let resource = &resource;

            info!("serving invocations");
            lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
                handle_invocation(event, resource).await
            }))
                .await
                .map_err(|err| CommandError::Runtime { reason: format!("{err:?}") })
        },
        Command::Invoke { sqlite, create_table } => {
            let envelope = match sqlite {
                Some(path) => invoke_sqlite(&config, path, create_table).await?,
                None => {
                    let resource = DynamoDbResource::from_config(&config).await;
                    update_visit_count(&DynamoDbCounterStore::new(&resource)).await
                },
            };

            println!("{}", serde_json::to_string(&envelope).map_err(CommandError::EnvelopeEncode)?);
            Ok(())
        },
    }
}
