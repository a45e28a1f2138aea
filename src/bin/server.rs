use guess_classmate::{logger::init_logger, prelude::*};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Configuration::from_env();
    init_logger(&config)?;
    serve(config).await
}
