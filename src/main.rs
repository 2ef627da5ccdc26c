use clap::Parser;
use rpki_ov_route_map::logging::init_logging;
use rpki_ov_route_map::{run, Args};
use std::error::Error;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    init_logging()?;
    let args = Args::parse();
    //
    log::info!("#Start main() cache={}", args.cache);

    run(&args).await?;

    Ok(())
}
