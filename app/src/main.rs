use clap::Parser;

use dex_lib::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dex_lib::init_tracing()?;
    dex_lib::run(Cli::parse()).await
}
