#![allow(dead_code)]

mod command;
mod handle;
mod settings;

#[tokio::main]
pub async fn main() -> secagg_deployer::re_exports::eyre::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    command::dispatch_commands().await
}
