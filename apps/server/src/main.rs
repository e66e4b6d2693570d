use anyhow::Context;
use rsvp::domain::config::ApiConfig;
use rsvp::kernel::config::load_config;
use rsvp_logger::Logger;
use rsvp_server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _log = Logger::builder().name(env!("CARGO_PKG_NAME")).init()?;

    let cfg: ApiConfig =
        load_config(Some("server")).context("Critical: Configuration is malformed")?;

    Server::builder().config(cfg).build().await?.run().await
}
