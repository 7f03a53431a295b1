// SPDX-License-Identifier: AGPL-3.0-or-later

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tinyim_access::{
    cfg::{cli::Cli, cli::resolve_config_path, config::Config, logger::init_logger},
    core::AccessCore,
    downstream::{DbproxyClient, LogicClient},
    service::{AccessInterconnectImpl, AccessServiceImpl},
};
use tonic::transport::{Channel, Server};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logger_path =
        resolve_config_path(&cli.logger_config).context("failed to resolve logger config path")?;
    let _logger_guard = init_logger(
        logger_path.to_str().context("logger config path is not valid UTF-8")?,
    )?;

    let cfg = resolve_config_path(&cli.config)
        .and_then(Config::load_from_file)
        .context("failed to resolve or load config")?;

    let logic_channel = dial(&cfg.logic_channel, cfg.timeout_ms).await?;
    let db_channel = dial(&cfg.db_channel, cfg.timeout_ms).await?;

    let core = AccessCore::new(
        cfg.shard_count,
        cfg.heartbeat_timeout(),
        LogicClient::new(logic_channel),
        DbproxyClient::new(db_channel),
        cfg.server_address.clone(),
    );

    let addr = cfg.server_address.parse().context("invalid server_address")?;
    let table_for_drain = core.table.clone();
    let drain = core.shutdown.clone();

    info!(%addr, "access node starting");

    Server::builder()
        .add_service(tinyim_access::pb::access::access_service_server::AccessServiceServer::new(
            AccessServiceImpl::new(core.clone()),
        ))
        .add_service(
            tinyim_access::pb::access::access_interconnect_server::AccessInterconnectServer::new(
                AccessInterconnectImpl::new(core.clone()),
            ),
        )
        .serve_with_shutdown(addr, async move {
            let _ = tokio::signal::ctrl_c().await;
            drain.drain(&table_for_drain);
        })
        .await
        .context("server exited with an error")?;

    Ok(())
}

async fn dial(endpoint: &str, timeout: Duration) -> Result<Channel> {
    Channel::from_shared(endpoint.to_string())
        .with_context(|| format!("invalid channel endpoint {endpoint}"))?
        .timeout(timeout)
        .connect()
        .await
        .with_context(|| format!("failed to connect to {endpoint}"))
}
