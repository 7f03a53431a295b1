// SPDX-License-Identifier: AGPL-3.0-or-later

//! Interactive demo client: signs in, long-polls for pushed messages in the
//! background, and accepts a `sendmsgto <user> <text>` line command.
//! Grounded in the original command-line client's `linenoise`-driven REPL
//! loop, using `rustyline` for history and line editing instead.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use rustyline::{DefaultEditor, error::ReadlineError};
use tinyim_access::pb::{
    access::{SigninData, access_service_client::AccessServiceClient},
    common::{MsgType, NewMsg, Ping},
};
use tonic::transport::Channel;
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(name = "tinyim-client", about = "Interactive tinyim access-node client")]
struct Cli {
    /// Address of the access node to connect to.
    #[arg(long, default_value = "http://127.0.0.1:8001")]
    server: String,

    /// User id to sign in as.
    #[arg(long)]
    user_id: u64,

    /// Password to sign in with.
    #[arg(long, default_value = "")]
    password: String,

    /// Interval between background heartbeats, in seconds.
    #[arg(long, default_value_t = 10)]
    heartbeat_interval_s: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let channel = Channel::from_shared(cli.server.clone())
        .with_context(|| format!("invalid server address {}", cli.server))?
        .connect()
        .await
        .context("failed to connect to access node")?;

    let mut stub = AccessServiceClient::new(channel.clone());

    let signin = SigninData {
        user_id: cli.user_id,
        password: cli.password.clone(),
        client_timestamp: now_unix(),
        access_addr: String::new(),
    };
    let pong = stub.sign_in(signin).await.context("sign in failed")?.into_inner();
    info!(user_id = cli.user_id, last_msg_id = pong.last_msg_id, "signed in");

    tokio::spawn(pull_loop(stub.clone(), cli.user_id));
    tokio::spawn(heartbeat_loop(
        stub.clone(),
        cli.user_id,
        Duration::from_secs(cli.heartbeat_interval_s),
    ));

    run_repl(stub, cli.user_id).await
}

async fn pull_loop(mut stub: AccessServiceClient<Channel>, user_id: u64) {
    loop {
        let reply = stub.pull_data(Ping { user_id }).await;
        match reply {
            Ok(response) => {
                for msg in response.into_inner().msg {
                    println!(
                        "[from {}] {}",
                        msg.user_id,
                        String::from_utf8_lossy(&msg.message)
                    );
                }
            },
            Err(status) => {
                error!(%status, "PullData failed; retrying");
                tokio::time::sleep(Duration::from_secs(1)).await;
            },
        }
    }
}

async fn heartbeat_loop(mut stub: AccessServiceClient<Channel>, user_id: u64, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    loop {
        ticker.tick().await;
        if let Err(status) = stub.heart_beat(Ping { user_id }).await {
            warn!(%status, "HeartBeat failed");
        }
    }
}

async fn run_repl(mut stub: AccessServiceClient<Channel>, user_id: u64) -> Result<()> {
    let mut editor = DefaultEditor::new().context("failed to start line editor")?;
    let history_path = "history.txt";
    let _ = editor.load_history(history_path);

    loop {
        match editor.readline("tinyim> ") {
            Ok(line) => {
                let _ = editor.add_history_entry(line.as_str());
                let _ = editor.save_history(history_path);

                if let Some(rest) = line.strip_prefix("sendmsgto ") {
                    if let Err(err) = send_msg(&mut stub, user_id, rest).await {
                        eprintln!("sendmsgto failed: {err:#}");
                    }
                } else if !line.trim().is_empty() {
                    println!("unrecognized command: {line}");
                }
            },
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => {
                error!(?err, "readline error");
                break;
            },
        }
    }

    info!("tinyim-client is going to quit");
    Ok(())
}

async fn send_msg(stub: &mut AccessServiceClient<Channel>, user_id: u64, rest: &str) -> Result<()> {
    let (peer_str, text) = rest.split_once(' ').unwrap_or((rest, ""));
    let peer_id: u64 = peer_str.parse().context("peer id must be a number")?;
    if text.is_empty() {
        bail!("usage: sendmsgto <userid> <msg>");
    }

    let new_msg = NewMsg {
        user_id,
        peer_id,
        msg_type: MsgType::Single as i32,
        message: text.as_bytes().to_vec(),
        client_time: now_unix(),
    };
    let reply = stub.send_msg(new_msg).await?.into_inner();
    println!("sent msg_id={} last_msg_id={}", reply.msg_id, reply.last_msg_id);
    Ok(())
}

fn now_unix() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
