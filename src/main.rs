use anyhow::Context;
use futures::prelude::*;
use heading_explorer::{
    command::Command,
    config::{Config, DEFAULT_CONFIG_PATH},
    logging,
};
use std::{path::PathBuf, time::Duration};
use tokio::{io::AsyncWriteExt, net::TcpStream};
use tokio_util::codec::{Framed, FramedRead, LinesCodec};
use tracing::{info, warn};

mod storage;

type GpsdStream = Framed<TcpStream, LinesCodec>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging().context("failed to initialize logging")?;
    info!("Starting");

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = Config::load(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    let mut gpsd = match config.gpsd_addr() {
        Some(addr) => match connect_gpsd(addr).await {
            Ok(stream) => Some(stream),
            Err(e) => {
                warn!("gpsd unavailable, position must be set manually: {e:#}");
                None
            }
        },
        None => None,
    };

    let mut store = storage::Storage::new(config);
    let mut commands = FramedRead::new(tokio::io::stdin(), LinesCodec::new());
    let mut stdout = tokio::io::stdout();

    let probe = tokio::time::sleep(Duration::from_secs(1));
    tokio::pin!(probe);
    let mut probed = false;

    loop {
        tokio::select! {
            _ = &mut probe, if !probed => {
                probed = true;
                if !store.heading.has_reading() {
                    warn!("no orientation data yet, manual heading input is available");
                }
            }
            line = commands.next() => {
                let Some(line) = line else {
                    info!("input closed");
                    break;
                };
                let line = line.context("reading command")?;
                if line.trim().is_empty() {
                    continue;
                }
                let command = match Command::parse(&line) {
                    Ok(command) => command,
                    Err(e) => {
                        warn!("skipping malformed command: {e}");
                        continue;
                    }
                };
                if let Some(output) = store.apply(command)? {
                    stdout.write_all(output.as_bytes()).await?;
                    stdout.write_all(b"\n").await?;
                    stdout.flush().await?;
                }
            }
            report = next_gpsd(&mut gpsd) => match report {
                Some(Ok(line)) => store.update_gpsd(&line),
                Some(Err(e)) => {
                    warn!("gpsd connection lost: {e}");
                    gpsd = None;
                }
                None => {
                    warn!("gpsd closed the connection");
                    gpsd = None;
                }
            },
        }
    }
    Ok(())
}

async fn connect_gpsd(addr: &str) -> anyhow::Result<GpsdStream> {
    let stream = TcpStream::connect(addr)
        .await
        .with_context(|| format!("connecting to gpsd at {addr}"))?;
    let mut framed = Framed::new(stream, LinesCodec::new());
    framed.send(gpsd_proto::ENABLE_WATCH_CMD).await?;
    info!("watching gpsd at {addr}");
    Ok(framed)
}

async fn next_gpsd(
    gpsd: &mut Option<GpsdStream>,
) -> Option<Result<String, tokio_util::codec::LinesCodecError>> {
    match gpsd.as_mut() {
        Some(stream) => stream.next().await,
        None => std::future::pending().await,
    }
}
