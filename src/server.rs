//! TCP line server: one command per line, one rendered reply per command
//!
//! Every reply to a command, including a rejected line, ends with a line
//! holding only [`REPLY_END`]. Reply lines never consist of a lone `.`.

use std::future::Future;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::{TcpListener, TcpStream};

use crate::commands::CommandLayer;
use crate::dispatch::{self, Request};
use crate::model::PlaybackQueue;

pub const GREETING: &str = concat!("spopd ", env!("CARGO_PKG_VERSION"), "\n");
pub const FAREWELL: &str = "Bye bye!\n";
pub const REPLY_END: &str = ".\n";

/// Accept clients until `shutdown` resolves.
pub async fn serve<Q>(
    listener: TcpListener,
    layer: CommandLayer<Q>,
    shutdown: impl Future<Output = ()>,
) -> Result<()>
where
    Q: PlaybackQueue + Clone + 'static,
{
    let local = listener.local_addr().context("listener has no local address")?;
    tracing::info!(%local, "Accepting clients");

    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            accepted = listener.accept() => {
                let (stream, peer) = match accepted {
                    Ok(accepted) => accepted,
                    Err(e) => {
                        tracing::warn!(error = %e, "Accept failed");
                        continue;
                    }
                };
                let layer = layer.clone();
                tokio::spawn(async move {
                    tracing::debug!(%peer, "Client connected");
                    if let Err(e) = handle_client(stream, layer).await {
                        tracing::warn!(%peer, error = %e, "Client session ended with error");
                    }
                    tracing::debug!(%peer, "Client disconnected");
                });
            }
        }
    }

    tracing::info!("Server stopped");
    Ok(())
}

async fn handle_client<Q: PlaybackQueue>(stream: TcpStream, layer: CommandLayer<Q>) -> Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();

    write_text(&mut writer, GREETING).await?;

    while let Some(line) = lines.next_line().await.context("read from client")? {
        if line.trim().is_empty() {
            continue;
        }

        let mut out = String::new();
        match dispatch::parse(&line) {
            Ok(Request::Run(command)) => layer.execute(command, &mut out).await,
            Ok(Request::Bye) => {
                write_text(&mut writer, FAREWELL).await?;
                break;
            }
            Err(e) => {
                tracing::debug!(line = %line, error = %e, "Unparsable command");
                out.push_str(&format!("- {}\n", e));
            }
        }
        out.push_str(REPLY_END);
        write_text(&mut writer, &out).await?;
    }

    Ok(())
}

async fn write_text(writer: &mut OwnedWriteHalf, text: &str) -> Result<()> {
    writer
        .write_all(text.as_bytes())
        .await
        .context("write to client")?;
    writer.flush().await.context("flush to client")?;
    Ok(())
}
