use std::{net::SocketAddr, sync::Arc};

use thiserror::Error;
use tokio::{
    net::{TcpListener, TcpStream},
    sync::{Mutex, mpsc},
};

use crate::{
    connection::handle_client_connection, key_value_store::KeyValueStore,
    stream_store::StreamStore,
};

#[derive(Error, Debug, PartialEq)]
pub enum CliError {
    #[error("Invalid command line flag")]
    InvalidCommandLineFlag,
    #[error("Invalid command line flag value")]
    InvalidCommandLineFlagValue,
}

type ConnectionReceiver = Arc<Mutex<mpsc::UnboundedReceiver<(TcpStream, SocketAddr)>>>;

#[derive(Debug, PartialEq)]
pub struct RedisServer {
    pub port: u32,
    pub bind: String,
    /// Number of tasks serving connections; each serves one client at a time
    pub workers: usize,
}

impl RedisServer {
    pub fn new<I: IntoIterator<Item = String>>(command_line_args: I) -> Result<Self, CliError> {
        let mut iter = command_line_args.into_iter().skip(1);
        let mut port: Option<u32> = None;
        let mut bind: Option<String> = None;
        let mut workers: Option<usize> = None;

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--port" => {
                    let Some(port_str) = iter.next() else {
                        return Err(CliError::InvalidCommandLineFlagValue);
                    };

                    let port_number = port_str
                        .parse::<u32>()
                        .map_err(|_| CliError::InvalidCommandLineFlagValue)?;

                    if !(1..=65535).contains(&port_number) {
                        return Err(CliError::InvalidCommandLineFlagValue);
                    }

                    port = Some(port_number);
                }
                "--bind" => {
                    let Some(address) = iter.next() else {
                        return Err(CliError::InvalidCommandLineFlagValue);
                    };

                    bind = Some(address);
                }
                "--workers" => {
                    let Some(workers_str) = iter.next() else {
                        return Err(CliError::InvalidCommandLineFlagValue);
                    };

                    let worker_count = workers_str
                        .parse::<usize>()
                        .map_err(|_| CliError::InvalidCommandLineFlagValue)?;

                    if worker_count == 0 {
                        return Err(CliError::InvalidCommandLineFlagValue);
                    }

                    workers = Some(worker_count);
                }
                _ => return Err(CliError::InvalidCommandLineFlag),
            }
        }

        Ok(RedisServer {
            port: port.unwrap_or(6379),
            bind: bind.unwrap_or_else(|| "127.0.0.1".to_string()),
            workers: workers.unwrap_or(10),
        })
    }

    /// Binds the configured address and serves clients until the process exits.
    pub async fn run(&self) -> tokio::io::Result<()> {
        let listener = TcpListener::bind(format!("{}:{}", self.bind, self.port)).await?;
        tracing::info!(address = %listener.local_addr()?, workers = self.workers, "server listening");

        self.serve(
            listener,
            Arc::new(KeyValueStore::new()),
            Arc::new(StreamStore::default()),
        )
        .await
    }

    /// Accepts connections from `listener` and queues them for the worker pool.
    ///
    /// The queue is unbounded; a connection waits in it until a worker is free.
    pub async fn serve(
        &self,
        listener: TcpListener,
        store: Arc<KeyValueStore>,
        stream_store: Arc<StreamStore>,
    ) -> tokio::io::Result<()> {
        let (sender, receiver) = mpsc::unbounded_channel();
        let receiver: ConnectionReceiver = Arc::new(Mutex::new(receiver));

        for worker_id in 1..=self.workers {
            tokio::spawn(run_worker(
                worker_id,
                Arc::clone(&receiver),
                Arc::clone(&store),
                Arc::clone(&stream_store),
            ));
        }

        loop {
            match listener.accept().await {
                Ok((stream, client_address)) => {
                    tracing::debug!(%client_address, "accepted connection");

                    if sender.send((stream, client_address)).is_err() {
                        tracing::error!("every worker has stopped, shutting down");
                        return Ok(());
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to accept connection");
                }
            }
        }
    }
}

async fn run_worker(
    worker_id: usize,
    receiver: ConnectionReceiver,
    store: Arc<KeyValueStore>,
    stream_store: Arc<StreamStore>,
) {
    loop {
        let next_connection = {
            let mut receiver_guard = receiver.lock().await;
            receiver_guard.recv().await
        };

        let Some((stream, client_address)) = next_connection else {
            break;
        };

        tracing::debug!(worker_id, %client_address, "serving connection");

        if let Err(e) = handle_client_connection(
            stream,
            &client_address.to_string(),
            Arc::clone(&store),
            Arc::clone(&stream_store),
        )
        .await
        {
            tracing::warn!(worker_id, %client_address, error = %e, "connection dropped");
        }
    }
}
