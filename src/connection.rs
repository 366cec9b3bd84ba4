use std::sync::Arc;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};

use crate::{
    commands::CommandHandler,
    input::{CommandReadError, read_and_parse_resp},
    key_value_store::KeyValueStore,
    stream_store::StreamStore,
};

/// Serves one client until it disconnects.
///
/// Every decoded request gets exactly one reply, in order. Malformed requests
/// and failing commands are answered with an error reply and the connection
/// stays open.
///
/// # Returns
///
/// * `Ok(())` - The client closed the connection
/// * `Err(CommandReadError::IoError)` - Reading from or writing to the socket failed
pub async fn handle_client_connection<S>(
    mut stream: S,
    client_address: &str,
    store: Arc<KeyValueStore>,
    stream_store: Arc<StreamStore>,
) -> Result<(), CommandReadError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut buffer = BytesMut::with_capacity(4096);

    loop {
        let parsed_input = match read_and_parse_resp(&mut stream, &mut buffer).await {
            Ok(values) => values,
            Err(CommandReadError::ConnectionClosed) => {
                tracing::debug!(client_address, "client disconnected");
                return Ok(());
            }
            Err(CommandReadError::IoError(e)) => return Err(CommandReadError::IoError(e)),
            Err(e) => {
                tracing::debug!(client_address, error = %e, "malformed request");
                write_to_stream(&mut stream, e.as_string().as_bytes()).await?;
                continue;
            }
        };

        for input in parsed_input {
            let response = match CommandHandler::new(input) {
                Ok(command_handler) => {
                    tracing::debug!(
                        client_address,
                        command = %command_handler.name,
                        "handling command"
                    );

                    match command_handler
                        .handle_command(Arc::clone(&store), Arc::clone(&stream_store))
                        .await
                    {
                        Ok(response) => response.encode(),
                        Err(e) => {
                            tracing::debug!(
                                client_address,
                                command = %command_handler.name,
                                error = %e,
                                "command failed"
                            );
                            e.as_string()
                        }
                    }
                }
                Err(e) => e.as_string(),
            };

            write_to_stream(&mut stream, response.as_bytes()).await?;
        }
    }
}

async fn write_to_stream<W>(writer: &mut W, response: &[u8]) -> Result<(), CommandReadError>
where
    W: AsyncWriteExt + Unpin,
{
    writer
        .write_all(response)
        .await
        .map_err(|e| CommandReadError::IoError(e.to_string()))?;
    writer
        .flush()
        .await
        .map_err(|e| CommandReadError::IoError(e.to_string()))?;

    Ok(())
}
