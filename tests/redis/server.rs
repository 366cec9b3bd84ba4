use std::{sync::Arc, time::Duration};

use bytes::BytesMut;
use redis_streams::{
    input::read_and_parse_resp,
    key_value_store::KeyValueStore,
    resp::RespValue,
    server::RedisServer,
    stream::FixedClock,
    stream_store::StreamStore,
};
use tokio::{
    io::AsyncWriteExt,
    net::{TcpListener, TcpStream},
    time::timeout,
};

use crate::test_utils::TestUtils;

async fn spawn_server(workers: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap().to_string();

    let server = RedisServer::new(
        ["redis-streams", "--workers", workers]
            .iter()
            .map(|arg| arg.to_string()),
    )
    .unwrap();
    let stream_store = Arc::new(StreamStore::new(Arc::new(FixedClock::new(1526919030474))));

    tokio::spawn(async move {
        server
            .serve(listener, Arc::new(KeyValueStore::new()), stream_store)
            .await
    });

    address
}

async fn send_command(
    client: &mut TcpStream,
    buffer: &mut BytesMut,
    command: RespValue,
) -> String {
    client
        .write_all(command.encode().as_bytes())
        .await
        .unwrap();

    let replies = timeout(Duration::from_secs(2), read_and_parse_resp(client, buffer))
        .await
        .expect("timed out waiting for a reply")
        .unwrap();

    assert_eq!(replies.len(), 1);
    replies[0].encode()
}

#[tokio::test]
async fn test_server_end_to_end() {
    let address = spawn_server("2").await;

    let mut client = TcpStream::connect(&address).await.unwrap();
    let mut buffer = BytesMut::new();

    assert_eq!(
        send_command(&mut client, &mut buffer, TestUtils::ping_command()).await,
        TestUtils::expected_simple_string("PONG")
    );
    assert_eq!(
        send_command(
            &mut client,
            &mut buffer,
            TestUtils::xadd_command("sensor", "*", &["temperature", "36"])
        )
        .await,
        TestUtils::expected_bulk_string("1526919030474-0")
    );
    assert_eq!(
        send_command(
            &mut client,
            &mut buffer,
            TestUtils::xadd_command("sensor", "1526919030474-0", &["temperature", "37"])
        )
        .await,
        TestUtils::expected_error(
            "ERR The ID specified in XADD is equal or smaller than the target stream top item"
        )
    );
    assert_eq!(
        send_command(
            &mut client,
            &mut buffer,
            TestUtils::xrange_command("sensor", "-", "+")
        )
        .await,
        TestUtils::expected_stream_entries(&[TestUtils::expected_stream_entry(
            "1526919030474-0",
            &["temperature", "36"]
        )])
    );

    // A second client sees the same streams.
    let mut other_client = TcpStream::connect(&address).await.unwrap();
    let mut other_buffer = BytesMut::new();

    assert_eq!(
        send_command(
            &mut other_client,
            &mut other_buffer,
            TestUtils::type_command("sensor")
        )
        .await,
        TestUtils::expected_simple_string("stream")
    );
}

#[tokio::test]
async fn test_server_queues_clients_beyond_the_worker_count() {
    let address = spawn_server("1").await;

    let mut first_client = TcpStream::connect(&address).await.unwrap();
    let mut first_buffer = BytesMut::new();
    assert_eq!(
        send_command(&mut first_client, &mut first_buffer, TestUtils::ping_command()).await,
        TestUtils::expected_simple_string("PONG")
    );

    let mut second_client = TcpStream::connect(&address).await.unwrap();
    second_client
        .write_all(TestUtils::echo_command("mango").encode().as_bytes())
        .await
        .unwrap();

    // The only worker is busy with the first client.
    let mut second_buffer = BytesMut::new();
    assert!(
        timeout(
            Duration::from_millis(100),
            read_and_parse_resp(&mut second_client, &mut second_buffer)
        )
        .await
        .is_err()
    );

    drop(first_client);

    let replies = timeout(
        Duration::from_secs(2),
        read_and_parse_resp(&mut second_client, &mut second_buffer),
    )
    .await
    .expect("queued client was never served")
    .unwrap();

    assert_eq!(replies, vec![RespValue::BulkString("mango".to_string())]);
}

#[tokio::test]
async fn test_server_replies_to_malformed_input() {
    let address = spawn_server("1").await;

    let mut client = TcpStream::connect(&address).await.unwrap();
    let mut buffer = BytesMut::new();

    assert_eq!(
        send_command(
            &mut client,
            &mut buffer,
            TestUtils::invalid_command(&["HELLO", "3"])
        )
        .await,
        TestUtils::expected_error("ERR unknown command 'HELLO'")
    );
    assert_eq!(
        send_command(
            &mut client,
            &mut buffer,
            TestUtils::invalid_command(&["XREAD", "BLOCK", "0", "STREAMS", "sensor", "$"])
        )
        .await,
        TestUtils::expected_error("ERR Invalid XREAD command option")
    );
    assert_eq!(
        send_command(&mut client, &mut buffer, TestUtils::echo_command("still here")).await,
        TestUtils::expected_bulk_string("still here")
    );
}
