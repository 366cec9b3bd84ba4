use redis_streams::{commands::CommandError, stream::StreamError};

use crate::test_utils::{TestEnv, TestUtils};

async fn setup_sensor_stream(env: &TestEnv) {
    let entries = vec![
        ("1526985054069-0", vec!["temperature", "36", "humidity", "95"]),
        ("1526985054079-0", vec!["temperature", "37", "humidity", "94"]),
        ("1526985054079-1", vec!["temperature", "38"]),
        ("1526985054100-0", vec!["temperature", "39"]),
    ];

    for (stream_id, fields) in entries {
        env.exec_command_ok(
            TestUtils::xadd_command("sensor", stream_id, &fields),
            &TestUtils::expected_bulk_string(stream_id),
        )
        .await;
    }
}

#[tokio::test]
async fn test_handle_xrange_command() {
    let env = TestEnv::new();
    setup_sensor_stream(&env).await;

    let first =
        TestUtils::expected_stream_entry("1526985054069-0", &["temperature", "36", "humidity", "95"]);
    let second =
        TestUtils::expected_stream_entry("1526985054079-0", &["temperature", "37", "humidity", "94"]);
    let third = TestUtils::expected_stream_entry("1526985054079-1", &["temperature", "38"]);
    let fourth = TestUtils::expected_stream_entry("1526985054100-0", &["temperature", "39"]);

    let test_cases = vec![
        (
            "1526985054069",
            "1526985054079",
            vec![first.clone(), second.clone(), third.clone()],
        ),
        (
            "-",
            "+",
            vec![first.clone(), second.clone(), third.clone(), fourth.clone()],
        ),
        ("1526985054079-1", "+", vec![third.clone(), fourth.clone()]),
        ("-", "1526985054069-0", vec![first.clone()]),
        ("1526985054070", "1526985054078", vec![]),
        ("1526985054101", "+", vec![]),
    ];

    for (start, end, expected_entries) in test_cases {
        env.exec_command_ok(
            TestUtils::xrange_command("sensor", start, end),
            &TestUtils::expected_stream_entries(&expected_entries),
        )
        .await;
    }
}

#[tokio::test]
async fn test_handle_xrange_command_errors() {
    let env = TestEnv::new();
    setup_sensor_stream(&env).await;

    let test_cases = vec![
        (
            TestUtils::xrange_command("sensor", "1526985054079", "1526985054069"),
            CommandError::Stream(StreamError::InvalidRange),
        ),
        (
            TestUtils::xrange_command("sensor", "1526985054069-", "+"),
            CommandError::Stream(StreamError::InvalidStreamId("1526985054069-".to_string())),
        ),
        (
            TestUtils::xrange_command("humidity", "-", "+"),
            CommandError::Stream(StreamError::KeyNotFound("humidity".to_string())),
        ),
        (
            TestUtils::invalid_command(&["XRANGE", "sensor", "-"]),
            CommandError::InvalidXRangeCommand,
        ),
    ];

    for (command, expected_error) in test_cases {
        env.exec_command_err(command, expected_error).await;
    }
}
