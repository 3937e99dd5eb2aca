use chrono::{TimeZone, Utc};
use mcabber_history::parser::{
    Direction, HeaderError, MessageReader, ParseError, parse_header, parse_history_file,
};
use std::io::Cursor;

const HISTORY: &str = "\
MR 20240305T14:07:09Z 002 hey, are you around?
I have a question
about the build
MS 20240305T14:08:00Z 000 sure
MI 20240305T14:09:30Z 000 bob is now away
";

#[test]
fn test_reader_consumes_continuation_lines() {
    let messages: Vec<_> = MessageReader::new(Cursor::new(HISTORY))
        .collect::<Result<_, _>>()
        .expect("valid history");

    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0].direction(), Direction::Received);
    assert_eq!(
        messages[0].text(),
        "hey, are you around?\nI have a question\nabout the build"
    );
    assert_eq!(messages[0].line_number, 1);
    assert_eq!(messages[1].direction(), Direction::Sent);
    assert_eq!(messages[1].line_number, 4);
    assert_eq!(messages[1].text(), "sure");
    assert_eq!(messages[2].direction(), Direction::Info);
    assert_eq!(messages[2].line_number, 5);
}

#[test]
fn test_reader_counts_lines_exactly() {
    let mut reader = MessageReader::new(Cursor::new(HISTORY));
    reader.next().unwrap().unwrap();
    assert_eq!(reader.lines_read(), 3);
    reader.next().unwrap().unwrap();
    assert_eq!(reader.lines_read(), 4);
}

#[test]
fn test_continuation_lines_that_look_like_headers_stay_in_body() {
    let input = "MR 20240305T14:07:09Z 1 quoting:\nMS 20240305T14:00:00Z 0 earlier\n";
    let messages: Vec<_> = MessageReader::new(Cursor::new(input))
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].continuation(), ["MS 20240305T14:00:00Z 0 earlier"]);
}

#[test]
fn test_truncated_message_is_an_error() {
    let input = "MR 20240305T14:07:09Z 3 hello\nonly one\n";
    let result: Result<Vec<_>, _> = MessageReader::new(Cursor::new(input)).collect();
    match result {
        Err(ParseError::TruncatedMessage {
            line_number,
            expected,
            found,
        }) => {
            assert_eq!(line_number, 1);
            assert_eq!(expected, 3);
            assert_eq!(found, 1);
        }
        other => panic!("expected TruncatedMessage, got {other:?}"),
    }
}

#[test]
fn test_unknown_direction_wins_over_other_fields() {
    assert_eq!(
        parse_header("SO 20240305T14:07:09Z 000 status"),
        Err(HeaderError::UnknownDirection("SO".to_string()))
    );
}

#[test]
fn test_header_error_reports_line() {
    let input = "MS 20240305T14:08:00Z 000 ok\nMR not-a-time 0 hi\n";
    let result: Result<Vec<_>, _> = MessageReader::new(Cursor::new(input)).collect();
    match result {
        Err(ParseError::Header {
            line_number,
            line,
            source,
        }) => {
            assert_eq!(line_number, 2);
            assert_eq!(line, "MR not-a-time 0 hi");
            assert_eq!(source, HeaderError::BadTimestamp("not-a-time".to_string()));
        }
        other => panic!("expected header error, got {other:?}"),
    }
}

#[test]
fn test_timestamp_is_utc() {
    let header = parse_header("MS 20231231T23:59:59Z 0 last one").unwrap();
    assert_eq!(
        header.timestamp,
        Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap()
    );
}

#[test]
fn test_parse_history_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("alice@example.org");
    std::fs::write(&path, HISTORY).unwrap();

    let messages = parse_history_file(&path).unwrap();
    assert_eq!(messages.len(), 3);
}

#[test]
fn test_invalid_utf8_does_not_stop_the_reader() {
    let input: &[u8] = b"MR 20240305T14:07:09Z 0 hello ok\r\n\
MR 20240305T14:08:00Z 1 caf\xe9 latin1\n\
na\xefve\n\
MR 20240305T14:09:00Z 0 hello again\n";

    let messages: Vec<_> = MessageReader::new(Cursor::new(input))
        .collect::<Result<_, _>>()
        .expect("non-UTF-8 bytes are decoded lossily");

    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0].text(), "hello ok");
    assert_eq!(messages[1].text(), "caf\u{FFFD} latin1\nna\u{FFFD}ve");
    assert_eq!(messages[2].text(), "hello again");
    assert_eq!(messages[2].line_number, 4);
}

#[test]
fn test_empty_stream_has_no_messages() {
    assert_eq!(MessageReader::new(Cursor::new("")).count(), 0);
}
