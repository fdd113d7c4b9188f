//! Property-based tests for the STOMP codec and outbound chunking.
//!
//! These tests use proptest to fuzz encoding, decoding and splitting.

use proptest::prelude::*;
use wsstomp::codec::{decode, encode};
use wsstomp::connection::ChunkSplitter;
use wsstomp::{Command, Frame, Headers};

fn client_command_strategy() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(Command::Connect),
        Just(Command::Send),
        Just(Command::Subscribe),
        Just(Command::Unsubscribe),
        Just(Command::Begin),
        Just(Command::Commit),
        Just(Command::Abort),
        Just(Command::Ack),
        Just(Command::Disconnect),
    ]
}

/// Header keys and values that survive the unescaped wire format.
fn header_strategy() -> impl Strategy<Value = Headers> {
    prop::collection::vec(("[a-z][a-z0-9-]{0,12}", "[ -9;-~]{0,24}"), 0..6)
        .prop_map(|pairs| pairs.into_iter().collect())
}

/// Bodies without NUL, and without a trailing newline the decoder would trim.
fn body_strategy() -> impl Strategy<Value = String> {
    "[^\\x00\\r]{0,300}".prop_filter("no trailing newline", |s| !s.ends_with('\n'))
}

proptest! {
    #[test]
    fn test_roundtrip(
        command in client_command_strategy(),
        headers in header_strategy(),
        body in prop::option::of(body_strategy()),
    ) {
        let mut frame = Frame::new(command).with_headers(&headers);
        if let Some(body) = body.clone() {
            frame.set_body(body);
        }
        let wire = encode(&frame);
        let decoded = decode(&wire);

        prop_assert_eq!(&decoded.command, &frame.command);
        for (key, value) in headers.iter() {
            if key != "content-length" {
                prop_assert_eq!(decoded.header(key), Some(value));
            }
        }
        let expected_body = body.filter(|b| !b.is_empty());
        prop_assert_eq!(decoded.body(), expected_body.as_deref());
    }

    #[test]
    fn test_encoded_content_length_counts_bytes(body in "[^\\x00]{0,200}") {
        let frame = Frame::new(Command::Send).with_header("content-length", "0").with_body(body.clone());
        let decoded = decode(&encode(&frame));
        let expected = body.len().to_string();
        prop_assert_eq!(decoded.header("content-length"), Some(expected.as_str()));
    }

    #[test]
    fn test_encoded_frame_ends_with_single_nul(
        command in client_command_strategy(),
        body in prop::option::of(body_strategy()),
    ) {
        let mut frame = Frame::new(command);
        if let Some(body) = body {
            frame.set_body(body);
        }
        let wire = encode(&frame);
        prop_assert!(wire.ends_with('\0'));
        prop_assert_eq!(wire.matches('\0').count(), 1);
    }

    #[test]
    fn test_chunks_concatenate_to_input(text in "\\PC{0,2000}", max in 1usize..512) {
        let chunks: Vec<_> = ChunkSplitter::new(&text, max).collect();
        prop_assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_chunks_respect_max_size(text in "\\PC{0,2000}", max in 4usize..512) {
        // Every char fits in four bytes, so no chunk may exceed the limit.
        for chunk in ChunkSplitter::new(&text, max) {
            prop_assert!(chunk.len() <= max);
            prop_assert!(!chunk.is_empty());
        }
    }

    #[test]
    fn test_chunk_count(len in 0usize..5000, max in 1usize..700) {
        let text = "x".repeat(len);
        let count = ChunkSplitter::new(&text, max).count();
        prop_assert_eq!(count, len.div_ceil(max));
    }

    #[test]
    fn test_decode_never_panics(input in "\\PC{0,500}") {
        let _ = decode(&input);
    }
}
