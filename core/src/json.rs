//! JSON encoding of request payloads and decoding of response streams.
//!
//! # Design
//! `serde_json` is built with `arbitrary_precision`, so every decoded
//! `Number` keeps its literal text. Large integers and long decimals survive a
//! decode/encode cycle unchanged; `as_i64`, `as_u64` and `as_f64` convert on
//! demand.
//!
//! Decoding reads a single value from the front of the stream. Bytes after the
//! first complete value are not inspected, which lets callers decode the head
//! of a response without caring about trailing newlines or padding.

use std::io::Read;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Deserializer, Value};
use tracing::debug;

use crate::body::Body;
use crate::error::PayloadError;
use crate::finite::ensure_finite;

/// Serialize `value` to compact JSON.
///
/// `None` is the "nothing to send" case and yields `Ok(None)`, not an error.
pub fn encode_json<T>(value: Option<&T>) -> Result<Option<Body>, PayloadError>
where
    T: Serialize + ?Sized,
{
    value.map(json_body).transpose()
}

/// Serialize a value that is known to be present.
///
/// NaN and infinite floats fail here instead of being written as `null`.
pub fn json_body<T>(value: &T) -> Result<Body, PayloadError>
where
    T: Serialize + ?Sized,
{
    ensure_finite(value)?;
    let bytes = serde_json::to_vec(value).map_err(PayloadError::json)?;
    debug!(len = bytes.len(), "encoded json body");
    Ok(Body::json(bytes))
}

/// Parse the first JSON value in `reader` into a generic [`Value`].
pub fn parse_json<R: Read>(reader: R) -> Result<Value, PayloadError> {
    parse_json_as(reader)
}

/// Parse the first JSON value in `reader` into `T`.
///
/// Malformed input, an empty stream, and a value whose shape does not fit `T`
/// all fail with [`PayloadError::Decoding`].
pub fn parse_json_as<T, R>(reader: R) -> Result<T, PayloadError>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut stream = Deserializer::from_reader(reader).into_iter::<T>();
    match stream.next() {
        Some(Ok(value)) => {
            debug!(offset = stream.byte_offset(), "decoded json value");
            Ok(value)
        }
        Some(Err(e)) => Err(PayloadError::Decoding(e)),
        None => Err(PayloadError::Decoding(empty_stream())),
    }
}

/// The error `serde_json` itself reports for input holding no value at all.
fn empty_stream() -> serde_json::Error {
    serde_json::from_slice::<Value>(b"")
        .err()
        .unwrap_or_else(|| serde::de::Error::custom("EOF while parsing a value"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Cursor;

    use serde::Deserialize;
    use serde_json::json;

    use crate::error::EncodeFailure;

    fn read_all(body: Body) -> String {
        String::from_utf8(body.into_bytes().to_vec()).unwrap()
    }

    #[test]
    fn none_is_nothing_to_send() {
        let body = encode_json::<Value>(None).unwrap();
        assert!(body.is_none());
    }

    #[test]
    fn encodes_compact_json() {
        let body = encode_json(Some(&json!({"b": [1, 2], "a": "x"}))).unwrap().unwrap();
        assert_eq!(body.content_type(), "application/json");
        assert_eq!(read_all(body), r#"{"a":"x","b":[1,2]}"#);
    }

    #[test]
    fn encodes_unsized_values() {
        let body = encode_json::<str>(Some("hi")).unwrap().unwrap();
        assert_eq!(read_all(body), r#""hi""#);
    }

    #[test]
    fn non_string_map_keys_fail_to_encode() {
        let mut map = HashMap::new();
        map.insert((1, 2), "pair");
        let err = encode_json(Some(&map)).unwrap_err();
        assert!(matches!(err, PayloadError::Encoding(EncodeFailure::Json(_))));
    }

    #[test]
    fn failing_serialize_impl_surfaces_its_message() {
        struct Refuses;
        impl Serialize for Refuses {
            fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
                Err(serde::ser::Error::custom("callbacks cannot be encoded"))
            }
        }
        let err = encode_json(Some(&Refuses)).unwrap_err();
        assert!(err.to_string().contains("callbacks cannot be encoded"));
    }

    #[test]
    fn keeps_i64_max_exact() {
        let value = parse_json(Cursor::new(r#"{"id": 9223372036854775807}"#)).unwrap();
        let id = value["id"].as_number().unwrap();
        assert_eq!(id.to_string(), "9223372036854775807");
        assert_eq!(id.as_i64(), Some(i64::MAX));
    }

    #[test]
    fn keeps_integers_beyond_u64() {
        let value = parse_json(Cursor::new(r#"[18446744073709551616]"#)).unwrap();
        let n = value[0].as_number().unwrap();
        assert_eq!(n.to_string(), "18446744073709551616");
        assert_eq!(n.as_u64(), None);
        assert!(n.as_f64().is_some());
    }

    #[test]
    fn keeps_decimal_literals() {
        let value = parse_json(Cursor::new("0.1000000000000000055511151231257827")).unwrap();
        assert_eq!(value.to_string(), "0.1000000000000000055511151231257827");
        assert_eq!(value.as_f64(), Some(0.1));
    }

    #[test]
    fn malformed_input_is_a_decoding_error() {
        let err = parse_json(Cursor::new(r#"{"a":}"#)).unwrap_err();
        assert!(err.is_decoding());
        assert_eq!(err.line(), Some(1));
        assert_eq!(err.column(), Some(6));
    }

    #[test]
    fn truncated_input_is_a_decoding_error() {
        let err = parse_json(Cursor::new(r#"{"a": [1, 2"#)).unwrap_err();
        assert!(err.is_decoding());
        assert!(err.to_string().contains("EOF"));
    }

    #[test]
    fn empty_input_is_a_decoding_error() {
        let err = parse_json(Cursor::new("  \n")).unwrap_err();
        assert!(err.is_decoding());
        assert!(err.to_string().contains("EOF"));
    }

    #[test]
    fn trailing_bytes_after_first_value_are_ignored() {
        let value = parse_json(Cursor::new("{\"a\":1}\n{\"b\":2}")).unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn parses_into_typed_values() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Account {
            id: u64,
            name: String,
        }
        let account: Account = parse_json_as(Cursor::new(r#"{"id":7,"name":"ops"}"#)).unwrap();
        assert_eq!(account, Account { id: 7, name: "ops".to_string() });

        let err = parse_json_as::<Account, _>(Cursor::new(r#"{"id":"7"}"#)).unwrap_err();
        assert!(err.is_decoding());
    }

    #[test]
    fn non_finite_floats_fail_to_encode() {
        #[derive(Serialize)]
        struct Reading {
            temp: f64,
        }
        for temp in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = encode_json(Some(&Reading { temp })).unwrap_err();
            assert!(matches!(err, PayloadError::Encoding(EncodeFailure::Json(_))), "{temp}");
        }
        let err = json_body(&vec![1.0f32, f32::NAN]).unwrap_err();
        assert!(err.to_string().contains("has no JSON representation"));
    }

    #[test]
    fn decodes_what_it_encodes() {
        let cases = [
            json!({
                "id": 9223372036854775807u64,
                "ratio": 0.25,
                "tags": ["a", "b"],
                "nested": {"ok": true, "none": null},
            }),
            json!({}),
            json!([]),
            json!({"a": [], "b": {}, "c": [[], [{}]]}),
            json!("quote \" backslash \\ newline \n tab \t nul \u{0}"),
            json!({"héllo": "wörld ✓", "emoji": "🦀", "": "empty key"}),
            json!([i64::MIN, u64::MAX, -0.0, 1e300, 5e-324]),
            json!(null),
            json!(false),
        ];
        for original in cases {
            let body = encode_json(Some(&original)).unwrap().unwrap();
            assert_eq!(parse_json(body).unwrap(), original, "{original}");
        }
    }
}
