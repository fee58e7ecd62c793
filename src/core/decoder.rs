//! Payload decoding
//!
//! A payload is decoded in two steps. First the JSON object is read into a
//! [`RawLogRecord`] whose fields are all optional and which tolerates values of
//! the wrong type. Then the fallback table is applied to produce a fully
//! populated [`LogRecord`]. Only a payload that is not a JSON object at all is
//! an error.

use super::error::{ConsoleError, Result};
use super::log_level::LogLevel;
use super::log_record::{LogRecord, DEFAULT_MESSAGE, DEFAULT_TAG};
use super::timestamp::parse_iso8601;
use chrono::{DateTime, FixedOffset, Local};
use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;

/// A field value that is either the expected type or anything else
#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Valid(T),
    Invalid(IgnoredAny),
}

impl<T> Lenient<T> {
    fn into_valid(self) -> Option<T> {
        match self {
            Lenient::Valid(value) => Some(value),
            Lenient::Invalid(_ignored) => None,
        }
    }
}

/// Wire fields as received. `None` covers absent, null and wrongly typed values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawLogRecord {
    pub timestamp: Option<String>,
    pub log_level: Option<String>,
    pub tag: Option<String>,
    pub message: Option<String>,
}

impl RawLogRecord {
    /// Apply the per-field fallbacks.
    ///
    /// `now` is only called when the timestamp is missing or unparsable.
    pub fn into_record(self, now: impl FnOnce() -> DateTime<FixedOffset>) -> LogRecord {
        let timestamp = self
            .timestamp
            .as_deref()
            .and_then(parse_iso8601)
            .unwrap_or_else(now);
        let level = LogLevel::resolve(self.log_level.as_deref());
        let tag = self.tag.unwrap_or_else(|| DEFAULT_TAG.to_string());
        let message = self.message.unwrap_or_else(|| DEFAULT_MESSAGE.to_string());

        LogRecord::new(timestamp, level, tag, message)
    }
}

impl<'de> Deserialize<'de> for RawLogRecord {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RawLogRecordVisitor)
    }
}

struct RawLogRecordVisitor;

impl<'de> Visitor<'de> for RawLogRecordVisitor {
    type Value = RawLogRecord;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a log record object")
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut raw = RawLogRecord::default();

        while let Some(key) = map.next_key::<String>()? {
            let slot = match key.as_str() {
                "timestamp" => &mut raw.timestamp,
                "logLevel" => &mut raw.log_level,
                "tag" => &mut raw.tag,
                "message" => &mut raw.message,
                _ => {
                    map.next_value::<IgnoredAny>()?;
                    continue;
                }
            };
            // Last occurrence of a key wins
            *slot = map
                .next_value::<Option<Lenient<String>>>()?
                .and_then(Lenient::into_valid);
        }

        Ok(raw)
    }
}

fn local_now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

/// Turns raw request bodies into [`LogRecord`]s
#[derive(Debug, Clone, Copy)]
pub struct Decoder {
    clock: fn() -> DateTime<FixedOffset>,
}

impl Decoder {
    #[must_use]
    pub fn new() -> Self {
        Self { clock: local_now }
    }

    /// Use `clock` instead of the local wall clock for missing timestamps
    #[must_use]
    pub fn with_clock(clock: fn() -> DateTime<FixedOffset>) -> Self {
        Self { clock }
    }

    /// Read the optional-field representation of a payload.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::MalformedPayload`] when the bytes are not a
    /// single UTF-8 JSON object.
    pub fn decode_raw(&self, payload: &[u8]) -> Result<RawLogRecord> {
        serde_json::from_slice(payload).map_err(ConsoleError::malformed)
    }

    /// Decode one payload into a fully populated record.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::MalformedPayload`] when the bytes are not a
    /// single UTF-8 JSON object. Missing or malformed fields never fail.
    ///
    /// # Examples
    ///
    /// ```
    /// use remote_console::core::{Decoder, LogLevel};
    ///
    /// let record = Decoder::new().decode(br#"{"logLevel":"critical"}"#).unwrap();
    /// assert_eq!(record.level(), LogLevel::Info);
    /// assert_eq!(record.tag(), "unknown");
    ///
    /// assert!(Decoder::new().decode(b"not-json").is_err());
    /// ```
    pub fn decode(&self, payload: &[u8]) -> Result<LogRecord> {
        Ok(self.decode_raw(payload)?.into_record(self.clock))
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode with the local wall clock
pub fn decode(payload: &[u8]) -> Result<LogRecord> {
    Decoder::new().decode(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .expect("valid offset")
            .with_ymd_and_hms(2030, 5, 6, 7, 8, 9)
            .single()
            .expect("valid datetime")
    }

    fn decoder() -> Decoder {
        Decoder::with_clock(fixed_now)
    }

    #[test]
    fn test_full_payload() {
        let record = decoder()
            .decode(br#"{"timestamp":"2024-01-02T03:04:05.678Z","logLevel":"error","tag":"net","message":"connection lost"}"#)
            .expect("valid payload");

        assert_eq!(
            record.timestamp(),
            DateTime::parse_from_rfc3339("2024-01-02T03:04:05.678Z").unwrap()
        );
        assert_eq!(record.level(), LogLevel::Error);
        assert_eq!(record.tag(), "net");
        assert_eq!(record.message(), "connection lost");
    }

    #[test]
    fn test_empty_object_uses_every_default() {
        let record = decoder().decode(b"{}").expect("valid payload");

        assert_eq!(record.timestamp(), fixed_now());
        assert_eq!(record.level(), LogLevel::Debug);
        assert_eq!(record.tag(), "unknown");
        assert_eq!(record.message(), "no message");
    }

    #[test]
    fn test_unrecognized_level_differs_from_missing_level() {
        let unrecognized = decoder().decode(br#"{"logLevel":"critical"}"#).unwrap();
        let missing = decoder().decode(br#"{"tag":"x"}"#).unwrap();

        assert_eq!(unrecognized.level(), LogLevel::Info);
        assert_eq!(missing.level(), LogLevel::Debug);
    }

    #[test]
    fn test_null_fields_are_missing() {
        let record = decoder()
            .decode(br#"{"timestamp":null,"logLevel":null,"tag":null,"message":null}"#)
            .unwrap();

        assert_eq!(record.timestamp(), fixed_now());
        assert_eq!(record.level(), LogLevel::Debug);
        assert_eq!(record.tag(), DEFAULT_TAG);
        assert_eq!(record.message(), DEFAULT_MESSAGE);
    }

    #[test]
    fn test_wrongly_typed_fields_are_missing() {
        let record = decoder()
            .decode(br#"{"timestamp":12,"logLevel":3,"tag":["a"],"message":{"text":"hi"}}"#)
            .unwrap();

        assert_eq!(record.timestamp(), fixed_now());
        assert_eq!(record.level(), LogLevel::Debug);
        assert_eq!(record.tag(), DEFAULT_TAG);
        assert_eq!(record.message(), DEFAULT_MESSAGE);
    }

    #[test]
    fn test_unparsable_timestamp_uses_clock() {
        let record = decoder()
            .decode(br#"{"timestamp":"last tuesday","message":"m"}"#)
            .unwrap();
        assert_eq!(record.timestamp(), fixed_now());
        assert_eq!(record.message(), "m");
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let record = decoder()
            .decode(br#"{"extra":{"nested":[1,2,3]},"tag":"ui","level":"fatal"}"#)
            .unwrap();
        assert_eq!(record.tag(), "ui");
        assert_eq!(record.level(), LogLevel::Debug);
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let raw = decoder()
            .decode_raw(br#"{"tag":"first","tag":"second"}"#)
            .unwrap();
        assert_eq!(raw.tag.as_deref(), Some("second"));
    }

    #[test]
    fn test_text_is_copied_verbatim() {
        let record = decoder()
            .decode(r#"{"tag":"  spaced ","message":"line1\nline2 é"}"#.as_bytes())
            .unwrap();
        assert_eq!(record.tag(), "  spaced ");
        assert_eq!(record.message(), "line1\nline2 é");
    }

    #[test]
    fn test_malformed_payloads() {
        let cases: [&[u8]; 8] = [
            b"not-json",
            b"",
            b"[]",
            b"[\"trace\"]",
            b"42",
            b"\"text\"",
            b"{\"tag\":\"a\"} trailing",
            b"{\"tag\":\"\xff\"}",
        ];

        for payload in cases {
            let err = decoder().decode(payload).unwrap_err();
            assert!(err.is_malformed_payload(), "payload {:?}", payload);
        }
    }

    #[test]
    fn test_top_level_null_is_malformed() {
        assert!(decoder().decode(b"null").is_err());
    }
}
