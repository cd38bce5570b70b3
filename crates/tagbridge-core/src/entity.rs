//! Synthetic chat-platform entities built from untrusted flat payloads.
//!
//! Every field defaults on missing or malformed input; synthesis never fails
//! and never touches the network. Timestamps are accepted only as Unix
//! seconds, either a JSON integer or a string composed entirely of decimal
//! digits; anything else is epoch zero.

use chrono::{DateTime, Utc};
use serde_json::Value;

/// Read-only stand-in for a guild member, request-scoped.
#[derive(Debug, Clone)]
pub struct SyntheticMember {
    pub username: String,
    pub display_name: String,
    pub id: String,
    pub color: String,
    pub avatar_url: Option<String>,
    pub discriminator: String,
    pub mention: String,
    pub created_at: DateTime<Utc>,
    pub joined_at: DateTime<Utc>,
    /// Synthetic entities are never bots.
    pub bot: bool,
}

impl SyntheticMember {
    pub fn from_payload(payload: &Value) -> Self {
        Self {
            username: str_field(payload, "username"),
            display_name: str_field(payload, "name"),
            id: id_field(payload),
            color: str_field(payload, "color"),
            avatar_url: opt_str_field(payload, "avatar"),
            discriminator: opt_str_field(payload, "discriminator")
                .unwrap_or_else(|| "0001".to_string()),
            mention: str_field(payload, "mention"),
            created_at: timestamp_field(payload, "created_at"),
            joined_at: timestamp_field(payload, "joined_at"),
            bot: false,
        }
    }
}

/// Read-only stand-in for a text channel, request-scoped.
#[derive(Debug, Clone)]
pub struct SyntheticChannel {
    pub id: String,
    pub name: String,
    pub mention: String,
    pub topic: String,
    /// True only when the payload value is literally boolean `true`.
    pub nsfw: bool,
    pub slowmode_delay: u64,
    pub created_at: DateTime<Utc>,
}

impl SyntheticChannel {
    pub fn from_payload(payload: &Value) -> Self {
        Self {
            id: id_field(payload),
            name: str_field(payload, "name"),
            mention: str_field(payload, "mention"),
            topic: str_field(payload, "topic"),
            nsfw: bool_field(payload, "nsfw"),
            slowmode_delay: uint_field(payload, "slowmode"),
            created_at: timestamp_field(payload, "created_at"),
        }
    }
}

fn str_field(payload: &Value, key: &str) -> String {
    payload
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}

fn opt_str_field(payload: &Value, key: &str) -> Option<String> {
    payload
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Identifiers arrive as strings or numbers depending on the client.
fn id_field(payload: &Value) -> String {
    match payload.get("id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Type-exact boolean coercion: the string "true" is still false.
fn bool_field(payload: &Value, key: &str) -> bool {
    payload.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn uint_field(payload: &Value, key: &str) -> u64 {
    match payload.get(key) {
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        Some(Value::String(s)) if s.bytes().all(|b| b.is_ascii_digit()) => {
            s.parse().unwrap_or(0)
        }
        _ => 0,
    }
}

/// Defensive timestamp parse: digits-only strings and integers are Unix
/// seconds, everything else falls back to epoch zero rather than erroring.
fn timestamp_field(payload: &Value, key: &str) -> DateTime<Utc> {
    let seconds = match payload.get(key) {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
            s.parse::<i64>().ok()
        }
        _ => None,
    };
    seconds
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or(DateTime::UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn member_defaults_from_empty_payload() {
        let member = SyntheticMember::from_payload(&Value::Null);
        assert_eq!(member.username, "");
        assert_eq!(member.display_name, "");
        assert_eq!(member.discriminator, "0001");
        assert_eq!(member.avatar_url, None);
        assert_eq!(member.created_at, DateTime::UNIX_EPOCH);
        assert_eq!(member.joined_at, DateTime::UNIX_EPOCH);
        assert!(!member.bot);
    }

    #[test]
    fn numeric_string_timestamp_parses() {
        let member = SyntheticMember::from_payload(&json!({ "created_at": "1700000000" }));
        assert_eq!(member.created_at.timestamp(), 1_700_000_000);
    }

    #[test]
    fn integer_timestamp_parses() {
        let member = SyntheticMember::from_payload(&json!({ "joined_at": 1_600_000_000 }));
        assert_eq!(member.joined_at.timestamp(), 1_600_000_000);
    }

    #[test]
    fn malformed_timestamp_falls_back_to_epoch() {
        for bad in [json!("not-a-number"), json!("12.5"), json!("-5"), json!([1])] {
            let member = SyntheticMember::from_payload(&json!({ "created_at": bad }));
            assert_eq!(member.created_at, DateTime::UNIX_EPOCH);
        }
    }

    #[test]
    fn nsfw_coercion_is_type_exact() {
        let channel = SyntheticChannel::from_payload(&json!({ "nsfw": true }));
        assert!(channel.nsfw);
        let channel = SyntheticChannel::from_payload(&json!({ "nsfw": "true" }));
        assert!(!channel.nsfw);
        let channel = SyntheticChannel::from_payload(&json!({}));
        assert!(!channel.nsfw);
    }

    #[test]
    fn channel_fields_populate() {
        let channel = SyntheticChannel::from_payload(&json!({
            "id": 42,
            "name": "general",
            "topic": "chatter",
            "slowmode": "5",
        }));
        assert_eq!(channel.id, "42");
        assert_eq!(channel.name, "general");
        assert_eq!(channel.topic, "chatter");
        assert_eq!(channel.slowmode_delay, 5);
    }
}
