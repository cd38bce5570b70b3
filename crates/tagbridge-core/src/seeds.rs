//! Seed builder: wraps synthesized entities in the engine's adapter types.

use crate::entity::{SyntheticChannel, SyntheticMember};
use serde_json::Value;
use std::sync::Arc;
use tagbridge_engine::{Adapter, SeedSet, StringAdapter};

/// Exposes a [`SyntheticMember`] to scripts: `{user}`, `{user(id)}`,
/// `{user(created_at)}`, ...
pub struct MemberAdapter {
    member: SyntheticMember,
}

impl MemberAdapter {
    pub fn new(member: SyntheticMember) -> Self {
        Self { member }
    }

    fn best_name(&self) -> String {
        if self.member.display_name.is_empty() {
            self.member.username.clone()
        } else {
            self.member.display_name.clone()
        }
    }
}

impl Adapter for MemberAdapter {
    fn get_value(&self, param: Option<&str>) -> Option<String> {
        let Some(param) = param else {
            return Some(self.best_name());
        };
        match param.trim().to_ascii_lowercase().as_str() {
            "id" => Some(self.member.id.clone()),
            "name" | "display_name" | "nick" => Some(self.best_name()),
            "username" => Some(self.member.username.clone()),
            "mention" => Some(self.member.mention.clone()),
            "discriminator" => Some(self.member.discriminator.clone()),
            "color" | "colour" => Some(self.member.color.clone()),
            "avatar" => Some(self.member.avatar_url.clone().unwrap_or_default()),
            "created_at" | "timestamp" => Some(self.member.created_at.timestamp().to_string()),
            "joined_at" => Some(self.member.joined_at.timestamp().to_string()),
            "bot" => Some(self.member.bot.to_string()),
            _ => None,
        }
    }
}

/// Exposes a [`SyntheticChannel`] to scripts.
pub struct ChannelAdapter {
    channel: SyntheticChannel,
}

impl ChannelAdapter {
    pub fn new(channel: SyntheticChannel) -> Self {
        Self { channel }
    }
}

impl Adapter for ChannelAdapter {
    fn get_value(&self, param: Option<&str>) -> Option<String> {
        let Some(param) = param else {
            return Some(self.channel.name.clone());
        };
        match param.trim().to_ascii_lowercase().as_str() {
            "id" => Some(self.channel.id.clone()),
            "name" => Some(self.channel.name.clone()),
            "mention" => Some(self.channel.mention.clone()),
            "topic" => Some(self.channel.topic.clone()),
            "nsfw" => Some(self.channel.nsfw.to_string()),
            "slowmode" | "slowmode_delay" => Some(self.channel.slowmode_delay.to_string()),
            "created_at" | "timestamp" => Some(self.channel.created_at.timestamp().to_string()),
            _ => None,
        }
    }
}

/// Builds the seed mapping for one execution call from the caller's seed
/// bundle. Absent sub-payloads still produce fully defaulted entities, so
/// `{user}` and `{channel}` always resolve.
pub fn build_seeds(payload: &Value) -> SeedSet {
    let sub = |key: &str| payload.get(key).cloned().unwrap_or(Value::Null);
    let mut seeds = SeedSet::new();
    seeds.insert(
        "args".to_string(),
        Arc::new(StringAdapter::new(
            payload.get("args").and_then(Value::as_str).unwrap_or(""),
        )),
    );
    for key in ["user", "target"] {
        seeds.insert(
            key.to_string(),
            Arc::new(MemberAdapter::new(SyntheticMember::from_payload(&sub(key)))),
        );
    }
    seeds.insert(
        "channel".to_string(),
        Arc::new(ChannelAdapter::new(SyntheticChannel::from_payload(&sub(
            "channel",
        )))),
    );
    seeds
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_payload_still_defines_every_seed() {
        let seeds = build_seeds(&Value::Null);
        for key in ["args", "user", "target", "channel"] {
            assert!(seeds.contains_key(key), "missing seed {key}");
            assert!(seeds[key].get_value(None).is_some());
        }
    }

    #[test]
    fn member_attributes_resolve() {
        let seeds = build_seeds(&json!({
            "user": { "name": "Ada", "id": "1", "created_at": "1700000000" }
        }));
        let user = &seeds["user"];
        assert_eq!(user.get_value(Some("name")).as_deref(), Some("Ada"));
        assert_eq!(user.get_value(Some("id")).as_deref(), Some("1"));
        assert_eq!(
            user.get_value(Some("created_at")).as_deref(),
            Some("1700000000")
        );
        assert_eq!(user.get_value(Some("bot")).as_deref(), Some("false"));
        assert_eq!(user.get_value(Some("nonsense")), None);
    }

    #[test]
    fn display_name_falls_back_to_username() {
        let seeds = build_seeds(&json!({ "user": { "username": "ada_l" } }));
        assert_eq!(seeds["user"].get_value(None).as_deref(), Some("ada_l"));
        assert_eq!(
            seeds["user"].get_value(Some("name")).as_deref(),
            Some("ada_l")
        );
    }

    #[test]
    fn channel_attributes_resolve() {
        let seeds = build_seeds(&json!({
            "channel": { "name": "general", "nsfw": true, "slowmode": 10 }
        }));
        let channel = &seeds["channel"];
        assert_eq!(channel.get_value(None).as_deref(), Some("general"));
        assert_eq!(channel.get_value(Some("nsfw")).as_deref(), Some("true"));
        assert_eq!(channel.get_value(Some("slowmode")).as_deref(), Some("10"));
    }

    #[test]
    fn args_seed_carries_the_raw_string() {
        let seeds = build_seeds(&json!({ "args": "one two" }));
        assert_eq!(seeds["args"].get_value(None).as_deref(), Some("one two"));
        assert_eq!(seeds["args"].get_value(Some("2")).as_deref(), Some("two"));
    }
}
