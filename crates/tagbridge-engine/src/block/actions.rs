//! Blocks that only record side-effect actions: command invocation,
//! permission overrides, output redirection, gating and cooldowns.

use super::Block;
use crate::error::EngineError;
use crate::interpreter::Context;
use crate::response::Action;
use crate::tag::Tag;
use serde_json::{json, Value};

fn push_string(ctx: &mut Context, key: &str, value: String) {
    let entry = ctx
        .response
        .actions
        .entry(key.to_string())
        .or_insert_with(|| Action::Value(Value::Array(Vec::new())));
    if let Action::Value(Value::Array(items)) = entry {
        items.push(Value::String(value));
    }
}

/// `{command:ban {target(id)}}` — queue a command to run after the script.
pub struct CommandBlock;

impl Block for CommandBlock {
    fn will_accept(&self, tag: &Tag<'_>) -> bool {
        tag.declares_any(&["command", "c", "com", "cmd"])
    }

    fn process(&self, tag: &Tag<'_>, ctx: &mut Context) -> Result<Option<String>, EngineError> {
        let Some(command) = tag.payload.map(str::trim).filter(|c| !c.is_empty()) else {
            return Ok(None);
        };
        push_string(ctx, "commands", command.to_string());
        Ok(Some(String::new()))
    }
}

/// `{override}` lifts all permission checks; `{override(admin)}` just one.
pub struct OverrideBlock;

impl Block for OverrideBlock {
    fn will_accept(&self, tag: &Tag<'_>) -> bool {
        tag.declares_any(&["override"])
    }

    fn process(&self, tag: &Tag<'_>, ctx: &mut Context) -> Result<Option<String>, EngineError> {
        let overrides = match tag.parameter.map(str::trim) {
            None | Some("") => json!({ "admin": true, "mod": true, "permissions": true }),
            Some(scope @ ("admin" | "mod" | "permissions")) => json!({ scope: true }),
            Some(_) => return Ok(None),
        };
        ctx.response
            .actions
            .insert("overrides".to_string(), Action::Value(overrides));
        Ok(Some(String::new()))
    }
}

/// `{redirect(dm)}`, `{redirect(reply)}` or `{redirect(#channel)}`.
pub struct RedirectBlock;

impl Block for RedirectBlock {
    fn will_accept(&self, tag: &Tag<'_>) -> bool {
        tag.declares_any(&["redirect"])
    }

    fn process(&self, tag: &Tag<'_>, ctx: &mut Context) -> Result<Option<String>, EngineError> {
        let Some(target) = tag.parameter.map(str::trim).filter(|t| !t.is_empty()) else {
            return Ok(None);
        };
        ctx.response.actions.insert(
            "target".to_string(),
            Action::Value(Value::String(target.to_string())),
        );
        Ok(Some(String::new()))
    }
}

/// `{require(role):denial}` / `{blacklist(role):denial}` — gate the script on
/// the caller's roles or channels.
pub struct RequireBlock;

impl Block for RequireBlock {
    fn will_accept(&self, tag: &Tag<'_>) -> bool {
        tag.declares_any(&["require", "whitelist", "blacklist"])
    }

    fn process(&self, tag: &Tag<'_>, ctx: &mut Context) -> Result<Option<String>, EngineError> {
        let Some(parameter) = tag.parameter.filter(|p| !p.trim().is_empty()) else {
            return Ok(None);
        };
        let items: Vec<Value> = parameter
            .split(',')
            .map(|item| Value::String(item.trim().to_string()))
            .collect();
        let key = if tag.declaration.eq_ignore_ascii_case("blacklist") {
            "blacklist"
        } else {
            "requires"
        };
        ctx.response.actions.insert(
            key.to_string(),
            Action::Value(json!({
                "items": items,
                "response": tag.payload.unwrap_or(""),
            })),
        );
        Ok(Some(String::new()))
    }
}

/// `{cooldown(rate|per):message}` — at most `rate` invocations per `per`
/// seconds. The gateway only reports the cooldown; enforcement is the
/// consuming client's job.
pub struct CooldownBlock;

impl Block for CooldownBlock {
    fn will_accept(&self, tag: &Tag<'_>) -> bool {
        tag.declares_any(&["cooldown"])
    }

    fn process(&self, tag: &Tag<'_>, ctx: &mut Context) -> Result<Option<String>, EngineError> {
        let Some((rate, per)) = tag.parameter.and_then(|p| p.split_once('|')) else {
            return Ok(None);
        };
        let (Ok(rate), Ok(per)) = (rate.trim().parse::<u64>(), per.trim().parse::<u64>()) else {
            return Ok(None);
        };
        let mut cooldown = json!({ "rate": rate, "per": per });
        if let Some(message) = tag.payload {
            cooldown["message"] = Value::String(message.to_string());
        }
        ctx.response
            .actions
            .insert("cooldown".to_string(), Action::Value(cooldown));
        Ok(Some(String::new()))
    }
}
