//! Embed construction. Accumulates into the `embed` action.

use super::Block;
use crate::embed::Embed;
use crate::error::EngineError;
use crate::interpreter::Context;
use crate::response::Action;
use crate::tag::Tag;

/// Two forms: `{embed(title):Hello}` assigns one attribute;
/// `{embed:{"title":"Hello"}}` overlays a whole JSON embed. Repeated blocks
/// build up the same embed.
pub struct EmbedBlock;

impl Block for EmbedBlock {
    fn will_accept(&self, tag: &Tag<'_>) -> bool {
        tag.declares_any(&["embed"])
    }

    fn process(&self, tag: &Tag<'_>, ctx: &mut Context) -> Result<Option<String>, EngineError> {
        let entry = ctx
            .response
            .actions
            .entry("embed".to_string())
            .or_insert_with(|| Action::Embed(Embed::default()));
        let Action::Embed(embed) = entry else {
            return Ok(None);
        };

        match (tag.parameter, tag.payload) {
            (Some(attribute), payload) => {
                if !embed.set_attribute(attribute, payload.unwrap_or("")) {
                    return Ok(None);
                }
            }
            (None, Some(payload)) => {
                let parsed: Embed = serde_json::from_str(payload)
                    .map_err(|e| EngineError::EmbedPayload(e.to_string()))?;
                embed.merge(parsed);
            }
            (None, None) => return Ok(None),
        }
        Ok(Some(String::new()))
    }
}
