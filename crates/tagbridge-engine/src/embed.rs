//! Structured embed under construction by the embed block. Serialized to a
//! plain JSON object before it leaves the engine boundary.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Embed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Decimal RGB, accepted as `#RRGGBB`, `0xRRGGBB` or a plain integer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedMedia>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<EmbedMedia>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub fields: Vec<EmbedField>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedMedia {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedFooter {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedAuthor {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub inline: bool,
}

impl Embed {
    /// Applies a single attribute assignment such as `{embed(title):Hi}`.
    /// Returns false for attributes the embed does not know.
    pub fn set_attribute(&mut self, name: &str, value: &str) -> bool {
        match name.trim().to_ascii_lowercase().as_str() {
            "title" => self.title = Some(value.to_string()),
            "description" | "desc" => self.description = Some(value.to_string()),
            "url" => self.url = Some(value.to_string()),
            "color" | "colour" => self.color = parse_color(value),
            "timestamp" => self.timestamp = Some(value.to_string()),
            "thumbnail" => {
                self.thumbnail = Some(EmbedMedia {
                    url: value.to_string(),
                })
            }
            "image" => {
                self.image = Some(EmbedMedia {
                    url: value.to_string(),
                })
            }
            "footer" => {
                self.footer = Some(EmbedFooter {
                    text: value.to_string(),
                })
            }
            "author" => {
                self.author = Some(EmbedAuthor {
                    name: value.to_string(),
                })
            }
            "field" => {
                let mut parts = value.splitn(3, '|');
                let name = parts.next().unwrap_or("").to_string();
                let value = parts.next().unwrap_or("").to_string();
                let inline = parts
                    .next()
                    .map(|p| p.trim().eq_ignore_ascii_case("true"))
                    .unwrap_or(false);
                self.fields.push(EmbedField {
                    name,
                    value,
                    inline,
                });
            }
            _ => return false,
        }
        true
    }

    /// Overlays fields from a caller-supplied JSON embed; fields absent from
    /// `other` keep their current value.
    pub fn merge(&mut self, other: Embed) {
        if other.title.is_some() {
            self.title = other.title;
        }
        if other.description.is_some() {
            self.description = other.description;
        }
        if other.url.is_some() {
            self.url = other.url;
        }
        if other.color.is_some() {
            self.color = other.color;
        }
        if other.timestamp.is_some() {
            self.timestamp = other.timestamp;
        }
        if other.thumbnail.is_some() {
            self.thumbnail = other.thumbnail;
        }
        if other.image.is_some() {
            self.image = other.image;
        }
        if other.footer.is_some() {
            self.footer = other.footer;
        }
        if other.author.is_some() {
            self.author = other.author;
        }
        if !other.fields.is_empty() {
            self.fields.extend(other.fields);
        }
    }

    /// Plain serializable form for the response `actions` mapping.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

fn parse_color(value: &str) -> Option<u32> {
    let v = value.trim();
    if let Some(hex) = v.strip_prefix('#').or_else(|| v.strip_prefix("0x")) {
        return u32::from_str_radix(hex, 16).ok();
    }
    v.parse::<u32>().ok()
}
