//! Randomness: item choice and numeric ranges. A parameter acts as a seed so
//! scripts can opt into deterministic output.

use super::Block;
use crate::error::EngineError;
use crate::interpreter::Context;
use crate::tag::Tag;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

fn seeded_rng(seed: Option<&str>) -> StdRng {
    match seed {
        Some(seed) => {
            let mut hasher = DefaultHasher::new();
            seed.hash(&mut hasher);
            StdRng::seed_from_u64(hasher.finish())
        }
        None => StdRng::from_entropy(),
    }
}

/// `{random:a,b,c}` or `{random:a~b~c}`; items may carry a `weight|item`
/// prefix.
pub struct RandomBlock;

impl Block for RandomBlock {
    fn will_accept(&self, tag: &Tag<'_>) -> bool {
        tag.declares_any(&["random", "rand", "#"])
    }

    fn process(&self, tag: &Tag<'_>, _ctx: &mut Context) -> Result<Option<String>, EngineError> {
        let Some(payload) = tag.payload else {
            return Ok(None);
        };
        let separator = if payload.contains('~') { '~' } else { ',' };
        let mut items: Vec<(u32, &str)> = Vec::new();
        for raw in payload.split(separator) {
            match raw.split_once('|') {
                Some((weight, item)) => match weight.trim().parse::<u32>() {
                    Ok(weight) => items.push((weight.max(1), item)),
                    Err(_) => items.push((1, raw)),
                },
                None => items.push((1, raw)),
            }
        }
        if items.is_empty() {
            return Ok(None);
        }
        let total: u32 = items.iter().map(|(w, _)| w).sum();
        let mut roll = seeded_rng(tag.parameter).gen_range(0..total);
        for (weight, item) in &items {
            if roll < *weight {
                return Ok(Some(item.to_string()));
            }
            roll -= weight;
        }
        Ok(Some(items[items.len() - 1].1.to_string()))
    }
}

/// `{range:low-high}` inclusive integer pick; `{rangef:low-high}` picks a
/// float rendered with two decimals.
pub struct RangeBlock;

impl Block for RangeBlock {
    fn will_accept(&self, tag: &Tag<'_>) -> bool {
        tag.declares_any(&["range", "rangef"])
    }

    fn process(&self, tag: &Tag<'_>, _ctx: &mut Context) -> Result<Option<String>, EngineError> {
        let Some((low, high)) = tag.payload.and_then(|p| p.split_once('-')) else {
            return Ok(None);
        };
        let mut rng = seeded_rng(tag.parameter);
        if tag.declaration.eq_ignore_ascii_case("rangef") {
            let (Ok(low), Ok(high)) = (low.trim().parse::<f64>(), high.trim().parse::<f64>())
            else {
                return Ok(None);
            };
            // NaN and infinities parse as f64 but make gen_range panic.
            if !low.is_finite() || !high.is_finite() || low > high {
                return Ok(None);
            }
            return Ok(Some(format!("{:.2}", rng.gen_range(low..=high))));
        }
        let (Ok(low), Ok(high)) = (low.trim().parse::<i64>(), high.trim().parse::<i64>()) else {
            return Ok(None);
        };
        if low > high {
            return Ok(None);
        }
        Ok(Some(rng.gen_range(low..=high).to_string()))
    }
}
