//! tagbridge-core: the stateless bridge between untrusted HTTP payloads and
//! the tagscript engine.
//!
//! Pipeline per request: transport decode -> seed synthesis -> execution with
//! a deadline -> action/extras re-encoding. The usage counter is the only
//! durable state, kept in sled with atomic increments.

pub mod codec;
mod config;
mod counter;
mod entity;
mod error;
mod gateway;
mod seeds;

pub use config::GatewayConfig;
pub use counter::UsageCounter;
pub use entity::{SyntheticChannel, SyntheticMember};
pub use error::GatewayError;
pub use gateway::{ExecutionGateway, RenderOutput};
pub use seeds::{build_seeds, ChannelAdapter, MemberAdapter};
