//! Data models for the ESCOtech site.
//!
//! These mirror the upstream REST API's JSON shapes (camelCase on the wire).

mod contact;
mod envelope;
mod message;
mod project;
mod service;
mod team;
mod upload;
mod user;

pub use contact::*;
pub use envelope::*;
pub use message::*;
pub use project::*;
pub use service::*;
pub use team::*;
pub use upload::*;
pub use user::*;

/// Identifier type used by every upstream entity.
pub type Id = i64;
