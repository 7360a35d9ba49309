//! MediaWiki-backed character source
//!
//! `WikiClient` implements `CharacterSource` against a Fandom wiki's
//! `api.php`. Response parsing lives in `parse` and never touches the
//! network.

mod client;
pub mod parse;

pub use client::{WikiClient, WikiConfig, WikiError, WikiResult};
