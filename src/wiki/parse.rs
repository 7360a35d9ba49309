//! Pure extraction from MediaWiki API responses
//!
//! Kept separate from the HTTP client so every shape the API can return,
//! including error and partial responses, is testable offline.

use crate::graph::CharacterId;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

/// Section titles that usually hold a character's story, in priority order
pub const STORY_SECTION_KEYWORDS: &[&str] = &[
    "history",
    "biography",
    "plot",
    "story",
    "background",
    "life",
    "overview",
    "description",
    "character history",
    "personal history",
    "role",
    "narrative",
];

static BLOCK_REGEX: OnceLock<Regex> = OnceLock::new();
static TAG_REGEX: OnceLock<Regex> = OnceLock::new();
static ENTITY_REGEX: OnceLock<Regex> = OnceLock::new();
static SPACE_REGEX: OnceLock<Regex> = OnceLock::new();

fn block_regex() -> &'static Regex {
    BLOCK_REGEX.get_or_init(|| {
        Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)\s*>|<!--.*?-->")
            .expect("static pattern")
    })
}

fn tag_regex() -> &'static Regex {
    TAG_REGEX.get_or_init(|| Regex::new(r"<[^>]*>").expect("static pattern"))
}

fn entity_regex() -> &'static Regex {
    ENTITY_REGEX.get_or_init(|| Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").expect("static pattern"))
}

fn space_regex() -> &'static Regex {
    SPACE_REGEX.get_or_init(|| Regex::new(r"\s+").expect("static pattern"))
}

/// One page of `list=categorymembers`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryPage {
    pub members: Vec<CharacterId>,
    /// Parameters to send back for the next page, if there is one
    pub continuation: Option<Vec<(String, String)>>,
}

/// Extract member titles and the continuation block.
pub fn category_page(response: &Value) -> CategoryPage {
    let members = response
        .pointer("/query/categorymembers")
        .and_then(Value::as_array)
        .map(|pages| {
            pages
                .iter()
                .filter_map(|p| p.get("title").and_then(Value::as_str))
                .map(CharacterId::from)
                .collect()
        })
        .unwrap_or_default();

    let continuation = response
        .get("continue")
        .and_then(Value::as_object)
        .map(string_fields)
        .filter(|fields| !fields.is_empty());

    CategoryPage {
        members,
        continuation,
    }
}

fn string_fields(object: &Map<String, Value>) -> Vec<(String, String)> {
    object
        .iter()
        .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
        .collect()
}

/// Pick the section most likely to hold the character's story.
///
/// First an exact (case-insensitive) title match against
/// [`STORY_SECTION_KEYWORDS`], then a substring match. Returns the
/// section's `index` as the API reports it.
pub fn story_section_index(response: &Value) -> Option<String> {
    let sections: Vec<(String, String)> = response
        .pointer("/parse/sections")
        .and_then(Value::as_array)?
        .iter()
        .filter_map(|s| {
            let title = s.get("line").and_then(Value::as_str)?;
            let index = match s.get("index")? {
                Value::String(i) => i.clone(),
                Value::Number(n) => n.to_string(),
                _ => return None,
            };
            Some((html_to_text(title).to_lowercase(), index))
        })
        .collect();

    let exact = sections
        .iter()
        .find(|(title, _)| STORY_SECTION_KEYWORDS.iter().any(|k| title == k));
    let partial = || {
        sections
            .iter()
            .find(|(title, _)| STORY_SECTION_KEYWORDS.iter().any(|k| title.contains(k)))
    };

    exact.or_else(partial).map(|(_, index)| index.clone())
}

/// The rendered HTML of an `action=parse` response
pub fn parsed_html(response: &Value) -> Option<&str> {
    response.pointer("/parse/text/*").and_then(Value::as_str)
}

/// The thumbnail URL of the first page of a `prop=pageimages` response
pub fn thumbnail_source(response: &Value) -> Option<String> {
    response
        .pointer("/query/pages")
        .and_then(Value::as_object)?
        .values()
        .next()?
        .pointer("/thumbnail/source")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// API-level error message (`{"error": {"code": ..., "info": ...}}`), if any
pub fn api_error(response: &Value) -> Option<String> {
    let error = response.get("error")?;
    let code = error.get("code").and_then(Value::as_str).unwrap_or("unknown");
    let info = error.get("info").and_then(Value::as_str).unwrap_or("");
    Some(format!("{}: {}", code, info))
}

/// Reduce rendered wiki HTML to plain text.
///
/// Drops scripts, styles and comments, replaces tags with spaces, decodes
/// common entities and collapses whitespace.
pub fn html_to_text(html: &str) -> String {
    let without_blocks = block_regex().replace_all(html, " ");
    let without_tags = tag_regex().replace_all(&without_blocks, " ");
    let decoded = entity_regex().replace_all(&without_tags, |caps: &regex::Captures| {
        decode_entity(&caps[1]).unwrap_or_else(|| caps[0].to_string())
    });
    space_regex().replace_all(&decoded, " ").trim().to_string()
}

fn decode_entity(name: &str) -> Option<String> {
    let decoded = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "ndash" => '–',
        "mdash" => '—',
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                name.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code)?
        }
    };
    Some(decoded.to_string())
}
