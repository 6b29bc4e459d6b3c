//! Flat-key metadata decoding.
//!
//! The node API encodes repeating sub-records as indexed, suffix-tagged
//! top-level keys instead of native arrays:
//!
//! ```json
//! {
//!   "author": [18827, 19119],
//!   "cover": "///content/cover.png",
//!   "link-1": "https://example.itch.io/game",
//!   "link-1-tag": [42337],
//!   "link-1-name": "Windows build"
//! }
//! ```
//!
//! [`decode_game_meta`] reconstructs ordered link and author-id lists from
//! that shape. Author nodes carry their own one-field metadata, decoded
//! tolerantly by [`AuthorMeta`] because the API serializes an empty map as
//! an empty array.

use crate::errors::MetaError;
use crate::types::GameLink;
use serde_json::{Map, Value};

/// Untyped node metadata as delivered by the transport.
pub type RawMeta = Map<String, Value>;

const AUTHOR_KEY: &str = "author";
const COVER_KEY: &str = "cover";

const LINK_PREFIX: &str = "link";
const TAG_SUFFIX: &str = "tag";
const NAME_SUFFIX: &str = "name";

/// Decoded game metadata: author ids, cover and external links.
///
/// `author_ids` keeps the source array order; it defines the fetch and
/// result order downstream.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GameMeta {
    pub author_ids: Vec<i64>,
    pub cover: String,
    pub links: Vec<GameLink>,
}

/// Decodes the flat-key metadata map of a game node.
///
/// Link keys are grouped by the numeric index embedded between the first and
/// second `-` and processed in ascending lexical order of the full key
/// string, the only ordering the encoding defines. Each distinct index yields
/// exactly one [`GameLink`]. Decoding is deterministic: the same map always
/// produces the same result.
///
/// A link key without a parseable index fails the whole decode, as does any
/// value whose type violates the encoding (tags not an array of numbers,
/// name or URL not a string). The transport guarantees basic JSON shape for
/// well-formed nodes, so a mismatch here means the encoding contract itself
/// is broken.
pub fn decode_game_meta(raw: &RawMeta) -> Result<GameMeta, MetaError> {
    let mut meta = GameMeta::default();

    if let Some(value) = raw.get(AUTHOR_KEY) {
        meta.author_ids = id_array(AUTHOR_KEY, value)?;
    }

    meta.cover = raw
        .get(COVER_KEY)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned();

    let mut link_entries: Vec<(&String, &Value)> = raw
        .iter()
        .filter(|(key, _)| key.starts_with(LINK_PREFIX))
        .collect();
    link_entries.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));

    let mut current_index: Option<i64> = None;
    let mut current = GameLink::default();

    for (key, value) in link_entries {
        let index = link_index(key)?;

        if current_index.is_some() && current_index != Some(index) {
            meta.links.push(std::mem::take(&mut current));
        }
        current_index = Some(index);

        if key.ends_with(TAG_SUFFIX) {
            current.tags = id_array(key, value)?;
        } else if key.ends_with(NAME_SUFFIX) {
            current.name = string_value(key, value)?.to_owned();
        } else {
            current.url = string_value(key, value)?.to_owned();
        }
    }

    if current_index.is_some() {
        meta.links.push(current);
    }

    Ok(meta)
}

/// Extracts the numeric group index from a `link-<index>[-<suffix>]` key.
fn link_index(key: &str) -> Result<i64, MetaError> {
    key.split('-')
        .nth(1)
        .and_then(|raw| raw.parse::<i64>().ok())
        .ok_or_else(|| MetaError::MalformedKey {
            key: key.to_owned(),
        })
}

/// Converts an array-of-numbers value; floats are truncated.
fn id_array(key: &str, value: &Value) -> Result<Vec<i64>, MetaError> {
    let items = value
        .as_array()
        .ok_or_else(|| mismatch(key, "an array of numbers"))?;

    items
        .iter()
        .map(|item| {
            item.as_i64()
                .or_else(|| item.as_f64().map(|float| float as i64))
                .ok_or_else(|| mismatch(key, "an array of numbers"))
        })
        .collect()
}

fn string_value<'a>(key: &str, value: &'a Value) -> Result<&'a str, MetaError> {
    value.as_str().ok_or_else(|| mismatch(key, "a string"))
}

fn mismatch(key: &str, expected: &'static str) -> MetaError {
    MetaError::TypeMismatch {
        key: key.to_owned(),
        expected,
    }
}

/// Metadata attached to an author node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthorMeta {
    pub avatar: String,
}

const AVATAR_KEY: &str = "avatar";

impl AuthorMeta {
    /// Decodes an author metadata payload.
    ///
    /// Syntax errors are propagated. A payload that parses but is not a map
    /// yields empty metadata without error; an absent avatar is a normal,
    /// non-exceptional outcome.
    pub fn from_slice(raw: &[u8]) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_slice(raw)?;
        Ok(Self::from_value(&value))
    }

    /// Tolerant decode of an already-parsed metadata value. An `avatar` key
    /// of any type other than string is treated as absent.
    pub fn from_value(value: &Value) -> Self {
        let avatar = value
            .get(AVATAR_KEY)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();

        AuthorMeta { avatar }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawMeta {
        value.as_object().expect("test meta must be a map").clone()
    }

    #[test]
    fn decodes_authors_cover_and_links() {
        let meta = decode_game_meta(&raw(json!({
            "author": [18827, 19119],
            "cover": "///content/cover.png",
            "link-1": "https://example.itch.io/game",
            "link-1-tag": [42337],
            "link-1-name": "Windows build"
        })))
        .unwrap();

        assert_eq!(meta.author_ids, vec![18827, 19119]);
        assert_eq!(meta.cover, "///content/cover.png");
        assert_eq!(
            meta.links,
            vec![GameLink {
                name: "Windows build".into(),
                url: "https://example.itch.io/game".into(),
                tags: vec![42337],
            }]
        );
    }

    #[test]
    fn partial_link_groups_keep_defaults() {
        // One group has only a name, the other only a tag list.
        let meta = decode_game_meta(&raw(json!({
            "link-1": "http://a",
            "link-1-name": "A",
            "link-2": "http://b",
            "link-2-tag": [1, 2]
        })))
        .unwrap();

        assert_eq!(
            meta.links,
            vec![
                GameLink {
                    name: "A".into(),
                    url: "http://a".into(),
                    tags: vec![],
                },
                GameLink {
                    name: String::new(),
                    url: "http://b".into(),
                    tags: vec![1, 2],
                },
            ]
        );
    }

    #[test]
    fn one_link_per_distinct_index_in_lexical_key_order() {
        // Indexes are neither contiguous nor starting at 1; "link-10" sorts
        // lexically before "link-3", and that is the defined order.
        let meta = decode_game_meta(&raw(json!({
            "link-3": "http://three",
            "link-10": "http://ten",
            "link-10-name": "Ten"
        })))
        .unwrap();

        assert_eq!(meta.links.len(), 2);
        assert_eq!(meta.links[0].url, "http://ten");
        assert_eq!(meta.links[0].name, "Ten");
        assert_eq!(meta.links[1].url, "http://three");
    }

    #[test]
    fn group_index_zero_forms_a_normal_group() {
        let meta = decode_game_meta(&raw(json!({
            "link-0": "http://zero",
            "link-1": "http://one"
        })))
        .unwrap();

        assert_eq!(meta.links.len(), 2);
        assert_eq!(meta.links[0].url, "http://zero");
        assert_eq!(meta.links[1].url, "http://one");
    }

    #[test]
    fn missing_keys_leave_everything_empty() {
        let meta = decode_game_meta(&raw(json!({ "unrelated": 1 }))).unwrap();

        assert_eq!(meta, GameMeta::default());
    }

    #[test]
    fn author_id_floats_are_truncated() {
        let meta = decode_game_meta(&raw(json!({ "author": [5.9, 9.1] }))).unwrap();

        assert_eq!(meta.author_ids, vec![5, 9]);
    }

    #[test]
    fn non_string_cover_is_treated_as_absent() {
        let meta = decode_game_meta(&raw(json!({ "cover": 7 }))).unwrap();

        assert_eq!(meta.cover, "");
    }

    #[test]
    fn link_key_without_numeric_index_fails_the_decode() {
        for key in ["link-x", "links"] {
            let err = decode_game_meta(&raw(json!({ key: "http://a" }))).unwrap_err();
            assert!(matches!(err, MetaError::MalformedKey { .. }), "{key}");
        }
    }

    #[test]
    fn mistyped_values_fail_the_decode() {
        let cases = [
            json!({ "author": "not-an-array" }),
            json!({ "author": [1, "two"] }),
            json!({ "link-1": 7 }),
            json!({ "link-1-name": ["A"] }),
            json!({ "link-1-tag": "42337" }),
        ];

        for case in cases {
            let err = decode_game_meta(&raw(case.clone())).unwrap_err();
            assert!(matches!(err, MetaError::TypeMismatch { .. }), "{case}");
        }
    }

    #[test]
    fn decode_is_idempotent() {
        let input = raw(json!({
            "author": [5, 9],
            "cover": "///c.png",
            "link-2": "http://b",
            "link-2-tag": [1, 2],
            "link-1": "http://a"
        }));

        let first = decode_game_meta(&input).unwrap();
        let second = decode_game_meta(&input).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.links[0].url, "http://a");
        assert_eq!(first.links[1].url, "http://b");
    }

    #[test]
    fn author_meta_reads_string_avatar() {
        let meta = AuthorMeta::from_value(&json!({ "avatar": "///a.png" }));

        assert_eq!(meta.avatar, "///a.png");
    }

    #[test]
    fn author_meta_tolerates_non_map_payloads() {
        let meta = AuthorMeta::from_slice(b"[]").unwrap();

        assert_eq!(meta, AuthorMeta::default());
    }

    #[test]
    fn author_meta_treats_mistyped_avatar_as_absent() {
        let meta = AuthorMeta::from_value(&json!({ "avatar": 7 }));

        assert_eq!(meta.avatar, "");
    }

    #[test]
    fn author_meta_propagates_syntax_errors() {
        assert!(AuthorMeta::from_slice(b"{nope").is_err());
    }
}
