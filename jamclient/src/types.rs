use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque classification id attached to external links.
pub type Platform = i64;

/// Tag the API uses for Microsoft Windows builds.
pub const PLATFORM_MICROSOFT_WINDOWS: Platform = 42337;

/// Coarse node kind as reported by the API.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Item,
    Event,
    User,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Node subtype; games are `item`/`game` nodes.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NodeSubType {
    Game,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Submission track of a game within an event.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionType {
    Jam,
    Compo,
    #[default]
    #[serde(other)]
    Unknown,
}

/// A fully resolved game record: node body plus decoded metadata and the
/// author nodes it references.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Game {
    pub id: i64,
    pub name: String,
    pub path: String,
    pub body: String,
    pub submission_type: SubmissionType,
    pub cover: String,
    pub authors: Vec<Author>,
    pub links: Vec<GameLink>,
    pub published: Option<DateTime<Utc>>,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
}

/// A resolved author (user) node.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Author {
    pub id: i64,
    pub name: String,
    pub path: String,
    pub body: String,
    /// Avatar path; empty when the author node carries none.
    pub avatar: String,
}

/// One external link attached to a game.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct GameLink {
    pub name: String,
    pub url: String,
    pub tags: Vec<Platform>,
}
