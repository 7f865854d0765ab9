//! Classification of collection links into semantic categories.
//!
//! Servers use both the short relation names and the OGC relation URIs for
//! the same link roles, so each category accepts a small alias table.

use std::fmt;
use std::str::FromStr;

use ogc_common::url::{clean_url, resolve_against_host};

use crate::media_types;
use crate::types::Link;

/// Relation URIs registered by OGC.
pub mod rel {
    pub const STYLES: &str = "http://www.opengis.net/def/rel/ogc/1.0/styles";
    pub const MAP: &str = "http://www.opengis.net/def/rel/ogc/1.0/map";
    pub const TILESETS_MAP: &str = "http://www.opengis.net/def/rel/ogc/1.0/tilesets-map";
}

const ITEMS_ALIASES: [&str; 2] = ["items", "item"];
const STYLES_ALIASES: [&str; 2] = [rel::STYLES, "styles"];
const MAP_ALIASES: [&str; 2] = [rel::MAP, "map"];
const TILES_ALIASES: [&str; 2] = [rel::TILESETS_MAP, "tilesets-map"];

/// Semantic category of a collection link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionLinkType {
    Items,
    Styles,
    Map,
    Tiles,
}

impl CollectionLinkType {
    pub const ALL: [CollectionLinkType; 4] = [
        CollectionLinkType::Items,
        CollectionLinkType::Styles,
        CollectionLinkType::Map,
        CollectionLinkType::Tiles,
    ];

    /// Relation values accepted for this category.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            CollectionLinkType::Items => &ITEMS_ALIASES,
            CollectionLinkType::Styles => &STYLES_ALIASES,
            CollectionLinkType::Map => &MAP_ALIASES,
            CollectionLinkType::Tiles => &TILES_ALIASES,
        }
    }

    pub fn matches(&self, rel: &str) -> bool {
        self.aliases().contains(&rel)
    }

    /// Category a relation value belongs to, if any.
    pub fn of_rel(rel: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.matches(rel))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionLinkType::Items => "items",
            CollectionLinkType::Styles => "styles",
            CollectionLinkType::Map => "map",
            CollectionLinkType::Tiles => "tiles",
        }
    }
}

impl fmt::Display for CollectionLinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when a category name is not recognized.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Unknown link category: {0}")]
pub struct UnknownLinkType(pub String);

impl FromStr for CollectionLinkType {
    type Err = UnknownLinkType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "items" => Ok(CollectionLinkType::Items),
            "styles" => Ok(CollectionLinkType::Styles),
            "map" => Ok(CollectionLinkType::Map),
            "tiles" => Ok(CollectionLinkType::Tiles),
            _ => Err(UnknownLinkType(s.to_string())),
        }
    }
}

/// Links whose relation belongs to `category`, in their original order.
pub fn filter_links(links: &[Link], category: CollectionLinkType) -> Vec<Link> {
    links
        .iter()
        .filter(|link| category.matches(&link.rel))
        .cloned()
        .collect()
}

/// [`filter_links`] keyed by category name; unknown names match nothing.
pub fn filter_links_by_name(links: &[Link], category: &str) -> Vec<Link> {
    match category.parse::<CollectionLinkType>() {
        Ok(category) => filter_links(links, category),
        Err(_) => Vec::new(),
    }
}

/// Declared media type of a link, or the one implied by its relation.
pub fn infer_media_type(link: &Link) -> String {
    if let Some(media_type) = link.media_type() {
        return media_type.to_string();
    }
    match CollectionLinkType::of_rel(&link.rel) {
        Some(CollectionLinkType::Map) => media_types::PNG.to_string(),
        _ => media_types::JSON.to_string(),
    }
}

/// Href of the items link declaring `preferred_format` as its type.
///
/// Untyped links never match, even where [`infer_media_type`] would
/// guess the requested format.
pub fn data_link<'a>(links: &'a [Link], preferred_format: &str) -> Option<&'a str> {
    links
        .iter()
        .filter(|link| CollectionLinkType::Items.matches(&link.rel))
        .find(|link| link.media_type() == Some(preferred_format))
        .map(|link| link.href.as_str())
}

/// Host-resolved, cleaned URL of the JSON tilesets link.
///
/// Returns an empty string when the collection has no tilesets link.
pub fn tiles_link(links: &[Link], host: &str) -> String {
    filter_links(links, CollectionLinkType::Tiles)
        .iter()
        .find(|link| infer_media_type(link) == media_types::JSON)
        .map(|link| clean_url(&resolve_against_host(&link.href, host)))
        .unwrap_or_default()
}
