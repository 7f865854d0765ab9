//! Collection documents.
//!
//! [`RawCollection`] mirrors the wire format, which varies between servers
//! (some publish `name` instead of `id`). [`Collection`] is the normalized
//! form handed to callers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use ogc_common::crs::DEFAULT_REFERENCE;

use crate::links::{filter_links, infer_media_type, CollectionLinkType};
use crate::types::{lenient_links, resolve_links, Extent, Link};

/// The document behind a landing page's `rel=data` link.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CollectionsDocument {
    #[serde(default)]
    pub links: Vec<Link>,

    #[serde(default)]
    pub collections: Vec<RawCollection>,

    /// Reference systems supported across all collections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crs: Option<Vec<String>>,
}

impl CollectionsDocument {
    /// Read a collections document member by member.
    ///
    /// Entries of `collections` that are not objects are skipped; see
    /// [`RawCollection::from_value`] for how each entry is read.
    pub fn from_value(value: &Value) -> Self {
        let collections = value
            .get("collections")
            .and_then(Value::as_array)
            .map(|entries| entries.iter().filter_map(RawCollection::from_value).collect())
            .unwrap_or_default();

        Self {
            links: lenient_links(value.get("links")),
            collections,
            crs: string_list(value.get("crs")),
        }
    }
}

/// A collection as published by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawCollection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub keywords: Vec<String>,

    #[serde(default)]
    pub links: Vec<Link>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extent: Option<Extent>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crs: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_crs: Option<String>,
}

impl RawCollection {
    /// Read one collection entry, tolerating members of unexpected shape.
    ///
    /// Malformed links are dropped and an unreadable `extent` is treated as
    /// absent. Returns `None` only when the entry is not an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let text = |key: &str| object.get(key).and_then(Value::as_str).map(str::to_string);

        Some(Self {
            id: text("id"),
            name: text("name"),
            title: text("title"),
            description: text("description"),
            keywords: string_list(object.get("keywords")).unwrap_or_default(),
            links: lenient_links(object.get("links")),
            extent: object
                .get("extent")
                .and_then(|extent| Extent::deserialize(extent).ok()),
            crs: string_list(object.get("crs")),
            storage_crs: text("storageCrs"),
        })
    }

    pub fn has_links_of(&self, category: CollectionLinkType) -> bool {
        self.links.iter().any(|link| category.matches(&link.rel))
    }
}

/// String entries of an array member; `None` when the member is not an array.
fn string_list(value: Option<&Value>) -> Option<Vec<String>> {
    value.and_then(Value::as_array).map(|items| {
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect()
    })
}

/// A normalized collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    /// Unique identifier (the published `name` when no `id` is given).
    pub id: String,

    pub name: String,

    pub title: String,

    pub description: String,

    pub keywords: Vec<String>,

    /// Links with absolute hrefs.
    pub links: Vec<Link>,

    /// Media types offered by the links of the requested category.
    pub output_formats: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extent: Option<Extent>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub crs: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_crs: Option<String>,

    /// Reference the extent is expressed in; always `CRS:84`.
    pub default_reference: String,
}

impl Collection {
    /// Normalize a published collection.
    ///
    /// `output_formats` are read from the links of `category` when one is
    /// given, otherwise from all links. Hrefs are passed through `complete`.
    pub fn from_raw(
        raw: RawCollection,
        category: Option<CollectionLinkType>,
        complete: impl Fn(&str) -> String,
    ) -> Self {
        let format_links = match category {
            Some(category) => filter_links(&raw.links, category),
            None => raw.links.clone(),
        };

        let mut output_formats: Vec<String> = Vec::new();
        for media_type in format_links.iter().map(infer_media_type) {
            if !output_formats.contains(&media_type) {
                output_formats.push(media_type);
            }
        }

        let id = raw
            .id
            .clone()
            .or_else(|| raw.name.clone())
            .unwrap_or_default();
        let name = raw.name.unwrap_or_else(|| id.clone());

        Self {
            title: raw.title.unwrap_or_else(|| id.clone()),
            description: raw.description.unwrap_or_default(),
            keywords: raw.keywords,
            links: resolve_links(&raw.links, complete),
            output_formats,
            extent: raw.extent,
            crs: raw.crs,
            storage_crs: raw.storage_crs,
            default_reference: DEFAULT_REFERENCE.to_string(),
            id,
            name,
        }
    }

    /// Links of one category.
    pub fn links_of(&self, category: CollectionLinkType) -> Vec<Link> {
        filter_links(&self.links, category)
    }
}

/// Normalize every collection of a document, keeping only those with at
/// least one link of `category` when a category is given.
pub fn normalize_collections(
    collections: Vec<RawCollection>,
    category: Option<CollectionLinkType>,
    complete: impl Fn(&str) -> String,
) -> Vec<Collection> {
    collections
        .into_iter()
        .filter(|raw| category.map_or(true, |category| raw.has_links_of(category)))
        .map(|raw| Collection::from_raw(raw, category, &complete))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: &str) -> RawCollection {
        serde_json::from_str(json).unwrap()
    }

    fn host(href: &str) -> String {
        ogc_common::url::resolve_against_host(href, "https://x.org")
    }

    #[test]
    fn test_id_falls_back_to_name() {
        let collection = Collection::from_raw(
            raw(r#"{"name": "countries", "links": []}"#),
            None,
            host,
        );
        assert_eq!(collection.id, "countries");
        assert_eq!(collection.name, "countries");
        assert_eq!(collection.default_reference, "CRS:84");
    }

    #[test]
    fn test_output_formats_from_category() {
        let raw = raw(
            r#"{"id": "lakes", "links": [
                {"rel": "items", "type": "application/geo+json", "href": "/i?f=json"},
                {"rel": "items", "type": "text/html", "href": "/i?f=html"},
                {"rel": "item", "type": "application/geo+json", "href": "/i2"},
                {"rel": "self", "type": "application/xml", "href": "/s"}
            ]}"#,
        );
        let collection = Collection::from_raw(raw.clone(), Some(CollectionLinkType::Items), host);
        assert_eq!(
            collection.output_formats,
            vec!["application/geo+json", "text/html"]
        );

        let all = Collection::from_raw(raw, None, host);
        assert_eq!(all.output_formats.len(), 3);
        assert_eq!(all.links[0].href, "https://x.org/i?f=json");
    }

    #[test]
    fn test_normalize_filters_by_category() {
        let collections = vec![
            raw(r#"{"id": "a", "links": [{"rel": "map", "href": "/a/map"}]}"#),
            raw(r#"{"id": "b", "links": [{"rel": "items", "href": "/b/items"}]}"#),
        ];
        let maps = normalize_collections(collections.clone(), Some(CollectionLinkType::Map), host);
        assert_eq!(maps.len(), 1);
        assert_eq!(maps[0].id, "a");
        assert_eq!(maps[0].output_formats, vec!["image/png"]);

        assert_eq!(normalize_collections(collections, None, host).len(), 2);
    }

    #[test]
    fn test_document_tolerates_odd_collections() {
        let document = CollectionsDocument::from_value(&serde_json::json!({
            "crs": ["http://www.opengis.net/def/crs/OGC/1.3/CRS84"],
            "collections": [
                {"id": "odd", "links": [], "extent": {"spatial": {"bbox": [-180, -90, 180, 90]}}},
                {"id": "licensed", "links": [
                    {"rel": "license", "title": "x"},
                    {"rel": "items", "href": "/licensed/items"}
                ]},
                {"id": "broken", "extent": {"spatial": "everywhere"}, "keywords": ["a", 1]},
                "not a collection"
            ]
        }));

        assert_eq!(document.collections.len(), 3);
        let odd = &document.collections[0];
        assert_eq!(
            odd.extent.as_ref().and_then(Extent::first_bbox),
            Some(ogc_common::BoundingBox::new(-180.0, -90.0, 180.0, 90.0))
        );
        assert_eq!(document.collections[1].links.len(), 1);
        assert_eq!(document.collections[2].extent, None);
        assert_eq!(document.collections[2].keywords, vec!["a"]);
        assert_eq!(document.crs.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_document_without_collections() {
        let document = CollectionsDocument::from_value(&serde_json::json!({"links": []}));
        assert!(document.collections.is_empty());
        assert_eq!(document.crs, None);
    }

    #[test]
    fn test_storage_crs_camel_case() {
        let raw = raw(r#"{"id": "a", "storageCrs": "http://www.opengis.net/def/crs/EPSG/0/28992"}"#);
        assert_eq!(
            raw.storage_crs.as_deref(),
            Some("http://www.opengis.net/def/crs/EPSG/0/28992")
        );
    }
}
