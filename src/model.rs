//! Declarative store layout description
//!
//! A layout is a store name plus an ordered list of elements tagged by
//! `type`. Element coordinates are absolute grid units from the store
//! origin; cell coordinates are grid units relative to the owning section.
//!
//! Loading is lenient: numeric fields accept integers, floats, numeric
//! strings and `null`, and anything that is not a non-negative finite
//! number is clamped to 0. Text fields of the wrong type load as missing.
//! Elements with an unknown or missing type, or that are not objects at all,
//! load as [`Element::Unknown`]. Only broken JSON syntax fails a load.

use std::fmt;

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::error::LoadError;

/// A store layout: the store name and its top-level elements in draw order
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub store_name: String,
    pub elements: Vec<Element>,
}

impl Layout {
    pub fn new(store_name: impl Into<String>, elements: Vec<Element>) -> Self {
        Self {
            store_name: store_name.into(),
            elements,
        }
    }

    /// Aisles and trolley bays, in document order
    pub fn anchors(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|e| e.is_anchor())
    }

    /// Sections, in document order
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.elements.iter().filter_map(|e| match e {
            Element::Section(s) => Some(s),
            _ => None,
        })
    }
}

/// Wire shape of a layout document. The element list is optional so that a
/// document without one can be told apart from an empty one.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLayout {
    #[serde(default, deserialize_with = "lenient_string")]
    store_name: Option<String>,
    #[serde(default, alias = "sections", deserialize_with = "lenient_elements")]
    elements: Option<Vec<Element>>,
}

/// Parse a JSON layout document.
///
/// Returns `Ok(None)` when the document is not an object or has no element
/// list: that is the "no data" state, not an error.
pub fn parse_layout(source: &str) -> Result<Option<Layout>, LoadError> {
    let document: Value = serde_json::from_str(source)?;
    if !document.is_object() {
        tracing::debug!("layout document is not an object");
        return Ok(None);
    }
    let raw = RawLayout::deserialize(document)?;
    let Some(elements) = raw.elements else {
        tracing::debug!("layout document has no element list");
        return Ok(None);
    };
    Ok(Some(Layout {
        store_name: raw.store_name.unwrap_or_default(),
        elements,
    }))
}

/// Tag-only view of the element variants the engine knows how to place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    Aisle,
    TrolleyBay,
    Section,
}

impl ElementKind {
    /// Anchors are authoritative and never moved to avoid overlap
    pub fn is_anchor(self) -> bool {
        matches!(self, ElementKind::Aisle | ElementKind::TrolleyBay)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Aisle => "aisle",
            ElementKind::TrolleyBay => "trolley-bay",
            ElementKind::Section => "section",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A top-level element of the store floor plan
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Element {
    Aisle(Aisle),
    TrolleyBay(TrolleyBay),
    Section(Section),
    /// Any element this crate cannot place: unknown or missing type, or not
    /// an object
    Unknown,
}

/// Wire shape of a typed element
#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
enum TaggedElement {
    Aisle(Aisle),
    #[serde(alias = "trolly-bay")]
    TrolleyBay(TrolleyBay),
    Section(Section),
    #[serde(other)]
    Unknown,
}

impl From<TaggedElement> for Element {
    fn from(tagged: TaggedElement) -> Self {
        match tagged {
            TaggedElement::Aisle(a) => Element::Aisle(a),
            TaggedElement::TrolleyBay(t) => Element::TrolleyBay(t),
            TaggedElement::Section(s) => Element::Section(s),
            TaggedElement::Unknown => Element::Unknown,
        }
    }
}

impl<'de> Deserialize<'de> for Element {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Element::from_value(Value::deserialize(deserializer)?))
    }
}

impl Element {
    /// Interpret one JSON element; never fails
    pub fn from_value(value: Value) -> Self {
        if value.get("type").and_then(Value::as_str).is_none() {
            return Element::Unknown;
        }
        match serde_json::from_value::<TaggedElement>(value) {
            Ok(tagged) => tagged.into(),
            Err(err) => {
                tracing::debug!(%err, "element does not match its type");
                Element::Unknown
            }
        }
    }

    pub fn kind(&self) -> Option<ElementKind> {
        match self {
            Element::Aisle(_) => Some(ElementKind::Aisle),
            Element::TrolleyBay(_) => Some(ElementKind::TrolleyBay),
            Element::Section(_) => Some(ElementKind::Section),
            Element::Unknown => None,
        }
    }

    /// Declared id; empty strings count as missing
    pub fn id(&self) -> Option<&str> {
        let id = match self {
            Element::Aisle(a) => a.id.as_deref(),
            Element::TrolleyBay(t) => t.id.as_deref(),
            Element::Section(s) => s.id.as_deref(),
            Element::Unknown => None,
        };
        id.filter(|id| !id.is_empty())
    }

    /// Declared anchor position `(posX, posY)` in grid units
    pub fn declared_position(&self) -> (u32, u32) {
        match self {
            Element::Aisle(a) => (a.pos_x, a.pos_y),
            Element::TrolleyBay(t) => (t.pos_x, t.pos_y),
            Element::Section(s) => (s.pos_x, s.pos_y),
            Element::Unknown => (0, 0),
        }
    }

    pub fn is_anchor(&self) -> bool {
        self.kind().is_some_and(ElementKind::is_anchor)
    }

    /// Human readable caption drawn for the element
    pub fn caption(&self) -> String {
        match self {
            Element::Aisle(a) => format!("Aisle {}", a.number),
            Element::TrolleyBay(_) => "Trolley bay".to_string(),
            Element::Section(s) => s.name.clone(),
            Element::Unknown => String::new(),
        }
    }
}

/// A numbered aisle with a declared extent
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aisle {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub number: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub pos_x: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub pos_y: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub width: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub height: u32,
}

/// A trolley bay with a declared extent
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrolleyBay {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub pos_x: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub pos_y: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub width: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub height: u32,
}

/// A named shelving section. Its extent is derived from its cells.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub pos_x: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub pos_y: u32,
    #[serde(default, deserialize_with = "lenient_cells")]
    pub cells: Vec<Cell>,
}

/// A product cell inside a section, positioned relative to the section origin
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    #[serde(default, deserialize_with = "lenient_text")]
    pub product: String,
    /// Raw status text as supplied; interpreted by [`crate::status::StockStatus`]
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub pos_x: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub pos_y: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub width: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub height: u32,
    #[serde(default, rename = "type", skip_serializing_if = "CellKind::is_stock")]
    pub kind: CellKind,
}

impl Cell {
    /// A stock cell at `(pos_x, pos_y)` with the given size
    pub fn stock(
        product: impl Into<String>,
        status: Option<&str>,
        pos_x: u32,
        pos_y: u32,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            product: product.into(),
            status: status.map(str::to_string),
            pos_x,
            pos_y,
            width,
            height,
            kind: CellKind::Stock,
        }
    }

    pub fn is_label(&self) -> bool {
        self.kind == CellKind::Label
    }
}

/// Whether a cell is a stock cell or a non-interactive caption
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellKind {
    #[default]
    Stock,
    Label,
}

impl CellKind {
    pub fn is_stock(&self) -> bool {
        *self == CellKind::Stock
    }
}

impl Serialize for CellKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(match self {
            CellKind::Stock => "stock",
            CellKind::Label => "label",
        })
    }
}

impl<'de> Deserialize<'de> for CellKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match lenient_string(deserializer)? {
            Some(t) if t.eq_ignore_ascii_case("label") => CellKind::Label,
            _ => CellKind::Stock,
        })
    }
}

/// Deserialize a grid quantity, clamping anything malformed to 0
fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientU32)
}

fn clamp_f64(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        // `as` saturates at u32::MAX and truncates toward zero
        value as u32
    } else {
        0
    }
}

struct LenientU32;

impl<'de> Visitor<'de> for LenientU32 {
    type Value = u32;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a grid quantity")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<u32, E> {
        Ok(u32::try_from(v).unwrap_or(u32::MAX))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<u32, E> {
        Ok(u32::try_from(v.max(0)).unwrap_or(u32::MAX))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<u32, E> {
        Ok(clamp_f64(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<u32, E> {
        Ok(v.trim().parse::<f64>().map(clamp_f64).unwrap_or(0))
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<u32, E> {
        Ok(0)
    }

    fn visit_unit<E: de::Error>(self) -> Result<u32, E> {
        Ok(0)
    }

    fn visit_none<E: de::Error>(self) -> Result<u32, E> {
        Ok(0)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<u32, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<u32, A::Error> {
        while seq.next_element::<de::IgnoredAny>()?.is_some() {}
        Ok(0)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<u32, A::Error> {
        while map
            .next_entry::<de::IgnoredAny, de::IgnoredAny>()?
            .is_some()
        {}
        Ok(0)
    }
}

/// Deserialize optional text; anything but a string loads as `None`
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientString)
}

/// Like [`lenient_string`], with missing text as the empty string
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.unwrap_or_default())
}

struct LenientString;

impl<'de> Visitor<'de> for LenientString {
    type Value = Option<String>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(Some(v))
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<de::IgnoredAny>()?.is_some() {}
        Ok(None)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        while map
            .next_entry::<de::IgnoredAny, de::IgnoredAny>()?
            .is_some()
        {}
        Ok(None)
    }
}

/// Deserialize a section's cells. A missing or non-list value is no cells;
/// entries that are not cell objects are dropped.
fn lenient_cells<'de, D>(deserializer: D) -> Result<Vec<Cell>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(vec![]);
    };
    Ok(items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(cell) => Some(cell),
            Err(err) => {
                tracing::warn!(index, %err, "skipping malformed cell");
                None
            }
        })
        .collect())
}

/// Deserialize the element list; anything but a list counts as missing
fn lenient_elements<'de, D>(deserializer: D) -> Result<Option<Vec<Element>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(Some(items.into_iter().map(Element::from_value).collect())),
        Value::Null => Ok(None),
        _ => {
            tracing::warn!("element list is not a list");
            Ok(None)
        }
    }
}
