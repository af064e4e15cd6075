//! Attribute, attribute value and category-attribute pivot models.

use serde::{Deserialize, Serialize};

use crate::wire;

/// Input kind of an attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    #[default]
    Text,
    Number,
    Select,
    Checkbox,
    #[serde(other)]
    Other,
}

impl AttributeType {
    /// Whether attributes of this kind carry a list of predefined values.
    pub fn has_values(&self) -> bool {
        matches!(self, AttributeType::Select | AttributeType::Checkbox)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeType::Text => "text",
            AttributeType::Number => "number",
            AttributeType::Select => "select",
            AttributeType::Checkbox => "checkbox",
            AttributeType::Other => "other",
        }
    }
}

/// A listing attribute (`/admin/attributes`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(rename = "type", default)]
    pub kind: AttributeType,
    #[serde(default, deserialize_with = "wire::flag")]
    pub is_required: bool,
    /// Category the attribute was created for, when the backend embeds it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<AttributeCategory>,
}

/// Minimal category reference embedded in an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeCategory {
    #[serde(default, deserialize_with = "wire::optional_id")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
}

/// Body of attribute create/update requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributePayload {
    pub name: String,
    pub code: String,
    #[serde(rename = "type")]
    pub kind: AttributeType,
    pub is_required: bool,
}

/// A predefined value of a select/checkbox attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValue {
    pub id: i64,
    #[serde(default)]
    pub value_en: String,
    #[serde(default)]
    pub value_me: String,
}

/// Body of `POST /admin/attributes/{id}/values`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValuePayload {
    pub value_en: String,
    pub value_me: String,
}

/// Per-category attribute settings as nested by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributePivot {
    #[serde(default, deserialize_with = "wire::optional_id")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "wire::optional_id")]
    pub category_id: Option<i64>,
    #[serde(default, deserialize_with = "wire::optional_id")]
    pub attribute_id: Option<i64>,
    #[serde(default, deserialize_with = "wire::flag")]
    pub is_required: bool,
    #[serde(default, deserialize_with = "wire::flag")]
    pub show_in_filter: bool,
    #[serde(default, deserialize_with = "wire::flag")]
    pub unique_per_listing: bool,
    #[serde(default)]
    pub sort_order: i64,
}

/// One attribute attached to a category.
///
/// The backend returns either a flat pivot row or an attribute with a nested
/// `pivot` object; both shapes deserialize into this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAttribute {
    pub id: i64,
    #[serde(default, deserialize_with = "wire::optional_id")]
    pub attribute_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<AttributeType>,
    #[serde(default, deserialize_with = "wire::flag")]
    pub is_required: bool,
    #[serde(default, deserialize_with = "wire::flag")]
    pub show_in_filter: bool,
    #[serde(default, deserialize_with = "wire::flag")]
    pub unique_per_listing: bool,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<Attribute>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pivot: Option<AttributePivot>,
}

/// Effective per-category settings of an attached attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PivotSettings {
    pub is_required: bool,
    pub show_in_filter: bool,
    pub unique_per_listing: bool,
    pub sort_order: i64,
}

impl CategoryAttribute {
    /// Attribute id: `pivot.attribute_id`, else `attribute_id`, else the
    /// nested attribute's id.
    pub fn attribute_id(&self) -> Option<i64> {
        self.pivot
            .as_ref()
            .and_then(|p| p.attribute_id)
            .or(self.attribute_id)
            .or_else(|| self.attribute.as_ref().map(|a| a.id))
    }

    /// Id of the association row itself.
    pub fn pivot_id(&self) -> i64 {
        self.pivot.as_ref().and_then(|p| p.id).unwrap_or(self.id)
    }

    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or_else(|| self.attribute.as_ref().map(|a| a.name.as_str()))
            .unwrap_or("")
    }

    pub fn kind(&self) -> AttributeType {
        self.kind
            .or_else(|| self.attribute.as_ref().map(|a| a.kind))
            .unwrap_or_default()
    }

    /// Settings from the nested pivot when present, else the flat fields.
    pub fn settings(&self) -> PivotSettings {
        match &self.pivot {
            Some(p) => PivotSettings {
                is_required: p.is_required,
                show_in_filter: p.show_in_filter,
                unique_per_listing: p.unique_per_listing,
                sort_order: p.sort_order,
            },
            None => PivotSettings {
                is_required: self.is_required,
                show_in_filter: self.show_in_filter,
                unique_per_listing: self.unique_per_listing,
                sort_order: self.sort_order,
            },
        }
    }
}

/// Body of pivot create/update requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAttributePayload {
    pub attribute_id: i64,
    pub is_required: bool,
    pub show_in_filter: bool,
    pub unique_per_listing: bool,
    pub sort_order: i64,
}

impl CategoryAttributePayload {
    /// Pre-fills an edit form from an existing association.
    pub fn from_existing(existing: &CategoryAttribute) -> Option<Self> {
        let settings = existing.settings();
        Some(Self {
            attribute_id: existing.attribute_id()?,
            is_required: settings.is_required,
            show_in_filter: settings.show_in_filter,
            unique_per_listing: settings.unique_per_listing,
            sort_order: settings.sort_order,
        })
    }
}
