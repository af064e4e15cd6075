//! Category domain model.

use serde::{Deserialize, Serialize};

use crate::wire;

/// A catalogue category as returned by `/admin/categories`.
///
/// Categories form a forest through `parent_id`. A `parent_id` of `None` or
/// `0` marks a root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    #[serde(default, deserialize_with = "wire::optional_id")]
    pub parent_id: Option<i64>,
    /// Localised name resolved by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_me: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<i64>,
    #[serde(default, deserialize_with = "wire::flag")]
    pub status: bool,
}

impl Category {
    /// A bare category, mostly useful in tests and fixtures.
    pub fn new(id: i64, parent_id: Option<i64>, name: impl Into<String>) -> Self {
        Self {
            id,
            parent_id,
            name: Some(name.into()),
            name_en: None,
            name_me: None,
            icon: None,
            color: None,
            sort: None,
            status: true,
        }
    }

    /// Parent id, with `0` normalised to "no parent".
    pub fn parent(&self) -> Option<i64> {
        self.parent_id.filter(|id| *id != 0)
    }

    pub fn is_root(&self) -> bool {
        self.parent().is_none()
    }

    /// `name`, falling back to `name_en`, then to the empty string.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.name_en.as_deref())
            .unwrap_or("")
    }

    /// Explicit ordering key; missing counts as 0.
    pub fn sort_key(&self) -> i64 {
        self.sort.unwrap_or(0)
    }

    /// `"<name_en> / <name_me>"`, the label used by the parent picker.
    pub fn bilingual_label(&self) -> String {
        format!(
            "{} / {}",
            self.name_en.as_deref().unwrap_or(self.display_name()),
            self.name_me.as_deref().unwrap_or("")
        )
    }
}

/// Body of category create/update requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPayload {
    /// `None` serialises as `null`, which makes the category a root.
    pub parent_id: Option<i64>,
    pub name_en: String,
    pub name_me: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
}

impl CategoryPayload {
    /// Both names are required by the backend; blank names are rejected locally.
    pub fn is_valid(&self) -> bool {
        !self.name_en.trim().is_empty() && !self.name_me.trim().is_empty()
    }
}

impl From<&Category> for CategoryPayload {
    fn from(category: &Category) -> Self {
        Self {
            parent_id: category.parent(),
            name_en: category.name_en.clone().unwrap_or_default(),
            name_me: category.name_me.clone().unwrap_or_default(),
            icon: category.icon.clone(),
            color: category.color.clone(),
            status: Some(category.status),
        }
    }
}
