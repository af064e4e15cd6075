//! Attribute domain module: attributes, their values, and their attachment
//! to categories.

mod api;
mod model;

pub use api::{AttributeApi, CategoryAttributeApi};
pub use model::{
    Attribute, AttributeCategory, AttributePayload, AttributePivot, AttributeType, AttributeValue,
    AttributeValuePayload, CategoryAttribute, CategoryAttributePayload, PivotSettings,
};
