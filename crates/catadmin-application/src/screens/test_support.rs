//! In-memory backend used by the screen tests.

use std::sync::Mutex;

use async_trait::async_trait;
use catadmin_core::attribute::{
    Attribute, AttributeApi, AttributePayload, AttributeType, AttributeValue,
    AttributeValuePayload, CategoryAttribute, CategoryAttributeApi, CategoryAttributePayload,
};
use catadmin_core::category::{Category, CategoryApi, CategoryPayload};
use catadmin_core::error::{AdminError, Result};
use catadmin_core::user::{User, UserApi, UserUpdate};

#[derive(Default)]
pub struct MockBackend {
    pub categories: Mutex<Vec<Category>>,
    pub users: Mutex<Vec<User>>,
    pub attributes: Mutex<Vec<Attribute>>,
    pub values: Mutex<Vec<(i64, AttributeValue)>>,
    pub assigned: Mutex<Vec<(i64, CategoryAttribute)>>,
    /// Every mutating call, e.g. `"PATCH /admin/categories/2/sort 9"`.
    pub calls: Mutex<Vec<String>>,
    /// When set, list calls fail with this error.
    pub fail_lists: Mutex<Option<AdminError>>,
    /// When set, mutating calls fail with this error.
    pub fail_mutations: Mutex<Option<AdminError>>,
    pub list_calls: Mutex<usize>,
}

impl MockBackend {
    pub fn with_categories(categories: Vec<Category>) -> Self {
        let backend = Self::default();
        *backend.categories.lock().unwrap() = categories;
        backend
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> usize {
        *self.list_calls.lock().unwrap()
    }

    fn listing(&self) -> Result<()> {
        *self.list_calls.lock().unwrap() += 1;
        match self.fail_lists.lock().unwrap().clone() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn mutation(&self, call: String) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        match self.fail_mutations.lock().unwrap().clone() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

pub fn cat(id: i64, parent_id: Option<i64>, name: &str, sort: i64) -> Category {
    let mut category = Category::new(id, parent_id, name);
    category.sort = Some(sort);
    category.name_en = Some(name.to_string());
    category.name_me = Some(format!("{}-me", name));
    category
}

pub fn attribute(id: i64, name: &str, kind: AttributeType) -> Attribute {
    Attribute {
        id,
        name: name.to_string(),
        code: name.to_lowercase(),
        kind,
        is_required: false,
        category: None,
    }
}

#[async_trait]
impl CategoryApi for MockBackend {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        self.listing()?;
        Ok(self.categories.lock().unwrap().clone())
    }

    async fn get_category(&self, id: i64) -> Result<Category> {
        self.categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| AdminError::not_found("category", id.to_string()))
    }

    async fn create_category(&self, payload: &CategoryPayload) -> Result<()> {
        self.mutation(format!("POST /admin/categories {}", payload.name_en))?;
        let mut categories = self.categories.lock().unwrap();
        let id = categories.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let mut category = Category::new(id, payload.parent_id, payload.name_en.clone());
        category.name_en = Some(payload.name_en.clone());
        category.name_me = Some(payload.name_me.clone());
        categories.push(category);
        Ok(())
    }

    async fn update_category(&self, id: i64, payload: &CategoryPayload) -> Result<()> {
        self.mutation(format!("PATCH /admin/categories/{}", id))?;
        if let Some(c) = self.categories.lock().unwrap().iter_mut().find(|c| c.id == id) {
            c.parent_id = payload.parent_id;
            c.name = Some(payload.name_en.clone());
            c.name_en = Some(payload.name_en.clone());
            c.name_me = Some(payload.name_me.clone());
        }
        Ok(())
    }

    async fn delete_category(&self, id: i64) -> Result<()> {
        self.mutation(format!("DELETE /admin/categories/{}", id))?;
        self.categories.lock().unwrap().retain(|c| c.id != id);
        Ok(())
    }

    async fn update_sort(&self, id: i64, sort: i64) -> Result<()> {
        self.mutation(format!("PATCH /admin/categories/{}/sort {}", id, sort))?;
        if let Some(c) = self.categories.lock().unwrap().iter_mut().find(|c| c.id == id) {
            c.sort = Some(sort);
        }
        Ok(())
    }
}

#[async_trait]
impl UserApi for MockBackend {
    async fn list_users(&self) -> Result<Vec<User>> {
        self.listing()?;
        Ok(self.users.lock().unwrap().clone())
    }

    async fn update_user(&self, id: i64, update: &UserUpdate) -> Result<()> {
        self.mutation(format!("PATCH /admin/users/{}", id))?;
        if let Some(u) = self.users.lock().unwrap().iter_mut().find(|u| u.id == id) {
            if let Some(name) = &update.name {
                u.name = name.clone();
            }
            if let Some(email) = &update.email {
                u.email = email.clone();
            }
        }
        Ok(())
    }

    async fn delete_user(&self, id: i64) -> Result<()> {
        self.mutation(format!("DELETE /admin/users/{}", id))?;
        self.users.lock().unwrap().retain(|u| u.id != id);
        Ok(())
    }

    async fn toggle_admin(&self, id: i64) -> Result<()> {
        self.mutation(format!("POST /admin/users/{}/toggle-admin", id))?;
        if let Some(u) = self.users.lock().unwrap().iter_mut().find(|u| u.id == id) {
            if u.is_admin() {
                u.abilities.retain(|a| a != "admin");
            } else {
                u.abilities.push("admin".to_string());
            }
        }
        Ok(())
    }
}

#[async_trait]
impl AttributeApi for MockBackend {
    async fn list_attributes(&self) -> Result<Vec<Attribute>> {
        self.listing()?;
        Ok(self.attributes.lock().unwrap().clone())
    }

    async fn create_attribute(&self, payload: &AttributePayload) -> Result<()> {
        self.mutation(format!("POST /admin/attributes {}", payload.code))?;
        let mut attributes = self.attributes.lock().unwrap();
        let id = attributes.iter().map(|a| a.id).max().unwrap_or(0) + 1;
        let mut created = attribute(id, &payload.name, payload.kind);
        created.code = payload.code.clone();
        attributes.push(created);
        Ok(())
    }

    async fn update_attribute(&self, id: i64, payload: &AttributePayload) -> Result<()> {
        self.mutation(format!("PATCH /admin/attributes/{}", id))?;
        if let Some(a) = self.attributes.lock().unwrap().iter_mut().find(|a| a.id == id) {
            a.name = payload.name.clone();
            a.kind = payload.kind;
        }
        Ok(())
    }

    async fn delete_attribute(&self, id: i64) -> Result<()> {
        self.mutation(format!("DELETE /admin/attributes/{}", id))?;
        self.attributes.lock().unwrap().retain(|a| a.id != id);
        Ok(())
    }

    async fn list_values(&self, attribute_id: i64) -> Result<Vec<AttributeValue>> {
        self.listing()?;
        Ok(self
            .values
            .lock()
            .unwrap()
            .iter()
            .filter(|(owner, _)| *owner == attribute_id)
            .map(|(_, v)| v.clone())
            .collect())
    }

    async fn create_value(&self, attribute_id: i64, payload: &AttributeValuePayload) -> Result<()> {
        self.mutation(format!("POST /admin/attributes/{}/values", attribute_id))?;
        let mut values = self.values.lock().unwrap();
        let id = values.iter().map(|(_, v)| v.id).max().unwrap_or(0) + 1;
        values.push((
            attribute_id,
            AttributeValue {
                id,
                value_en: payload.value_en.clone(),
                value_me: payload.value_me.clone(),
            },
        ));
        Ok(())
    }

    async fn delete_value(&self, value_id: i64) -> Result<()> {
        self.mutation(format!("DELETE /admin/attribute-values/{}", value_id))?;
        self.values.lock().unwrap().retain(|(_, v)| v.id != value_id);
        Ok(())
    }
}

#[async_trait]
impl CategoryAttributeApi for MockBackend {
    async fn list_category_attributes(&self, category_id: i64) -> Result<Vec<CategoryAttribute>> {
        self.listing()?;
        Ok(self
            .assigned
            .lock()
            .unwrap()
            .iter()
            .filter(|(owner, _)| *owner == category_id)
            .map(|(_, ca)| ca.clone())
            .collect())
    }

    async fn attach_attribute(
        &self,
        category_id: i64,
        payload: &CategoryAttributePayload,
    ) -> Result<()> {
        self.mutation(format!(
            "POST /admin/categories/{}/attributes {}",
            category_id, payload.attribute_id
        ))?;
        let mut assigned = self.assigned.lock().unwrap();
        let id = assigned.iter().map(|(_, ca)| ca.id).max().unwrap_or(0) + 1;
        assigned.push((
            category_id,
            CategoryAttribute {
                id,
                attribute_id: Some(payload.attribute_id),
                name: None,
                code: None,
                kind: None,
                is_required: payload.is_required,
                show_in_filter: payload.show_in_filter,
                unique_per_listing: payload.unique_per_listing,
                sort_order: payload.sort_order,
                attribute: None,
                pivot: None,
            },
        ));
        Ok(())
    }

    async fn update_category_attribute(
        &self,
        pivot_id: i64,
        payload: &CategoryAttributePayload,
    ) -> Result<()> {
        self.mutation(format!("PATCH /admin/category-attributes/{}", pivot_id))?;
        if let Some((_, ca)) = self
            .assigned
            .lock()
            .unwrap()
            .iter_mut()
            .find(|(_, ca)| ca.id == pivot_id)
        {
            ca.is_required = payload.is_required;
            ca.sort_order = payload.sort_order;
        }
        Ok(())
    }

    async fn delete_category_attribute(&self, pivot_id: i64) -> Result<()> {
        self.mutation(format!("DELETE /admin/category-attributes/{}", pivot_id))?;
        self.assigned.lock().unwrap().retain(|(_, ca)| ca.id != pivot_id);
        Ok(())
    }

    async fn detach_attribute(&self, category_id: i64, attribute_id: i64) -> Result<()> {
        self.mutation(format!(
            "DELETE /admin/categories/{}/attributes/{}",
            category_id, attribute_id
        ))?;
        self.assigned
            .lock()
            .unwrap()
            .retain(|(owner, ca)| !(*owner == category_id && ca.attribute_id() == Some(attribute_id)));
        Ok(())
    }
}
