use std::sync::Arc;

use shared::domain::{Element, Role};
use tokio::sync::RwLock;

/// Shared handle over the elements of one sort run.
///
/// Clones observe the same slots, so a renderer can hold one while the
/// controller mutates another.
#[derive(Debug, Clone)]
pub struct WorkingSequence {
    elements: Arc<RwLock<Vec<Element>>>,
    len: usize,
}

impl WorkingSequence {
    pub fn from_values(values: impl IntoIterator<Item = i64>) -> Self {
        let elements: Vec<Element> = values.into_iter().map(Element::new).collect();
        let len = elements.len();
        Self {
            elements: Arc::new(RwLock::new(elements)),
            len,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub async fn snapshot(&self) -> Vec<Element> {
        self.elements.read().await.clone()
    }

    pub async fn values(&self) -> Vec<i64> {
        self.elements.read().await.iter().map(|e| e.value).collect()
    }

    pub async fn roles(&self) -> Vec<Role> {
        self.elements.read().await.iter().map(|e| e.role).collect()
    }

    pub async fn get(&self, index: usize) -> Option<Element> {
        self.elements.read().await.get(index).copied()
    }

    pub(crate) async fn set_role(&self, index: usize, role: Role) -> bool {
        let mut elements = self.elements.write().await;
        match elements.get_mut(index) {
            Some(element) if element.role.is_done() && !role.is_done() => false,
            Some(element) => {
                element.role = role;
                true
            }
            None => false,
        }
    }

    pub(crate) async fn reset_roles(&self) {
        for element in self.elements.write().await.iter_mut() {
            element.role = Role::Normal;
        }
    }

    pub(crate) async fn set_value(&self, index: usize, value: i64) -> bool {
        let mut elements = self.elements.write().await;
        match elements.get_mut(index) {
            Some(element) => {
                element.value = value;
                true
            }
            None => false,
        }
    }

    /// Exchanges values under a single write lock. Either both slots change
    /// or neither does.
    pub(crate) async fn swap_values(&self, left: usize, right: usize) -> bool {
        let mut elements = self.elements.write().await;
        if left >= elements.len() || right >= elements.len() {
            return false;
        }
        let left_value = elements[left].value;
        elements[left].value = elements[right].value;
        elements[right].value = left_value;
        true
    }

    pub(crate) async fn values_in(&self, start: usize, end_inclusive: usize) -> Vec<i64> {
        let elements = self.elements.read().await;
        elements
            .get(start..=end_inclusive.min(elements.len().saturating_sub(1)))
            .map(|slice| slice.iter().map(|e| e.value).collect())
            .unwrap_or_default()
    }
}
