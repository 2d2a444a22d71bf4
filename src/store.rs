//! In-memory product store.
//!
//! The store is the sole owner of the product collection. Readers get cloned
//! snapshots; mutations take the write lock, so a create/update/delete never
//! interleaves its read-modify-write with another and no reader observes a
//! half-applied change.
//!
//! Identifiers come from an atomic counter, not from the list length, so a
//! fresh id is unique for the lifetime of the process even after deletes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::product::{Product, ProductDraft, ProductPatch};

pub struct ProductStore {
    records: RwLock<Vec<Product>>,
    next_id: AtomicU64,
}

impl ProductStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Assigns a fresh id, appends, and returns the stored record.
    pub fn create(&self, draft: ProductDraft) -> Product {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let product = Product {
            id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            category: draft.category,
            in_stock: draft.in_stock,
        };
        self.write().push(product.clone());
        product
    }

    pub fn get(&self, id: u64) -> Option<Product> {
        self.read().iter().find(|p| p.id == id).cloned()
    }

    /// Snapshot of the full collection in insertion order.
    pub fn list(&self) -> Vec<Product> {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Merges `patch` into the record with `id`: only fields present in the
    /// patch overwrite. The identifier itself is immutable.
    pub fn update(&self, id: u64, patch: ProductPatch) -> Option<Product> {
        let mut records = self.write();
        let product = records.iter_mut().find(|p| p.id == id)?;
        if let Some(name) = patch.name {
            product.name = name;
        }
        if let Some(description) = patch.description {
            product.description = Some(description);
        }
        if let Some(price) = patch.price {
            product.price = price;
        }
        if let Some(category) = patch.category {
            product.category = Some(category);
        }
        if let Some(in_stock) = patch.in_stock {
            product.in_stock = in_stock;
        }
        Some(product.clone())
    }

    /// Removes the record. Returns `false` when the id is absent, so a second
    /// delete on the same id is a miss, not a no-op success.
    pub fn delete(&self, id: u64) -> bool {
        let mut records = self.write();
        match records.iter().position(|p| p.id == id) {
            Some(index) => {
                records.remove(index);
                true
            }
            None => false,
        }
    }

    // A poisoned lock only means some writer panicked mid-hold; the Vec
    // itself is still valid, so recover the guard instead of propagating
    // the panic to every subsequent request.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Product>> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Product>> {
        self.records.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, price: f64) -> ProductDraft {
        ProductDraft {
            name: name.to_owned(),
            description: None,
            price,
            category: None,
            in_stock: true,
        }
    }

    #[test]
    fn ids_are_monotonic_and_never_reused() {
        let store = ProductStore::new();
        let a = store.create(draft("a", 1.0));
        let b = store.create(draft("b", 2.0));
        let c = store.create(draft("c", 3.0));
        assert!(a.id < b.id && b.id < c.id);

        assert!(store.delete(b.id));
        assert!(store.delete(c.id));

        let d = store.create(draft("d", 4.0));
        assert!(d.id > c.id, "id {} was reused after deletes", d.id);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn delete_then_get_misses() {
        let store = ProductStore::new();
        let product = store.create(draft("a", 1.0));
        assert!(store.delete(product.id));
        assert_eq!(store.get(product.id), None);
        assert!(!store.delete(product.id), "second delete must miss");
    }

    #[test]
    fn list_preserves_insertion_order() {
        let store = ProductStore::new();
        for name in ["first", "second", "third"] {
            store.create(draft(name, 1.0));
        }
        let names: Vec<_> = store.list().into_iter().map(|p| p.name).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn update_merges_only_present_fields() {
        let store = ProductStore::new();
        let original = store.create(ProductDraft {
            name: "Laptop".to_owned(),
            description: Some("16GB RAM".to_owned()),
            price: 1200.0,
            category: Some("electronics".to_owned()),
            in_stock: true,
        });

        let updated = store
            .update(
                original.id,
                ProductPatch {
                    price: Some(999.0),
                    in_stock: Some(false),
                    ..ProductPatch::default()
                },
            )
            .unwrap();

        assert_eq!(updated.price, 999.0);
        assert!(!updated.in_stock);
        // omitted fields survive the merge
        assert_eq!(updated.name, "Laptop");
        assert_eq!(updated.description.as_deref(), Some("16GB RAM"));
        assert_eq!(updated.category.as_deref(), Some("electronics"));
        assert_eq!(updated.id, original.id);
        // the stored record matches what update returned
        assert_eq!(store.get(original.id), Some(updated));
    }

    #[test]
    fn update_missing_id_is_none() {
        let store = ProductStore::new();
        assert_eq!(store.update(41, ProductPatch::default()), None);
    }
}
