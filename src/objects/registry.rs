//! Ordered set of live objects and the single selection.

use bevy::prelude::*;

/// A registered object: its entity plus the name used for lookup
#[derive(Debug, Clone, PartialEq)]
pub struct RegisteredObject {
    pub entity: Entity,
    pub name: Option<String>,
}

/// Owns every object attached to the scene, in insertion order.
///
/// `selected` is always `None` or one of `objects`. All mutation goes through
/// the methods below, which keep that true.
#[derive(Resource, Debug, Default)]
pub struct ObjectRegistry {
    objects: Vec<RegisteredObject>,
    selected: Option<Entity>,
    /// Bumped by `remove_all`, lets pending loads detect they went stale
    generation: u64,
}

impl ObjectRegistry {
    pub fn add(&mut self, entity: Entity, name: Option<String>) {
        if self.contains(entity) {
            return;
        }
        self.objects.push(RegisteredObject { entity, name });
    }

    /// Remove an object, clearing the selection if it was selected.
    /// Returns false when `entity` is not a member.
    pub fn remove(&mut self, entity: Entity) -> bool {
        match self.index_of(entity) {
            Some(index) => self.remove_at(index).is_some(),
            None => false,
        }
    }

    pub fn remove_at(&mut self, index: usize) -> Option<RegisteredObject> {
        if index >= self.objects.len() {
            return None;
        }
        let removed = self.objects.remove(index);
        if self.selected == Some(removed.entity) {
            self.selected = None;
        }
        Some(removed)
    }

    /// Remove everything and return the removed entities in list order
    pub fn remove_all(&mut self) -> Vec<Entity> {
        self.selected = None;
        self.generation += 1;
        self.objects.drain(..).map(|o| o.entity).collect()
    }

    /// Select a member, or clear with `None`. Non-members are ignored.
    pub fn select(&mut self, entity: Option<Entity>) {
        match entity {
            Some(entity) if !self.contains(entity) => {}
            other => self.selected = other,
        }
    }

    pub fn selected(&self) -> Option<Entity> {
        self.selected
    }

    /// First object with the given name
    pub fn find(&self, name: &str) -> Option<Entity> {
        self.objects
            .iter()
            .find(|o| o.name.as_deref() == Some(name))
            .map(|o| o.entity)
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.index_of(entity).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredObject> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn index_of(&self, entity: Entity) -> Option<usize> {
        self.objects.iter().position(|o| o.entity == entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entities(count: usize) -> Vec<Entity> {
        let mut world = World::new();
        (0..count).map(|_| world.spawn_empty().id()).collect()
    }

    fn assert_selection_invariant(registry: &ObjectRegistry) {
        if let Some(selected) = registry.selected() {
            assert!(registry.contains(selected));
        }
    }

    #[test]
    fn test_insertion_order_is_list_order() {
        let e = entities(3);
        let mut registry = ObjectRegistry::default();
        for &entity in &e {
            registry.add(entity, None);
        }
        let order: Vec<Entity> = registry.iter().map(|o| o.entity).collect();
        assert_eq!(order, e);
    }

    #[test]
    fn test_add_twice_keeps_one_entry() {
        let e = entities(1);
        let mut registry = ObjectRegistry::default();
        registry.add(e[0], None);
        registry.add(e[0], Some("dup".into()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_removing_selected_clears_selection() {
        let e = entities(2);
        let mut registry = ObjectRegistry::default();
        registry.add(e[0], None);
        registry.add(e[1], None);
        registry.select(Some(e[1]));

        assert!(registry.remove(e[1]));
        assert_eq!(registry.selected(), None);
        assert_selection_invariant(&registry);
    }

    #[test]
    fn test_removing_other_keeps_selection() {
        let e = entities(2);
        let mut registry = ObjectRegistry::default();
        registry.add(e[0], None);
        registry.add(e[1], None);
        registry.select(Some(e[0]));

        assert!(registry.remove_at(1).is_some());
        assert_eq!(registry.selected(), Some(e[0]));
    }

    #[test]
    fn test_select_non_member_is_noop() {
        let e = entities(2);
        let mut registry = ObjectRegistry::default();
        registry.add(e[0], None);
        registry.select(Some(e[0]));

        registry.select(Some(e[1]));
        assert_eq!(registry.selected(), Some(e[0]));
        assert_selection_invariant(&registry);

        registry.select(None);
        assert_eq!(registry.selected(), None);
    }

    #[test]
    fn test_remove_non_member_returns_false() {
        let e = entities(2);
        let mut registry = ObjectRegistry::default();
        registry.add(e[0], None);
        assert!(!registry.remove(e[1]));
        assert!(registry.remove_at(5).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_remove_all_clears_and_bumps_generation() {
        let e = entities(3);
        let mut registry = ObjectRegistry::default();
        for &entity in &e {
            registry.add(entity, None);
        }
        registry.select(Some(e[2]));
        let before = registry.generation();

        let removed = registry.remove_all();
        assert_eq!(removed, e);
        assert!(registry.is_empty());
        assert_eq!(registry.selected(), None);
        assert_eq!(registry.generation(), before + 1);
    }

    #[test]
    fn test_find_returns_first_match() {
        let e = entities(3);
        let mut registry = ObjectRegistry::default();
        registry.add(e[0], Some("lamp".into()));
        registry.add(e[1], Some("chair".into()));
        registry.add(e[2], Some("chair".into()));

        assert_eq!(registry.find("chair"), Some(e[1]));
        assert_eq!(registry.find("table"), None);
    }
}
