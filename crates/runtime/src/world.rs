//! Objects the animals can perceive: food and threats.
//!
//! Handles are never reused, so a destroyed object can never be confused with
//! one spawned later.

use std::collections::BTreeMap;

use animal_core::{EntityHandle, Vec3};
use tracing::debug;

use crate::error::{Result, RuntimeError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ObjectKind {
    Food,
    Threat,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldObject {
    pub kind: ObjectKind,
    pub position: Vec3,
}

#[derive(Clone, Debug, Default)]
pub struct World {
    objects: BTreeMap<EntityHandle, WorldObject>,
    next_handle: u32,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, kind: ObjectKind, position: Vec3) -> EntityHandle {
        let handle = EntityHandle::new(self.next_handle);
        self.next_handle += 1;
        self.objects.insert(handle, WorldObject { kind, position });
        debug!("spawned {} {:?} at {}", kind, handle, position);
        handle
    }

    pub fn spawn_food(&mut self, position: Vec3) -> EntityHandle {
        self.spawn(ObjectKind::Food, position)
    }

    pub fn spawn_threat(&mut self, position: Vec3) -> EntityHandle {
        self.spawn(ObjectKind::Threat, position)
    }

    pub fn move_object(&mut self, handle: EntityHandle, position: Vec3) -> Result<()> {
        let object = self
            .objects
            .get_mut(&handle)
            .ok_or(RuntimeError::UnknownObject { handle })?;
        object.position = position;
        Ok(())
    }

    /// Removes an object. Animals still holding its handle see it vanish on
    /// their next tick.
    pub fn destroy(&mut self, handle: EntityHandle) -> Result<WorldObject> {
        let object = self
            .objects
            .remove(&handle)
            .ok_or(RuntimeError::UnknownObject { handle })?;
        debug!("destroyed {} {:?}", object.kind, handle);
        Ok(object)
    }

    pub fn get(&self, handle: EntityHandle) -> Option<&WorldObject> {
        self.objects.get(&handle)
    }

    pub fn position(&self, handle: EntityHandle) -> Option<Vec3> {
        self.get(handle).map(|object| object.position)
    }

    pub fn contains(&self, handle: EntityHandle) -> bool {
        self.objects.contains_key(&handle)
    }

    /// Objects of `kind`, in handle order.
    pub fn iter_kind(&self, kind: ObjectKind) -> impl Iterator<Item = (EntityHandle, Vec3)> + '_ {
        self.objects
            .iter()
            .filter(move |(_, object)| object.kind == kind)
            .map(|(handle, object)| (*handle, object.position))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
