use crate::object::VisualObject;
use serde::{Deserialize, Serialize};
use toybox_common::{Color, ObjectHandle};

/// Errors from registry lookups.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("object {0} is not in the scene")]
    UnknownHandle(ObjectHandle),
}

/// Ordered registry of every live object.
///
/// Objects sit in an arena of slots addressed by [`ObjectHandle`]. There is
/// no removal; a slot stays occupied for the rest of the session, so handles
/// held by timers or callers never dangle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    slots: Vec<VisualObject>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an object and return its handle.
    pub fn insert(&mut self, obj: VisualObject) -> ObjectHandle {
        let handle = ObjectHandle(self.slots.len() as u32);
        tracing::trace!(%handle, kind = ?obj.kind(), "object inserted");
        self.slots.push(obj);
        handle
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, handle: ObjectHandle) -> Option<&VisualObject> {
        self.slots.get(handle.index())
    }

    pub fn get_mut(&mut self, handle: ObjectHandle) -> Option<&mut VisualObject> {
        self.slots.get_mut(handle.index())
    }

    /// Recolor one object.
    pub fn set_color(&mut self, handle: ObjectHandle, color: Color) -> Result<(), SceneError> {
        let obj = self
            .get_mut(handle)
            .ok_or(SceneError::UnknownHandle(handle))?;
        obj.material.color = color;
        Ok(())
    }

    /// Objects in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectHandle, &VisualObject)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, obj)| (ObjectHandle(i as u32), obj))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ObjectHandle, &mut VisualObject)> {
        self.slots
            .iter_mut()
            .enumerate()
            .map(|(i, obj)| (ObjectHandle(i as u32), obj))
    }

    pub fn objects(&self) -> &[VisualObject] {
        &self.slots
    }

    pub fn objects_mut(&mut self) -> &mut [VisualObject] {
        &mut self.slots
    }

    pub fn handles(&self) -> impl Iterator<Item = ObjectHandle> + '_ {
        (0..self.slots.len()).map(|i| ObjectHandle(i as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use toybox_common::{Geometry, PALETTE};

    fn ball() -> VisualObject {
        VisualObject::new(Geometry::Sphere { radius: 1.0 }, PALETTE[0], Vec3::ZERO, 0.01)
    }

    #[test]
    fn scene_starts_empty() {
        let scene = Scene::new();
        assert!(scene.is_empty());
        assert_eq!(scene.len(), 0);
    }

    #[test]
    fn handles_are_sequential_and_stable() {
        let mut scene = Scene::new();
        let a = scene.insert(ball());
        let b = scene.insert(ball());
        assert_eq!(a, ObjectHandle(0));
        assert_eq!(b, ObjectHandle(1));
        for _ in 0..10 {
            scene.insert(ball());
        }
        assert!(scene.get(a).is_some());
        assert_eq!(scene.len(), 12);
        let handles: Vec<_> = scene.handles().collect();
        assert_eq!(handles.first(), Some(&a));
        assert_eq!(handles.len(), 12);
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mut scene = Scene::new();
        for i in 0..5 {
            let mut obj = ball();
            obj.transform.position.x = i as f32;
            scene.insert(obj);
        }
        let xs: Vec<f32> = scene.iter().map(|(_, o)| o.position().x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn set_color_on_unknown_handle_fails() {
        let mut scene = Scene::new();
        let h = scene.insert(ball());
        assert!(scene.set_color(h, PALETTE[3]).is_ok());
        assert_eq!(scene.get(h).unwrap().color(), PALETTE[3]);
        assert_eq!(
            scene.set_color(ObjectHandle(9), PALETTE[3]),
            Err(SceneError::UnknownHandle(ObjectHandle(9)))
        );
    }
}
