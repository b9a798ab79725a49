//! Minimal scene registry
//!
//! The simulation does not own the real scene graph; the surrounding
//! application does. This module is the collaborator surface the airflow
//! core consumes: world transforms for emitters and a queryable set of
//! collidable nodes. Nodes are keyed by a slotmap so removal invalidates
//! stale ids instead of aliasing them.

mod collider;
mod raycast;
mod transform;

pub use collider::ColliderShape;
pub use raycast::{raycast, Ray, RayFilter, RayHit};
pub use transform::Transform;

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Stable key for a scene node
    pub struct NodeId;
}

/// A node in the scene: a transform plus an optional collidable shape
#[derive(Clone, Copy, Debug)]
pub struct SceneNode {
    /// World transform of the node
    pub transform: Transform,
    /// Collidable shape, if particle rays can strike this node
    pub collider: Option<ColliderShape>,
}

/// Registry of scene nodes
#[derive(Default)]
pub struct Scene {
    nodes: SlotMap<NodeId, SceneNode>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node without collision geometry
    pub fn add_node(&mut self, transform: Transform) -> NodeId {
        self.nodes.insert(SceneNode {
            transform,
            collider: None,
        })
    }

    /// Add a collidable node (floor, wall, placed equipment)
    pub fn add_collidable(&mut self, transform: Transform, shape: ColliderShape) -> NodeId {
        self.nodes.insert(SceneNode {
            transform,
            collider: Some(shape),
        })
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    /// Mutable access, e.g. while an emitter is being dragged
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id)
    }

    pub fn transform(&self, id: NodeId) -> Option<&Transform> {
        self.nodes.get(id).map(|n| &n.transform)
    }

    pub fn set_transform(&mut self, id: NodeId, transform: Transform) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.transform = transform;
        }
    }

    pub fn remove(&mut self, id: NodeId) -> Option<SceneNode> {
        self.nodes.remove(id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate nodes that carry collision geometry
    pub fn collidables(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes.iter().filter(|(_, n)| n.collider.is_some())
    }
}
