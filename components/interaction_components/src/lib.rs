use bevy::{platform::collections::HashSet, prelude::*};

pub struct InteractionComponentsPlugin;

impl Plugin for InteractionComponentsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<SurfacePosition>()
            .register_type::<Bit>()
            .register_type::<NodeKind>();
    }
}

/// Marker for every entity owned by the active level view.
/// Teardown despawns all of them, so `Bit` and `NeuralNode` require it.
#[derive(Component, Default, Debug)]
pub struct LevelViewEntity;

/// Location on the play surface, in surface units with the origin at the top-left.
#[derive(Component, Reflect, Default, Debug, Clone, Copy, PartialEq, Deref, DerefMut)]
#[reflect(Component, Default)]
pub struct SurfacePosition(pub Vec2);

/// A clickable binary digit.
#[derive(Component, Reflect, Default, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component, Default)]
#[require(LevelViewEntity, SurfacePosition)]
pub struct Bit {
    /// Spawn order; lower serials are older and trimmed first.
    pub serial: u64,
    /// Either 0 or 1.
    pub value: u8,
    /// Spent bits stay on the surface but ignore further clicks.
    pub clicked: bool,
}

#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Input,
    Processing,
    Output,
}

impl NodeKind {
    /// Whether an edge from `self` to `target` is allowed by type alone.
    ///
    /// Input feeds processing only, processing feeds processing or output,
    /// output never originates an edge.
    pub fn can_feed(self, target: NodeKind) -> bool {
        matches!(
            (self, target),
            (NodeKind::Input, NodeKind::Processing)
                | (NodeKind::Processing, NodeKind::Processing)
                | (NodeKind::Processing, NodeKind::Output)
        )
    }
}

/// A node of the level 1 neural network.
#[derive(Component, Debug, Clone, PartialEq)]
#[require(LevelViewEntity, SurfacePosition)]
pub struct NeuralNode {
    pub id: String,
    pub kind: NodeKind,
    /// Ids of the nodes this one feeds.
    pub connections: HashSet<String>,
}

impl NeuralNode {
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
            connections: HashSet::default(),
        }
    }

    /// Type compatibility plus duplicate-edge check.
    pub fn accepts_edge_to(&self, target: &NeuralNode) -> bool {
        self.kind.can_feed(target.kind) && !self.connections.contains(&target.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_compatibility_table() {
        use NodeKind::*;
        assert!(Input.can_feed(Processing));
        assert!(!Input.can_feed(Input));
        assert!(!Input.can_feed(Output));
        assert!(Processing.can_feed(Processing));
        assert!(Processing.can_feed(Output));
        assert!(!Processing.can_feed(Input));
        assert!(!Output.can_feed(Input));
        assert!(!Output.can_feed(Processing));
        assert!(!Output.can_feed(Output));
    }

    #[test]
    fn test_duplicate_edge_rejected() {
        let mut source = NeuralNode::new("input1", NodeKind::Input);
        let target = NeuralNode::new("processing1", NodeKind::Processing);
        assert!(source.accepts_edge_to(&target));
        source.connections.insert(target.id.clone());
        assert!(!source.accepts_edge_to(&target));
    }
}
