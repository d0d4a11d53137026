//! Level 1, neural connections: the player wires a small fixed network and
//! earns CP for every valid directed edge.

use {
    crate::{InteractionMode, LevelViewChanged},
    bevy::prelude::*,
    game_config::GameConfig,
    interaction_components::{NeuralNode, NodeKind, SurfacePosition},
    interaction_events::{ConnectionFormed, NodeClicked},
    progression_events::AddComputationPoints,
};

/// Node id, kind and position in percent of the play surface.
pub const LEVEL_ONE_LAYOUT: [(&str, NodeKind, Vec2); 4] = [
    ("input1", NodeKind::Input, Vec2::new(20.0, 30.0)),
    ("processing1", NodeKind::Processing, Vec2::new(50.0, 20.0)),
    ("processing2", NodeKind::Processing, Vec2::new(50.0, 40.0)),
    ("output1", NodeKind::Output, Vec2::new(80.0, 30.0)),
];

/// Source node chosen by the first click of a connection attempt.
#[derive(Resource, Default, Debug, Clone, PartialEq, Eq)]
pub struct PendingConnection(pub Option<String>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeClickOutcome {
    /// The clicked id is not on the board.
    Ignored,
    /// The clicked node is now the pending source.
    Selected(String),
    /// Re-click of the source, or an edge the rules refuse. No reward.
    Cancelled,
    Connect { source: String, target: String },
}

/// Decides what a click on `clicked` does given the pending source.
pub fn resolve_node_click<'a>(
    pending: Option<&str>,
    clicked: &str,
    find: impl Fn(&str) -> Option<&'a NeuralNode>,
) -> NodeClickOutcome {
    let Some(target) = find(clicked) else {
        return NodeClickOutcome::Ignored;
    };
    let Some(source_id) = pending else {
        return NodeClickOutcome::Selected(clicked.to_string());
    };
    if source_id == clicked {
        return NodeClickOutcome::Cancelled;
    }
    // the pending source vanished with a view rebuild
    let Some(source) = find(source_id) else {
        return NodeClickOutcome::Selected(clicked.to_string());
    };

    if source.accepts_edge_to(target) {
        NodeClickOutcome::Connect {
            source: source.id.clone(),
            target: target.id.clone(),
        }
    } else {
        NodeClickOutcome::Cancelled
    }
}

pub struct NeuralPlugin;

impl Plugin for NeuralPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PendingConnection>()
            .add_observer(on_level_view_changed)
            .add_observer(on_node_clicked);
    }
}

fn on_level_view_changed(
    trigger: On<LevelViewChanged>,
    config: Res<GameConfig>,
    mut pending: ResMut<PendingConnection>,
    mut commands: Commands,
) {
    pending.0 = None;
    if trigger.event().current != InteractionMode::NeuralConnections {
        return;
    }

    for (id, kind, percent) in LEVEL_ONE_LAYOUT {
        commands.spawn((
            NeuralNode::new(id, kind),
            SurfacePosition(percent / 100.0 * config.play_surface),
            Name::new(format!("Neural node {id}")),
        ));
    }
    debug!("Spawned {} neural nodes", LEVEL_ONE_LAYOUT.len());
}

fn on_node_clicked(
    trigger: On<NodeClicked>,
    config: Res<GameConfig>,
    mut pending: ResMut<PendingConnection>,
    mut nodes: Query<&mut NeuralNode>,
    mut commands: Commands,
) {
    let clicked = &trigger.event().node_id;
    let outcome = resolve_node_click(pending.0.as_deref(), clicked, |id| {
        nodes.iter().find(|node| node.id == id)
    });

    match outcome {
        NodeClickOutcome::Ignored => debug!("Click on unknown node '{}'", clicked),
        NodeClickOutcome::Selected(source) => pending.0 = Some(source),
        NodeClickOutcome::Cancelled => pending.0 = None,
        NodeClickOutcome::Connect { source, target } => {
            pending.0 = None;
            if let Some(mut node) = nodes.iter_mut().find(|node| node.id == source) {
                node.connections.insert(target.clone());
            }
            info!("Connected {} -> {}", source, target);
            commands.trigger(AddComputationPoints::new(config.rewards.connection));
            commands.trigger(ConnectionFormed { source, target });
        }
    }
}
