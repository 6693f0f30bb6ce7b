//! Actor decision making - walk the behavior graph to one intent per tick

use tracing::trace;

use crate::behavior::graph::{NodeKind, Objective};
use crate::core::types::Vec2;
use crate::data::resources::ResourceKind;
use crate::data::GameData;
use crate::entity::{Actor, Entity};
use crate::simulation::intent::{Intent, Movement};
use crate::world::state::WorldState;

/// Choose the intent for `entity` against the current world.
///
/// Non-actors, actors without a graph, dead ends and runaway traversals all
/// yield `Intent::Idle`.
pub fn decide(entity: &Entity, state: &WorldState, data: &GameData) -> Intent {
    let Some(actor) = entity.as_actor() else {
        return Intent::Idle;
    };
    let Some(graph) = actor.behavior.as_ref() else {
        return Intent::Idle;
    };
    let Some(mut current) = graph.entry() else {
        return Intent::Idle;
    };

    for _ in 0..graph.hop_limit() {
        let Some(node) = graph.node(current) else {
            return Intent::Idle;
        };

        let next = match &node.kind {
            NodeKind::Entry => graph.first_successor(current),
            NodeKind::Condition(condition) => {
                graph.successor(current, condition.evaluate(actor).into())
            }
            NodeKind::Goal { objective } => {
                return resolve_objective(objective, entity.position, actor, state, data)
            }
        };

        match next {
            Some(id) => current = id,
            None => return Intent::Idle,
        }
    }

    trace!(actor = %entity.id, "Behavior traversal exceeded hop limit");
    Intent::Idle
}

/// Turn a goal node's objective into a concrete intent
fn resolve_objective(
    objective: &Objective,
    position: Vec2,
    actor: &Actor,
    state: &WorldState,
    data: &GameData,
) -> Intent {
    match objective {
        Objective::CollectResource(kind) => match nearest_resource(state, *kind, position) {
            None => Intent::Idle,
            Some(target) if position.distance(&target.position) <= target.size => {
                Intent::Collect {
                    resource: target.id,
                }
            }
            Some(target) => Intent::Move(Movement::Destination(target.position)),
        },

        Objective::BuildStructure => {
            let nearest = state
                .entities
                .iter()
                .filter_map(|e| {
                    let blueprint = e.as_blueprint()?;
                    let item = blueprint.providable_items(&actor.inventory).into_iter().next()?;
                    Some((e, item))
                })
                .min_by(|(a, _), (b, _)| {
                    position
                        .distance(&a.position)
                        .total_cmp(&position.distance(&b.position))
                });

            match nearest {
                None => Intent::Idle,
                Some((target, item)) if position.distance(&target.position) <= target.size => {
                    Intent::InsertItem {
                        blueprint: target.id,
                        item,
                    }
                }
                Some((target, _)) => Intent::Move(Movement::Destination(target.position)),
            }
        }

        Objective::CraftItem(recipe_id) => match data.recipe(recipe_id) {
            Some(recipe) if actor.inventory.has_items(&recipe.required_items) => {
                Intent::CraftItem {
                    recipe_id: recipe_id.clone(),
                }
            }
            _ => Intent::Idle,
        },
    }
}

/// Closest non-depleted resource of `kind`
fn nearest_resource<'a>(
    state: &'a WorldState,
    kind: ResourceKind,
    position: Vec2,
) -> Option<&'a Entity> {
    state
        .entities
        .iter()
        .filter(|e| {
            e.as_resource()
                .is_some_and(|r| r.kind == kind && r.quantity_remaining > 0)
        })
        .min_by(|a, b| {
            position
                .distance(&a.position)
                .total_cmp(&position.distance(&b.position))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::condition::{Comparison, QuantitySource};
    use crate::behavior::graph::BehaviorGraph;
    use crate::core::config::SimulationConfig;
    use crate::core::types::EntityId;
    use crate::data::blueprints::BlueprintKind;
    use crate::data::items::ItemKind;
    use crate::world::terrain::{TerrainGrid, TerrainType};

    fn world() -> (WorldState, GameData, SimulationConfig) {
        let config = SimulationConfig::default();
        let terrain = TerrainGrid::uniform(10, 10, 100.0, TerrainType::Soil);
        (WorldState::new(terrain, 0), GameData::with_defaults(), config)
    }

    fn actor_with(graph: Option<BehaviorGraph>, config: &SimulationConfig) -> Entity {
        let mut entity = Entity::actor(EntityId::new(), Vec2::new(100.0, 100.0), config);
        if let Some(actor) = entity.as_actor_mut() {
            actor.behavior = graph;
        }
        entity
    }

    fn collect_graph(kind: ResourceKind) -> BehaviorGraph {
        let mut g = BehaviorGraph::new();
        let entry = g.add_entry();
        let goal = g.add_goal(Objective::CollectResource(kind));
        g.connect(entry, goal);
        g
    }

    #[test]
    fn test_no_graph_is_idle() {
        let (state, data, config) = world();
        let actor = actor_with(None, &config);
        assert_eq!(decide(&actor, &state, &data), Intent::Idle);
    }

    #[test]
    fn test_collect_moves_towards_far_resource() {
        let (mut state, data, config) = world();
        let settings = data.resource(ResourceKind::Stone).unwrap();
        let stone = Entity::resource(EntityId::new(), Vec2::new(500.0, 100.0), settings);
        state.entities.push(stone);

        let actor = actor_with(Some(collect_graph(ResourceKind::Stone)), &config);
        assert_eq!(
            decide(&actor, &state, &data),
            Intent::Move(Movement::Destination(Vec2::new(500.0, 100.0)))
        );
    }

    #[test]
    fn test_collect_picks_nearest_non_depleted() {
        let (mut state, data, config) = world();
        let settings = data.resource(ResourceKind::Stone).unwrap();

        let mut empty = Entity::resource(EntityId::new(), Vec2::new(105.0, 100.0), settings);
        if let Some(r) = empty.as_resource_mut() {
            r.quantity_remaining = 0;
        }
        let near = Entity::resource(EntityId::new(), Vec2::new(110.0, 100.0), settings);
        let far = Entity::resource(EntityId::new(), Vec2::new(900.0, 100.0), settings);
        let near_id = near.id;
        state.entities.extend([empty, far, near]);

        let actor = actor_with(Some(collect_graph(ResourceKind::Stone)), &config);
        assert_eq!(
            decide(&actor, &state, &data),
            Intent::Collect { resource: near_id }
        );
    }

    #[test]
    fn test_collect_with_no_resource_is_idle() {
        let (state, data, config) = world();
        let actor = actor_with(Some(collect_graph(ResourceKind::Pond)), &config);
        assert_eq!(decide(&actor, &state, &data), Intent::Idle);
    }

    #[test]
    fn test_condition_branches() {
        let (mut state, data, config) = world();
        let settings = data.resource(ResourceKind::Stick).unwrap();
        state
            .entities
            .push(Entity::resource(EntityId::new(), Vec2::new(100.0, 100.0), settings));

        let mut g = BehaviorGraph::new();
        let entry = g.add_entry();
        let cond = g.add_condition(QuantitySource::Hunger, Comparison::Lt, 0.5);
        let collect = g.add_goal(Objective::CollectResource(ResourceKind::Stick));
        g.connect(entry, cond);
        g.connect_when(cond, true, collect);

        // Fed actor takes the false branch, which has no edge
        let mut actor = actor_with(Some(g), &config);
        assert_eq!(decide(&actor, &state, &data), Intent::Idle);

        if let Some(a) = actor.as_actor_mut() {
            a.vitals.hunger = 0.2;
        }
        assert!(matches!(decide(&actor, &state, &data), Intent::Collect { .. }));
    }

    #[test]
    fn test_cyclic_graph_is_bounded() {
        let (state, data, config) = world();
        let mut g = BehaviorGraph::new();
        let entry = g.add_entry();
        let a = g.add_condition(QuantitySource::Hunger, Comparison::Gte, 0.0);
        let b = g.add_condition(QuantitySource::Thirst, Comparison::Gte, 0.0);
        g.connect(entry, a);
        g.connect_when(a, true, b);
        g.connect_when(b, true, a);

        let actor = actor_with(Some(g), &config);
        assert_eq!(decide(&actor, &state, &data), Intent::Idle);
    }

    #[test]
    fn test_build_inserts_providable_item() {
        let (mut state, data, config) = world();
        let settings = data.blueprint(BlueprintKind::Stockpile).unwrap();
        let bp = Entity::blueprint(EntityId::new(), Vec2::new(120.0, 100.0), settings);
        let bp_id = bp.id;
        state.entities.push(bp);

        let mut g = BehaviorGraph::new();
        let entry = g.add_entry();
        let build = g.add_goal(Objective::BuildStructure);
        g.connect(entry, build);

        let mut actor = actor_with(Some(g), &config);
        // Nothing to contribute yet
        assert_eq!(decide(&actor, &state, &data), Intent::Idle);

        if let Some(a) = actor.as_actor_mut() {
            a.inventory.add(ItemKind::Stone, 2);
        }
        assert_eq!(
            decide(&actor, &state, &data),
            Intent::InsertItem {
                blueprint: bp_id,
                item: ItemKind::Stone
            }
        );
    }

    #[test]
    fn test_craft_requires_all_items() {
        let (state, data, config) = world();
        let mut g = BehaviorGraph::new();
        let entry = g.add_entry();
        let craft = g.add_goal(Objective::CraftItem("rope".into()));
        g.connect(entry, craft);

        let mut actor = actor_with(Some(g), &config);
        if let Some(a) = actor.as_actor_mut() {
            a.inventory.add(ItemKind::FreshGrass, 2);
        }
        assert_eq!(decide(&actor, &state, &data), Intent::Idle);

        if let Some(a) = actor.as_actor_mut() {
            a.inventory.add(ItemKind::FreshGrass, 1);
        }
        assert_eq!(
            decide(&actor, &state, &data),
            Intent::CraftItem {
                recipe_id: "rope".into()
            }
        );
    }
}
