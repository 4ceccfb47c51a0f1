use packman::map::{direction::Direction, geometry::Position, geometry::Rect};
use packman::systems::components::{GhostMode, Pursuer, Targeting};
use packman::systems::targeting::{compute_target, TargetContext, AMBUSH_LEAD};
use pretty_assertions::assert_eq;

const CORNER: Position = Position::new(0, 30);

fn context(player: Position, player_direction: Direction) -> TargetContext {
    TargetContext {
        player,
        player_direction,
        blinky: Some(Position::new(14, 10)),
        base_rect: Rect::from_positions([Position::new(10, 12), Position::new(17, 15)]).unwrap(),
        gate_exit: Position::new(13, 11),
    }
}

fn pursuer(targeting: Targeting) -> Pursuer {
    Pursuer {
        targeting,
        scatter_corner: CORNER,
        target: Position::default(),
    }
}

fn chase(targeting: Targeting, position: Position, ctx: &TargetContext) -> Position {
    compute_target(GhostMode::Chase, position, Position::new(13, 13), &pursuer(targeting), ctx).unwrap()
}

#[test]
fn test_direct_targets_player() {
    let ctx = context(Position::new(5, 5), Direction::Down);
    assert_eq!(chase(Targeting::Direct, Position::new(20, 20), &ctx), Position::new(5, 5));
}

#[test]
fn test_ambush_leads_the_player() {
    let ctx = context(Position::new(5, 5), Direction::Up);
    assert_eq!(chase(Targeting::Ambush, Position::new(20, 20), &ctx), Position::new(5, 5 - AMBUSH_LEAD));

    // A still player is targeted directly.
    let ctx = context(Position::new(5, 5), Direction::Still);
    assert_eq!(chase(Targeting::Ambush, Position::new(20, 20), &ctx), Position::new(5, 5));
}

#[test]
fn test_pincer_mirrors_blinky_through_pivot() {
    let ctx = context(Position::new(10, 20), Direction::Left);
    // Pivot (8, 20); Blinky (14, 10); 2 * pivot - blinky.
    assert_eq!(chase(Targeting::Pincer, Position::new(1, 1), &ctx), Position::new(2, 30));
}

#[test]
fn test_conditional_depends_on_distance() {
    let ctx = context(Position::new(5, 5), Direction::Right);

    assert_eq!(chase(Targeting::Conditional, Position::new(20, 20), &ctx), Position::new(5, 5));
    assert_eq!(chase(Targeting::Conditional, Position::new(8, 5), &ctx), CORNER);
    // Exactly at the radius still counts as close.
    assert_eq!(chase(Targeting::Conditional, Position::new(13, 5), &ctx), CORNER);
}

#[test]
fn test_scatter_targets_corner() {
    let ctx = context(Position::new(5, 5), Direction::Right);
    let target = compute_target(
        GhostMode::Scatter,
        Position::new(20, 20),
        Position::new(13, 13),
        &pursuer(Targeting::Direct),
        &ctx,
    );
    assert_eq!(target.unwrap(), CORNER);
}

#[test]
fn test_penned_ghost_targets_gate_exit() {
    let ctx = context(Position::new(5, 5), Direction::Right);
    for mode in [GhostMode::Scatter, GhostMode::Chase, GhostMode::Frightened] {
        let target = compute_target(mode, Position::new(12, 13), Position::new(12, 13), &pursuer(Targeting::Direct), &ctx);
        assert_eq!(target.unwrap(), Position::new(13, 11));
    }
}

#[test]
fn test_eaten_ghost_targets_spawn() {
    let ctx = context(Position::new(5, 5), Direction::Right);
    let spawn = Position::new(14, 13);
    let target = compute_target(GhostMode::Eaten, Position::new(3, 3), spawn, &pursuer(Targeting::Ambush), &ctx);
    assert_eq!(target.unwrap(), spawn);
}

#[test]
fn test_frightened_outside_pen_uses_chase_target() {
    let ctx = context(Position::new(5, 5), Direction::Right);
    let target = compute_target(
        GhostMode::Frightened,
        Position::new(20, 20),
        Position::new(13, 13),
        &pursuer(Targeting::Ambush),
        &ctx,
    );
    assert_eq!(target.unwrap(), Position::new(9, 5));
}
