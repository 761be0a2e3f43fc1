#![no_main]

use arbitrary::Arbitrary;
use dendrophile::arena::{ArenaController, World};
use dendrophile::{Direction, MapLocation, RobotController, RobotType, Team, TreeId};
use libfuzzer_sys::fuzz_target;

/// A raw controller command, issued without checking legality first.
#[derive(Arbitrary, Debug, Clone, Copy)]
enum Action {
    Move(u16),
    Plant(u16),
    Hire(u16),
    Shake(u8),
    Water(u8),
    Donate(u16),
    EndTurn,
    EndRound,
}

/// Structured input for controller fuzzing.
#[derive(Arbitrary, Debug)]
struct ActionsInput {
    /// Whether the acting robot is an archon (otherwise a gardener).
    archon: bool,
    /// Starting x position in tenths.
    x_tenths: u16,
    /// Starting y position in tenths.
    y_tenths: u16,
    /// Commands to issue.
    actions: Vec<Action>,
}

fuzz_target!(|input: ActionsInput| {
    let mut world = World::new(30.0, 30.0);
    let robot_type = if input.archon {
        RobotType::Archon
    } else {
        RobotType::Gardener
    };
    let radius = robot_type.body_radius();
    let x = (f32::from(input.x_tenths % 300) / 10.0).clamp(radius, 30.0 - radius);
    let y = (f32::from(input.y_tenths % 300) / 10.0).clamp(radius, 30.0 - radius);
    let id = world.spawn_robot(Team::A, robot_type, MapLocation::new(x, y));
    world.spawn_tree(Team::Neutral, MapLocation::new(3.0, 3.0), 1.5, 40.0, 20);

    let mut rc = ArenaController::new(&mut world, id, 10.0).unwrap();
    let mut actions = input.actions.iter().take(256).peekable();

    while actions.peek().is_some() {
        for &action in actions.by_ref() {
            // Faults are expected; only panics and broken invariants count.
            let _ = match action {
                Action::Move(deg) => rc.move_in(Direction::from_degrees(f32::from(deg))),
                Action::Plant(deg) => rc.plant_tree(Direction::from_degrees(f32::from(deg))),
                Action::Hire(deg) => rc.hire_gardener(Direction::from_degrees(f32::from(deg))),
                Action::Shake(tree) => rc.shake(TreeId(u32::from(tree % 8))),
                Action::Water(tree) => rc.water(TreeId(u32::from(tree % 8))),
                Action::Donate(amount) => rc.donate(f32::from(amount)),
                Action::EndTurn => break,
                Action::EndRound => {
                    drop(rc);
                    world.end_round();
                    rc = ArenaController::new(&mut world, id, 10.0).unwrap();
                    continue;
                }
            };
            assert!(rc.team_bullets() >= 0.0);
        }
        drop(rc);

        for tree in world.trees() {
            assert!(tree.health > 0.0 && tree.health <= tree.max_health);
        }
        for body in world.robots() {
            assert!(world.on_map(body.location, body.robot_type.body_radius()));
        }
        rc = ArenaController::new(&mut world, id, 10.0).unwrap();
    }
});
