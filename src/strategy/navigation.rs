//! Movement and threat geometry.

use std::f32::consts::FRAC_PI_2;

use crate::controller::{BulletInfo, RobotController};
use crate::error::GameActionResult;
use crate::geometry::{Direction, MapLocation};

/// Degrees between probes in [`try_move`].
pub const DEFAULT_DEGREE_OFFSET: f32 = 20.0;

/// Probes per side in [`try_move`].
pub const DEFAULT_CHECKS_PER_SIDE: u32 = 3;

/// Move in `dir`, sidestepping small obstacles.
///
/// Equivalent to [`try_move_with`] with 20° spacing and three probes per
/// side.
///
/// # Errors
///
/// Propagates a fault raised by the move command.
pub fn try_move<C: RobotController + ?Sized>(rc: &mut C, dir: Direction) -> GameActionResult<bool> {
    try_move_with(rc, dir, DEFAULT_DEGREE_OFFSET, DEFAULT_CHECKS_PER_SIDE)
}

/// Move in `dir`, or in the nearest legal heading beside it.
///
/// Tries `dir` first, then for each level from 1 to `checks_per_side` the
/// heading rotated left by `degree_offset × level` and then rotated right by
/// the same amount. Moves at the first legal heading and returns `true`.
/// Returns `false` without moving if none is legal.
///
/// "Left" is counter-clockwise, so the left probe at each level adds the
/// offset to the heading and the right probe subtracts it.
///
/// # Errors
///
/// Propagates a fault raised by the move command.
pub fn try_move_with<C: RobotController + ?Sized>(
    rc: &mut C,
    dir: Direction,
    degree_offset: f32,
    checks_per_side: u32,
) -> GameActionResult<bool> {
    if rc.can_move(dir) {
        rc.move_in(dir)?;
        return Ok(true);
    }

    let mut offset = 0.0;
    for _ in 0..checks_per_side {
        offset += degree_offset;

        let left = dir.rotate_left_degrees(offset);
        if rc.can_move(left) {
            rc.move_in(left)?;
            return Ok(true);
        }

        let right = dir.rotate_right_degrees(offset);
        if rc.can_move(right) {
            rc.move_in(right)?;
            return Ok(true);
        }
    }

    Ok(false)
}

/// Whether `bullet`'s path, extended forever, passes through a body of
/// `body_radius` centered at `target`.
///
/// Obstacles between the bullet and the target and the bullet's range are
/// ignored. A bullet heading more than 90° away from the target never hits.
#[must_use]
pub fn will_collide(bullet: &BulletInfo, target: MapLocation, body_radius: f32) -> bool {
    let direction_to_target = bullet.location.direction_to(target);
    let distance_to_target = bullet.location.distance_to(target);
    let theta = bullet.dir.radians_between(direction_to_target);

    if theta.abs() > FRAC_PI_2 {
        return false;
    }

    // Distance from the target to the closest point on the bullet's line.
    let perpendicular = (distance_to_target * theta.sin()).abs();
    perpendicular <= body_radius
}

/// Whether `bullet` is on course to hit the controlled robot.
#[must_use]
pub fn will_collide_with_me<C: RobotController + ?Sized>(rc: &C, bullet: &BulletInfo) -> bool {
    will_collide(bullet, rc.location(), rc.robot_type().body_radius())
}

/// Sensed bullets within `radius` that are on course to hit the robot.
#[must_use]
pub fn incoming_bullets<C: RobotController + ?Sized>(rc: &C, radius: f32) -> Vec<BulletInfo> {
    rc.sense_nearby_bullets(radius)
        .into_iter()
        .filter(|bullet| will_collide_with_me(rc, bullet))
        .collect()
}
