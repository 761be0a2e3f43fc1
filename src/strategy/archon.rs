//! Archon behaviour: donate when possible, otherwise hire gardeners.

use rand::Rng;
use tracing::debug;

use crate::config::StrategyConfig;
use crate::controller::RobotController;
use crate::error::GameActionResult;
use crate::strategy::{donate_to_win_if_possible, random_direction};

/// Turn logic for an archon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Archon {
    config: StrategyConfig,
}

impl Archon {
    /// Create an archon behaviour.
    #[must_use]
    pub const fn new(config: StrategyConfig) -> Self {
        Self { config }
    }

    /// Play one turn.
    ///
    /// Picks a random base heading and tries to hire a gardener in each of
    /// [`StrategyConfig::build_attempts`] headings spaced evenly to its left.
    /// Each heading is checked for legality right before hiring, since an
    /// earlier hire may have used up the bullets or the space.
    ///
    /// # Errors
    ///
    /// Propagates any fault raised by the controller.
    pub fn take_turn<C, R>(&mut self, rc: &mut C, rng: &mut R) -> GameActionResult<()>
    where
        C: RobotController + ?Sized,
        R: Rng + ?Sized,
    {
        donate_to_win_if_possible(rc, &self.config)?;

        let mut dir = random_direction(rng);
        for _ in 0..self.config.build_attempts {
            if rc.can_hire_gardener(dir) {
                rc.hire_gardener(dir)?;
                debug!(%dir, "hired gardener");
            }
            dir = dir.rotate_left_degrees(self.config.build_spacing_degrees);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::RobotType;
    use crate::strategy::fake::{same_direction, Call, FakeController};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn hire_checks(calls: &[Call]) -> Vec<crate::geometry::Direction> {
        calls
            .iter()
            .filter_map(|call| match call {
                Call::CanHire(dir) => Some(*dir),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_five_directions_sixty_degrees_apart() {
        let mut rc = FakeController::new(RobotType::Archon);
        let mut archon = Archon::new(StrategyConfig::default());

        archon
            .take_turn(&mut rc, &mut SmallRng::seed_from_u64(3))
            .unwrap();

        let checks = hire_checks(&rc.calls());
        assert_eq!(checks.len(), 5);
        for pair in checks.windows(2) {
            assert!((pair[0].degrees_between(pair[1]) - 60.0).abs() < 1e-3);
        }
        assert!(!rc.calls().iter().any(|c| matches!(c, Call::Hire(_))));
    }

    #[test]
    fn test_each_hire_rechecked() {
        // Only the first two hires succeed; later checks must see that.
        let mut rc = FakeController::new(RobotType::Archon);
        rc.hire_capacity = 2;
        let mut archon = Archon::new(StrategyConfig::default());

        archon
            .take_turn(&mut rc, &mut SmallRng::seed_from_u64(11))
            .unwrap();

        let calls = rc.calls();
        assert_eq!(calls.len(), 7);
        // check, hire, check, hire, then three failed checks
        assert!(matches!(calls[0], Call::CanHire(_)));
        assert!(matches!(calls[1], Call::Hire(_)));
        assert!(matches!(calls[2], Call::CanHire(_)));
        assert!(matches!(calls[3], Call::Hire(_)));
        for call in &calls[4..] {
            assert!(matches!(call, Call::CanHire(_)));
        }
        if let (Call::CanHire(checked), Call::Hire(hired)) = (calls[2], calls[3]) {
            assert!(same_direction(checked, hired));
        }
    }

    #[test]
    fn test_archon_donates_before_hiring() {
        let mut rc = FakeController::new(RobotType::Archon);
        rc.bullets = 12_000.0;
        rc.hire_capacity = 1;
        let mut archon = Archon::new(StrategyConfig::default());

        archon
            .take_turn(&mut rc, &mut SmallRng::seed_from_u64(5))
            .unwrap();

        let calls = rc.calls();
        assert!(matches!(calls[0], Call::Donate(_)));
        assert_eq!(rc.donations(), vec![10_000.0]);
        assert_eq!(calls.iter().filter(|c| matches!(c, Call::Hire(_))).count(), 1);
    }

    #[test]
    fn test_base_heading_varies_with_rng() {
        let mut first = FakeController::new(RobotType::Archon);
        let mut second = FakeController::new(RobotType::Archon);
        let mut archon = Archon::new(StrategyConfig::default());
        let mut rng = SmallRng::seed_from_u64(99);

        archon.take_turn(&mut first, &mut rng).unwrap();
        archon.take_turn(&mut second, &mut rng).unwrap();

        let a = hire_checks(&first.calls())[0];
        let b = hire_checks(&second.calls())[0];
        assert!(!same_direction(a, b));
    }
}
