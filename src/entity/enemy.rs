//! Enemy-only state

use crate::core::types::Position;
use crate::simulation::behavior::BehaviorKind;

/// State carried only by enemy entities
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnemyState {
    pub behavior: BehaviorKind,
    /// Square the enemy patrols around
    pub home: Position,
    /// Offsets stamped with the warning glyph when this enemy attacks.
    /// Visual feedback only.
    pub attack_shape: Vec<(i32, i32)>,
}

impl EnemyState {
    /// Patrol/aggro enemy anchored at `home`
    pub fn patrol_aggro(home: Position, shape_radius: i32) -> Self {
        Self {
            behavior: BehaviorKind::PatrolAggro,
            home,
            attack_shape: square_ring(shape_radius),
        }
    }

    /// Absolute cells of the attack shape around `center`
    pub fn attack_cells(&self, center: Position) -> impl Iterator<Item = Position> + '_ {
        self.attack_shape
            .iter()
            .map(move |&(d_row, d_col)| center.offset(d_row, d_col))
    }
}

/// Every offset in the `(2r+1)^2` square except the center
fn square_ring(radius: i32) -> Vec<(i32, i32)> {
    let side = (2 * radius + 1).max(0) as usize;
    let mut out = Vec::with_capacity(side * side);
    for d_row in -radius..=radius {
        for d_col in -radius..=radius {
            if (d_row, d_col) != (0, 0) {
                out.push((d_row, d_col));
            }
        }
    }
    out
}
