pub mod behavior;
pub mod tick;

pub use behavior::{behavior_for, BehaviorContext, BehaviorKind, EnemyBehavior, Intent, PatrolAggro};
pub use tick::{Control, RoundEvent, RoundReport, TurnEngine};
