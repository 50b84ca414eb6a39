//! The traversal controller: one percept in, one action out.
//!
//! Each call to [`Explorer::decide`] runs the full turn pipeline:
//!
//! 1. Project the percept's cardinal rays into the [`WorldMap`].
//! 2. Run the pruning pass (if enabled).
//! 3. Choose an action, in priority order:
//!    - `U` when standing on the goal;
//!    - step toward a goal visible along a cardinal ray;
//!    - step onto the first untraversed open neighbor, scanning N, E, S, W;
//!    - at a dead end, take a loop shortcut or backtrack one frame;
//!    - with nothing left, the configured fallback direction.
//!
//! The explorer never fails. An exhausted search is reported through
//! [`DecisionKind::Fallback`] and a warning rather than an error, so that
//! the environment always gets a well-formed action.

use delve_types::{Action, Cardinal, Percept, Position};
use delve_world::{WorldMap, prune};
use serde::Serialize;
use tracing::{Level, debug, enabled, info, warn};

use crate::config::ExplorerConfig;
use crate::history::{MoveStack, RunHistory, RunStep, StepKind};
use crate::loop_detector::{PendingStep, find_shortcut};

// ---------------------------------------------------------------------------
// Decisions
// ---------------------------------------------------------------------------

/// Why an action was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DecisionKind {
    /// Standing on the goal.
    Use,
    /// Heading for a visible goal.
    GoalApproach,
    /// Exploring a new cell.
    Forward,
    /// Returning one frame along the move stack.
    Backtrack,
    /// Jumping across a closed loop.
    LoopShortcut {
        /// Move stack frames dropped by the jump.
        discarded: usize,
    },
    /// Nothing left to explore or backtrack.
    Fallback,
}

/// One turn's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decision {
    /// The action handed to the environment.
    pub action: Action,
    /// How it was chosen.
    pub kind: DecisionKind,
}

/// Running totals over a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExplorerStats {
    /// Forward moves onto new cells.
    pub forward_moves: u64,
    /// Moves toward a visible goal.
    pub goal_approaches: u64,
    /// Single-frame backtracks.
    pub backtracks: u64,
    /// Loop shortcuts taken.
    pub shortcuts: u64,
    /// Frames dropped by loop shortcuts.
    pub frames_discarded: u64,
    /// Turns that fell through to the fallback direction.
    pub fallbacks: u64,
    /// Frontier coordinates retired by pruning.
    pub pruned: u64,
}

/// Serializable summary of an explorer session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExplorerSnapshot {
    /// Turns decided so far.
    pub turn: u64,
    /// Current position.
    pub position: Position,
    /// Open move stack frames, bottom to top.
    pub move_stack: Vec<Cardinal>,
    /// Moves recorded in the run history.
    pub history_len: usize,
    /// Coordinates visited or retired.
    pub traversed: usize,
    /// Coordinates still in the frontier.
    pub frontier: usize,
    /// Coordinates ever observed.
    pub observed: usize,
    /// Forward targets still queued.
    pub visit_queue: Vec<Position>,
    /// Running totals.
    pub stats: ExplorerStats,
}

// ---------------------------------------------------------------------------
// Explorer
// ---------------------------------------------------------------------------

/// A single exploration session.
#[derive(Debug, Clone)]
pub struct Explorer {
    config: ExplorerConfig,
    world: WorldMap,
    position: Position,
    stack: MoveStack,
    history: RunHistory,
    /// Targets of the open move stack frames, minus any since retired by
    /// pruning. Bottom to top.
    visit_queue: Vec<Position>,
    turn: u64,
    after_backtrack: bool,
    after_shortcut: bool,
    stats: ExplorerStats,
}

impl Explorer {
    /// Start a session at the origin.
    pub fn new(config: ExplorerConfig) -> Self {
        Self {
            config,
            world: WorldMap::new(),
            position: Position::ORIGIN,
            stack: MoveStack::new(),
            history: RunHistory::new(),
            visit_queue: Vec::new(),
            turn: 0,
            after_backtrack: false,
            after_shortcut: false,
            stats: ExplorerStats::default(),
        }
    }

    /// Consume one percept and choose the next action.
    pub fn decide(&mut self, percept: &Percept) -> Decision {
        self.turn = self.turn.saturating_add(1);
        self.world.observe(self.position, percept);
        if self.config.pruning {
            self.prune_frontier();
        }

        let decision = if percept.here.is_goal() {
            info!(turn = self.turn, position = %self.position, "goal reached");
            Decision {
                action: Action::Use,
                kind: DecisionKind::Use,
            }
        } else if let Some(direction) = Cardinal::ALL
            .into_iter()
            .find(|&c| percept.goal_in_sight(c))
        {
            self.advance(percept, direction, StepKind::GoalApproach)
        } else if let Some(direction) = self.forward_move(percept) {
            self.advance(percept, direction, StepKind::Forward)
        } else if !self.stack.is_empty() {
            self.retreat(percept)
        } else {
            self.fall_back()
        };

        debug!(
            turn = self.turn,
            position = %self.position,
            action = %decision.action,
            kind = ?decision.kind,
            "decided"
        );
        decision
    }

    fn prune_frontier(&mut self) {
        let retired = prune(&mut self.world, self.position);
        if retired.is_empty() {
            return;
        }
        self.stats.pruned = self
            .stats
            .pruned
            .saturating_add(u64::try_from(retired.len()).unwrap_or(u64::MAX));
        self.visit_queue
            .retain(|p| retired.iter().all(|r| r.position != *p));
    }

    /// First unblocked, untraversed neighbor in N, E, S, W order.
    fn forward_move(&self, percept: &Percept) -> Option<Cardinal> {
        Cardinal::ALL.into_iter().find(|&c| {
            !percept.is_blocked(c) && !self.world.is_traversed(self.position.neighbor(c))
        })
    }

    /// Record the current cell and step onto a new one.
    fn advance(&mut self, percept: &Percept, direction: Cardinal, kind: StepKind) -> Decision {
        self.world.commit(self.position);
        self.history.push(RunStep {
            position: self.position,
            reverse: direction.opposite(),
            open_degree: percept.open_cardinal_count(),
            kind,
        });
        self.stack.push(direction.opposite());
        let target = self.position.neighbor(direction);
        self.visit_queue.push(target);
        self.position = target;
        self.after_backtrack = false;
        self.after_shortcut = false;

        let kind = if kind == StepKind::GoalApproach {
            self.stats.goal_approaches = self.stats.goal_approaches.saturating_add(1);
            DecisionKind::GoalApproach
        } else {
            self.stats.forward_moves = self.stats.forward_moves.saturating_add(1);
            DecisionKind::Forward
        };
        Decision {
            action: Action::Move(direction),
            kind,
        }
    }

    /// Leave a dead end by loop shortcut or single-frame backtrack.
    fn retreat(&mut self, percept: &Percept) -> Decision {
        self.world.commit(self.position);
        let pending = PendingStep {
            position: self.position,
            open_degree: percept.open_cardinal_count(),
        };
        if enabled!(Level::DEBUG) {
            let path: Vec<Position> = self.history.steps().iter().map(|s| s.position).collect();
            let remaining = self.history.remaining_degrees(&self.world);
            debug!(turn = self.turn, ?path, ?remaining, "dead end");
        }

        let gated = self.after_backtrack || self.after_shortcut;
        if self.config.loop_shortcuts && !gated {
            let found = find_shortcut(
                &self.world,
                &self.history,
                pending,
                percept,
                self.stack.len(),
            );
            if let Some(shortcut) = found {
                return self.take_shortcut(pending, shortcut.direction, shortcut.discard);
            }
        }

        let Some(back) = self.stack.pop() else {
            return self.fall_back();
        };
        self.dequeue(self.position);
        self.history.push(RunStep {
            position: self.position,
            reverse: back.opposite(),
            open_degree: pending.open_degree,
            kind: StepKind::Backtrack,
        });
        self.position = self.position.neighbor(back);
        self.after_backtrack = true;
        self.after_shortcut = false;
        self.stats.backtracks = self.stats.backtracks.saturating_add(1);
        Decision {
            action: Action::Move(back),
            kind: DecisionKind::Backtrack,
        }
    }

    fn take_shortcut(
        &mut self,
        pending: PendingStep,
        direction: Cardinal,
        discard: usize,
    ) -> Decision {
        let discarded = self.stack.discard(discard);
        let steps = self.history.steps();
        let first_dropped = steps.len().saturating_sub(discarded);
        let dropped: Vec<Position> = steps
            .get(first_dropped..)
            .unwrap_or_default()
            .iter()
            .map(|s| s.position.neighbor(s.reverse.opposite()))
            .collect();
        self.visit_queue.retain(|p| !dropped.contains(p));
        self.history.push(RunStep {
            position: pending.position,
            reverse: direction.opposite(),
            open_degree: pending.open_degree,
            kind: StepKind::Shortcut,
        });
        self.position = self.position.neighbor(direction);
        self.after_shortcut = true;
        self.after_backtrack = false;
        self.stats.shortcuts = self.stats.shortcuts.saturating_add(1);
        self.stats.frames_discarded = self
            .stats
            .frames_discarded
            .saturating_add(u64::try_from(discarded).unwrap_or(u64::MAX));
        info!(
            turn = self.turn,
            %direction,
            discarded,
            to = %self.position,
            "loop shortcut"
        );
        Decision {
            action: Action::Move(direction),
            kind: DecisionKind::LoopShortcut { discarded },
        }
    }

    /// Drop the queued target for the cell being left, if pruning has not
    /// already removed it.
    fn dequeue(&mut self, position: Position) {
        if let Some(index) = self.visit_queue.iter().rposition(|&p| p == position) {
            self.visit_queue.remove(index);
        }
    }

    /// Nothing to explore and nothing to return to. The position is left
    /// unchanged since the move is not expected to succeed.
    fn fall_back(&mut self) -> Decision {
        self.after_backtrack = false;
        self.after_shortcut = false;
        self.stats.fallbacks = self.stats.fallbacks.saturating_add(1);
        warn!(
            turn = self.turn,
            position = %self.position,
            fallback = %self.config.fallback,
            "no move available, falling back"
        );
        Decision {
            action: Action::Move(self.config.fallback),
            kind: DecisionKind::Fallback,
        }
    }

    // -------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------

    /// Current position in the explorer's frame.
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Turns decided so far.
    pub const fn turn(&self) -> u64 {
        self.turn
    }

    /// The map built so far.
    pub const fn world(&self) -> &WorldMap {
        &self.world
    }

    /// Open backtrack frames.
    pub const fn move_stack(&self) -> &MoveStack {
        &self.stack
    }

    /// Every move made so far.
    pub const fn history(&self) -> &RunHistory {
        &self.history
    }

    /// Forward targets not yet backtracked past or pruned.
    pub fn visit_queue(&self) -> &[Position] {
        &self.visit_queue
    }

    /// Running totals.
    pub const fn stats(&self) -> &ExplorerStats {
        &self.stats
    }

    /// Active configuration.
    pub const fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// Summarize the session.
    pub fn snapshot(&self) -> ExplorerSnapshot {
        ExplorerSnapshot {
            turn: self.turn,
            position: self.position,
            move_stack: self.stack.as_slice().to_vec(),
            history_len: self.history.len(),
            traversed: self.world.traversed().len(),
            frontier: self.world.frontier_len(),
            observed: self.world.cell_count(),
            visit_queue: self.visit_queue.clone(),
            stats: self.stats,
        }
    }
}

impl Default for Explorer {
    fn default() -> Self {
        Self::new(ExplorerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use delve_types::{Cell, Direction};

    use super::*;

    /// Percept with the four cardinal rays given as environment strings.
    fn percept(here: char, n: &str, e: &str, s: &str, w: &str) -> Percept {
        Percept::new(Cell::from_char(here))
            .with_ray(Direction::North, Cell::ray(n))
            .with_ray(Direction::East, Cell::ray(e))
            .with_ray(Direction::South, Cell::ray(s))
            .with_ray(Direction::West, Cell::ray(w))
    }

    fn moves(explorer: &mut Explorer, percepts: &[Percept]) -> Vec<Decision> {
        percepts.iter().map(|p| explorer.decide(p)).collect()
    }

    #[test]
    fn uses_goal_underfoot() {
        let mut explorer = Explorer::default();
        let decision = explorer.decide(&percept('r', "w", "gw", "w", "w"));
        assert_eq!(decision.action, Action::Use);
        assert_eq!(decision.kind, DecisionKind::Use);
        assert!(explorer.history().is_empty());
        assert!(explorer.move_stack().is_empty());
        assert_eq!(explorer.position(), Position::ORIGIN);
        assert_eq!(explorer.turn(), 1);
    }

    #[test]
    fn walks_straight_to_visible_goal() {
        let mut explorer = Explorer::default();
        let decisions = moves(
            &mut explorer,
            &[
                percept('g', "w", "ggrw", "w", "w"),
                percept('g', "w", "grw", "w", "gw"),
                percept('g', "w", "rw", "w", "ggw"),
                percept('r', "w", "w", "w", "gggw"),
            ],
        );
        let actions: Vec<String> = decisions.iter().map(|d| d.action.to_string()).collect();
        assert_eq!(actions, ["E", "E", "E", "U"]);
        assert!(
            decisions
                .iter()
                .take(3)
                .all(|d| d.kind == DecisionKind::GoalApproach)
        );
        assert_eq!(explorer.position(), Position::new(4, 1));
        assert_eq!(explorer.move_stack().len(), 3);
        assert_eq!(explorer.stats().goal_approaches, 3);
    }

    #[test]
    fn goal_behind_wall_is_ignored() {
        let mut explorer = Explorer::default();
        let decision = explorer.decide(&percept('g', "w", "wr", "gw", "w"));
        assert_eq!(decision.action, Action::Move(Cardinal::South));
        assert_eq!(decision.kind, DecisionKind::Forward);
    }

    #[test]
    fn backtracks_out_of_dead_end_corridor() {
        let mut explorer = Explorer::default();
        let decisions = moves(
            &mut explorer,
            &[
                percept('g', "w", "gw", "w", "w"),
                percept('g', "w", "w", "w", "gw"),
            ],
        );
        assert_eq!(decisions[0].action, Action::Move(Cardinal::East));
        assert_eq!(decisions[0].kind, DecisionKind::Forward);
        assert_eq!(decisions[1].action, Action::Move(Cardinal::West));
        assert_eq!(decisions[1].kind, DecisionKind::Backtrack);
        assert_eq!(explorer.position(), Position::ORIGIN);
        assert!(explorer.move_stack().is_empty());
        assert!(explorer.visit_queue().is_empty());

        // Everything is explored and there is nothing left to return to.
        let last = explorer.decide(&percept('g', "w", "gw", "w", "w"));
        assert_eq!(last.kind, DecisionKind::Fallback);
        assert_eq!(last.action, Action::Move(Cardinal::North));
        assert_eq!(explorer.position(), Position::ORIGIN);
        assert_eq!(explorer.stats().fallbacks, 1);
    }

    /// Percepts for walking E, S, W around an enclosed 2x2 room and
    /// arriving at (1, 2).
    fn square_room() -> [Percept; 4] {
        [
            percept('g', "w", "gw", "gw", "w"),
            percept('g', "w", "w", "gw", "gw"),
            percept('g', "gw", "w", "w", "gw"),
            percept('g', "gw", "gw", "w", "w"),
        ]
    }

    fn square_room_run(config: ExplorerConfig) -> (Explorer, Vec<Decision>) {
        let mut explorer = Explorer::new(config);
        let decisions = moves(&mut explorer, &square_room());
        (explorer, decisions)
    }

    #[test]
    fn square_room_closes_with_shortcut() {
        let (explorer, decisions) = square_room_run(ExplorerConfig::default());
        let actions: Vec<String> = decisions.iter().map(|d| d.action.to_string()).collect();
        assert_eq!(actions, ["E", "S", "W", "N"]);
        assert_eq!(
            decisions[3].kind,
            DecisionKind::LoopShortcut { discarded: 3 }
        );
        assert_eq!(explorer.position(), Position::ORIGIN);
        assert!(explorer.move_stack().is_empty());
        assert_eq!(explorer.stats().shortcuts, 1);
        assert_eq!(explorer.stats().frames_discarded, 3);
        // The corner (1, 2) was pruned on arrival; the shortcut drops the rest.
        assert_eq!(explorer.stats().pruned, 1);
        assert!(explorer.visit_queue().is_empty());
    }

    #[test]
    fn shortcut_trims_visit_queue_with_stack() {
        let config = ExplorerConfig {
            pruning: false,
            ..ExplorerConfig::default()
        };
        let mut explorer = Explorer::new(config);
        let [first, second, third, corner] = square_room();
        moves(&mut explorer, &[first, second, third]);
        assert_eq!(
            explorer.visit_queue(),
            &[Position::new(2, 1), Position::new(2, 2), Position::new(1, 2)]
        );
        let decision = explorer.decide(&corner);
        assert_eq!(decision.kind, DecisionKind::LoopShortcut { discarded: 3 });
        assert_eq!(explorer.visit_queue().len(), explorer.move_stack().len());
        assert!(explorer.visit_queue().is_empty());
    }

    #[test]
    fn pruned_dead_end_leaves_parent_queued() {
        let mut explorer = Explorer::default();
        let decisions = moves(
            &mut explorer,
            &[
                percept('g', "w", "ggw", "w", "w"),
                percept('g', "w", "gw", "w", "gw"),
                percept('g', "w", "w", "w", "ggw"),
            ],
        );
        // (3, 1) is retired on arrival and removed from the queue; backing
        // out of it must leave (2, 1) in place.
        assert_eq!(decisions[2].kind, DecisionKind::Backtrack);
        assert_eq!(explorer.stats().pruned, 1);
        assert!(explorer.world().is_traversed(Position::new(3, 1)));
        assert_eq!(explorer.visit_queue(), &[Position::new(2, 1)]);
        assert_eq!(explorer.move_stack().len(), 1);

        let last = explorer.decide(&percept('g', "w", "gw", "w", "gw"));
        assert_eq!(last.action, Action::Move(Cardinal::West));
        assert!(explorer.visit_queue().is_empty());
        assert!(explorer.move_stack().is_empty());
    }

    #[test]
    fn square_room_shortcut_does_not_depend_on_pruning() {
        let config = ExplorerConfig {
            pruning: false,
            ..ExplorerConfig::default()
        };
        let (explorer, decisions) = square_room_run(config);
        assert_eq!(
            decisions[3],
            Decision {
                action: Action::Move(Cardinal::North),
                kind: DecisionKind::LoopShortcut { discarded: 3 },
            }
        );
        assert_eq!(explorer.stats().pruned, 0);
    }

    #[test]
    fn square_room_without_shortcuts_backtracks() {
        let config = ExplorerConfig {
            loop_shortcuts: false,
            ..ExplorerConfig::default()
        };
        let (explorer, decisions) = square_room_run(config);
        assert_eq!(
            decisions[3],
            Decision {
                action: Action::Move(Cardinal::East),
                kind: DecisionKind::Backtrack,
            }
        );
        assert_eq!(explorer.position(), Position::new(2, 2));
        assert_eq!(explorer.move_stack().as_slice(), &[Cardinal::West, Cardinal::North]);
    }

    #[test]
    fn consecutive_dead_ends_follow_the_stack() {
        let config = ExplorerConfig {
            loop_shortcuts: false,
            ..ExplorerConfig::default()
        };
        let mut explorer = Explorer::new(config);
        moves(&mut explorer, &square_room());
        assert!(explorer.after_backtrack);
        // Back at (2, 2): every neighbor is traversed, so backtrack again.
        let next = explorer.decide(&percept('g', "gw", "w", "w", "gw"));
        assert_eq!(next.kind, DecisionKind::Backtrack);
        assert_eq!(next.action, Action::Move(Cardinal::North));
    }

    #[test]
    fn stack_balances_against_moves() {
        let (explorer, _) = square_room_run(ExplorerConfig::default());
        let stats = explorer.stats();
        let pushed = stats.forward_moves.saturating_add(stats.goal_approaches);
        let popped = stats.backtracks.saturating_add(stats.frames_discarded);
        assert_eq!(
            pushed.checked_sub(popped),
            u64::try_from(explorer.move_stack().len()).ok()
        );
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn snapshot_serializes() {
        let (explorer, _) = square_room_run(ExplorerConfig::default());
        let snapshot = explorer.snapshot();
        assert_eq!(snapshot.turn, 4);
        assert_eq!(snapshot.history_len, 4);
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["position"], serde_json::json!({"x": 1, "y": 1}));
        assert_eq!(json["stats"]["shortcuts"], 1);
    }
}
