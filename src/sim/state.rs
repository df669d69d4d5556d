//! Game state and core simulation types
//!
//! The session owns every entity. Entities never reach back into the session:
//! collision responses report what happened and `tick` turns that into events.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, intersects};
use crate::consts::*;

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Every block destroyed
    Win,
    /// Ball dropped below the field
    Loss,
}

impl Outcome {
    /// Text shown to the player when the session ends
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::Win => "You Win",
            Outcome::Loss => "Game Over!",
        }
    }
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Steps are being simulated
    Running,
    /// Terminal; no further step mutates state
    Ended(Outcome),
}

/// Something observable that happened during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball left the paddle
    Launched,
    /// Block at `index` (grid order) was deactivated
    BlockDestroyed { index: usize },
    /// Ball deflected upward off the paddle
    PaddleBounce,
    /// Ball bounced off the left or right edge
    WallBounce,
    /// Ball bounced off the top edge
    CeilingBounce,
    /// Session reached a terminal state
    SessionEnded(Outcome),
}

/// Horizontal input direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

/// A discrete player command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaddleCommand {
    /// Start moving the paddle
    Move(Direction),
    /// Halt the paddle
    Stop,
    /// Launch a docked ball
    Fire,
}

/// Ball state - docked on the paddle or free-moving
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BallState {
    /// Riding the paddle at `offset` from its left edge
    Docked { offset: f32 },
    /// Launched
    Free,
}

/// Which field boundaries the ball's prospective position reached
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SideContact {
    /// Left or right edge; dx was negated
    pub wall: bool,
    /// Top edge; dy was negated
    pub ceiling: bool,
    /// Below the bottom edge; the session is lost
    pub fell: bool,
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Per-axis speed used on launch and deflection
    pub speed: f32,
    pub state: BallState,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Vec2::new(BALL_START_X, BALL_START_Y),
            vel: Vec2::ZERO,
            size: Vec2::splat(BALL_SIZE),
            speed: BALL_SPEED,
            state: BallState::Docked {
                offset: DOCK_OFFSET,
            },
        }
    }
}

impl Ball {
    /// A free ball at `pos` moving with `vel`
    pub fn free(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            state: BallState::Free,
            ..Self::default()
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Position after the pending velocity is applied
    pub fn prospective(&self) -> Vec2 {
        self.pos + self.vel
    }

    pub fn is_docked(&self) -> bool {
        matches!(self.state, BallState::Docked { .. })
    }

    /// Commit one step of motion
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    /// Would the prospective ball overlap `target` as it stands now?
    pub fn collide(&self, target: &Rect) -> bool {
        intersects(&self.rect().translated(self.vel), target)
    }

    /// Leave the paddle: straight up at `speed`, random integer dx in
    /// `[-speed, speed]`. Returns false if the ball was already free.
    pub fn launch<R: Rng>(&mut self, rng: &mut R) -> bool {
        if !self.is_docked() {
            return false;
        }
        let s = self.speed as i32;
        self.vel = Vec2::new(rng.random_range(-s..=s) as f32, -self.speed);
        self.state = BallState::Free;
        true
    }

    /// Vertical bounce off a block, which is destroyed
    pub fn bump_block(&mut self, block: &mut Block) {
        self.vel.y = -self.vel.y;
        block.active = false;
    }

    /// Paddle contact. A moving paddle drags the ball along; a descending
    /// ball is sent back up with dx set by where it struck the paddle.
    /// Returns true when the ball was deflected.
    pub fn bump_platform(&mut self, paddle: &Paddle) -> bool {
        if paddle.dx != 0.0 {
            self.pos.x += paddle.dx;
        }
        if self.vel.y <= 0.0 {
            return false;
        }
        self.vel.y = -self.vel.y;
        let offset = self.rect().center_x() - paddle.rect().center_x();
        self.vel.x = offset * DEFLECTION_FACTOR * self.speed;
        true
    }

    /// Boundary checks against the prospective position
    pub fn bump_sides(&mut self, field: Vec2) -> SideContact {
        let next = self.prospective();
        let mut contact = SideContact::default();

        if next.x <= 0.0 || next.x + self.size.x >= field.x {
            self.vel.x = -self.vel.x;
            contact.wall = true;
        }
        if next.y <= 0.0 {
            self.vel.y = -self.vel.y;
            contact.ceiling = true;
        }
        if next.y > field.y {
            contact.fell = true;
        }
        contact
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal velocity: -speed, 0 or +speed
    pub dx: f32,
    pub speed: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PADDLE_START_X, PADDLE_START_Y),
            size: Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
            dx: 0.0,
            speed: PADDLE_SPEED,
        }
    }
}

impl Paddle {
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn start(&mut self, direction: Direction) {
        self.dx = match direction {
            Direction::Left => -self.speed,
            Direction::Right => self.speed,
        };
    }

    pub fn stop(&mut self) {
        self.dx = 0.0;
    }

    /// Halt if the next step would leave `[0, field_width - width]`.
    /// Position is never clamped.
    pub fn check_bounds(&mut self, field_width: f32) {
        let next_x = self.pos.x + self.dx;
        if next_x < 0.0 || next_x + self.size.x > field_width {
            self.stop();
        }
    }

    /// Commit one step of motion, carrying a docked ball along
    pub fn advance(&mut self, ball: &mut Ball) {
        if self.dx == 0.0 {
            return;
        }
        self.pos.x += self.dx;
        if let BallState::Docked { offset } = ball.state {
            ball.pos.x = self.pos.x + offset;
        }
    }
}

/// A destructible target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub rect: Rect,
    pub active: bool,
}

/// Fixed grid of blocks, in row-major order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockField {
    blocks: Vec<Block>,
}

impl Default for BlockField {
    fn default() -> Self {
        Self::new(BLOCK_ROWS, BLOCK_COLS)
    }
}

impl BlockField {
    /// Lay out `rows * cols` active blocks
    pub fn new(rows: usize, cols: usize) -> Self {
        let blocks = (0..rows * cols)
            .map(|i| Block {
                rect: Rect::new(
                    BLOCK_MARGIN_X + BLOCK_SPACING_X * (i % cols) as f32,
                    BLOCK_MARGIN_Y + BLOCK_SPACING_Y * (i / cols) as f32,
                    BLOCK_WIDTH,
                    BLOCK_HEIGHT,
                ),
                active: true,
            })
            .collect();
        Self { blocks }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Block> {
        self.blocks.iter_mut()
    }

    pub fn active_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.active).count()
    }

    pub fn destroyed_count(&self) -> usize {
        self.len() - self.active_count()
    }
}

/// End-of-session report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub seed: u64,
    pub frames: u64,
    pub score: u32,
    pub total_blocks: usize,
    pub outcome: Option<Outcome>,
}

/// One play-through, from docked ball to win or loss
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Seed for the launch-angle RNG
    pub seed: u64,
    #[serde(skip)]
    rng: Pcg32,
    /// Steps simulated so far
    pub time_ticks: u64,
    pub phase: GamePhase,
    /// Field width and height
    pub field: Vec2,
    pub ball: Ball,
    pub paddle: Paddle,
    pub blocks: BlockField,
    /// Destroyed-block count
    pub score: u32,
}

impl GameState {
    /// Fresh session with the ball docked on the paddle
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            phase: GamePhase::Running,
            field: Vec2::new(FIELD_WIDTH, FIELD_HEIGHT),
            ball: Ball::default(),
            paddle: Paddle::default(),
            blocks: BlockField::default(),
            score: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            GamePhase::Running => None,
            GamePhase::Ended(outcome) => Some(outcome),
        }
    }

    pub fn total_blocks(&self) -> usize {
        self.blocks.len()
    }

    /// Launch the docked ball. `None` if there is nothing to launch.
    pub fn fire(&mut self) -> Option<GameEvent> {
        if !self.is_running() || !self.ball.launch(&mut self.rng) {
            return None;
        }
        log::debug!(
            "Ball launched from x={} with vel=({}, {})",
            self.ball.pos.x,
            self.ball.vel.x,
            self.ball.vel.y
        );
        Some(GameEvent::Launched)
    }

    /// Route a player command to the paddle
    pub fn apply_command(&mut self, command: PaddleCommand) -> Option<GameEvent> {
        if !self.is_running() {
            return None;
        }
        match command {
            PaddleCommand::Move(direction) => self.paddle.start(direction),
            PaddleCommand::Stop => self.paddle.stop(),
            PaddleCommand::Fire => return self.fire(),
        }
        None
    }

    /// Enter the terminal phase
    pub(crate) fn end(&mut self, outcome: Outcome) -> GameEvent {
        debug_assert!(self.is_running(), "session ended twice");
        self.phase = GamePhase::Ended(outcome);
        log::info!(
            "Session ended: {} (score {}/{} after {} frames)",
            outcome.message(),
            self.score,
            self.total_blocks(),
            self.time_ticks
        );
        GameEvent::SessionEnded(outcome)
    }

    /// Panics if score bookkeeping has drifted from the block field
    pub fn check_invariants(&self) {
        let total = self.total_blocks();
        assert!(
            self.score as usize <= total,
            "score {} exceeds block count {}",
            self.score,
            total
        );
        assert_eq!(
            self.score as usize,
            self.blocks.destroyed_count(),
            "score out of sync with destroyed blocks"
        );
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            seed: self.seed,
            frames: self.time_ticks,
            score: self.score,
            total_blocks: self.total_blocks(),
            outcome: self.outcome(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_grid_layout() {
        let field = BlockField::default();
        assert_eq!(field.len(), 32);
        assert_eq!(field.active_count(), 32);
        assert_eq!(field.destroyed_count(), 0);

        let first = field.get(0).unwrap();
        assert_eq!(first.rect, Rect::new(60.0, 20.0, 60.0, 20.0));

        // Second row, second column
        let b = field.get(9).unwrap();
        assert_eq!(b.rect, Rect::new(125.0, 45.0, 60.0, 20.0));

        let last = field.get(31).unwrap();
        assert_eq!(last.rect, Rect::new(515.0, 95.0, 60.0, 20.0));
    }

    #[test]
    fn test_new_session_is_docked() {
        let state = GameState::new(1);
        assert!(state.is_running());
        assert!(state.ball.is_docked());
        assert_eq!(state.ball.vel, Vec2::ZERO);
        assert_eq!(state.ball.pos, Vec2::new(320.0, 280.0));
        assert_eq!(state.paddle.pos, Vec2::new(280.0, 300.0));
        assert_eq!(state.score, 0);
        state.check_invariants();
    }

    #[test]
    fn test_launch_velocity_range() {
        for seed in 0..200 {
            let mut state = GameState::new(seed);
            assert_eq!(state.fire(), Some(GameEvent::Launched));
            let vel = state.ball.vel;
            assert_eq!(vel.y, -3.0);
            assert!((-3.0..=3.0).contains(&vel.x));
            assert_eq!(vel.x.fract(), 0.0, "dx must be an integer");
        }
    }

    #[test]
    fn test_launch_is_seeded() {
        let mut a = GameState::new(42);
        let mut b = GameState::new(42);
        a.fire();
        b.fire();
        assert_eq!(a.ball.vel, b.ball.vel);
    }

    #[test]
    fn test_fire_twice_is_noop() {
        let mut state = GameState::new(7);
        assert_eq!(state.fire(), Some(GameEvent::Launched));
        let vel = state.ball.vel;
        let pos = state.ball.pos;

        assert_eq!(state.fire(), None);
        assert_eq!(state.ball.vel, vel);
        assert_eq!(state.ball.pos, pos);
        assert_eq!(state.ball.state, BallState::Free);
    }

    #[test]
    fn test_paddle_start_stop() {
        let mut paddle = Paddle::default();
        paddle.start(Direction::Left);
        assert_eq!(paddle.dx, -6.0);
        paddle.start(Direction::Right);
        assert_eq!(paddle.dx, 6.0);
        paddle.stop();
        assert_eq!(paddle.dx, 0.0);
    }

    #[test]
    fn test_paddle_bounds_stop_instead_of_clamp() {
        let mut paddle = Paddle::default();
        paddle.pos.x = 2.0;
        paddle.start(Direction::Left);
        paddle.check_bounds(FIELD_WIDTH);
        assert_eq!(paddle.dx, 0.0);
        assert_eq!(paddle.pos.x, 2.0);

        paddle.pos.x = 538.0;
        paddle.start(Direction::Right);
        paddle.check_bounds(FIELD_WIDTH);
        assert_eq!(paddle.dx, 0.0);

        // Exactly reaching the edge is allowed
        paddle.pos.x = 534.0;
        paddle.start(Direction::Right);
        paddle.check_bounds(FIELD_WIDTH);
        assert_eq!(paddle.dx, 6.0);
    }

    #[test]
    fn test_paddle_carries_docked_ball() {
        let mut paddle = Paddle::default();
        let mut ball = Ball::default();
        paddle.start(Direction::Right);
        paddle.advance(&mut ball);
        assert_eq!(paddle.pos.x, 286.0);
        assert_eq!(ball.pos.x, 326.0);

        // A free ball is left alone
        let mut free = Ball::free(Vec2::new(100.0, 100.0), Vec2::new(0.0, -3.0));
        paddle.advance(&mut free);
        assert_eq!(free.pos.x, 100.0);
    }

    #[test]
    fn test_ball_collide_uses_prospective_position() {
        let block = Rect::new(60.0, 20.0, 60.0, 20.0);
        // Currently two pixels below the block, moving up three
        let ball = Ball::free(Vec2::new(70.0, 42.0), Vec2::new(0.0, -3.0));
        assert!(!intersects(&ball.rect(), &block));
        assert!(ball.collide(&block));
    }

    #[test]
    fn test_bump_block() {
        let mut ball = Ball::free(Vec2::new(70.0, 30.0), Vec2::new(2.0, 3.0));
        let mut block = Block {
            rect: Rect::new(60.0, 20.0, 60.0, 20.0),
            active: true,
        };
        ball.bump_block(&mut block);
        assert_eq!(ball.vel, Vec2::new(2.0, -3.0));
        assert!(!block.active);
    }

    #[test]
    fn test_bump_platform_deflects_by_offset() {
        let paddle = Paddle::default(); // center x = 330
        // Ball center 350, 20px right of paddle center
        let mut ball = Ball::free(Vec2::new(340.0, 282.0), Vec2::new(0.0, 3.0));
        assert!(ball.bump_platform(&paddle));
        assert_eq!(ball.vel.y, -3.0);
        assert!((ball.vel.x - 1.2).abs() < 1e-5);

        // Dead center goes straight up
        let mut ball = Ball::free(Vec2::new(320.0, 282.0), Vec2::new(2.0, 3.0));
        assert!(ball.bump_platform(&paddle));
        assert_eq!(ball.vel.x, 0.0);
    }

    #[test]
    fn test_bump_platform_rising_ball_only_rides() {
        let mut paddle = Paddle::default();
        paddle.start(Direction::Left);
        let mut ball = Ball::free(Vec2::new(340.0, 282.0), Vec2::new(1.0, -3.0));
        assert!(!ball.bump_platform(&paddle));
        assert_eq!(ball.pos.x, 334.0);
        assert_eq!(ball.vel, Vec2::new(1.0, -3.0));
    }

    #[test]
    fn test_bump_sides() {
        let field = Vec2::new(FIELD_WIDTH, FIELD_HEIGHT);

        let mut ball = Ball::free(Vec2::new(617.0, 150.0), Vec2::new(3.0, -3.0));
        let contact = ball.bump_sides(field);
        assert!(contact.wall && !contact.ceiling && !contact.fell);
        assert_eq!(ball.vel.x, -3.0);

        let mut ball = Ball::free(Vec2::new(2.0, 150.0), Vec2::new(-3.0, -3.0));
        assert!(ball.bump_sides(field).wall);
        assert_eq!(ball.vel.x, 3.0);

        let mut ball = Ball::free(Vec2::new(300.0, 3.0), Vec2::new(0.0, -3.0));
        assert!(ball.bump_sides(field).ceiling);
        assert_eq!(ball.vel.y, 3.0);

        // Falling out does not bounce
        let mut ball = Ball::free(Vec2::new(300.0, 359.0), Vec2::new(0.0, 3.0));
        let contact = ball.bump_sides(field);
        assert!(contact.fell);
        assert_eq!(ball.vel.y, 3.0);
    }

    #[test]
    fn test_commands_ignored_after_end() {
        let mut state = GameState::new(3);
        state.end(Outcome::Loss);
        assert_eq!(state.apply_command(PaddleCommand::Move(Direction::Left)), None);
        assert_eq!(state.paddle.dx, 0.0);
        assert_eq!(state.apply_command(PaddleCommand::Fire), None);
        assert!(state.ball.is_docked());
    }

    #[test]
    fn test_outcome_messages() {
        assert_eq!(Outcome::Win.message(), "You Win");
        assert_eq!(Outcome::Loss.message(), "Game Over!");
    }

    #[test]
    #[should_panic(expected = "score out of sync")]
    fn test_invariant_check_trips_on_drift() {
        let mut state = GameState::new(1);
        state.blocks.iter_mut().next().unwrap().active = false;
        state.check_invariants();
    }

    #[test]
    fn test_summary() {
        let state = GameState::new(11);
        let summary = state.summary();
        assert_eq!(summary.seed, 11);
        assert_eq!(summary.total_blocks, 32);
        assert_eq!(summary.outcome, None);
    }
}
