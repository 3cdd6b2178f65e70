use std::fmt;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use super::{
    action::Action,
    config::LevelConfig,
    error::{GameError, GameResult},
    field::Field,
    snake::Snake,
    state::{CellType, Observation, Point},
};
use crate::metrics::{EpisodeStatistics, TerminationReason};

/// Result of `new_episode()` or one `timestep()`
#[derive(Debug, Clone, PartialEq)]
pub struct TimestepResult {
    /// Snapshot of the grid after the step
    pub observation: Observation,
    /// Reward earned by this step
    pub reward: f32,
    /// Whether the episode ended on this step
    pub is_episode_end: bool,
}

impl fmt::Display for TimestepResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.observation)?;
        write!(f, "R = {}   end={}", self.reward, self.is_episode_end)
    }
}

/// Lifecycle of the environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeState {
    /// No episode has been started yet
    Idle,
    Running,
    Ended,
}

/// Field, snake and fruit of the episode in progress
#[derive(Debug, Clone)]
struct Episode {
    field: Field,
    snake: Snake,
    fruit: Point,
}

/// The Snake simulation engine
///
/// Owns the level definition, its random source, the statistics and, once
/// `new_episode()` has been called, the field and snake of the current game.
///
/// # Example
///
/// ```rust
/// use snake_env::game::{Action, Environment, LevelConfig};
///
/// let mut env = Environment::with_seed(LevelConfig::default(), 42);
/// let first = env.new_episode()?;
/// assert_eq!(first.reward, 0.0);
///
/// env.choose_action(Action::TurnRight);
/// let result = env.timestep()?;
/// assert!(!result.is_episode_end);
/// assert_eq!(env.timestep_index(), 1);
/// # Ok::<(), snake_env::game::GameError>(())
/// ```
#[derive(Debug)]
pub struct Environment {
    level: LevelConfig,
    rng: ChaCha8Rng,
    stats: EpisodeStatistics,
    state: EpisodeState,
    episode: Option<Episode>,
    pending_action: Action,
    timestep_index: u32,
}

impl Environment {
    /// Create an environment whose fruit placement is seeded from OS entropy
    pub fn new(level: LevelConfig) -> Self {
        Self::with_rng(level, ChaCha8Rng::from_entropy())
    }

    /// Create an environment with a reproducible fruit sequence
    pub fn with_seed(level: LevelConfig, seed: u64) -> Self {
        Self::with_rng(level, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(level: LevelConfig, rng: ChaCha8Rng) -> Self {
        if level.rewards.timestep > 0.0 {
            warn!(
                timestep_reward = level.rewards.timestep,
                "Positive timestep reward rewards stalling"
            );
        }

        Self {
            level,
            rng,
            stats: EpisodeStatistics::new(),
            state: EpisodeState::Idle,
            episode: None,
            pending_action: Action::MaintainDirection,
            timestep_index: 0,
        }
    }

    /// Reseed the fruit placement random source
    pub fn seed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    pub fn level(&self) -> &LevelConfig {
        &self.level
    }

    pub fn state(&self) -> EpisodeState {
        self.state
    }

    pub fn stats(&self) -> &EpisodeStatistics {
        &self.stats
    }

    /// Timesteps taken in the current episode
    pub fn timestep_index(&self) -> u32 {
        self.timestep_index
    }

    pub fn max_step_limit(&self) -> u32 {
        self.level.max_step_limit
    }

    /// The snake of the current episode, if one has started
    pub fn snake(&self) -> Option<&Snake> {
        self.episode.as_ref().map(|e| &e.snake)
    }

    /// Position of the fruit, if an episode has started
    pub fn fruit(&self) -> Option<Point> {
        self.episode.as_ref().map(|e| e.fruit)
    }

    /// Number of actions in the default action set
    pub fn num_actions(&self) -> usize {
        Action::CORE.len()
    }

    /// Start a fresh episode
    ///
    /// Rebuilds the field from the level map, places a new snake on the head
    /// marker, drops one fruit and resets the statistics. A fruit drawn on the
    /// map (the first `O`, row by row) is used instead of a random one.
    ///
    /// Fails with `InvalidConfig` when the level does not pass
    /// [`LevelConfig::validate`].
    pub fn new_episode(&mut self) -> GameResult<TimestepResult> {
        self.level
            .validate()
            .map_err(|reason| GameError::InvalidConfig { reason })?;

        let mut field = Field::build(&self.level.field)?;
        let head = field.find_snake_head()?;
        let snake = Snake::new(head, self.level.initial_snake_length);

        let fits = snake
            .body()
            .skip(1)
            .all(|p| field.contains(p) && field.read(p) != CellType::Wall);
        if !fits {
            return Err(GameError::SnakeDoesNotFit {
                length: snake.len(),
            });
        }

        field.place_snake(&snake);

        // the first fruit on the map is the one in play; extra ones are cleared
        let map_fruits = field.find_all(CellType::Fruit);
        let fruit = match map_fruits.first() {
            Some(&fruit) => fruit,
            None => {
                let fruit = field.random_empty_cell(&mut self.rng)?;
                field.write(fruit, CellType::Fruit);
                fruit
            }
        };
        for &extra in map_fruits.iter().skip(1) {
            field.write(extra, CellType::Empty);
        }

        self.stats.reset();
        self.timestep_index = 0;
        self.pending_action = Action::MaintainDirection;
        self.state = EpisodeState::Running;
        self.episode = Some(Episode {
            field,
            snake,
            fruit,
        });

        debug!(head = ?head, fruit = ?fruit, "Episode started");

        Ok(TimestepResult {
            observation: self.observation()?,
            reward: 0.0,
            is_episode_end: false,
        })
    }

    /// Record the action for the next timestep
    ///
    /// Turns take effect on the snake's heading immediately; the move itself
    /// happens in `timestep()`. Ignored when no episode is running.
    pub fn choose_action(&mut self, action: Action) {
        if self.state != EpisodeState::Running {
            return;
        }
        let Some(episode) = self.episode.as_mut() else {
            return;
        };

        self.pending_action = action;
        match action {
            Action::MaintainDirection => {}
            Action::TurnLeft => episode.snake.turn_left(),
            Action::TurnRight => episode.snake.turn_right(),
            Action::ReverseDirection => {
                let old_head = episode.snake.head();
                episode.snake.reverse_direction();
                episode
                    .field
                    .reverse_footprint(old_head, episode.snake.head());
            }
        }
    }

    /// Advance the game by one tick
    ///
    /// Once the episode has ended this returns the final observation again
    /// without changing anything. If the snake eats with no empty cell left
    /// for the next fruit, `NoEmptyCellsAvailable` is returned and the episode
    /// stays as it was before the call.
    pub fn timestep(&mut self) -> GameResult<TimestepResult> {
        let episode = self.episode.as_mut().ok_or(GameError::EpisodeNotStarted)?;
        if self.state == EpisodeState::Ended {
            return Ok(TimestepResult {
                observation: episode.field.observation(),
                reward: 0.0,
                is_episode_end: true,
            });
        }

        // pick the replacement fruit before anything moves so a full board
        // leaves the episode untouched
        let eats_fruit = episode.snake.peek_next_move() == episode.fruit;
        let next_fruit = if eats_fruit {
            Some(episode.field.random_empty_cell(&mut self.rng)?)
        } else {
            None
        };

        self.timestep_index += 1;
        let mut reward;
        let mut is_episode_end = false;

        let old_head = episode.snake.head();
        let old_tail = episode.snake.tail();

        let vacated_tail = if let Some(fruit) = next_fruit {
            episode.snake.grow();
            episode.field.write(fruit, CellType::Fruit);
            episode.fruit = fruit;
            self.stats.record_fruit();
            reward = self.level.rewards.ate_fruit * episode.snake.len() as f32;
            None
        } else {
            episode.snake.move_forward();
            reward = self.level.rewards.timestep;
            Some(old_tail)
        };

        let new_head = episode.snake.head();
        episode
            .field
            .update_footprint(old_head, vacated_tail, new_head);

        let death = match episode.field.read(new_head) {
            CellType::Wall => Some(TerminationReason::HitWall),
            CellType::SnakeBody => Some(TerminationReason::HitOwnBody),
            _ => None,
        };
        if let Some(reason) = death {
            episode.field.write(new_head, CellType::SnakeHead);
            is_episode_end = true;
            reward = self.level.rewards.died;
            self.stats.record_termination(reason);
        }

        if self.timestep_index >= self.level.max_step_limit && !is_episode_end {
            is_episode_end = true;
            self.stats
                .record_termination(TerminationReason::TimestepLimitExceeded);
        }

        self.stats
            .record_timestep(self.timestep_index, self.pending_action, reward);
        self.pending_action = Action::MaintainDirection;

        if is_episode_end {
            self.state = EpisodeState::Ended;
            debug!(
                timesteps = self.stats.timesteps_survived(),
                fruits = self.stats.fruits_eaten(),
                reward = self.stats.sum_episode_rewards(),
                reason = ?self.stats.termination_reason(),
                "Episode ended"
            );
        }

        Ok(TimestepResult {
            observation: episode.field.observation(),
            reward,
            is_episode_end,
        })
    }

    /// Deep copy of the current grid
    pub fn observation(&self) -> GameResult<Observation> {
        self.episode
            .as_ref()
            .map(|e| e.field.observation())
            .ok_or(GameError::EpisodeNotStarted)
    }

    /// Move the fruit to `point`, which must currently be empty
    #[cfg(test)]
    pub(crate) fn relocate_fruit(&mut self, point: Point) {
        let episode = self.episode.as_mut().expect("episode in progress");
        episode.field.write(episode.fruit, CellType::Empty);
        assert_eq!(episode.field.read(point), CellType::Empty);
        episode.field.write(point, CellType::Fruit);
        episode.fruit = point;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;

    /// Fruit parking spot far away from the start and the 2x2 loop
    const FAR_CORNER: Point = Point::new(1, 8);

    fn blank_env(seed: u64) -> Environment {
        Environment::with_seed(LevelConfig::default(), seed)
    }

    fn assert_footprint_matches_snake(env: &Environment) {
        let obs = env.observation().unwrap();
        let snake = env.snake().unwrap();
        assert_eq!(obs.count(CellType::SnakeHead), 1);
        assert_eq!(obs.get(snake.head()), Some(CellType::SnakeHead));
        assert_eq!(
            obs.count(CellType::SnakeHead) + obs.count(CellType::SnakeBody),
            snake.len()
        );
        for segment in snake.body().skip(1) {
            assert_eq!(obs.get(segment), Some(CellType::SnakeBody));
        }
        assert_eq!(obs.count(CellType::Fruit), 1);
        assert_eq!(obs.get(env.fruit().unwrap()), Some(CellType::Fruit));
    }

    #[test]
    fn test_initial_state_is_consistent() {
        let mut env = blank_env(1);
        assert_eq!(env.state(), EpisodeState::Idle);

        let result = env.new_episode().unwrap();
        assert_eq!(result.reward, 0.0);
        assert!(!result.is_episode_end);

        assert_eq!(env.state(), EpisodeState::Running);
        assert_eq!(env.snake().unwrap().head(), Point::new(5, 4));
        assert_eq!(env.snake().unwrap().direction(), Direction::North);
        assert_eq!(env.timestep_index(), 0);

        let fruit = env.fruit().unwrap();
        assert!(env.snake().unwrap().body().all(|p| p != fruit));
        assert_eq!(result.observation.get(fruit), Some(CellType::Fruit));
        assert_footprint_matches_snake(&env);
    }

    #[test]
    fn test_idle_run_reports_correct_timesteps() {
        let mut env = blank_env(228);
        env.new_episode().unwrap();
        env.relocate_fruit(Point::new(5, 2));

        env.choose_action(Action::MaintainDirection);
        let rewards: Vec<(f32, bool)> = (0..4)
            .map(|step| {
                let result = env.timestep().unwrap();
                if step == 1 {
                    // keep the replacement fruit off the path north
                    env.relocate_fruit(FAR_CORNER);
                }
                (result.reward, result.is_episode_end)
            })
            .collect();

        assert_eq!(
            rewards,
            vec![(0.0, false), (4.0, false), (0.0, false), (-1.0, true)]
        );

        let stats = env.stats();
        assert_eq!(stats.sum_episode_rewards(), 3.0);
        assert_eq!(stats.timesteps_survived(), 4);
        assert_eq!(stats.fruits_eaten(), 1);
        assert_eq!(stats.termination_reason(), Some(TerminationReason::HitWall));
        assert_eq!(stats.action_count(Action::MaintainDirection), 4);
        assert_eq!(stats.action_count(Action::TurnLeft), 0);
        assert_eq!(stats.action_count(Action::TurnRight), 0);
        assert_eq!(env.state(), EpisodeState::Ended);
    }

    #[test]
    fn test_bite_own_body_reports_game_over() {
        let mut env = blank_env(143);
        env.new_episode().unwrap();
        env.relocate_fruit(Point::new(5, 3));

        let first = env.timestep().unwrap();
        assert_eq!(first.reward, 4.0);
        env.relocate_fruit(Point::new(5, 2));

        let second = env.timestep().unwrap();
        assert_eq!(second.reward, 5.0);
        assert!(!second.is_episode_end);
        env.relocate_fruit(FAR_CORNER);
        assert_eq!(env.snake().unwrap().len(), 5);

        let mut last = None;
        for _ in 0..3 {
            env.choose_action(Action::TurnRight);
            last = Some(env.timestep().unwrap());
        }
        let last = last.unwrap();
        assert_eq!(last.reward, -1.0);
        assert!(last.is_episode_end);

        let stats = env.stats();
        assert_eq!(stats.sum_episode_rewards(), 8.0);
        assert_eq!(stats.timesteps_survived(), 5);
        assert_eq!(stats.fruits_eaten(), 2);
        assert_eq!(
            stats.termination_reason(),
            Some(TerminationReason::HitOwnBody)
        );
        assert_eq!(stats.action_count(Action::MaintainDirection), 2);
        assert_eq!(stats.action_count(Action::TurnRight), 3);

        // the head is repaired onto the bitten cell
        let obs = last.observation;
        assert_eq!(obs.get(Point::new(5, 3)), Some(CellType::SnakeHead));
        assert_eq!(obs.count(CellType::SnakeHead), 1);
    }

    #[test]
    fn test_wall_death_repairs_head() {
        let mut env = blank_env(5);
        env.new_episode().unwrap();
        env.relocate_fruit(FAR_CORNER);

        let mut result = env.timestep().unwrap();
        while !result.is_episode_end {
            result = env.timestep().unwrap();
        }

        assert_eq!(result.observation.get(Point::new(5, 0)), Some(CellType::SnakeHead));
        assert_eq!(result.observation.count(CellType::SnakeHead), 1);
        assert_eq!(env.stats().timesteps_survived(), 4);
    }

    #[test]
    fn test_chasing_own_tail_survives() {
        let mut env = blank_env(9);
        env.new_episode().unwrap();
        env.relocate_fruit(FAR_CORNER);

        // four right turns bring the head back onto the cell its tail just left
        for _ in 0..8 {
            env.choose_action(Action::TurnRight);
            let result = env.timestep().unwrap();
            assert!(!result.is_episode_end);
            assert_footprint_matches_snake(&env);
        }
        assert_eq!(env.snake().unwrap().head(), Point::new(5, 4));
        assert_eq!(env.stats().termination_reason(), None);
    }

    #[test]
    fn test_growth_reward_scales_with_length() {
        let mut level = LevelConfig::default();
        level.rewards.ate_fruit = 2.5;
        level.initial_snake_length = 4;
        let mut env = Environment::with_seed(level, 3);
        env.new_episode().unwrap();
        env.relocate_fruit(Point::new(5, 3));

        let tail_before = env.snake().unwrap().tail();
        let result = env.timestep().unwrap();

        assert_eq!(result.reward, 2.5 * 5.0);
        assert_eq!(env.snake().unwrap().len(), 5);
        assert_eq!(env.snake().unwrap().tail(), tail_before);
        assert_eq!(result.observation.get(tail_before), Some(CellType::SnakeBody));
        assert_eq!(env.stats().fruits_eaten(), 1);
        assert_ne!(env.fruit().unwrap(), Point::new(5, 3));
        assert_footprint_matches_snake(&env);
    }

    #[test]
    fn test_timestep_reward_applies_to_plain_moves() {
        let mut level = LevelConfig::default();
        level.rewards.timestep = -0.25;
        let mut env = Environment::with_seed(level, 3);
        env.new_episode().unwrap();
        env.relocate_fruit(FAR_CORNER);

        let result = env.timestep().unwrap();
        assert_eq!(result.reward, -0.25);
    }

    #[test]
    fn test_timestep_limit_exceeded() {
        let mut env = blank_env(11);
        env.new_episode().unwrap();
        env.relocate_fruit(FAR_CORNER);
        let limit = env.max_step_limit();

        for _ in 0..limit - 1 {
            env.choose_action(Action::TurnRight);
            let result = env.timestep().unwrap();
            assert!(!result.is_episode_end);
        }

        env.choose_action(Action::TurnRight);
        let result = env.timestep().unwrap();
        assert!(result.is_episode_end);
        assert_eq!(env.stats().timesteps_survived(), limit);
        assert_eq!(
            env.stats().termination_reason(),
            Some(TerminationReason::TimestepLimitExceeded)
        );
        assert_eq!(env.stats().action_count(Action::TurnRight), limit);
    }

    #[test]
    fn test_death_takes_priority_over_step_limit() {
        let mut level = LevelConfig::default();
        level.max_step_limit = 4;
        let mut env = Environment::with_seed(level, 2);
        env.new_episode().unwrap();
        env.relocate_fruit(FAR_CORNER);

        for _ in 0..3 {
            assert!(!env.timestep().unwrap().is_episode_end);
        }
        let result = env.timestep().unwrap();
        assert!(result.is_episode_end);
        assert_eq!(result.reward, -1.0);
        assert_eq!(
            env.stats().termination_reason(),
            Some(TerminationReason::HitWall)
        );
    }

    #[test]
    fn test_new_episode_resets_previous_state() {
        let mut env = blank_env(17);
        env.new_episode().unwrap();
        env.relocate_fruit(FAR_CORNER);

        for _ in 0..env.max_step_limit() - 1 {
            env.choose_action(Action::TurnRight);
            env.timestep().unwrap();
        }
        let result = env.timestep().unwrap();
        assert!(result.is_episode_end);
        assert_eq!(env.stats().timesteps_survived(), env.max_step_limit());

        env.new_episode().unwrap();
        assert_eq!(env.snake().unwrap().head(), Point::new(5, 4));
        assert_eq!(env.timestep_index(), 0);
        assert!(env.fruit().is_some());

        let stats = env.stats();
        assert_eq!(stats.sum_episode_rewards(), 0.0);
        assert_eq!(stats.fruits_eaten(), 0);
        assert_eq!(stats.timesteps_survived(), 0);
        assert_eq!(stats.termination_reason(), None);
        assert!(Action::ALL.iter().all(|&a| stats.action_count(a) == 0));
    }

    #[test]
    fn test_timestep_after_end_changes_nothing() {
        let mut env = blank_env(5);
        env.new_episode().unwrap();
        env.relocate_fruit(FAR_CORNER);
        let mut result = env.timestep().unwrap();
        while !result.is_episode_end {
            result = env.timestep().unwrap();
        }
        let stats_before = env.stats().clone();

        let again = env.timestep().unwrap();
        assert!(again.is_episode_end);
        assert_eq!(again.reward, 0.0);
        assert_eq!(again.observation, result.observation);
        assert_eq!(env.stats(), &stats_before);
        assert_eq!(env.timestep_index(), 4);
    }

    #[test]
    fn test_timestep_before_first_episode_fails() {
        let mut env = blank_env(0);
        assert_eq!(env.timestep().unwrap_err(), GameError::EpisodeNotStarted);
        assert_eq!(env.observation().unwrap_err(), GameError::EpisodeNotStarted);

        env.choose_action(Action::TurnLeft);
        assert!(env.snake().is_none());
    }

    #[test]
    fn test_observation_is_a_copy() {
        let mut env = blank_env(21);
        let start = env.new_episode().unwrap();
        env.relocate_fruit(FAR_CORNER);
        let before = env.observation().unwrap();

        env.timestep().unwrap();

        assert_eq!(env.observation().unwrap(), env.observation().unwrap());
        assert_ne!(env.observation().unwrap(), before);
        assert_eq!(before.get(Point::new(5, 4)), Some(CellType::SnakeHead));
        assert_eq!(start.observation.get(Point::new(5, 4)), Some(CellType::SnakeHead));
    }

    #[test]
    fn test_turns_apply_before_next_move() {
        let mut env = blank_env(4);
        env.new_episode().unwrap();
        env.relocate_fruit(FAR_CORNER);

        env.choose_action(Action::TurnLeft);
        assert_eq!(env.snake().unwrap().direction(), Direction::West);
        assert_eq!(env.snake().unwrap().head(), Point::new(5, 4));

        env.timestep().unwrap();
        assert_eq!(env.snake().unwrap().head(), Point::new(4, 4));

        // the pending action resets, so the heading stays put
        env.timestep().unwrap();
        assert_eq!(env.snake().unwrap().head(), Point::new(3, 4));
        assert_eq!(env.stats().action_count(Action::TurnLeft), 1);
        assert_eq!(env.stats().action_count(Action::MaintainDirection), 1);
    }

    #[test]
    fn test_reverse_direction_keeps_footprint() {
        let mut env = blank_env(8);
        env.new_episode().unwrap();
        env.relocate_fruit(FAR_CORNER);

        env.choose_action(Action::ReverseDirection);
        assert_eq!(env.snake().unwrap().head(), Point::new(5, 6));
        assert_footprint_matches_snake(&env);

        let result = env.timestep().unwrap();
        assert!(!result.is_episode_end);
        assert_eq!(env.snake().unwrap().head(), Point::new(5, 7));
        assert_eq!(env.stats().action_count(Action::ReverseDirection), 1);
        assert_footprint_matches_snake(&env);
    }

    #[test]
    fn test_same_seed_same_fruit_trajectory() {
        let run = |seed| {
            let mut env = blank_env(seed);
            env.new_episode().unwrap();
            let mut fruits = vec![env.fruit().unwrap()];
            for _ in 0..50 {
                env.choose_action(Action::TurnRight);
                if env.timestep().unwrap().is_episode_end {
                    break;
                }
                fruits.push(env.fruit().unwrap());
            }
            fruits
        };
        assert_eq!(run(99), run(99));
    }

    #[test]
    fn test_reseeding_restarts_fruit_sequence() {
        let mut env = blank_env(1);
        env.seed(55);
        env.new_episode().unwrap();
        let first = env.fruit();

        env.seed(55);
        env.new_episode().unwrap();
        assert_eq!(env.fruit(), first);
    }

    #[test]
    fn test_level_errors_surface_at_new_episode() {
        let mut level = LevelConfig::default();
        level.field = vec!["#####".into(), "#...#".into(), "#####".into()];
        let mut env = Environment::with_seed(level, 0);
        assert_eq!(env.new_episode().unwrap_err(), GameError::NoSnakeOnLevel);
        assert_eq!(env.state(), EpisodeState::Idle);

        let mut level = LevelConfig::default();
        level.field = vec!["###".into(), "#S#".into(), "#.#".into(), "###".into()];
        let mut env = Environment::with_seed(level, 0);
        assert_eq!(
            env.new_episode().unwrap_err(),
            GameError::SnakeDoesNotFit { length: 3 }
        );

        let mut level = LevelConfig::default();
        level.field = vec!["#?#".into()];
        let mut env = Environment::with_seed(level, 0);
        assert!(matches!(
            env.new_episode(),
            Err(GameError::InvalidLevelSymbol { symbol: '?', .. })
        ));
    }

    #[test]
    fn test_no_room_for_fruit() {
        let mut level = LevelConfig::default();
        level.initial_snake_length = 1;
        level.field = vec!["###".into(), "#S#".into(), "###".into()];
        let mut env = Environment::with_seed(level, 0);
        assert_eq!(
            env.new_episode().unwrap_err(),
            GameError::NoEmptyCellsAvailable
        );

        let mut level = LevelConfig::default();
        level.initial_snake_length = 1;
        level.field = vec!["####".into(), "#S.#".into(), "####".into()];
        let mut env = Environment::with_seed(level, 0);
        env.new_episode().unwrap();
        assert_eq!(env.fruit(), Some(Point::new(2, 1)));

        env.choose_action(Action::TurnRight);
        assert_eq!(env.timestep().unwrap_err(), GameError::NoEmptyCellsAvailable);
    }

    #[test]
    fn test_full_board_leaves_episode_untouched() {
        let mut level = LevelConfig::default();
        level.initial_snake_length = 1;
        level.field = vec!["#####".into(), "#S..#".into(), "#####".into()];
        let mut env = Environment::with_seed(level, 1);
        env.new_episode().unwrap();
        env.relocate_fruit(Point::new(2, 1));

        env.choose_action(Action::TurnRight);
        let first = env.timestep().unwrap();
        assert_eq!(first.reward, 2.0);
        assert_eq!(env.fruit(), Some(Point::new(3, 1)));

        for _ in 0..2 {
            assert_eq!(env.timestep().unwrap_err(), GameError::NoEmptyCellsAvailable);

            let obs = env.observation().unwrap();
            assert_eq!(obs.to_string(), "#####\n#sSO#\n#####");
            assert_eq!(obs.count(CellType::SnakeHead), 1);
            assert_eq!(env.state(), EpisodeState::Running);
            assert_eq!(env.timestep_index(), 1);
            assert_eq!(env.snake().unwrap().len(), 2);
            assert_eq!(env.snake().unwrap().head(), Point::new(2, 1));
            assert_eq!(env.fruit(), Some(Point::new(3, 1)));
            assert_eq!(env.stats().timesteps_survived(), 1);
            assert_eq!(env.stats().fruits_eaten(), 1);
        }
    }

    #[test]
    fn test_reverse_then_grow_keeps_single_head() {
        let mut env = blank_env(6);
        env.new_episode().unwrap();

        env.choose_action(Action::ReverseDirection);
        env.relocate_fruit(Point::new(5, 7));
        let result = env.timestep().unwrap();

        assert_eq!(result.reward, 4.0);
        assert_eq!(env.snake().unwrap().head(), Point::new(5, 7));
        assert_eq!(env.snake().unwrap().tail(), Point::new(5, 4));
        assert_footprint_matches_snake(&env);
    }

    #[test]
    fn test_invalid_config_fails_at_new_episode() {
        let mut level = LevelConfig::default();
        level.max_step_limit = 0;
        let mut env = Environment::with_seed(level, 0);
        assert!(matches!(
            env.new_episode(),
            Err(GameError::InvalidConfig { .. })
        ));
        assert_eq!(env.state(), EpisodeState::Idle);

        let mut level = LevelConfig::default();
        level.initial_snake_length = 0;
        let mut env = Environment::with_seed(level, 0);
        let err = env.new_episode().unwrap_err();
        assert!(err.to_string().contains("initial_snake_length"));
    }

    #[test]
    fn test_fruit_on_map_is_the_one_in_play() {
        let mut level = LevelConfig::default();
        level.field = vec![
            "#####".into(),
            "#.S.#".into(),
            "#...#".into(),
            "#O.O#".into(),
            "#####".into(),
        ];
        let mut env = Environment::with_seed(level, 3);
        let start = env.new_episode().unwrap();

        assert_eq!(env.fruit(), Some(Point::new(1, 3)));
        assert_eq!(start.observation.positions_of(CellType::Fruit), [Point::new(1, 3)]);
        assert_eq!(start.observation.get(Point::new(3, 3)), Some(CellType::Empty));

        env.choose_action(Action::TurnLeft);
        env.timestep().unwrap();
        env.choose_action(Action::TurnLeft);
        env.timestep().unwrap();
        let result = env.timestep().unwrap();

        assert_eq!(result.reward, 4.0);
        assert_eq!(env.stats().fruits_eaten(), 1);
        assert_eq!(env.snake().unwrap().len(), 4);
    }

    #[test]
    fn test_timestep_result_display() {
        let mut level = LevelConfig::default();
        level.initial_snake_length = 1;
        level.field = vec!["####".into(), "#S.#".into(), "####".into()];
        let mut env = Environment::with_seed(level, 0);
        let result = env.new_episode().unwrap();

        assert_eq!(result.to_string(), "####\n#SO#\n####\nR = 0   end=false");
    }
}
