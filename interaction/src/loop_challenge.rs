//! Level 2, loop challenge: multiple-choice questions about loop code, drawn
//! without repetition until the pool runs dry.

use {
    crate::{GameRng, InteractionMode, LevelViewChanged},
    bevy::{platform::collections::HashSet, prelude::*},
    challenges_assets::{LOOP_CHALLENGES, LoopChallenge, OPTION_COUNT, challenge},
    game_config::GameConfig,
    interaction_events::{AnswerRevealed, AnswerSelected, AnswerSubmitted, NextChallengeRequested},
    levels_assets::level_definition,
    progression_events::AddComputationPoints,
    rand::Rng,
    states::GameState,
    system_schedule::GameSchedule,
    wallet::{PlayerLevel, Wallet},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Draw {
    /// Uniform pick among the challenges not yet completed.
    Picked(u32),
    /// Everything was completed; the draw restarts at the first challenge.
    Restarted(u32),
}

/// Draws the next challenge id from `pool`, skipping `completed`.
pub fn draw_challenge(
    pool: &[LoopChallenge],
    completed: &HashSet<u32>,
    rng: &mut impl Rng,
) -> Option<Draw> {
    let remaining: Vec<u32> = pool
        .iter()
        .map(|c| c.id)
        .filter(|id| !completed.contains(id))
        .collect();

    if remaining.is_empty() {
        return pool.first().map(|c| Draw::Restarted(c.id));
    }
    Some(Draw::Picked(remaining[rng.random_range(0..remaining.len())]))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// The current challenge has not been submitted.
    NotReady,
    Next(u32),
    /// The pool was exhausted and restarted at its first challenge.
    Restarted(u32),
    /// The pool was exhausted while the level threshold is already met.
    Idle,
}

/// Player-facing state of the loop challenge view.
#[derive(Resource, Default, Debug, Clone, PartialEq)]
pub struct ChallengeSession {
    pub current: Option<u32>,
    pub selected: Option<usize>,
    pub submitted: bool,
    pub completed: HashSet<u32>,
}

impl ChallengeSession {
    pub fn current_challenge(&self) -> Option<&'static LoopChallenge> {
        self.current.and_then(challenge)
    }

    /// Draws the first challenge of a fresh session.
    pub fn start(&mut self, rng: &mut impl Rng) {
        *self = Self::default();
        self.current =
            draw_challenge(&LOOP_CHALLENGES, &self.completed, rng).map(|draw| match draw {
                Draw::Picked(id) | Draw::Restarted(id) => id,
            });
    }

    /// Highlights an option. Allowed any number of times before submission.
    pub fn select(&mut self, option: usize) -> bool {
        if self.current.is_none() || self.submitted || option >= OPTION_COUNT {
            return false;
        }
        self.selected = Some(option);
        true
    }

    /// Locks in the selection and returns `(challenge id, correct)`.
    pub fn submit(&mut self) -> Option<(u32, bool)> {
        if self.submitted {
            return None;
        }
        let challenge = self.current_challenge()?;
        let option = self.selected?;
        self.submitted = true;
        Some((challenge.id, challenge.is_correct(option)))
    }

    /// Moves past a submitted challenge. When the pool is exhausted the draw
    /// restarts, unless `threshold_reached` says the level is already done.
    pub fn advance(&mut self, rng: &mut impl Rng, threshold_reached: bool) -> AdvanceOutcome {
        let Some(finished) = self.current.filter(|_| self.submitted) else {
            return AdvanceOutcome::NotReady;
        };

        self.completed.insert(finished);
        self.selected = None;
        self.submitted = false;

        match draw_challenge(&LOOP_CHALLENGES, &self.completed, rng) {
            Some(Draw::Picked(id)) => {
                self.current = Some(id);
                AdvanceOutcome::Next(id)
            }
            Some(Draw::Restarted(id)) if !threshold_reached => {
                self.completed.clear();
                self.current = Some(id);
                AdvanceOutcome::Restarted(id)
            }
            _ => {
                self.current = None;
                AdvanceOutcome::Idle
            }
        }
    }
}

/// Rewards of correct answers waiting out the reveal delay.
#[derive(Resource, Default, Debug)]
pub struct PendingRewards {
    pub timers: Vec<(u32, Timer)>,
}

pub struct LoopChallengePlugin;

impl Plugin for LoopChallengePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ChallengeSession>()
            .init_resource::<PendingRewards>()
            .add_systems(
                Update,
                pay_revealed_rewards
                    .in_set(GameSchedule::TickTimers)
                    .run_if(in_state(GameState::Running)),
            )
            .add_observer(on_level_view_changed)
            .add_observer(on_answer_selected)
            .add_observer(on_answer_submitted)
            .add_observer(on_next_challenge_requested)
            .add_systems(OnExit(GameState::Running), clean_up_pending_rewards);
    }
}

fn on_level_view_changed(
    trigger: On<LevelViewChanged>,
    mut session: ResMut<ChallengeSession>,
    mut rng: ResMut<GameRng>,
) {
    let event = trigger.event();
    if event.current == InteractionMode::LoopChallenge {
        session.start(&mut rng.0);
        info!("Loop challenge started with {:?}", session.current);
    } else if event.previous == InteractionMode::LoopChallenge {
        *session = ChallengeSession::default();
    }
}

fn on_answer_selected(trigger: On<AnswerSelected>, mut session: ResMut<ChallengeSession>) {
    let option = trigger.event().option;
    if !session.select(option) {
        debug!("Ignoring selection of option {}", option);
    }
}

fn on_answer_submitted(
    _trigger: On<AnswerSubmitted>,
    config: Res<GameConfig>,
    mut session: ResMut<ChallengeSession>,
    mut pending: ResMut<PendingRewards>,
    mut commands: Commands,
) {
    let Some((challenge_id, correct)) = session.submit() else {
        debug!("Nothing to submit");
        return;
    };

    info!(challenge_id, correct, "Answer submitted");
    if correct {
        pending
            .timers
            .push((challenge_id, Timer::new(config.reveal_delay, TimerMode::Once)));
    }
    commands.trigger(AnswerRevealed {
        challenge_id,
        correct,
    });
}

fn on_next_challenge_requested(
    _trigger: On<NextChallengeRequested>,
    wallet: Res<Wallet>,
    level: Res<PlayerLevel>,
    mut session: ResMut<ChallengeSession>,
    mut rng: ResMut<GameRng>,
) {
    let threshold_reached =
        level_definition(level.0).is_some_and(|def| wallet.cp >= def.required_cp);

    match session.advance(&mut rng.0, threshold_reached) {
        AdvanceOutcome::NotReady => debug!("Current challenge not submitted yet"),
        AdvanceOutcome::Next(id) => debug!("Next challenge {}", id),
        AdvanceOutcome::Restarted(id) => info!("Challenge pool exhausted, restarting at {}", id),
        AdvanceOutcome::Idle => info!("Challenge pool exhausted, level threshold met"),
    }
}

/// Credits correct answers once their reveal delay has passed.
fn pay_revealed_rewards(
    time: Res<Time>,
    config: Res<GameConfig>,
    mut pending: ResMut<PendingRewards>,
    mut commands: Commands,
) {
    pending.timers.retain_mut(|(challenge_id, timer)| {
        if timer.tick(time.delta()).is_finished() {
            debug!("Crediting challenge {}", challenge_id);
            commands.trigger(AddComputationPoints::new(config.rewards.correct_answer));
            false
        } else {
            true
        }
    });
}

fn clean_up_pending_rewards(mut pending: ResMut<PendingRewards>) {
    pending.timers.clear();
}

#[cfg(test)]
mod tests {
    use {super::*, rand::SeedableRng, rand::rngs::StdRng};

    fn rng() -> StdRng {
        StdRng::seed_from_u64(11)
    }

    fn submitted_session(id: u32) -> ChallengeSession {
        ChallengeSession {
            current: Some(id),
            selected: Some(0),
            submitted: true,
            completed: HashSet::default(),
        }
    }

    #[test]
    fn test_draw_excludes_completed() {
        let mut rng = rng();
        let completed: HashSet<u32> = [1, 2, 3, 4, 5].into_iter().collect();
        for _ in 0..20 {
            assert_eq!(
                draw_challenge(&LOOP_CHALLENGES, &completed, &mut rng),
                Some(Draw::Picked(6))
            );
        }
    }

    #[test]
    fn test_draw_restarts_at_first_when_exhausted() {
        let completed: HashSet<u32> = LOOP_CHALLENGES.iter().map(|c| c.id).collect();
        assert_eq!(
            draw_challenge(&LOOP_CHALLENGES, &completed, &mut rng()),
            Some(Draw::Restarted(1))
        );
    }

    #[test]
    fn test_draw_from_empty_pool() {
        assert_eq!(draw_challenge(&[], &HashSet::default(), &mut rng()), None);
    }

    #[test]
    fn test_draw_is_reproducible_with_seed() {
        let completed = HashSet::default();
        let a = draw_challenge(&LOOP_CHALLENGES, &completed, &mut rng());
        let b = draw_challenge(&LOOP_CHALLENGES, &completed, &mut rng());
        assert_eq!(a, b);
    }

    #[test]
    fn test_selection_is_reversible_until_submit() {
        let mut session = ChallengeSession::default();
        session.start(&mut rng());
        assert!(session.select(0));
        assert!(session.select(3));
        assert_eq!(session.selected, Some(3));
        assert!(!session.select(4));

        assert!(session.submit().is_some());
        assert!(!session.select(1));
        assert_eq!(session.selected, Some(3));
        assert!(session.submit().is_none());
    }

    #[test]
    fn test_submit_requires_selection() {
        let mut session = ChallengeSession::default();
        session.start(&mut rng());
        assert!(session.submit().is_none());
        assert!(!session.submitted);
    }

    #[test]
    fn test_submit_reports_correctness() {
        let mut session = ChallengeSession {
            current: Some(3),
            ..default()
        };
        session.select(1);
        assert_eq!(session.submit(), Some((3, true)));

        let mut session = ChallengeSession {
            current: Some(3),
            ..default()
        };
        session.select(0);
        assert_eq!(session.submit(), Some((3, false)));
    }

    #[test]
    fn test_advance_requires_submission() {
        let mut session = ChallengeSession {
            current: Some(2),
            selected: Some(1),
            ..default()
        };
        assert_eq!(session.advance(&mut rng(), false), AdvanceOutcome::NotReady);
        assert!(session.completed.is_empty());
    }

    #[test]
    fn test_advance_marks_completed_and_draws_fresh() {
        let mut session = submitted_session(4);
        let outcome = session.advance(&mut rng(), false);
        let AdvanceOutcome::Next(next) = outcome else {
            panic!("expected a fresh challenge, got {outcome:?}");
        };
        assert_ne!(next, 4);
        assert!(session.completed.contains(&4));
        assert_eq!(session.selected, None);
        assert!(!session.submitted);
    }

    #[test]
    fn test_advance_restarts_when_pool_exhausted() {
        let mut session = submitted_session(6);
        session.completed = [1, 2, 3, 4, 5].into_iter().collect();
        assert_eq!(session.advance(&mut rng(), false), AdvanceOutcome::Restarted(1));
        assert!(session.completed.is_empty());
        assert_eq!(session.current, Some(1));
    }

    #[test]
    fn test_advance_goes_idle_when_threshold_met() {
        let mut session = submitted_session(6);
        session.completed = [1, 2, 3, 4, 5].into_iter().collect();
        assert_eq!(session.advance(&mut rng(), true), AdvanceOutcome::Idle);
        assert_eq!(session.current, None);
        assert_eq!(session.completed.len(), 6);
    }
}
