//! Scripted end-to-end episodes exercising the environment's full semantics

use taxiq::taxi::{Action, DEFAULT_STEP_BUDGET, EpisodeOutcome, Observation, TaxiEnv};

fn scripted(observation: Observation) -> TaxiEnv {
    let mut env = TaxiEnv::new(DEFAULT_STEP_BUDGET);
    env.reset_to(observation).unwrap();
    env
}

/// Full delivery: pickup at R (0,0), drive around the walls to G (0,4),
/// drop off. Every move costs -1, the delivery pays +20.
#[test]
fn pickup_navigate_dropoff_accumulates_expected_reward() {
    let mut env = scripted(Observation {
        taxi_row: 0,
        taxi_col: 0,
        passenger: 0,
        destination: 1,
    });

    let mut total_reward = 0.0;
    total_reward += env.step(Action::Pickup).unwrap().reward;
    assert_eq!(env.passenger(), 4);

    // The wall east of column 1 in rows 0-1 forces the detour through row 2.
    let route = [
        Action::Right,
        Action::Down,
        Action::Down,
        Action::Right,
        Action::Right,
        Action::Right,
        Action::Up,
        Action::Up,
    ];
    for action in route {
        let outcome = env.step(action).unwrap();
        assert!(!outcome.terminated);
        total_reward += outcome.reward;
    }
    assert_eq!((env.taxi_row(), env.taxi_col()), (0, 4));

    let last = env.step(Action::Dropoff).unwrap();
    total_reward += last.reward;

    assert!(last.terminated);
    assert_eq!(last.reward, 20.0);
    // -1 pickup, -1 per move, +20 dropoff
    assert_eq!(total_reward, -1.0 - 8.0 + 20.0);
    assert_eq!(env.outcome(), Some(EpisodeOutcome::Solved));
    assert_eq!(env.step_count(), 10);
    assert_eq!(env.last_reward(), 20.0);
}

/// No action sequence can outlast the step budget.
#[test]
fn every_episode_ends_within_the_step_budget() {
    let mut env = scripted(Observation {
        taxi_row: 2,
        taxi_col: 0,
        passenger: 0,
        destination: 1,
    });

    let mut steps = 0;
    loop {
        // Bouncing against the top border never delivers anything.
        let outcome = env.step(Action::Up).unwrap();
        steps += 1;
        if outcome.terminated {
            break;
        }
        assert!(steps < DEFAULT_STEP_BUDGET, "episode ran past the budget");
    }

    assert_eq!(steps, DEFAULT_STEP_BUDGET);
    assert_eq!(env.step_count(), DEFAULT_STEP_BUDGET);
    assert_eq!(env.outcome(), Some(EpisodeOutcome::TimedOut));
}

/// The budget check fires even on an otherwise-successful final step, and
/// the delivery reward survives it.
#[test]
fn delivery_on_the_budget_boundary_keeps_its_reward() {
    let mut env = TaxiEnv::new(2);
    env.reset_to(Observation {
        taxi_row: 0,
        taxi_col: 3,
        passenger: 4,
        destination: 1,
    })
    .unwrap();

    env.step(Action::Right).unwrap();
    let last = env.step(Action::Dropoff).unwrap();

    assert!(last.terminated);
    assert_eq!(last.reward, 20.0);
    assert_eq!(env.outcome(), Some(EpisodeOutcome::Solved));
}

#[test]
fn observation_projection_matches_accessors() {
    let mut env = TaxiEnv::new(DEFAULT_STEP_BUDGET).with_seed(23);
    for _ in 0..100 {
        env.reset();
        let obs = env.observation();
        assert_eq!(obs.taxi_row, env.taxi_row());
        assert_eq!(obs.taxi_col, env.taxi_col());
        assert_eq!(obs.passenger, env.passenger());
        assert_eq!(obs.destination, env.destination());
        assert_ne!(obs.passenger, obs.destination);
    }
}

#[test]
fn invalid_action_indices_are_rejected() {
    for index in 0..6 {
        assert!(Action::from_index(index).is_ok());
    }
    for index in [6, 7, 100] {
        assert!(Action::from_index(index).is_err());
    }
}
