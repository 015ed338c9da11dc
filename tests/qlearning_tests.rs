//! Q-learning integration tests.

use proptest::prelude::*;

use rust_gridsearch::core::PlayerId;
use rust_gridsearch::games::connect::{Board, ConnectGame};
use rust_gridsearch::qlearn::{QLearningAgent, QLearningConfig, QTableSnapshot};
use rust_gridsearch::rules::Game;
use rust_gridsearch::Error;

fn agent(seed: u64) -> QLearningAgent<ConnectGame> {
    let game = ConnectGame::new(2, 5, 4).unwrap();
    QLearningAgent::new(game, PlayerId::FIRST, QLearningConfig::default().with_seed(seed)).unwrap()
}

#[test]
fn test_first_update_is_alpha_times_reward() {
    let mut agent = agent(1);
    let state = agent.game().initial_state();

    let value = agent.update_q(&state, &2, 10.0);

    assert_eq!(value, 0.5 * 10.0);
    assert_eq!(agent.visit_count(&state, &2), 1);
}

#[test]
fn test_step_shrinks_with_visits() {
    let mut agent = agent(1);
    let state = agent.game().initial_state();

    let first = agent.update_q(&state, &0, -1.0);
    let second = agent.update_q(&state, &0, -1.0);

    // First: 0.5 * (-1 + 0.9 * 0). Max includes the fresh 0 entry only.
    assert_eq!(first, -0.5);
    // Second: -0.5 + 0.25 * (-1 + 0.9 * -0.5 + 0.5)
    assert!((second - (-0.5 + 0.25 * (-1.0 - 0.45 + 0.5))).abs() < 1e-12);
}

#[test]
fn test_equal_states_share_entries() {
    let mut agent = agent(1);
    let a = Board::parse(&[".....", "X...."]).unwrap();
    let b = agent
        .game()
        .apply_move(&agent.game().initial_state(), &0, PlayerId::FIRST)
        .unwrap();
    assert_eq!(a, b);

    agent.update_q(&a, &1, 10.0);

    assert_eq!(agent.value(&b, &1), 5.0);
    assert_eq!(agent.state_count(), 1);
}

#[test]
fn test_training_is_reproducible() {
    let run = |seed| {
        let mut agent = agent(seed);
        let game = *agent.game();
        let mut state = game.initial_state();
        let mut player = PlayerId::FIRST;
        let mut actions = Vec::new();
        while game.check_terminal(&state, player).is_none() {
            let action = agent.learning_run(&state).unwrap();
            state = game.apply_move(&state, &action, player).unwrap();
            player = player.opponent();
            actions.push(action);
        }
        (actions, agent.snapshot().to_json().unwrap())
    };

    assert_eq!(run(5), run(5));
}

#[test]
fn test_snapshot_round_trip_through_bytes() {
    let mut trained = agent(2);
    let game = *trained.game();
    let state = game.initial_state();
    for _ in 0..30 {
        trained.learning_run(&state);
    }

    let bytes = trained.snapshot().to_bytes().unwrap();
    let mut restored = agent(2);
    restored.restore(QTableSnapshot::from_bytes(&bytes).unwrap()).unwrap();

    for column in 0..5 {
        assert_eq!(restored.value(&state, &column), trained.value(&state, &column));
        assert_eq!(restored.visit_count(&state, &column), trained.visit_count(&state, &column));
    }
}

#[test]
fn test_snapshot_rejects_future_version() {
    let json = r#"{"version": 2, "entries": []}"#;
    let err = QTableSnapshot::<usize>::from_json(json).unwrap_err();
    assert!(matches!(err, Error::UnsupportedSnapshot { found: 2, .. }));
}

proptest! {
    #[test]
    fn prop_best_move_is_legal(seed in any::<u64>(), epsilon in 0.0f64..=1.0, cells in prop::collection::vec(0usize..5, 0..8)) {
        let game = ConnectGame::new(2, 5, 4).unwrap();
        let config = QLearningConfig::default().with_epsilon(epsilon).with_seed(seed);
        let mut agent = QLearningAgent::new(game, PlayerId::FIRST, config).unwrap();

        let mut state = game.initial_state();
        let mut player = PlayerId::FIRST;
        for column in cells {
            if game.is_valid_move(&state, &column) {
                state = game.apply_move(&state, &column, player).unwrap();
                player = player.opponent();
            }
        }

        match agent.best_move(&state) {
            Some(action) => prop_assert!(game.is_valid_move(&state, &action)),
            None => prop_assert!(game.valid_moves(&state).is_empty()),
        }
    }

    #[test]
    fn prop_single_update_matches_formula(reward in -100.0f64..100.0, alpha in 0.01f64..=1.0) {
        let game = ConnectGame::new(2, 5, 4).unwrap();
        let config = QLearningConfig::default().with_alpha(alpha).with_seed(0);
        let mut agent = QLearningAgent::new(game, PlayerId::FIRST, config).unwrap();

        let value = agent.update_q(&game.initial_state(), &3, reward);

        // Fresh entries read 0 and are the only ones in the state, so the
        // bootstrapped maximum is 0.
        prop_assert!((value - alpha * reward).abs() < 1e-9);
    }
}
