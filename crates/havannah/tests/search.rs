//! MCTS playing Havannah.

use duel_core::{Game, Player};
use duel_havannah::{Havannah, Hex, WinPattern};
use duel_mcts::{Agent, MctsAgent, MctsConfig, RandomAgent, RandomRollout};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn cube(x: i32, y: i32, z: i32) -> Hex {
    Hex::from_cube(x, y, z).unwrap()
}

#[test]
fn test_mcts_completes_a_bridge() {
    let game = Havannah::new(4).unwrap();
    let moves = [
        cube(3, -3, 0),
        cube(0, 0, 0),
        cube(3, -2, -1),
        cube(-1, 1, 0),
        cube(3, -1, -2),
        cube(-2, 2, 0),
    ];
    let state = moves
        .iter()
        .fold(game.initial_state(), |state, &hex| game.apply(&state, hex).unwrap());
    assert_eq!(game.current_player(&state), Player::One);

    let mut agent: MctsAgent<Havannah, _, _> = MctsAgent::new(
        "mcts",
        MctsConfig::with_iterations(1500),
        RandomRollout,
        ChaCha8Rng::seed_from_u64(21),
    );
    let action = agent.choose_action(&game, &state).unwrap();
    assert_eq!(action, cube(3, 0, -3));

    let state = game.apply(&state, action).unwrap();
    assert_eq!(state.win_pattern(), Some(WinPattern::Bridge));
}

#[test]
fn test_random_games_finish() {
    let game = Havannah::new(5).unwrap();
    for seed in 0..10 {
        let mut agents = [
            RandomAgent::new("one", ChaCha8Rng::seed_from_u64(seed)),
            RandomAgent::new("two", ChaCha8Rng::seed_from_u64(seed + 50)),
        ];
        let mut state = game.initial_state();
        while !game.is_terminal(&state) {
            let seat = game.current_player(&state).index();
            let action = Agent::<Havannah>::choose_action(&mut agents[seat], &game, &state).unwrap();
            state = game.apply(&state, action).unwrap();
        }
        assert!(game.outcome(&state).is_some());
        assert!(state.board().stones() <= state.board().geometry().len());
    }
}
