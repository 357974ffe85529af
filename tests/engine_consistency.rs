use othello::ai::{MoveSelector, Policy, PolicySelector};
use othello::{GameConfig, GameState, Player, Turn};

fn slot(player: Player) -> usize {
    match player {
        Player::O => 0,
        Player::X => 1,
    }
}

/// Plays one seeded game and checks every chosen move's dry run against the
/// applied result.
fn play_checked_game(size: usize, seed: u64) -> GameState {
    let config = GameConfig {
        size,
        ..GameConfig::default()
    };
    let mut game = config.new_game().expect("valid size");
    let mut selectors = [
        PolicySelector::new(Policy::Uniform, seed),
        PolicySelector::new(Policy::Weighted { skill: 1.5 }, seed.wrapping_add(1)),
    ];

    loop {
        let player = match game.advance_turn() {
            Turn::AwaitingMove(player) => player,
            Turn::Passed(player) => player.opponent(),
            Turn::Terminal => break,
        };

        let candidates = game.legal_moves(player);
        for position in game.board().positions() {
            let legal = candidates.iter().any(|c| c.position == position);
            assert_eq!(game.board().evaluate(position, player).is_ok(), legal, "{position}");
        }

        let position = selectors[slot(player)]
            .select_move(&candidates)
            .expect("player to move has a legal move");
        let predicted = game.board().evaluate(position, player).unwrap();
        let listed = candidates.iter().find(|c| c.position == position).unwrap();
        assert_eq!(predicted.len(), listed.flips);

        let before = game.board().clone();
        let flipped = game.play(position).unwrap();

        assert_eq!(flipped, predicted);
        for cell in &flipped {
            assert_eq!(before.owner(*cell).unwrap(), Some(player.opponent()));
            assert_eq!(game.board().owner(*cell).unwrap(), Some(player));
        }
        assert_eq!(game.board().count(player), before.count(player) + 1 + flipped.len());
        assert!(game.score().total() <= size * size);
    }

    game
}

#[test]
fn dry_run_matches_applied_move_throughout_seeded_games() {
    for size in [4, 6, 8] {
        for seed in 0..10 {
            let game = play_checked_game(size, seed);
            let score = game.score();

            assert!(game.is_game_over());
            assert_eq!(score.total(), 4 + game.moves_played());
            if game.board().empty_count() == 0 {
                assert_eq!(score.total(), size * size);
            }
        }
    }
}
