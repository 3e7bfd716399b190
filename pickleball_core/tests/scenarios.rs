//! Whole-game scenarios driven through the public API.

use pickleball_core::*;

fn key(action: Action) -> Input {
    Input::zero().with(action)
}

/// Menu -> ModeSelect -> Playing with the given difficulty
fn start(game: &mut Game<impl RandomSource>, difficulty: Difficulty) {
    game.step(&Input::zero());
    game.step(&key(Action::Confirm));
    let select = match difficulty {
        Difficulty::Easy => Action::SelectEasy,
        Difficulty::Hard => Action::SelectHard,
    };
    game.step(&key(select));
    assert_eq!(game.screen, Screen::Playing);
}

#[test]
fn test_full_match_against_cpu_ends() {
    let config = Config {
        seed: Some(42),
        ..Config::default()
    };
    let mut game = Game::new(config);
    start(&mut game, Difficulty::Easy);

    let mut last = Score::default();
    let mut sounds = 0;
    let mut ticks = 0u32;

    while game.screen == Screen::Playing {
        // Idle player: the CPU wins eventually
        let frame = game.step(&Input::zero());
        sounds += frame
            .audio
            .iter()
            .filter(|a| matches!(a, AudioCommand::PlaySound(_)))
            .count() as u32;

        let score = game.score();
        assert!(score.player >= last.player && score.cpu >= last.cpu);
        assert!(
            (score.player + score.cpu) - (last.player + last.cpu) <= 1,
            "at most one goal per tick"
        );
        last = score;

        ticks += 1;
        assert!(ticks < 100_000, "match never finished");
    }

    let score = game.score();
    assert_eq!(u32::from(score.player + score.cpu), sounds);
    assert!(score.player == 5 || score.cpu == 5);
    assert_eq!(
        game.screen,
        Screen::End {
            player_won: score.player == 5
        }
    );
}

#[test]
fn test_restart_then_new_match() {
    let mut game = Game::with_rng(Config::default(), ScriptedRng::new([0, 1, 8]));
    start(&mut game, Difficulty::Hard);

    game.session.as_mut().unwrap().score = Score::new(3, 5);
    game.step(&Input::zero());
    assert_eq!(game.screen, Screen::End { player_won: false });

    // Restart lands on mode selection, never straight into play
    game.step(&key(Action::Restart));
    assert_eq!(game.screen, Screen::ModeSelect);
    assert_eq!(game.score(), Score::new(0, 0));

    game.step(&key(Action::SelectEasy));
    assert_eq!(game.screen, Screen::Playing);
    let session = game.session.as_ref().unwrap();
    assert_eq!(session.difficulty, Difficulty::Easy);
    assert_eq!(session.score, Score::new(0, 0));
    assert_eq!(session.ball.pos, Vec2::new(640.0, 360.0));
}

#[test]
fn test_invariants_over_seeded_play() {
    for seed in [1u64, 7, 99, 2024] {
        for difficulty in [Difficulty::Easy, Difficulty::Hard] {
            let mut rng = GameRng::new(seed);
            let config = Config::default();
            let mut session = Match::new(config, difficulty, &mut rng);

            for tick in 0..5_000u32 {
                // Wiggle the player paddle across the whole field
                let input = Input::new(tick % 120 < 60, tick % 120 >= 60);
                let before = session.ball.vel;
                let events = session.step(&input, &mut rng);

                let hits = events
                    .iter()
                    .filter(|e| matches!(e, Event::PaddleHit(_)))
                    .count();
                let scored = events.iter().any(|e| matches!(e, Event::Scored { .. }));

                if events.contains(&Event::WallBounce) && hits == 0 && !scored {
                    assert!(session.ball.vel.y.abs() >= config.min_bounce_speed);
                }
                if hits == 1 && !scored {
                    let clamped = before.x.clamp(-12.0, 12.0);
                    assert_eq!(session.ball.vel.x, clamped * -1.1);
                    assert!(session.ball.vel.y.abs() >= config.min_bounce_speed);
                }

                for paddle in [&session.player, &session.cpu] {
                    assert!((0.0..=config.paddle_max_y()).contains(&paddle.pos.y));
                }

                if session.winner().is_some() {
                    break;
                }
            }
        }
    }
}

#[test]
fn test_close_signal_from_every_screen() {
    let close = Input::zero().with_close();

    let mut menu = Game::with_rng(Config::default(), ScriptedRng::default());
    assert!(menu.step(&close).exit);

    let mut mode_select = Game::with_rng(Config::default(), ScriptedRng::default());
    mode_select.step(&key(Action::Confirm));
    assert!(mode_select.step(&close).exit);

    let mut playing = Game::with_rng(Config::default(), ScriptedRng::default());
    start(&mut playing, Difficulty::Hard);
    assert!(playing.step(&close).exit);
    assert!(!playing.is_running());
}
