//! End-to-end session scenarios for the Simon state machine.

use strictly_simon::{
    Leaderboard, Playback, PlaybackStep, RandomSignals, RoundResult, ScriptedSignals,
    SessionController, Signal, SignalSource, TurnEvent, TurnOwner, ValidationError,
};

/// Plays `playback` to the end and hands the turn to the user.
fn play_back<S: SignalSource>(session: &mut SessionController<S>, playback: Playback) {
    let shown: Vec<PlaybackStep> = playback.clone().collect();
    assert!(!shown.is_empty());
    assert!(session.finish_playback(&playback), "playback should be current");
}

/// Repeats the current sequence correctly, returning the round-complete event.
fn repeat_sequence<S: SignalSource>(session: &mut SessionController<S>) -> TurnEvent {
    let signals = session.engine().sequence().signals().to_vec();
    let (last, prefix) = signals.split_last().expect("non-empty sequence");
    for signal in prefix {
        assert!(matches!(
            session.submit_signal(*signal),
            Some(TurnEvent::Correct { .. })
        ));
    }
    session.submit_signal(*last).expect("user holds the turn")
}

#[test]
fn test_scenario_a_first_round() {
    let mut session = SessionController::new(ScriptedSignals::new([Signal::Green, Signal::Red]));

    let playback = session.start_game().expect("fresh game starts");
    assert_eq!(session.engine().sequence().signals(), &[Signal::Green]);
    assert_eq!(session.owner(), TurnOwner::Computer);

    play_back(&mut session, playback);
    assert_eq!(session.owner(), TurnOwner::User);

    match session.submit_signal(Signal::Green) {
        Some(TurnEvent::RoundComplete { score, playback }) => {
            assert_eq!(score, 1);
            assert!(playback.has_lead_in());
            assert_eq!(playback.signals(), &[Signal::Green, Signal::Red]);
        }
        other => panic!("expected round complete, got {other:?}"),
    }
    assert_eq!(*session.score(), 1);
    assert_eq!(session.engine().sequence().len(), 2);
}

#[test]
fn test_scenario_b_mismatch_retains_score() {
    let mut session = SessionController::new(ScriptedSignals::new([Signal::Green, Signal::Red]));
    let playback = session.start_game().expect("fresh game starts");
    play_back(&mut session, playback);
    let next = match session.submit_signal(Signal::Green) {
        Some(TurnEvent::RoundComplete { playback, .. }) => playback,
        other => panic!("expected round complete, got {other:?}"),
    };
    play_back(&mut session, next);

    assert_eq!(session.engine().sequence().signals(), &[Signal::Green, Signal::Red]);
    assert_eq!(session.engine().progress(), 0);
    assert_eq!(session.owner(), TurnOwner::User);

    assert_eq!(
        session.submit_signal(Signal::Yellow),
        Some(TurnEvent::Mismatch { score: 1 })
    );
    assert_eq!(session.engine().progress(), 0);
    assert_eq!(session.owner(), TurnOwner::Idle);
    assert_eq!(*session.score(), 1);
    assert_eq!(*session.pending_score(), Some(1));
    assert!(!session.is_active());
}

#[test]
fn test_scenario_c_blank_name_rejected() {
    let seeded = Leaderboard::from_results([RoundResult::new("Avi", 3).expect("valid name")]);
    let mut session =
        SessionController::with_leaderboard(ScriptedSignals::new([Signal::Blue]), seeded);
    let before = session.leaderboard().clone();

    assert_eq!(session.submit_result("", 5), Err(ValidationError::BlankName));
    assert_eq!(session.leaderboard(), &before);
}

#[test]
fn test_scenario_d_reset_mid_playback() {
    let mut session = SessionController::new(ScriptedSignals::new([
        Signal::Blue,
        Signal::Yellow,
        Signal::Red,
    ]));
    let playback = session.start_game().expect("fresh game starts");
    play_back(&mut session, playback);
    let mut in_flight = match session.submit_signal(Signal::Blue) {
        Some(TurnEvent::RoundComplete { playback, .. }) => playback,
        other => panic!("expected round complete, got {other:?}"),
    };
    // Two steps shown, then the player hits reset.
    in_flight.next();
    in_flight.next();

    session.reset_game();
    assert!(session.engine().sequence().is_empty());
    assert_eq!(*session.score(), 0);
    assert_eq!(session.owner(), TurnOwner::Idle);

    // The remainder of the interrupted playback is a no-op.
    assert!(!session.finish_playback(&in_flight));
    assert_eq!(session.owner(), TurnOwner::Idle);

    let fresh = session.start_game().expect("reset session starts");
    assert_eq!(session.engine().sequence().len(), 1);
    assert!(!fresh.has_lead_in());
}

#[test]
fn test_score_tracks_rounds_survived() {
    let mut session = SessionController::new(RandomSignals::seeded(2024));
    let mut playback = session.start_game().expect("fresh game starts");

    for round in 1..=12u32 {
        play_back(&mut session, playback);
        let completed_len = session.engine().sequence().len();
        playback = match repeat_sequence(&mut session) {
            TurnEvent::RoundComplete { score, playback } => {
                assert_eq!(score, round);
                assert_eq!(completed_len as u32, round);
                playback
            }
            other => panic!("expected round complete, got {other:?}"),
        };
        assert_eq!(session.engine().sequence().len() as u32, round + 1);
    }
}

#[test]
fn test_ignored_presses_never_mutate() {
    let mut session = SessionController::new(RandomSignals::seeded(11));

    // Idle.
    for signal in Signal::ALL {
        assert_eq!(session.submit_signal(signal), None);
    }
    assert!(session.engine().sequence().is_empty());

    // Computer playback.
    let playback = session.start_game().expect("fresh game starts");
    let snapshot = session.engine().clone();
    for signal in Signal::ALL {
        assert_eq!(session.submit_signal(signal), None);
    }
    assert_eq!(session.engine(), &snapshot);

    // After game over.
    play_back(&mut session, playback);
    let expected = session.engine().sequence().signals()[0];
    let wrong = Signal::ALL
        .into_iter()
        .find(|signal| *signal != expected)
        .expect("three other signals exist");
    session.submit_signal(wrong);
    let snapshot = session.engine().clone();
    for signal in Signal::ALL {
        assert_eq!(session.submit_signal(signal), None);
    }
    assert_eq!(session.engine(), &snapshot);
}

#[test]
fn test_mismatch_at_every_depth_resets_progress() {
    for depth in 0..5 {
        let mut session = SessionController::new(ScriptedSignals::new([Signal::Green]));
        let mut playback = session.start_game().expect("fresh game starts");
        for _ in 0..4 {
            play_back(&mut session, playback);
            playback = match repeat_sequence(&mut session) {
                TurnEvent::RoundComplete { playback, .. } => playback,
                other => panic!("expected round complete, got {other:?}"),
            };
        }
        play_back(&mut session, playback);
        for _ in 0..depth {
            session.submit_signal(Signal::Green);
        }

        assert_eq!(
            session.submit_signal(Signal::Red),
            Some(TurnEvent::Mismatch { score: 4 })
        );
        assert_eq!(session.engine().progress(), 0);
        assert_eq!(session.owner(), TurnOwner::Idle);
    }
}

#[test]
fn test_submitted_result_joins_leaderboard() {
    let mut session = SessionController::new(ScriptedSignals::new([Signal::Red]));
    let playback = session.start_game().expect("fresh game starts");
    play_back(&mut session, playback);
    session.submit_signal(Signal::Blue);

    let score = session.pending_score().expect("score held for name entry");
    let result = session.submit_result("  Noa  ", score).expect("valid name");

    assert_eq!(result.name(), "Noa");
    assert_eq!(session.leaderboard().entries(), &[result]);
    assert!(!session.awaiting_name());
}
