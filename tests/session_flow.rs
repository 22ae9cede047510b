//! End-to-end session behaviour over real stores

use std::rc::Rc;

use proptest::prelude::*;
use squares::game::{self, Board, Outcome, Player};
use squares::{FileStorage, GameSession, KeyValueStore, MemoryStorage, MoveOutcome, SessionKeys};

fn play_all<S: KeyValueStore + Clone>(session: &mut GameSession<S>, moves: &[usize]) {
    for &index in moves {
        let outcome = session.select_square(index).unwrap();
        assert!(matches!(outcome, MoveOutcome::Played { .. }), "move {index}");
    }
}

#[test]
fn test_x_wins_top_row() {
    let store = MemoryStorage::new();
    let mut session = GameSession::open(&store, SessionKeys::default()).unwrap();
    play_all(&mut session, &[0, 3, 1, 4, 2]);

    assert_eq!(session.winner(), Some(Player::X));
    assert_eq!(session.status(), "Winner: X");
    assert_eq!(session.outcome(), Outcome::Won(Player::X));
    assert_eq!(session.history().len(), 6);

    // Decided games take no more moves
    assert!(matches!(
        session.select_square(8).unwrap(),
        MoveOutcome::Rejected(_)
    ));
    assert_eq!(session.history().len(), 6);
}

#[test]
fn test_five_moves_without_a_line() {
    // X takes 0, 8 and 2: no line yet, O to move
    let store = MemoryStorage::new();
    let mut session = GameSession::open(&store, SessionKeys::default()).unwrap();
    play_all(&mut session, &[0, 4, 8, 1, 2]);

    assert_eq!(session.winner(), None);
    assert_eq!(session.status(), "Next player: O");
    assert_eq!(session.history().len(), 6);
    assert_eq!(session.step(), 5);
}

#[test]
fn test_scratch_game() {
    let store = MemoryStorage::new();
    let mut session = GameSession::open(&store, SessionKeys::default()).unwrap();
    play_all(&mut session, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);

    assert_eq!(session.status(), "Scratch: Cat's game");
    assert_eq!(session.outcome(), Outcome::Drawn);
}

#[test]
fn test_resume_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("squares.json");

    {
        let store = Rc::new(FileStorage::open(&path).unwrap());
        let mut session = GameSession::open(store, SessionKeys::default()).unwrap();
        play_all(&mut session, &[4, 0, 8]);
        session.go_to(2).unwrap();
    }

    let store = Rc::new(FileStorage::open(&path).unwrap());
    let session = GameSession::open(store, SessionKeys::default()).unwrap();
    assert_eq!(session.step(), 2);
    assert_eq!(session.history().len(), 4);
    assert_eq!(session.board().get(0), Some(Player::O));
    assert_eq!(session.board().get(8), None);
    assert_eq!(
        session.moves(),
        vec!["Go to start", "Go to move 1", "Go to move 2", "Go to move 3"]
    );
}

#[test]
fn test_reads_legacy_browser_data() {
    // Slots as the browser version left them
    let store = MemoryStorage::new();
    store.set("squares-step", "1").unwrap();
    store
        .set(
            "squares-history",
            r#"[[null,null,null,null,null,null,null,null,null],["X",null,null,null,null,null,null,null,null]]"#,
        )
        .unwrap();

    let session = GameSession::open(&store, SessionKeys::default()).unwrap();
    assert_eq!(session.board().get(0), Some(Player::X));
    assert_eq!(session.status(), "Next player: O");
}

#[test]
fn test_sessions_in_separate_namespaces() {
    let store = MemoryStorage::new();
    let mut alice = GameSession::open(&store, SessionKeys::namespaced(Some("alice"))).unwrap();
    let mut bob = GameSession::open(&store, SessionKeys::namespaced(Some("bob"))).unwrap();

    alice.select_square(0).unwrap();
    bob.select_square(8).unwrap();
    bob.select_square(4).unwrap();

    assert_eq!(alice.history().len(), 2);
    assert_eq!(bob.history().len(), 3);
    assert_eq!(store.len(), 4);
}

proptest! {
    #[test]
    fn prop_session_invariants(actions in prop::collection::vec((0usize..4, 0usize..12), 0..40)) {
        let store = MemoryStorage::new();
        let mut session = GameSession::open(&store, SessionKeys::default()).unwrap();

        for (kind, arg) in actions {
            let before = session.board();
            let history_before = session.history().to_vec();
            match kind {
                0 | 1 => {
                    let outcome = session.select_square(arg).unwrap();
                    if let MoveOutcome::Played { index, player } = outcome {
                        let after = session.board();
                        // Only the chosen cell changed
                        for cell in 0..9 {
                            if cell == index {
                                prop_assert_eq!(after.get(cell), Some(player));
                            } else {
                                prop_assert_eq!(after.get(cell), before.get(cell));
                            }
                        }
                        prop_assert_eq!(after.filled(), before.filled() + 1);

                        // Appended at the end, nothing before it touched
                        prop_assert_eq!(session.history().len(), history_before.len() + 1);
                        prop_assert_eq!(&session.history()[..history_before.len()], &history_before[..]);
                        prop_assert_eq!(session.step(), history_before.len());
                    } else {
                        prop_assert_eq!(session.board(), before);
                        prop_assert_eq!(session.history(), &history_before[..]);
                    }
                }
                2 => {
                    let len = session.history().len();
                    let result = session.go_to(arg);
                    prop_assert_eq!(result.is_ok(), arg < len);
                }
                _ => {
                    if arg == 0 {
                        session.restart().unwrap();
                        prop_assert_eq!(session.history(), &[Board::new()][..]);
                    }
                }
            }

            prop_assert!(!session.history().is_empty());
            prop_assert!(session.step() < session.history().len());

            // Every later board is one mark on top of some earlier board
            let history = session.history();
            prop_assert_eq!(history[0], Board::new());
            for (i, board) in history.iter().enumerate().skip(1) {
                let extends = |parent: &Board| {
                    parent.filled() + 1 == board.filled()
                        && (0..9).all(|cell| parent.get(cell).is_none() || parent.get(cell) == board.get(cell))
                };
                prop_assert!(history[..i].iter().any(extends), "board {} has no parent", i);
            }

            let board = session.board();
            let expected = match game::outcome(&board) {
                Outcome::Won(p) => format!("Winner: {p}"),
                Outcome::Drawn => "Scratch: Cat's game".to_string(),
                Outcome::InProgress => format!("Next player: {}", game::next_player(&board)),
            };
            prop_assert_eq!(session.status(), expected);

            // Whatever is in memory is what a reload sees
            let reloaded = GameSession::open(&store, SessionKeys::default()).unwrap();
            prop_assert_eq!(reloaded.step(), session.step());
            prop_assert_eq!(reloaded.history(), session.history());
        }
    }
}
