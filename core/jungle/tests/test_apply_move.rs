//! 走子、滑行、回合與勝負測試

mod common;

use common::{LevelBuilder, RIVER_7X9, pos};
use jungle::component::{Occupant, PieceKind, Team};
use jungle::error::MoveRejection;
use jungle::logic::movement::step_in_direction;
use jungle::{Direction, MatchState, MoveRequest, MoveToken, RuleSet};
use strum::IntoEnumIterator;

fn step(from: jungle::Position, kind: PieceKind, direction: Direction) -> MoveRequest {
    MoveRequest::Step {
        from,
        token: MoveToken { kind, direction },
    }
}

fn standard() -> MatchState {
    MatchState::standard(&RuleSet::standard()).unwrap()
}

#[test]
fn test_river_slide_scenario() {
    let state = LevelBuilder::from_ascii(RIVER_7X9)
        .pieces(
            r#"
. . . . . . c
. . . . . . .
. . . . . . .
. R . . . . .
. . . . . . .
. . . . . . .
. . . . . . .
. . . . . . .
. . . . . . .
    "#,
        )
        .piece("R", Team::B, PieceKind::Rat)
        .piece("c", Team::A, PieceKind::Cat)
        .build()
        .unwrap();
    let rules = RuleSet::standard();
    let from = pos(1, 3);

    assert!(state.possible_moves(&rules, from).contains(&pos(2, 3)));

    let (next, record) = state
        .apply_move(&rules, step(from, PieceKind::Rat, Direction::Right))
        .unwrap();

    // 棋子只走一格，滑行只影響標示
    let rat = Occupant {
        team: Team::B,
        kind: PieceKind::Rat,
    };
    assert_eq!(next.piece_at(pos(2, 3)), Some(rat));
    assert_eq!(next.piece_at(from), None);
    assert_eq!(next.piece_at(pos(4, 3)), None);
    assert_eq!(
        next.roster_entry(Team::B, PieceKind::Rat).unwrap().position,
        pos(2, 3)
    );
    assert_eq!(record.landing, pos(2, 3));
    assert_eq!(record.trail, vec![pos(2, 3), pos(3, 3), pos(4, 3)]);
    assert_eq!(record.highlight, [pos(1, 3), pos(4, 3)]);
    assert_eq!(record.slide_end(), pos(4, 3));
    assert_eq!(record.token.to_string(), "rR");
    assert_eq!(next.turn(), Team::A);
}

#[test]
fn test_slide_stops_at_board_edge() {
    let state = LevelBuilder::from_ascii(
        r#"
. ~ ~
. . .
    "#,
    )
    .pieces(
        r#"
R . .
. . c
    "#,
    )
    .piece("R", Team::B, PieceKind::Rat)
    .piece("c", Team::A, PieceKind::Cat)
    .build()
    .unwrap();

    let (_, record) = state
        .apply_move(
            &RuleSet::standard(),
            step(pos(0, 0), PieceKind::Rat, Direction::Right),
        )
        .unwrap();
    assert_eq!(record.trail, vec![pos(1, 0), pos(2, 0)]);
    assert_eq!(record.highlight, [pos(0, 0), pos(2, 0)]);
}

#[test]
fn test_no_slide_on_land() {
    let state = standard();
    let (_, record) = state
        .apply_move(
            &RuleSet::standard(),
            step(pos(0, 6), PieceKind::Elephant, Direction::Up),
        )
        .unwrap();
    assert_eq!(record.trail, vec![pos(0, 5)]);
    assert_eq!(record.highlight, [pos(0, 6), pos(0, 5)]);
    assert_eq!(record.captured, None);
}

#[test]
fn test_turn_gating() {
    let state = standard();
    let before = state.clone();
    assert_eq!(state.turn(), Team::B);

    // (0, 2) 是 A 的鼠
    let result = state.apply_move(
        &RuleSet::standard(),
        step(pos(0, 2), PieceKind::Rat, Direction::Down),
    );
    assert_eq!(
        result.unwrap_err(),
        MoveRejection::NotYourTurn {
            team: Team::A,
            turn: Team::B
        }
    );
    assert_eq!(state, before);
    assert_eq!(state.turn(), Team::B);
}

#[test]
fn test_rejection_in_place_is_atomic() {
    let mut state = standard();
    let before = state.clone();
    let rules = RuleSet::standard();

    let test_data = [
        // 狼不會游泳
        (
            step(pos(2, 6), PieceKind::Wolf, Direction::Up),
            MoveRejection::IllegalDestination {
                x: 2,
                y: 6,
                direction: Direction::Up,
            },
        ),
        // 棋盤外
        (
            step(pos(0, 8), PieceKind::Tiger, Direction::Left),
            MoveRejection::IllegalDestination {
                x: 0,
                y: 8,
                direction: Direction::Left,
            },
        ),
        // 指令種類不符
        (
            step(pos(0, 6), PieceKind::Rat, Direction::Up),
            MoveRejection::PieceMismatch {
                requested: PieceKind::Rat,
                found: PieceKind::Elephant,
            },
        ),
        (
            step(pos(3, 4), PieceKind::Rat, Direction::Up),
            MoveRejection::NoPieceAtOrigin { x: 3, y: 4 },
        ),
        (
            MoveRequest::Target {
                from: pos(0, 6),
                to: pos(1, 5),
            },
            MoveRejection::InvalidDirection { dx: 1, dy: -1 },
        ),
        (
            MoveRequest::Target {
                from: pos(0, 6),
                to: pos(0, 4),
            },
            MoveRejection::InvalidDirection { dx: 0, dy: -2 },
        ),
        // 遠在棋盤外的目標格
        (
            MoveRequest::Target {
                from: pos(2, 6),
                to: pos(1 << 63, 6),
            },
            MoveRejection::TargetOutOfBounds { x: 1 << 63, y: 6 },
        ),
        (
            MoveRequest::Target {
                from: pos(2, 6),
                to: pos(2, 40),
            },
            MoveRejection::InvalidDirection { dx: 0, dy: 34 },
        ),
    ];

    for (idx, (request, expected)) in test_data.into_iter().enumerate() {
        let result = state.apply_move_in_place(&rules, request);
        assert_eq!(result.unwrap_err(), expected, "Case {}", idx);
        assert_eq!(state, before, "Case {}", idx);
    }
}

#[test]
fn test_apply_move_is_pure() {
    let state = standard();
    let (next, _) = state
        .apply_move(
            &RuleSet::standard(),
            MoveRequest::Target {
                from: pos(0, 6),
                to: pos(0, 5),
            },
        )
        .unwrap();
    assert!(state.piece_at(pos(0, 6)).is_some());
    assert_eq!(state.turn(), Team::B);
    assert!(next.piece_at(pos(0, 5)).is_some());
    assert_eq!(next.turn(), Team::A);
}

#[test]
fn test_legality_consistency() {
    let state = standard();
    let rules = RuleSet::standard();

    for piece in state.roster().pieces_of(Team::B) {
        let possible = state.possible_moves(&rules, piece.position);
        for direction in Direction::iter() {
            let target = step_in_direction(state.terrain().board(), piece.position, direction);
            let expected = target.is_some_and(|to| possible.contains(&to));
            let result = state.apply_move(&rules, step(piece.position, piece.kind, direction));
            assert_eq!(result.is_ok(), expected, "{:?} {}", piece, direction);
        }
    }
}

#[test]
fn test_turn_alternation() {
    let mut state = standard();
    let rules = RuleSet::standard();
    let moves = [
        step(pos(0, 6), PieceKind::Elephant, Direction::Up),
        step(pos(0, 0), PieceKind::Lion, Direction::Down),
        step(pos(0, 5), PieceKind::Elephant, Direction::Up),
        step(pos(6, 0), PieceKind::Tiger, Direction::Down),
        step(pos(0, 4), PieceKind::Elephant, Direction::Up),
        step(pos(0, 1), PieceKind::Lion, Direction::Up),
    ];

    for (i, request) in moves.into_iter().enumerate() {
        state.apply_move_in_place(&rules, request).unwrap();
        let accepted = i + 1;
        assert_eq!(state.turn() == Team::B, accepted % 2 == 0, "{accepted} moves");
    }
}

#[test]
fn test_capture_removes_roster_entry() {
    let state = LevelBuilder::from_ascii(
        r#"
. . .
. . .
    "#,
    )
    .pieces(
        r#"
L t .
. . c
    "#,
    )
    .piece("L", Team::B, PieceKind::Lion)
    .piece("t", Team::A, PieceKind::Tiger)
    .piece("c", Team::A, PieceKind::Cat)
    .build()
    .unwrap();

    let (next, record) = state
        .apply_move(
            &RuleSet::standard(),
            step(pos(0, 0), PieceKind::Lion, Direction::Right),
        )
        .unwrap();
    assert_eq!(
        record.captured,
        Some(Occupant {
            team: Team::A,
            kind: PieceKind::Tiger
        })
    );
    assert!(next.roster_entry(Team::A, PieceKind::Tiger).is_none());
    assert_eq!(next.roster().len(), 2);
    assert_eq!(next.piece_at(pos(1, 0)).unwrap().kind, PieceKind::Lion);
    assert_eq!(next.outcome(), None);
    assert_eq!(record.outcome, None);
}

#[test]
fn test_enter_enemy_den_wins() {
    let state = LevelBuilder::from_ascii(
        r#"
. Da .
. .  .
    "#,
    )
    .pieces(
        r#"
D . .
. . c
    "#,
    )
    .piece("D", Team::B, PieceKind::Dog)
    .piece("c", Team::A, PieceKind::Cat)
    .build()
    .unwrap();
    let rules = RuleSet::standard();

    let (next, record) = state
        .apply_move(&rules, step(pos(0, 0), PieceKind::Dog, Direction::Right))
        .unwrap();
    assert_eq!(record.outcome, Some(Team::B));
    assert_eq!(next.outcome(), Some(Team::B));

    // 結束後不能再走
    assert!(next.possible_moves(&rules, pos(2, 1)).is_empty());
    let result = next.apply_move(&rules, step(pos(2, 1), PieceKind::Cat, Direction::Up));
    assert_eq!(
        result.unwrap_err(),
        MoveRejection::GameOver { winner: Team::B }
    );
}

#[test]
fn test_capture_last_piece_wins() {
    let state = LevelBuilder::from_ascii(
        r#"
. .
    "#,
    )
    .pieces(
        r#"
L c
    "#,
    )
    .piece("L", Team::B, PieceKind::Lion)
    .piece("c", Team::A, PieceKind::Cat)
    .build()
    .unwrap();

    let (next, record) = state
        .apply_move(
            &RuleSet::standard(),
            step(pos(0, 0), PieceKind::Lion, Direction::Right),
        )
        .unwrap();
    assert_eq!(record.outcome, Some(Team::B));
    assert_eq!(next.roster().pieces_of(Team::A).count(), 0);
}

#[test]
fn test_apply_token_str() {
    let state = standard();
    let rules = RuleSet::standard();

    let (next, record) = state.apply_token_str(&rules, "eU", pos(0, 6)).unwrap();
    assert_eq!(record.landing, pos(0, 5));
    assert_eq!(next.turn(), Team::A);

    assert_eq!(
        state.apply_token_str(&rules, "zz", pos(0, 6)).unwrap_err(),
        MoveRejection::MalformedToken {
            token: "zz".to_string()
        }
    );
    assert!(matches!(
        state.apply_token_str(&rules, "rU", pos(0, 6)),
        Err(MoveRejection::PieceMismatch { .. })
    ));
}
