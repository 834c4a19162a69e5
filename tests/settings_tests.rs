//! Tests for loading roll settings

use std::path::Path;

use dragroll::dice3d::lifecycle::ScoreSink;
use dragroll::dice3d::types::{BoundaryShape, DiceType, RollSettings, ScoreBoard};

#[test]
fn test_shipped_settings_file_loads() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("roll_settings.ron");
    let settings = RollSettings::load_from_file(&path).unwrap();

    assert_eq!(settings.dice, vec![DiceType::D6, DiceType::D20]);
    assert_eq!(settings.region.boundary, BoundaryShape::Fence { wall_offset: 1.5 });
    assert_eq!(settings.numbering_for(DiceType::D6), Some(&[1, 6, 2, 5, 3, 4][..]));
    assert_eq!(settings.throw.auto_throw_range(), (3.0, 5.0));
}

#[test]
fn test_missing_file_is_an_error() {
    let err = RollSettings::load_from_file(Path::new("no/such/settings.ron")).unwrap_err();
    assert!(err.contains("no/such/settings.ron"));
}

#[test]
fn test_display_settings_drive_score_board() {
    let settings = RollSettings::parse(
        r#"(display: (current_prefix: "Last: ", sum_prefix: "Total: ", discarded_text: "x"))"#,
    )
    .unwrap();

    let mut board = ScoreBoard::new(&settings.display);
    assert_eq!(board.total.text(), "Total: 0");

    board.discard_roll();
    assert_eq!(board.current.text(), "Last: x");
}
