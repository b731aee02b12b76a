use skyblocks::core::{BoardConfig, BoardEngine, BoardSnapshot};

#[test]
fn snapshot_serializes_board_state() {
    let mut board = BoardEngine::new(BoardConfig::new(4, 3, 3).with_seed(7)).unwrap();
    board.swap_right();

    let snap = board.snapshot();
    let json = serde_json::to_value(&snap).unwrap();

    assert_eq!(json["width"], 4);
    assert_eq!(json["height"], 3);
    assert_eq!(json["seed"], 7);
    assert_eq!(json["shifting"], true);
    assert_eq!(json["selected_x"], 1);
    let tiles = json["tiles"].as_array().unwrap();
    assert_eq!(tiles.len(), 12);
    assert!(tiles[0]["kind"].is_string());
    assert!(tiles[0]["placement"]["x"].is_number());
}

#[test]
fn snapshot_into_reuses_buffer() {
    let mut board = BoardEngine::new(BoardConfig::new(5, 5, 4).with_seed(9)).unwrap();
    let mut snap = BoardSnapshot::default();

    board.snapshot_into(&mut snap);
    assert_eq!(snap.tiles.len(), 25);
    board.select_up();
    board.snapshot_into(&mut snap);
    assert_eq!(snap.tiles.len(), 25);
    assert_eq!((snap.selected_x, snap.selected_y), (0, 1));
    assert!(snap.cell(0, 1).unwrap().selected);
    assert_eq!(snap, board.snapshot());
}
