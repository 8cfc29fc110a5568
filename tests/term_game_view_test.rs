use element_tetris::core::{GameSession, GameSnapshot, Piece};
use element_tetris::term::{element_glyph, AnchorY, GameView, Viewport};
use element_tetris::types::{ElementKind, GameEvent};

fn empty_snapshot() -> GameSnapshot {
    let mut snap = GameSession::new(1).snapshot();
    snap.active = None;
    snap.ghost_row = None;
    snap
}

fn top_view() -> GameView {
    GameView::default().with_anchor_y(AnchorY::Top)
}

#[test]
fn term_view_renders_border_corners() {
    let snap = empty_snapshot();

    // With cell_w=2 and cell_h=1:
    // board pixels = 10*2 by 14*1 => 20x14
    // plus border => 22x16, plus one feedback line
    let fb = top_view().render(&snap, Viewport::new(22, 17));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 15).unwrap().ch, '└');
    assert_eq!(fb.get(21, 15).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_settled_cell_as_two_chars_wide() {
    let mut snap = empty_snapshot();
    snap.grid[13][0] = ElementKind::Fire;

    let fb = top_view().render(&snap, Viewport::new(22, 17));

    let fire = element_glyph(ElementKind::Fire);
    assert_eq!(fb.get(1, 14).unwrap().ch, fire);
    assert_eq!(fb.get(2, 14).unwrap().ch, fire);
    assert_eq!(fb.get(3, 14).unwrap().ch, '·');
}

#[test]
fn term_view_renders_active_piece_and_ghost() {
    let mut snap = empty_snapshot();
    snap.active = Some(Piece::single(ElementKind::Water));
    snap.ghost_row = Some(13);

    let fb = top_view().render(&snap, Viewport::new(22, 17));

    // Column 5 starts at x = 1 + 5 * 2.
    let water = element_glyph(ElementKind::Water);
    assert_eq!(fb.get(11, 1).unwrap().ch, water);
    assert_eq!(fb.get(12, 1).unwrap().ch, water);
    assert!(fb.get(11, 1).unwrap().style.bold);
    assert_eq!(fb.get(11, 14).unwrap().ch, '░');
}

#[test]
fn term_view_shows_side_panel_when_wide_enough() {
    let mut snap = GameSession::new(3).snapshot();
    snap.score = -10;

    let wide = top_view().render(&snap, Viewport::new(60, 17));
    assert!(wide.contains_text("SCORE"));
    assert!(wide.contains_text("-10"));
    assert!(wide.contains_text("LEVEL"));
    assert!(wide.contains_text("LINES"));
    assert!(wide.contains_text("1000ms"));
    assert!(wide.contains_text("NEXT"));
    let next = snap.upcoming[0].unwrap().element();
    assert!(wide.contains_text(next.as_str()));

    let narrow = top_view().render(&snap, Viewport::new(22, 17));
    assert!(!narrow.contains_text("SCORE"));
}

#[test]
fn term_view_overlays() {
    let mut snap = empty_snapshot();
    snap.paused = true;
    let fb = top_view().render(&snap, Viewport::new(22, 17));
    assert!(fb.contains_text("PAUSED"));

    snap.paused = false;
    snap.game_over = true;
    let fb = top_view().render(&snap, Viewport::new(22, 17));
    assert!(fb.contains_text("GAME OVER"));
    assert!(fb.contains_text("r: restart"));
    assert!(!fb.contains_text("PAUSED"));
}

#[test]
fn term_view_feedback_line_sits_under_the_board() {
    let snap = empty_snapshot();
    let view = top_view();
    let vp = Viewport::new(22, 17);

    let fb = view.render_with_feedback(&snap, Some(GameEvent::ElementExtinguished), vp);
    assert!(fb.row_text(16).contains("Extinguished! +20"));

    let fb = view.render_with_feedback(
        &snap,
        Some(GameEvent::RowsCleared { count: 2, combo: 1 }),
        vp,
    );
    assert!(fb.row_text(16).contains("2 rows combo x2"));

    let fb = view.render_with_feedback(&snap, Some(GameEvent::RowsCleared { count: 1, combo: 0 }), vp);
    assert_eq!(fb.row_text(16).trim_end(), "1 row");
}
