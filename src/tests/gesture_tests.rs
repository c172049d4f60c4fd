//! Gesture routing and the per-gesture properties.

use annotate_api::{LineColor, Reply, Request};
use assert_matches::assert_matches;

use super::fixtures::*;
use crate::geometry::{Position, Rect, to_client, to_percent};
use crate::input::{KeyCode, PointerEvent, PointerKind};
use crate::message::Message;
use crate::model::{Confirmation, Mode};
use crate::sync::Purpose;

#[test]
fn test_round_trip_through_offset_rect() {
    let rects = [
        Rect::new(0.0, 0.0, 1920.0, 1080.0),
        Rect::new(-35.5, 120.25, 333.0, 77.0),
        Rect::new(100.0, 50.0, 1.5, 0.75),
    ];
    for rect in rects {
        for (fx, fy) in [(0.0, 0.0), (0.5, 0.5), (1.0, 1.0), (0.13, 0.91)] {
            let cx = rect.left + fx * rect.width;
            let cy = rect.top + fy * rect.height;
            let percent = to_percent(cx, cy, &rect).unwrap();
            let (bx, by) = to_client(percent, &rect);
            assert!((bx - cx).abs() < 1e-9, "x drifted for {rect:?}");
            assert!((by - cy).abs() < 1e-9, "y drifted for {rect:?}");
        }
    }
}

#[test]
fn test_draft_never_leaks_on_cancel() {
    let before = vec![comment("c1", "bob", 5.0, 5.0)];
    let mut engine = engine_with("alice", before.clone(), vec![]);

    // Cancel via button.
    engine.update(click(25.0, 25.0));
    engine.update(Message::DraftChanged("not sent".into()));
    assert!(engine.update(Message::CancelDraft).is_empty());
    assert!(engine.draft().is_none());

    // Cancel via Escape.
    engine.update(click(30.0, 30.0));
    engine.update(Message::DraftChanged("not sent".into()));
    assert!(engine.update(key(KeyCode::Escape)).is_empty());
    assert!(engine.draft().is_none());

    // Cancel via a second background click.
    engine.update(click(30.0, 30.0));
    engine.update(Message::DraftChanged("not sent".into()));
    assert!(engine.update(click(60.0, 60.0)).is_empty());
    assert!(engine.draft().is_none());

    assert_eq!(engine.comments(), before.as_slice());
}

#[test]
fn test_draft_placed_at_click_percent() {
    let mut engine = engine_with("alice", vec![], vec![]);
    engine.update(click(25.0, 75.0));
    let draft = engine.draft().unwrap();
    assert!((draft.position.x - 25.0).abs() < 1e-9);
    assert!((draft.position.y - 75.0).abs() < 1e-9);
    assert!(draft.text.is_empty());
}

#[test]
fn test_click_without_rect_is_ignored() {
    let mut engine = engine_with("alice", vec![], vec![]);
    engine.update(Message::Pointer(PointerEvent::new(PointerKind::Click, 10.0, 10.0, None)));
    assert!(engine.draft().is_none());

    engine.update(Message::SetMode(Mode::Draw));
    engine.update(Message::Pointer(PointerEvent::new(PointerKind::Click, 10.0, 10.0, None)));
    assert!(!engine.state().drawing.is_pending());
}

#[test]
fn test_blank_draft_is_not_submitted() {
    let mut engine = engine_with("alice", vec![], vec![]);
    engine.update(click(25.0, 25.0));
    engine.update(Message::DraftChanged("   ".into()));
    assert!(engine.update(Message::SubmitDraft).is_empty());
    assert!(engine.update(key(KeyCode::Enter)).is_empty());
    assert!(engine.draft().is_some());
}

#[test]
fn test_enter_submits_trimmed_text() {
    let mut engine = engine_with("alice", vec![], vec![]);
    engine.update(click(25.0, 25.0));
    engine.update(Message::DraftChanged("  fix spacing  ".into()));
    let tasks = engine.update(key(KeyCode::Enter));
    assert_eq!(tasks.len(), 1);
    assert_matches!(
        &tasks[0].request,
        Request::CreateComment { comment, .. } if comment.text == "fix spacing" && comment.author == "alice"
    );
    // Still composing until the reply lands.
    assert!(engine.draft().is_some());
}

#[test]
fn test_failed_create_keeps_draft() {
    let mut engine = engine_with("alice", vec![], vec![]);
    engine.update(click(25.0, 25.0));
    engine.update(Message::DraftChanged("keep me".into()));
    let tasks = engine.update(Message::SubmitDraft);
    engine.update(fail(&tasks[0]));

    assert_eq!(engine.draft().map(|d| d.text.as_str()), Some("keep me"));
    assert!(engine.comments().is_empty());
}

#[test]
fn test_click_with_selection_only_deselects() {
    let mut engine = engine_with("alice", vec![comment("c1", "bob", 40.0, 40.0)], vec![]);
    engine.update(pin(PointerKind::Click, "c1"));
    assert_eq!(engine.selected_comment_id().map(String::as_str), Some("c1"));

    engine.update(click(10.0, 10.0));
    assert!(engine.selected_comment_id().is_none());
    assert!(engine.draft().is_none());

    engine.update(click(10.0, 10.0));
    assert!(engine.draft().is_some());
}

#[test]
fn test_failed_drag_reloads_server_state() {
    let server = vec![comment("c1", "alice", 20.0, 20.0)];
    let mut engine = engine_with("alice", server.clone(), vec![]);

    engine.update(pin(PointerKind::Down, "c1"));
    assert_eq!(engine.dragging_comment_id().map(String::as_str), Some("c1"));
    assert_eq!(engine.selected_comment_id().map(String::as_str), Some("c1"));

    engine.update(move_to(30.0, 35.0));
    engine.update(move_to(60.0, 70.0));
    assert_eq!((engine.comments()[0].x, engine.comments()[0].y), (60.0, 70.0));

    let tasks = engine.update(up(60.0, 70.0));
    assert!(engine.dragging_comment_id().is_none());
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].ticket.purpose, Purpose::MoveComment("c1".into()));

    let reload = engine.update(fail(&tasks[0]));
    assert_eq!(reload.len(), 1);
    assert_eq!(reload[0].ticket.purpose, Purpose::LoadComments);

    engine.update(succeed(&reload[0], Reply::Comments(server.clone())));
    assert_eq!(engine.comments(), server.as_slice());
}

#[test]
fn test_drag_moves_locally_without_requests() {
    let mut engine = engine_with("alice", vec![comment("c1", "alice", 20.0, 20.0)], vec![]);
    engine.update(pin(PointerKind::Down, "c1"));
    assert!(engine.update(move_to(45.0, 55.0)).is_empty());
    assert!(engine.update(move_to(150.0, -10.0)).is_empty());
    // Not clamped to the viewport.
    assert_eq!((engine.comments()[0].x, engine.comments()[0].y), (150.0, -10.0));
}

#[test]
fn test_failed_delete_keeps_comment_selectable() {
    let mut engine = engine_with("alice", vec![comment("c1", "alice", 20.0, 20.0)], vec![]);
    engine.update(Message::SelectComment(Some("c1".into())));
    engine.update(Message::RequestDeleteComment("c1".into()));
    assert_eq!(engine.confirmation(), Some(&Confirmation::DeleteComment("c1".into())));

    let tasks = engine.update(Message::Confirm);
    assert_eq!(tasks.len(), 1);
    assert_eq!(engine.comments().len(), 1);

    engine.update(fail(&tasks[0]));
    assert_eq!(engine.comments().len(), 1);
    engine.update(Message::SelectComment(None));
    engine.update(Message::SelectComment(Some("c1".into())));
    assert_eq!(engine.selected_comment_id().map(String::as_str), Some("c1"));
}

#[test]
fn test_failed_line_delete_keeps_line() {
    let mut engine = engine_with("alice", vec![], vec![line("l1", "alice")]);
    engine.update(Message::SetMode(Mode::Draw));
    engine.update(Message::SetEraser(true));
    let tasks = engine.update(line_click("l1"));
    assert_eq!(tasks.len(), 1);
    engine.update(fail(&tasks[0]));
    assert_eq!(engine.lines().len(), 1);
}

#[test]
fn test_delete_clears_selection_on_success() {
    let mut engine = engine_with("alice", vec![comment("c1", "alice", 20.0, 20.0)], vec![]);
    engine.update(Message::SelectComment(Some("c1".into())));
    engine.update(Message::RequestDeleteComment("c1".into()));
    let tasks = engine.update(Message::Confirm);
    engine.update(succeed(&tasks[0], Reply::Deleted));
    assert!(engine.comments().is_empty());
    assert!(engine.selected_comment_id().is_none());
}

#[test]
fn test_undo_prefers_line_then_comment() {
    let mut engine = engine_with(
        "alice",
        vec![comment("c1", "alice", 20.0, 20.0)],
        vec![line("l1", "alice")],
    );

    let tasks = engine.update(ctrl_z());
    assert_eq!(tasks[0].ticket.purpose, Purpose::DeleteLine("l1".into()));
    engine.update(succeed(&tasks[0], Reply::Deleted));
    assert!(engine.lines().is_empty());

    let tasks = engine.update(ctrl_z());
    assert_eq!(tasks[0].ticket.purpose, Purpose::DeleteComment("c1".into()));
    engine.update(succeed(&tasks[0], Reply::Deleted));
    assert!(engine.comments().is_empty());

    assert!(engine.update(ctrl_z()).is_empty());
}

#[test]
fn test_escape_aborts_line_before_undo() {
    let mut engine = engine_with("alice", vec![], vec![line("l1", "alice")]);
    engine.update(Message::SetMode(Mode::Draw));
    engine.update(click(10.0, 10.0));
    assert!(engine.state().drawing.is_pending());

    assert!(engine.update(key(KeyCode::Escape)).is_empty());
    assert!(!engine.state().drawing.is_pending());
    assert_eq!(engine.lines().len(), 1);
}

#[test]
fn test_foreign_pin_cannot_be_dragged() {
    let mut engine = engine_with("bob", vec![comment("c1", "alice", 20.0, 20.0)], vec![]);
    engine.update(pin(PointerKind::Down, "c1"));
    assert!(engine.dragging_comment_id().is_none());
    engine.update(move_to(80.0, 80.0));
    assert_eq!((engine.comments()[0].x, engine.comments()[0].y), (20.0, 20.0));
    assert!(engine.update(up(80.0, 80.0)).is_empty());

    engine.update(pin(PointerKind::Click, "c1"));
    assert_eq!(engine.selected_comment_id().map(String::as_str), Some("c1"));
    engine.update(pin(PointerKind::Click, "c1"));
    assert!(engine.selected_comment_id().is_none());
}

#[test]
fn test_foreign_line_cannot_be_erased() {
    let mut engine = engine_with("bob", vec![], vec![line("l1", "alice")]);
    engine.update(Message::SetMode(Mode::Draw));
    engine.update(Message::SetEraser(true));
    assert!(engine.update(line_click("l1")).is_empty());
    assert!(engine.confirmation().is_none());
    engine.update(Message::RequestDeleteComment("l1".into()));
    assert!(engine.confirmation().is_none());
}

#[test]
fn test_foreign_comment_cannot_be_deleted() {
    let mut engine = engine_with("bob", vec![comment("c1", "alice", 20.0, 20.0)], vec![]);
    engine.update(Message::RequestDeleteComment("c1".into()));
    assert!(engine.confirmation().is_none());
    assert!(engine.update(Message::Confirm).is_empty());
}

#[test]
fn test_own_pin_does_not_drag_outside_annotate() {
    let mut engine = engine_with("alice", vec![comment("c1", "alice", 20.0, 20.0)], vec![]);
    engine.update(Message::SetMode(Mode::Browse));
    engine.update(pin(PointerKind::Down, "c1"));
    assert!(engine.dragging_comment_id().is_none());
    engine.update(pin(PointerKind::Click, "c1"));
    assert_eq!(engine.selected_comment_id().map(String::as_str), Some("c1"));
}

#[test]
fn test_line_uses_click_points_not_preview() {
    let mut engine = engine_with("alice", vec![], vec![]);
    engine.update(Message::SetMode(Mode::Draw));

    assert!(engine.update(click(10.0, 10.0)).is_empty());
    engine.update(move_to(50.0, 50.0));
    let preview = engine.preview_line().unwrap();
    assert_eq!((preview.x1, preview.y1), (10.0, 10.0));
    assert!((preview.x2 - 50.0).abs() < 1e-9);

    let tasks = engine.update(click(80.0, 20.0));
    assert_eq!(tasks.len(), 1);
    assert_matches!(&tasks[0].request, Request::CreateLine { line, .. } => {
        assert!((line.x1 - 10.0).abs() < 1e-9 && (line.y1 - 10.0).abs() < 1e-9);
        assert!((line.x2 - 80.0).abs() < 1e-9 && (line.y2 - 20.0).abs() < 1e-9);
    });
    assert!(engine.preview_line().is_none());
    assert!(!engine.state().drawing.is_pending());
}

#[test]
fn test_line_color_read_at_completion() {
    let mut engine = engine_with("alice", vec![], vec![]);
    engine.update(Message::SetMode(Mode::Draw));
    engine.update(click(10.0, 10.0));
    engine.update(Message::SetColor(LineColor::Green));
    let tasks = engine.update(click(30.0, 30.0));
    assert_matches!(&tasks[0].request, Request::CreateLine { line, .. } if line.color == LineColor::Green);
}

#[test]
fn test_failed_line_create_drops_line() {
    let mut engine = engine_with("alice", vec![], vec![]);
    engine.update(Message::SetMode(Mode::Draw));
    engine.update(click(10.0, 10.0));
    let tasks = engine.update(click(30.0, 30.0));
    engine.update(fail(&tasks[0]));
    assert!(engine.lines().is_empty());
    assert!(!engine.state().drawing.is_pending());
}

#[test]
fn test_leaving_draw_aborts_pending_line() {
    let mut engine = engine_with("alice", vec![], vec![]);
    engine.update(Message::SetMode(Mode::Draw));
    engine.update(click(10.0, 10.0));
    engine.update(move_to(40.0, 40.0));
    engine.update(Message::SetMode(Mode::Annotate));
    assert!(engine.preview_line().is_none());
    assert!(!engine.state().drawing.is_pending());
}

#[test]
fn test_eraser_follows_mode_and_color() {
    let mut engine = engine_with("alice", vec![], vec![]);
    engine.update(Message::SetMode(Mode::Draw));
    engine.update(Message::SetEraser(true));
    engine.update(Message::SetMode(Mode::Draw));
    assert!(engine.eraser());

    engine.update(Message::SetMode(Mode::Browse));
    assert!(!engine.eraser());

    engine.update(Message::SetMode(Mode::Draw));
    engine.update(Message::SetEraser(true));
    engine.update(Message::SetColor(LineColor::Blue));
    assert!(!engine.eraser());
}

#[test]
fn test_unknown_color_is_rejected() {
    let mut engine = engine_with("alice", vec![], vec![]);
    engine.update(Message::SetMode(Mode::Draw));
    engine.update(Message::SetEraser(true));
    engine.update(Message::SetColor(LineColor::from("purple")));
    assert_eq!(engine.color(), &LineColor::Red);
    assert!(engine.eraser());

    engine.update(click(10.0, 10.0));
    let tasks = engine.update(click(30.0, 30.0));
    assert_matches!(&tasks[0].request, Request::CreateLine { line, .. } if line.color == LineColor::Red);
}

#[test]
fn test_line_click_without_eraser_needs_confirmation() {
    let mut engine = engine_with("alice", vec![], vec![line("l1", "alice")]);
    engine.update(Message::SetMode(Mode::Draw));
    assert!(engine.update(line_click("l1")).is_empty());
    assert_eq!(engine.confirmation(), Some(&Confirmation::DeleteLine("l1".into())));

    engine.update(Message::Dismiss);
    assert!(engine.confirmation().is_none());

    engine.update(line_click("l1"));
    let tasks = engine.update(Message::Confirm);
    assert_eq!(tasks[0].ticket.purpose, Purpose::DeleteLine("l1".into()));
}

#[test]
fn test_mode_switch_cancels_draft() {
    let mut engine = engine_with("alice", vec![], vec![]);
    engine.update(click(10.0, 10.0));
    engine.update(Message::SetMode(Mode::Draw));
    assert!(engine.draft().is_none());
}

#[test]
fn test_browse_overlay_is_inert() {
    let mut engine = engine_with("alice", vec![], vec![]);
    engine.update(Message::SetMode(Mode::Browse));
    assert!(engine.update(click(10.0, 10.0)).is_empty());
    assert!(engine.draft().is_none());
    assert!(!engine.state().drawing.is_pending());
}

#[test]
fn test_escape_order() {
    let mut engine = engine_with("alice", vec![comment("c1", "alice", 20.0, 20.0)], vec![]);
    engine.update(Message::SelectComment(Some("c1".into())));
    engine.update(Message::RequestDeleteComment("c1".into()));

    engine.update(key(KeyCode::Escape));
    assert!(engine.confirmation().is_none());
    assert!(engine.selected_comment_id().is_some());

    engine.update(key(KeyCode::Escape));
    assert!(engine.selected_comment_id().is_none());
}

#[test]
fn test_clicks_ignored_while_confirming() {
    let mut engine = engine_with("alice", vec![comment("c1", "alice", 20.0, 20.0)], vec![]);
    engine.update(Message::RequestDeleteComment("c1".into()));
    engine.update(click(50.0, 50.0));
    assert!(engine.draft().is_none());
    assert!(engine.confirmation().is_some());
}

#[test]
fn test_step_is_deterministic() {
    let engine = engine_with("alice", vec![], vec![]);
    let (a, tasks_a) = engine.clone().step(click(10.0, 10.0));
    let (b, tasks_b) = engine.step(click(10.0, 10.0));
    assert_eq!(a, b);
    assert_eq!(tasks_a, tasks_b);
    assert_eq!(a.draft().map(|d| d.position), Some(Position::new(10.0, 10.0)));
}
