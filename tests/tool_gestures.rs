mod common;

use bitmap_paint::tools::{CircleTool, LineTool, PencilTool, RectTool, ToolRequest, TypeTool};
use bitmap_paint::{PixelRect, PixelSurface, Point, Surface, Tool};
use common::{BG, CELL_W, FG, context, count, glyph_marker, test_font};
use egui::Key;

fn canvas() -> PixelSurface {
    PixelSurface::new(120, 120, BG)
}

#[test]
fn test_line_degenerate_release_draws_nothing() {
    let font = test_font();
    let mut canvas = canvas();
    let mut line = LineTool::new();

    line.button_down(&context(&font, 10, 10), &mut canvas);
    line.button_up(&context(&font, 10, 10), &mut canvas);

    assert_eq!(canvas, self::canvas());
    assert!(!line.is_busy());
}

#[test]
fn test_line_commits_horizontal_segment() {
    let font = test_font();
    let mut canvas = canvas();
    let mut line = LineTool::new();

    line.button_down(&context(&font, 10, 10), &mut canvas);
    assert_eq!(line.anchor(), Some(Point::new(10, 10)));
    assert_eq!(count(&canvas, FG), 0);

    line.button_up(&context(&font, 50, 10), &mut canvas);
    assert_eq!(count(&canvas, FG), 41);
    for x in 10..=50 {
        assert_eq!(canvas.pixel(x, 10), Some(FG));
    }
    assert_eq!(line.anchor(), None);
}

#[test]
fn test_line_held_press_keeps_first_anchor() {
    let font = test_font();
    let mut canvas = canvas();
    let mut line = LineTool::new();

    line.button_down(&context(&font, 5, 5), &mut canvas);
    line.button_down(&context(&font, 20, 30), &mut canvas);
    assert_eq!(line.anchor(), Some(Point::new(5, 5)));
}

#[test]
fn test_line_escape_cancels() {
    let font = test_font();
    let mut canvas = canvas();
    let mut line = LineTool::new();

    line.button_down(&context(&font, 5, 5), &mut canvas);
    assert_eq!(line.handle_key(Key::Escape), None);
    line.button_up(&context(&font, 40, 40), &mut canvas);
    assert_eq!(count(&canvas, FG), 0);
}

#[test]
fn test_preview_leaves_canvas_alone() {
    let font = test_font();
    let mut canvas = canvas();
    let mut display = self::canvas();
    let mut line = LineTool::new();

    line.button_down(&context(&font, 10, 10), &mut canvas);
    line.draw_cursor(&context(&font, 30, 10), &mut display);

    assert_eq!(count(&canvas, FG), 0);
    assert_eq!(display.pixel(20, 10), Some(FG));
}

#[test]
fn test_rect_normalizes_reverse_drag() {
    let font = test_font();
    let mut canvas = canvas();
    let mut rect = RectTool::new();

    rect.button_down(&context(&font, 50, 50), &mut canvas);
    rect.button_up(&context(&font, 10, 10), &mut canvas);

    let mut expected = self::canvas();
    expected.draw_rect(PixelRect::new(10, 10, 40, 40), FG, 1);
    assert_eq!(canvas, expected);
    assert_eq!(RectTool::bounds(Point::new(50, 50), Point::new(10, 10)), PixelRect::new(10, 10, 40, 40));
}

#[test]
fn test_rect_commit_is_order_independent() {
    let font = test_font();
    let (a, b) = ((70, 15), (20, 60));

    let mut forward = canvas();
    let mut tool = RectTool::new();
    tool.button_down(&context(&font, a.0, a.1), &mut forward);
    tool.button_up(&context(&font, b.0, b.1), &mut forward);

    let mut backward = canvas();
    tool.button_down(&context(&font, b.0, b.1), &mut backward);
    tool.button_up(&context(&font, a.0, a.1), &mut backward);

    assert_eq!(forward, backward);
    assert_eq!(forward.pixel(20, 15), Some(FG));
}

#[test]
fn test_rect_fill_mode() {
    let font = test_font();
    let mut canvas = canvas();
    let mut rect = RectTool::new();
    let mut ctx = context(&font, 10, 10);
    ctx.fill = true;

    rect.button_down(&ctx, &mut canvas);
    ctx.pointer = Point::new(20, 30);
    rect.button_up(&ctx, &mut canvas);

    assert_eq!(count(&canvas, FG), 10 * 20);
    assert_eq!(canvas.pixel(15, 20), Some(FG));
}

#[test]
fn test_rect_degenerate_release_draws_nothing() {
    let font = test_font();
    let mut canvas = canvas();
    let mut rect = RectTool::new();
    rect.button_down(&context(&font, 33, 33), &mut canvas);
    rect.button_up(&context(&font, 33, 33), &mut canvas);
    assert_eq!(canvas, self::canvas());
}

#[test]
fn test_circle_radius_is_euclidean() {
    let a = Point::new(10, 20);
    let b = Point::new(13, 24);
    assert_eq!(CircleTool::radius(a, b), 5.0);
    assert_eq!(CircleTool::radius(b, a), 5.0);
    assert_eq!(CircleTool::radius(a, Point::new(10, 8)), 12.0);
}

#[test]
fn test_circle_commit_centred_on_anchor() {
    let font = test_font();
    let mut canvas = canvas();
    let mut circle = CircleTool::new();

    circle.button_down(&context(&font, 60, 60), &mut canvas);
    circle.button_up(&context(&font, 63, 64), &mut canvas);

    let mut expected = self::canvas();
    expected.draw_circle(Point::new(60, 60), 5.0, FG, 1);
    assert_eq!(canvas, expected);
    assert_eq!(canvas.pixel(65, 60), Some(FG));
    assert_eq!(canvas.pixel(60, 60), Some(BG));
}

#[test]
fn test_circle_degenerate_release_draws_nothing() {
    let font = test_font();
    let mut canvas = canvas();
    let mut circle = CircleTool::new();
    circle.button_down(&context(&font, 60, 60), &mut canvas);
    circle.button_up(&context(&font, 60, 60), &mut canvas);
    assert_eq!(canvas, self::canvas());
}

#[test]
fn test_pencil_marks_on_press_and_strokes_while_held() {
    let font = test_font();
    let mut canvas = canvas();
    let mut pencil = PencilTool::new();

    pencil.button_down(&context(&font, 5, 5), &mut canvas);
    assert_eq!(count(&canvas, FG), 1);
    assert!(pencil.is_busy());

    let mut held = context(&font, 9, 5);
    held.pointer_delta = Point::new(4, 0);
    pencil.button_down(&held, &mut canvas);
    for x in 5..=9 {
        assert_eq!(canvas.pixel(x, 5), Some(FG));
    }

    pencil.button_up(&context(&font, 9, 5), &mut canvas);
    assert!(!pencil.is_busy());

    // a fresh press marks a single point whatever the last frame's movement
    let mut press = context(&font, 30, 30);
    press.pointer_delta = Point::new(10, 12);
    pencil.button_down(&press, &mut canvas);
    assert_eq!(canvas.pixel(20, 18), Some(BG));
    assert_eq!(count(&canvas, FG), 6);
}

#[test]
fn test_type_buffer_editing() {
    let mut tool = TypeTool::new(false);

    tool.handle_text("AB");
    tool.handle_key(Key::Enter);
    tool.handle_text("C");
    assert_eq!(tool.text(), "AB\nC");
    assert_eq!(tool.rows(), 2);

    tool.handle_key(Key::Backspace);
    assert_eq!(tool.text(), "AB\n");
    assert_eq!(tool.rows(), 2);

    tool.handle_key(Key::Backspace);
    assert_eq!(tool.text(), "AB");
    assert_eq!(tool.rows(), 1);
}

#[test]
fn test_type_backspace_on_empty_buffer() {
    let mut tool = TypeTool::new(false);
    tool.handle_key(Key::Backspace);
    assert_eq!(tool.text(), "");
    assert_eq!(tool.rows(), 1);
}

#[test]
fn test_type_escape_clears_and_requests_exit() {
    let mut tool = TypeTool::new(false);
    tool.handle_text("hello");
    assert_eq!(tool.handle_key(Key::Escape), Some(ToolRequest::Exit));
    assert_eq!(tool.text(), "");
}

#[test]
fn test_type_ignores_control_chars() {
    let mut tool = TypeTool::new(false);
    tool.handle_text("a\u{8}\tb");
    assert_eq!(tool.text(), "ab");
}

#[test]
fn test_type_drops_first_char_when_configured() {
    let mut tool = TypeTool::new(true);
    tool.activate();
    tool.handle_text("T");
    tool.handle_text("xy");
    assert_eq!(tool.text(), "xy");

    // re-armed on every activation
    tool.exit();
    tool.activate();
    tool.handle_text("Tz");
    assert_eq!(tool.text(), "z");
}

#[test]
fn test_type_commit_blits_buffer_at_pointer() {
    let font = test_font();
    let mut canvas = canvas();
    let mut tool = TypeTool::new(false);

    tool.handle_text("HI");
    tool.handle_key(Key::Enter);
    tool.handle_text("X");
    tool.button_down(&context(&font, 20, 30), &mut canvas);

    assert_eq!(canvas.pixel(20, 30), Some(glyph_marker('H')));
    assert_eq!(canvas.pixel(20 + CELL_W as i32, 30), Some(glyph_marker('I')));
    assert_eq!(canvas.pixel(20, 39), Some(glyph_marker('X')));
    assert_eq!(tool.text(), "");

    // nothing left to commit
    let snapshot = canvas.clone();
    tool.button_down(&context(&font, 60, 60), &mut canvas);
    assert_eq!(canvas, snapshot);
}

#[test]
fn test_type_preview_draws_text_and_cursor() {
    let font = test_font();
    let mut display = canvas();
    let mut tool = TypeTool::new(false);
    tool.handle_text("AB");
    tool.handle_key(Key::Enter);
    tool.handle_text("C");

    tool.draw_cursor(&context(&font, 10, 10), &mut display);
    assert_eq!(display.pixel(10, 10), Some(glyph_marker('A')));
    // block cursor after "C" on the second line
    assert_eq!(display.pixel(17, 19), Some(FG));
    assert_eq!(display.pixel(23, 27), Some(FG));
    assert_eq!(display.pixel(24, 19), Some(BG));

    let mut hidden = canvas();
    let mut ctx = context(&font, 10, 10);
    ctx.cursor_visible = false;
    tool.draw_cursor(&ctx, &mut hidden);
    assert_eq!(hidden.pixel(17, 19), Some(BG));
}
