use super::*;

fn canvas() -> Canvas {
    Canvas::new(1290, 2796).unwrap()
}

fn approx(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

#[test]
fn available_width_leaves_eight_percent_each_side() {
    approx(available_width(canvas()), 1290.0 * 0.84);
}

#[test]
fn bottom_single_line_sits_on_anchor() {
    let mut h = Headline::default();
    h.position = TextPosition::Bottom;
    h.offset_y = 12.0;
    let plan = place_headline(1, &h, canvas());
    approx(plan.ys[0], 2796.0 - 2796.0 * 0.12);
    assert_eq!(plan.edge, TextPosition::Bottom);
}

#[test]
fn bottom_multi_line_keeps_last_line_on_anchor() {
    let mut h = Headline::default();
    h.position = TextPosition::Bottom;
    h.offset_y = 10.0;
    h.layer.size_px = 100.0;
    h.line_height_percent = 120.0;
    let plan = place_headline(3, &h, canvas());
    let anchor = 2796.0 * 0.9;
    approx(plan.ys[2], anchor);
    approx(plan.ys[0], anchor - 240.0);
}

#[test]
fn top_lines_step_down_by_line_height() {
    let h = Headline::default();
    let plan = place_headline(2, &h, canvas());
    let anchor = 2796.0 * h.offset_y / 100.0;
    approx(plan.ys[0], anchor);
    approx(plan.ys[1], anchor + h.layer.size_px * h.line_height_percent / 100.0);
}

#[test]
fn subheadline_follows_top_headline_with_gap() {
    let h = Headline::default();
    let hp = place_headline(2, &h, canvas());
    let sub = Subheadline::default();
    let sp = place_subheadline(2, &sub, &h, Some(&hp), canvas());
    approx(sp.ys[0], hp.ys[1] + h.layer.size_px + SUBHEADLINE_GAP);
    approx(sp.ys[1] - sp.ys[0], sub.layer.size_px * 1.4);
}

#[test]
fn subheadline_without_headline_uses_anchor_offset() {
    let h = Headline::default();
    let sub = Subheadline::default();
    let sp = place_subheadline(1, &sub, &h, None, canvas());
    approx(sp.ys[0], text_anchor(&h, canvas()) + SUBHEADLINE_ANCHOR_OFFSET);
}

#[test]
fn subheadline_under_bottom_headline_uses_anchor_offset() {
    let mut h = Headline::default();
    h.position = TextPosition::Bottom;
    let hp = place_headline(1, &h, canvas());
    let sp = place_subheadline(1, &Subheadline::default(), &h, Some(&hp), canvas());
    approx(sp.ys[0], text_anchor(&h, canvas()) + SUBHEADLINE_ANCHOR_OFFSET);
}

#[test]
fn decoration_offsets_flip_with_edge() {
    let top = LinePlan {
        edge: TextPosition::Top,
        size: 100.0,
        line_height: 110.0,
        ys: vec![500.0],
    };
    let bottom = LinePlan {
        edge: TextPosition::Bottom,
        ..top.clone()
    };
    let u_top = decoration_rect(&top, 0, 200.0, 645.0, Decoration::Underline).unwrap();
    let u_bot = decoration_rect(&bottom, 0, 200.0, 645.0, Decoration::Underline).unwrap();
    assert!(u_top.y0 > 500.0);
    assert!(u_bot.y0 < 500.0);
    approx(u_top.width(), 200.0);
    approx(u_top.x0, 545.0);
    approx(u_top.height(), 5.0);
    let s_top = decoration_rect(&top, 0, 200.0, 645.0, Decoration::Strikethrough).unwrap();
    assert!(s_top.y0 < u_top.y0);
}

#[test]
fn decoration_thickness_has_floor() {
    let plan = LinePlan {
        edge: TextPosition::Top,
        size: 8.0,
        line_height: 8.0,
        ys: vec![0.0],
    };
    let r = decoration_rect(&plan, 0, 10.0, 5.0, Decoration::Underline).unwrap();
    approx(r.height(), 1.0);
    assert!(decoration_rect(&plan, 1, 10.0, 5.0, Decoration::Underline).is_none());
}

#[test]
fn line_top_accounts_for_edge() {
    let plan = LinePlan {
        edge: TextPosition::Bottom,
        size: 100.0,
        line_height: 110.0,
        ys: vec![1000.0],
    };
    approx(plan.line_top(0, 120.0), 880.0);
}
