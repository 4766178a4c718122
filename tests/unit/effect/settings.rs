use super::*;

const VH: f64 = 1000.0;

fn opts() -> ParallaxOptions {
    ParallaxOptions::new(".s")
}

fn rect_at(top: f64, blocks: usize) -> Rect {
    Rect::new(0.0, top, 800.0, top + VH * (blocks as f64 + 1.0))
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn below_viewport_is_before_first_block() {
    let s = compute_block_settings(rect_at(250.0, 3), VH, 3, &opts());
    assert_eq!(s.active, ActiveSlot::Before);
    assert_eq!(s.active.raw(3), -1);
    assert_eq!(s.offset, 40.0);
    assert_eq!(s.opacity, None);
    assert_eq!(s.next, 0);
}

#[test]
fn above_viewport_is_after_last_block() {
    let s = compute_block_settings(Rect::new(0.0, -5000.0, 800.0, -1.0), VH, 3, &opts());
    assert_eq!(s.active, ActiveSlot::After);
    assert_eq!(s.active.raw(3), 3);
    assert_eq!(s.offset, -40.0);
    assert_eq!(s.opacity, None);
    assert_eq!(s.next, 2);
}

#[test]
fn halfway_through_second_block() {
    let s = compute_block_settings(rect_at(-1.5 * VH, 3), VH, 3, &opts());
    assert_eq!(s.active, ActiveSlot::Block(1));
    assert!(approx(s.offset, 0.0));
    assert_eq!(s.opacity, Some(1.0));
    assert_eq!(s.next, 2);
}

#[test]
fn entering_first_block_slides_in() {
    let s = compute_block_settings(rect_at(-200.0, 3), VH, 3, &opts());
    assert_eq!(s.active, ActiveSlot::Block(0));
    assert!(approx(s.offset, 24.0));
    assert_eq!(s.opacity, Some(1.0));
    assert_eq!(s.next, 1);
}

#[test]
fn fading_block_reports_partial_opacity() {
    // top % vh = -100 -> offset 32
    let s = compute_block_settings(rect_at(-1100.0, 3), VH, 3, &opts());
    assert_eq!(s.active, ActiveSlot::Block(1));
    assert!(approx(s.offset, 32.0));
    let opacity = s.opacity.unwrap();
    assert!(approx(opacity, 1.0 - 7.0 / 15.0));
    // positive offset in the middle of the stack: previous block underneath
    assert_eq!(s.next, 0);
}

#[test]
fn last_block_points_back() {
    let s = compute_block_settings(rect_at(-2300.0, 3), VH, 3, &opts());
    assert_eq!(s.active, ActiveSlot::Block(2));
    assert!(approx(s.offset, 16.0));
    assert_eq!(s.next, 1);
}

#[test]
fn top_edge_exactly_at_zero_is_before() {
    let s = compute_block_settings(rect_at(0.0, 3), VH, 3, &opts());
    assert_eq!(s.active, ActiveSlot::Before);
    assert_eq!(s.offset, 40.0);
    assert_eq!(s.opacity, Some(0.0));
    assert_eq!(s.next, 0);
}

#[test]
fn tail_of_container_is_after() {
    let s = compute_block_settings(rect_at(-3500.0, 3), VH, 3, &opts());
    assert_eq!(s.active, ActiveSlot::After);
    assert_eq!(s.next, 2);
}

#[test]
fn next_is_always_a_real_block() {
    for count in 1..=5usize {
        let mut top = 600.0;
        while top > -(count as f64 + 2.0) * VH {
            let rect = rect_at(top, count);
            let s = compute_block_settings(rect, VH, count, &opts());
            assert!(s.next < count, "count={count} top={top} next={}", s.next);
            assert!(s.offset.abs() <= 40.0);
            top -= 37.0;
        }
    }
}

#[test]
fn select_next_tie_breaks() {
    assert_eq!(select_next(-1, 4, 40.0), 0);
    assert_eq!(select_next(0, 4, 10.0), 1);
    assert_eq!(select_next(3, 4, 10.0), 2);
    assert_eq!(select_next(4, 4, -40.0), 3);
    assert_eq!(select_next(2, 4, 5.0), 1);
    assert_eq!(select_next(2, 4, -5.0), 3);
    assert_eq!(select_next(2, 4, 0.0), 3);
    assert_eq!(select_next(0, 1, 0.0), 0);
    assert_eq!(select_next(1, 1, -40.0), 0);
}

#[test]
fn slot_raw_round_trips_sentinels() {
    assert_eq!(ActiveSlot::from_raw(-1, 3), ActiveSlot::Before);
    assert_eq!(ActiveSlot::from_raw(3, 3), ActiveSlot::After);
    assert_eq!(ActiveSlot::from_raw(7, 3), ActiveSlot::After);
    assert_eq!(ActiveSlot::from_raw(2, 3), ActiveSlot::Block(2));
    assert_eq!(ActiveSlot::Block(2).block(), Some(2));
    assert_eq!(ActiveSlot::After.block(), None);
}
