// Layout geometry tests

use imprint::compose::layout::*;
use rstest::rstest;

#[rstest]
#[case(1000, 600, 0.2, 0.05, 200, 50)]
#[case(600, 1000, 0.2, 0.05, 200, 50)]
#[case(1920, 1080, 0.25, 0.0, 480, 0)]
#[case(333, 333, 0.1, 0.019, 33, 6)]
#[case(10, 5, 0.0, 0.0, 0, 0)]
fn test_overlay_geometry(
    #[case] width: u32,
    #[case] height: u32,
    #[case] width_mag: f64,
    #[case] margin_mag: f64,
    #[case] expected_width: u32,
    #[case] expected_margin: u32,
) {
    let geometry = overlay_geometry(width, height, width_mag, margin_mag);
    assert_eq!(geometry.width, expected_width);
    assert_eq!(geometry.margin, expected_margin);
}

#[rstest]
#[case(800, 600, 100, 50, 10)]
#[case(1000, 600, 200, 80, 50)]
#[case(64, 64, 64, 64, 0)]
#[case(100, 100, 150, 120, 10)]
fn test_bottom_right_placement_fills_to_edge(
    #[case] canvas_w: u32,
    #[case] canvas_h: u32,
    #[case] overlay_w: u32,
    #[case] overlay_h: u32,
    #[case] margin: u32,
) {
    let point = bottom_right_placement(canvas_w, canvas_h, overlay_w, overlay_h, margin);
    assert_eq!(point.x + overlay_w as i32 + margin as i32, canvas_w as i32);
    assert_eq!(point.y + overlay_h as i32 + margin as i32, canvas_h as i32);
}

#[rstest]
#[case(800, 450)]
#[case(1000, 600)]
#[case(1200, 630)]
fn test_overlay_geometry_scales_with_canvas(#[case] width: u32, #[case] height: u32) {
    let single = overlay_geometry(width, height, 0.25, 0.125);
    let double = overlay_geometry(width * 2, height * 2, 0.25, 0.125);
    assert_eq!(double.width, single.width * 2);
    assert_eq!(double.margin, single.margin * 2);
}

#[rstest]
#[case(100, 50, 25)]
#[case(101, 50, 25)]
#[case(50, 53, -1)]
#[case(0, 0, 0)]
fn test_center_offset(#[case] outer: i32, #[case] inner: i32, #[case] expected: i32) {
    assert_eq!(center_offset(outer, inner), expected);
}

#[test]
fn test_row_layout_positions() {
    let row = row_layout(1200, 4, 100, 30);
    // Row width 430 -> start 385
    assert_eq!(row.start_x, 385);
    assert_eq!(row.positions().collect::<Vec<_>>(), vec![385, 515, 645, 775]);
    assert_eq!(row.x_at(2), 645);
}

#[test]
fn test_layout_is_deterministic() {
    let a = LayoutSpec::bottom_right(1000, 600, overlay_geometry(1000, 600, 0.2, 0.05), 80);
    let b = LayoutSpec::bottom_right(1000, 600, overlay_geometry(1000, 600, 0.2, 0.05), 80);
    assert_eq!(a, b);
    assert_eq!(a.point, Point::new(750, 470));
}
