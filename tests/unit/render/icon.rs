use super::*;

const WHITE: [u8; 4] = [255, 255, 255, 255];

fn render(kind: IconKind) -> image::RgbaImage {
    let mut p = Painter::new(200, 200).unwrap();
    p.clear(WHITE);
    draw_icon(&mut p, kind, Point::new(100.0, 100.0), 45).unwrap();
    p.finish_rgba().unwrap()
}

fn px(img: &image::RgbaImage, x: u32, y: u32) -> [u8; 4] {
    img.get_pixel(x, y).0
}

#[test]
fn every_icon_stays_inside_its_layer() {
    for kind in IconKind::ALL {
        let img = render(kind);
        for (x, y, p) in img.enumerate_pixels() {
            let inside = (55..145).contains(&x) && (55..145).contains(&y);
            if !inside {
                assert_eq!(p.0, WHITE, "{kind:?} leaked at ({x},{y})");
            }
        }
        assert!(
            img.pixels().any(|p| p.0 != WHITE),
            "{kind:?} drew nothing"
        );
    }
}

#[test]
fn starburst_has_orange_core_and_upward_ray() {
    let img = render(IconKind::Starburst);
    assert_eq!(px(&img, 100, 100), STARBURST_ORANGE);
    assert_eq!(px(&img, 100, 70), STARBURST_ORANGE);
    assert_eq!(px(&img, 57, 57), WHITE);
}

#[test]
fn starburst_first_ray_points_up() {
    let ray = starburst_ray(45.0, 0);
    assert!(ray[1].y < 45.0 && ray[2].y < 45.0);
    assert!(((ray[1].x + ray[2].x) / 2.0 - 45.0).abs() < 1e-9);
    let outer_half = (ray[1].x - ray[2].x).abs() / 2.0;
    let inner_half = (ray[0].x - ray[3].x).abs() / 2.0;
    assert!(outer_half < inner_half);
}

#[test]
fn camera_quadrants_and_play_wedge() {
    let img = render(IconKind::Camera);
    assert_eq!(px(&img, 75, 85), CAMERA_BLUE);
    assert_eq!(px(&img, 105, 85), CAMERA_GREEN);
    assert_eq!(px(&img, 75, 110), CAMERA_RED);
    assert_eq!(px(&img, 105, 110), CAMERA_YELLOW);
    assert_eq!(px(&img, 125, 100), CAMERA_GREEN);
}

#[test]
fn document_has_body_and_rules() {
    let img = render(IconKind::Document);
    assert_eq!(px(&img, 100, 95), DOC_FILL);
    assert_eq!(px(&img, 95, 100), DOC_LINE);
}

#[test]
fn linked_nodes_rings_and_background() {
    let img = render(IconKind::LinkedNodes);
    assert_eq!(px(&img, 63, 100), LINKED_PINK);
    assert_eq!(px(&img, 129, 78), LINKED_PINK);
    assert_eq!(px(&img, 60, 135), WHITE);
}

#[test]
fn oversized_icon_is_an_error() {
    let mut painter = Painter::new(8, 8).unwrap();
    let err = draw_icon(
        &mut painter,
        IconKind::Document,
        Point::new(4.0, 4.0),
        u32::MAX,
    )
    .unwrap_err();
    assert!(matches!(err, FlowgramError::Render(_)));
}
