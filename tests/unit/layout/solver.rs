use super::*;

fn params(node_count: usize) -> StackParams {
    StackParams {
        node_count,
        card_width: 1560,
        card_height: 195,
        gap: 84,
        canvas_width: 2400,
        canvas_height: 2994,
        title_area_height: 390,
        footer_height: 150,
    }
}

#[test]
fn reference_diagram_positions() {
    let layout = solve_stack(params(8)).unwrap();
    assert_eq!(layout.len(), 8);
    assert_eq!(layout.position(0), Some(Point::new(420.0, 543.0)));
    assert_eq!(layout.position(1), Some(Point::new(420.0, 822.0)));
    assert_eq!(layout.position(7), Some(Point::new(420.0, 543.0 + 7.0 * 279.0)));
    assert_eq!(layout.position(8), None);
}

#[test]
fn from_config_scales_design_pixels() {
    let cfg = DiagramConfig::default();
    assert_eq!(StackParams::from_config(&cfg).unwrap(), params(8));
}

#[test]
fn block_is_centered_in_content_band() {
    for n in 1..=9 {
        for gap in [0u32, 7, 84] {
            let p = StackParams { gap, ..params(n) };
            let layout = solve_stack(p).unwrap();
            let block_center = layout.start_y() + p.total_cards_height() as f64 / 2.0;
            let band_center = f64::from(p.title_area_height) + p.content_height() as f64 / 2.0;
            assert!(
                (block_center - band_center).abs() <= 1.0,
                "n={n} gap={gap}: {block_center} vs {band_center}"
            );
        }
    }
}

#[test]
fn positions_are_evenly_spaced_and_horizontally_centered() {
    let p = params(5);
    let layout = solve_stack(p).unwrap();
    let step = f64::from(p.card_height + p.gap);
    for pair in layout.positions().windows(2) {
        assert_eq!(pair[1].y - pair[0].y, step);
        assert_eq!(pair[0].x, pair[1].x);
    }
    let left = layout.positions()[0].x;
    let right = f64::from(p.canvas_width) - (left + f64::from(p.card_width));
    assert!((left - right).abs() <= 1.0);
}

#[test]
fn overflowing_stack_is_a_layout_error() {
    let err = solve_stack(params(10)).unwrap_err();
    assert!(matches!(err, FlowgramError::Layout(_)));
    assert!(err.to_string().contains("10 cards"));
}

#[test]
fn bands_taller_than_canvas_are_rejected() {
    let p = StackParams {
        title_area_height: 2000,
        footer_height: 1000,
        ..params(1)
    };
    assert!(matches!(solve_stack(p), Err(FlowgramError::Layout(_))));
}

#[test]
fn card_wider_than_canvas_is_rejected() {
    let p = StackParams {
        card_width: 2401,
        ..params(1)
    };
    assert!(matches!(solve_stack(p), Err(FlowgramError::Layout(_))));
}

#[test]
fn empty_stack_has_no_positions() {
    let layout = solve_stack(params(0)).unwrap();
    assert!(layout.is_empty());
    assert_eq!(layout.start_y(), 390.0);
}

#[test]
fn oversized_card_metrics_are_a_layout_error_not_a_panic() {
    let mut cfg = DiagramConfig::default();
    cfg.card.height = 2_000_000_000;
    cfg.validate().unwrap();
    let err = StackParams::from_config(&cfg).unwrap_err();
    assert!(matches!(err, FlowgramError::Layout(_)));
    assert!(err.to_string().contains("card height"));

    let mut cfg = DiagramConfig::default();
    cfg.bands.footer_height = u32::MAX;
    assert!(matches!(
        StackParams::from_config(&cfg),
        Err(FlowgramError::Layout(_))
    ));
}
