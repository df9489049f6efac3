use super::*;
use crate::config::model::{DiagramConfig, FontFaces};
use crate::encode::sink::InMemorySink;

const BOLD: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf";
const REGULAR: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";

fn quick_composer(nodes: usize) -> Option<FrameComposer> {
    if !std::path::Path::new(BOLD).is_file() || !std::path::Path::new(REGULAR).is_file() {
        return None;
    }
    let mut cfg = DiagramConfig::default();
    cfg.fonts = FontFaces {
        bold: BOLD.into(),
        medium: REGULAR.into(),
    };
    cfg.scale = 1;
    cfg.nodes.truncate(nodes);
    cfg.timing = Timing {
        title_hold: 2,
        node_hold: 3,
        final_hold: 4,
        frame_duration_ms: 100,
        final_duration_ms: 150,
    };
    Some(FrameComposer::from_config(cfg).unwrap())
}

#[test]
fn default_timing_yields_ninety_eight_entries() {
    let timing = Timing::default();
    let steps = plan_timeline(&timing, 8);
    assert_eq!(steps.len(), 98);
    assert_eq!(timeline_len(&timing, 8), 98);
}

#[test]
fn phases_appear_in_order_with_expected_visibility() {
    let timing = Timing::default();
    let steps = plan_timeline(&timing, 8);

    let title = &steps[..12];
    assert!(title.iter().all(|s| s.phase == Phase::TitleOnly && s.visible == 0 && !s.connectors));

    let reveal = &steps[12..12 + 56];
    for (k, s) in reveal.iter().enumerate() {
        let n = k / 7 + 1;
        assert_eq!(s.phase, Phase::Reveal);
        assert_eq!(s.visible, n);
        assert_eq!(s.connectors, n > 1);
    }

    let hold = &steps[68..];
    assert_eq!(hold.len(), 30);
    assert!(hold.iter().all(|s| s.phase == Phase::FinalHold && s.visible == 8 && s.connectors));
}

#[test]
fn final_hold_durations_exceed_every_earlier_duration() {
    let timing = Timing::default();
    let steps = plan_timeline(&timing, 8);
    let (early, late) = steps.split_at(steps.len() - timing.final_hold as usize);
    let max_early = early.iter().map(|s| s.duration_ms).max().unwrap();
    assert!(late.iter().all(|s| s.duration_ms > max_early));
    assert!(late.iter().all(|s| s.duration_ms == timing.final_duration_ms));
}

#[test]
fn single_node_diagram_never_enables_connectors_during_reveal() {
    let timing = Timing::default();
    let steps = plan_timeline(&timing, 1);
    assert_eq!(steps.len(), 12 + 7 + 30);
    assert!(
        steps
            .iter()
            .filter(|s| s.phase == Phase::Reveal)
            .all(|s| !s.connectors)
    );
}

#[test]
fn assemble_renders_each_distinct_frame_once() {
    let Some(mut composer) = quick_composer(3) else {
        return;
    };
    let anim = assemble(&mut composer).unwrap();

    assert_eq!(anim.len(), 2 + 3 * 3 + 4);
    // title, three reveal states, and the final hold shares the last reveal frame.
    assert_eq!(anim.distinct_frames(), 4);

    let last = anim.last_frame().unwrap();
    let fresh = composer.compose(3, true).unwrap();
    assert_eq!(**last, fresh);
    assert_eq!(anim.total_duration_ms(), 11 * 100 + 4 * 150);
}

#[test]
fn stream_into_forwards_every_entry_in_order() {
    let Some(mut composer) = quick_composer(2) else {
        return;
    };
    let anim = assemble(&mut composer).unwrap();
    let mut sink = InMemorySink::new();
    anim.stream_into(&mut sink).unwrap();

    assert!(sink.is_finished());
    assert_eq!(sink.frames().len(), anim.len());
    let durations: Vec<u16> = sink.frames().iter().map(|(_, d)| *d).collect();
    assert_eq!(durations, anim.durations());
    let cfg = sink.config().unwrap();
    assert_eq!((cfg.width, cfg.height), (800, 998));
}

#[test]
fn streaming_an_empty_animation_fails() {
    let mut sink = InMemorySink::new();
    assert!(Animation::default().stream_into(&mut sink).is_err());
}
