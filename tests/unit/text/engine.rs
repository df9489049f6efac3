use super::*;

const BOLD: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf";
const REGULAR: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";

fn engine_if_fonts_present() -> Option<TextEngine> {
    let bold = std::fs::read(BOLD).ok()?;
    let regular = std::fs::read(REGULAR).ok()?;
    Some(
        TextEngine::from_bytes(
            (PathBuf::from(BOLD), bold),
            (PathBuf::from(REGULAR), regular),
            Typography::default(),
            3,
        )
        .unwrap(),
    )
}

#[test]
fn center_start_centers_within_a_pixel() {
    for center in [0.0, 17.0, 1200.0, 1200.5] {
        for extent in [0.0, 1.0, 13.7, 401.25, 1560.0] {
            let start = center_start(center, extent);
            assert_eq!(start, start.round());
            assert!(
                ((start + extent / 2.0) - center).abs() <= 1.0,
                "center={center} extent={extent}"
            );
        }
    }
}

#[test]
fn missing_font_file_is_a_font_error() {
    let faces = FontFaces {
        bold: PathBuf::from("/no/such/Bold.ttf"),
        medium: PathBuf::from("/no/such/Medium.ttf"),
    };
    let err = TextEngine::load(&faces, Typography::default(), 3)
        .err()
        .expect("load must fail");
    assert!(matches!(err, FlowgramError::Font { .. }));
    assert!(err.to_string().contains("/no/such/Bold.ttf"));
}

#[test]
fn garbage_bytes_are_rejected() {
    let err = TextEngine::from_bytes(
        (PathBuf::from("bold.ttf"), b"not a font".to_vec()),
        (PathBuf::from("medium.ttf"), b"still not a font".to_vec()),
        Typography::default(),
        3,
    )
    .err()
    .expect("garbage must fail");
    assert!(matches!(err, FlowgramError::Font { .. }));
    assert!(err.to_string().contains("bold.ttf"));
}

#[test]
fn sizes_are_scaled_to_working_resolution() {
    let Some(engine) = engine_if_fonts_present() else {
        return;
    };
    assert_eq!(engine.size_px(FontRole::Title), 108.0);
    assert_eq!(engine.size_px(FontRole::PhaseTag), 30.0);
    assert!(!engine.face(FontWeight::Bold).family().trim().is_empty());
}

#[test]
fn longer_strings_measure_wider() {
    let Some(mut engine) = engine_if_fonts_present() else {
        return;
    };
    let short = engine.measure("Build", FontRole::NodeLabel).unwrap();
    let long = engine
        .measure("Build the whole workflow", FontRole::NodeLabel)
        .unwrap();
    assert!(short.width > 0.0);
    assert!(long.width > short.width);
    assert!(short.height > 0.0);
}

#[test]
fn bigger_roles_measure_bigger() {
    let Some(mut engine) = engine_if_fonts_present() else {
        return;
    };
    let title = engine.measure("Flow", FontRole::Title).unwrap();
    let tag = engine.measure("Flow", FontRole::PhaseTag).unwrap();
    assert!(title.width > tag.width);
    assert!(title.height > tag.height);
}

#[test]
fn trailing_space_counts_toward_the_width() {
    let Some(mut engine) = engine_if_fonts_present() else {
        return;
    };
    let bare = engine.measure("Transcript", FontRole::Title).unwrap();
    let spaced = engine.measure("Transcript ", FontRole::Title).unwrap();
    let space = engine.measure(" ", FontRole::Title).unwrap();
    assert!(space.width > 0.0);
    assert!(spaced.width > bare.width);
    assert!((spaced.width - bare.width - space.width).abs() < 1.0);
}
