//! End-to-end recognition and template persistence through the public API.

use std::f64::consts::TAU;

use onedollar::{
    Angle, Error, Gesture, GeometryError, Point, Recognition, RecognitionService, RecognizerConfig,
    Stage, TemplateDocument, TemplateLoadError, TemplateRecord,
};

fn circle(points: usize, rotation_deg: f64) -> Gesture {
    let r = rotation_deg.to_radians();
    Gesture::from_points((0..=points).map(|i| {
        let t = i as f64 / points as f64 * TAU + r;
        (100.0 + 40.0 * t.cos(), 100.0 + 40.0 * t.sin())
    }))
}

fn line() -> Gesture {
    Gesture::from_points([(0.0, 0.0), (25.0, 5.0), (50.0, 10.0), (100.0, 20.0)])
}

fn triangle() -> Gesture {
    Gesture::from_points([(50.0, 0.0), (100.0, 90.0), (0.0, 90.0), (50.0, 0.0)])
}

fn zigzag() -> Gesture {
    Gesture::from_points([(0.0, 50.0), (25.0, 0.0), (50.0, 50.0), (75.0, 0.0), (100.0, 50.0)])
}

fn service_with_shapes() -> RecognitionService {
    let service = RecognitionService::with_defaults();
    service.add_template("circle", &circle(8, 0.0)).unwrap();
    service.add_template("triangle", &triangle()).unwrap();
    service.add_template("zigzag", &zigzag()).unwrap();
    service
}

// ============================================================================
// Recognition
// ============================================================================

#[test]
fn rotated_circle_is_recognized() {
    let service = RecognitionService::with_defaults();
    service.add_template("circle", &circle(8, 0.0)).unwrap();

    let rec = service.recognize(&circle(8, 10.0)).unwrap();
    assert_eq!(rec.label(), Some("circle"));
    assert!(rec.score().unwrap() < 5.0, "{rec}");
}

#[test]
fn straight_line_does_not_look_like_a_circle() {
    let service = RecognitionService::with_defaults();
    service.add_template("circle", &circle(8, 0.0)).unwrap();

    let circle_score = service.recognize(&circle(8, 10.0)).unwrap().score().unwrap();
    let line_score = service.recognize(&line()).unwrap().score().unwrap();
    assert!(line_score > 10.0, "line scored {line_score}");
    assert!(line_score > 50.0 * circle_score);
}

#[test]
fn each_shape_recognizes_as_itself() {
    let service = service_with_shapes();
    let shapes = [("circle", circle(8, 0.0)), ("triangle", triangle()), ("zigzag", zigzag())];
    for (label, gesture) in shapes {
        let rec = service.recognize(&gesture).unwrap();
        assert_eq!(rec.label(), Some(label));
        assert!(rec.score().unwrap() < 0.5, "{label}: {rec}");
    }
}

#[test]
fn recognition_ignores_position_and_size() {
    let service = service_with_shapes();
    let moved: Gesture = Gesture::from_points(
        triangle().strokes()[0]
            .points()
            .iter()
            .map(|p| Point::new(p.x * 0.3 + 400.0, p.y * 0.3 - 80.0)),
    );
    assert_eq!(service.recognize(&moved).unwrap().label(), Some("triangle"));
}

#[test]
fn multi_stroke_gesture_is_flattened_in_order() {
    let service = service_with_shapes();
    let mut drawn = Gesture::new();
    for (i, p) in zigzag().strokes()[0].points().iter().enumerate() {
        drawn.add_point(*p);
        if i == 2 {
            drawn.end_stroke();
        }
    }
    assert_eq!(drawn.strokes().len(), 2);
    assert_eq!(service.recognize(&drawn).unwrap().label(), Some("zigzag"));
}

#[test]
fn duplicate_labels_keep_first_on_ties() {
    let service = RecognitionService::with_defaults();
    service.add_template("first", &triangle()).unwrap();
    service.add_template("second", &triangle()).unwrap();
    assert_eq!(service.recognize(&triangle()).unwrap().label(), Some("first"));
}

#[test]
fn rank_lists_best_first() {
    let service = service_with_shapes();
    let ranked = service.rank(&circle(16, 30.0), 3).unwrap();
    let labels: Vec<_> = ranked.iter().map(|m| m.label.as_str()).collect();
    assert_eq!(labels[0], "circle");
    assert_eq!(labels.len(), 3);
    assert!(ranked.windows(2).all(|w| w[0].score <= w[1].score));
    assert!(ranked[0].similarity(service.config().square_size) > 0.9);
}

#[test]
fn empty_set_is_unrecognized() {
    let service = RecognitionService::with_defaults();
    assert_eq!(service.recognize(&line()).unwrap(), Recognition::Unrecognized);
}

#[test]
fn oversized_coordinates_are_an_error() {
    let service = service_with_shapes();
    let huge = Gesture::from_points([(-1e308, 0.0), (1e308, 0.0)]);

    let err = service.recognize(&huge).unwrap_err();
    assert!(matches!(err, Error::Geometry(GeometryError::Overflow { .. })), "{err}");
    assert!(service.rank(&huge, 3).is_err());

    assert!(service.add_template("huge", &huge).is_err());
    assert_eq!(service.template_count(), 3);
}

#[test]
fn templates_are_snapshots() {
    let service = service_with_shapes();
    let before = service.templates();
    service.add_template("line", &line()).unwrap();
    assert_eq!(before.len(), 3);
    assert_eq!(service.template_count(), 4);
}

#[test]
fn stages_run_cumulatively() {
    let service = RecognitionService::with_defaults();
    let resampled = service.stage(&triangle(), Stage::Resample).unwrap();
    assert_eq!(resampled.len(), 128);
    assert_eq!(resampled.first(), Point::new(50.0, 0.0));

    let scaled = service.stage(&triangle(), Stage::Scale).unwrap();
    let bb = scaled.bounding_box();
    assert!((bb.width() - 50.0).abs() < 1e-9);
    assert!((bb.height() - 50.0).abs() < 1e-9);

    let normalized = service.normalize(&triangle()).unwrap();
    assert_eq!(service.stage(&triangle(), Stage::Translate).unwrap(), normalized);
    assert!(normalized.centroid().distance(Point::ORIGIN) < 1e-9);
}

#[test]
fn custom_config_is_honored() {
    let config = RecognizerConfig {
        resample_count: 64,
        square_size: 250.0,
        angle_range: Angle(30.0),
        angle_threshold: Angle(1.0),
    };
    let service = RecognitionService::new(config).unwrap();
    service.add_template("circle", &circle(8, 0.0)).unwrap();

    let path = service.normalize(&triangle()).unwrap();
    assert_eq!(path.len(), 64);
    assert!((path.bounding_box().width() - 250.0).abs() < 1e-9);
    assert_eq!(service.recognize(&circle(8, 5.0)).unwrap().label(), Some("circle"));
}

// ============================================================================
// Persistence
// ============================================================================

#[test]
fn save_and_load_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("templates.json");

    let service = service_with_shapes();
    service.add_template("circle", &circle(16, 0.0)).unwrap();
    service.save_templates(&file).unwrap();

    let restored = RecognitionService::with_defaults();
    assert_eq!(restored.load_templates(&file).unwrap(), 4);
    assert_eq!(restored.templates(), service.templates());

    let labels: Vec<_> = restored.templates().iter().map(|t| t.label().to_string()).collect();
    assert_eq!(labels, ["circle", "triangle", "zigzag", "circle"]);
}

#[test]
fn load_replaces_existing_templates() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("one.json");

    let source = RecognitionService::with_defaults();
    source.add_template("line", &line()).unwrap();
    source.save_templates(&file).unwrap();

    let service = service_with_shapes();
    service.load_templates(&file).unwrap();
    assert_eq!(service.template_count(), 1);
    assert_eq!(service.recognize(&circle(8, 0.0)).unwrap().label(), Some("line"));
}

#[test]
fn invalid_document_leaves_store_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("bad.json");

    service_with_shapes().save_templates(&file).unwrap();
    let mut document = TemplateDocument::load(&file).unwrap();
    document.templates.push(TemplateRecord {
        label: "stub".into(),
        points: vec![Point::new(1.0, 1.0); 12],
    });
    document.save(&file).unwrap();

    let service = service_with_shapes();
    let before = service.templates();
    let err = service.load_templates(&file).unwrap_err();
    assert!(matches!(
        err,
        Error::TemplateLoad(TemplateLoadError::WrongPointCount {
            index: 3,
            expected: 128,
            found: 12,
            ..
        })
    ));
    assert_eq!(service.templates(), before);
}

#[test]
fn point_count_must_match_configuration() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("small.json");

    let small = RecognitionService::new(RecognizerConfig {
        resample_count: 32,
        ..Default::default()
    })
    .unwrap();
    small.add_template("triangle", &triangle()).unwrap();
    small.save_templates(&file).unwrap();

    let service = RecognitionService::with_defaults();
    assert!(service.load_templates(&file).is_err());
    assert_eq!(service.template_count(), 0);
}

#[test]
fn append_creates_and_extends_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("nested.json");
    assert!(!file.exists());

    let service = RecognitionService::with_defaults();
    service.append_template(&file, "circle", &circle(8, 0.0)).unwrap();
    service.append_template(&file, "zigzag", &zigzag()).unwrap();

    let document = TemplateDocument::load(&file).unwrap();
    let labels: Vec<_> = document.templates.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, ["circle", "zigzag"]);
    assert!(document.templates.iter().all(|t| t.points.len() == 128));
}

#[test]
fn failed_append_keeps_store() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("missing-dir").join("templates.json");

    let service = service_with_shapes();
    let err = service.append_template(&file, "line", &line()).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
    assert_eq!(service.template_count(), 3);
}

#[test]
fn malformed_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("garbage.json");
    std::fs::write(&file, r#"{"version": 1, "templates": [{"label": 7}]}"#).unwrap();

    let service = service_with_shapes();
    assert!(matches!(
        service.load_templates(&file),
        Err(Error::TemplateLoad(TemplateLoadError::Malformed { .. }))
    ));
    assert_eq!(service.template_count(), 3);
}

// ============================================================================
// Messages
// ============================================================================

#[test]
fn error_messages() {
    let empty = RecognitionService::with_defaults()
        .recognize(&Gesture::new())
        .unwrap_err();
    insta::assert_snapshot!(empty.to_string(), @"path has no points");

    let count = RecognitionService::new(RecognizerConfig {
        resample_count: 300,
        ..Default::default()
    })
    .unwrap_err();
    insta::assert_snapshot!(
        count.to_string(),
        @"resample count 300 is outside the supported range 32..=256"
    );

    let mismatch = GeometryError::LengthMismatch { left: 64, right: 128 };
    insta::assert_snapshot!(mismatch.to_string(), @"paths have different lengths: 64 vs 128");

    let missing = RecognitionService::with_defaults()
        .load_templates("/nonexistent/onedollar/templates.json")
        .unwrap_err();
    insta::assert_snapshot!(
        missing.to_string(),
        @"I/O error on /nonexistent/onedollar/templates.json"
    );
}

#[test]
fn recognition_display() {
    let service = RecognitionService::with_defaults();
    insta::assert_snapshot!(service.recognize(&line()).unwrap().to_string(), @"unrecognized");

    service.add_template("line", &line()).unwrap();
    let rec = service.recognize(&line()).unwrap();
    assert!(rec.to_string().starts_with("line (score "));
}
