use std::f64::consts::TAU;

use onedollar::{Gesture, RecognitionService, load_gesture};

fn circle(cx: f64, cy: f64, r: f64, start: f64) -> Gesture {
    Gesture::from_points((0..=32).map(|i| {
        let t = start + TAU * i as f64 / 32.0;
        (cx + r * t.cos(), cy + r * t.sin())
    }))
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::io::stderr)
        .init();

    let service = RecognitionService::with_defaults();
    let shapes = [
        ("circle", circle(100.0, 100.0, 60.0, 0.0)),
        (
            "triangle",
            Gesture::from_points([(100.0, 20.0), (170.0, 140.0), (30.0, 140.0), (100.0, 20.0)]),
        ),
        ("caret", Gesture::from_points([(20.0, 140.0), (100.0, 30.0), (180.0, 140.0)])),
        ("check", Gesture::from_points([(20.0, 80.0), (70.0, 140.0), (190.0, 20.0)])),
        (
            "zigzag",
            Gesture::from_points([
                (20.0, 100.0),
                (60.0, 20.0),
                (100.0, 100.0),
                (140.0, 20.0),
                (180.0, 100.0),
            ]),
        ),
    ];
    for (label, gesture) in &shapes {
        service.add_template(*label, gesture).expect("template shapes are non-empty");
    }

    let drawn = match std::env::args().nth(1) {
        Some(path) => vec![(path.clone(), load_gesture(&path).expect("Failed to read gesture"))],
        None => vec![
            ("small circle".to_string(), circle(40.0, 40.0, 15.0, 0.7)),
            (
                "tilted caret".to_string(),
                Gesture::from_points([(10.0, 120.0), (110.0, 40.0), (160.0, 160.0)]),
            ),
            ("scribble".to_string(), Gesture::from_points([(0.0, 0.0), (50.0, 5.0)])),
        ],
    };

    for (name, gesture) in drawn {
        match service.rank(&gesture, 3) {
            Ok(ranked) => {
                println!("{name}:");
                for m in ranked {
                    println!("  {:<10} {:>8.3}  ({:.3})", m.label, m.score, m.similarity(50.0));
                }
            }
            Err(e) => eprintln!("Error: {}", e),
        }
    }
}
