use onedollar::geometry::indicative_angle;
use onedollar::{Gesture, RecognitionService, Stage, load_gesture};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::io::stderr)
        .init();

    let gesture = std::env::args()
        .nth(1)
        .map(|path| load_gesture(&path).expect("Failed to read gesture"))
        .unwrap_or_else(|| {
            Gesture::from_points([(30.0, 10.0), (90.0, 40.0), (60.0, 95.0), (15.0, 70.0)])
        });

    let service = RecognitionService::with_defaults();
    for stage in Stage::ALL {
        match service.stage(&gesture, stage) {
            Ok(path) => {
                let bb = path.bounding_box();
                println!(
                    "{:<10} points={:<4} length={:>8.3} centroid={} bbox={:.3}x{:.3} angle={:.3}°",
                    stage,
                    path.len(),
                    path.length(),
                    path.centroid(),
                    bb.width(),
                    bb.height(),
                    indicative_angle(&path).to_degrees()
                );
            }
            Err(e) => eprintln!("Error: {}", e),
        }
    }
}
