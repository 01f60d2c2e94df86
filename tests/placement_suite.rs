use std::path::Path;

use maplabel::{Config, PlacementEngine, PlacementProperty, parse_scene};

fn run_fixture(path: &Path) -> Vec<Option<PlacementProperty>> {
    let input = std::fs::read_to_string(path).expect("fixture read failed");
    let scene = parse_scene(&input).expect("scene parse failed");
    let config = Config::default();

    let mut engine = PlacementEngine::new();
    scene
        .labels
        .iter()
        .map(|label| {
            let (min_scale, max_scale) = label.window(&config.engine);
            engine.place(
                &label.glyph_boxes(),
                label.anchor_point(),
                min_scale,
                max_scale,
                label.padding(&config.engine),
                label.horizontal,
            )
        })
        .collect()
}

fn assert_placed_flags(results: &[Option<PlacementProperty>], expected: &[bool], fixture: &str) {
    let placed: Vec<bool> = results.iter().map(|r| r.is_some()).collect();
    assert_eq!(placed, expected, "{fixture}: placement flags diverge");
}

#[test]
fn run_all_fixtures() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures");

    // Keep this list explicit so new fixtures must be added intentionally.
    let candidates: [(&str, &[bool]); 4] = [
        ("basic.json", &[true, true]),
        ("crowded_row.json", &[true, false, true, false, true]),
        ("edge_guard.json", &[false, true]),
        ("curved.json", &[true]),
    ];

    for (rel, expected) in candidates {
        let path = root.join(rel);
        assert!(path.exists(), "fixture missing: {rel}");
        let results = run_fixture(&path);
        assert_placed_flags(&results, expected, rel);
    }
}

#[test]
fn disjoint_fixture_labels_land_on_the_floor_scale() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures");
    let results = run_fixture(&root.join("basic.json"));

    for result in results {
        let placed = result.expect("disjoint labels all place");
        // Floor scale 1 -> zoom 0.
        assert_eq!(placed.zoom, 0.0);
    }
}

#[test]
fn crowded_row_survivors_stay_inside_the_window() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures");
    let results = run_fixture(&root.join("crowded_row.json"));

    for placed in results.into_iter().flatten() {
        let scale = placed.zoom.exp2();
        assert!((1.0..=1.5).contains(&scale), "scale {scale} escaped the window");
    }
}
