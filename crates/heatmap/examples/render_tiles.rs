//! Render a synthetic point cloud to PNG tiles.
//!
//! Run with: `cargo run -p heatmap --example render_tiles`

use heatmap::{BoundingBox, HeatMap, HeatPoint};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Three clusters in a ~4096-unit neighborhood of the plane.
    let mut rng = StdRng::seed_from_u64(1);
    let centers = [(1024.0, 1024.0), (2800.0, 1400.0), (2000.0, 3000.0)];
    let mut points = Vec::new();
    for &(cx, cy) in &centers {
        for _ in 0..2000 {
            let dx: f64 = rng.gen_range(-300.0..300.0);
            let dy: f64 = rng.gen_range(-300.0..300.0);
            points.push(HeatPoint::unit(cx + dx, cy + dy));
        }
    }

    let model = HeatMap::new(points).unwrap();
    let region = model.bounding_region();
    println!("samples: {}", model.len());
    println!(
        "region: {:.0}x{:.0} at ({:.0}, {:.0}), center ({:.0}, {:.0})",
        region.width(),
        region.height(),
        region.min_x,
        region.min_y,
        model.center().x,
        model.center().y
    );

    // One overview tile framing the whole region, then a close-up on the
    // first cluster.
    let overview_zoom = 256.0 / region.width().max(region.height());
    let jobs = [
        (
            "overview",
            BoundingBox::from_origin_size(
                region.min_x,
                region.min_y,
                256.0 / overview_zoom,
                256.0 / overview_zoom,
            ),
            overview_zoom,
        ),
        (
            "closeup",
            BoundingBox::from_origin_size(900.0, 900.0, 256.0, 256.0),
            1.0,
        ),
    ];

    for (name, viewport, zoom_scale) in jobs {
        let png = model.render_tile_png(&viewport, zoom_scale).unwrap();
        let path = format!("heat_{name}.png");
        std::fs::write(&path, &png).unwrap();
        println!("wrote {path} ({} bytes)", png.len());
    }
}
