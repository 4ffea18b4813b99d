//! End-to-end tests for the heat-map model.

use heatmap::{
    BoundingBox, GeoCoord, HeatMap, HeatMapOptions, HeatPoint, PointSet, Projection, WebMercator,
    ZoomStatistics,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use renderer::{RenderOptions, TileRenderer};

fn random_points(n: usize, extent: f64, seed: u64) -> Vec<HeatPoint> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            HeatPoint::new(
                rng.gen_range(0.0..extent),
                rng.gen_range(0.0..extent),
                rng.gen_range(0.5..3.0),
            )
        })
        .collect()
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_bounding_region_contains_every_sample() {
    let points = random_points(1_000, 5000.0, 11);
    let model = HeatMap::new(points.clone()).unwrap();
    let region = model.bounding_region();

    for p in &points {
        assert!(region.contains_point(p.x, p.y));
    }
}

#[test]
fn test_statistics_reflect_weights() {
    let mut points = random_points(100, 100.0, 3);
    points.push(HeatPoint::new(50.0, 50.0, 1000.0));
    let model = HeatMap::new(points).unwrap();

    assert_eq!(model.statistics().global_max, 1000.0);
    assert!(model.statistics().coarse_bucket_max >= 1000.0);
}

// ============================================================================
// Index-backed rendering matches a full scan
// ============================================================================

#[test]
fn test_indexed_render_matches_full_scan() {
    let points = random_points(2_000, 4000.0, 23);
    let model = HeatMap::new(points.clone()).unwrap();

    // Same pipeline, but handing the renderer every sample instead of the
    // index query result.
    let renderer = TileRenderer::new(RenderOptions::default()).unwrap();
    let set = PointSet::new(points).unwrap();
    let stats = ZoomStatistics::from_points(
        &set,
        &WebMercator::default().world_bounds(),
        heatmap_common::COARSE_GRID_CELLS,
    );

    let viewport = BoundingBox::new(1000.0, 1000.0, 1256.0, 1256.0);
    let via_index = model.render_tile(&viewport, 1.0).unwrap();
    let via_scan = renderer
        .render_rects(set.iter(), &viewport, 1.0, &stats)
        .unwrap();

    assert_eq!(via_index.len(), via_scan.len());
    for (a, b) in via_index.iter().zip(&via_scan) {
        assert_eq!((a.x, a.y), (b.x, b.y));
        assert_eq!(a.color, b.color);
        assert!((a.alpha - b.alpha).abs() < 1e-12);
    }
}

#[test]
fn test_render_is_order_independent() {
    let points = random_points(300, 500.0, 31);
    let mut shuffled = points.clone();
    shuffled.shuffle(&mut StdRng::seed_from_u64(99));

    let a = HeatMap::new(points).unwrap();
    let b = HeatMap::new(shuffled).unwrap();

    let viewport = BoundingBox::new(100.0, 100.0, 356.0, 356.0);
    let rects_a = a.render_tile(&viewport, 1.0).unwrap();
    let rects_b = b.render_tile(&viewport, 1.0).unwrap();

    assert_eq!(rects_a.len(), rects_b.len());
    for (ra, rb) in rects_a.iter().zip(&rects_b) {
        assert_eq!((ra.x, ra.y), (rb.x, rb.y));
        assert_eq!(ra.color, rb.color);
    }
}

// ============================================================================
// Draw requests
// ============================================================================

#[test]
fn test_viewport_without_samples_renders_nothing() {
    let model = HeatMap::new(vec![HeatPoint::unit(10.0, 10.0)]).unwrap();
    let far = BoundingBox::new(10_000.0, 10_000.0, 10_256.0, 10_256.0);
    assert!(model.render_tile(&far, 1.0).unwrap().is_empty());
}

#[test]
fn test_invalid_zoom_scale_rejected() {
    let model = HeatMap::new(vec![HeatPoint::unit(0.0, 0.0)]).unwrap();
    let viewport = BoundingBox::new(0.0, 0.0, 256.0, 256.0);
    assert!(model.render_tile(&viewport, 0.0).is_err());
    assert!(model.render_tile(&viewport, -0.5).is_err());
    assert!(model.render_tile(&viewport, f64::NAN).is_err());
}

#[test]
fn test_parallel_batch_matches_serial() {
    let model = HeatMap::new(random_points(500, 2000.0, 5)).unwrap();
    let requests: Vec<(BoundingBox, f64)> = (0..8)
        .map(|i| {
            let origin = i as f64 * 256.0;
            (
                BoundingBox::from_origin_size(origin, origin, 256.0, 256.0),
                1.0,
            )
        })
        .collect();

    let parallel = model.render_tiles(&requests);
    assert_eq!(parallel.len(), requests.len());

    for ((viewport, zoom_scale), batched) in requests.iter().zip(parallel) {
        let serial = model.render_tile(viewport, *zoom_scale).unwrap();
        let batched = batched.unwrap();
        assert_eq!(serial.len(), batched.len());
        for (a, b) in serial.iter().zip(&batched) {
            assert_eq!((a.x, a.y), (b.x, b.y));
        }
    }
}

#[test]
fn test_tile_pixels_and_png_shapes() {
    let model = HeatMap::new(vec![HeatPoint::unit(128.0, 128.0)]).unwrap();
    let viewport = BoundingBox::new(0.0, 0.0, 256.0, 256.0);

    let pixels = model.render_tile_pixels(&viewport, 1.0).unwrap();
    assert_eq!(pixels.len(), 256 * 256 * 4);

    let png = model.render_tile_png(&viewport, 1.0).unwrap();
    assert_eq!(&png[..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
}

// ============================================================================
// Geographic construction
// ============================================================================

#[test]
fn test_from_geographic_projects_samples() {
    let projection = WebMercator::default();
    let samples = [
        (GeoCoord::new(47.6062, -122.3321), 1.0), // Seattle
        (GeoCoord::new(45.5152, -122.6784), 1.0), // Portland
    ];
    let model = HeatMap::from_geographic(&samples, &projection).unwrap();

    let region = model.bounding_region();
    for (coord, _) in samples {
        let p = projection.project(coord);
        assert!(region.contains_point(p.x, p.y));
    }

    // Seattle is north of Portland: smaller y in the plane.
    let seattle = projection.project(samples[0].0);
    let portland = projection.project(samples[1].0);
    assert!(seattle.y < portland.y);
}
