use std::path::PathBuf;
use std::sync::Arc;

use grid_core::{
    load_dataset, ChartFrame, Dashboard, DashboardConfig, FileSource, GridStatus, MarkerKind,
};

fn bundled_path() -> PathBuf {
    let config = DashboardConfig::builtin();
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(config.data().battery())
}

/// The dataset shipped in `data/` must satisfy the rendering invariants.
#[tokio::test]
async fn bundled_dataset_renders_within_bounds() {
    let dataset = load_dataset(&FileSource::new(bundled_path()))
        .await
        .expect("bundled dataset loads");
    let config = DashboardConfig::builtin();
    let max_radius = config.bubble().max_radius();
    let dash = Dashboard::new(dataset, Arc::clone(&config), ChartFrame::plot(600.0, 160.0));

    assert_eq!(dash.layers().len(), dash.dataset().regions.len());
    for layers in dash.layers() {
        let z: Vec<i32> = layers.markers.iter().map(|m| m.z_index).collect();
        let mut sorted = z.clone();
        sorted.sort_unstable();
        assert_eq!(z, sorted, "markers for {} out of z-order", layers.region_id);

        for marker in &layers.markers {
            if let Some(radius) = marker.radius() {
                assert!(radius > 0.0 && radius <= max_radius);
            }
            if marker.is_interactive() {
                assert_eq!(marker.kind, MarkerKind::Status(GridStatus::UnderReview));
            }
        }
        assert_eq!(
            layers.markers.last().map(|m| m.kind),
            Some(MarkerKind::Label)
        );
    }

    for region in &dash.dataset().regions {
        let bar = grid_core::comparison_bar(region);
        assert!((bar.total() - 100.0).abs() < 1e-9, "{} bar {bar:?}", region.id);
    }
}

#[tokio::test]
async fn bundled_summary_is_not_recomputed() {
    let dataset = load_dataset(&FileSource::new(bundled_path()))
        .await
        .expect("bundled dataset loads");
    let region_sum: f64 = dataset.regions.iter().map(|r| r.under_review).sum();
    let dash = Dashboard::new(
        dataset,
        DashboardConfig::builtin(),
        ChartFrame::plot(600.0, 160.0),
    );

    // The shipped totals intentionally differ from the per-region sum.
    assert_ne!(dash.national().under_review.value, region_sum);
    assert_eq!(
        dash.national().under_review.value,
        dash.dataset().summary.total_under_review
    );
}
