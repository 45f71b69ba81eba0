mod common;

use anyhow::{Context, Result};
use grid_core::{GridStatus, MarkerKind};

#[tokio::test]
async fn largest_region_gets_full_radius_and_exact_bar() -> Result<()> {
    let dash = common::fixture_dashboard("three_regions.json").await?;
    let max_radius = dash.config().bubble().max_radius();
    assert_eq!(max_radius, 90.0);
    assert_eq!(dash.scale().domain_max(), 50.0);

    let layers = &dash.layers()[0];
    let bubble = layers
        .bubble(GridStatus::UnderReview)
        .context("region A has an under-review bubble")?;
    assert_eq!(bubble.radius(), Some(90.0));

    let bar = grid_core::comparison_bar(&dash.dataset().regions[0]);
    assert_eq!(bar.width(GridStatus::UnderReview), 50.0);
    assert_eq!(bar.width(GridStatus::Contracted), 30.0);
    assert_eq!(bar.width(GridStatus::Connected), 20.0);
    Ok(())
}

#[tokio::test]
async fn radii_follow_square_root_of_share() -> Result<()> {
    let dash = common::fixture_dashboard("three_regions.json").await?;
    let b = dash.layers()[1]
        .bubble(GridStatus::UnderReview)
        .and_then(|marker| marker.radius())
        .context("region B has an under-review bubble")?;
    // 12.5 / 50 = 0.25, sqrt = 0.5
    assert!((b - 45.0).abs() < 1e-9);
    Ok(())
}

#[tokio::test]
async fn timeline_domain_and_positions() -> Result<()> {
    let dash = common::fixture_dashboard("three_regions.json").await?;
    let timeline = dash.timeline().context("timeline is drawn")?;

    assert_eq!(timeline.value_domain.0, 0.0);
    assert!((timeline.value_domain.1 - 220.0).abs() < 1e-9);

    let xs: Vec<f64> = timeline.points.iter().map(|p| p.x).collect();
    assert_eq!(xs.len(), 3);
    assert_eq!(xs[0], 0.0);
    assert_eq!(xs[2], common::PLOT_WIDTH);
    assert!(((xs[1] - xs[0]) - (xs[2] - xs[1])).abs() < 1e-9);

    let labels: Vec<&str> = timeline.points.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, ["Q1", "Q2", "Q3"]);
    assert!(timeline.svg_path().starts_with("M0,"));
    Ok(())
}

#[tokio::test]
async fn zero_radius_markers_are_omitted() -> Result<()> {
    let dash = common::fixture_dashboard("three_regions.json").await?;

    // B has nothing contracted.
    let b = &dash.layers()[1];
    assert_eq!(b.markers.len(), 3);
    assert!(b.bubble(GridStatus::Contracted).is_none());

    // C is all zeros: only its label remains, and nothing is clickable.
    let c = &dash.layers()[2];
    assert_eq!(c.markers.len(), 1);
    assert_eq!(c.markers[0].kind, MarkerKind::Label);
    assert!(c.click_target().is_none());
    Ok(())
}

#[tokio::test]
async fn zero_total_region_has_empty_bar_and_card() -> Result<()> {
    let dash = common::fixture_dashboard("three_regions.json").await?;
    let bar = grid_core::comparison_bar(&dash.dataset().regions[2]);
    assert!(bar.is_empty());
    assert_eq!(bar.total(), 0.0);
    assert_eq!(dash.cards().len(), 3);
    assert_eq!(dash.cards()[2].under_review.display, "0");
    Ok(())
}
