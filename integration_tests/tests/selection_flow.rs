mod common;

use anyhow::{Context, Result};
use grid_core::{CurtailmentLevel, DetailView, SelectionCursor, TriggerOrigin};

#[tokio::test]
async fn selecting_twice_leaves_one_highlight() -> Result<()> {
    let mut dash = common::fixture_dashboard("three_regions.json").await?;
    let first = dash.select_region("B");
    let second = dash.select_region("B");

    assert_eq!(first.cursor, second.cursor);
    assert_eq!(first.detail, second.detail);
    assert_eq!(second.revision, first.revision + 1);

    let highlighted: Vec<_> = dash
        .cards()
        .iter()
        .filter(|card| dash.selection().is_highlighted(card.region_id.as_str()))
        .collect();
    assert_eq!(highlighted.len(), 1);
    assert_eq!(highlighted[0].region_id.as_str(), "B");

    let detail = dash.selection().detail().region().context("B resolves")?;
    assert_eq!(detail.region_id.as_str(), "B");
    Ok(())
}

#[tokio::test]
async fn unknown_region_yields_not_found() -> Result<()> {
    let mut dash = common::fixture_dashboard("three_regions.json").await?;
    dash.select_region("A");
    let camera_before = dash.selection().camera_target().cloned();

    let change = dash.select_region("nonexistent");
    assert_eq!(
        change.cursor,
        SelectionCursor::Selected("nonexistent".into())
    );
    assert!(matches!(change.detail, DetailView::NotFound { .. }));
    assert!(change.highlight.is_none());
    assert!(change.focus.is_none());
    assert_eq!(dash.selection().camera_target().cloned(), camera_before);
    Ok(())
}

#[tokio::test]
async fn marker_click_and_card_click_converge() -> Result<()> {
    let mut dash = common::fixture_dashboard("three_regions.json").await?;
    let sender = dash.selection_sender();

    let marker = dash.layers()[0]
        .click_target()
        .cloned()
        .context("A is clickable")?;
    marker.activate(&sender);
    let via_marker = dash.process_events().context("marker event applied")?;

    dash.clear_selection();
    dash.cards()[0].clone().activate(&sender);
    let via_card = dash.process_events().context("card event applied")?;

    assert_eq!(via_marker.cursor, via_card.cursor);
    assert_eq!(via_marker.highlight, via_card.highlight);
    assert_eq!(via_marker.focus, via_card.focus);
    assert_eq!(via_marker.detail, via_card.detail);

    let detail = via_card.detail.region().context("A resolves")?;
    assert_eq!(detail.curtailment_level, CurtailmentLevel::Elevated);
    assert_eq!(detail.renewable_applications.display, "1,234");
    Ok(())
}

#[tokio::test]
async fn last_event_wins_camera() -> Result<()> {
    let mut dash = common::fixture_dashboard("three_regions.json").await?;
    let sender = dash.selection_sender();
    sender.send("A".into(), TriggerOrigin::MapMarker);
    sender.send("B".into(), TriggerOrigin::SummaryCard);
    dash.process_events();

    let camera = dash.selection().camera_target().context("camera requested")?;
    assert_eq!(camera.region_id.as_str(), "B");
    assert_eq!(camera.zoom, 5.5);
    assert_eq!(camera.duration_secs, 1.5);
    Ok(())
}

#[tokio::test]
async fn clearing_restores_placeholder() -> Result<()> {
    let mut dash = common::fixture_dashboard("three_regions.json").await?;
    dash.select_region("A");
    let change = dash.clear_selection();
    assert_eq!(change.cursor, SelectionCursor::Unselected);
    assert_eq!(change.detail, DetailView::placeholder());
    assert!(dash.selection().highlight().is_none());
    Ok(())
}
