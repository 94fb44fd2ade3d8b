//! Integration tests for a full mapping session.
//!
//! Drives `MapSession` end to end with a scripted provider and the headless
//! `InMemorySurface`:
//! - load → place → filter for every marker category
//! - coordinate de-duplication across a category, stable across re-mapping
//! - school, team and distance filters
//! - popup toggling and double-click focus
//! - county overlays
//! - starting a new selection releases everything
//!
//! Run with: `cargo test --test session_integration`

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};

use markermap::coord::GeoPoint;
use markermap::entity::{Category, EntityId};
use markermap::loader::PollerConfig;
use markermap::log::{LogLevel, MemoryLogger};
use markermap::popup::GestureOutcome;
use markermap::provider::{RawRecord, ScriptedProvider};
use markermap::session::{MapSession, MappingOutcome, SessionConfig};
use markermap::surface::{InMemorySurface, MarkerGesture, MarkerHandle};
use markermap::visibility::{FilterContext, FirstTeamFilter};

// ============================================================================
// Test Helpers
// ============================================================================

type Session = MapSession<ScriptedProvider, InMemorySurface>;

fn record(value: Value) -> RawRecord {
    serde_json::from_value(value).unwrap()
}

fn team(program: &str, number: u32, lat: f64, lng: f64, extra: Value) -> RawRecord {
    let mut info = json!({
        "Program": program,
        "Team_Number": number,
        "Team_Name": format!("Team {}", number),
        "Registered": "Yes",
        "Geo_Location": { "lat": lat, "lng": lng },
    });
    merge(&mut info, extra);
    record(json!({ "program": program, "info": info }))
}

fn school(id: &str, group: &str, lat: f64, lng: f64, extra: Value) -> RawRecord {
    let mut info = json!({
        "Sch_Id": id,
        "Group_Id": group,
        "School_Name": format!("School {}", id),
        "Geo_Location": { "lat": lat, "lng": lng },
    });
    merge(&mut info, extra);
    record(json!({ "info": info }))
}

fn merge(target: &mut Value, extra: Value) {
    if let (Some(target), Value::Object(extra)) = (target.as_object_mut(), extra) {
        target.extend(extra);
    }
}

fn session_with(provider: ScriptedProvider) -> (Session, Arc<MemoryLogger>) {
    let logger = Arc::new(MemoryLogger::new());
    let config = SessionConfig {
        poller: PollerConfig::new()
            .with_interval(Duration::from_millis(5))
            .with_max_attempts(Some(200)),
        ..SessionConfig::default()
    };
    let mut session = MapSession::with_logger(
        Arc::new(provider),
        InMemorySurface::new(),
        config,
        logger.clone(),
    );
    session.begin(vec!["NH".to_string()], Some("2024".to_string()));
    (session, logger)
}

async fn load_and_map(session: &mut Session, category: Category) {
    session.load(category).await.unwrap();
    session.map_category(category).await.unwrap();
}

fn marker_of(session: &Session, category: Category, id: &str) -> MarkerHandle {
    session
        .dataset()
        .get(category, &EntityId::new(id))
        .and_then(|e| e.marker().copied())
        .map(|slot| slot.marker)
        .unwrap()
}

fn is_visible(session: &Session, marker: MarkerHandle) -> bool {
    session.surface().marker(marker).unwrap().visible
}

// ============================================================================
// Placement
// ============================================================================

#[tokio::test]
async fn test_colliding_teams_get_ring_offsets() {
    let provider = ScriptedProvider::new().with_records(
        Category::Team,
        "NH",
        vec![
            team("FRC", 1, 42.0, -71.0, json!({})),
            team("FRC", 2, 42.0, -71.0, json!({})),
            team("FTC", 3, 42.0, -71.0, json!({})),
        ],
    );
    let (mut session, _) = session_with(provider);

    load_and_map(&mut session, Category::Team).await;

    // Program order: ftc before frc
    let ftc3 = session.team_marker(&EntityId::new("ftc3")).unwrap().position;
    let frc1 = session.team_marker(&EntityId::new("frc1")).unwrap().position;
    let frc2 = session.team_marker(&EntityId::new("frc2")).unwrap().position;
    assert_eq!(ftc3, GeoPoint::new(42.0, -71.0));
    assert_eq!(frc1.canonical_key(), GeoPoint::new(42.001, -71.0).canonical_key());
    assert_eq!(frc2.canonical_key(), GeoPoint::new(42.0, -70.999).canonical_key());

    let keys: HashSet<String> = [ftc3, frc1, frc2].iter().map(|p| p.canonical_key()).collect();
    assert_eq!(keys.len(), 3);
}

#[tokio::test]
async fn test_remapping_keeps_marker_positions() {
    let provider = ScriptedProvider::new().with_records(
        Category::Team,
        "NH",
        vec![
            team("FRC", 1, 42.0, -71.0, json!({})),
            team("FRC", 2, 42.0, -71.0, json!({})),
        ],
    );
    let (mut session, _) = session_with(provider);

    load_and_map(&mut session, Category::Team).await;
    let first: Vec<GeoPoint> = ["frc1", "frc2"]
        .iter()
        .map(|id| session.team_marker(&EntityId::new(*id)).unwrap().position)
        .collect();

    session.map_category(Category::Team).await.unwrap();
    session.map_category(Category::Team).await.unwrap();

    for (id, before) in ["frc1", "frc2"].iter().zip(&first) {
        let after = session.team_marker(&EntityId::new(*id)).unwrap().position;
        assert_eq!(after.canonical_key(), before.canonical_key(), "{} moved", id);
    }
    assert_eq!(first[0], GeoPoint::new(42.0, -71.0));
    assert_eq!(session.resolver().occupied_count(), 2);
    assert_eq!(session.surface().marker_count(), 2);
}

#[tokio::test]
async fn test_markers_start_hidden_and_season_is_scoped() {
    let provider = ScriptedProvider::new()
        .with_records(Category::Team, "NH", vec![team("FLL", 5, 43.0, -71.4, json!({}))])
        .with_records(Category::School, "NH", vec![school("s1", "PUB", 43.1, -71.4, json!({}))]);
    let (mut session, _) = session_with(provider);

    load_and_map(&mut session, Category::Team).await;
    load_and_map(&mut session, Category::School).await;

    assert!(session.surface().visible_markers().is_empty());
    assert_eq!(session.surface().marker_count(), 2);
    assert!(session.dataset().is_mapped(Category::Team));
    assert!(session.dataset().is_mapped(Category::School));
}

#[tokio::test]
async fn test_missing_coordinate_is_logged_and_skipped() {
    let unlocated = record(json!({
        "program": "FRC",
        "info": { "Program": "FRC", "Team_Number": 99, "Registered": "Yes" }
    }));
    let provider = ScriptedProvider::new().with_records(
        Category::Team,
        "NH",
        vec![unlocated, team("FRC", 1, 42.0, -71.0, json!({}))],
    );
    let (mut session, logger) = session_with(provider);

    session.load(Category::Team).await.unwrap();
    let outcome = session.map_category(Category::Team).await.unwrap();

    let MappingOutcome::Markers(report) = outcome else {
        panic!("expected markers");
    };
    assert_eq!(report.placed, 1);
    assert_eq!(report.missing_coordinates(), 1);
    assert!(session.team_marker(&EntityId::new("frc99")).is_none());
    assert!(logger
        .at_level(LogLevel::Info)
        .iter()
        .any(|l| l == "No Geo Location for FRC Team 99"));
}

// ============================================================================
// Visibility
// ============================================================================

#[tokio::test]
async fn test_school_level_filter() {
    let provider = ScriptedProvider::new().with_records(
        Category::School,
        "NH",
        vec![school("s1", "PUB", 43.0, -71.0, json!({ "Target_Levels": ["MS"] }))],
    );
    let (mut session, _) = session_with(provider);
    load_and_map(&mut session, Category::School).await;
    let marker = marker_of(&session, Category::School, "s1");

    session.set_filter(FilterContext::new().with_levels(["HS"]));
    session.set_visibility(Category::School, Some("pub"), true).await.unwrap();
    assert!(!is_visible(&session, marker));

    session.set_filter(FilterContext::new().with_levels(["MS"]));
    session.set_visibility(Category::School, Some("pub"), true).await.unwrap();
    assert!(is_visible(&session, marker));
}

#[tokio::test]
async fn test_school_first_team_filters() {
    let provider = ScriptedProvider::new().with_records(
        Category::School,
        "NH",
        vec![
            school("with", "PUB", 43.0, -71.0, json!({
                "Target_Programs": "FRC,FLL", "First_Teams": ["FRC-1073"]
            })),
            school("without", "PUB", 43.2, -71.0, json!({ "Target_Programs": "FRC" })),
        ],
    );
    let (mut session, _) = session_with(provider);
    load_and_map(&mut session, Category::School).await;
    let with = marker_of(&session, Category::School, "with");
    let without = marker_of(&session, Category::School, "without");

    session.set_filter(
        FilterContext::new()
            .with_target_programs(["FRC"])
            .with_first_teams(FirstTeamFilter::No),
    );
    session.set_visibility(Category::School, None, true).await.unwrap();
    assert!(!is_visible(&session, with));
    assert!(is_visible(&session, without));

    session.set_filter(FilterContext::new().with_first_teams(FirstTeamFilter::Yes));
    session.set_visibility(Category::School, None, true).await.unwrap();
    assert!(is_visible(&session, with));
    assert!(!is_visible(&session, without));
}

#[tokio::test]
async fn test_team_without_grants_fails_grant_filter() {
    let provider = ScriptedProvider::new().with_records(
        Category::Team,
        "NH",
        vec![
            team("FRC", 1, 42.0, -71.0, json!({})),
            team("FRC", 2, 42.5, -71.0, json!({ "Grants": ["Motorola"] })),
        ],
    );
    let (mut session, _) = session_with(provider);
    load_and_map(&mut session, Category::Team).await;

    session.filter_mut().team.grants = vec!["Motorola".to_string()];
    let report = session.set_visibility(Category::Team, Some("frc"), true).await.unwrap();

    assert_eq!(report.shown, 1);
    assert!(!is_visible(&session, marker_of(&session, Category::Team, "frc1")));
    assert!(is_visible(&session, marker_of(&session, Category::Team, "frc2")));
}

#[tokio::test]
async fn test_radius_at_reference_point() {
    let provider = ScriptedProvider::new().with_records(
        Category::Team,
        "NH",
        vec![
            team("FTC", 7, 42.9, -71.3, json!({})),
            team("FTC", 8, 44.9, -71.3, json!({})),
        ],
    );
    let (mut session, _) = session_with(provider);
    load_and_map(&mut session, Category::Team).await;

    session.set_reference(GeoPoint::new(42.9, -71.3), 10.0);
    session.set_visibility(Category::Team, Some("ftc"), true).await.unwrap();

    assert!(is_visible(&session, marker_of(&session, Category::Team, "ftc7")));
    assert!(!is_visible(&session, marker_of(&session, Category::Team, "ftc8")));

    // radius 0 disables the check
    session.set_reference(GeoPoint::new(42.9, -71.3), 0.0);
    session.set_visibility(Category::Team, Some("ftc"), true).await.unwrap();
    assert!(is_visible(&session, marker_of(&session, Category::Team, "ftc8")));
}

#[tokio::test]
async fn test_visibility_is_idempotent_and_hide_program() {
    let provider = ScriptedProvider::new().with_records(
        Category::Team,
        "NH",
        vec![
            team("FLL", 1, 42.0, -71.0, json!({ "Grants": ["NASA"] })),
            team("FLL", 2, 42.1, -71.0, json!({})),
            team("FLL", 3, 42.2, -71.0, json!({ "Grants": ["NASA", "Motorola"] })),
        ],
    );
    let (mut session, _) = session_with(provider);
    load_and_map(&mut session, Category::Team).await;
    session.set_filter(FilterContext::new().with_grants(["NASA"]));

    let first = session.set_visibility(Category::Team, Some("fll"), true).await.unwrap();
    let visible_first = session.surface().visible_markers();
    let second = session.set_visibility(Category::Team, Some("fll"), true).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(visible_first, session.surface().visible_markers());
    assert_eq!(visible_first.len(), 2);

    session.hide_program(Category::Team, "fll").await.unwrap();
    assert!(session.surface().visible_markers().is_empty());
}

#[tokio::test]
async fn test_visibility_before_placement_is_noop() {
    let provider = ScriptedProvider::new()
        .with_records(Category::Unit, "NH", vec![record(json!({
            "info": {
                "Unit": "Troop 12", "Program": "Troop",
                "Geo_Location": { "lat": 43.2, "lng": -70.9 }
            }
        }))]);
    let (mut session, _) = session_with(provider);
    session.load(Category::Unit).await.unwrap();

    let report = session.set_visibility(Category::Unit, Some("troop"), true).await.unwrap();

    assert_eq!(report.unplaced, 1);
    assert_eq!(report.shown + report.hidden, 0);
    assert!(session.unit(&EntityId::new("Troop 12")).is_some());
}

// ============================================================================
// Popups
// ============================================================================

#[tokio::test]
async fn test_popup_singleton_and_focus() {
    let provider = ScriptedProvider::new().with_records(
        Category::Team,
        "NH",
        vec![
            team("FRC", 1, 42.0, -71.0, json!({})),
            team("FRC", 2, 42.5, -71.5, json!({})),
        ],
    );
    let (mut session, _) = session_with(provider);
    load_and_map(&mut session, Category::Team).await;
    let a = marker_of(&session, Category::Team, "frc1");
    let b = marker_of(&session, Category::Team, "frc2");

    assert!(matches!(
        session.handle_gesture(MarkerGesture::Click(a)),
        GestureOutcome::Opened(_)
    ));
    assert!(matches!(
        session.handle_gesture(MarkerGesture::Click(b)),
        GestureOutcome::Switched { .. }
    ));
    assert_eq!(session.surface().open_popups().len(), 1);

    assert!(matches!(
        session.handle_gesture(MarkerGesture::Click(b)),
        GestureOutcome::Closed(_)
    ));
    assert!(session.surface().open_popups().is_empty());

    session.handle_gesture(MarkerGesture::DoubleClick(a));
    assert_eq!(session.surface().view(), Some((GeoPoint::new(42.0, -71.0), 12)));
}

// ============================================================================
// Counties
// ============================================================================

#[tokio::test]
async fn test_county_overlays() {
    let provider = ScriptedProvider::new().with_records(
        Category::County,
        "NH",
        vec![
            record(json!({ "name": "Hillsborough", "geometry": "-71.9,42.7 -71.4,42.7 -71.4,43.1" })),
            record(json!({ "name": "Merrimack", "geometry": "-71.9,43.1 -71.4,43.1 -71.4,43.5" })),
        ],
    );
    let (mut session, _) = session_with(provider);
    session.load(Category::County).await.unwrap();

    let outcome = session.map_category(Category::County).await.unwrap();
    assert_eq!(outcome, MappingOutcome::Overlays(2));

    assert_eq!(session.show_county(Some("Merrimack"), true).await.unwrap(), 1);
    assert_eq!(session.surface().attached_overlays().len(), 1);

    session.show_county(None, true).await.unwrap();
    assert_eq!(session.surface().attached_overlays().len(), 2);

    session.show_county(Some("Hillsborough"), false).await.unwrap();
    assert_eq!(session.surface().attached_overlays().len(), 1);

    // Building again is a no-op
    assert_eq!(
        session.map_category(Category::County).await.unwrap(),
        MappingOutcome::Overlays(0)
    );
    assert_eq!(session.surface().overlay_count(), 2);
}

// ============================================================================
// Session lifecycle
// ============================================================================

#[tokio::test]
async fn test_new_selection_releases_markers() {
    let provider = ScriptedProvider::new()
        .with_records(Category::Team, "NH", vec![team("FRC", 1, 42.0, -71.0, json!({}))])
        .with_records(Category::Team, "VT", vec![team("FRC", 1, 42.0, -71.0, json!({}))]);
    let (mut session, _) = session_with(provider);
    load_and_map(&mut session, Category::Team).await;
    let old = marker_of(&session, Category::Team, "frc1");
    session.handle_gesture(MarkerGesture::Click(old));

    session.begin(vec!["VT".to_string()], Some("2025".to_string()));
    load_and_map(&mut session, Category::Team).await;

    assert!(session.surface().marker(old).is_none());
    assert_eq!(session.surface().marker_count(), 1);
    assert_eq!(session.surface().popup_count(), 1);
    assert!(session.surface().open_popups().is_empty());
    // Fresh resolver: same coordinate is exact again
    assert_eq!(
        session.team_marker(&EntityId::new("frc1")).unwrap().position,
        GeoPoint::new(42.0, -71.0)
    );
    assert_eq!(session.regions(), ["VT"]);
    assert_eq!(session.season(), Some("2025"));
}

#[tokio::test(start_paused = true)]
async fn test_background_loading_then_mapping() {
    let provider = ScriptedProvider::new()
        .with_records(Category::Team, "NH", vec![team("FRC", 1, 42.0, -71.0, json!({}))])
        .with_delay(Category::Team, "NH", Duration::from_millis(40))
        .with_records(Category::Cte, "NH", vec![record(json!({
            "info": { "Name": "Seacoast CTE", "Geo_Location": { "lat": 43.0, "lng": -70.8 } }
        }))]);
    let (mut session, _) = session_with(provider);

    let handles = session.start_loading();
    assert_eq!(handles.len(), Category::ALL.len());

    session.map_category(Category::Team).await.unwrap();
    session.map_category(Category::Cte).await.unwrap();
    for (_, handle) in handles {
        handle.await.unwrap().unwrap();
    }

    assert!(session.team_marker(&EntityId::new("frc1")).is_some());
    let cte = session.dataset().get(Category::Cte, &EntityId::new("NH#0")).unwrap();
    assert!(cte.is_placed());
}
