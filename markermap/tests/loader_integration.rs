//! Integration tests for region-sequential loading.
//!
//! These tests drive `RegionLoader` and `ReadinessPoller` against a scripted
//! provider and check:
//! - one fetch per region, strictly ordered, never more than one in flight
//! - the "fully loaded" flag flips once, after the last region is merged
//! - attribute discovery only grows across regions
//! - a failed or hanging region stalls the category visibly
//!
//! Run with: `cargo test --test loader_integration`

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use markermap::entity::{Category, EntityId};
use markermap::loader::{
    LoadError, LoadOutcome, LoadState, PollError, PollerConfig, ReadinessPoller, RegionLoader,
};
use markermap::provider::{RawRecord, ScriptedProvider};
use markermap::store::{EntityStore, MapDataset};

// ============================================================================
// Test Helpers
// ============================================================================

fn school(id: &str, extra: serde_json::Value) -> RawRecord {
    let mut value = json!({
        "info": {
            "Sch_Id": id,
            "Group_Id": "PUB",
            "School_Name": format!("School {}", id),
            "Fname": "Pat",
            "Lname": "Lee",
        }
    });
    if let (Some(info), Some(extra)) = (value["info"].as_object_mut(), extra.as_object()) {
        for (k, v) in extra {
            info.insert(k.clone(), v.clone());
        }
    }
    serde_json::from_value(value).unwrap()
}

fn regions(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn fast_poller(max_attempts: Option<u32>) -> ReadinessPoller {
    ReadinessPoller::new(
        PollerConfig::new()
            .with_interval(Duration::from_millis(5))
            .with_max_attempts(max_attempts),
    )
}

// ============================================================================
// Ordering
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_n_regions_n_ordered_calls() {
    let provider = Arc::new(
        ScriptedProvider::new()
            .with_records(Category::School, "NH", vec![school("1", json!({}))])
            .with_records(Category::School, "VT", vec![school("2", json!({}))])
            .with_records(Category::School, "ME", vec![school("3", json!({}))])
            .with_delay(Category::School, "NH", Duration::from_millis(30))
            .with_delay(Category::School, "VT", Duration::from_millis(10)),
    );
    let loader = RegionLoader::new(provider.clone(), regions(&["NH", "VT", "ME"]), None);
    let store = EntityStore::shared(Category::School);

    loader.load(&store).await.unwrap();

    let calls = provider.calls_for(Category::School);
    assert_eq!(calls.len(), 3);
    let order: Vec<&str> = calls.iter().map(|c| c.region.as_str()).collect();
    assert_eq!(order, ["NH", "VT", "ME"]);
    assert_eq!(provider.peak_in_flight(Category::School), 1);
    assert_eq!(store.read().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_flag_set_only_after_last_region() {
    let provider = Arc::new(
        ScriptedProvider::new()
            .with_records(Category::School, "NH", vec![school("1", json!({}))])
            .with_delay(Category::School, "VT", Duration::from_millis(100)),
    );
    let loader = RegionLoader::new(provider, regions(&["NH", "VT"]), None);
    let store = EntityStore::shared(Category::School);

    let handle = loader.start(store.clone());

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(store.read().state(), LoadState::Loading { region_index: 1 });
    assert!(!store.read().is_loaded());
    // First region is already usable
    assert!(store.read().contains(&EntityId::new("1")));

    handle.await.unwrap().unwrap();
    assert!(store.read().is_loaded());

    // Completing again is refused
    assert!(!store.write().complete_loading());
}

#[tokio::test]
async fn test_categories_load_independently() {
    let provider = Arc::new(
        ScriptedProvider::new()
            .with_records(Category::School, "NH", vec![school("1", json!({}))])
            .with_failure(Category::Team, "NH", "boom"),
    );
    let loader = RegionLoader::new(provider.clone(), regions(&["NH"]), None);
    let dataset = MapDataset::new();

    let teams = loader.start(dataset.store(Category::Team).clone());
    let schools = loader.start(dataset.store(Category::School).clone());

    assert!(teams.await.unwrap().is_err());
    assert!(schools.await.unwrap().is_ok());
    assert!(dataset.is_loaded(Category::School));
    assert!(!dataset.is_loaded(Category::Team));
}

// ============================================================================
// Attribute discovery
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_attributes_grow_across_regions() {
    let provider = Arc::new(
        ScriptedProvider::new()
            .with_records(
                Category::School,
                "NH",
                vec![school("1", json!({ "Target_Levels": ["HS"] }))],
            )
            .with_records(
                Category::School,
                "VT",
                vec![school("2", json!({ "First_Teams": ["FRC-1"] }))],
            )
            .with_delay(Category::School, "VT", Duration::from_millis(100)),
    );
    let dataset = MapDataset::new();
    let loader = RegionLoader::new(provider, regions(&["NH", "VT"]), None);

    let handle = loader.start(dataset.store(Category::School).clone());
    tokio::time::sleep(Duration::from_millis(50)).await;
    let after_first = dataset.attributes_observed(Category::School);
    handle.await.unwrap().unwrap();
    let after_second = dataset.attributes_observed(Category::School);

    assert!(!after_first.contains(&"First_Teams".to_string()));
    assert!(after_first.iter().all(|a| after_second.contains(a)));
    assert!(after_second.contains(&"First_Teams".to_string()));
    // Admin_Name is derived before attribute collection
    assert!(after_first.contains(&"Admin_Name".to_string()));
    let school = dataset.school(&EntityId::new("1")).unwrap();
    assert_eq!(school.attr_str("Admin_Name").as_deref(), Some("Pat Lee"));
}

// ============================================================================
// Stalls
// ============================================================================

#[tokio::test]
async fn test_failed_region_stalls() {
    let provider = Arc::new(
        ScriptedProvider::new()
            .with_records(Category::Unit, "NH", vec![])
            .with_failure(Category::Unit, "VT", "503 Service Unavailable"),
    );
    let loader = RegionLoader::new(provider.clone(), regions(&["NH", "VT", "ME"]), None);
    let store = EntityStore::shared(Category::Unit);

    let err = loader.load(&store).await.unwrap_err();
    let LoadError::Fetch { region_index, .. } = err;
    assert_eq!(region_index, 1);

    // No retry on a second call
    assert_eq!(loader.load(&store).await.unwrap(), LoadOutcome::AlreadyStarted);
    assert_eq!(provider.calls().len(), 2);
    assert_eq!(store.read().state(), LoadState::Loading { region_index: 1 });
}

#[tokio::test(start_paused = true)]
async fn test_stall_detected_by_poll_budget() {
    let provider = Arc::new(ScriptedProvider::new().with_stall(Category::Team, "NH"));
    let loader = RegionLoader::new(provider, regions(&["NH"]), Some("2024".into()));
    let store = EntityStore::shared(Category::Team);

    let _handle = loader.start(store.clone());
    let err = fast_poller(Some(20)).wait_until_loaded(&store).await.unwrap_err();

    assert_eq!(
        err,
        PollError::Exhausted {
            what: "Team".to_string(),
            attempts: 20
        }
    );
    assert_eq!(store.read().state(), LoadState::Loading { region_index: 0 });
}

#[tokio::test(start_paused = true)]
async fn test_poller_observes_completion() {
    let provider = Arc::new(
        ScriptedProvider::new()
            .with_records(Category::School, "NH", vec![school("1", json!({}))])
            .with_delay(Category::School, "NH", Duration::from_millis(22)),
    );
    let loader = RegionLoader::new(provider, regions(&["NH"]), None);
    let store = EntityStore::shared(Category::School);

    let _handle = loader.start(store.clone());
    let retries = fast_poller(None).wait_until_loaded(&store).await.unwrap();

    assert!(retries >= 4);
    assert!(store.read().is_loaded());
}
