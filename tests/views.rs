use std::path::PathBuf;

use ufc_terminal::resolver::{ViewSelection, resolve_view};
use ufc_terminal::roster::{FighterRecord, Roster, load_roster};
use ufc_terminal::views::{
    DerivedView, ViewMode, coordinate_series, derive_view, ranking_projection, weightclass_counts,
};

fn fighter(id: u32, name: &str, weightclass: &str) -> FighterRecord {
    FighterRecord {
        id,
        name: name.to_string(),
        record: "0-0-0".to_string(),
        nickname: String::new(),
        height_cm: None,
        weight_kg: None,
        weightclass: weightclass.to_string(),
        points: None,
        date_of_birth: String::new(),
        strikes_landed_per_min: None,
        striking_accuracy_pct: None,
        strikes_absorbed_per_min: None,
        striking_defence_pct: None,
        takedowns_landed_per_15min: None,
        takedown_accuracy_pct: None,
        takedown_defence_pct: None,
        submissions_attempted_per_15min: None,
    }
}

fn two_fighter_roster() -> Roster {
    let mut a = fighter(1, "A", "LW");
    a.weight_kg = Some(70.0);
    a.striking_defence_pct = Some(55.0);
    let mut b = fighter(2, "B", "MW");
    b.weight_kg = Some(84.0);
    b.striking_defence_pct = Some(60.0);
    Roster::new(vec![a, b])
}

fn sample_roster() -> Roster {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push("fighters_sample.csv");
    load_roster(&path).expect("fixture should load")
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn ranking_projection_keeps_roster_order_and_length() {
    let roster = sample_roster();
    let rows = ranking_projection(&roster);
    assert_eq!(rows.len(), roster.len());
    for (row, fighter) in rows.iter().zip(roster.iter()) {
        assert_eq!(row.id, fighter.id);
        assert_eq!(row.name, fighter.name);
        assert_eq!(row.record, fighter.record);
        assert_eq!(row.height_cm, fighter.height_cm);
        assert_eq!(row.weight_kg, fighter.weight_kg);
        assert_eq!(row.weightclass, fighter.weightclass);
    }
}

#[test]
fn empty_roster_gives_empty_views() {
    let roster = Roster::default();
    assert!(ranking_projection(&roster).is_empty());
    assert!(weightclass_counts(&roster).is_empty());
    for mode in ViewMode::ALL {
        match derive_view(&roster, mode) {
            DerivedView::WeightclassCounts { counts } => assert!(counts.is_empty()),
            DerivedView::Coordinates(series) => {
                assert!(series.points.is_empty());
                assert!(series.x_range.is_none());
                assert!(series.y_range.is_none());
            }
        }
    }
}

#[test]
fn two_fighter_scenario() {
    let roster = two_fighter_roster();

    let counts = weightclass_counts(&roster);
    let pairs: Vec<(&str, usize)> = counts
        .iter()
        .map(|c| (c.weightclass.as_str(), c.count))
        .collect();
    assert_eq!(pairs, vec![("LW", 1), ("MW", 1)]);

    let series = coordinate_series(&roster, ViewMode::DefenceVsWeight).unwrap();
    let points: Vec<(Option<f64>, Option<f64>, &str)> = series
        .points
        .iter()
        .map(|p| (p.x, p.y, p.label.as_str()))
        .collect();
    assert_eq!(
        points,
        vec![(Some(70.0), Some(55.0), "A"), (Some(84.0), Some(60.0), "B")]
    );
    assert!(series.points.iter().all(|p| p.group.is_none()));
    assert_eq!(series.x_range.unwrap().bounds(), [65.0, 89.0]);
    assert_eq!(series.y_range.unwrap().bounds(), [50.0, 65.0]);
}

#[test]
fn counts_sum_to_roster_size_and_order_by_size_then_first_seen() {
    let roster = sample_roster();
    let counts = weightclass_counts(&roster);
    let total: usize = counts.iter().map(|c| c.count).sum();
    assert_eq!(total, roster.len());

    let pairs: Vec<(&str, usize)> = counts
        .iter()
        .map(|c| (c.weightclass.as_str(), c.count))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("Lightweight", 3),
            ("Middleweight", 2),
            ("Light Heavyweight", 1),
            ("Featherweight", 1),
        ]
    );
}

#[test]
fn counts_order_is_stable_across_calls() {
    let roster = Roster::new(vec![
        fighter(1, "A", "BW"),
        fighter(2, "B", "FW"),
        fighter(3, "C", "HW"),
        fighter(4, "D", "FW"),
        fighter(5, "E", "BW"),
    ]);
    let first = weightclass_counts(&roster);
    for _ in 0..5 {
        assert_eq!(weightclass_counts(&roster), first);
    }
    let names: Vec<&str> = first.iter().map(|c| c.weightclass.as_str()).collect();
    assert_eq!(names, vec!["BW", "FW", "HW"]);
}

#[test]
fn coordinate_series_never_drops_rows() {
    let roster = sample_roster();
    for mode in ViewMode::ALL {
        if let Some(series) = coordinate_series(&roster, mode) {
            assert_eq!(series.points.len(), roster.len(), "{mode:?}");
            let labels: Vec<&str> = series.points.iter().map(|p| p.label.as_str()).collect();
            let names: Vec<&str> = roster.iter().map(|f| f.name.as_str()).collect();
            assert_eq!(labels, names);
        }
    }
    assert!(coordinate_series(&roster, ViewMode::WeightclassCounts).is_none());
}

#[test]
fn missing_values_pass_through() {
    let roster = sample_roster();
    let series = coordinate_series(&roster, ViewMode::TakedownAccVsDef).unwrap();
    let eli = series.points.iter().find(|p| p.label == "Eli Novak").unwrap();
    assert_eq!(eli.x, None);
    assert_eq!(eli.y, Some(68.0));
    assert!(eli.plottable().is_none());

    // Ranges come from the values that are present.
    let x = series.x_range.unwrap();
    assert_close(x.min, 26.0);
    assert_close(x.max, 55.0);
    let y = series.y_range.unwrap();
    assert_close(y.min, 61.0);
    assert_close(y.max, 89.0);
}

#[test]
fn strikes_vs_takedowns_groups_by_weightclass_without_range() {
    let roster = sample_roster();
    let series = coordinate_series(&roster, ViewMode::StrikesVsTakedowns).unwrap();
    assert!(series.x_range.is_none());
    assert!(series.y_range.is_none());
    for (point, fighter) in series.points.iter().zip(roster.iter()) {
        assert_eq!(point.x, fighter.strikes_landed_per_min);
        assert_eq!(point.y, fighter.takedowns_landed_per_15min);
        assert_eq!(point.group.as_deref(), Some(fighter.weightclass.as_str()));
    }
    assert_eq!(
        series.groups(),
        vec!["Middleweight", "Lightweight", "Light Heavyweight", "Featherweight"]
    );
}

#[test]
fn single_fighter_range_is_padded_point() {
    let mut only = fighter(9, "Solo", "WW");
    only.takedown_accuracy_pct = Some(40.0);
    only.takedown_defence_pct = Some(90.0);
    let roster = Roster::new(vec![only]);
    let series = coordinate_series(&roster, ViewMode::TakedownAccVsDef).unwrap();
    assert_eq!(series.x_range.unwrap().bounds(), [35.0, 45.0]);
    assert_eq!(series.y_range.unwrap().bounds(), [85.0, 95.0]);
}

#[test]
fn resolver_is_idempotent_for_every_mode() {
    let roster = sample_roster();
    for mode in ViewMode::ALL {
        let selection = ViewSelection { mode };
        let first = resolve_view(&roster, selection);
        let second = resolve_view(&roster, selection);
        assert_eq!(first, second);
        assert_eq!(first.mode(), mode);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}

#[test]
fn default_selection_is_weightclass_counts() {
    let roster = two_fighter_roster();
    let view = resolve_view(&roster, ViewSelection::default());
    assert!(matches!(view, DerivedView::WeightclassCounts { .. }));
}
