use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use ufc_terminal::lookup::find_fighter;
use ufc_terminal::resolver::{FighterSelection, Selection, ViewSelection, on_selection_changed};
use ufc_terminal::roster::{FighterRecord, Roster, parse_roster_csv};
use ufc_terminal::views::{ViewMode, weightclass_counts};

const WEIGHTCLASSES: [&str; 8] = [
    "Flyweight",
    "Bantamweight",
    "Featherweight",
    "Lightweight",
    "Welterweight",
    "Middleweight",
    "Light Heavyweight",
    "Heavyweight",
];

fn synthetic_fighter(id: u32) -> FighterRecord {
    let f = f64::from(id);
    FighterRecord {
        id,
        name: format!("Fighter {id}"),
        record: format!("{}-{}-0", 10 + id % 15, id % 6),
        nickname: String::new(),
        height_cm: Some(165.0 + (f * 1.7) % 30.0),
        weight_kg: Some(56.0 + (f * 3.1) % 50.0),
        weightclass: WEIGHTCLASSES[id as usize % WEIGHTCLASSES.len()].to_string(),
        points: Some(600.0 - f),
        date_of_birth: "1990-01-01".to_string(),
        strikes_landed_per_min: Some(2.0 + (f * 0.37) % 5.0),
        striking_accuracy_pct: Some(35.0 + (f * 1.3) % 30.0),
        strikes_absorbed_per_min: Some(1.5 + (f * 0.21) % 4.0),
        striking_defence_pct: Some(45.0 + (f * 2.3) % 25.0),
        takedowns_landed_per_15min: if id % 11 == 0 { None } else { Some((f * 0.43) % 6.0) },
        takedown_accuracy_pct: Some(20.0 + (f * 3.7) % 50.0),
        takedown_defence_pct: Some(50.0 + (f * 1.9) % 45.0),
        submissions_attempted_per_15min: Some((f * 0.17) % 2.0),
    }
}

fn synthetic_roster(n: u32) -> Roster {
    Roster::new((1..=n).map(synthetic_fighter).collect())
}

fn bench_resolve_all_modes(c: &mut Criterion) {
    let roster = synthetic_roster(500);
    c.bench_function("resolve_all_modes_500", |b| {
        b.iter(|| {
            for mode in ViewMode::ALL {
                let selection = Selection {
                    view: ViewSelection { mode },
                    fighter: FighterSelection {
                        fighter_id: Some(250),
                    },
                };
                let resolved = on_selection_changed(black_box(&roster), selection).unwrap();
                black_box(resolved.ranking.len());
            }
        })
    });
}

fn bench_weightclass_counts(c: &mut Criterion) {
    let roster = synthetic_roster(5_000);
    c.bench_function("weightclass_counts_5000", |b| {
        b.iter(|| black_box(weightclass_counts(black_box(&roster)).len()))
    });
}

fn bench_lookup_by_name(c: &mut Criterion) {
    let roster = synthetic_roster(500);
    c.bench_function("lookup_last_by_name_500", |b| {
        b.iter(|| black_box(find_fighter(&roster, black_box("Fighter 500")).unwrap().id))
    });
}

fn bench_csv_parse(c: &mut Criterion) {
    let mut raw = String::from(
        "ID,Fighter,Record,nickname,height_cm,weight_in_kg,weightclass,Points,date_of_birth,significant_strikes_landed_per_minute,significant_striking_accuracy,significant_strikes_absorbed_per_minute,significant_strike_defence,average_takedowns_landed_per_15_minutes,takedown_accuracy,takedown_defense,average_submissions_attempted_per_15_minutes\n",
    );
    for id in 1..=200u32 {
        let f = synthetic_fighter(id);
        raw.push_str(&format!(
            "{},{},{},,180,{:.2},{},{:.1},1990-01-01,4.1,48,3.2,{:.0},1.5,40,70,0.5\n",
            f.id,
            f.name,
            f.record,
            f.weight_kg.unwrap_or_default(),
            f.weightclass,
            f.points.unwrap_or_default(),
            f.striking_defence_pct.unwrap_or_default(),
        ));
    }
    c.bench_function("roster_csv_parse_200", |b| {
        b.iter(|| black_box(parse_roster_csv(black_box(raw.as_bytes())).unwrap().len()))
    });
}

criterion_group!(
    benches,
    bench_resolve_all_modes,
    bench_weightclass_counts,
    bench_lookup_by_name,
    bench_csv_parse
);
criterion_main!(benches);
