use std::collections::HashMap;

use serde::Serialize;

use crate::roster::{FighterRecord, Roster};

/// Padding applied on each side of a suggested axis range.
pub const RANGE_PADDING: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewMode {
    #[default]
    WeightclassCounts,
    DefenceVsWeight,
    TakedownAccVsDef,
    StrikesVsTakedowns,
}

/// Which record fields feed a scatter view.
#[derive(Debug, Clone, Copy)]
pub struct AxisMapping {
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub x: fn(&FighterRecord) -> Option<f64>,
    pub y: fn(&FighterRecord) -> Option<f64>,
    pub grouped: bool,
    pub suggest_range: bool,
}

const DEFENCE_VS_WEIGHT: AxisMapping = AxisMapping {
    x_label: "Weight (kg)",
    y_label: "Striking Defence (%)",
    x: |f| f.weight_kg,
    y: |f| f.striking_defence_pct,
    grouped: false,
    suggest_range: true,
};

const TAKEDOWN_ACC_VS_DEF: AxisMapping = AxisMapping {
    x_label: "Takedown Accuracy (%)",
    y_label: "Takedown Defense (%)",
    x: |f| f.takedown_accuracy_pct,
    y: |f| f.takedown_defence_pct,
    grouped: false,
    suggest_range: true,
};

const STRIKES_VS_TAKEDOWNS: AxisMapping = AxisMapping {
    x_label: "Strikes Landed",
    y_label: "Takedowns Landed",
    x: |f| f.strikes_landed_per_min,
    y: |f| f.takedowns_landed_per_15min,
    grouped: true,
    suggest_range: false,
};

impl ViewMode {
    pub const ALL: [ViewMode; 4] = [
        ViewMode::WeightclassCounts,
        ViewMode::DefenceVsWeight,
        ViewMode::TakedownAccVsDef,
        ViewMode::StrikesVsTakedowns,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::WeightclassCounts => "Fighters per Weightclass",
            ViewMode::DefenceVsWeight => "Striking defence vs Weight",
            ViewMode::TakedownAccVsDef => "Takedown Accuracy vs Takedown Defense",
            ViewMode::StrikesVsTakedowns => "Strikes Landed vs Takedowns Landed",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            ViewMode::WeightclassCounts => "weightclass-counts",
            ViewMode::DefenceVsWeight => "defence-vs-weight",
            ViewMode::TakedownAccVsDef => "takedown-acc-vs-def",
            ViewMode::StrikesVsTakedowns => "strikes-vs-takedowns",
        }
    }

    pub fn from_slug(raw: &str) -> Option<ViewMode> {
        let needle = raw.trim();
        ViewMode::ALL
            .into_iter()
            .find(|mode| mode.slug().eq_ignore_ascii_case(needle))
    }

    /// Field mapping for the scatter modes; `None` for the aggregated view.
    pub fn axes(self) -> Option<AxisMapping> {
        match self {
            ViewMode::WeightclassCounts => None,
            ViewMode::DefenceVsWeight => Some(DEFENCE_VS_WEIGHT),
            ViewMode::TakedownAccVsDef => Some(TAKEDOWN_ACC_VS_DEF),
            ViewMode::StrikesVsTakedowns => Some(STRIKES_VS_TAKEDOWNS),
        }
    }

    pub fn next(self) -> ViewMode {
        let idx = ViewMode::ALL.iter().position(|m| *m == self).unwrap_or(0);
        ViewMode::ALL[(idx + 1) % ViewMode::ALL.len()]
    }

    pub fn prev(self) -> ViewMode {
        let idx = ViewMode::ALL.iter().position(|m| *m == self).unwrap_or(0);
        ViewMode::ALL[(idx + ViewMode::ALL.len() - 1) % ViewMode::ALL.len()]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingRow {
    pub id: u32,
    pub name: String,
    pub record: String,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub weightclass: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeightclassCount {
    pub weightclass: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoordinatePoint {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl CoordinatePoint {
    /// Both coordinates, when present and finite.
    pub fn plottable(&self) -> Option<(f64, f64)> {
        match (self.x, self.y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some((x, y)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn bounds(self) -> [f64; 2] {
        [self.min, self.max]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoordinateSeries {
    pub mode: ViewMode,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub points: Vec<CoordinatePoint>,
    pub x_range: Option<AxisRange>,
    pub y_range: Option<AxisRange>,
}

impl CoordinateSeries {
    /// Group names in first-seen order. Empty for ungrouped modes.
    pub fn groups(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for point in &self.points {
            if let Some(group) = point.group.as_deref()
                && !out.contains(&group)
            {
                out.push(group);
            }
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DerivedView {
    WeightclassCounts { counts: Vec<WeightclassCount> },
    Coordinates(CoordinateSeries),
}

impl DerivedView {
    pub fn mode(&self) -> ViewMode {
        match self {
            DerivedView::WeightclassCounts { .. } => ViewMode::WeightclassCounts,
            DerivedView::Coordinates(series) => series.mode,
        }
    }
}

pub fn ranking_projection(roster: &Roster) -> Vec<RankingRow> {
    roster
        .iter()
        .map(|f| RankingRow {
            id: f.id,
            name: f.name.clone(),
            record: f.record.clone(),
            height_cm: f.height_cm,
            weight_kg: f.weight_kg,
            weightclass: f.weightclass.clone(),
        })
        .collect()
}

/// Fighters per weightclass, largest group first. Equal counts keep the
/// order in which the weightclass first appears in the roster.
pub fn weightclass_counts(roster: &Roster) -> Vec<WeightclassCount> {
    let mut slot_of: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<WeightclassCount> = Vec::new();
    for fighter in roster {
        let key = fighter.weightclass.as_str();
        match slot_of.get(key) {
            Some(&slot) => counts[slot].count += 1,
            None => {
                slot_of.insert(key, counts.len());
                counts.push(WeightclassCount {
                    weightclass: fighter.weightclass.clone(),
                    count: 1,
                });
            }
        }
    }
    // Stable sort keeps first-seen order among ties.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Per-fighter scatter points for a coordinate mode. Returns `None` for
/// `ViewMode::WeightclassCounts`.
pub fn coordinate_series(roster: &Roster, mode: ViewMode) -> Option<CoordinateSeries> {
    let axes = mode.axes()?;
    let points: Vec<CoordinatePoint> = roster
        .iter()
        .map(|f| CoordinatePoint {
            x: (axes.x)(f),
            y: (axes.y)(f),
            label: f.name.clone(),
            group: axes.grouped.then(|| f.weightclass.clone()),
        })
        .collect();

    let (x_range, y_range) = if axes.suggest_range {
        (
            padded_range(points.iter().filter_map(|p| p.x)),
            padded_range(points.iter().filter_map(|p| p.y)),
        )
    } else {
        (None, None)
    };

    Some(CoordinateSeries {
        mode,
        x_label: axes.x_label,
        y_label: axes.y_label,
        points,
        x_range,
        y_range,
    })
}

/// `[min - 5, max + 5]` over the finite values, or `None` when there are none.
pub fn padded_range(values: impl IntoIterator<Item = f64>) -> Option<AxisRange> {
    let mut bounds: Option<(f64, f64)> = None;
    for v in values.into_iter().filter(|v| v.is_finite()) {
        bounds = Some(match bounds {
            Some((lo, hi)) => (lo.min(v), hi.max(v)),
            None => (v, v),
        });
    }
    bounds.map(|(lo, hi)| AxisRange {
        min: lo - RANGE_PADDING,
        max: hi + RANGE_PADDING,
    })
}

pub fn derive_view(roster: &Roster, mode: ViewMode) -> DerivedView {
    match coordinate_series(roster, mode) {
        Some(series) => DerivedView::Coordinates(series),
        None => DerivedView::WeightclassCounts {
            counts: weightclass_counts(roster),
        },
    }
}
