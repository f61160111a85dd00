use serde::Serialize;

use crate::roster::FighterRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailLine {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailSection {
    pub title: &'static str,
    pub lines: Vec<DetailLine>,
}

/// Render-ready stat sheet for one fighter: profile, striking, takedowns, submissions.
pub fn fighter_detail_sections(f: &FighterRecord) -> Vec<DetailSection> {
    vec![
        DetailSection {
            title: "Profile",
            lines: vec![
                line("Nickname", text_or_dash(&f.nickname)),
                line("Record", text_or_dash(&f.record)),
                line("Height", with_unit(f.height_cm, " cm")),
                line("Weight", with_unit(f.weight_kg, " kg")),
                line("Points", plain(f.points)),
                line("Date of birth", text_or_dash(&f.date_of_birth)),
                line("Weight Class", text_or_dash(&f.weightclass)),
            ],
        },
        DetailSection {
            title: "Striking stats",
            lines: vec![
                line("Significant strikes landed per minute", plain(f.strikes_landed_per_min)),
                line("Significant strikes accuracy", with_unit(f.striking_accuracy_pct, "%")),
                line(
                    "Significant strikes absorbed per minute",
                    plain(f.strikes_absorbed_per_min),
                ),
                line(
                    "Significant strikes defense accuracy",
                    with_unit(f.striking_defence_pct, "%"),
                ),
            ],
        },
        DetailSection {
            title: "Takedown stats",
            lines: vec![
                line("Takedowns landed per 15 minutes", plain(f.takedowns_landed_per_15min)),
                line("Takedown accuracy", with_unit(f.takedown_accuracy_pct, "%")),
                line("Takedown defense", with_unit(f.takedown_defence_pct, "%")),
            ],
        },
        DetailSection {
            title: "Submission stats",
            lines: vec![line(
                "Submissions attempted per 15 minutes",
                plain(f.submissions_attempted_per_15min),
            )],
        },
    ]
}

fn line(label: &'static str, value: String) -> DetailLine {
    DetailLine { label, value }
}

fn text_or_dash(raw: &str) -> String {
    if raw.trim().is_empty() {
        "-".to_string()
    } else {
        raw.to_string()
    }
}

fn plain(value: Option<f64>) -> String {
    with_unit(value, "")
}

fn with_unit(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v}{unit}"),
        _ => "-".to_string(),
    }
}
