use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::roster::{FighterRecord, Roster};
use crate::views::{
    CoordinateSeries, RankingRow, ViewMode, WeightclassCount, coordinate_series,
    ranking_projection, weightclass_counts,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    pub ranking_rows: usize,
    pub weightclass_rows: usize,
    pub coordinate_rows: usize,
    pub fighter_rows: usize,
}

#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Text(String),
    Number(f64),
    Blank,
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) if v.is_finite() => Cell::Number(v),
            _ => Cell::Blank,
        }
    }
}

pub fn export_views(path: &Path, roster: &Roster) -> Result<ExportReport> {
    let mut report = ExportReport::default();
    let mut workbook = Workbook::new();

    let ranking = ranking_table(&ranking_projection(roster));
    report.ranking_rows = ranking.len() - 1;
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Ranking")?;
        write_rows(sheet, &ranking)?;
    }

    let counts = counts_table(&weightclass_counts(roster));
    report.weightclass_rows = counts.len() - 1;
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Weightclasses")?;
        write_rows(sheet, &counts)?;
    }

    for mode in ViewMode::ALL {
        let Some(series) = coordinate_series(roster, mode) else {
            continue;
        };
        let rows = coordinate_table(&series);
        report.coordinate_rows += rows.len() - 1;
        let sheet = workbook.add_worksheet();
        sheet.set_name(sheet_name(mode))?;
        write_rows(sheet, &rows)?;
    }

    let fighters = fighters_table(roster);
    report.fighter_rows = fighters.len() - 1;
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Fighters")?;
        write_rows(sheet, &fighters)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("save workbook {}", path.display()))?;
    Ok(report)
}

// Worksheet names are capped at 31 characters.
fn sheet_name(mode: ViewMode) -> &'static str {
    match mode {
        ViewMode::WeightclassCounts => "Weightclasses",
        ViewMode::DefenceVsWeight => "DefenceVsWeight",
        ViewMode::TakedownAccVsDef => "TakedownAccVsDef",
        ViewMode::StrikesVsTakedowns => "StrikesVsTakedowns",
    }
}

fn ranking_table(rows: &[RankingRow]) -> Vec<Vec<Cell>> {
    let mut out = vec![header(&[
        "ID",
        "Fighter",
        "Record",
        "Height (cm)",
        "Weight (kg)",
        "Weight Class",
    ])];
    out.extend(rows.iter().map(|row| {
        vec![
            Cell::Number(f64::from(row.id)),
            row.name.as_str().into(),
            row.record.as_str().into(),
            row.height_cm.into(),
            row.weight_kg.into(),
            row.weightclass.as_str().into(),
        ]
    }));
    out
}

fn counts_table(counts: &[WeightclassCount]) -> Vec<Vec<Cell>> {
    let mut out = vec![header(&["Weight Class", "Number of Fighters"])];
    out.extend(
        counts
            .iter()
            .map(|c| vec![c.weightclass.as_str().into(), Cell::Number(c.count as f64)]),
    );
    out
}

fn coordinate_table(series: &CoordinateSeries) -> Vec<Vec<Cell>> {
    let grouped = series.points.iter().any(|p| p.group.is_some());
    let mut head = vec!["Fighter", series.x_label, series.y_label];
    if grouped {
        head.push("Weight Class");
    }
    let mut out = vec![header(&head)];
    out.extend(series.points.iter().map(|p| {
        let mut row = vec![p.label.as_str().into(), p.x.into(), p.y.into()];
        if grouped {
            row.push(p.group.clone().map(Cell::Text).unwrap_or(Cell::Blank));
        }
        row
    }));
    out
}

fn fighters_table(roster: &Roster) -> Vec<Vec<Cell>> {
    let mut out = vec![header(&crate::roster::REQUIRED_COLUMNS)];
    out.extend(roster.iter().map(fighter_row));
    out
}

fn fighter_row(f: &FighterRecord) -> Vec<Cell> {
    vec![
        Cell::Number(f64::from(f.id)),
        f.name.as_str().into(),
        f.record.as_str().into(),
        f.nickname.as_str().into(),
        f.height_cm.into(),
        f.weight_kg.into(),
        f.weightclass.as_str().into(),
        f.points.into(),
        f.date_of_birth.as_str().into(),
        f.strikes_landed_per_min.into(),
        f.striking_accuracy_pct.into(),
        f.strikes_absorbed_per_min.into(),
        f.striking_defence_pct.into(),
        f.takedowns_landed_per_15min.into(),
        f.takedown_accuracy_pct.into(),
        f.takedown_defence_pct.into(),
        f.submissions_attempted_per_15min.into(),
    ]
}

fn header(names: &[&str]) -> Vec<Cell> {
    names.iter().map(|name| Cell::from(*name)).collect()
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<Cell>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            let (r, c) = (row_idx as u32, col_idx as u16);
            match value {
                Cell::Text(text) => worksheet.write_string(r, c, text),
                Cell::Number(num) => worksheet.write_number(r, c, *num),
                Cell::Blank => continue,
            }
            .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
