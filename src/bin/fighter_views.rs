use std::path::PathBuf;

use anyhow::{Result, anyhow, bail};
use serde_json::json;

use ufc_terminal::config::AppConfig;
use ufc_terminal::lookup::{FighterKey, find_fighter};
use ufc_terminal::resolver::{Selection, ViewSelection, on_selection_changed};
use ufc_terminal::roster::load_roster;
use ufc_terminal::views::ViewMode;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let args = parse_args(&std::env::args().skip(1).collect::<Vec<_>>())?;
    let dataset = args
        .dataset
        .unwrap_or_else(|| AppConfig::from_env().dataset_path);
    let mode = match args.view.as_deref() {
        Some(raw) => ViewMode::from_slug(raw).ok_or_else(|| {
            let known = ViewMode::ALL.map(ViewMode::slug).join(", ");
            anyhow!("unknown view `{raw}` (expected one of: {known})")
        })?,
        None => ViewMode::default(),
    };

    let roster = load_roster(&dataset)?;
    let selection = Selection {
        view: ViewSelection { mode },
        ..Selection::default()
    };
    let resolved = on_selection_changed(&roster, selection)?;

    let fighter = match args.fighter.as_deref() {
        Some(raw) => match find_fighter(&roster, FighterKey::parse(raw)) {
            Ok(f) => Some(f),
            Err(err) => {
                eprintln!("warn: {err}");
                None
            }
        },
        None => None,
    };

    let out = json!({
        "dataset": dataset.display().to_string(),
        "mode": mode,
        "ranking": resolved.ranking,
        "view": resolved.view,
        "fighter": fighter,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

#[derive(Debug, Default, PartialEq, Eq)]
struct CliArgs {
    dataset: Option<PathBuf>,
    view: Option<String>,
    fighter: Option<String>,
}

/// `[DATASET] [--view SLUG] [--fighter ID|NAME]`; value flags also accept `--flag=value`.
fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut out = CliArgs::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag, Some(value.to_string())),
            _ => (arg.as_str(), None),
        };
        let slot = match flag {
            "--view" => &mut out.view,
            "--fighter" => &mut out.fighter,
            _ if flag.starts_with("--") => bail!("unknown flag `{flag}`"),
            _ => {
                if out.dataset.is_some() {
                    bail!("unexpected extra argument `{arg}`");
                }
                out.dataset = Some(PathBuf::from(arg));
                continue;
            }
        };
        let value = match inline {
            Some(value) => value,
            None => match iter.next() {
                Some(next) if !next.starts_with("--") => next.clone(),
                _ => bail!("`{flag}` needs a value"),
            },
        };
        if value.is_empty() {
            bail!("`{flag}` needs a value");
        }
        *slot = Some(value);
    }
    Ok(out)
}
