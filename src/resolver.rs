use serde::Serialize;

use crate::lookup::{LookupError, find_fighter};
use crate::roster::{FighterRecord, Roster};
use crate::views::{DerivedView, RankingRow, ViewMode, derive_view, ranking_projection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewSelection {
    pub mode: ViewMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FighterSelection {
    pub fighter_id: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub view: ViewSelection,
    pub fighter: FighterSelection,
}

/// Everything the presentation layer renders for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedView<'r> {
    pub ranking: Vec<RankingRow>,
    pub view: DerivedView,
    pub fighter: Option<&'r FighterRecord>,
}

/// Derived chart data for the selected view mode.
pub fn resolve_view(roster: &Roster, selection: ViewSelection) -> DerivedView {
    derive_view(roster, selection.mode)
}

/// Fighter for the current selection. `Ok(None)` when nothing is selected.
pub fn resolve_fighter(
    roster: &Roster,
    selection: FighterSelection,
) -> Result<Option<&FighterRecord>, LookupError> {
    selection
        .fighter_id
        .map(|id| find_fighter(roster, id))
        .transpose()
}

/// Recomputes the full render payload after any selection change.
///
/// On `LookupError::NotFound` the caller clears its fighter selection and
/// calls again.
pub fn on_selection_changed(
    roster: &Roster,
    selection: Selection,
) -> Result<ResolvedView<'_>, LookupError> {
    let fighter = resolve_fighter(roster, selection.fighter)?;
    Ok(ResolvedView {
        ranking: ranking_projection(roster),
        view: resolve_view(roster, selection.view),
        fighter,
    })
}
