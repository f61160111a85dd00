use std::collections::VecDeque;

use crate::lookup::LookupError;
use crate::resolver::{FighterSelection, Selection, ViewSelection, on_selection_changed};
use crate::roster::{FighterRecord, Roster};
use crate::views::{DerivedView, RankingRow, ViewMode, derive_view, ranking_projection};

const MAX_LOGS: usize = 200;

#[derive(Debug, Clone)]
pub struct AppState {
    roster: Roster,
    selection: Selection,
    ranking: Vec<RankingRow>,
    view: DerivedView,
    fighter: Option<FighterRecord>,
    pub cursor: usize,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl AppState {
    pub fn new(roster: Roster) -> Self {
        let selection = Selection::default();
        let ranking = ranking_projection(&roster);
        let view = derive_view(&roster, selection.view.mode);
        Self {
            roster,
            selection,
            ranking,
            view,
            fighter: None,
            cursor: 0,
            logs: VecDeque::with_capacity(MAX_LOGS),
            help_overlay: false,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn ranking(&self) -> &[RankingRow] {
        &self.ranking
    }

    pub fn view(&self) -> &DerivedView {
        &self.view
    }

    /// Resolved record for the current fighter selection, if any.
    pub fn fighter(&self) -> Option<&FighterRecord> {
        self.fighter.as_ref()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.selection.view.mode
    }

    pub fn selected_fighter_id(&self) -> Option<u32> {
        self.selection.fighter.fighter_id
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if mode == self.view_mode() {
            return;
        }
        self.apply(Selection {
            view: ViewSelection { mode },
            ..self.selection
        });
    }

    pub fn cycle_view_next(&mut self) {
        self.set_view_mode(self.view_mode().next());
    }

    pub fn cycle_view_prev(&mut self) {
        self.set_view_mode(self.view_mode().prev());
    }

    pub fn select_fighter(&mut self, fighter_id: u32) {
        self.apply(Selection {
            fighter: FighterSelection {
                fighter_id: Some(fighter_id),
            },
            ..self.selection
        });
    }

    pub fn select_fighter_under_cursor(&mut self) {
        let Some(row) = self.ranking.get(self.cursor) else {
            self.push_log("[INFO] No fighter under cursor");
            return;
        };
        let id = row.id;
        self.select_fighter(id);
    }

    pub fn clear_fighter(&mut self) {
        self.apply(Selection {
            fighter: FighterSelection::default(),
            ..self.selection
        });
    }

    /// Recomputes derived data for `next`. A lookup miss drops the fighter
    /// selection and keeps the rest.
    pub fn apply(&mut self, next: Selection) {
        let outcome = on_selection_changed(&self.roster, next)
            .map(|resolved| (resolved.ranking, resolved.view, resolved.fighter.cloned()));
        match outcome {
            Ok((ranking, view, fighter)) => {
                self.ranking = ranking;
                self.view = view;
                self.fighter = fighter;
                self.selection = next;
            }
            Err(LookupError::NotFound { key }) => {
                self.push_log(format!("[WARN] Fighter {key} not found, selection cleared"));
                let cleared = Selection {
                    fighter: FighterSelection::default(),
                    ..next
                };
                self.ranking = ranking_projection(&self.roster);
                self.view = derive_view(&self.roster, cleared.view.mode);
                self.fighter = None;
                self.selection = cleared;
            }
        }
    }

    pub fn select_next(&mut self) {
        let total = self.ranking.len();
        if total == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = (self.cursor + 1) % total;
    }

    pub fn select_prev(&mut self) {
        let total = self.ranking.len();
        if total == 0 {
            self.cursor = 0;
            return;
        }
        if self.cursor == 0 {
            self.cursor = total - 1;
        } else {
            self.cursor -= 1;
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}
