use std::collections::HashMap;

use crate::catalog::{Game, GameId};
use crate::rating::RatingLabel;
use crate::review::{ReviewId, ReviewThread};

/// Unsent review text and star choice
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewDraft {
    pub content: String,
    pub rating: RatingLabel,
}

/// The detail view of one game while it is open
#[derive(Debug)]
pub(super) struct OpenView {
    pub thread: ReviewThread,
    pub review_draft: ReviewDraft,
    pub comment_drafts: HashMap<ReviewId, String>,
}

impl OpenView {
    fn new(game_id: GameId, generation: u64) -> Self {
        Self {
            thread: ReviewThread::new(game_id, generation),
            review_draft: ReviewDraft::default(),
            comment_drafts: HashMap::new(),
        }
    }
}

#[derive(Debug, Default)]
pub(super) struct ViewState {
    /// Catalog as last loaded, without favorite flags
    pub catalog: Vec<Game>,
    pub open: Option<OpenView>,
    last_generation: u64,
}

impl ViewState {
    /// Opens a fresh detail view and returns its generation
    pub fn open(&mut self, game_id: GameId) -> u64 {
        self.last_generation += 1;
        self.open = Some(OpenView::new(game_id, self.last_generation));
        self.last_generation
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    /// The open view, if it is still the one started as `generation`
    pub fn view_for(&mut self, generation: u64) -> Option<&mut OpenView> {
        self.open
            .as_mut()
            .filter(|view| view.thread.generation() == generation)
    }

    pub fn current_generation(&self) -> Option<u64> {
        self.open.as_ref().map(|view| view.thread.generation())
    }
}
