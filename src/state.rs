use crate::api::NavLookupError;
use crate::models::{NavTaxpayerResponse, PublicCompany};
use crate::search::{SearchUpdate, SliceResult, Submitted};

/// The four gated fields the paywalled detail view renders. The set is fixed
/// regardless of which company was selected; only the header varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatedField {
    TaxNumber,
    RegistrationNumber,
    Revenue,
    Risk,
}

pub const GATED_FIELDS: [GatedField; 4] = [
    GatedField::TaxNumber,
    GatedField::RegistrationNumber,
    GatedField::Revenue,
    GatedField::Risk,
];

/// Display state for one search interaction.
///
/// All mutation goes through `begin` and `apply`; `apply` enforces the
/// generation guard so a slow response from an older search can never
/// overwrite newer results. The NAV and database slices each own their
/// pending flag and resolve independently.
#[derive(Debug, Default)]
pub struct SearchState {
    generation: u64,
    has_searched: bool,
    nav_pending: bool,
    db_pending: bool,
    nav_result: Option<NavTaxpayerResponse>,
    nav_error: Option<NavLookupError>,
    db_results: Vec<PublicCompany>,
    selected: Option<usize>,
}

impl SearchState {
    /// Resets every result and error slice for a fresh submit. Runs before
    /// any request completion can land, so no stale content flashes through.
    pub fn begin(&mut self, submitted: Submitted) {
        self.generation = submitted.generation;
        self.has_searched = true;
        self.nav_pending = submitted.nav_issued;
        self.db_pending = true;
        self.nav_result = None;
        self.nav_error = None;
        self.db_results.clear();
        self.selected = None;
    }

    /// Applies a slice completion. Returns false when the update belonged to
    /// a superseded search and was discarded.
    pub fn apply(&mut self, update: SearchUpdate) -> bool {
        if update.generation != self.generation {
            return false;
        }
        match update.result {
            SliceResult::Nav(Ok(result)) => {
                self.nav_result = Some(result);
                self.nav_pending = false;
            }
            SliceResult::Nav(Err(err)) => {
                self.nav_error = Some(err);
                self.nav_pending = false;
            }
            SliceResult::Db(companies) => {
                self.db_results = companies;
                self.db_pending = false;
            }
        }
        true
    }

    pub fn has_searched(&self) -> bool {
        self.has_searched
    }

    pub fn searching(&self) -> bool {
        self.nav_pending || self.db_pending
    }

    pub fn nav_pending(&self) -> bool {
        self.nav_pending
    }

    pub fn db_pending(&self) -> bool {
        self.db_pending
    }

    pub fn nav_result(&self) -> Option<&NavTaxpayerResponse> {
        self.nav_result.as_ref()
    }

    pub fn nav_error(&self) -> Option<&NavLookupError> {
        self.nav_error.as_ref()
    }

    pub fn db_results(&self) -> &[PublicCompany] {
        &self.db_results
    }

    /// The empty state only shows once everything has settled with nothing
    /// to render; a NAV error outranks it.
    pub fn no_results(&self) -> bool {
        self.has_searched
            && !self.nav_pending
            && !self.db_pending
            && self.nav_result.is_none()
            && self.db_results.is_empty()
            && self.nav_error.is_none()
    }

    /// Opens the paywalled detail view for a database row. No network call
    /// is made; the gated fields are placeholders by construction.
    pub fn select(&mut self, index: usize) {
        if index < self.db_results.len() {
            self.selected = Some(index);
        }
    }

    /// Closes the detail view, returning to the list without re-fetching.
    pub fn close_detail(&mut self) {
        self.selected = None;
    }

    pub fn selected_company(&self) -> Option<&PublicCompany> {
        self.selected.and_then(|i| self.db_results.get(i))
    }
}
