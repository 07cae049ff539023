//! Inline text editing for `text` assets.
//!
//! A double-click on a text asset opens an editor seeded with its current
//! text (empty when unset). Enter and focus loss commit the draft. Escape
//! also commits unless configured to revert.

#[cfg(test)]
#[path = "text_edit_test.rs"]
mod text_edit_test;

use crate::doc::{Asset, AssetId};
use crate::input::Key;

/// What the host editor should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextEditOutcome {
    /// Keep editing.
    Continue,
    /// Close the editor and write this text back to the asset.
    Commit(String),
    /// Close the editor without writing.
    Revert,
}

/// An open inline editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEditSession {
    pub id: AssetId,
    pub draft: String,
}

impl TextEditSession {
    /// Open an editor on `asset`, seeded with its text.
    #[must_use]
    pub fn begin(asset: &Asset) -> Self {
        Self { id: asset.id, draft: asset.text.clone().unwrap_or_default() }
    }

    /// Replace the draft with the editor's current contents.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Resolve a key press.
    #[must_use]
    pub fn on_key(&self, key: &Key, escape_commits: bool) -> TextEditOutcome {
        if key.is("Enter") {
            return TextEditOutcome::Commit(self.draft.clone());
        }
        if key.is("Escape") {
            if escape_commits {
                return TextEditOutcome::Commit(self.draft.clone());
            }
            return TextEditOutcome::Revert;
        }
        TextEditOutcome::Continue
    }

    /// Focus left the editor: always commits.
    #[must_use]
    pub fn on_blur(&self) -> TextEditOutcome {
        TextEditOutcome::Commit(self.draft.clone())
    }
}
