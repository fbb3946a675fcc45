//! Editing draft: a working copy of an entity plus its retained original.
//!
//! The dirty flag is derived — structural inequality between working copy
//! and original. A draft over a brand-new entity has no original, so it is
//! dirty as soon as it exists and `is_new` until saved.

/// Working copy + original snapshot of an entity under edit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Draft<T> {
    working: Option<T>,
    original: Option<T>,
}

impl<T: Clone + PartialEq> Draft<T> {
    pub fn none() -> Self {
        Self {
            working: None,
            original: None,
        }
    }

    /// Start editing an existing entity; the original snapshot is retained
    /// for dirty comparison.
    pub fn begin_edit(&mut self, entity: T) {
        self.original = Some(entity.clone());
        self.working = Some(entity);
    }

    /// Start creating a new entity from a template. No original exists, so
    /// the draft is immediately dirty and `is_new`.
    pub fn begin_new(&mut self, template: T) {
        self.original = None;
        self.working = Some(template);
    }

    /// Apply a modification to the working copy. Starts from the default
    /// value when nothing is being edited yet, mirroring form fields that
    /// begin typing before an explicit "new" action.
    pub fn modify(&mut self, f: impl FnOnce(&mut T))
    where
        T: Default,
    {
        let working = self.working.get_or_insert_with(T::default);
        f(working);
    }

    /// Apply the same modification to the working copy and the original.
    /// Used when the server has already accepted a partial change (team
    /// membership) and it must not count as a pending edit.
    pub fn modify_both(&mut self, f: impl Fn(&mut T))
    where
        T: Default,
    {
        f(self.working.get_or_insert_with(T::default));
        f(self.original.get_or_insert_with(T::default));
    }

    /// Fold the working copy into the original, clearing the dirty flag
    /// while keeping the draft open.
    pub fn commit(&mut self) {
        self.original = self.working.clone();
    }

    /// Dirty = working copy structurally differs from the original.
    pub fn is_dirty(&self) -> bool {
        self.working != self.original
    }

    /// A draft with no original belongs to an entity the server has never
    /// seen; saving it is a create, not an update.
    pub fn is_new(&self) -> bool {
        self.working.is_some() && self.original.is_none()
    }

    pub fn is_open(&self) -> bool {
        self.working.is_some()
    }

    pub fn working(&self) -> Option<&T> {
        self.working.as_ref()
    }

    pub fn get(&self) -> Option<T> {
        self.working.clone()
    }

    /// Close the draft (save completed, cancelled, or navigated away).
    pub fn clear(&mut self) {
        self.working = None;
        self.original = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Team;

    fn team(title: &str) -> Team {
        Team {
            id: Some("t1".to_string()),
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn draft_equal_to_original_is_clean() {
        let mut draft = Draft::none();
        draft.begin_edit(team("Alpha"));
        assert!(!draft.is_dirty());
        assert!(!draft.is_new());
    }

    #[test]
    fn any_field_divergence_marks_dirty() {
        let mut draft = Draft::none();
        draft.begin_edit(team("Alpha"));
        draft.modify(|t| t.title = Some("Beta".to_string()));
        assert!(draft.is_dirty());

        // Reverting the change makes it clean again.
        draft.modify(|t| t.title = Some("Alpha".to_string()));
        assert!(!draft.is_dirty());
    }

    #[test]
    fn new_draft_is_dirty_and_new() {
        let mut draft = Draft::none();
        draft.begin_new(Team::default());
        assert!(draft.is_dirty());
        assert!(draft.is_new());
    }

    #[test]
    fn clearing_resets_the_dirty_flag() {
        let mut draft = Draft::none();
        draft.begin_edit(team("Alpha"));
        draft.modify(|t| t.title = Some("Beta".to_string()));
        draft.clear();
        assert!(!draft.is_dirty());
        assert!(!draft.is_open());
    }

    #[test]
    fn commit_folds_working_into_original() {
        let mut draft = Draft::none();
        draft.begin_edit(team("Alpha"));
        draft.modify(|t| t.title = Some("Beta".to_string()));
        draft.commit();
        assert!(!draft.is_dirty());
        assert!(!draft.is_new());
        assert_eq!(draft.working().unwrap().title.as_deref(), Some("Beta"));
    }

    #[test]
    fn modify_both_keeps_other_edits_pending() {
        let mut draft = Draft::none();
        draft.begin_edit(team("Alpha"));
        draft.modify(|t| t.title = Some("Renamed".to_string()));

        let member = crate::models::AuthorizedUser {
            id: "u2".to_string(),
            ..Default::default()
        };
        draft.modify_both(|t| t.users = vec![member.clone()]);

        // Membership change applied on both sides; the rename still counts.
        assert!(draft.is_dirty());
        assert_eq!(draft.working().unwrap().users.len(), 1);
    }
}
