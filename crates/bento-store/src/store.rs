//! The widget collection store.
//!
//! [`ProfileStore`] is the only mutator of a profile's widgets. Every
//! mutation is applied in memory first, then the whole profile is written
//! through to the repository. A failed write is reported to the event sink
//! and never rolls the in-memory state back.
//!
//! Invariants after every operation:
//! - widget ids are unique
//! - `widgets[i].position == Some(i)`, so array order is display order

use crate::error::StoreError;
use crate::events::{EventSink, StoreEvent};
use crate::repository::ProfileRepository;
use bento_core::{
    ContentError, PixelSize, Theme, UserProfile, Widget, WidgetContent, WidgetDraft, WidgetId,
    WidgetPatch,
};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Whether a widget-level operation found its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The widget existed and was changed.
    Changed,
    /// No widget has that id; nothing happened.
    Missing,
}

/// Partial update of the profile header and theme.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfilePatch {
    /// New display name
    pub display_name: Option<String>,
    /// New bio
    pub bio: Option<String>,
    /// New avatar URL
    pub avatar_url: Option<String>,
    /// New theme, or `Some(None)` to remove it
    pub theme: Option<Option<Theme>>,
}

impl ProfilePatch {
    /// Empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the display name.
    #[must_use]
    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Set the bio.
    #[must_use]
    pub fn bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }

    /// Set the avatar URL.
    #[must_use]
    pub fn avatar_url(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = Some(url.into());
        self
    }

    /// Set or clear the theme.
    #[must_use]
    pub fn theme(mut self, theme: Option<Theme>) -> Self {
        self.theme = Some(theme);
        self
    }
}

/// Owns the live profile of one editing session.
pub struct ProfileStore {
    repository: Box<dyn ProfileRepository>,
    sink: Box<dyn EventSink>,
    default_size: PixelSize,
    profile: Option<UserProfile>,
}

impl ProfileStore {
    /// Store with no profile loaded. New widgets get 175x175 unless the
    /// draft or [`Self::with_default_size`] says otherwise.
    pub fn new(
        repository: impl ProfileRepository + 'static,
        sink: impl EventSink + 'static,
    ) -> Self {
        Self {
            repository: Box::new(repository),
            sink: Box::new(sink),
            default_size: PixelSize::new(175, 175),
            profile: None,
        }
    }

    /// Size applied to drafts without explicit dimensions.
    #[must_use]
    pub const fn with_default_size(mut self, size: PixelSize) -> Self {
        self.default_size = size;
        self
    }

    /// Load `owner`'s profile. A missing profile is an error.
    ///
    /// Positions are normalised on load: widgets are put in display order
    /// and renumbered `0..N-1`.
    pub fn load(&mut self, owner: &str) -> Result<&UserProfile, StoreError> {
        let profile = self.repository.load_profile(owner)?;
        info!(owner, widgets = profile.widgets.len(), "profile loaded");
        self.emit(&StoreEvent::ProfileLoaded {
            owner: owner.to_string(),
            widgets: profile.widgets.len(),
        });
        Ok(self.adopt(profile))
    }

    /// Load `owner`'s profile, creating and saving a starter profile the
    /// first time.
    pub fn load_or_create(
        &mut self,
        owner: &str,
        username: &str,
        display_name: &str,
    ) -> Result<&UserProfile, StoreError> {
        match self.load(owner).map(|_| ()) {
            Err(StoreError::ProfileNotFound(_)) => {}
            Ok(()) => return self.profile.as_ref().ok_or(StoreError::NotLoaded),
            Err(err) => return Err(err),
        }

        let profile = UserProfile::starter(owner, username, display_name);
        info!(owner, "creating starter profile");
        self.emit(&StoreEvent::ProfileCreated {
            owner: owner.to_string(),
        });
        self.adopt(profile);
        self.persist();
        self.profile.as_ref().ok_or(StoreError::NotLoaded)
    }

    /// Take ownership of an already-read profile without touching storage.
    pub fn open(&mut self, profile: UserProfile) -> &UserProfile {
        self.adopt(profile)
    }

    /// The live profile.
    #[must_use]
    pub const fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    /// Widgets in display order; empty when nothing is loaded.
    #[must_use]
    pub fn widgets(&self) -> &[Widget] {
        self.profile.as_ref().map_or(&[], |p| p.widgets.as_slice())
    }

    /// Look up a widget.
    #[must_use]
    pub fn widget(&self, id: &WidgetId) -> Option<&Widget> {
        self.widgets().iter().find(|w| &w.id == id)
    }

    /// Widget ids in display order.
    #[must_use]
    pub fn ids(&self) -> Vec<WidgetId> {
        self.widgets().iter().map(|w| w.id.clone()).collect()
    }

    /// Append a widget built from `draft`.
    ///
    /// The content is normalised and validated, a fresh id is generated,
    /// the position is the current count and absent dimensions get the
    /// default size.
    pub fn add_widget(&mut self, mut draft: WidgetDraft) -> Result<Widget, StoreError> {
        draft.content = draft.content.normalized();
        draft.content.validate()?;
        let default_size = self.default_size;
        let profile = self.profile_mut()?;

        let mut id = WidgetId::generate();
        while profile.widgets.iter().any(|w| w.id == id) {
            id = WidgetId::generate();
        }
        let position = profile.widgets.len() as u32;
        let mut widget = draft.into_widget(id, position);
        widget.width.get_or_insert(default_size.width);
        widget.height.get_or_insert(default_size.height);
        profile.widgets.push(widget.clone());

        debug!(id = %widget.id, kind = widget.type_name(), position, "widget added");
        self.emit(&StoreEvent::WidgetAdded {
            id: widget.id.clone(),
            position,
        });
        self.persist();
        Ok(widget)
    }

    /// Merge `patch` into the widget with `id`. A missing id is a no-op.
    ///
    /// Replacement content must validate and keep the widget's kind.
    pub fn update_widget(
        &mut self,
        id: &WidgetId,
        mut patch: WidgetPatch,
    ) -> Result<Applied, StoreError> {
        patch.content = patch.content.map(WidgetContent::normalized);
        let profile = self.profile_mut()?;
        let Some(widget) = profile.widgets.iter_mut().find(|w| &w.id == id) else {
            debug!(%id, "update ignored, widget missing");
            return Ok(Applied::Missing);
        };

        if let Some(content) = &patch.content {
            content.validate()?;
            match widget.kind() {
                Some(expected) if content.kind() != Some(expected) => {
                    return Err(ContentError::KindMismatch {
                        expected,
                        found: content.type_name().to_string(),
                    }
                    .into());
                }
                None => {
                    return Err(ContentError::UnsupportedKind(widget.type_name().to_string()).into());
                }
                Some(_) => {}
            }
        }

        patch.apply_to(widget);
        debug!(%id, "widget updated");
        self.emit(&StoreEvent::WidgetUpdated { id: id.clone() });
        self.persist();
        Ok(Applied::Changed)
    }

    /// Remove the widget with `id` and renumber the rest. Deleting a
    /// missing id is a no-op, so repeated deletes are idempotent.
    pub fn delete_widget(&mut self, id: &WidgetId) -> Result<Applied, StoreError> {
        let profile = self.profile_mut()?;
        let Some(index) = profile.widgets.iter().position(|w| &w.id == id) else {
            debug!(%id, "delete ignored, widget missing");
            return Ok(Applied::Missing);
        };

        profile.widgets.remove(index);
        renumber(&mut profile.widgets);
        debug!(%id, remaining = profile.widgets.len(), "widget deleted");
        self.emit(&StoreEvent::WidgetDeleted { id: id.clone() });
        self.persist();
        Ok(Applied::Changed)
    }

    /// Put widgets in the order given by `order`, which must name every
    /// current widget exactly once. Anything else is rejected unchanged.
    pub fn reorder_widgets(&mut self, order: &[WidgetId]) -> Result<(), StoreError> {
        let profile = self.profile_mut()?;
        let expected = profile.widgets.len();

        if !is_permutation(&profile.widgets, order) {
            warn!(expected, found = order.len(), "reorder rejected");
            self.emit(&StoreEvent::PermutationRejected {
                expected,
                found: order.len(),
            });
            return Err(StoreError::InvalidPermutation {
                expected,
                found: order.len(),
            });
        }

        let mut remaining = std::mem::take(&mut profile.widgets);
        for id in order {
            if let Some(index) = remaining.iter().position(|w| &w.id == id) {
                profile.widgets.push(remaining.swap_remove(index));
            }
        }
        renumber(&mut profile.widgets);

        debug!(count = expected, "widgets reordered");
        self.emit(&StoreEvent::WidgetsReordered { count: expected });
        self.persist();
        Ok(())
    }

    /// Set the dimensions of the widget with `id`. Position is untouched;
    /// a missing id is a no-op.
    pub fn resize_widget(
        &mut self,
        id: &WidgetId,
        width: u32,
        height: u32,
    ) -> Result<Applied, StoreError> {
        let profile = self.profile_mut()?;
        let Some(widget) = profile.widgets.iter_mut().find(|w| &w.id == id) else {
            debug!(%id, "resize ignored, widget missing");
            return Ok(Applied::Missing);
        };

        widget.width = Some(width);
        widget.height = Some(height);
        debug!(%id, width, height, "widget resized");
        self.emit(&StoreEvent::WidgetResized {
            id: id.clone(),
            width,
            height,
        });
        self.persist();
        Ok(Applied::Changed)
    }

    /// Update header fields and theme. Username and id are immutable.
    pub fn update_profile(&mut self, patch: ProfilePatch) -> Result<(), StoreError> {
        let profile = self.profile_mut()?;
        if let Some(name) = patch.display_name {
            profile.display_name = name;
        }
        if let Some(bio) = patch.bio {
            profile.bio = bio;
        }
        if let Some(url) = patch.avatar_url {
            profile.avatar_url = url;
        }
        if let Some(theme) = patch.theme {
            profile.theme = theme;
        }
        debug!(owner = %profile.id, "profile updated");
        self.emit(&StoreEvent::ProfileUpdated);
        self.persist();
        Ok(())
    }

    fn adopt(&mut self, mut profile: UserProfile) -> &UserProfile {
        profile.normalize_positions();
        self.profile.insert(profile)
    }

    fn profile_mut(&mut self) -> Result<&mut UserProfile, StoreError> {
        self.profile.as_mut().ok_or(StoreError::NotLoaded)
    }

    fn emit(&self, event: &StoreEvent) {
        self.sink.emit(event);
    }

    fn persist(&self) {
        let Some(profile) = &self.profile else {
            return;
        };
        if let Err(err) = self.repository.save_profile(profile) {
            warn!(owner = %profile.id, error = %err, "save failed, keeping in-memory state");
            self.emit(&StoreEvent::PersistenceFailed {
                message: err.to_string(),
            });
        }
    }
}

impl std::fmt::Debug for ProfileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileStore")
            .field("default_size", &self.default_size)
            .field("profile", &self.profile.as_ref().map(|p| &p.id))
            .finish_non_exhaustive()
    }
}

fn renumber(widgets: &mut [Widget]) {
    for (position, widget) in widgets.iter_mut().enumerate() {
        widget.position = Some(position as u32);
    }
}

fn is_permutation(widgets: &[Widget], order: &[WidgetId]) -> bool {
    if widgets.len() != order.len() {
        return false;
    }
    let current: HashSet<&WidgetId> = widgets.iter().map(|w| &w.id).collect();
    let proposed: HashSet<&WidgetId> = order.iter().collect();
    proposed.len() == order.len() && current == proposed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::RecordingSink;
    use crate::repository::InMemoryRepository;
    use bento_core::{Background, LinkContent, SpotifyContent, TextContent, YoutubeContent};

    fn store_with(n: usize) -> (ProfileStore, InMemoryRepository, RecordingSink) {
        let repo = InMemoryRepository::with_profile(UserProfile::new("u", "user", "User"));
        let sink = RecordingSink::new();
        let mut store = ProfileStore::new(repo.clone(), sink.clone());
        store.load("u").unwrap();
        for i in 0..n {
            store
                .add_widget(WidgetDraft::new(TextContent::new(format!("w{i}"))))
                .unwrap();
        }
        sink.clear();
        (store, repo, sink)
    }

    fn positions(store: &ProfileStore) -> Vec<Option<u32>> {
        store.widgets().iter().map(|w| w.position).collect()
    }

    #[test]
    fn test_operations_require_loaded_profile() {
        let mut store = ProfileStore::new(InMemoryRepository::new(), RecordingSink::new());
        let err = store
            .add_widget(WidgetDraft::new(TextContent::new("hi")))
            .unwrap_err();
        assert!(matches!(err, StoreError::NotLoaded));
        assert!(matches!(
            store.delete_widget(&WidgetId::new("x")),
            Err(StoreError::NotLoaded)
        ));
        assert!(store.widgets().is_empty());
    }

    #[test]
    fn test_load_missing_profile_is_fatal() {
        let mut store = ProfileStore::new(InMemoryRepository::new(), RecordingSink::new());
        assert!(matches!(store.load("ghost"), Err(StoreError::ProfileNotFound(_))));
        assert!(store.profile().is_none());
    }

    #[test]
    fn test_load_or_create_seeds_and_saves() {
        let repo = InMemoryRepository::new();
        let sink = RecordingSink::new();
        let mut store = ProfileStore::new(repo.clone(), sink.clone());
        let profile = store.load_or_create("u9", "neo", "Thomas Anderson").unwrap();
        assert_eq!(profile.widgets.len(), 3);
        assert_eq!(repo.save_count(), 1);
        assert!(sink
            .events()
            .contains(&StoreEvent::ProfileCreated { owner: "u9".to_string() }));

        let mut again = ProfileStore::new(repo.clone(), RecordingSink::new());
        let loaded = again.load_or_create("u9", "neo", "Thomas Anderson").unwrap();
        assert_eq!(loaded.widgets.len(), 3);
        assert_eq!(repo.save_count(), 1);
    }

    #[test]
    fn test_add_assigns_identity_and_default_size() {
        let (mut store, repo, sink) = store_with(2);
        let widget = store
            .add_widget(WidgetDraft::new(TextContent::new("hi")))
            .unwrap();
        assert_eq!(widget.position, Some(2));
        assert_eq!((widget.width, widget.height), (Some(175), Some(175)));
        assert_eq!(repo.stored("u").unwrap().widgets.len(), 3);
        assert_eq!(sink.notifications()[0].title, "Widget added");
    }

    #[test]
    fn test_add_keeps_explicit_size() {
        let (mut store, _, _) = store_with(0);
        let widget = store
            .add_widget(WidgetDraft::new(TextContent::new("hi")).with_size(366, 175))
            .unwrap();
        assert_eq!((widget.width, widget.height), (Some(366), Some(175)));
    }

    #[test]
    fn test_add_rejects_invalid_content() {
        let (mut store, repo, _) = store_with(1);
        let saves = repo.save_count();
        let err = store
            .add_widget(WidgetDraft::new(LinkContent::new("", "nowhere")))
            .unwrap_err();
        assert!(matches!(err, StoreError::SchemaMismatch(_)));
        assert_eq!(store.widgets().len(), 1);
        assert_eq!(repo.save_count(), saves);
    }

    #[test]
    fn test_update_merges_fields() {
        let (mut store, _, _) = store_with(2);
        let id = store.ids()[1].clone();
        let applied = store
            .update_widget(
                &id,
                WidgetPatch::new()
                    .title("Hello")
                    .background(Some(Background::color("#000"))),
            )
            .unwrap();
        assert_eq!(applied, Applied::Changed);
        let widget = store.widget(&id).unwrap();
        assert_eq!(widget.title.as_deref(), Some("Hello"));
        assert_eq!(widget.position, Some(1));
        assert_eq!(widget.content, WidgetContent::Text(TextContent::new("w1")));
    }

    #[test]
    fn test_update_missing_is_noop() {
        let (mut store, repo, sink) = store_with(1);
        let saves = repo.save_count();
        let applied = store
            .update_widget(&WidgetId::new("gone"), WidgetPatch::new().title("x"))
            .unwrap();
        assert_eq!(applied, Applied::Missing);
        assert_eq!(repo.save_count(), saves);
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_update_rejects_kind_change() {
        let (mut store, _, _) = store_with(1);
        let id = store.ids()[0].clone();
        let err = store
            .update_widget(
                &id,
                WidgetPatch::new().content(LinkContent::new("https://a.dev", "A")),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::SchemaMismatch(ContentError::KindMismatch { .. })
        ));
    }

    #[test]
    fn test_delete_recompacts() {
        let (mut store, _, _) = store_with(4);
        let ids = store.ids();
        assert_eq!(store.delete_widget(&ids[1]).unwrap(), Applied::Changed);
        assert_eq!(positions(&store), vec![Some(0), Some(1), Some(2)]);
        assert_eq!(store.ids(), vec![ids[0].clone(), ids[2].clone(), ids[3].clone()]);
    }

    #[test]
    fn test_delete_twice_is_idempotent() {
        let (mut store, _, _) = store_with(3);
        let id = store.ids()[0].clone();
        store.delete_widget(&id).unwrap();
        let after_first = store.widgets().to_vec();
        assert_eq!(store.delete_widget(&id).unwrap(), Applied::Missing);
        assert_eq!(store.widgets(), after_first.as_slice());
    }

    #[test]
    fn test_reorder_applies_permutation() {
        let (mut store, repo, _) = store_with(3);
        let ids = store.ids();
        let order = vec![ids[2].clone(), ids[0].clone(), ids[1].clone()];
        store.reorder_widgets(&order).unwrap();
        assert_eq!(store.ids(), order);
        assert_eq!(positions(&store), vec![Some(0), Some(1), Some(2)]);
        let stored: Vec<_> = repo
            .stored("u")
            .unwrap()
            .widgets
            .into_iter()
            .map(|w| w.id)
            .collect();
        assert_eq!(stored, order);
    }

    #[test]
    fn test_reorder_rejects_non_permutation() {
        let (mut store, _, sink) = store_with(3);
        let ids = store.ids();
        let before = store.widgets().to_vec();

        let duplicate = vec![ids[0].clone(), ids[0].clone(), ids[1].clone()];
        let err = store.reorder_widgets(&duplicate).unwrap_err();
        assert!(matches!(err, StoreError::InvalidPermutation { expected: 3, found: 3 }));

        let short = vec![ids[0].clone(), ids[1].clone()];
        assert!(store.reorder_widgets(&short).is_err());

        let foreign = vec![ids[0].clone(), ids[1].clone(), WidgetId::new("x")];
        assert!(store.reorder_widgets(&foreign).is_err());

        assert_eq!(store.widgets(), before.as_slice());
        assert_eq!(sink.events().len(), 3);
    }

    #[test]
    fn test_resize_keeps_position() {
        let (mut store, _, _) = store_with(2);
        let id = store.ids()[1].clone();
        store.resize_widget(&id, 366, 366).unwrap();
        let widget = store.widget(&id).unwrap();
        assert_eq!((widget.width, widget.height), (Some(366), Some(366)));
        assert_eq!(widget.position, Some(1));
        assert_eq!(
            store.resize_widget(&WidgetId::new("gone"), 1, 1).unwrap(),
            Applied::Missing
        );
    }

    #[test]
    fn test_failed_save_keeps_memory() {
        let (mut store, repo, sink) = store_with(1);
        repo.fail_saves(true);
        let widget = store
            .add_widget(WidgetDraft::new(TextContent::new("optimistic")))
            .unwrap();
        assert!(store.widget(&widget.id).is_some());
        assert_eq!(repo.stored("u").unwrap().widgets.len(), 1);
        assert!(sink
            .events()
            .iter()
            .any(|e| matches!(e, StoreEvent::PersistenceFailed { .. })));
    }

    #[test]
    fn test_update_profile() {
        let (mut store, repo, _) = store_with(0);
        store
            .update_profile(
                ProfilePatch::new()
                    .bio("Builder of things")
                    .theme(Some(Theme::new(Background::gradient("g")))),
            )
            .unwrap();
        let stored = repo.stored("u").unwrap();
        assert_eq!(stored.bio, "Builder of things");
        assert_eq!(stored.username, "user");
        assert!(stored.theme.is_some());
    }

    #[test]
    fn test_load_normalises_positions() {
        let mut profile = UserProfile::new("u", "user", "User");
        profile.widgets = vec![
            Widget::new(WidgetId::new("a"), TextContent::new("a")).with_position(5),
            Widget::new(WidgetId::new("b"), TextContent::new("b")).with_position(2),
        ];
        let mut store = ProfileStore::new(
            InMemoryRepository::with_profile(profile),
            RecordingSink::new(),
        );
        store.load("u").unwrap();
        assert_eq!(store.ids(), vec![WidgetId::new("b"), WidgetId::new("a")]);
        assert_eq!(positions(&store), vec![Some(0), Some(1)]);
    }

    #[test]
    fn test_added_media_widgets_derive_ids() {
        let (mut store, repo, _) = store_with(0);
        let spotify = store
            .add_widget(WidgetDraft::new(WidgetContent::Spotify(SpotifyContent::from_url(
                "https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC",
            ))))
            .unwrap();
        let youtube = store
            .add_widget(WidgetDraft::new(WidgetContent::Youtube(YoutubeContent::from_url(
                "https://youtu.be/dQw4w9WgXcQ",
            ))))
            .unwrap();

        let WidgetContent::Spotify(c) = &store.widget(&spotify.id).unwrap().content else {
            panic!("expected spotify content");
        };
        assert_eq!(c.track_id, "4uLU6hMCjMI75M1A2tKUQC");
        assert!(c.embed_url.ends_with("/embed/track/4uLU6hMCjMI75M1A2tKUQC"));

        let WidgetContent::Youtube(c) = &store.widget(&youtube.id).unwrap().content else {
            panic!("expected youtube content");
        };
        assert_eq!(c.video_id, "dQw4w9WgXcQ");

        assert_eq!(repo.stored("u").unwrap().widgets, store.widgets());
    }

    #[test]
    fn test_updated_media_content_derives_ids() {
        let (mut store, _, _) = store_with(0);
        let widget = store
            .add_widget(WidgetDraft::new(WidgetContent::Youtube(YoutubeContent::from_url(
                "https://youtu.be/dQw4w9WgXcQ",
            ))))
            .unwrap();
        store
            .update_widget(
                &widget.id,
                WidgetPatch::new().content(WidgetContent::Youtube(YoutubeContent::from_url(
                    "https://www.youtube.com/watch?v=9bZkp7q19f0",
                ))),
            )
            .unwrap();
        let WidgetContent::Youtube(c) = &store.widget(&widget.id).unwrap().content else {
            panic!("expected youtube content");
        };
        assert_eq!(c.video_id, "9bZkp7q19f0");
    }
}
