//! Client-side wardrobe state kept in sync with the backend.
//!
//! The store holds the canonical list of clothing items and the active
//! filters. Mutations go to the backend first and touch local state only
//! once the backend confirms them; nothing is applied optimistically.
//!
//! Operations take `&self` so several of them can be in flight on one task.
//! Each response is applied on its own, keyed by the id it concerns, and no
//! `RefCell` borrow is held across an `.await`. Two concurrent
//! [`ClothingListStore::increment_wear`] calls on the same item can both
//! read the same count and lose an increment; ordering of writes is left to
//! the backend.

use std::cell::RefCell;
use std::collections::HashSet;

use crate::client::backend::ClothesBackend;
use crate::client::error::{BackendError, Operation, StoreError, StoreResult, ValidationError};
use crate::client::intent::{ClothingDraft, Intent};
use crate::domain::clothing::{Clothing, UpdateClothing};
use crate::domain::filter::{FilterPatch, FilterState};
use crate::domain::types::ClothingId;

#[derive(Debug, Default)]
struct StoreState {
    items: Vec<Clothing>,
    filter: FilterState,
    loaded: bool,
}

pub struct ClothingListStore<B> {
    backend: B,
    state: RefCell<StoreState>,
}

impl<B: ClothesBackend> ClothingListStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: RefCell::new(StoreState::default()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Whether a full list has been fetched at least once.
    pub fn is_loaded(&self) -> bool {
        self.state.borrow().loaded
    }

    /// Snapshot of the canonical list in display order.
    pub fn items(&self) -> Vec<Clothing> {
        self.state.borrow().items.clone()
    }

    pub fn get(&self, id: &ClothingId) -> Option<Clothing> {
        self.state
            .borrow()
            .items
            .iter()
            .find(|item| &item.id == id)
            .cloned()
    }

    pub fn filter(&self) -> FilterState {
        self.state.borrow().filter.clone()
    }

    pub fn set_filter(&self, patch: FilterPatch) {
        self.state.borrow_mut().filter.merge(patch);
    }

    /// Items satisfying every active filter, recomputed on each call.
    pub fn visible_items(&self) -> Vec<Clothing> {
        let state = self.state.borrow();
        state.filter.apply(&state.items)
    }

    /// Replaces the local list with the backend's full list.
    pub async fn load(&self) -> StoreResult<()> {
        let items = self
            .backend
            .list_clothes()
            .await
            .map_err(|source| operation_failed(Operation::Load, source))?;
        let items = dedup_by_id(items);

        log::debug!("Loaded {} clothing items", items.len());
        let mut state = self.state.borrow_mut();
        state.items = items;
        state.loaded = true;
        Ok(())
    }

    /// Validates the draft, creates it at the backend and appends the
    /// backend's representation.
    pub async fn add(&self, draft: ClothingDraft) -> StoreResult<Clothing> {
        let new_clothing = draft.validate()?;
        let created = self
            .backend
            .create_clothing(&new_clothing)
            .await
            .map_err(|source| operation_failed(Operation::Add, source))?;

        let mut state = self.state.borrow_mut();
        match state.items.iter().position(|item| item.id == created.id) {
            Some(index) => {
                log::warn!("Backend reused id `{}` on create", created.id);
                state.items[index] = created.clone();
            }
            None => state.items.push(created.clone()),
        }
        log::debug!("Added clothing `{}`", created.id);
        Ok(created)
    }

    /// Sends `updates` for a known item and stores the echoed item.
    pub async fn update(&self, id: &ClothingId, updates: UpdateClothing) -> StoreResult<Clothing> {
        self.require(id)?;
        self.send_update(Operation::Update(id.clone()), id, &updates)
            .await
    }

    /// Submits the current wear count plus one.
    pub async fn increment_wear(&self, id: &ClothingId) -> StoreResult<Clothing> {
        let current = self.require(id)?;
        let updates = UpdateClothing::default().wear_count(current.wear_count.saturating_add(1));
        self.send_update(Operation::IncrementWear(id.clone()), id, &updates)
            .await
    }

    /// Deletes the item at the backend. Confirmation is the caller's job.
    pub async fn remove(&self, id: &ClothingId) -> StoreResult<()> {
        self.backend
            .delete_clothing(id)
            .await
            .map_err(|source| operation_failed(Operation::Remove(id.clone()), source))?;

        self.state.borrow_mut().items.retain(|item| &item.id != id);
        log::debug!("Removed clothing `{id}`");
        Ok(())
    }

    /// Routes a user intent to the matching operation.
    pub async fn dispatch(&self, intent: Intent) -> StoreResult<()> {
        match intent {
            Intent::Load => self.load().await,
            Intent::Add(draft) => self.add(draft).await.map(drop),
            Intent::Edit(id, updates) => self.update(&id, updates).await.map(drop),
            Intent::Delete {
                id,
                confirmed: true,
            } => self.remove(&id).await,
            Intent::Delete {
                id,
                confirmed: false,
            } => {
                log::debug!("Deletion of `{id}` not confirmed");
                Ok(())
            }
            Intent::IncrementWear(id) => self.increment_wear(&id).await.map(drop),
            Intent::SetFilter(patch) => {
                self.set_filter(patch);
                Ok(())
            }
        }
    }

    fn require(&self, id: &ClothingId) -> StoreResult<Clothing> {
        self.get(id)
            .ok_or_else(|| ValidationError::UnknownId(id.clone()).into())
    }

    async fn send_update(
        &self,
        operation: Operation,
        id: &ClothingId,
        updates: &UpdateClothing,
    ) -> StoreResult<Clothing> {
        let updated = self
            .backend
            .update_clothing(id, updates)
            .await
            .map_err(|source| operation_failed(operation, source))?;

        let mut state = self.state.borrow_mut();
        match state.items.iter_mut().find(|item| &item.id == id) {
            Some(entry) => *entry = updated.clone(),
            None => log::warn!("Clothing `{id}` was removed before its update completed"),
        }
        Ok(updated)
    }
}

fn operation_failed(operation: Operation, source: BackendError) -> StoreError {
    log::error!("Failed to {operation}: {source}");
    StoreError::OperationFailed { operation, source }
}

/// Keeps the first occurrence of every id.
fn dedup_by_id(items: Vec<Clothing>) -> Vec<Clothing> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| {
            let fresh = seen.insert(item.id.clone());
            if !fresh {
                log::warn!("Dropping duplicate clothing id `{}`", item.id);
            }
            fresh
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::HashMap;

    use chrono::NaiveDate;

    use super::*;
    use crate::domain::clothing::NewClothing;
    use crate::domain::filter::Choice;
    use crate::domain::types::{ClothingLabel, ClothingType, Season};

    /// In-process stand-in for the wardrobe API.
    #[derive(Default)]
    struct FakeBackend {
        stored: RefCell<Vec<Clothing>>,
        calls: Cell<usize>,
        failure: RefCell<Option<BackendError>>,
        next_id: Cell<u32>,
        /// Number of scheduler yields before an update for the id completes.
        update_delays: RefCell<HashMap<ClothingId, usize>>,
        completed_updates: RefCell<Vec<ClothingId>>,
        sent_updates: RefCell<Vec<UpdateClothing>>,
    }

    impl FakeBackend {
        fn with_items(items: Vec<Clothing>) -> Self {
            let backend = Self::default();
            *backend.stored.borrow_mut() = items;
            backend
        }

        fn fail_with(&self, err: BackendError) {
            *self.failure.borrow_mut() = Some(err);
        }

        fn recover(&self) {
            *self.failure.borrow_mut() = None;
        }

        fn begin(&self) -> Result<(), BackendError> {
            self.calls.set(self.calls.get() + 1);
            match self.failure.borrow().clone() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }
    }

    impl ClothesBackend for FakeBackend {
        async fn list_clothes(&self) -> Result<Vec<Clothing>, BackendError> {
            self.begin()?;
            Ok(self.stored.borrow().clone())
        }

        async fn create_clothing(
            &self,
            new_clothing: &NewClothing,
        ) -> Result<Clothing, BackendError> {
            self.begin()?;
            let id = self.next_id.get() + 1;
            self.next_id.set(id);
            let created = Clothing {
                id: ClothingId::new(format!("srv-{id}")).unwrap(),
                label: new_clothing.label.clone(),
                clothing_type: new_clothing.clothing_type,
                season: new_clothing.season,
                wear_count: new_clothing.wear_count.unwrap_or(0),
                purchase_date: new_clothing
                    .purchase_date
                    .or(NaiveDate::from_ymd_opt(2024, 1, 1)),
                image_url: new_clothing.image_url.clone(),
            };
            self.stored.borrow_mut().push(created.clone());
            Ok(created)
        }

        async fn update_clothing(
            &self,
            id: &ClothingId,
            updates: &UpdateClothing,
        ) -> Result<Clothing, BackendError> {
            self.begin()?;
            self.sent_updates.borrow_mut().push(updates.clone());
            let delay = self
                .update_delays
                .borrow()
                .get(id)
                .copied()
                .unwrap_or(0);
            for _ in 0..delay {
                tokio::task::yield_now().await;
            }

            let mut stored = self.stored.borrow_mut();
            let item = stored
                .iter_mut()
                .find(|item| &item.id == id)
                .ok_or(BackendError::RequestFailed {
                    status: 404,
                    message: "Clothing not found".into(),
                })?;
            if let Some(label) = &updates.label {
                item.label = label.clone();
            }
            if let Some(clothing_type) = updates.clothing_type {
                item.clothing_type = clothing_type;
            }
            if let Some(season) = updates.season {
                item.season = season;
            }
            if let Some(wear_count) = updates.wear_count {
                item.wear_count = wear_count;
            }
            if let Some(image_url) = &updates.image_url {
                item.image_url = Some(image_url.clone());
            }
            self.completed_updates.borrow_mut().push(id.clone());
            Ok(item.clone())
        }

        async fn delete_clothing(&self, id: &ClothingId) -> Result<(), BackendError> {
            self.begin()?;
            self.stored.borrow_mut().retain(|item| &item.id != id);
            Ok(())
        }
    }

    fn id(value: &str) -> ClothingId {
        ClothingId::new(value).unwrap()
    }

    fn item(
        item_id: &str,
        label: &str,
        clothing_type: ClothingType,
        season: Season,
        wear_count: u32,
    ) -> Clothing {
        Clothing {
            id: id(item_id),
            label: ClothingLabel::new(label).unwrap(),
            clothing_type,
            season,
            wear_count,
            purchase_date: None,
            image_url: None,
        }
    }

    fn sample_items() -> Vec<Clothing> {
        vec![
            item("1", "Blue Shirt", ClothingType::Top, Season::Summer, 3),
            item("2", "Red Jacket", ClothingType::Outerwear, Season::Winter, 0),
            item("3", "Grey Trousers", ClothingType::Bottom, Season::SpringAutumn, 7),
        ]
    }

    async fn loaded_store() -> ClothingListStore<FakeBackend> {
        let store = ClothingListStore::new(FakeBackend::with_items(sample_items()));
        store.load().await.expect("initial load");
        store
    }

    fn network_down() -> BackendError {
        BackendError::Network("connection refused".into())
    }

    #[tokio::test]
    async fn load_replaces_items() {
        let store = ClothingListStore::new(FakeBackend::with_items(sample_items()));
        assert!(!store.is_loaded());

        store.load().await.unwrap();

        assert!(store.is_loaded());
        assert_eq!(store.items(), sample_items());
        assert_eq!(store.backend().calls.get(), 1);
    }

    #[tokio::test]
    async fn failed_load_keeps_previous_items() {
        let store = loaded_store().await;
        store.backend().stored.borrow_mut().clear();
        store.backend().fail_with(BackendError::RequestFailed {
            status: 500,
            message: "boom".into(),
        });

        let err = store.load().await.unwrap_err();

        assert_eq!(err.operation(), Some(&Operation::Load));
        assert_eq!(store.items(), sample_items());
    }

    #[tokio::test]
    async fn load_drops_duplicate_ids() {
        let mut items = sample_items();
        items.push(item("1", "Impostor", ClothingType::Dress, Season::Winter, 0));
        let store = ClothingListStore::new(FakeBackend::with_items(items));

        store.load().await.unwrap();

        assert_eq!(store.items(), sample_items());
    }

    #[tokio::test]
    async fn default_filter_shows_everything_in_order() {
        let store = loaded_store().await;
        assert_eq!(store.visible_items(), store.items());
    }

    #[tokio::test]
    async fn filter_scenario() {
        let store = ClothingListStore::new(FakeBackend::with_items(vec![item(
            "1",
            "Blue Shirt",
            ClothingType::Top,
            Season::Summer,
            3,
        )]));
        store.load().await.unwrap();
        let calls = store.backend().calls.get();

        store.set_filter(
            FilterPatch::default()
                .clothing_type(Choice::Only(ClothingType::Top))
                .season(Choice::All)
                .search("blue"),
        );
        let visible = store.visible_items();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, id("1"));

        store.set_filter(FilterPatch::default().search("red"));
        assert!(store.visible_items().is_empty());
        assert_eq!(store.backend().calls.get(), calls);
    }

    #[tokio::test]
    async fn add_appends_backend_representation() {
        let store = loaded_store().await;
        let before = store.items().len();
        let draft = ClothingDraft {
            label: "  Wool Coat ".into(),
            clothing_type: Some(ClothingType::Outerwear),
            season: Some(Season::Winter),
            ..ClothingDraft::default()
        };

        let created = store.add(draft).await.unwrap();

        let items = store.items();
        assert_eq!(items.len(), before + 1);
        assert_eq!(items.last(), Some(&created));
        assert_eq!(created.id, id("srv-1"));
        assert_eq!(created.label.as_str(), "Wool Coat");
        // Defaulted by the backend, not present in the draft.
        assert_eq!(created.purchase_date, NaiveDate::from_ymd_opt(2024, 1, 1));
    }

    #[tokio::test]
    async fn invalid_draft_is_rejected_locally() {
        let store = loaded_store().await;
        let calls = store.backend().calls.get();

        let err = store
            .add(ClothingDraft {
                label: " ".into(),
                clothing_type: Some(ClothingType::Top),
                season: Some(Season::Summer),
                ..ClothingDraft::default()
            })
            .await
            .unwrap_err();

        assert_eq!(err, StoreError::Validation(ValidationError::EmptyLabel));
        assert_eq!(store.backend().calls.get(), calls);
        assert_eq!(store.items(), sample_items());
    }

    #[tokio::test]
    async fn failed_add_leaves_items_unchanged() {
        let store = loaded_store().await;
        store.backend().fail_with(network_down());

        let err = store
            .add(ClothingDraft {
                label: "Scarf".into(),
                clothing_type: Some(ClothingType::Outerwear),
                season: Some(Season::Winter),
                ..ClothingDraft::default()
            })
            .await
            .unwrap_err();

        assert_eq!(
            err,
            StoreError::OperationFailed {
                operation: Operation::Add,
                source: network_down(),
            }
        );
        assert_eq!(store.items(), sample_items());
    }

    #[tokio::test]
    async fn update_of_unknown_id_never_reaches_backend() {
        let store = loaded_store().await;
        let calls = store.backend().calls.get();

        let err = store
            .update(&id("missing-id"), UpdateClothing::default().wear_count(1))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            StoreError::Validation(ValidationError::UnknownId(id("missing-id")))
        );
        assert_eq!(store.backend().calls.get(), calls);
    }

    #[tokio::test]
    async fn update_stores_backend_echo() {
        let store = loaded_store().await;
        let label = ClothingLabel::new("Navy Shirt").unwrap();

        let updated = store
            .update(
                &id("1"),
                UpdateClothing::default()
                    .label(label.clone())
                    .season(Season::SpringAutumn),
            )
            .await
            .unwrap();

        assert_eq!(updated.label, label);
        assert_eq!(store.get(&id("1")), Some(updated.clone()));
        assert_eq!(store.backend().stored.borrow()[0], updated);
    }

    #[tokio::test]
    async fn failed_update_keeps_local_item() {
        let store = loaded_store().await;
        store.backend().fail_with(BackendError::RequestFailed {
            status: 400,
            message: "bad".into(),
        });

        let err = store
            .update(&id("2"), UpdateClothing::default().season(Season::Summer))
            .await
            .unwrap_err();

        assert_eq!(err.operation(), Some(&Operation::Update(id("2"))));
        assert_eq!(store.items(), sample_items());
    }

    #[tokio::test]
    async fn increment_wear_submits_previous_plus_one() {
        let store = loaded_store().await;

        let updated = store.increment_wear(&id("1")).await.unwrap();

        assert_eq!(updated.wear_count, 4);
        assert_eq!(store.get(&id("1")).unwrap().wear_count, 4);
        assert_eq!(
            store.backend().sent_updates.borrow().as_slice(),
            &[UpdateClothing::default().wear_count(4)]
        );
    }

    #[tokio::test]
    async fn failed_increment_is_not_applied() {
        let store = loaded_store().await;
        store.backend().fail_with(network_down());

        let err = store.increment_wear(&id("3")).await.unwrap_err();

        assert_eq!(err.operation(), Some(&Operation::IncrementWear(id("3"))));
        assert_eq!(store.get(&id("3")).unwrap().wear_count, 7);

        store.backend().recover();
        store.increment_wear(&id("3")).await.unwrap();
        assert_eq!(store.get(&id("3")).unwrap().wear_count, 8);
    }

    #[tokio::test]
    async fn remove_drops_item() {
        let store = loaded_store().await;

        store.remove(&id("2")).await.unwrap();

        assert!(store.items().iter().all(|item| item.id != id("2")));
        assert_eq!(store.items().len(), 2);
    }

    #[tokio::test]
    async fn failed_remove_keeps_item() {
        let store = loaded_store().await;
        store.backend().fail_with(BackendError::RequestFailed {
            status: 404,
            message: "Clothing not found".into(),
        });

        assert!(store.remove(&id("2")).await.is_err());
        assert!(store.get(&id("2")).is_some());
    }

    #[tokio::test]
    async fn out_of_order_responses_apply_to_their_own_items() {
        let store = loaded_store().await;
        store
            .backend()
            .update_delays
            .borrow_mut()
            .insert(id("1"), 3);

        let (one, three) = (id("1"), id("3"));
        let (first, second) =
            tokio::join!(store.increment_wear(&one), store.increment_wear(&three));
        first.unwrap();
        second.unwrap();

        assert_eq!(
            store.backend().completed_updates.borrow().as_slice(),
            &[id("3"), id("1")]
        );
        assert_eq!(store.get(&id("1")).unwrap().wear_count, 4);
        assert_eq!(store.get(&id("3")).unwrap().wear_count, 8);
    }

    #[tokio::test]
    async fn concurrent_increments_of_one_item_may_lose_an_update() {
        let store = loaded_store().await;
        store
            .backend()
            .update_delays
            .borrow_mut()
            .insert(id("1"), 1);

        let one = id("1");
        let (first, second) =
            tokio::join!(store.increment_wear(&one), store.increment_wear(&one));
        first.unwrap();
        second.unwrap();

        // Both calls read 3 before either response arrived.
        assert_eq!(store.get(&id("1")).unwrap().wear_count, 4);
    }

    #[tokio::test]
    async fn concurrent_update_and_remove_touch_only_their_items() {
        let store = loaded_store().await;
        store
            .backend()
            .update_delays
            .borrow_mut()
            .insert(id("2"), 2);

        let (two, three) = (id("2"), id("3"));
        let (updated, removed) = tokio::join!(store.increment_wear(&two), store.remove(&three));
        updated.unwrap();
        removed.unwrap();
        assert!(store.get(&id("3")).is_none());
        assert_eq!(store.get(&id("2")).unwrap().wear_count, 1);
    }

    #[tokio::test]
    async fn visible_items_follow_mutations() {
        let store = loaded_store().await;
        store.set_filter(FilterPatch::default().clothing_type(Choice::Only(ClothingType::Top)));
        assert_eq!(store.visible_items().len(), 1);

        store
            .update(
                &id("1"),
                UpdateClothing::default().clothing_type(ClothingType::Bottom),
            )
            .await
            .unwrap();

        assert!(store.visible_items().is_empty());
    }

    #[tokio::test]
    async fn unconfirmed_delete_does_nothing() {
        let store = loaded_store().await;
        let calls = store.backend().calls.get();

        store
            .dispatch(Intent::Delete {
                id: id("1"),
                confirmed: false,
            })
            .await
            .unwrap();

        assert_eq!(store.backend().calls.get(), calls);
        assert_eq!(store.items(), sample_items());
    }

    #[tokio::test]
    async fn dispatch_routes_intents() {
        let store = ClothingListStore::new(FakeBackend::with_items(sample_items()));

        store.dispatch(Intent::Load).await.unwrap();
        store
            .dispatch(Intent::IncrementWear(id("2")))
            .await
            .unwrap();
        store
            .dispatch(Intent::Delete {
                id: id("3"),
                confirmed: true,
            })
            .await
            .unwrap();
        store
            .dispatch(Intent::SetFilter(
                FilterPatch::default().season(Choice::Only(Season::Winter)),
            ))
            .await
            .unwrap();

        let visible = store.visible_items();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, id("2"));
        assert_eq!(visible[0].wear_count, 1);
        assert_eq!(store.items().len(), 2);
    }
}
