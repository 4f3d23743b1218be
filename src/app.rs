//! Coordinator wiring UI events to the item store, storage and view.
//!
//! Every event runs to completion before the next one is handled. Each
//! handler updates memory first, then the view, then storage, and finally
//! switches the form mode. Nothing is rolled back if a later step fails.

use thiserror::Error;

use crate::models::{Item, ItemError};
use crate::storage::{ItemStorage, KeyValueStore, StorageError};
use crate::store::ItemStore;
use crate::view::{ClickTarget, View};

/// User interactions the coordinator reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Add button pressed.
    AddSubmit,
    /// Click somewhere inside the item list.
    EditClick(ClickTarget),
    /// Update button pressed.
    UpdateSubmit,
    /// Delete button pressed.
    DeleteSubmit,
    /// Back button pressed.
    BackClick,
    /// Clear-all button pressed.
    ClearAllClick,
}

/// Whether an event changed anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Applied,
    /// The event was not acted on (missing input, click outside an edit icon).
    Ignored,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Item(#[from] ItemError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Item not found: {0}")]
    ItemNotFound(u32),
}

/// The running application: item store, persistence and view.
#[derive(Debug)]
pub struct App<S, V> {
    store: ItemStore,
    storage: ItemStorage<S>,
    view: V,
}

impl<S: KeyValueStore, V: View> App<S, V> {
    /// Loads persisted items and renders the initial page in add mode.
    pub fn init(storage: ItemStorage<S>, mut view: V) -> Result<Self, AppError> {
        view.clear_edit_state();

        let store = ItemStore::from_items(storage.get_items()?);
        tracing::info!("Initializing app with {} item(s)", store.items().len());

        if store.is_empty() {
            view.hide_list();
        } else {
            view.populate_item_list(store.items());
        }
        view.show_total_calories(store.total_calories());

        Ok(Self {
            store,
            storage,
            view,
        })
    }

    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    pub fn storage(&self) -> &ItemStorage<S> {
        &self.storage
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Mutable access to the view, used to type into the form.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Dispatches a single event.
    pub fn handle(&mut self, event: Event) -> Result<EventOutcome, AppError> {
        match event {
            Event::AddSubmit => self.item_add_submit(),
            Event::EditClick(target) => self.item_edit_click(&target),
            Event::UpdateSubmit => self.item_update_submit(),
            Event::DeleteSubmit => self.item_delete_submit(),
            Event::BackClick => {
                self.store.clear_current_item();
                self.view.clear_edit_state();
                Ok(EventOutcome::Applied)
            }
            Event::ClearAllClick => self.clear_all_items_click(),
        }
    }

    fn refresh_total(&mut self) {
        self.view.show_total_calories(self.store.total_calories());
    }

    fn item_add_submit(&mut self) -> Result<EventOutcome, AppError> {
        let input = self.view.get_item_input();
        if !input.is_complete() {
            tracing::debug!("Ignoring add with empty input");
            return Ok(EventOutcome::Ignored);
        }

        let item = self.store.add_item(&input.name, &input.calories)?;
        self.view.add_list_item(&item);
        self.refresh_total();
        self.storage.store_item(&item)?;
        self.view.clear_input();

        tracing::info!("Added item {}: {}", item.id, item);
        Ok(EventOutcome::Applied)
    }

    fn item_edit_click(&mut self, target: &ClickTarget) -> Result<EventOutcome, AppError> {
        if !target.is_edit() {
            return Ok(EventOutcome::Ignored);
        }
        let Some(id) = target.item_id() else {
            tracing::warn!("Edit click on row without an item id: {:?}", target.row_id);
            return Ok(EventOutcome::Ignored);
        };

        let item = self
            .store
            .set_current_item(id)
            .filter(|item| item.id == id)
            .cloned()
            .ok_or(AppError::ItemNotFound(id))?;
        self.view.add_item_to_form(&item);
        self.view.show_edit_state();

        tracing::debug!("Editing item {}", id);
        Ok(EventOutcome::Applied)
    }

    fn item_update_submit(&mut self) -> Result<EventOutcome, AppError> {
        let input = self.view.get_item_input();
        if !input.is_complete() {
            tracing::debug!("Ignoring update with empty input");
            return Ok(EventOutcome::Ignored);
        }

        let item = self.store.update_item(&input.name, &input.calories)?;
        self.view.update_list_item(&item);
        self.refresh_total();
        self.storage.update_item_storage(&item)?;
        self.store.clear_current_item();
        self.view.clear_edit_state();

        tracing::info!("Updated item {}: {}", item.id, item);
        Ok(EventOutcome::Applied)
    }

    fn item_delete_submit(&mut self) -> Result<EventOutcome, AppError> {
        let item: Item = self
            .store
            .current_item()
            .cloned()
            .ok_or(ItemError::NoCurrentItem)?;

        self.store.delete_item(item.id);
        self.view.delete_list_item(item.id);
        self.refresh_total();
        self.storage.delete_item_from_storage(&item)?;
        self.view.clear_edit_state();

        tracing::info!("Deleted item {}: {}", item.id, item);
        Ok(EventOutcome::Applied)
    }

    fn clear_all_items_click(&mut self) -> Result<EventOutcome, AppError> {
        self.store.clear_all_items();
        self.view.remove_all_list_items();
        self.refresh_total();
        self.storage.clear_items_from_storage()?;
        self.view.hide_list();
        self.view.clear_edit_state();

        tracing::info!("Cleared all items");
        Ok(EventOutcome::Applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemInput;
    use crate::storage::{MemoryStore, ITEMS_KEY};
    use crate::view::{Mode, Page};

    type TestApp = App<MemoryStore, Page>;

    fn new_app() -> TestApp {
        App::init(ItemStorage::new(MemoryStore::new()), Page::new()).unwrap()
    }

    fn add(app: &mut TestApp, name: &str, calories: &str) -> EventOutcome {
        app.view_mut().set_input(name, calories);
        app.handle(Event::AddSubmit).unwrap()
    }

    fn edit(app: &mut TestApp, id: u32) -> EventOutcome {
        app.handle(Event::EditClick(ClickTarget::edit_icon(id))).unwrap()
    }

    fn persisted(app: &TestApp) -> Vec<Item> {
        app.storage().get_items().unwrap()
    }

    #[test]
    fn test_init_empty_hides_list() {
        let app = new_app();
        assert!(!app.view().list.is_shown());
        assert_eq!(app.view().mode(), Mode::Add);
        assert_eq!(app.view().total_calories, "0");
    }

    #[test]
    fn test_init_loads_persisted_items() {
        let mut storage = ItemStorage::new(MemoryStore::new());
        storage.store_item(&Item::new(1, "Eggs", 300)).unwrap();
        storage.store_item(&Item::new(4, "Toast", 150)).unwrap();

        let app = App::init(storage, Page::new()).unwrap();
        assert_eq!(app.store().items().len(), 2);
        assert!(app.view().list.is_shown());
        assert_eq!(app.view().rows.len(), 2);
        assert_eq!(app.view().rows[1].id, "item-4");
        assert_eq!(app.view().total_calories, "450");
        assert_eq!(app.view().mode(), Mode::Add);
    }

    #[test]
    fn test_init_fails_on_malformed_storage() {
        let mut backend = MemoryStore::new();
        backend.set_item(ITEMS_KEY, "nope").unwrap();
        let result = App::init(ItemStorage::new(backend), Page::new());
        assert!(matches!(result, Err(AppError::Storage(_))));
    }

    #[test]
    fn test_eggs_and_toast_scenario() {
        let mut app = new_app();

        // Add Eggs
        assert_eq!(add(&mut app, "Eggs", "300"), EventOutcome::Applied);
        assert_eq!(app.store().items(), &[Item::new(1, "Eggs", 300)]);
        assert_eq!(app.view().total_calories, "300");
        assert!(app.view().list.is_shown());
        assert_eq!(app.view().get_item_input(), ItemInput::default());

        // Add Toast
        add(&mut app, "Toast", "150");
        assert_eq!(app.store().items()[1], Item::new(2, "Toast", 150));
        assert_eq!(app.view().total_calories, "450");

        // Select Eggs and update it
        assert_eq!(edit(&mut app, 1), EventOutcome::Applied);
        assert_eq!(app.view().mode(), Mode::Edit);
        assert_eq!(app.view().name_input, "Eggs");
        assert_eq!(app.view().calories_input, "300");

        app.view_mut().set_calories_input("320");
        app.handle(Event::UpdateSubmit).unwrap();
        assert_eq!(app.view().total_calories, "470");
        assert_eq!(app.view().mode(), Mode::Add);
        assert_eq!(app.view().rows[0].calories, 320);
        assert!(app.store().current_item().is_none());
        assert_eq!(
            persisted(&app),
            vec![Item::new(2, "Toast", 150), Item::new(1, "Eggs", 320)]
        );
        // In-memory order is unchanged
        assert_eq!(app.store().items()[0].id, 1);

        // Delete Toast
        edit(&mut app, 2);
        app.handle(Event::DeleteSubmit).unwrap();
        assert_eq!(app.view().total_calories, "320");
        assert_eq!(app.store().items().len(), 1);
        assert_eq!(app.view().rows.len(), 1);
        assert_eq!(persisted(&app), vec![Item::new(1, "Eggs", 320)]);
        assert_eq!(app.view().mode(), Mode::Add);

        // Clear all
        app.handle(Event::ClearAllClick).unwrap();
        assert!(app.store().is_empty());
        assert_eq!(app.view().total_calories, "0");
        assert!(!app.storage().backend().contains_key(ITEMS_KEY));
        assert!(!app.view().list.is_shown());
        assert!(app.view().rows.is_empty());
    }

    #[test]
    fn test_add_with_missing_input_is_ignored() {
        let mut app = new_app();
        assert_eq!(add(&mut app, "", "300"), EventOutcome::Ignored);
        assert_eq!(add(&mut app, "Eggs", ""), EventOutcome::Ignored);
        assert!(app.store().is_empty());
        assert!(persisted(&app).is_empty());
        // Input is left for the user to fix
        assert_eq!(app.view().name_input, "Eggs");
    }

    #[test]
    fn test_add_with_invalid_calories_is_rejected() {
        let mut app = new_app();
        app.view_mut().set_input("Eggs", "lots");
        let err = app.handle(Event::AddSubmit).unwrap_err();
        assert!(matches!(
            err,
            AppError::Item(ItemError::InvalidCalories(ref raw)) if raw == "lots"
        ));
        assert!(app.store().is_empty());
        assert!(app.view().rows.is_empty());
        assert!(persisted(&app).is_empty());
    }

    #[test]
    fn test_init_loads_negative_calories() {
        let json = r#"[{"id":1,"name":"Eggs","calories":300},{"id":2,"name":"Run","calories":-250}]"#;
        let mut backend = MemoryStore::new();
        backend.set_item(ITEMS_KEY, json).unwrap();

        let app = App::init(ItemStorage::new(backend), Page::new()).unwrap();
        assert_eq!(app.store().items()[1], Item::new(2, "Run", -250));
        assert_eq!(app.view().total_calories, "50");
    }

    #[test]
    fn test_add_when_ids_exhausted_is_rejected() {
        let mut storage = ItemStorage::new(MemoryStore::new());
        storage.store_item(&Item::new(u32::MAX, "Big", 1)).unwrap();
        let mut app = App::init(storage, Page::new()).unwrap();

        app.view_mut().set_input("Next", "2");
        let err = app.handle(Event::AddSubmit).unwrap_err();
        assert!(matches!(err, AppError::Item(ItemError::IdExhausted)));
        assert_eq!(app.view().rows.len(), 1);
        assert_eq!(persisted(&app).len(), 1);
    }

    #[test]
    fn test_click_without_edit_marker_is_ignored() {
        let mut app = new_app();
        add(&mut app, "Eggs", "300");
        let target = ClickTarget {
            classes: vec!["collection-item".to_string()],
            row_id: Some("item-1".to_string()),
        };
        assert_eq!(
            app.handle(Event::EditClick(target)).unwrap(),
            EventOutcome::Ignored
        );
        assert_eq!(app.view().mode(), Mode::Add);
    }

    #[test]
    fn test_edit_unknown_item() {
        let mut app = new_app();
        add(&mut app, "Eggs", "300");
        let err = app
            .handle(Event::EditClick(ClickTarget::edit_icon(9)))
            .unwrap_err();
        assert!(matches!(err, AppError::ItemNotFound(9)));
        assert_eq!(app.view().mode(), Mode::Add);
    }

    #[test]
    fn test_edit_unknown_item_keeps_existing_selection() {
        let mut app = new_app();
        add(&mut app, "Eggs", "300");
        edit(&mut app, 1);
        assert!(app
            .handle(Event::EditClick(ClickTarget::edit_icon(9)))
            .is_err());
        assert_eq!(app.store().current_item().map(|i| i.id), Some(1));
    }

    #[test]
    fn test_update_without_selection() {
        let mut app = new_app();
        add(&mut app, "Eggs", "300");
        app.view_mut().set_input("Eggs", "320");
        let err = app.handle(Event::UpdateSubmit).unwrap_err();
        assert!(matches!(err, AppError::Item(ItemError::NoCurrentItem)));
        assert_eq!(persisted(&app), vec![Item::new(1, "Eggs", 300)]);
    }

    #[test]
    fn test_update_with_empty_input_is_ignored() {
        let mut app = new_app();
        add(&mut app, "Eggs", "300");
        edit(&mut app, 1);
        app.view_mut().set_name_input("");
        assert_eq!(
            app.handle(Event::UpdateSubmit).unwrap(),
            EventOutcome::Ignored
        );
        assert_eq!(app.store().items()[0].name, "Eggs");
        assert_eq!(app.view().mode(), Mode::Edit);
    }

    #[test]
    fn test_delete_without_selection() {
        let mut app = new_app();
        add(&mut app, "Eggs", "300");
        let err = app.handle(Event::DeleteSubmit).unwrap_err();
        assert!(matches!(err, AppError::Item(ItemError::NoCurrentItem)));
        assert_eq!(app.store().items().len(), 1);
    }

    #[test]
    fn test_back_returns_to_add_mode() {
        let mut app = new_app();
        add(&mut app, "Eggs", "300");
        edit(&mut app, 1);

        app.handle(Event::BackClick).unwrap();
        assert_eq!(app.view().mode(), Mode::Add);
        assert!(app.store().current_item().is_none());
        assert_eq!(app.view().get_item_input(), ItemInput::default());
        assert_eq!(app.store().items()[0], Item::new(1, "Eggs", 300));
    }

    #[test]
    fn test_clear_all_from_edit_mode() {
        let mut app = new_app();
        add(&mut app, "Eggs", "300");
        edit(&mut app, 1);

        app.handle(Event::ClearAllClick).unwrap();
        assert_eq!(app.view().mode(), Mode::Add);
        assert!(matches!(
            app.handle(Event::DeleteSubmit),
            Err(AppError::Item(ItemError::NoCurrentItem))
        ));
    }

    #[test]
    fn test_add_after_clear_shows_list_again() {
        let mut app = new_app();
        add(&mut app, "Eggs", "300");
        app.handle(Event::ClearAllClick).unwrap();

        add(&mut app, "Toast", "150");
        assert!(app.view().list.is_shown());
        assert_eq!(app.store().items(), &[Item::new(1, "Toast", 150)]);
        assert_eq!(persisted(&app), vec![Item::new(1, "Toast", 150)]);
    }

    #[test]
    fn test_restart_restores_state() {
        let mut app = new_app();
        add(&mut app, "Eggs", "300");
        add(&mut app, "Toast", "150");
        edit(&mut app, 1);
        app.view_mut().set_input("Eggs", "320");
        app.handle(Event::UpdateSubmit).unwrap();

        let App { storage, .. } = app;
        let restarted = App::init(storage, Page::new()).unwrap();
        assert_eq!(
            restarted.store().items(),
            &[Item::new(2, "Toast", 150), Item::new(1, "Eggs", 320)]
        );
        assert_eq!(restarted.view().total_calories, "470");
    }
}
