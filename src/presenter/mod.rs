// Catalog presenter
// Drives the table view and the add/edit form from the store

pub mod form;
pub mod view;

use crate::state::{CatalogStore, CoffeeItem};

pub use form::{CoffeeForm, FormEdits, FormError};
pub use view::{CatalogView, JsonView, TableView};

/// Error surfaced to the user: any failure flattened into its message.
#[derive(Debug)]
pub struct CommandError {
    message: String,
}

impl CommandError {
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl<E: std::fmt::Display> From<E> for CommandError {
    fn from(error: E) -> Self {
        CommandError {
            message: error.to_string(),
        }
    }
}

pub type CommandResult<T> = Result<T, CommandError>;

/// Result of opening the edit form for a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Saved,
    /// The record vanished; the form closed without saving
    NotFound,
}

pub struct CatalogPresenter<'a, V: CatalogView> {
    store: &'a CatalogStore,
    view: V,
}

impl<'a, V: CatalogView> CatalogPresenter<'a, V> {
    pub fn new(store: &'a CatalogStore, view: V) -> Self {
        Self { store, view }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// Reload every record into the table
    pub fn refresh(&mut self) -> CommandResult<()> {
        let items = self.store.list_all()?;
        self.view.show_table(&items);
        Ok(())
    }

    /// Show one record; returns whether it exists
    pub fn show_item(&mut self, id: i64) -> CommandResult<bool> {
        match self.store.get_by_id(id)? {
            Some(item) => {
                self.view.show_item(&item);
                Ok(true)
            }
            None => {
                self.view.notify(&format!("No coffee record with id {}", id));
                Ok(false)
            }
        }
    }

    /// Save a new record from the add form, then reload the table
    pub fn open_add_form(&mut self, form: CoffeeForm) -> CommandResult<i64> {
        let fields = form.validate()?;
        let id = self.store.insert(&fields)?;
        self.view.notify(&format!("Added coffee record {}", id));
        self.refresh()?;
        Ok(id)
    }

    /// Load a record into the edit form, apply the edits and save it.
    ///
    /// A record missing at load time is reported through the view and nothing
    /// is written.
    pub fn open_edit_form(&mut self, id: i64, edits: FormEdits) -> CommandResult<EditOutcome> {
        let item: CoffeeItem = match self.store.get_by_id(id)? {
            Some(item) => item,
            None => {
                log::warn!("Edit requested for missing coffee record {}", id);
                self.view
                    .notify(&format!("No coffee record with id {}, nothing saved", id));
                return Ok(EditOutcome::NotFound);
            }
        };

        let mut form = CoffeeForm::from_item(&item);
        form.apply(edits);
        let fields = form.validate()?;

        self.store.update(id, &fields)?;
        self.view.notify(&format!("Updated coffee record {}", id));
        self.refresh()?;
        Ok(EditOutcome::Saved)
    }

    pub fn report_error(&mut self, message: &str) {
        self.view.report_error(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, TempDir};

    #[derive(Default)]
    struct RecordingView {
        tables: Vec<Vec<CoffeeItem>>,
        items: Vec<CoffeeItem>,
        notices: Vec<String>,
        errors: Vec<String>,
    }

    impl CatalogView for RecordingView {
        fn show_table(&mut self, items: &[CoffeeItem]) {
            self.tables.push(items.to_vec());
        }

        fn show_item(&mut self, item: &CoffeeItem) {
            self.items.push(item.clone());
        }

        fn notify(&mut self, message: &str) {
            self.notices.push(message.to_string());
        }

        fn report_error(&mut self, message: &str) {
            self.errors.push(message.to_string());
        }
    }

    fn test_store() -> (TempDir, CatalogStore) {
        let dir = tempdir().unwrap();
        let store = CatalogStore::new(dir.path().join("coffee.sqlite"));
        store.ensure_schema().unwrap();
        (dir, store)
    }

    fn arabica_form() -> CoffeeForm {
        CoffeeForm {
            sort_name: "Arabica".to_string(),
            degree: "Medium".to_string(),
            coffee_type: "Ground".to_string(),
            description: "nutty".to_string(),
            price: "9.5".to_string(),
            size: "250".to_string(),
        }
    }

    #[test]
    fn test_add_refreshes_table() {
        let (_dir, store) = test_store();
        let mut presenter = CatalogPresenter::new(&store, RecordingView::default());

        let id = presenter.open_add_form(arabica_form()).unwrap();

        let view = presenter.into_view();
        let last = view.tables.last().unwrap();
        assert_eq!(last.len(), 1);
        assert_eq!(last[0].id, id);
        assert_eq!(last[0].fields.sort_name, "Arabica");
    }

    #[test]
    fn test_invalid_form_writes_nothing() {
        let (_dir, store) = test_store();
        let mut presenter = CatalogPresenter::new(&store, RecordingView::default());

        let mut form = arabica_form();
        form.size = "large".to_string();
        let err = presenter.open_add_form(form).unwrap_err();

        assert!(err.message().contains("size"));
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_edit_keeps_untouched_fields() {
        let (_dir, store) = test_store();
        let mut presenter = CatalogPresenter::new(&store, RecordingView::default());
        let id = presenter.open_add_form(arabica_form()).unwrap();

        let outcome = presenter
            .open_edit_form(
                id,
                FormEdits {
                    price: Some("10.0".to_string()),
                    ..FormEdits::default()
                },
            )
            .unwrap();
        assert_eq!(outcome, EditOutcome::Saved);

        let item = store.get_by_id(id).unwrap().unwrap();
        assert_eq!(item.fields.price, 10.0);
        assert_eq!(item.fields.sort_name, "Arabica");
        assert_eq!(item.fields.description.as_deref(), Some("nutty"));
        assert_eq!(item.fields.size, 250);
    }

    #[test]
    fn test_edit_missing_record_saves_nothing() {
        let (_dir, store) = test_store();
        let mut presenter = CatalogPresenter::new(&store, RecordingView::default());

        let outcome = presenter.open_edit_form(5, FormEdits::default()).unwrap();
        assert_eq!(outcome, EditOutcome::NotFound);

        let view = presenter.into_view();
        assert!(view.notices[0].contains("5"));
        assert!(view.tables.is_empty());
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_show_item() {
        let (_dir, store) = test_store();
        let mut presenter = CatalogPresenter::new(&store, RecordingView::default());
        let id = presenter.open_add_form(arabica_form()).unwrap();

        assert!(presenter.show_item(id).unwrap());
        assert!(!presenter.show_item(id + 1).unwrap());
        assert_eq!(presenter.view().items.len(), 1);
    }

    #[test]
    fn test_store_failure_is_surfaced() {
        let dir = tempdir().unwrap();
        // Schema never created
        let store = CatalogStore::new(dir.path().join("coffee.sqlite"));
        let mut presenter = CatalogPresenter::new(&store, RecordingView::default());

        let err = presenter.refresh().unwrap_err();
        presenter.report_error(err.message());
        assert_eq!(presenter.view().errors.len(), 1);
    }
}
