//! The category service: turns repository results into domain outcomes.
//!
//! The free functions hold the logic and work with any [CategoryRepository]. [CategoryService]
//! runs each of them inside a single SQLite transaction.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::{Connection, TransactionBehavior};

use crate::{
    AppState, Error,
    category::{
        CategoryDto, CategoryEntity, CategoryId, CategoryRepository, SQLiteCategoryRepository,
    },
    error::classify_store_error,
};

/// Save `input` as a new category and return it with its assigned ID.
///
/// Any ID in `input` is ignored, so creating a category never overwrites an existing one.
pub fn create_category<R>(repository: &R, input: CategoryDto) -> Result<CategoryDto, Error>
where
    R: CategoryRepository + ?Sized,
{
    tracing::info!("Saving category with name {}", input.category_name);

    let entity = CategoryEntity {
        id: None,
        ..CategoryEntity::from(input)
    };

    save_category(repository, entity)
}

/// Get every category.
///
/// # Errors
///
/// Returns [Error::NotFound] if there are no categories at all.
pub fn list_categories<R>(repository: &R) -> Result<Vec<CategoryDto>, Error>
where
    R: CategoryRepository + ?Sized,
{
    tracing::info!("Fetching all categories");

    let categories = repository
        .find_all()
        .map_err(|error| classify_store_error(error, "fetching categories"))?;

    if categories.is_empty() {
        tracing::warn!("No categories found");
        return Err(Error::NotFound("categories not found".to_owned()));
    }

    tracing::info!("Found {} categories", categories.len());

    Ok(categories.into_iter().map(CategoryDto::from).collect())
}

/// Get the category with `id`.
///
/// # Errors
///
/// Returns [Error::NotFound] if there is no category with `id`.
pub fn get_category_by_id<R>(repository: &R, id: CategoryId) -> Result<CategoryDto, Error>
where
    R: CategoryRepository + ?Sized,
{
    tracing::info!("Fetching category with id {id}");

    let category = repository
        .find_by_id(id)
        .map_err(|error| classify_store_error(error, &format!("fetching category with id {id}")))?;

    match category {
        Some(category) => {
            tracing::info!("Category with id {id} found");
            Ok(category.into())
        }
        None => {
            tracing::warn!("Category with id {id} not found");
            Err(Error::NotFound(format!("category with id {id} not found")))
        }
    }
}

/// Get the category called `name`.
///
/// # Errors
///
/// Returns [Error::NotFound] if no category has that name.
pub fn get_category_by_name<R>(repository: &R, name: &str) -> Result<CategoryDto, Error>
where
    R: CategoryRepository + ?Sized,
{
    tracing::info!("Fetching category with name {name}");

    let category = repository.find_by_name(name).map_err(|error| {
        classify_store_error(error, &format!("fetching category with name {name}"))
    })?;

    match category {
        Some(category) => {
            tracing::info!("Category with name {name} found");
            Ok(category.into())
        }
        None => {
            tracing::warn!("Category with name {name} not found");
            Err(Error::NotFound(format!("category with name {name} not found")))
        }
    }
}

/// Replace the name of the existing category with `id`. The ID never changes.
///
/// # Errors
///
/// Returns [Error::NotFound] if there is no category with `id`; an update never creates one.
pub fn update_category_by_id<R>(
    repository: &R,
    id: CategoryId,
    input: CategoryDto,
) -> Result<CategoryDto, Error>
where
    R: CategoryRepository + ?Sized,
{
    tracing::info!("Updating category with id {id}");

    let mut category = get_category_by_id(repository, id)?;
    category.category_name = input.category_name;
    let updated = save_category(repository, category.into())?;

    tracing::info!("Category with id {id} updated successfully");

    Ok(updated)
}

/// Delete the category with `id`.
///
/// # Errors
///
/// Returns [Error::NotFound] if there is no category with `id`.
pub fn delete_category_by_id<R>(repository: &R, id: CategoryId) -> Result<(), Error>
where
    R: CategoryRepository + ?Sized,
{
    get_category_by_id(repository, id)?;

    tracing::info!("Deleting category with id {id}");

    repository
        .delete_by_id(id)
        .map_err(|error| classify_store_error(error, &format!("deleting category with id {id}")))?;

    tracing::info!("Category with id {id} deleted successfully");

    Ok(())
}

fn save_category<R>(repository: &R, entity: CategoryEntity) -> Result<CategoryDto, Error>
where
    R: CategoryRepository + ?Sized,
{
    let context = format!("saving category with name {}", entity.name);

    repository
        .save(entity)
        .map(CategoryDto::from)
        .map_err(|error| classify_store_error(error, &context))
}

/// Runs the category operations against the shared SQLite connection.
///
/// Every operation runs in its own transaction. Operations that write use an immediate
/// transaction, so reading a category and then updating or deleting it cannot interleave with
/// another writer.
#[derive(Debug, Clone)]
pub struct CategoryService {
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoryService {
    fn from_ref(state: &AppState) -> Self {
        Self::new(state.db_connection.clone())
    }
}

impl CategoryService {
    /// Create a service that uses `db_connection`.
    ///
    /// The category table must already exist, see [crate::initialize_db].
    pub fn new(db_connection: Arc<Mutex<Connection>>) -> Self {
        Self { db_connection }
    }

    /// See [create_category].
    pub fn create(&self, input: CategoryDto) -> Result<CategoryDto, Error> {
        self.with_transaction(TransactionBehavior::Immediate, |repository| {
            create_category(repository, input)
        })
    }

    /// See [list_categories].
    pub fn list(&self) -> Result<Vec<CategoryDto>, Error> {
        self.with_transaction(TransactionBehavior::Deferred, |repository| {
            list_categories(repository)
        })
    }

    /// See [get_category_by_id].
    pub fn get_by_id(&self, id: CategoryId) -> Result<CategoryDto, Error> {
        self.with_transaction(TransactionBehavior::Deferred, |repository| {
            get_category_by_id(repository, id)
        })
    }

    /// See [get_category_by_name].
    pub fn get_by_name(&self, name: &str) -> Result<CategoryDto, Error> {
        self.with_transaction(TransactionBehavior::Deferred, |repository| {
            get_category_by_name(repository, name)
        })
    }

    /// See [update_category_by_id].
    pub fn update_by_id(&self, id: CategoryId, input: CategoryDto) -> Result<CategoryDto, Error> {
        self.with_transaction(TransactionBehavior::Immediate, |repository| {
            update_category_by_id(repository, id, input)
        })
    }

    /// See [delete_category_by_id].
    pub fn delete_by_id(&self, id: CategoryId) -> Result<(), Error> {
        self.with_transaction(TransactionBehavior::Immediate, |repository| {
            delete_category_by_id(repository, id)
        })
    }

    /// Run `operation` in a transaction that is committed only if `operation` succeeds.
    fn with_transaction<T>(
        &self,
        behavior: TransactionBehavior,
        operation: impl FnOnce(&SQLiteCategoryRepository) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let mut connection = self
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DataAccessFailure)?;

        let transaction = connection
            .transaction_with_behavior(behavior)
            .map_err(|error| classify_store_error(error, "starting a transaction"))?;

        // Dropping the transaction on error rolls it back.
        let result = operation(&SQLiteCategoryRepository::new(&transaction))?;

        transaction
            .commit()
            .map_err(|error| classify_store_error(error, "committing a transaction"))?;

        Ok(result)
    }
}

#[cfg(test)]
mod category_service_tests {
    use std::{
        cell::RefCell,
        sync::{Arc, Mutex},
    };

    use rusqlite::{Connection, ffi};

    use crate::{
        Error,
        category::{
            CategoryDto, CategoryEntity, CategoryId, CategoryRepository, create_category_table,
        },
    };

    use super::{
        CategoryService, create_category, delete_category_by_id, get_category_by_id,
        get_category_by_name, list_categories, update_category_by_id,
    };

    fn get_test_service() -> CategoryService {
        let connection = Connection::open_in_memory().unwrap();
        create_category_table(&connection).expect("Could not create category table");

        CategoryService::new(Arc::new(Mutex::new(connection)))
    }

    fn new_category(name: &str) -> CategoryDto {
        CategoryDto {
            category_id: None,
            category_name: name.to_owned(),
        }
    }

    #[test]
    fn create_then_get_by_id_returns_same_name() {
        let service = get_test_service();

        let created = service
            .create(new_category("Books"))
            .expect("Could not create category");
        let id = created.category_id.expect("Created category has no ID");

        assert_eq!(id, 1);
        assert_eq!(service.get_by_id(id), Ok(created));
    }

    #[test]
    fn create_ignores_client_supplied_id() {
        let service = get_test_service();
        let existing = service
            .create(new_category("Existing"))
            .expect("Could not create category");

        let created = service
            .create(CategoryDto {
                category_id: existing.category_id,
                category_name: "Intruder".to_owned(),
            })
            .expect("Could not create category");

        assert_ne!(created.category_id, existing.category_id);
        assert_eq!(
            service.get_by_id(existing.category_id.unwrap()),
            Ok(existing)
        );
    }

    #[test]
    fn list_on_empty_store_is_not_found() {
        let service = get_test_service();

        assert_eq!(
            service.list(),
            Err(Error::NotFound("categories not found".to_owned()))
        );
    }

    #[test]
    fn list_returns_all_categories() {
        let service = get_test_service();
        let books = service.create(new_category("Books")).unwrap();
        let media = service.create(new_category("Media")).unwrap();

        let categories = service.list().expect("Could not list categories");

        assert_eq!(categories.len(), 2);
        assert!(categories.contains(&books));
        assert!(categories.contains(&media));
    }

    #[test]
    fn get_by_id_on_unknown_id_is_not_found() {
        let service = get_test_service();

        assert_eq!(
            service.get_by_id(42),
            Err(Error::NotFound("category with id 42 not found".to_owned()))
        );
    }

    #[test]
    fn get_by_name_finds_category() {
        let service = get_test_service();
        let created = service.create(new_category("Books")).unwrap();

        assert_eq!(service.get_by_name("Books"), Ok(created));
        assert_eq!(
            service.get_by_name("Films"),
            Err(Error::NotFound("category with name Films not found".to_owned()))
        );
    }

    #[test]
    fn update_changes_only_name() {
        let service = get_test_service();
        let created = service.create(new_category("Books")).unwrap();
        let id = created.category_id.unwrap();

        let updated = service
            .update_by_id(
                id,
                CategoryDto {
                    category_id: Some(id + 100),
                    category_name: "Media".to_owned(),
                },
            )
            .expect("Could not update category");

        assert_eq!(updated.category_id, Some(id));
        assert_eq!(updated.category_name, "Media");
        assert_eq!(service.get_by_id(id), Ok(updated));
        assert_eq!(
            service.get_by_id(id + 100),
            Err(Error::NotFound(format!("category with id {} not found", id + 100)))
        );
    }

    #[test]
    fn update_on_unknown_id_is_not_found_and_creates_nothing() {
        let service = get_test_service();

        let result = service.update_by_id(5, new_category("Ghost"));

        assert_eq!(
            result,
            Err(Error::NotFound("category with id 5 not found".to_owned()))
        );
        assert!(matches!(service.list(), Err(Error::NotFound(_))));
    }

    #[test]
    fn delete_removes_category() {
        let service = get_test_service();
        let created = service.create(new_category("Books")).unwrap();
        let id = created.category_id.unwrap();

        assert_eq!(service.delete_by_id(id), Ok(()));
        assert_eq!(
            service.get_by_id(id),
            Err(Error::NotFound(format!("category with id {id} not found")))
        );
    }

    #[test]
    fn delete_on_unknown_id_is_not_found() {
        let service = get_test_service();

        assert_eq!(
            service.delete_by_id(3),
            Err(Error::NotFound("category with id 3 not found".to_owned()))
        );
    }

    #[test]
    fn missing_table_is_unexpected_failure() {
        let connection = Connection::open_in_memory().unwrap();
        let service = CategoryService::new(Arc::new(Mutex::new(connection)));

        assert_eq!(service.list(), Err(Error::UnexpectedFailure));
    }

    #[test]
    fn poisoned_lock_is_data_access_failure() {
        let service = get_test_service();
        let db_connection = service.db_connection.clone();

        let _ = std::thread::spawn(move || {
            let _guard = db_connection.lock().unwrap();
            panic!("poison the database lock");
        })
        .join();

        assert_eq!(service.list(), Err(Error::DataAccessFailure));
    }

    #[test]
    fn failed_update_rolls_back() {
        let service = get_test_service();
        let created = service.create(new_category("Books")).unwrap();
        let id = created.category_id.unwrap();

        let result = service.with_transaction(rusqlite::TransactionBehavior::Immediate, |repo| {
            update_category_by_id(repo, id, new_category("Media"))?;
            Err::<(), _>(Error::UnexpectedFailure)
        });

        assert_eq!(result, Err(Error::UnexpectedFailure));
        assert_eq!(service.get_by_id(id), Ok(created));
    }

    /// A repository whose every call fails with the given SQLite result code.
    struct FailingRepository {
        code: std::os::raw::c_int,
        calls: RefCell<Vec<&'static str>>,
    }

    impl FailingRepository {
        fn new(code: std::os::raw::c_int) -> Self {
            Self {
                code,
                calls: RefCell::new(Vec::new()),
            }
        }

        fn fail<T>(&self, call: &'static str) -> Result<T, rusqlite::Error> {
            self.calls.borrow_mut().push(call);
            Err(rusqlite::Error::SqliteFailure(
                ffi::Error::new(self.code),
                None,
            ))
        }
    }

    impl CategoryRepository for FailingRepository {
        fn find_all(&self) -> Result<Vec<CategoryEntity>, rusqlite::Error> {
            self.fail("find_all")
        }

        fn find_by_id(&self, _id: CategoryId) -> Result<Option<CategoryEntity>, rusqlite::Error> {
            self.fail("find_by_id")
        }

        fn find_by_name(&self, _name: &str) -> Result<Option<CategoryEntity>, rusqlite::Error> {
            self.fail("find_by_name")
        }

        fn save(&self, _category: CategoryEntity) -> Result<CategoryEntity, rusqlite::Error> {
            self.fail("save")
        }

        fn delete_by_id(&self, _id: CategoryId) -> Result<(), rusqlite::Error> {
            self.fail("delete_by_id")
        }
    }

    #[test]
    fn unreachable_store_is_data_access_failure_for_every_operation() {
        let repository = FailingRepository::new(ffi::SQLITE_CANTOPEN);

        assert_eq!(
            create_category(&repository, new_category("Books")),
            Err(Error::DataAccessFailure)
        );
        assert_eq!(list_categories(&repository), Err(Error::DataAccessFailure));
        assert_eq!(
            get_category_by_id(&repository, 1),
            Err(Error::DataAccessFailure)
        );
        assert_eq!(
            get_category_by_name(&repository, "Books"),
            Err(Error::DataAccessFailure)
        );
        assert_eq!(
            update_category_by_id(&repository, 1, new_category("Media")),
            Err(Error::DataAccessFailure)
        );
        assert_eq!(
            delete_category_by_id(&repository, 1),
            Err(Error::DataAccessFailure)
        );
    }

    #[test]
    fn other_store_failures_are_unexpected_failures() {
        let repository = FailingRepository::new(ffi::SQLITE_CONSTRAINT);

        assert_eq!(
            create_category(&repository, new_category("Books")),
            Err(Error::UnexpectedFailure)
        );
        assert_eq!(list_categories(&repository), Err(Error::UnexpectedFailure));
        assert_eq!(
            get_category_by_name(&repository, "Books"),
            Err(Error::UnexpectedFailure)
        );
    }

    #[test]
    fn failures_are_surfaced_once_without_retry() {
        let repository = FailingRepository::new(ffi::SQLITE_BUSY);

        let _ = update_category_by_id(&repository, 1, new_category("Media"));
        let _ = delete_category_by_id(&repository, 1);

        assert_eq!(
            *repository.calls.borrow(),
            vec!["find_by_id", "find_by_id"]
        );
    }
}
