use rstest::rstest;
use std::sync::Arc;
use taskboard_core::db::establish_connection;
use taskboard_core::error::CoreError;
use taskboard_core::models::*;
use taskboard_core::repository::{
    CategoryDeletePolicy, CategoryRepository, StoreCategoryRepository, StoreTaskRepository,
    TaskRepository,
};
use taskboard_core::state::{CategoryState, LoadState, TaskState, TaskView};
use taskboard_core::store::{MemoryStore, SqliteStore};
use tempfile::TempDir;

#[derive(Debug, Clone, Copy)]
enum Backend {
    Sqlite,
    Memory,
}

/// Both repositories over one backend, erased so every test runs against either store.
struct Board {
    tasks: Arc<dyn TaskRepository>,
    categories: Arc<dyn CategoryRepository>,
    _temp_dir: Option<TempDir>,
}

/// Helper function to create a test board
async fn setup_board(backend: Backend, policy: CategoryDeletePolicy) -> Board {
    match backend {
        Backend::Sqlite => {
            let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
            let db_path = temp_dir.path().join("test.db");
            let pool = establish_connection(&db_path.to_string_lossy())
                .await
                .expect("Failed to establish test database connection");

            let store = Arc::new(SqliteStore::new(pool));
            let tasks = Arc::new(StoreTaskRepository::new(store.clone()));
            let categories = Arc::new(
                StoreCategoryRepository::new(store, tasks.clone()).with_delete_policy(policy),
            );
            Board {
                tasks,
                categories,
                _temp_dir: Some(temp_dir),
            }
        }
        Backend::Memory => {
            let store = Arc::new(MemoryStore::new());
            let tasks = Arc::new(StoreTaskRepository::new(store.clone()));
            let categories = Arc::new(
                StoreCategoryRepository::new(store, tasks.clone()).with_delete_policy(policy),
            );
            Board {
                tasks,
                categories,
                _temp_dir: None,
            }
        }
    }
}

/// Helper function to create a test category
async fn create_test_category(board: &Board, name: &str) -> Category {
    board
        .categories
        .create(NewCategoryData {
            name: name.to_string(),
            color: None,
        })
        .await
        .expect("Failed to create test category")
}

/// Helper function to create a test task
async fn create_test_task(board: &Board, title: &str, category_id: Option<i64>) -> Task {
    board
        .tasks
        .create(NewTaskData {
            title: title.to_string(),
            category_id,
            ..Default::default()
        })
        .await
        .expect("Failed to create test task")
}

#[rstest]
#[case::sqlite(Backend::Sqlite)]
#[case::memory(Backend::Memory)]
#[tokio::test]
async fn test_buy_milk_lifecycle(#[case] backend: Backend) {
    let board = setup_board(backend, CategoryDeletePolicy::Block).await;

    let task = board
        .tasks
        .create(NewTaskData {
            title: "Buy milk".to_string(),
            priority: Some(TaskPriority::Low),
            ..Default::default()
        })
        .await
        .unwrap();

    assert!(task.id > 0);
    assert_eq!(task.priority, TaskPriority::Low);
    assert!(!task.completed);
    assert!(task.completed_at.is_none());

    let done = board
        .tasks
        .update(task.id, UpdateTaskData::completed(true))
        .await
        .unwrap();
    assert!(done.completed);
    assert!(done.completed_at.unwrap() >= done.created_at);
    assert_eq!(done.created_at, task.created_at);

    let reopened = board
        .tasks
        .update(task.id, UpdateTaskData::completed(false))
        .await
        .unwrap();
    assert!(!reopened.completed);
    assert!(reopened.completed_at.is_none());
}

#[rstest]
#[case::sqlite(Backend::Sqlite)]
#[case::memory(Backend::Memory)]
#[tokio::test]
async fn test_category_counts_follow_tasks(#[case] backend: Backend) {
    let board = setup_board(backend, CategoryDeletePolicy::Block).await;

    let work = create_test_category(&board, "Work").await;
    let home = create_test_category(&board, "Home").await;
    create_test_task(&board, "Write report", Some(work.id)).await;
    create_test_task(&board, "Review PR", Some(work.id)).await;
    let loose = create_test_task(&board, "Call mom", None).await;

    let categories = board.categories.get_all().await.unwrap();
    let count_of = |id: i64| categories.iter().find(|c| c.id == id).unwrap().task_count;
    assert_eq!(count_of(work.id), 2);
    assert_eq!(count_of(home.id), 0);

    // Moving a task is enough; no explicit count update happens anywhere.
    board
        .tasks
        .update(
            loose.id,
            UpdateTaskData {
                category_id: Some(Some(home.id)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let categories = board.categories.get_all().await.unwrap();
    let count_of = |id: i64| categories.iter().find(|c| c.id == id).unwrap().task_count;
    assert_eq!(count_of(work.id), 2);
    assert_eq!(count_of(home.id), 1);
}

#[rstest]
#[case::sqlite(Backend::Sqlite)]
#[case::memory(Backend::Memory)]
#[tokio::test]
async fn test_delete_completed_keeps_active(#[case] backend: Backend) {
    let board = setup_board(backend, CategoryDeletePolicy::Block).await;
    let mut state = TaskState::mount(board.tasks.clone()).await;

    for i in 0..5 {
        let task = state
            .add(NewTaskData::titled(format!("Task {i}")))
            .await
            .unwrap();
        if i < 3 {
            state.toggle_complete(task.id).await.unwrap();
        }
    }

    assert_eq!(state.clear_completed().await.unwrap(), 3);
    assert_eq!(state.tasks().len(), 2);
    assert!(state.tasks().iter().all(|t| !t.completed));
    assert_eq!(board.tasks.delete_completed().await.unwrap(), 0);

    state.refetch().await;
    assert_eq!(state.tasks().len(), 2);
}

#[rstest]
#[case::sqlite(Backend::Sqlite)]
#[case::memory(Backend::Memory)]
#[tokio::test]
async fn test_unknown_ids_leave_store_unchanged(#[case] backend: Backend) {
    let board = setup_board(backend, CategoryDeletePolicy::Block).await;
    let task = create_test_task(&board, "Only task", None).await;
    let before = board.tasks.get_all().await.unwrap();

    let result = board
        .tasks
        .update(
            task.id + 100,
            UpdateTaskData {
                title: Some("Changed".to_string()),
                completed: Some(true),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(CoreError::NotFound(_))));
    assert!(matches!(
        board.tasks.delete(task.id + 100).await,
        Err(CoreError::NotFound(_))
    ));
    assert!(matches!(
        board.categories.get_by_id(1).await,
        Err(CoreError::NotFound(_))
    ));

    assert_eq!(board.tasks.get_all().await.unwrap(), before);
}

#[rstest]
#[case::sqlite(Backend::Sqlite)]
#[case::memory(Backend::Memory)]
#[tokio::test]
async fn test_filtered_queries_are_newest_first(#[case] backend: Backend) {
    let board = setup_board(backend, CategoryDeletePolicy::Block).await;
    let work = create_test_category(&board, "Work").await;

    let first = create_test_task(&board, "first", Some(work.id)).await;
    let second = create_test_task(&board, "second", None).await;
    let third = create_test_task(&board, "third", Some(work.id)).await;
    board
        .tasks
        .update(second.id, UpdateTaskData::completed(true))
        .await
        .unwrap();

    let all: Vec<i64> = board.tasks.get_all().await.unwrap().iter().map(|t| t.id).collect();
    assert_eq!(all, vec![third.id, second.id, first.id]);

    let in_work: Vec<i64> = board
        .tasks
        .get_by_category(work.id)
        .await
        .unwrap()
        .iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(in_work, vec![third.id, first.id]);

    let done = board.tasks.get_by_status(true).await.unwrap();
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].id, second.id);

    let open = board.tasks.get_by_status(false).await.unwrap();
    assert_eq!(open.len(), 2);
}

#[rstest]
#[case::sqlite(Backend::Sqlite)]
#[case::memory(Backend::Memory)]
#[tokio::test]
async fn test_detach_policy_end_to_end(#[case] backend: Backend) {
    let board = setup_board(backend, CategoryDeletePolicy::Detach).await;
    let mut tasks = TaskState::mount(board.tasks.clone()).await;
    let mut categories = CategoryState::mount(board.categories.clone()).await;

    let errands = categories
        .add(NewCategoryData {
            name: "Errands".to_string(),
            color: Some("#10B981".to_string()),
        })
        .await
        .unwrap();
    let task = tasks
        .add(NewTaskData {
            title: "Pick up parcel".to_string(),
            category_id: Some(errands.id),
            ..Default::default()
        })
        .await
        .unwrap();

    categories.refetch().await;
    assert_eq!(categories.get(errands.id).unwrap().task_count, 1);
    assert_eq!(tasks.filtered(TaskView::Category(errands.id)).len(), 1);

    categories.remove(errands.id).await.unwrap();
    tasks.refetch().await;

    assert!(categories.categories().is_empty());
    assert_eq!(tasks.get(task.id).unwrap().category_id, None);
}

#[tokio::test]
async fn test_mount_against_unreachable_store() {
    let store = Arc::new(MemoryStore::new());
    store.set_available(false);
    let repo = Arc::new(StoreTaskRepository::new(store.clone()));

    let mut state = TaskState::mount(repo).await;
    assert!(matches!(state.load_state(), LoadState::Failed(_)));

    store.set_available(true);
    state.refetch().await;
    assert_eq!(state.load_state(), &LoadState::Ready);
}

#[tokio::test]
async fn test_sqlite_data_survives_reconnect() {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_path = temp_dir.path().join("persist.db");
    let db_path = db_path.to_string_lossy();

    let created = {
        let pool = establish_connection(&db_path).await.unwrap();
        let repo = StoreTaskRepository::new(Arc::new(SqliteStore::new(pool.clone())));
        let task = repo
            .create(NewTaskData {
                title: "Persist me".to_string(),
                description: Some("across connections".to_string()),
                due_date: chrono::NaiveDate::from_ymd_opt(2030, 1, 15),
                priority: Some(TaskPriority::High),
                category_id: None,
            })
            .await
            .unwrap();
        pool.close().await;
        task
    };

    let pool = establish_connection(&db_path).await.unwrap();
    let repo = StoreTaskRepository::new(Arc::new(SqliteStore::new(pool)));
    let loaded = repo.get_by_id(created.id).await.unwrap();
    assert_eq!(loaded, created);
}

#[tokio::test]
async fn test_sqlite_writes_visible_to_second_pool_without_close() {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_path = temp_dir.path().join("shared.db");
    let db_path = db_path.to_string_lossy();

    let writer = establish_connection(&db_path).await.unwrap();
    let store = Arc::new(SqliteStore::new(writer.clone()));
    let tasks = Arc::new(StoreTaskRepository::new(store.clone()));
    let categories = StoreCategoryRepository::new(store, tasks.clone());

    let work = categories
        .create(NewCategoryData {
            name: "Work".to_string(),
            color: None,
        })
        .await
        .unwrap();
    let work = categories
        .update(
            work.id,
            UpdateCategoryData {
                name: Some("Office".to_string()),
                color: Some("#10B981".to_string()),
            },
        )
        .await
        .unwrap();
    let task = tasks
        .create(NewTaskData {
            title: "Plan sprint".to_string(),
            category_id: Some(work.id),
            ..Default::default()
        })
        .await
        .unwrap();

    // The writer pool stays open: a second pool only sees committed rows.
    let reader = establish_connection(&db_path).await.unwrap();
    let store = Arc::new(SqliteStore::new(reader));
    let reader_tasks = Arc::new(StoreTaskRepository::new(store.clone()));
    let reader_categories = StoreCategoryRepository::new(store, reader_tasks.clone());

    let seen = reader_categories.get_by_id(work.id).await.unwrap();
    assert_eq!(seen.name, "Office");
    assert_eq!(seen.color, "#10B981");
    assert_eq!(seen.task_count, 1);
    assert_eq!(reader_tasks.get_by_id(task.id).await.unwrap(), task);

    drop(writer);
}
