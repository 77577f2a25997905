use tasklist_core::db::{open_db, open_db_in_memory};
use tasklist_core::{
    ListService, ListServiceError, OrderingService, SqliteListRepository, TaskView,
};
use uuid::Uuid;

#[test]
fn create_list_returns_empty_task_collection() {
    let conn = open_db_in_memory().unwrap();
    let service = ListService::new(SqliteListRepository::try_new(&conn).unwrap());

    let list = service.create_list("  Groceries ").unwrap();

    assert_eq!(list.title, "Groceries");
    assert!(list.tasks.is_empty());
    assert_eq!(service.get_list(list.id).unwrap(), list);
}

#[test]
fn create_list_rejects_blank_title() {
    let conn = open_db_in_memory().unwrap();
    let service = ListService::new(SqliteListRepository::try_new(&conn).unwrap());

    let err = service.create_list("\n").unwrap_err();
    assert!(matches!(err, ListServiceError::InvalidTitle(_)));
    assert!(service.list_all().unwrap().is_empty());
}

#[test]
fn get_unknown_list_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = ListService::new(SqliteListRepository::try_new(&conn).unwrap());
    let ghost = Uuid::new_v4();

    let err = service.get_list(ghost).unwrap_err();
    assert!(matches!(err, ListServiceError::NotFound(id) if id == ghost));
}

#[test]
fn list_all_returns_lists_in_creation_order_with_tasks_priority_desc() {
    let conn = open_db_in_memory().unwrap();
    let lists = ListService::new(SqliteListRepository::try_new(&conn).unwrap());
    let ordering = OrderingService::try_new(&conn).unwrap();

    let work = lists.create_list("Work").unwrap();
    let home = lists.create_list("Home").unwrap();
    let empty = lists.create_list("Someday").unwrap();

    let work_tasks: Vec<TaskView> = ["mail", "report", "review"]
        .iter()
        .map(|title| ordering.create_task(work.id, *title).unwrap())
        .collect();
    let dishes = ordering.create_task(home.id, "dishes").unwrap();
    ordering
        .move_task(work_tasks[2].task.id, None, Some(work_tasks[0].task.id))
        .unwrap();

    let all = lists.list_all().unwrap();
    assert_eq!(
        all.iter().map(|list| list.id).collect::<Vec<_>>(),
        vec![work.id, home.id, empty.id]
    );
    for list in &all {
        let priorities: Vec<i64> = list.tasks.iter().map(|task| task.priority).collect();
        let mut sorted = priorities.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(priorities, sorted, "list {} is not priority-desc", list.title);
    }
    assert_eq!(all[0].tasks.len(), 3);
    assert_eq!(all[1].task_ids(), vec![dishes.task.id]);
    assert!(all[2].tasks.is_empty());
}

#[test]
fn list_view_serializes_with_camel_case_fields() {
    let conn = open_db_in_memory().unwrap();
    let lists = ListService::new(SqliteListRepository::try_new(&conn).unwrap());
    let list = lists.create_list("Inbox").unwrap();
    let view = OrderingService::try_new(&conn)
        .unwrap()
        .create_task(list.id, "first")
        .unwrap();

    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["priority"], 1);
    assert_eq!(json["status"], "PENDING");
    assert_eq!(json["listId"], list.id.to_string());
    assert_eq!(json["list"]["tasks"][0]["id"], view.task.id.to_string());
}

#[test]
fn list_all_reads_committed_snapshot_and_releases_it() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lists.db");
    let reader = open_db(&path).unwrap();
    let writer = open_db(&path).unwrap();
    let lists = ListService::new(SqliteListRepository::try_new(&reader).unwrap());
    let inbox = lists.create_list("Inbox").unwrap();
    OrderingService::try_new(&reader)
        .unwrap()
        .create_task(inbox.id, "a")
        .unwrap();

    writer.execute_batch("BEGIN IMMEDIATE;").unwrap();
    writer
        .execute(
            "INSERT INTO lists (id, title) VALUES (?1, 'Pending');",
            [Uuid::new_v4().to_string()],
        )
        .unwrap();

    let all = lists.list_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].tasks.len(), 1);
    assert!(reader.is_autocommit());

    writer.execute_batch("COMMIT;").unwrap();
    assert_eq!(lists.list_all().unwrap().len(), 2);
}
