use std::collections::BTreeSet;
use std::path::Path;
use std::sync::{Arc, Barrier};
use std::thread;
use tasklist_core::db::open_db;
use tasklist_core::{ListId, ListService, OrderingService, SqliteListRepository, TaskId};

const WRITERS: usize = 6;
const TASKS_PER_WRITER: usize = 5;

const MOVERS: usize = 3;
const MOVES_PER_MOVER: usize = 8;

fn create_shared_list(path: &Path) -> ListId {
    let conn = open_db(path).unwrap();
    ListService::new(SqliteListRepository::try_new(&conn).unwrap())
        .create_list("Shared")
        .unwrap()
        .id
}

#[test]
fn concurrent_creates_on_one_list_yield_distinct_contiguous_priorities() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("concurrent.db");
    let list_id = create_shared_list(&path);

    let barrier = Arc::new(Barrier::new(WRITERS));
    let handles: Vec<_> = (0..WRITERS)
        .map(|writer| {
            let path = path.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let conn = open_db(&path).unwrap();
                let service = OrderingService::try_new(&conn).unwrap();
                barrier.wait();
                (0..TASKS_PER_WRITER)
                    .map(|index| {
                        service
                            .create_task(list_id, format!("writer {writer} task {index}"))
                            .unwrap()
                            .task
                            .priority
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut assigned = Vec::new();
    for handle in handles {
        assigned.extend(handle.join().unwrap());
    }

    let distinct: BTreeSet<i64> = assigned.iter().copied().collect();
    let total = (WRITERS * TASKS_PER_WRITER) as i64;
    assert_eq!(assigned.len() as i64, total);
    assert_eq!(distinct, (1..=total).collect::<BTreeSet<_>>());
}

#[test]
fn concurrent_moves_and_creates_keep_priorities_distinct() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("concurrent_moves.db");
    let list_id = create_shared_list(&path);

    let seeded: Vec<TaskId> = {
        let conn = open_db(&path).unwrap();
        let service = OrderingService::try_new(&conn).unwrap();
        (0..MOVERS + 1)
            .map(|index| service.create_task(list_id, format!("seed {index}")).unwrap().task.id)
            .collect()
    };

    let barrier = Arc::new(Barrier::new(MOVERS + WRITERS));
    let movers = (0..MOVERS).map(|mover| {
        let path = path.clone();
        let barrier = Arc::clone(&barrier);
        let seeded = seeded.clone();
        thread::spawn(move || {
            let conn = open_db(&path).unwrap();
            let service = OrderingService::try_new(&conn).unwrap();
            barrier.wait();
            for step in 0..MOVES_PER_MOVER {
                let moving = seeded[mover];
                let reference = seeded[(mover + 1 + step % MOVERS) % seeded.len()];
                service.move_task(moving, Some(reference), None).unwrap();
            }
        })
    });
    let writers = (0..WRITERS).map(|writer| {
        let path = path.clone();
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            let conn = open_db(&path).unwrap();
            let service = OrderingService::try_new(&conn).unwrap();
            barrier.wait();
            for index in 0..TASKS_PER_WRITER {
                service
                    .create_task(list_id, format!("writer {writer} task {index}"))
                    .unwrap();
            }
        })
    });
    let handles: Vec<_> = movers.chain(writers).collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let conn = open_db(&path).unwrap();
    let list = ListService::new(SqliteListRepository::try_new(&conn).unwrap())
        .get_list(list_id)
        .unwrap();
    let distinct: BTreeSet<i64> = list.tasks.iter().map(|task| task.priority).collect();
    assert_eq!(list.tasks.len(), seeded.len() + WRITERS * TASKS_PER_WRITER);
    assert_eq!(distinct.len(), list.tasks.len());
}
