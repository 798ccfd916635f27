use dayplan_core::db::open_db_in_memory;
use dayplan_core::feed::ChangeFeed;
use dayplan_core::model::category::UNCATEGORIZED_COLOR;
use dayplan_core::model::profile::UserProfile;
use dayplan_core::model::schedule::Priority;
use dayplan_core::repo::category_repo::SqliteCategoryRepository;
use dayplan_core::repo::memo_repo::SqliteMemoRepository;
use dayplan_core::repo::profile_repo::{ProfileRepository, SqliteProfileRepository};
use dayplan_core::repo::schedule_repo::SqliteScheduleRepository;
use dayplan_core::store::{MemoStore, ScheduleDraft, ScheduleStore};
use rusqlite::Connection;
use uuid::Uuid;

fn draft(title: &str, start_at: i64, end_at: i64) -> ScheduleDraft {
    ScheduleDraft {
        title: title.to_string(),
        start_at,
        end_at,
        category_id: None,
        priority: Priority::Medium,
        keywords: Vec::new(),
    }
}

#[test]
fn a_write_in_one_store_reaches_another_via_sync() {
    let conn = open_db_in_memory().unwrap();
    let schedules = SqliteScheduleRepository::new(&conn);
    let categories = SqliteCategoryRepository::new(&conn);
    let feed = ChangeFeed::new();
    let owner = seed_owner(&conn);

    // Two views over the same owner, e.g. home screen and calendar.
    let mut writer = ScheduleStore::new(owner, &feed);
    let mut reader = ScheduleStore::new(owner, &feed);

    let created = writer.add_schedule(&schedules, draft("standup", 0, 100)).unwrap();
    assert!(reader.schedules().is_empty(), "no merge before sync");

    let applied = reader.sync(&schedules, &categories).unwrap();
    assert_eq!(applied, 1);
    assert_eq!(reader.schedules(), [created.clone()]);

    // Only the changed row is fetched, and applying the same state twice
    // leaves the cache unchanged.
    writer.set_completed(&schedules, created.id, true).unwrap();
    reader.sync(&schedules, &categories).unwrap();
    assert!(reader.schedules()[0].completed);

    writer.remove_schedule(&schedules, created.id).unwrap();
    reader.sync(&schedules, &categories).unwrap();
    assert!(reader.schedules().is_empty());
}

#[test]
fn stores_ignore_events_from_other_owners() {
    let conn = open_db_in_memory().unwrap();
    let schedules = SqliteScheduleRepository::new(&conn);
    let categories = SqliteCategoryRepository::new(&conn);
    let feed = ChangeFeed::new();

    let mut alice = ScheduleStore::new(seed_owner(&conn), &feed);
    let mut bob = ScheduleStore::new(seed_owner(&conn), &feed);

    alice.add_schedule(&schedules, draft("private", 0, 100)).unwrap();

    let applied = bob.sync(&schedules, &categories).unwrap();
    assert_eq!(applied, 0);
    assert!(bob.schedules().is_empty());
}

#[test]
fn merging_own_events_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let schedules = SqliteScheduleRepository::new(&conn);
    let categories = SqliteCategoryRepository::new(&conn);
    let feed = ChangeFeed::new();
    let owner = seed_owner(&conn);

    let mut store = ScheduleStore::new(owner, &feed);
    store.add_schedule(&schedules, draft("solo", 0, 100)).unwrap();
    assert_eq!(store.schedules().len(), 1);

    // The store receives its own published event; applying it must not
    // duplicate the cached row.
    let applied = store.sync(&schedules, &categories).unwrap();
    assert_eq!(applied, 1);
    assert_eq!(store.schedules().len(), 1);
}

#[test]
fn stores_skip_events_for_tables_they_do_not_mirror() {
    let conn = open_db_in_memory().unwrap();
    let schedules = SqliteScheduleRepository::new(&conn);
    let categories = SqliteCategoryRepository::new(&conn);
    let memos = SqliteMemoRepository::new(&conn);
    let feed = ChangeFeed::new();
    let owner = seed_owner(&conn);

    let mut schedule_store = ScheduleStore::new(owner, &feed);
    let mut memo_store = MemoStore::new(owner, &feed);

    memo_store.add_memo(&memos, "note", "body").unwrap();
    let applied = schedule_store.sync(&schedules, &categories).unwrap();
    assert_eq!(applied, 0);
}

#[test]
fn deleted_categories_degrade_to_the_placeholder() {
    let conn = open_db_in_memory().unwrap();
    let schedules = SqliteScheduleRepository::new(&conn);
    let categories = SqliteCategoryRepository::new(&conn);
    let feed = ChangeFeed::new();
    let owner = seed_owner(&conn);

    let mut store = ScheduleStore::new(owner, &feed);
    let work = store.add_category(&categories, "work", "bg-blue-500").unwrap();

    let mut schedule_draft = draft("tagged", 0, 100);
    schedule_draft.category_id = Some(work.id);
    let schedule = store.add_schedule(&schedules, schedule_draft).unwrap();

    assert_eq!(store.category_for(&schedule).name, "work");
    assert_eq!(store.category_color("work"), "bg-blue-500");

    // The schedule keeps its dangling reference after the delete.
    store.remove_category(&categories, work.id).unwrap();
    let resolved = store.category_for(&schedule);
    assert_eq!(resolved.name, "uncategorized");
    assert_eq!(resolved.color, UNCATEGORIZED_COLOR);
    assert_eq!(store.category_color("work"), UNCATEGORIZED_COLOR);
}

#[test]
fn refresh_reloads_both_tables_in_repository_order() {
    let conn = open_db_in_memory().unwrap();
    let schedules = SqliteScheduleRepository::new(&conn);
    let categories = SqliteCategoryRepository::new(&conn);
    let feed = ChangeFeed::new();
    let owner = seed_owner(&conn);

    let mut writer = ScheduleStore::new(owner, &feed);
    writer.add_schedule(&schedules, draft("later", 2_000, 3_000)).unwrap();
    writer.add_schedule(&schedules, draft("sooner", 1_000, 1_500)).unwrap();
    writer.add_category(&categories, "b", "bg-blue-500").unwrap();
    writer.add_category(&categories, "a", "bg-red-500").unwrap();

    let mut fresh = ScheduleStore::new(owner, &feed);
    fresh.refresh(&schedules, &categories).unwrap();

    let titles: Vec<&str> = fresh.schedules().iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, ["sooner", "later"]);
    let names: Vec<&str> = fresh.categories().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["a", "b"]);
}

fn seed_owner(conn: &Connection) -> Uuid {
    let repo = SqliteProfileRepository::new(conn);
    let profile = UserProfile::new(format!("owner-{}", Uuid::new_v4().simple()));
    repo.create_profile(&profile).unwrap()
}
