use dayplan_core::db::open_db_in_memory;
use dayplan_core::feed::ChangeFeed;
use dayplan_core::model::bookmark::Bookmark;
use dayplan_core::model::profile::UserProfile;
use dayplan_core::repo::RepoError;
use dayplan_core::repo::bookmark_repo::{BookmarkRepository, SqliteBookmarkRepository};
use dayplan_core::repo::profile_repo::{ProfileRepository, SqliteProfileRepository};
use dayplan_core::store::BookmarkStore;
use rusqlite::Connection;
use uuid::Uuid;

#[test]
fn same_term_can_only_be_bookmarked_once_per_owner() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookmarkRepository::new(&conn);
    let owner = seed_owner(&conn);

    repo.create_bookmark(&Bookmark::new(owner, "Webhook")).unwrap();
    let err = repo
        .create_bookmark(&Bookmark::new(owner, "Webhook"))
        .unwrap_err();
    assert!(matches!(err, RepoError::Conflict(_)));

    // The duplicate attempt must not leave a second row behind.
    assert_eq!(repo.list_bookmarks(owner).unwrap().len(), 1);
}

#[test]
fn different_owners_may_bookmark_the_same_term() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookmarkRepository::new(&conn);
    let alice = seed_owner(&conn);
    let bob = seed_owner(&conn);

    repo.create_bookmark(&Bookmark::new(alice, "Cache")).unwrap();
    repo.create_bookmark(&Bookmark::new(bob, "Cache")).unwrap();

    assert_eq!(repo.list_bookmarks(alice).unwrap().len(), 1);
    assert_eq!(repo.list_bookmarks(bob).unwrap().len(), 1);
    assert!(repo.bookmark_for_term(alice, "Cache").unwrap().is_some());
}

#[test]
fn blank_terms_are_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookmarkRepository::new(&conn);
    let owner = seed_owner(&conn);

    let err = repo
        .create_bookmark(&Bookmark::new(owner, "  "))
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}

#[test]
fn removing_a_bookmark_frees_the_term_for_re_adding() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookmarkRepository::new(&conn);
    let owner = seed_owner(&conn);

    let id = repo.create_bookmark(&Bookmark::new(owner, "OAuth")).unwrap();
    repo.delete_bookmark(owner, id).unwrap();
    assert!(repo.bookmark_for_term(owner, "OAuth").unwrap().is_none());

    repo.create_bookmark(&Bookmark::new(owner, "OAuth")).unwrap();
    assert!(repo.bookmark_for_term(owner, "OAuth").unwrap().is_some());
}

#[test]
fn delete_of_missing_bookmark_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookmarkRepository::new(&conn);

    let err = repo
        .delete_bookmark(Uuid::new_v4(), Uuid::new_v4())
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "bookmark", .. }));
}

#[test]
fn store_tracks_membership_and_surfaces_conflicts() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookmarkRepository::new(&conn);
    let feed = ChangeFeed::new();
    let owner = seed_owner(&conn);
    let mut store = BookmarkStore::new(owner, &feed);

    assert!(!store.is_bookmarked("GraphQL"));
    let bookmark = store.add_bookmark(&repo, "GraphQL").unwrap();
    assert!(store.is_bookmarked("GraphQL"));

    assert!(matches!(
        store.add_bookmark(&repo, "GraphQL").unwrap_err(),
        RepoError::Conflict(_)
    ));

    store.remove_bookmark(&repo, bookmark.id).unwrap();
    assert!(!store.is_bookmarked("GraphQL"));
    assert!(store.bookmarks().is_empty());
}

fn seed_owner(conn: &Connection) -> Uuid {
    let repo = SqliteProfileRepository::new(conn);
    let profile = UserProfile::new(format!("owner-{}", Uuid::new_v4().simple()));
    repo.create_profile(&profile).unwrap()
}
