use simplenotes_core::db::open_db_in_memory;
use simplenotes_core::{NoteForm, NoteService, NoteServiceError, SqliteNoteRepository};
use uuid::Uuid;

fn form(body: &str, tags: &str) -> NoteForm {
    NoteForm {
        body: body.to_string(),
        date: "Jan 1, 2024".to_string(),
        time: String::new(),
        tags: tags.to_string(),
    }
}

#[test]
fn duplicate_tag_names_collapse_at_association_time() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
    let mut service = NoteService::new(repo);

    let created = service.create_note(&form("tag target", "a, B ,a")).unwrap();
    assert_eq!(created.tags, vec!["a".to_string(), "b".to_string()]);

    let names = service.list_tags().unwrap();
    assert_eq!(names, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn update_replaces_the_full_tag_set() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
    let mut service = NoteService::new(repo);

    let created = service
        .create_note(&form("tag target", "Work, IMPORTANT"))
        .unwrap();
    assert_eq!(
        created.tags,
        vec!["important".to_string(), "work".to_string()]
    );

    let replaced = service
        .update_note(created.id, &form("tag target", "Personal"))
        .unwrap();
    assert_eq!(replaced.tags, vec!["personal".to_string()]);
}

#[test]
fn update_with_no_tags_clears_associations() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
    let mut service = NoteService::new(repo);

    let created = service.create_note(&form("tag target", "solo")).unwrap();
    let cleared = service
        .update_note(created.id, &form("tag target", ""))
        .unwrap();
    assert!(cleared.tags.is_empty());
    assert!(service.list_tags().unwrap().is_empty());
}

#[test]
fn reading_a_note_returns_tags_sorted_by_name() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
    let mut service = NoteService::new(repo);

    let created = service
        .create_note(&form("tag target", "zebra, apple, mango"))
        .unwrap();
    assert_eq!(
        created.tags,
        vec!["apple".to_string(), "mango".to_string(), "zebra".to_string()]
    );
}

#[test]
fn tagging_an_unknown_note_returns_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
    let mut service = NoteService::new(repo);

    let missing = Uuid::new_v4();
    let err = service
        .update_note(missing, &form("ok", "tag"))
        .unwrap_err();
    assert!(matches!(err, NoteServiceError::NotFound(id) if id == missing));
}
