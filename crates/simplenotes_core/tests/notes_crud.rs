use simplenotes_core::db::open_db_in_memory;
use simplenotes_core::{NoteForm, NoteService, NoteServiceError, SqliteNoteRepository};
use uuid::Uuid;

fn form(body: &str, date: &str, time: &str, tags: &str) -> NoteForm {
    NoteForm {
        body: body.to_string(),
        date: date.to_string(),
        time: time.to_string(),
        tags: tags.to_string(),
    }
}

#[test]
fn create_and_get_roundtrip() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
    let mut service = NoteService::new(repo);

    let created = service
        .create_note(&form(" first note ", "Jan 1, 2024", "3:00 PM", ""))
        .unwrap();
    assert_eq!(created.body, "first note");
    assert_eq!(created.date.to_rfc3339(), "2024-01-01T15:00:00+00:00");
    assert!(created.tags.is_empty());

    let loaded = service.get_note(created.id).unwrap();
    assert_eq!(loaded, created);
}

#[test]
fn create_rejects_invalid_form_without_persisting() {
    let mut conn = open_db_in_memory().unwrap();
    {
        let repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
        let mut service = NoteService::new(repo);

        let err = service
            .create_note(&form("", "Jan 1, 2024", "", ""))
            .unwrap_err();
        match err {
            NoteServiceError::Validation(errors) => {
                assert!(errors.contains(&"Body cannot be blank".to_string()));
            }
            other => panic!("expected validation error, got {other}"),
        }
    }

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM notes;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn update_replaces_body_and_date_wholesale() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
    let mut service = NoteService::new(repo);

    let created = service
        .create_note(&form("draft", "Jan 1, 2024", "3:00 PM", ""))
        .unwrap();

    let updated = service
        .update_note(created.id, &form("final", "Feb 2, 2024", "", ""))
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.body, "final");
    assert_eq!(updated.date.to_rfc3339(), "2024-02-02T00:00:00+00:00");
}

#[test]
fn update_unknown_note_returns_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
    let mut service = NoteService::new(repo);

    let missing = Uuid::new_v4();
    let err = service
        .update_note(missing, &form("ok", "Jan 1, 2024", "", ""))
        .unwrap_err();
    assert!(matches!(err, NoteServiceError::NotFound(id) if id == missing));
}

#[test]
fn delete_removes_the_row_for_good() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
    let mut service = NoteService::new(repo);

    let created = service
        .create_note(&form("gone soon", "Jan 1, 2024", "", ""))
        .unwrap();
    service.delete_note(created.id).unwrap();

    let err = service.get_note(created.id).unwrap_err();
    assert!(matches!(err, NoteServiceError::NotFound(_)));

    let err = service.delete_note(created.id).unwrap_err();
    assert!(matches!(err, NoteServiceError::NotFound(_)));
}

#[test]
fn list_recent_orders_by_note_date_not_insertion() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
    let mut service = NoteService::new(repo);

    let middle = service
        .create_note(&form("middle", "Jan 2, 2024", "", ""))
        .unwrap();
    let oldest = service
        .create_note(&form("oldest", "Jan 1, 2024", "", ""))
        .unwrap();
    let newest = service
        .create_note(&form("newest", "Jan 3, 2024", "", ""))
        .unwrap();

    let page = service.list_recent(None).unwrap();
    let ids: Vec<_> = page.items.iter().map(|note| note.id).collect();
    assert_eq!(ids, vec![newest.id, middle.id, oldest.id]);
}

#[test]
fn list_limit_defaults_to_30_and_caps_at_100() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
    let mut service = NoteService::new(repo);

    for day in 1..=5 {
        service
            .create_note(&form("note", &format!("Jan {day}, 2024"), "", ""))
            .unwrap();
    }

    let defaulted = service.list_recent(None).unwrap();
    assert_eq!(defaulted.applied_limit, 30);
    assert_eq!(defaulted.items.len(), 5);

    let zero = service.list_recent(Some(0)).unwrap();
    assert_eq!(zero.applied_limit, 30);

    let capped = service.list_recent(Some(500)).unwrap();
    assert_eq!(capped.applied_limit, 100);

    let exact = service.list_recent(Some(2)).unwrap();
    assert_eq!(exact.applied_limit, 2);
    assert_eq!(exact.items.len(), 2);
}
