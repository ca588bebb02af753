use crate::song::{self, SongFields};
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

fn sample_model(id: i32) -> song::Model {
    song::Model {
        id,
        group_name: "Muse".into(),
        song_name: "Supermassive Black Hole".into(),
        release_date: song::parse_release_date("16.07.2006").unwrap(),
        song_text: "Ooh baby, don't you know I suffer?\n\nOoh\nYou set my soul alight".into(),
        link: "https://www.youtube.com/watch?v=Xsp3_a-PMTw".into(),
    }
}

fn sample_fields() -> SongFields {
    let m = sample_model(0);
    SongFields {
        group_name: m.group_name,
        song_name: m.song_name,
        release_date: m.release_date,
        song_text: m.song_text,
        link: m.link,
    }
}

#[test]
fn release_date_round_trips_through_text() {
    let date = song::parse_release_date("16.07.2006").unwrap();
    assert_eq!(date, chrono::NaiveDate::from_ymd_opt(2006, 7, 16).unwrap());
    assert_eq!(song::format_release_date(&date), "16.07.2006");
}

#[test]
fn release_date_rejects_other_formats() {
    assert!(song::parse_release_date("2006-07-16").is_err());
    assert!(song::parse_release_date("31.02.2006").is_err());
    assert!(song::parse_release_date("").is_err());
    for raw in ["1.7.2006", "16.7.2006", "1.07.2006", " 16.07.2006 ", "16.07.+2006", "16.07.20060", "16/07/2006"] {
        assert!(song::parse_release_date(raw).is_err(), "{raw:?} should be rejected");
    }
}

#[test]
fn required_fields_reject_blank_values() {
    assert!(song::validate_required("group", "Muse").is_ok());
    assert!(song::validate_required("group", "").is_err());
    let err = song::validate_required("link", "   ").unwrap_err();
    assert_eq!(err.to_string(), "validation error: link is required");
}

#[tokio::test]
async fn create_returns_row_with_assigned_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![sample_model(42)]])
        .into_connection();

    let created = song::create(&db, &sample_fields()).await.unwrap();
    assert_eq!(created.id, 42);
    assert_eq!(created.group_name, "Muse");
}

#[tokio::test]
async fn update_and_delete_report_rows_affected() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([
            MockExecResult { last_insert_id: 0, rows_affected: 1 },
            MockExecResult { last_insert_id: 0, rows_affected: 0 },
        ])
        .into_connection();

    assert_eq!(song::update(&db, 1, &sample_fields()).await.unwrap(), 1);
    assert_eq!(song::delete(&db, 99).await.unwrap(), 0);
}

#[tokio::test]
async fn find_text_maps_missing_row_to_none() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![sample_model(3)], Vec::<song::Model>::new()])
        .into_connection();

    let text = song::find_text(&db, 3).await.unwrap();
    assert_eq!(text.as_deref(), Some(sample_model(3).song_text.as_str()));
    assert!(song::find_text(&db, 4).await.unwrap().is_none());
}
