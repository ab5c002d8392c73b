//! SQLite export of the datasets to a file on disk.

use rusqlite::Connection;

use sheba_dashboard::db;

#[test]
fn export_to_file_and_read_back() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("sheba.db");

    {
        let mut conn = Connection::open(&path).unwrap();
        let stats = db::export_datasets(&mut conn).unwrap();
        assert_eq!(stats.emissions, 25);
        assert_eq!(
            stats.to_string(),
            "Exported 25 emission records, 5 regulations (15 tasks), 3 goals, 4 recommendations, 3 gantt tasks"
        );
    }

    let conn = Connection::open(&path).unwrap();
    let tasks = db::regulation_tasks(&conn, "JCI Regulation").unwrap();
    assert_eq!(
        tasks,
        vec![
            ("Develop compliance plan".to_string(), 60),
            ("Conduct audit".to_string(), 50),
            ("Submit documentation".to_string(), 70),
        ]
    );

    let totals = db::scope_totals(&conn).unwrap();
    assert_eq!(totals[1], ("Scope 2".to_string(), 30800.0));
}

#[test]
fn repeated_export_keeps_a_single_snapshot() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("sheba.db");

    for _ in 0..3 {
        let mut conn = Connection::open(&path).unwrap();
        db::export_datasets(&mut conn).unwrap();
    }

    let conn = Connection::open(&path).unwrap();
    assert_eq!(db::count_rows(&conn, "emissions").unwrap(), 25);
    assert_eq!(db::count_rows(&conn, "regulations").unwrap(), 5);
}
