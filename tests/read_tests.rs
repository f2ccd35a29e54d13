// tests/read_tests.rs
//! Decrypt-on-read: unreadable rows are skipped, never surfaced
mod common;

use chrono::NaiveDate;
use common::{csv, sequential};
use passenger_manifest_vault::{
    get_passenger, list_manifest, list_manifest_with, replace_manifest,
};
use rusqlite::params;

const ADMIN: i64 = 7;

fn seeded() -> rusqlite::Connection {
    let mut conn = common::memory_db();
    let file = csv(&[
        "Ana,female,navigator,1984-06-30,010-1,false",
        "Ben,male,engineer,1979-11-02,010-2,true",
        "Cho,other,,not recorded,010-3,false",
    ]);
    replace_manifest(&mut conn, &common::cipher(), ADMIN, &file, &sequential()).unwrap();
    conn
}

fn id_of(conn: &rusqlite::Connection, name: &str) -> i64 {
    conn.query_row(
        "SELECT passenger_id FROM passengers WHERE passenger_name = ?1",
        [name],
        |r| r.get(0),
    )
    .unwrap()
}

fn corrupt_tag(conn: &rusqlite::Connection, passenger_id: i64) {
    let mut tag: Vec<u8> = conn
        .query_row(
            "SELECT auth_tag FROM passengers WHERE passenger_id = ?1",
            [passenger_id],
            |r| r.get(0),
        )
        .unwrap();
    tag[0] ^= 0x01;
    conn.execute(
        "UPDATE passengers SET auth_tag = ?1 WHERE passenger_id = ?2",
        params![tag, passenger_id],
    )
    .unwrap();
}

#[test]
fn corrupted_row_is_skipped_and_reported() {
    common::setup();
    let conn = seeded();
    let ben = id_of(&conn, "Ben");
    corrupt_tag(&conn, ben);

    let listing = list_manifest(&conn, &common::cipher(), ADMIN).unwrap();
    assert!(!listing.is_complete());
    assert_eq!(listing.skipped, vec![ben]);
    assert_eq!(listing.total_stored(), 3);

    let names: Vec<&str> = listing
        .passengers
        .iter()
        .map(|p| p.passenger_name.as_str())
        .collect();
    assert_eq!(names, ["Ana", "Cho"]);
}

#[test]
fn single_lookup_hides_unreadable_and_missing_rows() {
    let conn = seeded();
    let cipher = common::cipher();
    let ana = id_of(&conn, "Ana");
    let ben = id_of(&conn, "Ben");

    let view = get_passenger(&conn, &cipher, ana).unwrap().unwrap();
    assert_eq!(view.contact, "010-1");
    assert_eq!(view.job.as_deref(), Some("navigator"));

    corrupt_tag(&conn, ben);
    assert!(get_passenger(&conn, &cipher, ben).unwrap().is_none());
    assert!(get_passenger(&conn, &cipher, 9_999).unwrap().is_none());
}

#[test]
fn other_admins_see_nothing() {
    let conn = seeded();
    let listing = list_manifest(&conn, &common::cipher(), ADMIN + 1).unwrap();
    assert!(listing.passengers.is_empty());
    assert_eq!(listing.total_stored(), 0);
}

#[test]
fn birth_date_parses_only_iso_dates() {
    let conn = seeded();
    let listing = list_manifest(&conn, &common::cipher(), ADMIN).unwrap();

    assert_eq!(
        listing.passengers[0].birth_date(),
        NaiveDate::from_ymd_opt(1984, 6, 30)
    );
    assert_eq!(listing.passengers[2].birth, "not recorded");
    assert_eq!(listing.passengers[2].birth_date(), None);
}

#[test]
fn debug_output_omits_sensitive_fields() {
    let conn = seeded();
    let listing = list_manifest(&conn, &common::cipher(), ADMIN).unwrap();
    let rendered = format!("{listing:?}");

    assert!(rendered.contains("Ana"));
    assert!(!rendered.contains("010-1"));
    assert!(!rendered.contains("1984-06-30"));
}

#[test]
fn mistyped_envelope_cell_is_skipped_not_fatal() {
    let conn = seeded();
    let cipher = common::cipher();
    let ana = id_of(&conn, "Ana");
    let ben = id_of(&conn, "Ben");

    conn.execute(
        "UPDATE passengers SET auth_tag = 'corrupt' WHERE passenger_id = ?1",
        [ben],
    )
    .unwrap();

    let listing = list_manifest(&conn, &cipher, ADMIN).unwrap();
    assert_eq!(listing.skipped, vec![ben]);
    assert_eq!(listing.total_stored(), 3);
    assert!(listing.passengers.iter().any(|p| p.passenger_id == ana));

    assert!(get_passenger(&conn, &cipher, ben).unwrap().is_none());
    assert!(get_passenger(&conn, &cipher, ana).unwrap().is_some());
}

#[test]
fn sequential_listing_matches_parallel_listing() {
    let conn = seeded();
    let ben = id_of(&conn, "Ben");
    corrupt_tag(&conn, ben);
    let cipher = common::cipher();

    let parallel = list_manifest_with(&conn, &cipher, ADMIN, true).unwrap();
    let sequential = list_manifest_with(&conn, &cipher, ADMIN, false).unwrap();

    assert_eq!(parallel.passengers, sequential.passengers);
    assert_eq!(parallel.skipped, sequential.skipped);
}
