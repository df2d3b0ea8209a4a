//! Property tests for create-or-update writes and their replay statements

use bagger_core::model::{Organization, Person};
use bagger_core::replay::ReplayLog;
use bagger_core::storage::{Bagger, Database};
use proptest::prelude::*;

/// Any text without NUL, control characters included
fn name() -> impl Strategy<Value = String> {
    "[^\\x00]{0,24}"
}

proptest! {
    #[test]
    fn property_person_round_trips(
        first in name(),
        middle in proptest::option::of("[A-Z]"),
        last in name(),
    ) {
        let db = Database::in_memory().expect("Failed to create database");
        let bagger = Bagger::new(&db);
        let mut log = ReplayLog::new();

        let mut person = Person::new(first, last);
        person.middle_init = middle;
        let id = bagger.upsert_person(&mut person, &mut log).expect("Failed to upsert");

        prop_assert_eq!(bagger.load_person(id).expect("Failed to load"), person);
        prop_assert_eq!(log.len(), 1);
    }

    #[test]
    fn property_replayed_log_reproduces_rows(org_name in name(), address in name()) {
        let db = Database::in_memory().expect("Failed to create database");
        let bagger = Bagger::new(&db);
        let mut log = ReplayLog::new();

        let mut org = Organization::new(org_name, address);
        bagger.upsert_organization(&mut org, &mut log).expect("Failed to insert");
        org.name.push_str(" (renamed)");
        bagger.upsert_organization(&mut org, &mut log).expect("Failed to update");

        prop_assert_eq!(log.render().lines().count(), log.len());

        // Executing the log against an empty schema yields the same row
        let replica = Database::in_memory().expect("Failed to create replica");
        replica
            .connection()
            .execute_batch(&log.render())
            .expect("Failed to replay log");

        let replayed = Bagger::new(&replica)
            .load_organization(org.id.expect("id assigned"))
            .expect("Failed to load replayed row");
        prop_assert_eq!(replayed, org);
    }
}
