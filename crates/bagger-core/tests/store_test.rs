//! Profile store tests
//!
//! Upserts, hydrated loads, queries and join-table links.

use bagger_core::model::{Contact, Organization, Person, Profile, ProfileStatus, Project};
use bagger_core::replay::ReplayLog;
use bagger_core::storage::{Bagger, Database, StoreError};
use chrono::NaiveDate;

fn count_rows(db: &Database, table: &str) -> i64 {
    db.connection()
        .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
        .expect("Failed to count rows")
}

fn create_contact(first: &str, last: &str, org: &str) -> Contact {
    Contact::new(
        Person::new(first, last),
        Organization::new(org, "101 Independence Ave SE, Washington, DC"),
    )
    .with_email(format!("{}@example.org", first.to_lowercase()))
    .with_telephone("202-555-0100")
}

fn create_profile(username: &str) -> Profile {
    Profile::new(
        username,
        create_contact("Jane", "Doe", "Library of Congress"),
        Project::new("NDIIPP").with_description("Digital preservation partners"),
        create_contact("John", "Roe", "Partner Archive"),
    )
    .with_created_on(NaiveDate::from_ymd_opt(2008, 9, 18).expect("valid date"))
}

/// Store a profile graph reference by reference
fn store_graph(bagger: &Bagger, profile: &mut Profile, log: &mut ReplayLog) {
    bagger.upsert_person(&mut profile.person.person, log).expect("owner person");
    bagger.upsert_person(&mut profile.contact.person, log).expect("contact person");
    bagger
        .upsert_organization(&mut profile.person.organization, log)
        .expect("owner organization");
    bagger
        .upsert_organization(&mut profile.contact.organization, log)
        .expect("contact organization");
    bagger.upsert_contact(&mut profile.person, log).expect("owner contact");
    bagger.upsert_contact(&mut profile.contact, log).expect("secondary contact");
    bagger.upsert_project(&mut profile.project, log).expect("project");
    bagger.upsert_profile(profile, log).expect("profile");
}

#[test]
fn test_upsert_new_person_assigns_id() {
    let db = Database::in_memory().expect("Failed to create database");
    let bagger = Bagger::new(&db);
    let mut log = ReplayLog::new();

    let mut person = Person::new("Ada", "Lovelace").with_middle_init("K");
    let id = bagger.upsert_person(&mut person, &mut log).expect("Failed to upsert");

    assert_eq!(person.id, Some(id));
    let loaded = bagger.load_person(id).expect("Failed to load person");
    assert_eq!(loaded, person);

    assert_eq!(
        log.statements(),
        [format!("INSERT INTO person VALUES ({id}, 'Ada', 'K', 'Lovelace');")]
    );
}

#[test]
fn test_upsert_assigns_distinct_ids() {
    let db = Database::in_memory().expect("Failed to create database");
    let bagger = Bagger::new(&db);
    let mut log = ReplayLog::new();

    let mut first = Organization::new("Library of Congress", "Washington");
    let mut second = Organization::new("Library of Congress", "Washington");
    let a = bagger.upsert_organization(&mut first, &mut log).unwrap();
    let b = bagger.upsert_organization(&mut second, &mut log).unwrap();

    assert_ne!(a, b);
    assert_eq!(count_rows(&db, "organization"), 2);
}

#[test]
fn test_upsert_existing_person_updates_in_place() {
    let db = Database::in_memory().expect("Failed to create database");
    let bagger = Bagger::new(&db);
    let mut log = ReplayLog::new();

    let mut person = Person::new("Ada", "Byron");
    let id = bagger.upsert_person(&mut person, &mut log).unwrap();

    person.last_name = "Lovelace".to_string();
    let second = bagger.upsert_person(&mut person, &mut log).unwrap();

    assert_eq!(second, id);
    assert_eq!(person.id, Some(id));
    assert_eq!(bagger.load_person(id).unwrap().last_name, "Lovelace");
    assert_eq!(count_rows(&db, "person"), 1);
}

#[test]
fn test_upsert_twice_logs_insert_then_update() {
    let db = Database::in_memory().expect("Failed to create database");
    let bagger = Bagger::new(&db);
    let mut log = ReplayLog::new();

    let mut project = Project::new("NDIIPP");
    let id = bagger.upsert_project(&mut project, &mut log).unwrap();
    bagger.upsert_project(&mut project, &mut log).unwrap();

    assert_eq!(count_rows(&db, "projects"), 1);
    assert_eq!(
        log.statements(),
        [
            format!("INSERT INTO projects VALUES ({id}, 'NDIIPP', NULL);"),
            format!("UPDATE projects SET name='NDIIPP', description=NULL WHERE id={id};"),
        ]
    );
}

#[test]
fn test_upsert_with_unknown_id_inserts() {
    let db = Database::in_memory().expect("Failed to create database");
    let bagger = Bagger::new(&db);
    let mut log = ReplayLog::new();

    let mut org = Organization::new("Partner Archive", "Austin");
    org.id = Some(999);
    let id = bagger.upsert_organization(&mut org, &mut log).unwrap();

    assert_ne!(id, 999);
    assert_eq!(org.id, Some(id));
    assert!(log.statements()[0].starts_with("INSERT INTO organization"));
}

#[test]
fn test_load_missing_is_not_found() {
    let db = Database::in_memory().expect("Failed to create database");
    let bagger = Bagger::new(&db);

    let err = bagger.load_person(42).unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(
        err,
        StoreError::NotFound {
            entity: "person",
            id: 42
        }
    ));

    assert!(bagger.load_profile(7).unwrap_err().is_not_found());
    assert!(bagger.load_contact(7).unwrap_err().is_not_found());
    assert!(bagger.load_project(7).unwrap_err().is_not_found());
    assert!(bagger.load_organization(7).unwrap_err().is_not_found());
}

#[test]
fn test_contact_requires_stored_references() {
    let db = Database::in_memory().expect("Failed to create database");
    let bagger = Bagger::new(&db);
    let mut log = ReplayLog::new();

    let mut contact = create_contact("Jane", "Doe", "Library of Congress");
    let err = bagger.upsert_contact(&mut contact, &mut log).unwrap_err();

    assert!(matches!(err, StoreError::Unsupported { entity: "contact", .. }));
    assert_eq!(contact.id, None);
    assert!(log.is_empty());
    assert_eq!(count_rows(&db, "contact"), 0);
}

#[test]
fn test_failed_insert_is_unsupported() {
    let db = Database::in_memory().expect("Failed to create database");
    let bagger = Bagger::new(&db);
    let mut log = ReplayLog::new();

    let mut contact = create_contact("Jane", "Doe", "Library of Congress");
    bagger.upsert_organization(&mut contact.organization, &mut log).unwrap();
    // Claims to be stored, but no such row exists: the foreign key rejects it
    contact.person.id = Some(999);

    let err = bagger.upsert_contact(&mut contact, &mut log).unwrap_err();
    assert!(matches!(err, StoreError::Unsupported { entity: "contact", .. }));
    assert!(err.to_string().contains("contact update not supported"));
    assert_eq!(log.len(), 1);
}

#[test]
fn test_failed_update_is_write_error() {
    let db = Database::in_memory().expect("Failed to create database");
    let bagger = Bagger::new(&db);
    let mut log = ReplayLog::new();

    let mut contact = create_contact("Jane", "Doe", "Library of Congress");
    bagger.upsert_person(&mut contact.person, &mut log).unwrap();
    bagger.upsert_organization(&mut contact.organization, &mut log).unwrap();
    let id = bagger.upsert_contact(&mut contact, &mut log).unwrap();

    contact.organization.id = Some(999);
    let err = bagger.upsert_contact(&mut contact, &mut log).unwrap_err();

    assert!(matches!(err, StoreError::Write { entity: "contact", .. }));
    assert_eq!(contact.id, Some(id));
    assert_eq!(log.len(), 3);
    assert_eq!(count_rows(&db, "contact"), 1);
}

#[test]
fn test_load_contact_hydrates_references() {
    let db = Database::in_memory().expect("Failed to create database");
    let bagger = Bagger::new(&db);
    let mut log = ReplayLog::new();

    let mut contact = create_contact("Jane", "Doe", "Library of Congress");
    bagger.upsert_person(&mut contact.person, &mut log).unwrap();
    bagger.upsert_organization(&mut contact.organization, &mut log).unwrap();
    let id = bagger.upsert_contact(&mut contact, &mut log).unwrap();

    let loaded = bagger.load_contact(id).expect("Failed to load contact");
    assert_eq!(loaded, contact);
    assert_eq!(loaded.person.first_name, "Jane");
    assert_eq!(loaded.organization.name, "Library of Congress");
}

#[test]
fn test_load_profile_hydrates_graph() {
    let db = Database::in_memory().expect("Failed to create database");
    let bagger = Bagger::new(&db);
    let mut log = ReplayLog::new();

    let mut profile = create_profile("jdoe");
    store_graph(&bagger, &mut profile, &mut log);

    let id = profile.id.expect("profile id assigned");
    let loaded = bagger.load_profile(id).expect("Failed to load profile");
    assert_eq!(loaded, profile);
    assert_eq!(loaded.person.person.last_name, "Doe");
    assert_eq!(loaded.contact.person.last_name, "Roe");
    assert_eq!(loaded.project.name, "NDIIPP");
}

#[test]
fn test_profile_update_keeps_creation_date() {
    let db = Database::in_memory().expect("Failed to create database");
    let bagger = Bagger::new(&db);
    let mut log = ReplayLog::new();

    let mut profile = create_profile("jdoe");
    store_graph(&bagger, &mut profile, &mut log);
    let id = profile.id.unwrap();

    profile.username = "jane.doe".to_string();
    profile.created_on = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    bagger.upsert_profile(&mut profile, &mut log).unwrap();

    let loaded = bagger.load_profile(id).unwrap();
    assert_eq!(loaded.username, "jane.doe");
    assert_eq!(loaded.created_on, NaiveDate::from_ymd_opt(2008, 9, 18).unwrap());

    // The caller's graph picks up the stored date and matches the row again
    assert_eq!(profile.created_on, loaded.created_on);
    assert_eq!(loaded, profile);
    assert!(log.statements().last().unwrap().starts_with("UPDATE profile SET username='jane.doe'"));
}

#[test]
fn test_find_organizations_by_prefix() {
    let db = Database::in_memory().expect("Failed to create database");
    let bagger = Bagger::new(&db);
    let mut log = ReplayLog::new();

    for name in [
        "Library of Congress",
        "National Library of Medicine",
        "Libby's Archive",
        "library services",
        "Lib Digital",
    ] {
        bagger
            .upsert_organization(&mut Organization::new(name, ""), &mut log)
            .unwrap();
    }

    let names: Vec<String> = bagger
        .find_organizations_by_prefix("Lib")
        .unwrap()
        .into_iter()
        .map(|o| o.name)
        .collect();

    assert_eq!(names, ["Lib Digital", "Libby's Archive", "Library of Congress"]);
}

#[test]
fn test_prefix_is_literal() {
    let db = Database::in_memory().expect("Failed to create database");
    let bagger = Bagger::new(&db);
    let mut log = ReplayLog::new();

    bagger
        .upsert_organization(&mut Organization::new("Library", ""), &mut log)
        .unwrap();
    bagger
        .upsert_organization(&mut Organization::new("100% Archive", ""), &mut log)
        .unwrap();

    assert!(bagger.find_organizations_by_prefix("%").unwrap().is_empty());
    assert!(bagger.find_organizations_by_prefix("L_b").unwrap().is_empty());
    assert_eq!(bagger.find_organizations_by_prefix("100%").unwrap().len(), 1);
    assert_eq!(bagger.find_organizations_by_prefix("").unwrap().len(), 2);
}

#[test]
fn test_list_organizations_and_projects_sorted() {
    let db = Database::in_memory().expect("Failed to create database");
    let bagger = Bagger::new(&db);
    let mut log = ReplayLog::new();

    for name in ["gamma", "alpha", "beta"] {
        bagger
            .upsert_organization(&mut Organization::new(name, ""), &mut log)
            .unwrap();
        bagger.upsert_project(&mut Project::new(name), &mut log).unwrap();
    }

    let orgs: Vec<String> = bagger.list_organizations().unwrap().into_iter().map(|o| o.name).collect();
    let projects: Vec<String> = bagger.list_projects().unwrap().into_iter().map(|p| p.name).collect();
    assert_eq!(orgs, ["alpha", "beta", "gamma"]);
    assert_eq!(projects, ["alpha", "beta", "gamma"]);
}

#[test]
fn test_find_profiles_by_username_active_only() {
    let db = Database::in_memory().expect("Failed to create database");
    let bagger = Bagger::new(&db);
    let mut log = ReplayLog::new();

    let mut active = create_profile("jdoe");
    store_graph(&bagger, &mut active, &mut log);

    let mut retired = create_profile("jdoe").with_status(ProfileStatus::Inactive);
    store_graph(&bagger, &mut retired, &mut log);

    let mut other = create_profile("someone-else");
    store_graph(&bagger, &mut other, &mut log);

    let found = bagger.find_profiles_by_username("jdoe").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0], active);
    assert!(found[0].person.id.is_some());
    assert!(found[0].contact.person.id.is_some());
    assert!(found[0].project.id.is_some());

    assert!(bagger.find_profiles_by_username("nobody").unwrap().is_empty());
}

#[test]
fn test_find_projects_for_person() {
    let db = Database::in_memory().expect("Failed to create database");
    let bagger = Bagger::new(&db);
    let mut log = ReplayLog::new();

    let mut person = Person::new("Jane", "Doe");
    bagger.upsert_person(&mut person, &mut log).unwrap();
    let mut zeta = Project::new("Zeta");
    let mut alpha = Project::new("Alpha");
    bagger.upsert_project(&mut zeta, &mut log).unwrap();
    bagger.upsert_project(&mut alpha, &mut log).unwrap();

    let link = bagger
        .store_person_project(&person, &zeta, &mut log)
        .expect("link stored");
    bagger
        .store_person_project(&person, &alpha, &mut log)
        .expect("link stored");

    assert_eq!(
        log.statements()[3],
        format!(
            "INSERT INTO person_projects VALUES ({}, {}, {});",
            link.id,
            person.id.unwrap(),
            zeta.id.unwrap()
        )
    );

    let names: Vec<String> = bagger
        .find_projects_for_person(person.id.unwrap())
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, ["Zeta", "Alpha"]);
}

#[test]
fn test_join_failures_are_swallowed() {
    let db = Database::in_memory().expect("Failed to create database");
    let bagger = Bagger::new(&db);
    let mut log = ReplayLog::new();

    let mut project = Project::new("NDIIPP");
    bagger.upsert_project(&mut project, &mut log).unwrap();

    // Unstored person
    let unsaved = Person::new("Jane", "Doe");
    assert!(bagger.store_person_project(&unsaved, &project, &mut log).is_none());

    // Dangling person id rejected by the foreign key
    let mut dangling = Person::new("Jane", "Doe");
    dangling.id = Some(999);
    assert!(bagger.store_person_project(&dangling, &project, &mut log).is_none());

    let contact = create_contact("Jane", "Doe", "Library of Congress");
    assert!(bagger.store_user_contact("jdoe", &contact, &mut log).is_none());

    assert_eq!(log.len(), 1);
    assert_eq!(count_rows(&db, "person_projects"), 0);
    assert_eq!(count_rows(&db, "user_contact"), 0);
}

#[test]
fn test_user_contacts_round_trip() {
    let db = Database::in_memory().expect("Failed to create database");
    let bagger = Bagger::new(&db);
    let mut log = ReplayLog::new();

    let mut profile = create_profile("jdoe");
    store_graph(&bagger, &mut profile, &mut log);

    let link = bagger
        .store_user_contact("jdoe", &profile.contact, &mut log)
        .expect("link stored");
    assert_eq!(link.contact_id, profile.contact.id.unwrap());
    assert_eq!(
        log.statements().last().unwrap(),
        &format!("INSERT INTO user_contact VALUES ({}, 'jdoe', {});", link.id, link.contact_id)
    );

    let contacts = bagger.contacts_for_user("jdoe").unwrap();
    assert_eq!(contacts, vec![profile.contact.clone()]);
}
