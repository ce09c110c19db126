use personreg_core::{find_duplicate, PersonFields, PersonRecord};

#[test]
fn returns_none_for_empty_registry() {
    let candidate = fields("Anna", "Berg", "Elm St", "Metropolis", "1990-01-01");
    assert!(find_duplicate(&candidate, &[], None).is_none());
}

#[test]
fn returns_none_without_shared_identity_signal() {
    let existing = vec![
        record(1, "Anna", "Berg", "Elm St", "Metropolis", "1990-01-01"),
        record(2, "Berta", "Klein", "Oak St", "Gotham", "1988-03-04"),
    ];

    // Same first name, different birth date: no signal.
    let candidate = fields("Anna", "Weiss", "Elm St", "Metropolis", "1991-06-06");
    assert!(find_duplicate(&candidate, &existing, None).is_none());

    // Same birth date, different first name: no signal.
    let candidate = fields("Carla", "Berg", "Elm St", "Metropolis", "1990-01-01");
    assert!(find_duplicate(&candidate, &existing, None).is_none());
}

#[test]
fn near_duplicate_triggers_on_shared_name_and_birth_date() {
    let existing = vec![record(1, "Anna", "Berg", "Elm St", "Metropolis", "1990-01-01")];
    let candidate = fields("Anna", "Berg-Klein", "Elm St", "Metropolis", "1990-01-01");

    let found = find_duplicate(&candidate, &existing, None).unwrap();
    assert_eq!(found.id, 1);
}

#[test]
fn exact_match_raises_no_conflict() {
    let existing = vec![record(1, "Anna", "Berg", "Elm St", "Metropolis", "1990-01-01")];
    let candidate = fields("Anna", "Berg", "Elm St", "Metropolis", "1990-01-01");

    assert!(find_duplicate(&candidate, &existing, None).is_none());
}

#[test]
fn candidate_never_matches_its_own_id() {
    let existing = vec![record(5, "Anna", "Berg", "Elm St", "Metropolis", "1990-01-01")];
    let candidate = fields("Anna", "Berg-Klein", "Elm St", "Metropolis", "1990-01-01");

    assert!(find_duplicate(&candidate, &existing, Some(5)).is_none());
}

#[test]
fn self_exclusion_still_finds_other_records() {
    let existing = vec![
        record(5, "Anna", "Berg", "Elm St", "Metropolis", "1990-01-01"),
        record(6, "Anna", "Klein", "Oak St", "Metropolis", "1990-01-01"),
    ];
    let candidate = fields("Anna", "Berg-Klein", "Elm St", "Metropolis", "1990-01-01");

    let found = find_duplicate(&candidate, &existing, Some(5)).unwrap();
    assert_eq!(found.id, 6);
}

#[test]
fn first_match_in_sequence_order_wins() {
    let existing = vec![
        record(3, "Anna", "Klein", "Oak St", "Gotham", "1990-01-01"),
        record(9, "Anna", "Weiss", "Pine St", "Metropolis", "1990-01-01"),
    ];
    let candidate = fields("Anna", "Berg", "Elm St", "Metropolis", "1990-01-01");

    let found = find_duplicate(&candidate, &existing, None).unwrap();
    assert_eq!(found.id, 3);
}

#[test]
fn exact_first_match_ends_the_scan_without_conflict() {
    // The first (first_name, birth_date) hit decides: when it is fully
    // identical, a later differing record does not re-open the question.
    let existing = vec![
        record(1, "Anna", "Berg", "Elm St", "Metropolis", "1990-01-01"),
        record(2, "Anna", "Weiss", "Pine St", "Gotham", "1990-01-01"),
    ];
    let candidate = fields("Anna", "Berg", "Elm St", "Metropolis", "1990-01-01");

    assert!(find_duplicate(&candidate, &existing, None).is_none());
}

fn fields(
    first_name: &str,
    surname: &str,
    address: &str,
    city: &str,
    birth_date: &str,
) -> PersonFields {
    PersonFields::new(first_name, surname, address, city, birth_date)
}

fn record(
    id: i64,
    first_name: &str,
    surname: &str,
    address: &str,
    city: &str,
    birth_date: &str,
) -> PersonRecord {
    PersonRecord::new(id, fields(first_name, surname, address, city, birth_date))
}
