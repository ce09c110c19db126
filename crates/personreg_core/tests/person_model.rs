use personreg_core::{FieldViolations, PersonField, PersonFields, PersonRecord};

#[test]
fn valid_fields_pass_validation() {
    let fields = PersonFields::new("Anna", "Berg", "Elm St", "Metropolis", "1990-01-01");
    assert!(fields.validate().is_ok());
}

#[test]
fn validation_collects_all_violations_in_field_order() {
    let fields = PersonFields::new("", "", "", "", "");
    let violations = fields.validate().unwrap_err();

    assert_eq!(
        violations.fields,
        vec![
            PersonField::FirstName,
            PersonField::Surname,
            PersonField::Address,
            PersonField::City,
            PersonField::BirthDate,
        ]
    );
}

#[test]
fn validation_is_deterministic_for_same_input() {
    let fields = PersonFields::new("J4ne", "Berg", "", "Metropolis", "1990-01-01");

    let first = fields.validate().unwrap_err();
    let second = fields.validate().unwrap_err();
    assert_eq!(first, second);
    assert_eq!(
        first.fields,
        vec![PersonField::FirstName, PersonField::Address]
    );
}

#[test]
fn name_class_accepts_latin_extended_letters() {
    for name in [
        "Jürgen",
        "Großmann",
        "Éloïse",
        "José",
        "Anne-Marie",
        "O'Brien",
        "van der Berg",
    ] {
        let fields = PersonFields::new(name, name, "Elm St", name, "1990-01-01");
        assert!(fields.validate().is_ok(), "`{name}` should be accepted");
    }
}

#[test]
fn name_class_rejects_digits_and_unlisted_symbols() {
    for name in ["J4ne", "Berg!", "a.b", "x_y", "Anna,Berg", "Berg/Klein"] {
        let fields = PersonFields::new(name, "Berg", "Elm St", "Metropolis", "1990-01-01");
        let violations = fields.validate().unwrap_err();
        assert!(
            violations.contains(PersonField::FirstName),
            "`{name}` should be rejected"
        );
    }
}

#[test]
fn city_is_restricted_by_the_name_class() {
    let fields = PersonFields::new("Anna", "Berg", "Elm St", "Metropolis 2", "1990-01-01");
    let violations = fields.validate().unwrap_err();
    assert_eq!(violations.fields, vec![PersonField::City]);
}

#[test]
fn address_allows_digits_and_punctuation() {
    for address in ["Ring 3", "Paulinenstr. 50", "Musterstraße 1"] {
        let fields = PersonFields::new("Anna", "Berg", address, "Metropolis", "1990-01-01");
        assert!(fields.validate().is_ok(), "`{address}` should be accepted");
    }
}

#[test]
fn surname_violation_reports_only_that_field() {
    let fields = PersonFields::new("Anna", "B3rg", "Elm St", "Metropolis", "1990-01-01");
    let violations = fields.validate().unwrap_err();
    assert_eq!(violations.fields, vec![PersonField::Surname]);
}

#[test]
fn record_serialization_uses_expected_wire_fields() {
    let record = PersonRecord::new(
        7,
        PersonFields::new("Maria", "Keller", "Ring 3", "Springfield", "1985-05-12"),
    );

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["id"], 7);
    assert_eq!(json["first_name"], "Maria");
    assert_eq!(json["surname"], "Keller");
    assert_eq!(json["address"], "Ring 3");
    assert_eq!(json["city"], "Springfield");
    assert_eq!(json["birth_date"], "1985-05-12");

    let decoded: PersonRecord = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, record);
}

#[test]
fn violations_serialize_with_snake_case_field_names() {
    let violations = FieldViolations {
        fields: vec![PersonField::FirstName, PersonField::BirthDate],
    };

    let json = serde_json::to_value(&violations).unwrap();
    assert_eq!(json["fields"][0], "first_name");
    assert_eq!(json["fields"][1], "birth_date");
}

#[test]
fn violations_display_names_every_field() {
    let fields = PersonFields::new("", "Berg", "Elm St", "", "1990-01-01");
    let violations = fields.validate().unwrap_err();
    let message = violations.to_string();
    assert!(message.contains("first_name"));
    assert!(message.contains("city"));
}
