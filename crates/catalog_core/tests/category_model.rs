use catalog_core::model::category::NAME_MAX_LENGTH;
use catalog_core::{
    Category, CategoryId, CategoryProps, CreateCategoryCommand, Entity, EntityValidationError,
    Identifier, InvalidIdentifierError,
};
use chrono::{TimeZone, Utc};

#[test]
fn new_category_fills_defaults() {
    let category = Category::new(CategoryProps {
        name: "Movie".to_string(),
        ..CategoryProps::default()
    });

    assert_eq!(category.name(), "Movie");
    assert_eq!(category.description(), None);
    assert!(category.is_active());
    assert_eq!(category.category_id().as_str().len(), 36);
    assert_eq!(category.created_at().timestamp_subsec_nanos() % 1_000_000, 0);
    assert!(!category.notification().has_errors());
}

#[test]
fn new_category_keeps_every_given_prop() {
    let id = CategoryId::new();
    let created_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
    let category = Category::new(CategoryProps {
        category_id: Some(id.clone()),
        name: "Series".to_string(),
        description: Some("long running".to_string()),
        is_active: Some(false),
        created_at: Some(created_at),
    });

    assert_eq!(category.entity_id(), &id);
    assert_eq!(category.description(), Some("long running"));
    assert!(!category.is_active());
    assert_eq!(category.created_at(), created_at);
}

#[test]
fn create_rejects_empty_name_without_failing() {
    let category = Category::create(CreateCategoryCommand {
        name: String::new(),
        ..CreateCategoryCommand::default()
    });

    assert!(category.notification().has_errors());
    assert_eq!(
        category.notification().field_errors("name"),
        ["name should not be empty".to_string()]
    );
}

#[test]
fn create_rejects_name_longer_than_limit() {
    let category = Category::create(CreateCategoryCommand {
        name: "a".repeat(NAME_MAX_LENGTH + 1),
        ..CreateCategoryCommand::default()
    });

    assert_eq!(
        category.notification().field_errors("name"),
        ["name must be shorter than or equal to 255 characters".to_string()]
    );

    let err = EntityValidationError::ensure_valid(&category).unwrap_err();
    assert_eq!(err.errors.len(), 1);
    assert!(err.to_string().starts_with("Entity Validation Error"));
}

#[test]
fn name_at_limit_is_valid() {
    let category = Category::create(CreateCategoryCommand {
        name: "a".repeat(NAME_MAX_LENGTH),
        ..CreateCategoryCommand::default()
    });
    assert!(!category.notification().has_errors());
}

#[test]
fn change_name_replaces_stale_errors() {
    let mut category = Category::create(CreateCategoryCommand {
        name: "Movie".to_string(),
        ..CreateCategoryCommand::default()
    });

    category.change_name("");
    assert_eq!(category.notification().field_errors("name").len(), 1);

    category.change_name("a".repeat(NAME_MAX_LENGTH + 1));
    assert_eq!(
        category.notification().field_errors("name"),
        ["name must be shorter than or equal to 255 characters".to_string()]
    );

    category.change_name("Documentary");
    assert!(!category.notification().has_errors());
    assert_eq!(category.name(), "Documentary");
}

#[test]
fn update_activate_and_deactivate_mutate_fields() {
    let mut category = Category::create(CreateCategoryCommand {
        name: "Movie".to_string(),
        description: Some("old".to_string()),
        is_active: Some(false),
    });
    assert!(!category.is_active());

    category.update("Film", None);
    category.activate();
    assert_eq!(category.name(), "Film");
    assert_eq!(category.description(), None);
    assert!(category.is_active());

    category.deactivate();
    assert!(!category.is_active());
}

#[test]
fn validate_with_unrelated_field_is_a_no_op() {
    let mut category = Category::new(CategoryProps::default());
    assert!(category.validate(Some(&["description"])));
    assert!(!category.notification().has_errors());

    assert!(!category.validate(None));
    assert!(category.notification().has_errors());
}

#[test]
fn serializes_fields_without_notification() {
    let id = CategoryId::parse("8b5c9d2e-1f3a-4b6c-9d7e-0a1b2c3d4e5f").unwrap();
    let created_at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    let category = Category::new(CategoryProps {
        category_id: Some(id),
        name: "Movie".to_string(),
        description: None,
        is_active: None,
        created_at: Some(created_at),
    });

    let json = serde_json::to_value(&category).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "category_id": "8b5c9d2e-1f3a-4b6c-9d7e-0a1b2c3d4e5f",
            "name": "Movie",
            "description": null,
            "is_active": true,
            "created_at": "2024-01-02T03:04:05Z",
        })
    );
}

#[test]
fn identifiers_compare_by_value() {
    let raw = "8b5c9d2e-1f3a-4b6c-9d7e-0a1b2c3d4e5f";
    assert_eq!(Identifier::parse(raw).unwrap(), raw.parse::<Identifier>().unwrap());
    assert_ne!(Identifier::new(), Identifier::new());

    let err: InvalidIdentifierError = Identifier::parse("not-a-uuid").unwrap_err();
    assert_eq!(err.to_string(), "ID must be a valid UUID");
}
