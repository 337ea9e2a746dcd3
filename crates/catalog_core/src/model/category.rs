//! Category aggregate.
//!
//! # Responsibility
//! - Hold category fields behind validating mutators.
//! - Record rule violations in the entity's notification.
//!
//! # Invariants
//! - `name` is non-empty and at most 255 characters once validated.
//! - `created_at` carries millisecond precision so it survives persistence.
//! - Mutators that touch a guarded field revalidate that field immediately.

use crate::model::entity::Entity;
use crate::model::identifier::Identifier;
use crate::model::notification::Notification;
use crate::model::validation::TextRules;
use chrono::{DateTime, SubsecRound, Utc};
use serde::Serialize;

pub const NAME_MAX_LENGTH: usize = 255;

const FIELD_NAME: &str = "name";

/// Identity of a category.
pub type CategoryId = Identifier;

/// Constructor input used for rehydration and tests.
///
/// Absent optional fields fall back to defaults: fresh id, no description,
/// active, created now.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryProps {
    pub category_id: Option<CategoryId>,
    pub name: String,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Input of the `create` command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateCategoryCommand {
    pub name: String,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    category_id: CategoryId,
    name: String,
    description: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    #[serde(skip)]
    notification: Notification,
}

impl Category {
    /// Builds a category without running validation.
    pub fn new(props: CategoryProps) -> Self {
        Self {
            category_id: props.category_id.unwrap_or_default(),
            name: props.name,
            description: props.description,
            is_active: props.is_active.unwrap_or(true),
            created_at: props
                .created_at
                .unwrap_or_else(Utc::now)
                .trunc_subsecs(3),
            notification: Notification::new(),
        }
    }

    /// Builds a new category and validates it.
    ///
    /// The result is always returned; check `notification().has_errors()`.
    pub fn create(command: CreateCategoryCommand) -> Self {
        let mut category = Self::new(CategoryProps {
            name: command.name,
            description: command.description,
            is_active: command.is_active,
            ..CategoryProps::default()
        });
        category.validate(Some(&[FIELD_NAME]));
        category
    }

    pub fn change_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.validate(Some(&[FIELD_NAME]));
    }

    pub fn change_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    /// Replaces name and description in one step.
    pub fn update(&mut self, name: impl Into<String>, description: Option<String>) {
        self.change_name(name);
        self.change_description(description);
    }

    pub fn activate(&mut self) {
        self.is_active = true;
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    /// Runs the rules of `fields` (all rules when `None`).
    ///
    /// Returns `true` when no errors remain for the checked fields.
    pub fn validate(&mut self, fields: Option<&[&str]>) -> bool {
        let checks_name = fields.map_or(true, |fields| fields.contains(&FIELD_NAME));
        if !checks_name {
            return true;
        }

        TextRules::new(FIELD_NAME, Some(self.name.as_str()))
            .required()
            .max_length(NAME_MAX_LENGTH)
            .apply(&mut self.notification)
    }

    pub fn category_id(&self) -> &CategoryId {
        &self.category_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Entity for Category {
    type Id = CategoryId;

    const KIND: &'static str = "Category";

    fn entity_id(&self) -> &Self::Id {
        &self.category_id
    }

    fn notification(&self) -> &Notification {
        &self.notification
    }
}
