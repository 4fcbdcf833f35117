//! Transport-level view models shared by the REST API and the web client.
//!
//! View models are what travels over the wire. They are validated and turned
//! into commands at the API boundary, and built from entities on read paths.
//! JSON uses camelCase and omits absent fields.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::commands::{
    CategoryCreateCommand, CategoryUpdateCommand, NoteCreateCommand, NoteUpdateCommand,
    TagCreateCommand, TagUpdateCommand,
};
use crate::entities::{Category, Note, Tag};
use crate::types::DbId;

/// A `(field path, message)` pair describing one invalid input field.
pub type FieldError = (String, String);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CategoryModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DbId>,
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<TagModel>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TagModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DbId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<DbId>,
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<NoteModel>>,
    /// Parent category name. Filled on reads, ignored on writes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DbId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_id: Option<DbId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Parent tag name. Read only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Grandparent category id. Read only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<DbId>,
    /// Grandparent category name. Read only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

// ---------------------------------------------------------------------------
// Model -> command
// ---------------------------------------------------------------------------

impl CategoryModel {
    pub fn into_create_command(self) -> Result<CategoryCreateCommand, Vec<FieldError>> {
        let mut errors = Vec::new();
        collect("", self.validate(), &mut errors);
        let tags = nested_tags(self.tags, &mut errors);

        finish(
            CategoryCreateCommand {
                id: self.id,
                name: self.name,
                tags,
            },
            errors,
        )
    }

    /// Build an update command. `id` is required.
    pub fn into_update_command(self) -> Result<CategoryUpdateCommand, Vec<FieldError>> {
        let mut errors = Vec::new();
        collect("", self.validate(), &mut errors);
        let id = required(self.id, "id", &mut errors);
        let tags = nested_tags(self.tags, &mut errors);

        finish(
            CategoryUpdateCommand {
                id,
                name: self.name,
                tags,
            },
            errors,
        )
    }
}

impl TagModel {
    /// Build a create command for a standalone tag. `categoryId` is required.
    pub fn into_create_command(self) -> Result<TagCreateCommand, Vec<FieldError>> {
        let mut errors = Vec::new();
        let command = self.create_command_at("", false, &mut errors);
        finish(command, errors)
    }

    /// Build an update command. `id` and `categoryId` are required.
    pub fn into_update_command(self) -> Result<TagUpdateCommand, Vec<FieldError>> {
        let mut errors = Vec::new();
        collect("", self.validate(), &mut errors);
        let id = required(self.id, "id", &mut errors);
        let category_id = required(self.category_id, "categoryId", &mut errors);
        let notes = nested_notes(self.notes);

        finish(
            TagUpdateCommand {
                id,
                category_id,
                name: self.name,
                notes,
            },
            errors,
        )
    }

    /// Nested tags take their category from the parent, so `categoryId` is
    /// only required when `nested` is false.
    fn create_command_at(
        self,
        prefix: &str,
        nested: bool,
        errors: &mut Vec<FieldError>,
    ) -> TagCreateCommand {
        collect(prefix, self.validate(), errors);
        let category_id = if nested {
            self.category_id.unwrap_or_default()
        } else {
            required(self.category_id, &path(prefix, "categoryId"), errors)
        };
        let notes = nested_notes(self.notes);

        TagCreateCommand {
            id: self.id,
            category_id,
            name: self.name,
            notes,
        }
    }
}

impl NoteModel {
    /// Build a create command for a standalone note. `tagId` is required.
    pub fn into_create_command(self) -> Result<NoteCreateCommand, Vec<FieldError>> {
        let mut errors = Vec::new();
        let tag_id = required(self.tag_id, "tagId", &mut errors);
        finish(
            NoteCreateCommand {
                id: self.id,
                tag_id,
                body: self.body,
            },
            errors,
        )
    }

    /// Build an update command. `id` and `tagId` are required.
    pub fn into_update_command(self) -> Result<NoteUpdateCommand, Vec<FieldError>> {
        let mut errors = Vec::new();
        let id = required(self.id, "id", &mut errors);
        let tag_id = required(self.tag_id, "tagId", &mut errors);
        finish(
            NoteUpdateCommand {
                id,
                tag_id,
                body: self.body,
            },
            errors,
        )
    }

    fn nested_create_command(self) -> NoteCreateCommand {
        NoteCreateCommand {
            id: self.id,
            tag_id: self.tag_id.unwrap_or_default(),
            body: self.body,
        }
    }
}

fn nested_tags(
    tags: Option<Vec<TagModel>>,
    errors: &mut Vec<FieldError>,
) -> Option<Vec<TagCreateCommand>> {
    tags.map(|tags| {
        tags.into_iter()
            .enumerate()
            .map(|(i, tag)| tag.create_command_at(&format!("tags[{i}]"), true, errors))
            .collect()
    })
}

fn nested_notes(notes: Option<Vec<NoteModel>>) -> Option<Vec<NoteCreateCommand>> {
    notes.map(|notes| {
        notes
            .into_iter()
            .map(NoteModel::nested_create_command)
            .collect()
    })
}

fn required(value: Option<DbId>, field: &str, errors: &mut Vec<FieldError>) -> DbId {
    match value {
        Some(id) => id,
        None => {
            errors.push((field.to_string(), "is required".to_string()));
            DbId::nil()
        }
    }
}

fn path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{prefix}.{field}")
    }
}

/// Flatten validator output into field errors, sorted for stable output.
fn collect(prefix: &str, result: Result<(), ValidationErrors>, errors: &mut Vec<FieldError>) {
    let Err(validation) = result else {
        return;
    };

    let mut found: Vec<FieldError> = Vec::new();
    for (field, field_errors) in validation.field_errors() {
        for err in field_errors.iter() {
            let message = err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| err.code.to_string());
            found.push((path(prefix, &field.to_string()), message));
        }
    }
    found.sort();
    errors.extend(found);
}

fn finish<T>(command: T, errors: Vec<FieldError>) -> Result<T, Vec<FieldError>> {
    if errors.is_empty() {
        Ok(command)
    } else {
        Err(errors)
    }
}

// ---------------------------------------------------------------------------
// Entity -> model
// ---------------------------------------------------------------------------

impl From<&Category> for CategoryModel {
    fn from(category: &Category) -> Self {
        Self {
            id: Some(category.id()),
            name: category.name().to_string(),
            tags: category
                .tags()
                .map(|tags| tags.iter().map(TagModel::from).collect()),
        }
    }
}

impl From<&Tag> for TagModel {
    fn from(tag: &Tag) -> Self {
        Self {
            id: Some(tag.id()),
            category_id: Some(tag.category_id()),
            name: tag.name().to_string(),
            notes: tag
                .notes()
                .map(|notes| notes.iter().map(NoteModel::from).collect()),
            category: tag.category().map(|c| c.name.clone()),
        }
    }
}

impl From<&Note> for NoteModel {
    fn from(note: &Note) -> Self {
        let tag = note.tag();
        Self {
            id: Some(note.id()),
            tag_id: Some(note.tag_id()),
            body: note.body().map(str::to_string),
            tag: tag.map(|t| t.name.clone()),
            category_id: tag.map(|t| t.category.id),
            category: tag.map(|t| t.category.name.clone()),
        }
    }
}
