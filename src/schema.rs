use mongodb::bson::{doc, Bson, Document};

/// BSON types the validator can require for a declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Date,
    Bool,
    Int,
    Long,
    Double,
    ObjectId,
    Object,
    Array,
}

impl FieldType {
    pub fn bson_name(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Date => "date",
            FieldType::Bool => "bool",
            FieldType::Int => "int",
            FieldType::Long => "long",
            FieldType::Double => "double",
            FieldType::ObjectId => "objectId",
            FieldType::Object => "object",
            FieldType::Array => "array",
        }
    }
}

/// One declared field in a collection schema.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub field_type: FieldType,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            required: false,
        }
    }
}

/// Static description of a collection and its validated shape. Declared as
/// a `const` so schema drift is a compile error, not a runtime surprise.
#[derive(Debug, Clone, Copy)]
pub struct CollectionSchema {
    pub collection: &'static str,
    pub fields: &'static [FieldSpec],
    /// When true the rendered validator carries `additionalProperties:
    /// false`, matching stores whose default is strict. Off by default:
    /// undeclared keys are permitted.
    pub deny_unknown_fields: bool,
}

impl CollectionSchema {
    pub const fn new(collection: &'static str, fields: &'static [FieldSpec]) -> Self {
        Self {
            collection,
            fields,
            deny_unknown_fields: false,
        }
    }

    pub const fn strict(self) -> Self {
        Self {
            collection: self.collection,
            fields: self.fields,
            deny_unknown_fields: true,
        }
    }

    /// Render the `$jsonSchema` validator document the store enforces on
    /// every write to this collection.
    pub fn validator(&self) -> Document {
        let mut required: Vec<Bson> = Vec::new();
        let mut properties = Document::new();
        for field in self.fields {
            if field.required {
                required.push(Bson::from(field.name));
            }
            properties.insert(field.name, doc! { "bsonType": field.field_type.bson_name() });
        }

        let mut json_schema = doc! { "bsonType": "object" };
        if !required.is_empty() {
            json_schema.insert("required", required);
        }
        json_schema.insert("properties", properties);
        if self.deny_unknown_fields {
            json_schema.insert("additionalProperties", false);
        }

        doc! { "$jsonSchema": json_schema }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USERS_LIKE: CollectionSchema = CollectionSchema::new(
        "users",
        &[
            FieldSpec::required("email", FieldType::String),
            FieldSpec::required("password_hash", FieldType::String),
            FieldSpec::required("refresh_token", FieldType::String),
            FieldSpec::required("refresh_token_expiry_time", FieldType::Date),
        ],
    );

    #[test]
    fn renders_required_fields_and_types() {
        let expected = doc! {
            "$jsonSchema": {
                "bsonType": "object",
                "required": ["email", "password_hash", "refresh_token", "refresh_token_expiry_time"],
                "properties": {
                    "email": { "bsonType": "string" },
                    "password_hash": { "bsonType": "string" },
                    "refresh_token": { "bsonType": "string" },
                    "refresh_token_expiry_time": { "bsonType": "date" },
                },
            },
        };
        assert_eq!(USERS_LIKE.validator(), expected);
    }

    #[test]
    fn default_mode_permits_undeclared_keys() {
        let schema = USERS_LIKE
            .validator()
            .get_document("$jsonSchema")
            .expect("$jsonSchema present")
            .clone();
        assert!(!schema.contains_key("additionalProperties"));
    }

    #[test]
    fn strict_mode_denies_undeclared_keys() {
        let schema = USERS_LIKE
            .strict()
            .validator()
            .get_document("$jsonSchema")
            .expect("$jsonSchema present")
            .clone();
        assert_eq!(schema.get_bool("additionalProperties"), Ok(false));
    }

    #[test]
    fn optional_fields_are_typed_but_not_required() {
        const SCHEMA: CollectionSchema = CollectionSchema::new(
            "sessions",
            &[
                FieldSpec::required("user_id", FieldType::ObjectId),
                FieldSpec::optional("note", FieldType::String),
            ],
        );
        let validator = SCHEMA.validator();
        let schema = validator
            .get_document("$jsonSchema")
            .expect("$jsonSchema present");
        let required = schema.get_array("required").expect("required present");
        assert_eq!(required.len(), 1);
        assert_eq!(required[0], Bson::from("user_id"));
        let properties = schema.get_document("properties").expect("properties present");
        assert!(properties.contains_key("note"));
    }
}
