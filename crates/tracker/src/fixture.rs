//! Test fixture: a customer entity with an owned loyalty card.

use serde_json::Value as JsonValue;

use unitwork_core::{
    DomainError, DomainResult, EntityKey, OwnedObject, PropertyMap, PropertyPath, TrackedEntity,
    ValueObject, flatten_owned,
};

pub fn path(raw: &str) -> PropertyPath {
    PropertyPath::parse(raw).unwrap()
}

/// Owned value object: lifecycle bound to its customer, equality by value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoyaltyCard {
    pub code: Option<String>,
}

impl ValueObject for LoyaltyCard {}

impl OwnedObject for LoyaltyCard {
    fn value_properties(&self) -> PropertyMap {
        let mut map = PropertyMap::new();
        map.insert(
            path("code"),
            self.code.clone().map(JsonValue::String).unwrap_or(JsonValue::Null),
        );
        map
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub key: Option<EntityKey>,
    pub name: String,
    pub loyalty: Option<LoyaltyCard>,
}

impl Customer {
    /// Fresh customer with an attached card that has no code yet.
    pub fn new(name: &str) -> Self {
        Self {
            key: None,
            name: name.to_string(),
            loyalty: Some(LoyaltyCard { code: None }),
        }
    }
}

impl TrackedEntity for Customer {
    fn kind() -> &'static str {
        "customers"
    }

    fn key(&self) -> Option<EntityKey> {
        self.key
    }

    fn assign_key(&mut self, key: EntityKey) {
        self.key = Some(key);
    }

    fn tracked_properties(&self) -> PropertyMap {
        let mut map = PropertyMap::new();
        map.insert(path("name"), JsonValue::String(self.name.clone()));
        flatten_owned(&mut map, &path("loyalty"), self.loyalty.as_ref());
        map
    }

    fn write_property(&mut self, p: &PropertyPath, value: JsonValue) -> DomainResult<()> {
        match p.as_str() {
            "name" => match value {
                JsonValue::String(s) => {
                    self.name = s;
                    Ok(())
                }
                other => Err(DomainError::validation(format!(
                    "name expects a string, got {other}"
                ))),
            },
            "loyalty" => match value {
                JsonValue::Null => {
                    self.loyalty = None;
                    Ok(())
                }
                other => Err(DomainError::validation(format!(
                    "loyalty accepts only null, got {other}"
                ))),
            },
            "loyalty.code" => {
                let card = self.loyalty.get_or_insert_with(|| LoyaltyCard { code: None });
                match value {
                    JsonValue::Null => {
                        card.code = None;
                        Ok(())
                    }
                    JsonValue::String(s) => {
                        card.code = Some(s);
                        Ok(())
                    }
                    other => Err(DomainError::validation(format!(
                        "loyalty.code expects a string or null, got {other}"
                    ))),
                }
            }
            other => Err(DomainError::invalid_path(other)),
        }
    }
}
