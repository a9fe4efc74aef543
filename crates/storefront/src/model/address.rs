//! Address books: one per user, holding that user's shipping addresses.
use super::timestamp::{self, Timestamp};
use super::user::UserId;
use serde::{Deserialize, Serialize};

entity_id!(
    /// Identifies an address within its owner's book.
    AddressId,
    "address"
);

/// The user-editable part of an address. Absent fields read as blank, so
/// completeness is reported by [`AddressFields::missing_fields`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddressFields {
    pub address: String,
    pub city: String,
    pub pincode: String,
    pub phone: String,
    pub notes: String,
}

impl AddressFields {
    /// Names of required fields that are blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("address", &self.address),
            ("city", &self.city),
            ("pincode", &self.pincode),
            ("phone", &self.phone),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: AddressId,
    pub user_id: UserId,
    #[serde(flatten)]
    pub fields: AddressFields,
    #[serde(with = "timestamp")]
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressBook {
    pub user_id: UserId,
    pub entries: Vec<Address>,
    #[serde(skip)]
    next_id: u32,
}

impl AddressBook {
    pub fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            entries: Vec::new(),
            next_id: 1,
        }
    }

    pub fn find(&self, id: AddressId) -> Option<&Address> {
        self.entries.iter().find(|a| a.id == id)
    }

    /// Stores a new entry. Callers validate `fields` first.
    pub fn insert(&mut self, fields: AddressFields) -> Address {
        let address = Address {
            id: AddressId(self.next_id),
            user_id: self.user_id,
            fields,
            updated_at: timestamp::now(),
        };
        self.next_id += 1;
        self.entries.push(address.clone());
        address
    }

    pub fn replace(&mut self, id: AddressId, fields: AddressFields) -> Option<Address> {
        let entry = self.entries.iter_mut().find(|a| a.id == id)?;
        entry.fields = fields;
        entry.updated_at = timestamp::now();
        Some(entry.clone())
    }

    pub fn remove(&mut self, id: AddressId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|a| a.id != id);
        self.entries.len() != before
    }
}

/// The address copied by value into an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressInfo {
    #[serde(default)]
    pub address_id: Option<AddressId>,
    #[serde(flatten)]
    pub fields: AddressFields,
}

impl From<&Address> for AddressInfo {
    fn from(address: &Address) -> Self {
        Self {
            address_id: Some(address.id),
            fields: address.fields.clone(),
        }
    }
}
