//! Identity document data model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One slot of the identity record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IdentityField {
    FirstName,
    LastName,
    IdNumber,
    BirthDate,
    Sex,
    AddressStreet,
    AddressNumber,
    PostalCode,
}

impl IdentityField {
    /// All fields, in label table order.
    pub const ALL: [IdentityField; 8] = [
        IdentityField::FirstName,
        IdentityField::LastName,
        IdentityField::IdNumber,
        IdentityField::BirthDate,
        IdentityField::Sex,
        IdentityField::AddressStreet,
        IdentityField::AddressNumber,
        IdentityField::PostalCode,
    ];

    /// Label text printed on the document in front of the value.
    pub fn label(self) -> &'static str {
        match self {
            IdentityField::FirstName => "First Name:",
            IdentityField::LastName => "Last Name:",
            IdentityField::IdNumber => "ID Number:",
            IdentityField::BirthDate => "Birth Date:",
            IdentityField::Sex => "Sex:",
            IdentityField::AddressStreet => "Address:",
            IdentityField::AddressNumber => "Address Number:",
            IdentityField::PostalCode => "Postal Code:",
        }
    }

    /// Key used for this field in serialized output.
    pub fn key(self) -> &'static str {
        match self {
            IdentityField::FirstName => "firstName",
            IdentityField::LastName => "lastName",
            IdentityField::IdNumber => "idNumber",
            IdentityField::BirthDate => "birthDate",
            IdentityField::Sex => "sex",
            IdentityField::AddressStreet => "addressStreet",
            IdentityField::AddressNumber => "addressNumber",
            IdentityField::PostalCode => "postalCode",
        }
    }
}

impl fmt::Display for IdentityField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Fields read from an identity document.
///
/// Every field is always present; a label that was not found on the
/// document leaves its field as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityRecord {
    pub first_name: String,
    pub last_name: String,
    pub id_number: String,
    pub birth_date: String,
    pub sex: String,
    pub address_street: String,
    pub address_number: String,
    pub postal_code: String,
}

impl IdentityRecord {
    /// Value of a field.
    pub fn get(&self, field: IdentityField) -> &str {
        match field {
            IdentityField::FirstName => &self.first_name,
            IdentityField::LastName => &self.last_name,
            IdentityField::IdNumber => &self.id_number,
            IdentityField::BirthDate => &self.birth_date,
            IdentityField::Sex => &self.sex,
            IdentityField::AddressStreet => &self.address_street,
            IdentityField::AddressNumber => &self.address_number,
            IdentityField::PostalCode => &self.postal_code,
        }
    }

    pub(crate) fn slot_mut(&mut self, field: IdentityField) -> &mut String {
        match field {
            IdentityField::FirstName => &mut self.first_name,
            IdentityField::LastName => &mut self.last_name,
            IdentityField::IdNumber => &mut self.id_number,
            IdentityField::BirthDate => &mut self.birth_date,
            IdentityField::Sex => &mut self.sex,
            IdentityField::AddressStreet => &mut self.address_street,
            IdentityField::AddressNumber => &mut self.address_number,
            IdentityField::PostalCode => &mut self.postal_code,
        }
    }

    /// Iterate over `(field, value)` pairs in label table order.
    pub fn fields(&self) -> impl Iterator<Item = (IdentityField, &str)> {
        IdentityField::ALL.into_iter().map(move |f| (f, self.get(f)))
    }

    /// True when no field carries a value.
    pub fn is_empty(&self) -> bool {
        self.fields().all(|(_, v)| v.is_empty())
    }
}
