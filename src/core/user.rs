//! The user record served by the JSONPlaceholder `/users` fixture

use crate::core::entity::{FieldPath, Record};
use crate::core::field::FieldValue;
use serde::{Deserialize, Serialize};

/// Identifier of a [`User`]
pub type UserId = u64;

/// A user entity as returned by the upstream `/users` endpoint.
///
/// Nested objects are optional: a user without a `company` resolves every
/// `company.*` path to `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    pub catch_phrase: String,
    pub bs: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub street: String,
    pub suite: String,
    pub city: String,
    pub zipcode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo: Option<Geo>,
}

/// Coordinates, kept as strings the way the fixture serves them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Geo {
    pub lat: String,
    pub lng: String,
}

impl User {
    /// Create a user with only an id and a display name
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
            username: None,
            email: None,
            address: None,
            phone: None,
            website: None,
            company: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_company(mut self, name: impl Into<String>) -> Self {
        self.company = Some(Company {
            name: name.into(),
            ..Company::default()
        });
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        let address = self.address.get_or_insert_with(Address::default);
        address.city = city.into();
        self
    }

    /// Company name, the column the list views display for `company`
    pub fn company_name(&self) -> Option<&str> {
        self.company.as_ref().map(|c| c.name.as_str())
    }
}

/// Every leaf path of a [`User`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserField {
    Id,
    Name,
    Username,
    Email,
    Phone,
    Website,
    CompanyName,
    CompanyCatchPhrase,
    CompanyBs,
    AddressStreet,
    AddressSuite,
    AddressCity,
    AddressZipcode,
    AddressGeoLat,
    AddressGeoLng,
}

impl UserField {
    pub const ALL: [UserField; 15] = [
        UserField::Id,
        UserField::Name,
        UserField::Username,
        UserField::Email,
        UserField::Phone,
        UserField::Website,
        UserField::CompanyName,
        UserField::CompanyCatchPhrase,
        UserField::CompanyBs,
        UserField::AddressStreet,
        UserField::AddressSuite,
        UserField::AddressCity,
        UserField::AddressZipcode,
        UserField::AddressGeoLat,
        UserField::AddressGeoLng,
    ];
}

impl FieldPath for UserField {
    fn parse(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.path() == path)
    }

    fn path(&self) -> &'static str {
        match self {
            UserField::Id => "id",
            UserField::Name => "name",
            UserField::Username => "username",
            UserField::Email => "email",
            UserField::Phone => "phone",
            UserField::Website => "website",
            UserField::CompanyName => "company.name",
            UserField::CompanyCatchPhrase => "company.catchPhrase",
            UserField::CompanyBs => "company.bs",
            UserField::AddressStreet => "address.street",
            UserField::AddressSuite => "address.suite",
            UserField::AddressCity => "address.city",
            UserField::AddressZipcode => "address.zipcode",
            UserField::AddressGeoLat => "address.geo.lat",
            UserField::AddressGeoLng => "address.geo.lng",
        }
    }
}

fn text(value: &Option<String>) -> Option<FieldValue> {
    value.as_deref().map(FieldValue::from)
}

impl Record for User {
    type Id = UserId;
    type Field = UserField;

    fn id(&self) -> UserId {
        self.id
    }

    fn field_value(&self, field: UserField) -> Option<FieldValue> {
        let company = self.company.as_ref();
        let address = self.address.as_ref();
        let geo = address.and_then(|a| a.geo.as_ref());

        match field {
            UserField::Id => Some(FieldValue::from(self.id)),
            UserField::Name => text(&self.name),
            UserField::Username => text(&self.username),
            UserField::Email => text(&self.email),
            UserField::Phone => text(&self.phone),
            UserField::Website => text(&self.website),
            UserField::CompanyName => company.map(|c| FieldValue::from(c.name.as_str())),
            UserField::CompanyCatchPhrase => {
                company.map(|c| FieldValue::from(c.catch_phrase.as_str()))
            }
            UserField::CompanyBs => company.map(|c| FieldValue::from(c.bs.as_str())),
            UserField::AddressStreet => address.map(|a| FieldValue::from(a.street.as_str())),
            UserField::AddressSuite => address.map(|a| FieldValue::from(a.suite.as_str())),
            UserField::AddressCity => address.map(|a| FieldValue::from(a.city.as_str())),
            UserField::AddressZipcode => address.map(|a| FieldValue::from(a.zipcode.as_str())),
            UserField::AddressGeoLat => geo.map(|g| FieldValue::from(g.lat.as_str())),
            UserField::AddressGeoLng => geo.map(|g| FieldValue::from(g.lng.as_str())),
        }
    }

    fn searchable_fields() -> &'static [UserField] {
        &UserField::ALL
    }
}
