use serde::{Deserialize, Serialize};

const MAP_BASE_URL: &str = "https://www.google.com/maps";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub username: String,
    pub email: String,
    pub address: Address,
    pub phone: String,
    pub website: String,
    pub company: Company,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub suite: String,
    pub city: String,
    pub zipcode: String,
    pub geo: Geo,
}

/// Coordinates are kept as the strings the API sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geo {
    pub lat: String,
    pub lng: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    #[serde(rename = "catchPhrase")]
    pub catch_phrase: String,
    pub bs: String,
}

impl User {
    /// Single-line address as shown in the table.
    pub fn flat_address(&self) -> String {
        let a = &self.address;
        format!("{}, {}, {}, {}", a.street, a.suite, a.city, a.zipcode)
    }

    pub fn website_url(&self) -> String {
        format!("https://{}", self.website)
    }

    pub fn mailto_url(&self) -> String {
        format!("mailto:{}", self.email)
    }
}

impl Geo {
    pub fn map_url(&self) -> String {
        format!("{}?q={},{}", MAP_BASE_URL, self.lat, self.lng)
    }
}

/// Which control inside the focused table row receives Enter/Space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowControl {
    #[default]
    Row,
    Website,
    Delete,
}

impl RowControl {
    pub fn next(self) -> Self {
        match self {
            RowControl::Row => RowControl::Website,
            RowControl::Website => RowControl::Delete,
            RowControl::Delete => RowControl::Row,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            RowControl::Row => RowControl::Delete,
            RowControl::Website => RowControl::Row,
            RowControl::Delete => RowControl::Website,
        }
    }
}

/// Focusable controls of the detail panel, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailControl {
    #[default]
    Close,
    Map,
    Website,
    Email,
}

impl DetailControl {
    pub fn next(self) -> Self {
        match self {
            DetailControl::Close => DetailControl::Map,
            DetailControl::Map => DetailControl::Website,
            DetailControl::Website => DetailControl::Email,
            DetailControl::Email => DetailControl::Close,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            DetailControl::Close => DetailControl::Email,
            DetailControl::Map => DetailControl::Close,
            DetailControl::Website => DetailControl::Map,
            DetailControl::Email => DetailControl::Website,
        }
    }
}
