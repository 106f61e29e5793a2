use serde::Deserialize;

/// Listing fields as submitted by clients. Everything is optional; the
/// original data set is schema-flexible. Used both for create and for
/// partial update, where absent fields leave the stored value unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct HouseInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub number: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub bedrooms: Option<i32>,
    pub bathroom: Option<i32>,
    pub room: Option<i32>,
    pub rent: Option<i32>,
    pub available: Option<bool>,
    pub picture: Option<String>,
    pub description: Option<String>,
}
