pub mod municipality;
pub mod position;
pub mod resolver;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Coordinate { latitude, longitude }
    }
}

/// Address resolved from a single geocoder response.
///
/// `municipality_name` is `None` when the address does not have the
/// `<prefecture><municipality>` shape the extractor understands.
#[derive(Debug, Clone, PartialEq)]
pub struct AddressRecord {
    pub full_address: String,
    pub municipality_code: String,
    pub municipality_name: Option<String>
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Found(AddressRecord),
    /// The geocoder answered but knows no address at this coordinate
    NoMatch
}
