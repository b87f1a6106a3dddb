//! Literal test data sent to the marketplace

use serde_json::{json, Value};

use super::state::Actor;

#[derive(Debug, Clone)]
pub struct UserFixture {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl UserFixture {
    pub fn registration(&self) -> Value {
        json!({
            "name": self.name,
            "email": self.email,
            "password": self.password,
        })
    }

    pub fn login(&self) -> Value {
        json!({
            "email": self.email,
            "password": self.password,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ProfileFixture {
    pub contact_number: String,
    pub description: String,
}

impl ProfileFixture {
    pub fn payload(&self) -> Value {
        json!({
            "contactNumber": self.contact_number,
            "description": self.description,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ListingFixture {
    pub title: String,
    pub kind: String,
    pub price: u32,
    pub square_feet: u32,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub facilities: Vec<String>,
    pub images: Vec<String>,
    pub description: String,
    pub bedrooms: u32,
    pub bathrooms: u32,
}

impl ListingFixture {
    pub fn payload(&self) -> Value {
        json!({
            "title": self.title,
            "type": self.kind,
            "price": self.price,
            "squareFeet": self.square_feet,
            "addressText": self.address,
            "latitude": self.latitude,
            "longitude": self.longitude,
            "facilities": self.facilities,
            "images": self.images,
            "description": self.description,
            "bedrooms": self.bedrooms,
            "bathrooms": self.bathrooms,
        })
    }

    /// Same listing with a type the marketplace does not know
    pub fn with_unknown_type(&self) -> Value {
        let mut payload = self.payload();
        payload["type"] = json!("invalid_type");
        payload
    }
}

#[derive(Debug, Clone)]
pub struct Fixtures {
    pub owner: UserFixture,
    pub customer: UserFixture,
    pub profile: ProfileFixture,
    pub listing: ListingFixture,
    pub rating: u8,
    pub review_comment: String,
    pub out_of_range_ratings: Vec<u8>,
}

impl Fixtures {
    pub fn user(&self, actor: Actor) -> &UserFixture {
        match actor {
            Actor::Owner => &self.owner,
            Actor::Customer => &self.customer,
        }
    }

    pub fn review(&self, listing_id: &str) -> Value {
        self.review_with_rating(listing_id, self.rating)
    }

    pub fn review_with_rating(&self, listing_id: &str, rating: u8) -> Value {
        json!({
            "listingId": listing_id,
            "rating": rating,
            "comment": self.review_comment,
        })
    }
}

impl Default for Fixtures {
    fn default() -> Self {
        Self {
            owner: UserFixture {
                name: "Sarah Johnson".to_string(),
                email: "sarah.owner@rentease.com".to_string(),
                password: "securepass123".to_string(),
            },
            customer: UserFixture {
                name: "Mike Chen".to_string(),
                email: "mike.customer@rentease.com".to_string(),
                password: "securepass456".to_string(),
            },
            profile: ProfileFixture {
                contact_number: "1234567890".to_string(),
                description: "Experienced property owner with multiple listings in downtown area"
                    .to_string(),
            },
            listing: ListingFixture {
                title: "Beautiful Downtown Apartment with City Views".to_string(),
                kind: "house".to_string(),
                price: 2000,
                square_feet: 1500,
                address: "123 Main Street, Downtown City, State 12345".to_string(),
                latitude: 40.7128,
                longitude: -74.0060,
                facilities: ["WiFi", "Parking", "Air Conditioning", "Gym"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                images: vec![
                    "https://picsum.photos/800/600?random=1".to_string(),
                    "https://picsum.photos/800/600?random=2".to_string(),
                ],
                description: "Spacious apartment in the heart of downtown with amazing city views"
                    .to_string(),
                bedrooms: 2,
                bathrooms: 2,
            },
            rating: 5,
            review_comment:
                "Amazing property! Great location and excellent amenities. Highly recommended!"
                    .to_string(),
            out_of_range_ratings: vec![6, 0],
        }
    }
}
