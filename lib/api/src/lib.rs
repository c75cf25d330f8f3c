pub mod rest;
pub mod wire;

pub use rest::{demo_profile, routes, RestApi};
pub use wire::{
    AccessoryRecommendation, DemoRecommendation, ProfileRequest, RecommendationResponse, SectionResponse,
    SectionedResponse, ValidationError,
};
