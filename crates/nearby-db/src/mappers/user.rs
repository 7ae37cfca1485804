//! User entity <-> model mapper

use chrono::NaiveDate;
use nearby_core::entities::{Gender, User};
use nearby_core::value_objects::Snowflake;

use crate::models::UserModel;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            gender: model.gender.trim().parse().unwrap_or(Gender::Male),
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            phone: model.phone,
            birthday: model.birthday,
            country: model.country,
            city: model.city,
            image: model.image,
            created_at: model.created_at,
        }
    }
}

/// Column values for inserting a user
pub struct UserInsert<'a> {
    pub id: i64,
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub phone: &'a str,
    pub gender: &'static str,
    pub birthday: Option<NaiveDate>,
    pub country: &'a str,
    pub city: &'a str,
    pub image: Option<&'a str>,
}

impl<'a> UserInsert<'a> {
    pub fn new(user: &'a User) -> Self {
        Self {
            id: user.id.into_inner(),
            email: &user.email,
            first_name: &user.first_name,
            last_name: &user.last_name,
            phone: &user.phone,
            gender: user.gender.as_str(),
            birthday: user.birthday,
            country: &user.country,
            city: &user.city,
            image: user.image.as_deref(),
        }
    }
}
