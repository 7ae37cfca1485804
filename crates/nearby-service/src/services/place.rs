//! Place service
//!
//! Places of interest saved by users, and how often the owner was there.

use nearby_core::entities::Place;
use nearby_core::proximity::rank_places_by_proximity;
use nearby_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{CreatePlaceRequest, PlaceResponse, TopPlaceResponse, UpdatePlaceRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub struct PlaceService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PlaceService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, request))]
    pub async fn create_place(
        &self,
        user_id: Snowflake,
        request: CreatePlaceRequest,
    ) -> ServiceResult<PlaceResponse> {
        let coordinate = request.coordinate()?;
        if self.ctx.user_repo().find_by_id(user_id).await?.is_none() {
            return Err(ServiceError::not_found("User", user_id.to_string()));
        }

        let mut place = Place::new(
            self.ctx.generate_id(),
            user_id,
            coordinate,
            request.category,
            request.description,
        );
        place.image = request.image;
        self.ctx.place_repo().create(&place).await?;

        info!(user_id = %user_id, place_id = %place.id, "Place created");
        Ok(PlaceResponse::from(&place))
    }

    /// Partial update, owner only
    #[instrument(skip(self, request))]
    pub async fn update_place(
        &self,
        user_id: Snowflake,
        place_id: Snowflake,
        request: UpdatePlaceRequest,
    ) -> ServiceResult<PlaceResponse> {
        let mut place = self.get_place_entity(place_id).await?;
        if !place.is_owned_by(user_id) {
            return Err(DomainError::NotPlaceOwner.into());
        }

        if let Some(coordinate) = request.coordinate(place.coordinate)? {
            place.set_coordinate(coordinate);
        }
        if let Some(category) = request.category {
            place.set_category(category);
        }
        if let Some(description) = request.description {
            place.set_description(description);
        }
        if let Some(image) = request.image {
            place.set_image(Some(image).filter(|i| !i.is_empty()));
        }

        self.ctx.place_repo().update(&place).await?;
        info!(user_id = %user_id, place_id = %place_id, "Place updated");

        Ok(PlaceResponse::from(&place))
    }

    #[instrument(skip(self))]
    pub async fn get_place(&self, place_id: Snowflake) -> ServiceResult<PlaceResponse> {
        Ok(PlaceResponse::from(&self.get_place_entity(place_id).await?))
    }

    #[instrument(skip(self))]
    pub async fn my_places(&self, user_id: Snowflake) -> ServiceResult<Vec<PlaceResponse>> {
        let places = self.ctx.place_repo().find_by_owner(user_id).await?;
        Ok(places.iter().map(PlaceResponse::from).collect())
    }

    /// Places saved by the users `user_id` follows
    #[instrument(skip(self))]
    pub async fn following_places(&self, user_id: Snowflake) -> ServiceResult<Vec<PlaceResponse>> {
        let owners: Vec<Snowflake> = self
            .ctx
            .follow_repo()
            .find_followed(user_id)
            .await?
            .iter()
            .map(|u| u.id)
            .collect();
        let places = self.ctx.place_repo().find_by_owners(&owners).await?;
        Ok(places.iter().map(PlaceResponse::from).collect())
    }

    /// The user's places ranked by how many of their own recorded locations
    /// fall within the visit radius
    #[instrument(skip(self))]
    pub async fn top_places(
        &self,
        user_id: Snowflake,
        limit: Option<u32>,
    ) -> ServiceResult<Vec<TopPlaceResponse>> {
        let places = self.ctx.place_repo().find_by_owner(user_id).await?;
        let history = self.ctx.location_repo().find_by_user(user_id, None).await?;

        let ranked = rank_places_by_proximity(
            &places,
            &history,
            self.ctx.proximity().top_places_radius_km,
            limit.map(|l| l as usize),
        );
        Ok(ranked.iter().map(TopPlaceResponse::from).collect())
    }

    async fn get_place_entity(&self, place_id: Snowflake) -> ServiceResult<Place> {
        self.ctx
            .place_repo()
            .find_by_id(place_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Place", place_id.to_string()))
    }
}
