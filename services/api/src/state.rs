//! Application state shared across handlers

use axum::extract::FromRef;
use lunch_auth::{AuthState, JwtService, repositories::EmployeeRepository};
use sqlx::PgPool;

use crate::repositories::{ChoiceRepository, MenuRepository, RestaurantRepository};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthState,
    pub restaurants: RestaurantRepository,
    pub menus: MenuRepository,
    pub choices: ChoiceRepository,
}

impl AppState {
    pub fn new(pool: PgPool, jwt_service: JwtService) -> Self {
        Self {
            auth: AuthState::new(pool.clone(), jwt_service),
            restaurants: RestaurantRepository::new(pool.clone()),
            menus: MenuRepository::new(pool.clone()),
            choices: ChoiceRepository::new(pool),
        }
    }

    pub fn employees(&self) -> &EmployeeRepository {
        &self.auth.employees
    }
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}
