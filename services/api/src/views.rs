//! Assemble nested JSON projections from repository rows

use lunch_auth::models::Employee;
use lunch_common::error::DatabaseResult;

use crate::{
    models::{
        choice::ChoiceView,
        employee::EmployeeView,
        menu::{Menu, MenuView},
        restaurant::{Restaurant, RestaurantView},
    },
    state::AppState,
};

pub async fn menu_view(state: &AppState, menu: Menu) -> DatabaseResult<MenuView> {
    let choices = state.choices.details_for_menu(menu.id).await?;
    Ok(MenuView::new(menu, choices.into_iter().map(ChoiceView::from).collect()))
}

pub async fn restaurant_view(
    state: &AppState,
    restaurant: Restaurant,
) -> DatabaseResult<RestaurantView> {
    let menu = match state.menus.find_by_restaurant(restaurant.id).await? {
        Some(menu) => Some(menu_view(state, menu).await?),
        None => None,
    };
    Ok(RestaurantView::new(restaurant, menu))
}

pub async fn employee_view(state: &AppState, employee: &Employee) -> DatabaseResult<EmployeeView> {
    let choices = state.choices.details_for_employee(employee.id).await?;
    Ok(EmployeeView::new(
        employee,
        choices.into_iter().map(ChoiceView::from).collect(),
    ))
}
