//! End-to-end tests for the HTTP surface
//!
//! Each test truncates every table, so they run serially against the
//! database named by `DATABASE_URL` and are skipped when it is not set.

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use chrono::{Local, NaiveDate};
use http_body_util::BodyExt;
use lunch_api::{AppState, create_router};
use lunch_auth::{
    Group, JwtService,
    models::{Employee, NewEmployee},
    password::hash_password,
    repositories::EmployeeRepository,
};
use lunch_common::{
    config::JwtConfig,
    database::{DatabaseConfig, init_pool, run_migrations},
};
use serde_json::{Value, json};
use serial_test::serial;
use sqlx::PgPool;
use tower::ServiceExt;

struct TestApp {
    router: Router,
    pool: PgPool,
    jwt: JwtService,
}

impl TestApp {
    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn employee(&self, firstname: &str, email: &str, is_admin: bool) -> Employee {
        let new_employee = NewEmployee {
            firstname: firstname.to_string(),
            lastname: "Tester".to_string(),
            email: email.to_string(),
            password: "password".to_string(),
            is_admin,
        };
        let hashed = hash_password(&new_employee.password).unwrap();
        EmployeeRepository::new(self.pool.clone())
            .create(&new_employee, &hashed)
            .await
            .unwrap()
    }

    fn token(&self, employee: &Employee) -> String {
        self.jwt.generate_access_token(employee).unwrap()
    }

    async fn restaurant_with_menu(&self, admin: &str, name: &str) -> (i64, i64) {
        let (status, body) = self
            .send(Method::POST, "/api/restaurants/", Some(admin), Some(json!({ "name": name })))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        let restaurant_id = body["id"].as_i64().unwrap();

        let (status, body) = self
            .send(Method::POST, "/api/menus/", Some(admin), Some(menu_body(restaurant_id)))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        (restaurant_id, body["id"].as_i64().unwrap())
    }
}

fn menu_body(restaurant_id: i64) -> Value {
    json!({
        "restaurant_id": restaurant_id,
        "monday": "Soup",
        "tuesday": "Pasta",
        "wednesday": "Fish",
        "thursday": "Steak",
        "friday": "Pizza",
        "saturday": "Salad",
        "sunday": "Closed"
    })
}

async fn spawn_app() -> Option<TestApp> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let pool = init_pool(&DatabaseConfig {
        url,
        max_connections: 5,
        min_connections: 1,
        connection_timeout: 5,
    })
    .await
    .unwrap();
    run_migrations(&pool).await.unwrap();
    sqlx::query(
        "TRUNCATE choices, menu, restaurant, employees, revoked_tokens RESTART IDENTITY CASCADE",
    )
    .execute(&pool)
    .await
    .unwrap();

    let jwt = JwtService::new(JwtConfig {
        secret: "integration-secret".into(),
        access_token_expiry: 900,
        refresh_token_expiry: 604_800,
    });
    let router = create_router(AppState::new(pool.clone(), jwt.clone()), "test-build");

    Some(TestApp { router, pool, jwt })
}

macro_rules! app_or_skip {
    () => {
        match spawn_app().await {
            Some(app) => app,
            None => {
                eprintln!("DATABASE_URL not set, skipping");
                return;
            }
        }
    };
}

#[tokio::test]
#[serial]
async fn test_restaurant_lifecycle() {
    let app = app_or_skip!();
    let admin = app.employee("Ada", "ada@lunch.io", true).await;
    let customer = app.employee("Grace", "grace@lunch.io", false).await;
    let admin_token = app.token(&admin);

    let (status, body) = app
        .send(
            Method::POST,
            "/api/restaurants/",
            Some(&admin_token),
            Some(json!({ "name": "McDonalds" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "id": 1 }));

    let (status, body) = app.send(Method::GET, "/api/restaurants/1", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": 1, "name": "McDonalds", "menus": {} }));

    let (status, body) = app
        .send(Method::GET, "/api/restaurants/?name=McDonalds", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);

    let (status, _) = app
        .send(Method::GET, "/api/restaurants?name=Nowhere", None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app
        .send(
            Method::POST,
            "/api/restaurants/",
            Some(&app.token(&customer)),
            Some(json!({ "name": "KFC" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Admins only!");

    let (status, body) = app
        .send(
            Method::POST,
            "/api/restaurants/",
            Some(&admin_token),
            Some(json!({ "name": "" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], r#"Please, specify "name"."#);

    let (status, _) = app
        .send(
            Method::PATCH,
            "/api/restaurants/1",
            Some(&admin_token),
            Some(json!({ "name": "McDonald's" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.send(Method::GET, "/api/restaurants", None, None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "McDonald's");

    let (status, _) = app
        .send(Method::DELETE, "/api/restaurants/1", Some(&admin_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.send(Method::GET, "/api/restaurants/1", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial]
async fn test_menu_rules() {
    let app = app_or_skip!();
    let admin = app.employee("Ada", "ada@lunch.io", true).await;
    let token = app.token(&admin);

    let (status, _) = app
        .send(Method::POST, "/api/menus/", Some(&token), Some(menu_body(42)))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (restaurant_id, menu_id) = app.restaurant_with_menu(&token, "McDonalds").await;

    let (status, body) = app
        .send(Method::POST, "/api/menus/", Some(&token), Some(menu_body(restaurant_id)))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "This restaurant already has a menu.");

    let (status, _) = app
        .send(
            Method::POST,
            "/api/menus/",
            Some(&token),
            Some(json!({ "restaurant_id": restaurant_id, "monday": "Soup" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = app
        .send(Method::GET, &format!("/api/restaurants/{}", restaurant_id), None, None)
        .await;
    assert_eq!(body["menus"]["id"], menu_id);
    assert_eq!(body["menus"]["restaurant"], "McDonalds");

    // Pointing a menu at its own restaurant still counts as taken
    let (status, body) = app
        .send(
            Method::PATCH,
            &format!("/api/menus/{}", menu_id),
            Some(&token),
            Some(json!({ "restaurant_id": restaurant_id, "monday": "Borscht" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "This restaurant already has a menu.");
    let (_, body) = app
        .send(Method::GET, &format!("/api/menus/{}", menu_id), None, None)
        .await;
    assert_eq!(body["monday"], "Soup");

    let (status, _) = app
        .send(
            Method::PATCH,
            &format!("/api/menus/{}", menu_id),
            Some(&token),
            Some(json!({ "monday": "Borscht" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = app
        .send(Method::GET, &format!("/api/menus/{}", menu_id), None, None)
        .await;
    assert_eq!(body["monday"], "Borscht");
    assert_eq!(body["tuesday"], "Pasta");

    let (status, _) = app
        .send(
            Method::PATCH,
            &format!("/api/menus/{}", menu_id),
            Some(&token),
            Some(json!({ "restaurant_id": 999 })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Deleting the restaurant orphans its menu
    app.send(
        Method::DELETE,
        &format!("/api/restaurants/{}", restaurant_id),
        Some(&token),
        None,
    )
    .await;
    let (status, body) = app
        .send(Method::GET, &format!("/api/menus/{}", menu_id), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["restaurant_id"].is_null());
}

#[tokio::test]
#[serial]
async fn test_one_choice_per_day() {
    let app = app_or_skip!();
    let admin = app.employee("Ada", "ada@lunch.io", true).await;
    let customer = app.employee("Grace", "grace@lunch.io", false).await;
    let (_, menu_id) = app
        .restaurant_with_menu(&app.token(&admin), "McDonalds")
        .await;
    let token = app.token(&customer);

    let (status, _) = app
        .send(Method::POST, "/api/choices/", Some(&token), Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send(
            Method::POST,
            "/api/choices/",
            Some(&token),
            Some(json!({ "menu_id": 999 })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.send(Method::GET, "/api/choices/current", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app
        .send(
            Method::POST,
            "/api/choices/",
            Some(&token),
            Some(json!({ "menu_id": menu_id })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let choice_id = body["id"].as_i64().unwrap();

    let (status, body) = app
        .send(
            Method::POST,
            "/api/choices/",
            Some(&token),
            Some(json!({ "menu_id": menu_id })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "You have already chosen");

    let (status, body) = app.send(Method::GET, "/api/choices/current", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["id"], choice_id);
    assert_eq!(body[0]["employee"]["email"], "grace@lunch.io");
    assert_eq!(body[0]["restaurant"], "McDonalds");
    assert_eq!(
        body[0]["current_day"],
        Local::now().date_naive().format("%Y-%m-%d").to_string()
    );

    let (_, body) = app
        .send(Method::GET, &format!("/api/menus/{}", menu_id), None, None)
        .await;
    assert_eq!(body["choices"][0]["id"], choice_id);
}

#[tokio::test]
#[serial]
async fn test_choice_ownership_and_reassignment() {
    let app = app_or_skip!();
    let admin = app.employee("Ada", "ada@lunch.io", true).await;
    let owner = app.employee("Grace", "grace@lunch.io", false).await;
    let other = app.employee("Alan", "alan@lunch.io", false).await;
    let admin_token = app.token(&admin);
    let (_, first_menu) = app.restaurant_with_menu(&admin_token, "McDonalds").await;
    let (_, second_menu) = app.restaurant_with_menu(&admin_token, "KFC").await;

    let yesterday = Local::now().date_naive().pred_opt().unwrap();
    let choice_id: i32 = sqlx::query_scalar(
        "INSERT INTO choices (current_day, employee_id, menu_id) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(yesterday)
    .bind(owner.id)
    .bind(first_menu as i32)
    .fetch_one(&app.pool)
    .await
    .unwrap();
    let uri = format!("/api/choices/{}", choice_id);

    let (status, body) = app
        .send(
            Method::PATCH,
            &uri,
            Some(&app.token(&other)),
            Some(json!({ "menu_id": second_menu })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Not allowed");

    let owner_token = app.token(&owner);
    let (status, _) = app
        .send(
            Method::PATCH,
            &uri,
            Some(&owner_token),
            Some(json!({ "menu_id": second_menu })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.send(Method::GET, &uri, None, None).await;
    assert_eq!(body["restaurant"], "KFC");
    let day: NaiveDate = serde_json::from_value(body["current_day"].clone()).unwrap();
    assert_eq!(day, Local::now().date_naive());

    let (status, _) = app
        .send(Method::DELETE, &uri, Some(&app.token(&other)), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.send(Method::DELETE, &uri, Some(&owner_token), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.send(Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial]
async fn test_employee_update_rules() {
    let app = app_or_skip!();
    let admin = app.employee("Ada", "ada@lunch.io", true).await;
    let grace = app.employee("Grace", "grace@lunch.io", false).await;
    let alan = app.employee("Alan", "alan@lunch.io", false).await;
    let grace_token = app.token(&grace);

    let (status, body) = app
        .send(
            Method::PATCH,
            &format!("/api/employees/{}", alan.id),
            Some(&grace_token),
            Some(json!({ "password": "hijacked" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Not allowed");

    let (status, body) = app
        .send(
            Method::PATCH,
            &format!("/api/employees/{}", grace.id),
            Some(&grace_token),
            Some(json!({ "firstname": "Amazing", "password": "n3w-secret" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Updated");

    let (_, body) = app
        .send(Method::GET, "/api/employees/current", Some(&grace_token), None)
        .await;
    assert_eq!(body["firstname"], "Grace");

    let (status, _) = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": "grace@lunch.io", "password": "n3w-secret" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .send(
            Method::PATCH,
            &format!("/api/employees/{}", alan.id),
            Some(&app.token(&admin)),
            Some(json!({ "lastname": "Church", "email": "grace@lunch.io" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Updated, but email grace@lunch.io already used");

    let (_, body) = app
        .send(
            Method::GET,
            &format!("/api/employees/{}", alan.id),
            Some(&grace_token),
            None,
        )
        .await;
    assert_eq!(body["lastname"], "Church");
    assert_eq!(body["email"], "alan@lunch.io");

    let (_, body) = app
        .send(
            Method::GET,
            "/api/employees/?firstname=Alan&lastname=Church",
            Some(&grace_token),
            None,
        )
        .await;
    assert_eq!(body["id"], alan.id);
}

#[tokio::test]
#[serial]
async fn test_soft_delete() {
    let app = app_or_skip!();
    let admin = app.employee("Ada", "ada@lunch.io", true).await;
    let grace = app.employee("Grace", "grace@lunch.io", false).await;
    let alan = app.employee("Alan", "alan@lunch.io", false).await;
    let admin_token = app.token(&admin);
    let grace_token = app.token(&grace);
    let (_, menu_id) = app.restaurant_with_menu(&admin_token, "McDonalds").await;

    let (_, body) = app
        .send(
            Method::POST,
            "/api/choices/",
            Some(&grace_token),
            Some(json!({ "menu_id": menu_id })),
        )
        .await;
    let choice_id = body["id"].as_i64().unwrap();

    let (status, _) = app
        .send(
            Method::DELETE,
            &format!("/api/employees/{}", alan.id),
            Some(&grace_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (status, body) = app
        .send(
            Method::DELETE,
            &format!("/api/employees/{}", grace.id),
            Some(&grace_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Deleted");

    let (status, _) = app
        .send(
            Method::GET,
            &format!("/api/employees/{}", grace.id),
            Some(&admin_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app
        .send(Method::GET, "/api/employees/inactive", Some(&admin_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["id"], grace.id);
    assert_eq!(body[0]["is_active"], false);

    let (status, _) = app
        .send(Method::GET, "/api/employees/inactive", Some(&app.token(&alan)), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, body) = app
        .send(Method::GET, &format!("/api/choices/{}", choice_id), None, None)
        .await;
    assert_eq!(body["employee"], json!({}));

    let (_, body) = app
        .send(Method::GET, "/api/employees/", Some(&admin_token), None)
        .await;
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|employee| employee["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![admin.id as i64, alan.id as i64]);
}

#[tokio::test]
#[serial]
async fn test_registration_refresh_and_logout() {
    let app = app_or_skip!();

    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/registration",
            None,
            Some(json!({
                "firstname": "John",
                "lastname": "Doe",
                "email": "john@doe.io",
                "password": "password",
                "is_admin": false
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let access = body["access_token"].as_str().unwrap().to_string();
    let refresh = body["refresh_token"].as_str().unwrap().to_string();

    let (status, _) = app
        .send(
            Method::POST,
            "/api/auth/registration",
            None,
            Some(json!({
                "firstname": "John",
                "lastname": "Again",
                "email": "john@doe.io",
                "password": "password",
                "is_admin": false
            })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": "john@doe.io", "password": "wrong" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app
        .send(Method::POST, "/api/auth/refresh", Some(&refresh), None)
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["access_token"].is_string());

    let (status, _) = app
        .send(Method::POST, "/api/auth/logout-access", Some(&access), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .send(Method::GET, "/api/employees/current", Some(&access), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Token has been revoked");

    let (status, _) = app
        .send(Method::POST, "/api/auth/logout-refresh", Some(&refresh), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app
        .send(Method::POST, "/api/auth/refresh", Some(&refresh), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial]
async fn test_refresh_picks_up_promotion() {
    let app = app_or_skip!();
    let admin = app.employee("Ada", "ada@lunch.io", true).await;
    let grace = app.employee("Grace", "grace@lunch.io", false).await;
    let refresh = app.jwt.generate_refresh_token(&grace).unwrap();

    let (status, _) = app
        .send(
            Method::PATCH,
            &format!("/api/employees/{}", grace.id),
            Some(&app.token(&admin)),
            Some(json!({ "is_admin": true })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .send(Method::POST, "/api/auth/refresh", Some(&refresh), None)
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let access = body["access_token"].as_str().unwrap();
    let claims = app.jwt.validate_token(access).unwrap();
    assert_eq!(claims.sub, "grace@lunch.io");
    assert!(claims.groups.contains(&Group::Admin));
    assert!(claims.is_admin());

    let (status, _) = app
        .send(Method::GET, "/api/employees/inactive", Some(access), None)
        .await;
    assert_eq!(status, StatusCode::OK);
}
