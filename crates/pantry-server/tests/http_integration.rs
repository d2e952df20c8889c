//! End-to-end tests: each test spawns a pantry server on 127.0.0.1:0 backed
//! by a temp data dir and an in-process fake of the recipe API.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use pantry_server::test_helpers::{spawn_test_server, test_router, TestServer};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn get(server: &TestServer, path: &str) -> (u16, Value) {
    let resp = reqwest::get(format!("{}{path}", server.base_url))
        .await
        .unwrap();
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap_or(Value::Null))
}

async fn post(server: &TestServer, path: &str, body: Value) -> (u16, Value) {
    let resp = reqwest::Client::new()
        .post(format!("{}{path}", server.base_url))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap_or(Value::Null))
}

#[tokio::test]
async fn home_and_health() {
    let server = spawn_test_server().await;
    let text = reqwest::get(&server.base_url)
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(text, "Hello, Pantry!");

    let (status, body) = get(&server, "/api/health").await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "ok");
}

// ---- Recipes ----

#[tokio::test]
async fn recipes_from_ingredients() {
    let server = spawn_test_server().await;

    let (status, body) = get(&server, "/recipes/getRecipesFromIngredients").await;
    assert_eq!(status, 400);
    assert_eq!(body, json!({"error": "No ingredients provided"}));

    let (status, body) = get(
        &server,
        "/recipes/getRecipesFromIngredients?ingredients=apples,flour",
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body[0]["title"], "apples,flour dish 1");
}

#[tokio::test]
async fn recommendations_follow_fridge() {
    let server = spawn_test_server().await;

    let (status, body) = get(
        &server,
        "/recipes/getRecipesFromIngredientsForRecommendations",
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body, json!([]));

    post(&server, "/recipes/addIngredient", json!({"ingredient": "kale"})).await;
    post(&server, "/recipes/addIngredient", json!({"ingredient": "garlic"})).await;
    let (_, body) = get(
        &server,
        "/recipes/getRecipesFromIngredientsForRecommendations",
    )
    .await;
    assert_eq!(body[0]["title"], "kale,garlic dish 1");
}

#[tokio::test]
async fn search_then_lookup_by_id() {
    let server = spawn_test_server().await;

    let (status, _) = get(&server, "/recipes/getRecipeById?id=716429").await;
    assert_eq!(status, 404);

    let (status, body) = get(
        &server,
        "/recipes/searchRecipe?recipe=pasta&cuisine=italian&diet=vegetarian&intolerances=dairy&recipe_type=main%20course",
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["results"][0]["title"], "pasta bowl");
    assert_eq!(body["number"], "3");

    let cache: Value =
        serde_json::from_slice(&std::fs::read(server.data_dir.join("recipes.json")).unwrap())
            .unwrap();
    assert_eq!(cache, body);

    let (status, body) = get(&server, "/recipes/getRecipeById?id=716429").await;
    assert_eq!(status, 200);
    assert_eq!(body["title"], "pasta bake");
}

#[tokio::test]
async fn recipe_information_and_bulk() {
    let server = spawn_test_server().await;

    let (status, body) = get(&server, "/recipes/getRecipeInformation/642583").await;
    assert_eq!(status, 200);
    assert_eq!(body["id"], 642583);

    let (status, body) = get(&server, "/recipes/getRecipeInformation/0").await;
    assert_eq!(status, 404);
    assert_eq!(body, json!({"error": "A recipe with the id 0 does not exist."}));

    let (status, body) = get(&server, "/recipes/getBulkRecipeInformation?ids=1,2,3").await;
    assert_eq!(status, 200);
    assert_eq!(body.as_array().unwrap().len(), 3);
    assert_eq!(body[2]["dishTypes"][0], "lunch");

    let (status, _) = get(&server, "/recipes/getBulkRecipeInformation?ids=").await;
    assert_eq!(status, 400);
}

// ---- Fridge ----

#[tokio::test]
async fn fridge_lifecycle() {
    let server = spawn_test_server().await;

    let (status, body) = get(&server, "/recipes/getFridge").await;
    assert_eq!(status, 200);
    assert_eq!(body, json!([]));

    let (status, body) = post(
        &server,
        "/recipes/addFridgeItem",
        json!({"name": "eggs", "quantity": 6, "imageUrl": "https://img.example/eggs.png"}),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Ingredient added");

    post(
        &server,
        "/recipes/addFridgeItem",
        json!({"name": "Eggs", "quantity": 6, "imageUrl": ""}),
    )
    .await;
    let (_, fridge) = get(&server, "/recipes/getFridge").await;
    assert_eq!(
        fridge,
        json!([{"name": "eggs", "quantity": 12, "imageUrl": "https://img.example/eggs.png"}])
    );

    let (_, names) = get(&server, "/recipes/getRecipes").await;
    assert_eq!(names, json!(["eggs"]));

    let (status, body) = post(
        &server,
        "/recipes/deleteIngredient",
        json!({"ingredient": "tofu"}),
    )
    .await;
    assert_eq!(status, 404);
    assert_eq!(body, json!({"error": "Ingredient not found"}));

    let (status, body) = post(
        &server,
        "/recipes/deleteIngredient",
        json!({"ingredient": "eggs"}),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Ingredient removed");
    assert_eq!(body["fridge"], json!([]));
}

#[tokio::test]
async fn fridge_rejects_blank_names() {
    let server = spawn_test_server().await;

    let (status, _) = post(&server, "/recipes/addFridgeItem", json!({"quantity": 2})).await;
    assert_eq!(status, 400);
    let (status, body) = post(&server, "/recipes/addIngredient", json!({})).await;
    assert_eq!(status, 400);
    assert_eq!(body, json!({"error": "No ingredient provided"}));
    let (status, _) = post(&server, "/recipes/deleteIngredient", json!({"ingredient": ""})).await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn fridge_file_is_csv() {
    let server = spawn_test_server().await;
    post(
        &server,
        "/recipes/addFridgeItem",
        json!({"name": "cheddar, aged", "quantity": 1}),
    )
    .await;

    let raw = std::fs::read_to_string(server.data_dir.join("fridge.csv")).unwrap();
    assert_eq!(raw, "name,quantity,imageUrl\n\"cheddar, aged\",1,\n");
}

// ---- Lobbies ----

#[tokio::test]
async fn dietary_info_flow() {
    let server = spawn_test_server().await;

    let (status, body) = post(
        &server,
        "/submit-dietary-info/abc123",
        json!({"name": "Ada", "email": "not-an-email", "allergies": [], "dietaryRestrictions": []}),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body, json!({"error": "Invalid email format"}));

    let (status, body) = post(
        &server,
        "/submit-dietary-info/abc123",
        json!({"name": "Ada", "email": "ada@example.com", "allergies": ["Nuts"], "dietaryRestrictions": ["Vegan"]}),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(body["entry"]["lobbyId"], "abc123");

    post(
        &server,
        "/submit-dietary-info/abc123",
        json!({"name": "Bob", "email": "bob@example.com", "allergies": ["Soy"]}),
    )
    .await;

    let (_, body) = get(&server, "/list-users").await;
    assert_eq!(body, json!({"users": ["Ada", "Bob"]}));

    let (status, body) = get(&server, "/get-user-preferences?name=Ada").await;
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({"name": "Ada", "email": "ada@example.com", "allergies": ["Nuts"], "dietaryRestrictions": ["Vegan"]})
    );

    let (status, body) = get(&server, "/get-user-preferences?name=Ada%20").await;
    assert_eq!(status, 200);
    assert_eq!(body["email"], "ada@example.com");

    let (status, body) = get(&server, "/get-user-preferences?name=Nobody").await;
    assert_eq!(status, 404);
    assert_eq!(body, json!({"error": "User preferences not found"}));

    let (status, body) = get(&server, "/lobbies/abc123").await;
    assert_eq!(status, 200);
    assert_eq!(body["participants"], json!(["Ada", "Bob"]));
    assert_eq!(body["allergies"], json!(["Nuts", "Soy"]));
    assert!(body["lobby"].is_null());
}

#[tokio::test]
async fn create_lobby_then_fetch() {
    let server = spawn_test_server().await;

    let (status, lobby) = post(
        &server,
        "/lobbies",
        json!({"name": "Sunday brunch", "date": "2026-11-08"}),
    )
    .await;
    assert_eq!(status, 201);
    let id = lobby["id"].as_str().unwrap().to_string();
    assert_eq!(lobby["link"], format!("/dietary-form/{id}"));

    let (status, summary) = get(&server, &format!("/lobbies/{id}")).await;
    assert_eq!(status, 200);
    assert_eq!(summary["lobby"]["name"], "Sunday brunch");
    assert_eq!(summary["participants"], json!([]));

    let (status, _) = get(&server, "/lobbies/unknown").await;
    assert_eq!(status, 404);
}

// ---- Flyers ----

#[tokio::test]
async fn groceries_reads_flyer_output() {
    let server = spawn_test_server().await;

    let (status, body) = get(&server, "/recipes/groceries").await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({}));

    std::fs::write(
        server.data_dir.join("groceries.json"),
        r#"{"iga": [{"name": "Strawberries", "price": 2.99}]}"#,
    )
    .unwrap();
    let (_, body) = get(&server, "/recipes/groceries").await;
    assert_eq!(body["iga"][0]["name"], "Strawberries");
}

// ---- Router-level ----

#[tokio::test]
async fn recipe_routes_without_api_key_fail() {
    let (app, _dir) = test_router();
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/recipes/getRecipeInformation/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value =
        serde_json::from_slice(&to_bytes(resp.into_body(), usize::MAX).await.unwrap()).unwrap();
    assert_eq!(body, json!({"error": "recipe API key not configured"}));
}

#[tokio::test]
async fn cors_preflight_is_answered() {
    let (app, _dir) = test_router();
    let resp = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/recipes/addFridgeItem")
                .header("origin", "http://localhost:5173")
                .header("access-control-request-method", "POST")
                .header("access-control-request-headers", "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()["access-control-allow-origin"],
        "*"
    );
}
