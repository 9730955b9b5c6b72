mod common;

use axum::http::{Method, StatusCode};
use rstest::rstest;
use serde_json::{json, Value};

use common::{response_json, TestApp};

fn item_body(name: &str, quantity: Value) -> Value {
    json!({ "name": name, "category": "Fasteners", "quantity": quantity })
}

#[tokio::test]
async fn inventory_item_lifecycle() {
    let app = TestApp::new().await;
    let supplier = app.seed_supplier("Acme").await;
    let acting = supplier.to_string();

    let response = app
        .request(
            Method::POST,
            "/inventory",
            Some(item_body("Hex bolt M8", json!(25))),
            Some(&acting),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = response_json(response).await;
    assert_eq!(created["message"], "Inventory item created successfully");
    assert_eq!(created["data"]["supplier_id"], supplier);
    let id = created["data"]["id"].as_i64().expect("item id");

    let response = app
        .request(
            Method::PUT,
            &format!("/inventory/{}", id),
            Some(item_body("Hex bolt M8", json!(40))),
            Some(&acting),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await["data"]["quantity"], 40);

    let listed = response_json(
        app.request(Method::GET, "/inventory", None, Some(&acting))
            .await,
    )
    .await;
    assert_eq!(listed["data"].as_array().map(Vec::len), Some(1));

    let response = app
        .request(Method::DELETE, &format!("/inventory/{}", id), None, Some(&acting))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await["data"]["id"], id);

    let response = app.get(&format!("/inventory/{}", id)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response_json(response).await["message"],
        "Inventory item not found"
    );
}

#[rstest]
#[case::missing(None)]
#[case::non_numeric(Some("abc"))]
#[case::zero(Some("0"))]
#[case::negative(Some("-4"))]
#[tokio::test]
async fn create_requires_a_valid_supplier_header(#[case] header: Option<&str>) {
    let app = TestApp::new().await;

    let response = app
        .request(Method::POST, "/inventory", Some(item_body("Bolt", json!(1))), header)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response_json(response).await["message"],
        "Supplier ID is required in header (X-Supplier-ID)"
    );
}

#[tokio::test]
async fn unknown_acting_supplier_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request(Method::POST, "/inventory", Some(item_body("Bolt", json!(1))), Some("99"))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response_json(response).await["message"], "Supplier does not exist");

    let response = app.request(Method::GET, "/inventory", None, Some("99")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn quantity_rules() {
    let app = TestApp::new().await;
    let acting = app.seed_supplier("Acme").await.to_string();

    let response = app
        .request(Method::POST, "/inventory", Some(item_body("Bolt", json!(-1))), Some(&acting))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response_json(response).await["message"],
        "Quantity must be a non-negative number"
    );

    let response = app
        .request(
            Method::POST,
            "/inventory",
            Some(json!({ "name": "Washer", "category": "Fasteners" })),
            Some(&acting),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response_json(response).await["data"]["quantity"], 0);
}

#[tokio::test]
async fn body_supplier_id_does_not_change_ownership() {
    let app = TestApp::new().await;
    let owner = app.seed_supplier("Acme").await;
    let other = app.seed_supplier("Globex").await;

    let response = app
        .request(
            Method::POST,
            "/inventory",
            Some(json!({ "name": "Bolt", "category": "Fasteners", "supplier_id": other })),
            Some(&owner.to_string()),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response_json(response).await["data"]["supplier_id"], owner);
}

#[tokio::test]
async fn non_owner_cannot_modify_item() {
    let app = TestApp::new().await;
    let owner = app.seed_supplier("Acme").await;
    let intruder = app.seed_supplier("Globex").await.to_string();
    let id = app.seed_item(owner, "Bolt", 7).await;
    let uri = format!("/inventory/{}", id);

    let response = app
        .request(Method::PUT, &uri, Some(item_body("Stolen", json!(0))), Some(&intruder))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        response_json(response).await["message"],
        "Inventory item does not belong to this supplier"
    );

    let response = app.request(Method::DELETE, &uri, None, Some(&intruder)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app.request(Method::GET, &uri, None, Some(&intruder)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let item = response_json(app.get(&uri).await).await;
    assert_eq!(item["data"]["name"], "Bolt");
    assert_eq!(item["data"]["quantity"], 7);
    assert_eq!(item["data"]["supplier_id"], owner);
}

#[tokio::test]
async fn ownership_and_existence_are_checked_before_the_body() {
    let app = TestApp::new().await;
    let owner = app.seed_supplier("Acme").await;
    let owner_header = owner.to_string();
    let intruder = app.seed_supplier("Globex").await.to_string();
    let id = app.seed_item(owner, "Bolt", 7).await;
    let uri = format!("/inventory/{}", id);

    let response = app
        .request(Method::PUT, &uri, Some(json!({ "quantity": "abc" })), Some(&intruder))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .request(Method::PUT, "/inventory/999", Some(json!({ "name": 5 })), Some(&owner_header))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response_json(response).await["message"], "Inventory item not found");

    let response = app
        .request(Method::PUT, &uri, Some(json!({ "quantity": "abc" })), Some(&owner_header))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let item = response_json(app.get(&uri).await).await;
    assert_eq!(item["data"]["name"], "Bolt");
    assert_eq!(item["data"]["quantity"], 7);
}

#[tokio::test]
async fn null_required_fields_are_itemized() {
    let app = TestApp::new().await;
    let supplier = app.seed_supplier("Acme").await.to_string();

    let response = app
        .request(
            Method::POST,
            "/inventory",
            Some(json!({ "name": null, "category": null })),
            Some(&supplier),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response_json(response).await["errors"],
        json!(["Category is required", "Name is required"])
    );
}

#[tokio::test]
async fn list_is_scoped_to_acting_supplier() {
    let app = TestApp::new().await;
    let acme = app.seed_supplier("Acme").await;
    let globex = app.seed_supplier("Globex").await;
    app.seed_item(acme, "Bolt", 1).await;
    app.seed_item(acme, "Nut", 2).await;
    app.seed_item(globex, "Washer", 3).await;

    let all = response_json(app.get("/inventory").await).await;
    assert_eq!(all["data"].as_array().map(Vec::len), Some(3));

    let scoped = response_json(
        app.request(Method::GET, "/inventory", None, Some(&globex.to_string()))
            .await,
    )
    .await;
    let names: Vec<&str> = scoped["data"]
        .as_array()
        .expect("items")
        .iter()
        .filter_map(|item| item["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Washer"]);
}

async fn filtered_quantities(app: &TestApp, query: &str) -> Vec<i64> {
    let response = app.get(&format!("/inventory/filter{}", query)).await;
    assert_eq!(response.status(), StatusCode::OK, "query {}", query);
    let mut quantities: Vec<i64> = response_json(response).await["data"]
        .as_array()
        .expect("items")
        .iter()
        .filter_map(|item| item["quantity"].as_i64())
        .collect();
    quantities.sort_unstable();
    quantities
}

#[tokio::test]
async fn stock_filters_partition_by_quantity() {
    let app = TestApp::new().await;
    let supplier = app.seed_supplier("Acme").await;
    for (n, quantity) in [0, 3, 9, 10, 50].into_iter().enumerate() {
        app.seed_item(supplier, &format!("Part {}", n), quantity).await;
    }

    assert_eq!(filtered_quantities(&app, "?stock=low").await, vec![0, 3, 9]);
    assert_eq!(filtered_quantities(&app, "?stock=out").await, vec![0]);
    assert_eq!(filtered_quantities(&app, "?stock=in").await, vec![3, 9, 10, 50]);
    assert_eq!(filtered_quantities(&app, "?stock=").await, vec![0, 3, 9, 10, 50]);
    assert_eq!(
        filtered_quantities(&app, "?category=Fasteners&stock=out").await,
        vec![0]
    );
    assert!(filtered_quantities(&app, "?category=Electrical").await.is_empty());

    let response = app.get("/inventory/filter?stock=bogus").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response_json(response).await["message"],
        "Invalid stock filter. Use low, out, or in"
    );
}

#[tokio::test]
async fn overlong_category_filter_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .get(&format!("/inventory/filter?category={}", "c".repeat(256)))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response_json(response).await["message"], "Invalid category");
}

#[tokio::test]
async fn supplier_delete_round_trip_clears_ownership() {
    let app = TestApp::new().await;
    let supplier = app.seed_supplier("Acme").await;
    let item = app.seed_item(supplier, "Bolt", 4).await;
    let uri = format!("/inventory/{}", item);

    let before = response_json(app.get(&uri).await).await;
    assert_eq!(before["data"]["supplier_id"], supplier);

    let response = app
        .request(Method::DELETE, &format!("/suppliers/{}", supplier), None, None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let after = response_json(app.get(&uri).await).await;
    assert_eq!(after["data"]["supplier_id"], Value::Null);
    assert_eq!(after["data"]["name"], "Bolt");
}
