//! Typed wrappers and the composite views built on them.

mod common;

use common::Harness;
use pretty_assertions::assert_eq;
use serde_json::json;
use vin_client::{ClientError, FilePart};
use vin_core::entities::{ComponentPatch, NewComponent, NewComponentType};
use vin_core::enums::{
    ComponentAttribute, Condition, FilterAttribute, OperationType, SortOption, SortOrder, Status,
};
use vin_core::filter::ComponentFilter;
use vin_core::responses::AttributeValue;
use vin_core::ValidationError;

fn component(id: i64, status: &str, serial: &str) -> serde_json::Value {
    json!({
        "id": id,
        "status": status,
        "brand": "Lenovo",
        "model": "T14",
        "typeId": 1,
        "serialNumber": serial,
        "condition": "Functioning",
        "ram": 16
    })
}

fn user(id: &str, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "firstName": name,
        "lastName": "Tester",
        "email": format!("{id}@example.com"),
        "displayName": format!("{name} Tester")
    })
}

fn laptop_type() -> serde_json::Value {
    json!({"id": 1, "name": "Laptop", "attributes": ["serialNumber", "brand", "ram"]})
}

#[tokio::test]
async fn list_query_follows_filter_order() {
    let h = Harness::signed_in();
    h.api.on("GET", "/components", 200, json!([]));

    let filter = ComponentFilter {
        search: Some("mac book".into()),
        brand: Some("Apple".into()),
        status: Some(Status::BeingUsed),
        type_id: Some(2),
        ram: Some(16),
        serial_number: Some(String::new()),
        sort: Some(SortOption::Ram),
        order: Some(SortOrder::Desc),
        ..ComponentFilter::default()
    };
    let components = h.client.list_components(&filter).await.expect("list");
    assert!(components.is_empty());

    let seen = h.api.requests_to("GET", "/components");
    assert_eq!(
        seen[0].url,
        "/components?type_id=2&status=Being%20Used&brand=Apple&ram=16&search=mac%20book&sort=ram&order=desc"
    );
}

#[tokio::test]
async fn null_listing_reads_as_empty() {
    let h = Harness::signed_in();
    h.api.on_raw("GET", "/components", 200, "null");
    let components = h
        .client
        .list_components(&ComponentFilter::default())
        .await
        .expect("list");
    assert!(components.is_empty());
}

#[tokio::test]
async fn assignees_are_fetched_only_for_components_in_use() {
    let h = Harness::signed_in();
    h.api
        .on(
            "GET",
            "/components",
            200,
            json!([
                component(1, "Being Used", "A"),
                component(2, "Ready to Use", "B"),
                component(3, "Being Used", "C")
            ]),
        )
        .on(
            "GET",
            "/components/1/last-interactant",
            200,
            json!({"lastInteractantUser": user("u-1", "Ada"), "componentStatus": "Being Used"}),
        )
        .on(
            "GET",
            "/components/3/last-interactant",
            404,
            json!({"error": "No interaction found for this component"}),
        );

    let components = h
        .client
        .list_components_with_assignees(&ComponentFilter::default())
        .await
        .expect("list");

    assert_eq!(components.len(), 3);
    assert_eq!(components[0].user.as_ref().map(|u| u.id.as_str()), Some("u-1"));
    assert!(components[1].user.is_none());
    assert!(components[2].user.is_none());
    assert_eq!(h.api.count("GET", "/components/2/last-interactant"), 0);
}

#[tokio::test]
async fn details_tolerate_failed_sub_lookups() {
    let h = Harness::signed_in();
    h.api
        .on("GET", "/components/1", 200, component(1, "Being Used", "A"))
        .on("GET", "/types/1", 200, laptop_type())
        .on(
            "GET",
            "/components/1/last-interactant",
            200,
            json!({"lastInteractantUser": user("u-1", "Ada"), "componentStatus": "Being Used"}),
        )
        .on("GET", "/components/1/image", 500, json!({"error": "storage down"}));

    let details = h.client.component_details(1).await.expect("details");
    assert_eq!(details.component.serial_number, "A");
    assert_eq!(details.component_type.map(|t| t.name).as_deref(), Some("Laptop"));
    assert_eq!(details.last_interactant.map(|u| u.id).as_deref(), Some("u-1"));
    assert!(details.images.is_empty());
}

#[tokio::test]
async fn details_skip_interactant_when_not_in_use() {
    let h = Harness::signed_in();
    h.api
        .on("GET", "/components/2", 200, component(2, "Ready to Use", "B"))
        .on("GET", "/types/1", 200, laptop_type())
        .on(
            "GET",
            "/components/2/image",
            200,
            json!({"images": ["https://img/1.png"]}),
        );

    let details = h.client.component_details(2).await.expect("details");
    assert!(details.last_interactant.is_none());
    assert_eq!(details.images, vec!["https://img/1.png".to_string()]);
    assert_eq!(h.api.count("GET", "/components/2/last-interactant"), 0);
}

#[tokio::test]
async fn history_entries_are_enriched_with_users_newest_first() {
    let h = Harness::signed_in();
    h.api
        .on(
            "GET",
            "/components/1/inventory-history",
            200,
            json!([
                {"id": 1, "createdAt": "2024-01-01T00:00:00Z", "componentId": 1, "userId": "u-1", "operationType": "Added", "userName": "Ada Tester"},
                {"id": 2, "createdAt": "2024-03-01T00:00:00Z", "componentId": 1, "userId": "gone", "operationType": "Assigned", "userName": "Old Name"},
                {"id": 3, "createdAt": "2024-02-01T00:00:00Z", "componentId": 1, "userId": "u-1", "operationType": "Returned", "userName": "Ada Tester"}
            ]),
        )
        .on("GET", "/auth/users/u-1", 200, user("u-1", "Ada"))
        .on("GET", "/auth/users/gone", 500, json!({"error": "Request_ResourceNotFound"}));

    let history = h
        .client
        .component_history_with_users(1)
        .await
        .expect("history");
    let ids: Vec<i64> = history.iter().map(|entry| entry.id).collect();
    assert_eq!(ids, vec![2, 3, 1]);
    assert!(history[0].user.is_none());
    assert_eq!(history[0].actor_label(), "Old Name");
    assert_eq!(history[2].actor_label(), "Ada Tester");
}

#[tokio::test]
async fn user_history_carries_serials_newest_first() {
    let h = Harness::signed_in();
    h.api
        .on(
            "GET",
            "/users/u-1/inventory-history",
            200,
            json!([
                {"id": 1, "createdAt": "2024-01-01T00:00:00Z", "componentId": 1, "userId": "u-1", "operationType": "Assigned", "userName": ""},
                {"id": 2, "createdAt": "2024-03-01T00:00:00Z", "componentId": 3, "userId": "u-1", "operationType": "Returned", "userName": ""}
            ]),
        )
        .on("GET", "/components/1", 200, component(1, "Being Used", "SN-1"))
        .on("GET", "/components/3", 404, json!({"error": "Component not found"}));

    let history = h
        .client
        .user_history_with_serials("u-1")
        .await
        .expect("history");
    assert_eq!(history[0].entry.id, 2);
    assert!(history[0].component_serial_number.is_none());
    assert_eq!(history[1].component_serial_number.as_deref(), Some("SN-1"));
}

#[tokio::test]
async fn users_get_photos_when_available() {
    let h = Harness::signed_in();
    h.api
        .on("POST", "/auth/users", 200, json!([user("u-1", "Ada"), user("u-2", "Bob")]))
        .on(
            "GET",
            "/auth/users/u-1/photo",
            200,
            json!({"photoUrl": "data:image/jpeg;base64,AAAA"}),
        )
        .on("GET", "/auth/users/u-2/photo", 500, json!({"error": "no photo"}));

    let users = h.client.list_users_with_photos().await.expect("users");
    assert_eq!(
        users[0].photo_url.as_deref(),
        Some("data:image/jpeg;base64,AAAA")
    );
    assert!(users[1].photo_url.is_none());
}

#[tokio::test]
async fn assign_records_history_entry() {
    let h = Harness::signed_in();
    h.api.on(
        "POST",
        "/inventory-history",
        201,
        json!({"id": 9, "createdAt": "2024-05-01T00:00:00Z", "componentId": 5, "userId": "u-1", "operationType": "Assigned", "userName": "Ada Tester"}),
    );

    let entry = h.client.assign_component(5, "u-1").await.expect("assign");
    assert_eq!(entry.operation_type, OperationType::Assigned);

    let seen = h.api.requests_to("POST", "/inventory-history");
    let body: serde_json::Value = serde_json::from_str(&seen[0].body).unwrap();
    assert_eq!(body["componentId"], 5);
    assert_eq!(body["userId"], "u-1");
    assert_eq!(body["operationType"], "Assigned");
    assert_eq!(body["userName"], "");
}

#[tokio::test]
async fn return_records_against_last_interactant() {
    let h = Harness::signed_in();
    h.api
        .on(
            "GET",
            "/components/5/last-interactant",
            200,
            json!({"lastInteractantUser": user("u-1", "Ada"), "componentStatus": "Being Used"}),
        )
        .on(
            "POST",
            "/inventory-history",
            201,
            json!({"id": 10, "createdAt": "2024-05-02T00:00:00Z", "componentId": 5, "userId": "u-1", "operationType": "Returned", "userName": "Ada Tester"}),
        );

    let entry = h.client.return_component(5).await.expect("return");
    assert_eq!(entry.operation_type, OperationType::Returned);
    let body: serde_json::Value =
        serde_json::from_str(&h.api.requests_to("POST", "/inventory-history")[0].body).unwrap();
    assert_eq!(body["userId"], "u-1");
}

#[tokio::test]
async fn return_without_assignee_fails_locally() {
    let h = Harness::signed_in();
    h.api.on(
        "GET",
        "/components/6/last-interactant",
        200,
        json!({"lastInteractantUser": user("u-1", "Ada"), "componentStatus": "Ready to Use"}),
    );

    let err = h.client.return_component(6).await.unwrap_err();
    assert!(matches!(err, ClientError::NotAssigned { component_id: 6 }));
    assert_eq!(err.to_string(), "component 6 has no assigned user");
    assert_eq!(h.api.count("POST", "/inventory-history"), 0);
}

#[tokio::test]
async fn unique_values_drop_blanks() {
    let h = Harness::signed_in();
    h.api
        .on("GET", "/components/ram/uniquevalue", 200, json!([8, 16, ""]))
        .on(
            "GET",
            "/components/brand/uniquevalue",
            200,
            json!(["Apple", "", "Dell"]),
        );

    let ram = h.client.unique_values(FilterAttribute::Ram).await.expect("ram");
    assert_eq!(ram, vec![AttributeValue::Integer(8), AttributeValue::Integer(16)]);

    let brands = h
        .client
        .unique_values(FilterAttribute::Brand)
        .await
        .expect("brands");
    assert_eq!(brands.len(), 2);
}

#[tokio::test]
async fn create_validates_against_type_before_posting() {
    let h = Harness::signed_in();
    h.api.on("GET", "/types/1", 200, laptop_type());

    let mut draft = NewComponent::of_type(1);
    draft.serial_number = "SN-9".into();
    let err = h
        .client
        .create_component(draft, "u-1")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Validation(ValidationError::MissingFields { .. })));
    assert_eq!(h.api.count("POST", "/components"), 0);
}

#[tokio::test]
async fn create_without_type_sends_nothing() {
    let h = Harness::signed_in();
    let err = h
        .client
        .create_component(NewComponent::of_type(0), "u-1")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Validation(ValidationError::MissingType)));
    assert!(h.api.requests().is_empty());
}

#[tokio::test]
async fn create_posts_component_with_acting_user() {
    let h = Harness::signed_in();
    h.api
        .on("GET", "/types/1", 200, laptop_type())
        .on("POST", "/components", 201, component(11, "Ready to Use", "SN-9"));

    let mut draft = NewComponent::of_type(1);
    draft.serial_number = "SN-9".into();
    draft.brand = "Lenovo".into();
    draft.ram = Some(16);
    let created = h.client.create_component(draft, "u-1").await.expect("create");
    assert_eq!(created.id, 11);

    let body: serde_json::Value =
        serde_json::from_str(&h.api.requests_to("POST", "/components")[0].body).unwrap();
    assert_eq!(body["userId"], "u-1");
    assert_eq!(body["component"]["serialNumber"], "SN-9");
    assert_eq!(body["component"]["status"], "Ready to Use");
}

#[tokio::test]
async fn update_applies_patch_and_puts_full_component() {
    let h = Harness::signed_in();
    h.api
        .on("GET", "/components/1", 200, component(1, "Ready to Use", "A"))
        .on("GET", "/types/1", 200, laptop_type())
        .on("PUT", "/components/1", 200, component(1, "Ready to Use", "A"));

    let patch = ComponentPatch {
        condition: Some(Condition::Broken),
        ram: Some(32),
        ..ComponentPatch::default()
    };
    h.client.update_component(1, patch).await.expect("update");

    let body: serde_json::Value =
        serde_json::from_str(&h.api.requests_to("PUT", "/components/1")[0].body).unwrap();
    assert_eq!(body["condition"], "Broken");
    assert_eq!(body["ram"], 32);
    assert_eq!(body["serialNumber"], "A");
    assert!(body.get("user").is_none());
}

#[tokio::test]
async fn update_rejects_non_positive_specs() {
    let h = Harness::signed_in();
    h.api.on("GET", "/components/1", 200, component(1, "Ready to Use", "A"));

    let patch = ComponentPatch {
        processor_cores: Some(0),
        ..ComponentPatch::default()
    };
    let err = h.client.update_component(1, patch).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(ValidationError::NotPositive { .. })));
    assert_eq!(h.api.count("PUT", "/components/1"), 0);
}

#[tokio::test]
async fn activation_paths_carry_acting_user() {
    let h = Harness::signed_in();
    h.api
        .on("PUT", "/components/4/deactivate/u-1", 200, json!({}))
        .on("PUT", "/components/4/activate/u-1", 200, json!({}));

    h.client.deactivate_component(4, "u-1").await.expect("deactivate");
    h.client.activate_component(4, "u-1").await.expect("activate");

    assert_eq!(h.api.count("PUT", "/components/4/deactivate/u-1"), 1);
    assert_eq!(h.api.count("PUT", "/components/4/activate/u-1"), 1);
}

#[tokio::test]
async fn images_upload_as_multipart_image_parts() {
    let h = Harness::signed_in();
    h.api.on(
        "POST",
        "/components/3/image",
        200,
        json!({"message": "Images uploaded successfully"}),
    );

    let message = h
        .client
        .upload_images(
            3,
            vec![FilePart {
                field: "image",
                file_name: "front.png".into(),
                content_type: Some("image/png".into()),
                bytes: b"png-bytes".to_vec(),
            }],
        )
        .await
        .expect("upload");
    assert_eq!(message.message, "Images uploaded successfully");

    let seen = &h.api.requests_to("POST", "/components/3/image")[0];
    assert!(
        seen.content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("multipart/form-data"))
    );
    assert!(seen.body.contains(r#"name="image""#));
    assert!(seen.body.contains(r#"filename="front.png""#));
    assert!(seen.body.contains("png-bytes"));
}

#[tokio::test]
async fn delete_type_surfaces_conflict_message() {
    let h = Harness::signed_in();
    h.api.on(
        "DELETE",
        "/types/1",
        400,
        json!({"error": "Cannot delete component type; it is referenced by components"}),
    );

    let err = h.client.delete_type(1).await.unwrap_err();
    assert!(err.to_string().contains("referenced by components"));
}

#[tokio::test]
async fn types_round_trip_through_crud_endpoints() {
    let h = Harness::signed_in();
    h.api
        .on("GET", "/types", 200, json!(null))
        .on(
            "PUT",
            "/types/1",
            200,
            json!({"id": 1, "name": "Notebook", "attributes": ["brand"]}),
        );

    assert!(h.client.list_types().await.expect("types").is_empty());

    let body = NewComponentType::new("Notebook", &[ComponentAttribute::Brand]);
    let updated = h.client.update_type(1, &body).await.expect("update");
    assert_eq!(updated.name, "Notebook");

    let seen = &h.api.requests_to("PUT", "/types/1")[0];
    let sent: serde_json::Value = serde_json::from_str(&seen.body).expect("json body");
    assert_eq!(sent, json!({"name": "Notebook", "attributes": ["brand"]}));
}

#[tokio::test]
async fn blank_type_name_is_rejected_locally() {
    let h = Harness::signed_in();
    let err = h
        .client
        .create_type(&NewComponentType::new("  ", &[]))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Validation(ValidationError::BlankTypeName)));
    assert!(h.api.requests().is_empty());
}
