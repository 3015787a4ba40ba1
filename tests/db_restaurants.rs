mod common;

use chopwave::db::{RepositoryError, RestaurantOperations};
use chopwave::models::restaurant::{NewRestaurant, UpdateRestaurant};

fn new_restaurant(name: &str) -> NewRestaurant {
    NewRestaurant {
        name: name.to_string(),
        address: Some("Avenue Kennedy, Yaounde".to_string()),
        phone_number: None,
        whatsapp_number: None,
        description: None,
        cuisine_type: Some("grillades".to_string()),
        latitude: None,
        longitude: None,
        is_active: true,
    }
}

fn empty_update() -> UpdateRestaurant {
    UpdateRestaurant {
        name: None,
        address: None,
        phone_number: None,
        whatsapp_number: None,
        description: None,
        cuisine_type: None,
        latitude: None,
        longitude: None,
        is_active: None,
        owner_id: None,
    }
}

#[actix_rt::test]
async fn create_then_get_round_trips() {
    let Some(db) = common::setup_pool() else {
        return;
    };
    let restaurant_ops = RestaurantOperations::new(db.pool.clone());

    let created = restaurant_ops
        .create_restaurant(new_restaurant("Le Braiseur"))
        .expect("create restaurant");
    assert!(created.is_active);
    assert!(created.id > 0);

    let fetched = restaurant_ops
        .get_restaurant(created.id)
        .expect("get restaurant");
    assert_eq!(fetched.name, "Le Braiseur");
    assert_eq!(fetched.cuisine_type.as_deref(), Some("grillades"));
}

#[actix_rt::test]
async fn partial_update_touches_only_supplied_fields() {
    let Some(db) = common::setup_pool() else {
        return;
    };
    let restaurant_ops = RestaurantOperations::new(db.pool.clone());

    let created = restaurant_ops
        .create_restaurant(new_restaurant("Mama Put"))
        .expect("create restaurant");

    let updated = restaurant_ops
        .update_restaurant(
            created.id,
            UpdateRestaurant {
                description: Some("Street food institution".to_string()),
                ..empty_update()
            },
        )
        .expect("update restaurant");
    assert_eq!(updated.name, "Mama Put");
    assert_eq!(
        updated.description.as_deref(),
        Some("Street food institution")
    );
    assert_eq!(updated.address, created.address);
}

#[actix_rt::test]
async fn empty_update_payload_is_rejected() {
    let Some(db) = common::setup_pool() else {
        return;
    };
    let restaurant_ops = RestaurantOperations::new(db.pool.clone());

    let created = restaurant_ops
        .create_restaurant(new_restaurant("Saveurs du Wouri"))
        .expect("create restaurant");

    let err = restaurant_ops
        .update_restaurant(created.id, empty_update())
        .expect_err("empty update must be rejected");
    assert!(matches!(err, RepositoryError::ValidationError(_)), "{err}");
}

#[actix_rt::test]
async fn update_of_missing_restaurant_is_not_found() {
    let Some(db) = common::setup_pool() else {
        return;
    };
    let restaurant_ops = RestaurantOperations::new(db.pool.clone());

    let err = restaurant_ops
        .update_restaurant(
            4242,
            UpdateRestaurant {
                name: Some("Ghost Kitchen".to_string()),
                ..empty_update()
            },
        )
        .expect_err("unknown id");
    assert!(matches!(err, RepositoryError::NotFound(_)), "{err}");
}

#[actix_rt::test]
async fn soft_delete_hides_and_is_idempotent() {
    let Some(db) = common::setup_pool() else {
        return;
    };
    let restaurant_ops = RestaurantOperations::new(db.pool.clone());

    let created = restaurant_ops
        .create_restaurant(new_restaurant("Chez Pierre"))
        .expect("create restaurant");

    restaurant_ops
        .soft_delete_restaurant(created.id)
        .expect("first delete");
    // Deleting again succeeds without changing anything.
    restaurant_ops
        .soft_delete_restaurant(created.id)
        .expect("second delete is a no-op");

    let err = restaurant_ops
        .get_restaurant(created.id)
        .expect_err("inactive restaurants are hidden from reads");
    assert!(matches!(err, RepositoryError::NotFound(_)), "{err}");

    let listed = restaurant_ops.list_restaurants().expect("list restaurants");
    assert!(listed.iter().all(|r| r.id != created.id));

    let err = restaurant_ops
        .soft_delete_restaurant(31337)
        .expect_err("unknown id");
    assert!(matches!(err, RepositoryError::NotFound(_)), "{err}");
}

#[actix_rt::test]
async fn soft_deleted_restaurant_can_be_reactivated() {
    let Some(db) = common::setup_pool() else {
        return;
    };
    let restaurant_ops = RestaurantOperations::new(db.pool.clone());

    let created = restaurant_ops
        .create_restaurant(new_restaurant("Phoenix Grill"))
        .expect("create restaurant");
    restaurant_ops
        .soft_delete_restaurant(created.id)
        .expect("delete");

    let revived = restaurant_ops
        .update_restaurant(
            created.id,
            UpdateRestaurant {
                is_active: Some(true),
                ..empty_update()
            },
        )
        .expect("reactivate");
    assert!(revived.is_active);

    restaurant_ops
        .get_restaurant(created.id)
        .expect("visible again");
}
