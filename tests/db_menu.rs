mod common;

use chopwave::db::{DbConnection, MenuOperations, RepositoryError, RestaurantOperations};
use chopwave::models::menu::{NewMenuItem, UpdateMenuItem};
use chopwave::test_utils::{insert_restaurant, seed_menu_item};

fn new_item(name: &str, price: f64) -> NewMenuItem {
    NewMenuItem {
        name: name.to_string(),
        description: None,
        price,
        category: Some("plat principal".to_string()),
        image_url: None,
        is_available: true,
    }
}

fn empty_update() -> UpdateMenuItem {
    UpdateMenuItem {
        name: None,
        description: None,
        price: None,
        category: None,
        image_url: None,
        is_available: None,
    }
}

#[actix_rt::test]
async fn create_under_missing_or_inactive_restaurant_is_not_found() {
    let Some(db) = common::setup_pool() else {
        return;
    };
    let menu_ops = MenuOperations::new(db.pool.clone());

    let err = menu_ops
        .add_menu_item(555, new_item("Eru", 1800.0))
        .expect_err("missing parent");
    assert!(matches!(err, RepositoryError::NotFound(_)), "{err}");

    let mut conn = DbConnection::new(&db.pool).expect("db connection");
    let inactive_id =
        insert_restaurant(conn.connection(), "Closed Kitchen", false).expect("seed restaurant");

    let err = menu_ops
        .add_menu_item(inactive_id, new_item("Eru", 1800.0))
        .expect_err("inactive parent");
    assert!(matches!(err, RepositoryError::NotFound(_)), "{err}");
}

#[actix_rt::test]
async fn listing_filters_unavailable_items() {
    let Some((db, fixtures)) = common::setup_pool_with_fixtures() else {
        return;
    };
    let menu_ops = MenuOperations::new(db.pool.clone());

    let mut conn = DbConnection::new(&db.pool).expect("db connection");
    let retired = seed_menu_item(
        conn.connection(),
        fixtures.restaurant_id,
        "Retired Dish",
        1000.0,
        false,
    )
    .expect("seed unavailable item");

    let items = menu_ops
        .list_menu_items(fixtures.restaurant_id)
        .expect("list items");
    assert_eq!(items.len(), fixtures.menu_item_ids.len());
    assert!(items.iter().all(|item| item.id != retired));
}

#[actix_rt::test]
async fn get_hides_items_of_inactive_restaurants() {
    let Some((db, fixtures)) = common::setup_pool_with_fixtures() else {
        return;
    };
    let menu_ops = MenuOperations::new(db.pool.clone());
    let restaurant_ops = RestaurantOperations::new(db.pool.clone());

    let item_id = fixtures.menu_item_ids[0];
    menu_ops.get_menu_item(item_id).expect("visible item");

    restaurant_ops
        .soft_delete_restaurant(fixtures.restaurant_id)
        .expect("deactivate parent");

    let err = menu_ops
        .get_menu_item(item_id)
        .expect_err("parent inactive hides the item");
    assert!(matches!(err, RepositoryError::NotFound(_)), "{err}");
}

#[actix_rt::test]
async fn update_is_forbidden_when_parent_is_inactive() {
    let Some((db, fixtures)) = common::setup_pool_with_fixtures() else {
        return;
    };
    let menu_ops = MenuOperations::new(db.pool.clone());
    let restaurant_ops = RestaurantOperations::new(db.pool.clone());

    let item_id = fixtures.menu_item_ids[0];

    let err = menu_ops
        .update_menu_item(item_id, empty_update())
        .expect_err("empty update");
    assert!(matches!(err, RepositoryError::ValidationError(_)), "{err}");

    let updated = menu_ops
        .update_menu_item(
            item_id,
            UpdateMenuItem {
                price: Some(2800.0),
                ..empty_update()
            },
        )
        .expect("price update");
    assert_eq!(updated.price, 2800.0);

    restaurant_ops
        .soft_delete_restaurant(fixtures.restaurant_id)
        .expect("deactivate parent");

    let err = menu_ops
        .update_menu_item(
            item_id,
            UpdateMenuItem {
                price: Some(3000.0),
                ..empty_update()
            },
        )
        .expect_err("updates under an inactive parent are blocked");
    assert!(matches!(err, RepositoryError::Forbidden(_)), "{err}");
}

#[actix_rt::test]
async fn soft_delete_is_idempotent() {
    let Some((db, fixtures)) = common::setup_pool_with_fixtures() else {
        return;
    };
    let menu_ops = MenuOperations::new(db.pool.clone());

    let item_id = fixtures.menu_item_ids[1];
    menu_ops.remove_menu_item(item_id).expect("first delete");
    menu_ops
        .remove_menu_item(item_id)
        .expect("second delete is a no-op");

    let items = menu_ops
        .list_menu_items(fixtures.restaurant_id)
        .expect("list items");
    assert!(items.iter().all(|item| item.id != item_id));

    let err = menu_ops
        .remove_menu_item(98765)
        .expect_err("unknown id");
    assert!(matches!(err, RepositoryError::NotFound(_)), "{err}");
}
