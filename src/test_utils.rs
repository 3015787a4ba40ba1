//! Fixture helpers shared by the integration suites. Not part of the
//! service surface.

use std::time::{Duration, Instant};

use crate::db::{
    establish_connection_pool, run_db_migrations, DbConnection, RepositoryError,
};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::PgConnection;

pub const TEST_VERIFY_TOKEN: &str = "test-verify-token";

fn set_env_if_unset(key: &str, value: &str) {
    if std::env::var_os(key).is_none() {
        std::env::set_var(key, value);
    }
}

pub fn init_test_env() {
    set_env_if_unset("WHATSAPP_VERIFY_TOKEN", TEST_VERIFY_TOKEN);
    // Keep tests against an unreachable store fast.
    set_env_if_unset("DB_CONNECT_TIMEOUT_SECS", "2");
}

pub fn build_test_pool(database_url: &str) -> Pool<ConnectionManager<PgConnection>> {
    let pool = establish_connection_pool(database_url);

    // A freshly started dockerized postgres restarts once while
    // initializing; keep knocking until it accepts connections.
    let deadline = Instant::now() + Duration::from_secs(30);
    while let Err(e) = DbConnection::new(&pool) {
        if Instant::now() >= deadline {
            panic!("database never became ready: {e}");
        }
        std::thread::sleep(Duration::from_millis(250));
    }

    run_db_migrations(pool.clone()).expect("Unable to run migrations");
    pool
}

pub fn reset_db(pool: &Pool<ConnectionManager<PgConnection>>) -> Result<(), RepositoryError> {
    let mut conn = DbConnection::new(pool)?;
    diesel::sql_query(
        "TRUNCATE TABLE order_items, orders, menu_items, restaurants, users \
         RESTART IDENTITY CASCADE",
    )
    .execute(conn.connection())
    .map_err(RepositoryError::DatabaseError)?;
    Ok(())
}

pub struct TestFixtures {
    pub user_id: i32,
    pub restaurant_id: i32,
    pub menu_item_ids: Vec<i32>,
}

pub fn seed_basic_fixtures(
    pool: &Pool<ConnectionManager<PgConnection>>,
) -> Result<TestFixtures, RepositoryError> {
    let mut conn = DbConnection::new(pool)?;

    let user_id = insert_user(conn.connection(), "+237690000001", Some("Awa Client"))?;
    let restaurant_id = insert_restaurant(conn.connection(), "Chez Awa", true)?;
    let ndole_id = seed_menu_item(
        conn.connection(),
        restaurant_id,
        "Ndole Special",
        2500.0,
        true,
    )?;
    let poulet_id = seed_menu_item(
        conn.connection(),
        restaurant_id,
        "Poulet DG",
        4000.0,
        true,
    )?;

    Ok(TestFixtures {
        user_id,
        restaurant_id,
        menu_item_ids: vec![ndole_id, poulet_id],
    })
}

pub fn insert_user(
    conn: &mut PgConnection,
    phone_number_val: &str,
    name_val: Option<&str>,
) -> Result<i32, RepositoryError> {
    use crate::db::schema::users::dsl::*;

    diesel::insert_into(users)
        .values((phone_number.eq(phone_number_val), name.eq(name_val)))
        .returning(id)
        .get_result(conn)
        .map_err(RepositoryError::DatabaseError)
}

pub fn insert_restaurant(
    conn: &mut PgConnection,
    name_val: &str,
    is_active_val: bool,
) -> Result<i32, RepositoryError> {
    use crate::db::schema::restaurants::dsl::*;

    diesel::insert_into(restaurants)
        .values((
            name.eq(name_val),
            address.eq(Some("Rue de la Joie, Douala")),
            cuisine_type.eq(Some("camerounaise")),
            is_active.eq(is_active_val),
        ))
        .returning(id)
        .get_result(conn)
        .map_err(RepositoryError::DatabaseError)
}

pub fn seed_menu_item(
    conn: &mut PgConnection,
    restaurant_id_val: i32,
    name_val: &str,
    price_val: f64,
    is_available_val: bool,
) -> Result<i32, RepositoryError> {
    use crate::db::schema::menu_items::dsl::*;

    diesel::insert_into(menu_items)
        .values((
            restaurant_id.eq(restaurant_id_val),
            name.eq(name_val),
            price.eq(price_val),
            is_available.eq(is_available_val),
        ))
        .returning(id)
        .get_result(conn)
        .map_err(RepositoryError::DatabaseError)
}
