//! Shopping cart logic module

use crate::{
    db::{
        self,
        DATABASE_LOCK,
        INDEX_LOCK,
    },
    error::VetrinaError,
    filter,
    models::*,
    utils,
};
use kn0sys_lmdb_rs::MdbError;
use log::{
    debug,
    error,
    info,
};
use rocket::serde::json::Json;

fn validate_cart(c: &Json<Cart>) -> bool {
    info!("validating cart: {}", &c.cid);
    c.items.len() < utils::cart_item_limit()
        && c.items.iter().all(|i| i.title.len() < utils::string_limit())
}

/// Create a new cart
pub fn create(c: Json<Cart>) -> Result<Cart, VetrinaError> {
    info!("creating cart");
    if !validate_cart(&c) {
        error!("invalid cart");
        return Err(VetrinaError::Invalid);
    }
    let ts = chrono::offset::Utc::now().timestamp();
    let cid: String = format!("{}{}", crate::CART_DB_KEY, utils::generate_rnd());
    let new_cart = Cart {
        cid: String::from(&cid),
        user_id: String::from(&c.user_id),
        items: c.items.to_vec(),
        updated: ts,
        archived: false,
    };
    debug!("insert cart: {:?}", &new_cart);
    let db = &DATABASE_LOCK;
    let k = &new_cart.cid;
    let v = bincode::serialize(&new_cart).unwrap_or_default();
    db::write_chunks(&db.env, &db.handle, k.as_bytes(), &v)
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    // in order to retrieve all carts, write keys to the index
    let list_key = crate::CART_LIST_DB_KEY;
    let _lock = INDEX_LOCK
        .lock()
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    let r = db::DatabaseEnvironment::read(&db.env, &db.handle, &list_key.as_bytes().to_vec())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    if r.is_empty() {
        debug!("creating cart index");
    }
    let old: String = bincode::deserialize(&r[..]).unwrap_or_default();
    let cart_list = [old, String::from(&cid)].join(",");
    let s_cart_list = bincode::serialize(&cart_list).unwrap_or_default();
    debug!("writing cart index {} for id: {}", cart_list, list_key);
    db::write_chunks(&db.env, &db.handle, list_key.as_bytes(), &s_cart_list)
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    Ok(new_cart)
}

/// Lookup cart
pub fn find(cid: &String) -> Result<Cart, VetrinaError> {
    info!("find cart: {}", &cid);
    let db = &DATABASE_LOCK;
    let r = db::DatabaseEnvironment::read(&db.env, &db.handle, &cid.as_bytes().to_vec())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    if r.is_empty() {
        error!("cart not found");
        return Err(VetrinaError::Database(MdbError::NotFound));
    }
    let result: Cart = bincode::deserialize(&r[..]).unwrap_or_default();
    if result.archived {
        return Err(VetrinaError::Database(MdbError::NotFound));
    }
    Ok(result)
}

/// Lookup all carts matching the filters
pub fn find_all(filters: &[filter::Filter]) -> Result<Vec<Cart>, VetrinaError> {
    let db = &DATABASE_LOCK;
    let i_list_key = crate::CART_LIST_DB_KEY;
    let i_r = db::DatabaseEnvironment::read(&db.env, &db.handle, &i_list_key.as_bytes().to_vec())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    if i_r.is_empty() {
        error!("cart index not found");
    }
    let de: String = bincode::deserialize(&i_r[..]).unwrap_or_default();
    let i_v_cid = de.split(",");
    let i_v: Vec<String> = i_v_cid.map(String::from).collect();
    let mut carts: Vec<Cart> = Vec::new();
    for c in i_v {
        let cart: Cart = find(&c).unwrap_or_default();
        if !cart.cid.is_empty() {
            carts.push(cart);
        }
    }
    Ok(filter::retain_matching(carts, filters))
}

/// Modify cart. Bumps the updated timestamp.
pub fn modify(c: Json<Cart>) -> Result<Cart, VetrinaError> {
    info!("modify cart: {}", &c.cid);
    if !validate_cart(&c) {
        error!("invalid cart");
        return Err(VetrinaError::Invalid);
    }
    let f_cart: Cart = find(&c.cid)?;
    let db = &DATABASE_LOCK;
    let u_cart = Cart::update(f_cart, &c);
    db::DatabaseEnvironment::delete(&db.env, &db.handle, u_cart.cid.as_bytes())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    let v = bincode::serialize(&u_cart).unwrap_or_default();
    db::write_chunks(&db.env, &db.handle, u_cart.cid.as_bytes(), &v)
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    Ok(u_cart)
}

/// Flag a cart as archived
pub fn remove(cid: &String) -> Result<(), VetrinaError> {
    info!("remove cart: {}", &cid);
    let mut f_cart: Cart = find(cid)?;
    f_cart.archived = true;
    let db = &DATABASE_LOCK;
    db::DatabaseEnvironment::delete(&db.env, &db.handle, f_cart.cid.as_bytes())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    let v = bincode::serialize(&f_cart).unwrap_or_default();
    db::write_chunks(&db.env, &db.handle, f_cart.cid.as_bytes(), &v)
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    Ok(())
}

// Tests
//-------------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    use super::*;
    use serde_json::json;

    fn test_item(item_id: &str, price: u128, quantity: u32) -> CartItem {
        CartItem {
            item_id: String::from(item_id),
            title: format!("item {}", item_id),
            price,
            quantity,
        }
    }

    #[test]
    fn create_test() -> Result<(), VetrinaError> {
        let user_id = format!("u{}", utils::generate_rnd());
        let j_cart = Json(Cart {
            user_id: String::from(&user_id),
            items: vec![test_item("sku-1", 2500, 2)],
            ..Default::default()
        });
        let test_cart = create(j_cart)?;
        assert!(test_cart.updated > 0);
        let f_cart = find(&test_cart.cid)?;
        assert_eq!(f_cart.items.len(), 1);
        assert_eq!(f_cart.items[0].quantity, 2);
        remove(&test_cart.cid)?;
        Ok(())
    }

    #[test]
    fn modify_replaces_items_test() -> Result<(), VetrinaError> {
        let user_id = format!("u{}", utils::generate_rnd());
        let j_cart = Json(Cart {
            user_id: String::from(&user_id),
            items: vec![test_item("sku-1", 2500, 1)],
            ..Default::default()
        });
        let test_cart = create(j_cart)?;
        let edit = Json(Cart {
            cid: String::from(&test_cart.cid),
            user_id: String::from(&user_id),
            items: vec![test_item("sku-2", 900, 3), test_item("sku-3", 1100, 1)],
            ..Default::default()
        });
        let u_cart = modify(edit)?;
        assert_eq!(u_cart.items.len(), 2);
        assert!(u_cart.updated >= test_cart.updated);
        remove(&test_cart.cid)?;
        Ok(())
    }

    #[test]
    fn find_all_test() -> Result<(), VetrinaError> {
        let user_id = format!("u{}", utils::generate_rnd());
        let j_cart = Json(Cart {
            user_id: String::from(&user_id),
            ..Default::default()
        });
        let test_cart = create(j_cart)?;
        let filters = vec![(String::from("userId"), String::from("=="), json!(user_id))];
        let f_carts = find_all(&filters)?;
        assert_eq!(f_carts.len(), 1);
        remove(&test_cart.cid)?;
        Ok(())
    }

    #[test]
    fn item_limit_test() {
        let items = vec![test_item("sku", 100, 1); utils::cart_item_limit()];
        let j_cart = Json(Cart {
            user_id: String::from("u1"),
            items,
            ..Default::default()
        });
        assert!(create(j_cart).is_err());
    }
}
