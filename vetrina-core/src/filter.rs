//! Field/operator/value filtering over serialized records.

use crate::{
    models,
    user,
};
use serde::Serialize;
use serde_json::Value;

/// A single predicate in the form `[field, op, value]`.
///
/// Fields use wire names (`userId`, not `user_id`).
pub type Filter = (String, String, Value);

fn compare(field: &Value, op: &str, target: &Value) -> bool {
    // numbers go through the f64 view for every operator, so an integer
    // field still matches a whole-number float target
    if let (Some(a), Some(b)) = (field.as_f64(), target.as_f64()) {
        return match op {
            "==" => a == b,
            "!=" => a != b,
            ">" => a > b,
            ">=" => a >= b,
            "<" => a < b,
            "<=" => a <= b,
            _ => false,
        };
    }
    match op {
        "==" => field == target,
        "!=" => field != target,
        ">" | ">=" | "<" | "<=" => {
            if let (Some(a), Some(b)) = (field.as_str(), target.as_str()) {
                match op {
                    ">" => a > b,
                    ">=" => a >= b,
                    "<" => a < b,
                    _ => a <= b,
                }
            } else {
                false
            }
        }
        _ => false,
    }
}

/// Conjunction over the triples. A field absent from the record or an
///
/// unknown operator fails the whole match.
pub fn matches<T: Serialize>(record: &T, filters: &[Filter]) -> bool {
    let v = serde_json::to_value(record).unwrap_or_default();
    for (field, op, target) in filters {
        let hit = match v.get(field) {
            Some(f) => compare(f, op, target),
            None => false,
        };
        if !hit {
            return false;
        }
    }
    true
}

/// Keep the records matching every filter, input order preserved. An
///
/// empty filter list keeps everything.
pub fn retain_matching<T: Serialize>(records: Vec<T>, filters: &[Filter]) -> Vec<T> {
    if filters.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|r| matches(r, filters))
        .collect()
}

/// Influencer discovery. Case-insensitive username search (empty
///
/// matches all) with inclusive rate bounds.
pub fn filter_influencers(
    users: Vec<models::User>,
    search: &str,
    min_rate: u128,
    max_rate: u128,
) -> Vec<models::User> {
    let s = search.to_lowercase();
    users
        .into_iter()
        .filter(|u| u.role == user::RoleType::Influencer.value())
        .filter(|u| s.is_empty() || u.username.to_lowercase().contains(&s))
        .filter(|u| u.rate >= min_rate && u.rate <= max_rate)
        .collect()
}

// Tests
//-------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_user(username: &str, role: &str, rate: u128) -> models::User {
        models::User {
            uid: crate::utils::generate_rnd(),
            username: String::from(username),
            role: String::from(role),
            rate,
            ..Default::default()
        }
    }

    #[test]
    fn matches_test() {
        let u = test_user("maria", "influencer", 250);
        let filters = vec![
            (String::from("role"), String::from("=="), json!("influencer")),
            (String::from("rate"), String::from(">="), json!(100)),
        ];
        assert!(matches(&u, &filters));
        let miss = vec![(String::from("rate"), String::from("<"), json!(100))];
        assert!(!matches(&u, &miss));
        // an integer rate equals the same rate written as a float
        let eq = vec![(String::from("rate"), String::from("=="), json!(250.0))];
        assert!(matches(&u, &eq));
        let ge = vec![(String::from("rate"), String::from(">="), json!(250.0))];
        assert!(matches(&u, &ge));
        let ne = vec![(String::from("rate"), String::from("!="), json!(250.0))];
        assert!(!matches(&u, &ne));
    }

    #[test]
    fn unknown_field_test() {
        let u = test_user("maria", "influencer", 250);
        let filters = vec![(String::from("nope"), String::from("=="), json!("x"))];
        assert!(!matches(&u, &filters));
    }

    #[test]
    fn unknown_op_test() {
        let u = test_user("maria", "influencer", 250);
        let filters = vec![(String::from("role"), String::from("~="), json!("influencer"))];
        assert!(!matches(&u, &filters));
    }

    #[test]
    fn string_ordering_test() {
        let u = test_user("maria", "influencer", 250);
        let filters = vec![(String::from("username"), String::from("<"), json!("zeta"))];
        assert!(matches(&u, &filters));
    }

    #[test]
    fn retain_matching_test() {
        let users = vec![
            test_user("alice", "influencer", 100),
            test_user("bob", "business", 0),
            test_user("carol", "influencer", 900),
        ];
        let filters = vec![(String::from("role"), String::from("=="), json!("influencer"))];
        let f_users = retain_matching(users, &filters);
        assert_eq!(f_users.len(), 2);
        assert_eq!(f_users[0].username, "alice");
        assert_eq!(f_users[1].username, "carol");
    }

    #[test]
    fn empty_filters_keep_all_test() {
        let users = vec![
            test_user("alice", "influencer", 100),
            test_user("bob", "business", 0),
        ];
        let f_users = retain_matching(users, &Vec::new());
        assert_eq!(f_users.len(), 2);
    }

    #[test]
    fn filter_influencers_test() {
        let users = vec![
            test_user("Maria", "influencer", 250),
            test_user("marco", "influencer", 50),
            test_user("mario", "business", 250),
        ];
        let f_users = filter_influencers(users, "mar", 100, 1000);
        assert_eq!(f_users.len(), 1);
        assert_eq!(f_users[0].username, "Maria");
    }
}
