//! Campaign proposal logic module

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

pub enum StatusType {
    Pending,
    Accepted,
    Declined,
}

impl StatusType {
    pub fn value(&self) -> String {
        match *self {
            StatusType::Pending => String::from("pending"),
            StatusType::Accepted => String::from("accepted"),
            StatusType::Declined => String::from("declined"),
        }
    }
}

fn validate_proposal(p: &Json<Proposal>) -> bool {
    info!("validating proposal: {}", &p.prid);
    p.campaign.len() < utils::string_limit() && p.brief.len() < utils::message_limit()
}

/// Create a new proposal
pub fn create(p: Json<Proposal>) -> Result<Proposal, VetrinaError> {
    info!("creating proposal");
    if !validate_proposal(&p) {
        error!("invalid proposal");
        return Err(VetrinaError::Invalid);
    }
    let ts = chrono::offset::Utc::now().timestamp();
    let prid: String = format!("{}{}", crate::PROPOSAL_DB_KEY, utils::generate_rnd());
    let status = if p.status.is_empty() {
        StatusType::Pending.value()
    } else {
        String::from(&p.status)
    };
    let new_proposal = Proposal {
        prid: String::from(&prid),
        user_id: String::from(&p.user_id),
        campaign: String::from(&p.campaign),
        brief: String::from(&p.brief),
        price: p.price,
        status,
        created: ts,
        archived: false,
    };
    debug!("insert proposal: {:?}", &new_proposal);
    let db = &DATABASE_LOCK;
    let k = &new_proposal.prid;
    let v = bincode::serialize(&new_proposal).unwrap_or_default();
    db::write_chunks(&db.env, &db.handle, k.as_bytes(), &v)
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    // in order to retrieve all proposals, write keys to the index
    let list_key = crate::PROPOSAL_LIST_DB_KEY;
    let _lock = INDEX_LOCK
        .lock()
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    let r = db::DatabaseEnvironment::read(&db.env, &db.handle, &list_key.as_bytes().to_vec())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    if r.is_empty() {
        debug!("creating proposal index");
    }
    let old: String = bincode::deserialize(&r[..]).unwrap_or_default();
    let proposal_list = [old, String::from(&prid)].join(",");
    let s_proposal_list = bincode::serialize(&proposal_list).unwrap_or_default();
    debug!("writing proposal index {} for id: {}", proposal_list, list_key);
    db::write_chunks(&db.env, &db.handle, list_key.as_bytes(), &s_proposal_list)
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    Ok(new_proposal)
}

/// Lookup proposal
pub fn find(prid: &String) -> Result<Proposal, VetrinaError> {
    info!("find proposal: {}", &prid);
    let db = &DATABASE_LOCK;
    let r = db::DatabaseEnvironment::read(&db.env, &db.handle, &prid.as_bytes().to_vec())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    if r.is_empty() {
        error!("proposal not found");
        return Err(VetrinaError::Database(MdbError::NotFound));
    }
    let result: Proposal = bincode::deserialize(&r[..]).unwrap_or_default();
    if result.archived {
        return Err(VetrinaError::Database(MdbError::NotFound));
    }
    Ok(result)
}

/// Lookup all proposals matching the filters
pub fn find_all(filters: &[filter::Filter]) -> Result<Vec<Proposal>, VetrinaError> {
    let db = &DATABASE_LOCK;
    let i_list_key = crate::PROPOSAL_LIST_DB_KEY;
    let i_r = db::DatabaseEnvironment::read(&db.env, &db.handle, &i_list_key.as_bytes().to_vec())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    if i_r.is_empty() {
        error!("proposal index not found");
    }
    let de: String = bincode::deserialize(&i_r[..]).unwrap_or_default();
    let i_v_prid = de.split(",");
    let i_v: Vec<String> = i_v_prid.map(String::from).collect();
    let mut proposals: Vec<Proposal> = Vec::new();
    for p in i_v {
        let proposal: Proposal = find(&p).unwrap_or_default();
        if !proposal.prid.is_empty() {
            proposals.push(proposal);
        }
    }
    Ok(filter::retain_matching(proposals, filters))
}

/// Modify proposal
pub fn modify(p: Json<Proposal>) -> Result<Proposal, VetrinaError> {
    info!("modify proposal: {}", &p.prid);
    if !validate_proposal(&p) {
        error!("invalid proposal");
        return Err(VetrinaError::Invalid);
    }
    let f_proposal: Proposal = find(&p.prid)?;
    let db = &DATABASE_LOCK;
    let u_proposal = Proposal::update(f_proposal, &p);
    db::DatabaseEnvironment::delete(&db.env, &db.handle, u_proposal.prid.as_bytes())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    let v = bincode::serialize(&u_proposal).unwrap_or_default();
    db::write_chunks(&db.env, &db.handle, u_proposal.prid.as_bytes(), &v)
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    Ok(u_proposal)
}

/// Flag a proposal as archived
pub fn remove(prid: &String) -> Result<(), VetrinaError> {
    info!("remove proposal: {}", &prid);
    let mut f_proposal: Proposal = find(prid)?;
    f_proposal.archived = true;
    let db = &DATABASE_LOCK;
    db::DatabaseEnvironment::delete(&db.env, &db.handle, f_proposal.prid.as_bytes())
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    let v = bincode::serialize(&f_proposal).unwrap_or_default();
    db::write_chunks(&db.env, &db.handle, f_proposal.prid.as_bytes(), &v)
        .map_err(|_| VetrinaError::Database(MdbError::Panic))?;
    Ok(())
}

// Tests
//-------------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    use super::*;
    use serde_json::json;

    #[test]
    fn create_test() -> Result<(), VetrinaError> {
        let user_id = format!("u{}", utils::generate_rnd());
        let j_proposal = Json(Proposal {
            user_id: String::from(&user_id),
            campaign: String::from("spring launch"),
            brief: String::from("three reels and one story"),
            price: 150000,
            ..Default::default()
        });
        let test_proposal = create(j_proposal)?;
        assert_eq!(test_proposal.status, StatusType::Pending.value());
        let f_proposal = find(&test_proposal.prid)?;
        assert_eq!(f_proposal.price, 150000);
        remove(&test_proposal.prid)?;
        Ok(())
    }

    #[test]
    fn status_transition_test() -> Result<(), VetrinaError> {
        let user_id = format!("u{}", utils::generate_rnd());
        let j_proposal = Json(Proposal {
            user_id: String::from(&user_id),
            campaign: String::from("summer push"),
            brief: String::from("one collab post"),
            price: 80000,
            ..Default::default()
        });
        let test_proposal = create(j_proposal)?;
        let edit = Json(Proposal {
            prid: String::from(&test_proposal.prid),
            user_id: String::from(&user_id),
            campaign: String::from(&test_proposal.campaign),
            brief: String::from(&test_proposal.brief),
            price: test_proposal.price,
            status: StatusType::Accepted.value(),
            ..Default::default()
        });
        let u_proposal = modify(edit)?;
        assert_eq!(u_proposal.status, "accepted");
        let filters = vec![
            (String::from("userId"), String::from("=="), json!(user_id)),
            (String::from("status"), String::from("=="), json!("accepted")),
        ];
        let f_proposals = find_all(&filters)?;
        assert_eq!(f_proposals.len(), 1);
        remove(&test_proposal.prid)?;
        Ok(())
    }

    #[test]
    fn price_filter_test() -> Result<(), VetrinaError> {
        let user_id = format!("u{}", utils::generate_rnd());
        let j_cheap = Json(Proposal {
            user_id: String::from(&user_id),
            campaign: String::from("micro"),
            price: 1000,
            ..Default::default()
        });
        let j_dear = Json(Proposal {
            user_id: String::from(&user_id),
            campaign: String::from("macro"),
            price: 900000,
            ..Default::default()
        });
        let cheap = create(j_cheap)?;
        let dear = create(j_dear)?;
        let filters = vec![
            (String::from("userId"), String::from("=="), json!(user_id)),
            (String::from("price"), String::from("<="), json!(5000)),
        ];
        let f_proposals = find_all(&filters)?;
        assert_eq!(f_proposals.len(), 1);
        assert_eq!(f_proposals[0].campaign, "micro");
        remove(&cheap.prid)?;
        remove(&dear.prid)?;
        Ok(())
    }
}
