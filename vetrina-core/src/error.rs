use kn0sys_lmdb_rs::MdbError;
use rocket::http::Status;
use thiserror::Error;

/// Use for mapping errors in functions that can throw multiple errors.
#[derive(Debug, Error)]
#[error("Vetrina error. See logs for more info.")]
pub enum VetrinaError {
    Database(MdbError),
    Http,
    Invalid,
    NotFound,
    Unauthorized,
    Unknown,
}

impl VetrinaError {
    /// Transport status used by the controllers on the failure path
    pub fn status(&self) -> Status {
        match self {
            VetrinaError::Database(MdbError::NotFound) => Status::NotFound,
            VetrinaError::NotFound => Status::NotFound,
            VetrinaError::Invalid => Status::BadRequest,
            VetrinaError::Unauthorized => Status::Unauthorized,
            _ => Status::InternalServerError,
        }
    }
}

// Tests
//-------------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn status_test() {
        assert_eq!(VetrinaError::NotFound.status(), Status::NotFound);
        assert_eq!(
            VetrinaError::Database(MdbError::NotFound).status(),
            Status::NotFound
        );
        assert_eq!(VetrinaError::Invalid.status(), Status::BadRequest);
        assert_eq!(VetrinaError::Unauthorized.status(), Status::Unauthorized);
        assert_eq!(VetrinaError::Http.status(), Status::InternalServerError);
    }
}
