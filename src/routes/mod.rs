pub(crate) mod docs;
pub(crate) mod router;
pub(crate) mod user;
