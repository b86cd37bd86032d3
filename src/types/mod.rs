pub(crate) mod request;
pub(crate) mod response;
mod user;

pub(crate) use user::{EMPLOYEE, MANAGER, User, Username};
