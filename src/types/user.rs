pub(crate) type Username = String;

pub(crate) const MANAGER: &str = "manager";
pub(crate) const EMPLOYEE: &str = "employee";

#[derive(Clone, Debug)]
pub(crate) struct User {
    pub(crate) id: u32,
    pub(crate) username: Username,
    pub(crate) password_hash: String,
    pub(crate) role: String,
}
