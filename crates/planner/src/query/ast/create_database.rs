#[derive(Debug, Clone)]
pub struct CreateDatabase {
    pub name: String,
    pub if_not_exists: bool,
}
