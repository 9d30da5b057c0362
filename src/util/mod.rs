use uuid::Uuid;

pub mod persistence;

pub fn generate_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4())
}
