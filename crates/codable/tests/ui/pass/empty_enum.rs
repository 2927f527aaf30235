use codable::{codable, json};

#[codable]
pub enum Never {}

fn main() {
    assert!(json::from_str::<Never>(r#"{"Anything":{}}"#).is_err());
}
