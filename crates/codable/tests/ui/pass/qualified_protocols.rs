use codable::{codable, json};

#[codable(codable::Encodable, Clone)]
pub struct Metric {
    name: String,
    value: f64,
}

fn main() {
    let metric = Metric {
        name: "load".to_string(),
        value: 0.25,
    };
    assert_eq!(
        json::to_string(&metric).unwrap(),
        r#"{"name":"load","value":0.25}"#
    );
}
