use codable::{codable, json, member_init};

#[codable]
#[member_init]
#[derive(Debug, PartialEq)]
pub struct Server {
    host: String,
    #[default_value(80)]
    port: u16,
    #[coded_at("tls")]
    #[default_value(false)]
    use_tls: bool,
}

fn main() {
    let server = Server::new("example.org".to_string()).with_use_tls(true);
    let text = json::to_string(&server).unwrap();
    assert_eq!(json::from_str::<Server>(&text).unwrap(), server);
}
