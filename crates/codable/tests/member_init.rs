use codable::{codable, json, member_init};

#[member_init]
#[derive(Debug, PartialEq)]
pub struct Item {
    a: i32,
    #[initial("x")]
    b: String,
}

#[test]
fn defaulted_parameters_can_be_omitted() {
    let item = Item::new(1);
    assert_eq!(
        item,
        Item {
            a: 1,
            b: "x".to_string()
        }
    );
    assert_eq!(Item::new(1).with_b("y".to_string()).b, "y");
}

#[member_init]
#[derive(Debug, PartialEq)]
struct Limits {
    #[initial(1)]
    #[default_value(42)]
    max: u64,
    #[default_value(0.5)]
    ratio: f32,
    name: String,
}

#[test]
fn default_value_wins_over_initial() {
    let limits = Limits::new("cpu".to_string());
    assert_eq!(limits.max, 42);
    assert_eq!(limits.ratio, 0.5);
    assert_eq!(limits.with_max(7).with_ratio(1.0).max, 7);
}

#[member_init]
#[derive(Debug, PartialEq)]
struct Span(usize, #[default_value(1)] usize);

#[test]
fn tuple_structs_take_positional_parameters() {
    assert_eq!(Span::new(3), Span(3, 1));
    assert_eq!(Span::new(3).with_1(4), Span(3, 4));
}

#[member_init]
#[derive(Debug, PartialEq)]
struct Nothing;

#[test]
fn unit_structs_get_an_empty_initializer() {
    assert_eq!(Nothing::new(), Nothing);
}

#[member_init]
#[derive(Debug, PartialEq)]
struct Holder<T: Clone> {
    value: T,
    #[default_value(Vec::new())]
    previous: Vec<T>,
}

#[test]
fn generic_structs_keep_their_bounds() {
    let holder = Holder::new("a");
    assert_eq!(holder.value, "a");
    assert!(holder.previous.is_empty());
    assert_eq!(Holder::new(1).with_previous(vec![0]).previous, [0]);
}

#[member_init]
#[codable]
#[derive(Debug, PartialEq)]
struct Connection {
    host: String,
    #[default_value(5432)]
    port: u16,
    #[ignore_coding]
    #[initial(false)]
    connected: bool,
}

#[test]
fn markers_combine_in_either_order() {
    let connection = Connection::new("db".to_string());
    assert_eq!(connection.port, 5432);
    assert!(!connection.connected);

    let text = json::to_string(&connection.with_connected(true)).unwrap();
    assert_eq!(text, r#"{"host":"db","port":5432}"#);

    let decoded: Connection = json::from_str(r#"{"host":"db"}"#).unwrap();
    assert_eq!(decoded, Connection::new("db".to_string()));
}

#[codable]
#[member_init]
#[derive(Debug, PartialEq)]
struct Keyword {
    r#type: String,
    #[default_value("none")]
    r#ref: String,
}

#[test]
fn raw_identifiers_keep_their_plain_names() {
    let keyword = Keyword::new("fn".to_string()).with_ref("x".to_string());
    assert_eq!(json::to_string(&keyword).unwrap(), r#"{"ref":"x","type":"fn"}"#);
}

#[member_init]
#[derive(Debug, PartialEq)]
struct Ports {
    #[default_value(80)]
    _port: u16,
    #[default_value(8080)]
    port: u16,
}

#[test]
fn underscored_members_get_their_own_setter() {
    let ports = Ports::new().with__port(1).with_port(2);
    assert_eq!(ports, Ports { _port: 1, port: 2 });
}
