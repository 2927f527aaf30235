use codable::{codable, from_value, json, to_value};
use proptest::prelude::*;

#[codable]
#[derive(Debug, Clone, PartialEq)]
struct RoundTripConfig {
    #[coded_at("display-name")]
    name: String,
    count: i64,
    enabled: bool,
    tags: Vec<String>,
    limit: Option<u32>,
}

#[codable]
#[coding_keys(rename_all = "camelCase")]
#[derive(Debug, Clone, PartialEq)]
enum Command {
    Start { job_name: String, priority: u8 },
    Stop(i32),
    Pause,
}

fn arb_string() -> impl Strategy<Value = String> {
    r"[a-zA-Z0-9 _\-]{0,16}".prop_map(|s| s)
}

prop_compose! {
    fn arb_config()(
        name in arb_string(),
        count in any::<i64>(),
        enabled in any::<bool>(),
        tags in proptest::collection::vec(arb_string(), 0..6),
        limit in proptest::option::of(any::<u32>()),
    ) -> RoundTripConfig {
        RoundTripConfig { name, count, enabled, tags, limit }
    }
}

fn arb_command() -> impl Strategy<Value = Command> {
    prop_oneof![
        (arb_string(), any::<u8>()).prop_map(|(job_name, priority)| Command::Start { job_name, priority }),
        any::<i32>().prop_map(Command::Stop),
        Just(Command::Pause),
    ]
}

proptest! {
    #[test]
    fn roundtrip_value_tree(value in arb_config()) {
        let tree = to_value(&value).unwrap();
        let decoded = from_value::<RoundTripConfig>(&tree).unwrap();
        prop_assert_eq!(decoded, value);
    }

    #[test]
    fn roundtrip_json_text(value in arb_config()) {
        let text = json::to_string(&value).unwrap();
        let decoded = json::from_str::<RoundTripConfig>(&text).unwrap();
        prop_assert_eq!(decoded, value);
    }

    #[test]
    fn roundtrip_enum(command in arb_command()) {
        let text = json::to_string(&command).unwrap();
        let decoded = json::from_str::<Command>(&text).unwrap();
        prop_assert_eq!(decoded, command);
    }
}
