use codable::{codable, json};

#[codable]
#[derive(Debug, PartialEq)]
pub enum Reply<T, E> {
    #[coded_as("ok")]
    Success(T),
    #[coded_as("err")]
    Failure { error: E, #[ignore_encoding] retry: Option<u32> },
}

fn main() {
    let reply: Reply<i32, String> = Reply::Success(4);
    let text = json::to_string(&reply).unwrap();
    assert_eq!(text, r#"{"ok":{"_0":4}}"#);
    assert_eq!(json::from_str::<Reply<i32, String>>(&text).unwrap(), reply);

    let failed: Reply<i32, String> = Reply::Failure {
        error: "boom".to_string(),
        retry: Some(2),
    };
    assert_eq!(json::to_string(&failed).unwrap(), r#"{"err":{"error":"boom"}}"#);
}
