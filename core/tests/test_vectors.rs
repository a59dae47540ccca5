//! Verify request construction against the JSON vectors in `test-vectors/`.
//!
//! Each vector names an operation and its arguments, the canned response to
//! replay, and the request the client is expected to emit. Queries and
//! bodies are compared as parsed JSON/maps so ordering never matters.

mod common;

use std::collections::HashMap;

use common::{client, split_url, Recorder, BASE_URL, REGION_URL};
use serde_json::Value;
use turso_api::{AddMember, CreateDatabase, CreateTokenBody, CreateTokenQuery, HttpMethod, TursoClient};

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn arg<'a>(args: &'a Value, key: &str) -> &'a str {
    args[key].as_str().unwrap_or_else(|| panic!("missing string arg {key}"))
}

/// Run `operation` with `args`; panics if the call does not succeed.
fn invoke(client: &TursoClient<Recorder>, operation: &str, args: &Value) {
    let opt = |key: &str| args.get(key).and_then(Value::as_str);
    match operation {
        "api_tokens.create" => drop(client.api_tokens().create(arg(args, "name")).unwrap()),
        "api_tokens.validate" => drop(client.api_tokens().validate().unwrap()),
        "api_tokens.revoke" => drop(client.api_tokens().revoke(arg(args, "name")).unwrap()),
        "databases.list" => drop(
            client
                .databases()
                .list(arg(args, "org"), opt("group"), opt("schema"))
                .unwrap(),
        ),
        "databases.create" => {
            let body: CreateDatabase = serde_json::from_value(args["body"].clone()).unwrap();
            drop(client.databases().create(arg(args, "org"), &body).unwrap())
        }
        "databases.create_token" => {
            let query: Option<CreateTokenQuery> = args
                .get("query")
                .map(|q| serde_json::from_value(q.clone()).unwrap());
            let body: Option<CreateTokenBody> = args
                .get("body")
                .map(|b| serde_json::from_value(b.clone()).unwrap());
            drop(
                client
                    .databases()
                    .create_token(arg(args, "org"), arg(args, "db"), query.as_ref(), body.as_ref())
                    .unwrap(),
            )
        }
        "databases.invalidate_token" => client
            .databases()
            .invalidate_token(arg(args, "org"), arg(args, "db"))
            .unwrap(),
        "locations.closest" => drop(client.locations().closest().unwrap()),
        "organizations.list" => drop(client.organizations().list().unwrap()),
        "members.add" => {
            let body: AddMember = serde_json::from_value(args["body"].clone()).unwrap();
            drop(client.members().add(arg(args, "org"), &body).unwrap())
        }
        "members.remove" => drop(
            client
                .members()
                .remove(arg(args, "org"), arg(args, "username"))
                .unwrap(),
        ),
        other => panic!("unknown operation: {other}"),
    }
}

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let sim = &case["response"];
        let rec = Recorder::replying(
            sim["status"].as_u64().unwrap() as u16,
            sim["body"].as_str().unwrap(),
        );

        invoke(&client(&rec), case["operation"].as_str().unwrap(), &case["args"]);

        let req = rec.single();
        let expected = &case["expected_request"];
        assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");

        let host = match expected["host"].as_str().unwrap() {
            "base" => BASE_URL,
            "region" => REGION_URL,
            other => panic!("{name}: unknown host {other}"),
        };
        let (path, query) = split_url(&req.url);
        assert_eq!(path, format!("{host}{}", expected["path"].as_str().unwrap()), "{name}: path");

        let expected_query: HashMap<String, String> = match &expected["query"] {
            Value::Null => {
                assert!(!req.url.contains('?'), "{name}: unexpected query string");
                HashMap::new()
            }
            q => serde_json::from_value(q.clone()).unwrap(),
        };
        assert_eq!(query, expected_query, "{name}: query");

        match &expected["body"] {
            Value::Null => assert!(req.body.is_none(), "{name}: body should be None"),
            body => {
                let sent: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
                assert_eq!(&sent, body, "{name}: body");
            }
        }
    }
}
