use serde_json::json;
use storage_payload::prelude::*;

fn schedules_select() -> PayloadBuilder {
    let mut pb = PayloadBuilder::new();
    pb.select(["id", "type", "repeat", "process_name"])
        .from("schedules")
        .where_(("id", "=", "test"))
        .unwrap()
        .where_and([("process_name", "=", "test")])
        .unwrap()
        .limit(3)
        .group_by(["process_name", "id"])
        .order_by([("process_name", "desc")])
        .unwrap()
        .aggregate([("count", "process_name")])
        .unwrap();
    pb
}

#[test]
fn select_payload_shape() {
    let payload = schedules_select().render();
    assert_eq!(
        payload.to_json(),
        concat!(
            r#"{"columns":"id,type,repeat,process_name","table":"schedules","#,
            r#""where":{"column":"id","condition":"=","value":"test","#,
            r#""and":{"column":"process_name","condition":"=","value":"test"}},"#,
            r#""limit":3,"group":"process_name, id","#,
            r#""sort":{"column":"process_name","direction":"desc"},"#,
            r#""aggregate":{"operation":"count","column":"process_name"}}"#
        )
    );
}

#[test]
fn select_with_and_or_renders_sibling_chains() {
    let mut pb = PayloadBuilder::new();
    pb.select(["id", "type", "repeat", "process_name"])
        .from("schedules")
        .where_(("id", "=", "test"))
        .unwrap()
        .where_and([("process_name", "=", "test")])
        .unwrap()
        .where_or([("process_name", "=", "sleep")])
        .unwrap()
        .limit(3);
    assert_eq!(
        pb.render().to_json(),
        concat!(
            r#"{"columns":"id,type,repeat,process_name","table":"schedules","#,
            r#""where":{"column":"id","condition":"=","value":"test","#,
            r#""and":{"column":"process_name","condition":"=","value":"test"},"#,
            r#""or":{"column":"process_name","condition":"=","value":"sleep"}},"#,
            r#""limit":3}"#
        )
    );
}

#[test]
fn same_calls_render_identical_bytes() {
    let first = schedules_select().render().to_json();
    let second = schedules_select().render().to_json();
    assert_eq!(first, second);
}

#[test]
fn insert_payload_is_flat() {
    let mut pb = PayloadBuilder::new();
    pb.insert_into("schedules").insert([
        ("id", Scalar::from("test")),
        ("process_name", Scalar::from("sleep")),
        ("type", Scalar::from(3)),
        ("repeat", Scalar::from(45677)),
    ]);
    assert_eq!(
        pb.render().into_value(),
        json!({"table": "schedules", "id": "test", "process_name": "sleep", "type": 3, "repeat": 45677})
    );
}

#[test]
fn update_payload_nests_values() {
    let mut pb = PayloadBuilder::new();
    pb.update_table("schedules")
        .update([("id", Scalar::from("test")), ("type", Scalar::from(3))])
        .where_(("id", "=", "test"))
        .unwrap();
    let payload = pb.render();
    assert_eq!(payload["values"], json!({"id": "test", "type": 3}));
    assert!(!payload.contains_key("id"));
}

#[test]
fn delete_payload() {
    let mut pb = PayloadBuilder::new();
    pb.delete("schedules")
        .where_(("id", "!=", "keep"))
        .unwrap();
    assert_eq!(
        pb.render().to_json(),
        r#"{"table":"schedules","where":{"column":"id","condition":"!=","value":"keep"}}"#
    );
}

#[test]
fn chaining_without_root_fails() {
    let mut pb = PayloadBuilder::new();
    assert!(pb.where_and([("x", "=", "y")]).unwrap_err().is_missing_where());
}

#[test]
fn aggregate_promotes_at_second_entry() {
    let mut pb = PayloadBuilder::new();
    pb.aggregate([(AggregateOp::Count, "id")]).unwrap();
    assert!(pb.render()["aggregate"].is_object());

    pb.aggregate([(AggregateOp::Sum, "repeat")]).unwrap();
    let aggregate = pb.render()["aggregate"].clone();
    assert_eq!(aggregate.as_array().map(Vec::len), Some(2));
    assert_eq!(aggregate[0]["operation"], "count");
    assert_eq!(aggregate[1]["operation"], "sum");
}

#[test]
fn query_params_for_configuration_lookup() {
    let mut pb = PayloadBuilder::new();
    pb.where_(("key", "=", "COAP_CONF")).unwrap();
    assert_eq!(pb.render_query_params().unwrap(), "key=COAP_CONF");

    pb.where_or([("key", "=", "HTTP_SOUTH")]).unwrap();
    assert_eq!(pb.render_query_params().unwrap(), "key=COAP_CONF");
}

#[test]
fn payload_serializes_through_serde() {
    let payload = schedules_select().render();
    let text = serde_json::to_string(&payload).unwrap();
    assert_eq!(text, payload.to_json());
    assert!(payload.to_json_pretty().contains("\n"));
}
