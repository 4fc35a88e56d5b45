use std::cell::RefCell;
use storage_payload::prelude::*;

#[derive(Debug, PartialEq)]
enum Call {
    Payload { table: String, body: String },
    Params { table: String, params: String },
}

#[derive(Debug)]
enum ClientError {
    Payload(PayloadError),
}

impl From<PayloadError> for ClientError {
    fn from(err: PayloadError) -> Self {
        ClientError::Payload(err)
    }
}

#[derive(Default)]
struct RecordingTransport {
    calls: RefCell<Vec<Call>>,
}

impl StorageTransport for RecordingTransport {
    type Output = usize;
    type Error = ClientError;

    fn query_with_payload(&self, table: &str, payload: &str) -> Result<usize, ClientError> {
        let mut calls = self.calls.borrow_mut();
        calls.push(Call::Payload {
            table: table.to_string(),
            body: payload.to_string(),
        });
        Ok(calls.len())
    }

    fn query(&self, table: &str, params: &str) -> Result<usize, ClientError> {
        let mut calls = self.calls.borrow_mut();
        calls.push(Call::Params {
            table: table.to_string(),
            params: params.to_string(),
        });
        Ok(calls.len())
    }
}

#[test]
fn sends_rendered_json() {
    let transport = RecordingTransport::default();
    let mut pb = PayloadBuilder::new();
    pb.where_(("key", "=", "COAP_CONF")).unwrap();

    let n = pb.query_with(&transport, "configuration").unwrap();
    assert_eq!(n, 1);
    assert_eq!(
        transport.calls.borrow()[0],
        Call::Payload {
            table: "configuration".to_string(),
            body: r#"{"where":{"column":"key","condition":"=","value":"COAP_CONF"}}"#.to_string(),
        }
    );
}

#[test]
fn sends_query_params() {
    let transport = RecordingTransport::default();
    let mut pb = PayloadBuilder::new();
    pb.where_(("key", "=", "COAP_CONF")).unwrap();

    pb.query_params_with(&transport, "configuration").unwrap();
    assert_eq!(
        transport.calls.borrow()[0],
        Call::Params {
            table: "configuration".to_string(),
            params: "key=COAP_CONF".to_string(),
        }
    );
}

#[test]
fn missing_where_never_reaches_transport() {
    let transport = RecordingTransport::default();
    let pb = PayloadBuilder::new();

    let err = pb.query_params_with(&transport, "configuration").unwrap_err();
    assert!(matches!(
        err,
        ClientError::Payload(PayloadError::MissingWhereClause)
    ));
    assert!(transport.calls.borrow().is_empty());
}
