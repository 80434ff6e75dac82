//! # Quorum Response Interpreter
//!
//! Turns what the quorum client returned into the final commit/abort decision.
//!
//! ```text
//! transport error? ──yes──→ TransportFailure
//!        │ no
//! status == false? ──yes──→ QuorumRejected(message)
//!        │ no
//! signed operation? ──no──→ Ok(message)
//!        │ yes
//! QuorumAck decodes with ≥1 signature? ──no──→ MalformedQuorumResponse
//!        │ yes
//!        └──────────────→ Ok(ack message, else response message)
//! ```
//!
//! An operation is never reported successful unless every level passes. The
//! function is pure: the same inputs always give the same decision.

use crate::domain::entities::{BasicResponse, QuorumAck, SignatureOutcome};
use crate::domain::lifecycle::Operation;
use crate::errors::{ContractTokenError, ContractTokenResult, TransportError};

/// Decide whether `operation` committed.
///
/// # Errors
///
/// `TransportFailure`, `QuorumRejected` or `MalformedQuorumResponse`, checked
/// in that order.
pub fn interpret(
    operation: Operation,
    reply: &Result<BasicResponse, TransportError>,
) -> ContractTokenResult<String> {
    let response = match reply {
        Ok(response) => response,
        Err(err) => return Err(ContractTokenError::TransportFailure(err.clone())),
    };

    if !response.status {
        return Err(ContractTokenError::QuorumRejected(response.message.clone()));
    }

    if !operation.requires_signature() {
        return Ok(response.message.clone());
    }

    let ack = extract_ack(response)?;
    Ok(ack
        .message
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| response.message.clone()))
}

/// Same decision collapsed to `(message, success)`.
#[must_use]
pub fn signature_outcome(
    operation: Operation,
    reply: &Result<BasicResponse, TransportError>,
) -> SignatureOutcome {
    SignatureOutcome::from_result(&interpret(operation, reply))
}

fn extract_ack(response: &BasicResponse) -> ContractTokenResult<QuorumAck> {
    let payload = response.result.as_ref().ok_or_else(|| {
        ContractTokenError::MalformedQuorumResponse("missing signature payload".to_string())
    })?;

    let ack: QuorumAck = serde_json::from_value(payload.clone()).map_err(|e| {
        ContractTokenError::MalformedQuorumResponse(format!("undecodable signature payload: {e}"))
    })?;

    if ack.signatures.is_empty() {
        return Err(ContractTokenError::MalformedQuorumResponse(
            "signature payload carries no quorum signatures".to_string(),
        ));
    }

    Ok(ack)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn signed_payload(message: Option<&str>) -> serde_json::Value {
        json!({
            "message": message,
            "signatures": [
                { "did": "bafybmi-peer-1", "signature": "aa01" },
                { "did": "bafybmi-peer-2", "signature": "bb02" }
            ]
        })
    }

    #[test]
    fn test_transport_error_short_circuits() {
        let reply = Err(TransportError::Connection("refused".into()));
        let result = interpret(Operation::Subscribe, &reply);
        assert_eq!(
            result,
            Err(ContractTokenError::TransportFailure(TransportError::Connection(
                "refused".into()
            )))
        );
    }

    #[test]
    fn test_status_false_short_circuits_before_payload() {
        // A valid payload must not rescue a rejected response.
        let reply = Ok(BasicResponse::rejected("quorum unavailable")
            .with_result(signed_payload(Some("ignored"))));
        assert_eq!(
            interpret(Operation::Deploy, &reply),
            Err(ContractTokenError::QuorumRejected("quorum unavailable".into()))
        );
    }

    #[test]
    fn test_signed_operation_without_payload_is_malformed() {
        let reply = Ok(BasicResponse::accepted("ok"));
        for op in [
            Operation::Deploy,
            Operation::Execute,
            Operation::Publish,
            Operation::Subscribe,
        ] {
            assert!(matches!(
                interpret(op, &reply),
                Err(ContractTokenError::MalformedQuorumResponse(_))
            ));
        }
    }

    #[test]
    fn test_undecodable_payload_is_malformed() {
        let reply = Ok(BasicResponse::accepted("ok").with_result(json!("not an object")));
        let err = interpret(Operation::Execute, &reply).unwrap_err();
        assert!(err.to_string().contains("undecodable"));

        let reply = Ok(BasicResponse::accepted("ok").with_result(json!({ "signatures": [] })));
        assert!(matches!(
            interpret(Operation::Execute, &reply),
            Err(ContractTokenError::MalformedQuorumResponse(_))
        ));
    }

    #[test]
    fn test_signed_operation_uses_ack_message() {
        let reply = Ok(BasicResponse::accepted("accepted")
            .with_result(signed_payload(Some("Smart contract deployed, block 42"))));
        assert_eq!(
            interpret(Operation::Deploy, &reply).unwrap(),
            "Smart contract deployed, block 42"
        );

        let reply = Ok(BasicResponse::accepted("accepted").with_result(signed_payload(None)));
        assert_eq!(interpret(Operation::Deploy, &reply).unwrap(), "accepted");
    }

    #[test]
    fn test_unsigned_operations_use_status() {
        let reply = Ok(BasicResponse::accepted("token generated"));
        assert_eq!(
            interpret(Operation::Generate, &reply).unwrap(),
            "token generated"
        );
        assert_eq!(interpret(Operation::Fetch, &reply).unwrap(), "token generated");

        let outcome = signature_outcome(Operation::Fetch, &Ok(BasicResponse::rejected("gone")));
        assert!(!outcome.success);
    }

    fn arb_reply() -> impl Strategy<Value = Result<BasicResponse, TransportError>> {
        let payload = prop_oneof![
            Just(None),
            Just(Some(json!(42))),
            Just(Some(json!({ "signatures": [] }))),
            "[a-z ]{0,12}".prop_map(|m| Some(json!({
                "message": m,
                "signatures": [{ "did": "bafybmi-p", "signature": "00" }]
            }))),
        ];
        prop_oneof![
            "[a-z]{1,8}".prop_map(|e| Err(TransportError::Connection(e))),
            (any::<bool>(), "[a-z ]{0,12}", payload).prop_map(|(status, message, result)| {
                Ok(BasicResponse {
                    status,
                    message,
                    result,
                })
            }),
        ]
    }

    fn arb_operation() -> impl Strategy<Value = Operation> {
        prop::sample::select(Operation::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_interpreter_is_idempotent(op in arb_operation(), reply in arb_reply()) {
            prop_assert_eq!(interpret(op, &reply), interpret(op, &reply));
            prop_assert_eq!(signature_outcome(op, &reply), signature_outcome(op, &reply));
        }

        #[test]
        fn prop_success_requires_every_level(op in arb_operation(), reply in arb_reply()) {
            let outcome = signature_outcome(op, &reply);
            if outcome.success {
                let response = reply.as_ref().unwrap();
                prop_assert!(response.status);
                if op.requires_signature() {
                    prop_assert!(response.result.is_some());
                }
            }
            if let Err(err) = &reply {
                prop_assert_eq!(
                    interpret(op, &reply),
                    Err(ContractTokenError::TransportFailure(err.clone()))
                );
            }
        }
    }
}
