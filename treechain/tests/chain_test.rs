//! Tests for the handler chain: forwarding and explicit outcomes

use rstest::{fixture, rstest};

use treechain::domain::{Chain, HandlerId, HandlerKind, Outcome};
use treechain::sample::{sample_chain, SAMPLE_REQUESTS};
use treechain::util::testing;

#[fixture]
fn sample() -> (Chain, HandlerId) {
    testing::init_test_setup();
    sample_chain().expect("sample chain builds")
}

// ============================================================
// Sample scenario
// ============================================================

#[rstest]
fn given_sample_chain_when_requesting_five_then_first_handler_takes_it(
    sample: (Chain, HandlerId),
) {
    let (chain, head) = sample;
    let outcome = chain.handle_request(head, 5).unwrap();
    assert_eq!(outcome.handled_by(), Some(head));
    assert!(matches!(outcome, Outcome::Handled { hops: 0, .. }));
    assert_eq!(outcome.to_string(), "5 handled by handler1");
}

#[rstest]
fn given_sample_chain_when_requesting_fifteen_then_unhandled_after_all(
    sample: (Chain, HandlerId),
) {
    let (chain, head) = sample;
    let outcome = chain.handle_request(head, 15).unwrap();
    assert_eq!(
        outcome,
        Outcome::Unhandled {
            request: 15,
            visited: 3
        }
    );
    assert!(!outcome.is_handled());
    assert_eq!(
        outcome.to_string(),
        "15 not handled (passed through 3 handlers)"
    );
}

#[rstest]
fn given_sample_requests_when_replayed_then_same_outcomes(sample: (Chain, HandlerId)) {
    let (chain, head) = sample;
    let first: Vec<_> = SAMPLE_REQUESTS
        .iter()
        .map(|&r| chain.handle_request(head, r).unwrap())
        .collect();
    let second: Vec<_> = SAMPLE_REQUESTS
        .iter()
        .map(|&r| chain.handle_request(head, r).unwrap())
        .collect();
    assert_eq!(first, second);
}

// ============================================================
// Forwarding
// ============================================================

#[rstest]
#[case(1, "small")]
#[case(50, "medium")]
#[case(500, "large")]
fn given_graded_chain_when_requesting_then_first_matching_range_wins(
    #[case] request: i64,
    #[case] expected: &str,
) {
    let mut chain = Chain::new();
    let small = chain.add_handler("small", HandlerKind::Range { start: 0, end: 10 });
    let medium = chain.add_handler("medium", HandlerKind::Range { start: 0, end: 100 });
    let large = chain.add_handler("large", HandlerKind::Range { start: 0, end: 1000 });
    chain.link(&[small, medium, large]).unwrap();

    let outcome = chain.handle_request(small, request).unwrap();
    match outcome {
        Outcome::Handled { handler, request: r, .. } => {
            assert_eq!(handler, expected);
            assert_eq!(r, request);
        }
        other => panic!("expected handled, got {other:?}"),
    }
}

#[test]
fn given_request_entering_mid_chain_when_handling_then_earlier_handlers_skipped() {
    let mut chain = Chain::new();
    let a = chain.add_handler("a", HandlerKind::Range { start: 0, end: 5 });
    let b = chain.add_handler("b", HandlerKind::Range { start: 5, end: 10 });
    chain.set_successor(a, b).unwrap();

    assert_eq!(chain.handle_request(b, 1).unwrap().handled_by(), None);
    assert_eq!(chain.handle_request(a, 7).unwrap().handled_by(), Some(b));
}

#[test]
fn given_lone_handler_without_successor_when_unmatched_then_unhandled() {
    let mut chain = Chain::new();
    let only = chain.add_handler("only", HandlerKind::concrete());
    assert_eq!(
        chain.handle_request(only, 10).unwrap(),
        Outcome::Unhandled {
            request: 10,
            visited: 1
        }
    );
}

#[test]
fn given_cycle_attempt_when_linking_then_chain_unchanged() {
    let mut chain = Chain::new();
    let ids: Vec<_> = (0..3)
        .map(|n| chain.add_handler(format!("h{n}"), HandlerKind::concrete()))
        .collect();
    chain.link(&ids).unwrap();

    assert!(chain.set_successor(ids[2], ids[0]).is_err());
    assert_eq!(chain.successor(ids[2]).unwrap(), None);
    assert!(!chain.handle_request(ids[0], 20).unwrap().is_handled());
}
