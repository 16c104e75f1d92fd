//! Reconciliation pipeline integration tests

mod common;

use common::*;
use state::{IndexError, ResolveMiss, TokenIndex};
use state_reconciler::{
    AdjacencyGrapher, EdgeState, GraphError, GraphInput, Grapher, PipelineError, PipelineOptions,
    ReconciliationPipeline,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use types::{BundleSlot, PoolId, ProtocolSchema, RawBundle, SchemaManifest, SlotSchema, Token, TokenId};

fn pipeline() -> ReconciliationPipeline<AdjacencyGrapher> {
    ReconciliationPipeline::new(PipelineOptions::new())
}

#[tokio::test]
async fn test_valid_bundle_produces_complete_state() {
    let state = pipeline().process(valid_bundle(10)).await.unwrap();

    assert_eq!(state.block().number, 10);
    assert_eq!(state.tokens().len(), 2);
    assert_eq!(state.pools().len(), 2);
    assert_eq!(state.constant_product().len(), 1);
    assert_eq!(state.concentrated().len(), 1);
    assert_eq!(state.resolver().block_number(), 10);

    let graph = state.graph();
    assert_eq!(graph.block(), 10);
    assert_eq!(graph.edge_count(), 3);

    let from_weth = graph.edges_from(TokenId::new(WETH));
    assert_eq!(from_weth.len(), 2);
    assert!(matches!(from_weth[0].state, EdgeState::ConstantProduct(_)));
    assert!(matches!(from_weth[1].state, EdgeState::Concentrated(_)));
    assert_eq!(state.timings().total(), state.timings().index + state.timings().graph);
}

#[tokio::test]
async fn test_resolution_through_processed_state() {
    let state = pipeline().process(valid_bundle(11)).await.unwrap();
    let resolver = state.resolver();

    assert_eq!(
        resolver.resolve_schema_from_pool_id(PoolId::new(V2_POOL)),
        Some(&ProtocolSchema::from("uniswap-v2-pools"))
    );
    assert_eq!(resolver.resolve_schema_from_pool_id(PoolId::new(999)), None);
    assert_eq!(
        resolver.resolve_schema("uniswap-v3").map(ProtocolSchema::as_str),
        Some("uniswap-v3-pools")
    );
}

#[tokio::test]
async fn test_resolver_is_rebuilt_per_block() {
    let pipeline = pipeline();
    let first = pipeline.process(valid_bundle(1)).await.unwrap();

    // Next block ships a manifest without uniswap-v3 and no graph edges on it
    let mut next = valid_bundle(2);
    next.manifest = SchemaManifest::from([(
        "uniswap-v2".to_string(),
        ProtocolSchema::from("uniswap-v2-pools-r2"),
    )]);
    for slot in &mut next.slots {
        if let BundleSlot::GraphSnapshot(graph) = slot {
            graph.edges.retain(|edge| edge.pool_id == PoolId::new(V2_POOL));
        }
    }
    let second = pipeline.process(next).await.unwrap();

    assert!(first
        .resolver()
        .resolve_schema_from_pool_id(PoolId::new(V3_POOL))
        .is_some());
    assert_eq!(
        second.resolver().resolve_schema_from_pool_id(PoolId::new(V3_POOL)),
        None
    );
    assert_eq!(
        second
            .resolver()
            .resolve_schema_from_pool_id(PoolId::new(V2_POOL))
            .map(ProtocolSchema::as_str),
        Some("uniswap-v2-pools-r2")
    );
}

#[tokio::test]
async fn test_validation_errors() {
    let pipeline = pipeline();

    let err = pipeline.process(duplicate_registry_bundle(3)).await.unwrap_err();
    assert!(matches!(
        err,
        PipelineError::DuplicateSlot {
            block: 3,
            schema: SlotSchema::PoolRegistrySnapshot,
            count: 2
        }
    ));

    let err = pipeline.process(missing_registry_bundle(4)).await.unwrap_err();
    assert!(matches!(
        err,
        PipelineError::MissingSlot {
            block: 4,
            schema: SlotSchema::PoolRegistrySnapshot
        }
    ));

    let err = pipeline
        .process(RawBundle::new(block(5), manifest()))
        .await
        .unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn test_duplicate_identity_rejects_block() {
    let mut bundle = valid_bundle(6);
    for slot in &mut bundle.slots {
        if let BundleSlot::TokenSnapshot(tokens) = slot {
            let mut clone = tokens[0].clone();
            clone.address = types::Address::new([0x99; 20]);
            tokens.push(clone);
        }
    }

    let err = pipeline().process(bundle).await.unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Index {
            block: 6,
            source: IndexError::DuplicateIdentity { entity: "token", .. }
        }
    ));
}

#[tokio::test]
async fn test_unresolvable_edge_is_a_graph_error() {
    let mut bundle = valid_bundle(7);
    for slot in &mut bundle.slots {
        if let BundleSlot::GraphSnapshot(graph) = slot {
            graph.edges.push(edge(999, WETH, USDC));
        }
    }

    let err = pipeline().process(bundle).await.unwrap_err();

    match err {
        PipelineError::Graph { block, source } => {
            assert_eq!(block, 7);
            assert_eq!(
                source,
                GraphError::UnresolvedPool {
                    pool: PoolId::new(999),
                    miss: ResolveMiss::UnknownPool(PoolId::new(999)),
                }
            );
        }
        other => panic!("expected graph error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_indexer_and_grapher_overrides() {
    struct EdgeCounter;

    impl Grapher for EdgeCounter {
        type Graph = usize;

        fn build(&self, input: GraphInput<'_>) -> Result<usize, GraphError> {
            Ok(input.raw.edges.len())
        }
    }

    let calls = Arc::new(AtomicUsize::new(0));
    let counted = calls.clone();
    let options = PipelineOptions::new()
        .with_grapher(EdgeCounter)
        .with_token_indexer(move |tokens: Vec<Token>| {
            counted.fetch_add(1, Ordering::SeqCst);
            TokenIndex::build(tokens.into_iter().filter(|t| t.id != TokenId::new(USDC)).collect())
        });
    let pipeline = ReconciliationPipeline::new(options);

    let state = pipeline.process(valid_bundle(8)).await.unwrap();

    assert_eq!(*state.graph(), 3);
    assert_eq!(state.tokens().len(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_slow_block_still_produces_state() {
    let options = PipelineOptions::new().with_slow_block_threshold(std::time::Duration::ZERO);
    let pipeline = ReconciliationPipeline::new(options);

    let state = pipeline.process(valid_bundle(40)).await.unwrap();
    assert_eq!(state.block().number, 40);
    assert_eq!(state.graph().edge_count(), 3);
}
