//! Shared bundle fixtures for reconciler integration tests
#![allow(dead_code)]

use rust_decimal_macros::dec;
use types::{
    Address, BlockMeta, BundleSlot, ConcentratedPool, ConstantProductPool, Pool, PoolId,
    PoolRegistry, ProtocolCode, ProtocolDictionary, ProtocolSchema, RawBundle, RawEdge, RawGraph,
    SchemaManifest, Token, TokenId,
};

pub const WETH: u64 = 1;
pub const USDC: u64 = 2;
pub const V2_POOL: u64 = 100;
pub const V3_POOL: u64 = 200;

pub fn manifest() -> SchemaManifest {
    SchemaManifest::from([
        ("uniswap-v2".to_string(), ProtocolSchema::from("uniswap-v2-pools")),
        ("uniswap-v3".to_string(), ProtocolSchema::from("uniswap-v3-pools")),
    ])
}

pub fn tokens() -> Vec<Token> {
    vec![
        Token::new(TokenId::new(WETH), Address::new([0x11; 20]), "WETH", 18).with_transfer_gas(21_000),
        Token::new(TokenId::new(USDC), Address::new([0x22; 20]), "USDC", 6).with_transfer_gas(45_000),
    ]
}

pub fn registry() -> PoolRegistry {
    PoolRegistry::new(
        vec![
            Pool::new(PoolId::new(V2_POOL), &Address::new([0xa0; 20]), ProtocolCode::new(1)),
            Pool::new(PoolId::new(V3_POOL), &Address::new([0xb0; 20]), ProtocolCode::new(2)),
        ],
        ProtocolDictionary::from([
            (ProtocolCode::new(1), "uniswap-v2".to_string()),
            (ProtocolCode::new(2), "uniswap-v3".to_string()),
        ]),
    )
}

pub fn edge(pool: u64, token_in: u64, token_out: u64) -> RawEdge {
    RawEdge {
        pool_id: PoolId::new(pool),
        token_in: TokenId::new(token_in),
        token_out: TokenId::new(token_out),
    }
}

pub fn graph() -> RawGraph {
    RawGraph {
        edges: vec![
            edge(V2_POOL, WETH, USDC),
            edge(V2_POOL, USDC, WETH),
            edge(V3_POOL, WETH, USDC),
        ],
    }
}

pub fn constant_product() -> Vec<ConstantProductPool> {
    vec![ConstantProductPool {
        pool_id: PoolId::new(V2_POOL),
        reserve0: dec!(1250.5),
        reserve1: dec!(3100000),
        fee_bps: 30,
    }]
}

pub fn concentrated() -> Vec<ConcentratedPool> {
    vec![ConcentratedPool {
        pool_id: PoolId::new(V3_POOL),
        sqrt_price_x96: 4_339_505_179_874_779_000_000_000,
        liquidity: 9_800_000_000_000,
        tick: -197_850,
        fee_pips: 500,
    }]
}

pub fn block(number: u64) -> BlockMeta {
    BlockMeta::new(number, format!("0x{:064x}", number), 1_700_000_000 + number * 2)
}

/// Bundle with every slot kind present exactly once
pub fn valid_bundle(number: u64) -> RawBundle {
    RawBundle::new(block(number), manifest())
        .with_slot(BundleSlot::TokenSnapshot(tokens()))
        .with_slot(BundleSlot::PoolRegistrySnapshot(registry()))
        .with_slot(BundleSlot::GraphSnapshot(graph()))
        .with_slot(BundleSlot::ConstantProductPools(constant_product()))
        .with_slot(BundleSlot::ConcentratedPools(concentrated()))
}

/// Valid bundle with a second pool registry snapshot
pub fn duplicate_registry_bundle(number: u64) -> RawBundle {
    valid_bundle(number).with_slot(BundleSlot::PoolRegistrySnapshot(registry()))
}

/// Valid bundle without its pool registry snapshot
pub fn missing_registry_bundle(number: u64) -> RawBundle {
    let mut bundle = valid_bundle(number);
    bundle
        .slots
        .retain(|slot| !matches!(slot, BundleSlot::PoolRegistrySnapshot(_)));
    bundle
}
