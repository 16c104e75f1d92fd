//! IndexedTokenSystem: tokens by ID and by address

use super::IndexError;
use std::collections::HashMap;
use tracing::debug;
use types::{Address, Token, TokenId};

/// Immutable token lookup built from one token snapshot
#[derive(Debug, Clone, Default)]
pub struct TokenIndex {
    tokens: Vec<Token>,
    by_id: HashMap<TokenId, usize>,
    by_address: HashMap<Address, usize>,
}

impl TokenIndex {
    /// Index a token snapshot
    ///
    /// Fails if two tokens share an ID or an address.
    pub fn build(tokens: Vec<Token>) -> Result<Self, IndexError> {
        let mut by_id = HashMap::with_capacity(tokens.len());
        let mut by_address = HashMap::with_capacity(tokens.len());

        for (slot, token) in tokens.iter().enumerate() {
            if by_id.insert(token.id, slot).is_some() {
                return Err(IndexError::duplicate_identity("token", token.id));
            }
            if by_address.insert(token.address, slot).is_some() {
                return Err(IndexError::duplicate_key("token", token.address));
            }
        }

        debug!(tokens = tokens.len(), "Token index built");

        Ok(Self {
            tokens,
            by_id,
            by_address,
        })
    }

    pub fn get_by_id(&self, id: TokenId) -> Option<&Token> {
        self.by_id.get(&id).map(|&slot| &self.tokens[slot])
    }

    pub fn get_by_address(&self, address: &Address) -> Option<&Token> {
        self.by_address.get(address).map(|&slot| &self.tokens[slot])
    }

    /// Owned copy of every indexed token, in snapshot order
    pub fn all(&self) -> Vec<Token> {
        self.tokens.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
