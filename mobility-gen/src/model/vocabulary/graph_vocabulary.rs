use super::{Token, TokenValue};
use crate::model::TrajectoryError;
use itertools::Itertools;
use mobility_core::model::SegmentId;
use std::collections::HashMap;

/// bidirectional mapping between road segment ids and dense tokens.
///
/// segment ids are ordered ascending and assigned tokens `0..N-1`. token `N`
/// is reserved for the end-of-sequence marker, so the vocabulary size seen by
/// an oracle is `N + 1`. the mapping is fixed at construction.
#[derive(Debug, Clone)]
pub struct GraphVocabulary {
    /// token -> segment id, for all segment tokens
    segments: Vec<SegmentId>,
    /// segment id -> token
    tokens: HashMap<SegmentId, Token>,
}

impl GraphVocabulary {
    /// builds a vocabulary over the provided segment ids. duplicates are
    /// collapsed into a single token.
    ///
    /// # Arguments
    ///
    /// * `ids` - the road segment ids of the network
    ///
    /// # Returns
    ///
    /// * the vocabulary, or an error if no ids were provided
    pub fn build<I>(ids: I) -> Result<GraphVocabulary, TrajectoryError>
    where
        I: IntoIterator<Item = SegmentId>,
    {
        let segments = ids.into_iter().sorted().dedup().collect_vec();
        if segments.is_empty() {
            return Err(TrajectoryError::EmptyVocabulary);
        }
        let tokens = segments
            .iter()
            .enumerate()
            .map(|(token, id)| (*id, token))
            .collect::<HashMap<_, _>>();
        log::debug!("built vocabulary with {} road segments", segments.len());
        Ok(GraphVocabulary { segments, tokens })
    }

    pub fn encode(&self, id: &SegmentId) -> Result<Token, TrajectoryError> {
        self.tokens
            .get(id)
            .copied()
            .ok_or(TrajectoryError::UnknownSegment(*id))
    }

    pub fn encode_value(&self, value: &TokenValue) -> Result<Token, TrajectoryError> {
        match value {
            TokenValue::Segment(id) => self.encode(id),
            TokenValue::EndOfSequence => Ok(self.eos_token()),
        }
    }

    pub fn decode(&self, token: Token) -> Result<TokenValue, TrajectoryError> {
        if token == self.eos_token() {
            Ok(TokenValue::EndOfSequence)
        } else {
            self.segments
                .get(token)
                .map(|id| TokenValue::Segment(*id))
                .ok_or(TrajectoryError::UnknownToken {
                    token,
                    size: self.size(),
                })
        }
    }

    /// the reserved end-of-sequence token, which follows all segment tokens
    pub fn eos_token(&self) -> Token {
        self.segments.len()
    }

    /// number of tokens including the end-of-sequence token
    pub fn size(&self) -> usize {
        self.segments.len() + 1
    }

    pub fn n_segments(&self) -> usize {
        self.segments.len()
    }

    pub fn contains(&self, id: &SegmentId) -> bool {
        self.tokens.contains_key(id)
    }

    /// segment ids in token order
    pub fn segment_ids(&self) -> &[SegmentId] {
        &self.segments
    }
}
