//! Resolution of builder state into a configuration and a prepared query
//!
//! Both resolvers are pure functions of a `BuilderState`. The builder calls
//! each at most once per snapshot and caches the result.

use tracing::{debug, warn};

use crate::domain::{AlgorithmKind, RankConfiguration, RankParameters};
use crate::error::{QueryError, Result};
use crate::infrastructure::PreparedQuery;

use super::state::BuilderState;

pub struct ConfigurationResolver;

impl ConfigurationResolver {
    /// Plain configuration, or the filtered variant when filters are present
    pub fn resolve(state: &BuilderState) -> RankConfiguration {
        let parameters = RankParameters {
            max_iterations: state.max_iterations,
            damping_factor: state.damping_factor,
            write_property: state.write_property.clone(),
        };
        RankConfiguration::from_parts(parameters, state.filters.clone())
    }
}

pub struct QueryResolver;

impl QueryResolver {
    /// Select and build the one variant matching `state`
    ///
    /// | write property | algorithm   | variant             |
    /// |----------------|-------------|---------------------|
    /// | set            | PageRank    | write PageRank      |
    /// | set            | ArticleRank | write ArticleRank   |
    /// | unset          | PageRank    | stream PageRank     |
    /// | unset          | ArticleRank | stream ArticleRank  |
    ///
    /// # Errors
    ///
    /// Resolution error when the algorithm or the projection was never set
    pub fn resolve(
        state: &BuilderState,
        configuration: RankConfiguration,
    ) -> Result<PreparedQuery> {
        let algorithm = state
            .algorithm
            .ok_or_else(|| QueryError::missing("algorithm", "call rank() before resolving"))?;
        let projection = state.projection.clone().ok_or_else(|| {
            QueryError::missing("projection", "call projected_by() before resolving")
        })?;

        let shape = state.stream_shape();
        if state.is_write() && !shape.is_default() {
            warn!("select/order_by/skip/limit only shape stream queries; ignored in write mode");
        }

        let prepared = match (state.is_write(), algorithm) {
            (true, AlgorithmKind::PageRank) => {
                PreparedQuery::write_page_rank(projection, configuration)?
            }
            (true, AlgorithmKind::ArticleRank) => {
                PreparedQuery::write_article_rank(projection, configuration)?
            }
            (false, AlgorithmKind::PageRank) => {
                PreparedQuery::stream_page_rank(projection, configuration, shape)
            }
            (false, AlgorithmKind::ArticleRank) => {
                PreparedQuery::stream_article_rank(projection, configuration, shape)
            }
        };

        debug!(
            algorithm = %prepared.algorithm(),
            mode = %prepared.mode(),
            filtered = prepared.configuration().is_filtered(),
            "resolved ranking query"
        );
        Ok(prepared)
    }
}
