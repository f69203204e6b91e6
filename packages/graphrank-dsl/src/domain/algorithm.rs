//! Ranking algorithm families and execution modes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ranking algorithm family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmKind {
    PageRank,
    ArticleRank,
}

impl AlgorithmKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlgorithmKind::PageRank => "page_rank",
            AlgorithmKind::ArticleRank => "article_rank",
        }
    }

    /// Procedure namespace of the algorithm in the analytics extension
    pub fn procedure(&self) -> &'static str {
        match self {
            AlgorithmKind::PageRank => "gds.pageRank",
            AlgorithmKind::ArticleRank => "gds.alpha.articleRank",
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AlgorithmKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "page_rank" | "pagerank" => Ok(AlgorithmKind::PageRank),
            "article_rank" | "articlerank" => Ok(AlgorithmKind::ArticleRank),
            other => Err(format!("unknown ranking algorithm '{}'", other)),
        }
    }
}

/// Whether a query returns rows or persists a node property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionMode {
    Stream,
    Write,
}

impl ExecutionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionMode::Stream => "stream",
            ExecutionMode::Write => "write",
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_procedure_names() {
        assert_eq!(AlgorithmKind::PageRank.procedure(), "gds.pageRank");
        assert_eq!(AlgorithmKind::ArticleRank.procedure(), "gds.alpha.articleRank");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("PageRank".parse::<AlgorithmKind>(), Ok(AlgorithmKind::PageRank));
        assert_eq!("article-rank".parse::<AlgorithmKind>(), Ok(AlgorithmKind::ArticleRank));
        assert!("hits".parse::<AlgorithmKind>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&AlgorithmKind::ArticleRank).unwrap();
        assert_eq!(json, "\"article_rank\"");
    }
}
