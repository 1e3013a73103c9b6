//! Filter predicates, resolved once per control when the group is bound.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    error::{QueryGroupError, Result},
    node::NodeMetadata,
};

/// The selection kind a control declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectKind {
    Related,
    Duplicates,
    Sql,
    Traceback,
}

impl FromStr for SelectKind {
    type Err = QueryGroupError;

    fn from_str(s: &str) -> Result<SelectKind> {
        match s {
            "related" => Ok(SelectKind::Related),
            "duplicates" => Ok(SelectKind::Duplicates),
            "sql" => Ok(SelectKind::Sql),
            "traceback" => Ok(SelectKind::Traceback),
            other => Err(QueryGroupError::UnknownSelectKind(other.to_string())),
        }
    }
}

impl fmt::Display for SelectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            SelectKind::Related => "related",
            SelectKind::Duplicates => "duplicates",
            SelectKind::Sql => "sql",
            SelectKind::Traceback => "traceback",
        };
        f.write_str(tag)
    }
}

/// Decides whether a node stays visible under a filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodePredicate {
    // Nodes with at least one related query
    Related,
    // Nodes flagged as duplicates
    Duplicates,
    // Nodes issued by the given SQL statement
    Sql(String),
    // Nodes issued from the given traceback
    Traceback(String),
}

impl NodePredicate {
    /// Build the predicate for a control. `value` is only captured by the equality kinds.
    pub fn resolve(kind: &str, value: &str) -> Result<NodePredicate> {
        Ok(match kind.parse::<SelectKind>()? {
            SelectKind::Related => NodePredicate::Related,
            SelectKind::Duplicates => NodePredicate::Duplicates,
            SelectKind::Sql => NodePredicate::Sql(value.to_string()),
            SelectKind::Traceback => NodePredicate::Traceback(value.to_string()),
        })
    }

    pub fn kind(&self) -> SelectKind {
        match self {
            NodePredicate::Related => SelectKind::Related,
            NodePredicate::Duplicates => SelectKind::Duplicates,
            NodePredicate::Sql(_) => SelectKind::Sql,
            NodePredicate::Traceback(_) => SelectKind::Traceback,
        }
    }

    pub fn matches(&self, node: &NodeMetadata) -> bool {
        match self {
            NodePredicate::Related => node.related_count != 0,
            NodePredicate::Duplicates => node.is_duplicate,
            NodePredicate::Sql(sql_id) => node.statement_id.as_deref() == Some(sql_id.as_str()),
            NodePredicate::Traceback(traceback_id) => {
                node.location_id.as_deref() == Some(traceback_id.as_str())
            }
        }
    }
}

/// Identity of the engaged control. Kind is part of it, so an `sql` and a `traceback` control
/// sharing a value are never mistaken for a re-press of each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveFilter {
    pub kind: SelectKind,
    pub value: String,
}

impl fmt::Display for ActiveFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.value)
    }
}

/// A control resolved to its predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterBinding {
    pub predicate: NodePredicate,
    pub value: String,
}

impl FilterBinding {
    pub fn resolve(kind: &str, value: &str) -> Result<FilterBinding> {
        Ok(FilterBinding {
            predicate: NodePredicate::resolve(kind, value)?,
            value: value.to_string(),
        })
    }

    pub fn active_filter(&self) -> ActiveFilter {
        ActiveFilter {
            kind: self.predicate.kind(),
            value: self.value.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn meta(statement: Option<&str>, related: u64, duplicate: bool) -> NodeMetadata {
        NodeMetadata {
            statement_id: statement.map(str::to_string),
            location_id: Some("t1".to_string()),
            related_count: related,
            is_duplicate: duplicate,
        }
    }

    #[test]
    fn test_resolve_kinds() {
        assert_eq!(
            NodePredicate::resolve("related", "on").unwrap(),
            NodePredicate::Related
        );
        assert_eq!(
            NodePredicate::resolve("duplicates", "on").unwrap(),
            NodePredicate::Duplicates
        );
        assert_eq!(
            NodePredicate::resolve("sql", "q42").unwrap(),
            NodePredicate::Sql("q42".to_string())
        );
        assert_eq!(
            NodePredicate::resolve("traceback", "t9").unwrap(),
            NodePredicate::Traceback("t9".to_string())
        );
        assert_eq!(
            NodePredicate::resolve("Related", ""),
            Err(QueryGroupError::UnknownSelectKind("Related".to_string()))
        );
        assert!(NodePredicate::resolve("", "").is_err());
    }

    #[test]
    fn test_related_and_duplicates() {
        assert!(NodePredicate::Related.matches(&meta(None, 2, false)));
        assert!(!NodePredicate::Related.matches(&meta(None, 0, true)));
        assert!(NodePredicate::Duplicates.matches(&meta(None, 0, true)));
        assert!(!NodePredicate::Duplicates.matches(&meta(None, 5, false)));
    }

    #[test]
    fn test_equality_matching() {
        let sql = NodePredicate::Sql("q42".to_string());
        assert!(sql.matches(&meta(Some("q42"), 0, false)));
        assert!(!sql.matches(&meta(Some("q7"), 0, false)));
        assert!(!sql.matches(&meta(None, 0, false)));

        // An absent id never matches, not even an empty control value
        assert!(!NodePredicate::Sql(String::new()).matches(&meta(None, 0, false)));

        let traceback = NodePredicate::Traceback("t1".to_string());
        assert!(traceback.matches(&meta(None, 0, false)));
        assert!(!NodePredicate::Traceback("t2".to_string()).matches(&meta(None, 0, false)));
    }

    #[test]
    fn test_active_filter_includes_kind() {
        let sql = FilterBinding::resolve("sql", "abc").unwrap();
        let traceback = FilterBinding::resolve("traceback", "abc").unwrap();
        assert_ne!(sql.active_filter(), traceback.active_filter());
        assert_eq!(sql.active_filter().to_string(), "sql:abc");
    }
}
