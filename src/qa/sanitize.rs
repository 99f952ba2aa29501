//! Normalization and guarding of model-generated Cypher.

use once_cell::sync::Lazy;
use regex::Regex;

static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(?:\w+)?\s*(.*?)```").unwrap());

static WRITE_CLAUSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(CREATE|MERGE|DELETE|REMOVE|SET|DROP)\b").unwrap());

static QUOTED_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"'[^']*'|"[^"]*""#).unwrap());

/// Strip markdown code fences and a stray leading `cypher` language tag.
///
/// The templates tell the model not to emit these, but conformance is
/// advisory. Truncated model output can leave an opening fence with no
/// closing one; a lone stray fence line is dropped too.
pub fn strip_code_fences(raw: &str) -> String {
    let inner = match CODE_FENCE.captures(raw) {
        Some(caps) => caps[1].trim().to_string(),
        None => strip_stray_fences(raw.trim()),
    };
    strip_cypher_label(&inner)
}

fn strip_stray_fences(trimmed: &str) -> String {
    let without_open = match trimmed.strip_prefix("```") {
        // Opening fence (with an optional language tag) but no closing one
        Some(rest) => match rest.split_once('\n') {
            Some((_, body)) => body,
            None => "",
        },
        None => trimmed,
    };
    let without_open = without_open.trim();
    match without_open.strip_suffix("```") {
        Some(body) => body.trim().to_string(),
        None => without_open.to_string(),
    }
}

fn strip_cypher_label(inner: &str) -> String {
    let lowered = inner.to_ascii_lowercase();
    if lowered == "cypher" {
        return String::new();
    }
    if let Some(rest) = lowered.strip_prefix("cypher") {
        if rest.starts_with(['\n', '\r']) {
            return inner["cypher".len()..].trim().to_string();
        }
    }
    inner.to_string()
}

/// Return the first write clause in the query, if any.
///
/// Quoted string literals are removed before the scan, so a value like
/// `'Create Inc'` does not trip the guard. Keyword matching is on word
/// boundaries; a property that merely contains a keyword (e.g. `n.created`)
/// does not match either.
pub fn write_clause(query: &str) -> Option<String> {
    let unquoted = QUOTED_LITERAL.replace_all(query, "");
    WRITE_CLAUSE
        .captures(&unquoted)
        .map(|caps| caps[1].to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_fenced_block_with_language_tag() {
        let raw = "```cypher\nMATCH (n:Person) RETURN n.name\n```";
        assert_eq!(strip_code_fences(raw), "MATCH (n:Person) RETURN n.name");
    }

    #[test]
    fn strips_bare_fences() {
        let raw = "```\nMATCH (n) RETURN n\n```";
        assert_eq!(strip_code_fences(raw), "MATCH (n) RETURN n");
    }

    #[test]
    fn strips_leading_cypher_label_without_fences() {
        let raw = "cypher\nMATCH (n) RETURN n";
        assert_eq!(strip_code_fences(raw), "MATCH (n) RETURN n");
    }

    #[test]
    fn unfenced_input_is_only_trimmed() {
        let raw = "  MATCH (n) RETURN n  \n";
        assert_eq!(strip_code_fences(raw), "MATCH (n) RETURN n");
    }

    #[test]
    fn surrounding_prose_outside_the_fence_is_dropped() {
        let raw = "Here is the query:\n```cypher\nMATCH (n) RETURN n\n```\nHope that helps!";
        assert_eq!(strip_code_fences(raw), "MATCH (n) RETURN n");
    }

    #[test]
    fn strips_unterminated_fence_from_truncated_output() {
        let raw = "```cypher\nMATCH (n:Person) RETURN n.name";
        assert_eq!(strip_code_fences(raw), "MATCH (n:Person) RETURN n.name");

        let raw = "```\nMATCH (n) RETURN n";
        assert_eq!(strip_code_fences(raw), "MATCH (n) RETURN n");
    }

    #[test]
    fn strips_lone_trailing_fence() {
        let raw = "MATCH (n) RETURN n\n```";
        assert_eq!(strip_code_fences(raw), "MATCH (n) RETURN n");
    }

    #[test]
    fn fence_with_nothing_behind_it_yields_an_empty_query() {
        assert_eq!(strip_code_fences("```cypher"), "");
        assert_eq!(strip_code_fences("```"), "");
    }

    #[test]
    fn detects_write_clauses_case_insensitively() {
        assert_eq!(
            write_clause("MATCH (n) detach delete n").as_deref(),
            Some("DELETE")
        );
        assert_eq!(
            write_clause("MERGE (p:Person {name: 'Alice'})").as_deref(),
            Some("MERGE")
        );
        assert_eq!(write_clause("CREATE (n:Thing)").as_deref(), Some("CREATE"));
        assert_eq!(
            write_clause("MATCH (n) SET n.x = 1").as_deref(),
            Some("SET")
        );
    }

    #[test]
    fn read_queries_pass_the_guard() {
        assert_eq!(
            write_clause("MATCH (p:Person)-[:ACTED_IN]->(m:Movie) RETURN m.title"),
            None
        );
    }

    #[test]
    fn keywords_inside_identifiers_do_not_match() {
        assert_eq!(write_clause("MATCH (n) RETURN n.created, n.offset"), None);
        assert_eq!(write_clause("MATCH (n:Merger) RETURN n"), None);
    }

    #[test]
    fn keywords_inside_string_literals_do_not_match() {
        assert_eq!(
            write_clause("MATCH (c:Company {name: 'Create Inc'}) RETURN c"),
            None
        );
        assert_eq!(
            write_clause(r#"MATCH (m:Movie) WHERE m.title = "Drop Zone" RETURN m"#),
            None
        );
    }

    #[test]
    fn write_clause_outside_a_literal_still_matches() {
        assert_eq!(
            write_clause("MATCH (c:Company {name: 'Create Inc'}) DELETE c").as_deref(),
            Some("DELETE")
        );
    }
}
