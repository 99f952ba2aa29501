//! Prompt templates for Cypher generation, repair, and answer synthesis.

use indoc::indoc;

/// A text template with `{name}` placeholders.
pub struct PromptTemplate {
    template: &'static str,
}

impl PromptTemplate {
    pub const fn new(template: &'static str) -> Self {
        Self { template }
    }

    /// Substitute each `{name}` placeholder with its value. Placeholders not
    /// named in `vars` are left untouched.
    pub fn render(&self, vars: &[(&str, &str)]) -> String {
        let mut out = self.template.to_string();
        for (name, value) in vars {
            out = out.replace(&format!("{{{name}}}"), value);
        }
        out
    }
}

/// Instructs the model to emit a bare Cypher statement for a question,
/// grounded in the live schema.
pub const CYPHER_GENERATION: PromptTemplate = PromptTemplate::new(indoc! {"
    You are an expert in Neo4j and Cypher. Given a natural-language question
    and a graph schema, generate a Cypher query that answers the question.
    DO NOT answer the question itself, generate only the query.
    Use only the node labels, relationship types and properties that appear
    in the schema.
    Do not wrap the query in markdown code blocks. Return only the Cypher
    query.

    Graph schema:
    {schema}

    Question: {question}
    Cypher query:
"});

/// Second model round-trip: review a generated query against the schema and
/// return it fixed or unchanged.
pub const CYPHER_REPAIR: PromptTemplate = PromptTemplate::new(indoc! {"
    You are an expert in Neo4j and Cypher. Review the Cypher query below
    against the graph schema. Fix syntax errors and any node labels,
    relationship types, properties or relationship directions that do not
    match the schema. If the query is already correct, return it unchanged.
    Do not wrap the query in markdown code blocks. Return only the Cypher
    query.

    Graph schema:
    {schema}

    Cypher query:
    {query}

    Corrected Cypher query:
"});

/// Phrases query results as a natural-language answer.
pub const ANSWER_SYNTHESIS: PromptTemplate = PromptTemplate::new(indoc! {"
    You are an assistant that answers questions based on the provided
    context. The context is the result of a Cypher query against a knowledge
    graph.
    Use the information from the context to answer the question. Be concise
    and direct. If the information is not in the context, say that you
    could not find the answer in the graph.

    Context:
    {context}

    Question: {question}
    Helpful answer:
"});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_substitutes_placeholders() {
        let template = PromptTemplate::new("ask {who} about {what}");
        assert_eq!(
            template.render(&[("who", "the model"), ("what", "movies")]),
            "ask the model about movies"
        );
    }

    #[test]
    fn unknown_placeholders_are_left_untouched() {
        let template = PromptTemplate::new("{kept} stays");
        assert_eq!(template.render(&[("other", "x")]), "{kept} stays");
    }

    #[test]
    fn generation_template_names_its_inputs() {
        let rendered = CYPHER_GENERATION.render(&[
            ("schema", "Node properties:\nPerson {name: String}"),
            ("question", "Who acted in The Matrix?"),
        ]);
        assert!(rendered.contains("Person {name: String}"));
        assert!(rendered.contains("Who acted in The Matrix?"));
        assert!(!rendered.contains("{schema}"));
        assert!(!rendered.contains("{question}"));
    }

    #[test]
    fn repair_template_carries_the_query() {
        let rendered = CYPHER_REPAIR.render(&[
            ("schema", "Node properties:"),
            ("query", "MATCH (n) RETURN n"),
        ]);
        assert!(rendered.contains("MATCH (n) RETURN n"));
        assert!(!rendered.contains("{query}"));
    }

    #[test]
    fn answer_template_instructs_on_empty_context() {
        let rendered = ANSWER_SYNTHESIS.render(&[("context", "[]"), ("question", "Any movie?")]);
        assert!(rendered.contains("could not find the answer in the graph"));
        assert!(rendered.contains("Any movie?"));
    }
}
