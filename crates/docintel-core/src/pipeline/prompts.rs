//! Prompt templates for the pipeline stages and answer synthesis

/// Stage 1: summary of the raw document
pub fn summary_prompt(text: &str) -> String {
    format!(
        r#"Summarize the following document concisely.
Focus on the main ideas, key points, and important details.
Keep the summary clear and informative.

Document:
{text}

Summary:"#
    )
}

/// Stage 2: bullet list of facts grounded in document and summary
pub fn facts_prompt(text: &str, summary: &str) -> String {
    format!(
        r#"Based on the document and its summary, extract the most important facts.
List each fact as a separate bullet point. Be specific and factual.

Document:
{text}

Summary:
{summary}

Extract 5-10 key facts in bullet point format:"#
    )
}

/// Stage 3: typed questions over summary and facts
pub fn questions_prompt(summary: &str, facts: &[String]) -> String {
    let facts_text = facts
        .iter()
        .map(|fact| format!("- {}", fact))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Based on the document, summary, and extracted facts, generate 5-7 insightful questions
that test understanding of the content. Include both factual and analytical questions.

Document Summary:
{summary}

Key Facts:
{facts_text}

Generate questions in the following format:
Q: [Question]
Type: [factual/analytical/inference]

Questions:"#
    )
}

/// Answer a question from retrieved memory context
pub fn answer_prompt(context: &str, question: &str) -> String {
    format!(
        r#"Based on the following context, answer the question.

Context:
{context}

Question: {question}

Answer:"#
    )
}
