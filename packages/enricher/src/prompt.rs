//! Fixed prompts for LLM-based enrichment.

use crate::llm::LlmRequest;

/// Answer meaning "no publisher named on the title page".
pub const UNKNOWN_PUBLISHER: &str = "UNKNOWN";

/// Temperature for title feature extraction.
pub const TITLE_FEATURES_TEMPERATURE: f64 = 0.3;

const TITLE_VERBS_INSTRUCTION: &str = "Please extract all verbs in this text";
const TITLE_VERBS_FORMAT: &str = "Plot only the verbs, as a simple list separated by comma";

const PUBLISHER_INSTRUCTION: &str = "Who is the publisher mentioned in this title page?";
const PUBLISHER_FORMAT: &str =
    "Answer only with a de-latinized name or UNKNOWN if publisher is not mentioned.";

const TITLE_FEATURES_INSTRUCTION: &str = "Please extract following properties, if available, \
from this 16-17th century title page: basic introduction, content description (separate to \
multiple description sections if necessary), process in which the book was established, author \
name, author description, publisher name, publisher description, mentions of Euclid, mentions \
of other names, privileges, dedications, mentions of translated-from, mentions of translated-to";

const TITLE_FEATURES_FORMAT: &str = "Use json format to output the entries. Keys will be the \
extracted properties. In the json values, keep original text. No need to specify values if \
property is not found in the text. Plot each property in a separate section. If a property is \
not available, leave it empty. In case of a property that mentions a description, separate to \
multiple description sections if necessary using a json array.";

/// Ask for the verbs of a title.
pub fn title_verbs_request(title: &str) -> LlmRequest {
    LlmRequest::new(TITLE_VERBS_INSTRUCTION, title, TITLE_VERBS_FORMAT)
}

/// Ask for the publisher named in the title page text.
pub fn publisher_request(title_page: &str) -> LlmRequest {
    LlmRequest::new(PUBLISHER_INSTRUCTION, title_page, PUBLISHER_FORMAT)
}

/// Ask for structured title-page features as JSON.
pub fn title_features_request(title: &str) -> LlmRequest {
    LlmRequest::new(TITLE_FEATURES_INSTRUCTION, title, TITLE_FEATURES_FORMAT)
        .with_temperature(TITLE_FEATURES_TEMPERATURE)
}
