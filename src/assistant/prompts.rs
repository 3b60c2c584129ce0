use crate::dispatch::Request;

const FALLACY_INSTRUCTIONS: &str = "Analyze for logical fallacies. \
Format: FALLACY: [Name] SEGMENT: [Exact words] EXPLANATION: [Short]. Text: ";

/// Fallacy detection never uses search grounding.
pub fn fallacy_request(text: &str) -> Request {
    Request::new(format!("{FALLACY_INSTRUCTIONS}{text}"), false)
}

/// The claim is sent verbatim with search grounding enabled.
pub fn verification_request(claim: &str) -> Request {
    Request::new(claim, true)
}
