//! Advisory text for a credibility band plus the media-literacy checklist

use crate::Category;

/// Guidance for a score, chosen by category band only
pub fn recommendations(score: u8) -> Vec<&'static str> {
    recommendations_for(Category::from_score(score))
}

pub fn recommendations_for(category: Category) -> Vec<&'static str> {
    match category {
        Category::Unreliable => vec![
            "High Risk: This content shows multiple red flags.",
            "Cross-check with established news organizations.",
            "Search for the original source of information.",
        ],
        Category::Questionable => vec![
            "Moderate Risk: This content requires verification.",
            "Verify from multiple credible sources.",
            "Check dates, names, and specific claims.",
        ],
        Category::Reliable => vec![
            "Lower Risk: Shows signs of reliability.",
            "Still recommended to verify from primary sources.",
            "Check the reputation of the source.",
        ],
    }
}

/// How to spot fake news. Constant; not derived from any analysis.
pub fn tips() -> &'static [&'static str] {
    &[
        "Check the Source: Is it a reputable organization?",
        "Verify Dates: Old stories are often recycled.",
        "Look for Citations: Reliable articles cite sources.",
        "Reverse Image Search: Check for manipulated images.",
        "Question Bias: Does it present multiple viewpoints?",
        "Consult Fact-checkers: Use Snopes, FactCheck.org",
        "Check About Page: Legitimate sites have clear info.",
        "Be Skeptical: If too good/bad to be true, verify it!",
    ]
}

/// Fact-checking services worth consulting
pub fn fact_check_resources() -> &'static [(&'static str, &'static str)] {
    &[
        ("Snopes", "https://www.snopes.com"),
        ("FactCheck.org", "https://www.factcheck.org"),
        ("PolitiFact", "https://www.politifact.com"),
        ("Alt News", "https://www.altnews.in"),
    ]
}
