// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it;
// this file holds only the cross-cutting pieces.

/// System prompt fragment that forces raw Markdown output.
pub const MARKDOWN_ONLY_SYSTEM: &str = "\
    Respond with the finished Markdown document only. \
    Do NOT wrap it in code fences. \
    Do NOT add commentary before or after the document.";

/// Instruction shared by every prompt that may produce figures.
pub const CITATION_INSTRUCTION: &str = "\
    Every statistic (percentages, dollar amounts, large counts) must carry a \
    Markdown link to its source on the same line or the line next to it. \
    Prefer data from the current or previous year.";
