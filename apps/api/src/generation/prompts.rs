// All LLM prompt constants for the article generation module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for article generation. Replace `{brand}` before sending.
pub const ARTICLE_SYSTEM: &str = "You are a technical hiring specialist at {brand} who has \
    vetted hundreds of developers and matched them with startups. \
    You write conversion-oriented landing page content for \"Hire [Technology] Developers\" \
    pages: specific, experienced, and written for founders and CTOs. \
    Use \"we\" when describing {brand}'s vetting work. \
    Never call {brand}'s developers freelancers.";

/// Article prompt template.
/// Replace: {tech}, {year}, {page_url}, {brand}, {structure_rules}, {citation_instruction},
///          {headings}, {keywords}, {high_terms}, {medium_terms}, {internal_links},
///          {external_links}
pub const ARTICLE_PROMPT_TEMPLATE: &str = r#"Write the landing page article for hiring {tech} developers in {year}.
Target page: {page_url}

{structure_rules}

{citation_instruction}

H2 OUTLINE (one H2 per line, in this order; adapt wording where needed and add your own
only if fewer than 8 are listed):
{headings}

TARGET KEYWORDS (include 5-10 of these word-for-word, spread across sections):
{keywords}

SEO TERMS, HIGH importance (use every one):
{high_terms}

SEO TERMS, MEDIUM importance (use most of them):
{medium_terms}

INTERNAL LINKS (use 2-3, Markdown format, never the target page itself):
{internal_links}

EXTERNAL LINKS (use 2-3 official sources, Markdown format):
{external_links}

BRAND RULES:
- Mention {brand} at least 3 times.
- Mention {tech} by name at least 5 times.
- Never describe {brand} developers as freelancers.
- Never link to competing hiring platforms.

Return the article as Markdown."#;

/// Structural rules the validator grades against. Keep in step with `GradingPolicy::default`.
pub const STRUCTURE_RULES: &str = "\
STRUCTURAL RULES (violations fail review):
1. No \"Introduction\" heading. Open with a 3-5 sentence paragraph, then the first H2.
2. Exactly 8 H2 (##) sections, roughly 300-400 words each.
3. H3 (###) subsections are allowed, but never directly under an H2 without body text first.
4. No \"Conclusion\" heading. Close with one paragraph that mentions the brand's service.
5. Total length 2800-3200 words.
6. 2-3 internal links and 2-3 external links.";

/// Hire pages on the brand's own site, offered as internal link candidates.
pub const INTERNAL_LINK_POOL: &[(&str, &str)] = &[
    ("AI engineers", "https://lemon.io/hire/ai-engineers/"),
    ("full-stack developers", "https://lemon.io/hire/full-stack-developers/"),
    ("front-end developers", "https://lemon.io/hire/front-end-developers/"),
    ("back-end developers", "https://lemon.io/hire/back-end-developers/"),
    ("mobile developers", "https://lemon.io/hire/mobile-developers/"),
    ("DevOps engineers", "https://lemon.io/hire/devops/"),
    ("Lemon.io", "https://lemon.io/"),
    ("Python developers", "https://lemon.io/hire/python-developers/"),
    ("JavaScript developers", "https://lemon.io/hire/javascript-developers/"),
    ("Node.js developers", "https://lemon.io/hire/node-js-developers/"),
    ("React developers", "https://lemon.io/hire/react-developers/"),
    ("Java developers", "https://lemon.io/hire/java-developers/"),
    ("Ruby on Rails developers", "https://lemon.io/hire/ruby-on-rails-developers/"),
    (".NET developers", "https://lemon.io/hire/net-developers/"),
    ("Django developers", "https://lemon.io/hire/django-developers/"),
    ("Next.js developers", "https://lemon.io/hire/next-js-developers/"),
];

/// Official sites per technology (lower-case display name), offered as external links.
pub const OFFICIAL_LINKS: &[(&str, &[(&str, &str)])] = &[
    (
        "python",
        &[
            ("Python", "https://www.python.org/"),
            ("Python documentation", "https://docs.python.org/"),
            ("PyPI", "https://pypi.org/"),
            ("Django", "https://www.djangoproject.com/"),
        ],
    ),
    (
        "javascript",
        &[
            ("JavaScript", "https://developer.mozilla.org/en-US/docs/Web/JavaScript"),
            ("MDN Web Docs", "https://developer.mozilla.org/"),
        ],
    ),
    (
        "typescript",
        &[
            ("TypeScript", "https://www.typescriptlang.org/"),
            ("TypeScript handbook", "https://www.typescriptlang.org/docs/"),
        ],
    ),
    (
        "node.js",
        &[
            ("Node.js", "https://nodejs.org/"),
            ("npm", "https://www.npmjs.com/"),
        ],
    ),
    (
        "react",
        &[
            ("React", "https://react.dev/"),
            ("React documentation", "https://react.dev/learn"),
        ],
    ),
    (
        "java",
        &[
            ("Java documentation", "https://docs.oracle.com/en/java/"),
            ("Spring", "https://spring.io/"),
        ],
    ),
    (
        "ruby on rails",
        &[
            ("Ruby", "https://www.ruby-lang.org/"),
            ("Ruby on Rails", "https://rubyonrails.org/"),
        ],
    ),
    (
        ".net",
        &[
            (".NET", "https://dotnet.microsoft.com/"),
            (".NET documentation", "https://learn.microsoft.com/en-us/dotnet/"),
        ],
    ),
    (
        "django",
        &[
            ("Django", "https://www.djangoproject.com/"),
            ("Django documentation", "https://docs.djangoproject.com/"),
        ],
    ),
];
